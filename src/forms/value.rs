//! Values held in form state

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Mapping of field name to current value
pub type FormValues = BTreeMap<String, FieldValue>;

/// A single value slot in form state
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    File(FileUpload),
    Items(Vec<RepeatableGroupItem>),
}

impl FieldValue {
    pub fn text(s: impl Into<String>) -> Self {
        FieldValue::Text(s.into())
    }

    /// Null, or text that is empty after trimming
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Items(items) => items.is_empty(),
            FieldValue::Bool(_) | FieldValue::Number(_) | FieldValue::File(_) => false,
        }
    }

    /// String representation used by the textual validators
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Null => Cow::Borrowed(""),
            FieldValue::Text(s) => Cow::Borrowed(s.as_str()),
            FieldValue::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            FieldValue::Number(n) => Cow::Owned(format_number(*n)),
            FieldValue::File(file) => Cow::Borrowed(file.name.as_str()),
            FieldValue::Items(items) => Cow::Owned(format!("{} items", items.len())),
        }
    }

    pub fn as_bool(&self) -> bool {
        match self {
            FieldValue::Bool(b) => *b,
            FieldValue::Text(s) => s == "true",
            _ => false,
        }
    }

    pub fn as_file(&self) -> Option<&FileUpload> {
        match self {
            FieldValue::File(file) => Some(file),
            _ => None,
        }
    }

    pub fn as_items(&self) -> Option<&[RepeatableGroupItem]> {
        match self {
            FieldValue::Items(items) => Some(items),
            _ => None,
        }
    }

    /// Loose equality against a condition operand (`"duration"`, `"true"`, `"5"`)
    pub fn matches(&self, operand: &str) -> bool {
        self.as_text() == operand
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

/// Integers print without a trailing `.0`
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

// ============================================================================
// Files
// ============================================================================

/// A file picked through browse or drag-and-drop
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpload {
    pub name: String,
    pub mime_type: String,
    /// Size in bytes as reported by the browser
    pub size: u64,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size: bytes.len() as u64,
            bytes,
        }
    }

    /// `data:` URL for an in-page preview
    pub fn data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

// ============================================================================
// Repeatable group items
// ============================================================================

/// Which locale text of a sub-record is addressed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Locale {
    Primary,
    Secondary,
}

/// Description in both dashboard locales
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(rename = "en", alias = "primary", default)]
    pub primary: String,
    #[serde(rename = "ar", alias = "secondary", default)]
    pub secondary: String,
}

impl LocalizedText {
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Primary => &self.primary,
            Locale::Secondary => &self.secondary,
        }
    }

    pub fn set(&mut self, locale: Locale, text: impl Into<String>) {
        match locale {
            Locale::Primary => self.primary = text.into(),
            Locale::Secondary => self.secondary = text.into(),
        }
    }
}

/// One sub-record of a repeatable group (a meal item)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatableGroupItem {
    pub description: LocalizedText,
}

impl RepeatableGroupItem {
    pub fn new(primary: impl Into<String>, secondary: impl Into<String>) -> Self {
        Self {
            description: LocalizedText {
                primary: primary.into(),
                secondary: secondary.into(),
            },
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.description.primary.trim().is_empty() && !self.description.secondary.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emptiness() {
        assert!(FieldValue::Null.is_empty());
        assert!(FieldValue::text("   ").is_empty());
        assert!(!FieldValue::text(" a ").is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
    }

    #[test]
    fn test_number_text() {
        assert_eq!(FieldValue::Number(50.0).as_text(), "50");
        assert_eq!(FieldValue::Number(2.5).as_text(), "2.5");
    }

    #[test]
    fn test_untagged_values_from_json() {
        let values: FormValues = serde_json::from_str(
            r#"{"name":"Sara","age":31,"active":true,"note":null,
                "items":[{"description":{"en":"Oats","ar":"شوفان"}}]}"#,
        )
        .unwrap();

        assert_eq!(values["name"], FieldValue::text("Sara"));
        assert_eq!(values["age"], FieldValue::Number(31.0));
        assert_eq!(values["active"], FieldValue::Bool(true));
        assert_eq!(values["note"], FieldValue::Null);
        let items = values["items"].as_items().unwrap();
        assert_eq!(items[0].description.secondary, "شوفان");
    }

    #[test]
    fn test_data_url() {
        let file = FileUpload::new("a.png", "image/png", vec![1, 2, 3]);
        assert_eq!(file.size, 3);
        assert_eq!(file.data_url(), "data:image/png;base64,AQID");
    }
}
