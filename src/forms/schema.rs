//! Declarative form schema
//!
//! A [`FormSchema`] is an ordered list of sections, each holding the
//! [`FieldDescriptor`]s rendered in that section. Descriptors are plain data
//! and deserialize from JSON, YAML or TOML; the only runtime-only piece is
//! the optional [`CustomRule`] predicate.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::error::FormError;
use super::value::{FieldValue, FormValues, RepeatableGroupItem};

// ============================================================================
// Field kinds
// ============================================================================

/// One `{value, label}` choice of a select or radio field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Remote list source settings for a `selectPagination` field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationConfig {
    /// REST collection the options are fetched from (e.g. `categories`)
    pub resource: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Label of the empty sentinel option; selecting it clears the field
    #[serde(default = "default_all_label")]
    pub all_label: String,
}

fn default_page_size() -> usize {
    10
}

fn default_all_label() -> String {
    "All".to_string()
}

impl PaginationConfig {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            page_size: default_page_size(),
            all_label: default_all_label(),
        }
    }
}

/// Upload constraints of an image field
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConstraints {
    /// Maximum size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    #[serde(default = "default_allowed_types")]
    pub allowed_types: Vec<String>,
}

pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_allowed_types() -> Vec<String> {
    vec![
        "image/png".to_string(),
        "image/jpeg".to_string(),
        "image/webp".to_string(),
    ]
}

impl Default for ImageConstraints {
    fn default() -> Self {
        Self {
            max_file_size: default_max_file_size(),
            allowed_types: default_allowed_types(),
        }
    }
}

/// Labels for the sub-records of a repeatable group
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatableGroupConfig {
    #[serde(default = "default_item_label")]
    pub item_label: String,
    #[serde(default = "default_primary_label")]
    pub primary_label: String,
    #[serde(default = "default_secondary_label")]
    pub secondary_label: String,
}

fn default_item_label() -> String {
    "Item".to_string()
}

fn default_primary_label() -> String {
    "English description".to_string()
}

fn default_secondary_label() -> String {
    "Arabic description".to_string()
}

impl Default for RepeatableGroupConfig {
    fn default() -> Self {
        Self {
            item_label: default_item_label(),
            primary_label: default_primary_label(),
            secondary_label: default_secondary_label(),
        }
    }
}

/// Input type of a field, with the data each type needs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    Text,
    Email,
    Password,
    Number,
    Date,
    Url,
    Textarea {
        #[serde(default)]
        rows: Option<u32>,
    },
    Select {
        options: Vec<SelectOption>,
    },
    Radio {
        options: Vec<SelectOption>,
    },
    SelectPagination(PaginationConfig),
    Switch,
    Image(ImageConstraints),
    RepeatableGroup(RepeatableGroupConfig),
}

impl FieldKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
            FieldKind::Number => "number",
            FieldKind::Date => "date",
            FieldKind::Url => "url",
            FieldKind::Textarea { .. } => "textarea",
            FieldKind::Select { .. } => "select",
            FieldKind::Radio { .. } => "radio",
            FieldKind::SelectPagination(_) => "selectPagination",
            FieldKind::Switch => "switch",
            FieldKind::Image(_) => "image",
            FieldKind::RepeatableGroup(_) => "repeatableGroup",
        }
    }

    /// Options of a static choice field
    pub fn options(&self) -> Option<&[SelectOption]> {
        match self {
            FieldKind::Select { options } | FieldKind::Radio { options } => Some(options),
            _ => None,
        }
    }

    /// Value a field starts with when the initial data omits it
    pub fn default_value(&self) -> FieldValue {
        match self {
            FieldKind::Switch => FieldValue::Bool(false),
            FieldKind::Image(_) => FieldValue::Null,
            FieldKind::RepeatableGroup(_) => FieldValue::Items(vec![RepeatableGroupItem::default()]),
            _ => FieldValue::Text(String::new()),
        }
    }
}

// ============================================================================
// Validation rules
// ============================================================================

/// Restriction of the characters a text value may contain
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CharacterSet {
    EnglishOnly,
    ArabicOnly,
}

/// Caller-supplied predicate; a returned message is the field's error
#[derive(Clone)]
pub struct CustomRule(Arc<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>);

impl CustomRule {
    pub fn new<F>(rule: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(rule))
    }

    pub fn check(&self, value: &FieldValue) -> Option<String> {
        (self.0)(value)
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CustomRule(..)")
    }
}

impl PartialEq for CustomRule {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Textual validation rules of a field
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_set: Option<CharacterSet>,
    #[serde(skip)]
    pub custom: Option<CustomRule>,
}

impl ValidationRules {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// `field == equals` against the current form values
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldCondition {
    pub field: String,
    pub equals: String,
}

impl FieldCondition {
    pub fn holds(&self, values: &FormValues) -> bool {
        values
            .get(&self.field)
            .map(|v| v.matches(&self.equals))
            .unwrap_or(false)
    }
}

// ============================================================================
// Field descriptor
// ============================================================================

/// Declarative description of one form input
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_when: Option<FieldCondition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default, skip_serializing_if = "ValidationRules::is_empty")]
    pub validation: ValidationRules,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            disabled: false,
            required_when: None,
            placeholder: None,
            hint: None,
            validation: ValidationRules::default(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    pub fn required_when(mut self, field: impl Into<String>, equals: impl Into<String>) -> Self {
        self.required_when = Some(FieldCondition {
            field: field.into(),
            equals: equals.into(),
        });
        self
    }

    pub fn placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    pub fn with_rules(mut self, rules: ValidationRules) -> Self {
        self.validation = rules;
        self
    }

    pub fn english_only(mut self) -> Self {
        self.validation.character_set = Some(CharacterSet::EnglishOnly);
        self
    }

    pub fn arabic_only(mut self) -> Self {
        self.validation.character_set = Some(CharacterSet::ArabicOnly);
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.validation.min = Some(min);
        self.validation.max = Some(max);
        self
    }

    pub fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.validation.min_length = min;
        self.validation.max_length = max;
        self
    }

    pub fn custom<F>(mut self, rule: F) -> Self
    where
        F: Fn(&FieldValue) -> Option<String> + Send + Sync + 'static,
    {
        self.validation.custom = Some(CustomRule::new(rule));
        self
    }

    /// Static `required` flag or a `required_when` condition that holds
    pub fn is_required(&self, values: &FormValues) -> bool {
        self.required
            || self
                .required_when
                .as_ref()
                .map(|c| c.holds(values))
                .unwrap_or(false)
    }
}

// ============================================================================
// Sections and schema
// ============================================================================

/// Header metadata of a section, aligned by index with a field row
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionHeader {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormSection {
    #[serde(flatten)]
    pub header: SectionHeader,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
}

impl FormSection {
    pub fn new(title: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            header: SectionHeader {
                title: title.into(),
                ..Default::default()
            },
            fields,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.header.icon = Some(icon.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.header.description = Some(description.into());
        self
    }
}

/// Ordered grouping of fields into sections
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub sections: Vec<FormSection>,
}

impl FormSchema {
    pub fn new(sections: Vec<FormSection>) -> Self {
        Self { sections }
    }

    /// Build from field rows plus a parallel array of section headers
    pub fn from_rows(
        rows: Vec<Vec<FieldDescriptor>>,
        headers: Vec<SectionHeader>,
    ) -> Result<Self, FormError> {
        if rows.len() != headers.len() {
            return Err(FormError::SectionMismatch {
                rows: rows.len(),
                sections: headers.len(),
            });
        }
        let sections = rows
            .into_iter()
            .zip(headers)
            .map(|(fields, header)| FormSection { header, fields })
            .collect();
        let schema = Self { sections };
        schema.validate()?;
        Ok(schema)
    }

    /// Load a schema file, dispatching on the extension (json, yaml/yml, toml)
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FormError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let schema: FormSchema = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };
        schema.validate()?;
        Ok(schema)
    }

    /// All fields in render order
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FieldDescriptor> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.fields.iter_mut())
            .find(|f| f.name == name)
    }

    pub fn has_repeatable_group(&self) -> bool {
        self.fields()
            .any(|f| matches!(f.kind, FieldKind::RepeatableGroup(_)))
    }

    /// Check name uniqueness and that every pattern compiles
    pub fn validate(&self) -> Result<(), FormError> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for (idx, section) in self.sections.iter().enumerate() {
            for field in &section.fields {
                if let Some(first) = seen.insert(field.name.as_str(), idx) {
                    return Err(FormError::DuplicateField {
                        name: field.name.clone(),
                        first,
                        second: idx,
                    });
                }
                if let Some(pattern) = &field.validation.pattern {
                    regex::Regex::new(pattern).map_err(|e| FormError::InvalidPattern {
                        field: field.name.clone(),
                        reason: e.to_string(),
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Initial data merged over the per-kind defaults of every field
    pub fn seed_values(&self, initial: &FormValues) -> FormValues {
        let mut values: FormValues = self
            .fields()
            .map(|f| (f.name.clone(), f.kind.default_value()))
            .collect();
        for (name, value) in initial {
            values.insert(name.clone(), value.clone());
        }
        values
    }
}
