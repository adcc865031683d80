//! Field validation
//!
//! Rules run in a fixed order and the first failure wins:
//!
//! 1. disabled fields are always valid
//! 2. required + empty -> "<label> is required"
//! 3. empty and not required -> valid, nothing else runs
//! 4. English-only character set
//! 5. Arabic-only character set
//! 6. email shape
//! 7. number parse, then `min` / `max`
//! 8. `pattern`
//! 9. `min_length` / `max_length`
//! 10. `custom` predicate, last
//!
//! Image fields only go through rules 1-3 here; the file itself is checked by
//! [`validate_image_file`]. Repeatable groups have their own rule,
//! [`validate_repeatable_items`].

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::messages;
use super::schema::{
    CharacterSet, FieldDescriptor, FieldKind, FormSchema, ImageConstraints, RepeatableGroupConfig,
};
use super::value::{FieldValue, FileUpload, FormValues, RepeatableGroupItem};

/// Punctuation allowed alongside either character set
const PUNCTUATION: &str = r##"\s\-_.,!?@#$%^&*()+=<>\[\]{}|\\:;"'`~"##;

lazy_static! {
    static ref ENGLISH_ONLY: Regex =
        Regex::new(&format!(r"^[A-Za-z0-9{}]*$", PUNCTUATION)).expect("english charset regex");
    static ref ARABIC_ONLY: Regex =
        Regex::new(&format!(r"^[\x{{0600}}-\x{{06FF}}0-9{}]*$", PUNCTUATION))
            .expect("arabic charset regex");
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex");
}

/// An error attached to one field (or one sub-record path)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Whole-form check run after the per-field rules
pub type FormValidator = dyn Fn(&FormValues) -> Vec<ValidationError>;

/// Validate one value against its descriptor's static `required` flag
pub fn validate_field(field: &FieldDescriptor, value: &FieldValue) -> Option<String> {
    check(field, field.required, value)
}

/// Validate one value with `required_when` resolved against the whole form
pub fn validate_field_in(
    field: &FieldDescriptor,
    value: &FieldValue,
    values: &FormValues,
) -> Option<String> {
    check(field, field.is_required(values), value)
}

fn check(field: &FieldDescriptor, required: bool, value: &FieldValue) -> Option<String> {
    if field.disabled {
        return None;
    }

    if let FieldKind::RepeatableGroup(config) = &field.kind {
        let items = value.as_items().unwrap_or(&[]);
        return validate_repeatable_items(field, config, items)
            .into_iter()
            .next()
            .map(|e| e.message);
    }

    if value.is_empty() {
        return required.then(|| messages::required(&field.label));
    }

    if let FieldKind::Image(constraints) = &field.kind {
        // Stored URLs are trusted, committed files are re-checked
        return match value {
            FieldValue::File(file) => validate_image_file(constraints, file),
            _ => None,
        };
    }

    let rules = &field.validation;
    let text = value.as_text();

    match rules.character_set {
        Some(CharacterSet::EnglishOnly) if !ENGLISH_ONLY.is_match(&text) => {
            return Some(messages::english_only(&field.label));
        }
        Some(CharacterSet::ArabicOnly) if !ARABIC_ONLY.is_match(&text) => {
            return Some(messages::arabic_only(&field.label));
        }
        _ => {}
    }

    if matches!(field.kind, FieldKind::Email) && !EMAIL.is_match(text.trim()) {
        return Some(messages::invalid_email());
    }

    if matches!(field.kind, FieldKind::Number) {
        let number = match value {
            FieldValue::Number(n) => Some(*n),
            _ => text.trim().parse::<f64>().ok(),
        };
        let n = match number {
            Some(n) if n.is_finite() => n,
            _ => return Some(messages::not_a_number(&field.label)),
        };
        if let Some(min) = rules.min {
            if n < min {
                return Some(messages::below_min(&field.label, min));
            }
        }
        if let Some(max) = rules.max {
            if n > max {
                return Some(messages::above_max(&field.label, max));
            }
        }
    }

    if let Some(pattern) = &rules.pattern {
        let matched = match Regex::new(pattern) {
            Ok(re) => re.is_match(&text),
            Err(e) => {
                tracing::warn!(field = %field.name, "Pattern does not compile: {}", e);
                false
            }
        };
        if !matched {
            return Some(
                rules
                    .pattern_message
                    .clone()
                    .unwrap_or_else(messages::invalid_format),
            );
        }
    }

    let len = text.chars().count();
    if let Some(min) = rules.min_length {
        if len < min {
            return Some(messages::too_short(&field.label, min));
        }
    }
    if let Some(max) = rules.max_length {
        if len > max {
            return Some(messages::too_long(&field.label, max));
        }
    }

    rules.custom.as_ref().and_then(|rule| rule.check(value))
}

/// MIME-type membership, then size ceiling
pub fn validate_image_file(constraints: &ImageConstraints, file: &FileUpload) -> Option<String> {
    if !constraints
        .allowed_types
        .iter()
        .any(|t| t.eq_ignore_ascii_case(&file.mime_type))
    {
        return Some(messages::file_type(&constraints.allowed_types));
    }
    if file.size > constraints.max_file_size {
        return Some(messages::file_size(constraints.max_file_size));
    }
    None
}

/// The list must be non-empty and every item must carry both locale texts.
///
/// Errors on items use `name[i].description.en` / `name[i].description.ar`
/// as their field path.
pub fn validate_repeatable_items(
    field: &FieldDescriptor,
    config: &RepeatableGroupConfig,
    items: &[RepeatableGroupItem],
) -> Vec<ValidationError> {
    if field.disabled {
        return Vec::new();
    }
    if items.is_empty() {
        return vec![ValidationError::new(
            field.name.clone(),
            messages::group_empty(&config.item_label),
        )];
    }

    let mut errors = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        if item.description.primary.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("{}[{}].description.en", field.name, idx),
                messages::group_text_required(&config.primary_label, &config.item_label, idx + 1),
            ));
        }
        if item.description.secondary.trim().is_empty() {
            errors.push(ValidationError::new(
                format!("{}[{}].description.ar", field.name, idx),
                messages::group_text_required(&config.secondary_label, &config.item_label, idx + 1),
            ));
        }
    }
    errors
}

/// Validate every enabled field in schema order, then the whole-form check
pub fn validate_all(
    schema: &FormSchema,
    values: &FormValues,
    form_validator: Option<&FormValidator>,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let null = FieldValue::Null;

    for field in schema.fields() {
        if field.disabled {
            continue;
        }
        let value = values.get(&field.name).unwrap_or(&null);
        match &field.kind {
            FieldKind::RepeatableGroup(config) => {
                let items = value.as_items().unwrap_or(&[]);
                errors.extend(validate_repeatable_items(field, config, items));
            }
            _ => {
                if let Some(message) = validate_field_in(field, value, values) {
                    errors.push(ValidationError::new(field.name.clone(), message));
                }
            }
        }
    }

    if let Some(validator) = form_validator {
        errors.extend(validator(values));
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::schema::{FormSection, ValidationRules};

    fn text(label: &str) -> FieldDescriptor {
        FieldDescriptor::new("field", label, FieldKind::Text)
    }

    #[test]
    fn test_required_empty_values() {
        let field = text("Name").required();
        for value in [FieldValue::text(""), FieldValue::text("   "), FieldValue::Null] {
            assert_eq!(validate_field(&field, &value), Some("Name is required".to_string()));
        }
    }

    #[test]
    fn test_optional_empty_is_valid() {
        let field = text("Name").english_only().length(Some(3), None);
        assert_eq!(validate_field(&field, &FieldValue::text("")), None);
        assert_eq!(validate_field(&field, &FieldValue::Null), None);
    }

    #[test]
    fn test_disabled_always_valid() {
        let field = text("Name").required().disabled().english_only();
        assert_eq!(validate_field(&field, &FieldValue::text("")), None);
        assert_eq!(validate_field(&field, &FieldValue::text("مرحبا")), None);
    }

    #[test]
    fn test_number_range() {
        let field = FieldDescriptor::new("age", "Age", FieldKind::Number).range(0.0, 100.0);
        assert!(validate_field(&field, &FieldValue::text("150")).is_some());
        assert_eq!(validate_field(&field, &FieldValue::text("50")), None);
        assert!(validate_field(&field, &FieldValue::text("-1")).is_some());
        assert_eq!(
            validate_field(&field, &FieldValue::text("abc")),
            Some("Age must be a valid number".to_string())
        );
        assert_eq!(validate_field(&field, &FieldValue::Number(100.0)), None);
        assert!(validate_field(&field, &FieldValue::text("inf")).is_some());
    }

    #[test]
    fn test_character_sets() {
        let english = text("Title").english_only();
        assert_eq!(validate_field(&english, &FieldValue::text("Hello 123!")), None);
        assert!(validate_field(&english, &FieldValue::text("مرحبا")).is_some());

        let arabic = text("Title").arabic_only();
        assert_eq!(validate_field(&arabic, &FieldValue::text("مرحبا 123!")), None);
        assert!(validate_field(&arabic, &FieldValue::text("Hello")).is_some());
    }

    #[test]
    fn test_email_shape() {
        let field = FieldDescriptor::new("email", "Email", FieldKind::Email);
        assert_eq!(validate_field(&field, &FieldValue::text("coach@gym.io")), None);
        assert!(validate_field(&field, &FieldValue::text("coach@gym")).is_some());
        assert!(validate_field(&field, &FieldValue::text("coach gym@x.io")).is_some());
    }

    #[test]
    fn test_pattern_message() {
        let field = text("Phone").with_rules(ValidationRules {
            pattern: Some(r"^\+?[0-9]{8,15}$".into()),
            pattern_message: Some("Enter a valid phone number".into()),
            ..Default::default()
        });
        assert_eq!(validate_field(&field, &FieldValue::text("+201001234567")), None);
        assert_eq!(
            validate_field(&field, &FieldValue::text("12ab")),
            Some("Enter a valid phone number".to_string())
        );

        let generic = text("Code").with_rules(ValidationRules {
            pattern: Some("^[A-Z]{3}$".into()),
            ..Default::default()
        });
        assert_eq!(
            validate_field(&generic, &FieldValue::text("abc")),
            Some("Invalid format".to_string())
        );
    }

    #[test]
    fn test_length_counts_characters() {
        let field = text("Bio").length(Some(2), Some(5));
        assert!(validate_field(&field, &FieldValue::text("a")).is_some());
        assert_eq!(validate_field(&field, &FieldValue::text("مرحبا")), None);
        assert!(validate_field(&field, &FieldValue::text("abcdef")).is_some());
    }

    #[test]
    fn test_custom_runs_last() {
        let field = text("Name")
            .length(None, Some(3))
            .custom(|_| Some("custom failure".to_string()));
        // Generic failure wins over the custom rule
        assert_eq!(
            validate_field(&field, &FieldValue::text("abcdef")),
            Some("Name must be at most 3 characters".to_string())
        );
        assert_eq!(
            validate_field(&field, &FieldValue::text("abc")),
            Some("custom failure".to_string())
        );
    }

    #[test]
    fn test_image_file_constraints() {
        let constraints = ImageConstraints {
            max_file_size: 1024 * 1024,
            allowed_types: vec!["image/png".into()],
        };
        let big_png = FileUpload {
            name: "big.png".into(),
            mime_type: "image/png".into(),
            size: 2 * 1024 * 1024,
            bytes: Vec::new(),
        };
        let jpeg = FileUpload {
            name: "a.jpg".into(),
            mime_type: "image/jpeg".into(),
            size: 500 * 1024,
            bytes: Vec::new(),
        };
        let png = FileUpload {
            name: "a.png".into(),
            mime_type: "image/png".into(),
            size: 500 * 1024,
            bytes: Vec::new(),
        };

        assert_eq!(
            validate_image_file(&constraints, &big_png),
            Some("File size must not exceed 1MB".to_string())
        );
        assert_eq!(
            validate_image_file(&constraints, &jpeg),
            Some("Only image/png files are allowed".to_string())
        );
        assert_eq!(validate_image_file(&constraints, &png), None);
    }

    #[test]
    fn test_image_field_skips_textual_rules() {
        let field = FieldDescriptor::new("photo", "Photo", FieldKind::Image(ImageConstraints::default()))
            .required()
            .english_only();
        assert_eq!(
            validate_field(&field, &FieldValue::Null),
            Some("Photo is required".to_string())
        );
        assert_eq!(
            validate_field(&field, &FieldValue::text("https://cdn/صورة.png")),
            None
        );
    }

    #[test]
    fn test_validate_all_rechecks_committed_file() {
        let constraints = ImageConstraints {
            max_file_size: 1024 * 1024,
            allowed_types: vec!["image/png".into()],
        };
        let schema = FormSchema::new(vec![FormSection::new(
            "Photo",
            vec![FieldDescriptor::new("photo", "Photo", FieldKind::Image(constraints))],
        )]);
        let mut values = FormValues::new();
        values.insert(
            "photo".into(),
            FieldValue::File(FileUpload {
                name: "big.png".into(),
                mime_type: "image/png".into(),
                size: 2 * 1024 * 1024,
                bytes: Vec::new(),
            }),
        );

        let errors = validate_all(&schema, &values, None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "photo");
        assert!(errors[0].message.contains("1MB"));
    }

    fn meal_schema() -> FormSchema {
        FormSchema::new(vec![FormSection::new(
            "Meal",
            vec![
                FieldDescriptor::new("name", "Name", FieldKind::Text).required(),
                FieldDescriptor::new(
                    "mealItems",
                    "Meal items",
                    FieldKind::RepeatableGroup(RepeatableGroupConfig::default()),
                ),
            ],
        )])
    }

    #[test]
    fn test_validate_all_empty_group() {
        let mut values = FormValues::new();
        values.insert("name".into(), FieldValue::text("Breakfast"));
        values.insert("mealItems".into(), FieldValue::Items(vec![]));

        let errors = validate_all(&meal_schema(), &values, None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "mealItems");
    }

    #[test]
    fn test_validate_all_half_filled_item() {
        let mut values = FormValues::new();
        values.insert("name".into(), FieldValue::text("Breakfast"));
        values.insert(
            "mealItems".into(),
            FieldValue::Items(vec![RepeatableGroupItem::new("Oats", "")]),
        );

        let errors = validate_all(&meal_schema(), &values, None);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "mealItems[0].description.ar");
        assert!(errors[0].message.contains("Arabic description"));
    }

    #[test]
    fn test_validate_all_form_validator_appended() {
        let mut values = FormValues::new();
        values.insert(
            "mealItems".into(),
            FieldValue::Items(vec![RepeatableGroupItem::new("Oats", "شوفان")]),
        );
        let validator = |_: &FormValues| vec![ValidationError::new("form", "cross-field")];

        let errors = validate_all(&meal_schema(), &values, Some(&validator));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[1].field, "form");
    }
}
