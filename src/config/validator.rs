use thiserror::Error;

use crate::config::Settings;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct SettingsValidator;

impl SettingsValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<SettingsError>> {
        let mut errors = Vec::new();
        let forms = &settings.forms;

        if forms.page_size == 0 {
            errors.push(SettingsError::InvalidValue {
                field: "forms.page_size".to_string(),
                reason: "Page size must be greater than 0".to_string(),
            });
        }

        if forms.debounce_ms > 5_000 {
            errors.push(SettingsError::InvalidValue {
                field: "forms.debounce_ms".to_string(),
                reason: format!("{}ms would make search feel unresponsive", forms.debounce_ms),
            });
        }

        if forms.textarea_max_length == 0 {
            errors.push(SettingsError::InvalidValue {
                field: "forms.textarea_max_length".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if forms.max_image_size == 0 {
            errors.push(SettingsError::InvalidValue {
                field: "forms.max_image_size".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if forms.allowed_image_types.is_empty() {
            errors.push(SettingsError::MissingField(
                "forms.allowed_image_types".to_string(),
            ));
        }
        for (idx, mime) in forms.allowed_image_types.iter().enumerate() {
            if !mime.starts_with("image/") {
                errors.push(SettingsError::InvalidValue {
                    field: format!("forms.allowed_image_types[{}]", idx),
                    reason: format!("'{}' is not an image MIME type", mime),
                });
            }
        }

        if let Some(dir) = &settings.schemas_dir {
            if dir.trim().is_empty() {
                errors.push(SettingsError::MissingField("schemas_dir".to_string()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
