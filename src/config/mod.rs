use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub mod validator;

use crate::cli::Cli;
use crate::forms::{
    CharacterCounter, FieldDescriptor, FieldKind, FormSchema, ImageConstraints, PaginationConfig,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub forms: FormSettings,
    /// Directory of extra schema files (json, yaml, toml), one form per file
    #[serde(default)]
    pub schemas_dir: Option<String>,
}

/// Defaults applied to every rendered form
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FormSettings {
    /// Search debounce of paginated selects, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Counter ceiling of textareas without a `maxLength` rule
    #[serde(default = "default_textarea_max_length")]
    pub textarea_max_length: usize,
    /// Upload ceiling in bytes for image fields without their own limit
    #[serde(default = "default_max_image_size")]
    pub max_image_size: u64,
    #[serde(default = "default_allowed_image_types")]
    pub allowed_image_types: Vec<String>,
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_page_size() -> usize {
    10
}

fn default_textarea_max_length() -> usize {
    crate::forms::render::DEFAULT_TEXTAREA_MAX_LENGTH
}

fn default_max_image_size() -> u64 {
    crate::forms::schema::DEFAULT_MAX_FILE_SIZE
}

fn default_allowed_image_types() -> Vec<String> {
    ImageConstraints::default().allowed_types
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            page_size: default_page_size(),
            textarea_max_length: default_textarea_max_length(),
            max_image_size: default_max_image_size(),
            allowed_image_types: default_allowed_image_types(),
        }
    }
}

impl FormSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn image_constraints(&self) -> ImageConstraints {
        ImageConstraints {
            max_file_size: self.max_image_size,
            allowed_types: self.allowed_image_types.clone(),
        }
    }

    /// Counter for a textarea, using the configured ceiling when the field
    /// sets no `max_length`
    pub fn counter(&self, field: &FieldDescriptor, text: &str) -> CharacterCounter {
        CharacterCounter::with_ceiling(text, field.validation.max_length, self.textarea_max_length)
    }

    /// Replace built-in defaults in `schema` with the configured ones.
    ///
    /// Fields that set their own page size or image constraints keep them.
    /// Validation rules are left alone.
    pub fn apply(&self, schema: &mut FormSchema) {
        let stock_images = ImageConstraints::default();
        let stock_page_size = PaginationConfig::new("").page_size;
        for section in &mut schema.sections {
            for field in &mut section.fields {
                match &mut field.kind {
                    FieldKind::Image(constraints) if *constraints == stock_images => {
                        *constraints = self.image_constraints();
                    }
                    FieldKind::SelectPagination(cfg) if cfg.page_size == stock_page_size => {
                        cfg.page_size = self.page_size;
                    }
                    _ => {}
                }
            }
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file, env vars, CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(cli.config.clone()).required(false))
            .add_source(Environment::with_prefix("GYMDASH").separator("__"))
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);
        settings.check()?;

        Ok(settings)
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = Path::new(root).join("gymdash");
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Environment::with_prefix("GYMDASH").separator("__"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        settings.check()?;
        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(dir) = &cli.schemas_dir {
            self.schemas_dir = Some(dir.to_string_lossy().into_owned());
        }
        if let Some(page_size) = cli.page_size {
            self.forms.page_size = page_size;
        }
        if let Some(debounce_ms) = cli.debounce_ms {
            self.forms.debounce_ms = debounce_ms;
        }
    }

    fn check(&self) -> Result<(), anyhow::Error> {
        validator::SettingsValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }

    /// Load every schema file in `schemas_dir`, keyed by file stem
    pub fn load_schemas(&self) -> Result<BTreeMap<String, FormSchema>, anyhow::Error> {
        let mut schemas = BTreeMap::new();
        let Some(dir) = &self.schemas_dir else {
            return Ok(schemas);
        };

        let pattern = format!("{}/*", dir);
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) => {
                    let ext = path.extension().and_then(|e| e.to_str());
                    if !matches!(ext, Some("json" | "yaml" | "yml" | "toml")) {
                        continue;
                    }
                    let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                        continue;
                    };
                    let mut schema = FormSchema::from_path(&path)?;
                    self.forms.apply(&mut schema);
                    tracing::debug!(schema = stem, path = %path.display(), "Loaded external schema");
                    schemas.insert(stem.to_string(), schema);
                }
                Err(e) => tracing::warn!("Failed to read glob entry: {}", e),
            }
        }
        Ok(schemas)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            forms: FormSettings::default(),
            schemas_dir: None,
        }
    }
}
