//! Subcommand handlers behind the `gymdash` binary

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::cli::Command;
use crate::config::{FormSettings, Settings};
use crate::forms::{FieldKind, FormSchema, FormStateController, FormValues, SubmitOutcome};
use crate::screens;

/// Run `command`, writing its report to `out`.
///
/// Returns `Ok(false)` when the command ran but found problems
/// (a malformed schema or a record that fails validation).
pub fn run(command: &Command, settings: &Settings, out: &mut impl Write) -> anyhow::Result<bool> {
    match command {
        Command::List => {
            let external = settings.load_schemas()?;
            list(&external, out)?;
            Ok(true)
        }
        Command::Schema { name } => {
            let schema = resolve(name, settings)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
            Ok(true)
        }
        Command::Check { path } => check(path, out),
        Command::Validate { schema, data } => {
            let schema = resolve(schema, settings)?;
            validate_record(schema, data, &settings.forms, out)
        }
    }
}

fn list(external: &BTreeMap<String, FormSchema>, out: &mut impl Write) -> anyhow::Result<()> {
    for screen in screens::ALL {
        let schema = screen.schema();
        writeln!(
            out,
            "{:<12} {:<12} {} fields /api/{}",
            screen.name(),
            screen.title(),
            schema.fields().count(),
            screen.resource()
        )?;
    }
    for (name, schema) in external {
        writeln!(out, "{:<12} {:<12} {} fields", name, "(file)", schema.fields().count())?;
    }
    Ok(())
}

/// Built-in screen first, then a schema file from `schemas_dir`
fn resolve(name: &str, settings: &Settings) -> anyhow::Result<FormSchema> {
    if let Some(screen) = screens::by_name(name) {
        let mut schema = screen.schema();
        settings.forms.apply(&mut schema);
        return Ok(schema);
    }
    settings
        .load_schemas()?
        .remove(name)
        .ok_or_else(|| anyhow::anyhow!("Unknown schema: {}", name))
}

fn check(path: &Path, out: &mut impl Write) -> anyhow::Result<bool> {
    match FormSchema::from_path(path) {
        Ok(schema) => {
            writeln!(
                out,
                "{}: ok ({} sections, {} fields)",
                path.display(),
                schema.sections.len(),
                schema.fields().count()
            )?;
            Ok(true)
        }
        Err(e) => {
            writeln!(out, "{}: {}", path.display(), e)?;
            Ok(false)
        }
    }
}

fn validate_record(
    schema: FormSchema,
    data: &Path,
    forms: &FormSettings,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let content = std::fs::read_to_string(data)
        .with_context(|| format!("Failed to read {}", data.display()))?;
    let values: FormValues = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON object of field values", data.display()))?;

    let mut controller = FormStateController::new(schema, values)?;
    match controller.submit() {
        SubmitOutcome::Submitted(values) => {
            writeln!(out, "valid ({} fields)", values.len())?;
            let textareas = controller
                .schema()
                .fields()
                .filter(|f| matches!(f.kind, FieldKind::Textarea { .. }));
            for field in textareas {
                let text = values.get(&field.name).map(|v| v.as_text()).unwrap_or_default();
                writeln!(out, "  {}: {}", field.name, forms.counter(field, &text).label())?;
            }
            Ok(true)
        }
        SubmitOutcome::Rejected(errors) => {
            for error in &errors {
                writeln!(out, "{}", error)?;
            }
            Ok(false)
        }
    }
}
