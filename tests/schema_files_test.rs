use gymdash::cli::Command;
use gymdash::commands;
use gymdash::config::Settings;
use gymdash::forms::{FieldKind, FieldValue, FormError, FormSchema, FormStateController, FormValues};
use std::fs;
use tempfile::TempDir;

const TRAINER_YAML: &str = r#"
sections:
  - title: Trainer
    icon: whistle
    fields:
      - name: nameEn
        label: Name
        type: text
        required: true
        validation:
          characterSet: englishOnly
          minLength: 3
      - name: specialty
        label: Specialty
        type: select
        options:
          - { value: yoga, label: Yoga }
          - { value: boxing, label: Boxing }
      - name: bio
        label: Bio
        type: textarea
        rows: 6
  - title: Availability
    fields:
      - name: weekends
        label: Works weekends
        type: switch
      - name: weekendRate
        label: Weekend rate
        type: number
        requiredWhen: { field: weekends, equals: "true" }
        validation:
          min: 0
"#;

#[test]
fn test_yaml_schema_drives_a_form() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("trainers.yaml");
    fs::write(&path, TRAINER_YAML)?;

    let schema = FormSchema::from_path(&path)?;
    assert_eq!(schema.sections.len(), 2);
    assert_eq!(schema.sections[0].header.icon.as_deref(), Some("whistle"));
    assert_eq!(
        schema.field("bio").map(|f| &f.kind),
        Some(&FieldKind::Textarea { rows: Some(6) })
    );

    let mut form = FormStateController::new(schema, FormValues::new())?;
    form.set_field_value("nameEn", FieldValue::text("Sam"))?;
    form.set_field_value("weekends", FieldValue::Bool(true))?;

    let errors = match form.submit() {
        gymdash::forms::SubmitOutcome::Rejected(errors) => errors,
        other => panic!("expected rejection, got {:?}", other),
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "weekendRate");

    form.set_field_value("weekendRate", FieldValue::text("40"))?;
    assert!(form.submit().is_submitted());
    Ok(())
}

#[test]
fn test_json_and_toml_schemas_load() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let json_path = temp_dir.path().join("plans.json");
    fs::write(
        &json_path,
        r#"{"sections":[{"title":"Plan","fields":[
            {"name":"title","label":"Title","type":"text","required":true},
            {"name":"price","label":"Price","type":"number","validation":{"min":0}}
        ]}]}"#,
    )?;
    let toml_path = temp_dir.path().join("contact.toml");
    fs::write(
        &toml_path,
        r#"
[[sections]]
title = "Contact"

[[sections.fields]]
name = "email"
label = "Email"
type = "email"
required = true
"#,
    )?;

    let plans = FormSchema::from_path(&json_path)?;
    assert_eq!(plans.fields().count(), 2);
    let contact = FormSchema::from_path(&toml_path)?;
    assert_eq!(contact.field("email").map(|f| f.kind.type_name()), Some("email"));
    Ok(())
}

#[test]
fn test_bad_pattern_is_rejected_on_load() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("broken.json");
    fs::write(
        &path,
        r#"{"sections":[{"title":"X","fields":[
            {"name":"code","label":"Code","type":"text","validation":{"pattern":"([a-z"}}
        ]}]}"#,
    )?;

    match FormSchema::from_path(&path) {
        Err(FormError::InvalidPattern { field, .. }) => assert_eq!(field, "code"),
        other => panic!("expected InvalidPattern, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_validate_command_against_external_schema() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let schemas = temp_dir.path().join("schemas");
    fs::create_dir_all(&schemas)?;
    fs::write(schemas.join("trainers.yaml"), TRAINER_YAML)?;

    let good = temp_dir.path().join("good.json");
    fs::write(&good, r#"{"nameEn": "Samantha", "specialty": "yoga", "weekends": false}"#)?;
    let bad = temp_dir.path().join("bad.json");
    fs::write(&bad, r#"{"nameEn": "Sa", "weekends": true}"#)?;

    let settings = Settings {
        schemas_dir: Some(schemas.to_string_lossy().into_owned()),
        ..Default::default()
    };

    let mut out = Vec::new();
    let ok = commands::run(
        &Command::Validate { schema: "trainers".into(), data: good },
        &settings,
        &mut out,
    )?;
    assert!(ok, "{}", String::from_utf8_lossy(&out));

    let mut out = Vec::new();
    let ok = commands::run(
        &Command::Validate { schema: "trainers".into(), data: bad },
        &settings,
        &mut out,
    )?;
    assert!(!ok);
    let report = String::from_utf8(out)?;
    assert!(report.contains("nameEn"));
    assert!(report.contains("weekendRate"));
    Ok(())
}
