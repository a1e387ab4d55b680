use formwork::config::{load_schema, EngineSettings};
use formwork::FieldKind;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_without_config_file() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let settings = EngineSettings::from_root(temp_dir.path().to_str().unwrap())?;

    assert_eq!(settings.api.base_url, "http://localhost:8000");
    assert_eq!(settings.lookup.base_url, "https://viacep.com.br");
    assert_eq!(settings.lookup.debounce_ms, 500);
    assert_eq!(settings.lookup.postal_field, "cep");
    assert_eq!(settings.lookup.code_length, 8);
    Ok(())
}

#[test]
fn test_load_settings_from_toml() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();

    let formwork_toml = r#"
[api]
base_url = "https://api.example.com"

[lookup]
debounce_ms = 250
postal_field = "postal"
"#;
    fs::write(root.join("formwork.toml"), formwork_toml)?;

    let settings = EngineSettings::from_root(root.to_str().unwrap())?;

    assert_eq!(settings.api.base_url, "https://api.example.com");
    assert_eq!(settings.lookup.debounce_ms, 250);
    assert_eq!(settings.lookup.postal_field, "postal");
    // Unspecified keys keep their defaults.
    assert_eq!(settings.lookup.street_field, "street");
    Ok(())
}

#[test]
fn test_load_schema_from_yaml() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("enrollment.yaml");

    let schema_yaml = r#"
- name: name
  kind: text
  required: true
- name: phone
  kind: text
  mask: "(99) 99999-9999"
- name: days
  kind: checkbox_group
  options:
    - label: Monday
      value: mon
    - label: Wednesday
      value: wed
"#;
    fs::write(&path, schema_yaml)?;

    let fields = load_schema(&path)?;

    assert_eq!(fields.len(), 3);
    assert_eq!(fields[0].name, "name");
    assert!(fields[0].required);
    assert_eq!(fields[1].mask.as_deref(), Some("(99) 99999-9999"));
    assert_eq!(fields[2].kind, FieldKind::CheckboxGroup);
    assert_eq!(fields[2].options.len(), 2);
    Ok(())
}

#[test]
fn test_load_schema_from_json() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("enrollment.json");

    let schema_json = r#"
[
    { "name": "guardian.cpf", "kind": "text", "required": true, "mask": "999.999.999-99" },
    { "name": "newsletter", "kind": "checkbox", "default": false }
]
"#;
    fs::write(&path, schema_json)?;

    let fields = load_schema(&path)?;

    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0].name, "guardian.cpf");
    assert_eq!(fields[1].kind, FieldKind::Checkbox);
    Ok(())
}

#[test]
fn test_load_schema_rejects_invalid_fields() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("bad.json");

    // Duplicate name and a select without options.
    let schema_json = r#"
[
    { "name": "name", "kind": "text" },
    { "name": "name", "kind": "text" },
    { "name": "branch", "kind": "select" }
]
"#;
    fs::write(&path, schema_json)?;

    let result = load_schema(&path);
    let message = result.unwrap_err().to_string();
    assert!(message.contains("Duplicate"));
    assert!(message.contains("options"));
    Ok(())
}

#[test]
fn test_load_schema_rejects_unknown_extension() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("schema.txt");
    fs::write(&path, "[]")?;

    assert!(load_schema(&path).is_err());
    Ok(())
}
