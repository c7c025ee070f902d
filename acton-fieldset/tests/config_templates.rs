//! Integration tests for configuration-driven rendering
//!
//! Loads configuration files that point at template override directories and
//! message bundles, then renders through the resulting renderer.

use std::fs;
use std::path::Path;

use acton_fieldset::config::FieldsetConfig;
use acton_fieldset::forms::{FieldsetGenerator, FieldsetRenderer, Form, FormEnum};
use acton_fieldset::messages::Locale;
use acton_fieldset::FieldsetError;
use tempfile::TempDir;

#[derive(FormEnum)]
enum Genre {
    Music,
    Sport,
}

#[derive(Form)]
struct EventForm {
    #[form(not_blank)]
    name: String,
    genre: Genre,
    #[form(textarea)]
    notes: Option<String>,
}

fn event() -> EventForm {
    EventForm {
        name: "Derby".into(),
        genre: Genre::Sport,
        notes: None,
    }
}

fn write(dir: &Path, name: &str, contents: &str) {
    let path = dir.join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Config file wiring a template directory and a message bundle
fn setup(views: &str) -> (TempDir, FieldsetConfig) {
    let dir = TempDir::new().unwrap();
    let templates = dir.path().join("templates");

    write(
        &templates,
        "fieldset/option.html",
        "<option value=\"{{ option.value }}\">[{{ option.label }}]</option>",
    );
    write(&templates, "custom/text.html", "<em>{{ el.name }}={{ el.value }}</em>");
    write(
        dir.path(),
        "messages.toml",
        r#"
            [es]
            "eventform.genre" = "Género"
            "genre.sport" = "Deportes"
        "#,
    );

    let config = format!(
        r#"
            [render]
            error_class = "invalid-feedback"

            [views]
            {views}

            [templates]
            template_dir = "{templates}"

            [messages]
            default_locale = "es"
            bundle = "{bundle}"
        "#,
        templates = templates.display(),
        bundle = dir.path().join("messages.toml").display(),
    );
    write(dir.path(), "fieldset.toml", &config);

    let config = FieldsetConfig::load_from(dir.path().join("fieldset.toml")).unwrap();
    (dir, config)
}

#[test]
fn test_config_file_is_loaded() {
    let (dir, config) = setup(r#"select = "fieldset/select.html""#);

    assert_eq!(config.render.error_class, "invalid-feedback");
    assert_eq!(config.views.select.as_deref(), Some("fieldset/select.html"));
    assert_eq!(config.views.input_text, None);
    assert_eq!(
        config.templates.template_dir.as_deref(),
        Some(dir.path().join("templates").as_path())
    );
    assert_eq!(config.messages.locale(), Locale::new("es"));
}

#[test]
fn test_overridden_partial_and_bundle_apply() {
    let (_dir, config) = setup(r#"select = "fieldset/select.html""#);
    let renderer = FieldsetRenderer::from_config(&config).unwrap();

    let fieldset = FieldsetGenerator::new().generate_for(&event()).unwrap();
    let html = renderer
        .render_fieldset(&fieldset, &config.messages.locale())
        .unwrap();

    assert!(html.contains(r#"<label for="genre">Género</label>"#));
    assert!(html.contains(r#"<option value="SPORT">[Deportes]</option>"#));
    assert!(html.contains(r#"<option value="MUSIC">[MUSIC]</option>"#));
    // Kinds without a view keep the built-in markup
    assert!(html.starts_with(
        r#"<label for="name">Name</label><input type="text" name="name" value="Derby" id="name" required/>"#
    ));
}

#[test]
fn test_custom_view_from_template_dir() {
    let (_dir, config) = setup(r#"input_text = "custom/text.html""#);
    let renderer = FieldsetRenderer::from_config(&config).unwrap();

    let fieldset = FieldsetGenerator::new().generate_for(&event()).unwrap();
    let html = renderer
        .render_element(fieldset.field("name").unwrap(), &Locale::default())
        .unwrap();

    assert_eq!(html, "<em>name=Derby</em>");
}

#[test]
fn test_missing_view_is_a_rendering_error() {
    let (_dir, config) = setup(r#"textarea = "fieldset/missing.html""#);
    let renderer = FieldsetRenderer::from_config(&config).unwrap();

    let fieldset = FieldsetGenerator::new().generate_for(&event()).unwrap();
    let err = renderer
        .render_fieldset(&fieldset, &Locale::default())
        .unwrap_err();

    assert!(matches!(
        err,
        FieldsetError::ViewRendering { ref view, .. } if view == "fieldset/missing.html"
    ));
}

#[test]
fn test_missing_bundle_is_a_config_error() {
    let mut config = FieldsetConfig::default();
    config.messages.bundle = Some("/nonexistent/messages.toml".into());

    let err = FieldsetRenderer::from_config(&config).unwrap_err();
    assert!(matches!(err, FieldsetError::Config(_)));
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let config = FieldsetConfig::load_from(dir.path().join("absent.toml")).unwrap();

    assert_eq!(config, FieldsetConfig::default());
}
