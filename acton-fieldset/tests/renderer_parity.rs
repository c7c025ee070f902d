//! Integration tests for renderer parity
//!
//! The bundled templates must produce the same markup as the built-in
//! renderer for every element kind, up to whitespace between tags.

use std::sync::Arc;

use acton_fieldset::config::{FieldsetConfig, RenderSettings, ViewSettings};
use acton_fieldset::forms::{
    Checkbox, ConstraintViolations, ElementBuilder, ElementKind, FieldsetGenerator,
    FieldsetRenderer, Form, FormElement, FormElementRenderer, FormEnum, HtmlFormElementRenderer,
    Radio, SelectOption, TemplateFormElementRenderer,
};
use acton_fieldset::messages::{Locale, Message};
use acton_fieldset::template::FieldsetTemplates;
use proptest::prelude::*;

/// Drop whitespace that sits between two tags
fn normalize(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut pending = String::new();
    for ch in html.chars() {
        if ch.is_whitespace() {
            pending.push(ch);
            continue;
        }
        if !(ch == '<' && (out.is_empty() || out.ends_with('>'))) {
            out.push_str(&pending);
        }
        pending.clear();
        out.push(ch);
    }
    out
}

/// An element of `kind` with every attribute it supports set
fn element(kind: ElementKind, value: &str, label: &str, with_errors: bool) -> FormElement {
    let mut builder = ElementBuilder::new(kind, "field");
    builder
        .id("field")
        .label(Message::of(label))
        .value(value)
        .required(true)
        .placeholder("Type here")
        .pattern("[a-z]+")
        .min_length(2)
        .max_length(40)
        .size(20)
        .min("1")
        .max("9")
        .step("2")
        .rows(4)
        .cols(30)
        .accept("image/*")
        .multiple(true)
        .options(vec![
            SelectOption::new("A", Message::of("Alpha")),
            SelectOption::new("B", Message::of(label)).selected(true),
            SelectOption::disabled("", Message::of("None")),
        ])
        .checkboxes(vec![
            Checkbox::new("field", "A", Message::of("Alpha")).id("field-a"),
            Checkbox::new("field", value, Message::of(label))
                .id("field-b")
                .checked(true),
        ])
        .radios(vec![
            Radio::new("field", "A", Message::of("Alpha")).id("field-a"),
            Radio::new("field", value, Message::of(label)).checked(true),
        ]);

    if with_errors {
        builder
            .error(Message::of("is invalid"))
            .error(Message::of("is too short"));
    }

    builder.build()
}

fn renderers(settings: &RenderSettings) -> (HtmlFormElementRenderer, TemplateFormElementRenderer) {
    let templates = FieldsetTemplates::new().unwrap();
    let built_in = HtmlFormElementRenderer::new(settings.clone());
    let template = TemplateFormElementRenderer::new(Arc::new(templates), settings.clone())
        .with_views(ViewSettings::all_defaults());
    (built_in, template)
}

fn styled_settings() -> RenderSettings {
    RenderSettings {
        label_class: Some("form-label".into()),
        input_class: Some("form-input".into()),
        input_error_class: Some("is-invalid".into()),
        error_class: "invalid-feedback".into(),
        group_class: Some("form-group".into()),
        escape_values: false,
    }
}

fn assert_parity(settings: &RenderSettings, value: &str, label: &str, with_errors: bool) {
    let (built_in, template) = renderers(settings);
    let locale = Locale::default();

    for kind in ElementKind::ALL {
        let element = element(kind, value, label, with_errors);
        let expected = built_in.render(&element, &locale).unwrap();
        let actual = template.render(&element, &locale).unwrap();
        assert_eq!(
            normalize(&actual),
            expected,
            "{kind:?} differs between renderers"
        );
    }
}

#[test]
fn test_parity_with_default_settings() {
    assert_parity(&RenderSettings::default(), "B", "Beta", false);
}

#[test]
fn test_parity_with_errors() {
    assert_parity(&RenderSettings::default(), "B", "Beta", true);
}

#[test]
fn test_parity_with_classes_and_errors() {
    assert_parity(&styled_settings(), "B", "Beta", true);
    assert_parity(&styled_settings(), "B", "Beta", false);
}

#[test]
fn test_parity_with_escaping() {
    let settings = RenderSettings {
        escape_values: true,
        ..styled_settings()
    };
    assert_parity(&settings, r#"<b>"quoted" & 'single'</b>"#, "Fish & Chips", true);
}

#[test]
fn test_built_in_output_has_no_whitespace_between_tags() {
    let (built_in, _) = renderers(&styled_settings());
    for kind in ElementKind::ALL {
        let html = built_in
            .render(&element(kind, "B", "Beta", true), &Locale::default())
            .unwrap();
        assert_eq!(normalize(&html), html);
    }
}

#[test]
fn test_generated_fieldset_parity() {
    #[derive(FormEnum)]
    enum Genre {
        Music,
        Sport,
        Theater,
    }

    #[derive(Form)]
    struct EventForm {
        #[form(not_blank, placeholder = "Event name")]
        name: String,
        #[form(radio)]
        genre: Genre,
        #[form(checkbox)]
        tags: Option<Genre>,
        #[form(textarea(rows = 5))]
        description: Option<String>,
        #[form(hidden)]
        token: String,
        public: bool,
        #[form(min = 1, max = 100)]
        seats: u32,
    }

    let form = EventForm {
        name: String::new(),
        genre: Genre::Theater,
        tags: Some(Genre::Music),
        description: None,
        token: "abc123".into(),
        public: true,
        seats: 40,
    };
    let mut violations = ConstraintViolations::new();
    violations.add("name", "not_blank", "must not be blank");
    violations.add_global("schedule", "the venue is already booked");

    let fieldset = FieldsetGenerator::new()
        .generate_invalid(&form, &violations)
        .unwrap();

    let mut config = FieldsetConfig::default();
    config.render = styled_settings();
    config.views = ViewSettings::all_defaults();

    let built_in = FieldsetRenderer::new(config.render.clone());
    let templated = FieldsetRenderer::from_config(&config).unwrap();
    let locale = Locale::default();

    let expected = built_in.render_fieldset(&fieldset, &locale).unwrap();
    let actual = templated.render_fieldset(&fieldset, &locale).unwrap();
    assert_eq!(normalize(&actual), expected);

    assert!(expected.starts_with(
        r#"<span class="invalid-feedback">the venue is already booked</span><div class="form-group">"#
    ));
    assert!(expected.contains(r#"<input type="hidden" name="token" value="abc123" id="token"/>"#));
    assert!(expected.contains(
        r#"<input type="radio" name="genre" value="THEATER" id="theater" checked class="form-input"/>"#
    ));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_parity_for_arbitrary_text(
        value in "[a-zA-Z0-9 <>&\"']{0,12}",
        label in "[a-zA-Z0-9 <>&\"']{1,12}",
        escape in any::<bool>(),
        with_errors in any::<bool>(),
    ) {
        let settings = RenderSettings {
            escape_values: escape,
            ..styled_settings()
        };
        let (built_in, template) = renderers(&settings);
        let locale = Locale::default();

        for kind in ElementKind::ALL {
            let element = element(kind, &value, &label, with_errors);
            let expected = built_in.render(&element, &locale).unwrap();
            let actual = template.render(&element, &locale).unwrap();
            prop_assert_eq!(normalize(&actual), normalize(&expected));
        }
    }
}
