//! Integration tests for fieldset generation and rendering
//!
//! Drives derived form types through the generator and the built-in renderer
//! and checks the exact markup produced.

use std::sync::Arc;

use acton_fieldset::forms::{
    ConstraintViolations, ElementKind, FieldsetGenerator, FieldsetRenderer, Form, FormElement,
    FormEnum, HtmlForm,
};
use acton_fieldset::messages::{Locale, Message, StaticMessageSource};
use acton_fieldset::FieldsetError;
use validator::Validate;

#[derive(FormEnum, Clone, Copy)]
enum Genre {
    Music,
    Sport,
    Theater,
}

#[derive(Form)]
struct EventCreateForm {
    #[form(not_blank)]
    name: String,
    genre: Genre,
}

#[derive(Form)]
struct SignupForm {
    #[form(auto_populated)]
    id: Option<u64>,
    #[form(not_blank, email)]
    email: String,
    #[form(password, length(min = 8))]
    password: String,
    #[form(password)]
    password_confirmation: String,
}

#[derive(Validate, Form)]
struct ContactForm {
    #[validate(length(min = 1, message = "must not be blank"))]
    name: String,
    #[validate(email)]
    email: String,
    #[form(textarea(rows = 3))]
    message: Option<String>,
}

fn blank_event() -> EventCreateForm {
    EventCreateForm {
        name: String::new(),
        genre: Genre::Sport,
    }
}

#[test]
fn test_invalid_event_fieldset_model() {
    let mut violations = ConstraintViolations::new();
    violations.add("name", "NotBlank", "must not be blank");

    let fieldset = FieldsetGenerator::new()
        .generate_invalid(&blank_event(), &violations)
        .unwrap();

    assert_eq!(fieldset.fields().len(), 2);
    assert!(fieldset.errors().is_empty());

    let name = fieldset.field("name").unwrap();
    assert_eq!(name.kind(), ElementKind::InputText);
    assert_eq!(name.value(), Some(""));
    assert!(name.is_required());
    let errors: Vec<_> = name.errors().iter().map(Message::default_message).collect();
    assert_eq!(errors, ["must not be blank"]);
    assert_eq!(name.errors()[0].code(), Some("eventcreateform.name.notblank"));

    let FormElement::Select(genre) = fieldset.field("genre").unwrap() else {
        panic!("genre should resolve to a select");
    };
    let options: Vec<_> = genre
        .options
        .iter()
        .map(|o| (o.value.as_str(), o.selected))
        .collect();
    assert_eq!(
        options,
        [("MUSIC", false), ("SPORT", true), ("THEATER", false)]
    );
    assert!(genre.errors.is_empty());
}

#[test]
fn test_invalid_event_fieldset_markup() {
    let mut violations = ConstraintViolations::new();
    violations.add("name", "NotBlank", "must not be blank");

    let fieldset = FieldsetGenerator::new()
        .generate_invalid(&blank_event(), &violations)
        .unwrap();
    let html = FieldsetRenderer::default()
        .render_fieldset(&fieldset, &Locale::default())
        .unwrap();

    assert_eq!(
        html,
        concat!(
            r#"<label for="name">Name</label>"#,
            r#"<input type="text" name="name" value="" id="name" required/>"#,
            r#"<span class="form-error">must not be blank</span>"#,
            r#"<label for="genre">Genre</label>"#,
            r#"<select name="genre" id="genre">"#,
            r#"<option value="MUSIC">MUSIC</option>"#,
            r#"<option value="SPORT" selected>SPORT</option>"#,
            r#"<option value="THEATER">THEATER</option>"#,
            "</select>",
        )
    );
}

#[test]
fn test_blank_fieldset_has_no_values_or_selection() {
    let fieldset = FieldsetGenerator::new()
        .generate::<EventCreateForm>()
        .unwrap();

    assert_eq!(fieldset.field("name").unwrap().value(), None);
    let FormElement::Select(genre) = fieldset.field("genre").unwrap() else {
        panic!("genre should resolve to a select");
    };
    assert!(genre.options.iter().all(|o| !o.selected));
    assert!(!fieldset.has_errors());
}

#[test]
fn test_auto_populated_property_is_excluded() {
    let fieldset = FieldsetGenerator::new().generate::<SignupForm>().unwrap();

    let names: Vec<_> = fieldset.fields().iter().filter_map(FormElement::name).collect();
    assert_eq!(names, ["email", "password", "password_confirmation"]);
    assert_eq!(fieldset.field("email").unwrap().kind(), ElementKind::InputEmail);
    assert_eq!(
        fieldset.field("password").unwrap().kind(),
        ElementKind::InputPassword
    );
}

#[test]
fn test_unmatched_and_class_level_violations_become_fieldset_errors() {
    let form = SignupForm {
        id: None,
        email: "ada@example.com".into(),
        password: "secret".into(),
        password_confirmation: "secrets".into(),
    };

    let mut violations = ConstraintViolations::new();
    violations.add_global("password_match", "passwords do not match");
    violations.add("password", "length", "is too short");
    violations.add("id", "unique", "is already taken");

    let fieldset = FieldsetGenerator::new()
        .generate_invalid(&form, &violations)
        .unwrap();

    let global: Vec<_> = fieldset.errors().iter().map(Message::default_message).collect();
    assert_eq!(global, ["passwords do not match", "is already taken"]);
    assert_eq!(fieldset.errors()[0].code(), Some("signupform.password_match"));

    let password = fieldset.field("password").unwrap();
    assert_eq!(password.errors().len(), 1);
    assert_eq!(password.value(), Some("secret"));
    assert!(fieldset.field("email").unwrap().errors().is_empty());
}

#[test]
fn test_hidden_field_violation_renders_as_fieldset_error() {
    #[derive(Form)]
    struct TokenForm {
        #[form(hidden)]
        token: String,
        name: String,
    }

    let form = TokenForm {
        token: String::new(),
        name: "Derby".into(),
    };
    let mut violations = ConstraintViolations::new();
    violations.add("token", "not_blank", "must not be blank");

    let fieldset = FieldsetGenerator::new()
        .generate_invalid(&form, &violations)
        .unwrap();
    assert!(fieldset.has_errors());

    let html = FieldsetRenderer::default()
        .render_fieldset(&fieldset, &Locale::default())
        .unwrap();
    assert!(html.starts_with(
        r#"<span class="form-error">must not be blank</span><input type="hidden" name="token" value="" id="token"/>"#
    ));
}

#[test]
fn test_file_hint_on_byte_field() {
    #[derive(Form)]
    struct BookForm {
        #[form(not_blank)]
        title: String,
        #[form(file(accept = "image/*"))]
        cover: Vec<u8>,
    }

    let form = BookForm {
        title: "Dune".into(),
        cover: vec![0x89, 0x50, 0x4e, 0x47],
    };
    let fieldset = FieldsetGenerator::new().generate_for(&form).unwrap();

    let FormElement::InputFile(cover) = fieldset.field("cover").unwrap() else {
        panic!("cover should resolve to a file input");
    };
    assert_eq!(cover.accept.as_deref(), Some("image/*"));
    assert!(!cover.multiple);
    assert_eq!(fieldset.field("cover").unwrap().value(), None);
    assert_eq!(fieldset.field("title").unwrap().value(), Some("Dune"));
    assert_eq!(form.cover.len(), 4);
}

#[test]
fn test_unhinted_custom_type_is_unresolved() {
    #[derive(Debug, Default)]
    struct Coordinates {
        latitude: f64,
        longitude: f64,
    }

    #[derive(Form)]
    struct VenueForm {
        name: String,
        location: Coordinates,
    }

    let form = VenueForm {
        name: "Arena".into(),
        location: Coordinates::default(),
    };
    assert!(form.location.latitude.abs() < f64::EPSILON);
    assert!(form.location.longitude.abs() < f64::EPSILON);
    assert_eq!(form.value_of("location"), None);

    let err = FieldsetGenerator::new().generate_for(&form).unwrap_err();
    assert!(matches!(
        err,
        FieldsetError::UnresolvedFieldType { form: ref form_name, ref property, ref type_name }
            if form_name == "VenueForm" && property == "location" && type_name.ends_with("Coordinates")
    ));
}

#[test]
fn test_enum_constants_map_back_to_variants() {
    assert!(matches!(Genre::from_constant("SPORT"), Some(Genre::Sport)));
    assert!(matches!(Genre::from_constant("THEATER"), Some(Genre::Theater)));
    assert!(Genre::from_constant("sport").is_none());
    assert_eq!(
        Genre::from_constant("MUSIC").map(|genre| genre.constant_name()),
        Some("MUSIC")
    );
}

#[test]
fn test_fieldset_errors_render_first_and_localize() {
    let form = SignupForm {
        id: None,
        email: String::new(),
        password: String::new(),
        password_confirmation: String::new(),
    };
    let mut violations = ConstraintViolations::new();
    violations.add_global("password_match", "passwords do not match");

    let fieldset = FieldsetGenerator::new()
        .generate_invalid(&form, &violations)
        .unwrap();

    let messages = StaticMessageSource::new()
        .with_message("es", "signupform.password_match", "las contraseñas no coinciden")
        .with_message("es", "signupform.email", "Correo");
    let renderer = FieldsetRenderer::default().with_messages(Arc::new(messages));

    let html = renderer
        .render_fieldset(&fieldset, &Locale::new("es-MX"))
        .unwrap();
    assert!(html.starts_with(
        r#"<span class="form-error">las contraseñas no coinciden</span><label for="email">Correo</label>"#
    ));

    let english = renderer.render_fieldset(&fieldset, &Locale::new("en")).unwrap();
    assert!(english.starts_with(
        r#"<span class="form-error">passwords do not match</span><label for="email">Email</label>"#
    ));
}

#[test]
fn test_validator_errors_bind_to_fields() {
    let form = ContactForm {
        name: String::new(),
        email: "not-an-email".into(),
        message: None,
    };

    let errors = form.validate().unwrap_err();
    let violations = ConstraintViolations::from(errors);
    assert_eq!(violations.len(), 2);

    let fieldset = FieldsetGenerator::new()
        .generate_invalid(&form, &violations)
        .unwrap();

    let name = fieldset.field("name").unwrap();
    assert_eq!(name.errors()[0].default_message(), "must not be blank");
    assert_eq!(name.errors()[0].code(), Some("contactform.name.length"));

    let email = fieldset.field("email").unwrap();
    assert_eq!(email.kind(), ElementKind::InputEmail);
    assert_eq!(email.errors().len(), 1);
    assert_eq!(email.value(), Some("not-an-email"));

    let FormElement::InputText(name) = name else {
        panic!("name should resolve to a text input");
    };
    assert_eq!(name.min_length, Some(1));

    let FormElement::Textarea(message) = fieldset.field("message").unwrap() else {
        panic!("message should resolve to a textarea");
    };
    assert_eq!(message.rows, Some(3));
    assert!(!message.required);
    assert!(fieldset.errors().is_empty());
}

#[test]
fn test_customizer_adjusts_elements() {
    let fieldset = FieldsetGenerator::new()
        .generate_for_with(&blank_event(), |name, builder| {
            if name == "name" {
                builder.placeholder("Summer festival").readonly(true);
            }
        })
        .unwrap();

    let html = FieldsetRenderer::default()
        .render_element(fieldset.field("name").unwrap(), &Locale::default())
        .unwrap();
    assert_eq!(
        html,
        r#"<label for="name">Name</label><input type="text" name="name" value="" id="name" placeholder="Summer festival" required readonly/>"#
    );
}

#[test]
fn test_render_form_wraps_fieldset() {
    let fieldset = FieldsetGenerator::new()
        .generate::<EventCreateForm>()
        .unwrap();
    let form = HtmlForm::new("/events", fieldset)
        .data_turbo(false)
        .submit(Message::new("Save", "eventcreateform.submit"))
        .build()
        .unwrap();

    let html = FieldsetRenderer::default()
        .render_form(&form, &Locale::default())
        .unwrap();

    assert!(html.starts_with(r#"<form action="/events" method="post" data-turbo="false"><label for="name">"#));
    assert!(html.ends_with(r#"</select><input type="submit" value="Save"/></form>"#));
}

#[test]
fn test_missing_fetcher_is_reported() {
    #[derive(Form)]
    struct VenueForm {
        #[form(select(fetcher = "venues"))]
        venue: String,
    }

    let err = FieldsetGenerator::new().generate::<VenueForm>().unwrap_err();
    assert!(matches!(
        err,
        FieldsetError::FetcherResolution { ref property, ref fetcher, .. }
            if property == "venue" && fetcher == "venues"
    ));
}
