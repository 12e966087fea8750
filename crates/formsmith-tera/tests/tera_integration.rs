//! Rendering whole forms through Tera templates.

use std::sync::Arc;

use formsmith_core::{FormSettings, OldInput};
use formsmith_forms::{Builder, Config, SelectOption};
use serde::Serialize;
use tera::{Context, Tera};

#[derive(Serialize)]
struct Profile {
    name: String,
    email: String,
    role: String,
    newsletter: bool,
}

fn profile() -> Profile {
    Profile {
        name: "Ada <Lovelace>".into(),
        email: "ada@example.com".into(),
        role: "2".into(),
        newsletter: true,
    }
}

fn render(config: Config, template: &str, context: &Context) -> String {
    let builder = Builder::with_settings(config, Arc::new(FormSettings::default()));
    let mut tera = Tera::default();
    formsmith_tera::register(&mut tera, Arc::new(builder));
    tera.add_raw_template("form.html", template).unwrap();
    tera.render("form.html", context).unwrap()
}

#[test]
fn test_full_form_renders_unescaped_markup() {
    let config = Config::new("/profile", "PATCH")
        .csrf_token("tok")
        .bind(&profile())
        .unwrap();
    let mut context = Context::new();
    context.insert(
        "roles",
        &vec![SelectOption::new("1", "Admin"), SelectOption::new("2", "User")],
    );

    let html = render(
        config,
        r#"{{ form_open() }}
{{ form_label(name="name", text="Name") }}{{ form_text(name="name") }}
{{ form_select(name="role", options=roles) }}
{{ form_checkbox(name="newsletter", value="1") }}
{{ form_submit(text="Save") }}
{{ form_close() }}"#,
        &context,
    );

    assert!(html.contains(r#"<form action="/profile" method="POST">"#));
    assert!(html.contains(r#"<input type="hidden" name="_method" value="PATCH">"#));
    assert!(html.contains(r#"<input type="hidden" name="_csrf" value="tok">"#));
    assert!(html.contains(r#"<label for="name">Name</label>"#));
    assert!(html.contains(r#"value="Ada &lt;Lovelace&gt;""#));
    assert!(html.contains(r#"<option value="2" selected>User</option>"#));
    assert!(html.contains(r#"value="1" checked"#));
    assert!(html.contains(r#"<button type="submit" class="btn btn-primary">Save</button>"#));
    assert!(html.ends_with("</form>"));
    assert!(!html.contains("&lt;input"));
}

#[test]
fn test_errors_and_conditionals() {
    let old: OldInput = [("email", "not-an-email")].into_iter().collect();
    let config = Config::new("/signup", "POST")
        .old_input(old)
        .error("email", "Enter a valid email address.");

    let html = render(
        config,
        r#"{% set bad = form_has_error(name="email") %}{% if bad %}<p>Fix the errors</p>{% endif %}{{ form_email(name="email") }}{{ form_error(name="email") }}{{ form_error(name="name") }}"#,
        &Context::new(),
    );

    assert!(html.starts_with("<p>Fix the errors</p>"));
    assert!(html.contains(r#"value="not-an-email" class="form-control is-invalid""#));
    assert!(html.ends_with(r#"<div class="invalid-feedback">Enter a valid email address.</div>"#));
}

#[test]
fn test_keyword_and_map_attributes() {
    let mut context = Context::new();
    context.insert("extra", &serde_json::json!({"aria-describedby": "help", "autofocus": true}));

    let html = render(
        Config::default(),
        r#"{{ form_text(name="q", class="wide", data_id=7, required=true, disabled=false, attrs=extra) }}"#,
        &context,
    );

    assert_eq!(
        html,
        concat!(
            r#"<input type="text" name="q" value="" aria-describedby="help" autofocus "#,
            r#"class="form-control wide" data-id="7" required>"#
        )
    );
}

#[test]
fn test_csrf_helpers_are_escaped() {
    let config = Config::new("/x", "POST").csrf_token("<t>");
    let html = render(
        config,
        r#"<meta name="{{ csrf_field() }}" content="{{ csrf_token() }}">"#,
        &Context::new(),
    );
    assert_eq!(html, r#"<meta name="_csrf" content="&lt;t&gt;">"#);
}

#[test]
fn test_explicit_value_is_a_default() {
    let old: OldInput = [("city", "Rome")].into_iter().collect();
    let html = render(
        Config::default().old_input(old),
        r#"{{ form_text(name="city", value="Paris") }}|{{ form_text(name="country", value="France") }}"#,
        &Context::new(),
    );
    let (city, country) = html.split_once('|').unwrap();
    assert!(city.contains(r#"value="Rome""#));
    assert!(country.contains(r#"value="France""#));
}

#[test]
fn test_bad_arguments_fail_the_render() {
    let builder = Builder::new(Config::default());
    let mut tera = Tera::default();
    formsmith_tera::register(&mut tera, Arc::new(builder));
    tera.add_raw_template("bad.html", r#"{{ form_select(name="role", options="1,2") }}"#)
        .unwrap();
    assert!(tera.render("bad.html", &Context::new()).is_err());
}

#[test]
fn test_register_installs_every_function() {
    let names: Vec<_> = formsmith_tera::function_names().collect();
    for expected in [
        "form_open",
        "form_close",
        "form_label",
        "form_text",
        "form_email",
        "form_password",
        "form_textarea",
        "form_hidden",
        "form_file",
        "form_input",
        "form_select",
        "form_checkbox",
        "form_radio",
        "form_submit",
        "form_button",
        "form_error",
        "form_has_error",
        "csrf_field",
        "csrf_token",
    ] {
        assert!(names.contains(&expected), "{expected}");
    }
}
