//! HTML views.
//!
//! Templates are compiled into the binary and served through a single
//! minijinja environment. Every page extends `layout.html`.

use minijinja::{Environment, UndefinedBehavior};
use once_cell::sync::Lazy;
use serde::Serialize;

pub const INDEX: &str = "index.html";
pub const ABOUT: &str = "about.html";
pub const CONTACT_LIST: &str = "contact.html";
pub const ADD_CONTACT: &str = "add-contact.html";
pub const CONTACT_DETAIL: &str = "detail.html";
pub const EDIT_CONTACT: &str = "edit-contact.html";
pub const ERROR: &str = "error.html";

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../templates/layout.html")),
    (INDEX, include_str!("../templates/index.html")),
    (ABOUT, include_str!("../templates/about.html")),
    (CONTACT_LIST, include_str!("../templates/contact.html")),
    (ADD_CONTACT, include_str!("../templates/add-contact.html")),
    (CONTACT_DETAIL, include_str!("../templates/detail.html")),
    (EDIT_CONTACT, include_str!("../templates/edit-contact.html")),
    (ERROR, include_str!("../templates/error.html")),
];

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Chainable);
    env.set_loader(|name| {
        Ok(TEMPLATES
            .iter()
            .find(|(template, _)| *template == name)
            .map(|(_, source)| (*source).to_string()))
    });
    env
});

/// Render a named template with the given context.
///
/// # Errors
///
/// Returns the minijinja error if the template is unknown or fails to render.
pub fn render<S: Serialize>(name: &str, ctx: S) -> Result<String, minijinja::Error> {
    ENV.get_template(name)?.render(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_every_template_renders_with_empty_context() {
        for (name, _) in TEMPLATES {
            let result = render(name, context! {});
            assert!(result.is_ok(), "{name}: {:?}", result.err());
        }
    }

    #[test]
    fn test_layout_carries_title_and_navigation() {
        let html = render(INDEX, context! { title => "Contact Book" }).unwrap();
        assert!(html.contains("<title>Contact Book</title>"));
        assert!(html.contains("href=\"/contact\""));
    }

    #[test]
    fn test_values_are_escaped() {
        let html = render(
            CONTACT_LIST,
            context! { title => "Contacts", msg => "<script>alert(1)</script>", contacts => Vec::<()>::new() },
        )
        .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_unknown_template_is_an_error() {
        assert!(render("missing.html", context! {}).is_err());
    }
}
