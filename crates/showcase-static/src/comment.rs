//! HTML comment sanitizing and the template functions built on it.
//!
//! The text of an HTML comment must not start with `>` or `->`, must not
//! contain `--` and must not end with `-`.

use minijinja::Value;

/// Make `text` safe to place inside `<!-- ... -->`.
pub fn sanitize_comment(text: &str) -> String {
    let mut text = text;
    while let Some(rest) = text.strip_prefix('>') {
        text = rest;
    }
    while let Some(rest) = text.strip_prefix("->") {
        text = rest;
    }

    let mut text = text.replace("--", "");
    while text.ends_with('-') {
        text.pop();
    }
    text
}

/// Sanitize `text` and wrap it in comment delimiters.
pub fn wrap_comment(text: &str) -> String {
    format!("<!--\n{}\n-->", sanitize_comment(text))
}

/// Template function `comment(text)`.
pub fn comment(text: String) -> Value {
    Value::from_safe_string(wrap_comment(&text))
}

/// Template function `safeHTML(text)`: marks `text` as trusted markup.
pub fn safe_html(text: String) -> Value {
    Value::from_safe_string(text)
}
