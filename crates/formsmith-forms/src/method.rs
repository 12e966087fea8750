//! HTTP method spoofing.
//!
//! HTML forms can only be submitted with `GET` or `POST`. A form whose
//! logical method is anything else is sent as `POST` and carries the real
//! method in a hidden field (`_method` by default) for the server to honour.

/// Normalizes a logical method name: trimmed and upper-cased.
pub fn normalize(method: &str) -> String {
    method.trim().to_ascii_uppercase()
}

/// Returns the method the browser actually submits with.
///
/// An empty method stays empty so the tag still renders (as `method=""`).
pub fn transport(method: &str) -> &'static str {
    match normalize(method).as_str() {
        "" => "",
        "GET" => "GET",
        _ => "POST",
    }
}

/// Returns the method to carry in the hidden override field, if any.
pub fn spoofed(method: &str) -> Option<String> {
    let method = normalize(method);
    match method.as_str() {
        "" | "GET" | "POST" => None,
        _ => Some(method),
    }
}
