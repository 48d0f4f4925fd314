//! Flattening of `validator` errors into client-facing messages.

use validator::ValidationErrors;

/// One `"Field {field} {message}"` line per failed constraint, sorted.
///
/// Falls back to the validator code when a constraint has no message.
///
/// ```rust,ignore
/// let messages = field_error_messages(&payload.validate().unwrap_err());
/// assert_eq!(messages, vec!["Field price must not be null"]);
/// ```
pub fn field_error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                format!("Field {} {}", field, message)
            })
        })
        .collect();

    messages.sort();
    messages
}
