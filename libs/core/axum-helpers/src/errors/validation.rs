//! Validation messages: flattening `validator` output and grouping by field.

use std::collections::BTreeMap;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Flattens `ValidationErrors` into `"<field> <message>"` strings.
///
/// Fields are reported in camelCase and in alphabetical order; the errors of
/// one field keep their declaration order. Nested structs are reported with a
/// dotted path (`address.city ...`).
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    collect(errors, "", &mut messages);
    messages
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let path = format!("{}{}", prefix, camel_case(field));
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for err in field_errors {
                    let message = err
                        .message
                        .as_deref()
                        .map(str::to_string)
                        .unwrap_or_else(|| fallback_message(&err.code));
                    out.push(format!("{} {}", path, message));
                }
            }
            ValidationErrorsKind::Struct(inner) => {
                collect(inner, &format!("{}.", path), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{}.{}.", path, index), out);
                }
            }
        }
    }
}

fn fallback_message(code: &str) -> String {
    match code {
        "email" => "must be an email".to_string(),
        "length" => "has an invalid length".to_string(),
        "required" => "should not be empty".to_string(),
        _ => "is invalid".to_string(),
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Groups messages by their first whitespace-delimited token.
///
/// ```rust
/// use axum_helpers::errors::group_messages_by_field;
///
/// let grouped = group_messages_by_field(&[
///     "email must be an email".to_string(),
///     "password must be longer than or equal to 8 characters".to_string(),
/// ]);
/// assert_eq!(grouped["email"], vec!["email must be an email"]);
/// assert_eq!(grouped.len(), 2);
/// ```
///
/// A message without whitespace becomes its own key.
pub fn group_messages_by_field(messages: &[String]) -> BTreeMap<String, Vec<String>> {
    let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for message in messages {
        let field = message.split_whitespace().next().unwrap_or(message.as_str());
        grouped
            .entry(field.to_string())
            .or_default()
            .push(message.clone());
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct Signup {
        #[validate(length(min = 1, message = "should not be empty"))]
        first_name: String,
        #[validate(email(message = "must be an email"))]
        email: String,
        #[validate(length(min = 8, message = "must be longer than or equal to 8 characters"))]
        password: String,
        #[validate(range(min = 18))]
        age: u8,
    }

    #[test]
    fn test_group_messages_by_field() {
        let grouped = group_messages_by_field(&[
            "email must be an email".to_string(),
            "password must be longer than or equal to 8 characters".to_string(),
        ]);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["email"], vec!["email must be an email"]);
        assert_eq!(
            grouped["password"],
            vec!["password must be longer than or equal to 8 characters"]
        );
    }

    #[test]
    fn test_group_messages_collects_same_field() {
        let grouped = group_messages_by_field(&[
            "firstName should not be empty".to_string(),
            "firstName must be shorter than or equal to 50 characters".to_string(),
        ]);

        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["firstName"].len(), 2);
    }

    #[test]
    fn test_group_message_without_whitespace() {
        let grouped = group_messages_by_field(&["malformed".to_string()]);
        assert_eq!(grouped["malformed"], vec!["malformed"]);
    }

    #[test]
    fn test_validation_messages_are_sorted_and_camel_cased() {
        let input = Signup {
            first_name: String::new(),
            email: "nope".to_string(),
            password: "short".to_string(),
            age: 10,
        };
        let errors = input.validate().unwrap_err();

        assert_eq!(
            validation_messages(&errors),
            vec![
                "age is invalid",
                "email must be an email",
                "firstName should not be empty",
                "password must be longer than or equal to 8 characters",
            ]
        );
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("first_name"), "firstName");
        assert_eq!(camel_case("email"), "email");
        assert_eq!(camel_case("lastName"), "lastName");
    }
}
