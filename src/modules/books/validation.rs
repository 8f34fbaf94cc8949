//! Closed-schema validation of book payloads.
//!
//! Request bodies are checked as raw JSON before they are turned into a
//! [`Book`], so every problem (unknown keys, missing keys, wrong JSON types,
//! semantic rules) is reported in one response rather than stopping at the
//! first serde error.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use serde_json::{json, Map, Value};
use shelf_http::error::AppError;
use validator::Validate;

use super::models::Book;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Integer,
}

/// Every field a book payload must carry, in response order.
const BOOK_FIELDS: &[(&str, FieldKind)] = &[
    ("isbn", FieldKind::Text),
    ("amazon_url", FieldKind::Text),
    ("author", FieldKind::Text),
    ("language", FieldKind::Text),
    ("pages", FieldKind::Integer),
    ("publisher", FieldKind::Text),
    ("title", FieldKind::Text),
    ("year", FieldKind::Integer),
];

fn problem(field: &str, error: &str) -> Value {
    json!({ "field": field, "error": error })
}

/// Validate a decoded JSON body and turn it into a [`Book`].
///
/// Integers must be JSON integers that fit in 32 bits; numeric strings and
/// floats are rejected as `invalid_type`.
pub fn parse_book(body: Value) -> Result<Book, AppError> {
    let Value::Object(fields) = body else {
        return Err(AppError::validation(
            vec![problem("body", "not_an_object")],
            "Book payload must be a JSON object",
        ));
    };

    let mut details = check_shape(&fields);
    if !details.is_empty() {
        return Err(AppError::validation(details, "Book payload is invalid"));
    }

    let book: Book = serde_json::from_value(Value::Object(fields)).map_err(|err| {
        AppError::validation(
            vec![problem("body", "invalid_type")],
            format!("Book payload is invalid: {err}"),
        )
    })?;

    if let Err(errors) = book.validate() {
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                details.push(problem(&field, &error.code));
            }
        }
        details.sort_by(|a, b| a["field"].as_str().cmp(&b["field"].as_str()));
        return Err(AppError::validation(details, "Book payload is invalid"));
    }

    Ok(book)
}

fn check_shape(fields: &Map<String, Value>) -> Vec<Value> {
    let mut details: Vec<Value> = fields
        .keys()
        .filter(|key| !BOOK_FIELDS.iter().any(|(name, _)| name == key))
        .map(|key| problem(key, "unknown_field"))
        .collect();

    for &(name, kind) in BOOK_FIELDS {
        match fields.get(name) {
            None => details.push(problem(name, "required")),
            Some(value) => match kind {
                FieldKind::Text if !value.is_string() => {
                    details.push(problem(name, "invalid_type"));
                }
                FieldKind::Integer => match value.as_i64() {
                    None => details.push(problem(name, "invalid_type")),
                    Some(n) if i32::try_from(n).is_err() => {
                        details.push(problem(name, "out_of_range"));
                    }
                    Some(_) => {}
                },
                FieldKind::Text => {}
            },
        }
    }

    details
}

/// Extractor yielding a fully validated [`Book`] from the request body.
///
/// A body that is not JSON at all is reported as a validation error too.
#[derive(Debug, Clone)]
pub struct BookPayload(pub Book);

impl<S> FromRequest<S> for BookPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|err| AppError::validation(vec![problem("body", "unreadable")], err.body_text()))?;

        let value: Value = serde_json::from_slice(&bytes).map_err(|err| {
            AppError::validation(
                vec![problem("body", "invalid_json")],
                format!("Request body is not valid JSON: {err}"),
            )
        })?;

        parse_book(value).map(BookPayload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        json!({
            "isbn": "123432122",
            "amazon_url": "https://amazon.com/taco",
            "author": "Elie",
            "language": "English",
            "pages": 100,
            "publisher": "Nothing publishers",
            "title": "my first book",
            "year": 2008
        })
    }

    fn details_of(err: AppError) -> Vec<Value> {
        match err {
            AppError::Validation { details, .. } => details,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_complete_payload() {
        let book = parse_book(sample()).unwrap();
        assert_eq!(book.isbn, "123432122");
        assert_eq!(book.pages, 100);
        assert_eq!(book.year, 2008);
    }

    #[test]
    fn reports_every_missing_field() {
        let details = details_of(parse_book(json!({ "year": 2000 })).unwrap_err());

        let missing: Vec<_> = details
            .iter()
            .filter(|d| d["error"] == "required")
            .map(|d| d["field"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            missing,
            vec!["isbn", "amazon_url", "author", "language", "pages", "publisher", "title"]
        );
    }

    #[test]
    fn rejects_unknown_field_even_when_otherwise_valid() {
        let mut body = sample();
        body["badField"] = json!("DO NOT ADD ME!");

        let details = details_of(parse_book(body).unwrap_err());
        assert_eq!(details, vec![json!({"field": "badField", "error": "unknown_field"})]);
    }

    #[test]
    fn rejects_numeric_strings_and_floats() {
        let mut body = sample();
        body["pages"] = json!("100");
        body["year"] = json!(2008.5);

        let details = details_of(parse_book(body).unwrap_err());
        assert_eq!(
            details,
            vec![
                json!({"field": "pages", "error": "invalid_type"}),
                json!({"field": "year", "error": "invalid_type"}),
            ]
        );
    }

    #[test]
    fn rejects_non_string_text_fields() {
        let mut body = sample();
        body["isbn"] = json!(123432122);
        body["author"] = Value::Null;

        let details = details_of(parse_book(body).unwrap_err());
        assert_eq!(details.len(), 2);
        assert!(details.contains(&json!({"field": "isbn", "error": "invalid_type"})));
        assert!(details.contains(&json!({"field": "author", "error": "invalid_type"})));
    }

    #[test]
    fn rejects_out_of_range_integers() {
        let mut body = sample();
        body["year"] = json!(i64::from(i32::MAX) + 1);

        let details = details_of(parse_book(body).unwrap_err());
        assert_eq!(details, vec![json!({"field": "year", "error": "out_of_range"})]);
    }

    #[test]
    fn applies_semantic_rules() {
        let mut body = sample();
        body["title"] = json!("");
        body["pages"] = json!(0);
        body["amazon_url"] = json!("not a url");

        let details = details_of(parse_book(body).unwrap_err());
        assert_eq!(
            details,
            vec![
                json!({"field": "amazon_url", "error": "url"}),
                json!({"field": "pages", "error": "range"}),
                json!({"field": "title", "error": "length"}),
            ]
        );
    }

    #[test]
    fn rejects_non_object_bodies() {
        let details = details_of(parse_book(json!([sample()])).unwrap_err());
        assert_eq!(details, vec![json!({"field": "body", "error": "not_an_object"})]);
    }
}
