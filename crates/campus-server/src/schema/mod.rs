//! Request body validation.
//!
//! Bodies are parsed to JSON first and then checked field by field in
//! declaration order, stopping at the first violation. Messages name the
//! offending location as a `body/<path>` pointer so the client can show
//! which field was rejected. Unknown keys are ignored.

mod settings;

use std::sync::OnceLock;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
};
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct SchemaError(pub String);

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        AppError::Validation(err.0)
    }
}

/// A request body that can be built from untyped JSON.
pub trait BodySchema: Sized {
    fn from_value(value: &Value) -> Result<Self, SchemaError>;
}

/// Extractor that runs [`BodySchema`] over the request body.
#[derive(Debug)]
pub struct SchemaJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for SchemaJson<T>
where
    S: Send + Sync,
    T: BodySchema + Send,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;

        let value: Value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .map_err(|e| AppError::Validation(format!("Body is not valid JSON: {e}")))?
        };

        Ok(SchemaJson(T::from_value(&value)?))
    }
}

/// A location inside the request body, rendered as `body/a/b`.
#[derive(Debug, Clone)]
pub struct Pointer(String);

impl Pointer {
    pub fn body() -> Self {
        Pointer("body".to_string())
    }

    pub fn child(&self, key: &str) -> Self {
        Pointer(format!("{}/{}", self.0, key))
    }

    fn fail(&self, rule: impl std::fmt::Display) -> SchemaError {
        SchemaError(format!("{} {}", self.0, rule))
    }
}

pub fn object<'a>(value: &'a Value, at: &Pointer) -> Result<&'a Map<String, Value>, SchemaError> {
    value.as_object().ok_or_else(|| at.fail("must be object"))
}

pub fn required<'a>(
    object: &'a Map<String, Value>,
    at: &Pointer,
    key: &str,
) -> Result<&'a Value, SchemaError> {
    object
        .get(key)
        .ok_or_else(|| at.fail(format_args!("must have required property '{key}'")))
}

pub fn boolean(value: &Value, at: &Pointer) -> Result<bool, SchemaError> {
    value.as_bool().ok_or_else(|| at.fail("must be boolean"))
}

pub fn string<'a>(value: &'a Value, at: &Pointer) -> Result<&'a str, SchemaError> {
    value.as_str().ok_or_else(|| at.fail("must be string"))
}

/// A string whose length in characters lies within `min..=max`.
pub fn string_len<'a>(
    value: &'a Value,
    at: &Pointer,
    min: usize,
    max: usize,
) -> Result<&'a str, SchemaError> {
    let s = string(value, at)?;
    let len = s.chars().count();
    if len < min {
        return Err(at.fail(format_args!("must NOT have fewer than {min} characters")));
    }
    if len > max {
        return Err(at.fail(format_args!("must NOT have more than {max} characters")));
    }
    Ok(s)
}

pub fn constant(value: &Value, at: &Pointer, expected: &Value) -> Result<(), SchemaError> {
    if value == expected {
        Ok(())
    } else {
        Err(at.fail("must be equal to constant"))
    }
}

/// One of a fixed set of string values.
pub fn one_of<'a>(value: &'a Value, at: &Pointer, allowed: &[&str]) -> Result<&'a str, SchemaError> {
    value
        .as_str()
        .filter(|s| allowed.contains(s))
        .ok_or_else(|| at.fail("must be equal to one of the allowed values"))
}

pub fn url<'a>(value: &'a Value, at: &Pointer) -> Result<&'a str, SchemaError> {
    let s = string(value, at)?;
    if url_pattern().is_match(s) {
        Ok(s)
    } else {
        Err(at.fail("must match format \"url\""))
    }
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(?:https?|ftp)://(?:[^\s:@/]+(?::[^\s@/]*)?@)?(?:[a-z0-9\u{00a1}-\u{ffff}](?:[a-z0-9\u{00a1}-\u{ffff}-]*[a-z0-9\u{00a1}-\u{ffff}])?(?:\.[a-z0-9\u{00a1}-\u{ffff}](?:[a-z0-9\u{00a1}-\u{ffff}-]*[a-z0-9\u{00a1}-\u{ffff}])?)*|\d{1,3}(?:\.\d{1,3}){3}|\[[0-9a-f:.]+\])(?::\d{2,5})?(?:[/?#]\S*)?$")
            .expect("url pattern is valid")
    })
}
