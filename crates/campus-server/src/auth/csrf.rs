use axum::{
    extract::Request,
    http::{HeaderMap, Method},
    middleware::Next,
    response::Response,
};
use rand::{distributions::Alphanumeric, Rng};

use super::cookies::{read_cookie, CSRF_COOKIE, CSRF_HEADER};
use crate::error::AppError;

const TOKEN_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CsrfError {
    #[error("Missing csrf secret")]
    MissingSecret,

    #[error("Invalid csrf token")]
    InvalidToken,
}

impl CsrfError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingSecret => "MISSING_CSRF_SECRET",
            Self::InvalidToken => "INVALID_CSRF_TOKEN",
        }
    }
}

pub fn generate_csrf_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LEN)
        .map(char::from)
        .collect()
}

/// Double-submit check: the cookie and the header must carry the same token.
pub fn verify_csrf(headers: &HeaderMap) -> Result<(), CsrfError> {
    let secret = read_cookie(headers, CSRF_COOKIE)
        .filter(|s| !s.is_empty())
        .ok_or(CsrfError::MissingSecret)?;

    let token = headers
        .get(CSRF_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or(CsrfError::InvalidToken)?;

    if !constant_time_eq(secret.as_bytes(), token.as_bytes()) {
        return Err(CsrfError::InvalidToken);
    }

    Ok(())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

pub async fn csrf_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let safe = matches!(
        *request.method(),
        Method::GET | Method::HEAD | Method::OPTIONS
    );

    if !safe {
        verify_csrf(request.headers()).map_err(|e| {
            tracing::debug!("Rejected request: {}", e);
            e
        })?;
    }

    Ok(next.run(request).await)
}
