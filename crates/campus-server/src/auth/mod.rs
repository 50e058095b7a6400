mod cookies;
mod csrf;
mod jwt;
mod middleware;

pub use cookies::{read_cookie, set_cookie, CSRF_COOKIE, CSRF_HEADER, SESSION_COOKIE};
pub use csrf::{csrf_middleware, generate_csrf_token, verify_csrf, CsrfError};
pub use jwt::{create_session_token, verify_session_token, Claims};
pub use middleware::{auth_middleware, AuthUser};
