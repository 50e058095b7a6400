mod auth;
mod error;
pub mod flash;
mod settings;

pub use auth::*;
pub use error::*;
pub use flash::{FlashMessage, FlashType};
pub use settings::*;
