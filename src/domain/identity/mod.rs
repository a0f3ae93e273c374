//! Identity module - who is logged in and how the login was protected.

mod errors;
#[allow(clippy::module_inception)]
mod identity;
mod state_token;

pub use errors::IdentityError;
pub use identity::Identity;
pub use state_token::StateToken;
