//! Session handlers.
//!
//! - `SessionIdentityManager` - CSRF state and cached identity for one session
//! - `OAuthLoginFlow` - Authorization-code login against Patreon

mod identity_manager;
mod login_flow;

pub use identity_manager::SessionIdentityManager;
pub use login_flow::{AuthorizationEndpoint, OAuthLoginFlow};
