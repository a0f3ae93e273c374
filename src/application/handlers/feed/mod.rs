//! Feed handlers.

mod create_feed;

pub use create_feed::{CreateFeedCommand, CreateFeedHandler};
