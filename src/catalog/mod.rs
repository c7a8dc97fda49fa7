//! Storefront catalog access.
//!
//! [`search`] turns a free-text query into lightweight candidates;
//! [`details`] enriches one candidate into a full
//! [`crate::types::EnrichedTitle`].

pub mod details;
pub mod search;

pub use details::DetailsClient;
pub use search::SearchClient;
