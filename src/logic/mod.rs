pub mod cities;
pub mod error;
pub mod heroes;
pub mod teams;

pub use error::*;

use serde::Serialize;

/// Result of a list endpoint: every record, or the first record matching a search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Listing<T> {
    All(Vec<T>),
    Match(T),
}
