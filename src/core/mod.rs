pub mod classify;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod node;
pub mod normalize;
pub mod search;

#[cfg(test)]
mod fixtures;

pub use crate::domain::ports::{ConfigProvider, FetchStrategy, QueryEncoder, Storage};
pub use crate::utils::error::Result;
