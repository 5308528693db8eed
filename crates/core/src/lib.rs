#![forbid(unsafe_code)]

pub mod catalog;
mod error;
pub mod model;
pub mod rank;

pub use error::Error;
pub use rank::{RankInfo, RankTable, RankThresholds, RankTier};
