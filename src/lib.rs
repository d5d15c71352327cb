//! GitHub profile analytics.
//!
//! Fetches a user's profile, repositories and public events, then derives
//! language statistics, contribution buckets, trends, quality and impact
//! scores, and two-user comparisons from them.

pub mod activity;
pub mod cache;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod github;
pub mod heat;
pub mod model;
pub mod profile;
pub mod stats;
pub mod util;

pub use error::{GhStatsError, Result};
