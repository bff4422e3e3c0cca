//! Vocabulary quiz engine: favourites, multiple-choice sessions over them,
//! and a persisted history of completed attempts.

pub mod analytics;
pub mod config;
pub mod error;
pub mod quiz;
pub mod store;
pub mod vocab;
