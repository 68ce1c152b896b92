//! Normalization and aggregation core for Indian census migration tables.
//!
//! Raw rows go through [`loader::ingest`] (names canonicalized by
//! [`normalize::normalize`]) into an immutable record set. Views for a
//! selected state are recomputed from scratch with [`flows::query`] and
//! [`auxiliary::sum_columns`] on every change of [`types::Query`].
pub mod auxiliary;
pub mod config;
pub mod error;
pub mod flows;
pub mod geo;
pub mod loader;
pub mod normalize;
pub mod output;
pub mod reports;
pub mod schema;
pub mod store;
pub mod types;
pub mod util;

pub use error::{CensusError, Result};
pub use types::{Direction, MigrationRecord, Order, Query, RawRow};
