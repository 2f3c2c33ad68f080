//! # Stockdesk Core Types
//!
//! Layer 0 of the workspace: the plain value types shared by every other crate.
//! Nothing here performs I/O or holds state beyond the data it describes.

pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use structs::{CompanyProfile, IncomeStatementRaw, PriceObservation, PriceSeries, Quote};
