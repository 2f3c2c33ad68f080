//! # Stockdesk Store
//!
//! The system's "permanent archive": plain JSON files on disk.
//!
//! - `JsonRepository`: reads and atomically writes any serde type as pretty-printed JSON.
//! - `ProfileCache`: the `company_profiles.json` map of symbol to `CompanyProfile`.
//! - `StoreError`: the specific error types that can be returned from this crate.

pub mod error;
pub mod profile_cache;
pub mod repository;

pub use error::StoreError;
pub use profile_cache::ProfileCache;
pub use repository::JsonRepository;
