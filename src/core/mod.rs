//! Core module - storage, seeding, lookup and configuration

pub mod config;
pub mod lookup;
pub mod seed;
pub mod store;

pub use config::{Config, ConfigError};
pub use lookup::{
    format_date, lookup, search_by_type, CaseDetails, LookupError, OrderEntry, SearchRequest,
};
pub use seed::{sample_cases, seed, verify, SeedReport, VerificationReport};
pub use store::{CaseKey, CaseRecord, CaseStore, NewCase, ProvisionReport, StoreError};
