//! `premise-recon` — customer-location record-linkage and merge engine.
//!
//! Pure engine crate: receives pre-loaded contributions, returns canonical
//! records plus a dupe ledger per sales channel. No CLI or IO dependencies.

pub mod accumulate;
pub mod address;
pub mod cluster;
pub mod config;
pub mod engine;
pub mod error;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod partition;
pub mod similarity;

pub use config::ReconConfig;
pub use engine::{run, ReconInput};
pub use error::ReconError;
pub use model::{Channel, Contribution, Key, Record, ReconResult};
