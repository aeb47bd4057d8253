//! `premise-io` — CSV adapters around the reconciliation engine.
//!
//! Source loaders turn each heterogeneous feed into engine contributions;
//! report writers serialize canonical records and the dupe ledger. All of
//! the engineering risk lives in `premise-recon`; these are thin, fail-fast
//! adapters.

pub mod report;
pub mod sources;
