//! Fixed-grammar address parser for the Spectra feeds.
//!
//! The only accepted shape is `street: city ST: zip` with optional trailing
//! content after the five-digit zip (zip+4 suffixes, suite numbers). This is
//! deliberately narrow: a row that does not match is a data-contract
//! violation upstream, not something to skip.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::ReconError;

/// Pieces extracted from one free-text address field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

fn address_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // street and city are non-greedy arbitrary text; state is exactly
        // two letters; zip exactly five digits. Anchored at the start,
        // anything after the zip is discarded.
        Regex::new(r"^(?P<street>.*?): (?P<city>.*?) (?P<state>[A-Za-z]{2}): (?P<zip>[0-9]{5})")
            .unwrap()
    })
}

/// Parse `"1300 Dana Dr: Redding CA: 96003-4071"` into
/// `(1300 Dana Dr, Redding, CA, 96003)`.
pub fn parse_address(input: &str) -> Result<ParsedAddress, ReconError> {
    let caps = address_re()
        .captures(input)
        .ok_or_else(|| ReconError::AddressParse {
            value: input.to_string(),
        })?;
    Ok(ParsedAddress {
        street: caps["street"].to_string(),
        city: caps["city"].to_string(),
        state: caps["state"].to_string(),
        zip: caps["zip"].to_string(),
    })
}
