//! CSV report writers: one canonical table and one dupe ledger per channel.

use std::path::Path;

use premise_recon::model::{Channel, ChannelResult, Key, Record};
use premise_recon::ReconError;

/// Output column order, fixed by the downstream consumers of the report.
pub const OUTPUT_FIELDS: [&str; 14] = [
    "Customer Name",
    "Address",
    "City",
    "State",
    "Zip",
    "Premise",
    "TDLinx Code",
    "Sold to",
    "License No.",
    "Channel / Trad Channel",
    "Sub-Channel / Sub Trade Channel",
    "IN SPECTRA",
    "IN GALLO",
    "IN WW",
];

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn flag(value: bool) -> String {
    value.to_string()
}

fn output_row(key: &Key, channel: Channel, record: &Record) -> Vec<String> {
    vec![
        key.customer_name.clone(),
        key.address.clone(),
        key.city.clone(),
        key.state.clone(),
        key.zip.clone(),
        channel.to_string(),
        opt(&record.tdlinx_code),
        opt(&record.sold_to),
        opt(&record.license_number),
        opt(&record.channel),
        opt(&record.sub_channel),
        flag(record.in_spectra),
        flag(record.in_gallo),
        flag(record.in_ww),
    ]
}

/// Write the canonical table: one row per canonical record, `Premise` fixed
/// to the channel name.
pub fn write_channel(path: &Path, result: &ChannelResult) -> Result<(), ReconError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| ReconError::Io(e.to_string()))?;
    writer
        .write_record(OUTPUT_FIELDS)
        .map_err(|e| ReconError::Io(e.to_string()))?;

    for (key, record) in &result.records {
        writer
            .write_record(output_row(key, result.channel, record))
            .map_err(|e| ReconError::Io(e.to_string()))?;
    }
    writer.flush().map_err(|e| ReconError::Io(e.to_string()))
}

/// Write the dupe ledger: the canonical key's five fields (prefixed `Dupe`)
/// followed by the full output row of each non-canonical cluster member,
/// one row per duplicate.
pub fn write_dupes(path: &Path, result: &ChannelResult) -> Result<(), ReconError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| ReconError::Io(e.to_string()))?;

    let mut header: Vec<String> = ["Customer Name", "Address", "City", "State", "Zip"]
        .iter()
        .map(|f| format!("Dupe{f}"))
        .collect();
    header.extend(OUTPUT_FIELDS.iter().map(|f| f.to_string()));
    writer
        .write_record(&header)
        .map_err(|e| ReconError::Io(e.to_string()))?;

    for (canonical, members) in &result.dupes {
        for (member, record) in members {
            if member == canonical {
                continue;
            }
            let mut row = vec![
                canonical.customer_name.clone(),
                canonical.address.clone(),
                canonical.city.clone(),
                canonical.state.clone(),
                canonical.zip.clone(),
            ];
            row.extend(output_row(member, result.channel, record));
            writer
                .write_record(&row)
                .map_err(|e| ReconError::Io(e.to_string()))?;
        }
    }
    writer.flush().map_err(|e| ReconError::Io(e.to_string()))
}
