//! Loaders for the four source schemas. Each returns engine contributions;
//! any malformed row or absent column is fatal for the load, never skipped.

use premise_recon::address::parse_address;
use premise_recon::model::{Channel, Contribution, Key, Record};
use premise_recon::ReconError;

/// Empty and whitespace-only cells become `None` so they never overwrite a
/// merged value.
fn cell(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn read_headers(
    reader: &mut csv::Reader<&[u8]>,
) -> Result<Vec<String>, ReconError> {
    Ok(reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect())
}

fn column_index(headers: &[String], source: &str, name: &str) -> Result<usize, ReconError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ReconError::MissingColumn {
            source: source.into(),
            column: name.into(),
        })
}

/// Gallo feed: `Customer Name, Address, City, State, Zip, TDLinx Code,
/// Channel, Sub-Channel`. Contributes tdlinx/channel/sub-channel and the
/// `in_gallo` flag.
pub fn load_gallo(
    source: &str,
    csv_data: &str,
    channel: Channel,
) -> Result<Vec<Contribution>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());
    let headers = read_headers(&mut reader)?;

    let name_idx = column_index(&headers, source, "Customer Name")?;
    let address_idx = column_index(&headers, source, "Address")?;
    let city_idx = column_index(&headers, source, "City")?;
    let state_idx = column_index(&headers, source, "State")?;
    let zip_idx = column_index(&headers, source, "Zip")?;
    let tdlinx_idx = column_index(&headers, source, "TDLinx Code")?;
    let channel_idx = column_index(&headers, source, "Channel")?;
    let sub_channel_idx = column_index(&headers, source, "Sub-Channel")?;

    let mut contributions = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        let field = |i: usize| record.get(i).unwrap_or("");

        contributions.push(Contribution {
            channel,
            key: Key::new(
                field(name_idx),
                field(address_idx),
                field(city_idx),
                field(state_idx),
                field(zip_idx),
            ),
            record: Record {
                tdlinx_code: cell(field(tdlinx_idx)),
                channel: cell(field(channel_idx)),
                sub_channel: cell(field(sub_channel_idx)),
                in_gallo: true,
                ..Record::default()
            },
        });
    }
    Ok(contributions)
}

/// Spectra feed: `Store Name, Store Address` plus a tdlinx column whose
/// header name varies by export; by contract it is the first column of the
/// file. The address field carries the full `street: city ST: zip` grammar.
pub fn load_spectra(
    source: &str,
    csv_data: &str,
    channel: Channel,
) -> Result<Vec<Contribution>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());
    let headers = read_headers(&mut reader)?;

    if headers.is_empty() {
        return Err(ReconError::MissingColumn {
            source: source.into(),
            column: "<tdlinx (first column)>".into(),
        });
    }
    let tdlinx_idx = 0;
    let name_idx = column_index(&headers, source, "Store Name")?;
    let address_idx = column_index(&headers, source, "Store Address")?;

    let mut contributions = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        let field = |i: usize| record.get(i).unwrap_or("");

        let parsed = parse_address(field(address_idx))?;

        contributions.push(Contribution {
            channel,
            key: Key::new(
                field(name_idx),
                &parsed.street,
                &parsed.city,
                &parsed.state,
                &parsed.zip,
            ),
            record: Record {
                tdlinx_code: cell(field(tdlinx_idx)),
                in_spectra: true,
                ..Record::default()
            },
        });
    }
    Ok(contributions)
}

/// WW feed: `sold_to_name, addrl1, city, zip, License No., sold_to`. The
/// feed has no state column; the caller supplies the constant code.
pub fn load_ww(
    source: &str,
    csv_data: &str,
    channel: Channel,
    state: &str,
) -> Result<Vec<Contribution>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());
    let headers = read_headers(&mut reader)?;

    let name_idx = column_index(&headers, source, "sold_to_name")?;
    let address_idx = column_index(&headers, source, "addrl1")?;
    let city_idx = column_index(&headers, source, "city")?;
    let zip_idx = column_index(&headers, source, "zip")?;
    let license_idx = column_index(&headers, source, "License No.")?;
    let sold_to_idx = column_index(&headers, source, "sold_to")?;

    let mut contributions = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        let field = |i: usize| record.get(i).unwrap_or("");

        contributions.push(Contribution {
            channel,
            key: Key::new(
                field(name_idx),
                field(address_idx),
                field(city_idx),
                state,
                field(zip_idx),
            ),
            record: Record {
                license_number: cell(field(license_idx)),
                sold_to: cell(field(sold_to_idx)),
                in_ww: true,
                ..Record::default()
            },
        });
    }
    Ok(contributions)
}
