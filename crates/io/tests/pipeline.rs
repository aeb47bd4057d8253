//! End-to-end runs: load the heterogeneous feeds, reconcile, write reports.

use std::path::Path;

use tempfile::tempdir;

use premise_io::{report, sources};
use premise_recon::engine::{run, ReconInput};
use premise_recon::model::{Channel, Contribution, Key, ReconResult};
use premise_recon::{ReconConfig, ReconError};

fn config() -> ReconConfig {
    ReconConfig::from_toml(r#"name = "pipeline test""#).unwrap()
}

fn run_contributions(contributions: Vec<Contribution>) -> ReconResult {
    run(&config(), &ReconInput { contributions })
}

fn read_rows(path: &Path) -> Vec<csv::StringRecord> {
    let content = std::fs::read_to_string(path).unwrap();
    csv::Reader::from_reader(content.as_bytes())
        .records()
        .map(|r| r.unwrap())
        .collect()
}

#[test]
fn gallo_and_ww_rows_normalize_to_one_record() {
    let gallo = "\
Customer Name,Address,City,State,Zip,TDLinx Code,Channel,Sub-Channel
111 CLUB,545 S IMPERIAL AVE,CALEXICO,CA,92231,5552368,Dining,Casual
";
    let ww = "\
sold_to_name,addrl1,city,zip,License No.,sold_to
  111 club ,545 s imperial ave,calexico ,92231,L-77,9001
";
    let mut contributions =
        sources::load_gallo("gallo.csv", gallo, Channel::OnPremise).unwrap();
    contributions.extend(sources::load_ww("ww.csv", ww, Channel::OnPremise, "CA").unwrap());

    let result = run_contributions(contributions);
    let on = &result.channels[0];
    assert_eq!(on.records.len(), 1);

    let (key, record) = on.records.iter().next().unwrap();
    assert_eq!(key.customer_name, "111 CLUB");
    assert!(record.in_gallo && record.in_ww && !record.in_spectra);
    assert_eq!(record.tdlinx_code.as_deref(), Some("5552368"));
    assert_eq!(record.license_number.as_deref(), Some("L-77"));
    // Exact-key merge, not a fuzzy cluster: no ledger entry.
    assert!(on.dupes.is_empty());
}

#[test]
fn near_duplicate_addresses_cluster_with_ledger() {
    let a = Key::new("1212", "1212 3rd St", "Santa Monica", "CA", "90401");
    let b = Key::new("1212", "1212 3rd Street", "Santa Monica", "CA", "90401");
    let contributions = vec![
        Contribution {
            channel: Channel::OffPremise,
            key: a.clone(),
            record: Default::default(),
        },
        Contribution {
            channel: Channel::OffPremise,
            key: b.clone(),
            record: Default::default(),
        },
    ];

    let result = run_contributions(contributions);
    let off = &result.channels[1];
    assert_eq!(off.records.len(), 1, "similar keys collapse to one canonical");
    assert!(off.records.contains_key(&a), "smaller key is canonical");

    let ledger = &off.dupes[&a];
    assert!(ledger.contains_key(&a) && ledger.contains_key(&b));
}

#[test]
fn spectra_address_grammar_end_to_end() {
    let spectra = "\
TDLinx,Store Name,Store Address
42,KWIK STOP,1300 Dana Dr: Redding CA: 96003-4071
";
    let contributions =
        sources::load_spectra("spectra.csv", spectra, Channel::OffPremise).unwrap();
    let result = run_contributions(contributions);
    let off = &result.channels[1];

    let key = off.records.keys().next().unwrap();
    assert_eq!(key.address, "1300 DANA DR");
    assert_eq!(key.city, "REDDING");
    assert_eq!(key.state, "CA");
    assert_eq!(key.zip, "96003");
}

#[test]
fn all_empty_key_absent_from_output_file() {
    let gallo = "\
Customer Name,Address,City,State,Zip,TDLinx Code,Channel,Sub-Channel
,,,,,999,X,Y
KEPT,1 Main St,Chico,CA,95926,1,A,B
";
    let contributions = sources::load_gallo("gallo.csv", gallo, Channel::OnPremise).unwrap();
    let result = run_contributions(contributions);

    let dir = tempdir().unwrap();
    let path = dir.path().join("On-Premise.csv");
    report::write_channel(&path, &result.channels[0]).unwrap();

    let rows = read_rows(&path);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(0), Some("KEPT"));
}

#[test]
fn malformed_address_aborts_before_any_output() {
    let spectra = "\
TDLinx,Store Name,Store Address
1,OK,1 Main St: Chico CA: 95926
2,BAD,1300 Dana Dr Redding CA 96003
";
    let dir = tempdir().unwrap();

    // Same orchestration order as the CLI: all loads complete before any
    // report is written.
    let loaded = sources::load_spectra("spectra.csv", spectra, Channel::OnPremise);
    let err = match loaded {
        Ok(_) => panic!("malformed address must fail the load"),
        Err(e) => e,
    };
    assert!(matches!(err, ReconError::AddressParse { .. }));
    assert!(
        std::fs::read_dir(dir.path()).unwrap().next().is_none(),
        "no output files on failure"
    );
}

#[test]
fn full_run_writes_all_four_reports() {
    let gallo = "\
Customer Name,Address,City,State,Zip,TDLinx Code,Channel,Sub-Channel
1212,1212 3RD ST,SANTA MONICA,CA,90401,777,Dining,Casual
";
    let spectra_on = "\
TDLinx,Store Name,Store Address
888,1212,1212 3rd Street: Santa Monica CA: 90401
";
    let spectra_off = "\
TDLinx,Store Name,Store Address
999,KWIK STOP,1300 Dana Dr: Redding CA: 96003-4071
";
    let ww = "\
sold_to_name,addrl1,city,zip,License No.,sold_to
kwik stop,1300 dana dr,redding,96003,L-5,42
";

    let mut contributions =
        sources::load_gallo("gallo.csv", gallo, Channel::OnPremise).unwrap();
    contributions
        .extend(sources::load_spectra("s_on.csv", spectra_on, Channel::OnPremise).unwrap());
    contributions
        .extend(sources::load_spectra("s_off.csv", spectra_off, Channel::OffPremise).unwrap());
    contributions.extend(sources::load_ww("ww.csv", ww, Channel::OffPremise, "CA").unwrap());

    let result = run_contributions(contributions);

    let dir = tempdir().unwrap();
    for channel in &result.channels {
        let table = dir.path().join(format!("{}.csv", channel.channel));
        report::write_channel(&table, channel).unwrap();
        let dupes = dir.path().join(format!("{}-dupes.csv", channel.channel));
        report::write_dupes(&dupes, channel).unwrap();
    }

    // On-premise: the Gallo and Spectra rows fuzzily merge ("3RD ST" vs
    // "3rd Street") into one canonical row with both flags.
    let on_rows = read_rows(&dir.path().join("On-Premise.csv"));
    assert_eq!(on_rows.len(), 1);
    assert_eq!(on_rows[0].get(5), Some("On-Premise"));
    assert_eq!(on_rows[0].get(11), Some("true")); // IN SPECTRA
    assert_eq!(on_rows[0].get(12), Some("true")); // IN GALLO

    let on_dupes = read_rows(&dir.path().join("On-Premise-dupes.csv"));
    assert_eq!(on_dupes.len(), 1, "one non-canonical member ledgered");

    // Off-premise: Spectra and WW rows agree exactly after normalization.
    let off_rows = read_rows(&dir.path().join("Off-Premise.csv"));
    assert_eq!(off_rows.len(), 1);
    assert_eq!(off_rows[0].get(0), Some("KWIK STOP"));
    assert_eq!(off_rows[0].get(8), Some("L-5")); // License No.
    assert_eq!(off_rows[0].get(11), Some("true")); // IN SPECTRA
    assert_eq!(off_rows[0].get(13), Some("true")); // IN WW

    let off_dupes = read_rows(&dir.path().join("Off-Premise-dupes.csv"));
    assert!(off_dupes.is_empty());
}
