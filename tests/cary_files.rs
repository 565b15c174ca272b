mod common;

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::tempdir;

use cary_reader::{CaryDataset, CaryError, LoadOptions};
use common::{export_csv, init_logging, log_blocks, multi_sample_scan, write_fixture, FixtureTrace};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

fn berio_scan() -> Vec<FixtureTrace> {
    let emission = vec![400.0, 401.0, 402.0, 403.0];
    [300.0, 310.0, 320.0]
        .iter()
        .map(|ex| {
            FixtureTrace::new(
                &format!("berio_EX_{ex:.2}"),
                emission.clone(),
                emission.iter().map(|em| em - ex).collect(),
            )
        })
        .collect()
}

#[test]
fn test_file_without_log() {
    init_logging();
    let dir = tempdir().unwrap();
    let traces = vec![
        FixtureTrace::new("Blank", vec![300.0, 301.0, 302.0], vec![0.1, 0.2, 0.3]),
        FixtureTrace::new("Probe", vec![500.0, 501.0], vec![5.0, 6.0]),
    ];
    let path = write_fixture(&dir, "mixed.csv", &export_csv(&traces, &[]));

    let data = CaryDataset::from_csv(&path).unwrap();
    assert!(!data.contains_log());
    assert!(data.collection_times().is_none());
    assert!(!data.all_wavelengths_equal());
    assert_eq!(data.names().collect::<Vec<_>>(), vec!["Blank", "Probe"]);
    assert_eq!(data.intensities("Probe"), Some(&[5.0, 6.0][..]));
    assert_eq!(data.trace("Blank").unwrap().wavelengths, vec![300.0, 301.0, 302.0]);
    assert_eq!(data.source_path(), path.as_path());
    assert!(matches!(data.collapsed_table(), Err(CaryError::InvalidState(_))));
}

#[test]
fn test_ex_em_scan_with_log() {
    init_logging();
    let dir = tempdir().unwrap();
    let traces = berio_scan();
    let names: Vec<&str> = traces.iter().map(|t| t.name.as_str()).collect();
    let log = log_blocks(
        &names,
        &[
            "03/14/2022 10:15:00 PM",
            "03/14/2022 10:16:30 PM",
            "03/14/2022 10:18:00 PM",
        ],
    );
    let path = write_fixture(&dir, "berio.csv", &export_csv(&traces, &log));

    let data = CaryDataset::from_csv(&path).unwrap();
    assert!(data.contains_log());
    assert!(data.all_wavelengths_equal());

    let times = data.collection_times().unwrap();
    assert_eq!(times.len(), traces.len());
    assert_eq!(
        data.collection_time("berio_EX_310.00"),
        Some(at(2022, 3, 14, 22, 16, 30))
    );

    let collapsed = data.collapsed_table().unwrap();
    assert_eq!(collapsed.shape(), (4, 3));
    assert_eq!(collapsed.columns, vec!["berio_EX_300.00", "berio_EX_310.00", "berio_EX_320.00"]);

    let eem = data.ex_em_matrix().unwrap();
    assert_eq!(eem.columns, vec![300.0, 310.0, 320.0]);
    assert_eq!(eem.index, vec![400.0, 401.0, 402.0, 403.0]);
    assert_eq!(eem.value(1, 2), Some(81.0));
}

#[test]
fn test_duplicate_trace_names_in_columns_and_log() {
    init_logging();
    let dir = tempdir().unwrap();
    let traces = vec![
        FixtureTrace::new("Sample", vec![300.0, 301.0], vec![1.0, 2.0]),
        FixtureTrace::new("Sample", vec![300.0, 301.0], vec![3.0, 4.0]),
    ];
    let log = log_blocks(
        &["Sample", "Sample"],
        &["01/05/2023 09:00:00 AM", "01/05/2023 09:05:00 AM"],
    );
    let path = write_fixture(&dir, "dupes.csv", &export_csv(&traces, &log));

    let data = CaryDataset::from_csv(&path).unwrap();
    assert_eq!(data.names().collect::<Vec<_>>(), vec!["Sample", "Sample.1"]);
    assert_eq!(data.intensities("Sample.1"), Some(&[3.0, 4.0][..]));

    let times = data.collection_times().unwrap();
    assert_eq!(times.keys().collect::<Vec<_>>(), vec!["Sample", "Sample.1"]);
    assert_eq!(data.collection_time("Sample"), Some(at(2023, 1, 5, 9, 0, 0)));
    assert_eq!(data.collection_time("Sample.1"), Some(at(2023, 1, 5, 9, 5, 0)));
}

#[test]
fn test_null_intensities_are_dropped() {
    let dir = tempdir().unwrap();
    let traces = vec![
        FixtureTrace {
            name: "A".to_string(),
            wavelengths: vec![300.0, 301.0, 302.0],
            intensities: vec![Some(1.0), None, Some(3.0)],
        },
        FixtureTrace::new("B", vec![300.0, 301.0, 302.0], vec![4.0, 5.0, 6.0]),
    ];
    let path = write_fixture(&dir, "nulls.csv", &export_csv(&traces, &[]));

    let data = CaryDataset::from_csv(&path).unwrap();
    assert!(!data.contains_log());
    let trace = data.trace("A").unwrap();
    assert_eq!(trace.wavelengths, vec![300.0, 302.0]);
    assert_eq!(trace.intensities, vec![1.0, 3.0]);
    assert!(!data.all_wavelengths_equal());
}

#[test]
fn test_row_blank_after_first_cell_starts_the_log() {
    let dir = tempdir().unwrap();
    let contents = "A,,\nWavelength (nm),Intensity (a.u.),\n300,1,\n301,,\n302,3,\n";
    let path = write_fixture(&dir, "single.csv", contents);

    let data = CaryDataset::from_csv(&path).unwrap();
    assert!(data.contains_log());
    assert_eq!(data.intensities("A"), Some(&[1.0][..]));
    assert!(data.collection_times().unwrap().is_empty());
}

#[test]
fn test_four_sample_scan_yields_four_matrices() {
    init_logging();
    let dir = tempdir().unwrap();
    let traces = multi_sample_scan(&["Sample1", "Sample2", "Sample3", "Sample4"]);
    let path = write_fixture(&dir, "multi_sample_matrix_4s.csv", &export_csv(&traces, &[]));

    let data = CaryDataset::from_csv_with(&path, &LoadOptions::new().skip_log(true)).unwrap();
    assert!(data.all_wavelengths_equal());

    let matrices = data.multi_sample_ex_em_matrices().unwrap();
    assert_eq!(matrices.len(), 4);
    assert!(matrices.values().all(|m| m.shape() == (226, 31)));
    assert_ne!(matrices["Sample1"], matrices["Sample2"]);
    assert_eq!(matrices["Sample3"].columns.first(), Some(&250.0));
    assert_eq!(matrices["Sample3"].columns.last(), Some(&400.0));
}

#[test]
fn test_skip_log_keeps_log_detection() {
    let dir = tempdir().unwrap();
    let traces = berio_scan();
    let names: Vec<&str> = traces.iter().map(|t| t.name.as_str()).collect();
    // Unparseable timestamps are never looked at when the log is skipped.
    let log = log_blocks(&names, &["not a time", "not a time", "not a time"]);
    let path = write_fixture(&dir, "skip.csv", &export_csv(&traces, &log));

    let data = CaryDataset::from_csv_with(&path, &LoadOptions::new().skip_log(true)).unwrap();
    assert!(data.contains_log());
    assert!(data.collection_times().is_none());
    assert_eq!(data.len(), 3);

    let err = CaryDataset::from_csv(&path).unwrap_err();
    assert!(matches!(err, CaryError::MalformedLog { .. }));
}

#[test]
fn test_crlf_export() {
    let dir = tempdir().unwrap();
    let traces = berio_scan();
    let names: Vec<&str> = traces.iter().map(|t| t.name.as_str()).collect();
    let log = log_blocks(
        &names,
        &[
            "12/31/2021 11:59:59 PM",
            "01/01/2022 12:00:01 AM",
            "01/01/2022 12:30:00 AM",
        ],
    );
    let contents = export_csv(&traces, &log).replace('\n', "\r\n");
    let path = write_fixture(&dir, "crlf.csv", &contents);

    let data = CaryDataset::from_csv(&path).unwrap();
    assert_eq!(
        data.collection_time("berio_EX_300.00"),
        Some(at(2021, 12, 31, 23, 59, 59))
    );
    assert_eq!(
        data.collection_time("berio_EX_310.00"),
        Some(at(2022, 1, 1, 0, 0, 1))
    );
    assert_eq!(data.collection_times().unwrap().len(), 3);
}

#[test]
fn test_non_numeric_data_is_rejected() {
    let dir = tempdir().unwrap();
    let contents = "A,,\nWavelength (nm),Intensity (a.u.),\n300.0,n/a,\n";
    let path = write_fixture(&dir, "bad.csv", contents);

    let err = CaryDataset::from_csv(&path).unwrap_err();
    assert!(matches!(err, CaryError::MalformedData(_)));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = CaryDataset::from_csv(dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, CaryError::Io { .. }));
}

#[test]
fn test_dataset_serializes_to_json() {
    let dir = tempdir().unwrap();
    let traces = vec![FixtureTrace::new("A", vec![300.0], vec![1.5])];
    let log = log_blocks(&["A"], &["03/14/2022 10:15:00 PM"]);
    let path = write_fixture(&dir, "json.csv", &export_csv(&traces, &log));

    let data = CaryDataset::from_csv(&path).unwrap();
    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["contains_log"], true);
    assert_eq!(json["traces"][0]["name"], "A");
    assert_eq!(json["traces"][0]["intensities"][0], 1.5);
    assert_eq!(json["collection_times"]["A"], "2022-03-14T22:15:00");
}
