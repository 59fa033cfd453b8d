//! End-to-end: file on disk → normalized dataset → filtered view → charts.

use std::io::Write;

use wlan_insight::charts::{CdfMethod, ChartSet, Unavailable};
use wlan_insight::data::filter::{Choice, FilterOptions, FilterState, View};
use wlan_insight::data::loader::load_file;
use wlan_insight::data::model::{Cell, Column, SignalCategory};

const FULL_HEADER: &str = "Device , Traffic ,RSSI_avg(dBm),Jitter,Throughput(iperf),Retry_perc(iperf),TXOP_retry_rate,R0_Max_MCS,R1_Max_MCS,sgi,lgi,Most_MSDU_per_TXOP,Most_AMPDU_per_TXOP,Mgnt_overheads,Ctrl Overheads,data0,data1,Unrelated,Other_BSS,Idle";

const FULL_ROWS: &[&str] = &[
    "Laptop,udp,-48,5.2ms,90,1.0,2.0,8,7,10,0,2,32,5,5,40,20,5,5,20",
    "laptop,UDP,-60,3.1 ms,70,2.0,4.5,8,6,5,5,2,16,5,5,30,20,10,10,20",
    "PHONE,tcp,-70,bad,40,3.0,6.0,7,5,0,10,4,16,5,5,20,10,10,10,40",
    "phone,Tcp,-80,9ms,10,,12.0,1,1,0,10,4,8,10,10,10,10,20,20,20",
    "phone,udp,-50,1ms,85,0.5,1.0,1,1,8,2,2,32,5,5,45,25,5,5,10",
    "tablet,tcp,-75,4ms,35,4.0,7.5,1,0,2,8,1,8,5,5,20,20,10,20,20",
];

fn write_csv(header: &str, rows: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "{header}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file
}

#[test]
fn loads_and_normalizes() {
    let file = write_csv(FULL_HEADER, FULL_ROWS);
    let ds = load_file(file.path()).unwrap();

    assert_eq!(ds.len(), 6);
    assert!(ds.missing_columns().is_empty());

    let opts = FilterOptions::from_dataset(&ds);
    assert_eq!(opts.devices, vec!["laptop", "phone", "tablet"]);
    assert_eq!(opts.traffic, vec!["TCP", "UDP"]);
    assert_eq!(opts.categories, SignalCategory::ALL.to_vec());

    // -48 and the -50 boundary are both Excellent.
    assert_eq!(ds.records[0].category, Some(SignalCategory::Excellent));
    assert_eq!(ds.records[4].category, Some(SignalCategory::Excellent));
    assert_eq!(ds.records[5].category, Some(SignalCategory::Fair));

    assert_eq!(ds.records[0].jitter, Some(5.2));
    assert_eq!(ds.records[1].jitter, Some(3.1));
    assert_eq!(ds.records[2].jitter, None);
}

#[test]
fn full_chart_set_over_filtered_rows() {
    let file = write_csv(FULL_HEADER, FULL_ROWS);
    let ds = load_file(file.path()).unwrap();

    let filters = FilterState {
        device: Choice::Only("phone".into()),
        ..Default::default()
    };
    let view = View::filtered(&ds, &filters);
    assert_eq!(view.indices(), &[2, 3, 4]);

    let charts = ChartSet::compute(&view, CdfMethod::Empirical);
    assert_eq!(charts.rows, 3);

    // Retry: 3.0 and 0.5 (one null).
    assert_eq!(charts.mean_retry, Ok(1.75));

    // SGI 0+0+8 over LGI 10+10+2.
    assert_eq!(charts.sgi_share, Ok(26.67));

    let jitter = charts.jitter_cdf.as_ref().unwrap();
    assert_eq!(jitter.values, vec![1.0, 9.0]);
    assert_eq!(jitter.fractions, vec![0.0, 0.5]);

    let mcs = charts.mcs_initial.as_ref().unwrap();
    assert_eq!(mcs.total(), 3);
    assert_eq!(mcs.bin(1).unwrap().count, 2);
    assert_eq!(mcs.bin(7).unwrap().count, 1);

    assert_eq!(charts.most_msdu, Ok(Cell::Integer(4)));
    // 16, 8, 32 all once: smallest wins.
    assert_eq!(charts.most_ampdu, Ok(Cell::Integer(8)));

    let timing = charts.timing.as_ref().unwrap();
    assert!((timing.means[0] - 20.0 / 3.0).abs() < 1e-9);

    // Only rows with all five correlation fields: the "bad" jitter row and
    // the missing retry row drop out, leaving one.
    let corr = charts.correlation.as_ref().unwrap();
    assert_eq!(corr.samples, 1);
    assert_eq!(corr.get(Column::Rssi, Column::Rssi), Some(1.0));
}

#[test]
fn empty_selection_reports_no_data_everywhere() {
    let file = write_csv(FULL_HEADER, FULL_ROWS);
    let ds = load_file(file.path()).unwrap();

    let filters = FilterState {
        category: Choice::Only(SignalCategory::Poor),
        device: Choice::Only("laptop".into()),
        traffic: Choice::All,
    };
    let charts = ChartSet::compute(&View::filtered(&ds, &filters), CdfMethod::Linspace);

    assert_eq!(charts.rows, 0);
    assert_eq!(charts.timing, Err(Unavailable::NoData));
    assert_eq!(charts.throughput_cdf, Err(Unavailable::NoData));
    assert_eq!(charts.jitter_cdf, Err(Unavailable::NoData));
    assert_eq!(charts.mcs_retry, Err(Unavailable::NoData));
    assert_eq!(charts.sgi_share, Err(Unavailable::NoData));
    assert_eq!(charts.most_msdu, Err(Unavailable::NoData));
    assert_eq!(charts.correlation, Err(Unavailable::NoData));
}

#[test]
fn missing_columns_degrade_per_chart() {
    let file = write_csv(
        "Device,Traffic,RSSI_avg(dBm),Throughput(iperf),Retry_perc(iperf)",
        &["a,udp,-55,50,1.0", "b,tcp,-85,20,2.0", "a,tcp,-62,30,3.0"],
    );
    let ds = load_file(file.path()).unwrap();
    let charts = ChartSet::compute(&View::all(&ds), CdfMethod::Linspace);

    assert_eq!(charts.mean_retry, Ok(2.0));
    let tp = charts.throughput_cdf.as_ref().unwrap();
    assert_eq!(tp.values, vec![20.0, 30.0, 50.0]);
    assert_eq!(tp.fractions, vec![0.0, 0.5, 1.0]);

    assert_eq!(charts.jitter_cdf, Err(Unavailable::MissingColumn(Column::Jitter)));
    assert_eq!(charts.mcs_initial, Err(Unavailable::MissingColumn(Column::McsInitial)));
    assert_eq!(charts.sgi_share, Err(Unavailable::MissingColumn(Column::Sgi)));
    assert_eq!(charts.most_ampdu, Err(Unavailable::MissingColumn(Column::MostAmpdu)));
    assert_eq!(charts.timing, Err(Unavailable::MissingColumn(Column::MgmtOverhead)));
}

#[test]
fn tab_separated_input() {
    let mut file = tempfile::Builder::new().suffix(".tsv").tempfile().unwrap();
    writeln!(file, "Device\tTraffic\tRSSI_avg(dBm)").unwrap();
    writeln!(file, "Phone\tudp\t-66").unwrap();
    let ds = load_file(file.path()).unwrap();
    assert_eq!(ds.records[0].device.as_deref(), Some("phone"));
    assert_eq!(ds.records[0].category, Some(SignalCategory::Fair));
}

#[test]
fn unreadable_source_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_file(&dir.path().join("missing.csv")).is_err());
    assert!(load_file(&dir.path().join("data.xlsx")).is_err());
}
