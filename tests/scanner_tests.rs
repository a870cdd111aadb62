//! Fixture-backed tests for scanning socket tables

use portmax::{MalformedRows, PortTableScanner, Protocol, ScanConfig, ScanError};
use std::path::PathBuf;

fn fixture_root(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn scanner_for(name: &str) -> PortTableScanner {
    PortTableScanner::new(ScanConfig::new().with_root(fixture_root(name)))
}

/// Tables with only a header report zero and no failure
#[test]
fn test_idle_tables() {
    let scanner = scanner_for("idle");
    for scan in scanner.scan_all() {
        assert_eq!(scan.max_port, 0, "{} should be idle", scan.protocol);
        assert_eq!(scan.rows_scanned, 0);
        assert!(scan.is_complete());
        assert!(scan.diagnostic().is_none());
    }
}

/// The maximum is taken over every row, upper and lower case hex alike
#[test]
fn test_busy_tables() {
    let scanner = scanner_for("busy");

    let tcp = scanner.scan(Protocol::Tcp);
    assert_eq!(tcp.max_port, 8080);
    assert_eq!(tcp.rows_scanned, 4);
    assert!(tcp.is_complete());
    assert_eq!(tcp.summary(), "current maximum TCP port is: 8080");

    let udp = scanner.scan(Protocol::Udp);
    assert_eq!(udp.max_port, 59378);
    assert_eq!(udp.rows_scanned, 3);
    assert_eq!(udp.summary(), "current maximum UDP port is: 59378");
}

/// `scan_all` reports TCP first, then UDP
#[test]
fn test_scan_all_order() {
    let scans = scanner_for("busy").scan_all();
    let protocols: Vec<_> = scans.iter().map(|s| s.protocol).collect();
    assert_eq!(protocols, vec![Protocol::Tcp, Protocol::Udp]);
}

/// A bad row ends the scan with the maximum of the rows before it
#[test]
fn test_malformed_row_stops_scan() {
    let scanner = scanner_for("malformed");

    let tcp = scanner.scan(Protocol::Tcp);
    assert_eq!(tcp.max_port, 443);
    assert_eq!(tcp.rows_scanned, 2);
    assert!(matches!(
        tcp.failure,
        Some(ScanError::MalformedRow { line: 4, .. })
    ));
    let diagnostic = tcp.diagnostic().unwrap();
    assert!(diagnostic.starts_with("an error occurred while scanning TCP"));

    let udp = scanner.scan(Protocol::Udp);
    assert_eq!(udp.max_port, 53);
    assert!(matches!(
        udp.failure,
        Some(ScanError::InvalidPort { line: 3, .. })
    ));
}

/// With the skip policy every well-formed row counts
#[test]
fn test_malformed_rows_skipped() {
    let scanner = PortTableScanner::new(
        ScanConfig::new()
            .with_root(fixture_root("malformed"))
            .with_malformed_rows(MalformedRows::Skip),
    );

    let tcp = scanner.scan(Protocol::Tcp);
    assert_eq!(tcp.max_port, 9090);
    assert_eq!(tcp.rows_scanned, 3);
    assert!(!tcp.is_complete());

    let udp = scanner.scan(Protocol::Udp);
    assert_eq!(udp.max_port, 5000);
    assert_eq!(udp.rows_scanned, 2);
}

/// A missing table yields zero and a diagnostic naming the table
#[test]
fn test_missing_tables() {
    let scanner = scanner_for("does-not-exist");

    for scan in scanner.scan_all() {
        assert_eq!(scan.max_port, 0);
        assert!(matches!(
            scan.failure,
            Some(ScanError::TableUnavailable { .. })
        ));
        let diagnostic = scan.diagnostic().unwrap();
        assert!(diagnostic.starts_with("unable to open"));
        assert!(diagnostic.contains(scan.protocol.table_name()));
    }
}

/// One protocol's failure does not leak into the other's result
#[test]
fn test_protocols_are_independent() {
    let scanner = scanner_for("malformed");

    let udp_alone = scanner.scan(Protocol::Udp);
    let tcp = scanner.scan(Protocol::Tcp);
    let udp_after_tcp = scanner.scan(Protocol::Udp);

    assert_eq!(tcp.max_port, 443);
    assert_eq!(udp_alone.max_port, udp_after_tcp.max_port);
    assert_eq!(udp_alone.rows_scanned, udp_after_tcp.rows_scanned);
}
