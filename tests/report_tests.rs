//! Report aggregation command tests

mod common;

use common::{read_workbook, record_batch, sheet_rows, spc_in, write_project_config};
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Workbook Creation
// ============================================================================

#[test]
fn test_report_creates_workbook() {
    let tmp = TempDir::new().unwrap();

    spc_in(&tmp)
        .args([
            "report", "--samples", "5,15,25,19,1", "--usl", "20", "--lsl", "0", "--ucl", "18",
            "--lcl", "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to SPC_Report.json"));

    let workbook = read_workbook(&tmp, "SPC_Report.json");
    let names: Vec<&str> = workbook["sheets"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Weekly", "Monthly", "Yearly"]);

    let weekly = sheet_rows(&workbook, "Weekly");
    assert_eq!(weekly.len(), 1);
    let row = &weekly[0];
    assert_eq!(row["chartType"], "X-R");
    assert_eq!(row["totalSamples"], 5);
    assert_eq!(row["highViolations"], 1);
    assert_eq!(row["mediumViolations"], 2);
    assert_eq!(row["average"], 13.0);
    assert_eq!(row["stdDev"], 8.85);
    assert!(row["week"].as_str().unwrap().starts_with('W'));

    // Only the yearly sheet carries the stats footer
    assert_eq!(sheet_rows(&workbook, "Monthly").len(), 1);
    let yearly = sheet_rows(&workbook, "Yearly");
    assert_eq!(yearly.len(), 4);
    assert_eq!(yearly[1], serde_json::json!({}));
    assert_eq!(yearly[2]["Metric"], "Average");
    assert_eq!(yearly[3]["Metric"], "Std Dev");
    assert_eq!(yearly[3]["Value"], 8.85);
}

#[test]
fn test_report_appends_to_existing_workbook() {
    let tmp = TempDir::new().unwrap();
    record_batch(&tmp, "10,12,14");
    record_batch(&tmp, "11,11");

    let workbook = read_workbook(&tmp, "SPC_Report.json");
    let weekly = sheet_rows(&workbook, "Weekly");
    assert_eq!(weekly.len(), 2);
    assert_eq!(weekly[0]["totalSamples"], 3);
    assert_eq!(weekly[1]["totalSamples"], 2);

    // Footer rows accumulate with every batch
    assert_eq!(sheet_rows(&workbook, "Yearly").len(), 8);
}

#[test]
fn test_report_fresh_discards_history() {
    let tmp = TempDir::new().unwrap();
    record_batch(&tmp, "10,12,14");

    spc_in(&tmp)
        .args(["report", "--samples", "7", "--fresh"])
        .assert()
        .success();

    let workbook = read_workbook(&tmp, "SPC_Report.json");
    let weekly = sheet_rows(&workbook, "Weekly");
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly[0]["totalSamples"], 1);
}

#[test]
fn test_report_no_save_leaves_disk_untouched() {
    let tmp = TempDir::new().unwrap();

    spc_in(&tmp)
        .args(["report", "--samples", "1,2,3", "--no-save"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Report not saved"));

    assert!(!tmp.path().join("SPC_Report.json").exists());
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_report_chart_type_and_workbook_flag() {
    let tmp = TempDir::new().unwrap();

    spc_in(&tmp)
        .args([
            "report",
            "--samples",
            "0.1,0.2",
            "--chart-type",
            "P",
            "--workbook",
            "reports/line3.json",
        ])
        .assert()
        .success();

    let workbook = read_workbook(&tmp, "reports/line3.json");
    assert_eq!(sheet_rows(&workbook, "Weekly")[0]["chartType"], "P");
    assert_eq!(sheet_rows(&workbook, "Weekly")[0]["average"], 0.15);
}

#[test]
fn test_report_workbook_from_env() {
    let tmp = TempDir::new().unwrap();

    spc_in(&tmp)
        .env("SPC_WORKBOOK", "env_report.json")
        .args(["report", "--samples", "4"])
        .assert()
        .success();

    assert!(tmp.path().join("env_report.json").exists());
}

#[test]
fn test_report_defaults_from_config() {
    let tmp = TempDir::new().unwrap();
    write_project_config(
        &tmp,
        "limits:\n  usl: 20\nchart_type: P\nreport_file: from_config.json\n",
    );

    spc_in(&tmp)
        .args(["report", "--samples", "25,5"])
        .assert()
        .success();

    let workbook = read_workbook(&tmp, "from_config.json");
    let row = &sheet_rows(&workbook, "Weekly")[0];
    assert_eq!(row["chartType"], "P");
    assert_eq!(row["highViolations"], 1);
}

#[test]
fn test_report_json_output_is_summary_row() {
    let tmp = TempDir::new().unwrap();

    let output = spc_in(&tmp)
        .args(["report", "--samples", "2,4", "--no-save", "-f", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    // Columns come out in report order, not alphabetically
    let stdout = String::from_utf8(output.stdout).unwrap();
    let columns = [
        "date",
        "time",
        "week",
        "month",
        "year",
        "chartType",
        "totalSamples",
        "highViolations",
        "mediumViolations",
        "average",
        "stdDev",
    ];
    let positions: Vec<usize> = columns
        .iter()
        .map(|c| stdout.find(&format!("\"{}\"", c)).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    let row: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(row["average"], 3.0);
    assert_eq!(row["stdDev"], 1.0);
}

#[test]
fn test_report_rejects_corrupt_workbook() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("SPC_Report.json"), "{ not json").unwrap();

    spc_in(&tmp)
        .args(["report", "--samples", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid workbook"));
}
