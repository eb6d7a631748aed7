mod common;

use samppick::reports::{
    tables, write_donors, write_frequencies, write_history, FixedColumn, FrequencyTable,
    ReportWriter, CHART_THRESHOLD,
};
use samppick::scorer::{
    profile, Cohort, FrequencyDistribution, Individual, Pool, TargetDistribution,
};
use std::fs;

fn small_pool() -> Pool {
    Pool::from_individuals(vec![
        Individual::new("d1", "B", "A"),
        Individual::new("d2", "C", "C"),
        Individual::new("d3", "A", "Q"),
    ])
}

fn small_target() -> TargetDistribution {
    TargetDistribution::from_pairs(vec![("C", 0.5), ("A", 0.3), ("B", 0.195), ("R", 0.005)])
}

#[test]
fn test_donors_csv_format() {
    let pool = small_pool();
    let cohort = Cohort::from_positions(vec![2, 0]);
    let mut buf = Vec::new();
    write_donors(&mut buf, &cohort, &pool).unwrap();

    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text, "Donor,Allele_1,Allele_2\nd3,A,Q\nd1,B,A\n");
}

#[test]
fn test_frequency_csv_follows_target_order() {
    let pool = small_pool();
    let target = small_target();
    let dist = profile::compute(&Cohort::from_positions(vec![0, 1]), &pool, target.domain());

    let mut table = FrequencyTable::new(&target);
    table.push_column("Optimized Sample", &dist);

    let mut buf = Vec::new();
    write_frequencies(&mut buf, &table).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], ",Background Distribution,Optimized Sample");
    assert_eq!(lines[1], "C,0.5,0.5");
    assert_eq!(lines[2], "A,0.3,0.25");
    assert_eq!(lines[3], "B,0.195,0.25");
    assert_eq!(lines[4], "R,0.005,0");
    assert_eq!(lines.len(), 5);
}

#[test]
fn test_reference_column_comes_last() {
    let target = small_target();
    let mut table = FrequencyTable::new(&target);
    table.push_column("Mine", &FrequencyDistribution::new());
    table.push_column(FixedColumn::Reference.to_string(), &FrequencyDistribution::new());

    let labels: Vec<&str> = table.columns().iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Background Distribution", "Mine", "Reference"]);
}

#[test]
fn test_chart_rows_filter_and_sort() {
    let target = small_target();
    let mut table = FrequencyTable::new(&target);
    let mut sample = FrequencyDistribution::new();
    sample.insert("R", 0.004);
    table.push_column("Mine", &sample);

    let rows = table.chart_rows(CHART_THRESHOLD);
    let alleles: Vec<&str> = rows.iter().map(|(a, _)| *a).collect();
    // R sums to 0.009 and is left out.
    assert_eq!(alleles, vec!["A", "B", "C"]);
    assert_eq!(rows[0].1, vec![0.3, 0.0]);
}

#[test]
fn test_history_csv() {
    let mut buf = Vec::new();
    write_history(&mut buf, &[0.5, 0.25]).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "Iteration,Score\n0,0.5\n1,0.25\n");
}

#[test]
fn test_terminal_table_lists_chart_rows() {
    let target = small_target();
    let table = FrequencyTable::new(&target);
    let rendered = tables::build_frequency_table(&table).to_string();
    assert!(rendered.contains("Background Distribution"));
    assert!(rendered.contains("0.5000"));
    assert!(!rendered.contains("| R"));
}

#[test]
fn test_report_writer_writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("Run");
    let base = base.to_str().unwrap();

    let pool = common::synthetic_pool(30, 4);
    let target = common::synthetic_target();
    let cohort = Cohort::from_positions((0..10).collect());
    let mut table = FrequencyTable::new(&target);
    table.push_column("Optimized Sample", &profile::compute(&cohort, &pool, target.domain()));

    let writer = ReportWriter::new(base);
    writer
        .write_selection(&cohort, &pool, &table, Some(&[0.3, 0.2][..]))
        .unwrap();

    let paths = writer.paths();
    assert!(paths.donors.exists());
    assert!(paths.frequencies.exists());
    assert!(paths.chart.exists());
    assert!(paths.history.exists());

    let donors = fs::read_to_string(&paths.donors).unwrap();
    assert_eq!(donors.lines().count(), 11);

    let leftovers: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains(".partial"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn test_basic_writer_skips_donors() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("Basic");
    let writer = ReportWriter::new(base.to_str().unwrap());

    let target = common::synthetic_target();
    let table = FrequencyTable::new(&target);
    writer.write_basic(&table).unwrap();

    assert!(writer.paths().frequencies.exists());
    assert!(writer.paths().chart.exists());
    assert!(!writer.paths().donors.exists());
}

#[test]
fn test_failed_commit_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("Run");
    let writer = ReportWriter::new(base.to_str().unwrap());

    // A non-empty directory where the chart should land makes its rename fail
    // after the CSV files have already been moved into place.
    fs::create_dir(&writer.paths().chart).unwrap();
    fs::write(writer.paths().chart.join("keep"), b"x").unwrap();

    let pool = common::synthetic_pool(30, 4);
    let target = common::synthetic_target();
    let cohort = Cohort::from_positions((0..10).collect());
    let mut table = FrequencyTable::new(&target);
    table.push_column("Optimized Sample", &profile::compute(&cohort, &pool, target.domain()));

    assert!(writer
        .write_selection(&cohort, &pool, &table, Some(&[0.3, 0.2][..]))
        .is_err());

    let mut names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Run.png".to_string()]);
    assert!(writer.paths().chart.is_dir());
}
