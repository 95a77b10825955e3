use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::tempdir;

fn xlsx_bench(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_xlsx_bench"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("run xlsx_bench")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "exit status {:?}\nstderr:\n{}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[cfg(feature = "csv")]
#[test]
fn csv_filter_times_only_the_csv_routine() {
    let dir = tempdir().unwrap();
    let output = xlsx_bench(
        dir.path(),
        &["--filter", "csv", "--tests", "2", "--rows", "20", "--columns", "4"],
    );
    assert_success(&output);

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1, "{lines:?}");
    let fields: Vec<&str> = lines[0].split_whitespace().collect();
    assert_eq!(fields.len(), 2);
    assert_eq!(fields[0], "benchmark_csv");
    assert!(lines[0].starts_with(&format!("{:<30} ", "benchmark_csv")));

    let (_, decimals) = fields[1].split_once('.').unwrap();
    assert_eq!(decimals.len(), 6);
    assert!(fields[1].parse::<f64>().unwrap() >= 0.0);

    assert!(dir.path().join("benchmark_scv.csv").is_file());
}

#[cfg(all(
    feature = "csv",
    feature = "simple_excel",
    feature = "umya",
    feature = "xlsxwriter"
))]
#[test]
fn default_run_reports_every_routine_in_name_order() {
    let dir = tempdir().unwrap();
    let output = xlsx_bench(dir.path(), &["-t", "1", "-r", "5", "-c", "2"]);
    assert_success(&output);

    let lines = stdout_lines(&output);
    let names: Vec<&str> = lines
        .iter()
        .map(|line| {
            line.strip_prefix("# SKIP ")
                .unwrap_or(line)
                .split_whitespace()
                .next()
                .unwrap()
        })
        .collect();
    assert_eq!(
        names,
        [
            "benchmark_csv",
            "benchmark_rust_xlsxwriter",
            "benchmark_rust_xlsxwriter_autofit",
            "benchmark_rust_xlsxwriter_buffer",
            "benchmark_rust_xlsxwriter_rows",
            "benchmark_simple_excel_writer",
            "benchmark_umya_spreadsheet",
        ]
    );

    let skips: Vec<&String> = lines.iter().filter(|l| l.starts_with("# SKIP")).collect();
    assert_eq!(
        skips,
        [
            "# SKIP benchmark_rust_xlsxwriter_autofit \
             (autofit rescans every cell and swamps the write timing)"
        ]
    );

    for artifact in [
        "benchmark_scv.csv",
        "benchmark_rust_xlsxwriter.xlsx",
        "benchmark_rust_xlsxwriter_buffer.xlsx",
        "benchmark_rust_xlsxwriter_rows.xslx",
        "benchmark_simple_excel_writer.xlsx",
        "benchmark_umya_spreadsheet.xlsx",
    ] {
        assert!(dir.path().join(artifact).is_file(), "missing {artifact}");
    }
    assert!(!dir
        .path()
        .join("benchmark_rust_xlsxwriter_autofit.xlsx")
        .exists());
}

#[test]
fn empty_grid_runs_every_routine() {
    let dir = tempdir().unwrap();
    let output = xlsx_bench(dir.path(), &["-t", "1", "-r", "0", "-c", "0"]);
    assert_success(&output);

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 7, "{lines:?}");
}

#[test]
fn invalid_filter_fails_before_running_anything() {
    let dir = tempdir().unwrap();
    let output = xlsx_bench(dir.path(), &["--filter", "("]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--filter"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn zero_repeats_is_rejected() {
    let dir = tempdir().unwrap();
    let output = xlsx_bench(dir.path(), &["--tests", "0"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn grid_beyond_worksheet_limits_is_rejected_before_running() {
    let dir = tempdir().unwrap();

    for args in [["-c", "20000"], ["-r", "1048577"]] {
        let output = xlsx_bench(dir.path(), &args);
        assert_eq!(output.status.code(), Some(2), "{args:?}");
        assert!(output.stdout.is_empty());
    }
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[cfg(all(not(feature = "csv"), feature = "xlsxwriter"))]
#[test]
fn missing_library_is_skipped_and_the_rest_are_timed() {
    let dir = tempdir().unwrap();
    let output = xlsx_bench(dir.path(), &["-t", "1", "-r", "4", "-c", "2"]);
    assert_success(&output);

    let lines = stdout_lines(&output);
    let csv_lines: Vec<&String> = lines
        .iter()
        .filter(|line| line.contains("benchmark_csv"))
        .collect();
    assert_eq!(
        csv_lines,
        ["# SKIP benchmark_csv (built without the `csv` feature)"]
    );
    assert!(lines
        .iter()
        .any(|line| line.starts_with(&format!("{:<30} ", "benchmark_rust_xlsxwriter"))));
    assert!(!dir.path().join("benchmark_scv.csv").exists());
    assert!(dir.path().join("benchmark_rust_xlsxwriter.xlsx").is_file());
}

#[cfg(feature = "csv")]
#[test]
fn routine_failure_aborts_the_remaining_queue() {
    let dir = tempdir().unwrap();
    // A directory where the CSV artifact should go makes the CSV writer fail to open it.
    std::fs::create_dir(dir.path().join("benchmark_scv.csv")).unwrap();

    let output = xlsx_bench(
        dir.path(),
        &["-f", "csv|rust_xlsxwriter$", "-t", "1", "-r", "4", "-c", "2"],
    );

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("routine benchmark_csv failed"), "{stderr}");
    assert!(!dir.path().join("benchmark_rust_xlsxwriter.xlsx").exists());
}

#[cfg(feature = "csv")]
#[test]
fn json_format_emits_one_object_per_routine() {
    let dir = tempdir().unwrap();
    let output = xlsx_bench(
        dir.path(),
        &["--format", "json", "-f", "csv", "-t", "3", "-r", "3", "-c", "2"],
    );
    assert_success(&output);

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(value["status"], "ok");
    assert_eq!(value["name"], "benchmark_csv");
    assert_eq!(value["repeats"], 3);
    let total = value["total_secs"].as_f64().unwrap();
    let mean = value["mean_secs"].as_f64().unwrap();
    assert!((mean * 3.0 - total).abs() < 1e-9);
}

#[test]
fn list_prints_status_without_running() {
    let dir = tempdir().unwrap();
    let output = xlsx_bench(dir.path(), &["--list"]);
    assert_success(&output);

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 7, "{lines:?}");
    assert!(lines
        .iter()
        .any(|line| line.starts_with("benchmark_rust_xlsxwriter_autofit")
            && line.contains("skip: autofit")));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[cfg(feature = "csv")]
#[test]
fn output_dir_is_created() {
    let dir = tempdir().unwrap();
    let output = xlsx_bench(
        dir.path(),
        &["-f", "csv", "-t", "1", "-r", "2", "-c", "2", "--output-dir", "nested/out"],
    );
    assert_success(&output);

    assert!(dir.path().join("nested/out/benchmark_scv.csv").is_file());
    assert!(!dir.path().join("benchmark_scv.csv").exists());
}

#[test]
fn closed_stdout_is_not_an_error() {
    let dir = tempdir().unwrap();

    // Simulate a downstream consumer exiting early (e.g. `xlsx_bench | head`).
    let mut child = Command::new(env!("CARGO_BIN_EXE_xlsx_bench"))
        .current_dir(dir.path())
        .args(["-t", "1", "-r", "2", "-c", "2"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn xlsx_bench");

    drop(child.stdout.take());

    let output = child.wait_with_output().expect("wait for xlsx_bench");
    assert_success(&output);
}
