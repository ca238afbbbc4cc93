use serde_json::Value;
use slowline_cli::config::Config;
use slowline_cli::run;
use std::fs;
use std::path::Path;

fn log_line(path: &str, time: &str) -> String {
    format!(
        "1.196.116.32 -  - [30/Jun/2017:03:50:22 +0300] \"GET {path} HTTP/1.1\" \
         200 927 \"-\" \"Lynx/2.8.8dev.9\" \"-\" \"1498697422-2190034393-4708-9752759\" \
         \"dc7161be3\" {time}"
    )
}

/// Write a log dir and a report dir with a template, returning the config
/// pointing at them.
fn setup(root: &Path, log_lines: &[String]) -> Config {
    let log_dir = root.join("logs");
    let report_dir = root.join("reports");
    fs::create_dir_all(&log_dir).unwrap();
    fs::create_dir_all(&report_dir).unwrap();

    fs::write(
        log_dir.join("nginx-access-ui.log-20170630"),
        log_lines.join("\n"),
    )
    .unwrap();
    fs::write(
        report_dir.join("report.html"),
        "<html>var table = $table_json;</html>",
    )
    .unwrap();

    Config {
        report_dir,
        log_dir,
        errors_limit: None,
        ..Config::default()
    }
}

/// Pull the substituted table back out of a rendered report.
fn report_table(report: &Path) -> Vec<Value> {
    let html = fs::read_to_string(report).unwrap();
    let json = html
        .strip_prefix("<html>var table = ")
        .and_then(|rest| rest.strip_suffix(";</html>"))
        .expect("report should embed the table");
    serde_json::from_str(json).unwrap()
}

/// Test the documented three-line run: two endpoints, ranked by total time
#[test]
fn test_run_writes_ranked_report() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let config = setup(
        dir.path(),
        &[
            log_line("/a", "0.1"),
            log_line("/b", "0.2"),
            log_line("/a", "0.3"),
        ],
    );

    // Act
    run::execute(&config).unwrap();

    // Assert
    let report = config.report_dir.join("report-2017.06.30.html");
    let table = report_table(&report);
    assert_eq!(table.len(), 2);

    assert_eq!(table[0]["url"], "/a");
    assert_eq!(table[0]["count"], 2);
    assert_eq!(table[0]["count_perc"], 66.667);
    assert_eq!(table[0]["time_sum"], 0.4);
    assert_eq!(table[0]["time_avg"], 0.2);
    assert_eq!(table[0]["time_max"], 0.3);
    assert_eq!(table[0]["time_med"], 0.2);

    assert_eq!(table[1]["url"], "/b");
    assert_eq!(table[1]["count"], 1);
    assert_eq!(table[1]["count_perc"], 33.333);
    assert_eq!(table[1]["time_sum"], 0.2);
}

/// Test that a gzip-compressed log is selected and read transparently
#[test]
fn test_run_reads_gzip_log() {
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;

    // Arrange - a plain older log and a newer compressed one
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), &[log_line("/old", "9.9")]);

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(log_line("/compressed", "0.5").as_bytes())
        .unwrap();
    fs::write(
        config.log_dir.join("nginx-access-ui.log-20170701.gz"),
        encoder.finish().unwrap(),
    )
    .unwrap();

    // Act
    run::execute(&config).unwrap();

    // Assert - the report carries the newer log's date and content
    let report = config.report_dir.join("report-2017.07.01.html");
    let table = report_table(&report);
    assert_eq!(table.len(), 1);
    assert_eq!(table[0]["url"], "/compressed");
}

/// Test that unparsable lines are tolerated when no errors limit is set
#[test]
fn test_run_skips_unparsable_lines_without_limit() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let config = setup(
        dir.path(),
        &[
            log_line("/a", "0.1"),
            "definitely not an access log line".to_string(),
        ],
    );

    // Act
    run::execute(&config).unwrap();

    // Assert - shares are computed over parsed lines only
    let table = report_table(&config.report_dir.join("report-2017.06.30.html"));
    assert_eq!(table.len(), 1);
    assert_eq!(table[0]["url"], "/a");
    assert_eq!(table[0]["count_perc"], 100.0);
}

/// Test that any unparsable line fails the run when a limit is configured
#[test]
fn test_run_fails_on_parse_errors_with_limit() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let mut config = setup(
        dir.path(),
        &[
            log_line("/a", "0.1"),
            log_line("/a", "0.2"),
            "definitely not an access log line".to_string(),
        ],
    );
    config.errors_limit = Some(0.64);

    // Act
    let result = run::execute(&config);

    // Assert - the run fails and no report is written
    assert!(result.is_err());
    assert!(!config.report_dir.join("report-2017.06.30.html").exists());
}

/// Test that an existing report for the log's date is left untouched
#[test]
fn test_run_is_a_noop_when_report_exists() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), &[log_line("/a", "0.1")]);
    let report = config.report_dir.join("report-2017.06.30.html");
    fs::write(&report, "already rendered").unwrap();

    // Act
    run::execute(&config).unwrap();

    // Assert
    assert_eq!(fs::read_to_string(&report).unwrap(), "already rendered");
}

/// Test that a missing template ends the run early without failing
#[test]
fn test_run_without_template_exits_cleanly() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let config = setup(dir.path(), &[log_line("/a", "0.1")]);
    fs::remove_file(config.report_dir.join("report.html")).unwrap();

    // Act
    run::execute(&config).unwrap();

    // Assert
    assert!(!config.report_dir.join("report-2017.06.30.html").exists());
}

/// Test that a missing log directory is a normal empty outcome
#[test]
fn test_run_without_log_dir_exits_cleanly() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        log_dir: dir.path().join("no-such-dir"),
        report_dir: dir.path().join("reports"),
        errors_limit: None,
        ..Config::default()
    };

    // Act + Assert
    run::execute(&config).unwrap();
}
