use attendance_core::{
    ActivityLog, ActivityLogError, AttendanceService, AttendanceStatus,
    InMemoryAttendanceRepository, Intern,
};
use chrono::NaiveDate;
use regex::Regex;

fn line_re() -> Regex {
    Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z - ").expect("valid line regex")
}

fn read_lines(log: &ActivityLog) -> Vec<String> {
    std::fs::read_to_string(log.path())
        .expect("activity log should exist")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn write_appends_timestamped_lines() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = ActivityLog::open(dir.path().join("activity.log")).expect("open activity log");

    log.write("server started");
    log.write("GET /api/interns");
    log.flush();

    let lines = read_lines(&log);
    assert_eq!(lines.len(), 2);
    assert!(line_re().is_match(&lines[0]), "unexpected line: {}", lines[0]);
    assert!(lines[0].ends_with(" - server started"));
    assert!(lines[1].ends_with(" - GET /api/interns"));
}

#[test]
fn reopen_keeps_existing_content() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("logs").join("activity.log");

    {
        let log = ActivityLog::open(&path).expect("first open");
        log.write("first");
    }
    let log = ActivityLog::open(&path).expect("second open");
    log.write("second");
    log.flush();

    let lines = read_lines(&log);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with(" - first"));
    assert!(lines[1].ends_with(" - second"));
}

#[test]
fn multiline_message_stays_on_one_line() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = ActivityLog::open(dir.path().join("activity.log")).expect("open activity log");

    log.write("error: boom\n    at handler");
    log.flush();

    let lines = read_lines(&log);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(" - error: boom     at handler"));
}

#[test]
fn open_accepts_working_directory_relative_paths() {
    let dir = tempfile::tempdir_in(".").expect("temp dir under working directory");
    assert!(dir.path().is_relative());

    let log = ActivityLog::open(dir.path().join("activity.log")).expect("relative path opens");
    log.write("relative");
    log.flush();

    let lines = read_lines(&log);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(" - relative"));
}

#[test]
fn open_rejects_directory_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = ActivityLog::open(dir.path()).err().expect("directory is not a log file");
    assert!(matches!(err, ActivityLogError::InvalidPath(_)));
}

#[test]
fn service_records_successful_marks_only() {
    let dir = tempfile::tempdir().expect("temp dir");
    let log = ActivityLog::open(dir.path().join("activity.log")).expect("open activity log");
    let interns = vec![Intern::new(1, "TR-1", "Ann")];
    let repo = InMemoryAttendanceRepository::with_roster(&interns);
    let service = AttendanceService::with_activity_log(&repo, &log);
    let date = NaiveDate::from_ymd_opt(2024, 5, 6).expect("valid date");

    let report = service
        .mark_batch(&[1, 2], AttendanceStatus::Present, date)
        .expect("batch should run");
    assert_eq!(report.marked_count, 1);
    log.flush();

    let lines = read_lines(&log);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].ends_with(" - attendance marked intern_id=1 status=Present date=2024-05-06"));
}
