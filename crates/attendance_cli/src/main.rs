//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `attendance_core` linkage and wiring end to end.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `attendance_cli [config.json]`

use attendance_core::{
    init_logging, ActivityLog, AttendanceService, AttendanceStatus, CoreConfig,
    InMemoryAttendanceRepository, Intern, InternSelection,
};
use chrono::NaiveDate;
use log::error;
use std::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("attendance_core ping={}", attendance_core::ping());
    println!("attendance_core version={}", attendance_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => CoreConfig::from_path(path)?,
        None => CoreConfig::default(),
    };
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let activity_log = ActivityLog::open(&config.activity_log_path)?;
    let roster = vec![
        Intern::new(1, "TR-001", "Alice Mensah").with_specialization("Backend"),
        Intern::new(2, "TR-002", "Bob Okafor"),
        Intern::new(3, "TR-003", "Chidi Umeh").with_specialization("Data"),
    ];
    let repo = InMemoryAttendanceRepository::with_roster(&roster);
    let service = AttendanceService::with_activity_log(&repo, &activity_log);

    let mut selection = InternSelection::new(roster);
    selection.open(&[1, 3]);
    selection.set_search_term("bob");
    selection.toggle(2)?;

    let date = NaiveDate::from_ymd_opt(2024, 1, 15).ok_or("invalid sample date")?;
    let report = selection.mark_attendance_with_progress(
        &service,
        AttendanceStatus::Present,
        date,
        |progress| {
            println!(
                "progress marked={}/{} percent={}",
                progress.marked_count, progress.total_count, progress.percent_complete
            );
        },
    )?;
    activity_log.flush();

    println!(
        "batch_id={} marked={} total={} failed={} stored={}",
        report.batch_id,
        report.marked_count,
        report.total_count,
        report.failed_count(),
        repo.len()?
    );
    println!("activity_log={}", activity_log.path().display());
    Ok(())
}
