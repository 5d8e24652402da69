//! CLI smoke probe for `classroom_core`.
//!
//! # Responsibility
//! - Open the configured SQLite storage and print a dashboard summary.
//! - Keep output line-oriented and deterministic for quick checks.
//!
//! Usage: `classroom_cli [DB_PATH]` (falls back to `CLASSROOM_DB_PATH`).

use classroom_core::{
    core_version, init_logging, Classroom, Clock, CoreConfig, SqliteStorage, SystemClock,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

fn main() -> ExitCode {
    let mut config = CoreConfig::from_env();
    if let Some(path) = std::env::args().nth(1) {
        config.db_path = PathBuf::from(path);
    }

    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, &log_dir.to_string_lossy()) {
            eprintln!("classroom_cli logging disabled: {err}");
        }
    }

    let storage = match SqliteStorage::open(&config.db_path) {
        Ok(storage) => storage,
        Err(err) => {
            eprintln!(
                "classroom_cli failed to open `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let clock: Rc<dyn Clock> = Rc::new(SystemClock);
    let classroom = Classroom::open(storage, clock);
    let summary = classroom.dashboard();

    println!("classroom_core version={}", core_version());
    println!("storage path={}", config.db_path.display());
    println!("classes count={}", classroom.classes().len());
    println!(
        "tasks total={} pending={} completed={} overdue={} due_soon={}",
        summary.total, summary.pending, summary.completed, summary.overdue, summary.due_soon
    );
    match summary.next_due {
        Some(task) => println!(
            "next_due id={} due={} class={} title={}",
            task.id,
            task.due_date,
            classroom.class_label(task.class_id),
            task.title
        ),
        None => println!("next_due none"),
    }
    log::info!("event=cli_probe module=cli status=ok");
    ExitCode::SUCCESS
}
