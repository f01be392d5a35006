//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `memokit_core` linkage with deterministic output.
//! - `demo` walks through an undo session and a cached catalog lookup.
//! - `--log-dir <abs path>` writes core log events to rolling files.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use memokit_core::db::open_db_in_memory;
use memokit_core::{
    default_log_level, init_logging, CachingVideoSource, LogConfig, SqliteVideoSource,
    UndoSession, Video, VideoId, VideoSource,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "memokit")]
#[command(version, about = "memokit smoke CLI")]
struct Cli {
    /// Absolute directory for rolling log files
    #[arg(long, value_parser = parse_log_dir)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Run the undo and cache walkthrough
    Demo,
}

fn parse_log_dir(raw: &str) -> Result<PathBuf, String> {
    LogConfig::parse(default_log_level(), raw)
        .map(|config| config.log_dir)
        .map_err(|err| err.to_string())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(dir) = &cli.log_dir {
        if let Err(err) = init_logging(default_log_level(), &dir.to_string_lossy()) {
            Cli::command()
                .error(ErrorKind::ValueValidation, format!("--log-dir: {err}"))
                .exit();
        }
    }

    println!("memokit_core ping={}", memokit_core::ping());
    println!("memokit_core version={}", memokit_core::core_version());

    match cli.command {
        Some(Command::Demo) => match run_demo() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("demo failed: {err}");
                ExitCode::FAILURE
            }
        },
        None => ExitCode::SUCCESS,
    }
}

fn run_demo() -> Result<(), Box<dyn Error>> {
    let mut session = UndoSession::<String>::default();
    session.capture("empty canvas");
    session.editor_mut().add_item("Circle".to_string());
    session.capture("circle");
    session.editor_mut().add_item("Rectangle".to_string());
    println!("undo items={:?}", session.editor().items());
    for meta in session.list_history() {
        println!("undo history label={} items={}", meta.label, meta.item_count);
    }
    while session.restore().is_some() {
        println!("undo restored items={:?}", session.editor().items());
    }

    let conn = open_db_in_memory()?;
    let catalog = SqliteVideoSource::new(&conn);
    let id = VideoId::parse("42")?;
    catalog.upsert_video(&Video {
        id: id.clone(),
        title: "Design patterns, explained".to_string(),
        channel: "memokit".to_string(),
        duration_secs: 600,
    })?;

    let cache = CachingVideoSource::new(&catalog);
    for _ in 0..2 {
        let title = cache
            .get_video_info(&id)?
            .map(|video| video.title)
            .unwrap_or_default();
        println!("cache lookup id={id} title={title}");
    }
    let stats = cache.stats();
    println!(
        "cache stats hits={} misses={} source_calls={}",
        stats.hits, stats.misses, stats.source_calls
    );
    Ok(())
}
