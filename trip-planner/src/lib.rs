// Singapore Trip Planner
// Main library entry point

pub mod catalog;
pub mod config;
pub mod models;
pub mod planner;
pub mod session;
pub mod tui;
pub mod utils;
pub mod wizard;

use anyhow::Context;
use catalog::Catalog;
use config::Settings;
use log::{error, info};
use std::path::PathBuf;

/// Initialize logging system with dual format (JSON + human-readable)
fn init_logging(settings: &Settings, with_stdout: bool) -> anyhow::Result<PathBuf> {
    let log_dir = utils::path_resolver::resolve_log_folder(settings)?;
    let level = settings.log_level_filter()?;

    let timestamp = chrono::Utc::now().format("%Y-%m-%d-%H%M%S");

    // JSON log file for structured parsing
    let json_log_file = log_dir.join(format!("trip-planner-{}.log", timestamp));

    // Human-readable log file (.txt)
    let txt_log_file = log_dir.join(format!("trip-planner-{}.txt", timestamp));

    // - JSON format to .log file
    // - Human-readable format to .txt file
    // - Optional: human-readable to stdout (disabled for TUI to avoid corrupting the terminal UI)
    let mut dispatch = fern::Dispatch::new().level(level);

    if with_stdout {
        dispatch = dispatch.chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!("{}", human_line(&message.to_string(), record)));
                })
                .chain(std::io::stdout()),
        );
    }

    dispatch = dispatch
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    let timestamp_utc = chrono::Utc::now().to_rfc3339();
                    let message_str = format!("{}", message);
                    let (phase, step, cleaned_message) =
                        utils::logging::parse_log_metadata(&message_str);
                    let json_line = utils::logging::format_json_log(
                        &timestamp_utc,
                        record.level(),
                        record.target(),
                        &cleaned_message,
                        phase.as_deref(),
                        step.as_deref(),
                    );
                    out.finish(format_args!("{}\n", json_line));
                })
                .chain(fern::log_file(json_log_file)?),
        )
        .chain(
            fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!(
                        "{}\n",
                        human_line(&message.to_string(), record)
                    ));
                })
                .chain(fern::log_file(txt_log_file)?),
        );

    dispatch.apply()?;

    info!(
        "[PHASE: initialization] Logging initialized, log directory: {:?}",
        log_dir
    );
    Ok(log_dir)
}

fn human_line(message: &str, record: &log::Record) -> String {
    let timestamp_local = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
    let (phase, step, cleaned_message) = utils::logging::parse_log_metadata(message);
    utils::logging::format_human_readable_log(
        &timestamp_local.to_string(),
        record.level(),
        record.target(),
        &cleaned_message,
        phase.as_deref(),
        step.as_deref(),
    )
}

/// Settings + logging + catalog, shared by every run mode.
/// Exits the process with status 1 if settings or catalog fail.
fn bootstrap(mode: &str, interactive: bool) -> (Settings, Catalog) {
    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Trip planner configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Logging failures are reported but not fatal.
    let with_stdout = settings.log_stdout && !interactive;
    if let Err(e) = init_logging(&settings, with_stdout) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    info!(
        "[PHASE: initialization] Trip planner {} starting at {}",
        mode,
        chrono::Utc::now()
    );

    let catalog = match Catalog::load(&settings.catalog) {
        Ok(c) => c,
        Err(e) => {
            error!("[PHASE: catalog] [STEP: load] Catalog failed to load: {}", e);
            eprintln!("Trip planner error: {}", e);
            std::process::exit(1);
        }
    };

    (settings, catalog)
}

/// Interactive terminal planner.
pub fn run_tui() {
    // No stdout logging: the TUI owns the terminal
    let (_, catalog) = bootstrap("tui", true);

    if let Err(e) = tui::run(catalog) {
        error!("[PHASE: tui] [STEP: fatal] TUI exited with error: {:?}", e);
        eprintln!("Trip planner error: {}", e);
        std::process::exit(1);
    }
}

/// Render one screen into an in-memory terminal and exit 0/1.
pub fn run_tui_smoke(target: Option<String>) {
    let (_, catalog) = bootstrap("tui smoke", false);

    let target = target.as_deref().unwrap_or("welcome");
    if let Err(e) = tui::smoke(catalog, target) {
        error!(
            "[PHASE: tui] [STEP: smoke] TUI smoke exited with error: {:?}",
            e
        );
        eprintln!("Trip planner error: {}", e);
        std::process::exit(1);
    }
}

/// Scripted, non-interactive planning run.
/// Prints the transcript and writes `plan_smoke_transcript.log` under the log folder; exits 0/1.
pub fn run_plan_smoke() {
    let (settings, catalog) = bootstrap("plan smoke", false);

    let result = session::plan_smoke(catalog).and_then(|lines| {
        let log_dir = utils::path_resolver::resolve_log_folder(&settings)?;
        let transcript_path = log_dir.join("plan_smoke_transcript.log");
        let mut transcript = String::new();
        for line in &lines {
            info!("[PHASE: plan_smoke] {}", line);
            println!("{}", line);
            transcript.push_str(line);
            transcript.push('\n');
        }
        std::fs::write(&transcript_path, transcript)
            .with_context(|| format!("Failed to write transcript {:?}", transcript_path))?;
        Ok(())
    });

    if let Err(e) = result {
        error!(
            "[PHASE: plan_smoke] [STEP: fatal] Plan smoke exited with error: {:?}",
            e
        );
        eprintln!("Trip planner error: {}", e);
        std::process::exit(1);
    }
}
