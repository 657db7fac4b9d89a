//! desk-runner: headless complaint desk.
//!
//! Usage:
//!   desk-runner --classify "my card was charged twice"
//!   desk-runner --db desk.db --seed 42 < commands.jsonl
//!   desk-runner --config runner.json

use anyhow::Result;
use complaint_desk_core::analyze;
use desk_runner::{
    commands::{DeskRunner, Reply},
    config::RunnerConfig,
    store::SqliteComplaintStore,
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if let Some(text) = string_arg(&args, "--classify") {
        println!("{}", serde_json::to_string_pretty(&analyze(&text))?);
        return Ok(());
    }

    let mut config = match string_arg(&args, "--config") {
        Some(path) => RunnerConfig::load(&path)?,
        None => RunnerConfig::default(),
    };
    if let Some(db) = string_arg(&args, "--db") {
        config.db_path = Some(db);
    }
    if let Some(seed) = parse_arg::<u64>(&args, "--seed") {
        config.seed = Some(seed);
    }

    let store = match &config.db_path {
        Some(path) => {
            let store = SqliteComplaintStore::open(path)?;
            store.migrate()?;
            Some(store)
        }
        None => None,
    };

    log::info!(
        "desk-runner starting (db={}, seed={:?})",
        config.db_path.as_deref().unwrap_or(":memory:"),
        config.seed,
    );
    let mut runner = DeskRunner::new(config, store)?;
    run_command_loop(&mut runner)
}

fn run_command_loop(runner: &mut DeskRunner) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        match runner.handle_line(&buffer) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Json(value)) => writeln!(stdout, "{value}")?,
            Err(e) => {
                log::warn!("command failed: {e}");
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{err_json}")?;
            }
        }
        stdout.flush()?;
    }
    log::info!("desk-runner exiting with {} complaints", runner.desk().len());
    Ok(())
}

fn string_arg(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
}
