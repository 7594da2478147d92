use anyhow::Result;
use clap::{Parser, Subcommand};
use std::cell::RefCell;
use std::rc::Rc;

use mcreplay::minecraft::{Connection, Minecraft, DEFAULT_PORT};
use mcreplay::record::{record, TranscriptWriter};
use mcreplay::replay::{ensure_match, ReplayConnection, TranscriptReader};
use mcreplay::scripts;
use mcreplay::transcript::{LogEntry, Transcript};

#[derive(Parser)]
#[command(name = "mcreplay")]
#[command(about = "Record and replay harness for Minecraft Pi protocol clients")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record the built-in script against a live server
    Record {
        #[arg(short, long)]
        output: String,
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Replay a recorded transcript without a server and verify it
    Replay {
        #[arg(short, long)]
        input: String,
    },
    /// Record live, then replay in-process and assert both transcripts match
    Roundtrip {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Exercise a live server without proxying
    Smoke {
        #[arg(long)]
        host: Option<String>,
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
}

fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Record { output, host, port } => run_record(&output, &resolve_host(host), port),
        Commands::Replay { input } => run_replay(&input),
        Commands::Roundtrip { host, port, output } => {
            run_roundtrip(&resolve_host(host), port, output.as_deref())
        }
        Commands::Smoke { host, port } => run_smoke(&resolve_host(host), port),
    };
    if let Err(e) = outcome {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// --host beats the RASPI environment variable beats localhost.
fn resolve_host(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("RASPI").ok())
        .unwrap_or_else(|| "localhost".to_string())
}

fn record_live(host: &str, port: u16) -> Result<Transcript> {
    let conn = Connection::connect(host, port)?;
    let log = Transcript::new();
    record(&log, scripts::chat_and_camera, Rc::new(RefCell::new(conn)))?;
    Ok(log)
}

fn replay_recorded(recorded: Vec<LogEntry>) -> Result<Transcript> {
    let conn = ReplayConnection::new(recorded);
    let live = Transcript::new();
    record(&live, scripts::chat_and_camera, Rc::new(RefCell::new(conn)))?;
    Ok(live)
}

fn print_transcript(log: &Transcript) {
    for entry in log.snapshot() {
        println!("{}", entry);
    }
    println!();
}

fn save(log: &Transcript, path: &str) -> Result<()> {
    let mut writer = TranscriptWriter::new(path)?;
    for entry in log.snapshot() {
        writer.write_entry(&entry)?;
    }
    writer.finish()?;
    Ok(())
}

fn run_record(output: &str, host: &str, port: u16) -> Result<()> {
    tracing::info!("recording from {}:{} to {}", host, port, output);
    let log = record_live(host, port)?;
    print_transcript(&log);
    save(&log, output)?;
    tracing::info!("recorded {} entries to {}", log.len(), output);
    Ok(())
}

fn run_replay(input: &str) -> Result<()> {
    let reader = TranscriptReader::new(input)?;
    tracing::info!(
        "transcript loaded: {} entries, {} calls",
        reader.metadata().total_entries,
        reader.metadata().call_count
    );
    let recorded = reader.into_entries();

    let live = replay_recorded(recorded.clone())?;
    print_transcript(&live);

    ensure_match(&recorded, &live.snapshot())?;
    println!("replay matches recording");
    Ok(())
}

fn run_roundtrip(host: &str, port: u16, output: Option<&str>) -> Result<()> {
    let log = record_live(host, port)?;
    print_transcript(&log);
    if let Some(path) = output {
        save(&log, path)?;
        tracing::info!("recorded {} entries to {}", log.len(), path);
    }

    let live = replay_recorded(log.snapshot())?;
    print_transcript(&live);

    ensure_match(&log.snapshot(), &live.snapshot())?;
    println!("replay matches recording");
    Ok(())
}

fn run_smoke(host: &str, port: u16) -> Result<()> {
    let conn = Connection::connect(host, port)?;
    let mut world = Minecraft::new(Box::new(conn));
    scripts::smoke(&mut world)?;
    println!("OK");
    Ok(())
}
