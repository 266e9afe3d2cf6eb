use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use host::runner::{record_tape, run_events, soak, write_tape};
use host::util::{parse_seed, seed_range, seed_to_hex};
use host::{load_script, read_tape, HostConfig};
use snake_core::constants::{TAPE_FOOTER_SIZE, TAPE_HEADER_SIZE};
use snake_core::replay::replay_with_checkpoints;
use snake_core::tape::parse_tape;
use snake_core::verify_tape;

#[derive(Parser, Debug)]
#[command(name = "snake-host")]
#[command(about = "Drive, record, replay and verify deterministic snake sessions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a scripted session and print the final screen and state
    Run {
        #[arg(long, default_value = "0xDEADBEEF", value_parser = parse_seed)]
        seed: u32,
        /// Event script, or @file to read it from a file
        #[arg(long)]
        script: String,
        /// Print every frame as it finishes streaming
        #[arg(long, default_value_t = false)]
        show_frames: bool,
    },
    /// Run a scripted session and write it as a tape
    Record {
        #[arg(long, default_value = "0xDEADBEEF", value_parser = parse_seed)]
        seed: u32,
        #[arg(long)]
        script: String,
        #[arg(long)]
        output: PathBuf,
    },
    /// Verify a tape and print its journal
    Verify {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        max_events: Option<u32>,
        #[arg(long)]
        journal_out: Option<PathBuf>,
    },
    /// Print sampled state checkpoints of a tape
    Replay {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 100)]
        every: u32,
        #[arg(long)]
        max_events: Option<u32>,
    },
    /// Random sessions over many seeds, failing on any invariant violation
    Soak {
        #[arg(long, default_value_t = 64)]
        seeds: u32,
        #[arg(long, default_value = "1", value_parser = parse_seed)]
        seed_start: u32,
        #[arg(long)]
        events: Option<u32>,
        #[arg(long)]
        jobs: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let config = HostConfig::from_env();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            seed,
            script,
            show_frames,
        } => {
            let events = load_script(&script)?;
            let artifact = run_events(seed, &events, show_frames);
            println!("{}", artifact.screen);
            println!(
                "{}",
                serde_json::to_string_pretty(&artifact.summary)
                    .context("failed to serialize run summary")?
            );
        }
        Commands::Record {
            seed,
            script,
            output,
        } => {
            let events = load_script(&script)?;
            let tape = record_tape(seed, &events);
            write_tape(&output, &tape)?;
            println!("Tape written.");
            println!("  Seed:   {}", seed_to_hex(seed));
            println!(
                "  Events: {} of {}",
                tape.len() - TAPE_HEADER_SIZE - TAPE_FOOTER_SIZE,
                events.len()
            );
            println!("  Bytes:  {}", tape.len());
            println!("  Path:   {}", output.display());
        }
        Commands::Verify {
            input,
            max_events,
            journal_out,
        } => {
            let bytes = read_tape(&input)?;
            let max_events = max_events.unwrap_or(config.max_events);
            let journal = verify_tape(&bytes, max_events)
                .with_context(|| format!("tape failed verification: {}", input.display()))?;

            println!("Tape verified.");
            println!("  Seed:          {}", seed_to_hex(journal.seed));
            println!("  Events:        {}", journal.event_count);
            println!("  Final length:  {}", journal.final_length);
            println!("  Ticks:         {} ({} ms)", journal.final_ticks, journal.elapsed_ms);
            println!("  Final RNG:     0x{:08x}", journal.final_rng_state);
            println!("  Frames:        {}", journal.frames_completed);
            println!("  Exited:        {}", journal.exited);
            println!("  Tape checksum: 0x{:08x}", journal.tape_checksum);

            if let Some(path) = journal_out {
                let json = serde_json::to_vec_pretty(&journal)
                    .context("failed to serialize journal json")?;
                std::fs::write(&path, json)
                    .with_context(|| format!("failed writing journal output: {}", path.display()))?;
                println!("  Journal JSON:  {}", path.display());
            }
        }
        Commands::Replay {
            input,
            every,
            max_events,
        } => {
            let bytes = read_tape(&input)?;
            let tape = parse_tape(&bytes, max_events.unwrap_or(config.max_events))
                .with_context(|| format!("failed to parse tape: {}", input.display()))?;
            let checkpoints = replay_with_checkpoints(tape.header.seed, &tape.events, every);
            println!(
                "{}",
                serde_json::to_string_pretty(&checkpoints)
                    .context("failed to serialize checkpoints")?
            );
        }
        Commands::Soak {
            seeds,
            seed_start,
            events,
            jobs,
        } => {
            let seed_list = seed_range(seed_start, seeds);
            let events = events.unwrap_or(config.soak_events);

            let report = match jobs {
                Some(jobs) => rayon::ThreadPoolBuilder::new()
                    .num_threads(jobs)
                    .build()
                    .context("failed to build rayon threadpool")?
                    .install(|| soak(&seed_list, events)),
                None => soak(&seed_list, events),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("failed to serialize soak report")?
            );
            report.ensure_clean()?;
        }
    }

    Ok(())
}
