//! `slotlist` command-line driver.
//!
//! ```bash
//! # Scripted scenario, text dumps on stdout, numbered dump files under ./dumps
//! slotlist --min-capacity 2 demo --capacity 4 --out dumps
//!
//! # Seeded random workload with full verification
//! slotlist --paranoid stress --seed 7 --ops 100000
//! ```

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use slotlist::{ListConfig, VerifyLevel};
use slotlist_cli::{demo, stress};
use slotlist_dump::{DumpFormat, DumpSink};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Array-backed linked list driver
#[derive(Parser, Debug)]
#[command(name = "slotlist", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn", env = "SLOTLIST_LOG")]
    log_level: String,

    /// Walk the whole live chain around every mutation
    #[arg(long, global = true, env = "SLOTLIST_PARANOID")]
    paranoid: bool,

    /// Capacity floor for the list under test
    #[arg(
        long,
        global = true,
        default_value_t = ListConfig::DEFAULT_MIN_CAPACITY,
        env = "SLOTLIST_MIN_CAPACITY"
    )]
    min_capacity: u32,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay the scripted insert/erase scenario
    Demo(DemoArgs),

    /// Run a seeded random workload
    Stress(StressArgs),
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Initial capacity, sentinel included
    #[arg(long, default_value_t = 0)]
    capacity: u32,

    /// Also write numbered text and DOT dumps into this directory
    #[arg(long, env = "SLOTLIST_DUMP_DIR")]
    out: Option<PathBuf>,

    /// File name stem for written dumps
    #[arg(long, default_value = "list")]
    stem: String,

    /// Only write DOT files to `--out`
    #[arg(long)]
    dot_only: bool,

    /// Compact the list before the last stage
    #[arg(long)]
    rebuild: bool,
}

#[derive(Args, Debug)]
struct StressArgs {
    /// RNG seed
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of operations
    #[arg(long, default_value_t = 10_000)]
    ops: u64,

    /// Initial capacity, sentinel included
    #[arg(long, default_value_t = 0)]
    capacity: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli);

    let verify_level = if cli.paranoid {
        VerifyLevel::Full
    } else {
        VerifyLevel::Cheap
    };
    let config = |capacity| {
        ListConfig::new(capacity)
            .with_min_capacity(cli.min_capacity)
            .with_verify_level(verify_level)
    };

    match cli.command {
        Command::Demo(ref args) => demo_command(config(args.capacity), args),
        Command::Stress(ref args) => stress_command(config(args.capacity), args),
    }
}

fn setup_logging(cli: &Cli) {
    let log_level = cli
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::WARN);

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();
}

fn demo_command(config: ListConfig, args: &DemoArgs) -> anyhow::Result<()> {
    let mut sink = args.out.as_ref().map(|dir| {
        let formats: &[DumpFormat] = if args.dot_only {
            &[DumpFormat::Dot]
        } else {
            &[DumpFormat::Text, DumpFormat::Dot]
        };
        DumpSink::new(dir).with_stem(args.stem.as_str()).with_formats(formats)
    });

    let mut stdout = std::io::stdout().lock();
    let values = demo::run(config, args.rebuild, &mut stdout, sink.as_mut())
        .context("demo scenario failed")?;
    if let Some(sink) = &sink {
        info!(dir = %sink.dir().display(), dumps = sink.counter(), "dumps written");
    }
    writeln!(stdout, "final: {values:?}")?;
    Ok(())
}

fn stress_command(config: ListConfig, args: &StressArgs) -> anyhow::Result<()> {
    let report = stress::run(&stress::StressConfig {
        seed: args.seed,
        ops: args.ops,
        list: config,
    })
    .with_context(|| format!("stress run failed (seed {})", args.seed))?;
    println!("{report}");
    Ok(())
}
