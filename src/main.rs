//! Command-line front end: enumerate every game from the initial position
//! and print the totals.

use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use mancala_tree::{
    AsciiRenderer, BoardConfig, Enumerator, FallbackPolicy, NullSink, SearchConfig, SearchStats,
};

/// Enumerate every game of Kalah from a uniform starting position.
#[derive(Parser, Debug)]
#[command(name = "mancala-tree", version, about)]
struct Cli {
    /// Pits per player, excluding stores
    locations: usize,

    /// Tokens initially placed in every pit
    tokens: usize,

    /// Draw every visited position on stdout
    #[arg(long)]
    print: bool,

    /// Skip min/max/average game length tracking
    #[arg(long)]
    no_metrics: bool,

    /// Board slots in the pool (also the initial stack depth)
    #[arg(long, default_value_t = 64)]
    pool_slots: usize,

    /// What to do when the pool runs out
    #[arg(long, value_enum, default_value = "fail")]
    fallback: FallbackArg,

    /// Output format for the totals
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FallbackArg {
    Fail,
    Heap,
    HeapOnly,
}

impl From<FallbackArg> for FallbackPolicy {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::Fail => FallbackPolicy::Fail,
            FallbackArg::Heap => FallbackPolicy::Heap,
            FallbackArg::HeapOnly => FallbackPolicy::HeapOnly,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// JSON shape of the totals: the raw counters plus the derived values.
#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    stats: &'a SearchStats,
    positions: u64,
    average_game_length: Option<f64>,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            process::exit(1);
        }
        Err(err) => {
            // --help and --version
            let _ = err.print();
            process::exit(0);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let board = BoardConfig::new(cli.locations, cli.tokens).context("invalid board")?;
    let settings = SearchConfig::default()
        .with_pool_slots(cli.pool_slots)
        .with_fallback(cli.fallback.into())
        .with_metrics(!cli.no_metrics);

    let stats = if cli.print {
        let renderer = AsciiRenderer::new(board, io::BufWriter::new(io::stdout().lock()));
        let report = Enumerator::new(board, &settings, renderer)?
            .run()
            .context("enumeration failed")?;
        report.sink.finish().context("writing boards to stdout")?;
        report.stats
    } else {
        Enumerator::new(board, &settings, NullSink)?
            .run()
            .context("enumeration failed")?
            .stats
    };

    tracing::info!(
        positions_per_second = stats.positions_per_second(),
        time_us = stats.time_us,
        "done"
    );

    let mut out = io::stdout().lock();
    match cli.format {
        OutputFormat::Text => write_text(&mut out, &stats)?,
        OutputFormat::Json => {
            let report = JsonReport {
                stats: &stats,
                positions: stats.positions(),
                average_game_length: stats.average_game_length(),
            };
            serde_json::to_writer_pretty(&mut out, &report).context("serializing totals")?;
            writeln!(out)?;
        }
    }

    Ok(())
}

fn write_text(out: &mut impl Write, stats: &SearchStats) -> io::Result<()> {
    write!(
        out,
        " total games: {}\ntotal states: {}\n",
        stats.games,
        stats.positions()
    )?;

    if let (Some(min), Some(max), Some(avg)) = (
        stats.min_game_length,
        stats.max_game_length,
        stats.average_game_length(),
    ) {
        writeln!(out, "shortest game: {min}")?;
        writeln!(out, "longest game: {max}")?;
        writeln!(out, "average game: {avg:.3}")?;
    }

    Ok(())
}
