use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use exgl_batch::{BatchConfig, GlThread, batch_queue};
use exgl_dispatch::{
    Dispatcher, MethodTable,
    gl::{self, GlRecorder},
    replay,
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Replays a JSON log of WebGL-style commands against a recording GL backend.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// The command log to replay.
    log: PathBuf,

    /// Invocations per batch before the batch is handed to the GL thread.
    #[arg(long, default_value_t = BatchConfig::default().max_batch_len)]
    max_batch_len: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.log)
        .with_context(|| format!("failed to read {}", cli.log.display()))?;

    let commands = replay::parse_log(&source)?;

    tracing::info!("Replaying {} commands from {}", commands.len(), cli.log.display());

    let recorder = GlRecorder::default();
    let mut table = MethodTable::new();
    gl::install(&mut table, &recorder);

    let (queue, receiver) = batch_queue(BatchConfig {
        max_batch_len: cli.max_batch_len,
    });
    let gl_thread = GlThread::spawn(receiver)?;

    let mut dispatcher = Dispatcher::new(table, queue);
    let stats = replay::replay(&mut dispatcher, &commands)?;
    drop(dispatcher);

    let executed = gl_thread.join()?;

    for call in recorder.take() {
        println!("{call:?}");
    }

    tracing::info!(
        "Queued {}, rejected {}, executed {} on the GL thread",
        stats.queued,
        stats.rejected,
        executed,
    );

    Ok(())
}
