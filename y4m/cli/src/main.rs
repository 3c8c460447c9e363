use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;
use y4m_source::{MissedTicks, PacedSource, SourceConfig, SourceItem, StreamSignal, Y4mReader};

#[derive(Parser, Debug)]
#[command(name = "y4mplay")]
#[command(about = "Play a .y4m file as a paced live frame source")]
struct Args {
    /// Path to a YUV4MPEG2 file
    path: PathBuf,

    /// Pace at this frame rate instead of the one in the header
    #[arg(long)]
    fps: Option<u32>,

    /// Stop after this many frames
    #[arg(short = 'n', long)]
    max_frames: Option<u64>,

    /// Deliver missed frames back to back instead of skipping ahead
    #[arg(long)]
    burst: bool,
}

impl Args {
    fn source_config(&self) -> SourceConfig {
        let mut config = SourceConfig::new();
        if let Some(fps) = self.fps {
            config = config.with_frame_rate(fps);
        }
        if self.burst {
            config = config.with_missed_ticks(MissedTicks::Burst);
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let reader = Y4mReader::open(&args.path)
        .with_context(|| format!("failed to open {}", args.path.display()))?;
    let mut source = PacedSource::with_config(reader, args.source_config())?;
    source.open()?;

    let props = source.properties();
    tracing::info!(
        path = %args.path.display(),
        width = props.width,
        height = props.height,
        frame_rate = props.frame_rate,
        format = ?props.pixel_format,
        "playing"
    );

    // Ctrl+C closes the source; the pending pull returns Cancelled
    let handle = source.close_handle();
    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            handle.close();
        }
    });

    let start = Instant::now();
    let mut frames = 0u64;
    let stop = loop {
        if args.max_frames.is_some_and(|max| frames >= max) {
            break None;
        }
        match source.next_frame().await {
            Ok(SourceItem::Frame(frame)) => {
                frames += 1;
                tracing::debug!(
                    index = frame.index(),
                    luma = frame.y().len(),
                    chroma = frame.cb().len(),
                    "frame"
                );
            }
            Ok(SourceItem::Signal(end)) => break Some(end),
            Err(e) => {
                tracing::warn!(frames, error = %e, "decode failed");
                source.close();
                return Err(e).context("y4m stream ended with an error");
            }
        }
    };
    source.close();

    let elapsed = start.elapsed();
    let fps = if elapsed.is_zero() {
        0.0
    } else {
        frames as f64 / elapsed.as_secs_f64()
    };
    let reason = match stop {
        Some(StreamSignal::EndOfStream) => "end of stream",
        Some(StreamSignal::Cancelled) => "cancelled",
        None => "frame limit",
    };
    tracing::info!(frames, ?elapsed, fps = %format!("{fps:.2}"), reason, "done");

    Ok(())
}
