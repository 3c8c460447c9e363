/*!
    Frame-rate paced pull source.
*/

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use y4m_demux::Y4mReader;
use y4m_types::{
    Error, MediaProperties, Result, StreamHeader, StreamSignal, VideoFrame, interval_for,
};

use crate::SourceConfig;

/**
    One successful pull from a [`PacedSource`].
*/
#[derive(Debug)]
pub enum SourceItem {
    /// A fully decoded frame.
    Frame(VideoFrame),
    /// The source stopped normally.
    Signal(StreamSignal),
}

impl SourceItem {
    /**
        Returns the frame, or `None` for a termination signal.
    */
    pub fn into_frame(self) -> Option<VideoFrame> {
        match self {
            Self::Frame(frame) => Some(frame),
            Self::Signal(_) => None,
        }
    }

    /**
        Returns true if this is a termination signal.
    */
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Signal(_))
    }
}

/**
    Cloneable handle that closes a [`PacedSource`] from another task.

    The handle controls the session that was open when it was taken.
    Closing never blocks.
*/
#[derive(Clone, Debug)]
pub struct CloseHandle {
    token: CancellationToken,
}

impl CloseHandle {
    /// Fire the cancellation signal.
    pub fn close(&self) {
        self.token.cancel();
    }

    /// Returns true if the session has been closed.
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }
}

static_assertions::assert_impl_all!(CloseHandle: Send, Sync);

/**
    Pull source that delivers frames from a [`Y4mReader`] at a fixed rate.

    Each [`next_frame`](Self::next_frame) waits for the next tick of a
    periodic gate (one tick per `1 / frame_rate` seconds) before decoding a
    frame, so a file on disk behaves like a live capture device. Closing the
    source wins over a pending tick.

    The gate is started by the first pull after the source is opened, and
    its first tick lands one interval later.

    Frames are read from `R` on the calling task once the tick fires, so
    `R` should be cheap to read: a local file or an in-memory buffer. A
    reader that can stall on the network belongs behind a buffering task.
    `R` does not have to be `Send` or `'static`.
*/
pub struct PacedSource<R> {
    reader: Y4mReader<R>,
    frame_rate: u32,
    interval: Duration,
    missed_ticks: MissedTickBehavior,
    cancel: CancellationToken,
    gate: Option<Interval>,
}

impl PacedSource<BufReader<File>> {
    /**
        Open a `.y4m` file and pace it at its declared frame rate.
    */
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::new(Y4mReader::open(path)?)
    }
}

impl<R: BufRead> PacedSource<R> {
    /**
        Pace `reader` at the frame rate declared in its header.
    */
    pub fn new(reader: Y4mReader<R>) -> Result<Self> {
        Self::with_config(reader, SourceConfig::default())
    }

    /**
        Pace `reader` according to `config`.

        Fails with [`Error::InvalidFrameRate`] when the effective frame
        rate is zero.
    */
    pub fn with_config(reader: Y4mReader<R>, config: SourceConfig) -> Result<Self> {
        let frame_rate = config.effective_frame_rate(reader.header().frame_rate);
        let interval = interval_for(frame_rate).ok_or(Error::InvalidFrameRate(frame_rate))?;

        Ok(Self {
            reader,
            frame_rate,
            interval,
            missed_ticks: config.missed_ticks.into(),
            cancel: CancellationToken::new(),
            gate: None,
        })
    }

    /**
        Arm the source for a new session.

        A closed source gets a fresh cancellation signal and restarts its
        gate on the next pull. Opening a source that is already open keeps
        the current session.
    */
    pub fn open(&mut self) -> Result<()> {
        if self.cancel.is_cancelled() {
            self.cancel = CancellationToken::new();
            self.gate = None;
            tracing::debug!(frame_rate = self.frame_rate, "paced source reopened");
        } else {
            tracing::debug!(frame_rate = self.frame_rate, "paced source already open");
        }
        Ok(())
    }

    /**
        Wait for the next tick and decode one frame.

        Returns [`StreamSignal::Cancelled`] without waiting once the source
        is closed, and [`StreamSignal::EndOfStream`] when the input has no
        more frames. Decode errors are passed through unchanged.
    */
    pub async fn next_frame(&mut self) -> Result<SourceItem> {
        if self.cancel.is_cancelled() {
            return Ok(SourceItem::Signal(StreamSignal::Cancelled));
        }

        let (period, behavior) = (self.interval, self.missed_ticks);
        let gate = self.gate.get_or_insert_with(|| {
            let mut gate = tokio::time::interval_at(Instant::now() + period, period);
            gate.set_missed_tick_behavior(behavior);
            gate
        });

        let cancelled = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => true,
            _ = gate.tick() => false,
        };
        if cancelled {
            self.gate = None;
            return Ok(SourceItem::Signal(StreamSignal::Cancelled));
        }

        Ok(match self.reader.parse_next_frame()? {
            Some(frame) => SourceItem::Frame(frame),
            None => SourceItem::Signal(StreamSignal::EndOfStream),
        })
    }

    /**
        Fire the cancellation signal and stop the gate.

        Never blocks. Calling it again is a no-op.
    */
    pub fn close(&mut self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!(
                frames = self.reader.frames_read(),
                "paced source closed"
            );
        }
        self.cancel.cancel();
        self.gate = None;
    }

    /**
        Handle that closes the current session from elsewhere.
    */
    pub fn close_handle(&self) -> CloseHandle {
        CloseHandle {
            token: self.cancel.clone(),
        }
    }

    /// Returns true if the current session has been closed.
    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /**
        Properties of the delivered frames, at the paced rate.
    */
    pub fn properties(&self) -> MediaProperties {
        MediaProperties::new(self.reader.header(), self.frame_rate)
    }

    /// The parsed stream header.
    pub fn header(&self) -> &StreamHeader {
        self.reader.header()
    }

    /// Delay between two deliveries.
    pub fn frame_interval(&self) -> Duration {
        self.interval
    }
}
