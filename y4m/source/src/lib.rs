/*!
    Frame-rate paced Y4M source for the y4m crate family.

    This crate wraps a [`Y4mReader`] so that frames are handed out at the
    stream's declared frame rate, as if they were coming from a live
    capture device. Pacing is a pure scheduling layer on top of the
    reader; decoding stays synchronous and timing-free in `y4m-demux`.

    # Example

    ```no_run
    use y4m_source::{PacedSource, SourceItem, StreamSignal};

    # async fn run() -> y4m_source::Result<()> {
    let mut source = PacedSource::open_path("clip.y4m")?;
    source.open()?;

    loop {
        match source.next_frame().await? {
            SourceItem::Frame(frame) => {
                // Arrives once every 1 / frame_rate seconds
            }
            SourceItem::Signal(StreamSignal::EndOfStream) => break,
            SourceItem::Signal(StreamSignal::Cancelled) => break,
        }
    }

    source.close();
    # Ok(())
    # }
    ```

    # Shutdown

    [`PacedSource::close`] and [`CloseHandle::close`] fire a cancellation
    signal and return immediately. A pull that is waiting for its tick
    observes the signal and returns [`StreamSignal::Cancelled`]; if the
    tick and the signal are ready together, cancellation wins. Every pull
    after that returns `Cancelled` without waiting.
*/

pub use y4m_demux::Y4mReader;
pub use y4m_types::{Error, MediaProperties, PixelFormat, Result, StreamSignal, VideoFrame};

mod config;
mod source;

pub use config::{MissedTicks, SourceConfig};
pub use source::{CloseHandle, PacedSource, SourceItem};
