/*!
    Streaming Y4M reader.
*/

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use y4m_types::{Error, FRAME_MARKER, Result, SIGNATURE, StreamHeader, VideoFrame};

use crate::header::parse_header_line;

/// Longest excerpt of an unexpected line kept in error messages.
const MAX_LINE_EXCERPT: usize = 32;

/// Longest header line accepted after the signature, newline included.
const MAX_HEADER_LINE: usize = 4096;

/// Longest frame marker line accepted, newline included.
const MAX_MARKER_LINE: usize = 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReaderState {
    Ready,
    Ended,
    Failed,
}

/**
    Reader for a YUV4MPEG2 byte stream.

    Construction validates the signature and parses the header line. Each
    call to [`parse_next_frame`](Self::parse_next_frame) then consumes one
    frame record. The reader owns the only cursor into the stream and never
    seeks backwards, so a stream can be decoded once per reader.

    Reaching the end of the stream is sticky: every later call reports it
    again. Any error is terminal as well, and later calls fail with
    [`Error::Poisoned`].
*/
pub struct Y4mReader<R> {
    reader: R,
    header: StreamHeader,
    state: ReaderState,
    frames_read: u64,
    line: Vec<u8>,
}

impl Y4mReader<BufReader<File>> {
    /**
        Open a `.y4m` file from disk.

        The path must be non-empty and carry a `y4m` extension.
    */
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::invalid_input("empty path"));
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("y4m") {
            return Err(Error::invalid_input(format!(
                "{} is not a .y4m file",
                path.display()
            )));
        }
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), "opened y4m file");
        Self::new(BufReader::new(file))
    }
}

impl<R: BufRead> Y4mReader<R> {
    /**
        Validate the signature and parse the header of `reader`.
    */
    pub fn new(mut reader: R) -> Result<Self> {
        check_signature(&mut reader)?;
        let line = read_header_line(&mut reader)?;
        let header = parse_header_line(&line)?;

        tracing::debug!(
            width = header.width,
            height = header.height,
            frame_rate = header.frame_rate,
            "parsed y4m header"
        );

        Ok(Self {
            reader,
            header,
            state: ReaderState::Ready,
            frames_read: 0,
            line: Vec::new(),
        })
    }

    /// The parsed stream header.
    pub fn header(&self) -> &StreamHeader {
        &self.header
    }

    /// Number of frames returned so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Returns true once the end of the stream or an error was reached.
    pub fn is_finished(&self) -> bool {
        self.state != ReaderState::Ready
    }

    /**
        Decode the next frame record.

        Returns `Ok(None)` at the end of the stream, which is not an error.
        A frame is only returned once its whole payload has been read.
    */
    pub fn parse_next_frame(&mut self) -> Result<Option<VideoFrame>> {
        match self.state {
            ReaderState::Ended => return Ok(None),
            ReaderState::Failed => return Err(Error::Poisoned),
            ReaderState::Ready => {}
        }

        match self.read_frame() {
            Ok(Some(frame)) => {
                self.frames_read += 1;
                Ok(Some(frame))
            }
            Ok(None) => {
                tracing::debug!(frames = self.frames_read, "end of y4m stream");
                self.state = ReaderState::Ended;
                Ok(None)
            }
            Err(e) => {
                tracing::debug!(frames = self.frames_read, error = %e, "y4m reader failed");
                self.state = ReaderState::Failed;
                Err(e)
            }
        }
    }

    fn read_frame(&mut self) -> Result<Option<VideoFrame>> {
        self.line.clear();
        if read_line_capped(&mut self.reader, &mut self.line, MAX_MARKER_LINE)? == 0 {
            return Ok(None);
        }

        let terminated = self.line.last() == Some(&b'\n');
        let overlong = !terminated && self.line.len() >= MAX_MARKER_LINE;
        if !self.line.starts_with(FRAME_MARKER) || overlong {
            let excerpt = &self.line[..self.line.len().min(MAX_LINE_EXCERPT)];
            return Err(Error::FrameMarkerMissing {
                line: String::from_utf8_lossy(excerpt).trim_end().to_string(),
            });
        }

        self.header.validate_dimensions()?;
        let (width, height) = (self.header.width, self.header.height);
        let expected = self
            .header
            .frame_len()
            .ok_or(Error::InvalidDimensions { width, height })?;

        // A marker line cut off by the end of the stream has no payload after it
        if !terminated {
            return Err(Error::TruncatedFrame {
                expected,
                actual: 0,
            });
        }

        let mut data = Vec::with_capacity(expected);
        self.reader
            .by_ref()
            .take(expected as u64)
            .read_to_end(&mut data)?;
        if data.len() < expected {
            return Err(Error::TruncatedFrame {
                expected,
                actual: data.len(),
            });
        }

        VideoFrame::from_planar(data, width, height, self.frames_read).map(Some)
    }
}

impl<R: BufRead> Iterator for Y4mReader<R> {
    type Item = Result<VideoFrame>;

    /**
        Yields frames until the end of the stream, or a single error.
    */
    fn next(&mut self) -> Option<Self::Item> {
        if self.state == ReaderState::Failed {
            return None;
        }
        self.parse_next_frame().transpose()
    }
}

fn check_signature(reader: &mut impl Read) -> Result<()> {
    let mut buf = Vec::with_capacity(SIGNATURE.len());
    reader
        .take(SIGNATURE.len() as u64)
        .read_to_end(&mut buf)?;

    if buf.len() < SIGNATURE.len() {
        return Err(Error::TruncatedHeader {
            needed: SIGNATURE.len(),
            have: buf.len(),
        });
    }
    if buf != SIGNATURE {
        return Err(Error::SignatureMismatch {
            got: String::from_utf8_lossy(&buf).into_owned(),
        });
    }
    Ok(())
}

fn read_line_capped(reader: &mut impl BufRead, buf: &mut Vec<u8>, limit: usize) -> Result<usize> {
    Ok(reader.take(limit as u64).read_until(b'\n', buf)?)
}

fn read_header_line(reader: &mut impl BufRead) -> Result<String> {
    let mut buf = Vec::new();
    read_line_capped(reader, &mut buf, MAX_HEADER_LINE)?;

    let Some(stripped) = buf.strip_suffix(b"\n") else {
        let have = SIGNATURE.len() + buf.len();
        return Err(Error::TruncatedHeader {
            needed: have + 1,
            have,
        });
    };
    let stripped = stripped.strip_suffix(b"\r").unwrap_or(stripped);

    Ok(String::from_utf8_lossy(stripped).into_owned())
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use y4m_types::ColorFormat;

    use super::*;

    const HEADER: &[u8] = b"YUV4MPEG2 W4 H2 F30 C420\n";

    fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .with_test_writer()
            .try_init();
    }

    fn stream(header: &[u8], frames: usize, payload_len: usize) -> Cursor<Vec<u8>> {
        let mut bytes = header.to_vec();
        for i in 0..frames {
            bytes.extend_from_slice(b"FRAME\n");
            bytes.extend((0..payload_len).map(|b| (b + i) as u8));
        }
        Cursor::new(bytes)
    }

    #[test]
    fn single_frame_then_end_of_stream() -> Result<()> {
        init_test_tracing();
        let mut reader = Y4mReader::new(stream(HEADER, 1, 12))?;

        let header = reader.header();
        assert_eq!((header.width, header.height, header.frame_rate), (4, 2, 30));
        assert_eq!(header.color, ColorFormat::C420);

        let frame = reader.parse_next_frame()?.expect("one frame");
        assert_eq!(frame.y().len(), 8);
        assert_eq!(frame.cb().len(), 2);
        assert_eq!(frame.cr().len(), 2);
        assert_eq!(frame.y(), &[0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(frame.cb(), &[8, 9]);
        assert_eq!(frame.cr(), &[10, 11]);
        assert_eq!(frame.index(), 0);

        assert!(reader.parse_next_frame()?.is_none());
        assert!(reader.parse_next_frame()?.is_none());
        assert!(reader.is_finished());
        Ok(())
    }

    #[test]
    fn n_frames_then_end_of_stream() -> Result<()> {
        let mut reader = Y4mReader::new(stream(HEADER, 5, 12))?;
        for i in 0..5u64 {
            let frame = reader.parse_next_frame()?.expect("frame");
            assert_eq!(frame.index(), i);
            assert_eq!(frame.y()[0], i as u8);
        }
        assert!(reader.parse_next_frame()?.is_none());
        assert_eq!(reader.frames_read(), 5);
        Ok(())
    }

    #[test]
    fn empty_stream_ends_immediately() -> Result<()> {
        let mut reader = Y4mReader::new(stream(HEADER, 0, 12))?;
        assert!(reader.parse_next_frame()?.is_none());
        assert_eq!(reader.frames_read(), 0);
        Ok(())
    }

    #[test]
    fn frame_parameters_are_ignored() -> Result<()> {
        let mut bytes = HEADER.to_vec();
        bytes.extend_from_slice(b"FRAME Ip XFOO=1\n");
        bytes.extend_from_slice(&[1u8; 12]);
        let mut reader = Y4mReader::new(Cursor::new(bytes))?;
        assert!(reader.parse_next_frame()?.is_some());
        Ok(())
    }

    #[test]
    fn truncated_final_frame() -> Result<()> {
        let mut bytes = stream(HEADER, 2, 12).into_inner();
        bytes.truncate(bytes.len() - 5);
        let mut reader = Y4mReader::new(Cursor::new(bytes))?;

        assert!(reader.parse_next_frame()?.is_some());
        let err = reader.parse_next_frame().unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedFrame {
                expected: 12,
                actual: 7
            }
        ));
        assert!(matches!(reader.parse_next_frame(), Err(Error::Poisoned)));
        Ok(())
    }

    #[test]
    fn marker_line_without_newline_is_truncated() -> Result<()> {
        let mut bytes = HEADER.to_vec();
        bytes.extend_from_slice(b"FRAME");
        let mut reader = Y4mReader::new(Cursor::new(bytes))?;
        assert!(matches!(
            reader.parse_next_frame(),
            Err(Error::TruncatedFrame {
                expected: 12,
                actual: 0
            })
        ));
        Ok(())
    }

    #[test]
    fn missing_frame_marker() -> Result<()> {
        let mut bytes = HEADER.to_vec();
        bytes.extend_from_slice(b"FRAM\n");
        bytes.extend_from_slice(&[0u8; 12]);
        let mut reader = Y4mReader::new(Cursor::new(bytes))?;

        let err = reader.parse_next_frame().unwrap_err();
        assert!(matches!(&err, Error::FrameMarkerMissing { line } if line == "FRAM"));
        assert!(matches!(reader.parse_next_frame(), Err(Error::Poisoned)));
        Ok(())
    }

    #[test]
    fn endless_marker_line_stops_at_cap() -> Result<()> {
        let mut bytes = HEADER.to_vec();
        bytes.extend_from_slice(b"FRAME");
        bytes.extend(std::iter::repeat_n(b'x', 64 * 1024));
        let mut reader = Y4mReader::new(Cursor::new(bytes))?;

        let err = reader.parse_next_frame().unwrap_err();
        assert!(
            matches!(&err, Error::FrameMarkerMissing { line } if line.starts_with("FRAMExxx")),
            "{err}"
        );
        let consumed = reader.reader.position() as usize;
        assert_eq!(consumed, HEADER.len() + MAX_MARKER_LINE);
        Ok(())
    }

    #[test]
    fn endless_header_line_is_truncated() {
        let mut bytes = b"YUV4MPEG2 W4 H2 F30 X".to_vec();
        bytes.extend(std::iter::repeat_n(b'x', 64 * 1024));
        bytes.push(b'\n');

        let result = Y4mReader::new(Cursor::new(bytes));
        assert!(matches!(
            result,
            Err(Error::TruncatedHeader { have, .. }) if have == SIGNATURE.len() + MAX_HEADER_LINE
        ));
    }

    #[test]
    fn missing_dimensions_fail_at_first_frame() -> Result<()> {
        let mut reader = Y4mReader::new(stream(b"YUV4MPEG2 F30 C420\n", 1, 12))?;
        assert_eq!(reader.header().width, 0);
        assert!(matches!(
            reader.parse_next_frame(),
            Err(Error::InvalidDimensions {
                width: 0,
                height: 0
            })
        ));
        Ok(())
    }

    #[test]
    fn unsupported_color_fails_construction() {
        let result = Y4mReader::new(stream(b"YUV4MPEG2 W4 H2 F30 C444\n", 1, 24));
        assert!(matches!(
            result,
            Err(Error::UnsupportedColorFormat { ref token }) if token == "C444"
        ));
    }

    #[test]
    fn ffmpeg_style_header_decodes() -> Result<()> {
        let header = b"YUV4MPEG2 W4 H2 F25:1 Ip A1:1 C420jpeg XYSCSS=420JPEG\n";
        let mut reader = Y4mReader::new(stream(header, 1, 12))?;
        assert_eq!(reader.header().color, ColorFormat::C420);
        let frame = reader.parse_next_frame()?.expect("one frame");
        assert_eq!(frame.data().len(), 12);
        Ok(())
    }

    #[test]
    fn signature_mismatch() {
        let result = Y4mReader::new(Cursor::new(b"YUV4MPEG3 W4 H2\n".to_vec()));
        assert!(matches!(
            result,
            Err(Error::SignatureMismatch { ref got }) if got == "YUV4MPEG3"
        ));
    }

    #[test]
    fn short_signature_is_truncated_header() {
        let result = Y4mReader::new(Cursor::new(b"YUV4".to_vec()));
        assert!(matches!(
            result,
            Err(Error::TruncatedHeader { needed: 9, have: 4 })
        ));

        let result = Y4mReader::new(Cursor::new(Vec::new()));
        assert!(matches!(
            result,
            Err(Error::TruncatedHeader { needed: 9, have: 0 })
        ));
    }

    #[test]
    fn header_without_newline_is_truncated() {
        let result = Y4mReader::new(Cursor::new(b"YUV4MPEG2 W4 H2 F30".to_vec()));
        assert!(matches!(result, Err(Error::TruncatedHeader { .. })));
    }

    #[test]
    fn crlf_header_is_accepted() -> Result<()> {
        let reader = Y4mReader::new(stream(b"YUV4MPEG2 W4 H2 F30 C420\r\n", 0, 12))?;
        assert_eq!(reader.header().color, ColorFormat::C420);
        assert_eq!(reader.header().frame_rate, 30);
        Ok(())
    }

    #[test]
    fn iterator_yields_frames_then_stops() -> Result<()> {
        let reader = Y4mReader::new(stream(HEADER, 3, 12))?;
        let frames = reader.collect::<Result<Vec<_>>>()?;
        assert_eq!(frames.len(), 3);
        Ok(())
    }

    #[test]
    fn iterator_yields_single_error() -> Result<()> {
        let mut bytes = stream(HEADER, 1, 12).into_inner();
        bytes.extend_from_slice(b"garbage\n");
        let mut reader = Y4mReader::new(Cursor::new(bytes))?;

        assert!(matches!(reader.next(), Some(Ok(_))));
        assert!(matches!(reader.next(), Some(Err(Error::FrameMarkerMissing { .. }))));
        assert!(reader.next().is_none());
        Ok(())
    }

    #[test]
    fn frames_do_not_share_storage() -> Result<()> {
        let mut reader = Y4mReader::new(stream(HEADER, 2, 12))?;
        let a = reader.parse_next_frame()?.expect("first");
        let b = reader.parse_next_frame()?.expect("second");
        assert_ne!(a.data().as_ptr(), b.data().as_ptr());
        assert_ne!(a.y(), b.y());
        Ok(())
    }

    #[test]
    fn open_reads_file_from_disk() -> Result<()> {
        let mut file = tempfile::Builder::new().suffix(".y4m").tempfile()?;
        file.write_all(&stream(HEADER, 2, 12).into_inner())?;
        file.flush()?;

        let mut reader = Y4mReader::open(file.path())?;
        assert_eq!(reader.header().width, 4);
        assert!(reader.parse_next_frame()?.is_some());
        assert!(reader.parse_next_frame()?.is_some());
        assert!(reader.parse_next_frame()?.is_none());
        Ok(())
    }

    #[test]
    fn open_rejects_bad_paths() {
        assert!(matches!(Y4mReader::open(""), Err(Error::InvalidInput(_))));
        assert!(matches!(
            Y4mReader::open("clip.mp4"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(Y4mReader::open("clip"), Err(Error::InvalidInput(_))));
        assert!(matches!(
            Y4mReader::open("/nonexistent/dir/clip.y4m"),
            Err(Error::Io(_))
        ));
    }
}
