/*!
    YUV4MPEG2 container parsing for the y4m crate family.

    This crate turns a byte stream into a validated [`StreamHeader`] and a
    lazy, finite sequence of planar 4:2:0 [`VideoFrame`]s. It has no notion
    of time; pacing lives in `y4m-source`.

    # Example

    ```no_run
    use y4m_demux::Y4mReader;

    let mut reader = Y4mReader::open("clip.y4m")?;
    println!("{}x{}", reader.header().width, reader.header().height);

    while let Some(frame) = reader.parse_next_frame()? {
        let (y, cb, cr) = frame.planes();
        // Hand the planes downstream
    }
    # Ok::<(), y4m_demux::Error>(())
    ```

    # Stream Layout

    - The 9-byte signature `YUV4MPEG2`
    - One header line of space-separated tokens (`W`, `H`, `F`, `C`, others ignored)
    - Zero or more records: a `FRAME` line followed by `W * H * 3 / 2` raw bytes

    # Limitations

    - Only the plain `C420` colour space is accepted
    - Rational frame rates keep only their numerator (`F30000:1001` is 30000)
*/

pub use y4m_types::{ColorFormat, Error, Result, StreamHeader, VideoFrame};

mod header;
mod reader;

pub use header::parse_header_line;
pub use reader::Y4mReader;
