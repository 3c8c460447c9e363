/*!
    Header line tokenizer.
*/

use y4m_types::{ColorFormat, Error, Result, StreamHeader};

/**
    Parse the header parameters that follow the signature.

    `line` is the header line with its trailing newline already removed.
    Tokens are dispatched on their first character; unknown tags are
    skipped so that extension tokens (`I`, `A`, `X`, ...) do not break
    parsing. Width and height stay zero when absent.
*/
pub fn parse_header_line(line: &str) -> Result<StreamHeader> {
    let mut header = StreamHeader::default();

    for token in line.split(' ').filter(|t| !t.is_empty()) {
        match token.as_bytes()[0] {
            b'W' => header.width = parse_field(token, &token[1..])?,
            b'H' => header.height = parse_field(token, &token[1..])?,
            b'C' => {
                header.color =
                    ColorFormat::from_tag(token).ok_or_else(|| Error::UnsupportedColorFormat {
                        token: token.to_string(),
                    })?;
            }
            b'F' => {
                // Rational rates such as 30000:1001 keep only the numerator.
                let numerator = token[1..].split(':').next().unwrap_or_default();
                header.frame_rate = parse_field(token, numerator)?;
            }
            _ => {}
        }
    }

    if header.width % 2 != 0 || header.height % 2 != 0 {
        return Err(Error::InvalidDimensions {
            width: header.width,
            height: header.height,
        });
    }

    Ok(header)
}

fn parse_field(token: &str, digits: &str) -> Result<u32> {
    // u32::from_str accepts a leading '+', the header grammar does not
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(token));
    }
    digits.parse().map_err(|_| malformed(token))
}

fn malformed(token: &str) -> Error {
    Error::MalformedHeaderField {
        token: token.to_string(),
    }
}
