//! Cel pixel rows: each row is a list of (colour << 4 | count) bytes ended by
//! a zero byte.

use crate::agires::{error::FormatError, source::ByteSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub color: u8,
    pub transparent: bool,
    pub count: u8,
}

/// Decodes one row starting at the current position. The terminating zero is
/// consumed, leaving the source at the start of the next row.
///
/// A byte with a colour but a count of zero yields a run of no pixels.
pub fn decode_row<R: ByteSource + ?Sized>(rdr: &mut R, transparency_color: u8) -> Result<Vec<Run>, FormatError> {
    let mut runs = Vec::new();
    loop {
        let byte = rdr.read_byte()?;
        if byte == 0 {
            break;
        }
        let color = (byte >> 4) & 0x0f;
        let count = byte & 0x0f;
        runs.push(Run{ color, transparent: color == transparency_color, count });
    }
    log::trace!("row: {:?}", runs);
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode(bytes: &[u8], transparency_color: u8) -> Vec<Run> {
        let mut rdr = Cursor::new(bytes);
        decode_row(&mut rdr, transparency_color).unwrap()
    }

    #[test]
    fn terminator_only() {
        assert!(decode(&[ 0x00 ], 0).is_empty());
    }

    #[test]
    fn single_runs() {
        assert_eq!(decode(&[ 0x31, 0x00 ], 15), vec![ Run{ color: 3, transparent: false, count: 1 } ]);
        assert_eq!(decode(&[ 0xa5, 0x00 ], 15), vec![ Run{ color: 10, transparent: false, count: 5 } ]);
    }

    #[test]
    fn transparency_and_zero_count() {
        let runs = decode(&[ 0x43, 0x70, 0x72, 0x00 ], 7);
        assert_eq!(runs, vec![
            Run{ color: 4, transparent: false, count: 3 },
            Run{ color: 7, transparent: true, count: 0 },
            Run{ color: 7, transparent: true, count: 2 },
        ]);
    }

    #[test]
    fn stops_at_row_end() {
        let mut rdr = Cursor::new(vec![ 0x12, 0x00, 0x34, 0x00 ]);
        assert_eq!(decode_row(&mut rdr, 0).unwrap().len(), 1);
        assert_eq!(rdr.position(), 2);
        assert_eq!(decode_row(&mut rdr, 0).unwrap()[0].color, 3);
        assert_eq!(rdr.position(), 4);
    }

    #[test]
    fn missing_terminator_is_truncation() {
        let mut rdr = Cursor::new(vec![ 0x12, 0x34 ]);
        assert!(matches!(decode_row(&mut rdr, 0), Err(FormatError::Truncated{ offset: 2 })));
    }
}
