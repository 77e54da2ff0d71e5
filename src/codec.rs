//! Newline-delimited JSON decoding of inbound sample records

use crate::error::{ActivationError, Result};
use crate::types::Sample;
use std::io::BufRead;

/// Decode one wire record, e.g. `{"timeStamp": 1, "data": -20, "label": "REST"}`
pub fn decode_sample(line: &str) -> Result<Sample> {
    serde_json::from_str(line)
        .map_err(|e| ActivationError::Decode(format!("{} in record '{}'", e, line)))
}

/// Blocking sample source over any line-oriented reader
///
/// Blank lines are skipped. After the first error the source is exhausted.
pub struct LineSource<R> {
    reader: R,
    line: String,
    failed: bool,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            failed: false,
        }
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<Sample>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {
                    let record = self.line.trim();
                    if record.is_empty() {
                        continue;
                    }
                    let decoded = decode_sample(record);
                    self.failed = decoded.is_err();
                    return Some(decoded);
                }
                Err(e) => {
                    self.failed = true;
                    return Some(Err(ActivationError::IoError(e)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_decode_sample() {
        let sample = decode_sample(r#"{"timeStamp":1590000000123,"data":-3120,"label":"ACTIVATION"}"#)
            .unwrap();
        assert_eq!(sample.timestamp, 1590000000123);
        assert_eq!(sample.amplitude, -3120);
        assert_eq!(sample.label, "ACTIVATION");
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        let err = decode_sample(r#"{"timeStamp":1,"label":"REST"}"#).unwrap_err();
        assert!(matches!(err, ActivationError::Decode(_)));
    }

    #[test]
    fn test_decode_rejects_out_of_range_amplitude() {
        assert!(decode_sample(r#"{"timeStamp":1,"data":4294967296,"label":"REST"}"#).is_err());
    }

    #[test]
    fn test_line_source_skips_blank_lines() {
        let input = "{\"timeStamp\":1,\"data\":2,\"label\":\"REST\"}\n\n  \n{\"timeStamp\":2,\"data\":3,\"label\":\"REST\"}\n";
        let samples: Vec<Sample> = LineSource::new(Cursor::new(input))
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].amplitude, 3);
    }

    #[test]
    fn test_line_source_stops_after_error() {
        let input = "{\"timeStamp\":1,\"data\":2,\"label\":\"REST\"}\ngarbage\n{\"timeStamp\":2,\"data\":3,\"label\":\"REST\"}\n";
        let mut source = LineSource::new(Cursor::new(input));
        assert!(source.next().unwrap().is_ok());
        assert!(source.next().unwrap().is_err());
        assert!(source.next().is_none());
    }
}
