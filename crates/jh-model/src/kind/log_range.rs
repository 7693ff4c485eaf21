use serde::{Deserialize, Serialize};

/// Default tail window of a partial read.
pub const DEFAULT_TAIL_BYTES: u64 = 4096;

/// `end.time` sent by a full read; the log server treats it as "no upper bound".
pub const FULL_READ_END_TIME: i64 = i64::MAX;

/// Which bytes of a log file to retrieve.
///
/// The log server encodes this as a signed `start` (negative counts from the end of the file)
/// plus an `end` where `0` means end of file. The variants keep those two conventions apart;
/// [`LogRange::query_string`] maps them back to the wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum LogRange {
    /// The entire file, regardless of size.
    Full,
    /// The last `length` bytes.
    FromEnd { length: u64 },
    /// From byte `offset` up to `end`, or to end of file when `end` is `None`.
    ///
    /// `end` is forwarded untouched; the log server reads a negative value as a position
    /// counted back from the end of the file.
    FromStart {
        offset: u64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        end: Option<i64>,
    },
}

impl Default for LogRange {
    fn default() -> Self {
        LogRange::FromEnd {
            length: DEFAULT_TAIL_BYTES,
        }
    }
}

impl LogRange {
    /// Build a range from the raw `start`/`end` pair used by callers.
    ///
    /// - `start < 0`: last `|start|` bytes, `end` is ignored.
    /// - `start >= 0`, `end == 0`: from `start` to end of file.
    /// - `start >= 0`, any other `end`: sent to the log server as given.
    pub fn from_offsets(start: i64, end: i64) -> Self {
        if start < 0 {
            return LogRange::FromEnd {
                length: start.unsigned_abs(),
            };
        }
        LogRange::FromStart {
            offset: start.unsigned_abs(),
            end: (end != 0).then_some(end),
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, LogRange::Full)
    }

    /// Query parameters understood by the log server, in wire order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match *self {
            LogRange::Full => vec![
                ("start", "0".to_string()),
                ("start.time", "0".to_string()),
                ("end.time", FULL_READ_END_TIME.to_string()),
            ],
            LogRange::FromEnd { length } => vec![("start", format!("-{length}"))],
            LogRange::FromStart { offset, end } => vec![
                ("start", offset.to_string()),
                ("end", end.unwrap_or(0).to_string()),
            ],
        }
    }

    /// Query string without the leading `?`.
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Human-readable description of the window.
    pub fn describe(&self) -> String {
        match *self {
            LogRange::Full => "entire file".to_string(),
            LogRange::FromEnd { length } => format!("last {length} bytes"),
            LogRange::FromStart { offset, end: None } => {
                format!("from byte {offset} to end of file")
            }
            LogRange::FromStart {
                offset,
                end: Some(end),
            } if end < 0 => format!(
                "from byte {offset} to {} bytes before end of file",
                end.unsigned_abs()
            ),
            LogRange::FromStart {
                offset,
                end: Some(end),
            } => format!("bytes {offset} - {end}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_start_counts_from_end_and_drops_end() {
        assert_eq!(
            LogRange::from_offsets(-4096, 0),
            LogRange::FromEnd { length: 4096 }
        );
        let r = LogRange::from_offsets(-100, 5000);
        assert_eq!(r.query_string(), "start=-100");
    }

    #[test]
    fn extreme_negative_start_does_not_overflow() {
        let r = LogRange::from_offsets(i64::MIN, 0);
        assert_eq!(r.query_string(), format!("start={}", i64::MIN));
    }

    #[test]
    fn non_negative_start_always_sends_end() {
        let r = LogRange::from_offsets(0, 0);
        assert_eq!(r, LogRange::FromStart { offset: 0, end: None });
        assert_eq!(r.query_string(), "start=0&end=0");

        let r = LogRange::from_offsets(1024, 5120);
        assert_eq!(r.query_string(), "start=1024&end=5120");
    }

    #[test]
    fn end_is_forwarded_as_given() {
        let r = LogRange::from_offsets(0, -100);
        assert_eq!(r, LogRange::FromStart { offset: 0, end: Some(-100) });
        assert_eq!(r.query_string(), "start=0&end=-100");

        assert_eq!(LogRange::from_offsets(2048, 100).query_string(), "start=2048&end=100");
        assert_eq!(LogRange::from_offsets(2048, 2048).query_string(), "start=2048&end=2048");
    }

    #[test]
    fn full_read_requests_unbounded_time_window() {
        assert_eq!(
            LogRange::Full.query_string(),
            "start=0&start.time=0&end.time=9223372036854775807"
        );
    }

    #[test]
    fn default_is_last_4k() {
        assert_eq!(LogRange::default().describe(), "last 4096 bytes");
    }

    #[test]
    fn descriptions() {
        assert_eq!(LogRange::Full.describe(), "entire file");
        assert_eq!(
            LogRange::from_offsets(10, 0).describe(),
            "from byte 10 to end of file"
        );
        assert_eq!(
            LogRange::from_offsets(0, 2048).describe(),
            "bytes 0 - 2048"
        );
        assert_eq!(
            LogRange::from_offsets(0, -100).describe(),
            "from byte 0 to 100 bytes before end of file"
        );
    }

    #[test]
    fn serde_tagged_form() {
        let json = serde_json::to_string(&LogRange::FromEnd { length: 8 }).unwrap();
        assert_eq!(json, r#"{"mode":"fromEnd","length":8}"#);
        let back: LogRange = serde_json::from_str(r#"{"mode":"fromStart","offset":3}"#).unwrap();
        assert_eq!(back, LogRange::FromStart { offset: 3, end: None });
    }
}
