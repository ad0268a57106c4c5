//! Kernel packet-scheduler clock parameters
//!
//! Linux exposes the scheduler's time conversion constants in
//! `/proc/net/psched` as a single line of fixed-width hex words:
//!
//! ```text
//! 000003e8 00000040 000f4240 3b9aca00
//! ^t2us    ^us2t    ^clock_res
//! ```
//!
//! Only the first three words are used. Parsing is positional in the same
//! way as `scanf("%08x%08x%08x")`: each field skips leading whitespace and
//! then consumes at most eight hex digits, so both the space-separated kernel
//! format and a packed 24-digit string are accepted.

use crate::error::{Result, TickError};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Well-known location of the psched parameters
pub const PSCHED_PATH: &str = "/proc/net/psched";

/// Number of hex fields consumed from the source
pub const FIELD_COUNT: usize = 3;

/// Maximum digits per field (one 32-bit word)
const FIELD_WIDTH: usize = 8;

/// Upper bound on bytes read from the source. The kernel line is 36 bytes;
/// anything past this cannot change the first three fields of a sane file.
pub const MAX_SOURCE_BYTES: u64 = 4096;

/// Raw psched parameters as advertised by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PschedParams {
    /// Ticks-to-microseconds numerator
    pub t2us: u32,
    /// Microseconds-to-ticks denominator
    pub us2t: u32,
    /// Clock resolution in units per second
    pub clock_res: u32,
}

impl PschedParams {
    pub fn new(t2us: u32, us2t: u32, clock_res: u32) -> Self {
        Self {
            t2us,
            us2t,
            clock_res,
        }
    }

    /// Parse the three leading hex fields.
    ///
    /// On failure returns the number of fields that did parse, so callers can
    /// report how far the input got.
    pub fn parse(input: &[u8]) -> std::result::Result<Self, usize> {
        let mut fields = [0u32; FIELD_COUNT];
        let mut pos = 0;

        for (index, slot) in fields.iter_mut().enumerate() {
            match scan_hex_word(input, pos) {
                Some((value, next)) => {
                    *slot = value;
                    pos = next;
                }
                None => return Err(index),
            }
        }

        Ok(Self::new(fields[0], fields[1], fields[2]))
    }

    /// Read and parse parameters from `path`.
    ///
    /// At most [`MAX_SOURCE_BYTES`] are read. The file handle lives only
    /// inside this call and is closed on every return path, including parse
    /// failures.
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let buf = {
            let file = File::open(path).map_err(|source| TickError::SourceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
            let mut buf = Vec::with_capacity(64);
            file.take(MAX_SOURCE_BYTES)
                .read_to_end(&mut buf)
                .map_err(|e| TickError::MalformedData {
                    path: path.to_path_buf(),
                    reason: format!("read failed: {}", e),
                })?;
            buf
        };

        tracing::debug!(
            "Read {} bytes from {}: {:?}",
            buf.len(),
            path.display(),
            String::from_utf8_lossy(&buf).trim_end()
        );

        let params = Self::parse(&buf).map_err(|found| TickError::MalformedData {
            path: path.to_path_buf(),
            reason: format!("expected {} hex fields, found {}", FIELD_COUNT, found),
        })?;

        if params.us2t == 0 {
            return Err(TickError::MalformedData {
                path: path.to_path_buf(),
                reason: "us2t is zero".to_string(),
            });
        }

        tracing::trace!(
            t2us = params.t2us,
            us2t = params.us2t,
            clock_res = params.clock_res,
            "Parsed psched parameters"
        );

        Ok(params)
    }
}

/// Scan one `%08x` field starting at `pos`: skip ASCII whitespace, then take
/// 1..=8 hex digits. Returns the value and the offset just past it.
///
/// Unlike C `%x`, a `0x` prefix or sign is rejected; the kernel never writes one.
fn scan_hex_word(input: &[u8], pos: usize) -> Option<(u32, usize)> {
    let start = pos
        + input
            .get(pos..)?
            .iter()
            .take_while(|b| b.is_ascii_whitespace())
            .count();

    let digits = input
        .get(start..)?
        .iter()
        .take(FIELD_WIDTH)
        .take_while(|b| b.is_ascii_hexdigit())
        .count();

    if digits == 0 {
        return None;
    }

    let end = start + digits;
    let text = std::str::from_utf8(&input[start..end]).ok()?;
    let value = u32::from_str_radix(text, 16).ok()?;
    Some((value, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_kernel_format() {
        let params = PschedParams::parse(b"000003e8 00000040 000f4240 3b9aca00\n").unwrap();
        assert_eq!(params, PschedParams::new(1000, 64, 1_000_000));
    }

    #[test]
    fn test_parse_packed_fields() {
        let params = PschedParams::parse(b"00000001000003e8000f4240").unwrap();
        assert_eq!(params, PschedParams::new(1, 1000, 1_000_000));
    }

    #[test]
    fn test_parse_ignores_trailing_data() {
        let params = PschedParams::parse(b"00000001000003e8000f4240zzzz garbage").unwrap();
        assert_eq!(params.clock_res, 1_000_000);
    }

    #[test]
    fn test_parse_short_fields_like_scanf() {
        // %08x is a maximum width, not an exact one
        let params = PschedParams::parse(b"1 3e8 f4240").unwrap();
        assert_eq!(params, PschedParams::new(1, 1000, 1_000_000));
    }

    #[test]
    fn test_parse_width_splits_long_runs() {
        // Long digit runs are split every eight digits
        let params = PschedParams::parse(b"0000000120000000f 3").unwrap();
        assert_eq!(params.t2us, 1);
        assert_eq!(params.us2t, 0x2000_0000);
        assert_eq!(params.clock_res, 0xf);
    }

    #[test]
    fn test_parse_reports_fields_found() {
        assert_eq!(PschedParams::parse(b"00000001 000003e8"), Err(2));
        assert_eq!(PschedParams::parse(b"00000001 xyz"), Err(1));
        assert_eq!(PschedParams::parse(b""), Err(0));
        assert_eq!(PschedParams::parse(b"   \n"), Err(0));
    }

    #[test]
    fn test_parse_rejects_hex_prefix_and_sign() {
        // "0" is taken as the first field, then "x" ends the scan
        assert_eq!(PschedParams::parse(b"0x000001 000003e8 000f4240"), Err(1));
        assert_eq!(PschedParams::parse(b"+00000001 000003e8 000f4240"), Err(0));
    }

    #[test]
    fn test_read_from_missing_file() {
        let err = PschedParams::read_from("/nonexistent/psched").unwrap_err();
        assert!(matches!(err, TickError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_read_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "000003e8 00000001 3b9aca00 3b9aca00").unwrap();

        let params = PschedParams::read_from(file.path()).unwrap();
        assert_eq!(params, PschedParams::new(1000, 1, 1_000_000_000));
    }

    #[test]
    fn test_read_from_two_fields_is_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "00000001 000003e8").unwrap();

        let err = PschedParams::read_from(file.path()).unwrap_err();
        match err {
            TickError::MalformedData { reason, .. } => {
                assert_eq!(reason, "expected 3 hex fields, found 2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_from_caps_large_source() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "00000001000003e8000f4240").unwrap();
        file.write_all(&vec![b'z'; 4 * MAX_SOURCE_BYTES as usize]).unwrap();

        let params = PschedParams::read_from(file.path()).unwrap();
        assert_eq!(params, PschedParams::new(1, 1000, 1_000_000));
    }

    #[test]
    fn test_read_from_endless_source_is_malformed() {
        let path = Path::new("/dev/zero");
        if !path.exists() {
            return;
        }
        let err = PschedParams::read_from(path).unwrap_err();
        assert!(matches!(err, TickError::MalformedData { .. }));
    }

    #[test]
    fn test_read_failure_after_open_is_malformed() {
        // Opening a directory succeeds on Linux; reading it fails
        let dir = tempfile::tempdir().unwrap();
        let err = PschedParams::read_from(dir.path()).unwrap_err();
        match err {
            TickError::MalformedData { reason, .. } => assert!(reason.starts_with("read failed")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_from_zero_denominator_is_malformed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "00000001 00000000 000f4240").unwrap();

        let err = PschedParams::read_from(file.path()).unwrap_err();
        assert!(matches!(err, TickError::MalformedData { .. }));
    }
}
