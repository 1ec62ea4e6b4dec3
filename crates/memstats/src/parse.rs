use std::io::BufRead;
use std::sync::OnceLock;

use regex::bytes::Regex;

use crate::error::FieldParseError;
use crate::fields::StatField;
use crate::stats::MemStats;

static MEMINFO_LINE: OnceLock<Regex> = OnceLock::new();

/// `^(MemTotal|MemFree|...):\s*([0-9]+)`, built from [`StatField::ALL`].
///
/// Anything after the digits (the ` kB` suffix) is not matched.
fn meminfo_line() -> &'static Regex {
    MEMINFO_LINE.get_or_init(|| {
        let names: Vec<&str> = StatField::ALL.iter().map(|f| f.name()).collect();
        let pattern = format!(r"^({}):\s*([0-9]+)", names.join("|"));
        // Field names are plain identifiers, so the pattern always compiles.
        Regex::new(&pattern).expect("meminfo line pattern")
    })
}

/// Match a single line against the recognized-field pattern.
///
/// Returns `None` for lines that are not recognized fields, and an error for
/// recognized fields whose digits overflow a `u64`.
pub fn parse_line(line: &[u8]) -> Option<Result<(StatField, u64), FieldParseError>> {
    let caps = meminfo_line().captures(line)?;
    // Both groups are ASCII by construction of the pattern.
    let name = std::str::from_utf8(caps.get(1)?.as_bytes()).ok()?;
    let digits = std::str::from_utf8(caps.get(2)?.as_bytes()).ok()?;
    let field = name.parse::<StatField>().ok()?;

    Some(
        digits
            .parse::<u64>()
            .map(|value| (field, value))
            .map_err(|source| FieldParseError {
                field,
                digits: digits.to_string(),
                source,
            }),
    )
}

/// Scan a meminfo-formatted stream and build a snapshot, derived stats
/// included.
///
/// Lines with unparseable values are logged and skipped. A read error ends
/// the scan early with what has been collected so far.
pub fn parse_meminfo<R: BufRead>(reader: R) -> MemStats {
    let mut stats = MemStats::default();
    let mut recognized = 0usize;

    for (i, line) in reader.split(b'\n').enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(line = i + 1, "stopped reading meminfo: {e}");
                break;
            }
        };
        match parse_line(&line) {
            Some(Ok((field, value))) => {
                stats.set(field, value);
                recognized += 1;
            }
            Some(Err(e)) => tracing::warn!(line = i + 1, "skipping meminfo line: {e}"),
            None => {}
        }
    }

    tracing::debug!(recognized, "meminfo scan complete");
    stats.derive();
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
MemTotal:       16303424 kB
MemFree:         1208744 kB
MemAvailable:    9418372 kB
Buffers:          512032 kB
Cached:          7840916 kB
SwapCached:         1024 kB
Active:          8046432 kB
Inactive:        5312760 kB
Active(anon):    4302240 kB
Inactive(anon):   612384 kB
SwapTotal:       2097148 kB
SwapFree:        2090236 kB
Dirty:               452 kB
Writeback:             0 kB
Mapped:          1203376 kB
Slab:             702612 kB
CommitLimit:    10248860 kB
Committed_AS:   14823908 kB
VmallocTotal:   34359738367 kB
HugePages_Total:       0
";

    #[test]
    fn test_parse_line_recognized() {
        assert_eq!(
            parse_line(b"MemTotal:       16303424 kB").map(|r| r.ok()),
            Some(Some((StatField::MemTotal, 16303424)))
        );
        assert_eq!(
            parse_line(b"Committed_AS:   14823908 kB").map(|r| r.ok()),
            Some(Some((StatField::CommittedAs, 14823908)))
        );
    }

    #[test]
    fn test_parse_line_no_space_or_unit() {
        assert_eq!(
            parse_line(b"Slab:42").map(|r| r.ok()),
            Some(Some((StatField::Slab, 42)))
        );
    }

    #[test]
    fn test_parse_line_ignored() {
        let lines: [&[u8]; 7] = [
            b"MemAvailable:    9418372 kB",
            b"Active(anon):    4302240 kB",
            b"VmallocTotal:   34359738367 kB",
            b"MemTotal: abc kB",
            b" MemTotal: 10 kB",
            b"MemTotal 10 kB",
            b"",
        ];
        for line in lines {
            assert!(parse_line(line).is_none(), "line={:?}", String::from_utf8_lossy(line));
        }
    }

    #[test]
    fn test_parse_line_overflow_is_error() {
        let err = parse_line(b"MemTotal: 18446744073709551616 kB")
            .expect("line matches")
            .expect_err("value overflows");
        assert_eq!(err.field, StatField::MemTotal);
        assert_eq!(err.digits, "18446744073709551616");
    }

    #[test]
    fn test_parse_line_u64_max() {
        assert_eq!(
            parse_line(b"CommitLimit: 18446744073709551615 kB").map(|r| r.ok()),
            Some(Some((StatField::CommitLimit, u64::MAX)))
        );
    }

    #[test]
    fn test_parse_sample() {
        let stats = parse_meminfo(SAMPLE.as_bytes());
        assert_eq!(stats.mem_total, Some(16303424));
        assert_eq!(stats.mem_free, Some(1208744));
        assert_eq!(stats.active, Some(8046432));
        assert_eq!(stats.inactive, Some(5312760));
        assert_eq!(stats.writeback, Some(0));
        assert_eq!(stats.committed_as, Some(14823908));
        assert_eq!(stats.mem_used, 16303424 - 1208744);
        assert_eq!(stats.swap_used, 2097148 - 2090236);
        assert_eq!(stats.real_free, 1208744 + 512032 + 7840916);

        let map = stats.to_map();
        assert_eq!(map.len(), StatField::ALL.len() + 3);
        assert!(!map.contains_key("MemAvailable"));
        assert!(!map.contains_key("VmallocTotal"));
        assert!(!map.contains_key("HugePages_Total"));
    }

    #[test]
    fn test_later_line_overwrites_earlier() {
        let stats = parse_meminfo("MemTotal: 10 kB\nMemTotal: 20 kB\n".as_bytes());
        assert_eq!(stats.mem_total, Some(20));
    }

    #[test]
    fn test_invalid_line_keeps_earlier_value() {
        let stats = parse_meminfo("MemTotal: 10 kB\nMemTotal: 99999999999999999999 kB\n".as_bytes());
        assert_eq!(stats.mem_total, Some(10));
    }

    #[test]
    fn test_non_utf8_line_does_not_stop_scan() {
        let mut input = b"MemTotal: 1000 kB\n".to_vec();
        input.extend_from_slice(b"Bogus: \xff\xfe\n");
        input.extend_from_slice(b"MemFree: 200 kB\n");
        let stats = parse_meminfo(&input[..]);
        assert_eq!(stats.mem_free, Some(200));
        assert_eq!(stats.mem_used, 800);
    }

    #[test]
    fn test_crlf_and_missing_trailing_newline() {
        let stats = parse_meminfo("MemTotal: 1000 kB\r\nMemFree: 200".as_bytes());
        assert_eq!(stats.mem_total, Some(1000));
        assert_eq!(stats.mem_free, Some(200));
    }
}
