//! Table parser for `show flexconnect group summary` output.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// One parsed table row: a FlexConnect group and its AP count, attributed to
/// the controller it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupRecord {
    /// Controller address the row was collected from.
    pub host: String,

    /// Group name, trimmed, never empty.
    pub group: String,

    /// Number of access points in the group.
    pub ap_count: u32,
}

/// A data row is arbitrary text, a run of two-or-more whitespace characters
/// or a tab, then a decimal count at end of line.
static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)(?:\s{2,}|\t)(\d+)$").unwrap());

/// Lines starting with these are table headers, separators, or section
/// titles, not data. This is a denylist, not a schema check: vendor output
/// whose header text starts differently will leak a spurious record.
const HEADER_PREFIXES: &[&str] = &["---", "FlexConnect", "Group", "Count:"];

/// Extract group records from one session transcript.
///
/// The transcript may contain echoed commands, banner lines, separators, and
/// trailing prompts; anything that is not a well-formed data row is dropped.
/// Deterministic and side-effect free.
pub fn parse_transcript(transcript: &str, host: &str) -> Vec<GroupRecord> {
    transcript
        .lines()
        .filter_map(|line| parse_row(line, host))
        .collect()
}

fn parse_row(line: &str, host: &str) -> Option<GroupRecord> {
    let line = line.trim_end_matches('\r').trim();
    let caps = ROW.captures(line)?;

    if HEADER_PREFIXES.iter().any(|p| line.starts_with(p)) {
        return None;
    }

    let group = caps[1].trim();
    if group.is_empty() {
        return None;
    }

    // The digit-only capture can still overflow the count type
    let ap_count = caps[2].parse().ok()?;

    Some(GroupRecord {
        host: host.to_owned(),
        group: group.to_owned(),
        ap_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_line(line: &str) -> Vec<GroupRecord> {
        parse_transcript(line, "10.0.0.1")
    }

    #[test]
    fn parses_data_row() {
        let records = parse_line("06.03.118-ANKARA-LISESI        21");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].group, "06.03.118-ANKARA-LISESI");
        assert_eq!(records[0].ap_count, 21);
        assert_eq!(records[0].host, "10.0.0.1");
    }

    #[test]
    fn group_name_may_contain_spaces() {
        let records = parse_line("Branch Office West\t14");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].group, "Branch Office West");
        assert_eq!(records[0].ap_count, 14);
    }

    #[test]
    fn separator_rule_is_not_data() {
        assert!(parse_line("--------  ----").is_empty());
    }

    #[test]
    fn header_is_denylisted_even_when_it_matches() {
        // Structurally a valid row, but starts with a known header prefix
        assert!(parse_line("Group Name   Count:").is_empty());
        assert!(parse_line("FlexConnect Groups   3").is_empty());
    }

    #[test]
    fn single_space_is_not_a_column_break() {
        assert!(parse_line("NAME 12").is_empty());
    }

    #[test]
    fn trailing_text_after_count_is_not_data() {
        assert!(parse_line("NAME   12 APs").is_empty());
    }

    #[test]
    fn count_overflow_drops_the_line() {
        assert!(parse_line("NAME   99999999999999999999").is_empty());
    }

    #[test]
    fn carriage_returns_are_stripped() {
        let records = parse_line("06.03.118-ANKARA-LISESI        21\r");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].group, "06.03.118-ANKARA-LISESI");
    }

    #[test]
    fn full_transcript() {
        let transcript = "\
(Cisco Controller) >show flexconnect group summary\r
FlexConnect Group Summary: Count: 3\r
\r
Group Name                                # Aps\r
--------------------------------          --------\r
06.03.118-ANKARA-LISESI                   21\r
06.05.213-CANKAYA-ORTAOKULU               8\r
depo-grubu                                0\r
\r
(Cisco Controller) >";

        let records = parse_transcript(transcript, "10.201.129.131");
        assert_eq!(
            records
                .iter()
                .map(|r| (r.group.as_str(), r.ap_count))
                .collect::<Vec<_>>(),
            vec![
                ("06.03.118-ANKARA-LISESI", 21),
                ("06.05.213-CANKAYA-ORTAOKULU", 8),
                ("depo-grubu", 0),
            ]
        );
    }

    #[test]
    fn deterministic() {
        let transcript = "a-group   1\nb-group   2";
        assert_eq!(
            parse_transcript(transcript, "h"),
            parse_transcript(transcript, "h")
        );
    }

    #[test]
    fn record_serializes() {
        let record = GroupRecord {
            host: "10.0.0.1".into(),
            group: "g1".into(),
            ap_count: 3,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"host":"10.0.0.1","group":"g1","ap_count":3}"#);
    }
}
