//! Decoding of a single `key=value,key=value` recording line.

use acmi_core::models::Record;

/// Decode one raw line into a [`Record`].
///
/// Segments are separated by `,` and split on the first `=`. Keys and values
/// are trimmed and surrounding `"` characters are stripped from values.
/// Empty segments and segments without `=` contribute nothing; when a key
/// repeats, the last occurrence wins. An empty result means the line carries
/// no data.
pub fn parse_fields(line: &str) -> Record {
    let mut fields = Record::new();
    for token in line.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        if let Some((key, value)) = token.split_once('=') {
            let value = value.trim().trim_matches('"');
            fields.insert(key.trim().to_string(), value.to_string());
        }
    }
    fields
}

/// First non-empty value among `keys`, in the order given.
///
/// Absent keys and empty values both fall through to the next key.
pub fn first_present<'a>(record: &'a Record, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .map(String::as_str)
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_fields ──────────────────────────────────────────────────────────

    #[test]
    fn test_basic_pairs() {
        let rec = parse_fields("Object=100,Pilot=Ace,Group=Alpha");
        assert_eq!(rec.len(), 3);
        assert_eq!(rec["Object"], "100");
        assert_eq!(rec["Pilot"], "Ace");
        assert_eq!(rec["Group"], "Alpha");
    }

    #[test]
    fn test_quoted_value_is_unwrapped() {
        let rec = parse_fields(r#"Object=7,Type="F/A-18C""#);
        assert_eq!(rec["Type"], "F/A-18C");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let rec = parse_fields("  Event = TakeOff ,  Object =  100  ");
        assert_eq!(rec["Event"], "TakeOff");
        assert_eq!(rec["Object"], "100");
    }

    #[test]
    fn test_splits_on_first_equals_only() {
        let rec = parse_fields("Name=a=b=c");
        assert_eq!(rec["Name"], "a=b=c");
    }

    #[test]
    fn test_segments_without_equals_are_dropped() {
        let rec = parse_fields("garbage,,Object=5, ,more garbage");
        assert_eq!(rec.len(), 1);
        assert_eq!(rec["Object"], "5");
    }

    #[test]
    fn test_line_without_pairs_is_empty() {
        assert!(parse_fields("").is_empty());
        assert!(parse_fields("#12.5").is_empty());
        assert!(parse_fields(", , ,").is_empty());
    }

    #[test]
    fn test_empty_value_is_kept() {
        let rec = parse_fields("Object=9,Pilot=");
        assert_eq!(rec["Pilot"], "");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let rec = parse_fields("Pilot=First,Pilot=Second");
        assert_eq!(rec["Pilot"], "Second");
    }

    // ── first_present ─────────────────────────────────────────────────────────

    #[test]
    fn test_first_present_prefers_earlier_key() {
        let rec = parse_fields("Object=1,PrimaryObject=2");
        assert_eq!(first_present(&rec, &["Object", "PrimaryObject"]), Some("1"));
        assert_eq!(first_present(&rec, &["PrimaryObject", "Object"]), Some("2"));
    }

    #[test]
    fn test_first_present_skips_empty_values() {
        let rec = parse_fields("Object=,PrimaryObject=2");
        assert_eq!(first_present(&rec, &["Object", "PrimaryObject"]), Some("2"));
    }

    #[test]
    fn test_first_present_none_when_all_missing() {
        let rec = parse_fields("Event=Kill");
        assert_eq!(first_present(&rec, &["SecondaryObject", "Target"]), None);
    }
}
