//! Plain-text and JSON rendering of the aggregate statistics.

use serde::Serialize;

use crate::error::Result;
use crate::models::{AggregateStats, Stat, StatsTable};

/// Width of the actor name column.
pub const NAME_WIDTH: usize = 20;

/// Width of each counter column.
pub const COLUMN_WIDTH: usize = 9;

/// Render one stats table as a fixed-width text block.
///
/// The block is a title line, a header row, a dashed rule, one row per actor
/// in ascending name order and a trailing blank line. Names longer than the
/// name column are not truncated.
///
/// # Examples
///
/// ```
/// use acmi_core::formatting::format_table;
/// use acmi_core::models::{Stat, StatsTable};
///
/// let mut table = StatsTable::new();
/// table.increment("Ace", Stat::Sorties);
///
/// let text = format_table("Pilot stats", &table);
/// let lines: Vec<&str> = text.lines().collect();
/// assert_eq!(lines[0], "Pilot stats");
/// assert!(lines[1].starts_with("Name                 Sorties   KillAir"));
/// assert_eq!(lines[3], format!("{:<20} {:>9}{}", "Ace", 1, "         0".repeat(6)));
/// ```
pub fn format_table(title: &str, table: &StatsTable) -> String {
    let mut out = String::new();
    out.push_str(title);
    out.push('\n');

    let headers: Vec<String> = Stat::ALL
        .iter()
        .map(|stat| format!("{:<width$}", stat.header(), width = COLUMN_WIDTH))
        .collect();
    out.push_str(&format!("{:<width$} ", "Name", width = NAME_WIDTH));
    out.push_str(&headers.join(" "));
    out.push('\n');

    let rule: Vec<String> = Stat::ALL.iter().map(|_| "-".repeat(COLUMN_WIDTH)).collect();
    out.push_str(&"-".repeat(NAME_WIDTH));
    out.push(' ');
    out.push_str(&rule.join(" "));
    out.push('\n');

    for (name, bucket) in table.iter() {
        let cells: Vec<String> = bucket
            .values()
            .iter()
            .map(|value| format!("{:>width$}", value, width = COLUMN_WIDTH))
            .collect();
        out.push_str(&format!("{:<width$} ", name, width = NAME_WIDTH));
        out.push_str(&cells.join(" "));
        out.push('\n');
    }

    out.push('\n');
    out
}

/// Render the pilot table followed by the group table.
pub fn format_report(stats: &AggregateStats) -> String {
    let mut out = format_table("Pilot stats", &stats.pilots);
    out.push_str(&format_table("Group stats", &stats.groups));
    out
}

/// Pretty-print any serialisable report value as JSON.
pub fn format_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
