//! Single-pass event classification and per-actor aggregation.
//!
//! Every decoded line is either an object-state line, which replaces the
//! object's entry in the [`ObjectRegistry`], or an event line, which is
//! resolved against the registry and credited to the pilot and group of the
//! object it names. Anything the aggregator cannot make sense of is skipped;
//! there is no error path.

use serde::{Deserialize, Serialize};
use tracing::trace;

use acmi_core::models::{AggregateStats, KillCategory, Record, Stat, UNKNOWN_ACTOR};

use crate::fields::{first_present, parse_fields};
use crate::registry::ObjectRegistry;

// ── PassCounts ────────────────────────────────────────────────────────────────

/// Line bookkeeping gathered during one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassCounts {
    /// Every line handed to [`StatsAggregator::process_line`].
    pub lines_read: u64,
    /// Blank, frame/comment, attribute-less and unkeyed lines.
    pub lines_skipped: u64,
    /// Lines that created or replaced an object.
    pub object_lines: u64,
    /// Lines carrying an `Event` attribute.
    pub event_lines: u64,
    /// Event lines that changed at least one counter.
    pub events_applied: u64,
}

// ── StatsAggregator ───────────────────────────────────────────────────────────

/// All mutable state of one pass over a recording.
#[derive(Debug, Default)]
pub struct StatsAggregator {
    registry: ObjectRegistry,
    stats: AggregateStats,
    counts: PassCounts,
}

impl StatsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw recording line.
    ///
    /// Blank lines and lines starting with `#` (time frames, comments) are
    /// skipped before decoding.
    pub fn process_line(&mut self, line: &str) {
        self.counts.lines_read += 1;

        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            self.counts.lines_skipped += 1;
            return;
        }

        let record = parse_fields(line);
        if record.is_empty() {
            trace!("Skipping line without attributes: {}", line);
            self.counts.lines_skipped += 1;
            return;
        }

        self.process_record(record);
    }

    /// Classify a decoded record and apply it.
    pub fn process_record(&mut self, record: Record) {
        if let Some(event) = record.get("Event") {
            self.counts.event_lines += 1;
            if self.apply_event(event, &record) {
                self.counts.events_applied += 1;
            }
            return;
        }

        match first_present(&record, &["Object", "ID"]) {
            Some(id) => {
                let id = id.to_string();
                self.registry.upsert(&id, record);
                self.counts.object_lines += 1;
            }
            None => self.counts.lines_skipped += 1,
        }
    }

    /// Objects known so far.
    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &AggregateStats {
        &self.stats
    }

    pub fn counts(&self) -> PassCounts {
        self.counts
    }

    /// End the pass and hand back the finished tables.
    pub fn finish(self) -> AggregateStats {
        self.stats
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Returns `true` when the event changed a counter.
    fn apply_event(&mut self, event: &str, record: &Record) -> bool {
        if event.starts_with("TakeOff") {
            self.credit(
                first_present(record, &["Object", "PrimaryObject"]),
                Stat::Sorties,
            )
        } else if event == "Kill" {
            self.apply_kill(record)
        } else if event.starts_with("Refuel") {
            self.credit(first_present(record, &["Object"]), Stat::Refuels)
        } else if event.starts_with("CSAR") || event.starts_with("Pickup") {
            self.credit(first_present(record, &["Object"]), Stat::CsarPickup)
        } else {
            trace!("Ignoring event {}", event);
            false
        }
    }

    /// Credit `stat` to the pilot and group of object `id`, if it is known.
    fn credit(&mut self, id: Option<&str>, stat: Stat) -> bool {
        let registry = &self.registry;
        let Some(object) = id.and_then(|id| registry.lookup(id)) else {
            trace!("{} references unknown object {:?}", stat, id);
            return false;
        };
        let (pilot, group) = actor_keys(object);
        self.stats.record(pilot, group, stat);
        true
    }

    fn apply_kill(&mut self, record: &Record) -> bool {
        let registry = &self.registry;
        let shooter_id = first_present(record, &["PrimaryObject", "Object"]);
        let Some(shooter) = shooter_id.and_then(|id| registry.lookup(id)) else {
            trace!("Kill by unknown object {:?}", shooter_id);
            return false;
        };
        let target = first_present(record, &["SecondaryObject", "Target"])
            .and_then(|id| registry.lookup(id));

        let category = categorize_type(target.and_then(|t| t.get("Type")).map(String::as_str));
        let (pilot, group) = actor_keys(shooter);
        self.stats.record(pilot, group, category.stat());

        let shooter_coalition = shooter.get("Coalition").filter(|c| !c.is_empty());
        let target_coalition = target.and_then(|t| t.get("Coalition"));
        if shooter_coalition.is_some() && shooter_coalition == target_coalition {
            self.stats.record(pilot, group, Stat::FriendlyFire);
        }
        true
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Classify a target `Type` attribute as air, ship or ground.
///
/// Matching is case-insensitive on substrings; ship words are checked before
/// air words, and anything unmatched (including an absent type) is ground.
pub fn categorize_type(type_str: Option<&str>) -> KillCategory {
    let Some(type_str) = type_str.filter(|s| !s.is_empty()) else {
        return KillCategory::Ground;
    };
    let s = type_str.to_lowercase();
    if ["ship", "boat", "naval"].iter().any(|w| s.contains(w)) {
        KillCategory::Ship
    } else if ["air", "wing", "heli"].iter().any(|w| s.contains(w)) {
        KillCategory::Air
    } else {
        KillCategory::Ground
    }
}

/// Pilot and group keys of `object`, falling back to [`UNKNOWN_ACTOR`].
fn actor_keys(object: &Record) -> (&str, &str) {
    let pilot = object.get("Pilot").map_or(UNKNOWN_ACTOR, String::as_str);
    let group = object.get("Group").map_or(UNKNOWN_ACTOR, String::as_str);
    (pilot, group)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
