use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Attribute name to value mapping decoded from one recording line.
///
/// The attribute set is open-ended and almost every key is optional, so
/// records stay string-keyed rather than being forced into a schema.
pub type Record = HashMap<String, String>;

/// Actor key used when an object carries no `Pilot` or `Group` attribute.
pub const UNKNOWN_ACTOR: &str = "Unknown";

/// One of the seven tallies kept for every actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    Sorties,
    KillAir,
    KillGround,
    KillShip,
    Refuels,
    CsarPickup,
    FriendlyFire,
}

impl Stat {
    /// All statistics in report column order.
    pub const ALL: [Stat; 7] = [
        Stat::Sorties,
        Stat::KillAir,
        Stat::KillGround,
        Stat::KillShip,
        Stat::Refuels,
        Stat::CsarPickup,
        Stat::FriendlyFire,
    ];

    /// Canonical snake_case name, e.g. `"kill_air"`.
    pub fn name(self) -> &'static str {
        match self {
            Stat::Sorties => "sorties",
            Stat::KillAir => "kill_air",
            Stat::KillGround => "kill_ground",
            Stat::KillShip => "kill_ship",
            Stat::Refuels => "refuels",
            Stat::CsarPickup => "csar_pickup",
            Stat::FriendlyFire => "friendly_fire",
        }
    }

    /// Column heading used by the text report.
    pub fn header(self) -> &'static str {
        match self {
            Stat::Sorties => "Sorties",
            Stat::KillAir => "KillAir",
            Stat::KillGround => "KillGround",
            Stat::KillShip => "KillShip",
            Stat::Refuels => "Refuel",
            Stat::CsarPickup => "CSAR",
            Stat::FriendlyFire => "FF",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Broad class of a destroyed target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KillCategory {
    Air,
    Ground,
    Ship,
}

impl KillCategory {
    /// The counter a kill of this category increments.
    pub fn stat(self) -> Stat {
        match self {
            KillCategory::Air => Stat::KillAir,
            KillCategory::Ground => Stat::KillGround,
            KillCategory::Ship => Stat::KillShip,
        }
    }
}

// ── CounterBucket ─────────────────────────────────────────────────────────────

/// Tallies for a single pilot or group. Every counter starts at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterBucket {
    #[serde(default)]
    pub sorties: u64,
    #[serde(default)]
    pub kill_air: u64,
    #[serde(default)]
    pub kill_ground: u64,
    #[serde(default)]
    pub kill_ship: u64,
    #[serde(default)]
    pub refuels: u64,
    #[serde(default)]
    pub csar_pickup: u64,
    #[serde(default)]
    pub friendly_fire: u64,
}

impl CounterBucket {
    /// Add one to `stat`.
    pub fn increment(&mut self, stat: Stat) {
        *self.slot_mut(stat) += 1;
    }

    /// Current value of `stat`.
    pub fn get(&self, stat: Stat) -> u64 {
        match stat {
            Stat::Sorties => self.sorties,
            Stat::KillAir => self.kill_air,
            Stat::KillGround => self.kill_ground,
            Stat::KillShip => self.kill_ship,
            Stat::Refuels => self.refuels,
            Stat::CsarPickup => self.csar_pickup,
            Stat::FriendlyFire => self.friendly_fire,
        }
    }

    /// Counter values in report column order (see [`Stat::ALL`]).
    pub fn values(&self) -> [u64; 7] {
        Stat::ALL.map(|stat| self.get(stat))
    }

    fn slot_mut(&mut self, stat: Stat) -> &mut u64 {
        match stat {
            Stat::Sorties => &mut self.sorties,
            Stat::KillAir => &mut self.kill_air,
            Stat::KillGround => &mut self.kill_ground,
            Stat::KillShip => &mut self.kill_ship,
            Stat::Refuels => &mut self.refuels,
            Stat::CsarPickup => &mut self.csar_pickup,
            Stat::FriendlyFire => &mut self.friendly_fire,
        }
    }
}

// ── StatsTable ────────────────────────────────────────────────────────────────

/// Counter buckets keyed by actor name, iterated in ascending name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatsTable {
    rows: BTreeMap<String, CounterBucket>,
}

impl StatsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one to `stat` for `actor`, creating the bucket on first use.
    pub fn increment(&mut self, actor: &str, stat: Stat) {
        match self.rows.get_mut(actor) {
            Some(bucket) => bucket.increment(stat),
            None => {
                let mut bucket = CounterBucket::default();
                bucket.increment(stat);
                self.rows.insert(actor.to_string(), bucket);
            }
        }
    }

    /// The bucket for `actor`, if any event has been credited to it.
    pub fn get(&self, actor: &str) -> Option<&CounterBucket> {
        self.rows.get(actor)
    }

    /// Value of `stat` for `actor`; zero when the actor is unknown.
    pub fn count(&self, actor: &str, stat: Stat) -> u64 {
        self.rows.get(actor).map_or(0, |bucket| bucket.get(stat))
    }

    /// Rows in ascending actor order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CounterBucket)> {
        self.rows.iter().map(|(name, bucket)| (name.as_str(), bucket))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ── AggregateStats ────────────────────────────────────────────────────────────

/// Finished result of one pass: the pilot table and the group table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub pilots: StatsTable,
    pub groups: StatsTable,
}

impl AggregateStats {
    /// Credit `stat` to `pilot` and `group` together; the tables never diverge.
    pub fn record(&mut self, pilot: &str, group: &str, stat: Stat) {
        self.pilots.increment(pilot, stat);
        self.groups.increment(group, stat);
    }
}
