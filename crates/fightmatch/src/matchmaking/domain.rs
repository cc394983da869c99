use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Days assumed for a fighter with no recorded fight; exceeds any finite inactivity limit.
pub const NEVER_FOUGHT_DAYS: i64 = 9999;

/// Highest rank still counted as a title contender.
pub const CONTENDER_RANK_CUTOFF: u32 = 5;

const RANKED_CUTOFF: u32 = 15;

/// Identifier wrapper for fighters supplied by the data-access layer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FighterId(pub String);

impl FighterId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FighterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fighter as seen by the engine. Treated as immutable for the duration of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fighter {
    pub id: FighterId,
    pub name: String,
    /// Position within the division, 1 is best. `None` when unranked or unknown.
    pub rank: Option<u32>,
    pub last_fight_date: Option<NaiveDate>,
    /// Hype proxy on a 0-100 scale.
    pub popularity: f64,
    pub is_champion: bool,
    pub is_injured: bool,
    #[serde(default)]
    pub metrics: Option<FighterMetrics>,
}

impl Fighter {
    /// Whole days since the last fight as of `today`.
    ///
    /// Falls back to the precomputed metric when the date is unknown, and to
    /// [`NEVER_FOUGHT_DAYS`] when neither is available.
    pub fn days_inactive(&self, today: NaiveDate) -> i64 {
        match self.last_fight_date {
            Some(date) => (today - date).num_days().max(0),
            None => self
                .metrics
                .as_ref()
                .and_then(|metrics| metrics.days_since_last_fight)
                .map(|days| days.max(0))
                .unwrap_or(NEVER_FOUGHT_DAYS),
        }
    }

    /// Wins over total fights; 0.5 when no record is available.
    pub fn win_rate(&self) -> f64 {
        match &self.metrics {
            Some(metrics) if metrics.total_fights > 0 => {
                metrics.wins as f64 / metrics.total_fights as f64
            }
            _ => 0.5,
        }
    }

    /// Finish rate clamped to [0, 1]; non-finite values count as missing.
    pub fn finish_rate(&self) -> Option<f64> {
        self.metrics
            .as_ref()
            .and_then(|metrics| metrics.finish_rate)
            .filter(|rate| rate.is_finite())
            .map(|rate| rate.clamp(0.0, 1.0))
    }

    pub fn win_streak(&self) -> u32 {
        self.metrics
            .as_ref()
            .map(|metrics| metrics.win_streak)
            .unwrap_or(0)
    }

    pub fn tier(&self) -> FighterTier {
        if self.is_champion {
            return FighterTier::Champion;
        }
        match self.rank {
            Some(rank) if rank <= CONTENDER_RANK_CUTOFF => FighterTier::Contender,
            Some(rank) if rank <= RANKED_CUTOFF => FighterTier::Ranked,
            _ => FighterTier::Unranked,
        }
    }

    pub fn is_contender(&self) -> bool {
        self.rank
            .map(|rank| rank <= CONTENDER_RANK_CUTOFF)
            .unwrap_or(false)
    }

    pub(crate) fn rank_label(&self) -> String {
        match self.rank {
            Some(rank) => format!("#{rank}"),
            None => "unranked".to_string(),
        }
    }
}

/// Aggregated record supplied alongside a fighter when the data layer has it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FighterMetrics {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub total_fights: u32,
    pub win_streak: u32,
    pub loss_streak: u32,
    /// Share of fights ending inside the distance, 0-1.
    pub finish_rate: Option<f64>,
    pub days_since_last_fight: Option<i64>,
}

/// Coarse standing derived from rank and champion flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FighterTier {
    Champion,
    Contender,
    Ranked,
    Unranked,
}

impl FighterTier {
    pub const fn label(self) -> &'static str {
        match self {
            FighterTier::Champion => "Champion",
            FighterTier::Contender => "Contender",
            FighterTier::Ranked => "Ranked",
            FighterTier::Unranked => "Unranked",
        }
    }
}

/// Weight-class snapshot used to normalise rank gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivisionContext {
    pub weight_class_id: String,
    pub weight_class_name: String,
    pub total_fighters: u32,
    pub champion_id: Option<FighterId>,
}

/// Fighter pairs that already met inside the caller's recency window.
///
/// Pairs are unordered: `(a, b)` and `(b, a)` are the same entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentMatchups {
    pairs: HashSet<(FighterId, FighterId)>,
}

impl RecentMatchups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, a: FighterId, b: FighterId) {
        self.pairs.insert(ordered(a, b));
    }

    pub fn contains(&self, a: &FighterId, b: &FighterId) -> bool {
        let key = ordered(a.clone(), b.clone());
        self.pairs.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<A, B> FromIterator<(A, B)> for RecentMatchups
where
    A: Into<String>,
    B: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (A, B)>>(iter: I) -> Self {
        let mut matchups = Self::new();
        for (a, b) in iter {
            matchups.insert(FighterId(a.into()), FighterId(b.into()));
        }
        matchups
    }
}

fn ordered(a: FighterId, b: FighterId) -> (FighterId, FighterId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Absolute rank distance, when both ranks are known.
pub(crate) fn rank_gap(subject: &Fighter, candidate: &Fighter) -> Option<u32> {
    match (subject.rank, candidate.rank) {
        (Some(a), Some(b)) => Some(a.abs_diff(b)),
        _ => None,
    }
}
