use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{rank_gap, Fighter, RecentMatchups};
use super::policy::Policy;

/// Eligibility rule that produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    SameFighter,
    RecentMatchup,
    #[serde(rename = "title_fight_eligibility")]
    TitleIneligible,
    #[serde(rename = "rank_gap_too_high")]
    RankGapExceeded,
    #[serde(rename = "injured_fighter")]
    Injured,
    #[serde(rename = "inactive_too_long")]
    InactiveTooLong,
}

/// Only blocking violations keep a candidate out of the ranked list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Blocking,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintViolation {
    pub kind: ConstraintKind,
    pub reason: String,
    pub severity: Severity,
}

impl ConstraintViolation {
    fn blocking(kind: ConstraintKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            severity: Severity::Blocking,
        }
    }

    fn warning(kind: ConstraintKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
            severity: Severity::Warning,
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Blocking
    }
}

/// Evaluate every rule of `policy` for the pairing, in a fixed order.
///
/// The returned list follows check order (self-pairing, rematch, title, rank gap, injury,
/// inactivity) and is not sorted by severity.
pub fn check_constraints(
    subject: &Fighter,
    candidate: &Fighter,
    policy: &Policy,
    recent_matchups: &RecentMatchups,
    today: NaiveDate,
) -> Vec<ConstraintViolation> {
    let rules = &policy.constraints;
    let mut violations = Vec::new();

    if subject.id == candidate.id {
        violations.push(ConstraintViolation::blocking(
            ConstraintKind::SameFighter,
            "Cannot match a fighter against themselves",
        ));
    }

    if !rules.allow_recent_matchup && recent_matchups.contains(&subject.id, &candidate.id) {
        violations.push(ConstraintViolation::blocking(
            ConstraintKind::RecentMatchup,
            "These fighters have already fought recently",
        ));
    }

    if rules.require_title_eligibility && subject.is_champion != candidate.is_champion {
        if subject.is_champion && !candidate.is_contender() {
            violations.push(ConstraintViolation::blocking(
                ConstraintKind::TitleIneligible,
                format!(
                    "Champion can only fight top 5 contenders for title fights (candidate is {})",
                    candidate.rank_label()
                ),
            ));
        }
        if candidate.is_champion && !subject.is_contender() {
            violations.push(ConstraintViolation::blocking(
                ConstraintKind::TitleIneligible,
                format!(
                    "Only top 5 contenders are eligible for title fights (target is {})",
                    subject.rank_label()
                ),
            ));
        }
    }

    if let (Some(limit), Some(gap)) = (rules.max_rank_gap, rank_gap(subject, candidate)) {
        if gap > limit {
            violations.push(ConstraintViolation::blocking(
                ConstraintKind::RankGapExceeded,
                format!("Rank gap ({gap}) exceeds maximum allowed ({limit})"),
            ));
        }
    }

    if rules.block_injured {
        if subject.is_injured {
            violations.push(ConstraintViolation::blocking(
                ConstraintKind::Injured,
                "Target fighter is currently injured",
            ));
        }
        if candidate.is_injured {
            violations.push(ConstraintViolation::blocking(
                ConstraintKind::Injured,
                "Candidate fighter is currently injured",
            ));
        }
    }

    if let Some(limit) = rules.max_days_inactive {
        for (side, fighter) in [("Target", subject), ("Candidate", candidate)] {
            let days = fighter.days_inactive(today);
            if days > limit {
                violations.push(ConstraintViolation::warning(
                    ConstraintKind::InactiveTooLong,
                    format!("{side} fighter has been inactive for {days} days (max: {limit})"),
                ));
            }
        }
    }

    violations
}

pub fn has_blocking_violations(violations: &[ConstraintViolation]) -> bool {
    violations.iter().any(ConstraintViolation::is_blocking)
}
