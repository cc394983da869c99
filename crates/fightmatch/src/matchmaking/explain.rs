//! Human-readable reasons derived from an already computed breakdown.
//!
//! Nothing here scores anything new: every remark is read off the breakdown or the raw
//! fighter attributes, so the same inputs always yield the same text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{rank_gap, Fighter};
use super::policy::{Policy, ScoringModel};
use super::scoring::{ScoreBreakdown, ScoreComponent};

pub const NEUTRAL_WHY: &str = "Balanced matchup across multiple factors";
pub const NEUTRAL_RISK: &str = "No significant risks identified";

const MAX_WHY: usize = 3;
const STRONG: f64 = 0.7;
const GOOD: f64 = 0.5;
const WEAK: f64 = 0.4;
const POOR: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Explanation {
    pub why: Vec<String>,
    pub risks: Vec<String>,
}

impl Explanation {
    /// One-line rendering of the positive reasons.
    pub fn summary(&self) -> String {
        format!("{}.", self.why.join(". "))
    }
}

/// Components the policy gives no weight are left out of both lists.
pub fn explain(
    subject: &Fighter,
    candidate: &Fighter,
    breakdown: &ScoreBreakdown,
    policy: &Policy,
    today: NaiveDate,
) -> Explanation {
    Explanation {
        why: why(subject, candidate, breakdown, policy, today),
        risks: risks(subject, candidate, breakdown, policy, today),
    }
}

fn weighted(component: ScoreComponent, policy: &Policy) -> bool {
    component.weight(&policy.weights) > 0.0
}

fn why(
    subject: &Fighter,
    candidate: &Fighter,
    breakdown: &ScoreBreakdown,
    policy: &Policy,
    today: NaiveDate,
) -> Vec<String> {
    let model = policy.model;
    let mut reasons = Vec::new();

    if let Some(gap) = rank_gap(subject, candidate) {
        if gap <= 2 {
            reasons.push(format!(
                "Close rankings ({} vs {}) create a competitive matchup",
                subject.rank_label(),
                candidate.rank_label()
            ));
        }
    }

    if subject.is_champion || candidate.is_champion {
        reasons.push("Title fight potential".to_string());
    }

    let high_finishers = [subject, candidate]
        .iter()
        .any(|fighter| fighter.finish_rate().is_some_and(|rate| rate > STRONG));
    if model == ScoringModel::Profile && breakdown.division_health > STRONG && high_finishers {
        reasons.push("High finish rates suggest an exciting, action-packed fight".to_string());
    }

    if breakdown.activity > STRONG
        && subject.days_inactive(today) < 180
        && candidate.days_inactive(today) < 180
    {
        reasons.push("Both fighters are recently active, ensuring readiness".to_string());
    }

    let mut ranked: Vec<_> = breakdown
        .components()
        .into_iter()
        .filter(|(component, _)| weighted(*component, policy))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    for (component, score) in ranked.iter().take(MAX_WHY) {
        let strength = if *score > STRONG {
            "Strong"
        } else if *score > GOOD {
            "Good"
        } else {
            continue;
        };
        reasons.push(format!(
            "{strength} {} ({:.0}%)",
            label(*component, model),
            score * 100.0
        ));
    }

    reasons.truncate(MAX_WHY);
    if reasons.is_empty() {
        reasons.push(NEUTRAL_WHY.to_string());
    }
    reasons
}

fn risks(
    subject: &Fighter,
    candidate: &Fighter,
    breakdown: &ScoreBreakdown,
    policy: &Policy,
    today: NaiveDate,
) -> Vec<String> {
    let mut risks = Vec::new();

    if weighted(ScoreComponent::Fairness, policy)
        && breakdown.fairness < WEAK
        && rank_gap(subject, candidate).is_some_and(|gap| gap > 5)
    {
        risks.push(format!(
            "Large ranking gap ({} vs {}) may indicate mismatch",
            subject.rank_label(),
            candidate.rank_label()
        ));
    }

    if weighted(ScoreComponent::Activity, policy)
        && breakdown.activity < WEAK
        && (subject.days_inactive(today) > 365 || candidate.days_inactive(today) > 365)
    {
        risks.push("One or both fighters have been inactive for over a year".to_string());
    }

    if weighted(ScoreComponent::Risk, policy) && breakdown.risk < POOR {
        risks.push("Potential mismatch could lead to one-sided outcome".to_string());
    }

    for fighter in [subject, candidate] {
        if fighter.is_injured {
            risks.push(format!("{} is currently injured", fighter.name));
        }
    }

    let champion_vs_outsider = (subject.is_champion
        && !candidate.is_champion
        && !candidate.is_contender())
        || (candidate.is_champion && !subject.is_champion && !subject.is_contender());
    if champion_vs_outsider {
        risks.push("Champion vs non-contender may not be competitive".to_string());
    }

    if weighted(ScoreComponent::Hype, policy) && breakdown.hype < POOR {
        risks.push("Limited fan interest in this pairing".to_string());
    }

    if risks.is_empty() {
        risks.push(NEUTRAL_RISK.to_string());
    }
    risks
}

fn label(component: ScoreComponent, model: ScoringModel) -> &'static str {
    match (component, model) {
        (ScoreComponent::Fairness, _) => "competitive fairness",
        (ScoreComponent::DivisionHealth, ScoringModel::Divisional) => "division clarity",
        (ScoreComponent::DivisionHealth, ScoringModel::Profile) => "excitement",
        (ScoreComponent::Risk, _) => "safety margin",
        (ScoreComponent::Hype, _) => "fan interest",
        (ScoreComponent::Activity, _) => "fighter readiness",
    }
}
