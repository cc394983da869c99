use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{rank_gap, DivisionContext, Fighter, FighterTier};
use super::explain::{explain, Explanation};
use super::policy::{Policy, PolicyWeights, ScoringModel};

const ACTIVITY_HORIZON_DAYS: f64 = 365.0;
const LONG_LAYOFF_DAYS: i64 = 365;
const LAYOFF_DAYS: i64 = 180;
const MISMATCH_RANK_GAP: u32 = 5;
const FAIRNESS_FLOOR: f64 = 0.1;
const NEUTRAL: f64 = 0.5;

/// Normalised sub-scores for one pairing, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Rank proximity; rewards adjacent opponents.
    pub fairness: f64,
    /// Rank clarity under the divisional model, excitement under the profile model.
    pub division_health: f64,
    /// Inverted risk: higher is safer.
    pub risk: f64,
    pub hype: f64,
    pub activity: f64,
}

impl ScoreBreakdown {
    pub(crate) fn components(&self) -> [(ScoreComponent, f64); 5] {
        [
            (ScoreComponent::Fairness, self.fairness),
            (ScoreComponent::DivisionHealth, self.division_health),
            (ScoreComponent::Risk, self.risk),
            (ScoreComponent::Hype, self.hype),
            (ScoreComponent::Activity, self.activity),
        ]
    }
}

/// Named slot of the canonical breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreComponent {
    Fairness,
    DivisionHealth,
    Risk,
    Hype,
    Activity,
}

impl ScoreComponent {
    pub fn weight(self, weights: &PolicyWeights) -> f64 {
        match self {
            ScoreComponent::Fairness => weights.fairness,
            ScoreComponent::DivisionHealth => weights.division_health,
            ScoreComponent::Risk => weights.risk,
            ScoreComponent::Hype => weights.hype,
            ScoreComponent::Activity => weights.activity,
        }
    }
}

/// Breakdown, aggregated total and explanation for one pairing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupScore {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    pub explanation: Explanation,
}

/// Score, aggregate and explain a pairing in one pass.
pub fn evaluate_matchup(
    subject: &Fighter,
    candidate: &Fighter,
    context: &DivisionContext,
    policy: &Policy,
    today: NaiveDate,
) -> MatchupScore {
    let breakdown = score_matchup(subject, candidate, context, policy, today);
    let total = total_score(&breakdown, policy);
    let explanation = explain(subject, candidate, &breakdown, policy, today);

    MatchupScore {
        total,
        breakdown,
        explanation,
    }
}

pub fn score_matchup(
    subject: &Fighter,
    candidate: &Fighter,
    context: &DivisionContext,
    policy: &Policy,
    today: NaiveDate,
) -> ScoreBreakdown {
    let division_health = match policy.model {
        ScoringModel::Divisional => score_division_health(subject, candidate),
        ScoringModel::Profile => score_excitement(subject, candidate),
    };

    ScoreBreakdown {
        fairness: score_fairness(subject, candidate, context),
        division_health,
        risk: score_risk(subject, candidate, today),
        hype: score_hype(subject, candidate),
        activity: score_activity(subject, candidate, today),
    }
}

/// Weighted mean of the breakdown; 0 when the policy carries no weight at all.
pub fn total_score(breakdown: &ScoreBreakdown, policy: &Policy) -> f64 {
    let total_weight = policy.weights.sum();
    if !total_weight.is_finite() || total_weight <= 0.0 {
        return 0.0;
    }

    let weighted_sum: f64 = breakdown
        .components()
        .iter()
        .map(|(component, score)| score * component.weight(&policy.weights))
        .sum();
    let total = (weighted_sum / total_weight).clamp(0.0, 1.0);

    match policy.model {
        ScoringModel::Divisional => total,
        ScoringModel::Profile => (total * 100.0).round() / 100.0,
    }
}

fn score_fairness(subject: &Fighter, candidate: &Fighter, context: &DivisionContext) -> f64 {
    let Some(gap) = rank_gap(subject, candidate) else {
        return NEUTRAL;
    };
    let max_gap = context.total_fighters.saturating_sub(1);

    if max_gap == 0 {
        return 1.0;
    }
    match gap {
        0 => 0.0,
        1 => 1.0,
        _ => {
            let decay = 0.1_f64.powf(gap as f64 / max_gap as f64);
            decay.max(FAIRNESS_FLOOR)
        }
    }
}

fn score_division_health(subject: &Fighter, candidate: &Fighter) -> f64 {
    match rank_gap(subject, candidate) {
        Some(gap) if gap <= 2 => 1.0,
        Some(gap) if gap <= 5 => 0.7,
        Some(gap) if gap <= 10 => 0.4,
        _ => 0.2,
    }
}

fn score_excitement(subject: &Fighter, candidate: &Fighter) -> f64 {
    let subject_finish = subject.finish_rate().unwrap_or(NEUTRAL);
    let candidate_finish = candidate.finish_rate().unwrap_or(NEUTRAL);

    let mut score = (subject_finish + candidate_finish) / 2.0 * 0.7;
    if subject_finish > 0.7 && candidate_finish > 0.7 {
        score += 0.2;
    }
    if subject.win_streak() >= 3 || candidate.win_streak() >= 3 {
        score += 0.1;
    }

    score.clamp(0.0, 1.0)
}

fn score_risk(subject: &Fighter, candidate: &Fighter, today: NaiveDate) -> f64 {
    let mut risk = NEUTRAL;

    let longest_layoff = subject.days_inactive(today).max(candidate.days_inactive(today));
    if longest_layoff > LONG_LAYOFF_DAYS {
        risk += 0.3;
    } else if longest_layoff > LAYOFF_DAYS {
        risk += 0.15;
    }

    if subject.is_injured || candidate.is_injured {
        risk += 0.2;
    }

    if rank_gap(subject, candidate).is_some_and(|gap| gap > MISMATCH_RANK_GAP) {
        risk += 0.3;
    }

    let champion_vs_unranked = (subject.is_champion
        && candidate.tier() == FighterTier::Unranked)
        || (candidate.is_champion && subject.tier() == FighterTier::Unranked);
    if champion_vs_unranked {
        risk += 0.2;
    }

    1.0 - risk.clamp(0.0, 1.0)
}

fn score_hype(subject: &Fighter, candidate: &Fighter) -> f64 {
    let popularity = |fighter: &Fighter| {
        if fighter.popularity.is_finite() {
            fighter.popularity.clamp(0.0, 100.0)
        } else {
            0.0
        }
    };
    (popularity(subject) + popularity(candidate)) / 2.0 / 100.0
}

fn score_activity(subject: &Fighter, candidate: &Fighter, today: NaiveDate) -> f64 {
    let readiness = |fighter: &Fighter| {
        (1.0 - fighter.days_inactive(today) as f64 / ACTIVITY_HORIZON_DAYS).max(0.0)
    };
    let subject_readiness = readiness(subject);
    let candidate_readiness = readiness(candidate);

    let average = (subject_readiness + candidate_readiness) / 2.0;
    let compatibility = 1.0 - (subject_readiness - candidate_readiness).abs();

    (average * 0.7 + compatibility * 0.3).clamp(0.0, 1.0)
}
