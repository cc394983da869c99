use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::constraints::{check_constraints, has_blocking_violations, ConstraintViolation};
use super::domain::{DivisionContext, Fighter, FighterTier, RecentMatchups, NEVER_FOUGHT_DAYS};
use super::policy::{Policy, PolicyRegistry, EQUAL_WEIGHTING};
use super::scoring::{evaluate_matchup, ScoreBreakdown};

/// Eligible entries kept by the policy-driven path.
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 5;
/// Eligible entries kept by the screening path.
pub const DEFAULT_MAX_SCREENED: usize = 10;
/// Inactivity beyond which the screening path drops a candidate outright.
pub const DEFAULT_SCREENING_INACTIVITY_DAYS: i64 = 400;

/// One scored opponent, eligible or blocked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchupCandidate {
    pub fighter: Fighter,
    pub tier: FighterTier,
    pub total_score: f64,
    pub breakdown: ScoreBreakdown,
    pub violations: Vec<ConstraintViolation>,
    pub why: Vec<String>,
    pub risks: Vec<String>,
    pub summary: String,
}

/// Ranked, explained and partially blocked outcome of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub subject: Fighter,
    pub candidates: Vec<MatchupCandidate>,
    pub blocked: Vec<MatchupCandidate>,
    pub policy: Policy,
    pub context: DivisionContext,
    pub assumptions: Vec<String>,
}

/// Score every candidate under `policy` and split them into eligible and blocked lists.
///
/// Both lists are sorted by descending total; ties keep pool order.
pub fn recommend(
    subject: &Fighter,
    pool: &[Fighter],
    context: &DivisionContext,
    policy: &Policy,
    recent_matchups: &RecentMatchups,
    today: NaiveDate,
) -> RecommendationResult {
    let mut candidates = Vec::new();
    let mut blocked = Vec::new();

    for candidate in pool {
        let violations = check_constraints(subject, candidate, policy, recent_matchups, today);
        let score = evaluate_matchup(subject, candidate, context, policy, today);
        let summary = score.explanation.summary();

        let entry = MatchupCandidate {
            fighter: candidate.clone(),
            tier: candidate.tier(),
            total_score: score.total,
            breakdown: score.breakdown,
            violations,
            why: score.explanation.why,
            risks: score.explanation.risks,
            summary,
        };

        if has_blocking_violations(&entry.violations) {
            blocked.push(entry);
        } else {
            candidates.push(entry);
        }
    }

    sort_by_score(&mut candidates);
    sort_by_score(&mut blocked);

    debug!(
        subject = %subject.id,
        policy = %policy.name,
        eligible = candidates.len(),
        blocked = blocked.len(),
        "matchup recommendations evaluated"
    );

    RecommendationResult {
        subject: subject.clone(),
        candidates,
        blocked,
        policy: policy.clone(),
        context: context.clone(),
        assumptions: policy_assumptions(policy, context),
    }
}

fn sort_by_score(entries: &mut [MatchupCandidate]) {
    entries.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
}

fn weights_line(policy: &Policy) -> String {
    let weights = &policy.weights;
    format!(
        "Policy '{}' weights fairness {:.2}, division health {:.2}, risk {:.2}, hype {:.2}, activity {:.2}.",
        policy.name,
        weights.fairness,
        weights.division_health,
        weights.risk,
        weights.hype,
        weights.activity
    )
}

fn policy_assumptions(policy: &Policy, context: &DivisionContext) -> Vec<String> {
    let mut assumptions = vec![weights_line(policy)];

    assumptions.push(match policy.constraints.max_days_inactive {
        Some(days) => format!("Fighters inactive over {days} days are flagged, not blocked."),
        None => "No inactivity limit applied.".to_string(),
    });
    assumptions.push(match policy.constraints.max_rank_gap {
        Some(gap) => format!("Blocked: rank gaps over {gap} places."),
        None => "No rank gap limit applied.".to_string(),
    });
    assumptions.push(format!(
        "Recommendations are for the {} weight class only.",
        context.weight_class_name
    ));
    assumptions.push(format!(
        "Missing ranks and metrics are scored as neutral; fighters without a recorded fight count as {NEVER_FOUGHT_DAYS} days inactive."
    ));

    assumptions
}

/// List-length caps and screening threshold, exposed as configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationLimits {
    pub max_recommendations: usize,
    pub max_screened: usize,
    pub screening_inactivity_days: i64,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
            max_screened: DEFAULT_MAX_SCREENED,
            screening_inactivity_days: DEFAULT_SCREENING_INACTIVITY_DAYS,
        }
    }
}

/// Opponent removed by the screening path, with the reason shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockedOpponent {
    pub opponent: Fighter,
    pub reason: String,
    pub days_inactive: Option<i64>,
}

/// Outcome of the screening path: capped ranking plus screened-out opponents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningResult {
    pub subject: Fighter,
    pub context: DivisionContext,
    pub ranked: Vec<MatchupCandidate>,
    pub blocked: Vec<BlockedOpponent>,
    pub assumptions: Vec<String>,
}

/// Stateless front end combining a policy registry with list limits.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    registry: PolicyRegistry,
    limits: RecommendationLimits,
}

impl Recommender {
    pub fn new(registry: PolicyRegistry, limits: RecommendationLimits) -> Self {
        Self { registry, limits }
    }

    pub fn registry(&self) -> &PolicyRegistry {
        &self.registry
    }

    pub fn limits(&self) -> RecommendationLimits {
        self.limits
    }

    /// Policy-driven path: full constraint set, eligible list capped at `max_recommendations`.
    pub fn recommend(
        &self,
        subject: &Fighter,
        pool: &[Fighter],
        context: &DivisionContext,
        policy_name: &str,
        recent_matchups: &RecentMatchups,
        today: NaiveDate,
    ) -> RecommendationResult {
        let policy = self.registry.get(policy_name);
        let mut result = recommend(subject, pool, context, policy, recent_matchups, today);
        result.candidates.truncate(self.limits.max_recommendations);
        result
    }

    /// Screening path: drop long-inactive opponents, rank the rest with equal weighting.
    pub fn screen(
        &self,
        subject: &Fighter,
        pool: &[Fighter],
        context: &DivisionContext,
        today: NaiveDate,
    ) -> ScreeningResult {
        let limit = self.limits.screening_inactivity_days;
        let mut blocked = Vec::new();
        let mut active = Vec::new();

        for candidate in pool {
            if candidate.id == subject.id {
                continue;
            }
            let days = candidate.days_inactive(today);
            if days > limit {
                blocked.push(BlockedOpponent {
                    opponent: candidate.clone(),
                    reason: format!("Inactive {days} days (over {limit}-day policy limit)"),
                    days_inactive: Some(days),
                });
            } else {
                active.push(candidate.clone());
            }
        }

        let policy = self.registry.get(EQUAL_WEIGHTING);
        let evaluation = recommend(
            subject,
            &active,
            context,
            policy,
            &RecentMatchups::new(),
            today,
        );

        for entry in evaluation.blocked {
            let reason = entry
                .violations
                .iter()
                .find(|violation| violation.is_blocking())
                .map(|violation| violation.reason.clone())
                .unwrap_or_else(|| "Blocked by policy".to_string());
            blocked.push(BlockedOpponent {
                opponent: entry.fighter,
                reason,
                days_inactive: None,
            });
        }

        let mut ranked = evaluation.candidates;
        ranked.truncate(self.limits.max_screened);

        debug!(
            subject = %subject.id,
            ranked = ranked.len(),
            blocked = blocked.len(),
            inactivity_limit = limit,
            "screening decision evaluated"
        );

        let weighting = if policy.name == EQUAL_WEIGHTING {
            format!(
                "Rank proximity, activity, excitement, and risk are weighted equally ('{}' policy).",
                policy.name
            )
        } else {
            weights_line(policy)
        };
        let assumptions = vec![
            weighting,
            format!("Blocked: opponents inactive over {limit} days."),
            format!(
                "Recommendations are for the {} weight class only.",
                context.weight_class_name
            ),
        ];

        ScreeningResult {
            subject: subject.clone(),
            context: context.clone(),
            ranked,
            blocked,
            assumptions,
        }
    }
}
