//! Matchup evaluation engine: constraint checks, multi-component scoring, policy weighting,
//! explanations, and the recommendation paths that tie them together.
//!
//! Everything in this module is a pure function of its inputs. Records are resolved by the
//! caller beforehand and the evaluation date is passed in explicitly.

pub mod constraints;
pub mod domain;
pub mod explain;
pub mod policy;
pub mod recommend;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use constraints::{
    check_constraints, has_blocking_violations, ConstraintKind, ConstraintViolation, Severity,
};
pub use domain::{
    DivisionContext, Fighter, FighterId, FighterMetrics, FighterTier, RecentMatchups,
    NEVER_FOUGHT_DAYS,
};
pub use explain::Explanation;
pub use policy::{
    get_policy, list_policy_names, ConstraintConfig, Policy, PolicyError, PolicyRegistry,
    PolicyWeights, ScoringModel,
};
pub use recommend::{
    recommend, BlockedOpponent, MatchupCandidate, RecommendationLimits, RecommendationResult,
    Recommender, ScreeningResult, DEFAULT_MAX_RECOMMENDATIONS, DEFAULT_MAX_SCREENED,
    DEFAULT_SCREENING_INACTIVITY_DAYS,
};
pub use scoring::{evaluate_matchup, score_matchup, total_score, MatchupScore, ScoreBreakdown};
