use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Serialize};

pub const SPORTING_MERIT: &str = "Sporting Merit";
pub const BUSINESS_FIRST: &str = "Business First";
pub const BALANCED: &str = "Balanced";
pub const EQUAL_WEIGHTING: &str = "Equal Weighting";

/// Named, immutable matchmaking configuration: score weights plus eligibility rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Policy {
    pub name: String,
    pub description: String,
    pub weights: PolicyWeights,
    pub constraints: ConstraintConfig,
    #[serde(default)]
    pub model: ScoringModel,
}

impl Policy {
    fn validate(&self) -> Result<(), PolicyError> {
        let weights = [
            ("fairness", self.weights.fairness),
            ("division_health", self.weights.division_health),
            ("risk", self.weights.risk),
            ("hype", self.weights.hype),
            ("activity", self.weights.activity),
        ];
        for (component, weight) in weights {
            if !weight.is_finite() || weight < 0.0 {
                return Err(PolicyError::InvalidWeight {
                    policy: self.name.clone(),
                    component,
                    weight,
                });
            }
        }
        Ok(())
    }
}

/// Relative importance of each score component. Not required to sum to one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyWeights {
    pub fairness: f64,
    pub division_health: f64,
    pub risk: f64,
    pub hype: f64,
    pub activity: f64,
}

impl PolicyWeights {
    pub fn sum(&self) -> f64 {
        self.fairness + self.division_health + self.risk + self.hype + self.activity
    }
}

/// Eligibility rules consulted by the constraint checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintConfig {
    pub allow_recent_matchup: bool,
    /// `None` means no limit.
    pub max_rank_gap: Option<u32>,
    pub require_title_eligibility: bool,
    pub block_injured: bool,
    /// `None` means no limit. Exceeding it only warns.
    pub max_days_inactive: Option<i64>,
}

/// Which signal fills the division slot and how totals are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringModel {
    /// Rank-clarity division health, unrounded weighted totals.
    #[default]
    Divisional,
    /// Finish-rate excitement in the division slot, totals rounded to two places.
    Profile,
}

/// Explicit table of policies with a fallback entry for unknown names.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyRegistry {
    policies: Vec<Policy>,
    default_index: usize,
}

impl PolicyRegistry {
    pub fn new(policies: Vec<Policy>, default_name: &str) -> Result<Self, PolicyError> {
        if policies.is_empty() {
            return Err(PolicyError::Empty);
        }

        let mut seen = HashSet::new();
        for policy in &policies {
            policy.validate()?;
            if !seen.insert(policy.name.as_str()) {
                return Err(PolicyError::DuplicateName(policy.name.clone()));
            }
        }

        let default_index = policies
            .iter()
            .position(|policy| policy.name == default_name)
            .ok_or_else(|| PolicyError::MissingDefault(default_name.to_string()))?;

        Ok(Self {
            policies,
            default_index,
        })
    }

    /// The built-in presets with `Balanced` as the fallback.
    pub fn standard() -> Self {
        Self {
            policies: vec![
                sporting_merit(),
                business_first(),
                balanced(),
                equal_weighting(),
            ],
            default_index: 2,
        }
    }

    /// Load a registry from a JSON document `{ "default": "...", "policies": [...] }`.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, PolicyError> {
        let file: RegistryFile = serde_json::from_reader(reader)?;
        Self::new(file.policies, &file.default)
    }

    /// Exact, case-sensitive lookup; unknown names resolve to the default policy.
    pub fn get(&self, name: &str) -> &Policy {
        self.policies
            .iter()
            .find(|policy| policy.name == name)
            .unwrap_or_else(|| self.default_policy())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.policies.iter().any(|policy| policy.name == name)
    }

    pub fn default_policy(&self) -> &Policy {
        &self.policies[self.default_index]
    }

    pub fn names(&self) -> Vec<&str> {
        self.policies
            .iter()
            .map(|policy| policy.name.as_str())
            .collect()
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }
}

impl Default for PolicyRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Deserialize)]
struct RegistryFile {
    default: String,
    policies: Vec<Policy>,
}

/// Resolve `name` against the built-in presets.
pub fn get_policy(name: &str) -> Policy {
    PolicyRegistry::standard().get(name).clone()
}

pub fn list_policy_names() -> Vec<String> {
    PolicyRegistry::standard()
        .names()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Errors raised while building a custom registry.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("policy registry must contain at least one policy")]
    Empty,
    #[error("policy '{0}' is defined more than once")]
    DuplicateName(String),
    #[error("default policy '{0}' is not part of the registry")]
    MissingDefault(String),
    #[error("policy '{policy}' has invalid {component} weight {weight}")]
    InvalidWeight {
        policy: String,
        component: &'static str,
        weight: f64,
    },
    #[error("policy registry is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

fn sporting_merit() -> Policy {
    Policy {
        name: SPORTING_MERIT.to_string(),
        description: "Prioritize competitive fairness and division clarity".to_string(),
        weights: PolicyWeights {
            fairness: 0.4,
            division_health: 0.3,
            risk: 0.2,
            hype: 0.05,
            activity: 0.05,
        },
        constraints: ConstraintConfig {
            allow_recent_matchup: false,
            max_rank_gap: Some(5),
            require_title_eligibility: true,
            block_injured: true,
            max_days_inactive: Some(365),
        },
        model: ScoringModel::Divisional,
    }
}

fn business_first() -> Policy {
    Policy {
        name: BUSINESS_FIRST.to_string(),
        description: "Maximize hype and revenue potential".to_string(),
        weights: PolicyWeights {
            fairness: 0.15,
            division_health: 0.1,
            risk: 0.15,
            hype: 0.5,
            activity: 0.1,
        },
        constraints: ConstraintConfig {
            // rematches are fine when they draw
            allow_recent_matchup: true,
            max_rank_gap: Some(10),
            require_title_eligibility: false,
            block_injured: true,
            max_days_inactive: Some(540),
        },
        model: ScoringModel::Divisional,
    }
}

fn balanced() -> Policy {
    Policy {
        name: BALANCED.to_string(),
        description: "Balance competitive integrity with business considerations".to_string(),
        weights: PolicyWeights {
            fairness: 0.25,
            division_health: 0.2,
            risk: 0.2,
            hype: 0.2,
            activity: 0.15,
        },
        constraints: ConstraintConfig {
            allow_recent_matchup: false,
            max_rank_gap: Some(7),
            require_title_eligibility: true,
            block_injured: true,
            max_days_inactive: Some(450),
        },
        model: ScoringModel::Divisional,
    }
}

fn equal_weighting() -> Policy {
    Policy {
        name: EQUAL_WEIGHTING.to_string(),
        description: "Rank proximity, activity, excitement, and risk weighted equally".to_string(),
        weights: PolicyWeights {
            fairness: 1.0,
            division_health: 1.0,
            risk: 1.0,
            hype: 0.0,
            activity: 1.0,
        },
        constraints: ConstraintConfig {
            allow_recent_matchup: true,
            max_rank_gap: None,
            require_title_eligibility: false,
            block_injured: false,
            max_days_inactive: None,
        },
        model: ScoringModel::Profile,
    }
}
