use chrono::{Local, NaiveDate};
use clap::Args;
use fightmatch::config::{AppConfig, EngineConfig};
use fightmatch::error::AppError;
use fightmatch::matchmaking::{DivisionContext, Fighter, PolicyRegistry, Recommender};
use fightmatch::roster::{Roster, RosterImporter};
use fightmatch::telemetry;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::demo;

/// Where the fighters come from and which division they belong to.
#[derive(Args, Debug, Clone)]
pub(crate) struct RosterArgs {
    /// Roster CSV export. Defaults to the built-in lightweight roster.
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Weight class display name
    #[arg(long, default_value = "Lightweight")]
    pub(crate) division: String,
    /// Weight class identifier
    #[arg(long, default_value = "lightweight")]
    pub(crate) weight_class_id: String,
    /// Evaluation date (YYYY-MM-DD). Defaults to today, or the demo date for the built-in roster.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

impl RosterArgs {
    pub(crate) fn division_context(&self, roster: &Roster) -> DivisionContext {
        roster.division_context(&self.weight_class_id, &self.division)
    }
}

pub(crate) fn bootstrap() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(environment = ?config.environment, "configuration loaded");
    Ok(config)
}

pub(crate) fn build_recommender(config: &EngineConfig) -> Result<Recommender, AppError> {
    let registry = match &config.policy_file {
        Some(path) => {
            let file = File::open(path)?;
            let registry = PolicyRegistry::from_json_reader(BufReader::new(file))?;
            debug!(
                path = %path.display(),
                policies = registry.policies().len(),
                "policy registry loaded"
            );
            registry
        }
        None => PolicyRegistry::standard(),
    };

    if !registry.contains(&config.default_policy) {
        warn!(
            policy = %config.default_policy,
            fallback = %registry.default_policy().name,
            "configured policy is not registered"
        );
    }

    Ok(Recommender::new(registry, config.limits))
}

pub(crate) fn load_roster(args: &RosterArgs) -> Result<(Roster, NaiveDate), AppError> {
    match &args.roster {
        Some(path) => {
            let roster = RosterImporter::from_path(path)?;
            let today = args.today.unwrap_or_else(|| Local::now().date_naive());
            Ok((roster, today))
        }
        None => Ok((
            demo::lightweight_roster(),
            args.today.unwrap_or_else(demo::reference_date),
        )),
    }
}

pub(crate) fn find_subject(roster: &Roster, id: &str) -> Result<Fighter, AppError> {
    roster
        .find(id)
        .cloned()
        .ok_or_else(|| AppError::Lookup(format!("fighter '{id}' is not on the roster")))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_matchup(raw: &str) -> Result<(String, String), String> {
    match raw.split_once(':') {
        Some((a, b)) if !a.trim().is_empty() && !b.trim().is_empty() => {
            Ok((a.trim().to_string(), b.trim().to_string()))
        }
        _ => Err(format!("expected a fighter pair as 'a:b', got '{raw}'")),
    }
}
