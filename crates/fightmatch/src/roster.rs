//! CSV roster import so the command line can feed the engine without a database.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use crate::matchmaking::{DivisionContext, Fighter, FighterId, FighterMetrics};

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: '{value}' is not a YYYY-MM-DD date")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: '{value}' is not a yes/no flag")]
    InvalidFlag { row: usize, value: String },
    #[error("row {row}: {column} '{value}' is not a valid number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Fighters of one division in the order the file lists them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    fighters: Vec<Fighter>,
}

impl Roster {
    pub fn new(fighters: Vec<Fighter>) -> Self {
        Self { fighters }
    }

    pub fn fighters(&self) -> &[Fighter] {
        &self.fighters
    }

    pub fn find(&self, id: &str) -> Option<&Fighter> {
        self.fighters.iter().find(|fighter| fighter.id.as_str() == id)
    }

    /// Everyone except `id`, in roster order.
    pub fn opponents_of(&self, id: &str) -> Vec<Fighter> {
        self.fighters
            .iter()
            .filter(|fighter| fighter.id.as_str() != id)
            .cloned()
            .collect()
    }

    pub fn division_context(
        &self,
        weight_class_id: &str,
        weight_class_name: &str,
    ) -> DivisionContext {
        DivisionContext {
            weight_class_id: weight_class_id.to_string(),
            weight_class_name: weight_class_name.to_string(),
            total_fighters: self.fighters.len() as u32,
            champion_id: self
                .fighters
                .iter()
                .find(|fighter| fighter.is_champion)
                .map(|fighter| fighter.id.clone()),
        }
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Roster, RosterError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Roster, RosterError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut fighters = Vec::new();

        for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
            let row = record?;
            // header is line 1
            fighters.push(row.into_fighter(index + 2)?);
        }

        Ok(Roster { fighters })
    }
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    id: String,
    name: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    rank: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    last_fight_date: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    popularity: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    champion: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    injured: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    wins: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    losses: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    draws: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    total_fights: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    win_streak: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    loss_streak: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    finish_rate: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    days_since_last_fight: Option<String>,
}

impl RosterRow {
    fn into_fighter(self, row: usize) -> Result<Fighter, RosterError> {
        let last_fight_date = self
            .last_fight_date
            .as_deref()
            .map(|value| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
                    RosterError::InvalidDate {
                        row,
                        value: value.to_string(),
                    }
                })
            })
            .transpose()?;

        let wins = parse_number(&self.wins, row, "wins")?;
        let losses = parse_number(&self.losses, row, "losses")?;
        let draws = parse_number(&self.draws, row, "draws")?;
        let total_fights = parse_number(&self.total_fights, row, "total_fights")?;
        let win_streak = parse_number(&self.win_streak, row, "win_streak")?;
        let loss_streak = parse_number(&self.loss_streak, row, "loss_streak")?;
        let finish_rate = parse_finite(&self.finish_rate, row, "finish_rate")?;
        let days_since_last_fight =
            parse_number(&self.days_since_last_fight, row, "days_since_last_fight")?;

        let has_record = wins.is_some()
            || losses.is_some()
            || draws.is_some()
            || total_fights.is_some()
            || win_streak.is_some()
            || loss_streak.is_some()
            || finish_rate.is_some()
            || days_since_last_fight.is_some();

        let metrics = has_record.then(|| {
            let wins = wins.unwrap_or(0);
            let losses = losses.unwrap_or(0);
            let draws = draws.unwrap_or(0);
            FighterMetrics {
                wins,
                losses,
                draws,
                total_fights: total_fights.unwrap_or(wins + losses + draws),
                win_streak: win_streak.unwrap_or(0),
                loss_streak: loss_streak.unwrap_or(0),
                finish_rate,
                days_since_last_fight,
            }
        });

        Ok(Fighter {
            rank: parse_number(&self.rank, row, "rank")?,
            popularity: parse_finite(&self.popularity, row, "popularity")?.unwrap_or(0.0),
            is_champion: parse_flag(self.champion.as_deref(), row)?,
            is_injured: parse_flag(self.injured.as_deref(), row)?,
            id: FighterId(self.id),
            name: self.name,
            last_fight_date,
            metrics,
        })
    }
}

fn parse_number<T: FromStr>(
    value: &Option<String>,
    row: usize,
    column: &'static str,
) -> Result<Option<T>, RosterError> {
    value
        .as_deref()
        .map(|raw| {
            raw.parse().map_err(|_| RosterError::InvalidNumber {
                row,
                column,
                value: raw.to_string(),
            })
        })
        .transpose()
}

fn parse_finite(
    value: &Option<String>,
    row: usize,
    column: &'static str,
) -> Result<Option<f64>, RosterError> {
    match parse_number::<f64>(value, row, column)? {
        Some(number) if !number.is_finite() => Err(RosterError::InvalidNumber {
            row,
            column,
            value: number.to_string(),
        }),
        parsed => Ok(parsed),
    }
}

fn parse_flag(value: Option<&str>, row: usize) -> Result<bool, RosterError> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        None | Some("false") | Some("no") | Some("n") | Some("0") => Ok(false),
        Some("true") | Some("yes") | Some("y") | Some("1") => Ok(true),
        Some(other) => Err(RosterError::InvalidFlag {
            row,
            value: other.to_string(),
        }),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
