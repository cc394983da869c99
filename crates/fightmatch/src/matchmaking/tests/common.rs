use chrono::{Duration, NaiveDate};

use crate::matchmaking::domain::{
    DivisionContext, Fighter, FighterId, FighterMetrics, RecentMatchups,
};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date")
}

pub(super) fn days_ago(days: i64) -> Option<NaiveDate> {
    Some(today() - Duration::days(days))
}

pub(super) fn fighter(id: &str, rank: u32) -> Fighter {
    Fighter {
        id: FighterId::new(id),
        name: format!("Fighter {id}"),
        rank: Some(rank),
        last_fight_date: days_ago(90),
        popularity: 50.0,
        is_champion: false,
        is_injured: false,
        metrics: None,
    }
}

pub(super) fn champion(id: &str) -> Fighter {
    Fighter {
        is_champion: true,
        ..fighter(id, 1)
    }
}

pub(super) fn with_metrics(mut fighter: Fighter, finish_rate: f64, win_streak: u32) -> Fighter {
    fighter.metrics = Some(FighterMetrics {
        wins: 15,
        losses: 5,
        draws: 0,
        total_fights: 20,
        win_streak,
        loss_streak: 0,
        finish_rate: Some(finish_rate),
        days_since_last_fight: None,
    });
    fighter
}

pub(super) fn division() -> DivisionContext {
    DivisionContext {
        weight_class_id: "lightweight".to_string(),
        weight_class_name: "Lightweight".to_string(),
        total_fighters: 15,
        champion_id: Some(FighterId::new("fighter-1")),
    }
}

pub(super) fn no_history() -> RecentMatchups {
    RecentMatchups::new()
}

pub(super) fn history(pairs: &[(&str, &str)]) -> RecentMatchups {
    pairs.iter().map(|(a, b)| (*a, *b)).collect()
}
