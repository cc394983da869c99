use crate::render;
use chrono::NaiveDate;
use clap::Args;
use fightmatch::error::AppError;
use fightmatch::matchmaking::{Fighter, FighterId, RecentMatchups, Recommender};
use fightmatch::roster::Roster;

use crate::infra::{find_subject, parse_date};

const DEMO_SUBJECT: &str = "fighter-1";
const DEMO_WEIGHT_CLASS: (&str, &str) = ("lightweight", "Lightweight");

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Fighter id from the built-in roster
    #[arg(long, default_value = DEMO_SUBJECT)]
    pub(crate) subject: String,
    /// Policy for the recommendation pass (defaults to the registry default)
    #[arg(long)]
    pub(crate) policy: Option<String>,
    /// Evaluation date (YYYY-MM-DD). Defaults to the roster's reference date.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

impl Default for DemoArgs {
    fn default() -> Self {
        Self {
            subject: DEMO_SUBJECT.to_string(),
            policy: None,
            today: None,
        }
    }
}

pub(crate) fn run_demo(args: DemoArgs, recommender: &Recommender) -> Result<(), AppError> {
    let roster = lightweight_roster();
    let today = args.today.unwrap_or_else(reference_date);
    let subject = find_subject(&roster, &args.subject)?;
    let context = roster.division_context(DEMO_WEIGHT_CLASS.0, DEMO_WEIGHT_CLASS.1);
    let opponents = roster.opponents_of(subject.id.as_str());
    let policy_name = args
        .policy
        .unwrap_or_else(|| recommender.registry().default_policy().name.clone());

    println!("Matchmaking demo");
    println!(
        "Roster: {} ({} fighters) | evaluated {}",
        context.weight_class_name, context.total_fighters, today
    );
    println!("Recent matchups on file: fighter-1 vs fighter-2, fighter-3 vs fighter-4");

    println!("\n== Policy-driven recommendations ==");
    let result = recommender.recommend(
        &subject,
        &opponents,
        &context,
        &policy_name,
        &recent_matchups(),
        today,
    );
    render::recommendations(&result, false)?;

    println!("\n== Screening pass ==");
    let screening = recommender.screen(&subject, &opponents, &context, today);
    render::screening(&screening, false)?;

    println!("\n== Available policies ==");
    render::policies(recommender.registry(), false)
}

/// Evaluation date the built-in roster is current as of.
pub(crate) fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default()
}

pub(crate) fn recent_matchups() -> RecentMatchups {
    [("fighter-1", "fighter-2"), ("fighter-3", "fighter-4")]
        .into_iter()
        .collect()
}

/// Lightweight division snapshot used when no roster file is supplied.
pub(crate) fn lightweight_roster() -> Roster {
    let entries: [(&str, &str, u32, (i32, u32, u32), f64, bool, bool); 12] = [
        ("fighter-1", "Islam Makhachev", 1, (2023, 10, 21), 85.0, true, false),
        ("fighter-2", "Charles Oliveira", 2, (2023, 6, 10), 80.0, false, false),
        ("fighter-3", "Justin Gaethje", 3, (2023, 7, 29), 75.0, false, false),
        ("fighter-4", "Dustin Poirier", 4, (2023, 7, 29), 82.0, false, false),
        ("fighter-5", "Beneil Dariush", 5, (2023, 5, 6), 60.0, false, false),
        ("fighter-6", "Arman Tsarukyan", 6, (2023, 12, 2), 65.0, false, false),
        ("fighter-7", "Mateusz Gamrot", 7, (2023, 9, 16), 55.0, false, false),
        ("fighter-8", "Rafael Fiziev", 8, (2023, 3, 18), 70.0, false, true),
        ("fighter-9", "Dan Hooker", 9, (2022, 11, 12), 68.0, false, false),
        ("fighter-10", "Jalin Turner", 10, (2023, 9, 16), 58.0, false, false),
        ("fighter-11", "Bobby Green", 11, (2023, 12, 16), 50.0, false, false),
        ("fighter-12", "Grant Dawson", 12, (2023, 10, 7), 45.0, false, false),
    ];

    Roster::new(
        entries
            .into_iter()
            .map(
                |(id, name, rank, (year, month, day), popularity, is_champion, is_injured)| {
                    Fighter {
                        id: FighterId::new(id),
                        name: name.to_string(),
                        rank: Some(rank),
                        last_fight_date: NaiveDate::from_ymd_opt(year, month, day),
                        popularity,
                        is_champion,
                        is_injured,
                        metrics: None,
                    }
                },
            )
            .collect(),
    )
}
