use crate::demo::{run_demo, DemoArgs};
use crate::infra::{self, RosterArgs};
use crate::render;
use clap::{Args, Parser, Subcommand};
use fightmatch::error::AppError;
use fightmatch::matchmaking::RecentMatchups;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "fightmatch",
    about = "Rank and explain opponents for a fighter under named matchmaking policies",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank opponents under a matchmaking policy with full constraint checks
    Recommend(RecommendArgs),
    /// Screen out long-inactive opponents and rank the rest with equal weighting
    Screen(ScreenArgs),
    /// List the configured policies
    Policies(PoliciesArgs),
    /// Walk through both recommendation paths on the built-in lightweight roster (default command)
    Demo(DemoArgs),
}

#[derive(Args, Debug)]
pub(crate) struct RecommendArgs {
    /// Fighter id to find opponents for
    #[arg(long)]
    pub(crate) subject: String,
    /// Policy name (defaults to the configured policy; unknown names fall back to it)
    #[arg(long)]
    pub(crate) policy: Option<String>,
    #[command(flatten)]
    pub(crate) roster: RosterArgs,
    /// Pair that fought recently, as `a:b`. Repeatable.
    #[arg(long = "recent", value_parser = infra::parse_matchup)]
    pub(crate) recent: Vec<(String, String)>,
    /// Print JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// Fighter id to find opponents for
    #[arg(long)]
    pub(crate) subject: String,
    #[command(flatten)]
    pub(crate) roster: RosterArgs,
    /// Print JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct PoliciesArgs {
    /// Print JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = infra::bootstrap()?;
    let recommender = infra::build_recommender(&config.engine)?;

    match cli
        .command
        .unwrap_or_else(|| Command::Demo(DemoArgs::default()))
    {
        Command::Recommend(args) => {
            let (roster, today) = infra::load_roster(&args.roster)?;
            let subject = infra::find_subject(&roster, &args.subject)?;
            let policy_name = args
                .policy
                .unwrap_or_else(|| config.engine.default_policy.clone());
            if !recommender.registry().contains(&policy_name) {
                warn!(
                    policy = %policy_name,
                    fallback = %recommender.registry().default_policy().name,
                    "unknown policy requested, using default"
                );
            }
            let recent: RecentMatchups = args.recent.into_iter().collect();
            let context = args.roster.division_context(&roster);
            let result = recommender.recommend(
                &subject,
                &roster.opponents_of(subject.id.as_str()),
                &context,
                &policy_name,
                &recent,
                today,
            );
            info!(
                subject = %subject.id,
                eligible = result.candidates.len(),
                blocked = result.blocked.len(),
                "recommendation complete"
            );
            render::recommendations(&result, args.json)
        }
        Command::Screen(args) => {
            let (roster, today) = infra::load_roster(&args.roster)?;
            let subject = infra::find_subject(&roster, &args.subject)?;
            let context = args.roster.division_context(&roster);
            let result = recommender.screen(
                &subject,
                &roster.opponents_of(subject.id.as_str()),
                &context,
                today,
            );
            info!(
                subject = %subject.id,
                ranked = result.ranked.len(),
                blocked = result.blocked.len(),
                "screening complete"
            );
            render::screening(&result, args.json)
        }
        Command::Policies(args) => render::policies(recommender.registry(), args.json),
        Command::Demo(args) => run_demo(args, &recommender),
    }
}
