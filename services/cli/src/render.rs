use fightmatch::error::AppError;
use fightmatch::matchmaking::{
    MatchupCandidate, PolicyRegistry, RecommendationResult, ScreeningResult,
};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn recommendations(result: &RecommendationResult, json: bool) -> Result<(), AppError> {
    if json {
        return print_json(result);
    }

    println!(
        "Opponents for {} ({}) under '{}'",
        result.subject.name,
        result.subject.tier().label(),
        result.policy.name
    );

    if result.candidates.is_empty() {
        println!("No eligible opponents");
    }
    for (position, candidate) in result.candidates.iter().enumerate() {
        print_candidate(position + 1, candidate);
    }

    if !result.blocked.is_empty() {
        println!("\nBlocked");
        for entry in &result.blocked {
            let reasons: Vec<&str> = entry
                .violations
                .iter()
                .filter(|violation| violation.is_blocking())
                .map(|violation| violation.reason.as_str())
                .collect();
            println!("- {}: {}", entry.fighter.name, reasons.join("; "));
        }
    }

    print_assumptions(&result.assumptions);
    Ok(())
}

pub(crate) fn screening(result: &ScreeningResult, json: bool) -> Result<(), AppError> {
    if json {
        return print_json(result);
    }

    println!(
        "Screened opponents for {} ({})",
        result.subject.name, result.context.weight_class_name
    );
    if result.ranked.is_empty() {
        println!("No opponents passed screening");
    }
    for (position, candidate) in result.ranked.iter().enumerate() {
        print_candidate(position + 1, candidate);
    }

    if !result.blocked.is_empty() {
        println!("\nScreened out");
        for entry in &result.blocked {
            println!("- {}: {}", entry.opponent.name, entry.reason);
        }
    }

    print_assumptions(&result.assumptions);
    Ok(())
}

pub(crate) fn policies(registry: &PolicyRegistry, json: bool) -> Result<(), AppError> {
    if json {
        return print_json(&registry.policies());
    }

    let default_name = &registry.default_policy().name;
    for policy in registry.policies() {
        let marker = if &policy.name == default_name {
            " (default)"
        } else {
            ""
        };
        let weights = &policy.weights;
        println!("{}{}: {}", policy.name, marker, policy.description);
        println!(
            "  weights fairness {:.2} | division {:.2} | risk {:.2} | hype {:.2} | activity {:.2}",
            weights.fairness, weights.division_health, weights.risk, weights.hype, weights.activity
        );
        let gap = policy
            .constraints
            .max_rank_gap
            .map(|gap| gap.to_string())
            .unwrap_or_else(|| "none".to_string());
        println!(
            "  max rank gap {} | rematches {} | title rule {} | injured blocked {}",
            gap,
            yes_no(policy.constraints.allow_recent_matchup),
            yes_no(policy.constraints.require_title_eligibility),
            yes_no(policy.constraints.block_injured)
        );
    }
    Ok(())
}

fn print_candidate(position: usize, candidate: &MatchupCandidate) {
    let breakdown = &candidate.breakdown;
    println!(
        "{position}. {} [{}] score {:.2}",
        candidate.fighter.name,
        candidate.tier.label(),
        candidate.total_score
    );
    println!(
        "   fairness {:.2} | division {:.2} | risk {:.2} | hype {:.2} | activity {:.2}",
        breakdown.fairness,
        breakdown.division_health,
        breakdown.risk,
        breakdown.hype,
        breakdown.activity
    );
    println!("   why: {}", candidate.summary);
    println!("   risks: {}", candidate.risks.join("; "));
    for warning in candidate
        .violations
        .iter()
        .filter(|violation| !violation.is_blocking())
    {
        println!("   warning: {}", warning.reason);
    }
}

fn print_assumptions(assumptions: &[String]) {
    println!("\nAssumptions");
    for line in assumptions {
        println!("- {line}");
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
