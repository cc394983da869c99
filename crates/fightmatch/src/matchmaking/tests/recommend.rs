use super::common::*;
use crate::matchmaking::constraints::ConstraintKind;
use crate::matchmaking::domain::{Fighter, FighterTier};
use crate::matchmaking::policy::{
    get_policy, PolicyRegistry, BALANCED, BUSINESS_FIRST, SPORTING_MERIT,
};
use crate::matchmaking::recommend::{recommend, RecommendationLimits, Recommender};

fn title_holder() -> Fighter {
    let mut champ = champion("fighter-1");
    champ.last_fight_date = days_ago(45);
    champ.popularity = 85.0;
    champ
}

fn full_division() -> Vec<Fighter> {
    let mut fighters = vec![title_holder()];
    fighters.extend((2..=15).map(|rank| fighter(&format!("fighter-{rank}"), rank)));
    fighters
}

#[test]
fn champion_against_number_two_under_balanced_is_a_strong_recommendation() {
    let subject = title_holder();
    let mut challenger = fighter("fighter-2", 2);
    challenger.last_fight_date = days_ago(30);
    challenger.popularity = 80.0;

    let result = recommend(
        &subject,
        std::slice::from_ref(&challenger),
        &division(),
        &get_policy(BALANCED),
        &no_history(),
        today(),
    );

    assert!(result.blocked.is_empty());
    let top = &result.candidates[0];
    assert!(top.violations.iter().all(|violation| !violation.is_blocking()));
    assert!(top.breakdown.fairness > 0.8);
    assert!(top.total_score > 0.5 && top.total_score <= 1.0);
    assert!(!top.why.is_empty());
    assert_eq!(top.tier, FighterTier::Contender);
}

#[test]
fn distant_candidate_under_sporting_merit_is_blocked_by_rank_gap() {
    let subject = title_holder();
    let distant = fighter("fighter-14", 14);

    let result = recommend(
        &subject,
        std::slice::from_ref(&distant),
        &division(),
        &get_policy(SPORTING_MERIT),
        &no_history(),
        today(),
    );

    assert!(result.candidates.is_empty());
    assert_eq!(result.blocked.len(), 1);
    let gap_violations: Vec<_> = result.blocked[0]
        .violations
        .iter()
        .filter(|violation| violation.kind == ConstraintKind::RankGapExceeded)
        .collect();
    assert_eq!(gap_violations.len(), 1);
    assert!(gap_violations[0].is_blocking());
}

#[test]
fn lists_are_sorted_and_include_every_candidate() {
    let subject = title_holder();
    let pool = full_division();

    let result = recommend(
        &subject,
        &pool,
        &division(),
        &get_policy(BALANCED),
        &no_history(),
        today(),
    );

    assert_eq!(result.candidates.len() + result.blocked.len(), pool.len());
    for list in [&result.candidates, &result.blocked] {
        assert!(list
            .windows(2)
            .all(|pair| pair[0].total_score >= pair[1].total_score));
    }
    assert!(result
        .blocked
        .iter()
        .any(|entry| entry.fighter.id == subject.id));
    assert!(result
        .assumptions
        .iter()
        .any(|line| line.contains("Lightweight")));
}

#[test]
fn recent_opponent_is_blocked_unless_policy_allows_rematches() {
    let subject = title_holder();
    let pool = vec![fighter("fighter-2", 2), fighter("fighter-3", 3)];
    let recent = history(&[("fighter-2", "fighter-1")]);

    let strict = recommend(
        &subject,
        &pool,
        &division(),
        &get_policy(BALANCED),
        &recent,
        today(),
    );
    let lenient = recommend(
        &subject,
        &pool,
        &division(),
        &get_policy(BUSINESS_FIRST),
        &recent,
        today(),
    );

    assert_eq!(strict.blocked.len(), 1);
    assert_eq!(strict.blocked[0].fighter.id.as_str(), "fighter-2");
    assert!(lenient.blocked.is_empty());
}

#[test]
fn recommender_caps_eligible_list_and_falls_back_on_unknown_policy() {
    let recommender = Recommender::default();
    let subject = fighter("fighter-8", 8);

    let result = recommender.recommend(
        &subject,
        &full_division(),
        &division(),
        "No Such Policy",
        &no_history(),
        today(),
    );

    assert_eq!(result.policy.name, BALANCED);
    assert_eq!(result.candidates.len(), 5);
}

#[test]
fn screening_blocks_long_inactive_opponents_with_day_count() {
    let recommender = Recommender::default();
    let subject = fighter("fighter-3", 3);
    let mut idle = fighter("fighter-4", 4);
    idle.last_fight_date = days_ago(420);
    let mut never = fighter("fighter-5", 5);
    never.last_fight_date = None;
    let pool = vec![subject.clone(), idle, never, fighter("fighter-6", 6)];

    let result = recommender.screen(&subject, &pool, &division(), today());

    assert_eq!(result.ranked.len(), 1);
    assert_eq!(result.ranked[0].fighter.id.as_str(), "fighter-6");
    assert_eq!(result.blocked.len(), 2);
    assert_eq!(
        result.blocked[0].reason,
        "Inactive 420 days (over 400-day policy limit)"
    );
    assert_eq!(result.blocked[0].days_inactive, Some(420));
    assert_eq!(result.blocked[1].days_inactive, Some(9999));
    assert!(result
        .assumptions
        .iter()
        .any(|line| line.contains("400 days")));
}

#[test]
fn screening_keeps_injured_opponents_and_caps_at_ten() {
    let recommender = Recommender::default();
    let subject = title_holder();
    let mut pool = full_division();
    pool[5].is_injured = true;

    let result = recommender.screen(&subject, &pool, &division(), today());

    assert_eq!(result.ranked.len(), 10);
    assert!(result.blocked.is_empty());
    assert!(result
        .ranked
        .windows(2)
        .all(|pair| pair[0].total_score >= pair[1].total_score));
}

#[test]
fn screening_threshold_comes_from_limits() {
    let recommender = Recommender::new(
        PolicyRegistry::standard(),
        RecommendationLimits {
            screening_inactivity_days: 60,
            ..RecommendationLimits::default()
        },
    );
    let subject = fighter("fighter-2", 2);

    let result = recommender.screen(
        &subject,
        &[fighter("fighter-3", 3)],
        &division(),
        today(),
    );

    assert!(result.ranked.is_empty());
    assert_eq!(
        result.blocked[0].reason,
        "Inactive 90 days (over 60-day policy limit)"
    );
}

#[test]
fn equal_totals_keep_pool_order_in_both_lists() {
    let subject = fighter("fighter-5", 5);
    let above = fighter("fighter-6", 6);
    let below = fighter("fighter-4", 4);
    let mut injured_above = fighter("fighter-16", 6);
    let mut injured_below = fighter("fighter-14", 4);
    injured_above.is_injured = true;
    injured_below.is_injured = true;
    let pool = vec![above, below, injured_above, injured_below];

    let result = recommend(
        &subject,
        &pool,
        &division(),
        &get_policy(BALANCED),
        &no_history(),
        today(),
    );

    let eligible: Vec<&str> = result
        .candidates
        .iter()
        .map(|entry| entry.fighter.id.as_str())
        .collect();
    let blocked: Vec<&str> = result
        .blocked
        .iter()
        .map(|entry| entry.fighter.id.as_str())
        .collect();
    assert_eq!(result.candidates[0].total_score, result.candidates[1].total_score);
    assert_eq!(eligible, vec!["fighter-6", "fighter-4"]);
    assert_eq!(blocked, vec!["fighter-16", "fighter-14"]);
}

#[test]
fn screening_never_reports_an_inactive_subject_as_its_own_opponent() {
    let recommender = Recommender::default();
    let mut subject = fighter("fighter-3", 3);
    subject.last_fight_date = days_ago(500);
    let pool = vec![subject.clone(), fighter("fighter-4", 4)];

    let result = recommender.screen(&subject, &pool, &division(), today());

    assert!(result
        .blocked
        .iter()
        .all(|entry| entry.opponent.id != subject.id));
    assert!(result
        .ranked
        .iter()
        .all(|entry| entry.fighter.id != subject.id));
    assert_eq!(result.ranked.len(), 1);
}

#[test]
fn screening_describes_the_policy_it_actually_used() {
    let registry = PolicyRegistry::new(vec![get_policy(SPORTING_MERIT)], SPORTING_MERIT)
        .expect("registry builds");
    let recommender = Recommender::new(registry, RecommendationLimits::default());
    let subject = fighter("fighter-3", 3);

    let result = recommender.screen(&subject, &[fighter("fighter-4", 4)], &division(), today());

    assert!(result.assumptions[0].starts_with("Policy 'Sporting Merit' weights"));
    assert!(!result
        .assumptions
        .iter()
        .any(|line| line.contains("weighted equally")));

    let standard = Recommender::default().screen(
        &subject,
        &[fighter("fighter-4", 4)],
        &division(),
        today(),
    );
    assert!(standard.assumptions[0].contains("weighted equally"));
}
