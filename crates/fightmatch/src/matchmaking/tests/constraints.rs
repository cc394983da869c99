use super::common::*;
use crate::matchmaking::constraints::{
    check_constraints, has_blocking_violations, ConstraintKind, ConstraintViolation, Severity,
};
use crate::matchmaking::policy::{get_policy, BALANCED, BUSINESS_FIRST, SPORTING_MERIT};

fn kinds(violations: &[ConstraintViolation]) -> Vec<ConstraintKind> {
    violations.iter().map(|violation| violation.kind).collect()
}

#[test]
fn blocks_pairing_a_fighter_with_themselves() {
    let fighter = fighter("fighter-1", 1);
    let policy = get_policy(BALANCED);

    let violations = check_constraints(&fighter, &fighter, &policy, &no_history(), today());

    assert_eq!(violations[0].kind, ConstraintKind::SameFighter);
    assert_eq!(violations[0].severity, Severity::Blocking);
}

#[test]
fn blocks_recent_matchups_in_either_order_when_policy_disallows() {
    let a = fighter("fighter-1", 1);
    let b = fighter("fighter-2", 2);
    let policy = get_policy(SPORTING_MERIT);
    let recent = history(&[("fighter-2", "fighter-1")]);

    let forward = check_constraints(&a, &b, &policy, &recent, today());
    let backward = check_constraints(&b, &a, &policy, &recent, today());

    assert!(kinds(&forward).contains(&ConstraintKind::RecentMatchup));
    assert!(kinds(&backward).contains(&ConstraintKind::RecentMatchup));
}

#[test]
fn allows_recent_matchups_when_policy_allows() {
    let a = fighter("fighter-1", 1);
    let b = fighter("fighter-2", 2);
    let policy = get_policy(BUSINESS_FIRST);
    let recent = history(&[("fighter-1", "fighter-2")]);

    let violations = check_constraints(&a, &b, &policy, &recent, today());

    assert!(!kinds(&violations).contains(&ConstraintKind::RecentMatchup));
}

#[test]
fn enforces_title_eligibility_from_either_side() {
    let champ = champion("fighter-1");
    let outsider = fighter("fighter-10", 10);
    let contender = fighter("fighter-4", 4);
    let policy = get_policy(SPORTING_MERIT);

    let champ_first = check_constraints(&champ, &outsider, &policy, &no_history(), today());
    let champ_second = check_constraints(&outsider, &champ, &policy, &no_history(), today());
    let eligible = check_constraints(&champ, &contender, &policy, &no_history(), today());

    assert!(kinds(&champ_first).contains(&ConstraintKind::TitleIneligible));
    assert!(kinds(&champ_second).contains(&ConstraintKind::TitleIneligible));
    assert!(!kinds(&eligible).contains(&ConstraintKind::TitleIneligible));
}

#[test]
fn unranked_challenger_is_not_title_eligible() {
    let champ = champion("fighter-1");
    let mut unranked = fighter("fighter-99", 1);
    unranked.rank = None;
    let policy = get_policy(BALANCED);

    let violations = check_constraints(&champ, &unranked, &policy, &no_history(), today());

    assert!(kinds(&violations).contains(&ConstraintKind::TitleIneligible));
    assert!(!kinds(&violations).contains(&ConstraintKind::RankGapExceeded));
}

#[test]
fn rank_gap_blocks_only_beyond_the_limit() {
    let top = fighter("fighter-1", 1);
    let within = fighter("fighter-6", 6);
    let beyond = fighter("fighter-7", 7);
    let policy = get_policy(SPORTING_MERIT);

    let ok = check_constraints(&top, &within, &policy, &no_history(), today());
    let blocked = check_constraints(&top, &beyond, &policy, &no_history(), today());

    assert!(!kinds(&ok).contains(&ConstraintKind::RankGapExceeded));
    let violation = blocked
        .iter()
        .find(|violation| violation.kind == ConstraintKind::RankGapExceeded)
        .expect("rank gap violation");
    assert!(violation.is_blocking());
    assert!(violation.reason.contains("(6)"));
    assert!(violation.reason.contains("(5)"));
}

#[test]
fn reports_each_injured_side_separately() {
    let mut a = fighter("fighter-1", 1);
    let mut b = fighter("fighter-2", 2);
    a.is_injured = true;
    b.is_injured = true;
    let policy = get_policy(BALANCED);

    let violations = check_constraints(&a, &b, &policy, &no_history(), today());

    let injuries: Vec<_> = violations
        .iter()
        .filter(|violation| violation.kind == ConstraintKind::Injured)
        .collect();
    assert_eq!(injuries.len(), 2);
    assert!(injuries[0].reason.starts_with("Target"));
    assert!(injuries[1].reason.starts_with("Candidate"));
}

#[test]
fn long_inactivity_only_warns() {
    let mut idle = fighter("fighter-1", 1);
    idle.last_fight_date = days_ago(500);
    let active = fighter("fighter-2", 2);
    let policy = get_policy(BALANCED);

    let violations = check_constraints(&idle, &active, &policy, &no_history(), today());

    let warning = violations
        .iter()
        .find(|violation| violation.kind == ConstraintKind::InactiveTooLong)
        .expect("inactivity warning");
    assert_eq!(warning.severity, Severity::Warning);
    assert!(warning.reason.contains("500 days"));
    assert!(warning.reason.contains("450"));
    assert!(!has_blocking_violations(&violations));
}

#[test]
fn missing_fight_date_exceeds_any_inactivity_limit() {
    let mut unknown = fighter("fighter-2", 2);
    unknown.last_fight_date = None;
    let policy = get_policy(BUSINESS_FIRST);

    let violations =
        check_constraints(&fighter("fighter-1", 1), &unknown, &policy, &no_history(), today());

    assert_eq!(kinds(&violations), vec![ConstraintKind::InactiveTooLong]);
}

#[test]
fn violations_follow_check_order() {
    let mut champ = champion("fighter-1");
    champ.is_injured = true;
    let mut far = fighter("fighter-12", 12);
    far.last_fight_date = None;
    let policy = get_policy(SPORTING_MERIT);
    let recent = history(&[("fighter-1", "fighter-12")]);

    let violations = check_constraints(&champ, &far, &policy, &recent, today());

    assert_eq!(
        kinds(&violations),
        vec![
            ConstraintKind::RecentMatchup,
            ConstraintKind::TitleIneligible,
            ConstraintKind::RankGapExceeded,
            ConstraintKind::Injured,
            ConstraintKind::InactiveTooLong,
        ]
    );
}

#[test]
fn blocking_detection_ignores_warnings() {
    let blocking = ConstraintViolation {
        kind: ConstraintKind::SameFighter,
        reason: "test".to_string(),
        severity: Severity::Blocking,
    };
    let warning = ConstraintViolation {
        kind: ConstraintKind::InactiveTooLong,
        reason: "test".to_string(),
        severity: Severity::Warning,
    };

    assert!(!has_blocking_violations(&[]));
    assert!(!has_blocking_violations(std::slice::from_ref(&warning)));
    assert!(has_blocking_violations(&[blocking, warning]));
}
