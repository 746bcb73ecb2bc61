//! Deny-overrides properties of the decision manager
//!
//! Any single deny suppresses the report no matter where it sits among the
//! other votes; without a deny the report always goes through.

use error_common::{ErrorLevel, Exception, ReportableError, RuntimeError};
use proptest::prelude::*;
use report_decision::*;

fn arb_vote() -> impl Strategy<Value = Vote> {
    prop_oneof![Just(Vote::Allow), Just(Vote::Deny), Just(Vote::Abstain)]
}

fn manager_for(votes: &[Vote]) -> ReportDecisionManager {
    votes.iter().fold(ReportDecisionManager::default(), |manager, vote| {
        let vote = *vote;
        manager.with_voter(FnVoter::new("fixed", move |_, _| vote))
    })
}

fn sample_errors() -> Vec<ReportableError> {
    vec![
        Exception::new("RuntimeException", "boom").into(),
        RuntimeError::new(ErrorLevel::USER_NOTICE, "Error", "/srv/app.php", 7).into(),
    ]
}

proptest! {
    #[test]
    fn decision_is_false_iff_any_voter_denies(votes in prop::collection::vec(arb_vote(), 0..12)) {
        let manager = manager_for(&votes);
        for error in sample_errors() {
            prop_assert_eq!(manager.decide(&error), !votes.contains(&Vote::Deny));
        }
    }

    #[test]
    fn single_deny_wins_at_any_position(
        others in prop::collection::vec(prop_oneof![Just(Vote::Allow), Just(Vote::Abstain)], 0..10),
        position in any::<prop::sample::Index>(),
    ) {
        let mut votes = others.clone();
        let at = position.index(votes.len() + 1);
        votes.insert(at, Vote::Deny);

        let manager = manager_for(&votes);
        for error in sample_errors() {
            prop_assert!(!manager.decide(&error));
        }
    }

    #[test]
    fn decision_is_deterministic(votes in prop::collection::vec(arb_vote(), 0..8)) {
        let manager = manager_for(&votes);
        let error: ReportableError = Exception::new("LogicException", "again").into();
        prop_assert_eq!(manager.decide(&error), manager.decide(&error));
    }
}

#[test]
fn empty_manager_always_reports() {
    let manager = ReportDecisionManager::default();
    for error in sample_errors() {
        assert!(manager.decide(&error));
    }
}
