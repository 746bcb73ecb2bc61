use crate::voter::{Vote, Voter};
use error_common::{HttpRequest, ReportableError};
use std::sync::Arc;
use tracing::debug;

/// Aggregates voters into a single reporting decision.
///
/// Deny overrides: the first voter that denies ends evaluation with `false`.
/// Allow and abstain never change the outcome, so with no objection (or no
/// voters at all) the error is reported.
#[derive(Clone, Default)]
pub struct ReportDecisionManager {
    voters: Vec<Arc<dyn Voter>>,
}

impl ReportDecisionManager {
    pub fn new(voters: Vec<Arc<dyn Voter>>) -> Self {
        Self { voters }
    }

    /// Register a voter after the existing ones
    pub fn with_voter<V: Voter + 'static>(mut self, voter: V) -> Self {
        self.voters.push(Arc::new(voter));
        self
    }

    pub fn voter_names(&self) -> Vec<&str> {
        self.voters.iter().map(|voter| voter.name()).collect()
    }

    pub fn decide(&self, error: &ReportableError) -> bool {
        self.decide_with_request(error, None)
    }

    pub fn decide_with_request(
        &self,
        error: &ReportableError,
        request: Option<&HttpRequest>,
    ) -> bool {
        for voter in &self.voters {
            if voter.vote(error, request) == Vote::Deny {
                debug!(
                    voter = voter.name(),
                    error_class = error.class(),
                    "Report denied by voter"
                );
                return false;
            }
        }

        true
    }

    /// Every voter's vote in registration order, without short-circuiting
    pub fn votes(
        &self,
        error: &ReportableError,
        request: Option<&HttpRequest>,
    ) -> Vec<(String, Vote)> {
        self.voters
            .iter()
            .map(|voter| (voter.name().to_string(), voter.vote(error, request)))
            .collect()
    }
}

impl std::fmt::Debug for ReportDecisionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportDecisionManager")
            .field("voters", &self.voter_names())
            .finish()
    }
}
