use error_common::{HttpRequest, ReportableError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single voter's opinion on reporting an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Allow,
    Deny,
    Abstain,
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vote::Allow => f.write_str("allow"),
            Vote::Deny => f.write_str("deny"),
            Vote::Abstain => f.write_str("abstain"),
        }
    }
}

/// Predicate contributing to the reporting decision.
///
/// Voters are pure and infallible: anything a voter cannot evaluate is an
/// [`Vote::Abstain`]. The request is the one the error was raised in, when
/// the caller has it.
pub trait Voter: Send + Sync {
    /// Stable name used in decision traces
    fn name(&self) -> &str;

    fn vote(&self, error: &ReportableError, request: Option<&HttpRequest>) -> Vote;
}

/// Voter backed by a closure
pub struct FnVoter<F> {
    name: &'static str,
    vote: F,
}

impl<F> FnVoter<F>
where
    F: Fn(&ReportableError, Option<&HttpRequest>) -> Vote + Send + Sync,
{
    pub fn new(name: &'static str, vote: F) -> Self {
        Self { name, vote }
    }
}

impl<F> Voter for FnVoter<F>
where
    F: Fn(&ReportableError, Option<&HttpRequest>) -> Vote + Send + Sync,
{
    fn name(&self) -> &str {
        self.name
    }

    fn vote(&self, error: &ReportableError, request: Option<&HttpRequest>) -> Vote {
        (self.vote)(error, request)
    }
}
