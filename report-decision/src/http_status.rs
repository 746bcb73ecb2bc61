use crate::voter::{Vote, Voter};
use error_common::{HttpRequest, ReportableError};
use std::collections::BTreeSet;

/// Denies errors that stand for an ignored HTTP client-error status
#[derive(Debug, Clone)]
pub struct HttpStatusVoter {
    ignored: BTreeSet<u16>,
}

impl HttpStatusVoter {
    pub const NAME: &'static str = "http_status";

    pub fn new<I: IntoIterator<Item = u16>>(ignored_status_codes: I) -> Self {
        Self {
            ignored: ignored_status_codes.into_iter().collect(),
        }
    }

    pub fn ignored_status_codes(&self) -> impl Iterator<Item = u16> + '_ {
        self.ignored.iter().copied()
    }
}

impl Default for HttpStatusVoter {
    fn default() -> Self {
        Self::new([404])
    }
}

impl Voter for HttpStatusVoter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn vote(&self, error: &ReportableError, _request: Option<&HttpRequest>) -> Vote {
        match error.status_code() {
            Some(status) if (400..500).contains(&status) && self.ignored.contains(&status) => {
                Vote::Deny
            }
            _ => Vote::Abstain,
        }
    }
}
