use crate::voter::{Vote, Voter};
use error_common::{HttpRequest, ReportableError};
use url::Url;

/// Denies errors whose request was referred from the request's own host
#[derive(Debug, Clone, Copy, Default)]
pub struct SameRefererVoter;

impl SameRefererVoter {
    pub const NAME: &'static str = "same_referer";

    pub fn new() -> Self {
        Self
    }

    fn referer_host(request: &HttpRequest) -> Option<String> {
        let referer = Url::parse(request.referer()?).ok()?;
        referer.host_str().map(str::to_lowercase)
    }

    fn target_host(request: &HttpRequest) -> Option<String> {
        // Host may carry a port; parse it the same way as the referer
        let target = Url::parse(&format!("http://{}", request.host()?)).ok()?;
        target.host_str().map(str::to_lowercase)
    }
}

impl Voter for SameRefererVoter {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn vote(&self, _error: &ReportableError, request: Option<&HttpRequest>) -> Vote {
        let Some(request) = request else {
            return Vote::Abstain;
        };

        match (Self::referer_host(request), Self::target_host(request)) {
            (Some(referer), Some(target)) if referer == target => Vote::Deny,
            _ => Vote::Abstain,
        }
    }
}
