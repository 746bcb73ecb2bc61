use crate::{
    client::{RemoteLogger, ReportContext, ReportId, ReportPayload},
    config::ReporterConfig,
};
use auth_identity::{TaskLocalTokenStorage, TokenStorage, UserContextProvider};
use error_common::{
    ErrorLevel, Exception, ExtraData, HttpRequest, Level, ReportableError, ReporterError, Result,
    RuntimeError,
};
use report_decision::{HttpStatusVoter, ReportDecisionManager, SameRefererVoter, Voter};
use report_scrubber::Scrubber;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Decides, scrubs, enriches and forwards errors to the remote client
pub struct Reporter {
    client: Arc<dyn RemoteLogger>,
    users: UserContextProvider,
    decisions: ReportDecisionManager,
    scrubber: Scrubber,
    /// Configured minimum levels for runtime errors
    error_level: ErrorLevel,
    /// Ambient reporting mask, adjustable at runtime
    error_reporting: AtomicU32,
}

impl Reporter {
    pub fn new(
        client: Arc<dyn RemoteLogger>,
        users: UserContextProvider,
        decisions: ReportDecisionManager,
        config: &ReporterConfig,
    ) -> Self {
        Self {
            client,
            users,
            decisions,
            scrubber: Scrubber::new(&config.scrub_config()),
            error_level: config.error_level,
            error_reporting: AtomicU32::new(ErrorLevel::ALL.bits()),
        }
    }

    pub fn builder() -> ReporterBuilder {
        ReporterBuilder::default()
    }

    /// Report an exception.
    ///
    /// Returns `Ok(None)` when the decision manager suppresses the report,
    /// otherwise the identifier assigned by the remote client.
    ///
    /// # Errors
    ///
    /// Propagates the remote client's transport failure.
    pub async fn report(
        &self,
        exception: Exception,
        request: Option<&HttpRequest>,
        extra: ExtraData,
    ) -> Result<Option<ReportId>> {
        let error = ReportableError::from(exception);
        if !self.decisions.decide_with_request(&error, request) {
            debug!(error_class = error.class(), "Exception report suppressed");
            return Ok(None);
        }

        let payload = self.payload_for(error);
        let id = self
            .client
            .log(Level::Error, payload, extra, self.context_for(request))
            .await?;

        Ok(Some(id))
    }

    /// Report a level-tagged runtime error.
    ///
    /// Forwarded only when the level is in both the ambient reporting mask
    /// and the configured `error_level`, and no voter denies it.
    ///
    /// # Errors
    ///
    /// Propagates the remote client's transport failure.
    pub async fn report_error(
        &self,
        level: ErrorLevel,
        message: &str,
        file: &str,
        line: u32,
        request: Option<&HttpRequest>,
    ) -> Result<()> {
        if !self.error_reporting().intersects(level) || !self.error_level.intersects(level) {
            debug!(level = %level, "Runtime error level not reported");
            return Ok(());
        }

        let error = ReportableError::from(RuntimeError::new(level, message, file, line));
        if !self.decisions.decide_with_request(&error, request) {
            debug!(level = %level, "Runtime error report suppressed");
            return Ok(());
        }

        let payload = self.payload_for(error);
        self.client
            .log(Level::Error, payload, ExtraData::new(), self.context_for(request))
            .await?;

        Ok(())
    }

    /// # Errors
    ///
    /// Propagates the remote client's flush failure.
    pub async fn flush(&self) -> Result<()> {
        self.client.flush().await
    }

    pub fn error_reporting(&self) -> ErrorLevel {
        ErrorLevel::from_bits(self.error_reporting.load(Ordering::Relaxed))
    }

    /// Replace the ambient reporting mask, returning the previous one
    pub fn set_error_reporting(&self, mask: ErrorLevel) -> ErrorLevel {
        ErrorLevel::from_bits(self.error_reporting.swap(mask.bits(), Ordering::Relaxed))
    }

    pub fn error_level(&self) -> ErrorLevel {
        self.error_level
    }

    pub fn decision_manager(&self) -> &ReportDecisionManager {
        &self.decisions
    }

    /// Current user, as it would be attached to a report
    pub fn user_data(&self) -> Option<auth_identity::UserRecord> {
        self.users.user_data()
    }

    fn payload_for(&self, error: ReportableError) -> ReportPayload {
        match error {
            ReportableError::Exception(exception) => match self.scrubber.scrub(&exception) {
                Some(snapshot) => ReportPayload::Snapshot(snapshot),
                None => ReportPayload::Exception(exception),
            },
            ReportableError::RuntimeError(error) => {
                ReportPayload::Error(self.client.data_builder().generate_error_wrapper(
                    error.level(),
                    error.message(),
                    error.file(),
                    error.line(),
                ))
            }
        }
    }

    fn context_for(&self, request: Option<&HttpRequest>) -> ReportContext {
        ReportContext::new(
            request.map(|request| request.content().to_string()),
            self.users.user_data(),
        )
    }
}

/// Wires configuration, client, authentication context and voters into a
/// [`Reporter`]
#[derive(Default)]
pub struct ReporterBuilder {
    config: ReporterConfig,
    client: Option<Arc<dyn RemoteLogger>>,
    token_storage: Option<Arc<dyn TokenStorage>>,
    voters: Vec<Arc<dyn Voter>>,
    skip_default_voters: bool,
}

impl ReporterBuilder {
    pub fn config(mut self, config: ReporterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn client(mut self, client: Arc<dyn RemoteLogger>) -> Self {
        self.client = Some(client);
        self
    }

    /// Where the current user is read from at report time.
    ///
    /// Defaults to [`TaskLocalTokenStorage`], scoped per request task.
    pub fn token_storage(mut self, token_storage: Arc<dyn TokenStorage>) -> Self {
        self.token_storage = Some(token_storage);
        self
    }

    /// Add a voter after the built-in ones
    pub fn voter<V: Voter + 'static>(mut self, voter: V) -> Self {
        self.voters.push(Arc::new(voter));
        self
    }

    /// Do not register the HTTP status and same-referer voters
    pub fn without_default_voters(mut self) -> Self {
        self.skip_default_voters = true;
        self
    }

    /// # Errors
    ///
    /// Returns [`ReporterError::Configuration`] when no remote client was set.
    pub fn build(self) -> Result<Reporter> {
        let client = self
            .client
            .ok_or_else(|| ReporterError::Configuration("Remote client is required".to_string()))?;
        let token_storage = self
            .token_storage
            .unwrap_or_else(|| Arc::new(TaskLocalTokenStorage::new()));

        let mut voters: Vec<Arc<dyn Voter>> = Vec::new();
        if !self.skip_default_voters {
            voters.push(Arc::new(HttpStatusVoter::new(
                self.config.ignored_status_codes.iter().copied(),
            )));
            voters.push(Arc::new(SameRefererVoter::new()));
        }
        voters.extend(self.voters);

        Ok(Reporter::new(
            client,
            UserContextProvider::new(token_storage),
            ReportDecisionManager::new(voters),
            &self.config,
        ))
    }
}
