use crate::client::{DataBuilder, DefaultDataBuilder, RemoteLogger, ReportContext, ReportId, ReportPayload};
use async_trait::async_trait;
use error_common::{ExtraData, Level, Result};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// [`RemoteLogger`] that writes each item as a structured `tracing` event.
///
/// Useful for local development, where no remote service is configured.
#[derive(Clone)]
pub struct TracingLogger {
    data_builder: Arc<dyn DataBuilder>,
}

impl TracingLogger {
    pub fn new() -> Self {
        Self {
            data_builder: Arc::new(DefaultDataBuilder),
        }
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteLogger for TracingLogger {
    async fn log(
        &self,
        level: Level,
        payload: ReportPayload,
        extra: ExtraData,
        context: ReportContext,
    ) -> Result<ReportId> {
        let report_id = Uuid::new_v4();
        let body = serde_json::to_string(&payload)?;
        let extra = serde_json::to_string(&extra)?;
        let person = context.person.as_ref().map(|person| person.id.as_str());

        error!(
            report_id = %report_id,
            level = %level,
            error_class = payload.class(),
            person = person,
            has_request_content = context.request_content.is_some(),
            reported_at = %context.reported_at.to_rfc3339(),
            extra = %extra,
            payload = %body,
            "{}",
            payload.message()
        );

        Ok(report_id)
    }

    fn data_builder(&self) -> Arc<dyn DataBuilder> {
        self.data_builder.clone()
    }

    async fn flush(&self) -> Result<()> {
        info!("Tracing logger has nothing to flush");
        Ok(())
    }
}
