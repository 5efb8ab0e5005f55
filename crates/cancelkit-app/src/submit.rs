use std::sync::Arc;

use cancelkit_core::site::SiteId;
use cancelkit_core::submission::{REMOVE_PURCHASE_SURVEY, SurveySubmission};
use serde_json::Map;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::events::CANCEL_FORM_SUBMIT;
use crate::flow::RemovalFlow;
use crate::ports::{Notices, SurveyTransport};

impl RemovalFlow {
    /// Starts the exit survey upload on its own task and returns immediately.
    pub(crate) fn submit_survey(&mut self) {
        self.record(CANCEL_FORM_SUBMIT, Map::new());

        let submission = SurveySubmission::enriched(
            &self.survey,
            &self.site,
            &self.purchase,
            OffsetDateTime::now_utc(),
        );
        match submission.to_json() {
            Ok(payload) => debug!(%payload, "survey responses"),
            Err(error) => debug!(%error, "survey responses not serializable for logging"),
        }

        let task = tokio::spawn(deliver_survey(
            Arc::clone(&self.ports.surveys),
            Arc::clone(&self.ports.notices),
            self.site.id,
            submission,
        ));
        self.survey_task = Some(task);
    }
}

async fn deliver_survey(
    transport: Arc<dyn SurveyTransport>,
    notices: Arc<dyn Notices>,
    site_id: SiteId,
    submission: SurveySubmission,
) {
    match transport
        .submit(REMOVE_PURCHASE_SURVEY, site_id, &submission)
        .await
    {
        Ok(receipt) => {
            debug!(success = receipt.success, err = ?receipt.err, "survey submit response");
            if !receipt.success {
                notices.error(receipt.err.as_deref().unwrap_or_default());
            }
        }
        Err(error) => {
            warn!(site_id, error = %format!("{error:#}"), "survey submission failed");
        }
    }
}
