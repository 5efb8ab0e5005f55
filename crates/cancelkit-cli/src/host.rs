use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::anyhow;
use async_trait::async_trait;
use cancelkit_app::{
    Analytics, Collaborators, ExperimentOracle, LegacySiteList, Navigator, NoticeOptions,
    Notices, PurchaseStore, SiteSelection, SiteStore, SurveyReceipt, SurveyTransport, TrackEvent,
};
use cancelkit_core::config::StaticExperiments;
use cancelkit_core::purchase::{Purchase, PurchaseId, UserId};
use cancelkit_core::site::{Site, SiteId};
use cancelkit_core::submission::SurveySubmission;
use tracing::debug;

use crate::scenario::TransportScript;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEntry {
    pub channel: &'static str,
    pub detail: String,
}

/// In-memory collaborators for walking a scenario without a backend.
pub struct InMemoryHost {
    purchase: Mutex<Purchase>,
    script: TransportScript,
    experiments: StaticExperiments,
    entries: Mutex<Vec<HostEntry>>,
    events: Mutex<Vec<TrackEvent>>,
}

impl InMemoryHost {
    pub fn new(
        purchase: Purchase,
        script: TransportScript,
        experiments: BTreeMap<String, String>,
    ) -> Self {
        Self {
            purchase: Mutex::new(purchase),
            script,
            experiments: StaticExperiments::new(experiments),
            entries: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn collaborators(self: &Arc<Self>) -> Collaborators {
        Collaborators {
            purchases: self.clone(),
            surveys: self.clone(),
            experiments: self.clone(),
            notices: self.clone(),
            legacy_sites: self.clone(),
            sites: self.clone(),
            selection: self.clone(),
            navigator: self.clone(),
            analytics: self.clone(),
        }
    }

    pub fn entries(&self) -> Vec<HostEntry> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn events(&self) -> Vec<TrackEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn log(&self, channel: &'static str, detail: String) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(HostEntry { channel, detail });
    }
}

#[async_trait]
impl PurchaseStore for InMemoryHost {
    async fn remove_purchase(
        &self,
        purchase_id: PurchaseId,
        user_id: UserId,
    ) -> anyhow::Result<()> {
        self.log(
            "remove",
            format!("purchase {purchase_id} for user {user_id}"),
        );

        let Some(error) = self.script.removal_error.clone() else {
            return Ok(());
        };

        if let Some(attached) = self.script.attached_error.clone() {
            self.purchase
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .error = Some(attached);
        }
        Err(anyhow!(error))
    }

    fn purchase(&self, purchase_id: PurchaseId) -> Option<Purchase> {
        let purchase = self
            .purchase
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        (purchase.id == purchase_id).then_some(purchase)
    }
}

#[async_trait]
impl SurveyTransport for InMemoryHost {
    async fn submit(
        &self,
        survey_id: &str,
        site_id: SiteId,
        submission: &SurveySubmission,
    ) -> anyhow::Result<SurveyReceipt> {
        let payload = submission
            .to_json()
            .map(|value| value.to_string())
            .unwrap_or_else(|error| format!("<unserializable: {error}>"));
        debug!(survey_id, site_id, "survey received");
        self.log("survey", format!("{survey_id} site {site_id}: {payload}"));

        if let Some(error) = self.script.survey_error.clone() {
            return Err(anyhow!(error));
        }
        Ok(match self.script.survey_rejection.clone() {
            Some(err) => SurveyReceipt::rejected(err),
            None => SurveyReceipt::accepted(),
        })
    }
}

impl ExperimentOracle for InMemoryHost {
    fn variant(&self, name: &str) -> Option<String> {
        self.experiments.variant(name).map(str::to_string)
    }
}

impl Notices for InMemoryHost {
    fn success(&self, message: &str, options: NoticeOptions) {
        let suffix = if options.persistent {
            " (persistent)"
        } else {
            ""
        };
        self.log("notice.success", format!("{message}{suffix}"));
    }

    fn error(&self, message: &str) {
        self.log("notice.error", message.to_string());
    }
}

impl LegacySiteList for InMemoryHost {
    fn receive_deleted_site(&self, site: &Site) {
        self.log("sites-list.deleted", site.domain.clone());
    }
}

impl SiteStore for InMemoryHost {
    fn receive_deleted_site(&self, site: &Site) {
        self.log("sites.deleted", site.domain.clone());
    }
}

impl SiteSelection for InMemoryHost {
    fn select_all_sites(&self) {
        self.log("selection", "all sites".to_string());
    }
}

impl Navigator for InMemoryHost {
    fn navigate(&self, path: &str) {
        self.log("navigate", path.to_string());
    }
}

impl Analytics for InMemoryHost {
    fn record(&self, event: TrackEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
