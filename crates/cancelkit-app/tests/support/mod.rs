use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use cancelkit_app::{
    Analytics, Collaborators, ExperimentOracle, FlowRequest, LegacySiteList, Navigator,
    NoticeOptions, Notices, PurchaseStore, SiteSelection, SiteStore, SurveyReceipt,
    SurveyTransport, TrackEvent,
};
use cancelkit_core::config::Features;
use cancelkit_core::purchase::{PlanTier, ProductKind, Purchase, PurchaseId, UserId};
use cancelkit_core::site::{Site, SiteId};
use cancelkit_core::submission::SurveySubmission;
use tokio::sync::Notify;

pub const USER_ID: UserId = 7;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Remove {
        purchase_id: PurchaseId,
        user_id: UserId,
    },
    SurveySubmit {
        survey_id: String,
        site_id: SiteId,
        payload: serde_json::Value,
    },
    NoticeSuccess {
        message: String,
        persistent: bool,
    },
    NoticeError {
        message: String,
    },
    LegacySiteDeleted(SiteId),
    SiteDeleted(SiteId),
    SelectAllSites,
    Navigate(String),
}

/// Scripted stand-in for every collaborator; records calls in one ordered log.
#[derive(Default)]
pub struct Harness {
    calls: Mutex<Vec<Call>>,
    events: Mutex<Vec<TrackEvent>>,
    removal_failure: Mutex<Option<String>>,
    refreshed_purchase: Mutex<Option<Purchase>>,
    survey_result: Mutex<Option<anyhow::Result<SurveyReceipt>>>,
    survey_gate: Mutex<Option<Arc<Notify>>>,
    variant: Mutex<Option<String>>,
}

impl Harness {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
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

    pub fn fail_removal(&self, message: &str) {
        *self.removal_failure.lock().expect("removal lock") = Some(message.to_string());
    }

    pub fn set_refreshed_purchase(&self, purchase: Purchase) {
        *self.refreshed_purchase.lock().expect("refreshed lock") = Some(purchase);
    }

    pub fn set_survey_result(&self, result: anyhow::Result<SurveyReceipt>) {
        *self.survey_result.lock().expect("survey lock") = Some(result);
    }

    /// Holds survey submissions until the returned handle is notified.
    pub fn hold_surveys(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.survey_gate.lock().expect("gate lock") = Some(gate.clone());
        gate
    }

    pub fn set_variant(&self, variant: Option<&str>) {
        *self.variant.lock().expect("variant lock") = variant.map(str::to_string);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn events(&self) -> Vec<TrackEvent> {
        self.events.lock().expect("events lock").clone()
    }

    pub fn event_names(&self) -> Vec<String> {
        self.events().into_iter().map(|event| event.name).collect()
    }

    pub fn error_notices(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::NoticeError { message } => Some(message),
                _ => None,
            })
            .collect()
    }

    fn push(&self, call: Call) {
        self.calls.lock().expect("calls lock").push(call);
    }
}

#[async_trait]
impl PurchaseStore for Harness {
    async fn remove_purchase(
        &self,
        purchase_id: PurchaseId,
        user_id: UserId,
    ) -> anyhow::Result<()> {
        self.push(Call::Remove {
            purchase_id,
            user_id,
        });

        match self.removal_failure.lock().expect("removal lock").clone() {
            Some(message) => Err(anyhow!(message)),
            None => Ok(()),
        }
    }

    fn purchase(&self, _purchase_id: PurchaseId) -> Option<Purchase> {
        self.refreshed_purchase.lock().expect("refreshed lock").clone()
    }
}

#[async_trait]
impl SurveyTransport for Harness {
    async fn submit(
        &self,
        survey_id: &str,
        site_id: SiteId,
        submission: &SurveySubmission,
    ) -> anyhow::Result<SurveyReceipt> {
        self.push(Call::SurveySubmit {
            survey_id: survey_id.to_string(),
            site_id,
            payload: submission.to_json().expect("payload json"),
        });

        let gate = self.survey_gate.lock().expect("gate lock").clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.survey_result
            .lock()
            .expect("survey lock")
            .take()
            .unwrap_or_else(|| Ok(SurveyReceipt::accepted()))
    }
}

impl ExperimentOracle for Harness {
    fn variant(&self, _name: &str) -> Option<String> {
        self.variant.lock().expect("variant lock").clone()
    }
}

impl Notices for Harness {
    fn success(&self, message: &str, options: NoticeOptions) {
        self.push(Call::NoticeSuccess {
            message: message.to_string(),
            persistent: options.persistent,
        });
    }

    fn error(&self, message: &str) {
        self.push(Call::NoticeError {
            message: message.to_string(),
        });
    }
}

impl LegacySiteList for Harness {
    fn receive_deleted_site(&self, site: &Site) {
        self.push(Call::LegacySiteDeleted(site.id));
    }
}

impl SiteStore for Harness {
    fn receive_deleted_site(&self, site: &Site) {
        self.push(Call::SiteDeleted(site.id));
    }
}

impl SiteSelection for Harness {
    fn select_all_sites(&self) {
        self.push(Call::SelectAllSites);
    }
}

impl Navigator for Harness {
    fn navigate(&self, path: &str) {
        self.push(Call::Navigate(path.to_string()));
    }
}

impl Analytics for Harness {
    fn record(&self, event: TrackEvent) {
        self.events.lock().expect("events lock").push(event);
    }
}

pub fn plan_purchase() -> Purchase {
    Purchase {
        id: 101,
        product_slug: "value_bundle".to_string(),
        product_name: "Premium".to_string(),
        kind: ProductKind::Plan,
        tier: PlanTier::Standard,
        included_domain: Some("example.com".to_string()),
        removable: true,
        subscribed_at: None,
        error: None,
    }
}

pub fn business_plan() -> Purchase {
    Purchase {
        product_slug: "business-bundle".to_string(),
        product_name: "Business".to_string(),
        tier: PlanTier::Business,
        ..plan_purchase()
    }
}

pub fn domain_purchase() -> Purchase {
    Purchase {
        id: 202,
        product_slug: "domain_reg".to_string(),
        product_name: "example.com".to_string(),
        kind: ProductKind::DomainRegistration,
        included_domain: None,
        ..plan_purchase()
    }
}

pub fn site(is_domain_only: bool) -> Site {
    Site {
        id: 42,
        domain: "example.blog".to_string(),
        is_domain_only,
        created_at: None,
    }
}

pub fn request(purchase: Purchase, site: Site) -> FlowRequest {
    FlowRequest {
        purchase,
        site: Some(site),
        user_id: USER_ID,
        purchases_loaded: true,
        features: Features::default(),
    }
}
