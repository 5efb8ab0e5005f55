use std::sync::Arc;

use async_trait::async_trait;
use cancelkit_core::config::StaticExperiments;
use cancelkit_core::purchase::{Purchase, PurchaseId, UserId};
use cancelkit_core::site::{Site, SiteId};
use cancelkit_core::submission::SurveySubmission;

use crate::events::TrackEvent;

/// Purchases store: the removal transport plus the records it keeps current.
#[async_trait]
pub trait PurchaseStore: Send + Sync {
    async fn remove_purchase(&self, purchase_id: PurchaseId, user_id: UserId)
    -> anyhow::Result<()>;

    /// Latest record for a purchase, including any error attached by a failed call.
    fn purchase(&self, purchase_id: PurchaseId) -> Option<Purchase>;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurveyReceipt {
    pub success: bool,
    pub err: Option<String>,
}

impl SurveyReceipt {
    pub fn accepted() -> Self {
        Self {
            success: true,
            err: None,
        }
    }

    pub fn rejected(err: impl Into<String>) -> Self {
        Self {
            success: false,
            err: Some(err.into()),
        }
    }
}

#[async_trait]
pub trait SurveyTransport: Send + Sync {
    async fn submit(
        &self,
        survey_id: &str,
        site_id: SiteId,
        submission: &SurveySubmission,
    ) -> anyhow::Result<SurveyReceipt>;
}

pub trait ExperimentOracle: Send + Sync {
    fn variant(&self, name: &str) -> Option<String>;
}

impl ExperimentOracle for StaticExperiments {
    fn variant(&self, name: &str) -> Option<String> {
        StaticExperiments::variant(self, name).map(str::to_string)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoticeOptions {
    /// Persistent notices stay until dismissed.
    pub persistent: bool,
}

pub trait Notices: Send + Sync {
    fn success(&self, message: &str, options: NoticeOptions);
    fn error(&self, message: &str);
}

/// Older site list that still tracks site existence on its own.
pub trait LegacySiteList: Send + Sync {
    fn receive_deleted_site(&self, site: &Site);
}

pub trait SiteStore: Send + Sync {
    fn receive_deleted_site(&self, site: &Site);
}

pub trait SiteSelection: Send + Sync {
    fn select_all_sites(&self);
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

pub trait Analytics: Send + Sync {
    fn record(&self, event: TrackEvent);
}

#[derive(Clone)]
pub struct Collaborators {
    pub purchases: Arc<dyn PurchaseStore>,
    pub surveys: Arc<dyn SurveyTransport>,
    pub experiments: Arc<dyn ExperimentOracle>,
    pub notices: Arc<dyn Notices>,
    pub legacy_sites: Arc<dyn LegacySiteList>,
    pub sites: Arc<dyn SiteStore>,
    pub selection: Arc<dyn SiteSelection>,
    pub navigator: Arc<dyn Navigator>,
    pub analytics: Arc<dyn Analytics>,
}
