use cancelkit_core::purchase::Purchase;
use cancelkit_core::site::Site;
use tracing::{debug, info, warn};

use crate::flow::RemovalFlow;
use crate::ports::NoticeOptions;

pub const PURCHASES_ROOT: &str = "/me/purchases";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub notice: String,
    /// The removed domain was all the site had, so the site is gone too.
    pub site_deleted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed(RemovalReport),
    Failed { message: String },
    AlreadyRemoving,
}

pub fn success_notice(purchase: &Purchase, site: &Site) -> String {
    if purchase.is_domain_registration() {
        format!(
            "The domain {} was removed from your account.",
            purchase.product_name
        )
    } else {
        format!("{} was removed from {}.", purchase.product_name, site.domain)
    }
}

impl RemovalFlow {
    /// Confirms removal. The survey (when active) is sent on a detached task;
    /// the removal call is awaited here and never waits on the survey.
    ///
    /// Must be polled inside a tokio runtime: the survey task is started with
    /// `tokio::spawn`, which panics without one.
    pub async fn confirm_removal(&mut self) -> RemovalOutcome {
        if self.state.is_removing {
            debug!(purchase_id = self.purchase.id, "removal already in flight");
            return RemovalOutcome::AlreadyRemoving;
        }
        self.state.is_removing = true;

        if self.survey_active() {
            self.submit_survey();
        }

        let result = self
            .ports
            .purchases
            .remove_purchase(self.purchase.id, self.user_id)
            .await;
        match result {
            Ok(()) => self.complete_removal(),
            Err(error) => {
                warn!(
                    purchase_id = self.purchase.id,
                    error = %format!("{error:#}"),
                    "purchase removal failed"
                );
                self.fail_removal()
            }
        }
    }

    fn complete_removal(&mut self) -> RemovalOutcome {
        let site_deleted = self.cascade_site_deletion();

        let notice = success_notice(&self.purchase, &self.site);
        self.ports
            .notices
            .success(&notice, NoticeOptions { persistent: true });
        self.ports.navigator.navigate(PURCHASES_ROOT);

        info!(
            purchase_id = self.purchase.id,
            site_id = self.site.id,
            site_deleted,
            "purchase removed"
        );
        RemovalOutcome::Removed(RemovalReport {
            notice,
            site_deleted,
        })
    }

    /// Removing the domain of a domain-only site deletes the site. Both site
    /// stores are told, then the selection falls back to all sites.
    fn cascade_site_deletion(&self) -> bool {
        if !(self.purchase.is_domain_registration() && self.site.is_domain_only) {
            return false;
        }

        self.ports.legacy_sites.receive_deleted_site(&self.site);
        self.ports.sites.receive_deleted_site(&self.site);
        self.ports.selection.select_all_sites();
        info!(site_id = self.site.id, "domain-only site deleted with its domain");
        true
    }

    fn fail_removal(&mut self) -> RemovalOutcome {
        self.state.is_removing = false;
        self.close_dialog();

        // The store attaches the failure to the purchase record; an empty
        // message is shown when it did not.
        let message = self
            .ports
            .purchases
            .purchase(self.purchase.id)
            .and_then(|purchase| purchase.error)
            .or_else(|| self.purchase.error.clone())
            .unwrap_or_default();
        self.ports.notices.error(&message);

        RemovalOutcome::Failed { message }
    }
}
