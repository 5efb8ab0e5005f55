use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub type PurchaseId = u64;
pub type UserId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductKind {
    DomainRegistration,
    Plan,
    AddOn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Standard,
    Business,
}

/// A billable item as supplied by the purchases store. Read-only to the flow.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Purchase {
    pub id: PurchaseId,
    pub product_slug: String,
    pub product_name: String,
    pub kind: ProductKind,
    #[serde(default)]
    pub tier: PlanTier,
    #[serde(default)]
    pub included_domain: Option<String>,
    #[serde(default = "default_removable")]
    pub removable: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub subscribed_at: Option<OffsetDateTime>,
    /// Last error the store attached after a failed operation on this item.
    #[serde(default)]
    pub error: Option<String>,
}

fn default_removable() -> bool {
    true
}

impl Purchase {
    pub fn is_domain_registration(&self) -> bool {
        self.kind == ProductKind::DomainRegistration
    }

    pub fn is_plan(&self) -> bool {
        self.kind == ProductKind::Plan
    }

    pub fn is_business(&self) -> bool {
        self.tier == PlanTier::Business
    }

    pub fn has_included_domain(&self) -> bool {
        self.included_domain
            .as_deref()
            .is_some_and(|domain| !domain.trim().is_empty())
    }
}
