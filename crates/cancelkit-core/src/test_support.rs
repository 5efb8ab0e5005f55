use crate::purchase::{PlanTier, ProductKind, Purchase};
use crate::site::Site;

pub fn plan_purchase() -> Purchase {
    Purchase {
        id: 101,
        product_slug: "business-bundle".to_string(),
        product_name: "Business".to_string(),
        kind: ProductKind::Plan,
        tier: PlanTier::Standard,
        included_domain: None,
        removable: true,
        subscribed_at: None,
        error: None,
    }
}

pub fn business_plan() -> Purchase {
    Purchase {
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
        ..plan_purchase()
    }
}

pub fn site() -> Site {
    Site {
        id: 42,
        domain: "example.blog".to_string(),
        is_domain_only: false,
        created_at: None,
    }
}
