use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

pub type SiteId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Site {
    pub id: SiteId,
    pub domain: String,
    /// True when the site exists only to hold a registered domain.
    #[serde(default)]
    pub is_domain_only: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}
