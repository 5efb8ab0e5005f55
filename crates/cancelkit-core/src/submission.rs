use serde::Serialize;
use time::OffsetDateTime;

use crate::purchase::{Purchase, PurchaseId};
use crate::site::Site;
use crate::survey::SurveyResponse;

pub const REMOVE_PURCHASE_SURVEY: &str = "remove-purchase";
pub const SUBMISSION_TYPE: &str = "remove";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceField {
    pub response: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextField {
    pub text: String,
}

/// Exit survey payload sent to the telemetry endpoint. Never stored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveySubmission {
    #[serde(rename = "why-cancel")]
    pub why_cancel: ChoiceField,
    #[serde(rename = "next-adventure")]
    pub next_adventure: ChoiceField,
    #[serde(rename = "what-better")]
    pub what_better: TextField,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "purchaseId")]
    pub purchase_id: PurchaseId,
    pub purchase: String,
    #[serde(rename = "daysSincePurchase", skip_serializing_if = "Option::is_none")]
    pub days_since_purchase: Option<i64>,
    #[serde(
        rename = "daysSinceSiteCreation",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_since_site_creation: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl SurveySubmission {
    pub fn enriched(
        survey: &SurveyResponse,
        site: &Site,
        purchase: &Purchase,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            why_cancel: ChoiceField {
                response: survey.why_cancel.choice.clone(),
                text: survey.why_cancel.text.clone(),
            },
            next_adventure: ChoiceField {
                response: survey.next_adventure.choice.clone(),
                text: survey.next_adventure.text.clone(),
            },
            what_better: TextField {
                text: survey.what_better.text.clone(),
            },
            kind: SUBMISSION_TYPE.to_string(),
            purchase_id: purchase.id,
            purchase: purchase.product_slug.clone(),
            days_since_purchase: purchase
                .subscribed_at
                .map(|start| (timestamp - start).whole_days()),
            days_since_site_creation: site
                .created_at
                .map(|start| (timestamp - start).whole_days()),
            timestamp,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
