use cancelkit_core::buttons::{ButtonFlags, DialogButton, dialog_buttons};
use cancelkit_core::config::Features;
use cancelkit_core::eligibility::{CONCIERGE_EXPERIMENT, FinalStep, compute_final_step};
use cancelkit_core::purchase::{Purchase, UserId};
use cancelkit_core::router::{Direction, FlowState};
use cancelkit_core::site::Site;
use cancelkit_core::survey::{AnswerPatch, QuestionId, SurveyResponse};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::events::{
    CANCEL_FORM_CLOSE, CANCEL_FORM_START, CANCEL_FORM_STEP, PRECANCELLATION_CHAT_CLICK, TrackEvent,
};
use crate::ports::Collaborators;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRequest {
    pub purchase: Purchase,
    pub site: Option<Site>,
    pub user_id: UserId,
    pub purchases_loaded: bool,
    pub features: Features,
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("purchases are still loading")]
    PurchasesLoading,
    #[error("no site is selected")]
    MissingSite,
    #[error("'{product_name}' cannot be removed")]
    NotRemovable { product_name: String },
}

/// Owns the dialog state and survey answers for removing one purchase.
pub struct RemovalFlow {
    pub(crate) purchase: Purchase,
    pub(crate) site: Site,
    pub(crate) user_id: UserId,
    pub(crate) features: Features,
    pub(crate) state: FlowState,
    pub(crate) survey: SurveyResponse,
    pub(crate) ports: Collaborators,
    pub(crate) survey_task: Option<JoinHandle<()>>,
}

impl RemovalFlow {
    pub fn new(request: FlowRequest, ports: Collaborators) -> Result<Self, FlowError> {
        if !request.purchases_loaded {
            return Err(FlowError::PurchasesLoading);
        }
        let site = request.site.ok_or(FlowError::MissingSite)?;
        if !request.purchase.removable {
            return Err(FlowError::NotRemovable {
                product_name: request.purchase.product_name,
            });
        }

        Ok(Self {
            purchase: request.purchase,
            site,
            user_id: request.user_id,
            features: request.features,
            state: FlowState::default(),
            survey: SurveyResponse::default(),
            ports,
            survey_task: None,
        })
    }

    pub fn state(&self) -> &FlowState {
        &self.state
    }

    pub fn survey(&self) -> &SurveyResponse {
        &self.survey
    }

    pub fn purchase(&self) -> &Purchase {
        &self.purchase
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Domain registrations use a plain confirmation; everything else gets the
    /// exit survey when the feature is on.
    pub fn survey_active(&self) -> bool {
        !self.purchase.is_domain_registration() && self.features.removal_survey
    }

    pub fn open_dialog(&mut self) {
        self.record(CANCEL_FORM_START, Map::new());
        self.state.is_dialog_visible = true;
    }

    pub fn close_dialog(&mut self) {
        self.record(CANCEL_FORM_CLOSE, Map::new());
        self.state.close();
        self.survey = SurveyResponse::default();
    }

    /// Pre-cancellation chat hand-off: hides the dialog, keeps step and answers.
    /// Ignored while a removal is in flight.
    pub fn chat_clicked(&mut self) {
        if self.state.is_removing {
            debug!(purchase_id = self.purchase.id, "chat ignored while removing");
            return;
        }

        let mut properties = Map::new();
        properties.insert(
            "survey_step".to_string(),
            Value::from(self.state.current_step),
        );
        properties.insert(
            "purchase".to_string(),
            Value::from(self.purchase.product_slug.as_str()),
        );
        properties.insert("is_plan".to_string(), Value::from(self.purchase.is_plan()));
        properties.insert(
            "is_domain_registration".to_string(),
            Value::from(self.purchase.is_domain_registration()),
        );
        properties.insert(
            "has_included_domain".to_string(),
            Value::from(self.purchase.has_included_domain()),
        );
        self.ports
            .analytics
            .record(TrackEvent::new(PRECANCELLATION_CHAT_CLICK, properties));

        self.state.is_dialog_visible = false;
    }

    pub fn set_response(&mut self, question: QuestionId, patch: AnswerPatch) {
        self.survey.apply(question, patch);
    }

    pub fn is_advance_allowed(&self) -> bool {
        self.survey.is_advance_allowed(self.survey_active())
    }

    /// Survey length for the current first answer. Queried fresh every time.
    pub fn final_step(&self) -> FinalStep {
        let variant = self.ports.experiments.variant(CONCIERGE_EXPERIMENT);
        compute_final_step(
            Some(&self.purchase),
            self.survey.first_answer(),
            variant.as_deref(),
        )
    }

    pub fn advance(&mut self, direction: Direction) -> u8 {
        let final_step = self.final_step();
        let new_step = self.state.advance(direction, final_step);
        debug!(
            new_step,
            final_step = final_step.as_step(),
            ?direction,
            "survey step changed"
        );

        let mut properties = Map::new();
        properties.insert("new_step".to_string(), Value::from(new_step));
        self.record(CANCEL_FORM_STEP, properties);
        new_step
    }

    pub fn buttons(&self) -> Vec<DialogButton> {
        dialog_buttons(
            &self.purchase,
            &self.state,
            ButtonFlags {
                removal_survey: self.features.removal_survey,
                precancellation_chat: self.features.precancellation_chat,
                advance_allowed: self.is_advance_allowed(),
            },
        )
    }

    /// Hands over the detached survey task so a host can wait for it before
    /// shutting down. The flow itself never awaits it.
    pub fn take_survey_task(&mut self) -> Option<JoinHandle<()>> {
        self.survey_task.take()
    }

    pub(crate) fn record(&self, name: &str, extra: Map<String, Value>) {
        self.ports.analytics.record(TrackEvent::cancel_form(
            name,
            &self.purchase.product_slug,
            extra,
        ));
    }
}
