mod events;
mod flow;
mod ports;
mod removal;
mod submit;

pub use events::{
    CANCEL_FORM_CLOSE, CANCEL_FORM_START, CANCEL_FORM_STEP, CANCEL_FORM_SUBMIT,
    CANCELLATION_FLOW, PRECANCELLATION_CHAT_CLICK, TrackEvent,
};
pub use flow::{FlowError, FlowRequest, RemovalFlow};
pub use ports::{
    Analytics, Collaborators, ExperimentOracle, LegacySiteList, Navigator, NoticeOptions, Notices,
    PurchaseStore, SiteSelection, SiteStore, SurveyReceipt, SurveyTransport,
};
pub use removal::{PURCHASES_ROOT, RemovalOutcome, RemovalReport, success_notice};
