use crate::purchase::Purchase;
use crate::survey::TOO_HARD;

pub const CONCIERGE_EXPERIMENT: &str = "conciergeOfferOnCancel";
pub const SHOW_CONCIERGE_OFFER: &str = "showConciergeOffer";

/// Number of steps in the removal survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FinalStep {
    #[default]
    Two,
    Three,
}

impl FinalStep {
    pub fn as_step(self) -> u8 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

/// Decides survey length from the purchase, the current first answer and the
/// concierge experiment bucket. Callers re-run this on every advance so a
/// changed first answer can lengthen or shorten the survey mid-flow.
pub fn compute_final_step(
    purchase: Option<&Purchase>,
    first_answer: Option<&str>,
    experiment_variant: Option<&str>,
) -> FinalStep {
    let Some(purchase) = purchase else {
        return FinalStep::Two;
    };

    if purchase.is_business()
        && first_answer == Some(TOO_HARD)
        && experiment_variant == Some(SHOW_CONCIERGE_OFFER)
    {
        FinalStep::Three
    } else {
        FinalStep::Two
    }
}
