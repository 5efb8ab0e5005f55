use serde::{Deserialize, Serialize};

/// First-question choice that can route business customers to the concierge step.
pub const TOO_HARD: &str = "tooHard";
pub const ANOTHER_REASON_ONE: &str = "anotherReasonOne";
pub const ANOTHER_REASON_TWO: &str = "anotherReasonTwo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionId {
    WhyCancel,
    NextAdventure,
    WhatBetter,
}

impl QuestionId {
    pub fn field_key(self) -> &'static str {
        match self {
            Self::WhyCancel => "why-cancel",
            Self::NextAdventure => "next-adventure",
            Self::WhatBetter => "what-better",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SurveyAnswer {
    pub choice: Option<String>,
    pub text: String,
}

/// Partial update for one answer slot. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnswerPatch {
    #[serde(default)]
    pub choice: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl AnswerPatch {
    pub fn choice(value: impl Into<String>) -> Self {
        Self {
            choice: Some(value.into()),
            text: None,
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self {
            choice: None,
            text: Some(value.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurveyResponse {
    pub why_cancel: SurveyAnswer,
    pub next_adventure: SurveyAnswer,
    pub what_better: SurveyAnswer,
}

impl SurveyResponse {
    fn answer_mut(&mut self, question: QuestionId) -> &mut SurveyAnswer {
        match question {
            QuestionId::WhyCancel => &mut self.why_cancel,
            QuestionId::NextAdventure => &mut self.next_adventure,
            QuestionId::WhatBetter => &mut self.what_better,
        }
    }

    pub fn apply(&mut self, question: QuestionId, patch: AnswerPatch) {
        let answer = self.answer_mut(question);
        if let Some(choice) = patch.choice {
            answer.choice = Some(choice);
        }
        if let Some(text) = patch.text {
            answer.text = text;
        }
    }

    pub fn first_answer(&self) -> Option<&str> {
        self.why_cancel.choice.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Whether the "next" control may be used. Only the survey path is gated;
    /// plain confirmation dialogs always allow it.
    pub fn is_advance_allowed(&self, survey_active: bool) -> bool {
        if !survey_active {
            return true;
        }

        let (Some(first), Some(second)) = (
            self.why_cancel.choice.as_deref(),
            self.next_adventure.choice.as_deref(),
        ) else {
            return false;
        };

        if first == ANOTHER_REASON_ONE && self.why_cancel.text.is_empty() {
            return false;
        }
        if second == ANOTHER_REASON_TWO && self.next_adventure.text.is_empty() {
            return false;
        }

        true
    }
}
