use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use cancelkit_app::{FlowRequest, RemovalFlow, RemovalOutcome, TrackEvent};
use cancelkit_core::buttons::DialogButton;
use cancelkit_core::config::Features;
use cancelkit_core::purchase::{Purchase, UserId};
use cancelkit_core::router::Direction;
use cancelkit_core::site::Site;
use cancelkit_core::survey::{AnswerPatch, QuestionId};
use serde::Deserialize;
use thiserror::Error;

use crate::host::{HostEntry, InMemoryHost};

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub user_id: UserId,
    pub purchase: Purchase,
    pub site: Site,
    #[serde(default)]
    pub features: Features,
    #[serde(default)]
    pub experiments: BTreeMap<String, String>,
    #[serde(default)]
    pub transport: TransportScript,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
}

/// Scripted transport behavior. Everything succeeds unless set.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransportScript {
    pub removal_error: Option<String>,
    /// Error the store attaches to the purchase when removal fails.
    pub attached_error: Option<String>,
    pub survey_error: Option<String>,
    pub survey_rejection: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum ScenarioStep {
    Open,
    Close,
    Chat,
    Answer {
        question: QuestionId,
        #[serde(default)]
        choice: Option<String>,
        #[serde(default)]
        text: Option<String>,
    },
    Next,
    Previous,
    Confirm,
}

impl ScenarioStep {
    pub fn label(&self) -> String {
        match self {
            Self::Open => "open".to_string(),
            Self::Close => "close".to_string(),
            Self::Chat => "chat".to_string(),
            Self::Answer { question, .. } => format!("answer {}", question.field_key()),
            Self::Next => "next".to_string(),
            Self::Previous => "previous".to_string(),
            Self::Confirm => "confirm".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scenario at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub fn load_scenario(path: &Path) -> Result<Scenario, ScenarioError> {
    let raw = fs::read_to_string(path).map_err(|source| ScenarioError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&raw).map_err(|source| ScenarioError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRow {
    pub action: String,
    pub outcome: String,
    pub current_step: u8,
    pub final_step: u8,
    pub dialog_visible: bool,
    pub removing: bool,
    pub buttons: Vec<DialogButton>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WalkReport {
    pub product_name: String,
    pub site_domain: String,
    pub rows: Vec<StepRow>,
    pub host_log: Vec<HostEntry>,
    pub events: Vec<TrackEvent>,
}

/// Drives the scenario through a removal flow. Blocked "next" presses are
/// reported instead of applied, the way a dialog would disable the button.
pub async fn walk(scenario: Scenario) -> Result<WalkReport> {
    let host = Arc::new(InMemoryHost::new(
        scenario.purchase.clone(),
        scenario.transport,
        scenario.experiments,
    ));
    let mut flow = RemovalFlow::new(
        FlowRequest {
            purchase: scenario.purchase,
            site: Some(scenario.site),
            user_id: scenario.user_id,
            purchases_loaded: true,
            features: scenario.features,
        },
        host.collaborators(),
    )
    .context("removal is not offered for this purchase")?;

    let mut rows = Vec::with_capacity(scenario.steps.len());
    for step in scenario.steps {
        let action = step.label();
        let outcome = apply_step(&mut flow, step).await;
        let state = *flow.state();
        rows.push(StepRow {
            action,
            outcome,
            current_step: state.current_step,
            final_step: state.final_step.as_step(),
            dialog_visible: state.is_dialog_visible,
            removing: state.is_removing,
            buttons: flow.buttons(),
        });
    }

    if let Some(task) = flow.take_survey_task() {
        task.await.context("survey submission task failed")?;
    }

    Ok(WalkReport {
        product_name: flow.purchase().product_name.clone(),
        site_domain: flow.site().domain.clone(),
        rows,
        host_log: host.entries(),
        events: host.events(),
    })
}

async fn apply_step(flow: &mut RemovalFlow, step: ScenarioStep) -> String {
    match step {
        ScenarioStep::Open => {
            flow.open_dialog();
            "dialog open".to_string()
        }
        ScenarioStep::Close => {
            flow.close_dialog();
            "dialog closed".to_string()
        }
        ScenarioStep::Chat => {
            flow.chat_clicked();
            "handed to chat".to_string()
        }
        ScenarioStep::Answer {
            question,
            choice,
            text,
        } => {
            flow.set_response(question, AnswerPatch { choice, text });
            if flow.is_advance_allowed() {
                "answers complete".to_string()
            } else {
                "answers incomplete".to_string()
            }
        }
        ScenarioStep::Next => {
            if !flow.is_advance_allowed() {
                return "blocked: answers incomplete".to_string();
            }
            format!("step {}", flow.advance(Direction::Forward))
        }
        ScenarioStep::Previous => format!("step {}", flow.advance(Direction::Backward)),
        ScenarioStep::Confirm => match flow.confirm_removal().await {
            RemovalOutcome::Removed(report) if report.site_deleted => {
                "removed (site deleted)".to_string()
            }
            RemovalOutcome::Removed(_) => "removed".to_string(),
            RemovalOutcome::Failed { message } => format!("failed: {message}"),
            RemovalOutcome::AlreadyRemoving => "ignored: already removing".to_string(),
        },
    }
}
