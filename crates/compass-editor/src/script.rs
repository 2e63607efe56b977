//! Command scripts
//!
//! A script is a RON list of [`SessionCommand`]s. Replaying it drives a
//! [`Session`] exactly as the same events from a pointer would.

use std::path::Path;

use compass_cad::Scene;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::actions::{SessionCommand, dispatch};
use crate::session::{ClickOutcome, Session};

/// Script error types
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Script parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ScriptResult<T> = Result<T, ScriptError>;

/// What one command did during a replay
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub command: SessionCommand,
    pub outcome: Option<ClickOutcome>,
    pub error: Option<String>,
}

impl StepReport {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Ordered list of commands
#[derive(Debug, Clone, Default)]
pub struct Script {
    commands: Vec<SessionCommand>,
}

impl Script {
    pub fn new(commands: Vec<SessionCommand>) -> Self {
        Self { commands }
    }

    pub fn parse(text: &str) -> ScriptResult<Self> {
        let commands: Vec<SessionCommand> = ron::from_str(text)?;
        Ok(Self::new(commands))
    }

    pub fn load(path: &Path) -> ScriptResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let script = Self::parse(&text)?;
        debug!("Loaded {} commands from {:?}", script.len(), path);
        Ok(script)
    }

    pub fn commands(&self) -> &[SessionCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Replay every command against the session.
    ///
    /// A failing command is recorded and the replay carries on, the same
    /// way an interactive session survives a bad click.
    pub fn run(&self, session: &mut Session) -> Vec<StepReport> {
        self.commands
            .iter()
            .map(|command| {
                let (outcome, error) = match dispatch(session, command.clone()) {
                    Ok(outcome) => (outcome, None),
                    Err(e) => {
                        warn!("{} failed: {}", command.description(), e);
                        (None, Some(e.to_string()))
                    }
                };
                StepReport {
                    command: command.clone(),
                    outcome,
                    error,
                }
            })
            .collect()
    }
}

/// Final state of a replay
#[derive(Debug, Serialize)]
pub struct ReplaySummary<'a> {
    pub scene: &'a Scene,
    pub steps: &'a [StepReport],
}

/// Render the scene and the per-command reports as pretty JSON
pub fn render_json(scene: &Scene, steps: &[StepReport]) -> ScriptResult<String> {
    Ok(serde_json::to_string_pretty(&ReplaySummary { scene, steps })?)
}
