//! Compass Editor
//!
//! The interactive side of the construction engine, without any rendering:
//! - [`session`]: the tool step state machine driven by clicks and typed values
//! - [`snap`]: magnetic snapping of the cursor onto points and lines
//! - [`lessons`]: the guided lesson catalogue
//! - [`actions`] and [`script`]: user events as values, and their replay

pub mod actions;
pub mod config;
pub mod lessons;
pub mod script;
pub mod session;
pub mod snap;
pub mod state;

pub use actions::{SessionCommand, dispatch};
pub use config::{AppConfig, ConfigManager, SharedConfig, create_shared_config, shared_config_at};
pub use lessons::Lesson;
pub use script::{Script, ScriptError, ScriptResult, StepReport, render_json};
pub use session::{ClickEvent, ClickOutcome, Rejection, Session, SessionError, SessionResult};
pub use snap::{SnapKind, SnapResult};
pub use state::{ConstructionTool, InputKind, ToolStep};
