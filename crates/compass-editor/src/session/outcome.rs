//! Session results and errors

use compass_cad::{CommitReceipt, ConstructionError, Keyframe, SceneError};
use serde::Serialize;
use thiserror::Error;

use crate::state::{InputKind, ToolStep};

/// Why a click was refused; the step stays where it was
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Rejection {
    /// The click landed too near the previous point
    TooClose { distance: f64, minimum: f64 },
    /// The compass opening is too small for the construction
    RadiusTooSmall { radius: f64, minimum: f64 },
    /// The external point of a tangent construction is not outside the circle
    PointInsideCircle { distance: f64, radius: f64 },
    /// The click missed the circle it had to land on
    OffCircle { distance: f64, tolerance: f64 },
    /// The point is too close to the line it has to be constructed from
    OnLine { distance: f64, minimum: f64 },
    /// The legs of an angle to bisect are (nearly) in line
    StraightAngle { sine: f64, minimum: f64 },
}

impl Rejection {
    /// Whether the user should be told about the rejection.
    ///
    /// Everything except a misplaced tangent point is silently retried.
    pub fn is_user_facing(&self) -> bool {
        matches!(self, Rejection::PointInsideCircle { .. })
    }

    /// Message shown for user-facing rejections
    pub fn message(&self) -> String {
        match self {
            Rejection::TooClose { distance, minimum } => {
                format!("Point is too close ({distance:.1} < {minimum:.1})")
            }
            Rejection::RadiusTooSmall { radius, minimum } => {
                format!("Radius {radius:.1} must be larger than {minimum:.1}")
            }
            Rejection::PointInsideCircle { .. } => {
                "Point M must lie outside the circle (O)!".to_string()
            }
            Rejection::OffCircle {
                distance,
                tolerance,
            } => format!("Click is {distance:.1} away from the circle (tolerance {tolerance:.1})"),
            Rejection::OnLine { distance, minimum } => {
                format!("Point is {distance:.1} from line d (needs {minimum:.1})")
            }
            Rejection::StraightAngle { .. } => "The two legs lie on one line".to_string(),
        }
    }
}

/// What a click or input did to the session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ClickOutcome {
    /// Nothing happened
    Ignored,
    /// The click was refused
    Rejected(Rejection),
    /// The tool moved on to another step
    Advanced(ToolStep),
    /// The tool is waiting for a typed value
    AwaitingInput(InputKind),
    /// A construction was computed and is playing back
    Animating(Vec<Keyframe>),
    /// Geometry was committed to the scene
    Committed(CommitReceipt),
}

impl ClickOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            ClickOutcome::Ignored => "Ignored",
            ClickOutcome::Rejected(_) => "Rejected",
            ClickOutcome::Advanced(_) => "Advanced",
            ClickOutcome::AwaitingInput(_) => "AwaitingInput",
            ClickOutcome::Animating(_) => "Animating",
            ClickOutcome::Committed(_) => "Committed",
        }
    }
}

/// Malformed numeric input; the prompt stays open
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("No value is being requested")]
    NotAwaitingInput,

    #[error("Not a number: {0:?}")]
    NotANumber(String),

    #[error("Value must be positive: {0}")]
    NonPositive(f64),

    #[error("Value {value} exceeds the maximum of {max}")]
    OutOfRange { value: f64, max: f64 },
}

/// Session-related errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// The construction could not be built; the tool was reset
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error("A construction is still animating")]
    Busy,

    #[error("Unknown lesson: {0}")]
    UnknownLesson(String),

    #[error("No point labelled {0:?}")]
    UnknownLabel(String),
}

pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_tangent_rejection_is_user_facing() {
        let inside = Rejection::PointInsideCircle {
            distance: 30.0,
            radius: 50.0,
        };
        assert!(inside.is_user_facing());
        assert!(inside.message().contains("outside"));

        assert!(
            !Rejection::TooClose {
                distance: 3.0,
                minimum: 20.0
            }
            .is_user_facing()
        );
        assert!(
            !Rejection::OffCircle {
                distance: 45.0,
                tolerance: 30.0
            }
            .is_user_facing()
        );
    }
}
