//! Compass CAD
//!
//! Scene model and construction algorithms:
//! - [`scene`]: the authoritative collection of committed geometry
//! - [`construction`]: one pure function per classical construction, each
//!   returning a scene delta plus the keyframes that replay it

pub mod construction;
pub mod scene;

pub use construction::{
    Construction, ConstructionError, ConstructionRequest, ConstructionResult, Keyframe,
    PointHandle, construct,
};
pub use scene::{
    CommitReceipt, NewCircle, NewLine, NewPoint, PointRef, Scene, SceneDelta, SceneError,
    SceneResult,
};
