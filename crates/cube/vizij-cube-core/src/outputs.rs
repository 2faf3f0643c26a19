//! Output contracts from a cube session.
//!
//! Every control event yields one `Evaluation`; adapters apply the pose to
//! the host scene and may keep the record for diagnostics.

use serde::{Deserialize, Serialize};

use crate::mapper::NormalizedCoord;
use crate::pose::Pose;

/// Which control triggered an evaluation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventSource {
    Point,
    Slider,
}

/// Result of one evaluate-and-apply cycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub source: EventSource,
    pub coord: NormalizedCoord,
    pub pose: Pose,
}
