//! Pipeline policy types - profiles, the context gate, and the result shape

mod gate;
mod profile;
mod result;

pub use gate::{GateOutcome, GatePolicy};
pub use profile::ChatbotProfile;
pub use result::PipelineResult;
