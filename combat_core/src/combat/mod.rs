//! Combat - impact resolution pipeline and its results

mod pipeline;
mod result;

pub use pipeline::{resolve_impact, ImpactPayload, DEFAULT_TARGET_DEFENCE};
pub use result::ImpactResult;
