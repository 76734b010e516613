//! The save operation: normalize the selected file, then write its tags.

mod job;
mod save;

pub use job::SaveJob;
pub use save::{SaveOutcome, SavePipeline, SaveRequest};
