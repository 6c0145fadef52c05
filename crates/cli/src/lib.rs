//! Library side of the `translate-deck` tool: the pipeline and the job
//! runner the binary drives.

pub mod job;
pub mod layout;
pub mod pipeline;
pub mod progress;

pub use job::Job;
pub use layout::Layout;
pub use pipeline::{DeckPipeline, Granularity, PipelineOptions, PipelineReport, PipelineState};
pub use progress::{NoProgress, Progress};
