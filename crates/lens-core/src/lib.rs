pub mod adapters;
pub mod cache;
pub mod region;
pub mod request;
pub mod scheduler;
pub mod session;
pub mod sink;
pub mod worker;

pub use adapters::{CaptureAdapter, CaptureError, Frame, RecognitionAdapter, RecognizeError};
pub use cache::{CacheKey, CachePolicy, TranslationCache};
pub use region::RegionTracker;
pub use request::{ConsumedText, PipelineRequest};
pub use scheduler::{PipelineScheduler, PipelineState, SkipReason, TickDecision};
pub use session::{Session, interactive_loop};
pub use sink::{DisplayState, ResultSink};
pub use worker::{Completed, DispatchError, Outcome, SkipCause, WorkerExecutor, WorkerHandle, worker_loop};

#[cfg(test)]
mod tests;
