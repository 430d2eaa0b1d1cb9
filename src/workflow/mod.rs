pub mod segment_ctx;
pub mod segment_flow;

pub use segment_ctx::SegmentCtx;
pub use segment_flow::{SegmentFlow, SegmentOutcome};
