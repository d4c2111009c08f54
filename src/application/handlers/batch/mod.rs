//! Batch lifecycle handlers.

mod lifecycle;

pub use lifecycle::{BatchError, BatchLifecycleHandler, ResetReport, RevertReport};
