//! Audio rendering worker built on `rodio`.
//!
//! The worker owns the output stream on its own thread, streams track
//! bytes over HTTP and reports ended/failed playback back to the runtime.

mod output;
mod sink;
mod thread;
mod types;

pub use output::*;
pub use types::*;
