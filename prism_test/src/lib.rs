//! Test support for Prism materials.
//!
//! * [`RecordingEffect`] is an [`Effect`] with a fixed set of uniforms that records every upload.
//! * [`capture_logs`] collects the log records emitted on the current thread.
//!
//! [`Effect`]: prism_material::Effect

#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    rust_2018_compatibility
)]
#![warn(clippy::all)]

pub use self::{
    effect::{Recorded, RecordingEffect, Upload},
    logging::{capture_logs, CapturedRecord},
};

mod effect;
mod logging;
