//! ants-schedule computes multi-resolution registration schedules and renders
//! them as command-line fragments for ANTs registration scripts.
//!
//! # Pipeline overview
//!
//! 1. **Generate**: `ScheduleParams -> Schedule` (coarse-to-fine shrink / blur / iterations)
//! 2. **Render**: `Schedule + Dialect -> String` (flat parameter block or per-stage blocks)
//!
//! Both steps are pure. The only IO in the library is loading a
//! [`ScheduleRequest`] from a JSON file; the binary writes rendered text to stdout.
//!
//! ```
//! use ants_schedule::{Dialect, RenderOpts, ScheduleParams, generate, render};
//!
//! let params = ScheduleParams::new(1.0, 128.0).with_start_scale(4.0);
//! let schedule = generate(&params).unwrap();
//! let text = render(&schedule, Dialect::Generic, &RenderOpts::default());
//! assert!(text.contains("--shrink-factors 4x3x2x1"));
//! ```
#![forbid(unsafe_code)]

mod foundation;
mod render;
mod request;
mod schedule;

pub use foundation::error::{ScheduleError, ScheduleResult};
pub use render::dialect::{AFFINE_FINAL_ITERATIONS, Dialect};
pub use render::emit::{
    CONVERGENCE_WINDOW, DEFAULT_CONVERGENCE, FIXED_IMAGE, FIXED_MASK, GRADIENT_STEP, MOVING_IMAGE,
    MOVING_MASK, RenderOpts, SIGMA_UNIT, render,
};
pub use render::stage::{
    FINE_METRIC_RADIUS, METRIC_RADIUS, Mask, REPEATED_STAGE, STAGE_COUNT, StageSlice, Transform,
    slice_bounds, stage_plan,
};
pub use render::text::{LEVEL_SEPARATOR, join_levels, sigma_text};
pub use request::ScheduleRequest;
pub use schedule::generate::{
    DEFAULT_FINAL_ITERATIONS, MAX_ITERATIONS, ScheduleParams, fwhm_to_sigma, generate,
};
pub use schedule::level::{ResolutionLevel, Schedule};
pub use schedule::step::{POWER_OF_TWO_NAME, StepMode};
