use crate::{
    foundation::error::{ScheduleError, ScheduleResult},
    schedule::{
        level::{ResolutionLevel, Schedule},
        step::StepMode,
    },
};

/// Upper bound on the optimizer iterations of any single level.
pub const MAX_ITERATIONS: u32 = 500;

/// Iterations used at the finest level when the caller does not choose.
pub const DEFAULT_FINAL_ITERATIONS: u32 = 25;

/// Factor converting a Gaussian full-width-half-maximum into a sigma,
/// `2 * sqrt(2 * ln 2)` (about 2.3548).
pub fn fwhm_to_sigma() -> f64 {
    2.0 * (2.0 * 2.0_f64.ln()).sqrt()
}

/// Physical inputs of the schedule generator.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduleParams {
    /// Smallest voxel spacing of the fixed image (mm).
    pub min_resolution: f64,
    /// Largest physical extent of the fixed image (mm).
    pub max_size: f64,
    /// Coarsest scale (mm); derived from `max_size` when unset.
    pub start_scale: Option<f64>,
    /// Iterations at the finest level; coarser levels get geometrically more.
    pub final_iterations: u32,
    pub step: StepMode,
}

impl ScheduleParams {
    pub fn new(min_resolution: f64, max_size: f64) -> Self {
        Self {
            min_resolution,
            max_size,
            start_scale: None,
            final_iterations: DEFAULT_FINAL_ITERATIONS,
            step: StepMode::default(),
        }
    }

    pub fn with_start_scale(mut self, start_scale: f64) -> Self {
        self.start_scale = Some(start_scale);
        self
    }

    pub fn with_final_iterations(mut self, final_iterations: u32) -> Self {
        self.final_iterations = final_iterations;
        self
    }

    pub fn with_step(mut self, step: StepMode) -> Self {
        self.step = step;
        self
    }

    /// Shrink scale of the coarsest level, in voxels.
    pub fn start_shrink(&self) -> f64 {
        match self.start_scale {
            Some(scale) => scale / self.min_resolution,
            None => self.max_size / 28.0 / self.min_resolution * 2.0,
        }
    }

    /// Largest shrink factor that still leaves 32 voxels across `max_size`.
    pub fn max_shrink(&self) -> f64 {
        self.max_size / self.min_resolution / 32.0
    }

    /// Reject inputs that would produce NaN levels or never terminate.
    pub fn validate(&self) -> ScheduleResult<()> {
        fn positive(name: &str, v: f64) -> ScheduleResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(ScheduleError::invalid_configuration(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
            Ok(())
        }

        positive("min_resolution", self.min_resolution)?;
        positive("max_size", self.max_size)?;
        if let Some(scale) = self.start_scale {
            positive("start_scale", scale)?;
        }
        positive("start shrink", self.start_shrink())?;
        positive("start blur scale", self.start_shrink() * 2.0 * self.min_resolution)?;
        self.step.validate()?;
        Ok(())
    }
}

/// Build the coarse-to-fine schedule for `params`.
///
/// The result is finalized on return; every level satisfies
/// `1 <= shrink`, `shrink <= max(1, max_shrink)` and `iterations <= MAX_ITERATIONS`.
/// An integer-step start that rounds to zero yields an empty schedule.
#[tracing::instrument(level = "debug")]
pub fn generate(params: &ScheduleParams) -> ScheduleResult<Schedule> {
    params.validate()?;

    let max_shrink = params.max_shrink();
    if max_shrink < 1.0 {
        tracing::warn!(
            max_shrink,
            "image is smaller than 32 voxels across; every shrink factor is pinned to 1"
        );
    }

    let walk = match params.step {
        StepMode::Integer(step) => integer_levels(params, step),
        StepMode::PowerOfTwo => power_of_two_levels(params),
    };
    if walk.clamped > 0 && max_shrink >= 1.0 {
        tracing::warn!(
            clamped = walk.clamped,
            max_shrink,
            "shrink factors reduced to keep 32 voxels across the image"
        );
    }
    tracing::debug!(levels = walk.levels.len(), step = %params.step, "generated schedule");

    Ok(Schedule::from_levels(walk.levels))
}

/// Levels produced by one walk, plus how many had their rounded shrink
/// lowered by the `max_shrink` cap.
#[derive(Debug, Default)]
struct Walk {
    levels: Vec<ResolutionLevel>,
    clamped: usize,
}

impl Walk {
    fn push(&mut self, scale: f64, max_shrink: f64, blur: f64, iterations: u32) {
        let (shrink, clamped) = clamp_shrink(scale, max_shrink);
        self.clamped += usize::from(clamped);
        self.levels.push(ResolutionLevel {
            shrink,
            blur,
            iterations,
        });
    }
}

fn integer_levels(params: &ScheduleParams, step: u32) -> Walk {
    let min = params.min_resolution;
    let max_shrink = params.max_shrink();
    let fwhm_sq = fwhm_to_sigma().powi(2);

    let mut walk = Walk::default();
    let start = params.start_shrink().round_ties_even();
    if start < 1.0 {
        return walk;
    }

    let step = u64::from(step);
    let mut scale = start as u64;
    tracing::debug!(
        start = scale,
        step,
        expected_levels = scale.div_ceil(step),
        "integer walk"
    );
    while scale > 0 {
        let s = scale as f64;
        walk.push(
            s,
            max_shrink,
            (((s * min).powi(2) - min.powi(2)) / fwhm_sq).sqrt(),
            iterations_at(params.final_iterations, s),
        );
        scale = scale.saturating_sub(step);
    }
    walk
}

fn power_of_two_levels(params: &ScheduleParams) -> Walk {
    let min = params.min_resolution;
    let max_shrink = params.max_size / 32.0 / min;
    let fwhm = fwhm_to_sigma();

    let mut shrink_scale = params.start_shrink();
    let mut blur_scale = shrink_scale * 2.0 * min;
    let mut walk = Walk::default();
    while blur_scale > 0.5 * min {
        walk.push(
            shrink_scale,
            max_shrink,
            blur_scale / fwhm,
            iterations_at(params.final_iterations, shrink_scale),
        );
        blur_scale /= 2.0;
        shrink_scale /= 2.0;
    }
    walk
}

/// Rounded shrink capped at `max_shrink`, and whether the cap lowered it.
fn clamp_shrink(scale: f64, max_shrink: f64) -> (u32, bool) {
    let rounded = scale.round_ties_even().max(1.0);
    let capped = rounded.min(max_shrink);
    // `max_shrink` below 1 would truncate to 0.
    let shrink = (capped.trunc() as u32).max(1);
    (shrink, f64::from(shrink) < rounded)
}

fn iterations_at(final_iterations: u32, shrink_scale: f64) -> u32 {
    if final_iterations == 0 {
        return 0;
    }
    let growth = 3.0_f64.powf((shrink_scale - 1.0).max(0.0));
    let raw = (f64::from(final_iterations) * growth).trunc();
    raw.min(f64::from(MAX_ITERATIONS)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/generate.rs"]
mod tests;
