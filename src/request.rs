use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::error::{ScheduleError, ScheduleResult},
    render::{
        dialect::Dialect,
        emit::{DEFAULT_CONVERGENCE, RenderOpts, render},
    },
    schedule::{
        generate::{ScheduleParams, generate},
        level::Schedule,
        step::StepMode,
    },
};

fn default_convergence() -> String {
    DEFAULT_CONVERGENCE.to_string()
}

/// Everything needed for one invocation: physical parameters, output dialect
/// and convergence threshold. Deserializable from JSON so a request can be
/// kept in a file next to the images it describes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleRequest {
    /// Smallest voxel spacing of the fixed image (mm).
    pub min_resolution: f64,
    /// Largest physical extent of the fixed image (mm).
    pub max_size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_scale: Option<f64>,
    /// Unset means [`Dialect::default_final_iterations`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_iterations: Option<u32>,
    #[serde(default)]
    pub step: StepMode,
    #[serde(default)]
    pub dialect: Dialect,
    #[serde(default = "default_convergence")]
    pub convergence: String,
}

impl ScheduleRequest {
    pub fn new(min_resolution: f64, max_size: f64) -> Self {
        Self {
            min_resolution,
            max_size,
            start_scale: None,
            final_iterations: None,
            step: StepMode::default(),
            dialect: Dialect::default(),
            convergence: default_convergence(),
        }
    }

    /// Load a JSON request from disk.
    pub fn from_path(path: &Path) -> ScheduleResult<Self> {
        let f = File::open(path).with_context(|| format!("open request '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ScheduleError::serde(format!("parse request '{}': {e}", path.display())))
    }

    pub fn from_json(json: &str) -> ScheduleResult<Self> {
        serde_json::from_str(json).map_err(|e| ScheduleError::serde(e.to_string()))
    }

    /// Final-level iterations after applying the dialect default.
    pub fn effective_final_iterations(&self) -> u32 {
        self.final_iterations
            .unwrap_or_else(|| self.dialect.default_final_iterations())
    }

    pub fn params(&self) -> ScheduleParams {
        ScheduleParams {
            min_resolution: self.min_resolution,
            max_size: self.max_size,
            start_scale: self.start_scale,
            final_iterations: self.effective_final_iterations(),
            step: self.step,
        }
    }

    pub fn render_opts(&self) -> RenderOpts {
        RenderOpts::with_convergence(self.convergence.clone())
    }

    pub fn schedule(&self) -> ScheduleResult<Schedule> {
        generate(&self.params())
    }

    /// Generate the schedule and render it in the requested dialect.
    ///
    /// Fails before producing any text if the parameters are rejected.
    pub fn run(&self) -> ScheduleResult<String> {
        let schedule = self.schedule()?;
        Ok(render(&schedule, self.dialect, &self.render_opts()))
    }
}

#[cfg(test)]
#[path = "../tests/unit/request.rs"]
mod tests;
