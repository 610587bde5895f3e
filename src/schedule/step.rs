use std::{fmt, str::FromStr};

use crate::foundation::error::{ScheduleError, ScheduleResult};

/// Textual name of [`StepMode::PowerOfTwo`] on the command line and in JSON.
pub const POWER_OF_TWO_NAME: &str = "power2";

/// How the generator walks from the coarsest level to the finest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "StepModeRepr", into = "StepModeRepr")]
pub enum StepMode {
    /// Descend the shrink scale by a fixed integer step (must be `>= 1`).
    Integer(u32),
    /// Halve blur and shrink scales until the blur drops below half a voxel.
    PowerOfTwo,
}

impl StepMode {
    pub fn integer(step: i64) -> ScheduleResult<Self> {
        if step < 1 {
            return Err(ScheduleError::invalid_configuration(format!(
                "step size must be a positive integer or '{POWER_OF_TWO_NAME}', got {step}"
            )));
        }
        let step = u32::try_from(step).map_err(|_| {
            ScheduleError::invalid_configuration(format!("step size {step} is too large"))
        })?;
        Ok(Self::Integer(step))
    }

    pub(crate) fn validate(self) -> ScheduleResult<Self> {
        match self {
            Self::Integer(0) => Err(ScheduleError::invalid_configuration(
                "integer step size must be >= 1",
            )),
            other => Ok(other),
        }
    }
}

impl Default for StepMode {
    fn default() -> Self {
        Self::Integer(1)
    }
}

impl fmt::Display for StepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::PowerOfTwo => f.write_str(POWER_OF_TWO_NAME),
        }
    }
}

impl FromStr for StepMode {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == POWER_OF_TWO_NAME {
            return Ok(Self::PowerOfTwo);
        }
        match s.parse::<i64>() {
            Ok(n) => Self::integer(n),
            Err(_) => Err(ScheduleError::invalid_configuration(format!(
                "unrecognized step size '{s}'"
            ))),
        }
    }
}

#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
enum StepModeRepr {
    Integer(i64),
    Named(String),
}

impl TryFrom<StepModeRepr> for StepMode {
    type Error = ScheduleError;

    fn try_from(repr: StepModeRepr) -> Result<Self, Self::Error> {
        match repr {
            StepModeRepr::Integer(n) => Self::integer(n),
            StepModeRepr::Named(s) => s.parse(),
        }
    }
}

impl From<StepMode> for StepModeRepr {
    fn from(mode: StepMode) -> Self {
        match mode {
            StepMode::Integer(n) => Self::Integer(i64::from(n)),
            StepMode::PowerOfTwo => Self::Named(POWER_OF_TWO_NAME.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/step.rs"]
mod tests;
