use std::ops::Range;

use crate::{
    foundation::error::{ScheduleError, ScheduleResult},
    schedule::generate::MAX_ITERATIONS,
};

/// One entry of a [`Schedule`]: subsampling factor, smoothing sigma (mm) and
/// optimizer iteration budget for a single resolution level.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolutionLevel {
    /// Integer subsampling divisor, `>= 1`.
    pub shrink: u32,
    /// Gaussian smoothing sigma in physical units (mm), `>= 0`.
    pub blur: f64,
    /// Optimizer iterations, capped at [`MAX_ITERATIONS`](crate::MAX_ITERATIONS).
    pub iterations: u32,
}

/// Ordered coarse-to-fine sequence of resolution levels.
///
/// Index 0 is the coarsest level. A `Schedule` is built once by
/// [`generate`](crate::generate) and is read-only afterwards; formatters only
/// take views of it through [`Schedule::slice`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "LevelList")]
pub struct Schedule {
    levels: Vec<ResolutionLevel>,
}

#[derive(serde::Deserialize)]
struct LevelList {
    levels: Vec<ResolutionLevel>,
}

impl TryFrom<LevelList> for Schedule {
    type Error = ScheduleError;

    fn try_from(list: LevelList) -> ScheduleResult<Self> {
        for (i, lvl) in list.levels.iter().enumerate() {
            lvl.check().map_err(|why| {
                ScheduleError::invalid_configuration(format!("level {i}: {why}"))
            })?;
        }
        Ok(Self::from_levels(list.levels))
    }
}

impl ResolutionLevel {
    fn check(&self) -> Result<(), String> {
        if self.shrink < 1 {
            return Err(format!("shrink must be >= 1, got {}", self.shrink));
        }
        if !self.blur.is_finite() || self.blur < 0.0 {
            return Err(format!("blur must be finite and >= 0, got {}", self.blur));
        }
        if self.iterations > MAX_ITERATIONS {
            return Err(format!(
                "iterations must be <= {MAX_ITERATIONS}, got {}",
                self.iterations
            ));
        }
        Ok(())
    }
}

impl Schedule {
    pub(crate) fn from_levels(levels: Vec<ResolutionLevel>) -> Self {
        Self { levels }
    }

    /// Parse a schedule previously written with [`Schedule::to_json`].
    ///
    /// Levels outside the generator's bounds (shrink 0, negative or non-finite
    /// blur, iterations above [`MAX_ITERATIONS`]) are rejected.
    pub fn from_json(json: &str) -> ScheduleResult<Self> {
        let list: LevelList =
            serde_json::from_str(json).map_err(|e| ScheduleError::serde(e.to_string()))?;
        Self::try_from(list)
    }

    /// Serialize as `{"levels":[{"shrink":..,"blur":..,"iterations":..},..]}`.
    pub fn to_json(&self) -> ScheduleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScheduleError::serde(e.to_string()))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[ResolutionLevel] {
        &self.levels
    }

    /// Borrow a contiguous run of levels. Out-of-range bounds are clamped to
    /// the schedule length, and an inverted range yields an empty view.
    pub fn slice(&self, range: Range<usize>) -> &[ResolutionLevel] {
        let end = range.end.min(self.levels.len());
        let start = range.start.min(end);
        &self.levels[start..end]
    }

    pub fn shrinks(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.iter().map(|l| l.shrink)
    }

    pub fn blurs(&self) -> impl Iterator<Item = f64> + '_ {
        self.levels.iter().map(|l| l.blur)
    }

    pub fn iterations(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.iter().map(|l| l.iterations)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a ResolutionLevel;
    type IntoIter = std::slice::Iter<'a, ResolutionLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/level.rs"]
mod tests;
