use std::{fmt, str::FromStr};

use crate::{
    foundation::error::{ScheduleError, ScheduleResult},
    schedule::generate::DEFAULT_FINAL_ITERATIONS,
};

/// Final iterations used by the stage-sliced affine dialects when the caller does not choose.
pub const AFFINE_FINAL_ITERATIONS: u32 = 50;

/// Output flavour expected by a particular downstream registration invocation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Dialect {
    /// `--convergence` / `--shrink-factors` / `--smoothing-sigmas` for a single stage.
    #[default]
    #[serde(rename = "generic")]
    Generic,
    /// Four overlapping stages, translation through affine.
    #[serde(rename = "affine")]
    Affine,
    /// `-q` / `-f` / `-s` flags of the model-building scripts.
    #[serde(rename = "modelbuild")]
    Modelbuild,
    /// `--reg-iterations` / `--reg-shrinks` / `--reg-smoothing` flags.
    #[serde(rename = "twolevel_dbm")]
    TwolevelDbm,
    /// Same stage layout as [`Dialect::Affine`].
    #[serde(rename = "multilevel-halving")]
    MultilevelHalving,
    /// Four stages, each over the whole schedule.
    #[serde(rename = "exhaustive-affine")]
    ExhaustiveAffine,
}

impl Dialect {
    pub const ALL: [Dialect; 6] = [
        Dialect::Generic,
        Dialect::Affine,
        Dialect::Modelbuild,
        Dialect::TwolevelDbm,
        Dialect::MultilevelHalving,
        Dialect::ExhaustiveAffine,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::Affine => "affine",
            Self::Modelbuild => "modelbuild",
            Self::TwolevelDbm => "twolevel_dbm",
            Self::MultilevelHalving => "multilevel-halving",
            Self::ExhaustiveAffine => "exhaustive-affine",
        }
    }

    /// Final-level iterations applied when the caller leaves them unset.
    pub fn default_final_iterations(self) -> u32 {
        match self {
            Self::Affine | Self::MultilevelHalving => AFFINE_FINAL_ITERATIONS,
            Self::Generic | Self::Modelbuild | Self::TwolevelDbm | Self::ExhaustiveAffine => {
                DEFAULT_FINAL_ITERATIONS
            }
        }
    }

    /// Whether the output is a sequence of transform stages rather than one flat block.
    pub fn is_staged(self) -> bool {
        matches!(
            self,
            Self::Affine | Self::MultilevelHalving | Self::ExhaustiveAffine
        )
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = ScheduleError;

    fn from_str(s: &str) -> ScheduleResult<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| ScheduleError::invalid_configuration(format!("unknown dialect '{s}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/dialect.rs"]
mod tests;
