use std::ops::Range;

use crate::render::dialect::Dialect;

/// Number of primary stages in every staged dialect.
pub const STAGE_COUNT: usize = 4;

/// Mattes neighbourhood radius for every stage except the last halving stage.
pub const METRIC_RADIUS: u32 = 32;

/// Wider radius used by the final stage of the halving layout.
pub const FINE_METRIC_RADIUS: u32 = 64;

/// Zero-based index of the stage that is emitted a second time with masks.
pub const REPEATED_STAGE: usize = 2;

/// Transform family of a stage, in order of increasing degrees of freedom.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transform {
    Translation,
    Rigid,
    Similarity,
    Affine,
}

impl Transform {
    pub const ORDER: [Transform; STAGE_COUNT] = [
        Transform::Translation,
        Transform::Rigid,
        Transform::Similarity,
        Transform::Affine,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Translation => "Translation",
            Self::Rigid => "Rigid",
            Self::Similarity => "Similarity",
            Self::Affine => "Affine",
        }
    }
}

/// Spatial mask applied to a stage's metric.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mask {
    /// No mask on either image.
    Unmasked,
    /// The caller's fixed/moving mask placeholders.
    FixedMoving,
}

impl Mask {
    fn for_primary_stage(index: usize) -> Self {
        if index == STAGE_COUNT - 1 {
            Self::FixedMoving
        } else {
            Self::Unmasked
        }
    }
}

/// A stage block to emit: a contiguous view into the schedule plus the
/// transform, metric and mask configuration for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageSlice {
    pub range: Range<usize>,
    pub transform: Transform,
    pub metric_radius: u32,
    pub mask: Mask,
    /// Set on the masked re-run emitted right after the primary stage.
    pub repeated: bool,
}

/// Index bounds of halving-layout stage `stage_index` over a schedule of `len` levels.
///
/// Bounds are `round(f * len)` with round-half-to-even, using start fractions
/// 0, .25, .5, .75 and end fractions .5, .75, .95, 1. Neighbouring stages
/// overlap. An index past the last stage yields the empty range `len..len`.
pub fn slice_bounds(len: usize, stage_index: usize) -> Range<usize> {
    const STARTS: [f64; STAGE_COUNT] = [0.0, 0.25, 0.50, 0.75];
    const ENDS: [f64; STAGE_COUNT - 1] = [0.50, 0.75, 0.95];

    if stage_index >= STAGE_COUNT {
        return len..len;
    }
    let start = fraction_index(len, STARTS[stage_index]);
    let end = ENDS
        .get(stage_index)
        .map_or(len, |&f| fraction_index(len, f));
    start.min(end)..end
}

fn fraction_index(len: usize, fraction: f64) -> usize {
    let idx = (fraction * len as f64).round_ties_even() as usize;
    idx.min(len)
}

/// Stage blocks a dialect emits for a schedule of `len` levels, in output order.
///
/// Flat dialects have no stages and return an empty plan. Staged dialects
/// always return five blocks: the four primary stages plus a masked re-run of
/// the similarity stage placed directly after it.
pub fn stage_plan(dialect: Dialect, len: usize) -> Vec<StageSlice> {
    if !dialect.is_staged() {
        return Vec::new();
    }
    let halving = dialect != Dialect::ExhaustiveAffine;

    let mut plan = Vec::with_capacity(STAGE_COUNT + 1);
    for (i, transform) in Transform::ORDER.into_iter().enumerate() {
        let (range, metric_radius) = if halving {
            let radius = if i == STAGE_COUNT - 1 {
                FINE_METRIC_RADIUS
            } else {
                METRIC_RADIUS
            };
            (slice_bounds(len, i), radius)
        } else {
            (0..len, METRIC_RADIUS)
        };

        let stage = StageSlice {
            range,
            transform,
            metric_radius,
            mask: Mask::for_primary_stage(i),
            repeated: false,
        };
        let repeat = (i == REPEATED_STAGE).then(|| StageSlice {
            mask: Mask::FixedMoving,
            repeated: true,
            ..stage.clone()
        });
        plan.push(stage);
        plan.extend(repeat);
    }
    plan
}

#[cfg(test)]
#[path = "../../tests/unit/render/stage.rs"]
mod tests;
