use crate::{
    render::{
        dialect::Dialect,
        stage::{Mask, StageSlice, stage_plan},
        text::{join_levels, sigma_text},
    },
    schedule::level::{ResolutionLevel, Schedule},
};

/// Convergence threshold used when the caller does not supply one.
pub const DEFAULT_CONVERGENCE: &str = "1e-6";

/// Convergence window size appended to every `--convergence` declaration.
pub const CONVERGENCE_WINDOW: u32 = 10;

/// Gradient step of every emitted transform.
pub const GRADIENT_STEP: &str = "0.1";

/// Physical unit suffix of joined smoothing sigmas.
pub const SIGMA_UNIT: &str = "mm";

/// Placeholders left for the calling script to substitute.
pub const FIXED_IMAGE: &str = "${fixedfile}";
pub const MOVING_IMAGE: &str = "${movingfile}";
pub const FIXED_MASK: &str = "${fixedmask}";
pub const MOVING_MASK: &str = "${movingmask}";

const CONTINUATION: &str = " \\\n";
const TERMINATOR: &str = " ";

/// Formatter options.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderOpts {
    /// Passed through verbatim into every convergence declaration.
    pub convergence_threshold: String,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            convergence_threshold: DEFAULT_CONVERGENCE.to_string(),
        }
    }
}

impl RenderOpts {
    pub fn with_convergence(threshold: impl Into<String>) -> Self {
        Self {
            convergence_threshold: threshold.into(),
        }
    }
}

/// Joined `x`-separated text of the three schedule columns over some levels.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Columns {
    iterations: String,
    shrinks: String,
    sigmas: String,
}

impl Columns {
    fn of(levels: &[ResolutionLevel]) -> Self {
        Self {
            iterations: join_levels(levels.iter().map(|l| l.iterations)),
            shrinks: join_levels(levels.iter().map(|l| l.shrink)),
            sigmas: join_levels(levels.iter().map(|l| sigma_text(l.blur))),
        }
    }
}

/// Render `schedule` in the requested dialect.
///
/// Lines are joined with shell line continuations (` \` + newline); the last
/// line ends in a single space instead so the text can be spliced into a
/// larger command. An empty schedule renders with empty joined values.
#[tracing::instrument(level = "debug", skip(schedule, opts), fields(levels = schedule.len()))]
pub fn render(schedule: &Schedule, dialect: Dialect, opts: &RenderOpts) -> String {
    let lines = match dialect {
        Dialect::Generic => generic_lines(schedule, opts),
        Dialect::TwolevelDbm => twolevel_dbm_lines(schedule),
        Dialect::Modelbuild => modelbuild_lines(schedule),
        Dialect::Affine | Dialect::MultilevelHalving | Dialect::ExhaustiveAffine => {
            staged_lines(schedule, dialect, opts)
        }
    };
    continue_lines(&lines)
}

fn continue_lines(lines: &[String]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        out.push_str(line);
        if i + 1 == lines.len() {
            out.push_str(TERMINATOR);
        } else {
            out.push_str(CONTINUATION);
        }
    }
    out
}

fn generic_lines(schedule: &Schedule, opts: &RenderOpts) -> Vec<String> {
    let cols = Columns::of(schedule.levels());
    vec![
        convergence_decl(&cols, opts),
        format!("--shrink-factors {}", cols.shrinks),
        format!("--smoothing-sigmas {}{SIGMA_UNIT}", cols.sigmas),
    ]
}

fn twolevel_dbm_lines(schedule: &Schedule) -> Vec<String> {
    let cols = Columns::of(schedule.levels());
    vec![
        format!("--reg-iterations {}", cols.iterations),
        format!("--reg-shrinks {}", cols.shrinks),
        format!("--reg-smoothing {}{SIGMA_UNIT}", cols.sigmas),
    ]
}

fn modelbuild_lines(schedule: &Schedule) -> Vec<String> {
    let cols = Columns::of(schedule.levels());
    vec![
        format!("-q {}", cols.iterations),
        format!("-f {}", cols.shrinks),
        format!("-s {}{SIGMA_UNIT}", cols.sigmas),
    ]
}

fn staged_lines(schedule: &Schedule, dialect: Dialect, opts: &RenderOpts) -> Vec<String> {
    let plan = stage_plan(dialect, schedule.len());
    let mut lines = Vec::with_capacity(plan.len() * 6);
    for stage in &plan {
        tracing::debug!(
            transform = stage.transform.name(),
            start = stage.range.start,
            end = stage.range.end,
            repeated = stage.repeated,
            "stage block"
        );
        lines.extend(stage_block(schedule, stage, opts));
    }
    lines
}

fn stage_block(schedule: &Schedule, stage: &StageSlice, opts: &RenderOpts) -> [String; 6] {
    let cols = Columns::of(schedule.slice(stage.range.clone()));
    [
        format!("--transform {}[ {GRADIENT_STEP} ]", stage.transform.name()),
        format!(
            "\t--metric Mattes[ {FIXED_IMAGE},{MOVING_IMAGE},1,{},None ]",
            stage.metric_radius
        ),
        format!("\t{}", convergence_decl(&cols, opts)),
        format!("\t--shrink-factors {}", cols.shrinks),
        format!("\t--smoothing-sigmas {}{SIGMA_UNIT}", cols.sigmas),
        format!("\t--masks [ {} ]", mask_pair(stage.mask)),
    ]
}

fn convergence_decl(cols: &Columns, opts: &RenderOpts) -> String {
    format!(
        "--convergence [ {},{},{CONVERGENCE_WINDOW} ]",
        cols.iterations, opts.convergence_threshold
    )
}

fn mask_pair(mask: Mask) -> String {
    match mask {
        Mask::Unmasked => "NOMASK,NOMASK".to_string(),
        Mask::FixedMoving => format!("{FIXED_MASK},{MOVING_MASK}"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/emit.rs"]
mod tests;
