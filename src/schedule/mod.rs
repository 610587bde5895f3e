pub(crate) mod generate;
pub(crate) mod level;
pub(crate) mod step;
