pub(crate) mod dialect;
pub(crate) mod emit;
pub(crate) mod stage;
pub(crate) mod text;
