pub(crate) mod bands;
pub(crate) mod passes;
