pub(crate) mod opts;
pub(crate) mod session;
pub(crate) mod strips;
