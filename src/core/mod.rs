pub(crate) mod application;
pub(crate) mod domain;
pub(crate) mod infrastructure;
