pub(crate) mod resource;
