pub(crate) mod blend;
pub(crate) mod buffer;
pub(crate) mod canvas;
pub(crate) mod pipeline;
pub(crate) mod place;
