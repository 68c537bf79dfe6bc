pub(crate) mod debounce;
pub(crate) mod preview;
pub(crate) mod render_session;
pub(crate) mod settings;
