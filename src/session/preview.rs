use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::encoder::EncodedTransition;
use crate::foundation::error::TweenResult;

/// Display collaborator for finished transitions.
pub trait PreviewSink: Send {
    /// Replace the current preview with `gif`, releasing the previous one first.
    fn show(&mut self, gif: &EncodedTransition) -> TweenResult<()>;
    /// Replace the current preview with an explicit failure state.
    fn show_failure(&mut self, reason: &str);
}

impl<S: PreviewSink + ?Sized> PreviewSink for Box<S> {
    fn show(&mut self, gif: &EncodedTransition) -> TweenResult<()> {
        (**self).show(gif)
    }

    fn show_failure(&mut self, reason: &str) {
        (**self).show_failure(reason)
    }
}

/// What a [`PreviewSlot`] currently displays.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PreviewState {
    /// Nothing rendered yet.
    #[default]
    Empty,
    /// Most recent successful encode.
    Ready(EncodedTransition),
    /// Most recent render or encode failed.
    Failed(String),
}

/// In-memory preview holding the latest result.
#[derive(Debug, Default)]
pub struct PreviewSlot {
    state: PreviewState,
    released: u64,
}

impl PreviewSlot {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content.
    pub fn state(&self) -> &PreviewState {
        &self.state
    }

    /// How many previous contents have been released.
    pub fn released(&self) -> u64 {
        self.released
    }

    fn replace(&mut self, next: PreviewState) {
        let previous = std::mem::take(&mut self.state);
        if previous != PreviewState::Empty {
            self.released += 1;
        }
        drop(previous);
        self.state = next;
    }
}

impl PreviewSink for PreviewSlot {
    fn show(&mut self, gif: &EncodedTransition) -> TweenResult<()> {
        self.replace(PreviewState::Ready(gif.clone()));
        Ok(())
    }

    fn show_failure(&mut self, reason: &str) {
        self.replace(PreviewState::Failed(reason.to_string()));
    }
}

/// Preview written to a file on disk.
///
/// Writes go to a sibling `.partial` file that is renamed over the target, so readers never see
/// a truncated GIF. A failure removes the previous output.
#[derive(Clone, Debug)]
pub struct FilePreview {
    path: PathBuf,
}

impl FilePreview {
    /// Preview at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Target path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn partial_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".partial");
        self.path.with_file_name(name)
    }
}

impl PreviewSink for FilePreview {
    fn show(&mut self, gif: &EncodedTransition) -> TweenResult<()> {
        ensure_parent_dir(&self.path)?;
        let partial = self.partial_path();
        std::fs::write(&partial, &gif.bytes)
            .with_context(|| format!("write '{}'", partial.display()))?;
        let renamed = std::fs::rename(&partial, &self.path);
        if renamed.is_err() {
            let _ = std::fs::remove_file(&partial);
        }
        renamed.with_context(|| {
            format!(
                "rename '{}' to '{}'",
                partial.display(),
                self.path.display()
            )
        })?;
        tracing::info!(
            path = %self.path.display(),
            size = %gif.size,
            frames = gif.frame_count,
            "wrote preview"
        );
        Ok(())
    }

    fn show_failure(&mut self, reason: &str) {
        tracing::error!(path = %self.path.display(), %reason, "transition failed");
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::warn!(path = %self.path.display(), "removed stale preview"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "could not remove stale preview"),
        }
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> TweenResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/session/preview.rs"]
mod tests;
