//! Window visibility around a capture: hidden on entry, shown again on every exit path.

use tracing::debug;

/// Host window control, injected by the GUI layer
pub trait WindowVisibility: Send + Sync {
    fn hide(&self);
    fn show(&self);
}

/// For headless hosts (CLI, tests) with no window to manage
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopVisibility;

impl WindowVisibility for NoopVisibility {
    fn hide(&self) {
        debug!("hide requested (no window)");
    }

    fn show(&self) {
        debug!("show requested (no window)");
    }
}

/// Hides the window on creation and shows it exactly once when dropped.
#[must_use = "the window is shown again as soon as the guard is dropped"]
pub struct VisibilityGuard<'a> {
    target: &'a dyn WindowVisibility,
}

impl<'a> VisibilityGuard<'a> {
    pub fn hide(target: &'a dyn WindowVisibility) -> Self {
        target.hide();
        Self { target }
    }
}

impl Drop for VisibilityGuard<'_> {
    fn drop(&mut self) {
        self.target.show();
    }
}
