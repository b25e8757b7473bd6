//! Window enumeration and activation for a window-switching feature.

use std::rc::Rc;

use crate::error::Result;
use crate::host::HostContext;
use crate::icon::{IconLookup, IconSource, resolve_icon};
use crate::monitor::{Displays, MonitorInfo};
use crate::window::{UNKNOWN_PROCESS, WindowHandle, WindowInfo, WindowTraits};

/// Platform queries needed to enumerate and activate windows.
///
/// Every per-window query takes a handle that may already be stale and
/// reports failure as `None`/`false` rather than an error.
pub trait Desktop: Displays {
    /// All top-level windows in z-order.
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>>;

    /// Style and state bits, or `None` if the window is gone.
    fn traits(&self, window: WindowHandle) -> Option<WindowTraits>;

    /// Native handle of the monitor nearest to the window.
    fn nearest_monitor(&self, window: WindowHandle) -> Option<usize>;

    fn title(&self, window: WindowHandle) -> Option<String>;

    /// Executable name of the owning process.
    fn process_name(&self, window: WindowHandle) -> Option<String>;

    /// Runs one icon strategy and returns PNG bytes on success.
    fn icon(&self, window: WindowHandle, source: IconSource) -> Option<Vec<u8>>;

    fn foreground(&self) -> Option<WindowHandle>;

    fn is_window(&self, window: WindowHandle) -> bool;

    fn is_minimized(&self, window: WindowHandle) -> bool;

    /// Restores a minimized window. Returns `false` if the OS refused.
    fn restore(&self, window: WindowHandle) -> bool;

    /// Requests foreground focus. Returns `false` if the OS refused.
    fn set_foreground(&self, window: WindowHandle) -> bool;
}

/// Enumeration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumerateOptions {
    /// Resolve icons. When `false` every window reports
    /// [`IconLookup::Skipped`].
    pub icons: bool,
}

impl Default for EnumerateOptions {
    fn default() -> Self {
        Self { icons: true }
    }
}

/// Result of an activation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The handle no longer names a window; nothing was done.
    Stale,
    /// The window was brought to the foreground.
    Focused,
    /// The OS declined the focus change (foreground lock policy).
    Refused,
}

/// Lists and activates application windows, excluding the host.
pub struct WindowSwitcher<D> {
    desktop: D,
    host: Option<Rc<HostContext>>,
    options: EnumerateOptions,
}

impl<D: Desktop> WindowSwitcher<D> {
    pub fn new(desktop: D) -> Self {
        Self {
            desktop,
            host: None,
            options: EnumerateOptions::default(),
        }
    }

    /// Excludes the host window from every enumeration.
    pub fn excluding_host(mut self, host: Rc<HostContext>) -> Self {
        self.host = Some(host);
        self
    }

    pub fn with_options(mut self, options: EnumerateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn desktop(&self) -> &D {
        &self.desktop
    }

    /// Lists monitors, primary first.
    pub fn list_monitors(&self) -> Result<Vec<MonitorInfo>> {
        self.desktop.monitors()
    }

    /// Lists switchable windows whose nearest monitor is `monitor_index`.
    ///
    /// Never fails: an out-of-range index or a failed OS enumeration
    /// yields an empty list, and windows that disappear while being
    /// described are left out.
    pub fn list_windows_on_monitor(&self, monitor_index: usize) -> Vec<WindowInfo> {
        let monitors = match self.desktop.monitors() {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!("monitor enumeration failed: {e}");
                return Vec::new();
            }
        };
        let Some(target) = monitors.get(monitor_index) else {
            return Vec::new();
        };

        let candidates = match self.desktop.top_level_windows() {
            Ok(w) => w,
            Err(e) => {
                tracing::warn!("window enumeration failed: {e}");
                return Vec::new();
            }
        };

        // A host that cannot be resolved has no window to exclude.
        let own = self.host.as_ref().and_then(|h| h.handle().ok());
        let foreground = self.desktop.foreground();

        candidates
            .into_iter()
            .filter(|&w| Some(w) != own)
            .filter(|&w| self.desktop.traits(w).is_some_and(|t| t.is_switchable()))
            .filter(|&w| self.desktop.nearest_monitor(w) == Some(target.handle))
            .filter_map(|w| self.describe(w, foreground))
            .collect()
    }

    /// Resolves the metadata of one window, or `None` if it vanished.
    fn describe(&self, window: WindowHandle, foreground: Option<WindowHandle>) -> Option<WindowInfo> {
        let Some(title) = self.desktop.title(window).filter(|t| !t.trim().is_empty()) else {
            tracing::debug!("window {window} lost its title during enumeration, skipping");
            return None;
        };

        let process_name = self
            .desktop
            .process_name(window)
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| UNKNOWN_PROCESS.to_string());

        let icon = if self.options.icons {
            resolve_icon(|source| self.desktop.icon(window, source))
        } else {
            IconLookup::Skipped
        };

        Some(WindowInfo {
            handle: window,
            title,
            process_name,
            icon,
            is_active: foreground == Some(window),
        })
    }

    /// Brings a window to the foreground, restoring it if minimized.
    ///
    /// A stale handle is a no-op and a refused focus change is not an
    /// error; both are reported through [`Activation`].
    pub fn activate(&self, window: WindowHandle) -> Activation {
        if window.is_null() || !self.desktop.is_window(window) {
            tracing::debug!("activate {window}: window no longer exists");
            return Activation::Stale;
        }

        if self.desktop.is_minimized(window) && !self.desktop.restore(window) {
            tracing::debug!("activate {window}: restore refused");
        }

        if self.desktop.set_foreground(window) {
            Activation::Focused
        } else {
            tracing::warn!("activate {window}: foreground request refused by the OS");
            Activation::Refused
        }
    }
}
