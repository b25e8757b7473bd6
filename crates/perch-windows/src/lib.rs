//! Win32 backends for the Perch core traits, plus the host-window runtime.
#![cfg(windows)]

/// AppBar protocol via `SHAppBarMessage`.
pub mod appbar;

/// Config file watcher thread.
pub mod config_watcher;

/// Ctrl+C closes the host window.
pub mod ctrl_c;

/// `Desktop` implementation for the window switcher.
pub mod desktop;

/// Per-monitor DPI awareness and queries.
pub mod dpi;

/// Top-level window enumeration.
pub mod enumerate;

/// Host window creation and its window procedure.
pub mod host;

/// Window icon extraction and PNG encoding.
pub mod icon;

/// Display enumeration.
pub mod monitor;

/// Window shapes via GDI regions.
pub mod region;

/// Message pump tying the engines to the host window.
pub mod runtime;

/// Per-window queries on raw `HWND`s.
pub mod window;

pub use appbar::Win32Shell;
pub use desktop::Win32Desktop;
pub use monitor::enumerate_monitors;
pub use region::Win32Regions;
