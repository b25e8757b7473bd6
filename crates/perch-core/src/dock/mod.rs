//! AppBar docking: reserving a screen-edge strip for the host window,
//! or floating it over other windows.
//!
//! The engine owns the dock state for one host window and drives the
//! platform's edge-reservation protocol through the [`AppBar`] trait.
//! Registration happens at most once; every path that leaves a docked
//! mode releases the reservation first.

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::Rect;
use crate::error::{Error, Result};
use crate::host::HostContext;
use crate::monitor::{Displays, MonitorInfo, clamp_index};
use crate::window::WindowHandle;

/// Screen edge a bar attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DockEdge {
    #[default]
    Top,
    Bottom,
}

/// How the toolbar positions itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Behavior {
    /// Reserved strip at the top of the target monitor.
    DockedTop,
    /// Reserved strip at the bottom of the target monitor.
    DockedBottom,
    /// No reservation, no forced position; stays topmost.
    #[default]
    Floating,
    /// Top of the target monitor, topmost, without reserving space.
    Overlay,
}

/// Observable state of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DockMode {
    #[default]
    Undocked,
    DockedTop,
    DockedBottom,
    Overlay,
}

/// Placement of the host window, owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DockState {
    pub edge: DockEdge,
    pub monitor_index: usize,
    /// Bar height in physical pixels.
    pub height: i32,
    /// Whether the host is currently registered as an AppBar.
    pub registered: bool,
}

/// Input to [`DockEngine::apply_behavior`], heights in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockSettings {
    pub behavior: Behavior,
    pub monitor_index: usize,
    pub height: i32,
}

/// Notifications the OS sends to a registered AppBar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppBarNotification {
    /// Another bar or the taskbar changed size or position.
    PositionChanged,
    /// A full-screen application opened (`true`) or closed (`false`).
    FullScreenApp(bool),
}

/// The platform's edge-reservation protocol and window placement.
pub trait AppBar {
    /// Registers the window as an AppBar.
    fn register(&mut self, host: WindowHandle) -> Result<()>;

    /// Removes the AppBar registration and frees the reserved space.
    fn unregister(&mut self, host: WindowHandle) -> Result<()>;

    /// Proposes a rectangle; the OS returns it adjusted for other bars.
    fn query_position(&mut self, host: WindowHandle, edge: DockEdge, proposed: Rect) -> Rect;

    /// Commits a rectangle; the OS returns the space actually reserved.
    fn set_position(&mut self, host: WindowHandle, edge: DockEdge, rect: Rect) -> Rect;

    /// Moves and sizes the window without activating it.
    fn place(&mut self, host: WindowHandle, rect: Rect, topmost: bool) -> Result<()>;

    /// Changes only the z-order band, keeping position and size.
    fn set_topmost(&mut self, host: WindowHandle, topmost: bool) -> Result<()>;

    /// Tells the OS the bar window was activated.
    fn activated(&mut self, host: WindowHandle);

    /// Tells the OS the bar window moved or resized.
    fn window_pos_changed(&mut self, host: WindowHandle);
}

/// Rectangle for a bar of `height` along `edge` of `bounds`.
pub fn bar_rect(bounds: &Rect, edge: DockEdge, height: i32) -> Rect {
    match edge {
        DockEdge::Top => Rect::new(bounds.x, bounds.y, bounds.width, height),
        DockEdge::Bottom => Rect::new(bounds.x, bounds.bottom() - height, bounds.width, height),
    }
}

/// State machine binding one host window to the AppBar protocol.
pub struct DockEngine<P: Displays + AppBar> {
    host: Rc<HostContext>,
    platform: P,
    state: DockState,
    mode: DockMode,
    committed: Option<Rect>,
    last_settings: Option<DockSettings>,
    fullscreen_app: bool,
}

impl<P: Displays + AppBar> DockEngine<P> {
    pub fn new(host: Rc<HostContext>, platform: P) -> Self {
        Self {
            host,
            platform,
            state: DockState::default(),
            mode: DockMode::Undocked,
            committed: None,
            last_settings: None,
            fullscreen_app: false,
        }
    }

    pub fn state(&self) -> DockState {
        self.state
    }

    pub fn mode(&self) -> DockMode {
        self.mode
    }

    /// Rectangle the host window was last placed at.
    pub fn committed(&self) -> Option<Rect> {
        self.committed
    }

    pub fn is_docked(&self) -> bool {
        self.state.registered
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Reserves a strip along `edge` of the given monitor.
    ///
    /// Registers the AppBar on first use only. An out-of-range monitor
    /// index falls back to the primary monitor.
    pub fn dock(&mut self, edge: DockEdge, monitor_index: usize, height: i32) -> Result<()> {
        let host = self.host.handle()?;
        let monitor = self.target_monitor(monitor_index)?;
        let height = height.max(1);

        if !self.state.registered {
            self.platform.register(host)?;
            self.state.registered = true;
            tracing::info!("registered {host} as an AppBar");
        }

        let proposed = bar_rect(&monitor.bounds, edge, height);
        let adjusted = self.platform.query_position(host, edge, proposed);
        let committed = self.platform.set_position(host, edge, adjusted);
        // The reservation is live from here on, so the state must describe
        // it even if moving the window fails.
        self.state.edge = edge;
        self.state.monitor_index = monitor.index;
        self.state.height = height;
        self.platform.place(host, committed, !self.fullscreen_app)?;

        self.committed = Some(committed);
        self.mode = match edge {
            DockEdge::Top => DockMode::DockedTop,
            DockEdge::Bottom => DockMode::DockedBottom,
        };
        tracing::info!(
            "docked {edge:?} on monitor {} at ({},{} {}x{})",
            monitor.index,
            committed.x,
            committed.y,
            committed.width,
            committed.height
        );
        Ok(())
    }

    /// Releases the edge reservation. A no-op when not registered.
    pub fn undock(&mut self) -> Result<()> {
        if !self.state.registered {
            return Ok(());
        }
        let host = self.host.handle()?;

        if let Err(e) = self.platform.unregister(host) {
            tracing::warn!("AppBar removal failed, treating as removed: {e}");
        }
        self.state.registered = false;
        if matches!(self.mode, DockMode::DockedTop | DockMode::DockedBottom) {
            self.mode = DockMode::Undocked;
            self.committed = None;
        }
        tracing::info!("released AppBar reservation for {host}");
        Ok(())
    }

    /// Places the window along `edge` as a topmost overlay without
    /// reserving screen space. Any reservation is released first.
    pub fn position_on_monitor(
        &mut self,
        edge: DockEdge,
        monitor_index: usize,
        height: i32,
    ) -> Result<()> {
        let host = self.host.handle()?;
        self.undock()?;

        let monitor = self.target_monitor(monitor_index)?;
        let height = height.max(1);
        let rect = bar_rect(&monitor.bounds, edge, height);
        self.platform.place(host, rect, !self.fullscreen_app)?;

        self.state.edge = edge;
        self.state.monitor_index = monitor.index;
        self.state.height = height;
        self.committed = Some(rect);
        self.mode = DockMode::Overlay;
        tracing::info!("overlay {edge:?} on monitor {}", monitor.index);
        Ok(())
    }

    /// Applies a behavior. Used at startup and whenever settings change.
    pub fn apply_behavior(&mut self, settings: DockSettings) -> Result<()> {
        let DockSettings {
            behavior,
            monitor_index,
            height,
        } = settings;

        match behavior {
            Behavior::DockedTop => self.dock(DockEdge::Top, monitor_index, height)?,
            Behavior::DockedBottom => self.dock(DockEdge::Bottom, monitor_index, height)?,
            Behavior::Overlay => self.position_on_monitor(DockEdge::Top, monitor_index, height)?,
            Behavior::Floating => self.float()?,
        }
        self.last_settings = Some(settings);
        Ok(())
    }

    /// Re-applies the last behavior, e.g. after a display change.
    pub fn reapply(&mut self) -> Result<()> {
        match self.last_settings {
            Some(settings) => self.apply_behavior(settings),
            None => Ok(()),
        }
    }

    /// Handles an AppBar notification from the OS.
    pub fn notify(&mut self, notification: AppBarNotification) -> Result<()> {
        match notification {
            AppBarNotification::PositionChanged => {
                if self.state.registered {
                    let DockState {
                        edge,
                        monitor_index,
                        height,
                        ..
                    } = self.state;
                    self.dock(edge, monitor_index, height)?;
                }
            }
            AppBarNotification::FullScreenApp(open) => {
                self.fullscreen_app = open;
                if self.mode != DockMode::Undocked {
                    let host = self.host.handle()?;
                    self.platform.set_topmost(host, !open)?;
                }
            }
        }
        Ok(())
    }

    /// Forwards host activation to the OS while registered.
    pub fn on_host_activated(&mut self) {
        if let (true, Some(host)) = (self.state.registered, self.host.resolved()) {
            self.platform.activated(host);
        }
    }

    /// Forwards host moves to the OS while registered.
    pub fn on_host_moved(&mut self) {
        if let (true, Some(host)) = (self.state.registered, self.host.resolved()) {
            self.platform.window_pos_changed(host);
        }
    }

    fn float(&mut self) -> Result<()> {
        let host = self.host.handle()?;
        self.undock()?;
        self.platform.set_topmost(host, true)?;
        self.mode = DockMode::Undocked;
        self.committed = None;
        Ok(())
    }

    fn target_monitor(&self, monitor_index: usize) -> Result<MonitorInfo> {
        let mut monitors = self.platform.monitors()?;
        let index = clamp_index(monitor_index, monitors.len());
        if index >= monitors.len() {
            return Err(Error::platform("EnumDisplayMonitors", "no monitors found"));
        }
        Ok(monitors.swap_remove(index))
    }
}

impl<P: Displays + AppBar> Drop for DockEngine<P> {
    fn drop(&mut self) {
        if let Err(e) = self.undock() {
            tracing::warn!("AppBar teardown failed: {e}");
        }
    }
}
