//! In-memory stand-ins for the platform traits.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::Rect;
use crate::dock::{AppBar, DockEdge};
use crate::error::{Error, Result};
use crate::icon::IconSource;
use crate::monitor::{Displays, MonitorInfo};
use crate::region::{Region, RegionTarget};
use crate::switcher::Desktop;
use crate::window::{WindowHandle, WindowTraits};

fn monitor(index: usize, device: &str, primary: bool, bounds: Rect) -> MonitorInfo {
    MonitorInfo {
        index,
        device: device.into(),
        is_primary: primary,
        bounds,
        work_area: Rect::new(bounds.x, bounds.y, bounds.width, bounds.height - 40),
        handle: 0x100 + index,
    }
}

/// A 1920x1080 primary and a 1520x1080 secondary to its right.
pub fn two_monitors() -> Vec<MonitorInfo> {
    vec![
        monitor(0, r"\\.\DISPLAY1", true, Rect::new(0, 0, 1920, 1080)),
        monitor(1, r"\\.\DISPLAY2", false, Rect::from_edges(1920, 0, 3440, 1080)),
    ]
}

#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub handle: WindowHandle,
    pub title: String,
    pub monitor: usize,
    pub visible: bool,
    pub tool_window: bool,
    pub owned: bool,
    pub app_window: bool,
    pub cloaked: bool,
    pub minimized: bool,
    pub process: Option<String>,
    /// The only icon strategy that answers, if any.
    pub icon_from: Option<IconSource>,
    /// Passes the style checks, then has no title when described.
    pub closes_during_enumeration: bool,
}

impl FakeWindow {
    /// A plain switchable window whose process is its lowercased title.
    pub fn app(raw: usize, title: &str, monitor: usize) -> Self {
        Self {
            handle: WindowHandle::from_raw(raw),
            title: title.into(),
            monitor,
            visible: true,
            tool_window: false,
            owned: false,
            app_window: false,
            cloaked: false,
            minimized: false,
            process: Some(title.to_lowercase()),
            icon_from: None,
            closes_during_enumeration: false,
        }
    }
}

/// A desktop with a fixed set of windows. Clones share the call log.
#[derive(Debug, Clone)]
pub struct FakeDesktop {
    monitors: Vec<MonitorInfo>,
    windows: Vec<FakeWindow>,
    foreground: Option<WindowHandle>,
    enumeration_fails: bool,
    refuses_focus: bool,
    calls: Rc<RefCell<Vec<String>>>,
}

impl FakeDesktop {
    pub fn new(monitors: Vec<MonitorInfo>) -> Self {
        Self {
            monitors,
            windows: Vec::new(),
            foreground: None,
            enumeration_fails: false,
            refuses_focus: false,
            calls: Rc::default(),
        }
    }

    pub fn with_window(mut self, window: FakeWindow) -> Self {
        self.windows.push(window);
        self
    }

    pub fn with_foreground(mut self, raw: usize) -> Self {
        self.foreground = Some(WindowHandle::from_raw(raw));
        self
    }

    pub fn failing_window_enumeration(mut self) -> Self {
        self.enumeration_fails = true;
        self
    }

    pub fn refusing_focus(mut self) -> Self {
        self.refuses_focus = true;
        self
    }

    /// State-changing calls, e.g. `"restore 0x1"`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn find(&self, handle: WindowHandle) -> Option<&FakeWindow> {
        self.windows.iter().find(|w| w.handle == handle)
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl Displays for FakeDesktop {
    fn monitors(&self) -> Result<Vec<MonitorInfo>> {
        Ok(self.monitors.clone())
    }
}

impl Desktop for FakeDesktop {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>> {
        if self.enumeration_fails {
            return Err(Error::platform("EnumWindows", "access denied"));
        }
        Ok(self.windows.iter().map(|w| w.handle).collect())
    }

    fn traits(&self, window: WindowHandle) -> Option<WindowTraits> {
        self.find(window).map(|w| WindowTraits {
            visible: w.visible,
            tool_window: w.tool_window,
            owned: w.owned,
            app_window: w.app_window,
            cloaked: w.cloaked,
            title_len: w.title.encode_utf16().count(),
        })
    }

    fn nearest_monitor(&self, window: WindowHandle) -> Option<usize> {
        let w = self.find(window)?;
        self.monitors.get(w.monitor).map(|m| m.handle)
    }

    fn title(&self, window: WindowHandle) -> Option<String> {
        self.find(window)
            .filter(|w| !w.closes_during_enumeration)
            .map(|w| w.title.clone())
    }

    fn process_name(&self, window: WindowHandle) -> Option<String> {
        self.find(window)?.process.clone()
    }

    fn icon(&self, window: WindowHandle, source: IconSource) -> Option<Vec<u8>> {
        let w = self.find(window)?;
        (w.icon_from == Some(source)).then(|| b"\x89PNG".to_vec())
    }

    fn foreground(&self) -> Option<WindowHandle> {
        self.foreground
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        self.find(window).is_some()
    }

    fn is_minimized(&self, window: WindowHandle) -> bool {
        self.find(window).is_some_and(|w| w.minimized)
    }

    fn restore(&self, window: WindowHandle) -> bool {
        self.record(format!("restore {window}"));
        true
    }

    fn set_foreground(&self, window: WindowHandle) -> bool {
        self.record(format!("foreground {window}"));
        !self.refuses_focus
    }
}

/// Records AppBar traffic against a monitor layout.
///
/// `query_position` shrinks the proposal by `reserved_by_others` pixels
/// on the docking edge, mimicking another bar already holding space.
#[derive(Debug)]
pub struct FakeShell {
    pub monitors: Vec<MonitorInfo>,
    pub reserved_by_others: i32,
    pub registrations: usize,
    pub removals: usize,
    pub reserved: Option<Rect>,
    pub placed: Option<Rect>,
    pub topmost: Option<bool>,
    pub log: Vec<String>,
    pub fail_register: bool,
    pub fail_monitors: bool,
    pub fail_place: bool,
    /// Shared with tests that need to observe teardown after drop.
    pub removals_seen: Rc<Cell<usize>>,
}

impl FakeShell {
    pub fn new(monitors: Vec<MonitorInfo>) -> Self {
        Self {
            monitors,
            reserved_by_others: 0,
            registrations: 0,
            removals: 0,
            reserved: None,
            placed: None,
            topmost: None,
            log: Vec::new(),
            fail_register: false,
            fail_monitors: false,
            fail_place: false,
            removals_seen: Rc::default(),
        }
    }
}

impl Displays for FakeShell {
    fn monitors(&self) -> Result<Vec<MonitorInfo>> {
        if self.fail_monitors {
            return Err(Error::platform("EnumDisplayMonitors", "display driver reset"));
        }
        Ok(self.monitors.clone())
    }
}

impl AppBar for FakeShell {
    fn register(&mut self, _host: WindowHandle) -> Result<()> {
        if self.fail_register {
            return Err(Error::platform("SHAppBarMessage(ABM_NEW)", "refused"));
        }
        self.registrations += 1;
        self.log.push("register".into());
        Ok(())
    }

    fn unregister(&mut self, _host: WindowHandle) -> Result<()> {
        self.removals += 1;
        self.removals_seen.set(self.removals_seen.get() + 1);
        self.reserved = None;
        self.log.push("unregister".into());
        Ok(())
    }

    fn query_position(&mut self, _host: WindowHandle, edge: DockEdge, proposed: Rect) -> Rect {
        self.log.push("query".into());
        match edge {
            DockEdge::Top => Rect {
                y: proposed.y + self.reserved_by_others,
                ..proposed
            },
            DockEdge::Bottom => Rect {
                y: proposed.y - self.reserved_by_others,
                ..proposed
            },
        }
    }

    fn set_position(&mut self, _host: WindowHandle, _edge: DockEdge, rect: Rect) -> Rect {
        self.log.push("set".into());
        self.reserved = Some(rect);
        rect
    }

    fn place(&mut self, _host: WindowHandle, rect: Rect, topmost: bool) -> Result<()> {
        self.log.push("place".into());
        if self.fail_place {
            return Err(Error::platform("SetWindowPos", "access denied"));
        }
        self.placed = Some(rect);
        self.topmost = Some(topmost);
        Ok(())
    }

    fn set_topmost(&mut self, _host: WindowHandle, topmost: bool) -> Result<()> {
        self.log.push(format!("topmost {topmost}"));
        self.topmost = Some(topmost);
        Ok(())
    }

    fn activated(&mut self, _host: WindowHandle) {
        self.log.push("activate".into());
    }

    fn window_pos_changed(&mut self, _host: WindowHandle) {
        self.log.push("moved".into());
    }
}

/// Region target with an adjustable DPI.
#[derive(Debug, Default)]
pub struct FakeRegions {
    dpi: u32,
    current: Option<Region>,
    assignments: usize,
    fail_next: bool,
}

impl FakeRegions {
    pub fn at_dpi(dpi: u32) -> Self {
        Self {
            dpi,
            ..Self::default()
        }
    }

    pub fn set_dpi(&mut self, dpi: u32) {
        self.dpi = dpi;
    }

    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    pub fn current(&self) -> Option<&Region> {
        self.current.as_ref()
    }

    pub fn assignments(&self) -> usize {
        self.assignments
    }
}

impl RegionTarget for FakeRegions {
    fn dpi(&self, _window: WindowHandle) -> u32 {
        self.dpi
    }

    fn assign(&mut self, _window: WindowHandle, region: Option<&Region>) -> Result<()> {
        if std::mem::take(&mut self.fail_next) {
            return Err(Error::platform("SetWindowRgn", "invalid window"));
        }
        self.assignments += 1;
        self.current = region.cloned();
        Ok(())
    }
}
