use perch_core::icon::IconSource;
use perch_core::window::WindowTraits;
use perch_core::{Desktop, Displays, MonitorInfo, Result, WindowHandle};

use crate::window::{self, hwnd};
use crate::{enumerate, icon, monitor};

/// The live Windows desktop.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Desktop;

impl Displays for Win32Desktop {
    fn monitors(&self) -> Result<Vec<MonitorInfo>> {
        monitor::enumerate_monitors()
    }
}

impl Desktop for Win32Desktop {
    fn top_level_windows(&self) -> Result<Vec<WindowHandle>> {
        enumerate::top_level_windows()
    }

    fn traits(&self, window: WindowHandle) -> Option<WindowTraits> {
        window::traits(hwnd(window))
    }

    fn nearest_monitor(&self, window: WindowHandle) -> Option<usize> {
        window::nearest_monitor(hwnd(window))
    }

    fn title(&self, window: WindowHandle) -> Option<String> {
        window::title(hwnd(window))
    }

    fn process_name(&self, window: WindowHandle) -> Option<String> {
        window::process_name(hwnd(window))
    }

    fn icon(&self, window: WindowHandle, source: IconSource) -> Option<Vec<u8>> {
        icon::icon_png(hwnd(window), source)
    }

    fn foreground(&self) -> Option<WindowHandle> {
        window::foreground().map(window::handle)
    }

    fn is_window(&self, window: WindowHandle) -> bool {
        window::exists(hwnd(window))
    }

    fn is_minimized(&self, window: WindowHandle) -> bool {
        window::is_minimized(hwnd(window))
    }

    fn restore(&self, window: WindowHandle) -> bool {
        window::restore(hwnd(window))
    }

    fn set_foreground(&self, window: WindowHandle) -> bool {
        window::set_foreground(hwnd(window))
    }
}
