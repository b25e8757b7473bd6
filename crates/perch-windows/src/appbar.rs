//! The shell's AppBar protocol.
//!
//! A registered AppBar gets its strip subtracted from every monitor
//! work area, so maximized windows stop at the bar. The shell reports
//! layout changes through a private callback message.

use std::mem;

use perch_core::dock::{AppBar, AppBarNotification, DockEdge};
use perch_core::{Displays, Error, MonitorInfo, Rect, Result, WindowHandle};
use windows::Win32::Foundation::{HWND, LPARAM, RECT, WPARAM};
use windows::Win32::UI::Shell::{
    ABE_BOTTOM, ABE_TOP, ABM_ACTIVATE, ABM_NEW, ABM_QUERYPOS, ABM_REMOVE, ABM_SETPOS,
    ABM_WINDOWPOSCHANGED, ABN_FULLSCREENAPP, ABN_POSCHANGED, APPBARDATA, SHAppBarMessage,
};
use windows::Win32::UI::WindowsAndMessaging::{
    HWND_NOTOPMOST, HWND_TOPMOST, RegisterWindowMessageW, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
    SWP_SHOWWINDOW, SetWindowPos,
};
use windows::core::w;

use crate::monitor::{enumerate_monitors, to_rect};
use crate::window::hwnd;

/// Registers (or looks up) the AppBar callback message id.
pub fn callback_message() -> u32 {
    // SAFETY: RegisterWindowMessageW returns the same id for the same
    // string for the lifetime of the session.
    unsafe { RegisterWindowMessageW(w!("PerchAppBarCallback")) }
}

/// Decodes an AppBar callback message.
pub fn decode_notification(wparam: WPARAM, lparam: LPARAM) -> Option<AppBarNotification> {
    match wparam.0 as u32 {
        ABN_POSCHANGED => Some(AppBarNotification::PositionChanged),
        ABN_FULLSCREENAPP => Some(AppBarNotification::FullScreenApp(lparam.0 != 0)),
        _ => None,
    }
}

/// [`AppBar`] backed by `SHAppBarMessage` and `SetWindowPos`.
#[derive(Debug, Clone, Copy)]
pub struct Win32Shell {
    callback_message: u32,
}

impl Win32Shell {
    pub fn new(callback_message: u32) -> Self {
        Self { callback_message }
    }

    fn data(&self, host: WindowHandle, edge: DockEdge, rect: Rect) -> APPBARDATA {
        APPBARDATA {
            cbSize: mem::size_of::<APPBARDATA>() as u32,
            hWnd: hwnd(host),
            uCallbackMessage: self.callback_message,
            uEdge: match edge {
                DockEdge::Top => ABE_TOP,
                DockEdge::Bottom => ABE_BOTTOM,
            },
            rc: RECT {
                left: rect.x,
                top: rect.y,
                right: rect.right(),
                bottom: rect.bottom(),
            },
            ..Default::default()
        }
    }

    /// Sends one AppBar message and returns the (possibly updated) rect.
    fn send(&self, message: u32, data: &mut APPBARDATA) -> usize {
        // SAFETY: data is a fully initialised APPBARDATA with cbSize set.
        unsafe { SHAppBarMessage(message, data) }
    }
}

impl Displays for Win32Shell {
    fn monitors(&self) -> Result<Vec<MonitorInfo>> {
        enumerate_monitors()
    }
}

impl AppBar for Win32Shell {
    fn register(&mut self, host: WindowHandle) -> Result<()> {
        let mut data = self.data(host, DockEdge::Top, Rect::default());
        if self.send(ABM_NEW, &mut data) == 0 {
            return Err(Error::platform(
                "SHAppBarMessage(ABM_NEW)",
                "shell refused the registration",
            ));
        }
        Ok(())
    }

    fn unregister(&mut self, host: WindowHandle) -> Result<()> {
        let mut data = self.data(host, DockEdge::Top, Rect::default());
        self.send(ABM_REMOVE, &mut data);
        Ok(())
    }

    fn query_position(&mut self, host: WindowHandle, edge: DockEdge, proposed: Rect) -> Rect {
        let mut data = self.data(host, edge, proposed);
        self.send(ABM_QUERYPOS, &mut data);
        to_rect(&data.rc)
    }

    fn set_position(&mut self, host: WindowHandle, edge: DockEdge, rect: Rect) -> Rect {
        let mut data = self.data(host, edge, rect);
        self.send(ABM_SETPOS, &mut data);
        to_rect(&data.rc)
    }

    fn place(&mut self, host: WindowHandle, rect: Rect, topmost: bool) -> Result<()> {
        let after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };
        // SAFETY: SetWindowPos on our own host window.
        unsafe {
            SetWindowPos(
                hwnd(host),
                Some(after),
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_NOACTIVATE | SWP_SHOWWINDOW,
            )
        }
        .map_err(|e| Error::platform("SetWindowPos", e))
    }

    fn set_topmost(&mut self, host: WindowHandle, topmost: bool) -> Result<()> {
        let after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };
        // SAFETY: SetWindowPos on our own host window, z-order only.
        unsafe {
            SetWindowPos(
                hwnd(host),
                Some(after),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )
        }
        .map_err(|e| Error::platform("SetWindowPos", e))
    }

    fn activated(&mut self, host: WindowHandle) {
        let mut data = self.data(host, DockEdge::Top, Rect::default());
        self.send(ABM_ACTIVATE, &mut data);
    }

    fn window_pos_changed(&mut self, host: WindowHandle) {
        let mut data = self.data(host, DockEdge::Top, Rect::default());
        self.send(ABM_WINDOWPOSCHANGED, &mut data);
    }
}
