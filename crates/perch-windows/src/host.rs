//! The host window: a borderless, topmost popup that owns the toolbar
//! surface, reserves screen space and receives shell notifications.
//!
//! The window procedure only translates messages into [`HostEvent`]s;
//! the runtime handles them after each dispatch.

use std::cell::{Cell, RefCell};
use std::sync::mpsc::Sender;

use perch_core::dock::AppBarNotification;
use perch_core::{Error, Rect, Result, WindowHandle};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{DKGRAY_BRUSH, GetStockObject, HBRUSH};
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, PostMessageW, PostQuitMessage,
    RegisterClassW, SW_SHOWNOACTIVATE, SWP_NOACTIVATE, SWP_NOZORDER, SetWindowPos, ShowWindow,
    WM_ACTIVATE, WM_APP, WM_CLOSE, WM_DISPLAYCHANGE, WM_DPICHANGED,
    WM_WINDOWPOSCHANGED, WNDCLASSW, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_POPUP,
};
use windows::core::w;

use crate::appbar::decode_notification;
use crate::window;

/// Posted by the config watcher when a new config is waiting.
pub const WM_CONFIG_CHANGED: u32 = WM_APP + 1;

/// Something the runtime must react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    AppBar(AppBarNotification),
    Activated,
    Moved,
    DisplayChanged,
    DpiChanged,
    ConfigChanged,
}

thread_local! {
    static HOST_EVENTS: RefCell<Option<Sender<HostEvent>>> = const { RefCell::new(None) };
    static APPBAR_MESSAGE: Cell<u32> = const { Cell::new(0) };
}

/// Routes window procedure events for this thread to `tx`.
pub fn set_event_sender(tx: Sender<HostEvent>, appbar_message: u32) {
    HOST_EVENTS.with(|cell| *cell.borrow_mut() = Some(tx));
    APPBAR_MESSAGE.with(|cell| cell.set(appbar_message));
}

/// Owns the host `HWND`; destroys it on drop.
pub struct HostWindow {
    hwnd: HWND,
}

impl HostWindow {
    /// Creates and shows the host window at `rect` without activating it.
    ///
    /// Failure is fatal: without the host window nothing can dock.
    pub fn create(rect: Rect) -> Result<Self> {
        let class_name = w!("PerchHost");
        // SAFETY: GetStockObject returns a shared brush that is never freed.
        let background = unsafe { HBRUSH(GetStockObject(DKGRAY_BRUSH).0) };
        let wc = WNDCLASSW {
            lpfnWndProc: Some(host_wnd_proc),
            lpszClassName: class_name,
            hbrBackground: background,
            ..Default::default()
        };

        // SAFETY: registering a class with a static name and wndproc.
        // A second registration in the same process fails harmlessly
        // and the existing class is reused.
        unsafe { RegisterClassW(&wc) };

        // WS_EX_TOOLWINDOW: no taskbar button, not in Alt+Tab.
        // WS_EX_TOPMOST: above normal windows from the start.
        let hwnd = unsafe {
            CreateWindowExW(
                WS_EX_TOOLWINDOW | WS_EX_TOPMOST,
                class_name,
                w!("Perch"),
                WS_POPUP,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                None,
                None,
                None,
                None,
            )
        };

        match hwnd {
            Ok(h) if !h.is_invalid() => {
                // SAFETY: showing our own freshly created window.
                unsafe {
                    let _ = ShowWindow(h, SW_SHOWNOACTIVATE);
                }
                tracing::info!("host window created: {}", window::handle(h));
                Ok(Self { hwnd: h })
            }
            Ok(_) => Err(Error::HostWindowUnavailable),
            Err(e) => {
                tracing::error!("CreateWindowExW failed: {e}");
                Err(Error::HostWindowUnavailable)
            }
        }
    }

    pub fn handle(&self) -> WindowHandle {
        window::handle(self.hwnd)
    }

    /// Asks the window to close from any thread.
    pub fn post_close(handle: WindowHandle) {
        // SAFETY: posting to a stale handle fails harmlessly.
        unsafe {
            let _ = PostMessageW(Some(window::hwnd(handle)), WM_CLOSE, WPARAM(0), LPARAM(0));
        }
    }
}

impl Drop for HostWindow {
    fn drop(&mut self) {
        // SAFETY: destroying our own window; a stale handle fails harmlessly.
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}

unsafe extern "system" fn host_wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    let appbar_message = APPBAR_MESSAGE.with(Cell::get);

    let event = match msg {
        WM_ACTIVATE => Some(HostEvent::Activated),
        WM_WINDOWPOSCHANGED => Some(HostEvent::Moved),
        WM_DISPLAYCHANGE => Some(HostEvent::DisplayChanged),
        WM_DPICHANGED => {
            // lParam points at the rect the OS suggests for the new DPI.
            let suggested = unsafe { &*(lparam.0 as *const RECT) };
            unsafe {
                let _ = SetWindowPos(
                    hwnd,
                    None,
                    suggested.left,
                    suggested.top,
                    suggested.right - suggested.left,
                    suggested.bottom - suggested.top,
                    SWP_NOACTIVATE | SWP_NOZORDER,
                );
            }
            Some(HostEvent::DpiChanged)
        }
        WM_CONFIG_CHANGED => Some(HostEvent::ConfigChanged),
        WM_CLOSE => {
            // Leave the pump first so the AppBar is removed while the
            // window still exists; the window is destroyed on drop.
            unsafe { PostQuitMessage(0) };
            return LRESULT(0);
        }
        m if appbar_message != 0 && m == appbar_message => {
            decode_notification(wparam, lparam).map(HostEvent::AppBar)
        }
        _ => None,
    };

    if let Some(event) = event {
        HOST_EVENTS.with(|cell| {
            if let Some(sender) = cell.borrow().as_ref() {
                let _ = sender.send(event);
            }
        });
    }

    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}
