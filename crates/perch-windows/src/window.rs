//! Per-window queries. Every function tolerates stale handles: a window
//! that no longer exists reads as invisible, untitled and unowned.

use std::mem;
use std::path::Path;

use perch_core::WindowHandle;
use perch_core::window::WindowTraits;
use windows::Win32::Foundation::{CloseHandle, HWND};
use windows::Win32::Graphics::Dwm::{DWMWA_CLOAKED, DwmGetWindowAttribute};
use windows::Win32::Graphics::Gdi::{MONITOR_DEFAULTTONEAREST, MonitorFromWindow};
use windows::Win32::System::ProcessStatus::K32GetModuleFileNameExW;
use windows::Win32::System::Threading::{OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_VM_READ};
use windows::Win32::UI::WindowsAndMessaging::{
    GW_OWNER, GWL_EXSTYLE, GetForegroundWindow, GetWindow, GetWindowLongPtrW,
    GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, IsIconic, IsWindow,
    IsWindowVisible, SW_RESTORE, SetForegroundWindow, ShowWindow, WS_EX_APPWINDOW,
    WS_EX_TOOLWINDOW,
};

/// Converts a core handle to an `HWND`.
pub fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.raw() as *mut _)
}

/// Converts an `HWND` to a core handle.
pub fn handle(hwnd: HWND) -> WindowHandle {
    WindowHandle::from_raw(hwnd.0 as usize)
}

/// Returns whether the handle still names a window.
pub fn exists(hwnd: HWND) -> bool {
    // SAFETY: IsWindow accepts any value, including stale handles.
    unsafe { IsWindow(Some(hwnd)).as_bool() }
}

/// Reads the bits the switcher filters on.
pub fn traits(hwnd: HWND) -> Option<WindowTraits> {
    if !exists(hwnd) {
        return None;
    }

    // SAFETY: read-only queries on a window handle.
    unsafe {
        let ex_style = GetWindowLongPtrW(hwnd, GWL_EXSTYLE) as u32;
        let owned = GetWindow(hwnd, GW_OWNER).is_ok_and(|owner| !owner.is_invalid());

        Some(WindowTraits {
            visible: IsWindowVisible(hwnd).as_bool(),
            tool_window: ex_style & WS_EX_TOOLWINDOW.0 != 0,
            owned,
            app_window: ex_style & WS_EX_APPWINDOW.0 != 0,
            cloaked: is_cloaked(hwnd),
            title_len: usize::try_from(GetWindowTextLengthW(hwnd)).unwrap_or(0),
        })
    }
}

/// Returns whether DWM hides the window (other virtual desktop,
/// suspended UWP app).
fn is_cloaked(hwnd: HWND) -> bool {
    let mut cloaked: u32 = 0;
    // SAFETY: DWMWA_CLOAKED writes a u32; we pass a u32 and its size.
    let result = unsafe {
        DwmGetWindowAttribute(
            hwnd,
            DWMWA_CLOAKED,
            &mut cloaked as *mut u32 as *mut _,
            mem::size_of::<u32>() as u32,
        )
    };
    result.is_ok() && cloaked != 0
}

/// Reads the window text, or `None` if the window is gone.
pub fn title(hwnd: HWND) -> Option<String> {
    // SAFETY: GetWindowTextLengthW and GetWindowTextW read window text
    // into a buffer we own.
    unsafe {
        let length = GetWindowTextLengthW(hwnd);
        if length <= 0 {
            return None;
        }

        // +1 for the null terminator that Windows requires
        let mut buffer = vec![0u16; length as usize + 1];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        if copied <= 0 {
            return None;
        }
        Some(String::from_utf16_lossy(&buffer[..copied as usize]))
    }
}

/// Executable name of the owning process, without extension.
///
/// Fails for elevated or protected processes.
pub fn process_name(hwnd: HWND) -> Option<String> {
    let mut pid: u32 = 0;
    // SAFETY: GetWindowThreadProcessId writes the PID into our u32.
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
    if pid == 0 {
        return None;
    }

    let path = exe_path(pid)?;
    Path::new(&path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

/// Returns the executable path for a process ID.
fn exe_path(pid: u32) -> Option<String> {
    // SAFETY: the process handle is closed before returning.
    unsafe {
        let process = OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, false, pid).ok()?;
        let mut buf = [0u16; 1024];
        let len = K32GetModuleFileNameExW(Some(process), None, &mut buf);
        let _ = CloseHandle(process);
        if len == 0 {
            return None;
        }
        String::from_utf16(&buf[..len as usize]).ok()
    }
}

/// Native handle of the monitor nearest to the window.
pub fn nearest_monitor(hwnd: HWND) -> Option<usize> {
    // SAFETY: MonitorFromWindow accepts stale handles.
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };
    (!monitor.0.is_null()).then_some(monitor.0 as usize)
}

pub fn foreground() -> Option<HWND> {
    // SAFETY: simple query with no arguments.
    let hwnd = unsafe { GetForegroundWindow() };
    (!hwnd.is_invalid()).then_some(hwnd)
}

pub fn is_minimized(hwnd: HWND) -> bool {
    // SAFETY: simple query.
    unsafe { IsIconic(hwnd).as_bool() }
}

/// Restores a minimized window. Returns `false` if it is still minimized.
pub fn restore(hwnd: HWND) -> bool {
    // SAFETY: ShowWindow with a possibly stale handle fails harmlessly.
    // Its return value is the previous visibility, not success.
    unsafe {
        let _ = ShowWindow(hwnd, SW_RESTORE);
    }
    !is_minimized(hwnd)
}

/// Requests foreground focus. The OS may refuse under its
/// foreground-lock policy.
pub fn set_foreground(hwnd: HWND) -> bool {
    // SAFETY: SetForegroundWindow is safe to call with any HWND.
    unsafe { SetForegroundWindow(hwnd).as_bool() }
}
