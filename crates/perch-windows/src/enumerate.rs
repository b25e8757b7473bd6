use perch_core::{Error, Result, WindowHandle};
use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::EnumWindows;
use windows::core::BOOL;

use crate::window;

/// Lists every top-level window in z-order, unfiltered.
///
/// Filtering happens in the core so it can be tested without a desktop.
pub fn top_level_windows() -> Result<Vec<WindowHandle>> {
    let mut handles: Vec<WindowHandle> = Vec::new();

    // SAFETY: EnumWindows calls our callback for each top-level window
    // with a pointer to our Vec as LPARAM. It runs synchronously, so the
    // Vec outlives the call.
    unsafe {
        EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut handles as *mut _ as isize),
        )
        .map_err(|e| Error::platform("EnumWindows", e))?;
    }

    Ok(handles)
}

unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is the Vec pointer passed by top_level_windows().
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<WindowHandle>) };
    handles.push(window::handle(hwnd));

    BOOL(1) // TRUE: continue enumerating
}
