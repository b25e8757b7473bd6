//! Ctrl+C handling using `SetConsoleCtrlHandler`.

use std::sync::OnceLock;

use perch_core::WindowHandle;
use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};
use windows::core::BOOL;

use crate::host::HostWindow;

/// Host window to close, written once by `set_handler`.
static HOST: OnceLock<WindowHandle> = OnceLock::new();

/// Makes Ctrl+C close the host window so shutdown runs normally and
/// the AppBar reservation is released.
pub fn set_handler(host: WindowHandle) {
    if HOST.set(host).is_err() {
        return;
    }
    // SAFETY: registers a plain extern "system" callback.
    if let Err(e) = unsafe { SetConsoleCtrlHandler(Some(handler), true) } {
        tracing::warn!("failed to set Ctrl+C handler: {e}");
    }
}

unsafe extern "system" fn handler(ctrl_type: u32) -> BOOL {
    if (ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT)
        && let Some(&host) = HOST.get()
    {
        HostWindow::post_close(host);
        return BOOL(1);
    }
    BOOL(0)
}
