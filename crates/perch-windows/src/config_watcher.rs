//! Watches `config.toml` for changes and sends validated reloads.
//!
//! Uses `FindFirstChangeNotificationW` on the config directory. When a
//! change is detected the file's mtime decides whether it was ours, and
//! only configs that parse are sent. Each send is followed by a posted
//! message that wakes the host thread's message pump.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::time::SystemTime;

use perch_core::config::{self, Config};
use perch_core::WindowHandle;
use windows::Win32::Foundation::{LPARAM, WAIT_OBJECT_0, WPARAM};
use windows::Win32::Storage::FileSystem::{
    FILE_NOTIFY_CHANGE_FILE_NAME, FILE_NOTIFY_CHANGE_LAST_WRITE, FindCloseChangeNotification,
    FindFirstChangeNotificationW, FindNextChangeNotification,
};
use windows::Win32::System::Threading::WaitForSingleObject;
use windows::Win32::UI::WindowsAndMessaging::PostMessageW;
use windows::core::HSTRING;

use crate::host::WM_CONFIG_CHANGED;
use crate::window::hwnd;

/// Timeout between stop-flag checks when no changes occur (ms).
const WAIT_TIMEOUT_MS: u32 = 5000;

/// Runs the watcher loop. Blocks until the stop flag is set or the
/// receiver is dropped.
///
/// `wake` is the host window; it is only ever posted to, never touched.
pub fn watch(tx: Sender<Config>, wake: WindowHandle, stop: Arc<AtomicBool>) {
    let (Some(dir), Some(path)) = (config::config_dir(), config::config_path()) else {
        tracing::info!("config dir not found, watcher exiting");
        return;
    };
    if !dir.exists() {
        tracing::info!("{} does not exist, watcher exiting", dir.display());
        return;
    }

    let mut last_mtime = mtime(&path);
    let dir_str = HSTRING::from(dir.as_os_str());
    let flags = FILE_NOTIFY_CHANGE_LAST_WRITE | FILE_NOTIFY_CHANGE_FILE_NAME;

    // SAFETY: the notification handle is closed when the loop exits.
    let Ok(handle) = (unsafe { FindFirstChangeNotificationW(&dir_str, false, flags) }) else {
        tracing::warn!("FindFirstChangeNotificationW failed, watcher exiting");
        return;
    };

    while !stop.load(Ordering::Relaxed) {
        let result = unsafe { WaitForSingleObject(handle, WAIT_TIMEOUT_MS) };
        if stop.load(Ordering::Relaxed) {
            break;
        }
        if result != WAIT_OBJECT_0 {
            continue; // timeout or error: loop back to check the stop flag
        }

        let current = mtime(&path);
        if current != last_mtime {
            last_mtime = current;
            if !reload(&path, &tx, wake) {
                break; // receiver dropped
            }
        }

        let _ = unsafe { FindNextChangeNotification(handle) };
    }

    let _ = unsafe { FindCloseChangeNotification(handle) };
}

/// Sends the reloaded config if it parses. Returns `false` once the
/// receiver is gone.
fn reload(path: &Path, tx: &Sender<Config>, wake: WindowHandle) -> bool {
    match config::try_load_from(path) {
        Ok(cfg) => {
            tracing::info!("config.toml changed, reloading");
            if tx.send(cfg).is_err() {
                return false;
            }
            // SAFETY: posting to a stale handle fails harmlessly.
            unsafe {
                let _ = PostMessageW(Some(hwnd(wake)), WM_CONFIG_CHANGED, WPARAM(0), LPARAM(0));
            }
        }
        Err(e) => tracing::warn!("config.toml invalid, skipping: {e}"),
    }
    true
}

/// Returns the modification time for a path, or `None` if unavailable.
fn mtime(path: &Path) -> Option<SystemTime> {
    path.metadata().ok().and_then(|m| m.modified().ok())
}
