use std::mem;

use perch_core::monitor::{MonitorInfo, order_monitors};
use perch_core::{Error, Rect, Result};
use windows::Win32::Foundation::{LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
};
use windows::core::BOOL;

/// `dwFlags` bit marking the primary monitor.
const MONITORINFOF_PRIMARY: u32 = 1;

/// Lists every active monitor, primary first, indices `0..N`.
pub fn enumerate_monitors() -> Result<Vec<MonitorInfo>> {
    let mut raw: Vec<MonitorInfo> = Vec::new();

    // SAFETY: EnumDisplayMonitors runs synchronously and calls
    // monitor_callback with our Vec pointer as LPARAM. The Vec
    // outlives the call.
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(monitor_callback),
            LPARAM(&mut raw as *mut _ as isize),
        )
    };
    if !ok.as_bool() {
        return Err(Error::platform(
            "EnumDisplayMonitors",
            std::io::Error::last_os_error(),
        ));
    }

    Ok(order_monitors(raw))
}

unsafe extern "system" fn monitor_callback(
    monitor: HMONITOR,
    _dc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is the Vec pointer passed by enumerate_monitors().
    let monitors = unsafe { &mut *(lparam.0 as *mut Vec<MonitorInfo>) };

    // A monitor that disappears mid-enumeration is skipped.
    if let Some(info) = describe(monitor) {
        monitors.push(info);
    }

    BOOL(1) // TRUE: continue enumerating
}

fn describe(monitor: HMONITOR) -> Option<MonitorInfo> {
    let mut info = MONITORINFOEXW {
        monitorInfo: MONITORINFO {
            cbSize: mem::size_of::<MONITORINFOEXW>() as u32,
            ..Default::default()
        },
        ..Default::default()
    };

    // SAFETY: cbSize announces the extended struct, so the OS may also
    // fill szDevice.
    let ok = unsafe { GetMonitorInfoW(monitor, &mut info as *mut MONITORINFOEXW as *mut MONITORINFO) };
    if !ok.as_bool() {
        return None;
    }

    let device_len = info
        .szDevice
        .iter()
        .position(|&c| c == 0)
        .unwrap_or(info.szDevice.len());

    Some(MonitorInfo {
        index: 0,
        device: String::from_utf16_lossy(&info.szDevice[..device_len]),
        is_primary: info.monitorInfo.dwFlags & MONITORINFOF_PRIMARY != 0,
        bounds: to_rect(&info.monitorInfo.rcMonitor),
        work_area: to_rect(&info.monitorInfo.rcWork),
        handle: monitor.0 as usize,
    })
}

pub(crate) fn to_rect(rc: &RECT) -> Rect {
    Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom)
}
