use serde::Serialize;

use crate::Rect;
use crate::error::Result;

/// A display output as seen by one enumeration call.
///
/// Nothing here survives a display reconfiguration: indices are
/// reassigned on every query and `handle` is only meaningful until the
/// next display change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonitorInfo {
    /// Zero-based position, primary monitor first.
    pub index: usize,
    /// OS device name (e.g. `\\.\DISPLAY1`).
    pub device: String,
    pub is_primary: bool,
    /// Full monitor bounds in virtual-desktop coordinates.
    pub bounds: Rect,
    /// Bounds minus space reserved by the taskbar and other AppBars.
    pub work_area: Rect,
    /// Opaque native monitor handle.
    #[serde(skip)]
    pub handle: usize,
}

impl MonitorInfo {
    /// Human-readable label, e.g. "Monitor 1 (Primary)".
    pub fn label(&self) -> String {
        if self.is_primary {
            format!("Monitor {} (Primary)", self.index + 1)
        } else {
            format!("Monitor {}", self.index + 1)
        }
    }
}

/// Source of the current monitor layout.
pub trait Displays {
    /// Lists every active monitor, primary first.
    ///
    /// Fails only when the underlying OS enumeration call fails.
    fn monitors(&self) -> Result<Vec<MonitorInfo>>;
}

/// Sorts monitors primary-first and renumbers them `0..N`.
///
/// `raw` must be in OS enumeration order. Ties keep that order (the
/// sort is stable). If more than one monitor claims to be primary, only
/// the first one keeps the flag.
pub fn order_monitors(mut raw: Vec<MonitorInfo>) -> Vec<MonitorInfo> {
    let mut seen_primary = false;
    for monitor in &mut raw {
        if monitor.is_primary {
            monitor.is_primary = !seen_primary;
            seen_primary = true;
        }
    }

    raw.sort_by_key(|m| !m.is_primary);

    for (i, monitor) in raw.iter_mut().enumerate() {
        monitor.index = i;
    }
    raw
}

/// Clamps an out-of-range monitor index to the primary monitor.
pub fn clamp_index(index: usize, count: usize) -> usize {
    if index < count {
        index
    } else {
        tracing::debug!("monitor index {index} out of range ({count} monitors), using primary");
        0
    }
}
