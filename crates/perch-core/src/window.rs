use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::icon::IconLookup;

/// An opaque native window handle.
///
/// Handles are plain values: the window they name may be destroyed at
/// any moment, so every operation taking one must tolerate staleness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct WindowHandle(usize);

impl WindowHandle {
    /// Wraps a raw pointer-sized handle value.
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> usize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Error returned when a handle string is neither decimal nor `0x` hex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid window handle: {0:?}")]
pub struct ParseHandleError(String);

impl FromStr for WindowHandle {
    type Err = ParseHandleError;

    /// Parses a handle from decimal or `0x`-prefixed hex.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parsed = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            usize::from_str_radix(hex, 16)
        } else {
            s.parse()
        };
        parsed
            .map(Self)
            .map_err(|_| ParseHandleError(s.to_string()))
    }
}

/// Style and state bits that decide whether a top-level window shows
/// up in the window switcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowTraits {
    pub visible: bool,
    /// `WS_EX_TOOLWINDOW`: floating palettes, tooltips and the like.
    pub tool_window: bool,
    /// Has an owner window (dialogs, secondary frames).
    pub owned: bool,
    /// `WS_EX_APPWINDOW`: forces a taskbar button even when owned.
    pub app_window: bool,
    /// Hidden by the compositor (other virtual desktop, suspended app).
    pub cloaked: bool,
    /// Length of the window text in UTF-16 units.
    pub title_len: usize,
}

impl WindowTraits {
    /// Returns whether a window with these traits is a switchable
    /// application window. Monitor and self-handle checks are separate.
    pub fn is_switchable(&self) -> bool {
        self.visible
            && !self.tool_window
            && (!self.owned || self.app_window)
            && !self.cloaked
            && self.title_len > 0
    }
}

/// A switchable window found by one enumeration call.
///
/// Never cache these: the window may vanish right after the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub title: String,
    /// Executable name of the owning process, or `"Unknown"`.
    pub process_name: String,
    pub icon: IconLookup,
    /// Whether this is the current foreground window.
    pub is_active: bool,
}

/// Process name reported when the owning process cannot be resolved.
pub const UNKNOWN_PROCESS: &str = "Unknown";

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> WindowTraits {
        WindowTraits {
            visible: true,
            title_len: 8,
            ..Default::default()
        }
    }

    #[test]
    fn plain_visible_titled_window_is_switchable() {
        assert!(app().is_switchable());
    }

    #[test]
    fn each_filter_excludes_on_its_own() {
        let cases = [
            WindowTraits {
                visible: false,
                ..app()
            },
            WindowTraits {
                tool_window: true,
                ..app()
            },
            WindowTraits {
                owned: true,
                ..app()
            },
            WindowTraits {
                cloaked: true,
                ..app()
            },
            WindowTraits {
                title_len: 0,
                ..app()
            },
        ];

        for traits in cases {
            assert!(!traits.is_switchable(), "{traits:?} should be excluded");
        }
    }

    #[test]
    fn owned_window_marked_as_app_window_is_switchable() {
        let traits = WindowTraits {
            owned: true,
            app_window: true,
            ..app()
        };

        assert!(traits.is_switchable());
    }

    #[test]
    fn tool_window_loses_even_with_app_window_flag() {
        let traits = WindowTraits {
            tool_window: true,
            app_window: true,
            ..app()
        };

        assert!(!traits.is_switchable());
    }

    #[test]
    fn parses_decimal_and_hex_handles() {
        assert_eq!("1234".parse(), Ok(WindowHandle::from_raw(1234)));
        assert_eq!("0x1A2B".parse(), Ok(WindowHandle::from_raw(0x1A2B)));
        assert_eq!("0XFF".parse(), Ok(WindowHandle::from_raw(0xFF)));
        assert!("0xZZ".parse::<WindowHandle>().is_err());
        assert!("notepad".parse::<WindowHandle>().is_err());
    }

    #[test]
    fn displays_as_hex() {
        assert_eq!(WindowHandle::from_raw(0x1A2B).to_string(), "0x1A2B");
    }
}
