mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::dock::{Behavior, DockSettings};
use crate::dpi::to_physical;
use crate::log::LogConfig;
use crate::region::PillGeometry;
use crate::switcher::EnumerateOptions;

pub use loader::{config_dir, config_path, load, load_from, try_load, try_load_from};

/// Top-level configuration for Perch.
///
/// Loaded from `~/.config/perch/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub toolbar: ToolbarConfig,
    pub pill: PillConfig,
    pub switcher: SwitcherConfig,
    pub logging: LogConfig,
}

/// Toolbar placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarConfig {
    pub behavior: Behavior,
    /// Target monitor index; 0 is the primary monitor.
    pub monitor: usize,
    /// Bar height in logical pixels.
    pub height: i32,
}

/// Pill shape in logical pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PillConfig {
    pub width: i32,
    pub height: i32,
    /// Size of the ellipse rounding each corner. Equal to `height` the
    /// pill has fully round ends.
    pub corner_radius: i32,
    /// Height of the floating window. The pill region clips it, and
    /// an expanded panel can reveal up to this much.
    pub panel_height: i32,
}

/// Window switcher settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwitcherConfig {
    /// Resolve window icons during enumeration.
    pub icons: bool,
}

impl Default for ToolbarConfig {
    fn default() -> Self {
        Self {
            behavior: Behavior::default(),
            monitor: 0,
            height: 56,
        }
    }
}

impl Default for PillConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 68,
            corner_radius: 34,
            panel_height: 500,
        }
    }
}

impl Default for SwitcherConfig {
    fn default() -> Self {
        Self {
            icons: true,
        }
    }
}

impl Config {
    /// Clamps sizes to safe ranges.
    ///
    /// The corner radius is clamped after the pill height so it never
    /// exceeds the final height.
    pub fn validate(&mut self) {
        self.toolbar.height = self.toolbar.height.clamp(16, 512);
        self.pill.width = self.pill.width.clamp(32, 7680);
        self.pill.height = self.pill.height.clamp(16, 512);
        self.pill.corner_radius = self.pill.corner_radius.clamp(0, self.pill.height);
        self.pill.panel_height = self.pill.panel_height.clamp(self.pill.height, 4320);
    }
}

impl ToolbarConfig {
    /// Docking input at `scale`, with the height in physical pixels.
    pub fn dock_settings(&self, scale: f64) -> DockSettings {
        DockSettings {
            behavior: self.behavior,
            monitor_index: self.monitor,
            height: to_physical(self.height, scale),
        }
    }
}

impl SwitcherConfig {
    pub fn enumerate_options(&self) -> EnumerateOptions {
        EnumerateOptions { icons: self.icons }
    }
}

impl PillConfig {
    /// Physical size of a floating host window at `scale`.
    pub fn window_size(&self, scale: f64) -> (i32, i32) {
        let height = self.panel_height.max(self.height);
        (to_physical(self.width, scale), to_physical(height, scale))
    }

    pub fn geometry(&self) -> PillGeometry {
        PillGeometry {
            width: self.width,
            height: self.height,
            corner_radius: self.corner_radius,
        }
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
