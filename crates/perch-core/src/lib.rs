pub mod config;
pub mod dock;
pub mod dpi;
pub mod error;
pub mod host;
pub mod icon;
pub mod log;
pub mod monitor;
pub mod rect;
pub mod region;
pub mod switcher;
pub mod window;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use dock::{AppBar, AppBarNotification, Behavior, DockEdge, DockEngine, DockMode, DockSettings};
pub use error::{Error, Result};
pub use host::HostContext;
pub use icon::{IconLookup, IconSource};
pub use monitor::{Displays, MonitorInfo};
pub use rect::Rect;
pub use region::{PillGeometry, Region, RegionShaper, RegionTarget};
pub use switcher::{Activation, Desktop, EnumerateOptions, WindowSwitcher};
pub use window::{WindowHandle, WindowInfo, WindowTraits};
