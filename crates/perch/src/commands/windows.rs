use clap::Args;

use perch_core::config::SwitcherConfig;
use perch_core::{EnumerateOptions, WindowHandle};

#[derive(Args)]
pub struct WindowsArgs {
    /// Monitor index (0 = primary)
    #[arg(long, default_value_t = 0)]
    pub monitor: usize,
    /// Print JSON (icons as base64 PNG) instead of a table
    #[arg(long)]
    pub json: bool,
    /// Skip icon extraction, whatever `switcher.icons` says
    #[arg(long)]
    pub no_icons: bool,
    /// Leave this window out, as the toolbar leaves out its own host
    #[arg(long, value_name = "HWND")]
    pub exclude: Option<WindowHandle>,
}

#[cfg(windows)]
pub fn execute(args: &WindowsArgs) {
    use std::rc::Rc;

    use comfy_table::presets::UTF8_FULL;
    use comfy_table::{Cell, ContentArrangement, Table};
    use perch_core::{HostContext, WindowSwitcher, config};

    let options = enumerate_options(&config::load().switcher, args.no_icons);
    let mut switcher = WindowSwitcher::new(perch_windows::Win32Desktop).with_options(options);
    if let Some(handle) = args.exclude {
        switcher = switcher.excluding_host(Rc::new(HostContext::with_handle(handle)));
    }

    let windows = switcher.list_windows_on_monitor(args.monitor);

    if args.json {
        match serde_json::to_string_pretty(&windows) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("HWND"),
            Cell::new("Title"),
            Cell::new("Process"),
            Cell::new("Icon"),
            Cell::new("Active"),
        ]);

    for window in &windows {
        let icon = if window.icon.is_found() {
            format!("{} bytes", window.icon.bytes().len())
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            Cell::new(window.handle),
            Cell::new(&window.title),
            Cell::new(&window.process_name),
            Cell::new(icon),
            Cell::new(if window.is_active { "yes" } else { "" }),
        ]);
    }

    println!("{table}");
    println!("\n{} windows found on monitor {}", windows.len(), args.monitor);
}

#[cfg(not(windows))]
pub fn execute(_args: &WindowsArgs) {
    super::unsupported();
}

/// `--no-icons` wins over the config file.
#[cfg_attr(not(windows), allow(dead_code))]
fn enumerate_options(switcher: &SwitcherConfig, no_icons: bool) -> EnumerateOptions {
    let mut options = switcher.enumerate_options();
    if no_icons {
        options.icons = false;
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icons_follow_the_config_unless_disabled_on_the_command_line() {
        let on = SwitcherConfig { icons: true };
        let off = SwitcherConfig { icons: false };

        assert!(enumerate_options(&on, false).icons);
        assert!(!enumerate_options(&on, true).icons);
        assert!(!enumerate_options(&off, false).icons);
    }
}
