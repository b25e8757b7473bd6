#[cfg(windows)]
use comfy_table::presets::UTF8_FULL;
#[cfg(windows)]
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

#[cfg(windows)]
use perch_core::{MonitorInfo, WindowSwitcher};

/// Prints the monitor layout, primary first.
#[cfg(windows)]
pub fn execute(json: bool) {
    let switcher = WindowSwitcher::new(perch_windows::Win32Desktop);
    let monitors = match switcher.list_monitors() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if json {
        match serde_json::to_string_pretty(&monitors) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    println!("{}", table(&monitors));
    println!("\n{} monitors found", monitors.len());
}

#[cfg(not(windows))]
pub fn execute(_json: bool) {
    super::unsupported();
}

#[cfg(windows)]
fn table(monitors: &[MonitorInfo]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Index").set_alignment(CellAlignment::Right),
            Cell::new("Label"),
            Cell::new("Device"),
            Cell::new("Bounds"),
            Cell::new("Work area"),
        ]);

    for m in monitors {
        table.add_row(vec![
            Cell::new(m.index).set_alignment(CellAlignment::Right),
            Cell::new(m.label()),
            Cell::new(&m.device),
            Cell::new(format!(
                "{},{} {}x{}",
                m.bounds.x, m.bounds.y, m.bounds.width, m.bounds.height
            )),
            Cell::new(format!(
                "{},{} {}x{}",
                m.work_area.x, m.work_area.y, m.work_area.width, m.work_area.height
            )),
        ]);
    }
    table
}
