/// Loads the config, starts logging and runs the toolbar host.
#[cfg(windows)]
pub fn execute() {
    let config = perch_core::config::load();
    perch_core::log::init(&config.logging);

    print_banner(&config);
    if let Err(e) = perch_windows::runtime::run(config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(windows)]
fn print_banner(config: &perch_core::Config) {
    println!(
        "Perch v{} ({:?} on monitor {}). Press Ctrl+C to exit.",
        env!("CARGO_PKG_VERSION"),
        config.toolbar.behavior,
        config.toolbar.monitor
    );
}

#[cfg(not(windows))]
pub fn execute() {
    super::unsupported();
}
