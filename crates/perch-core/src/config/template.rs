/// Generates the default `config.toml` contents with explanatory comments.
///
/// Used by `perch init` to create a starter config file that parses to
/// [`Config::default`](super::Config::default).
pub fn generate_config() -> String {
    r##"# Perch configuration
# Location: ~/.config/perch/config.toml

[toolbar]
# How the toolbar positions itself:
# "docked-top" / "docked-bottom": reserve a strip of the screen edge so
#   maximized windows stop at the bar.
# "floating": no reservation, stays above other windows wherever it is.
# "overlay": top of the monitor, above other windows, no reservation.
behavior = "floating"
# Target monitor. 0 is the primary monitor; see `perch monitors`.
# An index that does not exist falls back to the primary monitor.
monitor = 0
# Bar height in logical pixels (scaled by the monitor's DPI).
height = 56

[pill]
# Collapsed pill size in logical pixels.
width = 960
height = 68
# Size of the ellipse that rounds each corner. Equal to the height it
# gives fully round ends; 0 gives square corners.
corner_radius = 34
# Height of the floating window in logical pixels. Only the pill is
# visible until a panel expands below it.
panel_height = 500

[switcher]
# Include application icons in window listings (`perch windows
# --no-icons` overrides this).
icons = true

[logging]
# Enable file logging to ~/.config/perch/logs/perch.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
# The RUST_LOG environment variable overrides this.
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}
