pub mod activate;
pub mod init;
pub mod monitors;
pub mod run;
pub mod windows;

/// Exits with an error on platforms without a desktop backend.
#[cfg(not(windows))]
pub fn unsupported() -> ! {
    eprintln!("Error: perch requires Windows.");
    std::process::exit(1);
}
