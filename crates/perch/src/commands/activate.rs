use perch_core::WindowHandle;

/// Focuses a window, restoring it first if minimized.
///
/// A stale handle exits with code 1. A refusal by the OS foreground
/// lock is only a warning.
#[cfg(windows)]
pub fn execute(handle: WindowHandle) {
    use perch_core::{Activation, WindowSwitcher};

    let switcher = WindowSwitcher::new(perch_windows::Win32Desktop);
    match switcher.activate(handle) {
        Activation::Focused => println!("Activated {handle}"),
        Activation::Refused => {
            println!("Warning: Windows refused to bring {handle} to the foreground");
        }
        Activation::Stale => {
            eprintln!("Error: {handle} is not a window");
            std::process::exit(1);
        }
    }
}

#[cfg(not(windows))]
pub fn execute(_handle: WindowHandle) {
    super::unsupported();
}
