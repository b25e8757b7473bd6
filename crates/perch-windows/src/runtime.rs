//! Runs the toolbar host: creates the window, docks or floats it,
//! shapes it, and pumps messages until the window is closed.

use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use perch_core::dock::Behavior;
use perch_core::dpi::scale_factor;
use perch_core::error::warn_unless_fatal;
use perch_core::monitor::clamp_index;
use perch_core::{
    Config, DockEngine, HostContext, Rect, RegionShaper, RegionTarget, Result, WindowHandle,
};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOZORDER, SetWindowPos,
    TranslateMessage,
};

use crate::appbar::{self, Win32Shell};
use crate::config_watcher;
use crate::ctrl_c;
use crate::dpi;
use crate::host::{self, HostEvent, HostWindow};
use crate::monitor::enumerate_monitors;
use crate::region::Win32Regions;
use crate::window::hwnd;

type Dock = DockEngine<Win32Shell>;
type Shaper = RegionShaper<Win32Regions>;

/// Runs until the host window is closed (or Ctrl+C).
///
/// Fails only if the host window cannot be created; every other
/// failure is logged and the toolbar keeps running.
pub fn run(config: Config) -> Result<()> {
    dpi::enable_dpi_awareness();

    let (event_tx, event_rx) = mpsc::channel();
    let callback = appbar::callback_message();
    host::set_event_sender(event_tx, callback);

    let window = HostWindow::create(initial_rect(&config))?;
    let raw = window.handle();
    let host = Rc::new(HostContext::new(move || Some(raw)));

    let mut dock = DockEngine::new(Rc::clone(&host), Win32Shell::new(callback));
    let mut shaper = RegionShaper::new(Rc::clone(&host), Win32Regions, config.pill.geometry());
    apply(&host, &mut dock, &mut shaper, &config)?;

    ctrl_c::set_handler(raw);

    let (config_tx, config_rx) = mpsc::channel();
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        thread::spawn(move || config_watcher::watch(config_tx, raw, stop));
    }

    let mut state = Runtime {
        host,
        dock,
        shaper,
        config,
        config_rx,
    };
    pump(|| state.drain(&event_rx))?;

    // The watcher notices within one wait timeout; it is not joined so
    // shutdown is not delayed by it.
    stop.store(true, Ordering::Relaxed);

    // Release the reservation while the window still exists.
    drop(state);
    drop(window);
    tracing::info!("host shut down");
    Ok(())
}

struct Runtime {
    host: Rc<HostContext>,
    dock: Dock,
    shaper: Shaper,
    config: Config,
    config_rx: Receiver<Config>,
}

impl Runtime {
    fn drain(&mut self, events: &Receiver<HostEvent>) -> Result<()> {
        while let Ok(event) = events.try_recv() {
            warn_unless_fatal(self.handle(event), &format!("{event:?} handling"))?;
        }
        Ok(())
    }

    fn handle(&mut self, event: HostEvent) -> Result<()> {
        match event {
            HostEvent::AppBar(notification) => self.dock.notify(notification),
            HostEvent::Activated => {
                self.dock.on_host_activated();
                Ok(())
            }
            HostEvent::Moved => {
                self.dock.on_host_moved();
                Ok(())
            }
            HostEvent::DisplayChanged => self.dock.reapply(),
            HostEvent::DpiChanged => {
                apply(&self.host, &mut self.dock, &mut self.shaper, &self.config)
            }
            HostEvent::ConfigChanged => {
                let Some(config) = self.config_rx.try_iter().last() else {
                    return Ok(());
                };
                self.config = config;
                apply(&self.host, &mut self.dock, &mut self.shaper, &self.config)
            }
        }
    }
}

/// Applies behavior and pill shape for the current DPI.
///
/// Only a missing host window is an error; anything else is logged.
fn apply(host: &HostContext, dock: &mut Dock, shaper: &mut Shaper, config: &Config) -> Result<()> {
    let handle = host.handle()?;
    let scale = scale_factor(Win32Regions.dpi(handle));

    if config.toolbar.behavior == Behavior::Floating {
        resize(handle, config, scale);
    }
    warn_unless_fatal(
        dock.apply_behavior(config.toolbar.dock_settings(scale)),
        &format!("applying {:?}", config.toolbar.behavior),
    )?;

    let pill = &config.pill;
    warn_unless_fatal(
        shaper.apply_pill_region(pill.width, pill.height, pill.corner_radius),
        "pill region",
    )
}

/// Sizes a floating window for the pill plus its panel, keeping its
/// position. The region hides everything below the pill.
fn resize(handle: WindowHandle, config: &Config, scale: f64) {
    let (width, height) = config.pill.window_size(scale);
    // SAFETY: SetWindowPos on our own host window.
    unsafe {
        let _ = SetWindowPos(
            hwnd(handle),
            None,
            0,
            0,
            width,
            height,
            SWP_NOMOVE | SWP_NOZORDER | SWP_NOACTIVATE,
        );
    }
}

/// Floating-size rect centred at the top of the target monitor's work
/// area, before any DPI is known.
fn initial_rect(config: &Config) -> Rect {
    let (width, height) = config.pill.window_size(1.0);
    let area = enumerate_monitors()
        .ok()
        .and_then(|monitors| {
            let index = clamp_index(config.toolbar.monitor, monitors.len());
            monitors.into_iter().nth(index)
        })
        .map(|m| m.work_area)
        .unwrap_or_else(|| Rect::new(0, 0, width, height));

    Rect::new(area.x + (area.width - width) / 2, area.y, width, height)
}

/// The Win32 message pump. Runs `after_dispatch` after every message
/// and stops at `WM_QUIT` or when it returns a fatal error.
fn pump(mut after_dispatch: impl FnMut() -> Result<()>) -> Result<()> {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
        after_dispatch()?;
    }
    Ok(())
}
