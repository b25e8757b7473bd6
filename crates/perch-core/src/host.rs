//! The host window context shared by the docking engine, the region
//! shaper and the window enumerator.

use std::cell::Cell;
use std::fmt;

use crate::error::{Error, Result};
use crate::window::WindowHandle;

type Resolver = Box<dyn Fn() -> Option<WindowHandle>>;

/// Lazily resolved native handle of the host window.
///
/// Constructed once per host window and shared with `Rc`. The resolver
/// runs until it yields a handle, after which the handle is cached for
/// the lifetime of the context. The context is `!Send` because every
/// consumer must stay on the thread that owns the window.
pub struct HostContext {
    resolver: Resolver,
    cached: Cell<Option<WindowHandle>>,
}

impl HostContext {
    /// Creates a context that resolves the handle on first use.
    pub fn new(resolver: impl Fn() -> Option<WindowHandle> + 'static) -> Self {
        Self {
            resolver: Box::new(resolver),
            cached: Cell::new(None),
        }
    }

    /// Creates a context for an already known handle.
    pub fn with_handle(handle: WindowHandle) -> Self {
        let ctx = Self::new(|| None);
        if !handle.is_null() {
            ctx.cached.set(Some(handle));
        }
        ctx
    }

    /// Returns the host handle, resolving it on first use.
    ///
    /// Fails with [`Error::HostWindowUnavailable`] when the resolver
    /// cannot produce a non-null handle. Nothing that needs the host
    /// window can proceed after that.
    pub fn handle(&self) -> Result<WindowHandle> {
        if let Some(handle) = self.cached.get() {
            return Ok(handle);
        }
        match (self.resolver)() {
            Some(handle) if !handle.is_null() => {
                self.cached.set(Some(handle));
                Ok(handle)
            }
            _ => Err(Error::HostWindowUnavailable),
        }
    }

    /// Returns the handle if it has already been resolved.
    pub fn resolved(&self) -> Option<WindowHandle> {
        self.cached.get()
    }
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostContext")
            .field("handle", &self.cached.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn resolves_lazily_and_caches() {
        // Arrange
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let ctx = HostContext::new(move || {
            counter.set(counter.get() + 1);
            Some(WindowHandle::from_raw(0x42))
        });

        // Act
        assert_eq!(ctx.resolved(), None);
        let first = ctx.handle().unwrap();
        let second = ctx.handle().unwrap();

        // Assert
        assert_eq!(first, WindowHandle::from_raw(0x42));
        assert_eq!(first, second);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn unresolvable_handle_is_fatal() {
        let ctx = HostContext::new(|| None);

        let err = ctx.handle().unwrap_err();

        assert!(matches!(err, Error::HostWindowUnavailable));
    }

    #[test]
    fn null_handle_counts_as_unresolved() {
        let ctx = HostContext::new(|| Some(WindowHandle::from_raw(0)));

        assert!(ctx.handle().is_err());
        assert!(HostContext::with_handle(WindowHandle::from_raw(0)).handle().is_err());
    }

    #[test]
    fn retries_until_the_window_exists() {
        let ready = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ready);
        let ctx = HostContext::new(move || flag.get().then(|| WindowHandle::from_raw(7)));

        assert!(ctx.handle().is_err());
        ready.set(true);

        assert_eq!(ctx.handle().unwrap(), WindowHandle::from_raw(7));
    }
}
