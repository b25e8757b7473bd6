//! GDI regions for [`Region`] shapes.
//!
//! A region handle is owned by us until `SetWindowRgn` succeeds; after
//! that the window owns it and we must never delete it.

use perch_core::{Error, Rect, Region, RegionTarget, Result, WindowHandle};
use windows::Win32::Graphics::Gdi::{
    CombineRgn, CreateRectRgn, CreateRoundRectRgn, DeleteObject, HRGN, RGN_ERROR, RGN_OR,
    SetWindowRgn,
};

use crate::dpi::window_dpi;
use crate::window::hwnd;

/// An `HRGN` deleted on drop unless handed to a window.
struct OwnedRegion(HRGN);

impl OwnedRegion {
    /// Builds the GDI region for a shape.
    ///
    /// `CreateRoundRectRgn` excludes the right and bottom edges, so
    /// rounded shapes are created one pixel larger there. Plain rects
    /// map onto `CreateRectRgn` as they are.
    fn build(region: &Region) -> Result<Self> {
        match region {
            Region::Rect(rect) => Self::rect(rect),
            Region::RoundRect { rect, ellipse } => Self::round_rect(rect, *ellipse),
            Region::Union(parts) => {
                let mut parts = parts.iter();
                let Some(first) = parts.next() else {
                    return Self::rect(&Rect::default());
                };
                parts.try_fold(Self::build(first)?, |acc, part| acc.union(Self::build(part)?))
            }
        }
    }

    fn rect(rect: &Rect) -> Result<Self> {
        // SAFETY: plain GDI object creation.
        let [left, top, right, bottom] = rect_args(rect);
        let hrgn = unsafe { CreateRectRgn(left, top, right, bottom) };
        Self::checked(hrgn, "CreateRectRgn")
    }

    fn round_rect(rect: &Rect, ellipse: i32) -> Result<Self> {
        let [left, top, right, bottom, w, h] = round_rect_args(rect, ellipse);
        // SAFETY: plain GDI object creation.
        let hrgn = unsafe { CreateRoundRectRgn(left, top, right, bottom, w, h) };
        Self::checked(hrgn, "CreateRoundRectRgn")
    }

    fn checked(hrgn: HRGN, op: &'static str) -> Result<Self> {
        if hrgn.is_invalid() {
            return Err(Error::platform(op, std::io::Error::last_os_error()));
        }
        Ok(Self(hrgn))
    }

    /// ORs two regions into a new one. Both inputs are released.
    fn union(self, other: OwnedRegion) -> Result<Self> {
        let combined = Self::rect(&Rect::default())?;
        // SAFETY: all three handles are live regions we own.
        let kind = unsafe { CombineRgn(Some(combined.0), Some(self.0), Some(other.0), RGN_OR) };
        if kind == RGN_ERROR {
            return Err(Error::platform("CombineRgn", "region combination failed"));
        }
        Ok(combined)
    }

    /// Hands the region to the window. On failure the region stays ours
    /// and is released on drop.
    fn assign_to(self, window: WindowHandle) -> Result<()> {
        // SAFETY: on success the window takes ownership of the region.
        let ok = unsafe { SetWindowRgn(hwnd(window), Some(self.0), true) };
        if ok == 0 {
            return Err(Error::platform("SetWindowRgn", std::io::Error::last_os_error()));
        }
        std::mem::forget(self);
        Ok(())
    }
}

fn rect_args(rect: &Rect) -> [i32; 4] {
    [rect.x, rect.y, rect.right(), rect.bottom()]
}

/// The corner value is the ellipse size itself, not a radius.
fn round_rect_args(rect: &Rect, ellipse: i32) -> [i32; 6] {
    [
        rect.x,
        rect.y,
        rect.right() + 1,
        rect.bottom() + 1,
        ellipse,
        ellipse,
    ]
}

impl Drop for OwnedRegion {
    fn drop(&mut self) {
        // SAFETY: we still own the region.
        unsafe {
            let _ = DeleteObject(self.0.into());
        }
    }
}

/// [`RegionTarget`] backed by GDI regions and `GetDpiForWindow`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Regions;

impl RegionTarget for Win32Regions {
    fn dpi(&self, window: WindowHandle) -> u32 {
        window_dpi(hwnd(window))
    }

    fn assign(&mut self, window: WindowHandle, region: Option<&Region>) -> Result<()> {
        match region {
            Some(region) => {
                let bounds = region.bounds();
                OwnedRegion::build(region)?.assign_to(window)?;
                tracing::info!(
                    "window region set to {}x{} for {window}",
                    bounds.width,
                    bounds.height
                );
            }
            None => {
                // SAFETY: a null region removes the window's shape.
                let ok = unsafe { SetWindowRgn(hwnd(window), None, true) };
                if ok == 0 {
                    return Err(Error::platform("SetWindowRgn", std::io::Error::last_os_error()));
                }
                tracing::info!("window region cleared for {window}");
            }
        }
        Ok(())
    }
}
