//! Window icons: one Win32 lookup per [`IconSource`], rasterised to PNG.
//!
//! Icons obtained through `WM_GETICON` and the class are shared with
//! the owning window and must not be destroyed here.

use std::io::Cursor;
use std::mem;

use image::{ImageFormat, RgbaImage};
use perch_core::IconSource;
use windows::Win32::Foundation::{HWND, LPARAM, WPARAM};
use windows::Win32::Graphics::Gdi::{
    BI_RGB, BITMAP, BITMAPINFO, BITMAPINFOHEADER, CreateCompatibleDC, CreateDIBSection,
    DIB_RGB_COLORS, DeleteDC, DeleteObject, GetObjectW, SelectObject,
};
use windows::Win32::UI::WindowsAndMessaging::{
    DI_FLAGS, DI_MASK, DI_NORMAL, DrawIconEx, GCLP_HICON, GCLP_HICONSM, GetClassLongPtrW, GetIconInfo, HICON,
    ICONINFO, SMTO_ABORTIFHUNG, SendMessageTimeoutW, WM_GETICON,
};

// WM_GETICON wParam values.
const ICON_SMALL: usize = 0;
const ICON_BIG: usize = 1;
const ICON_SMALL2: usize = 2;

/// How long a hung window may block one `WM_GETICON` (ms).
const GETICON_TIMEOUT_MS: u32 = 100;

/// Largest edge we rasterise at.
const MAX_ICON_SIZE: i32 = 256;

/// Runs one lookup strategy and encodes the result as PNG.
pub fn icon_png(hwnd: HWND, source: IconSource) -> Option<Vec<u8>> {
    let hicon = lookup(hwnd, source)?;
    let size = native_icon_size(hicon).clamp(16, MAX_ICON_SIZE);
    let pixels = rasterise(hicon, size, DI_NORMAL, 0)?;
    // Icons without an alpha channel take their opacity from the mask.
    let mask = if has_alpha(&pixels) {
        None
    } else {
        rasterise(hicon, size, DI_MASK, u32::MAX)
    };
    encode_png(&to_rgba(&pixels, mask.as_deref()), size as u32)
}

fn lookup(hwnd: HWND, source: IconSource) -> Option<HICON> {
    let raw = match source {
        IconSource::MessageBig => get_icon_message(hwnd, ICON_BIG),
        IconSource::MessageSmall => get_icon_message(hwnd, ICON_SMALL),
        IconSource::MessageSmall2 => get_icon_message(hwnd, ICON_SMALL2),
        // SAFETY: class queries on a possibly stale handle return 0.
        IconSource::ClassBig => unsafe { GetClassLongPtrW(hwnd, GCLP_HICON) as usize },
        IconSource::ClassSmall => unsafe { GetClassLongPtrW(hwnd, GCLP_HICONSM) as usize },
    };
    (raw != 0).then(|| HICON(raw as *mut _))
}

/// `WM_GETICON` that gives up on hung windows instead of blocking.
fn get_icon_message(hwnd: HWND, kind: usize) -> usize {
    let mut result: usize = 0;
    // SAFETY: SMTO_ABORTIFHUNG bounds the wait; result is our usize.
    let sent = unsafe {
        SendMessageTimeoutW(
            hwnd,
            WM_GETICON,
            WPARAM(kind),
            LPARAM(0),
            SMTO_ABORTIFHUNG,
            GETICON_TIMEOUT_MS,
            Some(&mut result as *mut usize),
        )
    };
    if sent.0 == 0 { 0 } else { result }
}

/// Queries the HICON for its native pixel width. Falls back to 32.
fn native_icon_size(hicon: HICON) -> i32 {
    // SAFETY: GetIconInfo hands us copies of the icon bitmaps, which we
    // delete before returning.
    unsafe {
        let mut ii: ICONINFO = mem::zeroed();
        if GetIconInfo(hicon, &mut ii).is_err() {
            return 32;
        }
        let mut bm: BITMAP = mem::zeroed();
        let size = if !ii.hbmColor.0.is_null()
            && GetObjectW(
                ii.hbmColor.into(),
                mem::size_of::<BITMAP>() as i32,
                Some(&mut bm as *mut BITMAP as *mut _),
            ) > 0
        {
            bm.bmWidth
        } else {
            32
        };
        if !ii.hbmColor.0.is_null() {
            let _ = DeleteObject(ii.hbmColor.into());
        }
        if !ii.hbmMask.0.is_null() {
            let _ = DeleteObject(ii.hbmMask.into());
        }
        size
    }
}

/// Draws the icon into a top-down 32-bit DIB filled with `background`
/// and returns its BGRA pixels, premultiplied as `DrawIconEx` leaves
/// them.
fn rasterise(hicon: HICON, size: i32, flags: DI_FLAGS, background: u32) -> Option<Vec<u32>> {
    // SAFETY: every GDI object created here is released on all paths.
    unsafe {
        let dc = CreateCompatibleDC(None);
        let bmi = BITMAPINFO {
            bmiHeader: BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: size,
                biHeight: -size,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut bits = std::ptr::null_mut();
        let Ok(bmp) = CreateDIBSection(Some(dc), &bmi, DIB_RGB_COLORS, &mut bits, None, 0) else {
            let _ = DeleteDC(dc);
            return None;
        };
        if bits.is_null() {
            let _ = DeleteObject(bmp.into());
            let _ = DeleteDC(dc);
            return None;
        }
        let old = SelectObject(dc, bmp.into());
        let buf = std::slice::from_raw_parts_mut(bits as *mut u32, (size * size) as usize);
        buf.fill(background);

        let drawn = DrawIconEx(dc, 0, 0, hicon, size, size, 0, None, flags).is_ok();
        let pixels = drawn.then(|| buf.to_vec());

        SelectObject(dc, old);
        let _ = DeleteObject(bmp.into());
        let _ = DeleteDC(dc);
        pixels
    }
}

fn has_alpha(pixels: &[u32]) -> bool {
    pixels.iter().any(|p| p >> 24 != 0)
}

/// Converts premultiplied BGRA to straight RGBA.
///
/// Without an alpha channel a pixel is opaque where the AND mask is
/// black; with no mask at all every pixel is opaque.
fn to_rgba(pixels: &[u32], mask: Option<&[u32]>) -> Vec<u8> {
    let alpha = has_alpha(pixels);
    let mut rgba = Vec::with_capacity(pixels.len() * 4);

    for (i, &p) in pixels.iter().enumerate() {
        let (mut r, mut g, mut b) = ((p >> 16) & 0xFF, (p >> 8) & 0xFF, p & 0xFF);
        let a = if alpha {
            p >> 24
        } else {
            match mask.and_then(|m| m.get(i)) {
                Some(&m) if m & 0x00FF_FFFF != 0 => 0,
                _ => 255,
            }
        };
        if a > 0 && a < 255 {
            r = (r * 255 / a).min(255);
            g = (g * 255 / a).min(255);
            b = (b * 255 / a).min(255);
        }
        rgba.extend_from_slice(&[r as u8, g as u8, b as u8, a as u8]);
    }
    rgba
}

/// Encodes RGBA pixels as PNG. A fully transparent icon is no icon.
fn encode_png(rgba: &[u8], size: u32) -> Option<Vec<u8>> {
    if !rgba.chunks_exact(4).any(|px| px[3] != 0) {
        return None;
    }

    let image = RgbaImage::from_raw(size, size, rgba.to_vec())?;
    let mut png = Vec::new();
    if let Err(e) = image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png) {
        tracing::debug!("icon PNG encoding failed: {e}");
        return None;
    }
    Some(png)
}
