//! Non-rectangular window shapes: a rounded pill that can grow a
//! rectangular panel underneath it.

use std::rc::Rc;

use crate::Rect;
use crate::dpi::{scale_factor, to_physical};
use crate::error::Result;
use crate::host::HostContext;
use crate::window::WindowHandle;

/// A window shape in physical pixels, relative to the window origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    Rect(Rect),
    /// `ellipse` is the width and height of the ellipse that rounds
    /// each corner, at most the shorter side.
    RoundRect { rect: Rect, ellipse: i32 },
    Union(Vec<Region>),
}

impl Region {
    pub fn round_rect(rect: Rect, ellipse: i32) -> Self {
        let max = rect.width.min(rect.height);
        Self::RoundRect {
            rect,
            ellipse: ellipse.clamp(0, max.max(0)),
        }
    }

    /// Combines two shapes; nested unions are flattened.
    pub fn union(self, other: Region) -> Self {
        let mut parts = match self {
            Self::Union(parts) => parts,
            single => vec![single],
        };
        match other {
            Self::Union(more) => parts.extend(more),
            single => parts.push(single),
        }
        Self::Union(parts)
    }

    /// Smallest rectangle covering the whole shape.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Rect(rect) | Self::RoundRect { rect, .. } => *rect,
            Self::Union(parts) => parts
                .iter()
                .map(Region::bounds)
                .reduce(|a, b| a.union(&b))
                .unwrap_or_default(),
        }
    }

    /// Hit-tests a point against the shape.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        match self {
            Self::Rect(rect) => rect.contains(x, y),
            Self::RoundRect { rect, ellipse } => {
                if !rect.contains(x, y) {
                    return false;
                }
                let r = *ellipse / 2;
                if r == 0 {
                    return true;
                }
                // Distance from the nearest corner circle centre, if the
                // point lies in a corner square.
                let cx = if x < rect.x + r {
                    rect.x + r
                } else if x >= rect.right() - r {
                    rect.right() - r
                } else {
                    return true;
                };
                let cy = if y < rect.y + r {
                    rect.y + r
                } else if y >= rect.bottom() - r {
                    rect.bottom() - r
                } else {
                    return true;
                };
                let (dx, dy) = (i64::from(x - cx), i64::from(y - cy));
                dx * dx + dy * dy <= i64::from(r) * i64::from(r)
            }
            Self::Union(parts) => parts.iter().any(|p| p.contains(x, y)),
        }
    }
}

/// Pill dimensions in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PillGeometry {
    pub width: i32,
    pub height: i32,
    pub corner_radius: i32,
}

impl PillGeometry {
    /// The rounded pill at `scale`.
    pub fn region(&self, scale: f64) -> Region {
        let width = to_physical(self.width, scale);
        let height = to_physical(self.height, scale);
        let ellipse = to_physical(self.corner_radius, scale);
        Region::round_rect(Rect::new(0, 0, width, height), ellipse)
    }

    /// The pill joined to a rectangular panel reaching `total_height`.
    ///
    /// The panel starts halfway down the pill so the lower rounded
    /// corners are filled in. A total not taller than the pill yields
    /// the plain pill.
    pub fn expanded_region(&self, total_height: i32, scale: f64) -> Region {
        let pill = self.region(scale);
        let pill_bounds = pill.bounds();
        let total = to_physical(total_height, scale);
        if total <= pill_bounds.height {
            return pill;
        }
        let top = pill_bounds.height / 2;
        let body = Region::Rect(Rect::new(0, top, pill_bounds.width, total - top));
        pill.union(body)
    }
}

/// Platform side of window shaping.
pub trait RegionTarget {
    /// DPI of the monitor the window is on; 0 when unknown.
    fn dpi(&self, window: WindowHandle) -> u32;

    /// Replaces the window's shape. `None` removes any shape.
    fn assign(&mut self, window: WindowHandle, region: Option<&Region>) -> Result<()>;
}

/// Keeps the host window's visible shape in sync with the pill layout.
///
/// DPI is queried on every call so a move between monitors is picked
/// up by the next shape change.
pub struct RegionShaper<T: RegionTarget> {
    host: Rc<HostContext>,
    target: T,
    pill: PillGeometry,
    applied: Option<Region>,
}

impl<T: RegionTarget> RegionShaper<T> {
    pub fn new(host: Rc<HostContext>, target: T, pill: PillGeometry) -> Self {
        Self {
            host,
            target,
            pill,
            applied: None,
        }
    }

    pub fn pill(&self) -> PillGeometry {
        self.pill
    }

    /// The shape most recently assigned to the window.
    pub fn applied(&self) -> Option<&Region> {
        self.applied.as_ref()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Shapes the window as a rounded pill and makes it the collapsed
    /// shape used by [`collapse`](Self::collapse).
    pub fn apply_pill_region(&mut self, width: i32, height: i32, corner_radius: i32) -> Result<()> {
        self.pill = PillGeometry {
            width,
            height,
            corner_radius,
        };
        let (host, scale) = self.host_scale()?;
        self.assign(host, self.pill.region(scale))
    }

    /// Extends the shape downward to `total_height` logical pixels.
    pub fn expand(&mut self, total_height: i32) -> Result<()> {
        let (host, scale) = self.host_scale()?;
        tracing::debug!("expanding region to {total_height}px at scale {scale}");
        self.assign(host, self.pill.expanded_region(total_height, scale))
    }

    /// Returns to the plain pill shape.
    pub fn collapse(&mut self) -> Result<()> {
        let (host, scale) = self.host_scale()?;
        self.assign(host, self.pill.region(scale))
    }

    /// Follows a UI panel opening or closing.
    pub fn set_panel_open(&mut self, open: bool, total_height: i32) -> Result<()> {
        if open {
            self.expand(total_height)
        } else {
            self.collapse()
        }
    }

    /// Removes any shape so the whole window is visible.
    pub fn clear(&mut self) -> Result<()> {
        let host = self.host.handle()?;
        self.target.assign(host, None)?;
        self.applied = None;
        Ok(())
    }

    fn host_scale(&self) -> Result<(WindowHandle, f64)> {
        let host = self.host.handle()?;
        Ok((host, scale_factor(self.target.dpi(host))))
    }

    fn assign(&mut self, host: WindowHandle, region: Region) -> Result<()> {
        self.target.assign(host, Some(&region))?;
        self.applied = Some(region);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::error::Error;
    use crate::testing::FakeRegions;

    const PILL: PillGeometry = PillGeometry {
        width: 960,
        height: 68,
        corner_radius: 34,
    };

    fn shaper(dpi: u32) -> RegionShaper<FakeRegions> {
        let host = Rc::new(HostContext::with_handle(WindowHandle::from_raw(1)));
        RegionShaper::new(host, FakeRegions::at_dpi(dpi), PILL)
    }

    #[test]
    fn pill_at_reference_dpi() {
        // Arrange
        let mut shaper = shaper(96);

        // Act
        shaper.apply_pill_region(960, 68, 34).unwrap();

        // Assert
        let region = shaper.applied().unwrap();
        assert_eq!(region.bounds(), Rect::new(0, 0, 960, 68));
        assert_eq!(
            *region,
            Region::RoundRect {
                rect: Rect::new(0, 0, 960, 68),
                ellipse: 34
            }
        );
        // A 34px corner ellipse rounds each corner with a 17px radius.
        assert!(!region.contains(0, 0));
        assert!(region.contains(5, 5));
        assert!(region.contains(17, 0));
    }

    #[test]
    fn pill_scales_with_dpi() {
        let mut shaper = shaper(144);

        shaper.apply_pill_region(960, 68, 34).unwrap();

        assert_eq!(shaper.applied().unwrap().bounds(), Rect::new(0, 0, 1440, 102));
    }

    #[test]
    fn dpi_is_queried_on_every_call() {
        let mut shaper = shaper(96);
        shaper.apply_pill_region(960, 68, 34).unwrap();

        shaper.target.set_dpi(192);
        shaper.collapse().unwrap();

        assert_eq!(shaper.applied().unwrap().bounds().height, 136);
    }

    #[test]
    fn unknown_dpi_uses_reference_scale() {
        let mut shaper = shaper(0);

        shaper.apply_pill_region(960, 68, 34).unwrap();

        assert_eq!(shaper.applied().unwrap().bounds().height, 68);
    }

    #[test]
    fn expand_adds_a_body_below_the_pill() {
        let mut shaper = shaper(96);
        shaper.apply_pill_region(960, 68, 34).unwrap();

        shaper.expand(400).unwrap();

        let region = shaper.applied().unwrap();
        assert_eq!(region.bounds(), Rect::new(0, 0, 960, 400));
        // Lower pill corners are filled by the body.
        assert!(region.contains(0, 67));
        assert!(region.contains(959, 399));
        // Upper pill corners stay rounded.
        assert!(!region.contains(0, 0));
        assert!(!region.contains(959, 0));
    }

    #[test]
    fn expand_to_pill_height_or_less_is_the_plain_pill() {
        let mut shaper = shaper(96);
        shaper.apply_pill_region(960, 68, 34).unwrap();
        let pill = shaper.applied().cloned();

        shaper.expand(68).unwrap();
        assert_eq!(shaper.applied().cloned(), pill);

        shaper.expand(10).unwrap();
        assert_eq!(shaper.applied().cloned(), pill);
    }

    #[test]
    fn collapse_after_expand_restores_the_pill() {
        let mut shaper = shaper(144);
        shaper.apply_pill_region(960, 68, 34).unwrap();
        let pill = shaper.applied().cloned();

        shaper.expand(600).unwrap();
        shaper.collapse().unwrap();

        assert_eq!(shaper.applied().cloned(), pill);
    }

    #[test]
    fn panel_signal_drives_expand_and_collapse() {
        let mut shaper = shaper(96);
        shaper.apply_pill_region(960, 68, 34).unwrap();

        shaper.set_panel_open(true, 300).unwrap();
        assert_eq!(shaper.applied().unwrap().bounds().height, 300);

        shaper.set_panel_open(false, 300).unwrap();
        assert_eq!(shaper.applied().unwrap().bounds().height, 68);
    }

    #[test]
    fn clear_removes_the_shape() {
        let mut shaper = shaper(96);
        shaper.apply_pill_region(960, 68, 34).unwrap();

        shaper.clear().unwrap();

        assert!(shaper.applied().is_none());
        assert_eq!(shaper.target().current(), None);
    }

    #[test]
    fn failed_assignment_keeps_the_previous_shape() {
        let mut shaper = shaper(96);
        shaper.apply_pill_region(960, 68, 34).unwrap();
        let pill = shaper.applied().cloned();
        shaper.target.fail_next();

        assert!(shaper.expand(400).is_err());
        assert_eq!(shaper.applied().cloned(), pill);
    }

    #[test]
    fn unresolvable_host_fails_without_touching_the_target() {
        let host = Rc::new(HostContext::new(|| None));
        let mut shaper = RegionShaper::new(host, FakeRegions::at_dpi(96), PILL);

        let err = shaper.expand(400).unwrap_err();

        assert!(matches!(err, Error::HostWindowUnavailable));
        assert_eq!(shaper.target().assignments(), 0);
    }

    #[test]
    fn corner_ellipse_is_capped_at_the_short_side() {
        let region = Region::round_rect(Rect::new(0, 0, 100, 40), 50);

        assert_eq!(
            region,
            Region::RoundRect {
                rect: Rect::new(0, 0, 100, 40),
                ellipse: 40
            }
        );
    }

    #[test]
    fn unions_flatten() {
        let a = Region::Rect(Rect::new(0, 0, 10, 10));
        let b = Region::Rect(Rect::new(10, 0, 10, 10));
        let c = Region::Rect(Rect::new(0, 10, 20, 10));

        let joined = a.union(b).union(c);

        match &joined {
            Region::Union(parts) => assert_eq!(parts.len(), 3),
            other => panic!("expected a union, got {other:?}"),
        }
        assert_eq!(joined.bounds(), Rect::new(0, 0, 20, 20));
    }
}
