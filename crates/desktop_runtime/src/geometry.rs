//! Window size resolution from declared geometry and the current viewport.

use serde::{Deserialize, Serialize};

use crate::viewport::{Breakpoint, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Declared size of a window type, as listed in the window catalog.
pub struct GeometrySpec {
    pub base_width: i32,
    pub base_height: i32,
    pub min_width: i32,
    pub min_height: i32,
    pub desktop_margin: i32,
    pub tablet_margin: i32,
    pub mobile_margin: i32,
}

impl GeometrySpec {
    /// Horizontal/vertical space reserved around the window at `breakpoint`.
    pub const fn margin_for(&self, breakpoint: Breakpoint) -> i32 {
        match breakpoint {
            Breakpoint::Mobile => self.mobile_margin,
            Breakpoint::Tablet => self.tablet_margin,
            Breakpoint::SmallDesktop | Breakpoint::LargeDesktop => self.desktop_margin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedGeometry {
    pub width: i32,
    pub height: i32,
    pub full_viewport: bool,
}

impl ResolvedGeometry {
    pub const fn full(viewport: Viewport) -> Self {
        Self {
            width: viewport.width,
            height: viewport.height,
            full_viewport: true,
        }
    }
}

/// Resolves the on-screen size of a window.
///
/// Mobile and fullscreen requests fill the viewport. Otherwise each dimension is the base size
/// clamped into `[min, viewport - margin]`; when that range is empty the minimum wins and the
/// window may overflow the viewport.
pub fn resolve(
    spec: &GeometrySpec,
    viewport: Viewport,
    breakpoint: Breakpoint,
    fullscreen: bool,
) -> ResolvedGeometry {
    if fullscreen || breakpoint.is_mobile() {
        return ResolvedGeometry::full(viewport);
    }

    let margin = spec.margin_for(breakpoint);
    ResolvedGeometry {
        width: clamp_dimension(spec.base_width, spec.min_width, viewport.width - margin),
        height: clamp_dimension(spec.base_height, spec.min_height, viewport.height - margin),
        full_viewport: false,
    }
}

fn clamp_dimension(base: i32, min: i32, max: i32) -> i32 {
    base.min(max).max(min)
}
