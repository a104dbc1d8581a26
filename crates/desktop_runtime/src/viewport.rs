//! Viewport breakpoint classification.
//!
//! This is the only breakpoint table in the workspace. Geometry and drag bounds both classify
//! through [`classify`], so layout never disagrees with itself about the current breakpoint.

use serde::{Deserialize, Serialize};

/// Smallest width classified as [`Breakpoint::Tablet`].
pub const TABLET_MIN_WIDTH: i32 = 768;
/// Smallest width classified as [`Breakpoint::SmallDesktop`].
pub const SMALL_DESKTOP_MIN_WIDTH: i32 = 1024;
/// Smallest width classified as [`Breakpoint::LargeDesktop`].
pub const LARGE_DESKTOP_MIN_WIDTH: i32 = 1440;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Breakpoint {
    Mobile,
    Tablet,
    SmallDesktop,
    LargeDesktop,
}

impl Breakpoint {
    pub const fn is_mobile(self) -> bool {
        matches!(self, Self::Mobile)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Layout viewport size in CSS pixels.
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn breakpoint(self) -> Breakpoint {
        classify(self.width, self.height)
    }

    /// Square viewports count as landscape.
    pub const fn orientation(self) -> Orientation {
        if self.height > self.width {
            Orientation::Portrait
        } else {
            Orientation::Landscape
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(SMALL_DESKTOP_MIN_WIDTH, 768)
    }
}

/// Maps a raw viewport size to its [`Breakpoint`]. Only the width participates.
pub const fn classify(width: i32, _height: i32) -> Breakpoint {
    if width < TABLET_MIN_WIDTH {
        Breakpoint::Mobile
    } else if width < SMALL_DESKTOP_MIN_WIDTH {
        Breakpoint::Tablet
    } else if width < LARGE_DESKTOP_MIN_WIDTH {
        Breakpoint::SmallDesktop
    } else {
        Breakpoint::LargeDesktop
    }
}
