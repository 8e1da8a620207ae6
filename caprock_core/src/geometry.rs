// Copyright 2026 the Caprock Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport measurement and anchor math.
//!
//! The mount node is positioned in absolute page coordinates, not viewport
//! coordinates, so the anchor must fold the page scroll into the measured
//! (viewport-relative) bounding box. The mount carries a fixed
//! `translateX(-50%) translateY(-100%)` transform, pinning its own
//! bottom-center point to the anchor — no per-call measurement of the
//! overlay itself is needed.

use kurbo::{Point, Rect};

/// The fixed CSS transform every mount node carries.
pub const MOUNT_TRANSFORM: &str = "translateX(-50%) translateY(-100%)";

/// One fallible measurement of a video's on-screen situation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportFrame {
    /// The video's bounding box in viewport coordinates.
    pub rect: Rect,
    /// The page scroll offsets (x, y) at measurement time.
    pub scroll: Point,
}

/// Computes the overlay anchor for a measured frame, in page coordinates.
///
/// The anchor is the point the mount's bottom-center pins to: horizontally
/// the video's center, vertically the video's bottom edge raised by
/// `bottom_offset` pixels.
#[must_use]
pub fn anchor_for(frame: &ViewportFrame, bottom_offset: f64) -> Point {
    Point::new(
        frame.rect.center().x + frame.scroll.x,
        frame.rect.y1 - bottom_offset + frame.scroll.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_is_bottom_center_minus_offset() {
        let frame = ViewportFrame {
            rect: Rect::new(100.0, 50.0, 500.0, 350.0),
            scroll: Point::ZERO,
        };
        let anchor = anchor_for(&frame, 60.0);
        assert_eq!(anchor, Point::new(300.0, 290.0));
    }

    #[test]
    fn anchor_tracks_page_scroll() {
        let frame = ViewportFrame {
            rect: Rect::new(100.0, 50.0, 500.0, 350.0),
            scroll: Point::new(15.0, 400.0),
        };
        let anchor = anchor_for(&frame, 0.0);
        assert_eq!(anchor, Point::new(315.0, 750.0));
    }
}
