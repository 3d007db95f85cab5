// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pixel ↔ unit-square conversion.

use kurbo::{Point, Size};

/// Map a pixel position into unit screen space: `(x / width, y / height)`.
///
/// Not clamped; positions outside the screen map outside `[0, 1]`. Returns `None` for an
/// empty screen.
pub fn normalize(position: Point, screen: Size) -> Option<Point> {
    if screen.is_zero_area() {
        return None;
    }
    Some(Point::new(
        position.x / screen.width,
        position.y / screen.height,
    ))
}

/// Inverse of [`normalize`].
pub fn denormalize(normalized: Point, screen: Size) -> Point {
    Point::new(normalized.x * screen.width, normalized.y * screen.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_reproduces_pixels() {
        let screens = [
            Size::new(1920.0, 1080.0),
            Size::new(2400.0, 1080.0),
            Size::new(720.0, 1600.0),
            Size::new(1.0, 1.0),
        ];
        let points = [
            Point::new(0.0, 0.0),
            Point::new(13.5, 977.25),
            Point::new(1919.0, 1079.0),
            Point::new(-4.0, 2000.0),
        ];
        for screen in screens {
            for p in points {
                let n = normalize(p, screen).expect("non-empty screen");
                let back = denormalize(n, screen);
                assert!(
                    (back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9,
                    "{p:?} on {screen:?} came back as {back:?}"
                );
            }
        }
    }

    #[test]
    fn screen_corners_map_to_unit_corners() {
        let screen = Size::new(800.0, 600.0);
        assert_eq!(normalize(Point::ZERO, screen), Some(Point::ZERO));
        assert_eq!(
            normalize(Point::new(800.0, 600.0), screen),
            Some(Point::new(1.0, 1.0))
        );
        assert_eq!(
            normalize(Point::new(400.0, 150.0), screen),
            Some(Point::new(0.5, 0.25))
        );
    }

    #[test]
    fn empty_screen_has_no_normalization() {
        assert_eq!(normalize(Point::new(1.0, 1.0), Size::new(0.0, 600.0)), None);
        assert_eq!(normalize(Point::new(1.0, 1.0), Size::ZERO), None);
    }
}
