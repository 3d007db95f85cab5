// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch frame types shared with the downstream engine.

use smallvec::SmallVec;

/// Handle assigned by the OS touch driver to one finger contact.
///
/// Unique only within an active multi-touch sequence; drivers reuse ids once a finger lifts.
pub type PointerId = i32;

/// Maximum number of samples carried by a [`TouchFrame`].
pub const MAX_TOUCH_POINTS: usize = 10;

/// One unclaimed touch point in normalized screen space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSample {
    /// Pointer that produced the sample.
    pub pointer_id: PointerId,
    /// Horizontal position in `[0, 1]`, left to right.
    pub x: f32,
    /// Vertical position in `[0, 1]`, top to bottom.
    pub y: f32,
}

/// The pass-through touches of one input frame.
///
/// The sample list is bounded by [`MAX_TOUCH_POINTS`]; [`TouchFrame::push`] refuses samples
/// past the limit so a frame can never exceed it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TouchFrame {
    samples: SmallVec<[TouchSample; MAX_TOUCH_POINTS]>,
    screen_width: u32,
    screen_height: u32,
}

impl TouchFrame {
    /// Create an empty frame for a screen of the given pixel size.
    pub fn empty(screen_width: u32, screen_height: u32) -> Self {
        Self {
            samples: SmallVec::new(),
            screen_width,
            screen_height,
        }
    }

    /// Append a sample, returning `false` if the frame is already full.
    pub fn push(&mut self, sample: TouchSample) -> bool {
        if self.is_full() {
            return false;
        }
        self.samples.push(sample);
        true
    }

    /// Samples in publish order.
    pub fn samples(&self) -> &[TouchSample] {
        &self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the frame carries no samples (all fingers lifted or claimed).
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// True when the frame holds [`MAX_TOUCH_POINTS`] samples.
    pub fn is_full(&self) -> bool {
        self.samples.len() >= MAX_TOUCH_POINTS
    }

    /// Whether any sample belongs to `pointer_id`.
    pub fn contains(&self, pointer_id: PointerId) -> bool {
        self.samples.iter().any(|s| s.pointer_id == pointer_id)
    }

    /// Width in pixels of the screen the samples were normalized against.
    pub fn screen_width(&self) -> u32 {
        self.screen_width
    }

    /// Height in pixels of the screen the samples were normalized against.
    pub fn screen_height(&self) -> u32 {
        self.screen_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: PointerId) -> TouchSample {
        TouchSample {
            pointer_id: id,
            x: 0.5,
            y: 0.5,
        }
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut frame = TouchFrame::empty(1920, 1080);
        for id in (0..).take(MAX_TOUCH_POINTS) {
            assert!(frame.push(sample(id)), "sample {id} should fit");
        }
        assert!(frame.is_full());
        assert!(!frame.push(sample(99)));
        assert_eq!(frame.len(), MAX_TOUCH_POINTS);
        assert!(!frame.contains(99));
    }

    #[test]
    fn empty_frame_keeps_screen_size() {
        let frame = TouchFrame::empty(800, 600);
        assert!(frame.is_empty());
        assert_eq!((frame.screen_width(), frame.screen_height()), (800, 600));
    }
}
