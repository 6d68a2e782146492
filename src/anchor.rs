//! Bottom-up darkness scan that locates the left/right alignment anchors.
//!
//! Rows are walked from the bottom edge upward. In each row the left third is
//! scanned left-to-right and the right third right-to-left; the first pixel
//! whose RGB average falls below the darkness threshold becomes that side's
//! anchor. The row of the first anchor found is the body bottom.

use image::{Rgb, RgbImage};
use serde::Serialize;

pub const DEFAULT_DARKNESS_THRESHOLD: u8 = 100;

/// An `(x, y)` pixel coordinate. Serializes as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Anchor(pub u32, pub u32);

impl Anchor {
    pub const fn x(&self) -> u32 {
        self.0
    }

    pub const fn y(&self) -> u32 {
        self.1
    }
}

/// Raw result of a scan. `None` means no dark pixel was found for that value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorScan {
    pub width: u32,
    pub height: u32,
    pub left: Option<Anchor>,
    pub right: Option<Anchor>,
    pub body_bottom: Option<u32>,
}

/// Anchors with the edge defaults filled in for anything the scan missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchors {
    pub left: Anchor,
    pub right: Anchor,
    pub body_bottom: u32,
}

impl AnchorScan {
    pub fn is_complete(&self) -> bool {
        self.left.is_some() && self.right.is_some()
    }

    /// Fill missing values with the bottom-edge defaults:
    /// left `(0, h-1)`, right `(w-1, h-1)`, body bottom `h-1`.
    pub fn resolve(&self) -> Anchors {
        let last_row = self.height.saturating_sub(1);
        let last_col = self.width.saturating_sub(1);

        Anchors {
            left: self.left.unwrap_or(Anchor(0, last_row)),
            right: self.right.unwrap_or(Anchor(last_col, last_row)),
            body_bottom: self.body_bottom.unwrap_or(last_row),
        }
    }
}

// --- brightness ---

/// Average of R/G/B strictly below `threshold`, compared in integer space.
fn is_dark(p: &Rgb<u8>, threshold: u8) -> bool {
    let [r, g, b] = p.0;
    (r as u32 + g as u32 + b as u32) < 3 * threshold as u32
}

// --- scan ---

pub fn find_bottom_anchors(img: &RgbImage, darkness_threshold: u8) -> AnchorScan {
    let (w, h) = img.dimensions();
    let dark_at = |x: u32, y: u32| is_dark(img.get_pixel(x, y), darkness_threshold);

    let left_end = w / 3;
    let right_start = 2 * w / 3;

    let mut left: Option<Anchor> = None;
    let mut right: Option<Anchor> = None;
    let mut body_bottom: Option<u32> = None;

    for y in (0..h).rev() {
        if left.is_none() {
            if let Some(x) = (0..left_end).find(|&x| dark_at(x, y)) {
                left = Some(Anchor(x, y));
                body_bottom.get_or_insert(y);
            }
        }

        if right.is_none() {
            if let Some(x) = (right_start + 1..w).rev().find(|&x| dark_at(x, y)) {
                right = Some(Anchor(x, y));
                body_bottom.get_or_insert(y);
            }
        }

        if left.is_some() && right.is_some() {
            break;
        }
    }

    AnchorScan {
        width: w,
        height: h,
        left,
        right,
        body_bottom,
    }
}
