//! Integer color arithmetic
//!
//! Channels stay unclamped through scaling and accumulation. They are
//! clamped to `[0, 255]` exactly once, when a pixel is written.

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Color with channels in blue, green, red order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub b: u32,
    pub g: u32,
    pub r: u32,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(b: u32, g: u32, r: u32) -> Self {
        Self { b, g, r }
    }

    /// Channel-wise `k * channel`, truncated toward zero
    pub fn scale(self, k: f32) -> Self {
        Self {
            b: (k * self.b as f32) as u32,
            g: (k * self.g as f32) as u32,
            r: (k * self.r as f32) as u32,
        }
    }

    /// Channel-wise `min(255, channel)`
    pub fn clamp(self) -> Self {
        Self {
            b: self.b.min(255),
            g: self.g.min(255),
            r: self.r.min(255),
        }
    }

    /// Clamped channels as `[r, g, b]` bytes
    pub fn to_rgb(self) -> [u8; 3] {
        let c = self.clamp();
        [c.r as u8, c.g as u8, c.b as u8]
    }
}

/// Unclamped channel-wise sum, saturating at `u32::MAX`
impl Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            b: self.b.saturating_add(rhs.b),
            g: self.g.saturating_add(rhs.g),
            r: self.r.saturating_add(rhs.r),
        }
    }
}
