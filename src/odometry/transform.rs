// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Mounting rotation and scale applied to raw sensor deltas.
//!
//! The sensor is rarely mounted square to the chassis. A `Transform` rotates sensor counts into the
//! vehicle frame and scales them into the unit the host reports in.

use micromath::F32Ext;

/// Rotation-scale matrix stored as `(scale * cos(angle), scale * sin(angle))`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    cos: f32,
    sin: f32,
}

impl Transform {
    /// Angle 0, scale 1.
    pub const IDENTITY: Self = Self { cos: 1.0, sin: 0.0 };

    /// `angle_rad` counter-clockwise rotation, then uniform `scale`.
    pub fn new(angle_rad: f32, scale: f32) -> Self {
        Self {
            cos: scale * F32Ext::cos(angle_rad),
            sin: scale * F32Ext::sin(angle_rad),
        }
    }

    /// Same as [`new`](Self::new) with the angle in degrees.
    pub fn from_degrees(angle_deg: f32, scale: f32) -> Self {
        Self::new(angle_deg.to_radians(), scale)
    }

    /// Apply to a raw delta.
    #[inline]
    pub fn apply(&self, dx: f32, dy: f32) -> (f32, f32) {
        (
            dx * self.cos - dy * self.sin,
            dx * self.sin + dy * self.cos,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
