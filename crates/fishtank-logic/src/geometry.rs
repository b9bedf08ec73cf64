//! Tank geometry: vectors and the axis-aligned swimming volume.

use serde::{Deserialize, Serialize};

/// 3D position vector
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Unit vector in the XY plane pointing along `angle` (radians).
    pub fn from_heading(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin(), 0.0)
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Perpendicular in the XY plane (rotated +90°).
    pub fn perpendicular_xy(&self) -> Self {
        Self::new(-self.y, self.x, 0.0)
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Swimmable volume of the tank (inclusive on every axis).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TankBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl TankBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Bounds for a tank of the given outer size centred on the origin.
    /// The glass is inset by one unit on x/y and half a unit on z.
    pub fn from_tank_size(width: f32, height: f32, depth: f32) -> Self {
        Self {
            min: Vec3::new(-width / 2.0 + 1.0, -height / 2.0 + 1.0, -depth / 2.0 + 0.5),
            max: Vec3::new(width / 2.0 - 1.0, height / 2.0 - 1.0, depth / 2.0 - 0.5),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    pub fn depth(&self) -> f32 {
        self.max.z - self.min.z
    }

    pub fn center(&self) -> Vec3 {
        Vec3::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
            (self.min.z + self.max.z) / 2.0,
        )
    }

    pub fn contains(&self, point: &Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    pub fn clamp(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
            point.z.clamp(self.min.z, self.max.z),
        )
    }

    /// Shrink x/y by the given margins. A margin wider than half an axis
    /// collapses that axis onto its centre line.
    pub fn inset(&self, margin_x: f32, margin_y: f32) -> TankBounds {
        let mx = margin_x.min(self.width() / 2.0);
        let my = margin_y.min(self.height() / 2.0);
        TankBounds {
            min: Vec3::new(self.min.x + mx, self.min.y + my, self.min.z),
            max: Vec3::new(self.max.x - mx, self.max.y - my, self.max.z),
        }
    }

    /// Clamp x/y with `padding` kept from the walls; z is clamped to the
    /// bounds unpadded.
    pub fn clamp_padded(&self, point: Vec3, padding: f32) -> Vec3 {
        self.inset(padding, padding).clamp(point)
    }

    /// Linear interpolation inside the bounds, `t` in [0, 1] per axis.
    pub fn lerp(&self, tx: f32, ty: f32, tz: f32) -> Vec3 {
        Vec3::new(
            self.min.x + tx * self.width(),
            self.min.y + ty * self.height(),
            self.min.z + tz * self.depth(),
        )
    }
}

impl Default for TankBounds {
    fn default() -> Self {
        Self::from_tank_size(20.0, 12.0, 8.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        let sum = a + b;
        assert_eq!(sum, Vec3::new(5.0, 7.0, 9.0));

        let diff = b - a;
        assert_eq!(diff.x, 3.0);

        let scaled = a * 2.0;
        assert_eq!(scaled.y, 4.0);
        assert!((Vec3::new(3.0, 4.0, 0.0).length() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_heading_and_perpendicular() {
        let right = Vec3::from_heading(0.0);
        assert!((right.x - 1.0).abs() < 1e-6);
        let up = right.perpendicular_xy();
        assert!((up.y - 1.0).abs() < 1e-6);
        assert!(up.x.abs() < 1e-6);
    }

    #[test]
    fn test_default_tank_bounds() {
        let bounds = TankBounds::default();
        assert_eq!(bounds.min, Vec3::new(-9.0, -5.0, -3.5));
        assert_eq!(bounds.max, Vec3::new(9.0, 5.0, 3.5));
        assert_eq!(bounds.center(), Vec3::ZERO);
    }

    #[test]
    fn test_clamp_and_contains() {
        let bounds = TankBounds::default();
        let p = bounds.clamp(Vec3::new(50.0, -50.0, 0.0));
        assert_eq!(p, Vec3::new(9.0, -5.0, 0.0));
        assert!(bounds.contains(&p));
        assert!(!bounds.contains(&Vec3::new(9.5, 0.0, 0.0)));

        let padded = bounds.clamp_padded(Vec3::new(50.0, 0.0, 10.0), 0.5);
        assert_eq!(padded, Vec3::new(8.5, 0.0, 3.5));
    }

    #[test]
    fn test_padding_wider_than_tank_collapses_to_centre() {
        let bounds = TankBounds::new(Vec3::new(-0.4, -0.2, 0.0), Vec3::new(0.4, 0.2, 1.0));
        let inner = bounds.inset(0.5, 0.5);
        assert_eq!(inner.min.x, inner.max.x);
        assert_eq!(inner.min.y, inner.max.y);

        let p = bounds.clamp_padded(Vec3::new(3.0, -3.0, 5.0), 0.5);
        assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
        assert_eq!(p.z, 1.0);
    }
}
