//! Axis-aligned bounding box with double precision.

use glam::DVec3;

/// Double-precision axis-aligned bounding box.
///
/// Used for unit footprints, the LOD corner projection and the cubes of
/// the debug outline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DAabb3 {
	/// Minimum corner (inclusive).
	pub min: DVec3,
	/// Maximum corner (inclusive).
	pub max: DVec3,
}

impl DAabb3 {
	/// Create a new AABB from min and max corners.
	///
	/// # Panics
	/// Debug-asserts that min <= max on all axes.
	pub fn new(min: DVec3, max: DVec3) -> Self {
		debug_assert!(
			min.x <= max.x && min.y <= max.y && min.z <= max.z,
			"AABB min must be <= max on all axes"
		);
		Self { min, max }
	}

	pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
		Self {
			min: center - half_extents,
			max: center + half_extents,
		}
	}

	/// Cube with its minimum corner at `min`.
	pub fn cube(min: DVec3, width: f64) -> Self {
		Self::new(min, min + DVec3::splat(width))
	}

	/// Grow outward to the enclosing grid of `cell_width` cells:
	/// min is floored, max is ceiled to a multiple of `cell_width`.
	pub fn snap_outward(&self, cell_width: f64) -> Self {
		Self {
			min: floor_to(self.min, cell_width),
			max: ceil_to(self.max, cell_width),
		}
	}

	#[inline]
	pub fn size(&self) -> DVec3 {
		self.max - self.min
	}

	/// The 8 corners, bit 0/1/2 of the index selecting max on X/Y/Z.
	pub fn corners(&self) -> [DVec3; 8] {
		std::array::from_fn(|i| {
			DVec3::new(
				if i & 1 == 0 { self.min.x } else { self.max.x },
				if i & 2 == 0 { self.min.y } else { self.max.y },
				if i & 4 == 0 { self.min.z } else { self.max.z },
			)
		})
	}
}

/// Round each component down to a multiple of `multiple`.
#[inline]
pub fn floor_to(v: DVec3, multiple: f64) -> DVec3 {
	(v / multiple).floor() * multiple
}

/// Round each component up to a multiple of `multiple`.
#[inline]
pub fn ceil_to(v: DVec3, multiple: f64) -> DVec3 {
	(v / multiple).ceil() * multiple
}
