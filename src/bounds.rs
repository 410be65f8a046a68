//! An axis-aligned volume describing the legal planning area.

use glam::Vec3;

/// An axis-aligned volume in world coordinates.
///
/// The Navigator derives the lattice shape from the horizontal extent of its
/// bounds and clamps search targets into them before anchoring. The vertical
/// extent is carried along but never affects planning, since the lattice is
/// planar.
///
/// ## Examples
/// ```
/// use incremental_pathfinding::SearchBounds;
/// use glam::Vec3;
///
/// let bounds = SearchBounds::new(Vec3::ZERO, Vec3::new(4.0, 0.0, 4.0));
/// assert_eq!(bounds.extent(), Vec3::new(4.0, 0.0, 4.0));
/// assert!(bounds.contains(Vec3::new(2.0, 0.0, 3.0)));
/// assert_eq!(
/// 	bounds.clamp(Vec3::new(9.0, 0.0, -1.0)),
/// 	Vec3::new(4.0, 0.0, 0.0),
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchBounds {
	/// Corner with the smallest coordinates.
	pub min: Vec3,
	/// Corner with the largest coordinates.
	pub max: Vec3,
}

impl SearchBounds {
	/// Creates new SearchBounds from two corners.
	pub const fn new(min: Vec3, max: Vec3) -> SearchBounds {
		SearchBounds { min, max }
	}

	/// The size of the bounds along each axis.
	pub fn extent(&self) -> Vec3 {
		self.max - self.min
	}

	/// `true` if the bounds are inverted or have no area on the lattice plane.
	pub fn is_empty(&self) -> bool {
		self.max.x < self.min.x || self.max.y < self.min.y || self.max.z < self.min.z
	}

	/// `true` if `point` lies inside the bounds (inclusive).
	pub fn contains(&self, point: Vec3) -> bool {
		point.x >= self.min.x
			&& point.x <= self.max.x
			&& point.y >= self.min.y
			&& point.y <= self.max.y
			&& point.z >= self.min.z
			&& point.z <= self.max.z
	}

	/// Moves `point` to the closest position inside the bounds.
	pub fn clamp(&self, point: Vec3) -> Vec3 {
		point.clamp(self.min, self.max)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty() {
		let bounds = SearchBounds::new(Vec3::ONE, Vec3::ZERO);
		assert!(bounds.is_empty());
		assert!(!SearchBounds::new(Vec3::ZERO, Vec3::ZERO).is_empty());
	}

	#[test]
	fn clamp() {
		let bounds = SearchBounds::new(Vec3::ZERO, Vec3::new(10.0, 0.0, 10.0));
		let inside = Vec3::new(3.0, 0.0, 7.0);
		assert_eq!(bounds.clamp(inside), inside);
		assert_eq!(
			bounds.clamp(Vec3::new(-2.0, 5.0, 11.0)),
			Vec3::new(0.0, 0.0, 10.0),
		);
	}
}
