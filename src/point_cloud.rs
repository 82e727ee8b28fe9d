//! Point cloud storage.
//!
//! Positions and colors live in two parallel arrays laid out exactly like the
//! renderer's vertex buffers, so uploads are a straight `cast_slice`.

use glam::Vec3;

/// A flat collection of colored points.
///
/// Colors can be edited in place; every edit raises the `colors_dirty` flag
/// which the renderer clears after re-uploading the color buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    positions: Vec<Vec3>,
    colors: Vec<Vec3>,
    colors_dirty: bool,
}

impl PointCloud {
    /// Empty cloud with room for `capacity` points.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            colors_dirty: false,
        }
    }

    /// Build a cloud from parallel position/color arrays.
    ///
    /// # Panics
    ///
    /// Panics if the arrays differ in length.
    pub fn from_parts(positions: Vec<Vec3>, colors: Vec<Vec3>) -> Self {
        assert_eq!(
            positions.len(),
            colors.len(),
            "positions and colors must have the same length"
        );
        Self {
            positions,
            colors,
            colors_dirty: false,
        }
    }

    /// Append a point.
    pub fn push(&mut self, position: Vec3, color: Vec3) {
        self.positions.push(position);
        self.colors.push(color);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.colors
    }

    pub fn position(&self, index: usize) -> Option<Vec3> {
        self.positions.get(index).copied()
    }

    pub fn color(&self, index: usize) -> Option<Vec3> {
        self.colors.get(index).copied()
    }

    /// Recolor one point. Out-of-range indices are ignored.
    pub fn set_color(&mut self, index: usize, color: Vec3) {
        if let Some(slot) = self.colors.get_mut(index) {
            *slot = color;
            self.colors_dirty = true;
        }
    }

    /// Whether colors changed since the last upload.
    pub fn colors_dirty(&self) -> bool {
        self.colors_dirty
    }

    /// Clear the dirty flag, returning its previous value.
    pub fn take_colors_dirty(&mut self) -> bool {
        std::mem::take(&mut self.colors_dirty)
    }

    /// Raw position bytes for GPU upload (12 bytes per point).
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Raw color bytes for GPU upload (12 bytes per point).
    pub fn color_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_lookup() {
        let mut cloud = PointCloud::with_capacity(2);
        cloud.push(Vec3::X, Vec3::ONE);
        cloud.push(Vec3::Y, Vec3::ZERO);

        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.position(1), Some(Vec3::Y));
        assert_eq!(cloud.color(0), Some(Vec3::ONE));
        assert_eq!(cloud.position(2), None);
        assert!(!cloud.colors_dirty());
    }

    #[test]
    fn test_set_color_marks_dirty() {
        let mut cloud = PointCloud::from_parts(vec![Vec3::ZERO], vec![Vec3::ZERO]);
        cloud.set_color(0, Vec3::X);
        assert_eq!(cloud.color(0), Some(Vec3::X));
        assert!(cloud.take_colors_dirty());
        assert!(!cloud.colors_dirty());
    }

    #[test]
    fn test_set_color_out_of_range_is_ignored() {
        let mut cloud = PointCloud::default();
        cloud.set_color(3, Vec3::X);
        assert!(!cloud.colors_dirty());
    }

    #[test]
    fn test_byte_views() {
        let cloud = PointCloud::from_parts(vec![Vec3::new(1.0, 2.0, 3.0)], vec![Vec3::ONE]);
        assert_eq!(cloud.position_bytes().len(), 12);
        assert_eq!(cloud.color_bytes().len(), 12);
        let floats: &[f32] = bytemuck::cast_slice(cloud.position_bytes());
        assert_eq!(floats, &[1.0, 2.0, 3.0]);
    }

    #[test]
    #[should_panic]
    fn test_from_parts_length_mismatch() {
        PointCloud::from_parts(vec![Vec3::ZERO], Vec::new());
    }
}
