//! Field data structures for solver-owned buffers
//!
//! Solvers keep their private state (snapshots, accumulators) in `FieldData`
//! containers sized to the grid they were seeded from.

/// Solver-owned 2D field
///
/// Stores values as a flat `Vec<T>` in row-major order, tagged with the
/// dimensions it was allocated for so a grid resize can be detected.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldData<T> {
    /// Field values in row-major order (y * width + x)
    pub data: Vec<T>,
    /// Grid width in cells
    pub width: usize,
    /// Grid height in cells
    pub height: usize,
}

impl<T: Copy> FieldData<T> {
    /// Create a new field with given dimensions, initialized to a value
    ///
    /// # Arguments
    ///
    /// * `width` - Grid width in cells
    /// * `height` - Grid height in cells
    /// * `value` - Initial value for all cells
    #[must_use]
    pub fn with_value(width: usize, height: usize, value: T) -> Self {
        Self {
            data: vec![value; width * height],
            width,
            height,
        }
    }

    /// Create a field by converting each element of `source`
    ///
    /// `source` must hold exactly `width * height` values in row-major order.
    #[must_use]
    pub fn from_source<S: Copy>(
        width: usize,
        height: usize,
        source: &[S],
        convert: impl Fn(S) -> T,
    ) -> Self {
        debug_assert_eq!(source.len(), width * height);
        Self {
            data: source.iter().map(|&v| convert(v)).collect(),
            width,
            height,
        }
    }

    /// Whether this field was allocated for a `width` x `height` grid
    #[must_use]
    pub fn has_dimensions(&self, width: usize, height: usize) -> bool {
        self.width == width && self.height == height
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get mutable reference to field data
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get value at grid position
    ///
    /// # Panics
    ///
    /// Panics if coordinates are out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> T {
        assert!(
            x < self.width && y < self.height,
            "Coordinates out of bounds"
        );
        self.data[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_with_value() {
        let field = FieldData::with_value(5, 4, 42.0_f32);
        assert_eq!(field.width, 5);
        assert_eq!(field.height, 4);
        assert_eq!(field.data.len(), 20);
        assert!(field.data.iter().all(|&v| v == 42.0));
    }

    #[test]
    fn test_field_from_source() {
        let field = FieldData::from_source(2, 2, &[1_u8, 2, 3, 4], f32::from);
        assert_eq!(field.as_slice(), &[1.0, 2.0, 3.0, 4.0]);

        // Verify row-major indexing
        assert_eq!(field.get(1, 0), 2.0);
        assert_eq!(field.get(0, 1), 3.0);
    }

    #[test]
    fn test_has_dimensions() {
        let field = FieldData::with_value(10, 20, 0_u8);
        assert!(field.has_dimensions(10, 20));
        // Same length, different shape
        assert!(!field.has_dimensions(20, 10));
    }

    #[test]
    #[should_panic(expected = "Coordinates out of bounds")]
    fn test_field_bounds_check() {
        let field = FieldData::with_value(10, 10, 0_u8);
        let _ = field.get(10, 5);
    }
}
