use crate::geometry::fundamental_constants::{COMPONENTS_IN_POSITION, VERTICES_IN_TRIANGLE};

/// Uniform CPU-side representation every scene object is reduced to before
/// upload: tightly packed vertex positions (three floats each, no further
/// attributes interleaved; a normals slot is reserved as a future extension
/// of the vertex layout) and triangle indices (three per triangle).
pub(crate) struct GpuReadyGeometry {
    positions: Vec<f32>,
    indices: Vec<u16>,
}

impl GpuReadyGeometry {
    #[must_use]
    pub(crate) fn new(positions: Vec<f32>, indices: Vec<u16>) -> Self {
        assert_eq!(positions.len() % COMPONENTS_IN_POSITION, 0, "illegal positions count of {}", positions.len());
        assert_eq!(indices.len() % VERTICES_IN_TRIANGLE, 0, "illegal indices count of {}", indices.len());
        Self { positions, indices }
    }

    #[must_use]
    pub(crate) fn positions(&self) -> &[f32] {
        &self.positions
    }

    #[must_use]
    pub(crate) fn indices(&self) -> &[u16] {
        &self.indices
    }

    #[must_use]
    pub(crate) fn vertex_count(&self) -> usize {
        self.positions.len() / COMPONENTS_IN_POSITION
    }

    #[must_use]
    pub(crate) fn triangle_count(&self) -> usize {
        self.indices.len() / VERTICES_IN_TRIANGLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let system_under_test = GpuReadyGeometry::new(vec![0.0; 9], vec![0, 1, 2]);

        assert_eq!(system_under_test.vertex_count(), 3);
        assert_eq!(system_under_test.triangle_count(), 1);
        assert_eq!(system_under_test.positions().len(), 9);
        assert_eq!(system_under_test.indices().len(), 3);
    }

    #[test]
    #[should_panic(expected = "illegal positions count of 7")]
    fn test_ragged_positions() {
        let _system_under_test = GpuReadyGeometry::new(vec![0.0; 7], vec![0, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "illegal indices count of 2")]
    fn test_ragged_indices() {
        let _system_under_test = GpuReadyGeometry::new(vec![0.0; 9], vec![0, 1]);
    }
}
