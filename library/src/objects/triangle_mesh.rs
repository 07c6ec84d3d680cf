use crate::geometry::axis::Axis;
use crate::objects::material::Material;
use crate::scene::gpu_ready_geometry::GpuReadyGeometry;
use crate::scene::records::MeshRecord;
use crate::scene::source::LoadError;
use strum::EnumCount;

/// A mesh record normalized to the uniform GPU-buffer representation:
/// positions flattened to one float sequence, triangles flattened to one
/// 16-bit index sequence. Validation happens here, at load time; the frame
/// renderer never re-checks indices.
pub(crate) struct TriangleMesh {
    geometry: GpuReadyGeometry,
    material: Material,
}

impl TriangleMesh {
    pub(crate) fn from_record(record: &MeshRecord) -> Result<TriangleMesh, LoadError> {
        if record.vertices.is_empty() || record.triangles.is_empty() {
            return Err(LoadError::InvalidContent { what: "empty mesh".to_string() });
        }

        let vertex_count = record.vertices.len();
        if vertex_count > u16::MAX as usize + 1 {
            return Err(LoadError::InvalidContent { what: format!("vertex count {vertex_count} does not fit 16-bit indices") });
        }

        let mut positions: Vec<f32> = Vec::with_capacity(vertex_count * Axis::COUNT);
        for (which_vertex, vertex) in record.vertices.iter().enumerate() {
            if vertex.iter().any(|coordinate| !coordinate.is_finite()) {
                return Err(LoadError::InvalidContent { what: format!("vertex {which_vertex} has a non-numeric coordinate: {vertex:?}") });
            }
            positions.push(vertex[Axis::X as usize]);
            positions.push(vertex[Axis::Y as usize]);
            positions.push(vertex[Axis::Z as usize]);
        }

        let mut indices: Vec<u16> = Vec::with_capacity(record.triangles.len() * Axis::COUNT);
        for (which_triangle, triangle) in record.triangles.iter().enumerate() {
            for index in triangle {
                if *index as usize >= vertex_count {
                    return Err(LoadError::InvalidContent {
                        what: format!("triangle {which_triangle} references vertex {index} of {vertex_count}"),
                    });
                }
                indices.push(*index as u16);
            }
        }

        let material = record.material.to_material()?;
        Ok(TriangleMesh { geometry: GpuReadyGeometry::new(positions, indices), material })
    }

    #[must_use]
    pub(crate) fn geometry(&self) -> &GpuReadyGeometry {
        &self.geometry
    }

    #[must_use]
    pub(crate) fn material(&self) -> Material {
        self.material
    }
}
