use crate::geometry::alias::Point;
use crate::geometry::uv_sphere::{self, TessellationConfig};
use crate::objects::material::Material;
use crate::scene::gpu_ready_geometry::GpuReadyGeometry;
use crate::scene::records::EllipsoidRecord;
use crate::scene::source::LoadError;

/// Shared radius of every ellipsoid in the scene. Per-object radii are not
/// part of the current scene format.
pub const ELLIPSOID_RADIUS: f32 = 0.1;

pub(crate) struct Ellipsoid {
    center: Point,
    material: Material,
}

impl Ellipsoid {
    pub(crate) fn from_record(record: &EllipsoidRecord) -> Result<Ellipsoid, LoadError> {
        let center = [record.x, record.y, record.z];
        if center.iter().any(|coordinate| !coordinate.is_finite()) {
            return Err(LoadError::InvalidContent { what: format!("ellipsoid center has a non-numeric coordinate: {center:?}") });
        }

        let material = record.to_material()?;
        Ok(Ellipsoid { center: Point::new(record.x, record.y, record.z), material })
    }

    /// Reduces the implicit surface to the same representation a mesh record
    /// normalizes to.
    #[must_use]
    pub(crate) fn tessellate(&self, config: TessellationConfig) -> GpuReadyGeometry {
        uv_sphere::tessellate(self.center, ELLIPSOID_RADIUS, config)
    }

    #[must_use]
    pub(crate) fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub(crate) fn material(&self) -> Material {
        self.material
    }
}
