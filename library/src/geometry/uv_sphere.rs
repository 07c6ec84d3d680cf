use crate::geometry::alias::Point;
use crate::scene::gpu_ready_geometry::GpuReadyGeometry;
use std::f32::consts::PI;

/// Latitude/longitude resolution of the procedural sphere grid. Pole
/// vertices are emitted once per longitude step and the seam column is
/// emitted twice, so a grid of `n`×`m` bands holds `(n+1)·(m+1)` vertices
/// and `2·n·m` triangles.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TessellationConfig {
    latitude_bands: u32,
    longitude_bands: u32,
}

impl TessellationConfig {
    const DEFAULT_BANDS: u32 = 30;

    #[must_use]
    pub fn new(latitude_bands: u32, longitude_bands: u32) -> Self {
        assert!(latitude_bands > 0, "latitude bands count must be positive");
        assert!(longitude_bands > 0, "longitude bands count must be positive");

        let vertex_count = (latitude_bands as usize + 1) * (longitude_bands as usize + 1);
        assert!(vertex_count <= u16::MAX as usize + 1, "vertex count {vertex_count} does not fit 16-bit indices");

        Self { latitude_bands, longitude_bands }
    }

    #[must_use]
    pub(crate) fn latitude_bands(&self) -> u32 {
        self.latitude_bands
    }

    #[must_use]
    pub(crate) fn longitude_bands(&self) -> u32 {
        self.longitude_bands
    }
}

impl Default for TessellationConfig {
    #[must_use]
    fn default() -> Self {
        Self::new(Self::DEFAULT_BANDS, Self::DEFAULT_BANDS)
    }
}

/// Generates a UV sphere around `center`. Vertices run latitude-major from
/// the north pole; each quad cell of the grid is split into two triangles
/// whose winding must stay as is: back-face culling, once enabled, relies
/// on it.
#[must_use]
pub(crate) fn tessellate(center: Point, radius: f32, config: TessellationConfig) -> GpuReadyGeometry {
    assert!(radius > 0.0, "radius must be positive");

    let latitude_bands = config.latitude_bands();
    let longitude_bands = config.longitude_bands();

    let mut positions: Vec<f32> = Vec::with_capacity(((latitude_bands + 1) * (longitude_bands + 1) * 3) as usize);
    for latitude in 0..=latitude_bands {
        let theta = latitude as f32 * PI / latitude_bands as f32;
        let (sin_theta, cos_theta) = theta.sin_cos();

        for longitude in 0..=longitude_bands {
            let phi = longitude as f32 * 2.0 * PI / longitude_bands as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();

            positions.push(center.x + radius * cos_phi * sin_theta);
            positions.push(center.y + radius * cos_theta);
            positions.push(center.z + radius * sin_phi * sin_theta);
        }
    }

    let mut indices: Vec<u16> = Vec::with_capacity((latitude_bands * longitude_bands * 6) as usize);
    for latitude in 0..latitude_bands {
        for longitude in 0..longitude_bands {
            let first = (latitude * (longitude_bands + 1) + longitude) as u16;
            let second = first + longitude_bands as u16 + 1;

            indices.extend_from_slice(&[first, second, first + 1]);
            indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    GpuReadyGeometry::new(positions, indices)
}
