use crate::geometry::alias::{Matrix, Point, Vector};
use cgmath::{Deg, perspective};

/// The camera never moves in this design: projection and view parameters are
/// fixed at construction, and both matrices are recomputed every frame
/// instead of being cached.
#[derive(Copy, Clone, Debug)]
pub struct Camera {
    eye: Point,
    look_at: Point,
    up: Vector,
    vertical_field_of_view: Deg<f32>,
    aspect: f32,
    near: f32,
    far: f32,
}

/* cgmath produces OpenGL clip space with depth in [-1, 1]; wgpu consumes
depth in [0, 1], so every projection is left-multiplied by this matrix
(column-major constructor). */
#[rustfmt::skip]
const DEPTH_RANGE_CORRECTION: Matrix = Matrix::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

impl Camera {
    #[must_use]
    pub fn new(eye: Point, look_at: Point, up: Vector, vertical_field_of_view: Deg<f32>, aspect: f32, near: f32, far: f32) -> Self {
        assert!(near > 0.0 && far > near, "degenerate clip planes: near = {near}, far = {far}");
        assert!(aspect > 0.0);
        Self { eye, look_at, up, vertical_field_of_view, aspect, near, far }
    }

    #[must_use]
    pub(crate) fn view_matrix(&self) -> Matrix {
        Matrix::look_at_rh(self.eye, self.look_at, self.up)
    }

    #[must_use]
    pub(crate) fn projection_matrix(&self) -> Matrix {
        DEPTH_RANGE_CORRECTION * perspective(self.vertical_field_of_view, self.aspect, self.near, self.far)
    }

    #[must_use]
    pub(crate) fn view_projection(&self) -> Matrix {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    /// The reference viewpoint: eye just behind the scene box looking down
    /// +z, 90° field of view, unit aspect.
    #[must_use]
    fn default() -> Self {
        Self::new(
            Point::new(0.0, 0.0, -0.8),
            Point::new(0.0, 0.0, 0.5),
            Vector::new(0.0, 1.0, 0.0),
            Deg(90.0),
            1.0,
            0.1,
            10.0,
        )
    }
}
