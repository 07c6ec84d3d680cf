pub(crate) mod ellipsoid;
pub mod material;
pub(crate) mod triangle_mesh;
