pub mod alias;
pub(crate) mod axis;
pub(crate) mod fundamental_constants;
pub mod uv_sphere;
