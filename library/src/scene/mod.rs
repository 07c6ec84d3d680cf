pub mod camera;
pub mod container;
pub(crate) mod gpu_ready_geometry;
pub mod records;
pub mod source;
