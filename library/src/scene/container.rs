use crate::objects::ellipsoid::Ellipsoid;
use crate::objects::triangle_mesh::TriangleMesh;
use crate::scene::records::{self, EllipsoidRecord, MeshRecord};
use crate::scene::source::{LoadError, SceneSource};
use log::info;
use std::time::Duration;

/// Handle of a loaded scene object. Tagged by kind, so nothing downstream
/// ever has to reconstruct an object's position from mesh/ellipsoid counts.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum SceneSlot {
    Mesh(usize),
    Ellipsoid(usize),
}

/// All scene objects in load order: meshes keep their collection order,
/// ellipsoids keep theirs, and meshes always precede ellipsoids when the
/// container is walked for upload or drawing.
#[derive(Default)]
pub struct Container {
    meshes: Vec<TriangleMesh>,
    ellipsoids: Vec<Ellipsoid>,
}

impl Container {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetches and parses both collections. Any failure aborts the whole
    /// load; no partially filled container ever leaves this function.
    pub fn from_sources(meshes: &dyn SceneSource, ellipsoids: &dyn SceneSource, deadline: Duration) -> Result<Container, LoadError> {
        let mut container = Container::new();

        let serialized_meshes = meshes.fetch(deadline)?;
        for record in records::parse_meshes(&serialized_meshes)? {
            container.add_mesh(&record)?;
        }

        let serialized_ellipsoids = ellipsoids.fetch(deadline)?;
        for record in records::parse_ellipsoids(&serialized_ellipsoids)? {
            container.add_ellipsoid(&record)?;
        }

        info!("scene loaded: {} meshes, {} ellipsoids", container.mesh_count(), container.ellipsoid_count());
        Ok(container)
    }

    pub fn add_mesh(&mut self, record: &MeshRecord) -> Result<SceneSlot, LoadError> {
        self.meshes.push(TriangleMesh::from_record(record)?);
        Ok(SceneSlot::Mesh(self.meshes.len() - 1))
    }

    pub fn add_ellipsoid(&mut self, record: &EllipsoidRecord) -> Result<SceneSlot, LoadError> {
        self.ellipsoids.push(Ellipsoid::from_record(record)?);
        Ok(SceneSlot::Ellipsoid(self.ellipsoids.len() - 1))
    }

    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    #[must_use]
    pub fn ellipsoid_count(&self) -> usize {
        self.ellipsoids.len()
    }

    #[must_use]
    pub(crate) fn meshes(&self) -> &[TriangleMesh] {
        &self.meshes
    }

    #[must_use]
    pub(crate) fn ellipsoids(&self) -> &[Ellipsoid] {
        &self.ellipsoids
    }
}
