pub(crate) const VERTICES_IN_TRIANGLE: usize = 3;

pub(crate) const COMPONENTS_IN_POSITION: usize = 3;
