use crate::objects::material::Material;
use crate::scene::source::LoadError;
use serde::Deserialize;

/// Raw scene records, mirroring the JSON collections one-to-one. Materials
/// may carry diffuse/specular/shininess; those survive parsing but the
/// shading model consumes ambient only.
#[derive(Deserialize, Debug, Clone)]
pub struct MeshRecord {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
    pub material: MaterialRecord,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MaterialRecord {
    pub ambient: [f32; 3],
    #[serde(default)]
    pub diffuse: Option<[f32; 3]>,
    #[serde(default)]
    pub specular: Option<[f32; 3]>,
    #[serde(default)]
    pub n: Option<f32>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct EllipsoidRecord {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub ambient: [f32; 3],
    #[serde(default)]
    pub diffuse: Option<[f32; 3]>,
    #[serde(default)]
    pub specular: Option<[f32; 3]>,
    #[serde(default)]
    pub n: Option<f32>,
}

pub fn parse_meshes(serialized: &str) -> Result<Vec<MeshRecord>, LoadError> {
    serde_json::from_str(serialized).map_err(|e| LoadError::Malformed { what: format!("mesh collection: {e}") })
}

pub fn parse_ellipsoids(serialized: &str) -> Result<Vec<EllipsoidRecord>, LoadError> {
    serde_json::from_str(serialized).map_err(|e| LoadError::Malformed { what: format!("ellipsoid collection: {e}") })
}

#[must_use]
fn reflectance_in_range(color: &[f32; 3]) -> bool {
    color.iter().all(|component| component.is_finite() && (0.0..=1.0).contains(component))
}

pub(crate) fn make_material(ambient: &[f32; 3], diffuse: &Option<[f32; 3]>, specular: &Option<[f32; 3]>, shininess: &Option<f32>) -> Result<Material, LoadError> {
    for (name, color) in [("ambient", Some(*ambient)), ("diffuse", *diffuse), ("specular", *specular)] {
        if let Some(color) = color
            && !reflectance_in_range(&color) {
                return Err(LoadError::InvalidContent { what: format!("{name} reflectance {color:?} is out of the [0, 1] range") });
            }
    }

    let mut material = Material::new().with_ambient(ambient[0], ambient[1], ambient[2]);
    if let Some([r, g, b]) = diffuse {
        material = material.with_diffuse(*r, *g, *b);
    }
    if let Some([r, g, b]) = specular {
        material = material.with_specular(*r, *g, *b);
    }
    if let Some(shininess) = shininess {
        if !shininess.is_finite() || *shininess < 0.0 {
            return Err(LoadError::InvalidContent { what: format!("shininess exponent {shininess} is not a non-negative number") });
        }
        material = material.with_shininess(*shininess);
    }

    Ok(material)
}

impl MaterialRecord {
    pub(crate) fn to_material(&self) -> Result<Material, LoadError> {
        make_material(&self.ambient, &self.diffuse, &self.specular, &self.n)
    }
}

impl EllipsoidRecord {
    pub(crate) fn to_material(&self) -> Result<Material, LoadError> {
        make_material(&self.ambient, &self.diffuse, &self.specular, &self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palette::Srgb;

    const SINGLE_TRIANGLE_COLLECTION: &str = r#"
        [
            {
                "material": {"ambient": [1.0, 0.0, 0.0], "diffuse": [0.6, 0.6, 0.6], "specular": [0.3, 0.3, 0.3], "n": 11},
                "vertices": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                "triangles": [[0, 1, 2]]
            }
        ]
    "#;

    const TWO_ELLIPSOIDS_COLLECTION: &str = r#"
        [
            {"x": 0.2, "y": 0.2, "z": 0.6, "ambient": [0.1, 0.1, 0.1]},
            {"x": 0.5, "y": 0.5, "z": 0.6, "ambient": [0.0, 0.1, 0.0], "diffuse": [0.0, 0.6, 0.0], "specular": [0.3, 0.3, 0.3], "n": 17}
        ]
    "#;

    #[test]
    fn test_parse_mesh_collection() {
        let records = parse_meshes(SINGLE_TRIANGLE_COLLECTION).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].vertices.len(), 3);
        assert_eq!(records[0].triangles, vec![[0, 1, 2]]);
        assert_eq!(records[0].material.ambient, [1.0, 0.0, 0.0]);
        assert_eq!(records[0].material.n, Some(11.0));
    }

    #[test]
    fn test_parse_ellipsoid_collection() {
        let records = parse_ellipsoids(TWO_ELLIPSOIDS_COLLECTION).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].diffuse, None);
        assert_eq!((records[1].x, records[1].y, records[1].z), (0.5, 0.5, 0.6));
    }

    #[test]
    fn test_parse_malformed_collection() {
        let parse_result = parse_meshes("{\"not\": \"a list\"}");

        assert!(matches!(parse_result, Err(LoadError::Malformed { .. })));
    }

    #[test]
    fn test_material_conversion_keeps_unshaded_fields() {
        let record = parse_meshes(SINGLE_TRIANGLE_COLLECTION).unwrap().remove(0).material;

        let material = record.to_material().unwrap();

        assert_eq!(material.ambient(), Srgb::new(1.0, 0.0, 0.0));
        assert_eq!(material.diffuse(), Some(Srgb::new(0.6, 0.6, 0.6)));
        assert_eq!(material.specular(), Some(Srgb::new(0.3, 0.3, 0.3)));
        assert_eq!(material.shininess(), Some(11.0));
    }

    #[test]
    fn test_material_conversion_rejects_out_of_range_reflectance() {
        let record = MaterialRecord { ambient: [2.0, 0.0, 0.0], diffuse: None, specular: None, n: None };

        let conversion_result = record.to_material();

        assert!(matches!(conversion_result, Err(LoadError::InvalidContent { .. })));
    }
}
