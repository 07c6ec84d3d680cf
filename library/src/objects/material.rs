use palette::Srgb;

/// Surface reflectance of a scene object. The shading model is ambient-only:
/// the fragment color is `ambient × light ambient`. Diffuse, specular and
/// shininess are accepted from scene files and retained here, but no shader
/// term consumes them yet.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Material {
    ambient: Srgb,
    diffuse: Option<Srgb>,
    specular: Option<Srgb>,
    shininess: Option<f32>,
}

impl Material {
    const ZERO_COLOR: Srgb = Srgb::new(0.0, 0.0, 0.0);

    #[must_use]
    pub fn new() -> Self {
        Self { ..Self::default() }
    }

    pub fn with_ambient(mut self, r: f32, g: f32, b: f32) -> Self {
        assert!((0.0..=1.0).contains(&r));
        assert!((0.0..=1.0).contains(&g));
        assert!((0.0..=1.0).contains(&b));
        self.ambient = Srgb::new(r, g, b);
        self
    }

    pub fn with_diffuse(mut self, r: f32, g: f32, b: f32) -> Self {
        assert!((0.0..=1.0).contains(&r));
        assert!((0.0..=1.0).contains(&g));
        assert!((0.0..=1.0).contains(&b));
        self.diffuse = Some(Srgb::new(r, g, b));
        self
    }

    pub fn with_specular(mut self, r: f32, g: f32, b: f32) -> Self {
        assert!((0.0..=1.0).contains(&r));
        assert!((0.0..=1.0).contains(&g));
        assert!((0.0..=1.0).contains(&b));
        self.specular = Some(Srgb::new(r, g, b));
        self
    }

    pub fn with_shininess(mut self, shininess: f32) -> Self {
        assert!(shininess >= 0.0);
        self.shininess = Some(shininess);
        self
    }

    #[must_use]
    pub fn ambient(&self) -> Srgb {
        self.ambient
    }

    /// Stored but not shaded.
    #[must_use]
    pub fn diffuse(&self) -> Option<Srgb> {
        self.diffuse
    }

    /// Stored but not shaded.
    #[must_use]
    pub fn specular(&self) -> Option<Srgb> {
        self.specular
    }

    /// Stored but not shaded.
    #[must_use]
    pub fn shininess(&self) -> Option<f32> {
        self.shininess
    }
}

impl Default for Material {
    #[must_use]
    fn default() -> Self {
        Material {
            ambient: Self::ZERO_COLOR,
            diffuse: None,
            specular: None,
            shininess: None,
        }
    }
}
