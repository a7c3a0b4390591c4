// element records shared by the catalog, the generator and mesh emission
// everything here is plain owned data, so cloning a prototype never aliases it

use bevy::color::Srgba;
use bevy::math::Vec3;

/// Placement of an element in assembly space.
/// `rotation` holds Euler angles applied in XYZ order; `rotation.y` is the yaw.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometricProperties {
    pub dimensions: Vec3,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl GeometricProperties {
    /// Unplaced box of the given size: origin, no rotation, unit scale.
    pub fn sized(dimensions: Vec3) -> Self {
        Self {
            dimensions,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    pub fn at(dimensions: Vec3, position: Vec3) -> Self {
        Self {
            position,
            ..Self::sized(dimensions)
        }
    }

    pub fn with_yaw(mut self, yaw: f32) -> Self {
        self.rotation = Vec3::new(0.0, yaw, 0.0);
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn yaw(&self) -> f32 {
        self.rotation.y
    }

    pub fn largest_dimension(&self) -> f32 {
        self.dimensions.max_element()
    }

    /// Dimensions strictly positive and finite.
    pub fn has_valid_dimensions(&self) -> bool {
        self.dimensions.is_finite() && self.dimensions.min_element() > 0.0
    }

    pub fn has_finite_transform(&self) -> bool {
        self.position.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }

    pub fn has_positive_scale(&self) -> bool {
        self.scale.min_element() > 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureStyle {
    Smooth,
    Rough,
    Weathered,
    Boardformed,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialProperties {
    pub roughness: f32, // [0, 1]
    pub metalness: f32, // [0, 1]
    pub color: Srgba,
    pub bump_scale: Option<f32>,
    pub texture: Option<TextureStyle>,
}

impl MaterialProperties {
    pub fn concrete(roughness: f32, metalness: f32, color: Srgba, texture: TextureStyle) -> Self {
        Self {
            roughness: roughness.clamp(0.0, 1.0),
            metalness: metalness.clamp(0.0, 1.0),
            color,
            bump_scale: None,
            texture: Some(texture),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Coarse kind tag, as exposed to downstream connection matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementType {
    Module,
    Connector,
    Decorative,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Module => "module",
            ElementType::Connector => "connector",
            ElementType::Decorative => "decorative",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModuleCategory {
    Wall,
    Floor,
    Column,
    Stair,
    Platform,
    Floating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StructuralRole {
    Primary,
    Secondary,
    Tertiary,
    Decorative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectorCategory {
    Joint,
    Bridge,
    Transition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecorativeCategory {
    Pattern,
    Relief,
    Detail,
}

/// Variant-specific data of an element
#[derive(Clone, Debug, PartialEq)]
pub enum ElementKind {
    Module {
        category: ModuleCategory,
        role: StructuralRole,
        load_bearing: bool,
    },
    Connector {
        category: ConnectorCategory,
        connection_points: Vec<Vec3>, // local attachment points
    },
    Decorative {
        category: DecorativeCategory,
        depth: f32, // relief depth, >= 0
    },
}

/// A catalog prototype or a placed instance of one.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub id: String,
    pub kind: ElementKind,
    pub geometry: GeometricProperties,
    pub material: MaterialProperties,
    pub symmetry_axes: Vec<Axis>,
    pub allowed_connections: Vec<String>,
}

impl Element {
    pub fn element_type(&self) -> ElementType {
        match self.kind {
            ElementKind::Module { .. } => ElementType::Module,
            ElementKind::Connector { .. } => ElementType::Connector,
            ElementKind::Decorative { .. } => ElementType::Decorative,
        }
    }

    pub fn module_category(&self) -> Option<ModuleCategory> {
        match self.kind {
            ElementKind::Module { category, .. } => Some(category),
            _ => None,
        }
    }

    pub fn is_wall(&self) -> bool {
        self.module_category() == Some(ModuleCategory::Wall)
    }

    /// Owned copy of this prototype under a new id and placement.
    pub fn instantiate(&self, id: impl Into<String>, geometry: GeometricProperties) -> Element {
        Element {
            id: id.into(),
            geometry,
            ..self.clone()
        }
    }

    /// Stand-in for an element that could not be built: a red unit cube.
    pub fn fallback(original_id: &str) -> Element {
        Element {
            id: format!("{original_id}#fallback"),
            kind: ElementKind::Decorative {
                category: DecorativeCategory::Detail,
                depth: 0.0,
            },
            geometry: GeometricProperties::sized(Vec3::splat(crate::config::FALLBACK_SIZE)),
            material: MaterialProperties {
                roughness: 0.5,
                metalness: 0.0,
                color: Srgba::RED,
                bump_scale: None,
                texture: None,
            },
            symmetry_axes: vec![Axis::X, Axis::Y, Axis::Z],
            allowed_connections: Vec::new(),
        }
    }
}
