// the static element catalog
// built once per process and only ever read afterwards, instances are owned copies

use std::collections::{HashMap, HashSet};
use std::f32::consts::PI;
use std::sync::LazyLock;

use bevy::color::Srgba;
use bevy::math::Vec3;

use super::element::*;
use super::error::{CatalogError, InstantiationError};
use super::sampling::get_noise;

/// Prototype ids
pub mod ids {
    // modules
    pub const FLOATING_CUBE: &str = "floating_cube";
    pub const FLOATING_PLANE: &str = "floating_plane";
    pub const MONOLITHIC_WALL: &str = "monolithic_wall";
    pub const BASIC_WALL: &str = "basic_wall";
    pub const THICK_WALL: &str = "thick_wall";
    pub const BUTTRESS_WALL: &str = "buttress_wall";
    pub const MASSIVE_COLUMN: &str = "massive_column";
    pub const T_COLUMN: &str = "t_column";
    pub const CROSS_COLUMN: &str = "cross_column";
    pub const FLAT_ROOF: &str = "flat_roof";
    pub const CANTILEVER_ROOF: &str = "cantilever_roof";
    pub const COFFERED_ROOF: &str = "coffered_roof";
    pub const MAIN_BEAM: &str = "main_beam";
    pub const CROSS_BEAM: &str = "cross_beam";

    // connectors
    pub const WALL_CONNECTOR: &str = "wall_connector";
    pub const BEAM_CONNECTOR: &str = "beam_connector";
    pub const COLUMN_CONNECTOR: &str = "column_connector";
    pub const CUBE_CONNECTOR: &str = "cube_connector";
    pub const FLOOR_CONNECTOR: &str = "floor_connector";

    // decorative
    pub const RIB_PATTERN: &str = "rib_pattern";
    pub const BOARDFORM_TEXTURE: &str = "boardform_texture";
    pub const BRUTAL_WINDOW: &str = "brutal_window";
    pub const SUNSHADE: &str = "sunshade";
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetCategory {
    Module,
    Connector,
    Decorative,
}

// concrete finishes
mod materials {
    use super::*;

    fn grey(v: u8) -> Srgba {
        Srgba::rgb_u8(v, v, v)
    }

    pub fn copied_city_white() -> MaterialProperties {
        MaterialProperties::concrete(0.3, 0.1, grey(0xff), TextureStyle::Smooth)
    }
    pub fn rough() -> MaterialProperties {
        MaterialProperties::concrete(0.9, 0.1, grey(0xcc), TextureStyle::Rough)
    }
    pub fn smooth() -> MaterialProperties {
        MaterialProperties::concrete(0.6, 0.15, grey(0xd6), TextureStyle::Smooth)
    }
    pub fn weathered() -> MaterialProperties {
        MaterialProperties::concrete(0.85, 0.05, grey(0xb4), TextureStyle::Weathered)
    }
    pub fn boardformed() -> MaterialProperties {
        MaterialProperties {
            bump_scale: Some(0.02),
            ..MaterialProperties::concrete(0.8, 0.1, grey(0xc8), TextureStyle::Boardformed)
        }
    }
    pub fn exposed_aggregate() -> MaterialProperties {
        MaterialProperties::concrete(0.95, 0.05, grey(0xc0), TextureStyle::Rough)
    }
}

/// The finish every rough surface converges to.
pub fn primary_material() -> MaterialProperties {
    materials::copied_city_white()
}

fn axes(list: &[Axis]) -> Vec<Axis> {
    list.to_vec()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn module(
    id: &str,
    category: ModuleCategory,
    role: StructuralRole,
    dimensions: Vec3,
    material: MaterialProperties,
    symmetry: &[Axis],
    connections: &[&str],
) -> Element {
    Element {
        id: id.to_string(),
        kind: ElementKind::Module {
            category,
            role,
            load_bearing: role != StructuralRole::Decorative,
        },
        geometry: GeometricProperties::sized(dimensions),
        material,
        symmetry_axes: axes(symmetry),
        allowed_connections: names(connections),
    }
}

fn connector(id: &str, dimensions: Vec3, material: MaterialProperties, points: &[Vec3]) -> Element {
    Element {
        id: id.to_string(),
        kind: ElementKind::Connector {
            category: ConnectorCategory::Joint,
            connection_points: points.to_vec(),
        },
        geometry: GeometricProperties::sized(dimensions),
        material,
        symmetry_axes: Vec::new(),
        allowed_connections: Vec::new(),
    }
}

fn decorative(
    id: &str,
    category: DecorativeCategory,
    depth: f32,
    dimensions: Vec3,
    material: MaterialProperties,
) -> Element {
    Element {
        id: id.to_string(),
        kind: ElementKind::Decorative { category, depth },
        geometry: GeometricProperties::sized(dimensions),
        material,
        symmetry_axes: Vec::new(),
        allowed_connections: Vec::new(),
    }
}

/// Registry of element prototypes, keyed by id within each category.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    pub modules: HashMap<String, Element>,
    pub connectors: HashMap<String, Element>,
    pub decorative: HashMap<String, Element>,
}

static BUILTIN: LazyLock<Catalog> = LazyLock::new(Catalog::builtin);

/// Process-wide catalog.
pub fn catalog() -> &'static Catalog {
    &BUILTIN
}

impl Catalog {
    pub fn builtin() -> Self {
        use Axis::*;
        use ModuleCategory as M;
        use StructuralRole as R;

        let modules = vec![
            // floating elements
            module(
                ids::FLOATING_CUBE,
                M::Floating,
                R::Decorative,
                Vec3::ONE,
                materials::copied_city_white(),
                &[X, Y, Z],
                &[ids::CUBE_CONNECTOR],
            ),
            module(
                ids::FLOATING_PLANE,
                M::Floating,
                R::Decorative,
                Vec3::new(2.0, 0.2, 2.0),
                materials::copied_city_white(),
                &[X, Z],
                &[ids::CUBE_CONNECTOR],
            ),
            // walls
            module(
                ids::MONOLITHIC_WALL,
                M::Wall,
                R::Primary,
                Vec3::new(8.0, 6.0, 0.4),
                materials::copied_city_white(),
                &[X, Y],
                &[ids::WALL_CONNECTOR],
            ),
            module(
                ids::BASIC_WALL,
                M::Wall,
                R::Primary,
                Vec3::new(4.0, 3.0, 0.3),
                materials::rough(),
                &[X, Y],
                &[ids::WALL_CONNECTOR, ids::COLUMN_CONNECTOR],
            ),
            module(
                ids::THICK_WALL,
                M::Wall,
                R::Primary,
                Vec3::new(4.0, 3.0, 0.6),
                materials::boardformed(),
                &[X, Y],
                &[ids::WALL_CONNECTOR, ids::COLUMN_CONNECTOR],
            ),
            module(
                ids::BUTTRESS_WALL,
                M::Wall,
                R::Primary,
                Vec3::new(5.0, 4.0, 0.4),
                materials::boardformed(),
                &[X, Y],
                &[ids::WALL_CONNECTOR, ids::COLUMN_CONNECTOR],
            ),
            // columns
            module(
                ids::MASSIVE_COLUMN,
                M::Column,
                R::Primary,
                Vec3::new(1.0, 4.0, 1.0),
                materials::smooth(),
                &[X, Z],
                &[ids::COLUMN_CONNECTOR, ids::FLOOR_CONNECTOR],
            ),
            module(
                ids::T_COLUMN,
                M::Column,
                R::Primary,
                Vec3::new(2.0, 4.0, 1.0),
                materials::smooth(),
                &[Z],
                &[ids::COLUMN_CONNECTOR, ids::BEAM_CONNECTOR],
            ),
            module(
                ids::CROSS_COLUMN,
                M::Column,
                R::Primary,
                Vec3::new(1.5, 5.0, 1.5),
                materials::exposed_aggregate(),
                &[X, Z],
                &[ids::COLUMN_CONNECTOR, ids::BEAM_CONNECTOR],
            ),
            // roofs and slabs
            module(
                ids::FLAT_ROOF,
                M::Platform,
                R::Primary,
                Vec3::new(6.0, 0.4, 6.0),
                materials::smooth(),
                &[X, Z],
                &[ids::BEAM_CONNECTOR, ids::COLUMN_CONNECTOR],
            ),
            module(
                ids::CANTILEVER_ROOF,
                M::Platform,
                R::Primary,
                Vec3::new(8.0, 0.5, 6.0),
                materials::smooth(),
                &[Z],
                &[ids::BEAM_CONNECTOR, ids::COLUMN_CONNECTOR],
            ),
            module(
                ids::COFFERED_ROOF,
                M::Platform,
                R::Primary,
                Vec3::new(6.0, 0.6, 6.0),
                materials::boardformed(),
                &[X, Z],
                &[ids::BEAM_CONNECTOR, ids::COLUMN_CONNECTOR],
            ),
            // beams
            module(
                ids::MAIN_BEAM,
                M::Floor,
                R::Primary,
                Vec3::new(6.0, 0.8, 0.4),
                materials::smooth(),
                &[X],
                &[ids::BEAM_CONNECTOR, ids::COLUMN_CONNECTOR],
            ),
            Element {
                geometry: GeometricProperties::sized(Vec3::new(4.0, 0.6, 0.3)).with_yaw(PI / 2.0),
                ..module(
                    ids::CROSS_BEAM,
                    M::Floor,
                    R::Secondary,
                    Vec3::ONE,
                    materials::smooth(),
                    &[X],
                    &[ids::BEAM_CONNECTOR],
                )
            },
        ];

        let connectors = vec![
            connector(
                ids::WALL_CONNECTOR,
                Vec3::new(0.3, 3.0, 0.3),
                materials::rough(),
                &[Vec3::new(0.0, 1.5, 0.0), Vec3::new(0.0, -1.5, 0.0)],
            ),
            connector(
                ids::BEAM_CONNECTOR,
                Vec3::new(0.4, 0.8, 0.4),
                materials::smooth(),
                &[Vec3::new(0.2, 0.0, 0.0), Vec3::new(-0.2, 0.0, 0.0)],
            ),
            connector(
                ids::COLUMN_CONNECTOR,
                Vec3::new(1.0, 0.4, 1.0),
                materials::smooth(),
                &[Vec3::new(0.0, 0.2, 0.0), Vec3::new(0.0, -0.2, 0.0)],
            ),
            // referenced by floating modules and the massive column
            connector(
                ids::CUBE_CONNECTOR,
                Vec3::splat(0.2),
                materials::copied_city_white(),
                &[
                    Vec3::new(0.1, 0.0, 0.0),
                    Vec3::new(-0.1, 0.0, 0.0),
                    Vec3::new(0.0, 0.1, 0.0),
                    Vec3::new(0.0, -0.1, 0.0),
                    Vec3::new(0.0, 0.0, 0.1),
                    Vec3::new(0.0, 0.0, -0.1),
                ],
            ),
            connector(
                ids::FLOOR_CONNECTOR,
                Vec3::new(1.2, 0.3, 1.2),
                materials::smooth(),
                &[Vec3::new(0.0, 0.15, 0.0), Vec3::new(0.0, -0.15, 0.0)],
            ),
        ];

        let decorative = vec![
            decorative(
                ids::RIB_PATTERN,
                DecorativeCategory::Pattern,
                0.05,
                Vec3::new(2.0, 2.0, 0.05),
                materials::rough(),
            ),
            decorative(
                ids::BOARDFORM_TEXTURE,
                DecorativeCategory::Pattern,
                0.02,
                Vec3::new(2.0, 2.0, 0.02),
                materials::boardformed(),
            ),
            decorative(
                ids::BRUTAL_WINDOW,
                DecorativeCategory::Detail,
                0.3,
                Vec3::new(1.5, 2.0, 0.3),
                materials::weathered(),
            ),
            decorative(
                ids::SUNSHADE,
                DecorativeCategory::Detail,
                0.8,
                Vec3::new(2.0, 0.3, 0.8),
                materials::smooth(),
            ),
        ];

        let keyed = |list: Vec<Element>| -> HashMap<String, Element> {
            list.into_iter().map(|e| (e.id.clone(), e)).collect()
        };
        Catalog {
            modules: keyed(modules),
            connectors: keyed(connectors),
            decorative: keyed(decorative),
        }
    }

    fn map(&self, category: AssetCategory) -> &HashMap<String, Element> {
        match category {
            AssetCategory::Module => &self.modules,
            AssetCategory::Connector => &self.connectors,
            AssetCategory::Decorative => &self.decorative,
        }
    }

    pub fn get(&self, category: AssetCategory, id: &str) -> Option<&Element> {
        self.map(category).get(id)
    }

    pub fn len(&self) -> usize {
        self.modules.len() + self.connectors.len() + self.decorative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Places an owned copy of a prototype.
    /// Fails if the prototype is unknown or the placement is degenerate.
    pub fn place(
        &self,
        category: AssetCategory,
        prototype: &str,
        id: impl Into<String>,
        geometry: GeometricProperties,
    ) -> Result<Element, InstantiationError> {
        let id = id.into();
        let Some(proto) = self.get(category, prototype) else {
            return Err(InstantiationError::MissingPrototype {
                category,
                prototype: prototype.to_string(),
                id,
            });
        };

        if !geometry.has_valid_dimensions() {
            return Err(InstantiationError::DegenerateDimensions { id });
        }
        if !geometry.has_finite_transform() {
            return Err(InstantiationError::NonFiniteTransform { id });
        }
        if !geometry.has_positive_scale() {
            return Err(InstantiationError::NonPositiveScale { id });
        }

        Ok(proto.instantiate(id, geometry))
    }

    /// Checks id uniqueness across the three maps, map keys against prototype ids,
    /// and that every allowed connection names a known connector.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = HashSet::new();
        for category in [AssetCategory::Module, AssetCategory::Connector, AssetCategory::Decorative] {
            for (key, element) in self.map(category) {
                if key != &element.id || !seen.insert(element.id.as_str()) {
                    return Err(CatalogError::DuplicateId(element.id.clone()));
                }
            }
        }

        for element in self.modules.values().chain(self.connectors.values()).chain(self.decorative.values()) {
            if let Some(missing) = element
                .allowed_connections
                .iter()
                .find(|c| !self.connectors.contains_key(c.as_str()))
            {
                return Err(CatalogError::DanglingConnection {
                    element: element.id.clone(),
                    connector: missing.clone(),
                });
            }
        }

        Ok(())
    }
}

// style selectors, noise-driven so neighbouring positions tend to agree

pub fn select_wall_type(position: Vec3) -> &'static str {
    if get_noise(position.x, position.y, position.z, 0.2) < 0.5 {
        ids::BASIC_WALL
    } else {
        ids::THICK_WALL
    }
}

pub fn select_column_type(position: Vec3) -> &'static str {
    let style = get_noise(position.x, position.y, position.z, 0.3);
    if style < 0.33 {
        ids::MASSIVE_COLUMN
    } else if style < 0.66 {
        ids::T_COLUMN
    } else {
        ids::CROSS_COLUMN
    }
}

pub fn select_roof_type(position: Vec3) -> &'static str {
    let style = get_noise(position.x, position.y, position.z, 0.25);
    if style < 0.4 {
        ids::FLAT_ROOF
    } else if style < 0.7 {
        ids::CANTILEVER_ROOF
    } else {
        ids::COFFERED_ROOF
    }
}
