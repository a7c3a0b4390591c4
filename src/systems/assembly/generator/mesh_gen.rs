use bevy::prelude::*;

use crate::config::FALLBACK_SIZE;
use super::element::{Element, ElementType};
use super::error::InstantiationError;

// one renderable box per element
// planning is kept apart from spawning so it can run without a world

#[derive(Clone, Debug, PartialEq)]
pub struct PrimitiveMaterial {
    pub base_color: Srgba,
    pub roughness: f32,
    pub metalness: f32,
}

/// Identification carried by every spawned primitive
#[derive(Clone, Debug, PartialEq)]
pub enum PrimitiveTag {
    Element {
        element_id: String,
        element_type: ElementType,
        allowed_connections: Vec<String>,
    },
    Fallback {
        reason: String,
        original_element_id: Option<String>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub size: Vec3,
    pub transform: Transform,
    pub material: PrimitiveMaterial,
    pub tag: PrimitiveTag,
}

impl Primitive {
    pub fn is_fallback(&self) -> bool {
        matches!(self.tag, PrimitiveTag::Fallback { .. })
    }
}

/// Box primitive for one element
pub fn primitive_from_element(element: &Element) -> Result<Primitive, InstantiationError> {
    let geometry = &element.geometry;
    if !geometry.has_valid_dimensions() {
        return Err(InstantiationError::DegenerateDimensions { id: element.id.clone() });
    }
    if !geometry.has_finite_transform() {
        return Err(InstantiationError::NonFiniteTransform { id: element.id.clone() });
    }
    if !geometry.has_positive_scale() {
        return Err(InstantiationError::NonPositiveScale { id: element.id.clone() });
    }

    let r = geometry.rotation;
    Ok(Primitive {
        size: geometry.dimensions,
        transform: Transform::from_translation(geometry.position)
            .with_rotation(Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z))
            .with_scale(geometry.scale),
        material: PrimitiveMaterial {
            base_color: element.material.color,
            roughness: element.material.roughness,
            metalness: element.material.metalness,
        },
        tag: PrimitiveTag::Element {
            element_id: element.id.clone(),
            element_type: element.element_type(),
            allowed_connections: element.allowed_connections.clone(),
        },
    })
}

/// Fixed-size red box standing in for something that failed
pub fn fallback_primitive(reason: impl Into<String>, original_element_id: Option<String>) -> Primitive {
    Primitive {
        size: Vec3::splat(FALLBACK_SIZE),
        transform: Transform::default(),
        material: PrimitiveMaterial {
            base_color: Srgba::RED,
            roughness: 0.5,
            metalness: 0.0,
        },
        tag: PrimitiveTag::Fallback {
            reason: reason.into(),
            original_element_id,
        },
    }
}

/// Plans one primitive per element in order.
/// Failed elements get a fallback primitive; an empty result becomes a single marker.
pub fn plan_primitives(elements: &[Element]) -> Vec<Primitive> {
    let mut primitives: Vec<Primitive> = elements
        .iter()
        .map(|element| {
            primitive_from_element(element).unwrap_or_else(|err| {
                warn!("mesh fallback for {}: {}", element.id, err);
                fallback_primitive(err.to_string(), Some(element.id.clone()))
            })
        })
        .collect();

    if primitives.is_empty() {
        warn!("no primitives created, adding fallback marker");
        primitives.push(fallback_primitive("no primitives created", None));
    }

    primitives
}

pub fn primitive_mesh(primitive: &Primitive) -> Mesh {
    Mesh::from(Cuboid::new(primitive.size.x, primitive.size.y, primitive.size.z))
}

pub fn primitive_material(primitive: &Primitive) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::Srgba(primitive.material.base_color),
        perceptual_roughness: primitive.material.roughness,
        metallic: primitive.material.metalness,
        alpha_mode: AlphaMode::Opaque,
        ..default()
    }
}
