// stylistic transform pass over already-built elements
// raw materiality, horizontal emphasis, orthogonal massing

use std::f32::consts::FRAC_PI_2;

use bevy::math::Vec3;

use crate::config::*;
use super::catalog::primary_material;
use super::element::Element;
use super::sampling::random;

/// Nearest multiple of 90 degrees.
pub fn snap_yaw(yaw: f32) -> f32 {
    (yaw / FRAC_PI_2).round() * FRAC_PI_2
}

/// Applies the three principles to every element and returns the transformed list.
/// Rough finishes converge to the primary material, walls are widened by one
/// seeded factor, yaw snaps to a right angle and pitch/roll are cleared.
pub fn apply_principles(elements: Vec<Element>, seed: f64) -> Vec<Element> {
    let emphasis = random(HORIZONTAL_EMPHASIS_MIN, HORIZONTAL_EMPHASIS_MAX, seed);
    let primary = primary_material();

    elements
        .into_iter()
        .map(|mut element| {
            if element.material.roughness > ROUGHNESS_CANONICAL_LIMIT {
                element.material = primary.clone();
            }

            if element.is_wall() {
                let d = element.geometry.dimensions;
                element.geometry.dimensions = Vec3::new(d.x * emphasis, d.y, d.z * WALL_DEPTH_EMPHASIS);
            }

            element.geometry.rotation = Vec3::new(0.0, snap_yaw(element.geometry.yaw()), 0.0);
            element
        })
        .collect()
}
