// base living-space shell every archetype sits on
// L-shaped (two walls, corner column) or U-shaped (three walls, courtyard slab)

use std::f32::consts::PI;

use bevy::math::Vec3;

use crate::config::{SLAB_THICKNESS, WALL_THICKNESS};
use super::catalog::{self, ids, AssetCategory};
use super::element::GeometricProperties;
use super::sampling::{random, random_count};
use super::{BuildContext, Built, Dimensions, Stage};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Footprint {
    LShaped,
    UShaped,
}

impl Footprint {
    /// Seeded 50/50 draw; symmetric compositions always take the U.
    pub fn choose(seed: f64, symmetry: bool) -> Self {
        if symmetry || random(0.0, 1.0, seed) >= 0.5 {
            Footprint::UShaped
        } else {
            Footprint::LShaped
        }
    }
}

/// Shell walls, slabs, dividers, windows and one accent.
/// The shell spans `dims.width` along x and `0.7 * dims.width` along z.
pub fn living_space(ctx: &BuildContext, dims: &Dimensions) -> Vec<Built> {
    let size = dims.width;
    let height = dims.height;
    let o = ctx.offset;
    let seed = ctx.seed;
    let footprint = Footprint::choose(seed, ctx.symmetry);
    let span = size * 0.7; // shell depth
    let mid_z = o.z + size * 0.35;

    let mut elements = Vec::new();
    let place = |category, prototype: &str, local: &str, geometry| {
        ctx.place(category, prototype, Stage::Shell, local, geometry)
    };

    // primary long wall
    elements.push(place(
        AssetCategory::Module,
        ids::MONOLITHIC_WALL,
        "main_wall_long",
        GeometricProperties::at(
            Vec3::new(size, height, WALL_THICKNESS),
            Vec3::new(o.x + size / 2.0, o.y + height / 2.0, o.z),
        ),
    ));

    // short side
    elements.push(place(
        AssetCategory::Module,
        ids::MONOLITHIC_WALL,
        "main_wall_short",
        GeometricProperties::at(
            Vec3::new(WALL_THICKNESS, height, span),
            Vec3::new(o.x, o.y + height / 2.0, mid_z),
        ),
    ));

    if footprint == Footprint::UShaped {
        elements.push(place(
            AssetCategory::Module,
            ids::MONOLITHIC_WALL,
            "main_wall_third",
            GeometricProperties::at(
                Vec3::new(WALL_THICKNESS, height, span),
                Vec3::new(o.x + size, o.y + height / 2.0, mid_z),
            ),
        ));
    }

    // slabs
    elements.push(place(
        AssetCategory::Module,
        ids::FLAT_ROOF,
        "floor_plane",
        GeometricProperties::at(
            Vec3::new(size, SLAB_THICKNESS, span),
            Vec3::new(o.x + size / 2.0, o.y, mid_z),
        ),
    ));

    let roof_position = Vec3::new(o.x + size / 2.0, o.y + height, mid_z);
    elements.push(place(
        AssetCategory::Module,
        catalog::select_roof_type(roof_position),
        "roof_plane",
        GeometricProperties::at(Vec3::new(size, SLAB_THICKNESS, span), roof_position),
    ));

    // interior dividers
    let dividers = random_count(1.0, 3.0, seed);
    for i in 0..dividers {
        let along = random(0.3, 0.7, seed + i as f64);
        let position = Vec3::new(o.x + size * along, o.y + height * 0.4, mid_z);
        elements.push(place(
            AssetCategory::Module,
            catalog::select_wall_type(position),
            &format!("divider_{i}"),
            GeometricProperties::at(Vec3::new(WALL_THICKNESS, height * 0.8, size * 0.4), position),
        ));
    }

    // windows along the long wall
    let windows = random_count(2.0, 4.0, seed);
    for i in 0..windows {
        elements.push(place(
            AssetCategory::Decorative,
            ids::BRUTAL_WINDOW,
            &format!("window_{i}"),
            GeometricProperties::at(
                Vec3::new(2.0, height * 0.4, 0.3),
                Vec3::new(
                    o.x + size * (i + 1) as f32 / (windows + 1) as f32,
                    o.y + height * 0.5,
                    o.z,
                ),
            ),
        ));
    }

    match footprint {
        Footprint::UShaped => elements.push(place(
            AssetCategory::Module,
            ids::FLAT_ROOF,
            "courtyard_platform",
            GeometricProperties::at(
                Vec3::new(size * 0.4, 0.2, size * 0.4),
                Vec3::new(o.x + size * 0.5, o.y + 0.1, mid_z),
            ),
        )),
        Footprint::LShaped => {
            let position = Vec3::new(o.x + size * 0.8, o.y + height * 0.35, o.z + size * 0.6);
            elements.push(place(
                AssetCategory::Module,
                catalog::select_column_type(position),
                "corner_feature",
                GeometricProperties::at(Vec3::new(1.0, height * 0.7, 1.0), position).with_yaw(PI / 4.0),
            ));
        }
    }

    elements
}
