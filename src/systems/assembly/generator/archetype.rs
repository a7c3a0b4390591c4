// per-archetype massing built on top of the shell

use std::f32::consts::PI;

use bevy::math::Vec3;

use crate::config::*;
use super::catalog::{ids, AssetCategory};
use super::element::GeometricProperties;
use super::floating::disintegrate;
use super::sampling::{random, random_count};
use super::{Archetype, BuildContext, Built, Dimensions, Stage};

/// Dispatches to the builder of the context's archetype.
pub fn build_massing(ctx: &BuildContext, dims: &Dimensions) -> Vec<Built> {
    match ctx.scope.archetype {
        Archetype::Wide => single_story(ctx, dims),
        Archetype::Tall => multi_story(ctx, dims),
        Archetype::Balanced => split_level(ctx, dims),
    }
}

/// Terraces at varying heights plus a row of large windows.
pub fn single_story(ctx: &BuildContext, dims: &Dimensions) -> Vec<Built> {
    let o = ctx.offset;
    let seed = ctx.seed;
    let mut elements = Vec::new();

    let terraces = random_count(2.0, 4.0, seed);
    for i in 0..terraces {
        let s = seed + i as f64;
        let terrace_height = dims.height * random(0.2, 0.4, s);
        elements.push(ctx.place(
            AssetCategory::Module,
            ids::FLAT_ROOF,
            Stage::Massing,
            format!("extended_terrace_{i}"),
            GeometricProperties::at(
                Vec3::new(
                    dims.width * random(0.3, 0.6, s + 0.1),
                    SLAB_THICKNESS,
                    dims.depth * random(0.3, 0.5, s + 0.2),
                ),
                Vec3::new(
                    o.x + dims.width * random(0.2, 0.8, s + 0.3),
                    o.y + terrace_height,
                    o.z + dims.depth * random(0.5, 1.0, s + 0.4),
                ),
            ),
        ));
    }

    let windows = random_count(3.0, 5.0, seed);
    for i in 0..windows {
        elements.push(ctx.place(
            AssetCategory::Decorative,
            ids::BRUTAL_WINDOW,
            Stage::Massing,
            format!("window_{i}"),
            GeometricProperties::at(
                Vec3::new(2.5, 2.0, 0.4),
                Vec3::new(
                    o.x + dims.width * (i + 1) as f32 / (windows + 1) as f32,
                    o.y + dims.height * 0.4,
                    o.z,
                ),
            ),
        ));
    }

    elements
}

/// Vertical core with one interlocking volume per storey.
/// Above the disintegration complexity, storey volumes may crumble into debris.
pub fn multi_story(ctx: &BuildContext, dims: &Dimensions) -> Vec<Built> {
    let o = ctx.offset;
    let seed = ctx.seed;
    let floors = (dims.height / STOREY_HEIGHT).floor() as usize;
    let base_width = dims.width * 0.6; // narrower base for vertical emphasis
    let mut elements = Vec::new();

    // spine
    elements.push(ctx.place(
        AssetCategory::Module,
        ids::MONOLITHIC_WALL,
        Stage::Massing,
        "vertical_core",
        GeometricProperties::at(
            Vec3::new(base_width * 0.4, dims.height, dims.depth * 0.4),
            Vec3::new(o.x + dims.width * 0.3, o.y + dims.height / 2.0, o.z + dims.depth * 0.3),
        ),
    ));

    if floors == 0 {
        return elements;
    }

    let floor_height = dims.height / floors as f32;
    let crumbling = ctx.complexity > DISINTEGRATION_COMPLEXITY;

    for i in 0..floors {
        let s = seed + i as f64;
        let y = o.y + i as f32 * floor_height;

        // alternate between three volume types
        let volume = match i % 3 {
            0 => ctx.place(
                AssetCategory::Module,
                ids::MONOLITHIC_WALL,
                Stage::Massing,
                format!("cantilever_{i}"),
                GeometricProperties::at(
                    Vec3::new(base_width * random(0.8, 1.2, s), floor_height * 1.2, dims.depth * 0.6),
                    Vec3::new(o.x + dims.width * 0.6, y + floor_height / 2.0, o.z + dims.depth * 0.4),
                ),
            ),
            1 => ctx.place(
                AssetCategory::Module,
                ids::MONOLITHIC_WALL,
                Stage::Massing,
                format!("perpendicular_{i}"),
                GeometricProperties::at(
                    Vec3::new(base_width * 0.5, floor_height * 1.5, dims.depth * random(0.8, 1.2, s)),
                    Vec3::new(o.x + dims.width * 0.2, y + floor_height / 2.0, o.z + dims.depth * 0.7),
                ),
            ),
            _ => {
                let shift = random(-0.3, 0.3, s);
                ctx.place(
                    AssetCategory::Module,
                    ids::MONOLITHIC_WALL,
                    Stage::Massing,
                    format!("offset_volume_{i}"),
                    GeometricProperties::at(
                        Vec3::new(base_width * 0.7, floor_height * 0.9, dims.depth * 0.7),
                        Vec3::new(o.x + dims.width * (0.4 + shift), y + floor_height / 2.0, o.z + dims.depth * 0.5),
                    )
                    .with_yaw(random(-PI / 6.0, PI / 6.0, s + 0.1)),
                )
            }
        };

        match volume {
            Ok(solid) if crumbling => elements.extend(disintegrate(ctx, solid, o.y, dims.height, s)),
            other => elements.push(other),
        }

        if i % 2 == 0 {
            // horizontal cantilever plane
            elements.push(ctx.place(
                AssetCategory::Module,
                ids::CANTILEVER_ROOF,
                Stage::Massing,
                format!("horizontal_plane_{i}"),
                GeometricProperties::at(
                    Vec3::new(base_width * random(1.2, 1.8, s + 0.2), SLAB_THICKNESS, dims.depth * 0.3),
                    Vec3::new(
                        o.x + dims.width * random(0.2, 0.6, s + 0.3),
                        y + floor_height * 0.8,
                        o.z + dims.depth * random(0.3, 0.7, s + 0.4),
                    ),
                )
                .with_yaw(random(-PI / 4.0, PI / 4.0, s + 0.5)),
            ));

            // vertical circulation
            elements.push(ctx.place(
                AssetCategory::Module,
                ids::MASSIVE_COLUMN,
                Stage::Massing,
                format!("vertical_element_{i}"),
                GeometricProperties::at(
                    Vec3::new(base_width * 0.2, floor_height * 2.0, base_width * 0.2),
                    Vec3::new(o.x + dims.width * 0.15, y + floor_height, o.z + dims.depth * 0.15),
                ),
            ));
        }

        // windows alternate front and back
        let windows = random_count(2.0, 4.0, s);
        for w in 0..windows {
            let front = w % 2 == 0;
            elements.push(ctx.place(
                AssetCategory::Decorative,
                ids::BRUTAL_WINDOW,
                Stage::Massing,
                format!("window_{i}_{w}"),
                GeometricProperties::at(
                    Vec3::new(1.5, floor_height * 0.6, 0.3),
                    Vec3::new(
                        o.x + dims.width * (0.2 + w as f32 * 0.25),
                        y + floor_height * 0.5,
                        o.z + dims.depth * if front { 0.95 } else { 0.05 },
                    ),
                )
                .with_yaw(if front { 0.0 } else { PI }),
            ));
        }
    }

    elements
}

/// Three overlapping half-height levels stepping diagonally outward,
/// joined by a platform between each consecutive pair.
pub fn split_level(ctx: &BuildContext, dims: &Dimensions) -> Vec<Built> {
    let o = ctx.offset;
    let seed = ctx.seed;
    let level_height = dims.height / 2.0;
    let mut elements = Vec::new();

    for i in 0..SPLIT_LEVEL_COUNT {
        let s = seed + i as f64;
        let step = i as f32 * 0.2;
        let y = o.y + i as f32 * level_height / 2.0;

        elements.push(ctx.place(
            AssetCategory::Module,
            ids::MONOLITHIC_WALL,
            Stage::Massing,
            format!("level_{i}"),
            GeometricProperties::at(
                Vec3::new(
                    dims.width * random(0.6, 0.8, s),
                    level_height,
                    dims.depth * random(0.6, 0.8, s + 0.1),
                ),
                Vec3::new(
                    o.x + dims.width * (0.3 + step),
                    y + level_height / 2.0,
                    o.z + dims.depth * (0.3 + step),
                ),
            ),
        ));

        if i + 1 < SPLIT_LEVEL_COUNT {
            elements.push(ctx.place(
                AssetCategory::Module,
                ids::FLAT_ROOF,
                Stage::Massing,
                format!("connector_{i}"),
                GeometricProperties::at(
                    Vec3::new(dims.width * 0.3, SLAB_THICKNESS, dims.depth * 0.3),
                    Vec3::new(
                        o.x + dims.width * (0.4 + step),
                        y + level_height,
                        o.z + dims.depth * (0.4 + step),
                    ),
                ),
            ));
        }
    }

    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::assembly::generator::catalog::catalog;
    use crate::systems::assembly::generator::element::{Element, ModuleCategory};
    use crate::systems::assembly::generator::{resolve_batch, Scope};

    fn ctx(archetype: Archetype, seed: f64, complexity: f32) -> BuildContext<'static> {
        BuildContext {
            catalog: catalog(),
            scope: Scope { archetype, invocation: 0 },
            offset: Vec3::new(-3.0, 0.0, -3.0),
            seed,
            complexity,
            symmetry: false,
        }
    }

    fn count(elements: &[Element], local: &str) -> usize {
        elements.iter().filter(|e| e.id.rsplit('/').next().is_some_and(|l| l.starts_with(local))).count()
    }

    #[test]
    fn multi_story_with_three_floors() {
        let dims = Dimensions { width: 6.0, height: 9.0, depth: 6.0 };
        for i in 0..20 {
            let elements = resolve_batch(multi_story(&ctx(Archetype::Tall, i as f64 * 0.21, 0.5), &dims));
            let floor_volumes = count(&elements, "cantilever_") + count(&elements, "perpendicular_") + count(&elements, "offset_volume_");
            assert_eq!(floor_volumes, 3);
            assert_eq!(count(&elements, "vertical_core"), 1);
            // floors 0 and 2
            assert_eq!(count(&elements, "vertical_element_"), 2);
            assert_eq!(count(&elements, "horizontal_plane_"), 2);

            let windows = count(&elements, "window_");
            assert!((6..=9).contains(&windows), "{windows} windows");

            let circulation = elements.iter().find(|e| e.id.ends_with("vertical_element_0")).expect("floor 0 circulation");
            assert_eq!(circulation.module_category(), Some(ModuleCategory::Column));
        }
    }

    #[test]
    fn multi_story_windows_alternate_sides() {
        let dims = Dimensions { width: 6.0, height: 3.0, depth: 10.0 };
        let elements = resolve_batch(multi_story(&ctx(Archetype::Tall, 0.42, 0.5), &dims));
        let front = elements.iter().find(|e| e.id.ends_with("window_0_0")).expect("window 0");
        let back = elements.iter().find(|e| e.id.ends_with("window_0_1")).expect("window 1");
        assert!(front.geometry.position.z > back.geometry.position.z);
        assert_eq!(front.geometry.yaw(), 0.0);
        assert_eq!(back.geometry.yaw(), PI);
    }

    #[test]
    fn low_tall_has_only_a_core() {
        let dims = Dimensions { width: 6.0, height: 2.5, depth: 6.0 };
        let elements = resolve_batch(multi_story(&ctx(Archetype::Tall, 0.42, 0.5), &dims));
        assert_eq!(elements.len(), 1);
        assert!(elements[0].id.ends_with("vertical_core"));
    }

    #[test]
    fn high_complexity_may_crumble_volumes() {
        let dims = Dimensions { width: 6.0, height: 30.0, depth: 6.0 };
        let calm = resolve_batch(multi_story(&ctx(Archetype::Tall, 0.42, 0.5), &dims));
        assert_eq!(count(&calm, "fragment_"), 0);

        let wild = resolve_batch(multi_story(&ctx(Archetype::Tall, 0.42, 1.0), &dims));
        let volumes = count(&wild, "cantilever_") + count(&wild, "perpendicular_") + count(&wild, "offset_volume_");
        let debris = wild.iter().filter(|e| e.id.contains("/debris/")).count();
        // every storey volume is either kept or replaced by 3..=7 fragments
        assert!(volumes <= 10);
        assert!(debris >= 3 * (10 - volumes));
        assert!(debris <= 7 * (10 - volumes));
        assert!(wild.iter().all(|e| e.geometry.has_valid_dimensions()));
    }

    #[test]
    fn single_story_counts() {
        let dims = Dimensions { width: 14.0, height: 4.0, depth: 10.0 };
        for i in 0..20 {
            let elements = resolve_batch(single_story(&ctx(Archetype::Wide, i as f64 * 0.17, 0.5), &dims));
            assert!((2..=3).contains(&count(&elements, "extended_terrace_")));
            assert!((3..=4).contains(&count(&elements, "window_")));
        }
    }

    #[test]
    fn split_level_steps_outward() {
        let dims = Dimensions { width: 8.0, height: 8.0, depth: 8.0 };
        let elements = resolve_batch(split_level(&ctx(Archetype::Balanced, 0.42, 0.5), &dims));
        assert_eq!(count(&elements, "level_"), 3);
        assert_eq!(count(&elements, "connector_"), 2);

        let levels: Vec<_> = elements.iter().filter(|e| e.id.contains("/level_")).collect();
        for pair in levels.windows(2) {
            let (a, b) = (pair[0].geometry.position, pair[1].geometry.position);
            assert!(b.x > a.x && b.y > a.y && b.z > a.z);
            // half-height volumes overlap vertically
            assert!(b.y - a.y < pair[0].geometry.dimensions.y);
        }
    }

    #[test]
    fn dispatch_is_exhaustive_per_archetype() {
        let dims = Dimensions { width: 8.0, height: 9.0, depth: 8.0 };
        let wide = resolve_batch(build_massing(&ctx(Archetype::Wide, 0.3, 0.5), &dims));
        let tall = resolve_batch(build_massing(&ctx(Archetype::Tall, 0.3, 0.5), &dims));
        let balanced = resolve_batch(build_massing(&ctx(Archetype::Balanced, 0.3, 0.5), &dims));
        assert!(count(&wide, "extended_terrace_") >= 2);
        assert_eq!(count(&tall, "vertical_core"), 1);
        assert_eq!(count(&balanced, "level_"), 3);
    }
}
