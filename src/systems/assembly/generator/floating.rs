// sculptural floating cubes and noise-driven disintegration debris

use std::f32::consts::TAU;

use bevy::math::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, UnitSphere};

use crate::config::*;
use super::catalog::{ids, AssetCategory};
use super::element::{Element, GeometricProperties};
use super::sampling::{get_noise, random, random_count};
use super::{BuildContext, Built, Dimensions, Stage};

fn tumble(seed: f64) -> Vec3 {
    Vec3::new(
        random(0.0, TAU, seed + 0.1),
        random(0.0, TAU, seed + 0.2),
        random(0.0, TAU, seed + 0.3),
    )
}

/// Cluster of small cubes around the assembly.
/// Count is `floor(random(10, 20, seed) * density)`; positions fall inside a sphere
/// as large as the biggest dimension, pulled toward its center by `aggregation`.
pub fn floating_elements(ctx: &BuildContext, dims: &Dimensions, density: f32, aggregation: f32) -> Vec<Built> {
    let count = (random(FLOATING_COUNT_MIN, FLOATING_COUNT_MAX, ctx.seed) * density).floor().max(0.0) as usize;
    let radius = dims.largest();
    let center = ctx.offset + Vec3::new(dims.width / 2.0, dims.height * FLOATING_CENTER_LIFT, dims.depth / 2.0);

    (0..count)
        .map(|i| {
            let s = ctx.seed + i as f64;
            let mut rng = StdRng::seed_from_u64(s.to_bits());
            let [x, y, z]: [f32; 3] = UnitSphere.sample(&mut rng);
            let distance = random(0.0, radius, s) * (1.0 - aggregation);
            let size = random(FLOATING_SIZE_MIN, FLOATING_SIZE_MAX, s + 0.5);

            ctx.place(
                AssetCategory::Module,
                ids::FLOATING_CUBE,
                Stage::Floating,
                format!("floating_cube_{i}"),
                GeometricProperties::at(Vec3::splat(size), center + Vec3::new(x, y, z) * distance)
                    .with_rotation(tumble(s)),
            )
        })
        .collect()
}

/// Whether a solid at `position` crumbles.
/// Compares noise sampled at twice the position against its height fraction, so
/// higher solids crumble more often.
pub fn is_disintegrated(position: Vec3, height_fraction: f32) -> bool {
    let noise = get_noise(position.x, position.y, position.z, DISINTEGRATION_NOISE_SCALE);
    noise < height_fraction * DISINTEGRATION_INTENSITY
}

/// Small debris cubes jittered around `origin`.
pub fn fragments(ctx: &BuildContext, source: &str, origin: Vec3, size: f32, seed: f64) -> Vec<Built> {
    let fragment_size = size * FRAGMENT_SIZE_RATIO;
    let count = random_count(FRAGMENT_COUNT_MIN, FRAGMENT_COUNT_MAX, seed);

    (0..count)
        .map(|i| {
            let s = seed + i as f64;
            let jitter = Vec3::new(
                random(-1.0, 1.0, s + 0.4) * size,
                random(0.5, 2.0, s + 0.5) * size,
                random(-1.0, 1.0, s + 0.6) * size,
            );
            ctx.place(
                AssetCategory::Module,
                ids::BASIC_WALL,
                Stage::Debris,
                format!("fragment_{source}_{i}"),
                GeometricProperties::at(Vec3::splat(fragment_size), origin + jitter).with_rotation(tumble(s)),
            )
        })
        .collect()
}

/// Keeps `solid` or replaces it by debris, depending on `is_disintegrated`.
/// `base_y` and `total_height` locate the solid within its assembly.
pub fn disintegrate(ctx: &BuildContext, solid: Element, base_y: f32, total_height: f32, seed: f64) -> Vec<Built> {
    let position = solid.geometry.position;
    let fraction = (position.y - base_y) / total_height;
    if !is_disintegrated(position, fraction) {
        return vec![Ok(solid)];
    }

    let source = solid.id.rsplit('/').next().unwrap_or(&solid.id);
    fragments(ctx, source, position, solid.geometry.largest_dimension(), seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::assembly::generator::catalog::catalog;
    use crate::systems::assembly::generator::element::ModuleCategory;
    use crate::systems::assembly::generator::{resolve_batch, Archetype, Scope};

    fn ctx(seed: f64) -> BuildContext<'static> {
        BuildContext {
            catalog: catalog(),
            scope: Scope { archetype: Archetype::Balanced, invocation: 0 },
            offset: Vec3::ZERO,
            seed,
            complexity: 0.5,
            symmetry: false,
        }
    }

    const DIMS: Dimensions = Dimensions { width: 8.0, height: 6.0, depth: 7.0 };

    #[test]
    fn floating_count_follows_density() {
        for i in 0..30 {
            let seed = i as f64 * 0.11;
            let base = random(FLOATING_COUNT_MIN, FLOATING_COUNT_MAX, seed);
            let half = resolve_batch(floating_elements(&ctx(seed), &DIMS, 0.5, 0.6));
            assert_eq!(half.len(), (base * 0.5).floor() as usize);
            assert!(half.len() >= 5);

            let none = floating_elements(&ctx(seed), &DIMS, 0.0, 0.6);
            assert!(none.is_empty());
        }
    }

    #[test]
    fn floating_cubes_are_small_and_inside_sphere() {
        let center = Vec3::new(4.0, 6.0 * FLOATING_CENTER_LIFT, 3.5);
        let cubes = resolve_batch(floating_elements(&ctx(0.42), &DIMS, 1.0, 0.6));
        for cube in &cubes {
            let d = cube.geometry.dimensions;
            assert_eq!(d.x, d.y);
            assert_eq!(d.y, d.z);
            assert!((FLOATING_SIZE_MIN..FLOATING_SIZE_MAX).contains(&d.x));
            assert!(cube.geometry.position.distance(center) <= 8.0 * 0.4 + 1e-3);
            assert_eq!(cube.module_category(), Some(ModuleCategory::Floating));
        }
    }

    #[test]
    fn full_aggregation_collapses_to_center() {
        let center = Vec3::new(4.0, 6.0 * FLOATING_CENTER_LIFT, 3.5);
        let cubes = resolve_batch(floating_elements(&ctx(0.42), &DIMS, 1.0, 1.0));
        assert!(cubes.iter().all(|c| c.geometry.position.distance(center) < 1e-4));
    }

    #[test]
    fn ground_level_never_disintegrates() {
        for i in 0..100 {
            let p = Vec3::new(i as f32 * 0.3, 0.0, i as f32 * -0.7);
            assert!(!is_disintegrated(p, 0.0));
        }
    }

    #[test]
    fn fragments_replace_triggered_solid() {
        let context = ctx(0.42);
        // a spot high enough that the noise threshold is reached
        let origin = (0..400)
            .map(|i| Vec3::new(i as f32 * 0.37, 9.0, i as f32 * 0.19))
            .find(|p| is_disintegrated(*p, 1.0))
            .expect("some position crumbles at full height");
        let solid = context
            .place(AssetCategory::Module, ids::MONOLITHIC_WALL, Stage::Massing, "cantilever_3",
                GeometricProperties::at(Vec3::new(4.0, 3.0, 2.0), origin))
            .expect("wall");

        let debris = resolve_batch(disintegrate(&context, solid, origin.y - 9.0, 9.0, 0.42));
        assert!((3..=7).contains(&debris.len()));
        for piece in &debris {
            assert!(piece.id.starts_with("balanced.0/debris/fragment_cantilever_3_"));
            assert!((piece.geometry.dimensions.x - 0.8).abs() < 1e-5);
            assert!(piece.geometry.position.y > origin.y);
        }
    }
}
