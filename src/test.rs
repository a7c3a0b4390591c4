// end-to-end scenarios over the whole generator

use std::f32::consts::FRAC_PI_2;

use bevy::math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::systems::assembly::generator::catalog::catalog;
use crate::systems::assembly::generator::element::Element;
use crate::systems::assembly::generator::mesh_gen::plan_primitives;
use crate::systems::assembly::generator::{
    find_id_collisions, generate, Archetype, AssemblyParams, Composition,
};

fn generated(params: &AssemblyParams) -> Vec<Element> {
    generate(params).expect("valid parameters")
}

fn params_grid() -> Vec<AssemblyParams> {
    let mut all = Vec::new();
    for (i, height) in [1.0, 2.5, 4.0, 7.5, 10.0].into_iter().enumerate() {
        for (j, cell_size) in [2.0, 6.0, 12.0].into_iter().enumerate() {
            for composition in [
                None,
                Some(Composition::Hybrid),
                Some(Composition::Single(Archetype::Wide)),
                Some(Composition::Single(Archetype::Tall)),
                Some(Composition::Single(Archetype::Balanced)),
            ] {
                let seed = 0.05 + i as f64 * 0.37 + j as f64 * 0.11;
                all.push(AssemblyParams {
                    composition,
                    ..AssemblyParams::new(cell_size, height, seed)
                });
            }
        }
    }
    all
}

#[test]
fn valid_params_give_renderable_output() {
    for params in params_grid() {
        let elements = generated(&params);
        assert!(!elements.is_empty(), "{params:?}");
        for element in &elements {
            let d = element.geometry.dimensions;
            assert!(d.is_finite() && d.min_element() > 0.0, "{} {:?}", element.id, d);
            assert!(element.geometry.has_finite_transform(), "{}", element.id);
            assert!(!element.id.is_empty());
        }
    }
}

#[test]
fn same_seed_same_assembly() {
    for params in params_grid() {
        assert_eq!(generated(&params), generated(&params));
    }
}

#[test]
fn generation_leaves_catalog_untouched() {
    let before = catalog().clone();
    let params = AssemblyParams::default();
    generated(&params);
    generated(&params);
    assert_eq!(catalog(), &before);
}

#[test]
fn ids_are_unique_across_compositions() {
    for params in params_grid() {
        let collisions = find_id_collisions(&generated(&params));
        assert!(collisions.is_empty(), "{collisions:?}");
    }

    // crumbling adds debris ids as well
    for params in params_grid() {
        let crumbly = AssemblyParams { complexity: 0.9, ..params };
        assert!(find_id_collisions(&generated(&crumbly)).is_empty());
    }
}

#[test]
fn hybrid_concatenates_wide_then_tall() {
    let params = AssemblyParams {
        composition: Some(Composition::Hybrid),
        ..AssemblyParams::default()
    };
    let elements = generated(&params);

    let split = elements
        .iter()
        .position(|e| e.id.starts_with("tall.1/"))
        .expect("tall sub-assembly present");
    assert!(split > 0);
    assert!(elements[..split].iter().all(|e| e.id.starts_with("wide.0/")));
    assert!(elements[split..].iter().all(|e| e.id.starts_with("tall.1/")));
}

#[test]
fn seed_roll_picks_composition() {
    for i in 0..40 {
        let seed = i as f64 * 0.173;
        let roll: f32 = StdRng::seed_from_u64(seed.to_bits()).random();
        let elements = generated(&AssemblyParams::new(6.0, 4.0, seed));

        let prefix = |p: &str| elements.iter().any(|e| e.id.starts_with(p));
        match Composition::from_roll(roll) {
            Composition::Hybrid => assert!(prefix("wide.0/") && prefix("tall.1/")),
            Composition::Single(archetype) => {
                let expected = format!("{}.0/", archetype.label());
                assert!(elements.iter().all(|e| e.id.starts_with(&expected)));
            }
        }
    }
}

#[test]
fn shell_follows_orthogonal_massing() {
    for params in params_grid() {
        for element in generated(&params).iter().filter(|e| e.id.contains("/shell/")) {
            let r = element.geometry.rotation;
            assert_eq!(r.x, 0.0);
            assert_eq!(r.z, 0.0);
            let steps = r.y / FRAC_PI_2;
            assert!((steps - steps.round()).abs() < 1e-5, "{}", element.id);
        }
    }
}

#[test]
fn wide_scenario() {
    let params = AssemblyParams {
        cell_size: 6.0,
        height: 4.0,
        offset: Vec3::new(-3.0, 0.0, -3.0),
        seed: 0.42,
        composition: Some(Composition::Single(Archetype::Wide)),
        ..AssemblyParams::default()
    };
    let elements = generated(&params);
    let count = |needle: &str| elements.iter().filter(|e| e.id.contains(needle)).count();

    assert!(count("/shell/") >= 5);
    assert!((2..=3).contains(&count("/shell/main_wall")));
    assert_eq!(count("/shell/floor_plane"), 1);
    assert_eq!(count("/shell/roof_plane"), 1);
    assert!(count("extended_terrace_") >= 2);
    assert!(count("window_") >= 3);
    assert!(count("/floating/") >= 1);
    assert!(elements.iter().all(|e| !e.id.is_empty()));
}

#[test]
fn generated_assembly_meshes_without_fallbacks() {
    for params in params_grid() {
        let elements = generated(&params);
        let primitives = plan_primitives(&elements);
        assert_eq!(primitives.len(), elements.len());
        assert!(primitives.iter().all(|p| !p.is_fallback()));
    }
}
