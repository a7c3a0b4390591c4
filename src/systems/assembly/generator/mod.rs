// handles assembly generation logic
// composition engine: archetype choice -> shell -> principle pass -> massing -> floating cluster

use std::collections::HashMap;
use std::fmt::Display;

use bevy::log::{debug, warn};
use bevy::math::Vec3;
use bevy::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::*;

pub mod archetype;
pub mod catalog;
pub mod element;
pub mod error;
pub mod floating;
pub mod mesh_gen;
pub mod principles;
pub mod sampling;
pub mod shell;

use catalog::{AssetCategory, Catalog};
use element::{Element, GeometricProperties};
use error::{InstantiationError, ValidationError};

/// One massing strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Archetype {
    Wide,     // single story
    Tall,     // multi story
    Balanced, // split level
}

impl Archetype {
    pub fn label(&self) -> &'static str {
        match self {
            Archetype::Wide => "wide",
            Archetype::Tall => "tall",
            Archetype::Balanced => "balanced",
        }
    }

    /// Weighted archetype ranges of a uniform roll in [0, 1).
    pub fn from_roll(roll: f32) -> Self {
        if roll < WIDE_THRESHOLD {
            Archetype::Wide
        } else if roll < BALANCED_THRESHOLD {
            Archetype::Balanced
        } else {
            Archetype::Tall
        }
    }
}

/// What a single `generate` call builds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Composition {
    /// wide sub-assembly on one side, tall on the other
    Hybrid,
    Single(Archetype),
}

impl Composition {
    /// Maps a uniform roll in [0, 1) onto a composition.
    /// Rolls under the hybrid threshold never reach archetype selection.
    pub fn from_roll(roll: f32) -> Self {
        if roll < HYBRID_THRESHOLD {
            Composition::Hybrid
        } else {
            Composition::Single(Archetype::from_roll(roll))
        }
    }
}

/// Bounding volume of one sub-assembly
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Dimensions {
    /// Draws the bounding volume for an archetype, every axis a ratio of `base`.
    pub fn draw(archetype: Archetype, base: f32, rng: &mut impl Rng) -> Self {
        let (w, h, d) = match archetype {
            Archetype::Wide => ((2.0, 3.0), (0.8, 1.2), (1.5, 2.0)),
            Archetype::Tall => ((0.8, 1.2), (2.0, 3.0), (0.8, 1.2)),
            Archetype::Balanced => ((1.2, 1.8), (1.2, 1.8), (1.2, 1.8)),
        };
        Dimensions {
            width: base * rng.random_range(w.0..w.1),
            height: base * rng.random_range(h.0..h.1),
            depth: base * rng.random_range(d.0..d.1),
        }
    }

    /// Footprint and wall height of the living-space shell
    pub fn shell(cell_size: f32, height: f32) -> Self {
        Dimensions {
            width: cell_size,
            height,
            depth: cell_size,
        }
    }

    pub fn largest(&self) -> f32 {
        self.width.max(self.height).max(self.depth)
    }
}

// assembly generation parameters
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct AssemblyParams {
    pub cell_size: f32,
    pub height: f32,
    pub offset: Vec3,
    pub complexity: f32,         // [0, 1]
    pub symmetry: bool,          // forces the symmetric U-shaped shell
    pub seed: f64,
    pub floating_density: f32,
    pub aggregation_factor: f32, // [0, 1], higher clusters tighter
    pub composition: Option<Composition>, // None rolls one from the seed
}

impl Default for AssemblyParams {
    fn default() -> Self {
        Self::new(DEFAULT_CELL_SIZE, DEFAULT_HEIGHT, INITIAL_SEED)
    }
}

impl AssemblyParams {
    /// Centered on the origin, as the scene expects
    pub fn new(cell_size: f32, height: f32, seed: f64) -> Self {
        Self {
            cell_size,
            height,
            offset: Vec3::new(-cell_size / 2.0, 0.0, -cell_size / 2.0),
            complexity: DEFAULT_COMPLEXITY,
            symmetry: false,
            seed,
            floating_density: DEFAULT_FLOATING_DENSITY,
            aggregation_factor: DEFAULT_AGGREGATION_FACTOR,
            composition: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.cell_size > 0.0 && self.cell_size <= MAX_INPUT_SIZE) {
            return Err(ValidationError::CellSize(self.cell_size));
        }
        if !(self.height > 0.0 && self.height <= MAX_INPUT_SIZE) {
            return Err(ValidationError::Height(self.height));
        }
        if !(0.0..=1.0).contains(&self.complexity) {
            return Err(ValidationError::Complexity(self.complexity));
        }
        if !(0.0..=MAX_FLOATING_DENSITY).contains(&self.floating_density) {
            return Err(ValidationError::FloatingDensity(self.floating_density));
        }
        if !(0.0..=1.0).contains(&self.aggregation_factor) {
            return Err(ValidationError::AggregationFactor(self.aggregation_factor));
        }
        if !(self.offset.is_finite() && self.offset.abs().max_element() <= MAX_OFFSET) {
            return Err(ValidationError::Offset);
        }
        if !self.seed.is_finite() {
            return Err(ValidationError::Seed);
        }
        Ok(())
    }
}

/// Generation stage, part of every emitted id
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Shell,
    Massing,
    Floating,
    Debris,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Shell => "shell",
            Stage::Massing => "massing",
            Stage::Floating => "floating",
            Stage::Debris => "debris",
        }
    }
}

/// Id namespace of one sub-assembly: `<archetype>.<invocation>/<stage>/<local>`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scope {
    pub archetype: Archetype,
    pub invocation: usize,
}

impl Scope {
    pub fn id(&self, stage: Stage, local: impl Display) -> String {
        format!("{}.{}/{}/{}", self.archetype.label(), self.invocation, stage.label(), local)
    }
}

/// Outcome of placing one element
pub type Built = Result<Element, InstantiationError>;

/// Everything a builder needs besides the bounding dimensions.
#[derive(Clone, Copy, Debug)]
pub struct BuildContext<'a> {
    pub catalog: &'a Catalog,
    pub scope: Scope,
    pub offset: Vec3,
    pub seed: f64,
    pub complexity: f32,
    pub symmetry: bool,
}

impl BuildContext<'_> {
    pub fn place(
        &self,
        category: AssetCategory,
        prototype: &str,
        stage: Stage,
        local: impl Display,
        geometry: GeometricProperties,
    ) -> Built {
        self.catalog.place(category, prototype, self.scope.id(stage, local), geometry)
    }
}

/// Reduces per-element results into a renderable list.
/// Each failure is logged and replaced by a fallback element, the batch always completes.
pub fn resolve_batch(results: Vec<Built>) -> Vec<Element> {
    results
        .into_iter()
        .map(|built| {
            built.unwrap_or_else(|err| {
                warn!("element replaced by fallback: {}", err);
                Element::fallback(failed_id(&err))
            })
        })
        .collect()
}

fn failed_id(err: &InstantiationError) -> &str {
    match err {
        InstantiationError::MissingPrototype { id, .. } => id,
        InstantiationError::DegenerateDimensions { id } => id,
        InstantiationError::NonFiniteTransform { id } => id,
        InstantiationError::NonPositiveScale { id } => id,
    }
}

/// Re-checks an already built element, e.g. after a transform pass.
pub fn verify(element: Element) -> Built {
    let geometry = &element.geometry;
    if !geometry.has_valid_dimensions() {
        return Err(InstantiationError::DegenerateDimensions { id: element.id });
    }
    if !geometry.has_finite_transform() {
        return Err(InstantiationError::NonFiniteTransform { id: element.id });
    }
    if !geometry.has_positive_scale() {
        return Err(InstantiationError::NonPositiveScale { id: element.id });
    }
    Ok(element)
}

/// Ids emitted more than once, in first-seen order.
pub fn find_id_collisions(elements: &[Element]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut collisions = Vec::new();
    for element in elements {
        let count = counts.entry(element.id.as_str()).or_default();
        *count += 1;
        if *count == 2 {
            collisions.push(element.id.clone());
        }
    }
    collisions
}

/// Builds a complete assembly from scratch.
/// Deterministic for a fixed `params`: every draw derives from `params.seed`.
pub fn generate(params: &AssemblyParams) -> Result<Vec<Element>, ValidationError> {
    params.validate()?;

    let catalog = catalog::catalog();
    let mut rng = StdRng::seed_from_u64(params.seed.to_bits());
    let type_roll: f32 = rng.random();
    let composition = params.composition.unwrap_or_else(|| Composition::from_roll(type_roll));

    let elements = match composition {
        Composition::Hybrid => {
            // horizontal part to one side, vertical part to the other
            let wide_offset = params.offset + Vec3::new(-params.cell_size * 0.6, 0.0, 0.0);
            let tall_offset = params.offset + Vec3::new(params.cell_size * 0.4, 0.0, params.cell_size * 0.3);

            let mut elements = generate_structure(
                catalog,
                params,
                Scope { archetype: Archetype::Wide, invocation: 0 },
                wide_offset,
                params.cell_size * HYBRID_WIDE_CELL_SCALE,
                params.height * HYBRID_WIDE_HEIGHT_SCALE,
                &mut rng,
            );
            elements.extend(generate_structure(
                catalog,
                params,
                Scope { archetype: Archetype::Tall, invocation: 1 },
                tall_offset,
                params.cell_size * HYBRID_TALL_CELL_SCALE,
                params.height * HYBRID_TALL_HEIGHT_SCALE,
                &mut rng,
            ));
            elements
        }
        Composition::Single(archetype) => generate_structure(
            catalog,
            params,
            Scope { archetype, invocation: 0 },
            params.offset,
            params.cell_size,
            params.height,
            &mut rng,
        ),
    };

    let collisions = find_id_collisions(&elements);
    if !collisions.is_empty() {
        warn!("{} duplicate element ids, first: {}", collisions.len(), collisions[0]);
    }

    debug!("{:?}: {} elements", composition, elements.len());
    Ok(elements)
}

/// One sub-assembly: shell, principle pass, archetype massing, floating cluster.
pub fn generate_structure(
    catalog: &Catalog,
    params: &AssemblyParams,
    scope: Scope,
    offset: Vec3,
    cell_size: f32,
    height: f32,
    rng: &mut impl Rng,
) -> Vec<Element> {
    let dims = Dimensions::draw(scope.archetype, cell_size, rng);
    let ctx = BuildContext {
        catalog,
        scope,
        offset,
        seed: params.seed,
        complexity: params.complexity,
        symmetry: params.symmetry,
    };

    let shell = resolve_batch(shell::living_space(&ctx, &Dimensions::shell(cell_size, height)));
    let shaped = principles::apply_principles(shell, params.seed);
    let mut elements = resolve_batch(shaped.into_iter().map(verify).collect());
    debug!("{}.{} shell: {} elements", scope.archetype.label(), scope.invocation, elements.len());

    let massing = resolve_batch(archetype::build_massing(&ctx, &dims));
    debug!("{}.{} massing: {} elements", scope.archetype.label(), scope.invocation, massing.len());
    elements.extend(massing);

    elements.extend(resolve_batch(floating::floating_elements(
        &ctx,
        &dims,
        params.floating_density,
        params.aggregation_factor,
    )));

    elements
}

#[cfg(test)]
mod tests {
    use super::*;
    use element::ElementType;

    #[test]
    fn archetype_ranges() {
        assert_eq!(Archetype::from_roll(0.1), Archetype::Wide);
        assert_eq!(Archetype::from_roll(0.49), Archetype::Wide);
        assert_eq!(Archetype::from_roll(0.6), Archetype::Balanced);
        assert_eq!(Archetype::from_roll(0.9), Archetype::Tall);
    }

    #[test]
    fn roll_thresholds() {
        assert_eq!(Composition::from_roll(0.0), Composition::Hybrid);
        assert_eq!(Composition::from_roll(0.29), Composition::Hybrid);
        assert_eq!(Composition::from_roll(0.1), Composition::Hybrid);
        assert_eq!(Composition::from_roll(0.3), Composition::Single(Archetype::Wide));
        assert_eq!(Composition::from_roll(0.6), Composition::Single(Archetype::Balanced));
        assert_eq!(Composition::from_roll(0.7), Composition::Single(Archetype::Tall));
        assert_eq!(Composition::from_roll(0.9), Composition::Single(Archetype::Tall));
    }

    #[test]
    fn dimension_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let wide = Dimensions::draw(Archetype::Wide, 6.0, &mut rng);
            assert!((12.0..18.0).contains(&wide.width));
            assert!((4.8..7.2).contains(&wide.height));
            assert!((9.0..12.0).contains(&wide.depth));

            let tall = Dimensions::draw(Archetype::Tall, 6.0, &mut rng);
            assert!((4.8..7.2).contains(&tall.width));
            assert!((12.0..18.0).contains(&tall.height));

            let balanced = Dimensions::draw(Archetype::Balanced, 6.0, &mut rng);
            assert!((7.2..10.8).contains(&balanced.depth));
            assert!((7.2..10.8).contains(&balanced.height));
        }
    }

    #[test]
    fn smallest_tall_still_has_a_storey() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let tall = Dimensions::draw(Archetype::Tall, CELL_SIZE_MIN, &mut rng);
            assert!(tall.height >= STOREY_HEIGHT);
        }
    }

    #[test]
    fn low_height_input_only_shortens_the_shell() {
        let low = generate(&AssemblyParams {
            composition: Some(Composition::Single(Archetype::Tall)),
            ..AssemblyParams::new(6.0, HEIGHT_MIN, 0.42)
        })
        .expect("valid");
        let wall = low.iter().find(|e| e.id.ends_with("main_wall_long")).expect("shell wall");
        assert_eq!(wall.geometry.dimensions.y, HEIGHT_MIN);
        assert!(low.iter().any(|e| e.id.contains("/massing/cantilever_0")));
    }

    #[test]
    fn validation_rejects_bad_inputs() {
        let bad_cell = AssemblyParams::new(0.0, 4.0, 0.1);
        assert_eq!(generate(&bad_cell), Err(ValidationError::CellSize(0.0)));

        let bad_height = AssemblyParams::new(6.0, -1.0, 0.1);
        assert_eq!(generate(&bad_height), Err(ValidationError::Height(-1.0)));

        let nan_height = AssemblyParams::new(6.0, f32::NAN, 0.1);
        assert!(matches!(generate(&nan_height), Err(ValidationError::Height(_))));

        let bad_complexity = AssemblyParams { complexity: 1.5, ..AssemblyParams::default() };
        assert_eq!(bad_complexity.validate(), Err(ValidationError::Complexity(1.5)));

        let bad_aggregation = AssemblyParams { aggregation_factor: -0.1, ..AssemblyParams::default() };
        assert_eq!(bad_aggregation.validate(), Err(ValidationError::AggregationFactor(-0.1)));

        let negative_density = AssemblyParams { floating_density: -1.0, ..AssemblyParams::default() };
        assert_eq!(negative_density.validate(), Err(ValidationError::FloatingDensity(-1.0)));

        let nan_offset = AssemblyParams { offset: Vec3::new(0.0, f32::NAN, 0.0), ..AssemblyParams::default() };
        assert_eq!(nan_offset.validate(), Err(ValidationError::Offset));

        let far_offset = AssemblyParams { offset: Vec3::new(0.0, 0.0, 1e30), ..AssemblyParams::default() };
        assert_eq!(far_offset.validate(), Err(ValidationError::Offset));

        let infinite_seed = AssemblyParams::new(6.0, 4.0, f64::INFINITY);
        assert_eq!(generate(&infinite_seed), Err(ValidationError::Seed));
    }

    #[test]
    fn oversized_inputs_are_rejected() {
        let huge_density = AssemblyParams { floating_density: 1e6, ..AssemblyParams::default() };
        assert_eq!(generate(&huge_density), Err(ValidationError::FloatingDensity(1e6)));

        let at_limit = AssemblyParams { floating_density: MAX_FLOATING_DENSITY, ..AssemblyParams::default() };
        assert!(generate(&at_limit).is_ok());

        assert_eq!(generate(&AssemblyParams::new(1e38, 4.0, 0.42)), Err(ValidationError::CellSize(1e38)));
        assert_eq!(generate(&AssemblyParams::new(6.0, 1e38, 0.42)), Err(ValidationError::Height(1e38)));

        let largest = AssemblyParams::new(MAX_INPUT_SIZE, MAX_INPUT_SIZE, 0.42);
        for element in generate(&largest).expect("limits are inclusive") {
            assert!(element.geometry.has_valid_dimensions(), "{}", element.id);
            assert!(element.geometry.has_finite_transform(), "{}", element.id);
        }
    }

    #[test]
    fn overflow_after_shaping_becomes_fallback() {
        let wall = catalog::catalog()
            .place(AssetCategory::Module, catalog::ids::MONOLITHIC_WALL, "wall",
                GeometricProperties::sized(Vec3::new(3e38, 3.0, 0.4)))
            .expect("finite wall places");
        let shaped = principles::apply_principles(vec![wall], 0.42);
        assert!(!shaped[0].geometry.dimensions.is_finite());

        let settled = resolve_batch(shaped.into_iter().map(verify).collect());
        assert_eq!(settled[0].id, "wall#fallback");
        assert!(settled[0].geometry.has_valid_dimensions());
    }

    #[test]
    fn resolve_batch_substitutes_fallbacks() {
        let ok = catalog::catalog()
            .place(AssetCategory::Module, catalog::ids::FLAT_ROOF, "ok", GeometricProperties::sized(Vec3::ONE))
            .expect("flat roof exists");
        let results = vec![
            Ok(ok.clone()),
            Err(InstantiationError::DegenerateDimensions { id: "bad".into() }),
            Err(InstantiationError::MissingPrototype {
                category: AssetCategory::Decorative,
                prototype: "ghost_window".into(),
                id: "ghost".into(),
            }),
        ];

        let resolved = resolve_batch(results);
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved[0], ok);
        assert_eq!(resolved[1].id, "bad#fallback");
        assert_eq!(resolved[2].id, "ghost#fallback");
        assert!(resolved.iter().all(|e| e.geometry.has_valid_dimensions()));
        assert_eq!(resolved[1].element_type(), ElementType::Decorative);
    }

    #[test]
    fn collisions_are_detected() {
        let a = Element::fallback("a");
        let b = Element::fallback("b");
        assert!(find_id_collisions(&[a.clone(), b.clone()]).is_empty());
        assert_eq!(find_id_collisions(&[a.clone(), b, a.clone(), a]), vec!["a#fallback".to_string()]);
    }

    #[test]
    fn scope_ids_are_namespaced() {
        let scope = Scope { archetype: Archetype::Tall, invocation: 1 };
        assert_eq!(scope.id(Stage::Massing, "window_0_1"), "tall.1/massing/window_0_1");
    }
}
