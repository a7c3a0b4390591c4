// Configuration file, All measurements in real-world meters (1 unit = 1 meter)
// This controls the initial generation parameter settings

// Parameter entry defaults and slider ranges
pub const DEFAULT_CELL_SIZE: f32 = 6.0;
pub const DEFAULT_HEIGHT: f32 = 4.0;
pub const HEIGHT_MIN: f32 = 1.0;
pub const HEIGHT_MAX: f32 = 10.0;
pub const CELL_SIZE_MIN: f32 = 2.0;
pub const CELL_SIZE_MAX: f32 = 12.0;
pub const PARAM_STEP: f64 = 0.5;

pub const INITIAL_SEED: f64 = 0.42;

// Hard input limits, generation rejects anything beyond
pub const MAX_INPUT_SIZE: f32 = 100.0;       // cell size and height
pub const MAX_OFFSET: f32 = 10_000.0;        // per axis
pub const MAX_FLOATING_DENSITY: f32 = 4.0;   // at most 80 floating cubes per sub-assembly

// Composition controls (dimensionless)
pub const DEFAULT_COMPLEXITY: f32 = 0.5;
pub const DEFAULT_FLOATING_DENSITY: f32 = 0.5;
pub const DEFAULT_AGGREGATION_FACTOR: f32 = 0.6;

// Archetype roll thresholds, roll is uniform in [0, 1)
pub const HYBRID_THRESHOLD: f32 = 0.3;   // below this both wide and tall are built
pub const WIDE_THRESHOLD: f32 = 0.5;     // [0, 0.5) wide
pub const BALANCED_THRESHOLD: f32 = 0.7; // [0.5, 0.7) balanced, rest tall

// Hybrid sub-assembly proportions
pub const HYBRID_WIDE_CELL_SCALE: f32 = 0.8;
pub const HYBRID_WIDE_HEIGHT_SCALE: f32 = 0.6;
pub const HYBRID_TALL_CELL_SCALE: f32 = 0.6;
pub const HYBRID_TALL_HEIGHT_SCALE: f32 = 1.5;

// Massing parameters
pub const WALL_THICKNESS: f32 = 0.4;
pub const SLAB_THICKNESS: f32 = 0.4;
pub const STOREY_HEIGHT: f32 = 3.0;   // multi-story floor count = floor(height / 3)
pub const SPLIT_LEVEL_COUNT: usize = 3;

// Principle-transform pass
pub const ROUGHNESS_CANONICAL_LIMIT: f32 = 0.3; // rougher surfaces converge to the primary finish
pub const HORIZONTAL_EMPHASIS_MIN: f32 = 1.5;
pub const HORIZONTAL_EMPHASIS_MAX: f32 = 2.5;
pub const WALL_DEPTH_EMPHASIS: f32 = 1.2;

// Floating elements
pub const FLOATING_COUNT_MIN: f32 = 10.0;
pub const FLOATING_COUNT_MAX: f32 = 20.0;
pub const FLOATING_SIZE_MIN: f32 = 0.3;
pub const FLOATING_SIZE_MAX: f32 = 1.0;
pub const FLOATING_CENTER_LIFT: f32 = 0.75; // cluster center height as a fraction of assembly height

// Disintegration
pub const DISINTEGRATION_INTENSITY: f32 = 0.6;
pub const DISINTEGRATION_NOISE_SCALE: f32 = 2.0;
pub const DISINTEGRATION_COMPLEXITY: f32 = 0.5; // only above this complexity
pub const FRAGMENT_COUNT_MIN: f32 = 3.0;
pub const FRAGMENT_COUNT_MAX: f32 = 8.0;
pub const FRAGMENT_SIZE_RATIO: f32 = 0.2;

// Scene
pub const TURNTABLE_SPEED: f32 = 0.2; // rad/s
pub const FALLBACK_SIZE: f32 = 1.0;
