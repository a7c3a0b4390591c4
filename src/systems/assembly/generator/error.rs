use thiserror::Error;

use super::catalog::AssetCategory;

/// Rejected generation inputs
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("cell size must be positive and within the input limit, got {0}")]
    CellSize(f32),
    #[error("height must be positive and within the input limit, got {0}")]
    Height(f32),
    #[error("complexity must lie in [0, 1], got {0}")]
    Complexity(f32),
    #[error("floating density must be non-negative and within its limit, got {0}")]
    FloatingDensity(f32),
    #[error("aggregation factor must lie in [0, 1], got {0}")]
    AggregationFactor(f32),
    #[error("offset must be finite and near the origin")]
    Offset,
    #[error("seed must be finite")]
    Seed,
}

/// Per-element build failure. Never aborts a batch.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InstantiationError {
    #[error("no {category:?} prototype named `{prototype}` for `{id}`")]
    MissingPrototype { category: AssetCategory, prototype: String, id: String },
    #[error("element `{id}` has non-positive or non-finite dimensions")]
    DegenerateDimensions { id: String },
    #[error("element `{id}` has a non-finite transform")]
    NonFiniteTransform { id: String },
    #[error("element `{id}` has a zero or negative scale")]
    NonPositiveScale { id: String },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("prototype id `{0}` is defined more than once")]
    DuplicateId(String),
    #[error("`{element}` allows connection to unknown connector `{connector}`")]
    DanglingConnection { element: String, connector: String },
}
