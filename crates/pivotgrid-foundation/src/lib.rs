//! Foundation pieces for the PivotGrid control.
//!
//! The heart of this crate is [`realize`]: the incremental viewport-fitting
//! estimator that decides, pass by pass, how many rows or columns the host
//! layout manager should materialize so the visible viewport is filled
//! exactly. The estimator never paints and never owns scroll state; it only
//! computes targets and records realization progress as the host reports it.

pub mod realize;

pub use realize::{
    AxisGeometry, AxisHierarchy, CellMeasure, ColumnRealizationEstimator, EstimatorState,
    LevelWidthAccumulator, RealizationEstimator, RealizationPair, RowRealizationEstimator,
};
