//! Incremental viewport-fitting realization estimation.
//!
//! A rendering session consists of one or more rendering iterations. At the
//! start of each iteration an axis estimates how many items ("leaves") the
//! host should realize to fill the viewport; the host realizes them,
//! reporting each one back; at the end of the iteration an axis whose
//! viewport is still unfilled folds a correction ratio into its adjustment
//! factor, so the next iteration's estimate converges toward exact fill.
//! Label and cell widths are only known once content is measured, which is
//! why this is an adaptive estimator with iterative correction rather than
//! a closed-form solver.
//!
//! The two axes are structurally similar but behaviorally distinct, and
//! depend on each other: the column estimator must know how much horizontal
//! space the row header hierarchy consumes, and the row estimator budgets
//! for the column hierarchy's header rows. [`RealizationPair`] wires that
//! dependency explicitly at construction.

mod column;
mod estimator;
mod host;
mod level_width;
mod row;

pub use column::ColumnRealizationEstimator;
pub use estimator::{EstimatorState, RealizationEstimator};
pub use host::{AxisGeometry, AxisHierarchy, CellMeasure};
pub use level_width::LevelWidthAccumulator;
pub use row::RowRealizationEstimator;

use std::cell::RefCell;
use std::rc::Rc;

use pivotgrid_ui_layout::Axis;

/// The paired row and column estimators of one grid control.
///
/// Owns both estimators for the lifetime of the grid and exposes the
/// lifecycle surface the orchestrating layout manager drives, keyed by
/// [`Axis`]. The pair never initiates rendering itself: it only computes
/// targets and records realization progress as the host reports it.
///
/// All operations are synchronous and single-threaded; correctness depends
/// on the host respecting the lifecycle ordering documented on
/// [`RealizationEstimator`]. Iterating the row axis before the column axis
/// within a rendering pass gives the column estimator a fresh row target to
/// bound its cross-axis measurements with.
pub struct RealizationPair<RH, CH, M>
where
    RH: AxisHierarchy,
    CH: AxisHierarchy,
    M: CellMeasure<RH::Item, CH::Item>,
{
    rows: Rc<RefCell<RowRealizationEstimator<RH, CH>>>,
    columns: RefCell<ColumnRealizationEstimator<RH, CH, M>>,
}

impl<RH, CH, M> RealizationPair<RH, CH, M>
where
    RH: AxisHierarchy,
    CH: AxisHierarchy,
    M: CellMeasure<RH::Item, CH::Item>,
{
    /// Wires the two estimators to their hosts and to each other.
    ///
    /// The hosts and the cell binder are shared, non-owning handles; the
    /// pair never manages their lifetime.
    pub fn new(row_host: Rc<RH>, column_host: Rc<CH>, cells: Rc<M>) -> Self {
        let rows = Rc::new(RefCell::new(RowRealizationEstimator::new(
            Rc::clone(&row_host),
            Rc::clone(&column_host),
        )));
        let columns = RefCell::new(ColumnRealizationEstimator::new(
            column_host,
            row_host,
            Rc::clone(&rows),
            cells,
        ));
        Self { rows, columns }
    }

    /// Starts a rendering iteration for one axis.
    pub fn begin_iteration(&self, axis: Axis) {
        match axis {
            Axis::Rows => self.rows.borrow_mut().begin_iteration(),
            Axis::Columns => self.columns.borrow_mut().begin_iteration(),
        }
    }

    /// Reports one realized header on the given axis.
    pub fn header_realized(&self, axis: Axis, is_leaf: bool) {
        match axis {
            Axis::Rows => self.rows.borrow_mut().header_realized(is_leaf),
            Axis::Columns => self.columns.borrow_mut().header_realized(is_leaf),
        }
    }

    /// Ends a rendering iteration for one axis, with the contextual width
    /// the iteration actually filled and whether the viewport got full.
    pub fn end_iteration(&self, axis: Axis, filled_contextual_width: f32, filled: bool) {
        match axis {
            Axis::Rows => self
                .rows
                .borrow_mut()
                .end_iteration(filled_contextual_width, filled),
            Axis::Columns => self
                .columns
                .borrow_mut()
                .end_iteration(filled_contextual_width, filled),
        }
    }

    /// Ends a rendering session for one axis, dropping accumulated
    /// corrections.
    pub fn end_session(&self, axis: Axis) {
        match axis {
            Axis::Rows => self.rows.borrow_mut().end_session(),
            Axis::Columns => self.columns.borrow_mut().end_session(),
        }
    }

    /// True while the host should keep realizing items on the axis.
    pub fn needs_to_realize(&self, axis: Axis) -> bool {
        match axis {
            Axis::Rows => self.rows.borrow().needs_to_realize(),
            Axis::Columns => self.columns.borrow().needs_to_realize(),
        }
    }

    /// Current realization target of the axis.
    pub fn items_to_realize(&self, axis: Axis) -> usize {
        match axis {
            Axis::Rows => self.rows.borrow().state().items_to_realize(),
            Axis::Columns => self.columns.borrow().state().items_to_realize(),
        }
    }

    /// Current adjustment factor of the axis.
    pub fn adjustment_factor(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Rows => self.rows.borrow().state().adjustment_factor(),
            Axis::Columns => self.columns.borrow().state().adjustment_factor(),
        }
    }

    /// Estimated horizontal width of the row header hierarchy, bounded by
    /// the row axis's current target.
    pub fn estimated_row_hierarchy_width(&self) -> f32 {
        self.rows.borrow().estimated_hierarchy_width()
    }
}

#[cfg(test)]
#[path = "tests/pair_tests.rs"]
mod pair_tests;
