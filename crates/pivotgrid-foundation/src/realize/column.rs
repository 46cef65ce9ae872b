//! Column-axis realization estimation.
//!
//! Columns share the horizontal viewport with the row header hierarchy, so
//! the column estimator first resolves how much width the row hierarchy
//! consumes (actual when the row axis finished rendering, estimated
//! otherwise) and then accumulates per-column max content widths until the
//! remaining space is covered.

use std::cell::RefCell;
use std::rc::Rc;

use super::estimator::{EstimatorState, RealizationEstimator};
use super::host::{AxisHierarchy, CellMeasure};
use super::row::RowRealizationEstimator;

/// Remaining fill width at or below this is treated as exhausted.
const PIXEL_PRECISION: f32 = 0.001;

/// Estimates how many columns a rendering pass should realize.
///
/// Holds non-owning handles to both axis hosts, the shared cell binder, and
/// the row estimator (whose bounded hierarchy walk supplies the estimated
/// row header width and the visible leaf rows to measure cells against).
/// Wired once at construction by [`RealizationPair`](super::RealizationPair).
pub struct ColumnRealizationEstimator<RH, CH, M>
where
    RH: AxisHierarchy,
{
    state: EstimatorState,
    columns: Rc<CH>,
    rows: Rc<RH>,
    row_estimator: Rc<RefCell<RowRealizationEstimator<RH, CH>>>,
    cells: Rc<M>,
    /// Row-hierarchy width resolved by the last estimate; feeds the
    /// size-adjustment denominator.
    estimated_row_hierarchy_width: f32,
}

impl<RH, CH, M> ColumnRealizationEstimator<RH, CH, M>
where
    RH: AxisHierarchy,
    CH: AxisHierarchy,
    M: CellMeasure<RH::Item, CH::Item>,
{
    /// Creates the column estimator for a paired grid.
    pub fn new(
        columns: Rc<CH>,
        rows: Rc<RH>,
        row_estimator: Rc<RefCell<RowRealizationEstimator<RH, CH>>>,
        cells: Rc<M>,
    ) -> Self {
        Self {
            state: EstimatorState::default(),
            columns,
            rows,
            row_estimator,
            cells,
            estimated_row_hierarchy_width: 0.0,
        }
    }

    /// Row-hierarchy width used by the last estimate.
    #[inline]
    pub fn resolved_row_hierarchy_width(&self) -> f32 {
        self.estimated_row_hierarchy_width
    }

    /// Resolves the horizontal space consumed by the row header hierarchy,
    /// preferring ground truth over estimation once available.
    fn resolve_row_hierarchy_width(&self) -> f32 {
        if self.rows.is_rendered() {
            self.rows.rendered_contextual_size()
        } else {
            self.row_estimator.borrow().estimated_hierarchy_width()
                * self.state.adjustment_factor()
        }
    }

    /// Max content width of one column over its header label and the body
    /// cells of every row leaf that will be visible this pass.
    fn column_content_width(&self, column: &CH::Item, visible_rows: &[RH::Item]) -> f32 {
        let mut width = self.columns.estimated_header_width(column);
        for row in visible_rows {
            width = width.max(self.cells.estimated_cell_width(row, column));
        }
        width
    }
}

impl<RH, CH, M> RealizationEstimator for ColumnRealizationEstimator<RH, CH, M>
where
    RH: AxisHierarchy,
    CH: AxisHierarchy,
    M: CellMeasure<RH::Item, CH::Item>,
{
    fn state(&self) -> &EstimatorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EstimatorState {
        &mut self.state
    }

    fn is_estimating(&self) -> bool {
        self.columns.is_measuring() && !self.columns.is_rendered()
    }

    fn has_unrealized_items(&self) -> bool {
        self.columns.first_visible_index() + self.state.realized_leaves()
            < self.columns.item_count()
    }

    fn estimate_items_to_realize(&mut self) -> usize {
        let row_hierarchy_width = self.resolve_row_hierarchy_width();
        self.estimated_row_hierarchy_width = row_hierarchy_width;
        self.state.reset_estimated_contextual_width();

        let width_to_fill = self.columns.contextual_width_to_fill() - row_hierarchy_width;
        if !self.columns.has_model() || width_to_fill <= PIXEL_PRECISION {
            return 0;
        }

        let start = self.columns.first_visible_index();
        let count = self.columns.item_count();

        if self.columns.alignment().is_end() {
            // Backward fill realizes all remaining columns; no width-based
            // trimming.
            return count.saturating_sub(start);
        }

        let visible_rows = self.row_estimator.borrow().visible_leaves();
        let mut realized = 0;
        for index in start..count {
            let Some(column) = self.columns.child_at(None, index) else {
                break;
            };
            // A partially scrolled edge column only contributes its visible
            // share; every later column is fully visible.
            let visible_ratio = if index == start {
                self.columns.visible_size_ratio()
            } else {
                1.0
            };
            let contribution = self.column_content_width(&column, &visible_rows)
                * visible_ratio
                * self.state.adjustment_factor();
            self.state.add_estimated_contextual_width(contribution);
            if self.state.estimated_contextual_width() >= width_to_fill {
                // The column that tipped the accumulation over the fill
                // width is not part of the target.
                return realized;
            }
            realized += 1;
        }
        realized
    }

    fn compute_size_adjustment(&self, grid_contextual_width: f32) -> f32 {
        let covered = self.estimated_row_hierarchy_width + self.state.estimated_contextual_width();
        if covered <= 0.0 {
            return 1.0;
        }
        grid_contextual_width / covered
    }
}
