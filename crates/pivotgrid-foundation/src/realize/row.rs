//! Row-axis realization estimation.
//!
//! The row axis fills the viewport vertically: forward from the scroll
//! anchor, or backward from the last row when aligned to end. It also owns
//! the recursive row-hierarchy width walk the column axis depends on, since
//! the row headers consume horizontal space that columns must share.

use std::rc::Rc;

use super::estimator::{EstimatorState, RealizationEstimator};
use super::host::{AxisGeometry, AxisHierarchy};
use super::level_width::LevelWidthAccumulator;

/// Estimates how many rows a rendering pass should realize.
///
/// Holds a non-owning handle to its own axis host and to the column axis's
/// geometry (forward fill must budget for the vertical space consumed by the
/// column hierarchy's header rows). Wired once at construction by
/// [`RealizationPair`](super::RealizationPair).
pub struct RowRealizationEstimator<RH, CG> {
    state: EstimatorState,
    rows: Rc<RH>,
    columns: Rc<CG>,
}

impl<RH, CG> RowRealizationEstimator<RH, CG>
where
    RH: AxisHierarchy,
    CG: AxisGeometry,
{
    /// Creates the row estimator for a paired grid.
    pub fn new(rows: Rc<RH>, columns: Rc<CG>) -> Self {
        Self {
            state: EstimatorState::default(),
            rows,
            columns,
        }
    }

    /// Estimated horizontal width of the row header hierarchy.
    ///
    /// Performs a recursive descent from the first visible item, recording
    /// per-level maximum header widths. The walk visits no more leaves than
    /// the current realization target: items beyond the target will not be
    /// realized this pass, so measuring them would be wasted work.
    pub fn estimated_hierarchy_width(&self) -> f32 {
        if !self.rows.has_model() || self.rows.item_count() == 0 {
            return 0.0;
        }
        let mut acc = LevelWidthAccumulator::default();
        self.record_subtree_widths(None, self.state.items_to_realize(), &mut acc);
        acc.total_width()
    }

    /// Leaf rows the current pass will realize, in visit order.
    ///
    /// Used by the column estimator to measure body-cell content widths
    /// against exactly the rows that will be on screen.
    pub fn visible_leaves(&self) -> Vec<RH::Item> {
        let mut leaves = Vec::new();
        if self.rows.has_model() {
            self.collect_visible_leaves(None, self.state.items_to_realize(), &mut leaves);
        }
        leaves
    }

    fn record_subtree_widths(
        &self,
        parent: Option<&RH::Item>,
        budget: usize,
        acc: &mut LevelWidthAccumulator,
    ) {
        let start = self.rows.first_visible_child(parent);
        for index in start..self.rows.child_count(parent) {
            if acc.leaf_count() >= budget {
                return;
            }
            let Some(item) = self.rows.child_at(parent, index) else {
                return;
            };
            let width = self.rows.estimated_header_width(&item);
            let level = self.rows.level_of(&item);
            if self.rows.is_leaf(&item) {
                acc.record_leaf(level, width);
            } else {
                acc.record_group(level, width);
                self.record_subtree_widths(Some(&item), budget, acc);
            }
        }
    }

    fn collect_visible_leaves(
        &self,
        parent: Option<&RH::Item>,
        budget: usize,
        leaves: &mut Vec<RH::Item>,
    ) {
        let start = self.rows.first_visible_child(parent);
        for index in start..self.rows.child_count(parent) {
            if leaves.len() >= budget {
                return;
            }
            let Some(item) = self.rows.child_at(parent, index) else {
                return;
            };
            if self.rows.is_leaf(&item) {
                leaves.push(item);
            } else {
                self.collect_visible_leaves(Some(&item), budget, leaves);
            }
        }
    }
}

impl<RH, CG> RealizationEstimator for RowRealizationEstimator<RH, CG>
where
    RH: AxisHierarchy,
    CG: AxisGeometry,
{
    fn state(&self) -> &EstimatorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut EstimatorState {
        &mut self.state
    }

    fn is_estimating(&self) -> bool {
        self.rows.is_measuring() && !self.rows.is_rendered()
    }

    fn has_unrealized_items(&self) -> bool {
        self.rows.first_visible_index() + self.state.realized_leaves() < self.rows.item_count()
    }

    fn estimate_items_to_realize(&mut self) -> usize {
        if !self.rows.has_model() || self.rows.item_count() == 0 {
            return 0;
        }

        if self.rows.alignment().is_end() {
            // Backward fill covers everything from the scroll anchor to the
            // end, plus one for the partially scrolled edge row.
            return self
                .rows
                .item_count()
                .saturating_sub(self.rows.first_visible_index())
                + 1;
        }

        let item_size = self.rows.estimated_item_size() * self.state.adjustment_factor();
        if item_size <= 0.0 {
            log::warn!("non-positive estimated row size {item_size}; realizing nothing");
            return 0;
        }

        // Rows needed to cover the fill height, including the fraction of
        // the edge row scrolled out of view, minus the rows consumed by the
        // column hierarchy's own header levels, plus one for overlap.
        let covering = (self.rows.contextual_width_to_fill() / item_size
            + self.rows.scroll_offset_fraction())
        .ceil() as i64;
        let header_rows = self.columns.hierarchy_depth() as i64;
        (covering - header_rows + 1).max(0) as usize
    }

    fn compute_size_adjustment(&self, grid_contextual_width: f32) -> f32 {
        let covered = (self.state.realized_leaves() as f32 - self.rows.scroll_offset_fraction())
            * self.rows.estimated_item_size();
        if covered <= 0.0 {
            return 1.0;
        }
        grid_contextual_width / covered
    }
}
