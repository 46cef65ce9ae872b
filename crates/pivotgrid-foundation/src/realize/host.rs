//! Host capability traits for realization estimation.
//!
//! The estimator never owns grid data: the hosting layout manager supplies
//! everything it needs through these read-only query traits. Implementations
//! are expected to be cheap per call; the estimator may issue many queries
//! per rendering iteration.

use pivotgrid_ui_layout::AxisAlignment;

/// Read-only geometry and scroll queries for one axis.
///
/// Dyn-safe on purpose: the row estimator only needs the column axis through
/// this trait (for its header-hierarchy depth), without caring about the
/// column axis's item type.
pub trait AxisGeometry {
    /// Whether the axis has a backing model at all.
    fn has_model(&self) -> bool;

    /// Total number of realizable items along the axis.
    fn item_count(&self) -> usize;

    /// Viewport space along this axis that realization must fill.
    fn contextual_width_to_fill(&self) -> f32;

    /// Forward fill from the scroll anchor, or backward from the last item.
    fn alignment(&self) -> AxisAlignment;

    /// Estimated main-axis size of a single item (the estimated row height
    /// for the row axis). Column items are content-measured instead.
    fn estimated_item_size(&self) -> f32;

    /// Index of the first (partially) visible item — the integer part of the
    /// scroll offset.
    fn first_visible_index(&self) -> usize;

    /// Fraction of the first visible item scrolled out of view — the
    /// fractional part of the scroll offset.
    fn scroll_offset_fraction(&self) -> f32;

    /// Fraction of the partially-scrolled edge item that is actually
    /// visible. 1.0 when the edge item is fully visible.
    fn visible_size_ratio(&self) -> f32;

    /// Number of header levels in this axis's hierarchy.
    fn hierarchy_depth(&self) -> usize;

    /// Whether the axis is still measuring, i.e. estimates should be
    /// recomputed at the start of each rendering iteration.
    fn is_measuring(&self) -> bool;

    /// Whether the axis has finished rendering. Once true, the peer axis
    /// prefers [`AxisGeometry::rendered_contextual_size`] over estimates.
    fn is_rendered(&self) -> bool;

    /// Actual contextual size consumed by this axis's hierarchy once
    /// rendered. Only meaningful when [`AxisGeometry::is_rendered`] is true.
    fn rendered_contextual_size(&self) -> f32;
}

/// Hierarchy navigation and header-label measurement for one axis.
///
/// Items are opaque handles: the estimator never inspects them except
/// through these queries. `parent == None` addresses the root level.
pub trait AxisHierarchy: AxisGeometry {
    /// Opaque handle to a hierarchy item, owned by the host.
    type Item: Copy;

    /// Number of children of `parent` (root items when `None`).
    fn child_count(&self, parent: Option<&Self::Item>) -> usize;

    /// Child of `parent` at `index`, if in range.
    fn child_at(&self, parent: Option<&Self::Item>, index: usize) -> Option<Self::Item>;

    /// Index of the first visible child of `parent`, accounting for the
    /// current scroll position.
    fn first_visible_child(&self, parent: Option<&Self::Item>) -> usize;

    /// Whether the item is a terminal item bound to data, as opposed to a
    /// group header spanning descendants.
    fn is_leaf(&self, item: &Self::Item) -> bool;

    /// Hierarchy depth of the item (0 for root items).
    fn level_of(&self, item: &Self::Item) -> usize;

    /// Estimated width of the item's formatted header label. This is the
    /// binder query: the host formats the label and measures it.
    fn estimated_header_width(&self, item: &Self::Item) -> f32;
}

/// Content measurement for a row×column intersection.
///
/// This is the body-cell side of the binder capability. Shared between both
/// estimators; the host keeps it alive for the whole layout session.
pub trait CellMeasure<R, C> {
    /// Estimated content width of the cell at the given intersection.
    fn estimated_cell_width(&self, row: &R, column: &C) -> f32;
}
