//! Shared per-axis realization state machine.
//!
//! Both axes run the same iteration lifecycle: estimate a target at the
//! start of a rendering iteration, count realized leaves as the host
//! reports them, and multiplicatively correct the estimate at the end of an
//! iteration that under- or over-filled the viewport. Only the estimation
//! and correction formulas differ per axis.

/// Hard cap on a single pass's realization target.
///
/// A pathological configuration (near-zero estimated item size, or an
/// adjustment factor driven toward zero by degenerate feedback) could
/// otherwise request an absurd number of items in one pass. The cap is far
/// above any sane viewport; hitting it is logged as host misuse.
pub(crate) const MAX_ITEMS_TO_REALIZE_SAFETY: usize = 10_000;

/// Mutable per-axis estimation state.
///
/// Created once per axis and reused across rendering sessions; lifecycle
/// points reset individual fields instead of recreating the value.
#[derive(Debug, Clone)]
pub struct EstimatorState {
    /// Multiplicative correction accumulated across rendering iterations.
    /// 1.0 at the start of every session.
    adjustment_factor: f32,
    /// Target leaf count for the current pass.
    items_to_realize_count: usize,
    /// Running estimate of contextual space consumed along the axis.
    items_estimated_contextual_width: f32,
    /// Leaves the host has reported realized in the current iteration.
    realized_leaves_count: usize,
}

impl Default for EstimatorState {
    fn default() -> Self {
        Self {
            adjustment_factor: 1.0,
            items_to_realize_count: 0,
            items_estimated_contextual_width: 0.0,
            realized_leaves_count: 0,
        }
    }
}

impl EstimatorState {
    /// Current multiplicative correction factor.
    #[inline]
    pub fn adjustment_factor(&self) -> f32 {
        self.adjustment_factor
    }

    /// Target leaf count for the current pass.
    #[inline]
    pub fn items_to_realize(&self) -> usize {
        self.items_to_realize_count
    }

    /// Leaves realized so far in the current iteration.
    #[inline]
    pub fn realized_leaves(&self) -> usize {
        self.realized_leaves_count
    }

    /// Running estimate of contextual space consumed along the axis.
    #[inline]
    pub fn estimated_contextual_width(&self) -> f32 {
        self.items_estimated_contextual_width
    }

    /// True while fewer leaves have been realized than the current target.
    #[inline]
    pub fn needs_to_realize(&self) -> bool {
        self.realized_leaves_count < self.items_to_realize_count
    }

    /// Installs a freshly estimated target, clamped to the safety cap.
    pub fn set_target(&mut self, target: usize) {
        if target > MAX_ITEMS_TO_REALIZE_SAFETY {
            log::warn!(
                "realization target {} exceeds safety cap {}; clamping. \
                 Check the axis item size estimate.",
                target,
                MAX_ITEMS_TO_REALIZE_SAFETY
            );
        }
        self.items_to_realize_count = target.min(MAX_ITEMS_TO_REALIZE_SAFETY);
    }

    /// Resets the realized-leaf counter at the start of an iteration.
    pub fn reset_realized(&mut self) {
        self.realized_leaves_count = 0;
    }

    /// Records one realized leaf reported by the host.
    pub fn record_realized_leaf(&mut self) {
        debug_assert!(
            self.realized_leaves_count < self.items_to_realize_count,
            "host realized more leaves ({}) than the current target ({})",
            self.realized_leaves_count + 1,
            self.items_to_realize_count
        );
        self.realized_leaves_count += 1;
    }

    /// Resets the running contextual-width estimate before a new estimate.
    pub fn reset_estimated_contextual_width(&mut self) {
        self.items_estimated_contextual_width = 0.0;
    }

    /// Adds one item's contribution to the contextual-width estimate.
    pub fn add_estimated_contextual_width(&mut self, contribution: f32) {
        self.items_estimated_contextual_width += contribution;
    }

    /// Applies a correction ratio to the adjustment factor.
    ///
    /// The ratio must be finite and positive; anything else comes from a
    /// degenerate denominator (or host garbage) and is skipped so one bad
    /// iteration cannot poison all subsequent estimates.
    pub fn apply_adjustment(&mut self, ratio: f32) {
        if !ratio.is_finite() || ratio <= 0.0 {
            log::warn!("skipping non-positive or non-finite size adjustment ratio {ratio}");
            return;
        }
        self.adjustment_factor *= ratio;
    }

    /// Restores the adjustment factor at the end of a rendering session.
    /// Corrections never persist across independent sessions.
    pub fn reset_adjustment(&mut self) {
        self.adjustment_factor = 1.0;
    }
}

/// Per-axis realization estimator lifecycle.
///
/// The shared iteration/session mechanics are provided methods; each axis
/// supplies only its estimation formula, its correction formula, and the
/// two axis-status predicates. Supplying them is a compile-time requirement,
/// so there is no "abstract method called on base" failure mode at runtime.
///
/// The host must call the lifecycle in order: [`begin_iteration`] before any
/// [`header_realized`] for that iteration, then [`end_iteration`], and
/// [`end_session`] after the session's final iteration.
///
/// [`begin_iteration`]: RealizationEstimator::begin_iteration
/// [`header_realized`]: RealizationEstimator::header_realized
/// [`end_iteration`]: RealizationEstimator::end_iteration
/// [`end_session`]: RealizationEstimator::end_session
pub trait RealizationEstimator {
    /// Shared estimation state for this axis.
    fn state(&self) -> &EstimatorState;

    /// Mutable access to the shared estimation state.
    fn state_mut(&mut self) -> &mut EstimatorState;

    /// Whether the axis is in a measuring state and not yet fully rendered,
    /// i.e. a new rendering iteration should recompute the target.
    fn is_estimating(&self) -> bool;

    /// Whether items beyond those already realized remain on the axis.
    fn has_unrealized_items(&self) -> bool;

    /// Axis-specific target estimation (recomputed each iteration while
    /// estimating). Idempotent for unchanged inputs.
    fn estimate_items_to_realize(&mut self) -> usize;

    /// Axis-specific correction ratio for an iteration that did not fill
    /// the viewport. Ratios above 1 mean the estimate under-filled.
    fn compute_size_adjustment(&self, grid_contextual_width: f32) -> f32;

    /// Starts a rendering iteration: recomputes the target while the axis
    /// is estimating, and always resets the realized-leaf counter.
    fn begin_iteration(&mut self) {
        if self.is_estimating() {
            let target = self.estimate_items_to_realize();
            self.state_mut().set_target(target);
        }
        self.state_mut().reset_realized();
    }

    /// Records one header the host realized. Only leaves count toward the
    /// fill target; group headers do not consume a leaf slot.
    fn header_realized(&mut self, is_leaf: bool) {
        if is_leaf {
            self.state_mut().record_realized_leaf();
        }
    }

    /// Ends a rendering iteration. When the viewport was not filled and
    /// items remain, folds the axis's correction ratio into the adjustment
    /// factor so the next iteration's estimate converges toward exact fill.
    fn end_iteration(&mut self, filled_contextual_width: f32, filled: bool) {
        if !filled && self.has_unrealized_items() {
            let ratio = self.compute_size_adjustment(filled_contextual_width);
            self.state_mut().apply_adjustment(ratio);
        }
    }

    /// Ends a rendering session, restoring the adjustment factor to 1.0.
    fn end_session(&mut self) {
        self.state_mut().reset_adjustment();
    }

    /// True while the host should keep realizing items for this iteration.
    fn needs_to_realize(&self) -> bool {
        self.state().needs_to_realize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal estimator with canned axis answers, for exercising the
    /// provided lifecycle methods in isolation.
    struct StubEstimator {
        state: EstimatorState,
        estimating: bool,
        remaining: bool,
        target: usize,
        ratio: f32,
    }

    impl StubEstimator {
        fn new(target: usize, ratio: f32) -> Self {
            Self {
                state: EstimatorState::default(),
                estimating: true,
                remaining: true,
                target,
                ratio,
            }
        }
    }

    impl RealizationEstimator for StubEstimator {
        fn state(&self) -> &EstimatorState {
            &self.state
        }
        fn state_mut(&mut self) -> &mut EstimatorState {
            &mut self.state
        }
        fn is_estimating(&self) -> bool {
            self.estimating
        }
        fn has_unrealized_items(&self) -> bool {
            self.remaining
        }
        fn estimate_items_to_realize(&mut self) -> usize {
            self.target
        }
        fn compute_size_adjustment(&self, _grid_contextual_width: f32) -> f32 {
            self.ratio
        }
    }

    #[test]
    fn test_begin_iteration_sets_target_and_resets_realized() {
        let mut estimator = StubEstimator::new(3, 1.0);
        estimator.begin_iteration();

        assert_eq!(estimator.state().items_to_realize(), 3);
        assert_eq!(estimator.state().realized_leaves(), 0);
        assert!(estimator.needs_to_realize());
    }

    #[test]
    fn test_needs_to_realize_flips_after_exact_leaf_count() {
        let mut estimator = StubEstimator::new(2, 1.0);
        estimator.begin_iteration();

        estimator.header_realized(false); // group header: does not count
        assert!(estimator.needs_to_realize());
        estimator.header_realized(true);
        assert!(estimator.needs_to_realize());
        estimator.header_realized(true);
        assert!(!estimator.needs_to_realize());
    }

    #[test]
    fn test_begin_iteration_skips_estimate_when_not_estimating() {
        let mut estimator = StubEstimator::new(7, 1.0);
        estimator.estimating = false;
        estimator.begin_iteration();

        assert_eq!(estimator.state().items_to_realize(), 0);
        assert!(!estimator.needs_to_realize());
    }

    #[test]
    fn test_unfilled_iteration_multiplies_adjustment_factor() {
        let mut estimator = StubEstimator::new(4, 1.25);
        estimator.begin_iteration();
        estimator.end_iteration(200.0, false);
        assert_eq!(estimator.state().adjustment_factor(), 1.25);

        // A second unfilled iteration compounds the factor.
        estimator.begin_iteration();
        estimator.end_iteration(200.0, false);
        assert_eq!(estimator.state().adjustment_factor(), 1.25 * 1.25);
    }

    #[test]
    fn test_filled_iteration_leaves_factor_unchanged() {
        let mut estimator = StubEstimator::new(4, 2.0);
        estimator.begin_iteration();
        estimator.end_iteration(200.0, true);
        assert_eq!(estimator.state().adjustment_factor(), 1.0);
    }

    #[test]
    fn test_exhausted_axis_skips_correction() {
        let mut estimator = StubEstimator::new(4, 2.0);
        estimator.remaining = false;
        estimator.begin_iteration();
        estimator.end_iteration(200.0, false);
        assert_eq!(estimator.state().adjustment_factor(), 1.0);
    }

    #[test]
    fn test_end_session_restores_factor_exactly() {
        let mut estimator = StubEstimator::new(4, 1.3);
        for _ in 0..5 {
            estimator.begin_iteration();
            estimator.end_iteration(100.0, false);
        }
        assert!(estimator.state().adjustment_factor() > 1.0);

        estimator.end_session();
        assert_eq!(estimator.state().adjustment_factor(), 1.0);
    }

    #[test]
    fn test_degenerate_ratio_is_skipped() {
        let mut state = EstimatorState::default();
        state.apply_adjustment(0.0);
        state.apply_adjustment(-2.0);
        state.apply_adjustment(f32::NAN);
        state.apply_adjustment(f32::INFINITY);
        assert_eq!(state.adjustment_factor(), 1.0);

        state.apply_adjustment(1.5);
        assert_eq!(state.adjustment_factor(), 1.5);
    }

    #[test]
    fn test_target_safety_cap() {
        let mut state = EstimatorState::default();
        state.set_target(usize::MAX);
        assert_eq!(state.items_to_realize(), MAX_ITEMS_TO_REALIZE_SAFETY);
    }
}
