//! Alignment of the realized range within a scrollable axis

/// How an axis fills its viewport from the current scroll position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisAlignment {
    /// Fill forward from the first item at the scroll anchor.
    #[default]
    Start,
    /// Fill backward from the last item (e.g. bottom-anchored scroll).
    /// Realization covers everything from the scroll anchor to the end.
    End,
}

impl AxisAlignment {
    /// Returns true for the aligned-to-end (backward fill) mode.
    #[inline]
    pub fn is_end(self) -> bool {
        matches!(self, AxisAlignment::End)
    }
}
