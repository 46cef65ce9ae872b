//! Per-level width tallies for the row-hierarchy width walk.

use smallvec::SmallVec;

/// Inline capacity for the per-level table. Hierarchies deeper than 8
/// levels are rare; deeper ones just spill to the heap.
type LevelVec = SmallVec<[LevelWidth; 8]>;

/// Running maxima for one hierarchy level.
#[derive(Clone, Copy, Debug, Default)]
struct LevelWidth {
    max_leaf_width: f32,
    max_group_width: f32,
}

/// Accumulates per-level maximum header widths during a single recursive
/// walk over the row hierarchy, then sums them into a total width estimate.
///
/// At each level a nonzero group-header width supersedes the leaf width:
/// group headers span their descendants and dictate the space reserved for
/// that depth. The leaf counter doubles as the walk's early-termination
/// budget. One accumulator lives for one walk and is then discarded.
#[derive(Debug, Default)]
pub struct LevelWidthAccumulator {
    levels: LevelVec,
    leaf_count: usize,
}

impl LevelWidthAccumulator {
    /// Records a leaf header's width at the given level and counts the leaf.
    pub fn record_leaf(&mut self, level: usize, width: f32) {
        let entry = self.entry(level);
        entry.max_leaf_width = entry.max_leaf_width.max(width);
        self.leaf_count += 1;
    }

    /// Records a group header's width at the given level.
    pub fn record_group(&mut self, level: usize, width: f32) {
        let entry = self.entry(level);
        entry.max_group_width = entry.max_group_width.max(width);
    }

    /// Leaves recorded so far; compared against the walk budget.
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Sums per-level contributions: group width when nonzero, else leaf
    /// width.
    pub fn total_width(&self) -> f32 {
        self.levels
            .iter()
            .map(|level| {
                if level.max_group_width > 0.0 {
                    level.max_group_width
                } else {
                    level.max_leaf_width
                }
            })
            .sum()
    }

    fn entry(&mut self, level: usize) -> &mut LevelWidth {
        if self.levels.len() <= level {
            self.levels.resize(level + 1, LevelWidth::default());
        }
        &mut self.levels[level]
    }
}
