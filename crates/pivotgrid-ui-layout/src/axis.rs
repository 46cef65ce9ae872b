/// The two dimensions of the grid, each realized independently.
///
/// The row axis fills the viewport vertically with row headers and body
/// rows; the column axis fills it horizontally. Each axis owns its own
/// realization estimator, and the two estimators consult each other through
/// `cross_axis` queries (the column axis must know how much horizontal space
/// the row hierarchy consumes, and vice versa at session boundaries).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// The row dimension (vertical fill).
    Rows,
    /// The column dimension (horizontal fill).
    Columns,
}

impl Axis {
    /// Returns the opposite axis.
    #[inline]
    pub fn cross_axis(self) -> Self {
        match self {
            Axis::Rows => Axis::Columns,
            Axis::Columns => Axis::Rows,
        }
    }

    /// Returns true if this is the row axis.
    #[inline]
    pub fn is_rows(self) -> bool {
        matches!(self, Axis::Rows)
    }

    /// Returns true if this is the column axis.
    #[inline]
    pub fn is_columns(self) -> bool {
        matches!(self, Axis::Columns)
    }
}
