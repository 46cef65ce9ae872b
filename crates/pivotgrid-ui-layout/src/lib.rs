//! Layout vocabulary shared across PivotGrid crates

mod alignment;
mod axis;

pub use alignment::*;
pub use axis::*;

pub mod prelude {
    pub use crate::alignment::AxisAlignment;
    pub use crate::axis::Axis;
}
