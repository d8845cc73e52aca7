pub mod axis;
pub mod det;

pub use axis::Axis;
pub use det::{cofactor, det3, det3_replacing_row};
