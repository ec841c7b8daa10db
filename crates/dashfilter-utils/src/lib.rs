//! Small helpers shared by the dashfilter crates: display-name casing and
//! random suffixes for ad hoc filter keys.

pub mod case;
pub mod suffix;

pub use case::title_case;
pub use suffix::random_suffix;
