//! # tagprep-columns
//!
//! Read-only columnar views over caller-owned event storage.
//!
//! Raw event data arrives as flat per-object arrays. This crate wraps those
//! arrays in typed views that validate lengths once at construction and are
//! then indexed without further checks on the caller side:
//! - [`ColumnView`]: a column of `T` over owned or borrowed storage
//! - [`FourVecView`]: a four-vector column over component buffers or
//!   prebuilt vectors
//! - [`ScalarColumn`] / [`ExtraColumns`]: named supplemental variables
//!   normalized to the float-only contract the tagging engines expect

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod fourvec;
pub mod supplemental;
pub mod view;

pub use fourvec::FourVecView;
pub use supplemental::{ExtraColumns, ScalarColumn};
pub use view::ColumnView;
