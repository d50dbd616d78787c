//! Output-only observation of Trek populations.
//!
//! Nothing in this crate feeds back into the simulation. [`sample`]
//! reports the per-walker mass range a renderer needs to normalise its
//! colour scale, [`ObservabilityTap`] remembers the latest sample, and
//! [`CellMassField`] flattens a population into one value per cell.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod field;
pub mod range;
pub mod tap;

pub use field::CellMassField;
pub use range::{sample, MassRange};
pub use tap::ObservabilityTap;
