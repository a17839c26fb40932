//! Vector fields for Fathom.
//!
//! [`Field`] is the root of the hierarchy. [`VectorField2`] and
//! [`VectorField3`] add point sampling plus divergence and curl, which
//! default to zero for fields that do not override them.
//!
//! Concrete fields:
//!
//! - [`CustomVectorField2`]/[`CustomVectorField3`]: user-supplied sample
//!   function, with optional analytic divergence and curl. Missing
//!   derivatives are computed by [`FiniteDifference`].
//! - [`ConstantVectorField2`]/[`ConstantVectorField3`]: one value everywhere.
//!
//! All fields are `Send + Sync` and may be shared as [`VectorField3Ptr`]
//! across the workers of a parallel grid iteration.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constant;
pub mod custom;
pub mod differencing;
pub mod error;
pub mod field;

pub use constant::{ConstantVectorField2, ConstantVectorField3};
pub use custom::{
    Capabilities, CustomVectorField2, CustomVectorField2Builder, CustomVectorField3,
    CustomVectorField3Builder, ScalarFn2, ScalarFn3,
};
pub use differencing::{FiniteDifference, DEFAULT_DERIVATIVE_RESOLUTION};
pub use error::FieldError;
pub use field::{
    Field, VectorField2, VectorField2Ptr, VectorField3, VectorField3Ptr, VectorSampler2,
    VectorSampler3,
};
