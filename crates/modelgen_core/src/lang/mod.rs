//! Target and source vocabulary registries.
//!
//! Callers work with stable IDs (e.g. [`primitives::PrimitiveId`]) and look up spellings through the
//! registry tables instead of scattering string comparisons across the generator.
//!
//! ## Examples
//! ```rust
//! use modelgen_core::lang::primitives::{self, PrimitiveId};
//!
//! assert_eq!(primitives::from_str("DateTime"), Some(PrimitiveId::DateTime));
//! assert_eq!(primitives::rust_type(PrimitiveId::Long), "i64");
//! ```

pub mod primitives;
pub mod rust_keywords;
