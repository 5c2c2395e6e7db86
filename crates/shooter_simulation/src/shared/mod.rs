//! Shared domain — cross-cutting helpers
//!
//! Содержит то, что используют несколько доменов:
//! - interp: frame-rate independent сглаживание (interp_to, map_range_clamped)
//! - curves: keyframe кривые (Z/scale интерполяции, pulse, slide)

pub mod curves;
pub mod interp;

pub use curves::*;
pub use interp::*;
