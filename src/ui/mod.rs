//! Terminal rendering.
//!
//! Each view module renders from the cached dashboard projections; no
//! view recomputes series or statistics itself.

pub mod charts;
pub mod common;
pub mod overview;
pub mod processes;
pub mod theme;

pub use theme::Theme;
