//! verrux-web: JSON API for Verrux
//! Provides:
//!   - Single treatment prediction
//!   - Ranking of every known treatment method
//!   - Catalog of supported input categories

pub mod router;
pub mod handlers;
pub mod state;
