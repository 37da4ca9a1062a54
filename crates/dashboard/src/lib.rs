//! # Stockscope Dashboard
//!
//! The presentation layer. [`render`] runs a complete fetch, compute and
//! render cycle for one ticker and returns a [`ViewModel`]; surfaces (the CLI
//! and the web server) only draw it.
//!
//! - `render`: explicit request/response entry point, no retained state.
//! - `view`: the serializable view model.
//! - `terminal`: text rendering for the command line.

pub mod format;
pub mod render;
pub mod terminal;
pub mod view;

pub use format::format_pct;
pub use render::{build_dashboard, render, DashboardSettings};
pub use terminal::render_text;
pub use view::{Dashboard, ViewModel};
