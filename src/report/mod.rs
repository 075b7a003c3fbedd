//! Report generation: markdown builder, text cleanup, source handling,
//! block parsing, page layout, and PDF rendering.

pub mod blocks;
pub mod builder;
pub mod layout;
pub mod pdf;
pub mod sanitize;
pub mod sources;

pub use blocks::{parse_blocks, Block};
pub use builder::build_report;
pub use pdf::{render_dossier_pdf, render_safety_pays_pdf};
pub use sanitize::sanitize_text;
pub use sources::{filter_sources, SourceRef};
