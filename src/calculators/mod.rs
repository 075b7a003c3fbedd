//! Financial-formula calculators: TRIR and OSHA Safety Pays.

pub mod safety_pays;
pub mod trir;

pub use safety_pays::{SafetyPaysSession, SelectedInjury};
pub use trir::calculate as calculate_trir;
