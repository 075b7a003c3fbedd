//! Core data model: the dossier record and the static injury cost table.

pub mod dossier;
pub mod injury_costs;

pub use dossier::{
    CanadaSafetyInformation, Dossier, DossierPatch, InjuryBreakdown, PriorityLevel,
    ProvincialRegulation, RegulatorySearchLink, SafetyPaysCalculation, SalesOpportunity,
    SuggestedPartnership, MODULE_VOCABULARY,
};
pub use injury_costs::{lookup as lookup_injury_cost, InjuryCostEntry, INJURY_COSTS};
