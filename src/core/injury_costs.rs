//! OSHA Safety Pays injury cost reference table.
//!
//! Direct and indirect costs are whole dollars, loaded once and never
//! mutated. A few entries carry an indirect cost of zero in the upstream
//! dataset; they are preserved verbatim rather than backfilled with a
//! multiplier.

/// One row of the injury cost table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InjuryCostEntry {
    pub label: &'static str,
    pub direct_cost: u64,
    pub indirect_cost: u64,
}

impl InjuryCostEntry {
    /// Combined cost of a single case.
    pub fn cost_per_case(&self) -> u64 {
        self.direct_cost + self.indirect_cost
    }
}

pub static INJURY_COSTS: &[InjuryCostEntry] = &[
    entry("AIDS", 385_232, 816_560),
    entry("Amputation", 48_637, 103_109),
    entry("Angina Pectoris", 37_137, 78_721),
    entry("Asbestosis", 36_252, 76_846),
    entry("Asphyxiation", 148_822, 315_487),
    entry("Burn", 2_920, 6_188),
    entry("Cancer", 50_551, 107_167),
    entry("Carpal Tunnel Syndrome", 13_277, 28_141),
    entry("Concussion", 4_008, 8_497),
    entry("Contagious Disease", 9_728, 20_621),
    entry("Contusion", 2_504, 5_308),
    entry("Crushing", 5_658, 11_993),
    entry("Cut/Laceration", 1_689, 3_579),
    entry("Dermatitis", 973, 2_063),
    entry("Dislocation", 3_546, 7_517),
    entry("Dust Disease, NOC", 30_951, 65_618),
    entry("Electric Shock", 55_595, 117_842),
    entry("Enucleation (remove ex: tumor, eye, etc.)", 20_019, 42_437),
    entry("Foreign Body", 924, 1_959),
    entry("Fracture", 7_531, 15_968),
    entry("Freezing", 4_588, 9_725),
    entry("Hearing Loss or Impairment (traumatic only)", 7_562, 16_034),
    entry(
        "Hearing Loss (occupational disease or cumulative injury)",
        23_566,
        49_956,
    ),
    entry("Heat Prostration", 5_437, 0),
    entry("Heat burn", 3_176, 6_733),
    entry("Hernia", 8_247, 17_485),
    entry("Infection", 6_013, 12_747),
    entry("Inflammation", 3_239, 6_868),
    entry("Mental Disorder", 20_774, 44_037),
    entry("Mental Stress", 11_399, 24_166),
    entry(
        "Multiple Injuries Including Both Physical and Psychological",
        25_188,
        53_396,
    ),
    entry("Multiple Physical Injuries Only", 16_974, 35_984),
    entry("Myocardial Infarction (heart attack)", 58_349, 123_699),
    entry("No Physical Injury", 2_789, 5_913),
    entry("Poisoning - Chemical (other than metals)", 2_548, 5_402),
    entry("Poisoning - General (not OD or cumulative injury)", 3_059, 0),
    entry("Poisoning - Metal", 2_746, 0),
    entry("Puncture", 1_516, 3_213),
    entry("Radiation", 10_131, 21_476),
    entry(
        "Respiratory Disorders (gases, fumes, chemicals, etc.)",
        34_923,
        74_021,
    ),
    entry("Rupture", 4_286, 9_085),
    entry("Severance", 2_504, 5_308),
    entry("Silicosis", 37_842, 80_217),
    entry("Soreness/pain", 3_239, 6_868),
    entry("Sprain/strain", 3_239, 6_868),
    entry("Syncope", 5_739, 0),
    entry("Tendonitis", 3_239, 6_868),
    entry("Vascular", 4_792, 10_159),
    entry("Vision Loss", 20_388, 43_218),
    entry("All Other Cumulative Injury, NOC", 20_774, 0),
    entry("All Other Occupational Disease", 36_252, 76_846),
    entry("All Other Specific Injuries, NOC", 4_286, 9_085),
];

const fn entry(label: &'static str, direct_cost: u64, indirect_cost: u64) -> InjuryCostEntry {
    InjuryCostEntry {
        label,
        direct_cost,
        indirect_cost,
    }
}

/// Look up a table entry by its exact label.
pub fn lookup(label: &str) -> Option<&'static InjuryCostEntry> {
    INJURY_COSTS.iter().find(|e| e.label == label)
}
