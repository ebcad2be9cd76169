//! Dataset provider: the four summary tables, built once per process.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::{
    FraudSummary, GenderSummary, ProcedureRow, ProcedureSummary, RegionRow, RegionSummary,
};

/// Regions in source order with their total claim counts.
const REGIONS: [(&str, u64); 13] = [
    ("Qassim", 1_539_672),
    ("Jazan", 1_538_634),
    ("Tabuk", 1_540_058),
    ("Najran", 1_541_848),
    ("Madinah", 1_536_090),
    ("Hail", 1_535_090),
    ("Eastern Province", 1_536_420),
    ("Al Bahah", 1_537_662),
    ("Asir", 1_537_598),
    ("Makkah", 1_538_714),
    ("Al Jawf", 1_540_722),
    ("Northern Borders", 1_537_658),
    ("Riyadh", 1_539_834),
];

/// Procedures in source order: (name, times performed, average paid).
const PROCEDURES: [(&str, u64, f64); 15] = [
    ("Heart Bypass Surgery", 1_334_078, 99_050.94),
    ("Knee Replacement", 1_332_746, 49_514.44),
    ("Appendectomy", 1_332_728, 18_568.68),
    ("Childbirth (C-Section)", 1_330_344, 18_565.47),
    ("Cataract Surgery", 1_336_610, 12_380.88),
    ("Childbirth (Normal)", 1_331_676, 9_906.71),
    ("Tonsillectomy", 1_335_894, 9_900.06),
    ("Colonoscopy", 1_337_294, 3_713.75),
    ("MRI Scan", 1_331_902, 2_475.34),
    ("CT Scan", 1_335_706, 1_857.09),
    ("Emergency Room Visit", 1_331_704, 1_237.76),
    ("Prescription Medication", 1_331_856, 743.04),
    ("Annual Checkup", 1_332_296, 618.62),
    ("Physical Therapy (per session)", 1_333_486, 495.06),
    ("Dental Cleaning", 1_331_680, 371.37),
];

static DATASETS: OnceLock<Datasets> = OnceLock::new();

/// The four immutable tables backing every dashboard page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datasets {
    /// Claims split by fraud indicator.
    pub fraud: FraudSummary,
    /// Claims split by gender.
    pub gender: GenderSummary,
    /// Claims per region.
    pub regions: RegionSummary,
    /// Procedure volumes and costs.
    pub procedures: ProcedureSummary,
}

impl Datasets {
    /// Shared tables, constructed on first access.
    pub fn get() -> &'static Datasets {
        DATASETS.get_or_init(|| {
            log::debug!("Building claim summary datasets");
            Self::build()
        })
    }

    /// Construct a fresh, uncached copy of the tables.
    pub fn build() -> Self {
        let regions = REGIONS
            .iter()
            .map(|&(region, total_claims)| RegionRow {
                region: region.to_string(),
                total_claims,
                fraud_claims: 0,
                fraud_percentage: 0.0,
            })
            .collect();

        let procedures = PROCEDURES
            .iter()
            .map(|&(procedure, total, avg_paid)| ProcedureRow {
                procedure: procedure.to_string(),
                total,
                avg_paid,
            })
            .collect();

        Self {
            fraud: FraudSummary::new((1.000_011_811_3, 18_006_786), (1.479_761_550_4, 1_993_214)),
            gender: GenderSummary::new(
                (10_002_860, 14_576.47, 15_274.41),
                (9_997_140, 14_618.33, 15_316.03),
            ),
            regions,
            procedures,
        }
    }
}
