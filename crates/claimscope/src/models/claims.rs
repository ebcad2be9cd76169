//! Row types and column selectors for the four claim summary tables.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Row, Table};
use crate::error::DashboardError;

/// Binary fraud flag used to partition the fraud summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FraudIndicator {
    /// Indicator 0.
    Normal = 0,
    /// Indicator 1.
    Fraudulent = 1,
}

impl FraudIndicator {
    /// Raw 0/1 flag.
    pub fn flag(self) -> u8 {
        self as u8
    }

    /// Short display label.
    pub fn label(self) -> &'static str {
        match self {
            FraudIndicator::Normal => "Normal",
            FraudIndicator::Fraudulent => "Fraud",
        }
    }
}

/// Gender label of the gender summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    /// Female claimants.
    Female,
    /// Male claimants.
    Male,
}

impl Gender {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Declares a column selector enum with its upper-case source names.
macro_rules! columns {
    ($(#[$meta:meta])* $name:ident, $table:literal { $($variant:ident => $col:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[doc = concat!("`", $col, "`")]
                #[serde(rename = $col)]
                $variant,
            )+
        }

        impl $name {
            /// All columns in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Upper-case column name.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $col,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = DashboardError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($col => Ok($name::$variant),)+
                    other => Err(DashboardError::UnknownColumn {
                        table: $table,
                        column: other.to_string(),
                    }),
                }
            }
        }
    };
}

columns!(
    /// Numeric columns of [`FraudRow`].
    FraudColumn, "fraud" {
        FraudIndicator => "FRAUD_INDICATOR",
        AvgPaymentRatio => "AVG_PAYMENT_RATIO",
        Total => "TOTAL",
    }
);

columns!(
    /// Numeric columns of [`GenderRow`].
    GenderColumn, "gender" {
        Count => "COUNT",
        AvgClaim => "AVG_CLAIM",
        AvgPaid => "AVG_PAID",
    }
);

columns!(
    /// Numeric columns of [`RegionRow`].
    RegionColumn, "region" {
        TotalClaims => "TOTAL_CLAIMS",
        FraudClaims => "FRAUD_CLAIMS",
        FraudPercentage => "FRAUD_PERCENTAGE",
    }
);

columns!(
    /// Numeric columns of [`ProcedureRow`].
    ProcedureColumn, "procedure" {
        Total => "TOTAL",
        AvgPaid => "AVG_PAID",
    }
);

/// Claims aggregated by fraud indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudRow {
    /// Group key.
    pub fraud_indicator: FraudIndicator,
    /// Mean of paid / claimed over the group.
    pub avg_payment_ratio: f64,
    /// Number of claims in the group.
    pub total: u64,
}

impl Row for FraudRow {
    type Column = FraudColumn;

    fn value(&self, column: FraudColumn) -> f64 {
        match column {
            FraudColumn::FraudIndicator => f64::from(self.fraud_indicator.flag()),
            FraudColumn::AvgPaymentRatio => self.avg_payment_ratio,
            FraudColumn::Total => self.total as f64,
        }
    }

    fn label(&self) -> String {
        self.fraud_indicator.label().to_string()
    }
}

/// Claims aggregated by gender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenderRow {
    /// Group key.
    pub gender: Gender,
    /// Number of claims.
    pub count: u64,
    /// Average claimed amount.
    pub avg_claim: f64,
    /// Average paid amount.
    pub avg_paid: f64,
}

impl Row for GenderRow {
    type Column = GenderColumn;

    fn value(&self, column: GenderColumn) -> f64 {
        match column {
            GenderColumn::Count => self.count as f64,
            GenderColumn::AvgClaim => self.avg_claim,
            GenderColumn::AvgPaid => self.avg_paid,
        }
    }

    fn label(&self) -> String {
        self.gender.label().to_string()
    }
}

/// Claims aggregated by administrative region.
///
/// The fraud columns are zero placeholders carried from the source data;
/// nothing in this crate derives them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRow {
    /// Region name.
    pub region: String,
    /// Number of claims filed in the region.
    pub total_claims: u64,
    /// Fraudulent claims (always 0).
    pub fraud_claims: u64,
    /// Fraud share in percent (always 0.0).
    pub fraud_percentage: f64,
}

impl Row for RegionRow {
    type Column = RegionColumn;

    fn value(&self, column: RegionColumn) -> f64 {
        match column {
            RegionColumn::TotalClaims => self.total_claims as f64,
            RegionColumn::FraudClaims => self.fraud_claims as f64,
            RegionColumn::FraudPercentage => self.fraud_percentage,
        }
    }

    fn label(&self) -> String {
        self.region.clone()
    }
}

/// Volume and cost of a medical procedure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureRow {
    /// Procedure name.
    pub procedure: String,
    /// Number of times performed.
    pub total: u64,
    /// Average amount paid per procedure.
    pub avg_paid: f64,
}

impl Row for ProcedureRow {
    type Column = ProcedureColumn;

    fn value(&self, column: ProcedureColumn) -> f64 {
        match column {
            ProcedureColumn::Total => self.total as f64,
            ProcedureColumn::AvgPaid => self.avg_paid,
        }
    }

    fn label(&self) -> String {
        self.procedure.clone()
    }
}

/// Serialized form of a two-row summary, checked before use.
#[derive(Deserialize)]
struct KeyedRows<R> {
    rows: Vec<R>,
}

/// Place each row in the slot of its key, rejecting missing or repeated keys.
fn one_row_per_key<R>(
    table: &'static str,
    rows: Vec<R>,
    slot: impl Fn(&R) -> usize,
) -> Result<[R; 2], DashboardError> {
    let mut slots: [Option<R>; 2] = [None, None];
    for row in rows {
        let index = slot(&row);
        if slots[index].replace(row).is_some() {
            return Err(DashboardError::MalformedSummary {
                table,
                reason: format!("key {index} appears more than once"),
            });
        }
    }
    match slots {
        [Some(first), Some(second)] => Ok([first, second]),
        _ => Err(DashboardError::MalformedSummary {
            table,
            reason: "expected one row for each key".to_string(),
        }),
    }
}

/// Fraud summary: exactly one row per indicator value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FraudSummary {
    rows: [FraudRow; 2],
}

impl FraudSummary {
    /// Build from the normal and fraudulent groups.
    pub fn new(normal: (f64, u64), fraudulent: (f64, u64)) -> Self {
        Self {
            rows: [
                FraudRow {
                    fraud_indicator: FraudIndicator::Normal,
                    avg_payment_ratio: normal.0,
                    total: normal.1,
                },
                FraudRow {
                    fraud_indicator: FraudIndicator::Fraudulent,
                    avg_payment_ratio: fraudulent.0,
                    total: fraudulent.1,
                },
            ],
        }
    }

    /// Both rows, indicator 0 first.
    pub fn rows(&self) -> &[FraudRow] {
        &self.rows
    }

    /// Row for the given indicator.
    pub fn get(&self, indicator: FraudIndicator) -> &FraudRow {
        &self.rows[indicator as usize]
    }

    /// Non-fraudulent group.
    pub fn normal(&self) -> &FraudRow {
        self.get(FraudIndicator::Normal)
    }

    /// Fraudulent group.
    pub fn fraudulent(&self) -> &FraudRow {
        self.get(FraudIndicator::Fraudulent)
    }
}

impl<'de> Deserialize<'de> for FraudSummary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = KeyedRows::<FraudRow>::deserialize(deserializer)?;
        let rows = one_row_per_key("fraud", raw.rows, |row| row.fraud_indicator as usize)
            .map_err(serde::de::Error::custom)?;
        Ok(Self { rows })
    }
}

/// Gender summary: exactly one row per gender, Female first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenderSummary {
    rows: [GenderRow; 2],
}

impl GenderSummary {
    /// Build from the female and male rows.
    pub fn new(female: (u64, f64, f64), male: (u64, f64, f64)) -> Self {
        let row = |gender, (count, avg_claim, avg_paid): (u64, f64, f64)| GenderRow {
            gender,
            count,
            avg_claim,
            avg_paid,
        };
        Self {
            rows: [row(Gender::Female, female), row(Gender::Male, male)],
        }
    }

    /// Both rows, Female first.
    pub fn rows(&self) -> &[GenderRow] {
        &self.rows
    }

    /// Row for the given gender.
    pub fn get(&self, gender: Gender) -> &GenderRow {
        &self.rows[gender as usize]
    }
}

impl<'de> Deserialize<'de> for GenderSummary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = KeyedRows::<GenderRow>::deserialize(deserializer)?;
        let rows = one_row_per_key("gender", raw.rows, |row| row.gender as usize)
            .map_err(serde::de::Error::custom)?;
        Ok(Self { rows })
    }
}

/// Regional claim totals.
pub type RegionSummary = Table<RegionRow>;

/// Procedure volumes and costs.
pub type ProcedureSummary = Table<ProcedureRow>;
