//! Production stages and per-category stage tables.
//!
//! Every order passes through the same fixed sequence of production
//! stages; only the per-stage day counts differ by product category.
//! The day counts are static planning data maintained by production
//! engineering, independent of the statistical duration model — the
//! two deliberately do not reconcile (see DESIGN.md).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A production stage.
///
/// Variant order is the fixed execution order; stages are never
/// reordered or skipped between categories.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Stage {
    /// Electrical design and single-line diagrams.
    ElectricDesign,
    /// Mechanical design and enclosure drawings.
    MechanicalDesign,
    /// Component purchasing and goods receipt.
    Purchasing,
    /// Sheet-metal and busbar production.
    MechanicalProduction,
    /// Inner equipment assembly.
    InnerAssembly,
    /// Secondary wiring and cabling.
    Cabling,
    /// General assembly.
    GeneralAssembly,
    /// Routine testing and quality control.
    Testing,
}

impl Stage {
    /// Number of stages.
    pub const COUNT: usize = 8;

    /// All stages in production order.
    pub const ALL: [Stage; Stage::COUNT] = [
        Stage::ElectricDesign,
        Stage::MechanicalDesign,
        Stage::Purchasing,
        Stage::MechanicalProduction,
        Stage::InnerAssembly,
        Stage::Cabling,
        Stage::GeneralAssembly,
        Stage::Testing,
    ];

    /// Stable snake_case identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::ElectricDesign => "electric_design",
            Stage::MechanicalDesign => "mechanical_design",
            Stage::Purchasing => "purchasing",
            Stage::MechanicalProduction => "mechanical_production",
            Stage::InnerAssembly => "inner_assembly",
            Stage::Cabling => "cabling",
            Stage::GeneralAssembly => "general_assembly",
            Stage::Testing => "testing",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static planning data for one product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageTable {
    /// Baseline total duration in days, used as the prediction fallback
    /// when no trained model exists for the category.
    pub base_days: u32,
    /// Day count per stage, indexed in [`Stage::ALL`] order.
    days: [u32; Stage::COUNT],
}

impl StageTable {
    /// Creates a table from a baseline and per-stage day counts in
    /// [`Stage::ALL`] order.
    pub fn new(base_days: u32, days: [u32; Stage::COUNT]) -> Self {
        Self { base_days, days }
    }

    /// Day count for one stage.
    #[inline]
    pub fn days_for(&self, stage: Stage) -> u32 {
        self.days[stage as usize]
    }

    /// Stages with their day counts, in production order.
    pub fn stage_days(&self) -> impl Iterator<Item = (Stage, u32)> + '_ {
        Stage::ALL.iter().map(|&s| (s, self.days[s as usize]))
    }

    /// Sum of all stage day counts.
    ///
    /// Note this is planning data and does not equal `base_days`.
    pub fn total_stage_days(&self) -> u32 {
        self.days.iter().sum()
    }
}

/// Category-keyed stage tables with a default for unknown categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageCatalog {
    tables: BTreeMap<String, StageTable>,
    default_table: StageTable,
}

impl StageCatalog {
    /// Creates an empty catalog with the given default table.
    pub fn new(default_table: StageTable) -> Self {
        Self {
            tables: BTreeMap::new(),
            default_table,
        }
    }

    /// The catalog shipped with the original deployment: RM 36-series
    /// medium-voltage cells and ring main units. The `RM 36 CB` table
    /// doubles as the default for unknown categories.
    pub fn builtin() -> Self {
        let cb = StageTable::new(14, [2, 3, 3, 4, 3, 4, 3, 2]);
        Self::new(cb.clone())
            .with_table("RM 36 CB", cb)
            .with_table("RM 36 LB", StageTable::new(12, [2, 2, 3, 3, 3, 3, 2, 2]))
            .with_table("RM 36 FL", StageTable::new(10, [1, 2, 2, 3, 2, 2, 2, 1]))
            .with_table("RMU", StageTable::new(16, [3, 3, 4, 4, 3, 5, 3, 2]))
    }

    /// Registers (or replaces) a category table.
    pub fn with_table(mut self, category: impl Into<String>, table: StageTable) -> Self {
        self.tables.insert(category.into(), table);
        self
    }

    /// Table for a category, falling back to the default table.
    pub fn table_for(&self, category: &str) -> &StageTable {
        self.tables.get(category).unwrap_or(&self.default_table)
    }

    /// Baseline duration for a known category.
    ///
    /// `None` for categories without a registered table; the predictor
    /// then uses its global fallback instead of the default table's
    /// baseline, so an unknown product is not mistaken for a known one.
    pub fn base_days(&self, category: &str) -> Option<u32> {
        self.tables.get(category).map(|t| t.base_days)
    }

    /// Registered category names, in sorted order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_order_fixed() {
        assert_eq!(Stage::ALL[0], Stage::ElectricDesign);
        assert_eq!(Stage::ALL[Stage::COUNT - 1], Stage::Testing);
        assert_eq!(Stage::ALL.len(), Stage::COUNT);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::ElectricDesign.name(), "electric_design");
        assert_eq!(Stage::Testing.to_string(), "testing");
    }

    #[test]
    fn test_table_lookup() {
        let table = StageTable::new(14, [2, 3, 3, 4, 3, 4, 3, 2]);
        assert_eq!(table.days_for(Stage::ElectricDesign), 2);
        assert_eq!(table.days_for(Stage::Cabling), 4);
        assert_eq!(table.total_stage_days(), 24);
    }

    #[test]
    fn test_stage_days_in_order() {
        let table = StageTable::new(10, [1, 2, 2, 3, 2, 2, 2, 1]);
        let listed: Vec<(Stage, u32)> = table.stage_days().collect();
        assert_eq!(listed.len(), Stage::COUNT);
        assert_eq!(listed[0], (Stage::ElectricDesign, 1));
        assert_eq!(listed[7], (Stage::Testing, 1));
    }

    #[test]
    fn test_builtin_catalog() {
        let catalog = StageCatalog::builtin();
        assert_eq!(catalog.base_days("RM 36 CB"), Some(14));
        assert_eq!(catalog.base_days("RM 36 LB"), Some(12));
        assert_eq!(catalog.base_days("RM 36 FL"), Some(10));
        assert_eq!(catalog.base_days("RMU"), Some(16));
        assert_eq!(catalog.base_days("unknown"), None);
        assert_eq!(catalog.categories().count(), 4);
    }

    #[test]
    fn test_unknown_category_uses_default_table() {
        let catalog = StageCatalog::builtin();
        let table = catalog.table_for("never seen");
        // Default is the RM 36 CB table
        assert_eq!(table.base_days, 14);
        assert_eq!(table.days_for(Stage::Cabling), 4);
    }

    #[test]
    fn test_custom_table_registration() {
        let catalog =
            StageCatalog::builtin().with_table("LV PANEL", StageTable::new(7, [1, 1, 1, 1, 1, 1, 1, 1]));
        assert_eq!(catalog.base_days("LV PANEL"), Some(7));
        assert_eq!(catalog.table_for("LV PANEL").total_stage_days(), 8);
    }

    #[test]
    fn test_catalog_serde_round_trip() {
        let catalog = StageCatalog::builtin();
        let json = serde_json::to_string(&catalog).unwrap();
        let back: StageCatalog = serde_json::from_str(&json).unwrap();
        assert_eq!(back.base_days("RMU"), Some(16));
        assert_eq!(back.table_for("RMU").days_for(Stage::Cabling), 5);
    }
}
