//! Working state of the egg configurator.

use std::collections::BTreeSet;

use crate::catalog::{KitConfiguration, PackageLayout};
use crate::ids::{EggSizeId, FillingId, PackageId, ShellId};
use serde::{Deserialize, Serialize};

/// What the customer is building: one egg size or a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EggChoice {
    Size(EggSizeId),
    Package(PackageId),
}

/// Shell and filling of one package unit while it is being configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitChoice {
    pub shell: ShellId,
    pub filling: FillingId,
    /// Set once the customer picked this unit's filling or confirmed it.
    /// Seeded defaults do not count toward a filling cap until then.
    pub assigned: bool,
}

impl UnitChoice {
    pub fn seeded(shell: ShellId, filling: FillingId) -> Self {
        Self {
            shell,
            filling,
            assigned: false,
        }
    }
}

/// Everything picked so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEggSelection {
    pub choice: Option<EggChoice>,
    /// Shell for a single egg.
    pub shell: ShellId,
    /// Filling for a single egg.
    pub filling: FillingId,
    pub quantity: i64,
    /// Kit layout picked before opening a confectioner kit.
    pub kit_configuration: KitConfiguration,
    /// Per-unit choices; empty unless a package is being configured.
    pub units: Vec<UnitChoice>,
    /// Index of the unit being edited.
    pub cursor: usize,
    /// Layout of the package being configured.
    pub layout: Option<PackageLayout>,
}

impl PendingEggSelection {
    pub fn new(shell: ShellId, filling: FillingId) -> Self {
        Self {
            choice: None,
            shell,
            filling,
            quantity: 1,
            kit_configuration: KitConfiguration::default(),
            units: Vec::new(),
            cursor: 0,
            layout: None,
        }
    }

    /// Check if a package is being configured.
    pub fn is_configuring(&self) -> bool {
        !self.units.is_empty()
    }

    /// Distinct fillings on assigned units, leaving out unit `skip`.
    pub(crate) fn assigned_fillings_except(&self, skip: usize) -> BTreeSet<FillingId> {
        self.units
            .iter()
            .enumerate()
            .filter(|(i, u)| *i != skip && u.assigned)
            .map(|(_, u)| u.filling)
            .collect()
    }

    /// Whether unit `index` may carry `filling` under the active cap.
    ///
    /// Counts the distinct fillings of every other assigned unit plus
    /// `filling` itself; the total must not exceed the cap.
    pub(crate) fn filling_fits_cap(&self, index: usize, filling: FillingId) -> bool {
        let Some(cap) = self.filling_cap() else {
            return true;
        };
        let mut used = self.assigned_fillings_except(index);
        used.insert(filling);
        used.len() <= cap
    }

    /// Whether all units together stay within the active cap.
    pub(crate) fn units_within_cap(&self) -> bool {
        let Some(cap) = self.filling_cap() else {
            return true;
        };
        let distinct: BTreeSet<FillingId> = self.units.iter().map(|u| u.filling).collect();
        distinct.len() <= cap
    }

    pub(crate) fn filling_cap(&self) -> Option<usize> {
        self.layout.and_then(|l| l.max_distinct_fillings)
    }

    /// Back to a blank selection, keeping the single-egg shell/filling.
    pub(crate) fn reset(&mut self) {
        self.choice = None;
        self.quantity = 1;
        self.units.clear();
        self.cursor = 0;
        self.layout = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capped(fillings: &[(u32, bool)]) -> PendingEggSelection {
        let mut selection = PendingEggSelection::new(ShellId::new(1), FillingId::new(1));
        selection.layout = Some(PackageLayout {
            unit_count: fillings.len() as u32,
            max_distinct_fillings: Some(2),
        });
        selection.units = fillings
            .iter()
            .map(|&(f, assigned)| UnitChoice {
                shell: ShellId::new(1),
                filling: FillingId::new(f),
                assigned,
            })
            .collect();
        selection
    }

    #[test]
    fn test_unassigned_units_do_not_count() {
        let selection = capped(&[(2, true), (3, false), (4, false)]);
        assert_eq!(selection.assigned_fillings_except(1).len(), 1);
        assert!(selection.filling_fits_cap(1, FillingId::new(5)));
    }

    #[test]
    fn test_cap_blocks_third_filling() {
        let selection = capped(&[(2, true), (3, true), (1, false)]);
        assert!(!selection.filling_fits_cap(2, FillingId::new(4)));
        assert!(selection.filling_fits_cap(2, FillingId::new(2)));
        assert!(selection.filling_fits_cap(2, FillingId::new(3)));
    }

    #[test]
    fn test_used_filling_rejected_once_over_cap() {
        // Three distinct fillings already assigned: reusing one of them on
        // another unit must not pass.
        let selection = capped(&[(2, true), (3, true), (1, true), (1, false)]);
        assert!(!selection.filling_fits_cap(3, FillingId::new(1)));
        assert!(!selection.units_within_cap());
    }

    #[test]
    fn test_units_within_cap_counts_all_units() {
        let selection = capped(&[(2, true), (3, true), (2, false)]);
        assert!(selection.units_within_cap());
        let selection = capped(&[(2, true), (3, true), (1, false)]);
        assert!(!selection.units_within_cap());
    }

    #[test]
    fn test_no_cap_allows_anything() {
        let mut selection = capped(&[(2, true), (3, true), (1, false)]);
        selection.layout = Some(PackageLayout {
            unit_count: 3,
            max_distinct_fillings: None,
        });
        assert!(selection.filling_fits_cap(2, FillingId::new(4)));
        assert!(selection.units_within_cap());
    }
}
