//! Write-mode unit selection.

use log::info;

use crate::catalog::Unit;

pub const AUTO_ADD_UNIT_2_STREAK: u32 = 10;
pub const AUTO_ADD_UNIT_3_STREAK: u32 = 20;

/// Active units for Write mode. Never empty.
///
/// Starts with unit 1 only. Units 2 and 3 are added automatically as the streak
/// grows, until the learner toggles a unit by hand; from then on the selection
/// is fully manual.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitSelection {
    selected: Vec<Unit>,
    auto_unlock: bool,
    last_auto_added: Unit,
}

impl Default for UnitSelection {
    fn default() -> Self {
        Self {
            selected: vec![Unit::One],
            auto_unlock: true,
            last_auto_added: Unit::One,
        }
    }
}

impl UnitSelection {
    /// Selected units, ascending.
    pub fn selected(&self) -> &[Unit] {
        &self.selected
    }

    pub fn is_selected(&self, unit: Unit) -> bool {
        self.selected.contains(&unit)
    }

    pub fn auto_unlock_enabled(&self) -> bool {
        self.auto_unlock
    }

    /// Manual toggle. Turns automatic unlocking off for good, even when the
    /// toggle itself is refused (removing the only selected unit). Returns
    /// whether the selection changed.
    pub fn toggle(&mut self, unit: Unit) -> bool {
        self.auto_unlock = false;
        if let Some(pos) = self.selected.iter().position(|u| *u == unit) {
            if self.selected.len() == 1 {
                return false;
            }
            self.selected.remove(pos);
        } else {
            self.selected.push(unit);
            self.selected.sort();
        }
        true
    }

    /// Adds every unit up to the one the streak earns. Returns whether the
    /// selection changed.
    pub fn apply_streak(&mut self, streak: u32) -> bool {
        if !self.auto_unlock {
            return false;
        }
        let desired = if streak >= AUTO_ADD_UNIT_3_STREAK {
            Unit::Three
        } else if streak >= AUTO_ADD_UNIT_2_STREAK {
            Unit::Two
        } else {
            Unit::One
        };
        if desired <= self.last_auto_added {
            return false;
        }

        let mut changed = false;
        for n in self.last_auto_added.number() + 1..=desired.number() {
            if let Some(unit) = Unit::from_number(n) {
                if !self.selected.contains(&unit) {
                    self.selected.push(unit);
                    changed = true;
                }
            }
        }
        self.selected.sort();
        self.last_auto_added = desired;
        if changed {
            info!("streak {streak} unlocked units up to {}", desired.number());
        }
        changed
    }
}
