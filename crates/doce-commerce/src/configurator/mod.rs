//! Easter egg configurator.
//!
//! An explicit state object for building eggs: single eggs are picked and
//! added in one go, packages are configured unit by unit with `next`/`back`.

mod selection;
mod wizard;

pub use selection::{EggChoice, PendingEggSelection, UnitChoice};
pub use wizard::EggConfigurator;

use crate::catalog::EggFilling;
use crate::ids::LineItemId;

/// Where the configurator is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfiguratorState {
    /// Choosing a size or package, shell, filling and quantity.
    Browsing,
    /// Editing unit `unit` (1-based) of a package.
    ConfiguringUnit { unit: usize },
}

/// Outcome of a `next`/`back` step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Now editing this unit (1-based).
    Unit(usize),
    /// Package finished and added under this line id.
    Added(LineItemId),
    /// Package abandoned; back to browsing.
    Aborted,
}

/// A filling as shown in the picker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillingOption<'c> {
    pub filling: &'c EggFilling,
    /// False when the layout's filling cap rules it out.
    pub enabled: bool,
    /// The filling currently chosen.
    pub selected: bool,
}
