//! The egg configurator state machine.

use crate::cart::{LineItem, LineItemSink, UnitSelection};
use crate::catalog::{Catalog, EggFilling, KitConfiguration, PackageLayout};
use crate::configurator::{
    ConfiguratorState, EggChoice, FillingOption, PendingEggSelection, Transition, UnitChoice,
};
use crate::error::CommerceError;
use crate::ids::{EggSizeId, FillingId, LineItemId, PackageId, ShellId};

/// Builds single eggs and walks multi-unit packages one egg at a time.
///
/// State is [`ConfiguratorState::Browsing`] until a package is selected,
/// then [`ConfiguratorState::ConfiguringUnit`] with a 1-based unit number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EggConfigurator {
    selection: PendingEggSelection,
}

impl EggConfigurator {
    /// Start browsing with the catalog's default shell and filling.
    pub fn new(catalog: &Catalog) -> Self {
        Self {
            selection: PendingEggSelection::new(
                catalog.default_shell_id(),
                catalog.default_filling_id(),
            ),
        }
    }

    pub fn state(&self) -> ConfiguratorState {
        if self.selection.is_configuring() {
            ConfiguratorState::ConfiguringUnit {
                unit: self.selection.cursor + 1,
            }
        } else {
            ConfiguratorState::Browsing
        }
    }

    pub fn selection(&self) -> &PendingEggSelection {
        &self.selection
    }

    /// Layout of the package being configured.
    pub fn active_layout(&self) -> Option<PackageLayout> {
        self.selection.layout
    }

    /// Unit being edited (1-based), if configuring.
    pub fn current_unit(&self) -> Option<usize> {
        match self.state() {
            ConfiguratorState::ConfiguringUnit { unit } => Some(unit),
            ConfiguratorState::Browsing => None,
        }
    }

    fn current_unit_choice(&self) -> Option<&UnitChoice> {
        self.selection.units.get(self.selection.cursor)
    }

    fn require_browsing(&self, action: &str) -> Result<(), CommerceError> {
        match self.state() {
            ConfiguratorState::Browsing => Ok(()),
            ConfiguratorState::ConfiguringUnit { unit } => {
                Err(CommerceError::InvalidConfiguratorState(format!(
                    "cannot {} while configuring unit {}",
                    action, unit
                )))
            }
        }
    }

    /// Pick the kit layout used the next time a confectioner kit is opened.
    pub fn set_kit_configuration(
        &mut self,
        configuration: KitConfiguration,
    ) -> Result<(), CommerceError> {
        self.require_browsing("change the kit layout")?;
        self.selection.kit_configuration = configuration;
        Ok(())
    }

    /// Choose a single-egg size.
    pub fn select_size(&mut self, size: EggSizeId) -> Result<(), CommerceError> {
        self.require_browsing("select a size")?;
        self.selection.choice = Some(EggChoice::Size(size));
        Ok(())
    }

    /// Set how many single eggs to add. Never below 1.
    pub fn set_quantity(&mut self, quantity: i64) {
        self.selection.quantity = quantity.max(1);
    }

    /// Change the shell of the single egg, or of the current unit.
    pub fn select_shell(&mut self, shell: ShellId) {
        let cursor = self.selection.cursor;
        match self.selection.units.get_mut(cursor) {
            Some(unit) => unit.shell = shell,
            None => self.selection.shell = shell,
        }
    }

    /// Check whether `filling` can be picked right now.
    ///
    /// Single eggs and uncapped layouts accept anything. Under a cap, the
    /// current unit's own filling always stays selectable.
    pub fn is_filling_selectable(&self, filling: FillingId) -> bool {
        match self.current_unit_choice() {
            None => true,
            Some(unit) if unit.filling == filling => true,
            Some(_) => self
                .selection
                .filling_fits_cap(self.selection.cursor, filling),
        }
    }

    /// Change the filling of the single egg, or of the current unit.
    ///
    /// A filling blocked by the layout's cap is rejected and the unit keeps
    /// its previous filling.
    pub fn select_filling(&mut self, filling: FillingId) -> Result<(), CommerceError> {
        if !self.is_filling_selectable(filling) {
            tracing::debug!(%filling, cap = self.cap(), "filling blocked by cap");
            return Err(CommerceError::FillingCapReached { cap: self.cap() });
        }

        let cursor = self.selection.cursor;
        let fits = self.selection.filling_fits_cap(cursor, filling);
        match self.selection.units.get_mut(cursor) {
            // Re-picking a seeded filling that is over the cap leaves the
            // unit unassigned; `next` refuses it until it fits.
            Some(unit) => {
                unit.filling = filling;
                unit.assigned = fits;
            }
            None => self.selection.filling = filling,
        }
        Ok(())
    }

    /// Every filling with its enabled flag, for rendering a picker.
    pub fn filling_options<'c>(&self, catalog: &'c Catalog) -> Vec<FillingOption<'c>> {
        let selected = self
            .current_unit_choice()
            .map(|u| u.filling)
            .unwrap_or(self.selection.filling);
        catalog
            .fillings
            .iter()
            .map(|filling: &'c EggFilling| FillingOption {
                filling,
                enabled: self.is_filling_selectable(filling.id),
                selected: filling.id == selected,
            })
            .collect()
    }

    /// Open a package and start on its first unit.
    ///
    /// Every unit is seeded with the catalog's default shell and filling.
    /// For a confectioner kit the unit count follows the chosen layout.
    pub fn select_package(
        &mut self,
        catalog: &Catalog,
        package_id: PackageId,
    ) -> Result<ConfiguratorState, CommerceError> {
        self.require_browsing("open another package")?;

        let package = catalog.package(package_id);
        let layout = package.layout(self.selection.kit_configuration);
        if package.id.is_placeholder() || layout.unit_count == 0 {
            return Err(CommerceError::ProductNotFound(format!(
                "egg package {}",
                package_id
            )));
        }

        let seed = UnitChoice::seeded(catalog.default_shell_id(), catalog.default_filling_id());
        self.selection.choice = Some(EggChoice::Package(package_id));
        self.selection.units = vec![seed; layout.unit_count as usize];
        self.selection.cursor = 0;
        self.selection.layout = Some(layout);

        tracing::debug!(
            package = %package_id,
            units = layout.unit_count,
            cap = ?layout.max_distinct_fillings,
            "configuring package"
        );
        Ok(self.state())
    }

    /// Confirm the current unit and move on.
    ///
    /// On the last unit the package is turned into one line item, handed to
    /// `sink`, and the configurator returns to browsing. A unit whose filling
    /// would break the layout's cap cannot be confirmed.
    pub fn next(
        &mut self,
        catalog: &Catalog,
        sink: &mut impl LineItemSink,
    ) -> Result<Transition, CommerceError> {
        let cursor = self.selection.cursor;
        let Some(unit) = self.selection.units.get(cursor).copied() else {
            return Err(CommerceError::InvalidConfiguratorState(
                "no package is being configured".to_string(),
            ));
        };

        if !self.selection.filling_fits_cap(cursor, unit.filling) {
            return Err(CommerceError::FillingCapReached { cap: self.cap() });
        }
        self.selection.units[cursor].assigned = true;

        if cursor + 1 < self.selection.units.len() {
            self.selection.cursor += 1;
            return Ok(Transition::Unit(self.selection.cursor + 1));
        }

        let id = self.finalize(catalog, sink)?;
        Ok(Transition::Added(id))
    }

    fn finalize(
        &mut self,
        catalog: &Catalog,
        sink: &mut impl LineItemSink,
    ) -> Result<LineItemId, CommerceError> {
        let Some(EggChoice::Package(package_id)) = self.selection.choice else {
            return Err(CommerceError::InvalidConfiguratorState(
                "units without a package".to_string(),
            ));
        };
        if !self.selection.units_within_cap() {
            return Err(CommerceError::FillingCapReached { cap: self.cap() });
        }
        let package = catalog.package(package_id);
        let units = self
            .selection
            .units
            .iter()
            .map(|u| UnitSelection::new(&catalog.shell(u.shell), &catalog.filling(u.filling)))
            .collect();

        let id = sink.add_item(LineItem::egg_package(&package, units))?;
        tracing::debug!(%id, package = %package_id, "package added to cart");
        self.selection.reset();
        Ok(id)
    }

    fn cap(&self) -> usize {
        self.selection.filling_cap().unwrap_or_default()
    }

    /// Step back one unit; on the first unit, abandon the package.
    pub fn back(&mut self) -> Result<Transition, CommerceError> {
        match self.state() {
            ConfiguratorState::Browsing => Err(CommerceError::InvalidConfiguratorState(
                "nothing to go back from".to_string(),
            )),
            ConfiguratorState::ConfiguringUnit { unit: 1 } => {
                self.abort();
                Ok(Transition::Aborted)
            }
            ConfiguratorState::ConfiguringUnit { .. } => {
                self.selection.cursor -= 1;
                Ok(Transition::Unit(self.selection.cursor + 1))
            }
        }
    }

    /// Drop everything in progress and return to browsing.
    pub fn abort(&mut self) {
        if self.selection.is_configuring() {
            tracing::debug!("package configuration abandoned");
        }
        self.selection.reset();
    }

    /// Add the single egg being browsed to `sink`.
    ///
    /// Identical size/shell/filling combinations merge in the cart. The
    /// quantity resets to 1 afterwards; shell and filling are kept.
    pub fn add_single(
        &mut self,
        catalog: &Catalog,
        sink: &mut impl LineItemSink,
    ) -> Result<LineItemId, CommerceError> {
        self.require_browsing("add a single egg")?;
        let Some(EggChoice::Size(size_id)) = self.selection.choice else {
            return Err(CommerceError::InvalidConfiguratorState(
                "no egg size selected".to_string(),
            ));
        };

        let size = catalog.size(size_id);
        let shell = catalog.shell(self.selection.shell);
        let filling = catalog.filling(self.selection.filling);
        if size.id.is_placeholder() {
            return Err(CommerceError::ProductNotFound(format!("egg size {}", size_id)));
        }
        if shell.id.is_placeholder() || filling.id.is_placeholder() {
            return Err(CommerceError::ProductNotFound(format!(
                "shell {} / filling {}",
                self.selection.shell, self.selection.filling
            )));
        }

        let item = LineItem::single_egg(&size, &shell, &filling, self.selection.quantity);
        let id = sink.add_item(item)?;
        self.selection.quantity = 1;
        Ok(id)
    }
}
