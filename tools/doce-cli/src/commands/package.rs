//! Interactive egg package wizard.

use anyhow::Result;
use dialoguer::Select;
use doce_commerce::catalog::{Catalog, KitConfiguration};
use doce_commerce::configurator::{ConfiguratorState, EggConfigurator, Transition};
use doce_commerce::ids::PackageId;
use doce_commerce::CommerceError;

use super::PackageArgs;
use crate::commands::add::report;
use crate::context::Context;
use crate::output::disabled;

/// Run the package command.
pub async fn run(args: PackageArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let mut store = ctx.cart_store()?;
    let mut configurator = EggConfigurator::new(&catalog);

    if args.large {
        configurator.set_kit_configuration(KitConfiguration::Large)?;
    }
    configurator.select_package(&catalog, PackageId::new(args.id))?;

    let package = catalog.package(PackageId::new(args.id));
    ctx.output.header(&format!("Montando {}", package.name));

    while let ConfiguratorState::ConfiguringUnit { unit } = configurator.state() {
        let total = configurator.selection().units.len();
        ctx.output.step(unit, total, &format!("Ovo {}", unit));

        pick_shell(&mut configurator, &catalog)?;
        pick_filling(ctx, &mut configurator, &catalog)?;

        let actions = ["Próximo", "Voltar", "Cancelar"];
        let action = Select::new()
            .with_prompt("Continuar")
            .items(&actions)
            .default(0)
            .interact()?;

        let transition = match action {
            0 => match configurator.next(&catalog, &mut store) {
                Ok(transition) => transition,
                Err(CommerceError::FillingCapReached { cap }) => {
                    ctx.output.warn(&format!(
                        "Este kit permite no máximo {} sabores diferentes",
                        cap
                    ));
                    continue;
                }
                Err(e) => return Err(e.into()),
            },
            1 => configurator.back()?,
            _ => {
                configurator.abort();
                Transition::Aborted
            }
        };

        match transition {
            Transition::Unit(_) => {}
            Transition::Added(id) => report(ctx, &store, &id),
            Transition::Aborted => ctx.output.warn("Kit descartado"),
        }
    }

    Ok(())
}

fn pick_shell(configurator: &mut EggConfigurator, catalog: &Catalog) -> Result<()> {
    let cursor = configurator.selection().cursor;
    let current = configurator.selection().units[cursor].shell;
    let names: Vec<&str> = catalog.shells.iter().map(|s| s.name.as_str()).collect();
    let default = catalog
        .shells
        .iter()
        .position(|s| s.id == current)
        .unwrap_or(0);

    let choice = Select::new()
        .with_prompt("Casca")
        .items(&names)
        .default(default)
        .interact()?;
    configurator.select_shell(catalog.shells[choice].id);
    Ok(())
}

fn pick_filling(
    ctx: &Context,
    configurator: &mut EggConfigurator,
    catalog: &Catalog,
) -> Result<()> {
    loop {
        let options = configurator.filling_options(catalog);
        let labels: Vec<String> = options
            .iter()
            .map(|o| {
                if o.enabled {
                    o.filling.name.clone()
                } else {
                    disabled(&o.filling.name)
                }
            })
            .collect();
        let default = options.iter().position(|o| o.selected).unwrap_or(0);

        let choice = Select::new()
            .with_prompt("Recheio")
            .items(&labels)
            .default(default)
            .interact()?;

        match configurator.select_filling(options[choice].filling.id) {
            Ok(()) => return Ok(()),
            Err(CommerceError::FillingCapReached { cap }) => {
                ctx.output.warn(&format!(
                    "Escolha um dos {} sabores já usados neste kit",
                    cap
                ));
            }
            Err(e) => return Err(e.into()),
        }
    }
}
