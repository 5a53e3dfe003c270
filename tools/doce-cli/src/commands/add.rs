//! Add cakes, pastries and single eggs to the cart.

use anyhow::{Context as _, Result};
use doce_cache::Store;
use doce_commerce::cart::{CartStore, LineItem};
use doce_commerce::catalog::{Catalog, ProductKind};
use doce_commerce::configurator::EggConfigurator;
use doce_commerce::ids::{EggSizeId, FillingId, LineItemId, ProductId, ShellId};

use super::{AddArgs, AddCommand};
use crate::context::Context;
use crate::output::describe_item;

/// Run the add command.
pub async fn run(args: AddArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let mut store = ctx.cart_store()?;

    let id = match args.command {
        AddCommand::Cake { id, size, quantity } => {
            let item = product_item(&catalog, ProductKind::Cake, id, size, quantity)?;
            store.add_item(item)?
        }
        AddCommand::Pastry { id, size, quantity } => {
            let item = product_item(&catalog, ProductKind::StuffedPastry, id, size, quantity)?;
            store.add_item(item)?
        }
        AddCommand::Egg {
            size,
            shell,
            filling,
            quantity,
        } => {
            let mut configurator = EggConfigurator::new(&catalog);
            configurator.select_size(EggSizeId::new(size))?;
            if let Some(shell) = shell {
                configurator.select_shell(ShellId::new(shell));
            }
            if let Some(filling) = filling {
                configurator.select_filling(FillingId::new(filling))?;
            }
            configurator.set_quantity(quantity);
            configurator.add_single(&catalog, &mut store)?
        }
    };

    report(ctx, &store, &id);
    Ok(())
}

fn product_item(
    catalog: &Catalog,
    kind: ProductKind,
    id: u32,
    size: Option<String>,
    quantity: i64,
) -> Result<LineItem> {
    let product = catalog
        .product(kind, ProductId::new(id))
        .with_context(|| format!("No {} with id {} on the menu", kind.as_str(), id))?;
    let size = size
        .or_else(|| product.default_size().map(str::to_string))
        .unwrap_or_default();
    Ok(LineItem::product(kind, product, &size, quantity)?)
}

/// Print the line that was touched and the new total.
pub fn report<S: Store>(ctx: &Context, store: &CartStore<S>, id: &LineItemId) {
    if let Some(item) = store.cart().get_item(id) {
        ctx.output.success(&format!(
            "{} x{} no carrinho",
            describe_item(item),
            item.quantity
        ));
    }
    ctx.output.kv("Total", &store.total().to_string());
}
