//! Cart listing and edits.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use doce_cache::Store;
use doce_commerce::cart::CartStore;
use doce_commerce::ids::LineItemId;

use super::{CartArgs, CartCommand, ClearArgs, RemoveArgs};
use crate::commands::add::report;
use crate::context::Context;
use crate::output::describe_item;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        Some(CartCommand::Show) | None => show_cart(ctx).await,
        Some(CartCommand::Set { id, quantity }) => set_quantity(&id, quantity, ctx).await,
        Some(CartCommand::Export) => export_cart(ctx).await,
    }
}

/// Run the remove command.
pub async fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store()?;
    if store.remove_item(&LineItemId::new(args.id.as_str())) {
        ctx.output.success(&format!("Removed {}", args.id));
    } else {
        ctx.output.info(&format!("{} is not in the cart", args.id));
    }
    ctx.output.kv("Total", &store.total().to_string());
    Ok(())
}

/// Run the clear command.
pub async fn clear(args: ClearArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store()?;
    if store.cart().is_empty() {
        ctx.output.info("Cart is already empty");
        return Ok(());
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove all {} items from the cart?",
                store.cart().item_count()
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Clear cancelled");
            return Ok(());
        }
    }

    store.clear();
    ctx.output.success("Cart cleared");
    Ok(())
}

async fn show_cart(ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": store.cart().items(),
            "total": store.total().display(),
        }));
        return Ok(());
    }

    print_cart(ctx, &store);
    Ok(())
}

/// Print the cart as a table.
pub fn print_cart<S: Store>(ctx: &Context, store: &CartStore<S>) {
    ctx.output.header("Carrinho");

    if store.cart().is_empty() {
        ctx.output.info("Seu carrinho está vazio.");
        ctx.output.info("Run `doce menu` to see what's on offer.");
        return;
    }

    let widths = [30, 44, 5, 12];
    ctx.output.table_row(&["ID", "ITEM", "QTD", "SUBTOTAL"], &widths);
    for item in store.cart().items() {
        let quantity = item.quantity.to_string();
        let subtotal = item.subtotal().to_string();
        ctx.output.table_row(
            &[item.id.as_str(), &describe_item(item), &quantity, &subtotal],
            &widths,
        );
        for (i, unit) in item.units().iter().enumerate() {
            ctx.output.list_item(&format!(
                "Ovo {}: {} / {}",
                i + 1,
                unit.shell_name,
                unit.filling_name
            ));
        }
    }

    ctx.output.info("");
    ctx.output.kv("Total", &store.total().to_string());
}

async fn set_quantity(id: &str, quantity: i64, ctx: &Context) -> Result<()> {
    let mut store = ctx.cart_store()?;
    let id = LineItemId::new(id);

    if !store.update_quantity(&id, quantity)? {
        bail!("{} is not in the cart", id);
    }

    if quantity <= 0 {
        ctx.output.success(&format!("Removed {}", id));
        ctx.output.kv("Total", &store.total().to_string());
    } else {
        report(ctx, &store, &id);
    }
    Ok(())
}

async fn export_cart(ctx: &Context) -> Result<()> {
    let store = ctx.cart_store()?;
    println!("{}", store.snapshot()?);
    Ok(())
}
