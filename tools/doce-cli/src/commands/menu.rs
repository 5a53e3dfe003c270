//! Print the menu.

use anyhow::{bail, Result};
use doce_commerce::catalog::{Catalog, KitConfiguration, Product};

use super::MenuArgs;
use crate::context::Context;

/// Run the menu command.
pub async fn run(args: MenuArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    if ctx.output.is_json() {
        ctx.output.json(&catalog);
        return Ok(());
    }

    match args.section.as_deref() {
        None => {
            print_products(ctx, "Bolos no pote", &catalog.cakes);
            print_products(ctx, "Doces recheados", &catalog.pastries);
            print_eggs(ctx, &catalog);
        }
        Some("cakes") => print_products(ctx, "Bolos no pote", &catalog.cakes),
        Some("pastries") => print_products(ctx, "Doces recheados", &catalog.pastries),
        Some("eggs") => print_eggs(ctx, &catalog),
        Some(other) => bail!(
            "Unknown menu section '{}'. Use cakes, pastries or eggs.",
            other
        ),
    }

    Ok(())
}

fn print_products(ctx: &Context, title: &str, products: &[Product]) {
    ctx.output.header(title);
    for product in products {
        let sizes = if product.sizes.is_empty() {
            String::new()
        } else {
            format!(" [{}]", product.sizes.join(", "))
        };
        ctx.output.list_item(&format!(
            "#{} {} - {}{}",
            product.id, product.name, product.price, sizes
        ));
    }
}

fn print_eggs(ctx: &Context, catalog: &Catalog) {
    ctx.output.header("Ovos de Páscoa");
    for size in &catalog.sizes {
        ctx.output
            .list_item(&format!("#{} {} - {}", size.id, size.name, size.price));
    }

    ctx.output.header("Cascas");
    for shell in &catalog.shells {
        ctx.output.list_item(&format!("#{} {}", shell.id, shell.name));
    }

    ctx.output.header("Recheios");
    for filling in &catalog.fillings {
        ctx.output
            .list_item(&format!("#{} {}", filling.id, filling.name));
    }

    ctx.output.header("Kits");
    for package in &catalog.packages {
        ctx.output.list_item(&format!(
            "#{} {} - {} ({} ovos)",
            package.id, package.name, package.price, package.unit_count
        ));
        if package.is_kit() {
            let compact = package.layout(KitConfiguration::Compact);
            let large = package.layout(KitConfiguration::Large);
            ctx.output.kv(
                "compacto",
                &format!(
                    "{} ovos, {}",
                    compact.unit_count,
                    compact
                        .max_distinct_fillings
                        .map(|cap| format!("até {} sabores", cap))
                        .unwrap_or_else(|| "sabores livres".to_string())
                ),
            );
            ctx.output
                .kv("grande (--large)", &format!("{} ovo", large.unit_count));
        }
    }
}
