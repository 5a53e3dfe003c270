//! Doce CLI - terminal storefront for the Doce Presente bakery.
//!
//! Commands:
//! - `doce menu` - Show the menu
//! - `doce add` - Add a cake, pastry or single egg to the cart
//! - `doce package` - Build an egg package one unit at a time
//! - `doce cart` - Show or edit the cart
//! - `doce remove` - Remove a cart line
//! - `doce clear` - Empty the cart
//! - `doce pix` - Show (and copy) the PIX key
//! - `doce checkout` - Build the WhatsApp order message
//! - `doce config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    AddArgs, CartArgs, CheckoutArgs, ClearArgs, ConfigArgs, MenuArgs, PackageArgs, PixArgs,
    RemoveArgs,
};

/// Doce CLI - Order cakes, pastries and Easter eggs from Doce Presente
#[derive(Parser)]
#[command(name = "doce")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Cart snapshot (JSON) carried over from another session
    #[arg(long, global = true)]
    cart: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the menu
    Menu(MenuArgs),

    /// Add an item to the cart
    Add(AddArgs),

    /// Configure an egg package interactively
    Package(PackageArgs),

    /// Show or edit the cart
    Cart(CartArgs),

    /// Remove a line from the cart
    Remove(RemoveArgs),

    /// Empty the cart
    Clear(ClearArgs),

    /// Show PIX payment details
    Pix(PixArgs),

    /// Check out and build the WhatsApp order message
    Checkout(CheckoutArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Library logs go to stderr; RUST_LOG overrides the default level
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output, cli.cart)?;

    // Execute command
    let result = match cli.command {
        Commands::Menu(args) => commands::menu::run(args, &ctx).await,
        Commands::Add(args) => commands::add::run(args, &ctx).await,
        Commands::Package(args) => commands::package::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Remove(args) => commands::cart::remove(args, &ctx).await,
        Commands::Clear(args) => commands::cart::clear(args, &ctx).await,
        Commands::Pix(args) => commands::pix::run(args, &ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pix_copy_parses_alongside_config() {
        let cli = Cli::try_parse_from(["doce", "-c", "doce.toml", "pix", "--copy"]).unwrap();
        assert_eq!(cli.config.as_deref(), Some("doce.toml"));
        assert!(matches!(cli.command, Commands::Pix(PixArgs { copy: true })));
    }

    #[test]
    fn test_checkout_rejects_address_with_location() {
        let result = Cli::try_parse_from([
            "doce",
            "checkout",
            "--address",
            "Rua das Flores, 10",
            "--location=-1.45,-48.49",
        ]);
        assert!(result.is_err());
    }
}
