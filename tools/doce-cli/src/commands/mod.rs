//! CLI command implementations.

pub mod add;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod menu;
pub mod package;
pub mod pix;

use clap::{Args, Subcommand};

/// Arguments for the menu command.
#[derive(Args)]
pub struct MenuArgs {
    /// Only show one section (cakes, pastries, eggs).
    #[arg(short, long)]
    pub section: Option<String>,
}

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    #[command(subcommand)]
    pub command: AddCommand,
}

#[derive(Subcommand)]
pub enum AddCommand {
    /// Add a cake in a jar.
    Cake {
        /// Cake id from the menu.
        id: u32,
        /// Size label (defaults to the first size offered).
        #[arg(short, long)]
        size: Option<String>,
        /// How many.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Add a stuffed pastry.
    Pastry {
        /// Pastry id from the menu.
        id: u32,
        /// Size label (defaults to the first size offered).
        #[arg(short, long)]
        size: Option<String>,
        /// How many.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Add a single Easter egg.
    Egg {
        /// Egg size id from the menu.
        size: u32,
        /// Shell id (defaults to the first shell).
        #[arg(long)]
        shell: Option<u32>,
        /// Filling id (defaults to the first filling).
        #[arg(long)]
        filling: Option<u32>,
        /// How many.
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
}

/// Arguments for the package command.
#[derive(Args)]
pub struct PackageArgs {
    /// Package id from the menu.
    pub id: u32,

    /// Use the large layout of the confectioner kit.
    #[arg(long)]
    pub large: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// List the cart.
    Show,
    /// Change a line's quantity (0 removes it).
    Set {
        /// Line id as shown by `doce cart`.
        id: String,
        /// New quantity.
        quantity: i64,
    },
    /// Print the cart snapshot for `--cart`.
    Export,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Line id as shown by `doce cart`.
    pub id: String,
}

/// Arguments for the clear command.
#[derive(Args)]
pub struct ClearArgs {
    /// Skip confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the pix command.
#[derive(Args)]
pub struct PixArgs {
    /// Copy the key to the terminal clipboard.
    #[arg(long)]
    pub copy: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Customer name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// Customer phone.
    #[arg(short, long)]
    pub phone: Option<String>,

    /// Delivery address.
    #[arg(short, long)]
    pub address: Option<String>,

    /// Delivery location as "lat,lng" instead of an address.
    #[arg(short, long, conflicts_with = "address")]
    pub location: Option<String>,

    /// Payment method: dinheiro, pix or cartao.
    #[arg(long, default_value = "dinheiro")]
    pub payment: String,

    /// Notes for the bakery.
    #[arg(long)]
    pub notes: Option<String>,

    /// Keep the cart after the order message is generated.
    #[arg(long)]
    pub keep_cart: bool,

    /// Ask for missing fields interactively.
    #[arg(short, long)]
    pub interactive: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Write the current configuration to a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
        /// File format: toml (doce.toml) or json (doce.json).
        #[arg(long, default_value = "toml", value_parser = ["toml", "json"])]
        format: String,
    },
}
