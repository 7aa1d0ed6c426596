//! ShoppyGlobe CLI - Shopping cart persisted on local disk.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart (greets you if it was restored from an earlier session)
//! shoppy-cli show
//!
//! # Add a product (repeat to add another unit)
//! shoppy-cli add --id 1 --title "Essence Mascara" --price 9.99 --thumbnail https://cdn.example.com/1.png
//!
//! # Change or remove a line
//! shoppy-cli set-quantity 1 3
//! shoppy-cli remove 1
//!
//! # Place the order and empty the cart
//! shoppy-cli checkout
//! ```
//!
//! # Commands
//!
//! - `show` - Print the cart (`--json` for the stored layout)
//! - `add` - Add one unit of a product
//! - `remove` - Remove a product line
//! - `set-quantity` - Set a line's quantity (clamped to 1..=99)
//! - `clear` - Empty the cart
//! - `checkout` - Print the order summary and empty the cart
//!
//! The storage location comes from `SHOPPYGLOBE_STORAGE_DIR` /
//! `SHOPPYGLOBE_CART_KEY` (see `shoppyglobe_store::config`) unless
//! `--storage-dir` is given.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shoppyglobe_core::{Price, ProductId};
use shoppyglobe_store::StoreConfig;

mod commands;

#[derive(Parser)]
#[command(name = "shoppy-cli")]
#[command(author, version, about = "ShoppyGlobe shopping cart")]
struct Cli {
    /// Directory holding the persisted cart (overrides `SHOPPYGLOBE_STORAGE_DIR`)
    #[arg(long, global = true)]
    storage_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    Show {
        /// Print the persisted JSON layout instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add one unit of a product
    Add {
        /// Catalog product ID
        #[arg(long)]
        id: ProductId,

        /// Product title
        #[arg(long)]
        title: String,

        /// Unit price in dollars
        #[arg(long)]
        price: Price,

        /// Thumbnail URL
        #[arg(long)]
        thumbnail: String,

        /// Brand name
        #[arg(long)]
        brand: Option<String>,
    },
    /// Remove a product line
    Remove {
        /// Catalog product ID
        id: ProductId,
    },
    /// Set the quantity of a product line
    SetQuantity {
        /// Catalog product ID
        id: ProductId,

        /// New quantity (clamped to 1..=99)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Print the order summary and empty the cart
    Checkout,
}

fn main() {
    // Initialize tracing on stderr so stdout stays clean for cart output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shoppy_cli=warn,shoppyglobe_store=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = StoreConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }

    let mut out = std::io::stdout().lock();
    let mut session = commands::CartSession::open(&config);

    match cli.command {
        Commands::Show { json } => session.show(json, &mut out)?,
        Commands::Add {
            id,
            title,
            price,
            thumbnail,
            brand,
        } => {
            let mut product = shoppyglobe_core::cart::Product::new(id, title, price, thumbnail);
            product.brand = brand;
            session.add(product, &mut out)?;
        }
        Commands::Remove { id } => session.remove(id, &mut out)?,
        Commands::SetQuantity { id, quantity } => session.set_quantity(id, quantity, &mut out)?,
        Commands::Clear => session.clear(&mut out)?,
        Commands::Checkout => session.checkout(&mut out)?,
    }
    Ok(())
}
