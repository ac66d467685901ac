//! KopiKU CLI - a command-line front end for the storefront library.
//!
//! # Usage
//!
//! ```bash
//! # Browse the menu
//! kopiku menu
//! kopiku menu --search latte --category Coffee
//! kopiku menu --bestsellers
//! kopiku show 3
//!
//! # Manage the cart (persisted under the data directory)
//! kopiku cart add 3
//! kopiku cart update 3 -1
//! kopiku cart show
//! kopiku cart clear
//!
//! # Sign in and check out
//! kopiku login -e user@gmail.com -p password
//! kopiku checkout --name Bakti --address "Jl. Kopi No. 1" --phone 0812xxx
//! ```
//!
//! # Commands
//!
//! - `menu` / `show` - Browse the remote catalog
//! - `cart` - Add, update, list, and clear cart items
//! - `login` / `logout` / `profile` - The demo session
//! - `checkout` - Place an order from the current cart

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kopiku")]
#[command(author, version, about = "KopiKU coffee storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the coffee menu
    Menu {
        /// Filter by name (case-insensitive substring)
        #[arg(short, long, default_value = "")]
        search: String,

        /// Filter by category (Coffee, Non-Coffee, Snacks; default: all)
        #[arg(short, long, default_value = "All")]
        category: String,

        /// Show only bestsellers
        #[arg(short, long)]
        bestsellers: bool,

        /// Bypass the cache and refetch
        #[arg(short, long)]
        refresh: bool,
    },
    /// Show one product in detail
    Show {
        /// Product id
        id: String,
    },
    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in with the demo account
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in profile
    Profile,
    /// Place an order from the current cart
    Checkout {
        /// Recipient name
        #[arg(long)]
        name: String,

        /// Delivery address
        #[arg(long)]
        address: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product by id
    Add {
        /// Product id
        id: String,
    },
    /// Adjust a product's quantity by a signed delta
    Update {
        /// Product id
        id: String,
        /// Signed quantity delta (e.g. `-1` to decrement)
        #[arg(allow_negative_numbers = true)]
        delta: i64,
    },
    /// List the cart contents and total
    Show,
    /// Remove every item
    Clear,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Menu {
            search,
            category,
            bestsellers,
            refresh,
        } => commands::menu::list(&search, &category, bestsellers, refresh).await?,
        Commands::Show { id } => commands::menu::show(&id).await?,
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(&id).await?,
            CartAction::Update { id, delta } => commands::cart::update(&id, delta).await?,
            CartAction::Show => commands::cart::show().await?,
            CartAction::Clear => commands::cart::clear().await?,
        },
        Commands::Login { email, password } => commands::account::login(&email, &password).await?,
        Commands::Logout => commands::account::logout().await?,
        Commands::Profile => commands::account::profile().await?,
        Commands::Checkout {
            name,
            address,
            phone,
        } => commands::checkout::place(name, address, phone).await?,
    }
    Ok(())
}
