//! Clementine CLI - a terminal storefront over the state library.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! clementine browse --category Electronics --rating 4 --sort price-low
//!
//! # Manage the cart (state persists under the data directory)
//! clementine cart add 3 --quantity 2
//! clementine cart list
//! clementine cart totals
//!
//! # Sign in and place an order
//! clementine auth login -e jane@example.com -p hunter22
//! clementine checkout --delivery express
//! ```
//!
//! # Commands
//!
//! - `browse` - Filter, sort, and page through the catalog
//! - `cart` - Manage cart lines and the saved-for-later list
//! - `auth` - Mocked sign-in, registration, and session status
//! - `checkout` - Place a mock order from the selected cart lines

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand, ValueEnum};

use clementine_storefront::catalog::SortKey;
use clementine_storefront::config::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "clementine")]
#[command(author, version, about = "Clementine storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, sort, and page through the catalog
    Browse {
        /// Free-text search over product names
        #[arg(short, long)]
        search: Option<String>,

        /// Restrict to a category (repeatable)
        #[arg(short, long)]
        category: Vec<String>,

        /// Restrict to a brand (repeatable)
        #[arg(short, long)]
        brand: Vec<String>,

        /// Minimum star rating, e.g. 4 for "4 stars & up" (repeatable)
        #[arg(short, long)]
        rating: Vec<u8>,

        /// Lowest price to include, in dollars
        #[arg(long)]
        min_price: Option<String>,

        /// Highest price to include, in dollars
        #[arg(long)]
        max_price: Option<String>,

        /// Also show out-of-stock products
        #[arg(long)]
        include_out_of_stock: bool,

        /// Sort order
        #[arg(long, value_enum, default_value_t = SortArg::Relevance)]
        sort: SortArg,

        /// Page to show (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Manage cart lines and the saved-for-later list
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Mocked sign-in, registration, and session status
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
    /// Place a mock order from the selected cart lines
    Checkout {
        /// Shipping tier
        #[arg(long, value_enum, default_value_t = DeliveryArg::Standard)]
        delivery: DeliveryArg,

        /// Mark the order as a gift
        #[arg(long)]
        gift: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a catalog product to the cart
    Add {
        /// Catalog product id
        product_id: i32,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Show cart lines and the saved-for-later list
    List,
    /// Remove a line from the cart
    Remove {
        /// Cart line id
        item_id: String,
    },
    /// Change a line's quantity (0 removes it)
    SetQuantity {
        /// Cart line id
        item_id: String,

        /// New quantity
        quantity: u32,
    },
    /// Move a line to the saved-for-later list
    Save {
        /// Cart line id
        item_id: String,
    },
    /// Move a saved item back into the cart
    MoveToCart {
        /// Saved item id
        item_id: String,
    },
    /// Show cart totals
    Totals,
    /// Remove every line from the cart
    Clear,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Sign in with an email and password
    Login {
        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (any string of 6+ characters)
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account and sign in
    Register {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (any string of 6+ characters)
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the current session
    Status,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Relevance,
    PriceLow,
    PriceHigh,
    Rating,
    Newest,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Relevance => Self::Relevance,
            SortArg::PriceLow => Self::PriceLow,
            SortArg::PriceHigh => Self::PriceHigh,
            SortArg::Rating => Self::Rating,
            SortArg::Newest => Self::Newest,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DeliveryArg {
    Standard,
    Express,
    Overnight,
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
    let config = StorefrontConfig::load()?;

    match cli.command {
        Commands::Browse {
            search,
            category,
            brand,
            rating,
            min_price,
            max_price,
            include_out_of_stock,
            sort,
            page,
        } => commands::browse::run(
            &config,
            commands::browse::BrowseRequest {
                search,
                categories: category,
                brands: brand,
                ratings: rating,
                min_price,
                max_price,
                include_out_of_stock,
                sort: sort.into(),
                page,
            },
        )?,
        Commands::Cart { action } => match action {
            CartAction::Add {
                product_id,
                quantity,
            } => commands::cart::add(&config, product_id, quantity)?,
            CartAction::List => commands::cart::list(&config)?,
            CartAction::Remove { item_id } => commands::cart::remove(&config, &item_id)?,
            CartAction::SetQuantity { item_id, quantity } => {
                commands::cart::set_quantity(&config, &item_id, quantity)?;
            }
            CartAction::Save { item_id } => commands::cart::save(&config, &item_id)?,
            CartAction::MoveToCart { item_id } => {
                commands::cart::move_to_cart(&config, &item_id)?;
            }
            CartAction::Totals => commands::cart::totals(&config)?,
            CartAction::Clear => commands::cart::clear(&config)?,
        },
        Commands::Auth { action } => match action {
            AuthAction::Login { email, password } => {
                commands::auth::login(&config, email, password).await?;
            }
            AuthAction::Register {
                name,
                email,
                password,
            } => commands::auth::register(&config, name, email, password).await?,
            AuthAction::Logout => commands::auth::logout(&config)?,
            AuthAction::Status => commands::auth::status(&config)?,
        },
        Commands::Checkout { delivery, gift } => {
            let speed = match delivery {
                DeliveryArg::Standard => clementine_core::DeliverySpeed::Standard,
                DeliveryArg::Express => clementine_core::DeliverySpeed::Express,
                DeliveryArg::Overnight => clementine_core::DeliverySpeed::Overnight,
            };
            commands::checkout::run(&config, speed, gift).await?;
        }
    }
    Ok(())
}
