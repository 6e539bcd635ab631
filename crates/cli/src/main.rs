//! Corner Shop CLI - browse the catalog, fill a cart and check out.
//!
//! # Usage
//!
//! ```bash
//! shop products --category electronics
//! shop register --name "Ada" --email ada@example.com --password engine42
//! shop login --email ada@example.com --password engine42
//! shop cart add 9
//! shop cart inc 9
//! shop checkout --place --address "12 St James's Square"
//! shop orders
//! ```
//!
//! State (accounts, session, carts, orders) lives in one JSON file, see
//! [`config`] for its location.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use corner_shop_core::ProductId;
use corner_shop_storefront::catalog::CatalogClient;
use corner_shop_storefront::error::{AppError, set_sentry_user};
use corner_shop_storefront::identity::PrincipalSource;
use corner_shop_storefront::services::{AuthService, ProfileUpdate};
use corner_shop_storefront::storage::FileStore;

mod commands;
mod config;
mod terminal;

use commands::Shop;
use config::ShopConfig;

#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about = "Corner Shop terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products from the catalog
    Products {
        /// Only show this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List product categories
    Categories,
    /// Create an account
    Register {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Default shipping address
        #[arg(short, long)]
        address: Option<String>,
    },
    /// Log in
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Log out
    Logout,
    /// Show who is logged in
    Whoami,
    /// Edit the logged-in profile
    Profile {
        #[arg(short, long)]
        name: Option<String>,
        /// New shipping address (empty string clears it)
        #[arg(short, long)]
        address: Option<String>,
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Review the cart, or buy it with --place
    Checkout {
        /// Ship somewhere other than the profile address
        #[arg(short, long)]
        address: Option<String>,
        /// Place the order
        #[arg(long)]
        place: bool,
    },
    /// Show past orders
    Orders,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product by id
    Add { id: ProductId },
    /// Increase a product's quantity by one
    Inc { id: ProductId },
    /// Decrease a product's quantity by one (removes it at zero)
    Dec { id: ProductId },
    /// Remove a product
    Remove { id: ProductId },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ShopConfig) -> Option<sentry::ClientInitGuard> {
    use secrecy::ExposeSecret;

    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.expose_secret(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = match ShopConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Invalid configuration: {e}");
            }
            std::process::exit(2);
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Defaults to warnings only so command output stays readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shop=warn,corner_shop_storefront=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        e.report();
        #[allow(clippy::print_stderr)]
        {
            eprintln!("{}", e.user_message());
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &ShopConfig) -> Result<(), AppError> {
    let shop = Shop {
        store: FileStore::open(config.data_file.clone())?,
        catalog: CatalogClient::new(config.catalog_url.clone(), config.catalog_timeout)?,
    };

    if let Some(principal) = AuthService::new(&shop.store).current_principal() {
        set_sentry_user(principal.email.as_str());
    }

    match cli.command {
        Commands::Products { category } => {
            commands::catalog::list(&shop, category.as_deref()).await?;
        }
        Commands::Categories => commands::catalog::categories(&shop).await?,
        Commands::Register {
            name,
            email,
            password,
            address,
        } => commands::account::register(
            &shop,
            name,
            email,
            SecretString::from(password),
            address,
        )?,
        Commands::Login { email, password } => {
            commands::account::login(&shop, &email, &SecretString::from(password))?;
        }
        Commands::Logout => commands::account::logout(&shop),
        Commands::Whoami => commands::account::whoami(&shop),
        Commands::Profile {
            name,
            address,
            password,
        } => commands::account::profile(
            &shop,
            ProfileUpdate {
                name,
                address,
                password: password.map(SecretString::from),
            },
        )?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&shop),
            CartAction::Add { id } => commands::cart::add(&shop, id).await?,
            CartAction::Inc { id } => commands::cart::adjust(&shop, id, 1),
            CartAction::Dec { id } => commands::cart::adjust(&shop, id, -1),
            CartAction::Remove { id } => commands::cart::remove(&shop, id),
        },
        Commands::Checkout { address, place } => {
            commands::checkout::checkout(&shop, address.as_deref(), place)?;
        }
        Commands::Orders => commands::checkout::orders(&shop),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_cart_add() {
        let cli = Cli::try_parse_from(["shop", "cart", "add", "7"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Cart {
                action: CartAction::Add { id }
            }) if id == ProductId::new(7)
        ));
    }

    #[test]
    fn test_rejects_non_numeric_product_id() {
        assert!(Cli::try_parse_from(["shop", "cart", "dec", "seven"]).is_err());
    }
}
