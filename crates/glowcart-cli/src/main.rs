use clap::{Parser, Subcommand, ValueEnum};
use glowcart_catalog::CategoryFilter;
use glowcart_core::PaymentMethod;
use glowcart_store::AppState;
use tracing_subscriber::EnvFilter;

mod catalog;
mod checkout;
mod session;
mod shopping;

#[derive(Debug, Parser)]
#[command(name = "glowcart")]
#[command(about = "Browse the makeup catalog, keep favorites and a cart, and check out")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, optionally narrowed by category and search text.
    Products {
        /// `all`, `eyes`, `skin`, `lips` or `nails`.
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        #[arg(long)]
        search: Option<String>,
        /// Only show favorited products.
        #[arg(long)]
        favorites: bool,
    },
    /// Show one product.
    Product { id: i64 },
    Favorites {
        #[command(subcommand)]
        command: FavoriteCommands,
    },
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Path to continue to after signing in.
        #[arg(long)]
        from: Option<String>,
    },
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
        #[arg(long)]
        from: Option<String>,
    },
    Logout,
    Whoami,
    /// Place an order for everything in the cart. Requires a signed-in user.
    Checkout(CheckoutArgs),
}

#[derive(Debug, Subcommand)]
enum FavoriteCommands {
    Toggle { id: i64 },
    List,
}

#[derive(Debug, Subcommand)]
enum CartCommands {
    Add {
        id: i64,
        #[arg(long, default_value_t = 1)]
        qty: u32,
    },
    Inc {
        id: i64,
        #[arg(long, default_value_t = 1)]
        step: u32,
    },
    Dec {
        id: i64,
        #[arg(long, default_value_t = 1)]
        step: u32,
    },
    Remove {
        id: i64,
    },
    Clear,
    Show,
}

/// Address fields left out fall back to the signed-in user's profile where
/// one exists.
#[derive(Debug, clap::Args)]
struct CheckoutArgs {
    #[arg(long)]
    full_name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long, default_value = "")]
    line1: String,
    #[arg(long, default_value = "")]
    city: String,
    #[arg(long, default_value = "")]
    zip: String,
    #[arg(long, value_enum, default_value_t = PaymentArg::Card)]
    payment: PaymentArg,
    #[arg(long, default_value = "")]
    card_holder: String,
    #[arg(long, default_value = "")]
    card_number: String,
    /// `MM/YY`.
    #[arg(long, default_value = "")]
    card_expiry: String,
    #[arg(long, default_value = "")]
    card_cvc: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PaymentArg {
    Card,
    Pix,
    Boleto,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Card => PaymentMethod::Card,
            PaymentArg::Pix => PaymentMethod::Pix,
            PaymentArg::Boleto => PaymentMethod::Boleto,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = glowcart_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut state = AppState::open(&config)?;
    tracing::debug!(data_dir = %config.data_dir.display(), "client state opened");

    match cli.command {
        Commands::Products {
            category,
            search,
            favorites,
        } => {
            catalog::run_products(
                &config,
                &mut state,
                category,
                search.unwrap_or_default(),
                favorites,
            )
            .await?;
        }
        Commands::Product { id } => catalog::run_product(&config, &state, id).await?,
        Commands::Favorites { command } => match command {
            FavoriteCommands::Toggle { id } => shopping::run_favorite_toggle(&mut state, id),
            FavoriteCommands::List => shopping::run_favorite_list(&config, &state).await?,
        },
        Commands::Cart { command } => {
            match command {
                CartCommands::Add { id, qty } => {
                    shopping::run_cart_add(&config, &mut state, id, qty).await?;
                }
                CartCommands::Inc { id, step } => state.cart.increment(id, step),
                CartCommands::Dec { id, step } => state.cart.decrement(id, step),
                CartCommands::Remove { id } => state.cart.remove_all(id),
                CartCommands::Clear => state.cart.clear(),
                CartCommands::Show => {}
            }
            shopping::print_cart(&state);
        }
        Commands::Login {
            email,
            password,
            from,
        } => session::run_login(&mut state, &email, &password, from.as_deref()).await?,
        Commands::Register {
            name,
            email,
            password,
            confirm,
            from,
        } => {
            session::run_register(&mut state, &name, &email, &password, &confirm, from.as_deref())
                .await?;
        }
        Commands::Logout => session::run_logout(&mut state),
        Commands::Whoami => session::run_whoami(&state),
        Commands::Checkout(args) => checkout::run_checkout(&mut state, args).await?,
    }

    Ok(())
}
