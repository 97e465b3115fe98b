//! CLI module for the TinyToTrend terminal client.
//!
//! Each subcommand drives the same flow a storefront or admin page does:
//! - `login`, `admin-login`, `register`, `logout`, `whoami` - account pages
//! - `products list|show` - storefront grid and product detail
//! - `cart ...`, `wishlist ...`, `orders`, `checkout` - shopper pages
//! - `admin ...` - admin panel tabs
//! - `config check` - validate configuration file

mod payment;

pub use payment::TerminalPaymentWidget;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::account::{Account, Registration};
use crate::admin::{AdminPanel, DashboardStats, ProductForm};
use crate::api::ApiClient;
use crate::checkout::{Checkout, CheckoutState, ShippingDetails};
use crate::config::Config;
use crate::error::ClientError;
use crate::format::{format_price, truncate};
use crate::listing::{LoadOutcome, Paginator};
use crate::models::{AdminStats, ProductFilter, SortOrder};
use crate::session::{FileStore, SessionContext};
use crate::store::{CartService, NavBadges, ToggleOutcome, WishlistService};
use crate::view::{CartView, OrderCard, OrderRow, ProductCard, ProductGrid, ProductRow, UserRow, WishlistCard, NO_PRODUCTS_MESSAGE};

/// CLI arguments structure
#[derive(Parser, Debug)]
#[command(name = "tinytotrend")]
#[command(author, version, about = "Storefront and admin client for the TinyToTrend shop", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "tinytotrend.toml")]
    pub config: PathBuf,

    /// Override log level
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Backend API base URL (overrides [api].base_url)
    #[arg(long, env = "TINYTOTREND_API_URL")]
    pub api_url: Option<String>,

    /// Session file (overrides [session].path)
    #[arg(long)]
    pub session_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in as a shopper
    Login {
        email: String,
        #[arg(long)]
        password: String,
        /// Page to continue to after login
        #[arg(long = "return")]
        return_to: Option<String>,
    },

    /// Log in through the admin tab (ADMIN accounts only)
    AdminLogin {
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account
    Register {
        name: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long = "confirm")]
        confirm_password: String,
        /// Accept the terms and conditions
        #[arg(long)]
        accept_terms: bool,
    },

    /// Clear the stored session
    Logout,

    /// Show the stored session and nav badges
    Whoami,

    /// Storefront catalogue
    #[command(subcommand)]
    Products(ProductsCommands),

    /// Shopping cart
    #[command(subcommand)]
    Cart(CartCommands),

    /// Wishlist
    #[command(subcommand)]
    Wishlist(WishlistCommands),

    /// Order history
    Orders,

    /// Place an order for the current cart and pay for it
    Checkout {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: String,
        #[arg(long)]
        mobile: String,
    },

    /// Admin panel
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Configuration management commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
pub enum ProductsCommands {
    /// List products, one page at a time
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// priceAsc or priceDesc
        #[arg(long)]
        sort: Option<SortOrder>,
        /// Number of pages to load ("Load More" presses + 1)
        #[arg(long, default_value = "1")]
        pages: u32,
    },
    /// Show one product
    Show { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum CartCommands {
    Show,
    Add {
        product_id: i64,
        #[arg(short, long, default_value = "1", allow_hyphen_values = true)]
        quantity: i64,
    },
    Update {
        item_id: i64,
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    Remove { item_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum WishlistCommands {
    Show,
    Add { product_id: i64 },
    Remove { item_id: i64 },
    /// Move a wishlist entry into the cart
    Move { item_id: i64 },
    /// Add the product if absent, remove it if present
    Toggle { product_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Dashboard counters
    Stats,
    Products,
    Orders,
    Users,
    /// Create a product, or update one when --id is given
    SaveProduct {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        stock: String,
        #[arg(long, default_value = "")]
        gender: String,
        #[arg(long, default_value = "")]
        image: String,
    },
    DeleteProduct { id: i64 },
    Analytics,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate configuration file
    Check,
}

// ============================================================================
// Setup
// ============================================================================

/// Resolve the effective configuration: file, then CLI overrides.
pub fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::load(&cli.config)?;
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(path) = &cli.session_file {
        config.session.path = path.clone();
    }
    Ok(config)
}

fn create_client(config: &Config) -> Result<ApiClient> {
    let store = FileStore::open(&config.session.path).with_context(|| {
        format!(
            "Failed to open session file {}",
            config.session.path.display()
        )
    })?;
    ApiClient::new(&config.api, SessionContext::new(store))
}

/// Turn a client error into something a terminal user can act on.
fn explain(err: ClientError) -> anyhow::Error {
    match err {
        ClientError::NotAuthenticated(route) => anyhow::anyhow!(
            "Login required (would redirect to {}). Run `tinytotrend login` first.",
            route
        ),
        other => anyhow::Error::new(other),
    }
}

/// Run a CLI command
pub async fn run_command(cli: &Cli, config: Config) -> Result<()> {
    if let Commands::Config(ConfigCommands::Check) = &cli.command {
        return cmd_config_check(cli);
    }

    let api = create_client(&config)?;
    match &cli.command {
        Commands::Login {
            email,
            password,
            return_to,
        } => cmd_login(&api, email, password, return_to.as_deref()).await,
        Commands::AdminLogin { email, password } => cmd_admin_login(&api, email, password).await,
        Commands::Register {
            name,
            email,
            password,
            confirm_password,
            accept_terms,
        } => {
            let registration = Registration {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
                confirm_password: confirm_password.clone(),
                accepted_terms: *accept_terms,
            };
            cmd_register(&api, &registration).await
        }
        Commands::Logout => cmd_logout(&api),
        Commands::Whoami => cmd_whoami(&api).await,
        Commands::Products(ProductsCommands::List {
            search,
            category,
            gender,
            sort,
            pages,
        }) => {
            let filter = ProductFilter {
                search: search.clone(),
                category: category.clone(),
                gender: gender.clone(),
                sort: *sort,
            };
            cmd_products_list(&api, &config, filter, *pages).await
        }
        Commands::Products(ProductsCommands::Show { id }) => cmd_product_show(&api, *id).await,
        Commands::Cart(command) => cmd_cart(&api, command).await,
        Commands::Wishlist(command) => cmd_wishlist(&api, command).await,
        Commands::Orders => cmd_orders(&api).await,
        Commands::Checkout {
            name,
            address,
            mobile,
        } => cmd_checkout(&api, name.as_deref(), address, mobile).await,
        Commands::Admin(command) => cmd_admin(api, command).await,
        Commands::Config(ConfigCommands::Check) => Ok(()),
    }
}

// ============================================================================
// Account
// ============================================================================

async fn cmd_login(api: &ApiClient, email: &str, password: &str, return_to: Option<&str>) -> Result<()> {
    let account = Account::new(api.clone());
    if let Some(destination) = account.redirect_if_logged_in() {
        println!("Already logged in. Continue at {}", destination);
        return Ok(());
    }

    let outcome = account
        .login(email, password, return_to)
        .await
        .map_err(explain)?;
    println!(
        "Logged in as {} ({})",
        outcome.session.display_name(),
        outcome.session.role
    );
    println!("Continue at {}", outcome.destination);
    Ok(())
}

async fn cmd_admin_login(api: &ApiClient, email: &str, password: &str) -> Result<()> {
    let outcome = Account::new(api.clone())
        .admin_login(email, password)
        .await
        .map_err(explain)?;
    println!("Logged in as admin {}", outcome.session.display_name());
    println!("Continue at {}", outcome.destination);
    Ok(())
}

async fn cmd_register(api: &ApiClient, registration: &Registration) -> Result<()> {
    let next = Account::new(api.clone())
        .register(registration)
        .await
        .map_err(explain)?;
    println!("Registration successful! Please log in.");
    println!("Continue at {}", next);
    Ok(())
}

fn cmd_logout(api: &ApiClient) -> Result<()> {
    let next = Account::new(api.clone()).logout().map_err(explain)?;
    println!("Logged out. Continue at {}", next);
    Ok(())
}

async fn cmd_whoami(api: &ApiClient) -> Result<()> {
    let Some(session) = api.session().load() else {
        println!("Not logged in.");
        return Ok(());
    };

    let badges = NavBadges::fetch(api).await;

    println!();
    println!("Name:     {}", session.display_name());
    println!("Email:    {}", session.email.as_deref().unwrap_or("-"));
    println!("User ID:  {}", session.user_id.as_deref().unwrap_or("-"));
    println!("Role:     {}", session.role);
    println!("Cart:     {}", badges.cart);
    if badges.wishlist_visible() {
        println!("Wishlist: {}", badges.wishlist);
    }
    println!();
    Ok(())
}

// ============================================================================
// Storefront
// ============================================================================

async fn cmd_products_list(api: &ApiClient, config: &Config, filter: ProductFilter, pages: u32) -> Result<()> {
    let listing = Paginator::with_filter(Arc::new(api.clone()), config.listing.page_size, filter);

    listing.reset_and_load().await.map_err(ClientError::from).map_err(explain)?;
    for _ in 1..pages.max(1) {
        if listing.load_more().await? == LoadOutcome::Skipped {
            break;
        }
    }

    match ProductGrid::from_snapshot(&listing.snapshot()) {
        ProductGrid::Loading => println!("Loading..."),
        ProductGrid::Empty => println!("{}", NO_PRODUCTS_MESSAGE),
        ProductGrid::Error(message) => anyhow::bail!("{}", message),
        ProductGrid::Items {
            cards,
            load_more_visible,
        } => {
            print_product_cards(&cards);
            if load_more_visible {
                println!("More products available: pass --pages {}", pages.max(1) + 1);
            }
        }
    }
    Ok(())
}

fn print_product_cards(cards: &[ProductCard]) {
    println!();
    println!(
        "{:<6}  {:<32}  {:<12}  {:>12}  {:<12}",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK"
    );
    println!("{}", "-".repeat(82));
    for card in cards {
        println!(
            "{:<6}  {:<32}  {:<12}  {:>12}  {:<12}",
            card.id,
            truncate(&card.name, 32),
            truncate(&card.category, 12),
            card.price,
            if card.in_stock { "In stock" } else { "Out of stock" }
        );
    }
    println!();
}

async fn cmd_product_show(api: &ApiClient, id: i64) -> Result<()> {
    let product = api.product(id).await.context("Product not found")?;
    let card = ProductCard::from(&product);

    println!();
    println!("=== {} ===", product.name);
    println!();
    println!("Price:       {}", card.price);
    println!("Category:    {}", card.category);
    if let Some(tag) = &product.gender_tag {
        println!("For:         {}", tag);
    }
    println!(
        "Stock:       {}",
        if card.in_stock {
            format!("{} available", product.stock_qty)
        } else {
            "Out of stock".to_string()
        }
    );
    println!("Image:       {}", card.image);
    if let Some(description) = &product.description {
        println!();
        println!("{}", description);
    }

    if api.session().is_authenticated() {
        let wishlist = WishlistService::new(api.clone());
        if wishlist.load().await.is_ok() {
            println!();
            println!(
                "Wishlist:    {}",
                if wishlist.contains(id) { "saved" } else { "not saved" }
            );
        }
    }
    println!();
    Ok(())
}

// ============================================================================
// Cart & wishlist
// ============================================================================

async fn cmd_cart(api: &ApiClient, command: &CartCommands) -> Result<()> {
    let cart = CartService::new(api.clone());
    let items = match command {
        CartCommands::Show => cart.load().await,
        CartCommands::Add {
            product_id,
            quantity,
        } => {
            let product = api.product(*product_id).await.context("Product not found")?;
            // the detail page caps the selector at the stock level
            let quantity = if *quantity < 1 {
                *quantity
            } else {
                let requested = u32::try_from(*quantity).unwrap_or(u32::MAX);
                i64::from(product.clamp_quantity(requested))
            };
            cart.add(*product_id, quantity).await
        }
        CartCommands::Update { item_id, quantity } => cart.update_quantity(*item_id, *quantity).await,
        CartCommands::Remove { item_id } => cart.remove(*item_id).await,
    }
    .map_err(explain)?;

    let view = CartView::new(&items);
    if view.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    println!();
    println!(
        "{:<6}  {:<32}  {:>12}  {:>4}  {:>12}",
        "ITEM", "PRODUCT", "PRICE", "QTY", "TOTAL"
    );
    println!("{}", "-".repeat(74));
    for line in &view.lines {
        println!(
            "{:<6}  {:<32}  {:>12}  {:>4}  {:>12}",
            line.item_id,
            truncate(&line.name, 32),
            line.unit_price,
            line.quantity,
            line.line_total
        );
    }
    println!();
    println!("Subtotal: {}   Delivery: FREE   Items: {}", view.subtotal, view.badge);
    println!();
    Ok(())
}

async fn cmd_wishlist(api: &ApiClient, command: &WishlistCommands) -> Result<()> {
    let wishlist = WishlistService::new(api.clone());
    let items = match command {
        WishlistCommands::Show => wishlist.load().await,
        WishlistCommands::Add { product_id } => wishlist.add(*product_id).await,
        WishlistCommands::Remove { item_id } => wishlist.remove(*item_id).await,
        WishlistCommands::Move { item_id } => {
            let current = wishlist.load().await.map_err(explain)?;
            let item = current
                .iter()
                .find(|item| item.id == *item_id)
                .with_context(|| format!("Wishlist entry {} not found", item_id))?;
            let cart = CartService::new(api.clone());
            let outcome = wishlist.move_to_cart(item, &cart).await.map_err(explain)?;
            if let Err(e) = &outcome.wishlist_removal {
                println!("[!] Added to cart, but the wishlist entry could not be removed: {}", e);
            } else {
                println!("Moved to cart.");
            }
            Ok(outcome.wishlist)
        }
        WishlistCommands::Toggle { product_id } => match wishlist.toggle(*product_id).await {
            Ok(ToggleOutcome::Added) => {
                println!("Added to wishlist.");
                Ok(wishlist.cached().unwrap_or_default())
            }
            Ok(ToggleOutcome::Removed) => {
                println!("Removed from wishlist.");
                Ok(wishlist.cached().unwrap_or_default())
            }
            Err(e) => Err(e),
        },
    }
    .map_err(explain)?;

    if items.is_empty() {
        println!("Your wishlist is empty.");
        return Ok(());
    }

    println!();
    println!("{:<6}  {:<8}  {:<32}  {:>12}", "ENTRY", "PRODUCT", "NAME", "PRICE");
    println!("{}", "-".repeat(64));
    for card in items.iter().map(WishlistCard::from) {
        println!(
            "{:<6}  {:<8}  {:<32}  {:>12}",
            card.item_id,
            card.product.id,
            truncate(&card.product.name, 32),
            card.product.price
        );
    }
    println!();
    Ok(())
}

// ============================================================================
// Orders & checkout
// ============================================================================

async fn cmd_orders(api: &ApiClient) -> Result<()> {
    let account = Account::new(api.clone());
    let stats = account.profile_stats().await.map_err(explain)?;
    let orders = account.order_history().await.map_err(explain)?;

    println!();
    println!("Cart items: {}   Orders: {}", stats.cart_items, stats.orders);
    println!();

    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }

    for card in orders.iter().map(OrderCard::from) {
        println!("Order #{}  {}  [{}]", card.id, card.date, card.status);
        for item in &card.items {
            println!("    {}", item);
        }
        println!("    Total: {}", card.total);
        println!();
    }
    Ok(())
}

async fn cmd_checkout(api: &ApiClient, name: Option<&str>, address: &str, mobile: &str) -> Result<()> {
    let checkout = Checkout::new(api.clone());
    let summary = checkout.load_summary().await.map_err(explain)?;

    println!();
    println!("=== Order Summary ===");
    for line in &summary.lines {
        println!("  {:<32} {}", truncate(&line.name, 32), line.price_label());
    }
    println!();
    println!("Subtotal: {}", format_price(summary.subtotal));
    println!("Delivery: {}", summary.delivery_label());
    println!("Total:    {}", format_price(summary.total));
    println!();

    if !checkout.submit_enabled() {
        println!("Your cart is empty");
        return Ok(());
    }

    let session_name = api.session().load().and_then(|s| s.user_name);
    let name = name.map(str::to_string).or(session_name).unwrap_or_default();
    let details = ShippingDetails::new(&name, address, mobile);

    let state = checkout
        .place_order(&details, &TerminalPaymentWidget)
        .await
        .map_err(explain)?;
    if let Some(message) = state.message() {
        println!("{}", message);
    }
    match state {
        CheckoutState::Succeeded { .. } => Ok(()),
        CheckoutState::Cancelled { .. } => Ok(()),
        _ => anyhow::bail!("Checkout did not complete"),
    }
}

// ============================================================================
// Admin
// ============================================================================

async fn cmd_admin(api: ApiClient, command: &AdminCommands) -> Result<()> {
    let panel = AdminPanel::open(api).map_err(explain)?;

    match command {
        AdminCommands::Stats => {
            let stats = panel.dashboard_stats().await.map_err(explain)?;
            print_dashboard(&stats);
        }
        AdminCommands::Products => {
            let products = panel.products().await.map_err(explain)?;
            print_product_rows(&products.iter().map(ProductRow::from).collect::<Vec<_>>());
        }
        AdminCommands::Orders => {
            let orders = panel.orders().await.map_err(explain)?;
            print_order_rows(&orders.iter().map(OrderRow::from).collect::<Vec<_>>());
        }
        AdminCommands::Users => {
            let users = panel.users().await.map_err(explain)?;
            print_user_rows(&users.iter().map(UserRow::from).collect::<Vec<_>>());
        }
        AdminCommands::SaveProduct {
            id,
            name,
            description,
            category,
            price,
            stock,
            gender,
            image,
        } => {
            let form = ProductForm {
                id: id.clone(),
                name: name.clone(),
                description: description.clone(),
                category: category.clone(),
                price: price.clone(),
                stock_qty: stock.clone(),
                gender_tag: gender.clone(),
                image_url: image.clone(),
            };
            let refresh = panel.save_product(&form).await.map_err(explain)?;
            println!("Product saved.");
            print_product_rows(&refresh.products.iter().map(ProductRow::from).collect::<Vec<_>>());
            if let Some(stats) = &refresh.stats {
                print_dashboard(stats);
            }
        }
        AdminCommands::DeleteProduct { id } => {
            let refresh = panel.delete_product(*id).await.map_err(explain)?;
            println!("Product {} deleted.", id);
            print_product_rows(&refresh.products.iter().map(ProductRow::from).collect::<Vec<_>>());
        }
        AdminCommands::Analytics => match panel.analytics().await {
            Ok(stats) => print_analytics(&stats),
            Err(e) => {
                tracing::warn!(error = %e, "Analytics unavailable");
                println!("Failed to load analytics.");
            }
        },
    }
    Ok(())
}

fn print_dashboard(stats: &DashboardStats) {
    println!();
    println!("=== Dashboard ===");
    println!();
    println!("Products:   {}", stats.products);
    println!("Users:      {}", stats.users);
    println!("Orders:     {}", stats.orders);
    println!("Sales:      {}", format_price(stats.sales));
    if let Some(pending) = stats.pending_orders {
        println!("Pending:    {}", pending);
    }
    if let Some(low) = stats.low_stock_products {
        println!("Low stock:  {}", low);
    }
    println!();
}

fn print_analytics(stats: &AdminStats) {
    println!();
    println!("Total Orders:   {}", stats.total_orders);
    println!("Total Revenue:  {}", format_price(stats.total_revenue.unwrap_or(0.0)));
    println!("Products:       {}", stats.total_products);
    println!("Users:          {}", stats.total_users);
    println!();
}

fn print_product_rows(rows: &[ProductRow]) {
    println!();
    println!(
        "{:<6}  {:<28}  {:<12}  {:>12}  {:>6}  {:<10}",
        "ID", "NAME", "CATEGORY", "PRICE", "STOCK", "GENDER"
    );
    println!("{}", "-".repeat(84));
    for row in rows {
        println!(
            "{:<6}  {:<28}  {:<12}  {:>12}  {:>6}  {:<10}",
            row.id,
            truncate(&row.name, 28),
            truncate(&row.category, 12),
            row.price,
            row.stock_qty,
            row.gender_tag
        );
    }
    println!();
}

fn print_order_rows(rows: &[OrderRow]) {
    println!();
    println!(
        "{:<6}  {:<26}  {:>12}  {:<16}  {:<8}  {:<22}  {:<12}",
        "ID", "CUSTOMER", "TOTAL", "STATUS", "PAYMENT", "PAYMENT ID", "DATE"
    );
    println!("{}", "-".repeat(114));
    for row in rows {
        println!(
            "{:<6}  {:<26}  {:>12}  {:<16}  {:<8}  {:<22}  {:<12}",
            row.id,
            truncate(&row.customer, 26),
            row.total,
            row.status,
            row.payment.label,
            truncate(&row.payment_id, 22),
            row.date
        );
    }
    println!();
}

fn print_user_rows(rows: &[UserRow]) {
    println!();
    println!(
        "{:<6}  {:<24}  {:<30}  {:<6}  {:<12}",
        "ID", "NAME", "EMAIL", "ROLE", "JOINED"
    );
    println!("{}", "-".repeat(86));
    for row in rows {
        println!(
            "{:<6}  {:<24}  {:<30}  {:<6}  {:<12}",
            row.id,
            truncate(&row.name, 24),
            truncate(&row.email, 30),
            row.role,
            row.joined
        );
    }
    println!();
}

// ============================================================================
// Config
// ============================================================================

fn cmd_config_check(cli: &Cli) -> Result<()> {
    let config_path = &cli.config;

    println!("Checking configuration file: {}", config_path.display());
    println!();

    if !config_path.exists() {
        println!(
            "[!!] Configuration file not found: {}",
            config_path.display()
        );
        println!();
        println!("Defaults will be used.");
        println!("To customise, copy tinytotrend.example.toml to tinytotrend.toml");
        return Ok(());
    }

    match Config::load(config_path) {
        Ok(config) => {
            println!("[OK] Configuration file is valid!");
            println!();
            println!("API:");
            println!("  Base URL:     {}", config.api.base_url);
            println!(
                "  User agent:   {}",
                config.api.user_agent.as_deref().unwrap_or("(default)")
            );
            println!();
            println!("Session:");
            println!("  File:         {}", config.session.path.display());
            println!();
            println!("Listing:");
            println!("  Page size:    {}", config.listing.page_size);
            println!("  Debounce:     {} ms", config.listing.search_debounce_ms);
            println!();
            println!("Logging:");
            println!("  Level:        {}", config.logging.level);
            println!();

            let mut warnings = Vec::new();
            if !config.api.base_url.starts_with("https://") {
                warnings.push("API base URL is not HTTPS - the bearer token is sent in clear text");
            }
            if config.listing.page_size == 0 {
                warnings.push("listing.page_size is 0 - a page size of 1 will be used");
            }
            if !warnings.is_empty() {
                println!("Warnings:");
                for warning in warnings {
                    println!("  [!] {}", warning);
                }
                println!();
            }
            Ok(())
        }
        Err(e) => {
            println!("[!!] Configuration file is invalid!");
            println!();
            println!("Error: {:#}", e);
            println!();
            anyhow::bail!("Invalid configuration file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_products_list() {
        let cli = Cli::try_parse_from([
            "tinytotrend",
            "products",
            "list",
            "--search",
            "shirt",
            "--sort",
            "priceDesc",
            "--pages",
            "2",
        ])
        .unwrap();
        match cli.command {
            Commands::Products(ProductsCommands::List {
                search, sort, pages, ..
            }) => {
                assert_eq!(search.as_deref(), Some("shirt"));
                assert_eq!(sort, Some(SortOrder::PriceDesc));
                assert_eq!(pages, 2);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_negative_quantity_reaches_validation() {
        let cli = Cli::try_parse_from(["tinytotrend", "cart", "update", "5", "-2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Cart(CartCommands::Update {
                item_id: 5,
                quantity: -2
            })
        ));
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let cli = Cli::try_parse_from([
            "tinytotrend",
            "--config",
            "/nonexistent/tinytotrend.toml",
            "--api-url",
            "http://shop.test/api",
            "--session-file",
            "/tmp/s.json",
            "logout",
        ])
        .unwrap();
        let config = effective_config(&cli).unwrap();
        assert_eq!(config.api.base_url, "http://shop.test/api");
        assert_eq!(config.session.path, PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn test_login_requirement_is_explained() {
        let err = explain(ClientError::NotAuthenticated(crate::routes::Route::login_returning_to(
            "/cart.html",
        )));
        assert!(err.to_string().contains("tinytotrend login"));
    }
}
