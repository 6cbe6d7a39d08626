//! HTTP exposure: router assembly, telemetry and serving
//!
//! Every entity type gets the same surface, a `POST /{resource}/query`
//! endpoint accepting a [`crate::query::QueryRequest`] body, mounted
//! from one generic handler. The module also owns tracing
//! initialization, graceful shutdown and demo seeding.

pub mod handlers;

use anyhow::Result;
use axum::{
    Router,
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;
use crate::core::entity::Entity;
use crate::core::schema::Schema;
use crate::entities::{
    Branch, Lookup, LookupItem, Product, SalesInvoice, SalesInvoiceLine, Stakeholder, StockLevel,
    StockTransaction, User, stakeholder, stock_transaction,
};
pub use handlers::{AppState, ProvidesStore};

/// Mount the query route for one entity type
fn entity_routes<T>(router: Router<AppState>) -> Router<AppState>
where
    T: Entity + Schema + Serialize,
    AppState: ProvidesStore<T>,
{
    router
        .route(
            &format!("/{}/query", T::resource_name()),
            post(handlers::query::<T>),
        )
        .route(
            &format!("/{}/{{id}}", T::resource_name()),
            get(handlers::get_by_id::<T>),
        )
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let mut router = Router::new().route("/health", get(handlers::health));

    router = entity_routes::<Branch>(router);
    router = entity_routes::<Product>(router);
    router = entity_routes::<StockLevel>(router);
    router = entity_routes::<StockTransaction>(router);
    router = entity_routes::<SalesInvoice>(router);
    router = entity_routes::<SalesInvoiceLine>(router);
    router = entity_routes::<Stakeholder>(router);
    router = entity_routes::<User>(router);
    router = entity_routes::<Lookup>(router);
    router = entity_routes::<LookupItem>(router);

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Initialize tracing with the conventional `RUST_LOG` env filter
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Serve the application with graceful shutdown
///
/// Binds the configured address, serves requests, and handles SIGTERM
/// and SIGINT (Ctrl+C) for graceful shutdown.
pub async fn serve(config: &AppConfig, state: AppState) -> Result<()> {
    let app = router(state);
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        }
    }
}

/// Populate the stores with a small demonstration dataset
pub fn seed_demo_data(state: &AppState) -> Result<()> {
    let central = state.branches.insert(Branch::new(
        "Central".to_string(),
        "BR-01".to_string(),
        Some("12 Main St".to_string()),
        Some("+33612345678".to_string()),
        true,
    ))?;
    let north = state.branches.insert(Branch::new(
        "North".to_string(),
        "BR-02".to_string(),
        None,
        None,
        true,
    ))?;

    let paracetamol = state.products.insert(Product::new(
        "Paracetamol 500mg".to_string(),
        Some("paracetamol".to_string()),
        Some("4006381333931".to_string()),
        Some("tablet".to_string()),
        2.5,
        30,
        false,
    ))?;
    let amoxicillin = state.products.insert(Product::new(
        "Amoxicillin 250mg".to_string(),
        Some("amoxicillin".to_string()),
        Some("5901234123457".to_string()),
        Some("capsule".to_string()),
        6.0,
        20,
        true,
    ))?;
    state.products.insert(Product::new(
        "Cough Syrup 200ml".to_string(),
        None,
        None,
        Some("syrup".to_string()),
        4.5,
        10,
        false,
    ))?;

    state.stock_levels.insert(StockLevel::new(
        central.id,
        paracetamol.id,
        180,
        Some("LOT-2291".to_string()),
        NaiveDate::from_ymd_opt(2027, 6, 30),
        1.1,
    ))?;
    state.stock_levels.insert(StockLevel::new(
        north.id,
        amoxicillin.id,
        40,
        Some("LOT-1057".to_string()),
        NaiveDate::from_ymd_opt(2026, 12, 31),
        2.8,
    ))?;

    state.stock_transactions.insert(StockTransaction::new(
        central.id,
        paracetamol.id,
        stock_transaction::kind::PURCHASE.to_string(),
        200,
        1.1,
        Some("PO-1201".to_string()),
        Utc::now(),
    ))?;
    state.stock_transactions.insert(StockTransaction::new(
        central.id,
        paracetamol.id,
        stock_transaction::kind::SALE.to_string(),
        20,
        1.1,
        None,
        Utc::now(),
    ))?;

    let cashier = state.users.insert(User::new(
        "asaid".to_string(),
        "Amina Said".to_string(),
        Some("amina@pharmacy.example".to_string()),
        "cashier".to_string(),
        Some(central.id),
        true,
    ))?;
    state.users.insert(User::new(
        "jdoe".to_string(),
        "Jordan Doe".to_string(),
        None,
        "manager".to_string(),
        None,
        true,
    ))?;

    let customer = state.stakeholders.insert(Stakeholder::new(
        "Walk-in".to_string(),
        stakeholder::kind::CUSTOMER.to_string(),
        None,
        None,
        0.0,
    ))?;
    state.stakeholders.insert(Stakeholder::new(
        "MedSupply Co".to_string(),
        stakeholder::kind::SUPPLIER.to_string(),
        Some("+33655512345".to_string()),
        Some("sales@medsupply.example".to_string()),
        150.0,
    ))?;

    let invoice = state.invoices.insert(SalesInvoice::new(
        central.id,
        "INV-0001".to_string(),
        Some(customer.id),
        cashier.id,
        11.0,
        1.0,
        10.0,
        10.0,
        Utc::now(),
    ))?;
    state.invoice_lines.insert(SalesInvoiceLine::new(
        invoice.id,
        paracetamol.id,
        2,
        2.5,
        5.0,
    ))?;
    state.invoice_lines.insert(SalesInvoiceLine::new(
        invoice.id,
        amoxicillin.id,
        1,
        6.0,
        6.0,
    ))?;

    let payment_methods = state.lookups.insert(Lookup::new(
        "payment_method".to_string(),
        "Payment methods".to_string(),
    ))?;
    state.lookup_items.insert(LookupItem::new(
        payment_methods.id,
        "cash".to_string(),
        "Cash".to_string(),
        1,
        true,
    ))?;
    state.lookup_items.insert(LookupItem::new(
        payment_methods.id,
        "card".to_string(),
        "Card".to_string(),
        2,
        false,
    ))?;

    tracing::info!("Seeded demonstration data");
    Ok(())
}
