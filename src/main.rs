#![allow(clippy::result_large_err)]

use dotenvy::dotenv;
use flex_gold_manager::{
    config::{admin::AdminCredentials, settings},
    core::{
        auth::Session,
        month::BillingMonth,
        report::{JsonExporter, TextExporter, format_rupees},
        seed,
        stats::count_vehicles_by_type,
        store::RecordStore,
    },
    errors::Result,
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load settings, falling back to defaults without config.toml
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load config.toml: {}", e))?;

    // 4. Sign in with the pair given on the command line
    let credentials = AdminCredentials::from_env()
        .inspect_err(|e| error!("Admin credentials missing: {}", e))?;
    let mut args = env::args().skip(1);
    let email = args.next().unwrap_or_default();
    let password = args.next().unwrap_or_default();

    let mut session = Session::new(credentials);
    let user = session
        .login(&email, &password)
        .inspect_err(|e| error!("Login failed: {}", e))?;
    println!("Signed in as {} <{}>", user.name, user.email);

    // 5. Open the store
    let store = RecordStore::connect(settings.dashboard.month_match)
        .await
        .inspect(|_| info!("Record store ready."))
        .inspect_err(|e| error!("Failed to open record store: {}", e))?;

    // 6. Seed sample data into an empty store
    if settings.seed.sample_data {
        seed::seed_sample_data(store.connection())
            .await
            .inspect_err(|e| error!("Failed to seed sample data: {}", e))?;
    }

    // 7. Dashboard overview
    let reference = BillingMonth::current();
    let stats = store.dashboard_stats_for(reference).await?;
    println!("Dashboard for {reference}");
    println!("  Total vehicles:     {}", stats.total_vehicles);
    println!("  Paid this month:    {}", stats.paid_vehicles);
    println!("  Pending payments:   {}", stats.pending_payments);
    println!(
        "  Monthly collection: {}",
        format_rupees(stats.monthly_collection)
    );
    println!(
        "  Gold stock value:   {}",
        format_rupees(stats.gold_stock_value)
    );
    for (vehicle_type, count) in count_vehicles_by_type(&store.vehicles().await?) {
        println!("  {vehicle_type}: {count}");
    }
    if stats.pending_alerts > 0 {
        println!("  {} payment(s) awaiting collection", stats.pending_alerts);
    }

    // 8. Export reports when a directory is configured
    if let Some(directory) = settings.export.directory.as_deref() {
        let mut written = store.export_reports(directory, &JsonExporter).await?;
        written.extend(store.export_reports(directory, &TextExporter).await?);
        info!("Wrote {} report files to {}", written.len(), directory.display());
    }

    session.logout();
    Ok(())
}
