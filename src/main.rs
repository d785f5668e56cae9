use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::Table;
use configuration::Settings;
use core_types::{
    AvailabilityFilter, Donation, DonationFilter, DonationSummary, InventoryItem,
    InventorySummary, ResourceCategory, Volunteer, VolunteerFilter,
};
use database::{DashboardSnapshot, DbRepository};
use std::path::PathBuf;

/// The main entry point for the NGO Hub application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; DATABASE_URL may come from the environment or config.toml.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_config_from(&cli.config)?;
    let _log_guard = configuration::init_logging(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                settings.server.port = port;
            }
            web_server::run_server(&settings).await
        }
        Commands::CheckConnection => handle_check_connection(&settings).await,
        Commands::Migrate => {
            let pool = database::connect(&settings.database).await?;
            database::run_migrations(&pool).await?;
            println!("Migrations applied.");
            Ok(())
        }
        Commands::Stats { json } => {
            let repo = open_repository(&settings).await?;
            let snapshot = repo.dashboard(5, 5).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print_dashboard(&snapshot);
            }
            Ok(())
        }
        Commands::Volunteers { availability, search } => {
            let repo = open_repository(&settings).await?;
            let filter = VolunteerFilter { availability, search };
            let volunteers = repo.list_volunteers(&filter).await?;
            println!("{}", volunteer_table(&volunteers));
            println!("Showing {} volunteers", volunteers.len());
            Ok(())
        }
        Commands::Donations(args) => {
            let repo = open_repository(&settings).await?;
            let filter = DonationFilter {
                resource_type: args.resource_type,
                donor: args.donor,
                from: args.from,
                to: args.to,
            };
            let donations = repo.list_donations(&filter).await?;
            let summary = DonationSummary::from_donations(&donations);
            println!("{}", donation_table(&donations));
            println!(
                "{} donations, {} items, {} donors, {} resource types",
                summary.total_donations, summary.total_items, summary.unique_donors, summary.resource_types
            );
            Ok(())
        }
        Commands::Inventory { low_stock } => {
            let repo = open_repository(&settings).await?;
            let threshold = settings.inventory.low_stock_threshold;
            let items = if low_stock {
                repo.low_stock(threshold).await?
            } else {
                repo.list_inventory().await?
            };
            let summary = InventorySummary::from_items(&items, threshold);
            println!("{}", inventory_table(&items));
            println!(
                "{} item types, {} units in stock, {} below {}",
                summary.item_types,
                summary.total_stock,
                summary.low_stock.len(),
                threshold
            );
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Volunteer, donation and inventory management for an NGO.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file. Missing files fall back to defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve {
        /// Overrides `server.port` from the configuration.
        #[arg(long)]
        port: Option<u16>,
    },
    /// Verify that the database is reachable.
    CheckConnection,
    /// Apply the bundled schema migrations.
    Migrate,
    /// Print the dashboard headline numbers.
    Stats {
        /// Print the raw snapshot as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List volunteers ordered by name.
    Volunteers {
        #[arg(long, value_enum, default_value_t = AvailabilityFilter::All)]
        availability: AvailabilityFilter,
        /// Case-insensitive match on name or skills.
        #[arg(long)]
        search: Option<String>,
    },
    /// List donations, newest first.
    Donations(DonationArgs),
    /// List inventory levels ordered by item name.
    Inventory {
        /// Only items below the configured low-stock threshold.
        #[arg(long)]
        low_stock: bool,
    },
}

#[derive(Parser)]
struct DonationArgs {
    /// Exact resource type (e.g., "Books").
    #[arg(long)]
    resource_type: Option<String>,

    /// Case-insensitive match on the donor name.
    #[arg(long)]
    donor: Option<String>,

    /// Earliest donation date, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Latest donation date, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn open_repository(settings: &Settings) -> anyhow::Result<DbRepository> {
    let pool = database::connect(&settings.database).await?;
    if settings.database.run_migrations {
        database::run_migrations(&pool).await?;
    }
    Ok(DbRepository::new(pool))
}

async fn handle_check_connection(settings: &Settings) -> anyhow::Result<()> {
    let result = match database::connect(&settings.database).await {
        Ok(pool) => database::check_connection(&pool).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => {
            println!("Connected to the database.");
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Connection check failed.");
            Err(e.into())
        }
    }
}

fn print_dashboard(snapshot: &DashboardSnapshot) {
    println!(
        "Volunteers: {} total, {} available ({:.1}%)",
        snapshot.volunteers.total, snapshot.volunteers.available, snapshot.availability_rate
    );
    println!(
        "Donations: {} logged, {} items donated",
        snapshot.donations.total_donations, snapshot.donations.total_items
    );

    println!("\nLatest donations");
    println!("{}", donation_table(&snapshot.recent_donations));

    let mut top = Table::new();
    top.set_header(vec!["Resource Type", "Total Quantity"]);
    for row in &snapshot.top_resource_types {
        top.add_row(vec![row.resource_type.clone(), row.quantity.to_string()]);
    }
    println!("\nTop donated resources");
    println!("{top}");
}

fn volunteer_table(volunteers: &[Volunteer]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Email", "Phone", "Skills", "Available"]);
    for v in volunteers {
        table.add_row(vec![
            v.id.to_string(),
            v.name.clone(),
            v.email.clone(),
            v.phone.clone().unwrap_or_default(),
            v.skills.clone().unwrap_or_default(),
            if v.availability { "Yes" } else { "No" }.to_string(),
        ]);
    }
    table
}

fn donation_table(donations: &[Donation]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Donor", "Resource Type", "Quantity", "Date"]);
    for d in donations {
        table.add_row(vec![
            d.donor_name.clone(),
            resource_label(&d.resource_type),
            d.quantity.to_string(),
            d.donation_date.to_string(),
        ]);
    }
    table
}

// Free-text entries came in through the form's "Other" option.
fn resource_label(resource_type: &str) -> String {
    match ResourceCategory::from_name(resource_type) {
        Some(category) => category.to_string(),
        None => format!("{resource_type} (Other)"),
    }
}

fn inventory_table(items: &[InventoryItem]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Item Name", "Quantity Available"]);
    for item in items {
        table.add_row(vec![item.item_name.clone(), item.quantity_available.to_string()]);
    }
    table
}
