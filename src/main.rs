// Squadfit entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Load config
// 3. Open the service (catalogs, document store, upstream clients)
// 4. Fetch the configured owner's inventory
// 5. Print a best-fit report and a default-formation assignment as JSON lines

use squadfit::config;
use squadfit::service::Service;
use squadfit::squad::SlotRequest;

use anyhow::Context;
use tracing::info;

/// Slot-to-role defaults for the built-in 4-2-3-1 layout, used when the
/// caller supplies no role map of their own.
const DEFAULT_ROLE_MAP: &[(&str, &str)] = &[
    ("GK", "GK-Sweeper"),
    ("LB", "LB-Overlapper"),
    ("RB", "RB-Recovery"),
    ("CB1", "CB-Mobile"),
    ("CB2", "CB-Destroyer"),
    ("CDM1", "CDM-Holding"),
    ("CDM2", "CDM-Volante"),
    ("LM", "LM-Creative"),
    ("RM", "RM-Direct"),
    ("CAM", "CAM-Playmaker"),
    ("ST", "ST-Complete"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("squadfit starting up");

    let config = config::load_config().context("failed to load configuration")?;
    info!(
        owner = %config.inventory.owner_wallet,
        default_tier = %config.squad.default_tier,
        "config loaded"
    );
    let default_tier = config.squad.default_tier.clone();
    let owner = config.inventory.owner_wallet.clone();

    let service = Service::open(config).context("failed to open service")?;

    let players = service
        .inventory_report(&owner)
        .await
        .context("failed to fetch owner inventory")?;
    info!(count = players.len(), "inventory fetched");

    // Best-fit report: one JSON line per player.
    for (player, fit) in &players {
        let line = serde_json::json!({
            "player_id": player.id,
            "player_name": player.full_name(),
            "tier": fit.tier_name(),
            "role": fit.role_name(),
        });
        println!("{line}");
    }

    // Default-formation assignment over the same inventory.
    let role_map: Vec<SlotRequest> = DEFAULT_ROLE_MAP
        .iter()
        .map(|(slot, role)| SlotRequest {
            slot: (*slot).to_string(),
            role: (*role).to_string(),
        })
        .collect();
    let squad = service
        .assign_squad("4-2-3-1", &role_map, &default_tier)
        .await
        .context("failed to assign squad")?;
    println!("{}", serde_json::to_string(&squad)?);

    info!("squadfit finished");
    Ok(())
}

/// Initialize tracing to log to a file, keeping stdout clean for the
/// JSON report.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("squadfit.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("squadfit=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
