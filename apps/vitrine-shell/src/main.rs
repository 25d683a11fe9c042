use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use composekit::{DiscoveryOptions, LoadOptions, RegistryPort, SharedScope};
use tenancy::{builtin_tenants, MemoryStyleTarget, TenantProvider, DEFAULT_TENANT, TENANCY_DEP, TENANCY_VERSION};
use vitrine_bootstrap::{AppConfig, CliArgs};

use vitrine_shell::{modules::ModuleId, remotes, Shell, TenantRoute};

/// Vitrine Shell - multi-tenant storefront composition platform
#[derive(Parser)]
#[command(name = "vitrine-shell")]
#[command(about = "Vitrine Shell - composes remote storefront modules at runtime")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tenant to activate at boot (overrides config)
    #[arg(short, long)]
    tenant: Option<String>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the shell and serve until Ctrl+C
    Run,
    /// Walk every feature-enabled module across all tenants and exit
    Tour,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        tenant: cli.tenant.clone(),
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Layered config: defaults -> YAML (if provided) -> env (VITRINE__*) -> CLI
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    vitrine_bootstrap::init_logging(config.logging.as_ref());
    tracing::info!("Vitrine Shell starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_shell(config).await,
        Commands::Tour => run_tour(config).await,
        Commands::Check => check_config(config).await,
    }
}

/// Build the composition root: style target, tenant provider, shared scope,
/// registry handle, and the shell itself.
fn bootstrap_shell(config: &AppConfig) -> Result<Shell> {
    let style = Arc::new(MemoryStyleTarget::new());
    let tenants = Arc::new(
        TenantProvider::new(
            builtin_tenants(),
            DEFAULT_TENANT,
            style,
            Duration::from_millis(config.shell.tenant_switch_latency_ms),
        )
        .context("tenant provider bootstrap failed")?,
    );

    let scope = Arc::new(SharedScope::new());
    scope
        .provide(TENANCY_DEP, TENANCY_VERSION, tenants.clone())
        .context("failed to share the tenant provider")?;

    let registry: Arc<dyn RegistryPort> = composekit::global();
    let load_opts = LoadOptions {
        discovery: DiscoveryOptions {
            max_attempts: config.loader.max_attempts,
            interval: Duration::from_millis(config.loader.interval_ms),
        },
        init_timeout: Duration::from_millis(config.loader.init_timeout_ms),
    };

    let initial: ModuleId = config
        .shell
        .default_module
        .parse()
        .context("invalid shell.default_module")?;

    Shell::new(registry, scope, tenants, load_opts, initial).context("shell bootstrap failed")
}

async fn run_shell(config: AppConfig) -> Result<()> {
    tracing::info!("Spawning remote deliveries...");
    let spawned = remotes::spawn_deliveries(composekit::global(), &config);
    tracing::info!(spawned, "Remote deliveries scheduled");

    let mut shell = bootstrap_shell(&config)?;

    // Boot navigation goes through the route handler so an unknown tenant id
    // redirects instead of failing.
    match shell.navigate_tenant(&config.shell.default_tenant).await? {
        TenantRoute::Direct(tenant) => tracing::info!(tenant = %tenant.id, "Tenant routed"),
        TenantRoute::Redirected { requested, tenant } => {
            tracing::warn!(requested = %requested, tenant = %tenant.id, "Tenant redirected")
        }
    }

    println!("{}", shell.render_active());
    if let Err(err) = shell.wait_active().await {
        tracing::error!(error = %err, "Initial module failed to load");
    }
    println!("{}", shell.render_active());

    let cancel = CancellationToken::new();
    vitrine_bootstrap::spawn_shutdown_watcher(cancel.clone());
    cancel.cancelled().await;

    tracing::info!("Vitrine Shell stopped");
    Ok(())
}

async fn run_tour(config: AppConfig) -> Result<()> {
    let spawned = remotes::spawn_deliveries(composekit::global(), &config);
    tracing::info!(spawned, "Remote deliveries scheduled");

    let mut shell = bootstrap_shell(&config)?;

    let tenant_ids = shell.tenants().known_ids();
    for tenant_id in tenant_ids {
        shell.navigate_tenant(&tenant_id).await?;
        for entry in shell.navigation() {
            shell.activate(entry.id)?;
            // A failed slot renders its own boundary; the tour keeps walking.
            let _ = shell.wait_active().await;
            println!("{}", shell.render_active());
        }
    }

    Ok(())
}

async fn check_config(config: AppConfig) -> Result<()> {
    // Parse-level validation happened during load; surface the derived bits.
    let _: ModuleId = config
        .shell
        .default_module
        .parse()
        .context("invalid shell.default_module")?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}
