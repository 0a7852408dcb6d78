use anyhow::Context;
use clap::{Parser, Subcommand};
use tixello_seeder::config::{LogFormat, SeederConfig};
use tixello_seeder::runner::{self, Selection};
use tixello_seeder::seeders::{SeedContext, Seeder};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tixello-seeder")]
#[command(about = "Load catalog and demo data into the ticketing database")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run seeders against DATABASE_URL
    Run {
        /// Comma-separated seeder names; defaults to every default seeder
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,
        /// Also run the opt-in demo, location and knowledge-base seeders
        #[arg(long)]
        demo: bool,
        /// Do not apply migrations first
        #[arg(long)]
        skip_migrations: bool,
    },

    /// List seeders in run order
    List,

    /// Parse and validate every fixture without a database
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_format = LogFormat::parse(std::env::var("LOG_FORMAT").ok().as_deref())?;
    init_tracing(log_format);

    let cli = Cli::parse();
    match cli.command {
        Command::List => {
            for seeder in Seeder::ALL {
                let marker = if seeder.is_opt_in() { " (opt-in)" } else { "" };
                println!("{:<20} {}{marker}", seeder.name(), seeder.description());
            }
            Ok(())
        }
        Command::Check => {
            runner::check(&Seeder::ALL)?;
            tracing::info!("All fixtures valid");
            Ok(())
        }
        Command::Run {
            only,
            demo,
            skip_migrations,
        } => run(only, demo, skip_migrations).await,
    }
}

async fn run(only: Vec<String>, demo: bool, skip_migrations: bool) -> anyhow::Result<()> {
    let config = SeederConfig::from_env()?;

    let selection = if only.is_empty() {
        Selection::defaults(demo || config.demo)
    } else {
        Selection::only(&only[..])?
    };
    let seeders = selection.seeders();

    let pool = tixello_db::create_pool(&config.database_url, config.max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection pool created");

    tixello_db::health_check(&pool)
        .await
        .context("Database health check failed")?;

    if config.run_migrations && !skip_migrations {
        tixello_db::run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!("Database migrations applied");
    }

    let ctx = SeedContext {
        locations_tenant: config.locations_tenant,
        knowledge_base_tenant: config.knowledge_base_tenant,
        gamification_tenant: config.gamification_tenant,
    };
    let reports = runner::run(&pool, &seeders, &ctx).await?;

    for report in &reports {
        println!("{report}");
    }
    let skipped: u64 = reports.iter().map(|r| r.skipped).sum();
    tracing::info!(seeders = reports.len(), skipped, "Seed run complete");

    pool.close().await;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tixello_seeder=info,tixello_db=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
