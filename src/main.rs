use anyhow::Result;
use bistro::auth::Role;
use bistro::database::connection::{establish_connection, get_database_url, setup_database};
use bistro::server;
use bistro::services::SessionService;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    #[clap(short, long, global = true, default_value = "bistro.db")]
    database: String,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[clap(short, long, default_value = "3000")]
        port: u16,
        #[clap(long)]
        cors_origin: Option<String>,
    },
    Migrate {
        #[clap(subcommand)]
        direction: server::MigrateDirection,
    },
    User {
        #[clap(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand, Debug)]
enum UserCommands {
    /// Create a staff account and print a session token for it
    Add {
        #[clap(long)]
        email: String,
        #[clap(long)]
        name: String,
        #[clap(long, default_value = "WAITER")]
        role: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    match args.command {
        Commands::Serve { port, cors_origin } => {
            info!("Starting server on port {}", port);
            server::start_server(port, &args.database, cors_origin.as_deref()).await?;
        }
        Commands::Migrate { direction } => {
            server::migrate_database(&args.database, direction).await?;
        }
        Commands::User { command } => match command {
            UserCommands::Add { email, name, role } => {
                let role: Role = role.parse()?;
                let db = establish_connection(&get_database_url(Some(&args.database))).await?;
                setup_database(&db).await?;

                let sessions = SessionService::new(db);
                let user = sessions.create_user(email, name, role).await?;
                let session = sessions.issue_session(&user.id).await?;

                info!("Created {} user {} ({})", role, user.email, user.id);
                println!("{}", session.token);
            }
        },
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_deref()
        .unwrap_or("info")
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("sqlx=warn,{}", log_level)))
        .without_time()
        .init();
}
