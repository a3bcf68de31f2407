use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use league::dto::adjustment::AdjustLineupRequest;
use league::dto::lineup::SubmitLineupRequest;
use league::dto::tournament::{CreateTournamentRequest, UpdateTournamentRequest};
use league::dto::waiver::WaiverClaimRequest;
use league::models::TournamentStatus;
use league::{Database, SystemClock};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod handlers;

use config::Config;

#[derive(Parser)]
#[command(name = "league-admin")]
#[command(about = "Fantasy golf league administration", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Commissioner email used for commissioner-only commands.
    #[arg(long, env = "LEAGUE_ADMIN_EMAIL", global = true)]
    admin_email: Option<String>,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate,
    /// Find the team owned by an email
    Identify { email: String },
    #[command(subcommand)]
    Lineup(LineupCommand),
    /// Score a tournament from a JSON file of {team_id, slot, fedex_points} rows
    Results {
        #[arg(long)]
        tournament: String,

        file: PathBuf,
    },
    /// Fill in lineups for teams that missed the deadline
    Carryover {
        #[arg(long)]
        tournament: String,
    },
    /// Move a scored lineup row to another slot
    Adjust {
        #[arg(long)]
        tournament: String,

        #[arg(long)]
        team: i32,

        #[arg(long)]
        old_slot: i32,

        #[arg(long)]
        new_slot: i32,

        #[arg(long)]
        points: i32,

        #[arg(long)]
        note: Option<String>,
    },
    /// Show the adjustment audit trail for a tournament
    History {
        #[arg(long)]
        tournament: String,
    },
    Standings,
    /// Rebuild every team total from lineup points
    Recalculate,
    #[command(subcommand)]
    Tournament(TournamentCommand),
    #[command(subcommand)]
    Waiver(WaiverCommand),
}

#[derive(Subcommand)]
enum LineupCommand {
    Show {
        #[arg(long)]
        team: i32,

        #[arg(long)]
        tournament: String,
    },
    Submit {
        #[arg(long)]
        team: i32,

        #[arg(long)]
        tournament: String,

        #[arg(long, value_delimiter = ',', num_args = 1..)]
        slots: Vec<i32>,
    },
}

#[derive(Subcommand)]
enum TournamentCommand {
    List,
    /// Every team's lineup and points for one tournament
    Show {
        #[arg(long)]
        id: String,
    },
    Create {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        /// Eastern wall-clock time, e.g. 2026-02-18T23:59
        #[arg(long)]
        deadline: String,

        #[arg(long)]
        status: Option<TournamentStatus>,
    },
    Update {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        deadline: Option<String>,

        #[arg(long)]
        status: Option<TournamentStatus>,
    },
}

#[derive(Subcommand)]
enum WaiverCommand {
    Claim {
        #[arg(long)]
        team: i32,

        #[arg(long)]
        drop: i32,

        #[arg(long)]
        add: i32,

        #[arg(long)]
        slot: i32,
    },
    Available,
    Log,
}

fn require_admin(admin_email: &Option<String>) -> Result<String> {
    admin_email
        .clone()
        .context("This command needs --admin-email or LEAGUE_ADMIN_EMAIL")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("league_admin={},league={}", log_level, log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env(cli.database_url.clone())
        .context("Failed to load configuration")?;

    tracing::debug!("Connecting to database at: {}", config.database_host());
    let db = Database::new(&config.database_url, config.max_connections)
        .await
        .context("Failed to initialize database")?;

    if let Commands::Migrate = cli.command {
        tracing::info!("Running database migrations");
        db.run_migrations()
            .await
            .context("Failed to run migrations")?;
        tracing::info!("✓ Database migrations completed");
        return Ok(());
    }

    let store = db.store();
    let clock = SystemClock;

    match cli.command {
        Commands::Migrate => {}
        Commands::Identify { email } => handlers::handle_identify(&store, &email).await?,
        Commands::Lineup(LineupCommand::Show { team, tournament }) => {
            handlers::handle_lineup_show(&store, &clock, team, &tournament).await?;
        }
        Commands::Lineup(LineupCommand::Submit {
            team,
            tournament,
            slots,
        }) => {
            let request = SubmitLineupRequest {
                team_id: team,
                tournament_id: tournament,
                slots,
            };
            handlers::handle_lineup_submit(&store, &clock, request).await?;
        }
        Commands::Results { tournament, file } => {
            let admin_email = require_admin(&cli.admin_email)?;
            handlers::handle_results(&store, admin_email, tournament, &file).await?;
        }
        Commands::Carryover { tournament } => {
            handlers::handle_carryover(&store, &tournament).await?;
        }
        Commands::Adjust {
            tournament,
            team,
            old_slot,
            new_slot,
            points,
            note,
        } => {
            let request = AdjustLineupRequest {
                tournament_id: tournament,
                team_id: team,
                old_slot,
                new_slot,
                new_points: points,
                note,
                admin_email: require_admin(&cli.admin_email)?,
            };
            handlers::handle_adjust(&store, &clock, request).await?;
        }
        Commands::History { tournament } => {
            handlers::handle_history(&store, &tournament).await?;
        }
        Commands::Standings => handlers::handle_standings(&store).await?,
        Commands::Recalculate => {
            let admin_email = require_admin(&cli.admin_email)?;
            handlers::handle_recalculate(&store, &admin_email).await?;
        }
        Commands::Tournament(TournamentCommand::List) => {
            handlers::handle_tournament_list(&store, &clock).await?;
        }
        Commands::Tournament(TournamentCommand::Show { id }) => {
            handlers::handle_tournament_show(&store, &id).await?;
        }
        Commands::Tournament(TournamentCommand::Create {
            id,
            name,
            deadline,
            status,
        }) => {
            let request = CreateTournamentRequest {
                admin_email: require_admin(&cli.admin_email)?,
                tournament_id: id,
                name,
                deadline,
                status,
            };
            handlers::handle_tournament_create(&store, request).await?;
        }
        Commands::Tournament(TournamentCommand::Update {
            id,
            name,
            deadline,
            status,
        }) => {
            let request = UpdateTournamentRequest {
                admin_email: require_admin(&cli.admin_email)?,
                tournament_id: id,
                name,
                deadline,
                status,
            };
            handlers::handle_tournament_update(&store, request).await?;
        }
        Commands::Waiver(WaiverCommand::Claim {
            team,
            drop,
            add,
            slot,
        }) => {
            let request = WaiverClaimRequest {
                team_id: team,
                drop_golfer_id: drop,
                add_golfer_id: add,
                slot,
            };
            handlers::handle_waiver_claim(&store, &clock, request).await?;
        }
        Commands::Waiver(WaiverCommand::Available) => {
            handlers::handle_waiver_available(&store).await?;
        }
        Commands::Waiver(WaiverCommand::Log) => handlers::handle_waiver_log(&store).await?,
    }

    Ok(())
}
