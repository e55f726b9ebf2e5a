use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shift_scheduler::display::{export_schedule_to_csv, print_schedule, write_schedule_to_file};
use shift_scheduler::parser::load_roster;
use shift_scheduler::web::{self, AppState};
use shift_scheduler::{generate_schedule, Roster, SchedulerConfig};

#[derive(Parser)]
#[command(name = "shift-scheduler", about = "Weekly shift assignment from ranked preferences")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a schedule from a roster CSV and print it
    Generate {
        /// Roster CSV with a Name column and one rank column per slot
        #[arg(short, long)]
        roster: PathBuf,

        /// Seed for the random fill; omit for a fresh schedule each run
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        limits: Limits,

        /// Also export the schedule as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Also write the text rendering to a file
        #[arg(long)]
        text: Option<PathBuf>,
    },
    /// Serve the roster editor and schedule over HTTP
    Serve {
        #[arg(short, long, default_value_t = 8080)]
        port: u16,

        /// Roster CSV to start from; the roster starts empty otherwise
        #[arg(short, long)]
        roster: Option<PathBuf>,

        #[command(flatten)]
        limits: Limits,
    },
}

#[derive(Args)]
struct Limits {
    /// Workers per slot
    #[arg(long, default_value_t = shift_scheduler::config::DEFAULT_CAPACITY)]
    capacity: usize,

    /// Slots per worker per week
    #[arg(long, default_value_t = shift_scheduler::config::DEFAULT_MAX_SHIFTS)]
    max_shifts: u32,
}

impl Limits {
    fn config(&self) -> SchedulerConfig {
        SchedulerConfig::new(self.capacity, self.max_shifts)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            roster,
            seed,
            limits,
            csv,
            text,
        } => {
            let roster = load_roster(&roster)?;
            let config = limits.config();
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let schedule = generate_schedule(roster.workers(), &config, &mut rng)?;
            print_schedule("Weekly Schedule", &schedule);

            if let Some(path) = csv {
                export_schedule_to_csv(&schedule, &path)?;
                info!(path = %path.display(), "schedule exported");
            }
            if let Some(path) = text {
                write_schedule_to_file("Weekly Schedule", &schedule, &path)?;
                info!(path = %path.display(), "schedule written");
            }
        }
        Command::Serve {
            port,
            roster,
            limits,
        } => {
            let roster = match roster {
                Some(path) => load_roster(&path)?,
                None => Roster::new(),
            };
            let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

            info!(port, workers = roster.len(), "starting web server");
            println!("Access the site at http://localhost:{}", port);

            web::start_server(port, AppState::new(roster, limits.config(), password)).await?;
        }
    }

    Ok(())
}
