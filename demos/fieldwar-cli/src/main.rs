//! Command-line client for Fieldwar.
//!
//! Each invocation restores the session from the state file, runs one
//! command, and exits. Token and mode survive between invocations. Only
//! the commands that act as the player (`whoami`, `conquer`) check the
//! stored token with the server first; a failed check logs the player out.
//!
//! ```text
//! fieldwar-cli register alice hunter2
//! fieldwar-cli login alice hunter2
//! fieldwar-cli mode graphql
//! fieldwar-cli conquer 42
//! fieldwar-cli scoreboard
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use fieldwar::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "fieldwar-cli")]
#[command(version)]
#[command(about = "Play Fieldwar from the terminal.", long_about = None)]
struct Cli {
    /// Game server URL (overrides FIELDWAR_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Where token and mode are kept (default: per-user data directory)
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in and remember the session
    Login { username: String, password: String },

    /// Create an account (does not log in)
    Register { username: String, password: String },

    /// Claim a field on the map
    Conquer {
        /// Field index, 1 to 1000000
        #[arg(value_parser = clap::value_parser!(u32).range(1..=i64::from(FIELD_COUNT)))]
        index: u32,
    },

    /// Show who the stored token belongs to
    Whoami,

    /// Choose the API used for login, register, and conquer
    Mode {
        /// restful or graphql
        mode: Mode,
    },

    /// Forget the stored session
    Logout,

    /// Print the current standings
    Scoreboard,
}

#[tokio::main]
async fn main() -> Result<(), FieldwarError> {
    fieldwar::logging::init("info")?;
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }
    let storage = match cli.state_file {
        Some(path) => JsonFileStore::open(path)?,
        None => JsonFileStore::open_default()?,
    };
    tracing::debug!(path = %storage.path().display(), "using state file");

    let store = SessionStore::<JsonFileStore>::builder()
        .config(config)
        .open(storage)?;
    let session = SessionHandle::spawn(store);

    let result = run(&session, cli.command).await;
    session.shutdown().await?;
    result
}

impl Commands {
    /// Commands that act as the player, and so check the stored token first.
    fn acts_as_player(&self) -> bool {
        matches!(self, Commands::Whoami | Commands::Conquer { .. })
    }
}

async fn run(session: &SessionHandle, command: Commands) -> Result<(), FieldwarError> {
    let snapshot = if command.acts_as_player() {
        session.verify_token().await?
    } else {
        session.snapshot()
    };

    match command {
        Commands::Login { username, password } => {
            session.login(&username, &password).await?;
            println!("logged in as {username} ({})", session.snapshot().mode);
        }
        Commands::Register { username, password } => {
            session.register(&username, &password).await?;
            println!("registered {username}, now run `login`");
        }
        Commands::Conquer { index } => {
            let field = FieldId(index);
            session.conquer(field).await?;
            println!("conquered {field} via {}", snapshot.mode);
        }
        Commands::Whoami => match snapshot.username {
            Some(name) => println!("{name} ({})", snapshot.mode),
            None => println!("not logged in ({})", snapshot.mode),
        },
        Commands::Mode { mode } => {
            session.set_mode(mode).await?;
            println!("mode set to {mode}");
        }
        Commands::Logout => {
            session.logout().await?;
            println!("logged out");
        }
        Commands::Scoreboard => {
            let rows = session.public().scoreboard().await?;
            print_scoreboard(&rows);
        }
    }

    Ok(())
}

fn print_scoreboard(rows: &[Score]) {
    if rows.is_empty() {
        println!("no scores yet");
        return;
    }

    println!("{:<4} {:<20} {:>8}  history", "#", "player", "fields");
    for (rank, row) in rows.iter().enumerate() {
        let history = row
            .conquer_history_count
            .iter()
            .map(|(mode, count)| format!("{mode}={count}"))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{:<4} {:<20} {:>8}  {history}",
            rank + 1,
            row.username,
            row.conquer_field_count
        );
    }
}
