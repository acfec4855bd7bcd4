use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use cyberfolio::app::App;
use cyberfolio::config::{Config, StorageBackend};
use cyberfolio::identity::SignupForm;

mod cli;

#[derive(Parser)]
#[command(name = "cyberfolio")]
#[command(about = "Cyberpunk portfolio progression - XP, levels, badges and mini-games")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.cyberfolio/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use an in-memory store; nothing is saved
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level, XP, badges and the latest activity
    Status,

    /// Grant XP with a free-form activity description
    Award {
        amount: u64,
        description: String,
    },

    /// Show the activity log, newest first
    Log {
        /// Show at most this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// List achievements and which are earned
    Achievements,

    /// Sign in (mock authentication, any credentials work)
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Register a new identity
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },

    /// Sign out; progress is kept
    Logout,

    /// Show the signed-in identity
    Whoami,

    /// Set the theme (light|dark), or toggle it
    Theme { value: Option<String> },

    /// Set the language (en|hi), or toggle it
    Lang { value: Option<String> },

    /// Play the memory matching game
    Memory,

    /// Tell a cyberpunk joke
    Joke,

    /// Make a two-line meme
    Meme {
        #[arg(long, default_value = "")]
        top: String,
        #[arg(long, default_value = "")]
        bottom: String,
    },

    /// Toggle matrix mode
    Matrix,

    /// Toggle terminal mode
    Terminal,

    /// Enter key presses (up, down, left, right, b, a or DOM key codes)
    Konami {
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Run a prank: hacker, virus-scan or system-update
    Prank { name: String },

    /// Open the music player
    Music,

    /// Checksum text with the toy hash calculator
    Hash {
        text: String,
        #[arg(short, long, default_value = "sha256")]
        algorithm: String,
    },

    /// Password strength check and generator
    Password {
        #[command(subcommand)]
        action: PasswordAction,
    },

    /// Talk to the AI assistant
    Chat { message: String },

    /// Erase experience, badges and game stats
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Initialize ~/.cyberfolio/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum PasswordAction {
    /// Score a password against the strength rules
    Check { password: String },
    /// Generate a random 16-character password
    Generate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // `init` creates the config file, so it must not require one
    let mut config = match cli.command {
        Some(Commands::Init { .. }) => Config::default(),
        _ => Config::load_from(cli.config.as_deref())?,
    };
    if cli.memory {
        config.storage.backend = StorageBackend::Memory;
    }

    // Initialize logging
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    if let Some(Commands::Init { force }) = cli.command {
        cli::init::init_command(cli.config.as_deref(), force)?;
        return Ok(());
    }

    let mut app = App::open(&config)?;

    match cli.command {
        Some(Commands::Status) | None => cli::status::status_command(&app)?,
        Some(Commands::Award {
            amount,
            description,
        }) => cli::progress::award_command(&mut app, amount, &description)?,
        Some(Commands::Log { limit }) => cli::status::log_command(&app, limit)?,
        Some(Commands::Achievements) => cli::status::achievements_command(&app)?,
        Some(Commands::Login { email, password }) => {
            cli::auth::login_command(&mut app, &email, &password)?
        }
        Some(Commands::Signup {
            name,
            email,
            password,
            confirm,
        }) => cli::auth::signup_command(
            &mut app,
            SignupForm {
                name,
                email,
                password,
                confirm,
            },
        )?,
        Some(Commands::Logout) => cli::auth::logout_command(&mut app)?,
        Some(Commands::Whoami) => cli::auth::whoami_command(&app)?,
        Some(Commands::Theme { value }) => cli::prefs::theme_command(&mut app, value)?,
        Some(Commands::Lang { value }) => cli::prefs::lang_command(&mut app, value)?,
        Some(Commands::Memory) => cli::memory::memory_command(&mut app).await?,
        Some(Commands::Joke) => cli::fun::joke_command(&mut app)?,
        Some(Commands::Meme { top, bottom }) => cli::fun::meme_command(&mut app, &top, &bottom)?,
        Some(Commands::Matrix) => cli::fun::matrix_command(&mut app)?,
        Some(Commands::Terminal) => cli::fun::terminal_command(&mut app)?,
        Some(Commands::Konami { keys }) => cli::fun::konami_command(&mut app, &keys)?,
        Some(Commands::Prank { name }) => cli::fun::prank_command(&mut app, &name).await?,
        Some(Commands::Music) => cli::music::music_command(app.music_mut()).await?,
        Some(Commands::Hash { text, algorithm }) => {
            cli::tools::hash_command(&mut app, &text, &algorithm)?
        }
        Some(Commands::Password { action }) => match action {
            PasswordAction::Check { password } => cli::tools::password_check_command(&password)?,
            PasswordAction::Generate => cli::tools::password_generate_command(&mut app)?,
        },
        Some(Commands::Chat { message }) => cli::tools::chat_command(&mut app, &message)?,
        Some(Commands::Reset { yes }) => cli::progress::reset_command(&mut app, yes)?,
        Some(Commands::Init { .. }) => {}
    }

    Ok(())
}
