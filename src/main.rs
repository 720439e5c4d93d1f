use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use ziplift::upload::BranchMode;

mod cli;

#[derive(Parser)]
#[command(name = "ziplift")]
#[command(about = "Upload the contents of a ZIP archive to a GitHub branch")]
#[command(version)]
struct Cli {
    /// Read config from this file instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a token and check repository access
    Check {
        /// Repository owner (user or organization)
        #[arg(short, long)]
        owner: String,
        /// Repository name
        #[arg(short, long)]
        repo: String,
        /// GitHub token (prompted for when missing)
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
    /// List the files an upload would push, without contacting GitHub
    Inspect {
        /// ZIP archive to read
        archive: PathBuf,
    },
    /// Upload a ZIP archive's contents to a repository branch
    Upload {
        /// ZIP archive to upload
        archive: PathBuf,
        /// Repository owner (user or organization)
        #[arg(short, long)]
        owner: String,
        /// Repository name
        #[arg(short, long)]
        repo: String,
        /// GitHub token (prompted for when missing)
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// Commit onto the default branch or onto a new branch
        #[arg(long, value_enum, default_value_t = BranchModeArg::New)]
        branch_mode: BranchModeArg,
        /// Name of the new branch (defaults to upload-YYYY-MM-DD)
        #[arg(short, long)]
        branch: Option<String>,
        /// Commit message for every file
        #[arg(short, long)]
        message: Option<String>,
        /// Skip the review prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the config file location
    Path,
}

#[derive(Clone, Copy, ValueEnum)]
enum BranchModeArg {
    /// Commit onto the repository's default branch
    Default,
    /// Commit onto a new (or reused) branch cut from the default branch
    New,
}

impl From<BranchModeArg> for BranchMode {
    fn from(arg: BranchModeArg) -> Self {
        match arg {
            BranchModeArg::Default => BranchMode::Default,
            BranchModeArg::New => BranchMode::New,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Check { owner, repo, token } => cli::check::run(config, owner, repo, token).await,
        Commands::Inspect { archive } => cli::inspect::run(config, &archive),
        Commands::Upload {
            archive,
            owner,
            repo,
            token,
            branch_mode,
            branch,
            message,
            yes,
        } => {
            cli::upload::run(cli::upload::UploadArgs {
                config: cli.config.clone(),
                archive,
                owner,
                repo,
                token,
                branch_mode: branch_mode.into(),
                branch,
                message,
                yes,
            })
            .await
        }
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => cli::config::show(config),
            ConfigCommands::Path => cli::config::path(config),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n{}", ziplift::format_error_with_help(&e));
            ExitCode::FAILURE
        }
    }
}
