use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use labzen::Result;
use std::io;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "labzen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rubric tallies and mechanics checks for course labs", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tally the rubric points of a lab
    #[command(name = "count-points")]
    CountPoints {
        /// Lab file (.ipynb or .Rmd); prompts for one when omitted
        file: Option<String>,

        /// Leave the "All" row out of the summary
        #[arg(long)]
        no_margins: bool,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Check the repository link, the latest push and the commit count
    #[command(name = "check-mechanics")]
    CheckMechanics {
        /// Lab file (.ipynb or .Rmd); prompts for one when omitted
        file: Option<String>,

        /// Access token for the course GitHub
        #[arg(short, long, env = labzen::mechanics::TOKEN_ENV, hide_env_values = true)]
        token: Option<String>,

        /// Branch to compare with the remote (default: current branch)
        #[arg(short, long)]
        branch: Option<String>,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Print the markdown blocks of a lab
    Parse {
        /// Lab file (.ipynb or .Rmd); prompts for one when omitted
        file: Option<String>,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "labzen=debug" } else { "labzen=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("{}", format!("Error: failed to start runtime: {}", e).red());
            std::process::exit(1);
        }
    };

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::CountPoints {
            file,
            no_margins,
            json,
        } => {
            labzen::cli::count_points::run(file.as_deref(), no_margins, json)?;
        }

        Commands::CheckMechanics {
            file,
            token,
            branch,
            json,
        } => {
            labzen::cli::check_mechanics::run(file.as_deref(), token.as_deref(), branch, json)
                .await?;
        }

        Commands::Parse { file, json } => {
            labzen::cli::parse::run(file.as_deref(), json)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "labzen", &mut io::stdout());
        }
    }

    Ok(())
}
