mod commands;

use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use sitecraft_core::ProjectType;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitecraft")]
#[command(version, about = "Turn a business idea into a generated marketing site", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run the site builder in the browser
    Serve {
        /// Port to serve on (default from config, else 8080)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to config.toml (default: ~/.sitecraft/config.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate a site from an idea and print or save its JSON
    Generate {
        /// The idea, e.g. "a bakery with online pre-orders"
        idea: String,

        /// Kind of project: business, store, blog, portfolio, other
        #[arg(short = 't', long = "type", default_value = "business")]
        project_type: ProjectType,

        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Path to config.toml (default: ~/.sitecraft/config.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Render a generated site JSON file to static HTML
    Render {
        /// Path to the site JSON
        site: PathBuf,

        /// Output directory for generated pages
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Configure the model provider credential and defaults
    Configure,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Initialize tracing (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE); RUST_LOG adds directives
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Serve { port, config } => commands::serve::run(config, port).await,
        Command::Generate {
            idea,
            project_type,
            output,
            config,
        } => commands::generate::run(idea, project_type, output, config).await,
        Command::Render { site, output } => commands::render::run(site, output).await,
        Command::Configure => commands::configure::run().await,
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "sitecraft", &mut io::stdout());
            Ok(())
        }
    }
}
