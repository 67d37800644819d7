use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "despacho-cli", version, about = "Despacho CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Término (deadline) management
    Termino {
        #[command(subcommand)]
        action: commands::termino::TerminoAction,
    },
    /// Case management
    Caso {
        #[command(subcommand)]
        action: commands::caso::CasoAction,
    },
    /// Client management
    Cliente {
        #[command(subcommand)]
        action: commands::cliente::ClienteAction,
    },
    /// Hearing and agenda management
    Audiencia {
        #[command(subcommand)]
        action: commands::audiencia::AudienciaAction,
    },
    /// Quick notes
    Nota {
        #[command(subcommand)]
        action: commands::nota::NotaAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Practice dashboard counters
    Resumen,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Termino { action } => commands::termino::run(action),
        Commands::Caso { action } => commands::caso::run(action),
        Commands::Cliente { action } => commands::cliente::run(action),
        Commands::Audiencia { action } => commands::audiencia::run(action),
        Commands::Nota { action } => commands::nota::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Resumen => commands::resumen::run(),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "despacho-cli",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
