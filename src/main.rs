use anyhow::Result;
use clap::Parser;
use riskmap::cli::{Cli, Commands};
use riskmap::commands::{self, evaluate::EvaluateConfig, CommandContext};
use riskmap::config::load_config;
use riskmap::errors::RegisterError;
use riskmap::observability::{init_logging, install_panic_hook, set_operation};

fn main() {
    if let Err(err) = run() {
        match err.downcast_ref::<RegisterError>() {
            Some(register_err) => {
                eprintln!("error[{}]: {err:#}", register_err.code().as_str())
            }
            None => eprintln!("error: {err:#}"),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    install_panic_hook();

    let config = load_config();
    let ctx = CommandContext {
        register_path: &cli.register,
        config: &config,
    };
    let _op = set_operation(operation_name(&cli.command), Some(cli.register.clone()));

    match cli.command {
        Commands::Init { force, project } => commands::init::handle_init(&ctx, &project, force),
        Commands::Modality { action } => commands::modality::handle_modality(&ctx, action),
        Commands::Risk { action } => commands::risk::handle_risk(&ctx, action),
        Commands::Reassess { factors } => commands::reassess::handle_reassess(&ctx, &factors),
        Commands::Evaluate {
            format,
            output,
            plain,
        } => commands::evaluate::handle_evaluate(
            &ctx,
            EvaluateConfig {
                format,
                output,
                plain,
            },
        ),
        Commands::Catalog { name } => commands::catalog::handle_catalog(name.as_deref()),
        Commands::Project { name } => commands::project::handle_project(&ctx, &name),
    }
}

fn operation_name(command: &Commands) -> &'static str {
    match command {
        Commands::Init { .. } => "init",
        Commands::Modality { .. } => "modality",
        Commands::Risk { .. } => "risk",
        Commands::Reassess { .. } => "reassess",
        Commands::Evaluate { .. } => "evaluate",
        Commands::Catalog { .. } => "catalog",
        Commands::Project { .. } => "project",
    }
}
