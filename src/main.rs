use anyhow::{Context, Result};
use devbench::cli::commands::{
    DescriptorVariant, EnvCommand, InvokeCommand, LoadCommand, OutputFormat, PipelineCommand,
    RestoreCommand, ValidateCommand,
};
use devbench::cli::output::*;
use devbench::cli::{Cli, Command};
use devbench::core::{presets, PipelineDescriptor};
use devbench::environment::CommandContext;
use devbench::snapshot;
use tracing::{error, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    // Execute command
    match &cli.command {
        Command::Pipeline(cmd) => show_pipeline(cmd)?,
        Command::Validate(cmd) => validate_descriptor(cmd)?,
        Command::Env(cmd) => show_environment(cmd).await?,
        Command::Invoke(cmd) => invoke_command(cmd).await?,
        Command::Load(cmd) => fire_on_load(cmd).await?,
        Command::Restore(cmd) => restore_databases(cmd)?,
    }

    Ok(())
}

fn build_descriptor(variant: DescriptorVariant) -> PipelineDescriptor {
    match variant {
        DescriptorVariant::Base => presets::pass_through(),
        DescriptorVariant::TestEnv => presets::with_test_env(),
    }
}

fn show_pipeline(cmd: &PipelineCommand) -> Result<()> {
    let descriptor = build_descriptor(cmd.variant);

    match cmd.format {
        OutputFormat::Text => {
            println!(
                "{} Pipeline descriptor ({} steps, {} flows)",
                INFO,
                style(descriptor.steps.len()).cyan(),
                style(descriptor.flows.len()).cyan()
            );
            print!("{}", format_descriptor(&descriptor));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&descriptor)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&descriptor)?),
    }

    Ok(())
}

fn validate_descriptor(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating descriptor...", INFO);

    let descriptor = build_descriptor(cmd.variant);

    match descriptor.validate() {
        Ok(()) => {
            println!("{} Descriptor is well-formed!", CHECK);
            println!("  Steps: {}", style(descriptor.steps.len()).cyan());
            println!("  Flows: {}", style(descriptor.flows.len()).cyan());
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(e).red());
            std::process::exit(1);
        }
    }
}

async fn show_environment(cmd: &EnvCommand) -> Result<()> {
    let args = cmd.source.main_args()?;
    let config = cmd
        .source
        .factory()
        .configuration(&args)
        .await
        .context("Failed to build configuration")?;
    let summary = config.summary();

    match cmd.format {
        OutputFormat::Text => {
            println!("{} Environment configuration", INFO);
            print!("{}", format_summary(&summary));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&summary)?),
    }

    Ok(())
}

async fn invoke_command(cmd: &InvokeCommand) -> Result<()> {
    let args = cmd.source.main_args()?;
    let config = cmd
        .source
        .factory()
        .configuration(&args)
        .await
        .context("Failed to build configuration")?;

    let Some(command) = config.command(&cmd.name) else {
        println!(
            "{} Unknown command '{}'. Registered: {}",
            CROSS,
            style(&cmd.name).bold(),
            style(config.command_names().join(", ")).cyan()
        );
        std::process::exit(1);
    };

    let ctx = CommandContext::new(&args.config_dir);
    let spinner = create_spinner(&format!("Running {}...", cmd.name));
    let result = command.invoke(&ctx);
    spinner.finish_and_clear();

    match result {
        Ok(status) => {
            println!("{} {} completed", CHECK, style(&cmd.name).green());
            println!("{}", serde_json::to_string_pretty(&status)?);
            Ok(())
        }
        Err(e) => {
            println!(
                "{} {} {}",
                CROSS,
                style(&cmd.name).bold(),
                style("failed").red()
            );
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

async fn fire_on_load(cmd: &LoadCommand) -> Result<()> {
    let args = cmd.source.main_args()?;
    let config = cmd
        .source
        .factory()
        .configuration(&args)
        .await
        .context("Failed to build configuration")?;

    let ctx = CommandContext::new(&args.config_dir);
    let spinner = create_spinner("Firing on-load hook...");
    let result = config.fire_on_load(&ctx);
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            println!("{} on-load hook completed", CHECK);
            Ok(())
        }
        Err(e) => {
            println!("{} on-load hook {}", CROSS, style("failed").red());
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn restore_databases(cmd: &RestoreCommand) -> Result<()> {
    let root = match &cmd.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };

    let spinner = create_spinner("Restoring databases...");
    let result = snapshot::restore(&root);
    spinner.finish_and_clear();

    match result {
        Ok(report) => {
            println!("{} {}", BROOM, format_restore_report(&report));
            Ok(())
        }
        Err(e) => {
            println!("{} Restore {}", CROSS, style("failed").red());
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
