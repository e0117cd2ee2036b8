mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use oxidized_registry::{config, output, pipeline, validators};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            root,
            icons_dir,
            format,
            output: output_path,
            config: config_path,
            jobs,
            quiet,
        } => {
            init_tracing(quiet);

            let mut config = config::Config::load(config_path.as_deref()).unwrap_or_else(|e| {
                eprintln!("Error: {e}");
                std::process::exit(2);
            });
            if let Some(root) = root {
                config.registry.root = root;
            }
            if let Some(icons_dir) = icons_dir {
                config.registry.icons_dir = icons_dir;
            }
            if let Some(jobs) = jobs {
                config.validation.jobs = jobs;
            }

            let report = pipeline::run_validation(&config).unwrap_or_else(|e| {
                tracing::error!(error = %e, "validation aborted");
                eprintln!("Error: {e}");
                std::process::exit(2);
            });
            let formatted = output::format_report(&report, &format);

            if let Some(out_path) = output_path {
                std::fs::write(&out_path, &formatted).unwrap_or_else(|e| {
                    eprintln!("Error writing output: {e}");
                    std::process::exit(2);
                });
                eprintln!("Output written to {}", out_path.display());
            } else {
                print!("{formatted}");
            }

            std::process::exit(if report.passed { 0 } else { 1 });
        }

        Commands::ListRules => {
            let rules = validators::all_rules();
            println!("{}", "Validation Rules".bold().underline());
            println!();

            let mut current_phase = None;
            for rule in &rules {
                if current_phase != Some(rule.phase) {
                    if current_phase.is_some() {
                        println!();
                    }
                    println!("  {}", rule.phase.to_string().bold());
                    current_phase = Some(rule.phase);
                }
                println!(
                    "    {id:<36} {message}",
                    id = rule.id,
                    message = rule.message,
                );
            }

            println!();
            println!("  Total: {} rules", rules.len());
        }

        Commands::Explain { rule_id } => match validators::find_rule(&rule_id) {
            Some(rule) => {
                println!("{}", rule.id.bold());
                println!();
                println!("  Phase:        {}", rule.phase);
                println!("  Description:  {}", rule.message);
                println!("  Remediation:  {}", rule.remediation);
            }
            None => {
                eprintln!("Unknown rule: {rule_id}");
                eprintln!("Use 'oxidized-registry list-rules' to see all available rules.");
                std::process::exit(2);
            }
        },
    }
}

/// Logs go to stderr so stdout only ever carries the report.
fn init_tracing(quiet: bool) {
    let default_level = if quiet { "warn" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
