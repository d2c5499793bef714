use clap::Parser;
use std::fs;
use std::process;
use wpcs_autofix::cli::format;
use wpcs_autofix::cli::{Cli, Commands, OutputFormat};
use wpcs_autofix::fix;
use wpcs_autofix::init;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Fix {
            paths,
            config,
            format: output_format,
            dry_run,
        } => {
            let report = match fix::run_fix(&config, &paths, dry_run) {
                Ok(r) => r,
                Err(fix::FixError::ConfigRead(ref e))
                    if e.kind() == std::io::ErrorKind::NotFound =>
                {
                    eprintln!(
                        "\x1b[31merror\x1b[0m: config file '{}' not found",
                        config.display()
                    );
                    eprintln!(
                        "\x1b[90mhint\x1b[0m: run \x1b[1mwpcs-fix init\x1b[0m to generate a starter config"
                    );
                    process::exit(2);
                }
                Err(e) => {
                    eprintln!("\x1b[31merror\x1b[0m: {}", e);
                    process::exit(2);
                }
            };

            match output_format {
                OutputFormat::Pretty => format::print_pretty(&report),
                OutputFormat::Json => format::print_json(&report),
                OutputFormat::Compact => format::print_compact(&report),
            }

            // a dry run with pending fixes fails, so CI can gate on it
            let pending = report.dry_run && report.files_fixed > 0;
            process::exit(if pending { 1 } else { 0 });
        }

        Commands::Init { output, force } => {
            if output.exists() && !force {
                eprintln!(
                    "\x1b[31merror\x1b[0m: '{}' already exists (use --force to overwrite)",
                    output.display()
                );
                process::exit(2);
            }

            let project_dir = std::env::current_dir().unwrap_or_default();
            let project_type = init::detect_project(&project_dir);
            let config = init::generate_config(&project_type);

            if let Err(e) = fs::write(&output, &config) {
                eprintln!("\x1b[31merror\x1b[0m: failed to write config: {}", e);
                process::exit(2);
            }

            let type_label = match project_type {
                init::ProjectType::Plugin => "WordPress plugin",
                init::ProjectType::Theme => "WordPress theme",
                init::ProjectType::Generic => "generic",
            };

            eprintln!(
                "\x1b[32m✓\x1b[0m Created {} (detected: {})",
                output.display(),
                type_label
            );
            eprintln!(
                "\x1b[90mhint\x1b[0m: run \x1b[1mwpcs-fix fix --dry-run\x1b[0m to preview fixes"
            );
        }
    }
}
