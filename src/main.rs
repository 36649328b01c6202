use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{check, config, deploy, GlobalArgs};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "stagehand")]
#[command(version = VERSION)]
#[command(about = "CLI for environment-aware build and deployment automation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve secrets and launch the build tool
    Deploy(deploy::DeployArgs),
    /// Verify configuration and secret files without building
    Check(check::CheckArgs),
    /// Show the resolved deployment configuration
    Config(config::ConfigArgs),
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    let global = GlobalArgs {};

    let (json_result, exit_code) = match cli.command {
        Commands::Deploy(args) => output::map_cmd_result_to_json(deploy::run(args, &global)),
        Commands::Check(args) => output::map_cmd_result_to_json(check::run(args, &global)),
        Commands::Config(args) => output::map_cmd_result_to_json(config::run(args, &global)),
    };

    output::print_json_result(json_result);

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

// Negative codes (signal-terminated child) clamp to 0 here; the JSON
// envelope still reports success: false for those runs.
fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}
