use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use shared::{ExportToPathRequest, PetField};

use pet_records::cli::{Cli, Commands, PetCommand, VisitCommand};
use pet_records::config::AppConfig;
use pet_records::domain::{Confirmation, StaticConfirmation};
use pet_records::io::{handlers, interactive, ConsoleNotifier, TerminalConfirmation};
use pet_records::{initialize_backend, AppState};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let config = AppConfig::load(cli.data_dir.clone())?;
    let (mut state, report) = initialize_backend(config)?;

    let notifier = ConsoleNotifier;
    handlers::report_startup(&report, &notifier);

    let succeeded = run_command(cli.command, &mut state, &notifier)?;
    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_command(command: Commands, state: &mut AppState, notifier: &ConsoleNotifier) -> Result<bool> {
    match command {
        Commands::Pet { command } => match command {
            PetCommand::Show => {
                print_profile(state);
                Ok(true)
            }
            PetCommand::Set(args) => {
                for (field, value) in args.updates() {
                    debug!("Setting {} = {:?}", field, value);
                    state.record_store.update_pet_field(field, value);
                }
                Ok(handlers::save_pet_profile(state, notifier))
            }
            PetCommand::Picture { file } => {
                if !handlers::set_pet_picture_from_file(state, &file, notifier) {
                    return Ok(false);
                }
                Ok(handlers::save_pet_profile(state, notifier))
            }
        },

        Commands::Visit { command } => match command {
            VisitCommand::Add(args) => {
                if !handlers::fill_visit_draft(state, args.updates(), notifier) {
                    return Ok(false);
                }
                Ok(handlers::save_visit(state, notifier))
            }
            VisitCommand::List => {
                interactive::print_history(state);
                Ok(true)
            }
        },

        Commands::Export { output_dir, stdout } => {
            if stdout {
                let response = state
                    .export_service
                    .export_csv(state.record_store.pet_profile(), state.record_store.visits());
                info!("Exported {} visits for {}", response.visit_count, response.pet_name);
                print!("{}", response.csv_content);
                return Ok(true);
            }

            let request = ExportToPathRequest {
                custom_path: output_dir.map(|dir| dir.to_string_lossy().into_owned()),
            };
            let response = handlers::export_to_path(state, request, notifier);
            if response.success {
                println!("{}", response.file_path);
            }
            Ok(response.success)
        }

        Commands::Clear { yes } => {
            let skip_prompt = StaticConfirmation(true);
            let confirmation: &dyn Confirmation = if yes {
                &skip_prompt
            } else {
                &TerminalConfirmation
            };
            Ok(handlers::clear_all_data(state, confirmation, notifier))
        }

        Commands::Interactive => {
            interactive::run_session(state, &TerminalConfirmation, notifier)?;
            Ok(true)
        }
    }
}

fn print_profile(state: &AppState) {
    let profile = state.record_store.pet_profile();
    for field in PetField::ALL {
        println!("{:<20} {}", format!("{}:", field.label()), profile.field(field));
    }
    let picture = if profile.has_picture() { "attached" } else { "none" };
    println!("{:<20} {}", "Picture:", picture);
}
