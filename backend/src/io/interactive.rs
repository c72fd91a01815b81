//! Menu-driven terminal session.
//!
//! Works like the single-page form: edits stay in memory until the matching
//! save action is chosen, and the session survives any failed action.

use std::path::PathBuf;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use log::info;
use shared::{parse_visit_date, ExportToPathRequest, PetField, VisitField};

use crate::domain::{Confirmation, Notifier};
use crate::io::handlers;
use crate::storage::KeyValueStore;
use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    EditPet,
    SetPicture,
    SavePet,
    EditVisit,
    SaveVisit,
    ShowHistory,
    Export,
    Clear,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 9] = [
        MenuAction::EditPet,
        MenuAction::SetPicture,
        MenuAction::SavePet,
        MenuAction::EditVisit,
        MenuAction::SaveVisit,
        MenuAction::ShowHistory,
        MenuAction::Export,
        MenuAction::Clear,
        MenuAction::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuAction::EditPet => "Edit pet information",
            MenuAction::SetPicture => "Choose pet picture",
            MenuAction::SavePet => "Save pet information",
            MenuAction::EditVisit => "Edit medical visit",
            MenuAction::SaveVisit => "Save visit information",
            MenuAction::ShowHistory => "Show visit history",
            MenuAction::Export => "Export to file",
            MenuAction::Clear => "Clear all data",
            MenuAction::Quit => "Quit",
        }
    }
}

fn pet_prompt(field: PetField) -> &'static str {
    match field {
        PetField::Name => "Pet's Name",
        PetField::Age => "Pet's Age",
        PetField::Allergies => "Pet's Allergies",
        PetField::FavoriteFood => "Favorite Pet Food",
        PetField::PersonalityTraits => "Pet's Personality Traits",
    }
}

fn visit_prompt(field: VisitField) -> &'static str {
    match field {
        VisitField::Date => "Date (YYYY-MM-DD)",
        VisitField::Reasons => "Reason(s) for Visit",
        VisitField::Symptoms => "Symptom(s)",
        VisitField::BehaviorChanges => "Behavior Changes",
    }
}

/// Run the menu loop until the user quits
pub fn run_session<S: KeyValueStore>(
    state: &mut AppState<S>,
    confirmation: &dyn Confirmation,
    notifier: &dyn Notifier,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
    info!("Starting interactive session");

    loop {
        let choice = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(&labels)
            .default(0)
            .interact()?;

        match MenuAction::ALL[choice] {
            MenuAction::EditPet => edit_pet(state, &theme)?,
            MenuAction::SetPicture => {
                let path: String = Input::with_theme(&theme)
                    .with_prompt("Picture file")
                    .interact_text()?;
                if handlers::set_pet_picture_from_file(state, &PathBuf::from(path.trim()), notifier) {
                    println!("Picture set. Save pet information to keep it.");
                }
            }
            MenuAction::SavePet => {
                handlers::save_pet_profile(state, notifier);
            }
            MenuAction::EditVisit => edit_visit(state, &theme)?,
            MenuAction::SaveVisit => {
                handlers::save_visit(state, notifier);
            }
            MenuAction::ShowHistory => print_history(state),
            MenuAction::Export => {
                let response =
                    handlers::export_to_path(state, ExportToPathRequest::default(), notifier);
                if response.success {
                    println!("{}", response.file_path);
                }
            }
            MenuAction::Clear => {
                handlers::clear_all_data(state, confirmation, notifier);
            }
            MenuAction::Quit => break,
        }
    }

    info!("Interactive session finished");
    Ok(())
}

fn edit_pet<S: KeyValueStore>(state: &mut AppState<S>, theme: &ColorfulTheme) -> Result<()> {
    for field in PetField::ALL {
        let current = state.record_store.pet_profile().field(field).to_string();
        let value: String = Input::with_theme(theme)
            .with_prompt(pet_prompt(field))
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?;
        state.record_store.update_pet_field(field, value);
    }
    Ok(())
}

fn edit_visit<S: KeyValueStore>(state: &mut AppState<S>, theme: &ColorfulTheme) -> Result<()> {
    for field in VisitField::ALL {
        let draft = state.record_store.visit_draft();
        let current = match field {
            VisitField::Date => draft.iso_date(),
            VisitField::Reasons => draft.reasons.clone(),
            VisitField::Symptoms => draft.symptoms.clone(),
            VisitField::BehaviorChanges => draft.behavior_changes.clone(),
        };

        let input = Input::<String>::with_theme(theme)
            .with_prompt(visit_prompt(field))
            .with_initial_text(current)
            .allow_empty(field != VisitField::Date);
        let value = if field == VisitField::Date {
            input
                .validate_with(|value: &String| {
                    parse_visit_date(value).map(|_| ()).map_err(|e| e.to_string())
                })
                .interact_text()?
        } else {
            input.interact_text()?
        };

        state.record_store.update_visit_field(field, value)?;
    }
    Ok(())
}

pub fn print_history<S: KeyValueStore>(state: &AppState<S>) {
    let history = handlers::visit_history(state);
    if history.is_empty() {
        println!("No visits recorded yet.");
        return;
    }

    println!("{:<20} Symptoms", "Date");
    for entry in history {
        println!("{:<20} {}", entry.formatted_date, entry.symptoms);
    }
}
