use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use shared::{PetField, VisitField};

#[derive(Parser)]
#[command(name = "pet-records")]
#[command(about = "Keep a pet's profile and medical visit history, export as CSV", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the saved records (overrides PET_RECORDS_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show or edit the pet profile
    Pet {
        #[command(subcommand)]
        command: PetCommand,
    },

    /// Record or list medical visits
    Visit {
        #[command(subcommand)]
        command: VisitCommand,
    },

    /// Export profile and visits as CSV
    Export {
        /// Target directory (default: configured export directory, then Documents)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print the CSV document instead of writing a file
        #[arg(long, conflicts_with = "output_dir")]
        stdout: bool,
    },

    /// Delete all saved data
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Menu-driven session
    Interactive,
}

#[derive(Subcommand)]
pub enum PetCommand {
    /// Print the saved profile
    Show,

    /// Update profile fields and save
    Set(PetFieldArgs),

    /// Attach a picture and save
    Picture {
        #[arg(required = true)]
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum VisitCommand {
    /// Save a new visit
    Add(VisitFieldArgs),

    /// Print visit history, newest first
    List,
}

#[derive(Args, Debug, Default)]
pub struct PetFieldArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub age: Option<String>,
    #[arg(long)]
    pub allergies: Option<String>,
    #[arg(long)]
    pub favorite_food: Option<String>,
    #[arg(long)]
    pub personality_traits: Option<String>,
}

impl PetFieldArgs {
    /// Fields given on the command line, in form order
    pub fn updates(self) -> Vec<(PetField, String)> {
        [
            (PetField::Name, self.name),
            (PetField::Age, self.age),
            (PetField::Allergies, self.allergies),
            (PetField::FavoriteFood, self.favorite_food),
            (PetField::PersonalityTraits, self.personality_traits),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

#[derive(Args, Debug, Default)]
pub struct VisitFieldArgs {
    /// Visit date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub reasons: Option<String>,
    #[arg(long)]
    pub symptoms: Option<String>,
    #[arg(long)]
    pub behavior_changes: Option<String>,
}

impl VisitFieldArgs {
    pub fn updates(self) -> Vec<(VisitField, String)> {
        [
            (VisitField::Date, self.date),
            (VisitField::Reasons, self.reasons),
            (VisitField::Symptoms, self.symptoms),
            (VisitField::BehaviorChanges, self.behavior_changes),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}
