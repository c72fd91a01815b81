//! Export service domain logic.
//!
//! Renders the pet profile and visit history into one CSV document and
//! writes it to disk. Rendering never touches the record store state and
//! cannot fail; only writing the file can.

use std::borrow::Cow;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use log::{error, info};
use shared::{
    ExportDataResponse, ExportToPathRequest, ExportToPathResponse, PetField, PetProfile,
    VisitField, VisitRecord,
};

use crate::domain::clock::Clock;

const BYTE_ORDER_MARK: char = '\u{feff}';
const DEFAULT_FILE_STEM: &str = "pet";

type Row = Vec<Option<String>>;

/// Encode one CSV cell. Absent cells become `""`; text containing a comma,
/// newline or double quote is quoted with inner quotes doubled.
pub fn encode_cell(cell: Option<&str>) -> Cow<'_, str> {
    match cell {
        None => Cow::Borrowed("\"\""),
        Some(text) if text.contains([',', '\n', '"']) => {
            Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
        }
        Some(text) => Cow::Borrowed(text),
    }
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn pet_section(profile: &PetProfile) -> Vec<Row> {
    let mut rows = vec![vec![text("Pet Information")]];
    rows.extend(
        PetField::ALL
            .iter()
            .map(|field| vec![text(field.label()), text(profile.field(*field))]),
    );
    // Spacer before the visit section
    rows.push(vec![text("")]);
    rows
}

fn visit_section(visits: &[VisitRecord]) -> Vec<Row> {
    let mut rows = vec![
        vec![text("Visit Information")],
        VisitField::ALL.iter().map(|field| text(field.label())).collect(),
    ];
    rows.extend(visits.iter().map(|visit| {
        vec![
            Some(visit.iso_date()),
            text(&visit.reasons),
            text(&visit.symptoms),
            text(&visit.behavior_changes),
        ]
    }));
    rows
}

/// Render the full export document, BOM included
pub fn render_csv(profile: &PetProfile, visits: &[VisitRecord]) -> String {
    let body = pet_section(profile)
        .into_iter()
        .chain(visit_section(visits))
        .map(|row| {
            row.iter()
                .map(|cell| encode_cell(cell.as_deref()))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut document = String::with_capacity(body.len() + BYTE_ORDER_MARK.len_utf8());
    document.push(BYTE_ORDER_MARK);
    document.push_str(&body);
    document
}

/// `{name or "pet"}_medical_records_{YYYY-MM-DD}.csv`
pub fn export_filename(pet_name: &str, date: NaiveDate) -> String {
    let stem = if pet_name.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        safe_file_stem(pet_name)
    };
    format!("{}_medical_records_{}.csv", stem, date.format("%Y-%m-%d"))
}

/// Replace characters that cannot appear in a file name on common platforms
fn safe_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Export service that renders and writes CSV exports
#[derive(Clone)]
pub struct ExportService {
    clock: Arc<dyn Clock>,
    default_directory: Option<PathBuf>,
}

impl ExportService {
    /// `default_directory` is used when a request names no directory; without
    /// it the user's Documents folder (or home) is used.
    pub fn new(clock: Arc<dyn Clock>, default_directory: Option<PathBuf>) -> Self {
        Self {
            clock,
            default_directory,
        }
    }

    /// Render the export document and its file name
    pub fn export_csv(&self, profile: &PetProfile, visits: &[VisitRecord]) -> ExportDataResponse {
        info!("📄 EXPORT: Rendering {} visits for '{}'", visits.len(), profile.name);

        let csv_content = render_csv(profile, visits);
        let filename = export_filename(&profile.name, self.clock.today());

        info!(
            "✅ EXPORT: Generated CSV content ({} bytes) with filename: {}",
            csv_content.len(),
            filename
        );

        ExportDataResponse {
            csv_content,
            filename,
            visit_count: visits.len(),
            pet_name: profile.name.clone(),
        }
    }

    /// Render the export and write it into the requested (or default) directory
    pub fn export_to_path(
        &self,
        profile: &PetProfile,
        visits: &[VisitRecord],
        request: ExportToPathRequest,
    ) -> ExportToPathResponse {
        info!("📁 EXPORT: Exporting to path - custom_path: {:?}", request.custom_path);

        let export = self.export_csv(profile, visits);

        let Some(export_dir) = self.resolve_directory(request.custom_path.as_deref()) else {
            error!("❌ EXPORT: Could not determine default export directory");
            return ExportToPathResponse {
                success: false,
                message: "Failed to determine export directory".to_string(),
                file_path: String::new(),
                visit_count: 0,
            };
        };

        if let Err(e) = fs::create_dir_all(&export_dir) {
            error!("❌ EXPORT: Failed to create export directory {:?}: {}", export_dir, e);
            return ExportToPathResponse {
                success: false,
                message: format!("Failed to create export directory: {}", e),
                file_path: export_dir.to_string_lossy().to_string(),
                visit_count: 0,
            };
        }

        let file_path = export_dir.join(&export.filename);
        let file_path_str = file_path.to_string_lossy().to_string();

        match fs::write(&file_path, &export.csv_content) {
            Ok(()) => {
                info!(
                    "✅ EXPORT: Exported {} visits to: {}",
                    export.visit_count, file_path_str
                );
                ExportToPathResponse {
                    success: true,
                    message: format!("File exported successfully to: {}", file_path_str),
                    file_path: file_path_str,
                    visit_count: export.visit_count,
                }
            }
            Err(e) => {
                error!("❌ EXPORT: Failed to write export file to {:?}: {}", file_path, e);
                ExportToPathResponse {
                    success: false,
                    message: format!("Failed to write export file: {}", e),
                    file_path: file_path_str,
                    visit_count: 0,
                }
            }
        }
    }

    fn resolve_directory(&self, custom_path: Option<&str>) -> Option<PathBuf> {
        match custom_path {
            Some(path) if !path.trim().is_empty() => Some(PathBuf::from(sanitize_path(path))),
            _ => self
                .default_directory
                .clone()
                .or_else(dirs::document_dir)
                .or_else(dirs::home_dir),
        }
    }
}

/// Basic path sanitization to handle common user input issues
fn sanitize_path(path: &str) -> String {
    let mut cleaned = path.trim();

    // Surrounding quotes, as pasted from a file manager
    if cleaned.len() >= 2
        && ((cleaned.starts_with('"') && cleaned.ends_with('"'))
            || (cleaned.starts_with('\'') && cleaned.ends_with('\'')))
    {
        cleaned = cleaned[1..cleaned.len() - 1].trim();
    }

    let mut cleaned = cleaned.replace("\\ ", " ");

    while cleaned.len() > 1 && (cleaned.ends_with('/') || cleaned.ends_with('\\')) {
        cleaned.pop();
    }

    if cleaned == "~" || cleaned.starts_with("~/") || cleaned.starts_with("~\\") {
        if let Some(home) = dirs::home_dir() {
            cleaned = if cleaned == "~" {
                home.to_string_lossy().to_string()
            } else {
                home.join(&cleaned[2..]).to_string_lossy().to_string()
            };
        }
    }

    cleaned
}
