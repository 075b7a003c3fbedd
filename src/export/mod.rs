//! CSV export and download-name conventions.

use crate::core::Dossier;

/// Render dossier summaries as CSV. Returns `None` for an empty list, in
/// which case no file should be produced.
pub fn summaries_to_csv(dossiers: &[Dossier]) -> Option<String> {
    if dossiers.is_empty() {
        return None;
    }
    let mut csv = String::from("Company Name,Industry,Analysis Date\n");
    for dossier in dossiers {
        let row = [
            dossier.company_name.clone(),
            dossier.industry.clone().unwrap_or_default(),
            dossier
                .analysis_date
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ];
        let quoted: Vec<String> = row.iter().map(|field| csv_field(field)).collect();
        csv.push_str(&quoted.join(","));
        csv.push('\n');
    }
    Some(csv)
}

fn csv_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// `{company with spaces as underscores}_{artifact}.{ext}`.
pub fn download_file_name(company_name: &str, artifact: &str, ext: &str) -> String {
    format!("{}_{artifact}.{ext}", company_name.replace(' ', "_"))
}
