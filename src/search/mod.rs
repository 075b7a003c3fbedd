//! Regulatory-database search URL construction.
//!
//! Three external databases, each with a fixed URL template. Searches can
//! be saved onto a dossier as [`RegulatorySearchLink`] entries via a
//! read-modify-write of that single field.

use crate::core::{Dossier, DossierPatch, RegulatorySearchLink};
use crate::errors::{DossierError, Result};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSite {
    ViolationTracker,
    OshaEstablishment,
    EpaEcho,
}

pub const ALL_SITES: &[SearchSite] = &[
    SearchSite::ViolationTracker,
    SearchSite::OshaEstablishment,
    SearchSite::EpaEcho,
];

impl SearchSite {
    pub fn name(&self) -> &'static str {
        match self {
            SearchSite::ViolationTracker => "Violation Tracker",
            SearchSite::OshaEstablishment => "OSHA Establishment Search",
            SearchSite::EpaEcho => "EPA ECHO Search",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            SearchSite::ViolationTracker => {
                "Search for corporate crime and misconduct across federal, state, \
                 and local agencies."
            }
            SearchSite::OshaEstablishment => {
                "Find federal OSHA enforcement inspections by establishment name."
            }
            SearchSite::EpaEcho => {
                "Search EPA and state data for environmental compliance and \
                 enforcement."
            }
        }
    }

    /// Results URL for a company-name query.
    pub fn search_url(&self, company_name: &str) -> String {
        let query = urlencoding::encode(company_name.trim());
        match self {
            SearchSite::ViolationTracker => format!(
                "https://violationtracker.goodjobsfirst.org/?company={query}"
            ),
            SearchSite::OshaEstablishment => format!(
                "https://www.osha.gov/pls/imis/establishment.search?p_logger=1\
                 &establishment={query}&State=All&officetype=All&Office=All\
                 &programlc=All&end_open_date=&end_close_date=&pg_size=25"
            ),
            SearchSite::EpaEcho => format!(
                "https://echo.epa.gov/facilities/facility-search/results?p_fn={query}"
            ),
        }
    }
}

/// Build the saved-link record for a search executed `now`.
pub fn build_link(
    site: SearchSite,
    company_name: &str,
    now: DateTime<Utc>,
) -> Result<RegulatorySearchLink> {
    let company = company_name.trim();
    if company.is_empty() {
        return Err(DossierError::validation(
            "a company name is required to search",
        ));
    }
    Ok(RegulatorySearchLink {
        title: format!("{} Search for {company}", site.name()),
        url: site.search_url(company),
        database: site.name().to_string(),
        search_date: now,
    })
}

/// Append a link to the dossier's saved searches; the patch rewrites only
/// the `regulatory_search_links` field.
pub fn append_link_patch(dossier: &Dossier, link: RegulatorySearchLink) -> DossierPatch {
    let mut links = dossier.regulatory_search_links.clone();
    links.push(link);
    DossierPatch::search_links(links)
}
