//! Total Recordable Incident Rate.
//!
//! `TRIR = (recordable injuries * 200,000) / hours worked`, the OSHA
//! injuries-per-100-employees-per-year normalization. The quotient is
//! rounded to two decimal places before display or persistence.

use crate::core::DossierPatch;
use crate::errors::{DossierError, Result};
use crate::store::{retry::with_backoff, DossierStore};

/// Hours represented by 100 full-time employees over a year.
const TRIR_HOURS_BASELINE: f64 = 200_000.0;

/// Compute TRIR. Inputs are validated before the formula is evaluated:
/// negative injuries or non-positive hours reject with a validation error
/// and no calculation is performed.
pub fn calculate(injuries: f64, hours: f64) -> Result<f64> {
    if !injuries.is_finite() || injuries < 0.0 {
        return Err(DossierError::validation(
            "total injuries must be a non-negative number",
        ));
    }
    if !hours.is_finite() || hours <= 0.0 {
        return Err(DossierError::validation(
            "total hours worked must be a positive number",
        ));
    }
    let rate = (injuries * TRIR_HOURS_BASELINE) / hours;
    Ok((rate * 100.0).round() / 100.0)
}

/// Estimate annual hours worked from headcount when a dossier has no
/// explicit figure.
pub fn estimate_hours(employee_count: u64, hours_per_employee: u64) -> u64 {
    employee_count * hours_per_employee
}

/// Persist a computed rate onto a dossier. Only the `trir` field is
/// written; the save is retried on rate limiting because it is a remote
/// write, while the pure computation never needs one.
pub fn save(store: &dyn DossierStore, dossier_id: &str, rate: f64) -> Result<()> {
    let retry = &crate::config::get_config().retry;
    with_backoff(retry, || {
        store.update(dossier_id, &DossierPatch::trir(rate))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_the_osha_formula() {
        assert_eq!(calculate(5.0, 500_000.0).unwrap(), 2.00);
        assert_eq!(calculate(0.0, 100_000.0).unwrap(), 0.00);
        assert_eq!(calculate(3.0, 400_000.0).unwrap(), 1.50);
    }

    #[test]
    fn rounds_to_two_decimals() {
        // 1 * 200000 / 300000 = 0.666...
        assert_eq!(calculate(1.0, 300_000.0).unwrap(), 0.67);
        assert_eq!(calculate(1.0, 600_000.0).unwrap(), 0.33);
    }

    #[test]
    fn rejects_negative_injuries() {
        let err = calculate(-1.0, 1000.0).unwrap_err();
        assert!(matches!(err, DossierError::Validation(_)));
    }

    #[test]
    fn rejects_non_positive_hours() {
        assert!(calculate(1.0, 0.0).is_err());
        assert!(calculate(1.0, -10.0).is_err());
    }

    #[test]
    fn rejects_nan_inputs() {
        assert!(calculate(f64::NAN, 1000.0).is_err());
        assert!(calculate(1.0, f64::NAN).is_err());
    }

    #[test]
    fn hours_estimate_uses_standard_year() {
        assert_eq!(estimate_hours(50, 2000), 100_000);
    }
}
