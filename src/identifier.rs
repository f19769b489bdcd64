//! Composite sample identifiers: `{projectType}-{projectNumber}-{sampleNumber}`
//! with both numbers zero-padded, e.g. `A-001-007`.

use crate::error::{AppError, AppResult};
use crate::models::{ProjectType, Sample};

/// Digits the project and sample numbers are padded to
pub const NUMBER_WIDTH: usize = 3;
/// Largest number that still fits the padded width
pub const MAX_NUMBER: i32 = 999;

pub fn format_sample_id(project_type: ProjectType, project_number: i32, sample_number: i32) -> String {
    format!(
        "{}-{:0width$}-{:0width$}",
        project_type,
        project_number,
        sample_number,
        width = NUMBER_WIDTH
    )
}

/// Splits an identifier back into its parts. Returns `None` for anything that
/// [`format_sample_id`] would not produce.
pub fn parse_sample_id(sample_id: &str) -> Option<(ProjectType, i32, i32)> {
    let mut parts = sample_id.split('-');
    let project_type = parts.next()?.parse().ok()?;
    let project_number = parse_padded(parts.next()?)?;
    let sample_number = parse_padded(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some((project_type, project_number, sample_number))
}

fn parse_padded(part: &str) -> Option<i32> {
    if part.len() < NUMBER_WIDTH || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

pub fn validate_number(field: &str, value: i32) -> AppResult<()> {
    if !(1..=MAX_NUMBER).contains(&value) {
        return Err(AppError::validation(format!(
            "{} must be between 1 and {}, got {}",
            field, MAX_NUMBER, value
        )));
    }
    Ok(())
}

/// One past the highest sample number already used in the project, or 1 for
/// an empty project.
pub fn next_sample_number(project_type: ProjectType, project_number: i32, existing: &[Sample]) -> i32 {
    existing
        .iter()
        .filter(|s| s.project_type == project_type && s.project_number == project_number)
        .map(|s| s.sample_number)
        .max()
        .map_or(1, |max| max + 1)
}

/// An explicit sample number is used verbatim; otherwise the next free number
/// in the project is taken.
pub fn generate_sample_id(
    project_type: ProjectType,
    project_number: i32,
    existing: &[Sample],
    explicit_sample_number: Option<i32>,
) -> String {
    let sample_number = explicit_sample_number
        .unwrap_or_else(|| next_sample_number(project_type, project_number, existing));
    format_sample_id(project_type, project_number, sample_number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample::fixtures::biological;

    #[test]
    fn test_format_pads_numbers() {
        assert_eq!(format_sample_id(ProjectType::A, 1, 7), "A-001-007");
        assert_eq!(format_sample_id(ProjectType::B, 42, 120), "B-042-120");
        assert_eq!(format_sample_id(ProjectType::A, 999, 999), "A-999-999");
    }

    #[test]
    fn test_next_number_is_one_past_group_max() {
        let existing = vec![
            biological(ProjectType::A, 1, 1),
            biological(ProjectType::A, 1, 5),
            biological(ProjectType::A, 1, 3),
            biological(ProjectType::A, 2, 40),
            biological(ProjectType::B, 1, 90),
        ];
        assert_eq!(next_sample_number(ProjectType::A, 1, &existing), 6);
        assert_eq!(next_sample_number(ProjectType::A, 2, &existing), 41);
        assert_eq!(next_sample_number(ProjectType::B, 1, &existing), 91);
    }

    #[test]
    fn test_empty_group_starts_at_one() {
        let existing = vec![biological(ProjectType::A, 1, 5)];
        assert_eq!(next_sample_number(ProjectType::B, 1, &existing), 1);
        assert_eq!(next_sample_number(ProjectType::A, 7, &[]), 1);
        assert_eq!(generate_sample_id(ProjectType::A, 7, &[], None), "A-007-001");
    }

    #[test]
    fn test_explicit_number_is_used_verbatim() {
        let existing = vec![biological(ProjectType::A, 1, 5)];
        assert_eq!(
            generate_sample_id(ProjectType::A, 1, &existing, Some(2)),
            "A-001-002"
        );
        assert_eq!(
            generate_sample_id(ProjectType::A, 1, &existing, None),
            "A-001-006"
        );
    }

    #[test]
    fn test_parse_round_trip() {
        assert_eq!(parse_sample_id("B-010-002"), Some((ProjectType::B, 10, 2)));
        assert_eq!(parse_sample_id("B-10-2"), None);
        assert_eq!(parse_sample_id("C-010-002"), None);
        assert_eq!(parse_sample_id("A-001-002-3"), None);
    }

    #[test]
    fn test_number_validation() {
        assert!(validate_number("projectNumber", 1).is_ok());
        assert!(validate_number("projectNumber", 999).is_ok());
        assert!(validate_number("projectNumber", 0).is_err());
        assert!(validate_number("sampleNumber", 1000).is_err());
    }
}
