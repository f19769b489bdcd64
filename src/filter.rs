use crate::models::{Sample, deserialize_optional_date};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Columns the free-text query is matched against
pub const TEXT_COLUMNS: [&str; 8] = [
    "sample_id",
    "sample_name",
    "kingdom",
    "family",
    "genus",
    "species",
    "dive_site",
    "collector_name",
];

/// List-view filter. Categorical values of `All` (or blank) are inactive; the
/// date range applies only when both ends are set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SampleFilter {
    /// Case-insensitive substring over the text columns
    pub q: Option<String>,
    pub kingdom: Option<String>,
    #[serde(alias = "projectSample")]
    pub project_type: Option<String>,
    pub sample_type: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub date_from: Option<NaiveDate>,
    #[serde(deserialize_with = "deserialize_optional_date")]
    pub date_to: Option<NaiveDate>,
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

impl SampleFilter {
    pub fn is_active(&self) -> bool {
        active(&self.q).is_some()
            || active(&self.kingdom).is_some()
            || active(&self.project_type).is_some()
            || active(&self.sample_type).is_some()
            || self.date_range().is_some()
    }

    fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.date_from?, self.date_to?))
    }

    pub fn matches(&self, sample: &Sample) -> bool {
        if let Some(query) = active(&self.q) {
            let query = query.to_lowercase();
            let hit = TEXT_COLUMNS.iter().any(|column| {
                sample
                    .text_column(column)
                    .is_some_and(|text| text.to_lowercase().contains(&query))
            });
            if !hit {
                return false;
            }
        }

        if let Some(kingdom) = active(&self.kingdom) {
            if sample.kingdom.as_deref() != Some(kingdom) {
                return false;
            }
        }

        if let Some(project_type) = active(&self.project_type) {
            if sample.project_type.as_str() != project_type {
                return false;
            }
        }

        if let Some(sample_type) = active(&self.sample_type) {
            if sample.sample_type.as_str() != sample_type {
                return false;
            }
        }

        if let Some((from, to)) = self.date_range() {
            match sample.date_acquired {
                Some(date) if date >= from && date <= to => {}
                _ => return false,
            }
        }

        true
    }
}

/// Samples satisfying every active predicate, in input order
pub fn filter_samples<'a>(samples: &'a [Sample], filter: &SampleFilter) -> Vec<&'a Sample> {
    samples.iter().filter(|s| filter.matches(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample::fixtures::biological;
    use crate::models::{ProjectType, SampleType};

    fn catalogue() -> Vec<Sample> {
        let mut a = biological(ProjectType::A, 1, 1);
        a.sample_name = Some("Acropora mucus".into());
        a.dive_site = Some("Lizard Island".into());
        a.date_acquired = NaiveDate::from_ymd_opt(2023, 6, 1);

        let mut b = biological(ProjectType::B, 2, 1);
        b.kingdom = Some("Fungi".into());
        b.genus = Some("Aspergillus".into());
        b.date_acquired = NaiveDate::from_ymd_opt(2024, 1, 15);

        let mut c = biological(ProjectType::A, 1, 2);
        c.sample_type = SampleType::NonBiological;
        c.sample_name = Some("Sediment core".into());
        c.collector_name = Some("R. Kim".into());

        vec![a, b, c]
    }

    fn ids(samples: Vec<&Sample>) -> Vec<&str> {
        samples.into_iter().map(|s| s.sample_id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_returns_everything_in_order() {
        let samples = catalogue();
        let filter = SampleFilter {
            q: Some("".into()),
            kingdom: Some("All".into()),
            project_type: Some("all".into()),
            sample_type: None,
            ..Default::default()
        };
        assert!(!filter.is_active());
        assert_eq!(
            ids(filter_samples(&samples, &filter)),
            vec!["A-001-001", "B-002-001", "A-001-002"]
        );
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let samples = catalogue();
        let filter = SampleFilter {
            q: Some("LIZARD".into()),
            ..Default::default()
        };
        assert_eq!(ids(filter_samples(&samples, &filter)), vec!["A-001-001"]);

        let filter = SampleFilter {
            q: Some("b-002".into()),
            ..Default::default()
        };
        assert_eq!(ids(filter_samples(&samples, &filter)), vec!["B-002-001"]);

        let filter = SampleFilter {
            q: Some("kim".into()),
            ..Default::default()
        };
        assert_eq!(ids(filter_samples(&samples, &filter)), vec!["A-001-002"]);
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let samples = catalogue();
        let filter = SampleFilter {
            project_type: Some("A".into()),
            sample_type: Some("Biological".into()),
            ..Default::default()
        };
        assert_eq!(ids(filter_samples(&samples, &filter)), vec!["A-001-001"]);

        let filter = SampleFilter {
            kingdom: Some("Fungi".into()),
            project_type: Some("A".into()),
            ..Default::default()
        };
        assert!(filter_samples(&samples, &filter).is_empty());
    }

    #[test]
    fn test_date_range_is_inclusive_and_needs_both_ends() {
        let samples = catalogue();
        let filter = SampleFilter {
            date_from: NaiveDate::from_ymd_opt(2023, 6, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 15),
            ..Default::default()
        };
        assert_eq!(
            ids(filter_samples(&samples, &filter)),
            vec!["A-001-001", "B-002-001"]
        );

        let filter = SampleFilter {
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            ..Default::default()
        };
        assert_eq!(filter_samples(&samples, &filter).len(), 3);
    }

    #[test]
    fn test_non_biological_label() {
        let samples = catalogue();
        let filter = SampleFilter {
            sample_type: Some("Non-Biological".into()),
            ..Default::default()
        };
        assert_eq!(ids(filter_samples(&samples, &filter)), vec!["A-001-002"]);
    }
}
