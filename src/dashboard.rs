use crate::models::Sample;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Label used for samples with no value in the grouped field
pub const UNKNOWN_LABEL: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub sample_id: String,
    pub sample_name: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Aggregates feeding the dashboard charts and map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_samples: usize,
    pub by_kingdom: Vec<CategoryCount>,
    pub by_project_type: Vec<CategoryCount>,
    pub by_sample_type: Vec<CategoryCount>,
    /// Keyed `YYYY-MM`
    pub by_collection_month: Vec<CategoryCount>,
    pub markers: Vec<MapMarker>,
}

fn count_by<F>(samples: &[Sample], key: F) -> Vec<CategoryCount>
where
    F: Fn(&Sample) -> String,
{
    let mut groups: BTreeMap<String, usize> = BTreeMap::new();
    for sample in samples {
        *groups.entry(key(sample)).or_default() += 1;
    }
    groups
        .into_iter()
        .map(|(label, count)| CategoryCount { label, count })
        .collect()
}

fn label_or_unknown(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_LABEL)
        .to_string()
}

pub fn aggregate(samples: &[Sample]) -> DashboardStats {
    DashboardStats {
        total_samples: samples.len(),
        by_kingdom: count_by(samples, |s| label_or_unknown(s.kingdom.as_deref())),
        by_project_type: count_by(samples, |s| s.project_type.to_string()),
        by_sample_type: count_by(samples, |s| s.sample_type.to_string()),
        by_collection_month: count_by(samples, |s| match s.date_acquired {
            Some(date) => date.format("%Y-%m").to_string(),
            None => UNKNOWN_LABEL.to_string(),
        }),
        markers: samples
            .iter()
            .filter_map(|s| {
                s.coordinates.both().map(|(latitude, longitude)| MapMarker {
                    sample_id: s.sample_id.clone(),
                    sample_name: s.sample_name.clone(),
                    latitude,
                    longitude,
                })
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectType;
    use crate::models::sample::fixtures::biological;
    use chrono::NaiveDate;

    fn counts(groups: &[CategoryCount]) -> Vec<(&str, usize)> {
        groups.iter().map(|g| (g.label.as_str(), g.count)).collect()
    }

    #[test]
    fn test_empty_catalogue() {
        let stats = aggregate(&[]);
        assert_eq!(stats.total_samples, 0);
        assert!(stats.by_kingdom.is_empty());
        assert!(stats.markers.is_empty());
    }

    #[test]
    fn test_grouping() {
        let mut a = biological(ProjectType::A, 1, 1);
        a.date_acquired = NaiveDate::from_ymd_opt(2024, 3, 2);
        a.coordinates.latitude = Some(-14.6);
        a.coordinates.longitude = Some(145.4);

        let mut b = biological(ProjectType::A, 1, 2);
        b.date_acquired = NaiveDate::from_ymd_opt(2024, 3, 28);
        b.coordinates.latitude = Some(-14.7);

        let mut c = biological(ProjectType::B, 3, 1);
        c.kingdom = Some("Fungi".into());

        let mut d = biological(ProjectType::B, 3, 2);
        d.kingdom = None;

        let stats = aggregate(&[a, b, c, d]);
        assert_eq!(stats.total_samples, 4);
        assert_eq!(
            counts(&stats.by_kingdom),
            vec![("Bacteria", 2), ("Fungi", 1), ("Unknown", 1)]
        );
        assert_eq!(counts(&stats.by_project_type), vec![("A", 2), ("B", 2)]);
        assert_eq!(counts(&stats.by_sample_type), vec![("Biological", 4)]);
        assert_eq!(
            counts(&stats.by_collection_month),
            vec![("2024-03", 2), ("Unknown", 2)]
        );
        assert_eq!(stats.markers.len(), 1);
        assert_eq!(stats.markers[0].sample_id, "A-001-001");
    }
}
