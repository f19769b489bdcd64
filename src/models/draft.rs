use super::NewSample;
use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Top-level sections of a wizard draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DraftSection {
    Metadata,
    Morphology,
    Microbiology,
    Molecular,
    Publication,
}

impl DraftSection {
    pub const ALL: [DraftSection; 5] = [
        DraftSection::Metadata,
        DraftSection::Morphology,
        DraftSection::Microbiology,
        DraftSection::Molecular,
        DraftSection::Publication,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DraftSection::Metadata => "metadata",
            DraftSection::Morphology => "morphology",
            DraftSection::Microbiology => "microbiology",
            DraftSection::Molecular => "molecular",
            DraftSection::Publication => "publication",
        }
    }
}

impl fmt::Display for DraftSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftSection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DraftSection::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| AppError::not_found(format!("draft section {:?} does not exist", s)))
    }
}

/// In-progress wizard form state. Each section is a free-form JSON object so
/// half-typed values ("", "12.") survive until submit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Draft {
    #[schema(value_type = Object)]
    pub metadata: Map<String, Value>,
    #[schema(value_type = Object)]
    pub morphology: Map<String, Value>,
    #[schema(value_type = Object)]
    pub microbiology: Map<String, Value>,
    #[schema(value_type = Object)]
    pub molecular: Map<String, Value>,
    #[schema(value_type = Object)]
    pub publication: Map<String, Value>,
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            metadata: object(json!({
                "sampleName": "",
                "projectType": "A",
                "projectNumber": "",
                "sampleNumber": "",
                "sampleType": "Biological",
                "kingdom": "",
                "family": "",
                "genus": "",
                "species": "",
                "dateAcquired": "",
                "diveSite": "",
                "collectorName": "",
                "coordinates": { "latitude": "", "longitude": "" },
            })),
            morphology: object(json!({
                "colonyShape": "",
                "colonyColor": "",
                "texture": "",
                "margin": "",
                "elevation": "",
                "size": "",
                "cellShape": "",
                "motility": "",
                "notes": "",
            })),
            microbiology: object(json!({
                "gramStain": "",
                "biochemicalTests": {},
                "enzymaticActivities": [],
                "antibacterialAssay": {
                    "targetOrganism": "",
                    "method": "",
                    "inhibitionZoneMm": "",
                    "result": "",
                },
                "notes": "",
            })),
            molecular: object(json!({
                "markerGene": "",
                "extractionMethod": "",
                "primerPair": "",
                "sequencingPlatform": "",
                "accessionNumber": "",
                "accessionDatabase": "",
                "sequenceLength": "",
                "notes": "",
            })),
            publication: object(json!({ "links": [] })),
        }
    }
}

impl Draft {
    /// Parses a persisted draft, falling back to the default skeleton when the
    /// blob is not a valid draft.
    pub fn parse_or_default(raw: &str) -> Self {
        match serde_json::from_str::<Draft>(raw) {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!("discarding unreadable draft: {}", e);
                Draft::default()
            }
        }
    }

    pub fn section(&self, section: DraftSection) -> &Map<String, Value> {
        match section {
            DraftSection::Metadata => &self.metadata,
            DraftSection::Morphology => &self.morphology,
            DraftSection::Microbiology => &self.microbiology,
            DraftSection::Molecular => &self.molecular,
            DraftSection::Publication => &self.publication,
        }
    }

    fn section_mut(&mut self, section: DraftSection) -> &mut Map<String, Value> {
        match section {
            DraftSection::Metadata => &mut self.metadata,
            DraftSection::Morphology => &mut self.morphology,
            DraftSection::Microbiology => &mut self.microbiology,
            DraftSection::Molecular => &mut self.molecular,
            DraftSection::Publication => &mut self.publication,
        }
    }

    /// Shallow merge: keys in `partial` replace the section's keys of the same
    /// name, nested objects included; other keys of the section and the other
    /// sections are untouched.
    pub fn merge_section(&mut self, section: DraftSection, partial: Map<String, Value>) {
        let target = self.section_mut(section);
        for (key, value) in partial {
            target.insert(key, value);
        }
    }

    /// Converts the draft into a create request. Blank strings count as absent.
    pub fn to_new_sample(&self) -> AppResult<NewSample> {
        let mut body = self.metadata.clone();
        body.insert("morphology".into(), Value::Object(self.morphology.clone()));
        body.insert("microbiology".into(), Value::Object(self.microbiology.clone()));
        body.insert("molecular".into(), Value::Object(self.molecular.clone()));
        body.insert(
            "publications".into(),
            self.publication
                .get("links")
                .cloned()
                .unwrap_or_else(|| Value::Array(Vec::new())),
        );

        let body = strip_blank(Value::Object(body));
        serde_json::from_value(body)
            .map_err(|e| AppError::validation(format!("draft is incomplete: {}", e)))
    }
}

/// Drops empty strings from objects (recursively) and arrays so that untouched
/// form fields deserialize as missing values.
fn strip_blank(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(_, v)| !is_blank_string(v))
                .map(|(k, v)| (k, strip_blank(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !is_blank_string(v))
                .map(strip_blank)
                .collect(),
        ),
        other => other,
    }
}

fn is_blank_string(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProjectType, SampleType};

    #[test]
    fn test_corrupt_blob_falls_back_to_defaults() {
        assert_eq!(Draft::parse_or_default("{not json"), Draft::default());
        assert_eq!(Draft::parse_or_default("[1,2,3]"), Draft::default());
    }

    #[test]
    fn test_missing_sections_are_filled_from_skeleton() {
        let draft = Draft::parse_or_default(r#"{"metadata": {"sampleName": "Reef 1"}}"#);
        assert_eq!(draft.metadata.get("sampleName"), Some(&json!("Reef 1")));
        assert_eq!(draft.publication, Draft::default().publication);
    }

    #[test]
    fn test_merge_is_shallow_per_section() {
        let mut draft = Draft::default();
        draft.merge_section(
            DraftSection::Metadata,
            object(json!({"sampleName": "Reef 1", "coordinates": {"latitude": "-16.2"}})),
        );
        draft.merge_section(DraftSection::Metadata, object(json!({"diveSite": "North wall"})));

        assert_eq!(draft.metadata.get("sampleName"), Some(&json!("Reef 1")));
        assert_eq!(draft.metadata.get("diveSite"), Some(&json!("North wall")));
        // nested object is replaced wholesale, not merged
        assert_eq!(
            draft.metadata.get("coordinates"),
            Some(&json!({"latitude": "-16.2"}))
        );
        assert_eq!(draft.morphology, Draft::default().morphology);
    }

    #[test]
    fn test_default_draft_is_not_submittable() {
        let err = Draft::default().to_new_sample().unwrap_err();
        assert!(err.to_string().contains("projectNumber"));
    }

    #[test]
    fn test_filled_draft_converts() {
        let mut draft = Draft::default();
        draft.merge_section(
            DraftSection::Metadata,
            object(json!({
                "sampleName": "Coral mucus isolate",
                "projectType": "B",
                "projectNumber": "4",
                "sampleType": "Biological",
                "kingdom": "Bacteria",
                "family": "Vibrionaceae",
                "genus": "Vibrio",
                "species": "harveyi",
                "dateAcquired": "2024-02-11",
                "coordinates": {"latitude": "-16.9", "longitude": "145.8"},
            })),
        );
        draft.merge_section(
            DraftSection::Microbiology,
            object(json!({"gramStain": "negative", "biochemicalTests": {"catalase": true}})),
        );
        draft.merge_section(
            DraftSection::Publication,
            object(json!({"links": ["https://doi.org/10.1/abc", ""]})),
        );

        let new = draft.to_new_sample().unwrap();
        assert_eq!(new.project_type, ProjectType::B);
        assert_eq!(new.project_number, 4);
        assert_eq!(new.sample_number, None);
        assert_eq!(new.sample_type, SampleType::Biological);
        assert_eq!(new.coordinates.latitude, Some(-16.9));
        assert_eq!(new.microbiology.gram_stain.as_deref(), Some("negative"));
        assert_eq!(new.microbiology.biochemical_tests.get("catalase"), Some(&true));
        assert_eq!(new.morphology.colony_shape, None);
        assert_eq!(new.publications, vec!["https://doi.org/10.1/abc".to_string()]);
    }

    #[test]
    fn test_section_names() {
        assert_eq!("molecular".parse::<DraftSection>().unwrap(), DraftSection::Molecular);
        assert!("images".parse::<DraftSection>().is_err());
    }
}
