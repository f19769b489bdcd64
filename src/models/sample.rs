use super::{
    deserialize_optional_date, deserialize_optional_f64, deserialize_optional_i32,
    deserialize_string_to_i32,
};
use crate::error::{AppError, AppResult};
use crate::identifier;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Project series a sample belongs to
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    sqlx::Type,
    ToSchema,
)]
#[sqlx(type_name = "project_type_enum")]
pub enum ProjectType {
    A,
    B,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::A => "A",
            ProjectType::B => "B",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(ProjectType::A),
            "B" | "b" => Ok(ProjectType::B),
            other => Err(AppError::validation(format!(
                "invalid project type {:?}, expected A or B",
                other
            ))),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(type_name = "sample_type_enum")]
pub enum SampleType {
    #[serde(rename = "Biological")]
    #[sqlx(rename = "Biological")]
    Biological,
    #[serde(rename = "Non-Biological", alias = "NonBiological")]
    #[sqlx(rename = "Non-Biological")]
    NonBiological,
}

impl SampleType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleType::Biological => "Biological",
            SampleType::NonBiological => "Non-Biological",
        }
    }
}

impl fmt::Display for SampleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collection site position in decimal degrees
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Coordinates {
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_optional_f64")]
    pub longitude: Option<f64>,
}

impl Coordinates {
    pub fn both(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Metadata of a raw sequencing file linked to the sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SequenceFile {
    pub file_name: String,
    pub format: Option<String>,
    pub size_bytes: Option<i64>,
    pub sha256: Option<String>,
}

/// Photos and images attached to a sample. Values are public storage paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Media {
    pub sample_photo: Option<String>,
    pub sem_photos: Vec<String>,
    pub microscope_photos: Vec<String>,
    pub gel_image: Option<String>,
    pub isolated_morphology_images: Vec<String>,
    pub raw_sequence_file: Option<SequenceFile>,
}

/// Slot an uploaded image is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum MediaKind {
    /// The primary `image` field (exported in CSV)
    Image,
    SamplePhoto,
    Sem,
    Microscope,
    Gel,
    IsolatedMorphology,
}

impl FromStr for MediaKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "image" => Ok(MediaKind::Image),
            "samplePhoto" => Ok(MediaKind::SamplePhoto),
            "sem" => Ok(MediaKind::Sem),
            "microscope" => Ok(MediaKind::Microscope),
            "gel" => Ok(MediaKind::Gel),
            "isolatedMorphology" => Ok(MediaKind::IsolatedMorphology),
            other => Err(AppError::bad_request(format!("unknown image kind {:?}", other))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Morphology {
    pub colony_shape: Option<String>,
    pub colony_color: Option<String>,
    pub texture: Option<String>,
    pub margin: Option<String>,
    pub elevation: Option<String>,
    pub size: Option<String>,
    pub cell_shape: Option<String>,
    pub motility: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AntibacterialAssay {
    pub target_organism: Option<String>,
    pub method: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_f64")]
    pub inhibition_zone_mm: Option<f64>,
    pub result: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Microbiology {
    pub gram_stain: Option<String>,
    /// Biochemical test name -> positive
    pub biochemical_tests: BTreeMap<String, bool>,
    pub enzymatic_activities: Vec<String>,
    pub antibacterial_assay: Option<AntibacterialAssay>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct Molecular {
    pub marker_gene: Option<String>,
    pub extraction_method: Option<String>,
    pub primer_pair: Option<String>,
    pub sequencing_platform: Option<String>,
    pub accession_number: Option<String>,
    pub accession_database: Option<String>,
    #[serde(deserialize_with = "deserialize_optional_i32")]
    pub sequence_length: Option<i32>,
    pub notes: Option<String>,
}

/// A catalogued specimen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub id: Uuid,
    /// Composite identifier `{projectType}-{projectNumber:03}-{sampleNumber:03}`
    pub sample_id: String,
    pub sample_name: Option<String>,
    pub project_type: ProjectType,
    pub project_number: i32,
    pub sample_number: i32,
    pub sample_type: SampleType,
    pub kingdom: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub species: Option<String>,
    pub date_acquired: Option<NaiveDate>,
    pub dive_site: Option<String>,
    pub collector_name: Option<String>,
    #[sqlx(flatten)]
    pub coordinates: Coordinates,
    pub image: Option<String>,
    #[sqlx(json)]
    pub media: Media,
    #[sqlx(json)]
    pub morphology: Morphology,
    #[sqlx(json)]
    pub microbiology: Microbiology,
    #[sqlx(json)]
    pub molecular: Molecular,
    #[sqlx(json)]
    pub publications: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sample {
    /// Validates field ranges and recomputes the composite identifier. Runs
    /// before every write.
    pub fn prepare_for_save(&mut self) -> AppResult<()> {
        trim_optional(&mut self.sample_name);
        trim_optional(&mut self.kingdom);
        trim_optional(&mut self.family);
        trim_optional(&mut self.genus);
        trim_optional(&mut self.species);
        trim_optional(&mut self.dive_site);
        trim_optional(&mut self.collector_name);
        self.publications = self
            .publications
            .iter()
            .map(|link| link.trim().to_string())
            .filter(|link| !link.is_empty())
            .collect();

        self.validate()?;

        self.sample_id =
            identifier::format_sample_id(self.project_type, self.project_number, self.sample_number);
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        identifier::validate_number("projectNumber", self.project_number)?;
        identifier::validate_number("sampleNumber", self.sample_number)?;

        if self.sample_type == SampleType::Biological {
            for (field, value) in [
                ("kingdom", &self.kingdom),
                ("family", &self.family),
                ("genus", &self.genus),
                ("species", &self.species),
            ] {
                if is_blank(value) {
                    return Err(AppError::validation(format!(
                        "{} is required for biological samples",
                        field
                    )));
                }
            }
        }

        if let Some(lat) = self.coordinates.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(AppError::validation(format!(
                    "latitude {} is out of range [-90, 90]",
                    lat
                )));
            }
        }
        if let Some(lon) = self.coordinates.longitude {
            if !(-180.0..=180.0).contains(&lon) {
                return Err(AppError::validation(format!(
                    "longitude {} is out of range [-180, 180]",
                    lon
                )));
            }
        }

        if let Some(assay) = &self.microbiology.antibacterial_assay {
            if assay.inhibition_zone_mm.is_some_and(|mm| mm < 0.0) {
                return Err(AppError::validation(
                    "inhibitionZoneMm must not be negative",
                ));
            }
        }

        if self.molecular.sequence_length.is_some_and(|len| len < 0) {
            return Err(AppError::validation("sequenceLength must not be negative"));
        }

        Ok(())
    }

    /// Records without a name or a kingdom are considered abandoned entries.
    pub fn is_incomplete(&self) -> bool {
        is_blank(&self.sample_name) || is_blank(&self.kingdom)
    }

    /// Attaches a stored image path to the given slot. Returns the path it
    /// replaced, if the slot holds a single image.
    pub fn attach_image(&mut self, kind: MediaKind, path: String) -> Option<String> {
        match kind {
            MediaKind::Image => self.image.replace(path),
            MediaKind::SamplePhoto => self.media.sample_photo.replace(path),
            MediaKind::Gel => self.media.gel_image.replace(path),
            MediaKind::Sem => {
                self.media.sem_photos.push(path);
                None
            }
            MediaKind::Microscope => {
                self.media.microscope_photos.push(path);
                None
            }
            MediaKind::IsolatedMorphology => {
                self.media.isolated_morphology_images.push(path);
                None
            }
        }
    }

    /// Value of a free-text column by its storage name
    pub fn text_column(&self, column: &str) -> Option<&str> {
        match column {
            "sample_id" => Some(self.sample_id.as_str()),
            "sample_name" => self.sample_name.as_deref(),
            "kingdom" => self.kingdom.as_deref(),
            "family" => self.family.as_deref(),
            "genus" => self.genus.as_deref(),
            "species" => self.species.as_deref(),
            "dive_site" => self.dive_site.as_deref(),
            "collector_name" => self.collector_name.as_deref(),
            _ => None,
        }
    }

    /// Every stored file path referenced by this sample
    pub fn image_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = Vec::new();
        paths.extend(self.image.as_deref());
        paths.extend(self.media.sample_photo.as_deref());
        paths.extend(self.media.gel_image.as_deref());
        paths.extend(self.media.sem_photos.iter().map(String::as_str));
        paths.extend(self.media.microscope_photos.iter().map(String::as_str));
        paths.extend(
            self.media
                .isolated_morphology_images
                .iter()
                .map(String::as_str),
        );
        paths
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

fn trim_optional(value: &mut Option<String>) {
    if let Some(v) = value.take() {
        let trimmed = v.trim();
        if !trimmed.is_empty() {
            *value = Some(trimmed.to_string());
        }
    }
}

/// Create sample request. A `sampleId` in the body is ignored; it is always
/// derived from the project and sample numbers.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewSample {
    #[serde(default)]
    pub sample_name: Option<String>,
    #[serde(alias = "projectSample")]
    pub project_type: ProjectType,
    #[serde(deserialize_with = "deserialize_string_to_i32")]
    pub project_number: i32,
    /// Next free number in the project when absent
    #[serde(default, deserialize_with = "deserialize_optional_i32")]
    pub sample_number: Option<i32>,
    pub sample_type: SampleType,
    #[serde(default)]
    pub kingdom: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub genus: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(
        default,
        alias = "collectionDate",
        deserialize_with = "deserialize_optional_date"
    )]
    pub date_acquired: Option<NaiveDate>,
    #[serde(default)]
    pub dive_site: Option<String>,
    #[serde(default)]
    pub collector_name: Option<String>,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub media: Media,
    #[serde(default)]
    pub morphology: Morphology,
    #[serde(default)]
    pub microbiology: Microbiology,
    #[serde(default)]
    pub molecular: Molecular,
    #[serde(default)]
    pub publications: Vec<String>,
}

impl NewSample {
    pub fn new(project_type: ProjectType, project_number: i32, sample_type: SampleType) -> Self {
        Self {
            sample_name: None,
            project_type,
            project_number,
            sample_number: None,
            sample_type,
            kingdom: None,
            family: None,
            genus: None,
            species: None,
            date_acquired: None,
            dive_site: None,
            collector_name: None,
            coordinates: Coordinates::default(),
            image: None,
            media: Media::default(),
            morphology: Morphology::default(),
            microbiology: Microbiology::default(),
            molecular: Molecular::default(),
            publications: Vec::new(),
        }
    }

    /// Builds the unsaved record. The identifier is filled in by
    /// [`Sample::prepare_for_save`].
    pub fn into_sample(self, sample_number: i32) -> Sample {
        let now = Utc::now();
        Sample {
            id: Uuid::new_v4(),
            sample_id: String::new(),
            sample_name: self.sample_name,
            project_type: self.project_type,
            project_number: self.project_number,
            sample_number,
            sample_type: self.sample_type,
            kingdom: self.kingdom,
            family: self.family,
            genus: self.genus,
            species: self.species,
            date_acquired: self.date_acquired,
            dive_site: self.dive_site,
            collector_name: self.collector_name,
            coordinates: self.coordinates,
            image: self.image,
            media: self.media,
            morphology: self.morphology,
            microbiology: self.microbiology,
            molecular: self.molecular,
            publications: self.publications,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update; present fields replace the stored values
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SampleUpdate {
    pub sample_name: Option<String>,
    #[serde(alias = "projectSample")]
    pub project_type: Option<ProjectType>,
    #[serde(deserialize_with = "deserialize_optional_i32")]
    pub project_number: Option<i32>,
    #[serde(deserialize_with = "deserialize_optional_i32")]
    pub sample_number: Option<i32>,
    pub sample_type: Option<SampleType>,
    pub kingdom: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub species: Option<String>,
    #[serde(alias = "collectionDate", deserialize_with = "deserialize_optional_date")]
    pub date_acquired: Option<NaiveDate>,
    pub dive_site: Option<String>,
    pub collector_name: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub image: Option<String>,
    pub media: Option<Media>,
    pub morphology: Option<Morphology>,
    pub microbiology: Option<Microbiology>,
    pub molecular: Option<Molecular>,
    pub publications: Option<Vec<String>>,
}

impl SampleUpdate {
    pub fn apply(self, sample: &mut Sample) {
        fn set<T>(target: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *target = value;
            }
        }
        fn set_opt<T>(target: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *target = value;
            }
        }

        set_opt(&mut sample.sample_name, self.sample_name);
        set(&mut sample.project_type, self.project_type);
        set(&mut sample.project_number, self.project_number);
        set(&mut sample.sample_number, self.sample_number);
        set(&mut sample.sample_type, self.sample_type);
        set_opt(&mut sample.kingdom, self.kingdom);
        set_opt(&mut sample.family, self.family);
        set_opt(&mut sample.genus, self.genus);
        set_opt(&mut sample.species, self.species);
        set_opt(&mut sample.date_acquired, self.date_acquired);
        set_opt(&mut sample.dive_site, self.dive_site);
        set_opt(&mut sample.collector_name, self.collector_name);
        set(&mut sample.coordinates, self.coordinates);
        set_opt(&mut sample.image, self.image);
        set(&mut sample.media, self.media);
        set(&mut sample.morphology, self.morphology);
        set(&mut sample.microbiology, self.microbiology);
        set(&mut sample.molecular, self.molecular);
        set(&mut sample.publications, self.publications);
        sample.updated_at = Utc::now();
    }
}

/// Server-side search. Identity fields match exactly, descriptive fields
/// match as case-insensitive substrings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SampleSearch {
    pub sample_id: Option<String>,
    #[serde(alias = "projectSample")]
    pub project_type: Option<ProjectType>,
    #[serde(deserialize_with = "deserialize_optional_i32")]
    pub project_number: Option<i32>,
    #[serde(deserialize_with = "deserialize_optional_i32")]
    pub sample_number: Option<i32>,
    pub sample_type: Option<SampleType>,
    pub sample_name: Option<String>,
    pub kingdom: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub species: Option<String>,
    pub dive_site: Option<String>,
    pub collector_name: Option<String>,
}

impl SampleSearch {
    /// Substring fields paired with their column names
    pub fn substring_terms(&self) -> Vec<(&'static str, &str)> {
        [
            ("sample_name", &self.sample_name),
            ("kingdom", &self.kingdom),
            ("family", &self.family),
            ("genus", &self.genus),
            ("species", &self.species),
            ("dive_site", &self.dive_site),
            ("collector_name", &self.collector_name),
        ]
        .into_iter()
        .filter_map(|(column, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (column, v))
        })
        .collect()
    }

    pub fn matches(&self, sample: &Sample) -> bool {
        if let Some(id) = self.sample_id.as_deref().filter(|v| !v.is_empty()) {
            if sample.sample_id != id {
                return false;
            }
        }
        if self.project_type.is_some_and(|pt| pt != sample.project_type) {
            return false;
        }
        if self.project_number.is_some_and(|n| n != sample.project_number) {
            return false;
        }
        if self.sample_number.is_some_and(|n| n != sample.sample_number) {
            return false;
        }
        if self.sample_type.is_some_and(|st| st != sample.sample_type) {
            return false;
        }

        self.substring_terms().into_iter().all(|(column, needle)| {
            sample
                .text_column(column)
                .is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        })
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::biological;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prepare_recomputes_identifier() {
        let mut sample = biological(ProjectType::B, 12, 4);
        assert_eq!(sample.sample_id, "B-012-004");

        sample.sample_id = "tampered".to_string();
        sample.sample_number = 5;
        sample.prepare_for_save().unwrap();
        assert_eq!(sample.sample_id, "B-012-005");
    }

    #[test]
    fn test_biological_requires_taxonomy() {
        let mut sample = biological(ProjectType::A, 1, 1);
        sample.genus = Some("   ".to_string());
        let err = sample.prepare_for_save().unwrap_err();
        assert!(err.to_string().contains("genus"));

        let mut sample = NewSample::new(ProjectType::A, 1, SampleType::NonBiological).into_sample(1);
        assert!(sample.prepare_for_save().is_ok());
    }

    #[test]
    fn test_coordinate_ranges() {
        let mut sample = biological(ProjectType::A, 1, 1);
        sample.coordinates.latitude = Some(91.0);
        assert!(sample.validate().is_err());

        sample.coordinates.latitude = Some(-16.5);
        sample.coordinates.longitude = Some(-181.0);
        assert!(sample.validate().is_err());

        sample.coordinates.longitude = Some(179.9);
        assert!(sample.validate().is_ok());
    }

    #[test]
    fn test_number_ranges() {
        let mut sample = biological(ProjectType::A, 1, 1);
        sample.project_number = 0;
        assert!(sample.validate().is_err());
        sample.project_number = 1000;
        assert!(sample.validate().is_err());
    }

    #[test]
    fn test_new_sample_ignores_client_identifier() {
        let new: NewSample = serde_json::from_value(json!({
            "sampleId": "Z-999-999",
            "projectSample": "A",
            "projectNumber": "3",
            "sampleType": "Non-Biological",
            "collectionDate": "2024-05-10",
        }))
        .unwrap();
        assert_eq!(new.project_type, ProjectType::A);
        assert_eq!(new.project_number, 3);
        assert_eq!(new.sample_number, None);
        assert_eq!(new.date_acquired, NaiveDate::from_ymd_opt(2024, 5, 10));

        let mut sample = new.into_sample(2);
        sample.prepare_for_save().unwrap();
        assert_eq!(sample.sample_id, "A-003-002");
    }

    #[test]
    fn test_incomplete_records() {
        let mut sample = biological(ProjectType::A, 1, 1);
        assert!(!sample.is_incomplete());

        sample.sample_name = Some(" ".to_string());
        assert!(sample.is_incomplete());

        let mut sample = biological(ProjectType::A, 1, 2);
        sample.kingdom = None;
        assert!(sample.is_incomplete());
    }

    #[test]
    fn test_update_keeps_absent_fields() {
        let mut sample = biological(ProjectType::A, 1, 1);
        let update: SampleUpdate = serde_json::from_value(json!({
            "diveSite": "Outer reef",
            "sampleNumber": "9",
        }))
        .unwrap();
        update.apply(&mut sample);
        sample.prepare_for_save().unwrap();

        assert_eq!(sample.dive_site.as_deref(), Some("Outer reef"));
        assert_eq!(sample.genus.as_deref(), Some("Vibrio"));
        assert_eq!(sample.sample_id, "A-001-009");
    }

    #[test]
    fn test_attach_image_slots() {
        let mut sample = biological(ProjectType::A, 1, 1);
        assert_eq!(sample.attach_image(MediaKind::Image, "/uploads/a.png".into()), None);
        assert_eq!(
            sample.attach_image(MediaKind::Image, "/uploads/b.png".into()),
            Some("/uploads/a.png".to_string())
        );
        sample.attach_image(MediaKind::Sem, "/uploads/s1.png".into());
        sample.attach_image(MediaKind::Sem, "/uploads/s2.png".into());

        assert_eq!(sample.media.sem_photos.len(), 2);
        assert_eq!(
            sample.image_paths(),
            vec!["/uploads/b.png", "/uploads/s1.png", "/uploads/s2.png"]
        );
    }

    #[test]
    fn test_publication_links_accept_any_non_empty_string() {
        let mut sample = biological(ProjectType::A, 1, 1);
        sample.publications = vec![
            "https://doi.org/10.1000/xyz".into(),
            "  ".into(),
            " doi:10.1000/xyz ".into(),
        ];
        assert!(sample.prepare_for_save().is_ok());
        assert_eq!(
            sample.publications,
            vec!["https://doi.org/10.1000/xyz", "doi:10.1000/xyz"]
        );
    }

    #[test]
    fn test_search_matching() {
        let sample = biological(ProjectType::A, 2, 3);
        let search = SampleSearch {
            genus: Some("vib".to_string()),
            project_number: Some(2),
            ..Default::default()
        };
        assert!(search.matches(&sample));

        let search = SampleSearch {
            sample_type: Some(SampleType::NonBiological),
            ..Default::default()
        };
        assert!(!search.matches(&sample));

        assert!(SampleSearch::default().matches(&sample));
    }
}
