use super::SampleStore;
use crate::{
    database::Database,
    error::{AppError, AppResult},
    models::{ProjectType, Sample, SampleSearch},
};
use sqlx::{Postgres, QueryBuilder, types::Json};
use uuid::Uuid;

const SAMPLE_COLUMNS: &str = r#"
    id, sample_id, sample_name, project_type, project_number, sample_number,
    sample_type, kingdom, family, genus, species, date_acquired, dive_site,
    collector_name, latitude, longitude, image, media, morphology,
    microbiology, molecular, publications, created_at, updated_at
"#;

/// Sample repository backed by PostgreSQL
#[derive(Clone)]
pub struct SampleRepository {
    db: Database,
}

impl SampleRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Escapes LIKE wildcards so user input matches literally
    fn like_pattern(value: &str) -> String {
        let escaped = value
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    }

    fn apply_search<'a>(query_builder: &mut QueryBuilder<'a, Postgres>, search: &'a SampleSearch) {
        if let Some(sample_id) = search.sample_id.as_deref().filter(|v| !v.is_empty()) {
            query_builder.push(" AND sample_id = ");
            query_builder.push_bind(sample_id);
        }
        if let Some(project_type) = search.project_type {
            query_builder.push(" AND project_type = ");
            query_builder.push_bind(project_type);
        }
        if let Some(project_number) = search.project_number {
            query_builder.push(" AND project_number = ");
            query_builder.push_bind(project_number);
        }
        if let Some(sample_number) = search.sample_number {
            query_builder.push(" AND sample_number = ");
            query_builder.push_bind(sample_number);
        }
        if let Some(sample_type) = search.sample_type {
            query_builder.push(" AND sample_type = ");
            query_builder.push_bind(sample_type);
        }
        for (column, value) in search.substring_terms() {
            query_builder.push(format!(" AND {} ILIKE ", column));
            query_builder.push_bind(Self::like_pattern(value));
        }
    }
}

#[async_trait::async_trait]
impl SampleStore for SampleRepository {
    async fn insert(&self, sample: &Sample) -> AppResult<Sample> {
        let sql = format!(
            r#"
            INSERT INTO samples (
                id, sample_id, sample_name, project_type, project_number, sample_number,
                sample_type, kingdom, family, genus, species, date_acquired, dive_site,
                collector_name, latitude, longitude, image, media, morphology,
                microbiology, molecular, publications, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                    $17, $18, $19, $20, $21, $22, $23, $24)
            RETURNING {}
            "#,
            SAMPLE_COLUMNS
        );

        sqlx::query_as::<_, Sample>(&sql)
            .bind(sample.id)
            .bind(&sample.sample_id)
            .bind(&sample.sample_name)
            .bind(sample.project_type)
            .bind(sample.project_number)
            .bind(sample.sample_number)
            .bind(sample.sample_type)
            .bind(&sample.kingdom)
            .bind(&sample.family)
            .bind(&sample.genus)
            .bind(&sample.species)
            .bind(sample.date_acquired)
            .bind(&sample.dive_site)
            .bind(&sample.collector_name)
            .bind(sample.coordinates.latitude)
            .bind(sample.coordinates.longitude)
            .bind(&sample.image)
            .bind(Json(&sample.media))
            .bind(Json(&sample.morphology))
            .bind(Json(&sample.microbiology))
            .bind(Json(&sample.molecular))
            .bind(Json(&sample.publications))
            .bind(sample.created_at)
            .bind(sample.updated_at)
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| AppError::from_write(e, &sample.sample_id))
    }

    async fn find_by_sample_id(&self, sample_id: &str) -> AppResult<Option<Sample>> {
        let sql = format!("SELECT {} FROM samples WHERE sample_id = $1", SAMPLE_COLUMNS);
        let sample = sqlx::query_as::<_, Sample>(&sql)
            .bind(sample_id)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(sample)
    }

    async fn list(&self) -> AppResult<Vec<Sample>> {
        let sql = format!(
            "SELECT {} FROM samples ORDER BY created_at ASC, sample_id ASC",
            SAMPLE_COLUMNS
        );
        let samples = sqlx::query_as::<_, Sample>(&sql)
            .fetch_all(self.db.pool())
            .await?;

        Ok(samples)
    }

    async fn list_by_project(
        &self,
        project_type: ProjectType,
        project_number: i32,
    ) -> AppResult<Vec<Sample>> {
        let sql = format!(
            r#"
            SELECT {} FROM samples
            WHERE project_type = $1 AND project_number = $2
            ORDER BY sample_number ASC
            "#,
            SAMPLE_COLUMNS
        );
        let samples = sqlx::query_as::<_, Sample>(&sql)
            .bind(project_type)
            .bind(project_number)
            .fetch_all(self.db.pool())
            .await?;

        Ok(samples)
    }

    async fn search(&self, search: &SampleSearch) -> AppResult<Vec<Sample>> {
        let mut query_builder =
            QueryBuilder::new(format!("SELECT {} FROM samples WHERE TRUE", SAMPLE_COLUMNS));
        Self::apply_search(&mut query_builder, search);
        query_builder.push(" ORDER BY created_at ASC, sample_id ASC");

        let samples = query_builder
            .build_query_as::<Sample>()
            .fetch_all(self.db.pool())
            .await?;

        Ok(samples)
    }

    async fn replace(&self, id: Uuid, sample: &Sample) -> AppResult<Sample> {
        let sql = format!(
            r#"
            UPDATE samples SET
                sample_id = $2,
                sample_name = $3,
                project_type = $4,
                project_number = $5,
                sample_number = $6,
                sample_type = $7,
                kingdom = $8,
                family = $9,
                genus = $10,
                species = $11,
                date_acquired = $12,
                dive_site = $13,
                collector_name = $14,
                latitude = $15,
                longitude = $16,
                image = $17,
                media = $18,
                morphology = $19,
                microbiology = $20,
                molecular = $21,
                publications = $22,
                updated_at = $23
            WHERE id = $1
            RETURNING {}
            "#,
            SAMPLE_COLUMNS
        );

        sqlx::query_as::<_, Sample>(&sql)
            .bind(id)
            .bind(&sample.sample_id)
            .bind(&sample.sample_name)
            .bind(sample.project_type)
            .bind(sample.project_number)
            .bind(sample.sample_number)
            .bind(sample.sample_type)
            .bind(&sample.kingdom)
            .bind(&sample.family)
            .bind(&sample.genus)
            .bind(&sample.species)
            .bind(sample.date_acquired)
            .bind(&sample.dive_site)
            .bind(&sample.collector_name)
            .bind(sample.coordinates.latitude)
            .bind(sample.coordinates.longitude)
            .bind(&sample.image)
            .bind(Json(&sample.media))
            .bind(Json(&sample.morphology))
            .bind(Json(&sample.microbiology))
            .bind(Json(&sample.molecular))
            .bind(Json(&sample.publications))
            .bind(sample.updated_at)
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| AppError::from_write(e, &sample.sample_id))?
            .ok_or_else(|| AppError::not_found(format!("sample {} not found", sample.sample_id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM samples WHERE id = $1")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_incomplete(&self) -> AppResult<Vec<Sample>> {
        let sql = format!(
            r#"
            DELETE FROM samples
            WHERE sample_name IS NULL OR btrim(sample_name) = ''
               OR kingdom IS NULL OR btrim(kingdom) = ''
            RETURNING {}
            "#,
            SAMPLE_COLUMNS
        );
        let removed = sqlx::query_as::<_, Sample>(&sql)
            .fetch_all(self.db.pool())
            .await?;

        Ok(removed)
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.db.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(SampleRepository::like_pattern("vib"), "%vib%");
        assert_eq!(SampleRepository::like_pattern("50%_x"), "%50\\%\\_x%");
    }

    #[test]
    fn test_search_sql() {
        let search = SampleSearch {
            project_type: Some(ProjectType::A),
            genus: Some("Vibrio".to_string()),
            kingdom: Some("  ".to_string()),
            ..Default::default()
        };
        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM samples WHERE TRUE");
        SampleRepository::apply_search(&mut query_builder, &search);
        assert_eq!(
            query_builder.sql(),
            "SELECT * FROM samples WHERE TRUE AND project_type = $1 AND genus ILIKE $2"
        );
    }
}
