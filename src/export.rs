use crate::error::AppResult;
use crate::models::Sample;
use std::io::Write;

/// Export columns, in order
pub const CSV_COLUMNS: [&str; 12] = [
    "sampleId",
    "sampleName",
    "projectSample",
    "projectNumber",
    "sampleNumber",
    "kingdom",
    "family",
    "genus",
    "species",
    "dateAcquired",
    "coordinates",
    "image",
];

fn csv_row(sample: &Sample) -> [String; 12] {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();
    [
        sample.sample_id.clone(),
        text(&sample.sample_name),
        sample.project_type.to_string(),
        sample.project_number.to_string(),
        sample.sample_number.to_string(),
        text(&sample.kingdom),
        text(&sample.family),
        text(&sample.genus),
        text(&sample.species),
        sample
            .date_acquired
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        sample
            .coordinates
            .both()
            .map(|(lat, lon)| format!("{}, {}", lat, lon))
            .unwrap_or_default(),
        text(&sample.image),
    ]
}

pub fn write_samples_csv<W: Write>(writer: W, samples: &[Sample]) -> AppResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_COLUMNS)?;
    for sample in samples {
        csv_writer.write_record(csv_row(sample))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn samples_to_csv(samples: &[Sample]) -> AppResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_samples_csv(&mut buffer, samples)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProjectType;
    use crate::models::sample::fixtures::biological;

    fn read_back(bytes: &[u8]) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_reader(bytes);
        let headers = reader
            .headers()
            .unwrap()
            .iter()
            .map(String::from)
            .collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        (headers, rows)
    }

    #[test]
    fn test_header_only_for_empty_catalogue() {
        let bytes = samples_to_csv(&[]).unwrap();
        let (headers, rows) = read_back(&bytes);
        assert_eq!(headers, CSV_COLUMNS.to_vec());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_one_row_per_sample_in_column_order() {
        let mut a = biological(ProjectType::A, 1, 1);
        a.sample_name = Some("Mucus, outer reef".into());
        a.coordinates.latitude = Some(-16.5);
        a.coordinates.longitude = Some(145.75);
        a.image = Some("/uploads/1-2.png".into());
        let b = biological(ProjectType::B, 20, 3);

        let bytes = samples_to_csv(&[a, b]).unwrap();
        let (headers, rows) = read_back(&bytes);

        assert_eq!(headers.len(), 12);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "A-001-001");
        assert_eq!(rows[0][1], "Mucus, outer reef");
        assert_eq!(rows[0][2], "A");
        assert_eq!(rows[0][10], "-16.5, 145.75");
        assert_eq!(rows[0][11], "/uploads/1-2.png");
        assert_eq!(rows[1][0], "B-020-003");
        assert_eq!(rows[1][3], "20");
        assert_eq!(rows[1][9], "");
    }
}
