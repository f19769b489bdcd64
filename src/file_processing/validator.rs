use super::FileProcessingConfig;
use crate::error::{AppError, AppResult};

const MAX_FILENAME_LEN: usize = 255;

#[derive(Debug, Clone)]
pub struct FileValidator {
    config: FileProcessingConfig,
}

impl FileValidator {
    pub fn new(config: &FileProcessingConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn validate_file(&self, file_data: &[u8], filename: &str) -> AppResult<()> {
        self.validate_file_size(file_data)?;
        self.validate_filename(filename)?;
        Ok(())
    }

    fn validate_file_size(&self, file_data: &[u8]) -> AppResult<()> {
        let file_size = file_data.len() as u64;

        if file_size == 0 {
            return Err(AppError::validation("file is empty"));
        }

        if file_size > self.config.max_file_size {
            return Err(AppError::file_too_large(self.config.max_file_size));
        }

        Ok(())
    }

    fn validate_filename(&self, filename: &str) -> AppResult<()> {
        if filename.is_empty() {
            return Err(AppError::validation("file name must not be empty"));
        }

        if filename.len() > MAX_FILENAME_LEN {
            return Err(AppError::validation(format!(
                "file name is longer than {} characters",
                MAX_FILENAME_LEN
            )));
        }

        let dangerous_chars = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];
        if filename.chars().any(|c| dangerous_chars.contains(&c)) {
            return Err(AppError::validation("file name contains illegal characters"));
        }

        Ok(())
    }

    /// Sniffs the content; anything not `image/*` is rejected
    pub fn validate_image(&self, file_data: &[u8]) -> AppResult<infer::Type> {
        match infer::get(file_data) {
            Some(kind) if kind.matcher_type() == infer::MatcherType::Image => Ok(kind),
            Some(kind) => Err(AppError::unsupported_file_type(kind.mime_type())),
            None => Err(AppError::unsupported_file_type("unknown")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_processing::fixtures::PNG_BYTES;

    fn validator() -> FileValidator {
        FileValidator::new(&FileProcessingConfig {
            max_file_size: 1024,
        })
    }

    #[test]
    fn test_validate_file_size() {
        let validator = validator();
        assert!(validator.validate_file_size(&[]).is_err());
        assert!(validator.validate_file_size(&[0; 512]).is_ok());
        assert!(matches!(
            validator.validate_file_size(&[0; 2048]),
            Err(AppError::FileTooLarge { max_size: 1024 })
        ));
    }

    #[test]
    fn test_validate_filename() {
        let validator = validator();
        assert!(validator.validate_filename("gel_01.jpg").is_ok());
        assert!(validator.validate_filename("").is_err());
        assert!(validator.validate_filename("../gel.jpg").is_err());
        assert!(validator.validate_filename(&"a".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_image() {
        let validator = validator();
        assert_eq!(validator.validate_image(PNG_BYTES).unwrap().mime_type(), "image/png");
        assert!(validator.validate_image(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00]).is_ok());
        // a PDF is recognised but is not an image
        assert!(matches!(
            validator.validate_image(b"%PDF-1.7 ..."),
            Err(AppError::UnsupportedFileType { .. })
        ));
        assert!(validator.validate_image(b"plain text").is_err());
    }
}
