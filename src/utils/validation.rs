use crate::utils::error::{DiagramError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(DiagramError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(DiagramError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    validate_path(field_name, file)?;

    match Path::new(file).extension().and_then(|ext| ext.to_str()) {
        Some(extension) if allowed_extensions.contains(&extension.to_ascii_lowercase().as_str()) => {
            Ok(())
        }
        Some(extension) => Err(DiagramError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(DiagramError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| DiagramError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_one_of(field_name: &str, value: &str, allowed: &[&str]) -> Result<()> {
    if allowed.contains(&value) {
        return Ok(());
    }
    Err(DiagramError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason: format!("Expected one of: {}", allowed.join(", ")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.path", "./figures").is_ok());
        assert!(validate_path("output.path", "  ").is_err());
        assert!(validate_path("output.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("inputs.dataset", "forces.json", &["json", "csv"]).is_ok());
        assert!(validate_file_extension("inputs.dataset", "FORCES.CSV", &["json", "csv"]).is_ok());
        assert!(validate_file_extension("inputs.dataset", "forces.nc", &["json", "csv"]).is_err());
        assert!(validate_file_extension("inputs.dataset", "forces", &["json", "csv"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("nodes.json".to_string());
        let missing: Option<String> = None;
        assert_eq!(validate_required_field("inputs.nodes", &present).unwrap(), "nodes.json");
        assert!(matches!(
            validate_required_field("inputs.nodes", &missing),
            Err(DiagramError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_one_of() {
        assert!(validate_one_of("monitoring.log_format", "json", &["compact", "json"]).is_ok());
        assert!(validate_one_of("monitoring.log_format", "xml", &["compact", "json"]).is_err());
    }
}
