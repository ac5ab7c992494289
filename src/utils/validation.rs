use crate::domain::model::PartyKind;
use crate::utils::error::{ContractError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Identifiers are opaque, but they must contain something besides whitespace.
pub fn validate_identifier(kind: PartyKind, identifier: &str) -> Result<()> {
    if identifier.trim().is_empty() {
        return Err(ContractError::ValidationError {
            message: format!("{} identifier cannot be empty", kind),
        });
    }
    Ok(())
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ContractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ContractError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ContractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ContractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ContractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ContractError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ContractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ErrorKind;

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier(PartyKind::Contracting, "9d48f5c9").is_ok());

        let err = validate_identifier(PartyKind::Contracted, " \t").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("contracted"));
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("source.base_url", "https://example.com/api").is_ok());
        assert!(validate_url("source.base_url", "http://192.168.15.119:8000/api").is_ok());
        assert!(validate_url("source.base_url", "").is_err());
        assert!(validate_url("source.base_url", "invalid-url").is_err());
        assert!(validate_url("source.base_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("source.timeout_seconds", 10u64, 1, 300).is_ok());
        assert!(validate_range("source.timeout_seconds", 0u64, 1, 300).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some("outbox".to_string());
        assert_eq!(validate_required_field("share.directory", &present).unwrap(), "outbox");

        let absent: Option<String> = None;
        let err = validate_required_field("share.directory", &absent).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }
}
