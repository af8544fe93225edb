use anyhow::Result;

/// Custom error types for input coming from the config file or command line
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("API URL is invalid: {reason}")]
    InvalidApiUrl { reason: String },

    #[error("Setting is invalid: {field} - {reason}")]
    InvalidSetting { field: String, reason: String },

    #[error("Duration is invalid: {reason}")]
    InvalidDuration { reason: String },
}

/// Base URL of the timer API: must be http(s) with a host, without query or
/// fragment. Returned without a trailing slash.
pub fn validate_api_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');

    if trimmed.is_empty() {
        return Err(ValidationError::InvalidApiUrl {
            reason: "URL cannot be empty".to_string(),
        }
        .into());
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidApiUrl {
            reason: "URL cannot contain whitespace".to_string(),
        }
        .into());
    }

    let parsed = reqwest::Url::parse(trimmed).map_err(|e| ValidationError::InvalidApiUrl {
        reason: format!("'{}': {}", trimmed, e),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidApiUrl {
            reason: format!("'{}' must start with http:// or https://", trimmed),
        }
        .into());
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::InvalidApiUrl {
            reason: format!("'{}' has no host", trimmed),
        }
        .into());
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(ValidationError::InvalidApiUrl {
            reason: "URL cannot contain a query string or fragment".to_string(),
        }
        .into());
    }

    Ok(trimmed.to_string())
}

/// Strict `HH:MM:SS` check for durations typed on the command line, where
/// silently falling back to a default would surprise the operator.
pub fn validate_duration_input(input: &str) -> Result<(String, String, String)> {
    let parts: Vec<&str> = input.trim().split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(ValidationError::InvalidDuration {
            reason: format!("expected HH:MM:SS, got '{}'", input),
        }
        .into());
    };

    Ok((
        duration_field("hours", hours, 99)?,
        duration_field("minutes", minutes, 59)?,
        duration_field("seconds", seconds, 59)?,
    ))
}

/// One or two plain digits, at most `max`, returned zero-padded.
fn duration_field(label: &str, value: &str, max: u32) -> Result<String> {
    if value.is_empty() || value.len() > 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidDuration {
            reason: format!("{} must be one or two digits, got '{}'", label, value),
        }
        .into());
    }
    let parsed: u32 = value.parse().map_err(|_| ValidationError::InvalidDuration {
        reason: format!("{} must be a number, got '{}'", label, value),
    })?;
    if parsed > max {
        return Err(ValidationError::InvalidDuration {
            reason: format!("{} must be at most {}, got {}", label, max, parsed),
        }
        .into());
    }
    Ok(format!("{:02}", parsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_api_url() {
        assert_eq!(
            validate_api_url("http://localhost:1025/").unwrap(),
            "http://localhost:1025"
        );
        assert!(validate_api_url("https://stage.local").is_ok());

        assert!(validate_api_url("").is_err());
        assert!(validate_api_url("ftp://host").is_err());
        assert!(validate_api_url("http://").is_err());
        assert!(validate_api_url("http://host?x=1").is_err());
        assert!(validate_api_url("http://my host").is_err());
        assert!(validate_api_url("http://host:notaport").is_err());
        assert!(validate_api_url("http://host:99999").is_err());
        assert!(validate_api_url("http://[::1").is_err());
        assert!(validate_api_url("http://host#top").is_err());

        assert_eq!(validate_api_url("http://[::1]:1025").unwrap(), "http://[::1]:1025");
        assert_eq!(validate_api_url(" http://10.0.0.5:1025 ").unwrap(), "http://10.0.0.5:1025");
    }

    #[test]
    fn test_validate_duration_input() {
        let (h, m, s) = validate_duration_input("1:05:00").unwrap();
        assert_eq!((h.as_str(), m.as_str(), s.as_str()), ("01", "05", "00"));

        assert!(validate_duration_input("10:00").is_err());
        assert!(validate_duration_input("00:60:00").is_err());
        assert!(validate_duration_input("aa:00:00").is_err());
        assert!(validate_duration_input("-1:00:00").is_err());
        assert!(validate_duration_input("+5:00:00").is_err());
        assert!(validate_duration_input("007:00:00").is_err());
        assert!(validate_duration_input("00::00").is_err());

        let (h, m, s) = validate_duration_input("99:59:59").unwrap();
        assert_eq!((h.as_str(), m.as_str(), s.as_str()), ("99", "59", "59"));
    }
}
