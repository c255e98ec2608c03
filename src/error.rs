pub type StyleResult<T> = Result<T, StyleError>;

/// Errors raised while loading or validating an [`ArrowStyle`](crate::ArrowStyle).
///
/// Geometry and registry operations never fail; configuration is the only
/// place where bad input is reported instead of degraded.
#[derive(thiserror::Error, Debug)]
pub enum StyleError {
    #[error("invalid stroke color {0:?}: expected a CSS color")]
    InvalidColor(String),

    #[error("invalid {field}: {value} (must be finite and non-negative)")]
    InvalidDimension { field: &'static str, value: f32 },

    #[error("style parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages_are_stable() {
        assert!(StyleError::InvalidColor("reddish".into())
            .to_string()
            .starts_with("invalid stroke color \"reddish\""));

        let err = StyleError::InvalidDimension {
            field: "stroke_width",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "invalid stroke_width: -1 (must be finite and non-negative)"
        );
    }

    #[test]
    fn test_parse_preserves_source() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = StyleError::from(source);
        assert!(err.to_string().starts_with("style parse error:"));
    }
}
