pub type MockwarpResult<T> = Result<T, MockwarpError>;

#[derive(thiserror::Error, Debug)]
pub enum MockwarpError {
    #[error("geometry error: {0}")]
    Geometry(String),

    #[error("invalid source image: {0}")]
    InvalidSource(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("template not found: {0}")]
    TemplateNotFound(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MockwarpError {
    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }

    pub fn invalid_source(msg: impl Into<String>) -> Self {
        Self::InvalidSource(msg.into())
    }

    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn template_not_found(id: impl Into<String>) -> Self {
        Self::TemplateNotFound(id.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            MockwarpError::geometry("x")
                .to_string()
                .contains("geometry error:")
        );
        assert!(
            MockwarpError::invalid_source("x")
                .to_string()
                .contains("invalid source image:")
        );
        assert!(
            MockwarpError::invalid_parameter("x")
                .to_string()
                .contains("invalid parameter:")
        );
        assert!(
            MockwarpError::template_not_found("mug-white-11oz")
                .to_string()
                .contains("mug-white-11oz")
        );
        assert!(
            MockwarpError::serde("x")
                .to_string()
                .contains("serialization error:")
        );
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = MockwarpError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
