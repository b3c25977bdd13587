use thiserror::Error;

/// Everything that can go wrong inside a generator. The generators are pure
/// functions of their inputs, so the only failure is being handed inputs
/// outside their domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FractalError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl FractalError {
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        FractalError::InvalidParameter(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, FractalError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display() {
        let err = FractalError::invalid("order must be >= 0, got -1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter: order must be >= 0, got -1"
        );
    }
}
