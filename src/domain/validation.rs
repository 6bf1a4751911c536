use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidDid { input: String },
    InvalidHostname { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidDid { input } => {
                write!(f, "invalid DID: {input} (expected digits only)")
            }
            Self::InvalidHostname { input } => {
                write!(f, "invalid server hostname: {input}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "did" };
        assert_eq!(err.to_string(), "did must not be empty");

        let err = ValidationError::InvalidDid {
            input: "555-1234".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid DID: 555-1234 (expected digits only)");

        let err = ValidationError::InvalidHostname {
            input: "atl 1".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid server hostname: atl 1");
    }
}
