//! Domain error types.
//!
//! These errors represent invariant violations when assembling route
//! candidates. They are distinct from provider/IO errors.

/// Domain-level errors for candidate construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A candidate must have at least one leg
    #[error("route candidate must have at least one leg")]
    EmptyRoute,

    /// Consecutive legs don't share an endpoint
    #[error("leg {index} ends at {to} but the next leg starts at {from}")]
    LegsNotConnected {
        index: usize,
        to: String,
        from: String,
    },

    /// A leg total does not fit the counter
    #[error("route {total} total overflows")]
    TotalOverflow { total: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyRoute;
        assert_eq!(err.to_string(), "route candidate must have at least one leg");

        let err = DomainError::LegsNotConnected {
            index: 0,
            to: "Gangnam".into(),
            from: "Yeoksam".into(),
        };
        assert_eq!(
            err.to_string(),
            "leg 0 ends at Gangnam but the next leg starts at Yeoksam"
        );

        let err = DomainError::TotalOverflow { total: "cost" };
        assert_eq!(err.to_string(), "route cost total overflows");
    }
}
