use thiserror::Error;

// ---------------------------------------------------------------------------
// Simulation errors
// ---------------------------------------------------------------------------

/// Errors surfaced before a run starts. Stepping itself cannot fail:
/// every per-step quantity is clamped and the divisors (mass, drum radius)
/// are checked here, at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        SimError::InvalidParameter { name, value, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_offending_field() {
        let err = SimError::invalid("mass", -1.0, "must be > 0");
        let msg = err.to_string();
        assert!(msg.contains("mass"));
        assert!(msg.contains("must be > 0"));
    }
}
