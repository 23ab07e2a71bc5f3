use thiserror::Error;

/// AllocationError enum
/// Raised by a backend when it cannot produce a resource for a descriptor. A failed allocation
/// never leaves a partial entry behind in any manager.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("resource exhausted: {0}")]
    Exhausted(String),
    #[error("incompatible descriptor: {0}")]
    Compatibility(String),
    #[error("operation failed: {0}")]
    OpFailed(String)
}

impl AllocationError {

    #[inline]
    pub fn exhausted(message: impl Into<String>) -> Self {
        AllocationError::Exhausted(message.into())
    }

    #[inline]
    pub fn compatibility(message: impl Into<String>) -> Self {
        AllocationError::Compatibility(message.into())
    }

    #[inline]
    pub fn op_failed(message: impl Into<String>) -> Self {
        AllocationError::OpFailed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::AllocationError;

    #[test]
    fn messages_carry_the_backend_text() {
        let error = AllocationError::exhausted("out of GDI handles");
        assert_eq!(error.to_string(), "resource exhausted: out of GDI handles");
        assert_eq!(error, AllocationError::Exhausted("out of GDI handles".to_string()));
    }
}
