use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the simulation core.
///
/// Near-singular pair distances are *not* errors: the force kernels
/// regularize them silently (see the gravity and Lennard-Jones guards).
/// Everything here is either a caller precondition violation or a
/// propagated I/O failure.
#[derive(Debug, Error)]
pub enum Error {
    /// Normalizing a zero-length vector. Usually means two particles were
    /// placed at the exact same position.
    #[error("cannot normalize a zero-length vector")]
    ZeroNorm,

    /// Invalid scenario or domain parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Stepping or force evaluation was requested before the cell grid was
    /// built (deferred-construction domains must call `init_grid` first).
    #[error("cell grid not initialized")]
    GridNotInitialized,

    /// Propagated I/O errors (visualization export).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("dimension must be 1, 2 or 3".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("dimension"));
    }
}
