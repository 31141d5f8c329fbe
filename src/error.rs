use std::fmt;

/// Contract violations a caller must fix before a scan can run. Bad
/// individual rows never land here; they are dropped during evaluation.
#[derive(Debug)]
pub enum ScanError {
    InvalidSpot(f64),
    InvalidTolerance(f64),
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScanError::InvalidSpot(spot) => {
                write!(f, "Spot price must be positive, got {}", spot)
            }
            ScanError::InvalidTolerance(tol) => {
                write!(f, "Delta tolerance must be non-negative, got {}", tol)
            }
        }
    }
}

impl std::error::Error for ScanError {}
