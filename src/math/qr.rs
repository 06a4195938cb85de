//! Shared types for the QR routines: output mode, error taxonomy, sign helper.

use crate::error::AppError;

/// Output shape of a Householder factorization.
///
/// - `Full`: Q is m×m, R is m×n (rows n..m of R are ~0).
/// - `Reduced`: Q is m×n, R is n×n.
///
/// For square inputs (m = n) the two modes coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrMode {
    Full,
    Reduced,
}

impl QrMode {
    pub fn display_name(&self) -> &'static str {
        match self {
            QrMode::Full => "full",
            QrMode::Reduced => "reduced",
        }
    }
}

impl std::str::FromStr for QrMode {
    type Err = QrError;

    fn from_str(s: &str) -> Result<Self, QrError> {
        match s {
            "full" => Ok(QrMode::Full),
            "reduced" => Ok(QrMode::Reduced),
            other => Err(QrError::UnknownMode(other.to_string())),
        }
    }
}

/// Failures surfaced by the factorization routines.
///
/// The default entry points only fail on malformed input; numerical rank
/// deficiency propagates as NaN/Inf unless a `*_strict` variant is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrError {
    /// The input has fewer rows than columns.
    DimensionMismatch { rows: usize, cols: usize },
    /// Mode string outside {"full", "reduced"}.
    UnknownMode(String),
    /// Strict mode only: a pivot collapsed to ~0 at the given column.
    RankDeficient { col: usize },
}

impl std::fmt::Display for QrError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QrError::DimensionMismatch { rows, cols } => {
                write!(f, "Matrix must be tall: got {rows}x{cols} with rows < cols.")
            }
            QrError::UnknownMode(mode) => {
                write!(f, "Unknown QR mode '{mode}' (expected 'full' or 'reduced').")
            }
            QrError::RankDeficient { col } => {
                write!(f, "Rank deficiency detected at column {col} (pivot ~ 0).")
            }
        }
    }
}

impl std::error::Error for QrError {}

impl From<QrError> for AppError {
    fn from(err: QrError) -> Self {
        let code = match err {
            QrError::DimensionMismatch { .. } | QrError::UnknownMode(_) => 2,
            QrError::RankDeficient { .. } => 4,
        };
        AppError::new(code, err.to_string())
    }
}

/// Sign with `sign(0) = +1`.
///
/// The Householder construction relies on this convention; a zero leading
/// entry must push the reflection away from cancellation, not collapse it.
pub(crate) fn sign(x: f64) -> f64 {
    if x >= 0.0 { 1.0 } else { -1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parses_known_strings() {
        assert_eq!("full".parse::<QrMode>().unwrap(), QrMode::Full);
        assert_eq!("reduced".parse::<QrMode>().unwrap(), QrMode::Reduced);
    }

    #[test]
    fn mode_rejects_unknown_strings() {
        let err = "bogus".parse::<QrMode>().unwrap_err();
        assert_eq!(err, QrError::UnknownMode("bogus".to_string()));
    }

    #[test]
    fn sign_of_zero_is_positive() {
        assert_eq!(sign(0.0), 1.0);
        assert_eq!(sign(3.5), 1.0);
        assert_eq!(sign(-0.1), -1.0);
    }
}
