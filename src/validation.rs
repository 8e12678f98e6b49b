use serde::{Deserialize, Serialize};

use crate::algorithms::Algorithm;

/// Verification policy for [`decode`](crate::decode).
///
/// The decoder never lets a token pick its own verification algorithm: the algorithm declared
/// in the header must be listed here. `none` is only accepted when listed explicitly and is
/// never part of the default.
///
/// Deserializable so hosts can embed it in their own configuration:
///
/// ```rust
/// use grantjwt::{Algorithm, Validation};
///
/// let validation: Validation = serde_json::from_str(r#"{"algorithms":["HS256","HS512"]}"#)?;
/// assert!(validation.allows(Algorithm::HS512));
/// assert!(!validation.allows(Algorithm::None));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Validation {
    /// Algorithms a token may declare.
    pub algorithms: Vec<Algorithm>,
}

impl Validation {
    /// Allow exactly one algorithm.
    pub fn new(alg: Algorithm) -> Validation {
        Validation { algorithms: vec![alg] }
    }

    /// Allow each of `algorithms`.
    pub fn with_algorithms(algorithms: impl IntoIterator<Item = Algorithm>) -> Validation {
        let mut validation = Validation { algorithms: Vec::new() };
        for alg in algorithms {
            if !validation.allows(alg) {
                validation.algorithms.push(alg);
            }
        }
        validation
    }

    /// Whether a token declaring `alg` may be verified.
    pub fn allows(&self, alg: Algorithm) -> bool {
        self.algorithms.contains(&alg)
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::new(Algorithm::HS256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_never_allows_none() {
        let validation = Validation::default();
        assert!(validation.allows(Algorithm::HS256));
        assert!(!validation.allows(Algorithm::None));
    }

    #[test]
    fn with_algorithms_dedups() {
        let validation =
            Validation::with_algorithms([Algorithm::HS256, Algorithm::None, Algorithm::HS256]);
        assert_eq!(validation.algorithms, [Algorithm::HS256, Algorithm::None]);
    }

    #[test]
    fn config_rejects_unknown_names_and_fields() {
        assert!(serde_json::from_str::<Validation>(r#"{"algorithms":["PS256"]}"#).is_err());
        assert!(serde_json::from_str::<Validation>(r#"{"algorithms":[],"leeway":5}"#).is_err());
        let validation: Validation = serde_json::from_str(r#"{"algorithms":["none"]}"#).unwrap();
        assert_eq!(validation, Validation::new(Algorithm::None));
    }
}
