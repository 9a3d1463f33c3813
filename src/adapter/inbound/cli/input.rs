//! JSON input loading for analysis commands.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::domain::{join_outcomes, Prediction, ResolvedOutcome, ResolvedPrediction};
use crate::error::{Error, Result};

use super::output;

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Input {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| Error::InvalidJson {
        path: path.display().to_string(),
        source,
    })
}

/// Load predictions and outcomes and pair them by prediction id.
///
/// Outcomes that reference no known prediction are reported as a warning
/// and left out.
pub fn read_resolved(predictions: &Path, outcomes: &Path) -> Result<Vec<ResolvedPrediction>> {
    let predictions: Vec<Prediction> = read_json(predictions)?;
    let outcomes: Vec<ResolvedOutcome> = read_json(outcomes)?;
    let (resolved, orphans) = join_outcomes(predictions, outcomes);
    if !orphans.is_empty() {
        tracing::warn!(orphans = orphans.len(), "Outcomes without a matching prediction");
        output::warning(&format!(
            "{} outcome(s) reference unknown predictions and were skipped",
            orphans.len()
        ));
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_input_error() {
        let result: Result<Vec<Prediction>> = read_json(Path::new("/nonexistent/p.json"));
        assert!(matches!(result, Err(Error::Input { .. })));
    }

    #[test]
    fn malformed_file_is_invalid_json() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[{").unwrap();
        let result: Result<Vec<Prediction>> = read_json(file.path());
        assert!(matches!(result, Err(Error::InvalidJson { .. })));
    }
}
