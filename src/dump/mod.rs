use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::Prediction;

/// On-disk artifact bundle. The two payload slots are independent; the
/// algorithm slot is an opaque serde value this crate never inspects.
#[derive(Debug, Serialize, Deserialize)]
struct Bundle<A> {
    version: String,
    saved_at: DateTime<Utc>,
    predictions: Option<Vec<Prediction>>,
    algo: Option<A>,
}

/// Persist a `(predictions, algorithm)` pair. Either slot may be absent.
pub fn dump<A: Serialize>(
    path: impl AsRef<Path>,
    predictions: Option<&[Prediction]>,
    algo: Option<&A>,
) -> Result<()> {
    let path = path.as_ref();
    let bundle = Bundle {
        version: env!("CARGO_PKG_VERSION").to_owned(),
        saved_at: Utc::now(),
        predictions: predictions.map(<[Prediction]>::to_vec),
        algo,
    };

    let encoded = serde_json::to_string(&bundle)
        .map_err(|e| Error::CorruptArtifact(format!("could not encode bundle: {e}")))?;
    fs::write(path, encoded)?;

    info!("Saved artifact bundle to {}", path.display());
    Ok(())
}

/// Restore a bundle written by [`dump`]. The load is all-or-nothing:
/// either the exact `(predictions, algorithm)` pair comes back, or the
/// artifact is reported corrupt and nothing is reconstructed.
pub fn load<A: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> Result<(Option<Vec<Prediction>>, Option<A>)> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let contents = fs::read_to_string(path)?;
    let bundle: Bundle<A> = serde_json::from_str(&contents)
        .map_err(|e| Error::CorruptArtifact(e.to_string()))?;

    if bundle.version != env!("CARGO_PKG_VERSION") {
        warn!(
            "Artifact bundle {} was saved by version {}, current is {}",
            path.display(),
            bundle.version,
            env!("CARGO_PKG_VERSION")
        );
    }

    Ok((bundle.predictions, bundle.algo))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn round_trips_predictions_and_algorithm() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bundle.json");

        let predictions = vec![Prediction::new("10", "20", 4.0, 4.0)];
        let algo = json!({ "name": "baseline" });
        dump(&path, Some(&predictions), Some(&algo)).unwrap();

        let (loaded_predictions, loaded_algo) =
            load::<serde_json::Value>(&path).unwrap();
        assert_eq!(loaded_predictions, Some(predictions));
        assert_eq!(loaded_algo, Some(algo));
    }

    #[test]
    fn slots_are_independent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bundle.json");

        let predictions = vec![Prediction::new("u1", "i1", 3.0, 2.5)];
        dump::<serde_json::Value>(&path, Some(&predictions), None).unwrap();
        let (loaded_predictions, loaded_algo) = load::<serde_json::Value>(&path).unwrap();
        assert_eq!(loaded_predictions, Some(predictions));
        assert_eq!(loaded_algo, None);

        let algo = json!([1, 2, 3]);
        dump(&path, None, Some(&algo)).unwrap();
        let (loaded_predictions, loaded_algo) = load::<serde_json::Value>(&path).unwrap();
        assert_eq!(loaded_predictions, None);
        assert_eq!(loaded_algo, Some(algo));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = load::<serde_json::Value>(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn malformed_contents_are_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bundle.json");
        fs::write(&path, "{ not json").unwrap();
        let err = load::<serde_json::Value>(&path).unwrap_err();
        assert!(matches!(err, Error::CorruptArtifact(_)));
    }

    #[test]
    fn missing_manifest_fields_are_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bundle.json");
        fs::write(&path, r#"{"predictions": null, "algo": null}"#).unwrap();
        let err = load::<serde_json::Value>(&path).unwrap_err();
        assert!(matches!(err, Error::CorruptArtifact(_)));
    }
}
