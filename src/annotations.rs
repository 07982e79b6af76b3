use crate::schedule::is_valid_day;
use serde::{Deserialize, Deserializer, Serialize};
use std::{collections::BTreeMap, path::Path, time::Duration};
use tokio::{fs, time::timeout};
use tracing::{info, warn};

pub const LOAD_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnnotationIndex(BTreeMap<u8, Vec<String>>);

#[derive(Deserialize)]
#[serde(untagged)]
enum DayEntry {
    Items(Vec<String>),
    Nested {
        #[serde(default)]
        vivitsu: Vec<String>,
    },
}

impl<'de> Deserialize<'de> for AnnotationIndex {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, DayEntry>::deserialize(deserializer)?;
        let days = raw
            .into_iter()
            .filter_map(|(key, entry)| {
                let day = key.parse::<u8>().ok().filter(|day| is_valid_day(*day))?;
                let items = match entry {
                    DayEntry::Items(items) => items,
                    DayEntry::Nested { vivitsu } => vivitsu,
                };
                Some((day, items))
            })
            .collect();
        Ok(Self(days))
    }
}

#[derive(Deserialize)]
struct AnnotationResource {
    days: AnnotationIndex,
}

impl AnnotationIndex {
    pub fn for_day(&self, day: u8) -> &[String] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn from_resource(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice::<AnnotationResource>(bytes)
            .ok()
            .map(|resource| resource.days)
    }

    pub async fn load(path: &Path) -> Self {
        let bytes = match timeout(LOAD_TIMEOUT, fs::read(path)).await {
            Ok(Ok(bytes)) => bytes,
            Ok(Err(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                info!("no annotation file at {}", path.display());
                return Self::default();
            }
            Ok(Err(err)) => {
                warn!("failed to read annotation file: {err}");
                return Self::default();
            }
            Err(_) => {
                warn!("timed out reading annotation file {}", path.display());
                return Self::default();
            }
        };

        match Self::from_resource(&bytes) {
            Some(index) => {
                info!(days = index.len(), "loaded annotations");
                index
            }
            None => {
                warn!("annotation file has no usable `days` table");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_days_are_indexed() {
        let raw = br#"{ "days": { "4": { "vivitsu": ["NPV sum", "IRR sum"] }, "99": { "vivitsu": ["x"] } } }"#;
        let index = AnnotationIndex::from_resource(raw).unwrap();
        assert_eq!(index.for_day(4), ["NPV sum", "IRR sum"]);
        assert!(index.for_day(5).is_empty());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn resource_without_days_is_rejected() {
        assert!(AnnotationIndex::from_resource(br#"{ "items": [] }"#).is_none());
        assert!(AnnotationIndex::from_resource(b"not json").is_none());
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let path = std::env::temp_dir().join("study_tracker_no_such_tasks.json");
        let index = AnnotationIndex::load(&path).await;
        assert!(index.is_empty());
    }
}
