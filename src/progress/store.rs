use std::collections::BTreeMap;

use crate::progress::model::{MeasurementEntry, MeasurementType, ProgressPhoto};

/// Read-only view of the external photo & measurement store.
///
/// The core never mutates the store; it copies what it needs into a
/// [`crate::SelectedPhotoSet`] and a [`crate::StatsInput`]. Series may
/// come back in any order — the measurement matcher is order-independent.
pub trait ProgressStore {
    fn list_photos(&self, user_id: &str) -> Vec<ProgressPhoto>;
    fn list_measurements(&self, user_id: &str, kind: MeasurementType) -> Vec<MeasurementEntry>;
}

/// In-memory store used by tests and the CLI fixture loader.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    pub photos: Vec<ProgressPhoto>,
    #[serde(default)]
    pub measurements: BTreeMap<MeasurementType, Vec<MeasurementEntry>>,
}

impl ProgressStore for MemoryStore {
    fn list_photos(&self, _user_id: &str) -> Vec<ProgressPhoto> {
        self.photos.clone()
    }

    fn list_measurements(&self, _user_id: &str, kind: MeasurementType) -> Vec<MeasurementEntry> {
        self.measurements.get(&kind).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::model::{ImageRef, ViewType};
    use chrono::{TimeZone, Utc};

    #[test]
    fn memory_store_returns_series_per_type() {
        let mut store = MemoryStore::default();
        store.photos.push(ProgressPhoto {
            id: "p1".to_string(),
            view: ViewType::Front,
            taken_at: Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap(),
            image: ImageRef::new("images/p1.jpg"),
            body_weight_kg: Some(81.2),
        });
        store.measurements.insert(
            MeasurementType::Waist,
            vec![MeasurementEntry {
                recorded_at: Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap(),
                value: 84.0,
            }],
        );

        assert_eq!(store.list_photos("u1").len(), 1);
        assert_eq!(store.list_measurements("u1", MeasurementType::Waist).len(), 1);
        assert!(store.list_measurements("u1", MeasurementType::Neck).is_empty());
    }
}
