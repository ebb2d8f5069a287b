//! Static lookup tables for the Novus stage.
//!
//! - Relic items (item id -> display name)
//! - Duty baselines (zone id -> duty name and default light intensity)
//! - Bonus levels (toast substring -> intensity), ascending by intensity
//!
//! Tables are built once at startup, either from [`Catalog::builtin`] or from a
//! JSON file, and are read-only afterwards.

mod light;

pub use light::*;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Item ids and names of the Novus relic weapons
const NOVUS_RELICS: &[(u32, &str)] = &[
    (7863, "Curtana Novus"),
    (7864, "Sphairai Novus"),
    (7865, "Bravura Novus"),
    (7866, "Gae Bolg Novus"),
    (7867, "Artemis Bow Novus"),
    (7868, "Thyrus Novus"),
    (7869, "Stardust Rod Novus"),
    (7870, "Veil of Wiyu Novus"),
    (7871, "Omnilex Novus"),
    (7872, "Holy Shield Novus"),
    (9253, "Yoshimitsu Novus"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelicCatalogEntry {
    pub item_id: u32,
    pub display_name: String,
}

/// Normal light intensity of a duty, used to judge whether a toast is a bonus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneBaseline {
    pub zone_id: u16,
    pub duty_name: String,
    pub default_light_intensity: u32,
}

/// On-disk catalog layout. Missing relics fall back to the builtin list.
#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    relics: Option<Vec<RelicCatalogEntry>>,
    #[serde(default)]
    duties: Vec<ZoneBaseline>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    relics: HashMap<u32, String>,
    duties: HashMap<u16, ZoneBaseline>,
    levels: Vec<BonusLevel>,
}

impl Catalog {
    /// Builtin relics and light levels, no duty baselines
    pub fn builtin() -> Self {
        Self {
            relics: NOVUS_RELICS
                .iter()
                .map(|&(id, name)| (id, name.to_string()))
                .collect(),
            duties: HashMap::new(),
            levels: builtin_levels(),
        }
    }

    /// Build a catalog from explicit tables.
    ///
    /// Rejects duplicate relic ids, duplicate zone ids and item id 0 (the
    /// "nothing equipped" sentinel).
    pub fn new(
        relics: impl IntoIterator<Item = RelicCatalogEntry>,
        duties: impl IntoIterator<Item = ZoneBaseline>,
        levels: Vec<BonusLevel>,
    ) -> Result<Self> {
        let mut relic_map = HashMap::new();
        for entry in relics {
            if entry.item_id == 0 {
                return Err(Error::InvalidCatalog(format!(
                    "relic \"{}\" uses reserved item id 0",
                    entry.display_name
                )));
            }
            if relic_map.insert(entry.item_id, entry.display_name).is_some() {
                return Err(Error::DuplicateRelic(entry.item_id));
            }
        }

        let mut duty_map = HashMap::new();
        for baseline in duties {
            let zone_id = baseline.zone_id;
            if duty_map.insert(zone_id, baseline).is_some() {
                return Err(Error::DuplicateZone(zone_id));
            }
        }

        Ok(Self {
            relics: relic_map,
            duties: duty_map,
            levels,
        })
    }

    /// Parse a catalog from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        let relics = match file.relics {
            Some(relics) => relics,
            None => NOVUS_RELICS
                .iter()
                .map(|&(item_id, name)| RelicCatalogEntry {
                    item_id,
                    display_name: name.to_string(),
                })
                .collect(),
        };
        Self::new(relics, file.duties, builtin_levels())
    }

    /// Load a catalog from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json(&content)?;
        debug!(
            "Loaded catalog from {}: {} relics, {} duties",
            path.as_ref().display(),
            catalog.relics.len(),
            catalog.duties.len()
        );
        Ok(catalog)
    }

    pub fn relic_name(&self, item_id: u32) -> Option<&str> {
        self.relics.get(&item_id).map(String::as_str)
    }

    pub fn is_relic(&self, item_id: u32) -> bool {
        self.relics.contains_key(&item_id)
    }

    pub fn baseline(&self, zone_id: u16) -> Option<&ZoneBaseline> {
        self.duties.get(&zone_id)
    }

    pub fn is_duty_zone(&self, zone_id: u16) -> bool {
        self.duties.contains_key(&zone_id)
    }

    /// First bonus level, in table order, whose substring occurs in the toast
    pub fn match_level(&self, text: &str) -> Option<&BonusLevel> {
        self.levels.iter().find(|level| level.matches(text))
    }

    pub fn levels(&self) -> &[BonusLevel] {
        &self.levels
    }

    /// Relics sorted by item id
    pub fn relics(&self) -> Vec<RelicCatalogEntry> {
        let mut relics: Vec<_> = self
            .relics
            .iter()
            .map(|(&item_id, name)| RelicCatalogEntry {
                item_id,
                display_name: name.clone(),
            })
            .collect();
        relics.sort_by_key(|r| r.item_id);
        relics
    }

    /// Duty baselines sorted by zone id
    pub fn duties(&self) -> Vec<&ZoneBaseline> {
        let mut duties: Vec<_> = self.duties.values().collect();
        duties.sort_by_key(|d| d.zone_id);
        duties
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn baseline(zone_id: u16, name: &str, intensity: u32) -> ZoneBaseline {
        ZoneBaseline {
            zone_id,
            duty_name: name.to_string(),
            default_light_intensity: intensity,
        }
    }

    #[test]
    fn test_builtin_has_relics_and_no_duties() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.relic_name(7863), Some("Curtana Novus"));
        assert!(catalog.is_relic(9253));
        assert!(!catalog.is_relic(0));
        assert!(catalog.duties().is_empty());
        assert_eq!(catalog.levels().len(), 6);
    }

    #[test]
    fn test_duplicate_zone_rejected() {
        let result = Catalog::new(
            Vec::new(),
            vec![baseline(1036, "Sastasha", 8), baseline(1036, "Again", 16)],
            builtin_levels(),
        );
        assert!(matches!(result, Err(Error::DuplicateZone(1036))));
    }

    #[test]
    fn test_duplicate_relic_rejected() {
        let entry = RelicCatalogEntry {
            item_id: 1001,
            display_name: "Relic A".to_string(),
        };
        let result = Catalog::new(vec![entry.clone(), entry], Vec::new(), builtin_levels());
        assert!(matches!(result, Err(Error::DuplicateRelic(1001))));
    }

    #[test]
    fn test_reserved_item_id_rejected() {
        let entry = RelicCatalogEntry {
            item_id: 0,
            display_name: "Nothing".to_string(),
        };
        let result = Catalog::new(vec![entry], Vec::new(), builtin_levels());
        assert!(matches!(result, Err(Error::InvalidCatalog(_))));
    }

    #[test]
    fn test_match_level_first_in_order() {
        let catalog = Catalog::builtin();
        let level = catalog.match_level("Gentle, then Feeble").unwrap();
        assert_eq!(level.intensity, 8);
        assert!(catalog.match_level("a feeble and gentle breeze").is_none());
        assert!(catalog.match_level("nothing to see").is_none());
    }

    #[test]
    fn test_from_json_defaults_relics() {
        let json = r#"{"duties":[{"zone_id":1036,"duty_name":"Sastasha","default_light_intensity":8}]}"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert!(catalog.is_relic(7863));
        assert_eq!(catalog.baseline(1036).unwrap().duty_name, "Sastasha");
        assert!(catalog.is_duty_zone(1036));
        assert!(!catalog.is_duty_zone(1037));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"relics":[{{"item_id":1001,"display_name":"Relic A"}}],"duties":[]}}"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.relics().len(), 1);
        assert!(!catalog.is_relic(7863));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Catalog::load("does-not-exist.json").unwrap_err();
        assert!(err.is_not_found());
    }
}
