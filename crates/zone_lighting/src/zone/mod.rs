//! Zone registry
//!
//! Tracks the zones the user currently stands in, ordered from most
//! specific (smallest) to least specific. Lighting attributes are looked up
//! through this order so a small room inside a large courtyard wins over
//! the courtyard.

use serde_json::Value;

/// Lighting overrides carried by a zone, keyed by attribute name
pub type ZoneProperties = serde_json::Map<String, Value>;

/// A zone the user currently occupies
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    /// Host entity identifier
    pub id: String,
    /// Specificity metric, smaller takes priority
    pub size: f32,
    /// Attribute overrides, possibly empty
    pub properties: ZoneProperties,
}

impl Zone {
    /// Create a zone, clamping an invalid size to zero
    pub fn new(id: impl Into<String>, size: f32, properties: ZoneProperties) -> Self {
        let id = id.into();
        let size = if size.is_nan() || size < 0.0 {
            log::warn!("Zone {} reported invalid size {}, treating as 0", id, size);
            0.0
        } else {
            size
        };
        Self { id, size, properties }
    }

    /// Look up an attribute override
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// Result of entering a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnterOutcome {
    /// Registry held no zones before this call
    pub was_empty: bool,
    /// A zone with the same id was replaced
    pub replaced: bool,
}

/// Result of leaving a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// No zone had that id
    NotPresent,
    /// Zone removed, others remain
    Removed,
    /// Zone removed and it was the last one
    BecameEmpty,
}

/// Ordered set of occupied zones
#[derive(Debug, Clone, Default)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
}

impl ZoneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a zone, replacing any zone with the same id
    pub fn enter(&mut self, zone: Zone) -> EnterOutcome {
        let was_empty = self.zones.is_empty();
        let before = self.zones.len();
        self.zones.retain(|existing| existing.id != zone.id);
        let replaced = self.zones.len() != before;

        log::debug!("Entered zone {} (size {}, {} properties)", zone.id, zone.size, zone.properties.len());
        self.zones.push(zone);
        // Stable: equal sizes keep insertion order
        self.zones.sort_by(|a, b| a.size.total_cmp(&b.size));

        EnterOutcome { was_empty, replaced }
    }

    /// Remove the zone with `id`, if present
    pub fn exit(&mut self, id: &str) -> ExitOutcome {
        let before = self.zones.len();
        self.zones.retain(|zone| zone.id != id);

        if self.zones.len() == before {
            ExitOutcome::NotPresent
        } else if self.zones.is_empty() {
            log::debug!("Exited zone {}, no zones left", id);
            ExitOutcome::BecameEmpty
        } else {
            log::debug!("Exited zone {}, {} zones left", id, self.zones.len());
            ExitOutcome::Removed
        }
    }

    /// Value of `key` from the most specific zone defining it, else `default`
    pub fn resolve<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.zones
            .iter()
            .find_map(|zone| zone.get(key))
            .unwrap_or(default)
    }

    /// Numeric value of `key` from the most specific zone defining it as a number
    ///
    /// Zones whose value for `key` is not a number, or does not fit a
    /// finite `f32`, are skipped.
    pub fn resolve_number(&self, key: &str, default: f32) -> f32 {
        self.zones
            .iter()
            .filter_map(|zone| zone.get(key))
            .filter_map(Value::as_f64)
            .map(|value| value as f32)
            .find(|value| value.is_finite())
            .unwrap_or(default)
    }

    /// Zones in priority order
    pub fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }

    /// Zone ids in priority order
    pub fn ids(&self) -> Vec<&str> {
        self.zones.iter().map(|zone| zone.id.as_str()).collect()
    }

    /// Whether a zone with `id` is present
    pub fn contains(&self, id: &str) -> bool {
        self.zones.iter().any(|zone| zone.id == id)
    }

    /// Number of occupied zones
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether no zones are occupied
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
