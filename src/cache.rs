//! Persistence of computed page boundaries

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Any key-value storage able to hold strings
pub trait BoundaryCache {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-process cache, mostly useful for tests and single sessions
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    entries: FxHashMap<String, String>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BoundaryCache for MemoryCache {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }
}

/// Format version of [`CachedBoundaries`]
pub const CACHE_VERSION: u32 = 1;

/// What gets stored per document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedBoundaries {
    pub version: u32,
    pub max_position: usize,
    pub jump: usize,
    pub boundaries: Vec<usize>,
    #[serde(default)]
    pub overflowing: Vec<usize>,
    /// [`RenderSurface::cache_tag`](crate::RenderSurface::cache_tag) of the
    /// surface the boundaries were measured on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface: Option<String>,
}

impl CachedBoundaries {
    /// Check the record can seed pagination of content with `max_position`
    /// chars on a surface tagged `surface`
    pub fn is_valid_for(&self, max_position: usize, surface: Option<&str>) -> bool {
        self.version == CACHE_VERSION
            && self.max_position == max_position
            && self.surface.as_deref() == surface
            && self.jump > 0
            && self.boundaries.first() == Some(&0)
            && self.boundaries.windows(2).all(|w| w[0] < w[1])
            && self.boundaries.last().is_some_and(|&last| last <= max_position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(boundaries: Vec<usize>) -> CachedBoundaries {
        CachedBoundaries {
            version: CACHE_VERSION,
            max_position: 100,
            jump: 40,
            boundaries,
            overflowing: Vec::new(),
            surface: None,
        }
    }

    #[test]
    fn test_memory_cache() {
        let mut cache = MemoryCache::new();
        assert!(cache.is_empty());
        cache.set("k", "v");
        assert_eq!(cache.get("k").as_deref(), Some("v"));
        assert_eq!(cache.get("missing"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_validation() {
        assert!(record(vec![0, 40, 80, 100]).is_valid_for(100, None));
        assert!(record(vec![0]).is_valid_for(100, None));
        assert!(!record(vec![0, 40, 80, 100]).is_valid_for(120, None));
        assert!(!record(vec![5, 40]).is_valid_for(100, None));
        assert!(!record(vec![0, 40, 40]).is_valid_for(100, None));
        assert!(!record(vec![0, 140]).is_valid_for(100, None));
        assert!(!record(vec![]).is_valid_for(100, None));
    }

    #[test]
    fn test_surface_tag_must_match() {
        let tagged = CachedBoundaries {
            surface: Some("400x400".to_string()),
            ..record(vec![0, 40])
        };
        assert!(tagged.is_valid_for(100, Some("400x400")));
        assert!(!tagged.is_valid_for(100, Some("100x60")));
        assert!(!tagged.is_valid_for(100, None));
        assert!(!record(vec![0, 40]).is_valid_for(100, Some("400x400")));

        let json = serde_json::to_string(&tagged).unwrap();
        assert!(json.ends_with(",\"surface\":\"400x400\"}"));
        let back: CachedBoundaries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tagged);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&record(vec![0, 40])).unwrap();
        assert_eq!(
            json,
            "{\"version\":1,\"maxPosition\":100,\"jump\":40,\"boundaries\":[0,40],\"overflowing\":[]}"
        );
        let back: CachedBoundaries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record(vec![0, 40]));
    }
}
