use serde::{Deserialize, Serialize};

use crate::language::{Language, LanguageSet};

/// Configuration of a [`ChunkList`](crate::ChunkList)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkListConfig {
    /// Languages the stream is formatted as; gates dialect predicates
    pub languages: LanguageSet,

    /// Keep a queryable log of kind/parent/flag changes
    pub record_provenance: bool,

    /// Maximum number of provenance records kept (oldest dropped first)
    pub provenance_capacity: usize,
}

impl Default for ChunkListConfig {
    fn default() -> Self {
        Self {
            languages: LanguageSet::single(Language::C),
            record_provenance: false,
            provenance_capacity: 4096,
        }
    }
}

impl ChunkListConfig {
    /// Create config for a single language
    pub fn for_language(language: Language) -> Self {
        Self {
            languages: LanguageSet::single(language),
            ..Default::default()
        }
    }

    /// Create config that records every tracked change (for debugging passes)
    pub fn for_debugging(language: Language) -> Self {
        Self {
            languages: LanguageSet::single(language),
            record_provenance: true,
            provenance_capacity: 65536,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.languages.is_empty() {
            return Err("languages must name at least one language".to_string());
        }

        if self.record_provenance && self.provenance_capacity == 0 {
            return Err("provenance_capacity must be > 0 when record_provenance is set".to_string());
        }

        Ok(())
    }
}
