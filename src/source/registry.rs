//! Static endpoint registry.

use crate::source::adapter::EndpointRegistry;
use crate::types::Endpoint;

/// The collections exposed by the 2014 ruleset API.
pub const DEFAULT_ENDPOINTS: &[&str] = &[
    "ability-scores",
    "alignments",
    "backgrounds",
    "classes",
    "conditions",
    "damage-types",
    "equipment",
    "equipment-categories",
    "feats",
    "features",
    "languages",
    "magic-items",
    "magic-schools",
    "monsters",
    "proficiencies",
    "races",
    "rule-sections",
    "rules",
    "skills",
    "spells",
    "subclasses",
    "subraces",
    "traits",
    "weapon-properties",
];

/// Registry backed by a fixed list of endpoint names.
#[derive(Debug, Clone)]
pub struct StaticRegistry {
    endpoints: Vec<Endpoint>,
}

impl StaticRegistry {
    /// Create a registry over an explicit list of endpoints.
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    pub fn new<I, S>(endpoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Endpoint>,
    {
        let mut unique: Vec<Endpoint> = Vec::new();
        for endpoint in endpoints {
            let endpoint = endpoint.into();
            if !unique.contains(&endpoint) {
                unique.push(endpoint);
            }
        }
        Self { endpoints: unique }
    }
}

impl Default for StaticRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINTS.iter().copied())
    }
}

impl EndpointRegistry for StaticRegistry {
    fn all_endpoints(&self) -> Vec<Endpoint> {
        self.endpoints.clone()
    }

    fn is_valid(&self, endpoint: &str) -> bool {
        self.endpoints.iter().any(|e| e == endpoint)
    }
}
