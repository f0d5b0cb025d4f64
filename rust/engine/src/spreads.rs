//! Named spread layouts and their registry.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::errors::{DrawError, RegistryError};

/// A named, fixed-length list of position labels.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SpreadDefinition {
    pub id: String,
    pub name: String,
    pub positions: Vec<String>,
}

impl SpreadDefinition {
    pub fn new(id: &str, name: &str, positions: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            positions: positions.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// Number of cards this spread requires.
    pub fn card_count(&self) -> usize {
        self.positions.len()
    }
}

pub fn builtin_spreads() -> Vec<SpreadDefinition> {
    vec![
        SpreadDefinition::new("single", "Single Card", &["focus"]),
        SpreadDefinition::new(
            "three_card",
            "Three Card (Past / Present / Future)",
            &["past", "present", "future"],
        ),
        SpreadDefinition::new(
            "five_card",
            "Five Card (Issue / Action / Obstacle / Resource / Outcome)",
            &["issue", "action", "obstacle", "resource", "outcome"],
        ),
        SpreadDefinition::new(
            "celtic_cross",
            "Celtic Cross (10)",
            &[
                "situation",
                "challenge",
                "subconscious",
                "past",
                "conscious",
                "near_future",
                "self",
                "environment",
                "hopes_fears",
                "outcome",
            ],
        ),
    ]
}

/// Read-only registry of spreads, kept in registration order.
///
/// ```
/// use arcana_engine::spreads::SpreadRegistry;
///
/// let spreads = SpreadRegistry::standard();
/// let three = spreads.get("three_card").unwrap();
/// assert_eq!(three.positions, vec!["past", "present", "future"]);
/// assert!(spreads.get("horseshoe").is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SpreadRegistry {
    spreads: Vec<SpreadDefinition>,
    index: HashMap<String, usize>,
}

impl SpreadRegistry {
    pub fn from_definitions(spreads: Vec<SpreadDefinition>) -> Result<Self, RegistryError> {
        let mut index = HashMap::with_capacity(spreads.len());
        for (i, spread) in spreads.iter().enumerate() {
            if spread.positions.is_empty() {
                return Err(RegistryError::EmptySpread(spread.id.clone()));
            }
            if index.insert(spread.id.clone(), i).is_some() {
                return Err(RegistryError::DuplicateSpread(spread.id.clone()));
            }
        }
        Ok(Self { spreads, index })
    }

    /// Process-wide registry of the built-in spreads.
    ///
    /// # Panics
    ///
    /// Panics if the built-in table is invalid.
    pub fn standard() -> &'static SpreadRegistry {
        static REGISTRY: OnceLock<SpreadRegistry> = OnceLock::new();
        REGISTRY.get_or_init(
            || match SpreadRegistry::from_definitions(builtin_spreads()) {
                Ok(registry) => registry,
                Err(e) => panic!("built-in spread table is corrupt: {}", e),
            },
        )
    }

    pub fn get(&self, id: &str) -> Result<&SpreadDefinition, DrawError> {
        self.index
            .get(id)
            .map(|&i| &self.spreads[i])
            .ok_or_else(|| DrawError::SpreadNotFound(id.to_string()))
    }

    pub fn list(&self) -> &[SpreadDefinition] {
        &self.spreads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_builtin_spreads_in_order() {
        let ids: Vec<_> = SpreadRegistry::standard()
            .list()
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, ["single", "three_card", "five_card", "celtic_cross"]);
    }

    #[test]
    fn card_counts() {
        let r = SpreadRegistry::standard();
        assert_eq!(r.get("single").unwrap().card_count(), 1);
        assert_eq!(r.get("three_card").unwrap().card_count(), 3);
        assert_eq!(r.get("five_card").unwrap().card_count(), 5);
        assert_eq!(r.get("celtic_cross").unwrap().card_count(), 10);
    }

    #[test]
    fn unknown_spread_is_not_found() {
        let err = SpreadRegistry::standard().get("tree_of_life").unwrap_err();
        assert_eq!(err, DrawError::SpreadNotFound("tree_of_life".into()));
    }

    #[test]
    fn duplicate_and_empty_spreads_rejected() {
        let dup = vec![
            SpreadDefinition::new("a", "A", &["x"]),
            SpreadDefinition::new("a", "A again", &["y"]),
        ];
        assert_eq!(
            SpreadRegistry::from_definitions(dup).unwrap_err(),
            RegistryError::DuplicateSpread("a".into())
        );

        let empty = vec![SpreadDefinition::new("void", "Void", &[])];
        assert_eq!(
            SpreadRegistry::from_definitions(empty).unwrap_err(),
            RegistryError::EmptySpread("void".into())
        );
    }
}
