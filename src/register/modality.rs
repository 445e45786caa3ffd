use crate::errors::{RegisterError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Stable modality identifier. Never reused after removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModalityId(pub u64);

impl fmt::Display for ModalityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}

/// A candidate contracting strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modality {
    pub id: ModalityId,
    pub name: String,
}

/// Ordered set of modalities with unique display names.
///
/// Mutation is crate-private: adding or removing a modality must also touch
/// every risk's mitigation map, which only [`RiskRegister`] can do.
///
/// [`RiskRegister`]: crate::register::RiskRegister
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModalityRegistry {
    modalities: Vec<Modality>,
    next_id: u64,
}

impl ModalityRegistry {
    pub fn new() -> Self {
        Self {
            modalities: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a registry from persisted parts, rejecting duplicate names or ids.
    pub(crate) fn from_parts(modalities: Vec<Modality>, next_id: u64) -> Result<Self> {
        let mut names = BTreeSet::new();
        let mut ids = BTreeSet::new();
        for modality in &modalities {
            normalize_name(&modality.name)?;
            if !names.insert(modality.name.as_str()) {
                return Err(RegisterError::duplicate_name(modality.name.clone()));
            }
            if !ids.insert(modality.id) {
                return Err(RegisterError::invariant(format!(
                    "modality id {} is used twice",
                    modality.id
                )));
            }
        }
        let floor = ids.iter().next_back().map_or(1, |id| id.0 + 1);
        Ok(Self {
            modalities,
            next_id: next_id.max(floor),
        })
    }

    pub fn len(&self) -> usize {
        self.modalities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modalities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modality> {
        self.modalities.iter()
    }

    pub fn as_slice(&self) -> &[Modality] {
        &self.modalities
    }

    pub fn names(&self) -> Vec<&str> {
        self.modalities.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn ids(&self) -> BTreeSet<ModalityId> {
        self.modalities.iter().map(|m| m.id).collect()
    }

    pub(crate) fn next_id(&self) -> u64 {
        self.next_id
    }

    pub fn get(&self, id: ModalityId) -> Option<&Modality> {
        self.modalities.iter().find(|m| m.id == id)
    }

    pub fn find(&self, name: &str) -> Option<&Modality> {
        let name = name.trim();
        self.modalities.iter().find(|m| m.name == name)
    }

    pub fn resolve(&self, name: &str) -> Result<&Modality> {
        self.find(name)
            .ok_or_else(|| RegisterError::modality_not_found(name.trim()))
    }

    /// Validate a candidate name and return its trimmed form.
    pub(crate) fn check_new_name(&self, name: &str) -> Result<String> {
        let name = normalize_name(name)?;
        if self.find(&name).is_some() {
            return Err(RegisterError::duplicate_name(name));
        }
        Ok(name)
    }

    pub(crate) fn insert(&mut self, name: &str) -> Result<ModalityId> {
        let name = self.check_new_name(name)?;
        let id = ModalityId(self.next_id);
        self.next_id += 1;
        self.modalities.push(Modality { id, name });
        Ok(id)
    }

    pub(crate) fn remove(&mut self, name: &str) -> Result<Modality> {
        let id = self.resolve(name)?.id;
        let index = self
            .modalities
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| RegisterError::modality_not_found(name.trim()))?;
        Ok(self.modalities.remove(index))
    }

    pub(crate) fn rename(&mut self, old: &str, new: &str) -> Result<ModalityId> {
        let id = self.resolve(old)?.id;
        let new = normalize_name(new)?;
        if let Some(existing) = self.find(&new) {
            if existing.id != id {
                return Err(RegisterError::duplicate_name(new));
            }
        }
        if let Some(modality) = self.modalities.iter_mut().find(|m| m.id == id) {
            modality.name = new;
        }
        Ok(id)
    }
}

fn normalize_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(RegisterError::validation("modality name must not be empty"));
    }
    Ok(trimmed.to_string())
}
