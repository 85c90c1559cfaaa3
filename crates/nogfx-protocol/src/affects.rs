//! `Char.Afflictions.*` and `Char.Defences.*`.
//!
//! Both modules share one shape: a full list at login, then single
//! additions as objects and removals as a list of names.

use serde::{Deserialize, Serialize};

/// An affliction or defence as described by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Affect {
    pub name: String,
    pub cure: String,
    #[serde(rename = "desc")]
    pub description: String,
}

impl Affect {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharAfflictionsList(pub Vec<Affect>);

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharAfflictionsAdd(pub Affect);

/// Names of afflictions that were cured.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharAfflictionsRemove(pub Vec<String>);

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharDefencesList(pub Vec<Affect>);

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharDefencesAdd(pub Affect);

/// Names of defences that dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharDefencesRemove(pub Vec<String>);

crate::json_message!(CharAfflictionsList, "Char.Afflictions.List");
crate::json_message!(CharAfflictionsAdd, "Char.Afflictions.Add");
crate::json_message!(CharAfflictionsRemove, "Char.Afflictions.Remove");
crate::json_message!(CharDefencesList, "Char.Defences.List");
crate::json_message!(CharDefencesAdd, "Char.Defences.Add");
crate::json_message!(CharDefencesRemove, "Char.Defences.Remove");
