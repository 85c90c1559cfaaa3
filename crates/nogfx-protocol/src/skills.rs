//! `Char.Skills.*`: skill groups, their skills, and skill descriptions.

use serde::{Deserialize, Serialize};

use crate::transcode::{self, Ranked};
use crate::{ProtocolError, body, decode_json, encode_json};

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawGet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

/// `Char.Skills.Get`: with no group, asks for all groups; with a group,
/// for its skills; with both, for one skill's description.
///
/// A name without a group means nothing to the server and isn't sent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharSkillsGet {
    pub group: Option<String>,
    pub name: Option<String>,
}

impl crate::Message for CharSkillsGet {
    const ID: &'static str = "Char.Skills.Get";

    fn encode(&self) -> String {
        let raw = RawGet {
            group: self.group.clone(),
            name: self.group.as_ref().and(self.name.clone()),
        };
        encode_json(Self::ID, &raw)
    }

    fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        let raw: RawGet = decode_json(body(data, Self::ID))?;
        Ok(Self {
            group: raw.group,
            name: raw.name,
        })
    }
}

// ---------------------------------------------------------------------------
// Char.Skills.Groups
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawGroup {
    #[serde(default)]
    name: String,
    #[serde(default)]
    rank: String,
}

/// One skill group and the character's proficiency in it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkillGroup {
    pub name: String,
    /// Proficiency title, e.g. `"Adept"`.
    pub rank: String,
    /// Percent towards the next title, when the server sends it.
    pub progress: Option<u32>,
}

/// `Char.Skills.Groups [{"name": "Survival", "rank": "Adept (40%)"}, ..]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharSkillsGroups(pub Vec<SkillGroup>);

impl crate::Message for CharSkillsGroups {
    const ID: &'static str = "Char.Skills.Groups";

    fn encode(&self) -> String {
        let raw: Vec<RawGroup> = self
            .0
            .iter()
            .map(|group| RawGroup {
                name: group.name.clone(),
                rank: transcode::join_rank_percent(&Ranked::new(group.rank.clone(), group.progress)),
            })
            .collect();
        encode_json(Self::ID, &raw)
    }

    fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        let raw: Vec<RawGroup> = decode_json(body(data, Self::ID))?;
        let groups = raw
            .into_iter()
            .map(|group| {
                let rank = transcode::split_rank(&group.rank).map_err(ProtocolError::field("rank"))?;
                Ok(SkillGroup {
                    name: group.name,
                    rank: rank.name,
                    progress: rank.rank,
                })
            })
            .collect::<Result<_, ProtocolError>>()?;
        Ok(Self(groups))
    }
}

// ---------------------------------------------------------------------------
// Char.Skills.List / Info
// ---------------------------------------------------------------------------

/// `Char.Skills.List`: the skills in `group` with short descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharSkillsList {
    pub group: String,
    pub list: Vec<String>,
    #[serde(rename = "descs")]
    pub descriptions: Vec<String>,
}

/// `Char.Skills.Info`: the full description of one skill.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CharSkillsInfo {
    pub group: String,
    pub skill: String,
    pub info: String,
}

crate::json_message!(CharSkillsList, "Char.Skills.List");
crate::json_message!(CharSkillsInfo, "Char.Skills.Info");
