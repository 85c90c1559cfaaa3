//! Achaea's `Char.Vitals`, with class-specific `charstats`.

use std::collections::BTreeMap;

use nogfx_protocol::dialect::{self, Fields, Schema, merge_fields};
use nogfx_protocol::transcode;
use nogfx_protocol::{ProtocolError, ScalarError, decode_json};
use serde::{Deserialize, Serialize};

/// Stance value meaning "not in a stance".
const NO_STANCE: &str = "None";

/// The `charstats` list: `["Bleed: 0", "Rage: 12", "Kai: 40%", ...]`.
///
/// Which keys appear depends on the character's class. Keys this type
/// doesn't know are kept in `other` so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharStats {
    pub bleed: Option<i64>,
    pub rage: Option<i64>,
    /// Blademasters.
    pub ferocity: Option<i64>,
    /// Monks, in percent.
    pub kai: Option<i64>,
    /// Occultists, in percent.
    pub karma: Option<i64>,
    pub spec: Option<String>,
    pub stance: Option<String>,
    pub other: BTreeMap<String, String>,
}

impl CharStats {
    pub fn parse(list: &[String]) -> Result<Self, ScalarError> {
        let mut stats = Self::default();

        for token in list {
            let (key, value) = token
                .split_once(": ")
                .ok_or_else(|| ScalarError::Malformed(token.clone()))?;

            match key {
                "Bleed" => stats.bleed = Some(transcode::parse_int(value)?),
                "Rage" => stats.rage = Some(transcode::parse_int(value)?),
                "Ferocity" => stats.ferocity = Some(transcode::parse_int(value)?),
                "Kai" => stats.kai = Some(transcode::parse_percent(value)?),
                "Karma" => stats.karma = Some(transcode::parse_percent(value)?),
                "Spec" => stats.spec = Some(value.to_string()),
                "Stance" if value == NO_STANCE => stats.stance = None,
                "Stance" => stats.stance = Some(value.to_string()),
                _ => {
                    stats.other.insert(key.to_string(), value.to_string());
                }
            }
        }

        Ok(stats)
    }

    /// Wire tokens, known keys first in a fixed order.
    pub fn to_list(&self) -> Vec<String> {
        let mut list = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                list.push(format!("{key}: {value}"));
            }
        };

        push("Bleed", self.bleed.map(|n| n.to_string()));
        push("Rage", self.rage.map(|n| n.to_string()));
        push("Ferocity", self.ferocity.map(|n| n.to_string()));
        push("Kai", self.kai.map(transcode::format_percent));
        push("Karma", self.karma.map(transcode::format_percent));
        push("Spec", self.spec.clone());
        push("Stance", self.stance.clone());
        for (key, value) in &self.other {
            push(key, Some(value.clone()));
        }

        list
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawVitals {
    #[serde(skip_serializing_if = "Option::is_none")]
    charstats: Option<Vec<String>>,
}

/// `Char.Vitals` as Achaea sends it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharVitals {
    pub base: nogfx_ironrealms::CharVitals,
    pub charstats: Option<CharStats>,
}

impl Schema for CharVitals {
    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let (base, raw) =
            dialect::compose::<nogfx_ironrealms::CharVitals, _>(body, decode_json::<RawVitals>)?;

        let charstats = raw
            .charstats
            .as_deref()
            .map(CharStats::parse)
            .transpose()
            .map_err(ProtocolError::field("charstats"))?;

        Ok(Self { base, charstats })
    }

    fn encode_fields(&self, fields: &mut Fields) {
        self.base.encode_fields(fields);
        let raw = RawVitals {
            charstats: self.charstats.as_ref().map(CharStats::to_list),
        };
        merge_fields(fields, &raw);
    }
}

nogfx_protocol::schema_message!(CharVitals, "Char.Vitals");

#[cfg(test)]
mod tests {
    use nogfx_protocol::Message;

    use super::*;

    fn tokens(list: &[&str]) -> Vec<String> {
        list.iter().map(|token| token.to_string()).collect()
    }

    #[test]
    fn test_parse_known_keys() {
        let stats = CharStats::parse(&tokens(&[
            "Bleed: 3",
            "Rage: 20",
            "Kai: 45%",
            "Spec: Sword and Shield",
            "Stance: Scorpion",
        ]))
        .unwrap();

        assert_eq!(stats.bleed, Some(3));
        assert_eq!(stats.rage, Some(20));
        assert_eq!(stats.kai, Some(45));
        assert_eq!(stats.spec.as_deref(), Some("Sword and Shield"));
        assert_eq!(stats.stance.as_deref(), Some("Scorpion"));
        assert!(stats.other.is_empty());
    }

    #[test]
    fn test_negative_counters() {
        let stats = CharStats::parse(&tokens(&["Bleed: -2", "Karma: -10%"])).unwrap();
        assert_eq!(stats.bleed, Some(-2));
        assert_eq!(stats.karma, Some(-10));
        assert_eq!(stats.to_list(), tokens(&["Bleed: -2", "Karma: -10%"]));
    }

    #[test]
    fn test_no_stance_is_absent() {
        let stats = CharStats::parse(&tokens(&["Stance: None"])).unwrap();
        assert_eq!(stats.stance, None);
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let stats = CharStats::parse(&tokens(&["Bleed: 0", "Devotion: 80%"])).unwrap();
        assert_eq!(stats.other.get("Devotion").map(String::as_str), Some("80%"));
        assert_eq!(stats.to_list(), tokens(&["Bleed: 0", "Devotion: 80%"]));
    }

    #[test]
    fn test_token_without_separator_fails() {
        let err = CharStats::parse(&tokens(&["Bleed"])).unwrap_err();
        assert!(matches!(err, ScalarError::Malformed(token) if token == "Bleed"));
    }

    #[test]
    fn test_bad_number_names_the_field() {
        let err = CharVitals::decode(br#"Char.Vitals {"charstats":["Rage: lots"]}"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid 'charstats': 'lots' is not a number");
    }

    #[test]
    fn test_to_list_order() {
        let stats = CharStats {
            bleed: Some(0),
            rage: Some(1),
            ferocity: Some(2),
            kai: Some(3),
            karma: Some(4),
            spec: Some("Dual Cutting".into()),
            stance: Some("Gyanis".into()),
            other: BTreeMap::from([("Zeal".to_string(), "5".to_string())]),
        };
        assert_eq!(
            stats.to_list(),
            tokens(&[
                "Bleed: 0",
                "Rage: 1",
                "Ferocity: 2",
                "Kai: 3%",
                "Karma: 4%",
                "Spec: Dual Cutting",
                "Stance: Gyanis",
                "Zeal: 5",
            ])
        );
        assert_eq!(CharStats::parse(&stats.to_list()).unwrap(), stats);
    }

    #[test]
    fn test_empty_charstats_is_present() {
        let vitals = CharVitals::decode(br#"Char.Vitals {"charstats":[]}"#).unwrap();
        assert_eq!(vitals.charstats, Some(CharStats::default()));
        assert_eq!(vitals.encode(), r#"Char.Vitals {"charstats":[]}"#);
    }
}
