//! `Char.*` messages about the logged-in character.
//!
//! `Char.Status` and `Char.Vitals` are differential: the server sends the
//! full set once and afterwards only what changed. Every field is an
//! `Option` where `None` means "unchanged", and encoding leaves `None`
//! fields out of the body entirely.
//!
//! Both are [`Schema`] types so game dialects can extend them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dialect::{Fields, Schema, merge_fields};
use crate::{ProtocolError, decode_json, transcode};

/// `Char.Login {"name": .., "password": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharLogin {
    pub name: String,
    pub password: String,
}

/// `Char.Name {"name": .., "fullname": ..}`, sent after login.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CharName {
    pub name: String,
    pub fullname: String,
}

/// `Char.StatusVars`: maps `Char.Status` keys to display captions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharStatusVars(pub BTreeMap<String, String>);

crate::json_message!(CharLogin, "Char.Login");
crate::json_message!(CharName, "Char.Name");
crate::json_message!(CharStatusVars, "Char.StatusVars");

// ---------------------------------------------------------------------------
// Char.Status
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fullname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    race: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    xp: Option<String>,
}

/// `Char.Status`, the fields every game sends.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharStatus {
    pub name: Option<String>,
    pub fullname: Option<String>,
    pub race: Option<String>,
    pub gender: Option<String>,
    /// Level with progress as the fraction: `"69 (25%)"` is `69.25`.
    /// A negative or non-finite level is left out when encoding.
    pub level: Option<f64>,
    /// Experience towards the next level, in percent.
    pub xp: Option<u32>,
}

impl Schema for CharStatus {
    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let raw: RawStatus = decode_json(body)?;

        let level = raw
            .level
            .as_deref()
            .map(transcode::parse_level)
            .transpose()
            .map_err(ProtocolError::field("level"))?;
        let xp = raw
            .xp
            .as_deref()
            .map(transcode::parse_percent)
            .transpose()
            .map_err(ProtocolError::field("xp"))?;

        Ok(Self {
            name: raw.name,
            fullname: raw.fullname,
            race: raw.race,
            gender: raw.gender,
            level,
            xp,
        })
    }

    fn encode_fields(&self, fields: &mut Fields) {
        let raw = RawStatus {
            name: self.name.clone(),
            fullname: self.fullname.clone(),
            race: self.race.clone(),
            gender: self.gender.clone(),
            level: self.level.and_then(transcode::format_level),
            xp: self.xp.map(transcode::format_percent),
        };
        merge_fields(fields, &raw);
    }
}

crate::schema_message!(CharStatus, "Char.Status");

// ---------------------------------------------------------------------------
// Char.Vitals
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawVitals {
    #[serde(skip_serializing_if = "Option::is_none")]
    hp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maxhp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maxmp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maxep: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    maxwp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nl: Option<String>,
    #[serde(rename = "string", skip_serializing_if = "Option::is_none")]
    prompt: Option<String>,
}

/// `Char.Vitals`: health, mana, endurance, willpower, and level progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharVitals {
    pub hp: Option<i64>,
    pub maxhp: Option<i64>,
    pub mp: Option<i64>,
    pub maxmp: Option<i64>,
    pub ep: Option<i64>,
    pub maxep: Option<i64>,
    pub wp: Option<i64>,
    pub maxwp: Option<i64>,
    /// Percent towards the next level.
    pub nl: Option<i64>,
    /// The server-rendered prompt (`"string"` on the wire).
    pub prompt: Option<String>,
}

impl Schema for CharVitals {
    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let raw: RawVitals = decode_json(body)?;

        Ok(Self {
            hp: transcode::opt_int(raw.hp.as_deref(), "hp")?,
            maxhp: transcode::opt_int(raw.maxhp.as_deref(), "maxhp")?,
            mp: transcode::opt_int(raw.mp.as_deref(), "mp")?,
            maxmp: transcode::opt_int(raw.maxmp.as_deref(), "maxmp")?,
            ep: transcode::opt_int(raw.ep.as_deref(), "ep")?,
            maxep: transcode::opt_int(raw.maxep.as_deref(), "maxep")?,
            wp: transcode::opt_int(raw.wp.as_deref(), "wp")?,
            maxwp: transcode::opt_int(raw.maxwp.as_deref(), "maxwp")?,
            nl: transcode::opt_int(raw.nl.as_deref(), "nl")?,
            prompt: raw.prompt,
        })
    }

    fn encode_fields(&self, fields: &mut Fields) {
        let raw = RawVitals {
            hp: transcode::int_string(self.hp),
            maxhp: transcode::int_string(self.maxhp),
            mp: transcode::int_string(self.mp),
            maxmp: transcode::int_string(self.maxmp),
            ep: transcode::int_string(self.ep),
            maxep: transcode::int_string(self.maxep),
            wp: transcode::int_string(self.wp),
            maxwp: transcode::int_string(self.maxwp),
            nl: transcode::int_string(self.nl),
            prompt: self.prompt.clone(),
        };
        merge_fields(fields, &raw);
    }
}

crate::schema_message!(CharVitals, "Char.Vitals");

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::Message;

    fn body_json(encoded: &str) -> Value {
        let (_, body) = encoded.split_once(' ').unwrap();
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_status_decode() {
        let status = CharStatus::decode(
            br#"Char.Status {"name":"Durak","race":"Dwarf","level":"69 (25%)","xp":"23%"}"#,
        )
        .unwrap();
        assert_eq!(status.name.as_deref(), Some("Durak"));
        assert_eq!(status.race.as_deref(), Some("Dwarf"));
        assert_eq!(status.level, Some(69.25));
        assert_eq!(status.xp, Some(23));
        assert_eq!(status.gender, None);
    }

    #[test]
    fn test_status_only_present_fields_are_encoded() {
        let status = CharStatus {
            level: Some(69.25),
            ..Default::default()
        };
        assert_eq!(body_json(&status.encode()), json!({"level": "69 (25%)"}));
    }

    #[test]
    fn test_status_empty_string_is_present() {
        let status = CharStatus::decode(br#"Char.Status {"gender":""}"#).unwrap();
        assert_eq!(status.gender.as_deref(), Some(""));
        assert_eq!(body_json(&status.encode()), json!({"gender": ""}));
    }

    #[test]
    fn test_status_invalid_level() {
        let err = CharStatus::decode(br#"Char.Status {"level":"high"}"#).unwrap_err();
        assert_eq!(err.to_string(), "invalid 'level': level 'high' is not a number");
    }

    #[test]
    fn test_vitals_round_trip() {
        let vitals = CharVitals {
            hp: Some(3904),
            maxhp: Some(3904),
            mp: Some(3845),
            nl: Some(19),
            prompt: Some("H:3904/3904 M:3845/3845".into()),
            ..Default::default()
        };
        let encoded = vitals.encode();
        assert_eq!(
            body_json(&encoded),
            json!({
                "hp": "3904",
                "maxhp": "3904",
                "mp": "3845",
                "nl": "19",
                "string": "H:3904/3904 M:3845/3845",
            })
        );
        assert_eq!(CharVitals::decode(encoded.as_bytes()).unwrap(), vitals);
    }

    #[test]
    fn test_vitals_negative_values() {
        let vitals = CharVitals::decode(br#"Char.Vitals {"hp":"-5","maxhp":"3904"}"#).unwrap();
        assert_eq!(vitals.hp, Some(-5));
        assert_eq!(vitals.maxhp, Some(3904));
        assert_eq!(body_json(&vitals.encode()), json!({"hp": "-5", "maxhp": "3904"}));
    }

    #[test]
    fn test_status_out_of_range_level_is_not_encoded() {
        let status = CharStatus {
            name: Some("Durak".into()),
            level: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(body_json(&status.encode()), json!({"name": "Durak"}));
    }

    #[test]
    fn test_vitals_ignores_unknown_keys() {
        let vitals = CharVitals::decode(br#"Char.Vitals {"hp":"1","bal":"1"}"#).unwrap();
        assert_eq!(vitals.hp, Some(1));
    }

    #[test]
    fn test_vitals_bad_number_names_field() {
        let err = CharVitals::decode(br#"Char.Vitals {"maxmp":"lots"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidField { field: "maxmp", .. }));
    }

    #[test]
    fn test_status_vars() {
        let vars = CharStatusVars::decode(br#"Char.StatusVars {"level":"Level","race":"Race"}"#)
            .unwrap();
        assert_eq!(vars.0.get("race").map(String::as_str), Some("Race"));
        assert_eq!(CharStatusVars::decode(vars.encode().as_bytes()).unwrap(), vars);
    }
}
