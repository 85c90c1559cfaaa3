//! Achaea's `Char.Status`.
//!
//! Built on the Iron Realms status, with Achaea's own fields next to it.
//! Achaea always sends a rank with city, house, and order, so the city
//! field from the Iron Realms layer is re-decoded here with a mandatory
//! rank and the result replaces the one the lower layer produced.

use nogfx_ironrealms::NO_AFFILIATION;
use nogfx_protocol::dialect::{self, Fields, Schema, merge_fields};
use nogfx_protocol::transcode::{self, Clearable, Ranked};
use nogfx_protocol::{ProtocolError, ScalarError, decode_json};
use serde::{Deserialize, Serialize};

/// The literal for "no target".
pub const NO_TARGET: &str = "None";

const PLAYER_SUFFIX: &str = " (player)";

/// Decodes `"Mhaldor (3)"` or `"(None)"`; a value without rank fails.
pub fn decode_ranked_affiliation(value: &str) -> Result<Clearable<Ranked>, ScalarError> {
    transcode::decode_sentinel(value, NO_AFFILIATION, transcode::split_required_rank)
}

/// Decodes `"None"` or a target name, dropping the `" (player)"` marker.
pub fn decode_target(value: &str) -> Clearable<String> {
    match value {
        NO_TARGET => Clearable::Cleared,
        target => Clearable::Set(target.strip_suffix(PLAYER_SUFFIX).unwrap_or(target).to_string()),
    }
}

pub fn encode_target(value: &Clearable<String>) -> String {
    transcode::encode_sentinel(value, NO_TARGET, String::clone)
}

fn opt_affiliation(
    value: Option<&str>,
    field: &'static str,
) -> Result<Option<Clearable<Ranked>>, ProtocolError> {
    value
        .map(decode_ranked_affiliation)
        .transpose()
        .map_err(ProtocolError::field(field))
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boundcredits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    boundmayancrowns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    explorerrank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    house: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lessons: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mayancrowns: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    specialisation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unboundcredits: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    xprank: Option<String>,
}

/// `Char.Status` as Achaea sends it.
///
/// City lives in `base.city`; Achaea only changes how it's decoded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharStatus {
    pub base: nogfx_ironrealms::CharStatus,
    pub age: Option<u32>,
    pub boundcredits: Option<u32>,
    pub boundmayancrowns: Option<u32>,
    /// Title like `"a Seasoned Explorer"`.
    pub explorerrank: Option<String>,
    pub house: Option<Clearable<Ranked>>,
    pub lessons: Option<u32>,
    pub mayancrowns: Option<u32>,
    /// The god the character follows.
    pub order: Option<Clearable<Ranked>>,
    pub specialisation: Option<String>,
    pub target: Option<Clearable<String>>,
    pub unboundcredits: Option<u32>,
    pub xprank: Option<u32>,
}

impl Schema for CharStatus {
    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let (mut base, raw) =
            dialect::compose::<nogfx_ironrealms::CharStatus, _>(body, decode_json::<RawStatus>)?;

        if let Some(city) = raw.city.as_deref() {
            base.city = Some(decode_ranked_affiliation(city).map_err(ProtocolError::field("city"))?);
        }

        Ok(Self {
            base,
            age: transcode::opt_int(raw.age.as_deref(), "age")?,
            boundcredits: transcode::opt_int(raw.boundcredits.as_deref(), "boundcredits")?,
            boundmayancrowns: transcode::opt_int(raw.boundmayancrowns.as_deref(), "boundmayancrowns")?,
            explorerrank: raw.explorerrank,
            house: opt_affiliation(raw.house.as_deref(), "house")?,
            lessons: transcode::opt_int(raw.lessons.as_deref(), "lessons")?,
            mayancrowns: transcode::opt_int(raw.mayancrowns.as_deref(), "mayancrowns")?,
            order: opt_affiliation(raw.order.as_deref(), "order")?,
            specialisation: raw.specialisation,
            target: raw.target.as_deref().map(decode_target),
            unboundcredits: transcode::opt_int(raw.unboundcredits.as_deref(), "unboundcredits")?,
            xprank: transcode::opt_int(raw.xprank.as_deref(), "xprank")?,
        })
    }

    fn encode_fields(&self, fields: &mut Fields) {
        self.base.encode_fields(fields);
        let raw = RawStatus {
            age: transcode::int_string(self.age),
            boundcredits: transcode::int_string(self.boundcredits),
            boundmayancrowns: transcode::int_string(self.boundmayancrowns),
            city: self.base.city.as_ref().map(nogfx_ironrealms::encode_affiliation),
            explorerrank: self.explorerrank.clone(),
            house: self.house.as_ref().map(nogfx_ironrealms::encode_affiliation),
            lessons: transcode::int_string(self.lessons),
            mayancrowns: transcode::int_string(self.mayancrowns),
            order: self.order.as_ref().map(nogfx_ironrealms::encode_affiliation),
            specialisation: self.specialisation.clone(),
            target: self.target.as_ref().map(encode_target),
            unboundcredits: transcode::int_string(self.unboundcredits),
            xprank: transcode::int_string(self.xprank),
        };
        merge_fields(fields, &raw);
    }
}

nogfx_protocol::schema_message!(CharStatus, "Char.Status");
