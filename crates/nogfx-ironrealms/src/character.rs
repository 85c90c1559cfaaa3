//! Iron Realms extensions of `Char.Status` and `Char.Vitals`.
//!
//! Both wrap the base message in `base` and add their own fields, decoded
//! from the same body with [`dialect::compose`].

use nogfx_protocol::dialect::{self, Fields, Schema, merge_fields};
use nogfx_protocol::transcode::{self, Clearable, Ranked};
use nogfx_protocol::{ProtocolError, ScalarError, decode_json};
use serde::{Deserialize, Serialize};

/// The literal a server sends for "no city", "no house", and so on.
pub const NO_AFFILIATION: &str = "(None)";

/// Decodes an affiliation like `"Mhaldor (3)"` or `"(None)"`; the rank is
/// optional.
pub fn decode_affiliation(value: &str) -> Result<Clearable<Ranked>, ScalarError> {
    transcode::decode_sentinel(value, NO_AFFILIATION, transcode::split_rank)
}

pub fn encode_affiliation(value: &Clearable<Ranked>) -> String {
    transcode::encode_sentinel(value, NO_AFFILIATION, transcode::join_rank)
}

// ---------------------------------------------------------------------------
// Char.Status
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gold: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unread_msgs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unread_news: Option<String>,
}

/// `Char.Status` as sent by Iron Realms games.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CharStatus {
    pub base: nogfx_protocol::CharStatus,
    pub bank: Option<u32>,
    /// `Some(Cleared)` for a citizen of no city.
    pub city: Option<Clearable<Ranked>>,
    pub class: Option<String>,
    pub gold: Option<u32>,
    pub unread_msgs: Option<u32>,
    pub unread_news: Option<u32>,
}

impl Schema for CharStatus {
    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let (base, raw) =
            dialect::compose::<nogfx_protocol::CharStatus, _>(body, decode_json::<RawStatus>)?;

        let city = raw
            .city
            .as_deref()
            .map(decode_affiliation)
            .transpose()
            .map_err(ProtocolError::field("city"))?;

        Ok(Self {
            base,
            bank: transcode::opt_int(raw.bank.as_deref(), "bank")?,
            city,
            class: raw.class,
            gold: transcode::opt_int(raw.gold.as_deref(), "gold")?,
            unread_msgs: transcode::opt_int(raw.unread_msgs.as_deref(), "unread_msgs")?,
            unread_news: transcode::opt_int(raw.unread_news.as_deref(), "unread_news")?,
        })
    }

    fn encode_fields(&self, fields: &mut Fields) {
        self.base.encode_fields(fields);
        let raw = RawStatus {
            bank: transcode::int_string(self.bank),
            city: self.city.as_ref().map(encode_affiliation),
            class: self.class.clone(),
            gold: transcode::int_string(self.gold),
            unread_msgs: transcode::int_string(self.unread_msgs),
            unread_news: transcode::int_string(self.unread_news),
        };
        merge_fields(fields, &raw);
    }
}

nogfx_protocol::schema_message!(CharStatus, "Char.Status");

// ---------------------------------------------------------------------------
// Char.Vitals
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
struct RawVitals {
    #[serde(skip_serializing_if = "Option::is_none")]
    bal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    eq: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vote: Option<String>,
}

/// `Char.Vitals` with balance, equilibrium, and the voting reminder.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CharVitals {
    pub base: nogfx_protocol::CharVitals,
    pub bal: Option<bool>,
    pub eq: Option<bool>,
    pub vote: Option<bool>,
}

impl Schema for CharVitals {
    fn decode_body(body: &[u8]) -> Result<Self, ProtocolError> {
        let (base, raw) =
            dialect::compose::<nogfx_protocol::CharVitals, _>(body, decode_json::<RawVitals>)?;

        Ok(Self {
            base,
            bal: raw.bal.as_deref().map(transcode::parse_flag),
            eq: raw.eq.as_deref().map(transcode::parse_flag),
            vote: raw.vote.as_deref().map(transcode::parse_flag),
        })
    }

    fn encode_fields(&self, fields: &mut Fields) {
        self.base.encode_fields(fields);
        let flag = |value: Option<bool>| value.map(|v| transcode::format_flag(v).to_string());
        let raw = RawVitals {
            bal: flag(self.bal),
            eq: flag(self.eq),
            vote: flag(self.vote),
        };
        merge_fields(fields, &raw);
    }
}

nogfx_protocol::schema_message!(CharVitals, "Char.Vitals");
