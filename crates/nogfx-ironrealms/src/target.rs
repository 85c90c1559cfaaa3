//! `IRE.Target.*`: the server-side target shared with the client.

use nogfx_protocol::{ProtocolError, body, decode_json, encode_json, transcode};
use serde::{Deserialize, Serialize};

/// `IRE.Target.Set "name"`: sets the target, or reports a change of it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IreTargetSet(pub String);

nogfx_protocol::json_message!(IreTargetSet, "IRE.Target.Set");

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct RawInfo {
    id: String,
    hpperc: String,
    short_desc: String,
}

/// `IRE.Target.Info`: details about the current target.
///
/// The server sends `IRE.Target.Info ""` when there is no target; that
/// decodes to the default value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IreTargetInfo {
    pub id: String,
    /// Health in percent, when the target is a creature.
    pub health: Option<u32>,
    pub description: String,
}

impl nogfx_protocol::Message for IreTargetInfo {
    const ID: &'static str = "IRE.Target.Info";

    fn encode(&self) -> String {
        let raw = RawInfo {
            id: self.id.clone(),
            hpperc: self.health.map(transcode::format_percent).unwrap_or_default(),
            short_desc: self.description.clone(),
        };
        encode_json(Self::ID, &raw)
    }

    fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        let body = body(data, Self::ID);
        if body == br#""""# {
            return Ok(Self::default());
        }

        let raw: RawInfo = decode_json(body)?;
        let health = match raw.hpperc.as_str() {
            "" => None,
            hpperc => Some(transcode::parse_percent(hpperc).map_err(ProtocolError::field("hpperc"))?),
        };

        Ok(Self {
            id: raw.id,
            health,
            description: raw.short_desc,
        })
    }
}

#[cfg(test)]
mod tests {
    use nogfx_protocol::Message;

    use super::*;

    #[test]
    fn test_set() {
        let msg = IreTargetSet("rat".into());
        assert_eq!(msg.encode(), r#"IRE.Target.Set "rat""#);
        assert_eq!(IreTargetSet::decode(br#"IRE.Target.Set "rat""#).unwrap(), msg);
    }

    #[test]
    fn test_info() {
        let msg = IreTargetInfo::decode(
            br#"IRE.Target.Info {"id":"4321","hpperc":"69%","short_desc":"a young rat"}"#,
        )
        .unwrap();
        assert_eq!(
            msg,
            IreTargetInfo {
                id: "4321".into(),
                health: Some(69),
                description: "a young rat".into(),
            }
        );
        assert_eq!(IreTargetInfo::decode(msg.encode().as_bytes()).unwrap(), msg);
    }

    #[test]
    fn test_info_without_target() {
        assert_eq!(
            IreTargetInfo::decode(br#"IRE.Target.Info """#).unwrap(),
            IreTargetInfo::default()
        );
    }

    #[test]
    fn test_info_bad_health() {
        let err = IreTargetInfo::decode(br#"IRE.Target.Info {"id":"1","hpperc":"lots"}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid 'hpperc': 'lots' is not a number");
    }
}
