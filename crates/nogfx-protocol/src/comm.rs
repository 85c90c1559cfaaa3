//! `Comm.Channel.*`: communication channels.

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, body, decode_json, encode_json};

/// `Comm.Channel.Enable "name"`: turns a channel on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommChannelEnable(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Channel {
    pub name: String,
    pub caption: String,
    pub command: String,
}

/// `Comm.Channel.List`: every channel the character can use.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommChannelList(pub Vec<Channel>);

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelPlayer {
    pub name: String,
    pub channels: Vec<String>,
}

/// `Comm.Channel.Players`: who else is on which channel.
///
/// The client sends it bare as a request, so an empty list encodes as the
/// bare name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommChannelPlayers(pub Vec<ChannelPlayer>);

impl crate::Message for CommChannelPlayers {
    const ID: &'static str = "Comm.Channel.Players";

    fn encode(&self) -> String {
        if self.0.is_empty() {
            return Self::ID.to_string();
        }
        encode_json(Self::ID, &self.0)
    }

    fn decode(data: &[u8]) -> Result<Self, ProtocolError> {
        decode_json(body(data, Self::ID)).map(Self)
    }
}

/// `Comm.Channel.Text`: a line said on a channel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CommChannelText {
    pub channel: String,
    pub talker: String,
    pub text: String,
}

crate::json_message!(CommChannelEnable, "Comm.Channel.Enable");
crate::json_message!(CommChannelList, "Comm.Channel.List");
crate::json_message!(CommChannelText, "Comm.Channel.Text");
