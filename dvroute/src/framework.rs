use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::concepts::packet::Advertisement;
use crate::feedback::{CodecError, ConfigError};

pub trait RoutingSystem {
    /// Address of the node on the routing network, MUST be globally unique
    type NodeAddress: Ord + PartialOrd + RootData + RootKey;
    /// Local link endpoint, only needs to be unique within a single node
    type Link: RootKey + RootData;
    /// Turns advertisements into opaque payloads and back
    type Codec: AdvertisementCodec<Self>;
    fn config() -> ProtocolParams {
        Default::default()
    }
}

pub trait RootData: Clone + Debug + Serialize + DeserializeOwned + Sized {}
pub trait RootKey: Eq + PartialEq + Hash {}
impl<T: Eq + PartialEq + Hash> RootKey for T {}
impl<T: Clone + Debug + Serialize + DeserializeOwned + Sized> RootData for T {}

/// Encoding contract for advertisement payloads.
///
/// Any scheme works as long as `decode(encode(x)) == x`. A payload that fails to decode is
/// discarded by the router, it never takes the node down.
pub trait AdvertisementCodec<T: RoutingSystem + ?Sized>: Default {
    fn encode(&self, advertisement: &Advertisement<T>) -> Result<Vec<u8>, CodecError>;
    fn decode(&self, payload: &[u8]) -> Result<Advertisement<T>, CodecError>;
}

/// Protocol Parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProtocolParams {
    heartbeat_interval: Duration,
}

impl ProtocolParams {
    pub fn new(heartbeat_interval: Duration) -> Result<Self, ConfigError> {
        if heartbeat_interval.is_zero() {
            return Err(ConfigError::ZeroHeartbeatInterval);
        }
        Ok(Self { heartbeat_interval })
    }

    /// How often the full table is advertised, whether or not anything changed
    pub fn heartbeat_interval(&self) -> Duration {
        self.heartbeat_interval
    }
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            heartbeat_interval: Duration::from_secs(30),
        }
    }
}
