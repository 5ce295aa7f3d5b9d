use educe::Educe;
use thiserror::Error;

use crate::framework::RoutingSystem;

/// Raised while building a router, the node cannot start with these settings
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("The heartbeat interval must be greater than zero.")]
    ZeroHeartbeatInterval,
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to encode advertisement: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to decode advertisement: {0}")]
    Decode(#[source] serde_json::Error),
}

/// Although this is an error enum, these should be treated as warnings.
/// The offending message is discarded and the router carries on with the next event.
#[derive(Error)]
#[derive(Educe)]
#[educe(Debug(bound()))]
pub enum RoutingWarning<T: RoutingSystem + ?Sized> {
    /// The payload of a routing message could not be decoded into an advertisement
    #[error("Discarded routing message over link {link:?}: {source}")]
    UndecodableAdvertisement {
        link: T::Link,
        #[source]
        source: CodecError,
    },
    /// Only registered neighbours may advertise routes to us
    #[error("Discarded routing message over link {link:?}, {sender:?} is not a neighbour.")]
    UnknownSender {
        link: T::Link,
        sender: T::NodeAddress,
    },
    /// There is no reachable route to the destination of a probe
    #[error("Dropped probe to {dest:?}, no route.")]
    Unroutable {
        dest: T::NodeAddress,
    },
}
