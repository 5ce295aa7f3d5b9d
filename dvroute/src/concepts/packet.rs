use std::collections::BTreeMap;

use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::concepts::route::AdvertisedRoute;
use crate::framework::RoutingSystem;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// the payload is an encoded advertisement from a neighbour
    Routing,
    /// the payload is opaque, the message is forwarded towards `dest` unmodified
    Probe,
}

#[derive(Educe, Serialize, Deserialize)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[serde(bound = "")]
pub struct Message<T: RoutingSystem + ?Sized> {
    pub kind: MessageKind,
    pub src: T::NodeAddress,
    pub dest: T::NodeAddress,
    pub payload: Vec<u8>,
}

impl<T: RoutingSystem + ?Sized> Message<T> {
    pub fn routing(src: T::NodeAddress, dest: T::NodeAddress, payload: Vec<u8>) -> Self {
        Self {
            kind: MessageKind::Routing,
            src,
            dest,
            payload,
        }
    }

    pub fn probe(src: T::NodeAddress, dest: T::NodeAddress, payload: Vec<u8>) -> Self {
        Self {
            kind: MessageKind::Probe,
            src,
            dest,
            payload,
        }
    }
}

/// A message waiting to be handed to the transport
#[derive(Educe, Serialize, Deserialize)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "")]
pub struct OutboundPacket<T: RoutingSystem + ?Sized> {
    /// send via this link
    pub link: T::Link,
    /// to the neighbour on the other end
    pub dest: T::NodeAddress,
    pub message: Message<T>,
}

/// The costs one node claims to every destination it knows, as sent to one neighbour
#[serde_as]
#[derive(Educe, Serialize, Deserialize)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[serde(bound = "")]
pub struct Advertisement<T: RoutingSystem + ?Sized> {
    #[serde_as(as = "Vec<(_, _)>")]
    pub routes: BTreeMap<T::NodeAddress, AdvertisedRoute>,
}

impl<T: RoutingSystem + ?Sized> Default for Advertisement<T> {
    fn default() -> Self {
        Self {
            routes: BTreeMap::new(),
        }
    }
}

impl<T: RoutingSystem + ?Sized> Advertisement<T> {
    pub fn get(&self, dest: &T::NodeAddress) -> Option<&AdvertisedRoute> {
        self.routes.get(dest)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<T: RoutingSystem + ?Sized> FromIterator<(T::NodeAddress, AdvertisedRoute)> for Advertisement<T> {
    fn from_iter<I: IntoIterator<Item = (T::NodeAddress, AdvertisedRoute)>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}
