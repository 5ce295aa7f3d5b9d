use educe::Educe;
use serde::{Deserialize, Serialize};

use crate::framework::RoutingSystem;

/// Cost of a path, INF for unreachable. Lower is better.
pub type Cost = u16;
/// Number of links on a path, INF_HOPS for unreachable.
pub type HopCount = u16;

pub const INF: Cost = 0xFFFF;
pub const INF_HOPS: HopCount = 0xFFFF;

/// The best known route to a single destination.
///
/// A route is either fully reachable (finite metric, next hop and link all set) or fully
/// unreachable (INF, no next hop, no link, INF_HOPS). The constructors normalise towards the
/// unreachable form, so a route can never look finite while missing its next hop.
/// The only exception is the local route, which names ourselves as next hop but has no link.
#[derive(Educe, Serialize, Deserialize)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[serde(bound = "")]
pub struct Route<T: RoutingSystem + ?Sized> {
    /// the total cost to the destination
    metric: Cost,
    /// the number of links to the destination, used to break ties between equal cost routes
    hops: HopCount,
    /// the neighbour we forward to
    next_hop: Option<T::NodeAddress>,
    /// the link that connects to the next hop
    link: Option<T::Link>,
}

impl<T: RoutingSystem + ?Sized> Route<T> {
    pub fn unreachable() -> Self {
        Self {
            metric: INF,
            hops: INF_HOPS,
            next_hop: None,
            link: None,
        }
    }

    /// A route through `next_hop`, normalised to unreachable if either the metric or the hop
    /// count is infinite
    pub fn via(metric: Cost, hops: HopCount, next_hop: T::NodeAddress, link: T::Link) -> Self {
        if metric >= INF || hops >= INF_HOPS {
            return Self::unreachable();
        }
        Self {
            metric,
            hops,
            next_hop: Some(next_hop),
            link: Some(link),
        }
    }

    /// The zero cost route to ourselves
    pub(crate) fn local(address: T::NodeAddress) -> Self {
        Self {
            metric: 0,
            hops: 0,
            next_hop: Some(address),
            link: None,
        }
    }

    pub fn metric(&self) -> Cost {
        self.metric
    }

    pub fn hops(&self) -> HopCount {
        self.hops
    }

    pub fn next_hop(&self) -> Option<&T::NodeAddress> {
        self.next_hop.as_ref()
    }

    pub fn link(&self) -> Option<&T::Link> {
        self.link.as_ref()
    }

    pub fn is_reachable(&self) -> bool {
        self.metric != INF
    }

    /// Whether this route forwards through `neigh`
    pub fn is_via(&self, neigh: &T::NodeAddress) -> bool {
        self.next_hop.as_ref() == Some(neigh)
    }
}

/// A single destination as it appears in an advertisement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisedRoute {
    pub metric: Cost,
    pub hops: HopCount,
}

impl AdvertisedRoute {
    pub const UNREACHABLE: AdvertisedRoute = AdvertisedRoute {
        metric: INF,
        hops: INF_HOPS,
    };
}

impl<T: RoutingSystem + ?Sized> From<&Route<T>> for AdvertisedRoute {
    fn from(route: &Route<T>) -> Self {
        Self {
            metric: route.metric,
            hops: route.hops,
        }
    }
}
