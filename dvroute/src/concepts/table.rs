use std::collections::HashMap;

use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::concepts::route::Route;
use crate::framework::RoutingSystem;

/// The best known route to every destination this node has heard of.
///
/// Destinations are never removed, an unreachable destination keeps an unreachable entry.
/// The entry for our own address is created with the table and can never be replaced.
#[serde_as]
#[derive(Educe, Serialize, Deserialize)]
#[educe(Debug(bound()))]
#[serde(bound = "")]
pub struct ForwardingTable<T: RoutingSystem + ?Sized> {
    address: T::NodeAddress,
    #[serde_as(as = "Vec<(_, _)>")]
    routes: HashMap<T::NodeAddress, Route<T>>,
}

impl<T: RoutingSystem + ?Sized> ForwardingTable<T> {
    pub fn new(address: T::NodeAddress) -> Self {
        let mut routes = HashMap::new();
        routes.insert(address.clone(), Route::local(address.clone()));
        Self { address, routes }
    }

    /// Offers a candidate route to `dest`, learnt from the neighbour `from`.
    ///
    /// The candidate is adopted if it is cheaper, if it is as cheap but shorter, or if the current
    /// route already goes through `from` and `from` now reports something different. News from the
    /// current next hop is authoritative, even when it is worse.
    ///
    /// returns: whether the table changed
    pub fn offer(&mut self, dest: &T::NodeAddress, candidate: Route<T>, from: &T::NodeAddress) -> bool {
        if *dest == self.address {
            return false;
        }
        let adopt = match self.routes.get(dest) {
            None => candidate.is_reachable(),
            Some(current) => {
                candidate.metric() < current.metric()
                    || (candidate.metric() == current.metric()
                        && candidate.is_reachable()
                        && candidate.hops() < current.hops())
                    || (current.is_via(from)
                        && (candidate.metric() != current.metric() || candidate.hops() != current.hops()))
            }
        };
        if !adopt || self.routes.get(dest) == Some(&candidate) {
            return false;
        }
        self.routes.insert(dest.clone(), candidate);
        true
    }

    /// Marks every route through `neigh` as unreachable.
    ///
    /// returns: the destinations that were retracted
    pub fn retract_via(&mut self, neigh: &T::NodeAddress) -> Vec<T::NodeAddress> {
        let mut retracted = Vec::new();
        for (dest, route) in self.routes.iter_mut() {
            if *dest == self.address || !route.is_via(neigh) {
                continue;
            }
            if route.is_reachable() {
                *route = Route::unreachable();
                retracted.push(dest.clone());
            }
        }
        retracted
    }

    pub fn get(&self, dest: &T::NodeAddress) -> Option<&Route<T>> {
        self.routes.get(dest)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T::NodeAddress, &Route<T>)> {
        self.routes.iter()
    }

    /// Routes that can currently be used to forward, excluding our own entry
    pub fn reachable(&self) -> impl Iterator<Item = (&T::NodeAddress, &Route<T>)> {
        self.routes
            .iter()
            .filter(|(dest, route)| **dest != self.address && route.is_reachable())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Always false, the table holds at least our own entry
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
