use std::collections::{BTreeMap, HashMap};

use educe::Educe;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::concepts::route::Cost;
use crate::framework::RoutingSystem;

#[derive(Educe, Serialize, Deserialize)]
#[educe(Clone(bound()), Debug(bound()), PartialEq(bound()))]
#[serde(bound = "")]
pub struct Neighbour<T: RoutingSystem + ?Sized> {
    /// the local link that connects to this neighbour
    pub link: T::Link,
    /// the routing network address
    pub addr: T::NodeAddress,
    /// Direct link-cost to this neighbour. Lower is better.
    pub link_cost: Cost,
}

/// Directly connected neighbours, indexed both by address and by link.
///
/// A link maps to exactly one neighbour and a neighbour to exactly one link.
#[serde_as]
#[derive(Educe, Serialize, Deserialize)]
#[educe(Debug(bound()))]
#[serde(bound = "")]
pub struct NeighbourRegistry<T: RoutingSystem + ?Sized> {
    #[serde_as(as = "Vec<(_, _)>")]
    neighbours: BTreeMap<T::NodeAddress, Neighbour<T>>,
    #[serde_as(as = "Vec<(_, _)>")]
    links: HashMap<T::Link, T::NodeAddress>,
}

impl<T: RoutingSystem + ?Sized> Default for NeighbourRegistry<T> {
    fn default() -> Self {
        Self {
            neighbours: BTreeMap::new(),
            links: HashMap::new(),
        }
    }
}

impl<T: RoutingSystem + ?Sized> NeighbourRegistry<T> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Binds `link` to `addr` with the given cost, replacing any previous binding of either.
    ///
    /// Returns the neighbours whose previous binding was broken: the old occupant of `link`, and
    /// `addr` itself if it used to be reachable over another link. Routes through them are stale.
    pub fn register_link(&mut self, link: T::Link, addr: T::NodeAddress, link_cost: Cost) -> Vec<T::NodeAddress> {
        let mut displaced = Vec::new();
        if let Some(prev) = self.links.insert(link.clone(), addr.clone()) {
            if prev != addr {
                self.neighbours.remove(&prev);
                displaced.push(prev);
            }
        }
        let old = self.neighbours.insert(addr.clone(), Neighbour {
            link: link.clone(),
            addr: addr.clone(),
            link_cost,
        });
        if let Some(old) = old {
            if old.link != link {
                self.links.remove(&old.link);
                displaced.push(addr);
            }
        }
        displaced
    }

    /// Removes the neighbour on `link`, if there is one
    pub fn remove_link(&mut self, link: &T::Link) -> Option<Neighbour<T>> {
        let addr = self.links.remove(link)?;
        self.neighbours.remove(&addr)
    }

    pub fn get(&self, addr: &T::NodeAddress) -> Option<&Neighbour<T>> {
        self.neighbours.get(addr)
    }

    pub fn get_by_link(&self, link: &T::Link) -> Option<&Neighbour<T>> {
        self.links.get(link).and_then(|addr| self.neighbours.get(addr))
    }

    /// Neighbours in address order
    pub fn iter(&self) -> impl Iterator<Item = &Neighbour<T>> {
        self.neighbours.values()
    }

    pub fn len(&self) -> usize {
        self.neighbours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbours.is_empty()
    }
}
