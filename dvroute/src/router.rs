use std::fmt::{Display, Formatter};
use std::time::Duration;

use educe::Educe;
use log::{debug, error, trace, warn};
use serde::{Deserialize, Serialize};

use crate::concepts::neighbour::NeighbourRegistry;
use crate::concepts::packet::{Advertisement, Message, MessageKind, OutboundPacket};
use crate::concepts::route::{AdvertisedRoute, Cost, Route, INF};
use crate::concepts::table::ForwardingTable;
use crate::feedback::RoutingWarning;
use crate::framework::{AdvertisementCodec, ProtocolParams, RoutingSystem};
use crate::heartbeat::Heartbeat;
use crate::util::{next_hop_count, sum_inf};

/// A single distance-vector node.
///
/// The router does no I/O. The host feeds it events through the `handle_*` methods, one at a
/// time, and drains `outbound_packets` afterwards to hand each packet to the named link.
#[derive(Educe, Serialize, Deserialize)]
#[educe(Debug(bound()))]
#[serde(bound = "")]
pub struct Router<T: RoutingSystem + ?Sized> {
    address: T::NodeAddress,
    table: ForwardingTable<T>,
    neighbours: NeighbourRegistry<T>,
    heartbeat: Heartbeat,
    pub outbound_packets: Vec<OutboundPacket<T>>,
    #[serde(skip_serializing, skip_deserializing)]
    #[educe(Debug(ignore))]
    codec: T::Codec,
}

impl<T: RoutingSystem> Router<T> {
    pub fn new(address: T::NodeAddress) -> Self {
        Self::with_params(address, T::config())
    }

    pub fn with_params(address: T::NodeAddress, params: ProtocolParams) -> Self {
        Self {
            table: ForwardingTable::new(address.clone()),
            address,
            neighbours: NeighbourRegistry::new(),
            heartbeat: Heartbeat::new(params.heartbeat_interval()),
            outbound_packets: Vec::new(),
            codec: Default::default(),
        }
    }

    pub fn address(&self) -> &T::NodeAddress {
        &self.address
    }

    pub fn table(&self) -> &ForwardingTable<T> {
        &self.table
    }

    pub fn neighbours(&self) -> &NeighbourRegistry<T> {
        &self.neighbours
    }

    pub fn heartbeat(&self) -> &Heartbeat {
        &self.heartbeat
    }

    // region Events

    /// handle a single message received over `link`
    pub fn handle_packet(&mut self, message: &Message<T>, link: &T::Link) {
        match message.kind {
            MessageKind::Routing => match self.handle_advertisement(message, link) {
                Ok(true) => self.broadcast_routes(),
                Ok(false) => {}
                Err(warning) => debug!("{warning}"),
            },
            MessageKind::Probe => {
                if let Err(warning) = self.forward_probe(message) {
                    debug!("{warning}");
                }
            }
        }
    }

    /// A link to `addr` came up, or its cost changed
    pub fn handle_link_up(&mut self, link: T::Link, addr: T::NodeAddress, cost: Cost) {
        if addr == self.address {
            warn!("Ignoring link {:?} to ourselves ({:?})", link, addr);
            return;
        }
        if cost == 0 {
            warn!("The link cost to {:?} is zero, this may result in routing loops!", addr);
        } else if cost == INF {
            warn!("The link cost to {:?} is infinite, it will not be used for routing.", addr);
        }

        for displaced in self.neighbours.register_link(link.clone(), addr.clone(), cost) {
            let retracted = self.table.retract_via(&displaced);
            debug!(
                "Neighbour {:?} lost its link binding, retracted {} routes",
                displaced,
                retracted.len()
            );
        }

        let direct = Route::via(cost, 1, addr.clone(), link);
        if self.table.offer(&addr, direct, &addr) {
            debug!("Direct route to {:?} with cost {cost}", addr);
        }

        // the new neighbour needs our table straight away, changed or not
        self.broadcast_routes();
    }

    pub fn handle_link_down(&mut self, link: &T::Link) {
        let Some(neigh) = self.neighbours.remove_link(link) else {
            trace!("Link {:?} is not bound to a neighbour, ignoring", link);
            return;
        };
        let retracted = self.table.retract_via(&neigh.addr);
        debug!(
            "Link to {:?} is down, retracted routes to {:?}",
            neigh.addr,
            retracted
        );
        self.broadcast_routes();
    }

    /// Advance the clock, broadcasts the full table if a heartbeat is due
    pub fn handle_time(&mut self, now: Duration) {
        if self.heartbeat.poll(now) {
            self.broadcast_routes();
        }
    }
    // endregion

    // region Route Selection

    /// Applies a neighbour's advertisement to the table
    ///
    /// returns: whether any route changed
    fn handle_advertisement(&mut self, message: &Message<T>, link: &T::Link) -> Result<bool, RoutingWarning<T>> {
        let advertisement = self
            .codec
            .decode(&message.payload)
            .map_err(|source| RoutingWarning::<T>::UndecodableAdvertisement {
                link: link.clone(),
                source,
            })?;

        let neigh = self.neighbours.get(&message.src).ok_or_else(|| RoutingWarning::<T>::UnknownSender {
            link: link.clone(),
            sender: message.src.clone(),
        })?;
        let sender = neigh.addr.clone();
        let link_cost = neigh.link_cost;
        let via = neigh.link.clone();

        let mut changed = false;
        for (dest, adv) in advertisement.routes {
            let candidate = Route::via(
                sum_inf(link_cost, adv.metric),
                next_hop_count(adv.hops),
                sender.clone(),
                via.clone(),
            );
            if self.table.offer(&dest, candidate, &sender) {
                trace!("Route to {:?} updated from {:?}", dest, sender);
                changed = true;
            }
        }
        Ok(changed)
    }
    // endregion

    // region Advertisement

    /// The vector we would send to `neigh`. Routes that go through `neigh` are advertised back to
    /// it as unreachable (poison reverse), except the route to `neigh` itself.
    pub fn advertisement_for(&self, neigh: &T::NodeAddress) -> Advertisement<T> {
        self.table
            .iter()
            .map(|(dest, route)| {
                let adv = if route.is_via(neigh) && dest != neigh {
                    AdvertisedRoute::UNREACHABLE
                } else {
                    AdvertisedRoute::from(route)
                };
                (dest.clone(), adv)
            })
            .collect()
    }

    /// writes a poison-reversed advertisement for every neighbour to the outbound packet queue
    pub fn broadcast_routes(&mut self) {
        let mut packets = Vec::new();
        for neigh in self.neighbours.iter() {
            let advertisement = self.advertisement_for(&neigh.addr);
            if advertisement.is_empty() {
                continue;
            }
            match self.codec.encode(&advertisement) {
                Ok(payload) => packets.push(OutboundPacket {
                    link: neigh.link.clone(),
                    dest: neigh.addr.clone(),
                    message: Message::routing(self.address.clone(), neigh.addr.clone(), payload),
                }),
                Err(err) => error!("Not advertising to {:?}: {err}", neigh.addr),
            }
        }
        self.outbound_packets.extend(packets);
    }
    // endregion

    /// Forwards a probe unmodified along the selected route
    fn forward_probe(&mut self, message: &Message<T>) -> Result<(), RoutingWarning<T>> {
        let unroutable = || RoutingWarning::<T>::Unroutable {
            dest: message.dest.clone(),
        };
        let route = self
            .table
            .get(&message.dest)
            .filter(|route| route.is_reachable())
            .ok_or_else(unroutable)?;
        let (Some(link), Some(next_hop)) = (route.link(), route.next_hop()) else {
            return Err(unroutable());
        };
        self.outbound_packets.push(OutboundPacket {
            link: link.clone(),
            dest: next_hop.clone(),
            message: message.clone(),
        });
        Ok(())
    }
}

impl<T: RoutingSystem + ?Sized> Display for Router<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut routes: Vec<_> = self.table.reachable().collect();
        routes.sort_by(|(a, _), (b, _)| a.cmp(b));
        write!(f, "Router(addr={:?}, routes=", self.address)?;
        if routes.is_empty() {
            return write!(f, "EMPTY)");
        }
        write!(f, "{{")?;
        for (i, (dest, route)) in routes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{dest:?}: (c:{}, ", route.metric())?;
            match route.next_hop() {
                Some(next_hop) => write!(f, "nh:{next_hop:?}, ")?,
                None => write!(f, "nh:none, ")?,
            }
            write!(f, "hp:{})", route.hops())?;
        }
        write!(f, "}})")
    }
}
