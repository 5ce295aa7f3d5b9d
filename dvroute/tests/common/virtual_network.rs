use std::collections::VecDeque;
use std::time::Duration;

use dvroute::codec::JsonCodec;
use dvroute::concepts::packet::{Message, MessageKind};
use dvroute::concepts::route::{Cost, HopCount, Route};
use dvroute::framework::{ProtocolParams, RoutingSystem};
use dvroute::router::Router;
use serde::{Deserialize, Serialize};

pub const HEARTBEAT: Duration = Duration::from_millis(100);
/// upper bound on deliveries before we call the network divergent
const MAX_DELIVERIES: usize = 200_000;

#[derive(Serialize, Deserialize)]
pub struct VirtualSystem {
    pub routers: Vec<Router<VirtualSystem>>,
    /// live edges: (link id, node a, node b, cost)
    pub edges: Vec<(i32, String, String, Cost)>,
    /// in flight: (recipient, link, message)
    pub packets: VecDeque<(String, i32, Message<VirtualSystem>)>,
    pub now: Duration,
}

impl VirtualSystem {
    pub fn create(nodes: &[&str], links: &[(i32, &str, &str, Cost)]) -> VirtualSystem {
        super::init_logging();
        let mut network = VirtualSystem {
            routers: nodes.iter().map(|id| Router::new(id.to_string())).collect(),
            edges: Vec::new(),
            packets: VecDeque::new(),
            now: Duration::ZERO,
        };
        for (lid, a, b, cost) in links {
            network.add_edge(*lid, a, b, *cost);
        }
        network
    }

    pub fn add_edge(&mut self, edge_id: i32, a: &str, b: &str, cost: Cost) {
        self.edges.retain(|(id, ..)| *id != edge_id);
        self.edges.push((edge_id, a.to_string(), b.to_string(), cost));
        self.get_node(a).handle_link_up(edge_id, b.to_string(), cost);
        self.get_node(b).handle_link_up(edge_id, a.to_string(), cost);
        self.flush_packets();
    }

    /// changes the cost of an existing edge, both ends see a link-up with the new cost
    pub fn update_edge(&mut self, edge_id: i32, cost: Cost) {
        let (_, a, b, _) = self.edge(edge_id).clone();
        self.add_edge(edge_id, &a, &b, cost);
    }

    pub fn remove_edge(&mut self, edge_id: i32) {
        let (_, a, b, _) = self.edge(edge_id).clone();
        self.edges.retain(|(id, ..)| *id != edge_id);
        self.get_node(&a).handle_link_down(&edge_id);
        self.get_node(&b).handle_link_down(&edge_id);
        self.flush_packets();
    }

    fn edge(&self, edge_id: i32) -> &(i32, String, String, Cost) {
        self.edges
            .iter()
            .find(|(id, ..)| *id == edge_id)
            .unwrap_or_else(|| panic!("No edge {edge_id} found"))
    }

    pub fn get_node(&mut self, node: &str) -> &mut Router<Self> {
        self.routers
            .iter_mut()
            .find(|r| r.address() == node)
            .unwrap_or_else(|| panic!("No node {node} found"))
    }

    pub fn node(&self, node: &str) -> &Router<Self> {
        self.routers
            .iter()
            .find(|r| r.address() == node)
            .unwrap_or_else(|| panic!("No node {node} found"))
    }

    pub fn get_route(&self, cur: &str, dest: &str) -> &Route<Self> {
        self.node(cur)
            .table()
            .get(&dest.to_string())
            .unwrap_or_else(|| panic!("No route found to {dest}"))
    }

    pub fn get_next_hop(&self, cur: &str, dest: &str) -> Option<String> {
        self.get_route(cur, dest).next_hop().cloned()
    }

    pub fn get_metric_to(&self, cur: &str, dest: &str) -> Cost {
        self.get_route(cur, dest).metric()
    }

    pub fn get_hops_to(&self, cur: &str, dest: &str) -> HopCount {
        self.get_route(cur, dest).hops()
    }

    /// moves every queued outbound packet onto the wire, packets over dead links are lost
    pub fn flush_packets(&mut self) {
        for router in &mut self.routers {
            for packet in router.outbound_packets.drain(..) {
                let alive = self.edges.iter().any(|(id, a, b, _)| {
                    *id == packet.link && (*a == packet.dest || *b == packet.dest)
                });
                if alive {
                    self.packets.push_back((packet.dest, packet.link, packet.message));
                }
            }
        }
    }

    /// simulates total packet loss for everything currently in flight
    pub fn drop_packets(&mut self) -> usize {
        let dropped = self.packets.len();
        self.packets.clear();
        dropped
    }

    /// delivers packets until the network is quiet
    ///
    /// returns: the number of packets delivered
    pub fn converge(&mut self) -> usize {
        self.flush_packets();
        let mut delivered = 0;
        while let Some((node, link, message)) = self.packets.pop_front() {
            delivered += 1;
            assert!(delivered < MAX_DELIVERIES, "network did not converge");
            self.get_node(&node).handle_packet(&message, &link);
            self.flush_packets();
        }
        delivered
    }

    /// advances the clock on every node
    pub fn tick(&mut self, step: Duration) {
        self.now += step;
        let now = self.now;
        for router in &mut self.routers {
            router.handle_time(now);
        }
        self.flush_packets();
    }

    /// sends a probe from `src` to `dest`, following it hop by hop
    ///
    /// returns: every node the probe visited, starting with `src`
    pub fn trace_probe(&mut self, src: &str, dest: &str) -> Vec<String> {
        let probe = Message::probe(src.to_string(), dest.to_string(), b"ping".to_vec());
        let mut path = vec![src.to_string()];
        let mut cur = src.to_string();
        let mut link = -1;
        for _ in 0..self.routers.len() {
            let router = self.get_node(&cur);
            router.handle_packet(&probe, &link);
            let Some(pos) = router
                .outbound_packets
                .iter()
                .position(|p| p.message.kind == MessageKind::Probe)
            else {
                break;
            };
            let hop = router.outbound_packets.remove(pos);
            assert_eq!(hop.message, probe, "probes are forwarded unmodified");
            cur = hop.dest;
            link = hop.link;
            path.push(cur.clone());
        }
        path
    }
}

impl RoutingSystem for VirtualSystem {
    type NodeAddress = String;
    type Link = i32;
    type Codec = JsonCodec;

    fn config() -> ProtocolParams {
        ProtocolParams::new(HEARTBEAT).expect("heartbeat is not zero")
    }
}
