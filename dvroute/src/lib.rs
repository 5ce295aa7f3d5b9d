//! An I/O free distance-vector routing core.
//!
//! Each [`router::Router`] owns a forwarding table and a neighbour registry, reacts to link events,
//! neighbour advertisements and clock ticks, and queues the packets it wants sent. Advertisements
//! use poison reverse, and equal cost routes are broken by hop count.

pub mod codec;
pub mod concepts;
pub mod feedback;
pub mod framework;
pub mod heartbeat;
pub mod router;
pub mod util;
