use crate::concepts::route::{Cost, HopCount, INF, INF_HOPS};

/// Adds two costs, any sum that reaches INF is INF
///
/// # Examples
///
/// ```
/// use dvroute::concepts::route::INF;
/// assert_eq!(dvroute::util::sum_inf(3, 4), 7);
/// assert_eq!(dvroute::util::sum_inf(INF, 0), INF);
/// assert_eq!(dvroute::util::sum_inf(INF - 1, 1), INF);
/// ```
pub fn sum_inf(cost_a: Cost, cost_b: Cost) -> Cost {
    if cost_a == INF || cost_b == INF {
        INF
    } else {
        let sum = cost_a as u32 + cost_b as u32;
        if sum >= INF as u32 {
            INF
        } else {
            sum as Cost
        }
    }
}

/// Hop count one step further away from the destination, saturating at INF_HOPS
pub fn next_hop_count(hops: HopCount) -> HopCount {
    if hops >= INF_HOPS - 1 {
        INF_HOPS
    } else {
        hops + 1
    }
}
