//! Greedy nearest-neighbour waypoint ordering.
//!
//! Both functions take the metric as a closure over position indices so the
//! same code serves sphere chords, planar grid distances, or anything a
//! caller precomputes. Ordering is O(k²) in the number of waypoints, which
//! is fine for the tens of waypoints a tour usually has.

use trek_core::WaypointId;

use crate::waypoint::Waypoint;

/// A planned visiting order and its closed-loop length.
#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    /// Waypoint ids in visiting order.
    pub order: Vec<WaypointId>,
    /// Position indices in visiting order.
    pub stops: Vec<usize>,
    /// Length of start → stops → start.
    pub total_distance: f64,
}

/// Order waypoints by repeatedly visiting the nearest unvisited one.
///
/// Starts from `start_index`. Ties go to the waypoint listed first. The
/// result is a permutation of the input ids.
///
/// # Examples
///
/// ```
/// use trek_core::WaypointId;
/// use trek_engine::{order_waypoints, Waypoint};
///
/// let wps = [Waypoint::new("far", 9, 0), Waypoint::new("near", 2, 0)];
/// let order = order_waypoints(&wps, 0, |a, b| (a as f64 - b as f64).abs());
/// assert_eq!(order, [WaypointId::from("near"), WaypointId::from("far")]);
/// ```
pub fn order_waypoints<D>(
    waypoints: &[Waypoint],
    start_index: usize,
    distance: D,
) -> Vec<WaypointId>
where
    D: Fn(usize, usize) -> f64,
{
    greedy(waypoints, start_index, &distance)
        .into_iter()
        .map(|i| waypoints[i].id.clone())
        .collect()
}

/// Closed-loop length: `start → stops[0] → … → stops[n-1] → start`.
///
/// Zero when there are no stops.
pub fn total_distance<D>(stops: &[usize], start_index: usize, distance: D) -> f64
where
    D: Fn(usize, usize) -> f64,
{
    let Some(&last) = stops.last() else {
        return 0.0;
    };
    let mut sum = 0.0;
    let mut here = start_index;
    for &stop in stops {
        sum += distance(here, stop);
        here = stop;
    }
    sum + distance(last, start_index)
}

/// Order waypoints and measure the resulting loop.
pub fn plan_tour<D>(waypoints: &[Waypoint], start_index: usize, distance: D) -> Tour
where
    D: Fn(usize, usize) -> f64,
{
    let visit = greedy(waypoints, start_index, &distance);
    let stops: Vec<usize> = visit.iter().map(|&i| waypoints[i].position_index).collect();
    let total_distance = total_distance(&stops, start_index, &distance);
    tracing::debug!(
        waypoints = waypoints.len(),
        start_index,
        total_distance,
        "tour planned"
    );
    Tour {
        order: visit.iter().map(|&i| waypoints[i].id.clone()).collect(),
        stops,
        total_distance,
    }
}

/// Visiting order as indices into `waypoints`.
fn greedy<D>(waypoints: &[Waypoint], start_index: usize, distance: &D) -> Vec<usize>
where
    D: Fn(usize, usize) -> f64,
{
    let mut remaining: Vec<usize> = (0..waypoints.len()).collect();
    let mut order = Vec::with_capacity(waypoints.len());
    let mut here = start_index;
    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (slot, &w) in remaining.iter().enumerate() {
            let d = distance(here, waypoints[w].position_index);
            if d < best_distance {
                best = slot;
                best_distance = d;
            }
        }
        let next = remaining.remove(best);
        here = waypoints[next].position_index;
        order.push(next);
    }
    order
}
