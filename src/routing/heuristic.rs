use crate::network::{City, Objective, RailGraph};

/// Lower-bound estimate of the remaining cost from `from` to `goal`, used by A*.
///
/// A* returns an optimal route only if the estimate never exceeds the true remaining
/// cost. An overestimating heuristic may yield a more expensive route; the engine
/// does not detect or correct that.
pub trait Heuristic {
    fn estimate(&self, from: &City, goal: &City) -> f64;
}

impl<F> Heuristic for F
where
    F: Fn(&City, &City) -> f64,
{
    fn estimate(&self, from: &City, goal: &City) -> f64 {
        self(from, goal)
    }
}

/// Always zero, which turns A* into Dijkstra.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _from: &City, _goal: &City) -> f64 {
        0.0
    }
}

/// Great-circle distance to the goal, priced at the cheapest cost per kilometre of any link.
///
/// Every link costs at least `cost_per_km` times its own straight-line length, and
/// straight-line lengths obey the triangle inequality, so the estimate is both
/// admissible and consistent for the objective it was calibrated on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatCircle {
    cost_per_km: f64,
}

impl GreatCircle {
    pub fn new(cost_per_km: f64) -> Self {
        Self { cost_per_km }
    }

    pub fn calibrated(graph: &RailGraph, objective: Objective) -> Self {
        let cost_per_km = graph
            .links()
            .filter_map(|link| {
                let a = graph.city(&link.from).ok()?;
                let b = graph.city(&link.to).ok()?;
                let km = a.position.great_circle_km(&b.position);
                (km > 0.0).then(|| link.weight(objective) / km)
            })
            .min_by(f64::total_cmp)
            .unwrap_or(0.0);
        Self { cost_per_km }
    }

    pub fn cost_per_km(&self) -> f64 {
        self.cost_per_km
    }
}

impl Heuristic for GreatCircle {
    fn estimate(&self, from: &City, goal: &City) -> f64 {
        from.position.great_circle_km(&goal.position) * self.cost_per_km
    }
}
