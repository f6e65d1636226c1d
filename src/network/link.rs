use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Selects which of a link's two weights is used as its scalar cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    Time,
    Price,
}

impl Objective {
    pub const ALL: [Objective; 2] = [Objective::Time, Objective::Price];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "time" => Some(Self::Time),
            "price" | "cost" => Some(Self::Price),
            _ => None,
        }
    }
}

impl Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Objective::Time => write!(f, "time"),
            Objective::Price => write!(f, "price"),
        }
    }
}

/// Travel time (hours) and ticket price of a link.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinkWeights {
    pub time: f64,
    pub price: f64,
}

impl LinkWeights {
    pub fn new(time: f64, price: f64) -> Self {
        Self { time, price }
    }

    pub fn get(&self, objective: Objective) -> f64 {
        match objective {
            Objective::Time => self.time,
            Objective::Price => self.price,
        }
    }

    /// First weight that is not a finite, non-negative number.
    pub fn first_invalid(&self) -> Option<(Objective, f64)> {
        Objective::ALL
            .into_iter()
            .map(|objective| (objective, self.get(objective)))
            .find(|(_, value)| !value.is_finite() || *value < 0.0)
    }
}

/// Unordered pair of city identifiers, `a <= b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UndirectedLinkKey {
    pub a: String,
    pub b: String,
}

impl UndirectedLinkKey {
    pub fn new(a: &str, b: &str) -> Self {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        UndirectedLinkKey {
            a: a.to_string(),
            b: b.to_string(),
        }
    }

    pub fn endpoints(&self) -> (&str, &str) {
        (&self.a, &self.b)
    }
}

/// An undirected rail link between two cities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RailLink {
    pub from: String,
    pub to: String,
    pub weights: LinkWeights,
}

impl RailLink {
    pub fn new(from: impl Into<String>, to: impl Into<String>, weights: LinkWeights) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            weights,
        }
    }

    pub fn key(&self) -> UndirectedLinkKey {
        UndirectedLinkKey::new(&self.from, &self.to)
    }

    pub fn weight(&self, objective: Objective) -> f64 {
        self.weights.get(objective)
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint at all.
    pub fn other_end(&self, id: &str) -> Option<&str> {
        if self.from == id {
            Some(&self.to)
        } else if self.to == id {
            Some(&self.from)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_unordered() {
        assert_eq!(UndirectedLinkKey::new("b", "a"), UndirectedLinkKey::new("a", "b"));
        assert_eq!(UndirectedLinkKey::new("b", "a").endpoints(), ("a", "b"));
    }

    #[test]
    fn test_weight_selection_and_validation() {
        let weights = LinkWeights::new(2.5, 300.0);
        assert_eq!(weights.get(Objective::Time), 2.5);
        assert_eq!(weights.get(Objective::Price), 300.0);
        assert_eq!(weights.first_invalid(), None);

        assert_eq!(LinkWeights::new(-1.0, 3.0).first_invalid(), Some((Objective::Time, -1.0)));
        let (objective, value) = LinkWeights::new(1.0, f64::NAN).first_invalid().unwrap();
        assert_eq!(objective, Objective::Price);
        assert!(value.is_nan());
        assert!(LinkWeights::new(f64::INFINITY, 1.0).first_invalid().is_some());
        // zero is a legitimate cost
        assert_eq!(LinkWeights::new(0.0, 0.0).first_invalid(), None);
    }

    #[test]
    fn test_objective_parsing() {
        assert_eq!(Objective::from_str("TIME"), Some(Objective::Time));
        assert_eq!(Objective::from_str("cost"), Some(Objective::Price));
        assert_eq!(Objective::from_str("distance"), None);
        assert_eq!(serde_json::to_string(&Objective::Price).unwrap(), "\"price\"");
    }

    #[test]
    fn test_other_end() {
        let link = RailLink::new("a", "b", LinkWeights::new(1.0, 1.0));
        assert_eq!(link.other_end("a"), Some("b"));
        assert_eq!(link.other_end("b"), Some("a"));
        assert_eq!(link.other_end("c"), None);
    }
}
