use std::fmt::Display;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for city UUIDs, so the same identifier always maps to the same UUID.
static CITY_NAMESPACE: Lazy<Uuid> =
    Lazy::new(|| Uuid::new_v5(&Uuid::NAMESPACE_OID, b"rail-network.city"));

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine distance in kilometres.
    pub fn great_circle_km(&self, other: &Coordinates) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = lat2 - lat1;
        let d_lon = (other.lon - self.lon).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * Self::EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

/// A city in the rail network. Immutable once the graph is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub position: Coordinates,
    pub category: Option<String>,
    pub uuid: Uuid,
}

impl City {
    pub fn new(id: impl Into<String>, name: impl Into<String>, position: Coordinates) -> Self {
        let id = id.into();
        let uuid = Uuid::new_v5(&CITY_NAMESPACE, id.as_bytes());
        Self {
            id,
            name: name.into(),
            position,
            category: None,
            uuid,
        }
    }

    pub fn with_category(mut self, category: Option<String>) -> Self {
        self.category = category;
        self
    }
}

impl PartialEq for City {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for City {}

impl Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.name == self.id {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uuid_is_stable_per_id() {
        let a = City::new("beijing", "Beijing", Coordinates::new(39.9, 116.4));
        let b = City::new("beijing", "Peking", Coordinates::new(0.0, 0.0));
        let c = City::new("shanghai", "Shanghai", Coordinates::new(31.2, 121.5));

        assert_eq!(a.uuid, b.uuid);
        assert_ne!(a.uuid, c.uuid);
        assert_eq!(a.uuid.get_version_num(), 5);
    }

    #[test]
    fn test_great_circle_distance() {
        let beijing = Coordinates::new(39.9042, 116.4074);
        let shanghai = Coordinates::new(31.2304, 121.4737);

        let km = beijing.great_circle_km(&shanghai);
        // Published straight-line distance is roughly 1070 km
        assert!((km - 1067.0).abs() < 15.0, "got {km}");
        assert_eq!(beijing.great_circle_km(&beijing), 0.0);
        assert!((km - shanghai.great_circle_km(&beijing)).abs() < 1e-9);
    }
}
