/*!
Serialized form of the static input: a city list and a link list.

```json
{
    "cities": [ { "id": "beijing", "name": "Beijing", "lat": 39.90, "lon": 116.41, "category": "municipality" } ],
    "links":  [ { "from": "beijing", "to": "tianjin", "time": 0.5, "price": 54.5 } ]
}
```

`price` is also accepted under its older name `cost`.
*/

use serde::{Deserialize, Serialize};

use crate::network::{City, Coordinates, LinkWeights, RailLink};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub id: String,
    /// Defaults to the identifier.
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub category: Option<String>,
}

impl From<CityRecord> for City {
    fn from(record: CityRecord) -> Self {
        let name = record.name.unwrap_or_else(|| record.id.clone());
        City::new(record.id, name, Coordinates::new(record.lat, record.lon)).with_category(record.category)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub from: String,
    pub to: String,
    pub time: f64,
    #[serde(alias = "cost")]
    pub price: f64,
}

impl From<LinkRecord> for RailLink {
    fn from(record: LinkRecord) -> Self {
        RailLink::new(record.from, record.to, LinkWeights::new(record.time, record.price))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub cities: Vec<CityRecord>,
    #[serde(default)]
    pub links: Vec<LinkRecord>,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
