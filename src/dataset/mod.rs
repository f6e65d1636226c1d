/*!
Network builder.

Loads the static city and link lists and turns them into a [`RailGraph`](crate::network::RailGraph).

Structure:
- `model`: serde records for the input format.
- `source`: the async `DatasetSource` trait with file-backed and embedded implementations.
- `builder`: `NetworkBuilder`, which applies the build policies from `BuildConfig`.
*/

pub mod builder;
pub mod model;
pub mod source;

pub use builder::NetworkBuilder;
pub use model::{CityRecord, Dataset, LinkRecord};
pub use source::{DatasetSource, EmbeddedSource, JsonFileSource, SourceError, SourceResult, load_network};
