pub mod aggregate;
pub mod batch;
pub mod dataset;
pub mod domain;
pub mod filter;
pub mod ports;
pub mod settings;
pub mod sources;
pub mod validate;
pub mod view;

pub use dataset::StaticDataset;
pub use filter::{derive_view, Searchable, ViewFilter};
pub use ports::{DataSource, FacultyService, HodService, PortError, PortResult, SettingsStore};
pub use settings::SettingsKey;
pub use validate::{Draft, ValidationError};
pub use view::{ViewBody, ViewController, ViewError, ViewSnapshot};
