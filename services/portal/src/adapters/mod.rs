pub mod demo;
pub mod demo_hod;
pub mod hod_http;
pub mod http;
pub mod settings_file;
pub mod static_data;

pub use demo::DemoFacultyAdapter;
pub use demo_hod::DemoHodAdapter;
pub use hod_http::HttpHodAdapter;
pub use http::{BackendClient, HttpFacultyAdapter};
pub use settings_file::FileSettingsStore;
pub use static_data::CampusDatasets;
