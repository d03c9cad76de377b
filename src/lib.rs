pub mod config;
pub mod console;
pub mod currency;
pub mod depreciation;
pub mod factory;
pub mod offices;
pub mod prelude;
pub mod report;
pub mod session;
pub mod store;
pub mod types;
pub mod validation;

pub use config::TrackerConfig;
pub use offices::{Office, OfficeTable};
pub use session::Session;
pub use store::AssetStore;
pub use types::{Asset, AssetError, AssetId, AssetKind, NewAsset};
