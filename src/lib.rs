//! Photo geotag extraction and interactive map generation.

pub mod assets;
pub mod color;
pub mod constants;
pub mod coordinates;
pub mod dms_parser;
pub mod error;
pub mod exif_parser;
pub mod html_template;
pub mod map_model;
pub mod overlay;
pub mod pipeline;
pub mod processing;
pub mod settings;
pub mod utils;

pub use coordinates::{DecimalCoordinate, GeoTag, PhotoRecord};
pub use error::DecodeError;
pub use map_model::{BuildReport, MapBuilder, MapModel};
pub use overlay::OverlayLocation;
pub use pipeline::MapOutcome;
pub use settings::Settings;
