// Output and input files
pub const OUTPUT_FILE: &str = "map.html";
pub const DEFAULT_OVERLAY_FILE: &str = "standorte.xlsx";
pub const CONFIG_FILE: &str = "geotag_map.ini";

// Photo discovery
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "heic"];

// EXIF capture date layout
pub const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
pub const DISPLAY_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Hemisphere assumed when a GPS reference tag is missing entirely.
// Regional default for the photo collections this tool was written for (Germany),
// not a general rule: photos from the southern/western hemispheres without
// reference tags will be misplaced.
pub const DEFAULT_LATITUDE_REF: char = 'N';
pub const DEFAULT_LONGITUDE_REF: char = 'E';

// Age coloring
pub const AGE_HORIZON_DAYS: i64 = 2190; // ~6 years maps to the red end
pub const NEUTRAL_COLOR: &str = "#808080";
// violet, indigo, blue, green, yellow, orange, red
pub const GRADIENT_STOPS: &[[u8; 3]] = &[
    [0xee, 0x82, 0xee],
    [0x4b, 0x00, 0x82],
    [0x00, 0x00, 0xff],
    [0x00, 0x80, 0x00],
    [0xff, 0xff, 0x00],
    [0xff, 0xa5, 0x00],
    [0xff, 0x00, 0x00],
];

// Map and clustering
pub const MAP_MAX_ZOOM: u8 = 21;
pub const MAX_CLUSTER_RADIUS: u32 = 40; // pixels
pub const DISABLE_CLUSTERING_AT_ZOOM: u8 = 19;
pub const CLUSTER_ICON_SIZE: u32 = 40;
pub const CLUSTER_BADGE_COLOR: &str = "rgba(131, 131, 131, 0.91)";
pub const PHOTO_LAYER_NAME: &str = "Fotos";
pub const OVERLAY_LAYER_NAME: &str = "Standorte";
pub const PHOTO_TOOLTIP: &str = "Bild";
pub const POPUP_MAX_WIDTH: u32 = 300;
pub const POPUP_PREVIEW_SIZE: u32 = 200;
pub const LOCATION_BADGE_SIZE: u32 = 20;
