pub const FEET_PER_METRE: f64 = 1.0 / 0.3048;
pub const METRES_PER_FOOT: f64 = 0.3048;

// Weather field quantization
pub const WEATHER_CELL_DEGREES: f64 = 0.25; // degrees of latitude/longitude per cell
pub const WEATHER_TIME_BUCKET: f64 = 1200.0; // s, 20 minute weather buckets
pub const WEATHER_BLEND_DURATION: f64 = 5.0; // s
pub const MIN_ENABLED_MEDIAN_SPEED: f64 = 0.1; // m/s, below this the air is calm
pub const MAX_NOISE_PROBABILITY: f64 = 0.9999;

// Turbulence
pub const LOW_ALTITUDE_LIMIT: f64 = 300.0; // m AGL, top of the low-altitude model
pub const HIGH_ALTITUDE_LIMIT: f64 = 600.0; // m AGL, bottom of the high-altitude model
pub const HIGH_ALTITUDE_LENGTH_U: f64 = 300.0; // m
pub const HIGH_ALTITUDE_LENGTH_V: f64 = 150.0; // m
pub const HIGH_ALTITUDE_LENGTH_W: f64 = 150.0; // m
pub const MIN_SIGMA: f64 = 0.01; // m/s
pub const SEVERITY_LIGHT: f64 = 6.0; // m/s mean wind
pub const SEVERITY_MODERATE: f64 = 12.0; // m/s mean wind
pub const SEVERITY_SEVERE: f64 = 18.0; // m/s mean wind
pub const MIN_TRAVEL_FRACTION: f64 = 0.1; // frozen turbulence distance floor, fraction of Lv

// Gust bursts
pub const MIN_GUST_STRENGTH: f64 = 0.5;
pub const MIN_GUST_DURATION: f64 = 0.05; // s
pub const GUST_DURATION_JITTER: f64 = 0.25;
pub const GUST_BLEND_FRACTION: f64 = 0.1;
pub const GUST_REFERENCE_SPEED: f64 = 100.0; // m/s
pub const MIN_GUST_SPEED_FACTOR: f64 = 0.05;
pub const MAX_GUST_SPEED_FACTOR: f64 = 2.0;
