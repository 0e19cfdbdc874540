/// Both eyes must score strictly above this to count as open.
pub const EYE_OPEN_THRESHOLD: f32 = 0.6;

/// Snapshots are always encoded at maximum JPEG quality.
pub const JPEG_QUALITY: u8 = 100;

pub const SETTINGS_DIR_NAME: &str = "FrameGate";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Fingerprint prefixes reported by emulator system images.
pub const EMULATOR_FINGERPRINT_PREFIXES: &[&str] = &["generic", "unknown"];

pub const EMULATOR_HARDWARE_MARKERS: &[&str] = &["goldfish", "ranchu"];

pub const EMULATOR_MODEL_MARKERS: &[&str] =
    &["google_sdk", "Emulator", "Android SDK built for x86"];

pub const EMULATOR_MANUFACTURER_MARKERS: &[&str] = &["Genymotion"];

pub const EMULATOR_PRODUCT_MARKERS: &[&str] = &[
    "sdk_google",
    "google_sdk",
    "sdk",
    "sdk_x86",
    "sdk_gphone64_arm64",
    "vbox86p",
    "emulator",
    "simulator",
];
