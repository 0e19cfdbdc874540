use crate::orientation::domain::environment_probe::EnvironmentProbe;
use crate::shared::constants::{
    EMULATOR_FINGERPRINT_PREFIXES, EMULATOR_HARDWARE_MARKERS, EMULATOR_MANUFACTURER_MARKERS,
    EMULATOR_MODEL_MARKERS, EMULATOR_PRODUCT_MARKERS,
};

/// Platform build identifiers, as exposed by the host OS.
///
/// Matching is case-sensitive; any single signature is enough.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildProperties {
    pub brand: String,
    pub device: String,
    pub fingerprint: String,
    pub hardware: String,
    pub model: String,
    pub manufacturer: String,
    pub product: String,
}

impl BuildProperties {
    /// Reads the identifiers from `FRAMEGATE_BUILD_*` environment variables
    /// (`BRAND`, `DEVICE`, `FINGERPRINT`, ...). Unset ones are empty.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(format!("FRAMEGATE_BUILD_{name}")).unwrap_or_default();
        Self {
            brand: var("BRAND"),
            device: var("DEVICE"),
            fingerprint: var("FINGERPRINT"),
            hardware: var("HARDWARE"),
            model: var("MODEL"),
            manufacturer: var("MANUFACTURER"),
            product: var("PRODUCT"),
        }
    }
}

fn contains_any(value: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| value.contains(m))
}

impl EnvironmentProbe for BuildProperties {
    fn is_emulator(&self) -> bool {
        (self.brand.starts_with("generic") && self.device.starts_with("generic"))
            || EMULATOR_FINGERPRINT_PREFIXES
                .iter()
                .any(|p| self.fingerprint.starts_with(p))
            || contains_any(&self.hardware, EMULATOR_HARDWARE_MARKERS)
            || contains_any(&self.model, EMULATOR_MODEL_MARKERS)
            || contains_any(&self.manufacturer, EMULATOR_MANUFACTURER_MARKERS)
            || contains_any(&self.product, EMULATOR_PRODUCT_MARKERS)
    }
}
