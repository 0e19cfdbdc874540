use crate::orientation::domain::environment_probe::{EnvironmentProbe, FixedEnvironment};
use crate::shared::settings::EmulatorDetection;

use super::build_properties::BuildProperties;

/// Creates the environment probe selected by the settings.
///
/// `Auto` reads the build properties from the process environment; the
/// other modes pin the answer.
pub fn create_probe(detection: EmulatorDetection) -> Box<dyn EnvironmentProbe> {
    match detection {
        EmulatorDetection::Auto => {
            let props = BuildProperties::from_env();
            log::debug!("Probing build properties for emulator signatures: {props:?}");
            Box::new(props)
        }
        EmulatorDetection::Always => Box::new(FixedEnvironment(true)),
        EmulatorDetection::Never => Box::new(FixedEnvironment(false)),
    }
}
