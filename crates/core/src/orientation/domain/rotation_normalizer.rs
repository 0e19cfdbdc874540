use crate::orientation::domain::environment_probe::EnvironmentProbe;
use crate::shared::error::PipelineError;
use crate::shared::rotation::Rotation;

/// Maps a declared frame rotation to the one a detector should be given.
///
/// On physical devices this is the identity. Emulated environments report
/// rotation a quarter turn ahead, so the declared value is turned back 90°.
pub fn normalize(declared_degrees: i32, emulated: bool) -> Result<Rotation, PipelineError> {
    let declared = Rotation::from_degrees(declared_degrees)?;
    if emulated {
        Ok(declared.back_quarter_turn())
    } else {
        Ok(declared)
    }
}

/// [`normalize`] bound to an environment, probed once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationNormalizer {
    emulated: bool,
}

impl RotationNormalizer {
    pub fn new(probe: &dyn EnvironmentProbe) -> Self {
        let emulated = probe.is_emulator();
        if emulated {
            log::debug!("Emulated environment detected, correcting frame rotation by -90");
        }
        Self { emulated }
    }

    pub fn is_emulated(&self) -> bool {
        self.emulated
    }

    pub fn normalize(&self, declared_degrees: i32) -> Result<Rotation, PipelineError> {
        normalize(declared_degrees, self.emulated)
    }
}
