/// Answers whether the process runs inside an emulated camera stack.
///
/// Some emulators report frame rotation a quarter turn off from physical
/// devices; the rotation normalizer corrects for it when this returns true.
pub trait EnvironmentProbe: Send + Sync {
    fn is_emulator(&self) -> bool;
}

/// A probe with a fixed answer, for configuration overrides and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedEnvironment(pub bool);

impl EnvironmentProbe for FixedEnvironment {
    fn is_emulator(&self) -> bool {
        self.0
    }
}
