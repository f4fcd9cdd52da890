pub mod acquisition;

pub use acquisition::{ScriptedAcquisitionService, ServiceCall, ServiceCallKind};
