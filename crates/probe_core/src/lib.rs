//! Probe core: failure taxonomy, configuration, and the pure worker-lifecycle
//! state machine.
mod config;
mod effect;
mod msg;
mod stage;
mod state;
mod update;

pub use config::{AgentConfig, CaptureMode, ConfigError, InstallStrategy};
pub use effect::LifecycleEffect;
pub use msg::LifecycleMsg;
pub use stage::FailureStage;
pub use state::{LifecycleMachine, LifecyclePhase, RegistrationId};
pub use update::update;
