mod aircraft_state;
mod boss_update;
mod fcc_command;
mod gcs_update;
mod hover_criteria;
mod landing_point;
mod start_supervisor;

pub use aircraft_state::AircraftState;
pub use boss_update::BossUpdate;
pub use fcc_command::{ControlMode, FccCommand, MavCommand, OrbitYawBehaviour};
pub use gcs_update::{GcsUpdate, MavSeverity};
pub use hover_criteria::HoverCriteria;
pub use landing_point::LandingPoint;
pub use start_supervisor::StartSupervisor;
