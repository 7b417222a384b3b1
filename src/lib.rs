pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Point2, Field2, NVec2, Point3, Field3, NVec3};
pub use simulation::boundary::BoundaryPolicy;
pub use simulation::forces::{Interaction, InteractionSet, PointerField, Polarity, Falloff};
pub use simulation::input::{PointerSnapshot, PointerState};
pub use simulation::integrator::{drift_integrator, drift_integrator_3d};
pub use simulation::projection::{Projector, Rotation, DepthStyle};
pub use simulation::connections::{connect_2d, connect_3d, connection_opacity};
pub use simulation::transient::{TransientGenerator, TransientSettings};
pub use simulation::lifecycle::{AnimationHandle, ResizeDebounce};
pub use simulation::scenario::{Scenario2D, Scenario3D};

pub use configuration::config::{ScenarioConfig, ConfigError};

pub use visualization::{field_vis2d::run_2d, field_vis3d::run_3d};

pub use benchmark::benchmark::{bench_connections, bench_step};
