pub mod states;
pub mod params;
pub mod engine;
pub mod boundary;
pub mod input;
pub mod forces;
pub mod integrator;
pub mod projection;
pub mod connections;
pub mod seeding;
pub mod transient;
pub mod lifecycle;
pub mod scenario;
