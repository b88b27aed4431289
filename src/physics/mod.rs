pub mod driver;
pub mod energy;
pub mod field;
pub mod forces;
pub mod integrators;
pub mod math;
pub mod state;
