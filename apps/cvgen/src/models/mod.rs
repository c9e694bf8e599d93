pub mod profile;

pub use profile::{EmployeeProfile, TrainingRecord};
