// src/tournament/mod.rs

pub mod registration;
pub mod session;

pub use registration::{Admission, Capability, Placement, RegistrationError};
pub use session::TournamentSession;
