//! Repositories for database operations
//!
//! Each repository owns a clone of the shared executor and issues exactly one
//! statement per call.

pub mod property;
pub mod reservation;
pub mod user;

pub use property::PropertyRepository;
pub use reservation::ReservationRepository;
pub use user::UserRepository;

/// Row cap applied when a caller does not pass a limit
pub const DEFAULT_LIMIT: u32 = 10;
