//! Row models and request payloads

pub mod property;
pub mod reservation;
pub mod user;

// Re-export for convenience
pub use property::{NewProperty, Property, PropertyFilter, PropertyListing};
pub use reservation::{GuestReservation, Reservation};
pub use user::{NewUser, User};
