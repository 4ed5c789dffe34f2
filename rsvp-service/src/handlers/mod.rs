pub mod auth_handlers;
pub mod guest_handlers;
pub mod rsvp_handlers;
