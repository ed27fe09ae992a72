//! Controllers
//!
//! One controller per resource. Handlers in `routes/` build them from the
//! shared state and translate their results into responses.

pub mod auth_controller;
pub mod booking_controller;
pub mod dashboard_controller;
pub mod post_controller;
pub mod vehicle_controller;

pub use booking_controller::BookingController;
pub use post_controller::PostController;
pub use vehicle_controller::VehicleController;
