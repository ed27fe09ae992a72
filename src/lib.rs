//! Car-rental site backend: booking and inquiry intake, the booking
//! lifecycle, the vehicle and blog catalog, and the admin surface.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
