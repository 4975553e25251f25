//! Client for a metro-transit booking backend: auth and booking flows over
//! JSON/HTTP, a file-backed session store, and renderers that turn a booked
//! itinerary into timeline steps and map overlay geometry.

pub mod config;
pub mod models;
pub mod network;
pub mod providers;
pub mod render;
pub mod services;
pub mod session;
