//! The league app: users, tournaments with location and creator, and teams
//! that cascade away with their tournament. Runs against its own database
//! file; the two apps' schemas are deliberately not merged.

pub mod db;
pub mod filters;
pub mod handlers;
pub mod models;
