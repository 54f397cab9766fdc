//! Two small server-rendered web apps for managing sports tournaments,
//! sharing one binary but nothing else: each app has its own schema,
//! routes and database file.

pub mod error;
pub mod league;
pub mod scores;
pub mod web;
