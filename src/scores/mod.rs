//! The scores app: tournaments, teams and recorded match results. Foreign
//! keys are declared in the schema but never enforced at runtime.

pub mod db;
pub mod filters;
pub mod handlers;
pub mod models;
