//! Course catalog filtering by schedule conflicts and enrolment restrictions,
//! with spreadsheet export of selected courses.

pub mod catalog;
pub mod config;
pub mod export;
pub mod filter;
pub mod restriction;
pub mod schedule;
pub mod server;
pub mod types;
