//! Project-management dashboard core: load spreadsheet sheets, clean them,
//! and filter related tables by a selected project.

pub mod config;
pub mod data;
pub mod state;
