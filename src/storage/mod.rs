pub mod db;
pub mod models;
mod presentations;
mod tables;

pub use db::{Database, DatabaseError};
pub use tables::*;
