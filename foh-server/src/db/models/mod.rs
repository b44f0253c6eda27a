//! Database models

pub mod dining_table;
pub mod reservation;

pub use dining_table::{DiningTable, DiningTableCreate};
pub use reservation::Reservation;
