//! Wire types shared between the expense gateway and the console app.

pub mod domain;
pub mod error;
pub mod timestamp;
