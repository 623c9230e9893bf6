//! Mass scheduling: the masses themselves and the musicians booked to play.

pub mod assignment;
pub mod mass;
