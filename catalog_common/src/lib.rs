pub mod macros;

pub mod date_time;
pub mod id;
