pub mod hdms;
pub mod projection;

pub use hdms::to_string_hdms;
pub use projection::{from_lon_lat, to_lon_lat};
