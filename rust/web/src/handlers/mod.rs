pub mod health;
pub mod readings;
pub mod spreads;

pub use health::health;
pub use readings::{create_reading, CreateReadingRequest};
pub use spreads::list_spreads;
