pub mod error;
pub mod openaq;
pub mod reading;
pub mod transport;

pub use error::{Result, SensorError};
pub use reading::SensorReading;
