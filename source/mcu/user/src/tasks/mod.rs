pub mod relay;
pub mod sensor;

pub use relay::Relay;
pub use sensor::Sensor;
