pub mod monitor;
pub mod soil;

pub use config::Config;
pub use error::Error;
pub use monitor::Monitor;
pub use soil::SoilModel;
