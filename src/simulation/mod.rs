pub mod agent;
pub mod config;
pub mod controller;
pub mod exploration;
pub mod memory;
pub mod neural;
pub mod params;

pub use agent::{FoodSite, Navigator, PerformanceSample};
pub use config::{ConfigError, ExplorationKind, NavigatorConfig};
pub use controller::BehaviorMode;
