pub mod base;
pub mod geosearch;

pub use base::PluginTrait;
pub use geosearch::{Activity, ControlState, SearchControl};
