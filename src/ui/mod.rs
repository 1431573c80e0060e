//! Rendering of the search control
//!
//! The control exposes its state as a [`ControlView`]; renderers only ever see
//! the view and report user actions back as input events.

pub mod view;

#[cfg(feature = "egui")]
pub mod egui_control;

pub use view::{ControlIcon, ControlRenderer, ControlView, TextRenderer};

#[cfg(feature = "egui")]
pub use egui_control::SearchBox;
