use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};

/// Input events delivered to the search control by its render surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Click/tap on the control's toggle button
    ToggleClick,
    /// Key pressed while the search input has focus
    KeyPress {
        key: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Key released while the search input has focus
    KeyUp {
        key: KeyCode,
        modifiers: KeyModifiers,
    },
    /// The search input's text changed
    TextInput { value: String },
}

impl InputEvent {
    pub fn key_press(key: KeyCode) -> Self {
        Self::KeyPress {
            key,
            modifiers: KeyModifiers::default(),
        }
    }

    pub fn key_up(key: KeyCode) -> Self {
        Self::KeyUp {
            key,
            modifiers: KeyModifiers::default(),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::TextInput {
            value: value.into(),
        }
    }
}

/// Keyboard key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    Escape,
    Enter,
    Tab,
    Other(u32),
}

impl KeyCode {
    /// Map a DOM `keyCode`
    pub fn from_dom(code: u32) -> Self {
        match code {
            13 => Self::Enter,
            27 => Self::Escape,
            38 => Self::ArrowUp,
            40 => Self::ArrowDown,
            9 => Self::Tab,
            other => Self::Other(other),
        }
    }
}

/// Keyboard modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl EventHandled {
    pub fn is_handled(self) -> bool {
        self == Self::Handled
    }
}

/// Events emitted by the host map that controls may react to
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Mouse/touch click on the map surface (outside any control)
    Click { lat_lng: LatLng },
    /// Map view has changed
    ViewChanged { center: LatLng, zoom: f64 },
}
