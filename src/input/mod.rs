pub mod events;

// Re-export the essential types
pub use events::{EventHandled, InputEvent, KeyCode, KeyModifiers, MapEvent};
