use crate::{
    core::map::MapHost,
    input::events::{EventHandled, InputEvent, MapEvent},
    Result,
};

/// Lifecycle of a control attached to a map.
///
/// All methods run on the UI thread; the map is lent to the plugin for the
/// duration of each call.
pub trait PluginTrait: Send {
    fn name(&self) -> &str;

    /// Called once when the plugin is attached to `map`
    fn on_add(&mut self, _map: &mut dyn MapHost) -> Result<()> {
        Ok(())
    }

    /// Called once when the plugin is removed; release everything it put on the map
    fn on_remove(&mut self, _map: &mut dyn MapHost) -> Result<()> {
        Ok(())
    }

    /// Events from the plugin's own UI surface
    fn handle_input(&mut self, _input: &InputEvent) -> Result<EventHandled> {
        Ok(EventHandled::NotHandled)
    }

    /// Events emitted by the map itself
    fn handle_map_event(&mut self, _event: &MapEvent) -> Result<EventHandled> {
        Ok(EventHandled::NotHandled)
    }

    /// Called once per frame
    fn update(&mut self, _map: &mut dyn MapHost) -> Result<()> {
        Ok(())
    }
}
