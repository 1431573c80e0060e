use crate::{
    core::{config::ControlPosition, map::MapHost},
    input::events::{InputEvent, KeyCode},
    plugins::{base::PluginTrait, geosearch::SearchControl},
    ui::view::{ControlRenderer, ControlView},
    Result,
};
use egui::{
    text::CCursor, text_edit::CCursorRange, Align2, Context, Id, Key, Vec2,
};

/// Immediate-mode search box floating over the map
pub struct SearchBox {
    ctx: Context,
    id: Id,
    margin: f32,
    input_width: f32,
}

impl SearchBox {
    pub fn new(ctx: &Context) -> Self {
        Self {
            ctx: ctx.clone(),
            id: Id::new("maplet_geosearch"),
            margin: 10.0,
            input_width: 220.0,
        }
    }

    /// Distinguish several search boxes on one screen
    pub fn with_id(mut self, id: impl std::hash::Hash) -> Self {
        self.id = Id::new(id);
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_input_width(mut self, width: f32) -> Self {
        self.input_width = width;
        self
    }

    /// Draw `control`, feed the user's actions back into it and apply any
    /// finished searches to `map`
    pub fn show(&mut self, control: &mut SearchControl, map: &mut dyn MapHost) -> Result<()> {
        let view = control.view();
        control.take_focus_request();

        for event in self.render(&view) {
            control.handle_input(&event)?;
        }
        control.update(map)?;

        if control.is_searching() {
            self.ctx.request_repaint();
        }
        Ok(())
    }

    fn anchor(&self, position: ControlPosition) -> (Align2, Vec2) {
        let m = self.margin;
        match position {
            ControlPosition::TopLeft => (Align2::LEFT_TOP, Vec2::new(m, m)),
            ControlPosition::TopRight => (Align2::RIGHT_TOP, Vec2::new(-m, m)),
            ControlPosition::BottomLeft => (Align2::LEFT_BOTTOM, Vec2::new(m, -m)),
            ControlPosition::BottomRight => (Align2::RIGHT_BOTTOM, Vec2::new(-m, -m)),
        }
    }
}

/// Cursor range covering every character of `text`
fn select_all(text: &str) -> CCursorRange {
    CCursorRange::two(CCursor::new(0), CCursor::new(text.chars().count()))
}

impl ControlRenderer for SearchBox {
    type Output = Vec<InputEvent>;

    fn render(&mut self, view: &ControlView) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let (align, offset) = self.anchor(view.position);
        let input_width = self.input_width;

        egui::Area::new(self.id)
            .anchor(align, offset)
            .show(&self.ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        let toggle = ui.button(view.icon.glyph()).on_hover_text(&view.title);
                        if toggle.clicked() {
                            events.push(InputEvent::ToggleClick);
                        }

                        if !view.form_visible {
                            return;
                        }

                        let mut text = view.input.clone();
                        let mut output = egui::TextEdit::singleline(&mut text)
                            .hint_text(view.placeholder.as_str())
                            .desired_width(input_width)
                            .show(ui);
                        let response = output.response;
                        if view.focus_input {
                            response.request_focus();
                            // Select what was typed before so it can be replaced
                            output.state.set_ccursor_range(Some(select_all(&view.input)));
                            output.state.store(ui.ctx(), response.id);
                        }
                        if response.changed() {
                            events.push(InputEvent::text(text));
                        }

                        let (enter, escape) =
                            ui.input(|i| (i.key_pressed(Key::Enter), i.key_pressed(Key::Escape)));
                        // singleline edits drop focus on both keys
                        if response.lost_focus() && enter {
                            events.push(InputEvent::key_press(KeyCode::Enter));
                        }
                        if (response.has_focus() || response.lost_focus()) && escape {
                            events.push(InputEvent::key_up(KeyCode::Escape));
                        }
                    });

                    if let Some(message) = &view.message {
                        let color = ui.visuals().error_fg_color;
                        ui.colored_label(color, message);
                    }
                });
            });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_counts_chars() {
        let range = select_all("Zürich");
        assert_eq!(range.primary.index, 6);
        assert_eq!(range.secondary.index, 0);
        assert_eq!(select_all("").primary.index, 0);
    }
}
