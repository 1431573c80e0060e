use crate::core::config::ControlPosition;
use std::fmt::Write;

/// Icon on the control's toggle button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlIcon {
    /// Magnifying glass, nothing going on
    Glass,
    /// A search is running
    Spinner,
    /// The last search failed
    Alert,
}

impl ControlIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Glass => "🔍",
            Self::Spinner => "⏳",
            Self::Alert => "⚠",
        }
    }
}

/// Everything a renderer needs to draw the control
#[derive(Debug, Clone, PartialEq)]
pub struct ControlView {
    /// Tooltip of the toggle button
    pub title: String,
    pub placeholder: String,
    pub icon: ControlIcon,
    pub form_visible: bool,
    pub input: String,
    /// Shown below the form when set
    pub message: Option<String>,
    /// Focus the input and select its text this frame
    pub focus_input: bool,
    pub position: ControlPosition,
}

/// A swappable render step for [`ControlView`]s
pub trait ControlRenderer {
    type Output;

    fn render(&mut self, view: &ControlView) -> Self::Output;
}

/// Renders the control as a few lines of plain text
#[derive(Debug, Clone, Default)]
pub struct TextRenderer;

impl ControlRenderer for TextRenderer {
    type Output = String;

    fn render(&mut self, view: &ControlView) -> String {
        let mut out = String::new();
        let _ = write!(out, "[{}]", view.icon.glyph());
        if view.form_visible {
            if view.input.is_empty() {
                let _ = write!(out, " <{}>", view.placeholder);
            } else {
                let _ = write!(out, " {}", view.input);
            }
        }
        if let Some(message) = &view.message {
            let _ = write!(out, "\n  {}", message);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> ControlView {
        ControlView {
            title: "Enter address".to_string(),
            placeholder: "Enter address".to_string(),
            icon: ControlIcon::Glass,
            form_visible: false,
            input: String::new(),
            message: None,
            focus_input: false,
            position: ControlPosition::TopLeft,
        }
    }

    #[test]
    fn test_text_collapsed() {
        assert_eq!(TextRenderer.render(&view()), "[🔍]");
    }

    #[test]
    fn test_text_expanded_with_message() {
        let mut view = view();
        view.form_visible = true;
        view.icon = ControlIcon::Alert;
        view.message = Some("Sorry".to_string());
        assert_eq!(TextRenderer.render(&view), "[⚠] <Enter address>\n  Sorry");

        view.input = "Par".to_string();
        assert!(TextRenderer.render(&view).starts_with("[⚠] Par"));
    }
}
