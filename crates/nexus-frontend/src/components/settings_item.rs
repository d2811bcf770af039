use gpui::{IntoElement, ParentElement, SharedString, Styled, div, prelude::FluentBuilder};
use gpui_component::{ActiveTheme, StyledExt};

/// A labelled row of the settings page with an optional hint below the label
/// and a control or value on the right.
#[derive(Default, IntoElement)]
pub struct SettingsItem {
    label: &'static str,
    description: Option<&'static str>,
    child: Option<gpui::AnyElement>,
}

impl SettingsItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: &'static str) -> Self {
        self.label = label;
        self
    }

    pub fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub fn child(mut self, child: impl IntoElement) -> Self {
        self.child = Some(child.into_any_element());
        self
    }

    /// Shorthand for a read-only value rendered as text.
    pub fn value(self, value: impl Into<SharedString>) -> Self {
        let value: SharedString = value.into();
        self.child(div().child(value))
    }
}

impl gpui::RenderOnce for SettingsItem {
    fn render(self, _: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        div()
            .w_full()
            .flex()
            .items_center()
            .justify_between()
            .child(
                div()
                    .flex()
                    .flex_col()
                    .child(div().child(self.label).font_semibold())
                    .when_some(self.description, |this, description| {
                        this.child(
                            div()
                                .text_sm()
                                .text_color(cx.theme().muted_foreground)
                                .child(description),
                        )
                    }),
            )
            .when_some(self.child, |this, child| this.child(child))
    }
}
