use gpui::{
    IntoElement, ParentElement, SharedString, Styled, div, prelude::FluentBuilder, px, relative,
};
use gpui_component::ActiveTheme;

use crate::formatting::format_percent;

/// Thin horizontal meter with an optional caption and a percentage readout.
#[derive(IntoElement)]
pub struct ProgressBar {
    value: u8,
    caption: Option<SharedString>,
    accent: Option<gpui::Hsla>,
}

impl ProgressBar {
    pub fn new(value: u8) -> Self {
        Self {
            value: value.min(100),
            caption: None,
            accent: None,
        }
    }

    pub fn caption(mut self, caption: impl Into<SharedString>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn accent(mut self, accent: gpui::Hsla) -> Self {
        self.accent = Some(accent);
        self
    }
}

impl gpui::RenderOnce for ProgressBar {
    fn render(self, _: &mut gpui::Window, cx: &mut gpui::App) -> impl IntoElement {
        let fraction = f32::from(self.value) / 100.0;
        let accent = self.accent.unwrap_or(cx.theme().primary);

        div()
            .w_full()
            .flex()
            .flex_col()
            .gap_1()
            .child(
                div()
                    .flex()
                    .justify_between()
                    .text_sm()
                    .text_color(cx.theme().muted_foreground)
                    .child(div().when_some(self.caption, |this, caption| this.child(caption)))
                    .child(format_percent(self.value)),
            )
            .child(
                div()
                    .w_full()
                    .h(px(6.))
                    .rounded_full()
                    .bg(cx.theme().muted)
                    .child(div().h_full().w(relative(fraction)).rounded_full().bg(accent)),
            )
    }
}
