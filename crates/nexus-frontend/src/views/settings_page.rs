use gpui::{
    Context, IntoElement, ParentElement, Render, Styled, Window, div, prelude::FluentBuilder,
};
use gpui_component::{
    ActiveTheme, StyledExt,
    button::{Button, ButtonVariants},
    group_box::{GroupBox, GroupBoxVariants},
    switch::Switch,
};

use crate::{BackendBridge, components::settings_item::SettingsItem, entities::DataEntities};

pub struct SettingsPage {
    data: DataEntities,
}

impl SettingsPage {
    pub fn new(data: &DataEntities, cx: &mut Context<Self>) -> Self {
        cx.observe(&data.settings, |_, _, cx| cx.notify()).detach();
        Self { data: data.clone() }
    }

    fn toggle_announcements(&mut self, enabled: bool, cx: &mut Context<Self>) {
        let mut config = self.data.settings.read(cx).config.clone();
        config.boot_sequence.announce_events = enabled;

        let bridge = cx.global::<BackendBridge>().clone();
        cx.spawn(async move |_, _| bridge.update_config(config).await)
            .detach();
    }
}

impl Render for SettingsPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let settings = self.data.settings.read(cx);
        let synced = settings.synced;
        let config = settings.config.clone();
        let loader = &config.loader;

        div()
            .size_full()
            .flex()
            .flex_col()
            .gap_6()
            .when(!synced, |this| {
                this.child(
                    div()
                        .text_sm()
                        .text_color(cx.theme().warning)
                        .child("Waiting for the host configuration, showing defaults"),
                )
            })
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Boot sequence").text_xl().font_bold())
                    .child(
                        SettingsItem::new()
                            .label("Announce boot events")
                            .description("Push a notification when a stage starts or ends")
                            .child(
                                Switch::new("announce_events")
                                    .checked(config.boot_sequence.announce_events)
                                    .on_click(cx.listener(|this, checked: &bool, _, cx| {
                                        this.toggle_announcements(*checked, cx);
                                    })),
                            ),
                    )
                    .child(
                        SettingsItem::new()
                            .label("Stages")
                            .value(config.boot_sequence.steps.len().to_string()),
                    )
                    .child(
                        SettingsItem::new()
                            .label("Progress tick")
                            .value(format!("{} ms", config.boot_sequence.progress_interval_ms)),
                    )
                    .child(
                        SettingsItem::new().label("Replay").child(
                            Button::new("replay_boot")
                                .primary()
                                .label("Replay boot sequence")
                                .on_click(cx.listener(|_, _, _, cx| {
                                    let bridge = cx.global::<BackendBridge>().clone();
                                    cx.spawn(async move |_, _| bridge.start_boot_sequence().await)
                                        .detach();
                                })),
                        ),
                    ),
            )
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Loader").text_xl().font_bold())
                    .child(
                        SettingsItem::new()
                            .label("Typing interval")
                            .description("Delay between two revealed characters")
                            .value(format!("{} ms", loader.typing_interval_ms)),
                    )
                    .child(
                        SettingsItem::new()
                            .label("Line settle")
                            .value(format!("{} ms", loader.settle_delay_ms)),
                    )
                    .child(
                        SettingsItem::new()
                            .label("Scan tick")
                            .value(format!(
                                "+{}% every {} ms",
                                loader.scan_step_percent, loader.scan_tick_ms
                            )),
                    )
                    .child(
                        SettingsItem::new()
                            .label("Systems check")
                            .value(format!("one every {} ms", loader.systems_tick_ms)),
                    ),
            )
            .child(
                GroupBox::new()
                    .outline()
                    .child(div().child("Notifications").text_xl().font_bold())
                    .child(
                        SettingsItem::new()
                            .label("Default duration")
                            .description("Applies to notifications without their own duration")
                            .value(format!(
                                "{} ms",
                                config.notifications.default_duration_ms
                            )),
                    ),
            )
    }
}
