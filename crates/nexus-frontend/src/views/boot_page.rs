use gpui::{
    Context, Entity, Hsla, IntoElement, ParentElement, Render, Styled, Window, div,
    prelude::FluentBuilder, px,
};
use gpui_component::{ActiveTheme, StyledExt, Theme};
use nexus_bridge::stage::{LoadingStage, MessageSeverity};
use nexus_widgets::catalog;

use crate::{
    components::progress_bar::ProgressBar,
    entities::{DataEntities, loader_entity::LoaderEntity},
};

fn severity_color(severity: MessageSeverity, theme: &Theme) -> Hsla {
    match severity {
        MessageSeverity::System => theme.foreground,
        MessageSeverity::Warning => theme.warning,
        MessageSeverity::Success => theme.success,
        MessageSeverity::Scanning => theme.info,
    }
}

pub struct BootPage {
    loader: Entity<LoaderEntity>,
}

impl BootPage {
    pub fn new(data: &DataEntities, cx: &mut Context<Self>) -> Self {
        cx.observe(&data.loader, |_, _, cx| cx.notify()).detach();
        Self {
            loader: data.loader.clone(),
        }
    }
}

impl Render for BootPage {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let entity = self.loader.read(cx);
        let loader = &entity.loader;
        let state = loader.state();
        let online = loader.online_systems().len();

        let lines = loader.revealed_lines().into_iter().map(|line| {
            let cursor = if line.complete { "" } else { "_" };
            div()
                .font_family("monospace")
                .text_color(severity_color(line.severity, theme))
                .child(format!("> {}{cursor}", line.text))
        });

        let systems = catalog::SYSTEMS.iter().enumerate().map(|(index, system)| {
            let is_online = index < online;
            div()
                .flex()
                .justify_between()
                .text_sm()
                .text_color(if is_online {
                    theme.foreground
                } else {
                    theme.muted_foreground
                })
                .child(*system)
                .child(if is_online { "ONLINE" } else { "standby" })
        });

        div()
            .size_full()
            .flex()
            .flex_col()
            .gap_5()
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .child(div().child(loader.stage().title()).text_2xl().font_bold())
                    .child(
                        div()
                            .text_sm()
                            .text_color(theme.muted_foreground)
                            .child(format!("stage: {}", loader.stage())),
                    ),
            )
            .child(ProgressBar::new(loader.progress()).caption("Overall progress"))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .p_4()
                    .rounded_xl()
                    .border_1()
                    .border_color(theme.border)
                    .min_h(px(128.))
                    .children(lines),
            )
            .when(loader.stage() == LoadingStage::BiometricScan, |this| {
                this.child(
                    ProgressBar::new(state.scan_progress_percent)
                        .caption("Biometric scan")
                        .accent(theme.info),
                )
            })
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .child(
                        div()
                            .font_semibold()
                            .child(format!("Systems online {online}/{}", catalog::SYSTEMS.len())),
                    )
                    .children(systems),
            )
            .when(entity.booted, |this| {
                this.child(
                    div()
                        .text_xl()
                        .font_bold()
                        .text_color(theme.success)
                        .child("ACCESS GRANTED"),
                )
            })
    }
}
