use std::time::SystemTime;

use gpui::{
    Context, Div, Entity, Hsla, IntoElement, ParentElement, Render, SharedString, Styled, Window,
    div, prelude::FluentBuilder, px,
};
use gpui_component::{
    ActiveTheme, IconName, Sizable, StyledExt, Theme,
    button::{Button, ButtonVariants},
};
use nexus_bridge::notification::{ActionStyle, NotificationSeverity};

use crate::{
    entities::{DataEntities, notifications_entity::NotificationsEntity},
    formatting::format_age,
};

/// What a toast card needs, copied out of the queue so the entity borrow
/// ends before listeners are built.
struct ToastCard {
    id: u64,
    message: String,
    severity: NotificationSeverity,
    created_at: SystemTime,
    actions: Vec<(String, ActionStyle)>,
}

fn severity_label(severity: NotificationSeverity) -> &'static str {
    match severity {
        NotificationSeverity::Success => "SUCCESS",
        NotificationSeverity::Warning => "WARNING",
        NotificationSeverity::Error => "ERROR",
        NotificationSeverity::Info => "INFO",
        NotificationSeverity::Threat => "THREAT DETECTED",
    }
}

fn severity_color(severity: NotificationSeverity, theme: &Theme) -> Hsla {
    match severity {
        NotificationSeverity::Success => theme.success,
        NotificationSeverity::Warning => theme.warning,
        NotificationSeverity::Error | NotificationSeverity::Threat => theme.danger,
        NotificationSeverity::Info => theme.info,
    }
}

pub struct ToastStack {
    notifications: Entity<NotificationsEntity>,
}

impl ToastStack {
    pub fn new(data: &DataEntities, cx: &mut Context<Self>) -> Self {
        cx.observe(&data.notifications, |_, _, cx| cx.notify())
            .detach();
        Self {
            notifications: data.notifications.clone(),
        }
    }

    fn render_card(card: ToastCard, now: SystemTime, cx: &mut Context<Self>) -> Div {
        let id = card.id;
        let accent = severity_color(card.severity, cx.theme());

        let buttons = card
            .actions
            .into_iter()
            .enumerate()
            .map(|(index, (label, style))| {
                let button = Button::new(SharedString::from(format!("toast-{id}-action-{index}")))
                    .small()
                    .label(label);
                let button = match style {
                    ActionStyle::Primary => button.primary(),
                    ActionStyle::Secondary => button.ghost(),
                    ActionStyle::Danger => button.danger(),
                };
                button.on_click(cx.listener(move |this, _, _, cx| {
                    let result = this
                        .notifications
                        .update(cx, |model, cx| model.invoke_action(id, index, cx));
                    if let Err(error) = result {
                        log::error!("Notification {id} action {index} failed: {error}");
                    }
                }))
            })
            .collect::<Vec<_>>();

        div()
            .w_full()
            .flex()
            .flex_col()
            .gap_2()
            .p_3()
            .rounded_xl()
            .border_1()
            .border_color(accent)
            .bg(cx.theme().background)
            .shadow_lg()
            .child(
                div()
                    .flex()
                    .items_center()
                    .justify_between()
                    .child(
                        div()
                            .text_sm()
                            .font_bold()
                            .text_color(accent)
                            .child(severity_label(card.severity)),
                    )
                    .child(
                        Button::new(SharedString::from(format!("toast-{id}-dismiss")))
                            .icon(IconName::Close)
                            .ghost()
                            .xsmall()
                            .on_click(cx.listener(move |this, _, _, cx| {
                                this.notifications
                                    .update(cx, |model, cx| model.dismiss(id, cx));
                            })),
                    ),
            )
            .child(div().child(card.message))
            .child(
                div()
                    .text_xs()
                    .text_color(cx.theme().muted_foreground)
                    .child(format_age(card.created_at, now)),
            )
            .when(!buttons.is_empty(), |this| {
                this.child(div().flex().gap_2().children(buttons))
            })
    }
}

impl Render for ToastStack {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let cards: Vec<ToastCard> = self
            .notifications
            .read(cx)
            .queue
            .visible()
            .map(|notification| ToastCard {
                id: notification.id,
                message: notification.message.clone(),
                severity: notification.severity,
                created_at: notification.created_at,
                actions: notification
                    .actions
                    .iter()
                    .map(|action| (action.label.clone(), action.style))
                    .collect(),
            })
            .collect();

        let now = SystemTime::now();
        let show_clear_all = cards.len() > 1;
        let cards: Vec<Div> = cards
            .into_iter()
            .map(|card| Self::render_card(card, now, cx))
            .collect();

        div()
            .absolute()
            .bottom_4()
            .right_4()
            .w(px(360.))
            .flex()
            .flex_col()
            .gap_2()
            .when(show_clear_all, |this| {
                this.child(
                    div().flex().justify_end().child(
                        Button::new("clear_notifications")
                            .ghost()
                            .small()
                            .label("Clear all")
                            .on_click(cx.listener(|this, _, _, cx| {
                                this.notifications
                                    .update(cx, |model, cx| model.dismiss_all(cx));
                            })),
                    ),
                )
            })
            .children(cards)
    }
}
