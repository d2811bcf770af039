mod boot_page;
mod settings_page;
mod toast_stack;

use gpui::{
    AnyView, AppContext, Context, Entity, IntoElement, ParentElement, Render, Styled, Window, div,
};
use gpui_component::{
    IconName, Side,
    sidebar::{Sidebar, SidebarGroup, SidebarHeader, SidebarMenu, SidebarMenuItem},
};

use crate::{
    entities::DataEntities,
    views::{boot_page::BootPage, settings_page::SettingsPage, toast_stack::ToastStack},
};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PageUi {
    Boot,
    Settings,
}

pub struct FrontendUi {
    data: DataEntities,
    active_page: PageUi,
    active_page_view: AnyView,
    toasts: Entity<ToastStack>,
}

impl FrontendUi {
    pub fn new(data: &DataEntities, _window: &mut Window, cx: &mut Context<Self>) -> Self {
        let initial_view = cx.new(|cx| BootPage::new(data, cx)).into();
        let toasts = cx.new(|cx| ToastStack::new(data, cx));
        Self {
            data: data.clone(),
            active_page: PageUi::Boot,
            active_page_view: initial_view,
            toasts,
        }
    }

    pub fn change_page(&mut self, page: PageUi, cx: &mut Context<Self>) {
        let new_page = match page {
            PageUi::Boot => cx.new(|cx| BootPage::new(&self.data, cx)).into(),
            PageUi::Settings => cx.new(|cx| SettingsPage::new(&self.data, cx)).into(),
        };
        self.active_page = page;
        self.active_page_view = new_page;
        cx.notify();
    }
}

impl Render for FrontendUi {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let on_page_change = |page| {
            cx.listener(move |this, _, _, cx| {
                this.change_page(page, cx);
            })
        };

        div()
            .flex()
            .size_full()
            .child(
                Sidebar::new(Side::Left)
                    .header(SidebarHeader::new().child("Nexus Cyber Shield"))
                    .child(
                        SidebarGroup::new("Console").child(
                            SidebarMenu::new()
                                .child(
                                    SidebarMenuItem::new("Boot sequence")
                                        .active(self.active_page == PageUi::Boot)
                                        .icon(IconName::LayoutDashboard)
                                        .on_click(on_page_change(PageUi::Boot)),
                                )
                                .child(
                                    SidebarMenuItem::new("Settings")
                                        .active(self.active_page == PageUi::Settings)
                                        .icon(IconName::Settings)
                                        .on_click(on_page_change(PageUi::Settings)),
                                ),
                        ),
                    ),
            )
            .child(div().p_5().size_full().child(self.active_page_view.clone()))
            .child(self.toasts.clone())
    }
}
