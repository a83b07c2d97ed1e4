//! Static page table.
//!
//! Adding a `PageId` variant without a renderer here is a compile error.

use askama::Template;
use std::sync::Arc;

use super::events::{EventBus, PortalEvent};
use super::page::{PageId, ProfileSubPageId, REIMBURSE_STEPS};
use super::profile::MountedProfile;
use crate::pages::{
    summary, NavBar, NavItem, NavLinks, PageTemplate, ProfileTemplate, ReimburseTemplate,
};
use crate::store::SharedStore;

/// What a page renderer gets from the portal.
pub struct PageContext<'a> {
    pub links: NavLinks,
    pub store: &'a SharedStore,
    pub bus: &'a EventBus<PortalEvent>,
}

impl<'a> PageContext<'a> {
    pub fn new(page: PageId, store: &'a SharedStore, bus: &'a EventBus<PortalEvent>) -> Self {
        Self {
            links: NavLinks::new(page),
            store,
            bus,
        }
    }

    pub fn current_page(&self) -> PageId {
        self.links.current_page()
    }
}

pub type PageRenderer = fn(&PageContext<'_>) -> askama::Result<String>;

#[derive(Clone, Copy)]
pub struct PageEntry {
    pub page: PageId,
    pub render: PageRenderer,
}

impl std::fmt::Debug for PageEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageEntry").field("page", &self.page).finish()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PageRegistry;

impl PageRegistry {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, page: PageId) -> PageEntry {
        let render: PageRenderer = match page {
            PageId::Home
            | PageId::Admin
            | PageId::Accounts
            | PageId::Claims
            | PageId::Resources
            | PageId::Hsa
            | PageId::Fsa => render_simple,
            PageId::MessageCenter => render_with_back,
            PageId::Profile => render_profile,
            PageId::Reimburse
            | PageId::ReimburseDocs
            | PageId::ReimburseAnalyze
            | PageId::ReimburseReview
            | PageId::ReimburseConfirm => render_reimburse,
        };
        PageEntry { page, render }
    }

    pub fn render(&self, ctx: &PageContext<'_>) -> askama::Result<String> {
        (self.resolve(ctx.current_page()).render)(ctx)
    }
}

fn render_simple(ctx: &PageContext<'_>) -> askama::Result<String> {
    let page = ctx.current_page();
    PageTemplate {
        title: page.title(),
        nav: NavBar::new(&ctx.links),
        summary: summary(page),
        back_href: None,
    }
    .render()
}

fn render_with_back(ctx: &PageContext<'_>) -> askama::Result<String> {
    let page = ctx.current_page();
    PageTemplate {
        title: page.title(),
        nav: NavBar::new(&ctx.links),
        summary: summary(page),
        back_href: Some(ctx.links.back()),
    }
    .render()
}

fn render_profile(ctx: &PageContext<'_>) -> askama::Result<String> {
    // Mounted for the duration of this render; unmounting consumes the hint.
    let profile = MountedProfile::mount(Arc::clone(ctx.store), ctx.bus);
    let active = profile.active_sub_page();

    let sidebar = ProfileSubPageId::all()
        .map(|sub_page| NavItem {
            label: sub_page.label(),
            href: ctx.links.profile_section(sub_page),
            active: sub_page == active,
        })
        .collect();

    ProfileTemplate {
        title: PageId::Profile.title(),
        nav: NavBar::new(&ctx.links),
        sidebar,
        active_label: active.label(),
        back_href: ctx.links.back(),
    }
    .render()
}

fn render_reimburse(ctx: &PageContext<'_>) -> askama::Result<String> {
    let page = ctx.current_page();
    ReimburseTemplate {
        title: page.title(),
        nav: NavBar::new(&ctx.links),
        step: page.reimburse_step().unwrap_or(1),
        total_steps: REIMBURSE_STEPS.len(),
        previous_href: page.previous_step().map(|prev| ctx.links.navigate(prev)),
        next_href: page.next_step().map(|next| ctx.links.navigate(next)),
        cancel_href: ctx.links.home(),
    }
    .render()
}
