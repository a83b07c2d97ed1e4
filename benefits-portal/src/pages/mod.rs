//! Askama views for the portal screens.
//!
//! Every page receives the same [`NavLinks`] contract; the only thing that
//! differs between pages is the body template.

use askama::Template;

use crate::navigation::page::{NavSection, PageId, ProfileSubPageId};

/// Navigation targets handed to every page.
#[derive(Debug, Clone, Copy)]
pub struct NavLinks {
    current_page: PageId,
}

impl NavLinks {
    pub fn new(current_page: PageId) -> Self {
        Self { current_page }
    }

    pub fn current_page(&self) -> PageId {
        self.current_page
    }

    pub fn navigate(&self, page: PageId) -> String {
        format!("/navigate/{}", page)
    }

    pub fn home(&self) -> String {
        self.navigate(PageId::Home)
    }

    /// Standalone pages go back to the home page.
    pub fn back(&self) -> String {
        self.home()
    }

    pub fn profile_section(&self, sub_page: ProfileSubPageId) -> String {
        format!("/profile/{}", sub_page)
    }

    pub fn admin(&self) -> String {
        self.navigate(PageId::Admin)
    }

    pub fn message_center(&self) -> String {
        self.navigate(PageId::MessageCenter)
    }

    pub fn logout(&self) -> &'static str {
        "/logout"
    }
}

#[derive(Debug, Clone)]
pub struct NavItem {
    pub label: &'static str,
    pub href: String,
    pub active: bool,
}

/// Top bar shared by every authenticated page.
#[derive(Debug, Clone)]
pub struct NavBar {
    pub home_href: String,
    pub sections: Vec<NavItem>,
    pub accounts: Vec<NavItem>,
    pub profile_menu: Vec<NavItem>,
    pub admin_href: String,
    pub message_center_href: String,
    pub logout_href: &'static str,
}

impl NavBar {
    pub fn new(links: &NavLinks) -> Self {
        let active_section = links.current_page().section();

        let sections = NavSection::all()
            .map(|section| NavItem {
                label: section.label(),
                href: links.navigate(section.landing()),
                active: active_section == Some(section),
            })
            .collect();

        let accounts = [PageId::Hsa, PageId::Fsa]
            .into_iter()
            .map(|page| NavItem {
                label: page.title(),
                href: links.navigate(page),
                active: links.current_page() == page,
            })
            .collect();

        let profile_menu = ProfileSubPageId::all()
            .map(|sub_page| NavItem {
                label: sub_page.label(),
                href: links.profile_section(sub_page),
                active: false,
            })
            .collect();

        Self {
            home_href: links.home(),
            sections,
            accounts,
            profile_menu,
            admin_href: links.admin(),
            message_center_href: links.message_center(),
            logout_href: links.logout(),
        }
    }
}

#[derive(Template, Default)]
#[template(path = "login.html")]
pub struct LoginTemplate {}

#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate {
    pub title: &'static str,
    pub nav: NavBar,
    pub summary: &'static str,
    pub back_href: Option<String>,
}

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfileTemplate {
    pub title: &'static str,
    pub nav: NavBar,
    pub sidebar: Vec<NavItem>,
    pub active_label: &'static str,
    pub back_href: String,
}

#[derive(Template)]
#[template(path = "reimburse.html")]
pub struct ReimburseTemplate {
    pub title: &'static str,
    pub nav: NavBar,
    pub step: usize,
    pub total_steps: usize,
    pub previous_href: Option<String>,
    pub next_href: Option<String>,
    pub cancel_href: String,
}

pub fn summary(page: PageId) -> &'static str {
    match page {
        PageId::Home => "What can we help you with today?",
        PageId::Admin => "Customize the portal branding and color mappings.",
        PageId::Profile => "Manage your personal information.",
        PageId::Accounts => "Accounts overview page content will go here.",
        PageId::Claims => "Claims page content will go here.",
        PageId::Resources => "Resources page content will go here.",
        PageId::Hsa => "HSA account details page content will go here.",
        PageId::Fsa => "FSA account details page content will go here.",
        PageId::MessageCenter => "Your messages and notifications.",
        PageId::Reimburse
        | PageId::ReimburseDocs
        | PageId::ReimburseAnalyze
        | PageId::ReimburseReview
        | PageId::ReimburseConfirm => "Submit a reimbursement request.",
    }
}
