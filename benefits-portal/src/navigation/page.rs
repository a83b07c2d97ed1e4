//! Closed identifier sets for portal pages and profile sub-sections.
//!
//! The canonical kebab-case names double as the persisted values and the URL
//! segments. Parsing also accepts a few legacy spellings so that values
//! written by older builds keep restoring to the right screen.

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
pub enum PageId {
    #[default]
    #[strum(to_string = "home", serialize = "homepage")]
    Home,
    #[strum(to_string = "admin")]
    Admin,
    #[strum(to_string = "profile", serialize = "my-profile")]
    Profile,
    #[strum(to_string = "accounts")]
    Accounts,
    #[strum(to_string = "claims")]
    Claims,
    #[strum(to_string = "resources")]
    Resources,
    #[strum(to_string = "hsa")]
    Hsa,
    #[strum(to_string = "fsa")]
    Fsa,
    #[strum(to_string = "message-center")]
    MessageCenter,
    #[strum(to_string = "reimburse", serialize = "reimburse-step-1")]
    Reimburse,
    #[strum(to_string = "reimburse-docs", serialize = "reimburse-step-2")]
    ReimburseDocs,
    #[strum(to_string = "reimburse-analyze", serialize = "reimburse-step-3")]
    ReimburseAnalyze,
    #[strum(to_string = "reimburse-review", serialize = "reimburse-step-4")]
    ReimburseReview,
    #[strum(to_string = "reimburse-confirm", serialize = "reimburse-step-5")]
    ReimburseConfirm,
}

/// Reimbursement wizard screens in the order the user walks them.
pub const REIMBURSE_STEPS: [PageId; 5] = [
    PageId::Reimburse,
    PageId::ReimburseDocs,
    PageId::ReimburseAnalyze,
    PageId::ReimburseReview,
    PageId::ReimburseConfirm,
];

impl PageId {
    /// Exact lookup; `None` for anything outside the known set.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    /// Lookup that clamps unknown identifiers to the default page.
    pub fn resolve(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn all() -> impl Iterator<Item = PageId> {
        Self::iter()
    }

    pub fn title(self) -> &'static str {
        match self {
            PageId::Home => "Home",
            PageId::Admin => "Admin Customization",
            PageId::Profile => "My Profile",
            PageId::Accounts => "Accounts",
            PageId::Claims => "Claims",
            PageId::Resources => "Resources",
            PageId::Hsa => "Health Savings Account (HSA)",
            PageId::Fsa => "Flexible Spending Account (FSA)",
            PageId::MessageCenter => "Message Center",
            PageId::Reimburse => "Reimburse Myself",
            PageId::ReimburseDocs => "Upload Documents",
            PageId::ReimburseAnalyze => "Analyzing Documents",
            PageId::ReimburseReview => "Review Claim",
            PageId::ReimburseConfirm => "Confirm Claim",
        }
    }

    /// Top navigation section highlighted while this page is shown.
    pub fn section(self) -> Option<NavSection> {
        match self {
            PageId::Home => Some(NavSection::Home),
            PageId::Accounts | PageId::Hsa | PageId::Fsa => Some(NavSection::Accounts),
            PageId::Claims => Some(NavSection::Claims),
            PageId::Resources => Some(NavSection::Resources),
            _ => None,
        }
    }

    /// 1-based position within the reimbursement wizard.
    pub fn reimburse_step(self) -> Option<usize> {
        REIMBURSE_STEPS
            .iter()
            .position(|step| *step == self)
            .map(|index| index + 1)
    }

    pub fn next_step(self) -> Option<PageId> {
        let step = self.reimburse_step()?;
        REIMBURSE_STEPS.get(step).copied()
    }

    pub fn previous_step(self) -> Option<PageId> {
        let step = self.reimburse_step()?;
        step.checked_sub(2)
            .and_then(|index| REIMBURSE_STEPS.get(index).copied())
    }
}

/// Entries of the top navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum NavSection {
    Home,
    Accounts,
    Claims,
    Resources,
}

impl NavSection {
    pub fn label(self) -> &'static str {
        match self {
            NavSection::Home => "Home",
            NavSection::Accounts => "Accounts",
            NavSection::Claims => "Claims",
            NavSection::Resources => "Resources",
        }
    }

    pub fn landing(self) -> PageId {
        match self {
            NavSection::Home => PageId::Home,
            NavSection::Accounts => PageId::Accounts,
            NavSection::Claims => PageId::Claims,
            NavSection::Resources => PageId::Resources,
        }
    }

    pub fn all() -> impl Iterator<Item = NavSection> {
        Self::iter()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
    IntoStaticStr,
)]
pub enum ProfileSubPageId {
    #[default]
    #[strum(to_string = "profile", serialize = "my-profile")]
    Profile,
    #[strum(to_string = "dependents")]
    Dependents,
    #[strum(to_string = "beneficiaries")]
    Beneficiaries,
    #[strum(to_string = "banking")]
    Banking,
    #[strum(to_string = "debit-card")]
    DebitCard,
    #[strum(to_string = "login-security")]
    LoginSecurity,
    #[strum(to_string = "communication")]
    Communication,
}

impl ProfileSubPageId {
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    pub fn resolve(raw: &str) -> Self {
        Self::parse(raw).unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn all() -> impl Iterator<Item = ProfileSubPageId> {
        Self::iter()
    }

    pub fn label(self) -> &'static str {
        match self {
            ProfileSubPageId::Profile => "My Profile",
            ProfileSubPageId::Dependents => "Dependents",
            ProfileSubPageId::Beneficiaries => "Beneficiaries",
            ProfileSubPageId::Banking => "Banking",
            ProfileSubPageId::DebitCard => "Debit Card",
            ProfileSubPageId::LoginSecurity => "Login & Security",
            ProfileSubPageId::Communication => "Communication Preferences",
        }
    }
}
