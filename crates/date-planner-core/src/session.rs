//! Page state machine and per-category selections for one planning session.
//!
//! The session is UI-agnostic: a front end owns one `Session`, calls these
//! methods from its event handlers and reads the state back when it renders.
//! Nothing here is persisted; a restart starts from Home with empty picks.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::{Catalog, CategoryId, Choice};
use crate::mailer::{DeliveryReport, MailError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Pick or type something before submitting.")]
    NothingPicked,

    #[error("That action belongs to the {0} flow")]
    WrongFlow(&'static str),

    #[error("Every card in this category has already been swiped")]
    AlreadyComplete,

    #[error("Custom label cannot be empty")]
    EmptyCustomLabel,

    #[error("No option {0} in this category")]
    UnknownOption(usize),
}

/// How selections are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    /// Highlight a card, then confirm it with "submit".
    #[default]
    Submit,
    /// Like or pass every card in order.
    Swipe,
}

impl Flow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::Submit => "submit",
            Flow::Swipe => "swipe",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "submit" => Some(Flow::Submit),
            "swipe" => Some(Flow::Swipe),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Category(CategoryId),
    Suggestions,
    Summary,
}

impl Page {
    /// Every page in sidebar order: Home, the categories, Suggestions, Summary.
    pub fn all(catalog: &Catalog) -> Vec<Page> {
        std::iter::once(Page::Home)
            .chain(catalog.ids().map(Page::Category))
            .chain([Page::Suggestions, Page::Summary])
            .collect()
    }

    pub fn title<'a>(&self, catalog: &'a Catalog) -> &'a str {
        match self {
            Page::Home => "Home",
            Page::Category(id) => catalog.name(*id),
            Page::Suggestions => "Suggestions",
            Page::Summary => "Summary",
        }
    }
}

/// Submit flow: one committed choice plus the pick being considered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitSelection {
    pub committed: Option<Choice>,
    pub pending: Option<Choice>,
}

/// Swipe flow: every card ends up in `liked` or `passed`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwipeSelection {
    pub liked: Vec<Choice>,
    pub passed: Vec<Choice>,
    pub cursor: usize,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Submit(SubmitSelection),
    Swipe(SwipeSelection),
}

impl Selection {
    fn empty(flow: Flow) -> Self {
        match flow {
            Flow::Submit => Selection::Submit(SubmitSelection::default()),
            Flow::Swipe => Selection::Swipe(SwipeSelection::default()),
        }
    }

    pub fn is_complete(&self) -> bool {
        match self {
            Selection::Submit(s) => s.committed.is_some(),
            Selection::Swipe(s) => s.done,
        }
    }

    /// Labels the user settled on, in the order they were chosen.
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Selection::Submit(s) => s.committed.iter().map(|c| c.label.as_str()).collect(),
            Selection::Swipe(s) if s.done => s.liked.iter().map(|c| c.label.as_str()).collect(),
            Selection::Swipe(_) => Vec::new(),
        }
    }

    /// Choices behind `labels`, with their images.
    pub fn chosen(&self) -> Vec<&Choice> {
        match self {
            Selection::Submit(s) => s.committed.iter().collect(),
            Selection::Swipe(s) if s.done => s.liked.iter().collect(),
            Selection::Swipe(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    Like,
    Pass,
}

pub struct Session {
    catalog: Catalog,
    flow: Flow,
    page: Page,
    selections: Vec<Selection>,
    notes: String,
    email_sent: bool,
}

impl Session {
    pub fn new(catalog: Catalog, flow: Flow) -> Self {
        let selections = catalog.ids().map(|_| Selection::empty(flow)).collect();
        Self {
            catalog,
            flow,
            page: Page::Home,
            selections,
            notes: String::new(),
            email_sent: false,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn flow(&self) -> Flow {
        self.flow
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn email_sent(&self) -> bool {
        self.email_sent
    }

    pub fn selection(&self, id: CategoryId) -> &Selection {
        &self.selections[id.index()]
    }

    pub fn is_complete(&self, id: CategoryId) -> bool {
        self.selection(id).is_complete()
    }

    pub fn all_complete(&self) -> bool {
        self.selections.iter().all(Selection::is_complete)
    }

    pub fn completed_count(&self) -> usize {
        self.selections.iter().filter(|s| s.is_complete()).count()
    }

    /// Sidebar navigation: always wins over the current page.
    pub fn navigate(&mut self, page: Page) {
        if self.page != page {
            debug!(from = ?self.page, to = ?page, "navigate");
        }
        self.page = page;
    }

    pub fn open_category(&mut self, id: CategoryId) {
        self.navigate(Page::Category(id));
    }

    pub fn set_notes(&mut self, notes: &str) {
        self.notes = notes.to_string();
    }

    /// Highlight one of the catalog options without committing it.
    pub fn pick(&mut self, id: CategoryId, option: usize) -> Result<(), SessionError> {
        let choice = self
            .catalog
            .options(id)
            .get(option)
            .cloned()
            .ok_or(SessionError::UnknownOption(option))?;
        self.submit_selection_mut(id)?.pending = Some(choice);
        Ok(())
    }

    /// Highlight a free-text pick. The image filename may be blank.
    pub fn pick_custom(&mut self, id: CategoryId, label: &str, image: &str) -> Result<(), SessionError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(SessionError::EmptyCustomLabel);
        }
        let choice = Choice::new(label, image.trim());
        self.submit_selection_mut(id)?.pending = Some(choice);
        Ok(())
    }

    /// Confirm the pending pick. Returns the page the session moved to.
    pub fn commit(&mut self, id: CategoryId) -> Result<Page, SessionError> {
        let selection = self.submit_selection_mut(id)?;
        let chosen = selection.pending.clone().ok_or(SessionError::NothingPicked)?;
        debug!(category = id.index(), label = %chosen.label, "commit");
        selection.committed = Some(chosen);
        Ok(self.leave_finished_category())
    }

    /// The card waiting for a like or pass, if any are left.
    pub fn current_card(&self, id: CategoryId) -> Option<&Choice> {
        match self.selection(id) {
            Selection::Swipe(s) if !s.done => self.catalog.options(id).get(s.cursor),
            _ => None,
        }
    }

    pub fn like(&mut self, id: CategoryId) -> Result<Page, SessionError> {
        self.swipe(id, Swipe::Like)
    }

    pub fn pass(&mut self, id: CategoryId) -> Result<Page, SessionError> {
        self.swipe(id, Swipe::Pass)
    }

    /// Record the card under the cursor and advance. Returns the page the
    /// session is on afterwards: the category itself while cards remain.
    pub fn swipe(&mut self, id: CategoryId, swipe: Swipe) -> Result<Page, SessionError> {
        let total = self.catalog.options(id).len();
        let card = match self.selection(id) {
            Selection::Swipe(s) if s.done => return Err(SessionError::AlreadyComplete),
            Selection::Swipe(s) => self.catalog.options(id)[s.cursor].clone(),
            Selection::Submit(_) => return Err(SessionError::WrongFlow(Flow::Swipe.as_str())),
        };

        let Selection::Swipe(state) = &mut self.selections[id.index()] else {
            return Err(SessionError::WrongFlow(Flow::Swipe.as_str()));
        };
        debug!(category = id.index(), label = %card.label, ?swipe, "swipe");
        match swipe {
            Swipe::Like => state.liked.push(card),
            Swipe::Pass => state.passed.push(card),
        }
        state.cursor += 1;

        if state.cursor >= total {
            state.done = true;
            Ok(self.leave_finished_category())
        } else {
            Ok(self.page)
        }
    }

    /// Apply the result of a submission. Only a delivered primary message
    /// flips "email sent"; a failure leaves the session untouched.
    pub fn record_delivery(&mut self, outcome: &Result<DeliveryReport, MailError>) {
        if let Ok(report) = outcome {
            debug!(recipient = %report.recipient, "email sent");
            self.email_sent = true;
        }
    }

    pub fn reset(&mut self) {
        debug!("reset session");
        self.selections = self.catalog.ids().map(|_| Selection::empty(self.flow)).collect();
        self.notes.clear();
        self.email_sent = false;
        self.page = Page::Home;
    }

    fn leave_finished_category(&mut self) -> Page {
        let next = if self.all_complete() { Page::Summary } else { Page::Home };
        self.navigate(next);
        next
    }

    fn submit_selection_mut(&mut self, id: CategoryId) -> Result<&mut SubmitSelection, SessionError> {
        match &mut self.selections[id.index()] {
            Selection::Submit(s) => Ok(s),
            Selection::Swipe(_) => Err(SessionError::WrongFlow(Flow::Submit.as_str())),
        }
    }
}
