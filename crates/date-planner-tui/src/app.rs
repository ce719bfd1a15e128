use std::path::PathBuf;
use ratatui::layout::Rect;
use ratatui::widgets::ListState;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use date_planner_core::{
    build_email_body, build_summary, save_summary, submit_and_notify, Catalog, CategoryId, Config,
    CopyOutcome, DeliveryReport, Flow, MailError, Page, Session, SessionError, SmtpMailer,
    Submission, Swipe,
};
use crate::input::TextInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Sidebar,
    Content,
}

/// Fields of the final submit form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Feedback,
    SendCopy,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Feedback,
            FormField::Feedback => FormField::SendCopy,
            FormField::SendCopy => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::SendCopy,
            FormField::Email => FormField::Name,
            FormField::Feedback => FormField::Email,
            FormField::SendCopy => FormField::Feedback,
        }
    }
}

/// Which text field keystrokes go to while in editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    CustomLabel,
    CustomImage,
    Notes,
    Form(FormField),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct SubmissionForm {
    pub name: TextInput,
    pub email: TextInput,
    pub feedback: TextInput,
    pub send_copy: bool,
}

impl Default for SubmissionForm {
    fn default() -> Self {
        Self {
            name: TextInput::default(),
            email: TextInput::default(),
            feedback: TextInput::default(),
            send_copy: true,
        }
    }
}

impl SubmissionForm {
    pub fn submission(&self) -> Submission {
        Submission {
            name: self.name.as_str().to_string(),
            email: self.email.as_str().to_string(),
            feedback: self.feedback.as_str().to_string(),
            send_copy: self.send_copy,
        }
    }
}

pub type DeliveryTask = JoinHandle<Result<DeliveryReport, MailError>>;

pub struct App {
    // Core state
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub focus: FocusPane,
    pub editing: Option<EditTarget>,
    pub session: Session,

    // List selections
    pub sidebar_state: ListState,
    pub home_state: ListState,
    pub option_state: ListState,

    // Text fields
    pub custom_label: TextInput,
    pub custom_image: TextInput,
    pub notes_input: TextInput,
    pub form: SubmissionForm,

    // Feedback
    pub status: Option<StatusMessage>,
    pub last_download: Option<PathBuf>,

    // Email delivery in flight
    pub delivery_task: Option<DeliveryTask>,
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Panel areas for mouse hit-testing (updated during render)
    pub sidebar_area: Option<Rect>,
    pub content_area: Option<Rect>,

    // Settings
    pub config: Config,
    pub images_dir: PathBuf,
    pub download_dir: PathBuf,
}

impl App {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let flow = config.flow();
        let images_dir = config.images_dir();
        let download_dir = config.download_dir();

        let mut sidebar_state = ListState::default();
        sidebar_state.select(Some(0));
        let mut home_state = ListState::default();
        home_state.select(Some(0));

        info!(flow = flow.as_str(), categories = catalog.len(), "starting planner");

        Self {
            should_quit: false,
            input_mode: InputMode::Normal,
            focus: FocusPane::Content,
            editing: None,
            session: Session::new(catalog, flow),

            sidebar_state,
            home_state,
            option_state: ListState::default(),

            custom_label: TextInput::default(),
            custom_image: TextInput::default(),
            notes_input: TextInput::default(),
            form: SubmissionForm::default(),

            status: None,
            last_download: None,

            delivery_task: None,
            animation_frame: 0,

            sidebar_area: None,
            content_area: None,

            config,
            images_dir,
            download_dir,
        }
    }

    pub fn flow(&self) -> Flow {
        self.session.flow()
    }

    pub fn page(&self) -> Page {
        self.session.page()
    }

    /// Sidebar entries: every page.
    pub fn pages(&self) -> Vec<Page> {
        Page::all(self.session.catalog())
    }

    /// Home entries: every page but Home itself.
    pub fn home_items(&self) -> Vec<Page> {
        self.pages().into_iter().filter(|p| *p != Page::Home).collect()
    }

    pub fn current_category(&self) -> Option<CategoryId> {
        match self.page() {
            Page::Category(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_sending(&self) -> bool {
        self.delivery_task.is_some()
    }

    pub fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            kind,
            text: text.into(),
        });
    }

    // Page changes

    /// Move to `page`, resetting the per-page widgets that belong to it.
    pub fn go_to(&mut self, page: Page) {
        let entering_new_category = matches!(page, Page::Category(_)) && page != self.page();
        self.session.navigate(page);
        if entering_new_category {
            self.prepare_category_page();
        }
        self.sync_sidebar();
    }

    /// Keep widgets in step after the session moved on by itself (commit,
    /// last swipe).
    fn follow_session(&mut self) {
        if let Some(i) = self.home_items().iter().position(|p| *p == self.page()) {
            self.home_state.select(Some(i));
        }
        self.sync_sidebar();
    }

    fn prepare_category_page(&mut self) {
        self.option_state.select(Some(0));
        self.custom_label.clear();
        self.custom_image.clear();
    }

    fn sync_sidebar(&mut self) {
        let page = self.page();
        let idx = self.pages().iter().position(|p| *p == page).unwrap_or(0);
        self.sidebar_state.select(Some(idx));
    }

    pub fn jump_to_index(&mut self, index: usize) {
        if let Some(page) = self.pages().get(index).copied() {
            self.go_to(page);
        }
    }

    // Sidebar navigation
    pub fn sidebar_down(&mut self) {
        let len = self.pages().len();
        if len > 0 {
            let i = self.sidebar_state.selected().unwrap_or(0);
            self.sidebar_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn sidebar_up(&mut self) {
        let i = self.sidebar_state.selected().unwrap_or(0);
        self.sidebar_state.select(Some(i.saturating_sub(1)));
    }

    pub fn sidebar_enter(&mut self) {
        if let Some(i) = self.sidebar_state.selected() {
            self.jump_to_index(i);
            self.focus = FocusPane::Content;
        }
    }

    // Home navigation
    pub fn home_down(&mut self) {
        let len = self.home_items().len();
        if len > 0 {
            let i = self.home_state.selected().unwrap_or(0);
            self.home_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn home_up(&mut self) {
        let i = self.home_state.selected().unwrap_or(0);
        self.home_state.select(Some(i.saturating_sub(1)));
    }

    pub fn home_enter(&mut self) {
        let selected = self
            .home_state
            .selected()
            .and_then(|i| self.home_items().get(i).copied());
        match selected {
            Some(Page::Category(id)) => {
                self.session.open_category(id);
                self.prepare_category_page();
                self.sync_sidebar();
            }
            Some(page) => self.go_to(page),
            None => {}
        }
    }

    // Category page, submit flow

    /// Option rows plus the trailing "Custom..." row.
    pub fn option_rows(&self) -> usize {
        self.current_category()
            .map(|id| self.session.catalog().options(id).len() + 1)
            .unwrap_or(0)
    }

    pub fn custom_row_selected(&self) -> bool {
        let rows = self.option_rows();
        rows > 0 && self.option_state.selected() == Some(rows - 1)
    }

    pub fn option_down(&mut self) {
        let len = self.option_rows();
        if len > 0 {
            let i = self.option_state.selected().unwrap_or(0);
            self.option_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn option_up(&mut self) {
        let i = self.option_state.selected().unwrap_or(0);
        self.option_state.select(Some(i.saturating_sub(1)));
    }

    /// Highlight the option under the cursor; on the custom row, start typing.
    pub fn pick_highlighted(&mut self) {
        let Some(id) = self.current_category() else { return };
        if self.custom_row_selected() {
            self.start_editing(EditTarget::CustomLabel);
            return;
        }
        let option = self.option_state.selected().unwrap_or(0);
        if let Err(e) = self.session.pick(id, option) {
            self.set_status(StatusKind::Warning, e.to_string());
        }
    }

    /// Turn the custom fields into the pending pick, if a label was typed.
    pub fn apply_custom(&mut self) {
        let Some(id) = self.current_category() else { return };
        if self.custom_label.is_blank() {
            return;
        }
        let label = self.custom_label.as_str().to_string();
        let image = self.custom_image.as_str().to_string();
        if let Err(e) = self.session.pick_custom(id, &label, &image) {
            self.set_status(StatusKind::Warning, e.to_string());
        }
    }

    pub fn commit_current(&mut self) {
        let Some(id) = self.current_category() else { return };
        match self.session.commit(id) {
            Ok(_) => {
                let name = self.session.catalog().name(id).to_string();
                let label = self.session.selection(id).labels().join(", ");
                self.set_status(StatusKind::Success, format!("{} saved as: {}", name, label));
                self.follow_session();
            }
            Err(e) => self.set_status(StatusKind::Warning, e.to_string()),
        }
    }

    // Category page, swipe flow
    pub fn swipe_current(&mut self, swipe: Swipe) {
        let Some(id) = self.current_category() else { return };
        match self.session.swipe(id, swipe) {
            Ok(page) if page != Page::Category(id) => {
                let name = self.session.catalog().name(id).to_string();
                let liked = self.session.selection(id).labels().len();
                self.set_status(
                    StatusKind::Success,
                    format!("{} done: {} liked", name, liked),
                );
                self.follow_session();
            }
            Ok(_) => {}
            Err(SessionError::AlreadyComplete) => {
                self.set_status(StatusKind::Info, "Every card here has been swiped. Reset to start over.");
            }
            Err(e) => self.set_status(StatusKind::Warning, e.to_string()),
        }
    }

    // Text editing
    pub fn start_editing(&mut self, target: EditTarget) {
        self.editing = Some(target);
        self.input_mode = InputMode::Editing;
        if let Some(input) = self.editing_input() {
            input.end();
        }
    }

    pub fn stop_editing(&mut self) {
        self.editing = None;
        self.input_mode = InputMode::Normal;
    }

    /// The text field receiving keystrokes, if the target is a text field.
    pub fn editing_input(&mut self) -> Option<&mut TextInput> {
        match self.editing? {
            EditTarget::CustomLabel => Some(&mut self.custom_label),
            EditTarget::CustomImage => Some(&mut self.custom_image),
            EditTarget::Notes => Some(&mut self.notes_input),
            EditTarget::Form(FormField::Name) => Some(&mut self.form.name),
            EditTarget::Form(FormField::Email) => Some(&mut self.form.email),
            EditTarget::Form(FormField::Feedback) => Some(&mut self.form.feedback),
            EditTarget::Form(FormField::SendCopy) => None,
        }
    }

    /// Push the notes field into the session after every edit.
    pub fn sync_notes(&mut self) {
        let notes = self.notes_input.as_str().to_string();
        self.session.set_notes(&notes);
    }

    // Summary page
    pub fn download_summary(&mut self) {
        let text = build_summary(&self.session);
        match save_summary(&self.download_dir, &text) {
            Ok(path) => {
                self.set_status(StatusKind::Success, format!("Saved your plan to {}", path.display()));
                self.last_download = Some(path);
            }
            Err(e) => {
                warn!(error = %e, "download failed");
                self.set_status(StatusKind::Error, format!("{:#}", e));
            }
        }
    }

    /// Validate the SMTP settings and start sending in the background.
    /// A bad configuration is reported and nothing changes.
    pub fn start_submission(&mut self) {
        if self.is_sending() {
            self.set_status(StatusKind::Info, "Still sending the last submission...");
            return;
        }

        let settings = match self.config.smtp_settings() {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "submission aborted");
                self.set_status(StatusKind::Error, e.to_string());
                return;
            }
        };

        let submission = self.form.submission();
        let body = build_email_body(&self.session, &submission);
        let copy_to = submission.copy_address().map(str::to_string);
        let mailer = SmtpMailer::new(settings, self.config.starttls_fallback());
        let recipient = mailer.recipient().to_string();

        self.delivery_task = Some(tokio::spawn(async move {
            submit_and_notify(&mailer, &recipient, &body, copy_to.as_deref()).await
        }));
        self.animation_frame = 0;
        self.set_status(StatusKind::Info, "Sending");
    }

    /// Collect the delivery task once it has finished.
    pub async fn poll_delivery(&mut self) {
        let finished = self
            .delivery_task
            .as_ref()
            .is_some_and(|task| task.is_finished());
        if !finished {
            return;
        }

        if let Some(task) = self.delivery_task.take() {
            let outcome = match task.await {
                Ok(result) => result,
                Err(e) => Err(MailError::Task(e.to_string())),
            };
            self.finish_delivery(outcome);
        }
    }

    pub fn finish_delivery(&mut self, outcome: Result<DeliveryReport, MailError>) {
        self.session.record_delivery(&outcome);

        match outcome {
            Ok(report) => match report.copy {
                CopyOutcome::NotRequested => self.set_status(
                    StatusKind::Success,
                    "Thanks! Your response has been submitted and emailed.",
                ),
                CopyOutcome::Sent(to) => self.set_status(
                    StatusKind::Success,
                    format!("Thanks! Your response has been submitted and emailed. A copy went to {}.", to),
                ),
                CopyOutcome::Failed { to, error } => self.set_status(
                    StatusKind::Warning,
                    format!("Submitted and emailed, but the copy to {} failed: {}", to, error),
                ),
            },
            Err(e) => {
                warn!(error = %e, "submission failed");
                self.set_status(
                    StatusKind::Error,
                    format!("Could not send email. Check your SMTP settings. {}", e),
                );
            }
        }
    }

    /// Clear every pick, note and form field. A send still in flight is
    /// aborted so its outcome never lands on the fresh session.
    pub fn reset(&mut self) {
        let cancelled = match self.delivery_task.take() {
            Some(task) => {
                task.abort();
                info!("reset cancelled the pending email");
                true
            }
            None => false,
        };

        self.session.reset();
        self.custom_label.clear();
        self.custom_image.clear();
        self.notes_input.clear();
        self.form = SubmissionForm::default();
        self.last_download = None;
        self.home_state.select(Some(0));
        self.sync_sidebar();
        if cancelled {
            self.set_status(StatusKind::Warning, "Cleared. The email being sent was cancelled.");
        } else {
            self.set_status(StatusKind::Info, "Cleared. Back to Home to start again.");
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_sending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app(flow: Flow) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            flow: Some(flow),
            images_dir: Some(dir.path().join("images")),
            download_dir: Some(dir.path().join("downloads")),
            ..Config::default()
        };
        (App::new(config, Catalog::builtin()), dir)
    }

    #[test]
    fn test_home_items_skip_home() {
        let (app, _dir) = test_app(Flow::Submit);
        let items = app.home_items();
        assert_eq!(items.len(), 6);
        assert!(!items.contains(&Page::Home));
    }

    #[test]
    fn test_home_enter_opens_category() {
        let (mut app, _dir) = test_app(Flow::Submit);
        app.home_down();
        app.home_enter();
        let activity = app.session.catalog().find("Activity").unwrap();
        assert_eq!(app.page(), Page::Category(activity));
        assert_eq!(app.sidebar_state.selected(), Some(2));
        assert_eq!(app.option_state.selected(), Some(0));
    }

    #[test]
    fn test_commit_updates_status_and_returns_home() {
        let (mut app, _dir) = test_app(Flow::Submit);
        app.home_enter();
        app.option_down();
        app.pick_highlighted();
        app.commit_current();

        assert_eq!(app.page(), Page::Home);
        assert_eq!(app.sidebar_state.selected(), Some(0));
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.text, "Flowers saved as: Tulips");
    }

    #[test]
    fn test_commit_without_pick_warns() {
        let (mut app, _dir) = test_app(Flow::Submit);
        app.home_enter();
        app.commit_current();
        assert_eq!(app.status.clone().unwrap().kind, StatusKind::Warning);
        assert!(matches!(app.page(), Page::Category(_)));
    }

    #[test]
    fn test_custom_row_starts_editing() {
        let (mut app, _dir) = test_app(Flow::Submit);
        app.home_enter();
        for _ in 0..10 {
            app.option_down();
        }
        assert!(app.custom_row_selected());
        app.pick_highlighted();
        assert_eq!(app.editing, Some(EditTarget::CustomLabel));
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[test]
    fn test_download_writes_summary() {
        let (mut app, dir) = test_app(Flow::Submit);
        app.download_summary();
        let path = app.last_download.clone().unwrap();
        assert_eq!(path, dir.path().join("downloads").join("date_plan.txt"));
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("Date Planner Picks\n"));
    }

    #[test]
    fn test_submission_without_config_is_rejected() {
        let (mut app, _dir) = test_app(Flow::Submit);
        app.start_submission();
        assert!(!app.is_sending());
        assert!(!app.session.email_sent());
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("RECIPIENT_EMAIL"));
    }

    #[test]
    fn test_finish_delivery_failure_keeps_flag() {
        let (mut app, _dir) = test_app(Flow::Submit);
        app.finish_delivery(Err(MailError::Task("connection refused".to_string())));
        assert!(!app.session.email_sent());
        assert_eq!(app.status.clone().unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn test_finish_delivery_copy_failure_warns() {
        let (mut app, _dir) = test_app(Flow::Submit);
        app.finish_delivery(Ok(DeliveryReport {
            recipient: "me@example.com".to_string(),
            copy: CopyOutcome::Failed {
                to: "you@example.com".to_string(),
                error: "mailbox full".to_string(),
            },
        }));
        assert!(app.session.email_sent());
        assert_eq!(app.status.clone().unwrap().kind, StatusKind::Warning);
    }

    #[tokio::test]
    async fn test_unreachable_smtp_leaves_email_unsent() {
        let (mut app, _dir) = test_app(Flow::Swipe);
        app.config.smtp_host = Some("127.0.0.1".to_string());
        app.config.smtp_port = Some("1".to_string());
        app.config.smtp_username = Some("planner@example.com".to_string());
        app.config.smtp_password = Some("secret".to_string());
        app.config.recipient_email = Some("me@example.com".to_string());

        app.start_submission();
        assert!(app.is_sending());

        if let Some(task) = app.delivery_task.take() {
            let outcome = task.await.unwrap();
            assert!(outcome.is_err());
            app.finish_delivery(outcome);
        }
        assert!(!app.session.email_sent());
        assert_eq!(app.status.clone().unwrap().kind, StatusKind::Error);
    }

    #[test]
    fn test_reset_clears_fields() {
        let (mut app, _dir) = test_app(Flow::Submit);
        app.notes_input.set("call ahead");
        app.sync_notes();
        app.form.name.set("Sam");
        app.form.send_copy = false;
        app.go_to(Page::Summary);

        app.reset();

        assert_eq!(app.page(), Page::Home);
        assert!(app.session.notes().is_empty());
        assert!(app.notes_input.is_blank());
        assert!(app.form.name.is_blank());
        assert!(app.form.send_copy);
    }

    #[tokio::test]
    async fn test_reset_cancels_pending_delivery() {
        let (mut app, _dir) = test_app(Flow::Submit);
        let (release, wait) = tokio::sync::oneshot::channel::<()>();
        app.delivery_task = Some(tokio::spawn(async move {
            let _ = wait.await;
            Ok(DeliveryReport {
                recipient: "me@example.com".to_string(),
                copy: CopyOutcome::NotRequested,
            })
        }));

        app.reset();
        let _ = release.send(());
        tokio::task::yield_now().await;
        app.poll_delivery().await;

        assert!(!app.is_sending());
        assert!(!app.session.email_sent());
        let status = app.status.clone().unwrap();
        assert_eq!(status.kind, StatusKind::Warning);
        assert!(status.text.contains("cancelled"));
    }

    #[test]
    fn test_swipe_through_category() {
        let (mut app, _dir) = test_app(Flow::Swipe);
        app.home_enter();
        let flowers = app.current_category().unwrap();
        for _ in 0..3 {
            app.swipe_current(Swipe::Like);
            assert_eq!(app.page(), Page::Category(flowers));
        }
        app.swipe_current(Swipe::Pass);
        assert_eq!(app.page(), Page::Home);
        assert_eq!(app.status.clone().unwrap().text, "Flowers done: 3 liked");
    }
}
