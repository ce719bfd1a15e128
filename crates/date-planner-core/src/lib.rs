pub mod catalog;
pub mod config;
pub mod export;
pub mod images;
pub mod mailer;
pub mod session;
pub mod summary;

// Re-export main types for convenience
pub use catalog::{Catalog, CatalogError, Category, CategoryId, Choice};
pub use config::Config;
pub use export::save_summary;
pub use images::ImageStatus;
pub use mailer::{submit_and_notify, CopyOutcome, DeliveryReport, MailError, MailTransport, SmtpMailer, SmtpSettings};
pub use session::{Flow, Page, Selection, Session, SessionError, Swipe};
pub use summary::{build_email_body, build_summary, Submission};
