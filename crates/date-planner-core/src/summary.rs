//! Plain-text renderings of a session: the downloadable plan and the email body.

use crate::session::Session;

pub const PLACEHOLDER: &str = "-";
pub const SUBJECT: &str = "New Date Planner submission";
pub const COPY_SUBJECT: &str = "Your Date Planner submission (copy)";

/// What the respondent typed into the final form. Every field is optional.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub feedback: String,
    pub send_copy: bool,
}

impl Default for Submission {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            feedback: String::new(),
            send_copy: true,
        }
    }
}

impl Submission {
    /// Address for the respondent's copy, when one was asked for.
    pub fn copy_address(&self) -> Option<&str> {
        let email = self.email.trim();
        (self.send_copy && !email.is_empty()).then_some(email)
    }
}

/// `(category, label)` pairs in declared order, with the placeholder for
/// categories that are not finished.
pub fn category_lines(session: &Session) -> Vec<(String, String)> {
    let catalog = session.catalog();
    catalog
        .ids()
        .map(|id| {
            let labels = session.selection(id).labels();
            let value = if labels.is_empty() {
                PLACEHOLDER.to_string()
            } else {
                labels.join(", ")
            };
            (catalog.name(id).to_string(), value)
        })
        .collect()
}

/// The text offered for download.
pub fn build_summary(session: &Session) -> String {
    let mut lines = vec!["Date Planner Picks".to_string(), String::new()];

    for (category, value) in category_lines(session) {
        lines.push(format!("{}: {}", category, value));
    }
    lines.push(format!("Dietary needs: {}", session.catalog().dietary_needs()));

    let notes = session.notes().trim();
    if !notes.is_empty() {
        lines.push(String::new());
        lines.push("Suggestions:".to_string());
        lines.push(notes.to_string());
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// The body sent to the planner's recipient (and, optionally, the respondent).
pub fn build_email_body(session: &Session, submission: &Submission) -> String {
    let mut body: Vec<String> = Vec::new();

    let name = submission.name.trim();
    if !name.is_empty() {
        body.push(format!("Name: {}", name));
    }
    let email = submission.email.trim();
    if !email.is_empty() {
        body.push(format!("Email: {}", email));
    }

    body.push(String::new());
    body.push("Selections:".to_string());
    for (category, value) in category_lines(session) {
        body.push(format!("- {}: {}", category, value));
    }
    body.push(format!("- Dietary needs: {}", session.catalog().dietary_needs()));

    let notes = session.notes().trim();
    if !notes.is_empty() {
        body.push(String::new());
        body.push("Additional Suggestions:".to_string());
        body.push(notes.to_string());
    }

    let feedback = submission.feedback.trim();
    if !feedback.is_empty() {
        body.push(String::new());
        body.push("Feedback:".to_string());
        body.push(feedback.to_string());
    }

    body.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::session::Flow;

    fn session_with(picks: &[(&str, usize)]) -> Session {
        let mut session = Session::new(Catalog::builtin(), Flow::Submit);
        for (name, option) in picks {
            let id = session.catalog().find(name).unwrap();
            session.pick(id, *option).unwrap();
            session.commit(id).unwrap();
        }
        session
    }

    #[test]
    fn test_summary_matches_template() {
        // Roses and Cinema are the first option of their categories.
        let session = session_with(&[("Flowers", 0), ("Activity", 0)]);
        let expected = "Date Planner Picks\n\
                        \n\
                        Flowers: Roses\n\
                        Activity: Cinema\n\
                        Food (Vegetarian-friendly): -\n\
                        Vibe: -\n\
                        Dietary needs: Vegetarian\n";
        assert_eq!(build_summary(&session), expected);
    }

    #[test]
    fn test_summary_one_line_per_category_in_order() {
        let session = session_with(&[("Vibe", 3)]);
        let text = build_summary(&session);
        let catalog = session.catalog();

        let mut positions = Vec::new();
        for id in catalog.ids() {
            let prefix = format!("{}: ", catalog.name(id));
            let matching: Vec<usize> = text
                .lines()
                .enumerate()
                .filter(|(_, line)| line.starts_with(&prefix))
                .map(|(i, _)| i)
                .collect();
            assert_eq!(matching.len(), 1, "exactly one line for {}", catalog.name(id));
            positions.push(matching[0]);
        }
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_summary_includes_trimmed_notes() {
        let mut session = session_with(&[]);
        session.set_notes("  loves jazz\nno lilies  \n");
        let text = build_summary(&session);
        assert!(text.ends_with("Dietary needs: Vegetarian\n\nSuggestions:\nloves jazz\nno lilies\n"));
    }

    #[test]
    fn test_summary_blank_notes_omitted() {
        let mut session = session_with(&[]);
        session.set_notes("   \n");
        assert!(!build_summary(&session).contains("Suggestions:"));
    }

    #[test]
    fn test_summary_swipe_likes_joined() {
        let mut session = Session::new(Catalog::builtin(), Flow::Swipe);
        let flowers = session.catalog().find("Flowers").unwrap();
        session.like(flowers).unwrap();
        session.pass(flowers).unwrap();
        session.like(flowers).unwrap();
        assert!(build_summary(&session).contains("Flowers: -\n"));

        session.pass(flowers).unwrap();
        assert!(build_summary(&session).contains("Flowers: Roses, Sunflowers\n"));
    }

    #[test]
    fn test_email_body_full() {
        let mut session = session_with(&[("Flowers", 2)]);
        session.set_notes("Sunday works best");
        let submission = Submission {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            feedback: " Great! ".to_string(),
            send_copy: true,
        };
        let expected = "Name: Sam\n\
                        Email: sam@example.com\n\
                        \n\
                        Selections:\n\
                        - Flowers: Sunflowers\n\
                        - Activity: -\n\
                        - Food (Vegetarian-friendly): -\n\
                        - Vibe: -\n\
                        - Dietary needs: Vegetarian\n\
                        \n\
                        Additional Suggestions:\n\
                        Sunday works best\n\
                        \n\
                        Feedback:\n\
                        Great!";
        assert_eq!(build_email_body(&session, &submission), expected);
    }

    #[test]
    fn test_email_body_anonymous() {
        let session = session_with(&[]);
        let body = build_email_body(&session, &Submission::default());
        assert!(body.starts_with("\nSelections:\n"));
        assert!(!body.contains("Feedback:"));
    }

    #[test]
    fn test_copy_address() {
        let mut submission = Submission::default();
        assert_eq!(submission.copy_address(), None);
        submission.email = " me@example.com ".to_string();
        assert_eq!(submission.copy_address(), Some("me@example.com"));
        submission.send_copy = false;
        assert_eq!(submission.copy_address(), None);
    }
}
