use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use date_planner_core::images::{self, ImageStatus};
use date_planner_core::summary::category_lines;
use date_planner_core::{Flow, Page, Selection};
use crate::app::{App, EditTarget, FocusPane, FormField, InputMode, StatusKind};
use crate::input::TextInput;

const SIDEBAR_WIDTH: u16 = 28;

/// Ensure the selected item in a list is visible by adjusting the ListState offset.
fn ensure_selected_visible(state: &mut ListState, visible_height: usize) {
    let visible_height = visible_height.max(1);

    if let Some(selected) = state.selected() {
        let min_offset = selected.saturating_sub(visible_height - 1);
        let max_offset = selected;

        let new_offset = state.offset().clamp(min_offset, max_offset);
        if new_offset != state.offset() {
            *state.offset_mut() = new_offset;
        }
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'static> {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title))
}

fn highlight_style() -> Style {
    Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, status, footer
    let [header_area, body_area, status_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    let [sidebar_area, content_area] = Layout::horizontal([
        Constraint::Length(SIDEBAR_WIDTH),
        Constraint::Min(0),
    ])
    .areas(body_area);

    // Store areas for mouse hit-testing
    app.sidebar_area = Some(sidebar_area);
    app.content_area = Some(content_area);

    render_sidebar(app, frame, sidebar_area);

    match app.page() {
        Page::Home => render_home(app, frame, content_area),
        Page::Category(_) => match app.flow() {
            Flow::Submit => render_category_submit(app, frame, content_area),
            Flow::Swipe => render_category_swipe(app, frame, content_area),
        },
        Page::Suggestions => render_suggestions(app, frame, content_area),
        Page::Summary => render_summary(app, frame, content_area),
    }

    render_status(app, frame, status_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let session = &app.session;
    let progress = format!(
        " [{}/{} done]",
        session.completed_count(),
        session.catalog().len()
    );
    let sent = if session.email_sent() { " [emailed]" } else { "" };

    let title = Line::from(vec![
        Span::styled(" Date Planner ", Style::default().fg(Color::Magenta).bold()),
        Span::styled(format!("({} flow)", app.flow().as_str()), dim()),
        Span::styled(progress, dim()),
        Span::styled(sent, Style::default().fg(Color::Green)),
        Span::raw(" "),
        Span::styled(format!("v{}", env!("CARGO_PKG_VERSION")), dim()),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_sidebar(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Sidebar;
    let current = app.page();
    let catalog = app.session.catalog();

    let items: Vec<ListItem> = app
        .pages()
        .into_iter()
        .enumerate()
        .map(|(i, page)| {
            let mark = match page {
                Page::Category(id) if app.session.is_complete(id) => "✓",
                Page::Category(_) => "·",
                _ => " ",
            };
            let text = format!("{} {} {}", i + 1, mark, page.title(catalog));
            if page == current {
                ListItem::new(text).style(Style::default().fg(Color::Cyan))
            } else {
                ListItem::new(text)
            }
        })
        .collect();

    let list = List::new(items)
        .block(pane_block("Pages", focused))
        .highlight_style(if focused { highlight_style() } else { Style::default() })
        .highlight_symbol("> ");

    ensure_selected_visible(&mut app.sidebar_state, area.height.saturating_sub(2) as usize);
    frame.render_stateful_widget(list, area, &mut app.sidebar_state);
}

fn render_home(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Content;
    let block = pane_block("Home", focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [intro_area, list_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(inner);

    let intro = match app.flow() {
        Flow::Submit => "Pick one option per category, then check the Summary.",
        Flow::Swipe => "Swipe through every card in each category, then check the Summary.",
    };
    let done = app.session.completed_count();
    let total = app.session.catalog().len();
    let intro = Paragraph::new(vec![
        Line::from(intro),
        Line::styled(format!("{} of {} categories done", done, total), dim()),
    ])
    .wrap(Wrap { trim: true });
    frame.render_widget(intro, intro_area);

    let catalog = app.session.catalog();
    let items: Vec<ListItem> = app
        .home_items()
        .into_iter()
        .map(|page| {
            let detail = match page {
                Page::Category(id) => {
                    let labels = app.session.selection(id).labels();
                    if app.session.is_complete(id) {
                        if labels.is_empty() {
                            "nothing liked".to_string()
                        } else {
                            labels.join(", ")
                        }
                    } else {
                        "not done".to_string()
                    }
                }
                Page::Suggestions if app.session.notes().trim().is_empty() => "optional".to_string(),
                Page::Suggestions => "notes added".to_string(),
                Page::Summary if app.session.all_complete() => "ready".to_string(),
                _ => String::new(),
            };
            let done = matches!(page, Page::Category(id) if app.session.is_complete(id));
            let mark = if done { "[x]" } else { "[ ]" };
            let mark_style = if done {
                Style::default().fg(Color::Green)
            } else {
                dim()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", mark), mark_style),
                Span::raw(page.title(catalog).to_string()),
                Span::styled(format!("  {}", detail), dim()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(highlight_style())
        .highlight_symbol("> ");

    ensure_selected_visible(&mut app.home_state, list_area.height as usize);
    frame.render_stateful_widget(list, list_area, &mut app.home_state);
}

fn render_category_submit(app: &mut App, frame: &mut Frame, area: Rect) {
    let Some(id) = app.current_category() else { return };
    let focused = app.focus == FocusPane::Content;
    let catalog = app.session.catalog();
    let name = catalog.name(id).to_string();

    let block = pane_block(&name, focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.option_rows() as u16;
    let [list_area, info_area, custom_area] = Layout::vertical([
        Constraint::Length(rows.max(1)),
        Constraint::Min(4),
        Constraint::Length(3),
    ])
    .areas(inner);

    let selection = match app.session.selection(id) {
        Selection::Submit(s) => s.clone(),
        Selection::Swipe(_) => return,
    };

    let mut items: Vec<ListItem> = catalog
        .options(id)
        .iter()
        .map(|choice| {
            let pending = selection.pending.as_ref() == Some(choice);
            let saved = selection.committed.as_ref() == Some(choice);
            let marker = if pending { "(*)" } else { "( )" };
            let mut spans = vec![
                Span::raw(format!("{} ", marker)),
                Span::raw(choice.label.clone()),
            ];
            if saved {
                spans.push(Span::styled("  saved", Style::default().fg(Color::Green)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    items.push(ListItem::new(Line::styled("    Custom...", Style::default().fg(Color::Yellow))));

    let list = List::new(items)
        .highlight_style(if focused { highlight_style() } else { Style::default() })
        .highlight_symbol("> ");
    ensure_selected_visible(&mut app.option_state, list_area.height as usize);
    frame.render_stateful_widget(list, list_area, &mut app.option_state);

    // Pending pick, saved pick and the picture for whichever is in play
    let mut lines = vec![Line::raw("")];
    match &selection.pending {
        Some(choice) => lines.push(Line::from(vec![
            Span::styled("Picked: ", dim()),
            Span::styled(choice.label.clone(), Style::default().fg(Color::Cyan).bold()),
            Span::styled("  press s to submit", dim()),
        ])),
        None => lines.push(Line::styled("Pick or type something, then press s to submit.", dim())),
    }
    if let Some(choice) = &selection.committed {
        lines.push(Line::from(vec![
            Span::styled("Saved: ", dim()),
            Span::styled(choice.label.clone(), Style::default().fg(Color::Green)),
        ]));
    }
    if let Some(choice) = selection.pending.as_ref().or(selection.committed.as_ref()) {
        lines.push(image_line(&app.images_dir, &choice.image));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), info_area);

    let [label_area, image_area, _] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(custom_area);
    render_input_line(
        frame,
        label_area,
        "Custom option: ",
        &app.custom_label,
        app.editing == Some(EditTarget::CustomLabel),
    );
    render_input_line(
        frame,
        image_area,
        "Image file:    ",
        &app.custom_image,
        app.editing == Some(EditTarget::CustomImage),
    );
}

fn render_category_swipe(app: &mut App, frame: &mut Frame, area: Rect) {
    let Some(id) = app.current_category() else { return };
    let focused = app.focus == FocusPane::Content;
    let catalog = app.session.catalog();
    let total = catalog.options(id).len();

    let block = pane_block(catalog.name(id), focused);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Selection::Swipe(selection) = app.session.selection(id) else { return };

    let [card_area, lists_area] = Layout::vertical([
        Constraint::Length(7),
        Constraint::Min(0),
    ])
    .areas(inner);

    let mut card = Vec::new();
    match app.session.current_card(id) {
        Some(choice) if !selection.done => {
            card.push(Line::styled(
                format!("Card {} of {}", selection.cursor + 1, total),
                dim(),
            ));
            card.push(Line::raw(""));
            card.push(Line::styled(
                choice.label.clone(),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ));
            card.push(image_line(&app.images_dir, &choice.image));
            card.push(Line::raw(""));
            card.push(Line::from(vec![
                Span::styled(" n ", Style::default().bg(Color::Red).fg(Color::White)),
                Span::raw(" pass    "),
                Span::styled(" y ", Style::default().bg(Color::Green).fg(Color::Black)),
                Span::raw(" like"),
            ]));
        }
        _ => {
            card.push(Line::styled(
                format!("All {} cards swiped.", total),
                Style::default().fg(Color::Green),
            ));
            card.push(Line::styled("Reset from the Summary page to start over.", dim()));
        }
    }
    frame.render_widget(Paragraph::new(card), card_area);

    let [liked_area, passed_area] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .areas(lists_area);

    let liked: Vec<ListItem> = selection
        .liked
        .iter()
        .map(|c| ListItem::new(c.label.clone()))
        .collect();
    let passed: Vec<ListItem> = selection
        .passed
        .iter()
        .map(|c| ListItem::new(c.label.clone()))
        .collect();

    frame.render_widget(
        List::new(liked).block(
            Block::default()
                .borders(Borders::TOP)
                .title(format!(" Liked ({}) ", selection.liked.len()))
                .title_style(Style::default().fg(Color::Green)),
        ),
        liked_area,
    );
    frame.render_widget(
        List::new(passed).block(
            Block::default()
                .borders(Borders::TOP)
                .title(format!(" Passed ({}) ", selection.passed.len()))
                .title_style(Style::default().fg(Color::Red)),
        ),
        passed_area,
    );
}

fn render_suggestions(app: &mut App, frame: &mut Frame, area: Rect) {
    let editing = app.editing == Some(EditTarget::Notes);
    let block = pane_block("Suggestions", app.focus == FocusPane::Content || editing);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [help_area, notes_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new("Anything else? Allergies, places to avoid, surprises... (optional)")
            .style(dim())
            .wrap(Wrap { trim: true }),
        help_area,
    );

    let notes_block = Block::default()
        .borders(Borders::ALL)
        .border_style(if editing {
            Style::default().fg(Color::Yellow)
        } else {
            dim()
        });
    let notes_inner = notes_block.inner(notes_area);

    let (line, col) = app.notes_input.line_col();
    // Keep the cursor line in view
    let scroll = (line as u16).saturating_sub(notes_inner.height.saturating_sub(1));

    let text = if app.notes_input.as_str().is_empty() && !editing {
        Text::styled("Press i to write notes.", dim())
    } else {
        Text::raw(app.notes_input.as_str().to_string())
    };
    frame.render_widget(
        Paragraph::new(text).block(notes_block).scroll((scroll, 0)),
        notes_area,
    );

    if editing && notes_inner.width > 0 {
        let x = notes_inner.x + (col as u16).min(notes_inner.width - 1);
        let y = notes_inner.y + line as u16 - scroll;
        frame.set_cursor_position((x, y));
    }
}

fn render_summary(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = pane_block("Summary", app.focus == FocusPane::Content);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [picks_area, form_area] = Layout::vertical([
        Constraint::Min(6),
        Constraint::Length(7),
    ])
    .areas(inner);

    let session = &app.session;
    let mut lines = Vec::new();

    if session.all_complete() {
        lines.push(Line::styled("All categories completed!", Style::default().fg(Color::Green).bold()));
    } else {
        lines.push(Line::styled(
            format!(
                "Only {} of {} categories are done. Missing ones show as -.",
                session.completed_count(),
                session.catalog().len()
            ),
            Style::default().fg(Color::Yellow),
        ));
    }
    lines.push(Line::raw(""));

    let catalog = session.catalog();
    for ((category, value), id) in category_lines(session).into_iter().zip(catalog.ids()) {
        let mut spans = vec![
            Span::styled(format!("{}: ", category), Style::default().bold()),
            Span::raw(value),
        ];
        if let Some(choice) = session.selection(id).chosen().first() {
            if let ImageStatus::Missing { .. } = images::locate(&app.images_dir, &choice.image) {
                spans.push(Span::styled("  (image missing)", dim()));
            }
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(vec![
        Span::styled("Dietary needs: ", Style::default().bold()),
        Span::raw(catalog.dietary_needs().to_string()),
    ]));

    let notes = session.notes().trim();
    if !notes.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled("Suggestions:", Style::default().bold()));
        lines.extend(notes.lines().map(|l| Line::raw(l.to_string())));
    }

    if let Some(path) = &app.last_download {
        lines.push(Line::raw(""));
        lines.push(Line::styled(format!("Downloaded to {}", path.display()), dim()));
    }
    if session.email_sent() {
        lines.push(Line::styled("Email sent.", Style::default().fg(Color::Green)));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), picks_area);
    render_form(app, frame, form_area);
}

fn render_form(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .title(" Send it ")
        .border_style(dim());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [name_area, email_area, feedback_area, copy_area, _] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    let active = |field| app.editing == Some(EditTarget::Form(field));
    render_input_line(frame, name_area, "Your name:  ", &app.form.name, active(FormField::Name));
    render_input_line(frame, email_area, "Your email: ", &app.form.email, active(FormField::Email));
    render_input_line(frame, feedback_area, "Feedback:   ", &app.form.feedback, active(FormField::Feedback));

    let copy_style = if active(FormField::SendCopy) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let checkbox = if app.form.send_copy { "[x]" } else { "[ ]" };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", checkbox), copy_style),
            Span::styled("Send me a copy", copy_style),
        ])),
        copy_area,
    );
}

/// One labelled text field. Multi-line values show their last line.
fn render_input_line(frame: &mut Frame, area: Rect, label: &str, input: &TextInput, active: bool) {
    let value_style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let (line, col) = input.line_col();
    let shown = input.as_str().lines().nth(line).unwrap_or("").to_string();

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(label.to_string(), dim()),
            Span::styled(shown, value_style),
        ])),
        area,
    );

    if active && area.width > 0 {
        let x = area.x + (label.chars().count() + col).min(area.width as usize - 1) as u16;
        frame.set_cursor_position((x, area.y));
    }
}

fn image_line(dir: &std::path::Path, filename: &str) -> Line<'static> {
    let status = images::locate(dir, filename);
    let style = if status.is_missing() {
        Style::default().fg(Color::Red)
    } else {
        dim()
    };
    Line::styled(status.describe(filename, dir), style)
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let line = if app.is_sending() {
        let dots = ".".repeat(app.animation_frame as usize + 1);
        Line::styled(format!(" Sending{}", dots), Style::default().fg(Color::Yellow))
    } else if let Some(status) = &app.status {
        let color = match status.kind {
            StatusKind::Info => Color::Gray,
            StatusKind::Success => Color::Green,
            StatusKind::Warning => Color::Yellow,
            StatusKind::Error => Color::Red,
        };
        Line::styled(format!(" {}", status.text), Style::default().fg(color))
    } else {
        Line::raw("")
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };
    let mode_text = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Editing => " EDIT ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let pairs: Vec<(&str, &str)> = match (app.input_mode, app.editing) {
        (InputMode::Editing, Some(EditTarget::CustomLabel | EditTarget::CustomImage)) => {
            vec![("Enter", "use it"), ("Tab", "label/image"), ("Esc", "cancel")]
        }
        (InputMode::Editing, Some(EditTarget::Notes)) => vec![("Enter", "newline"), ("Esc", "done")],
        (InputMode::Editing, Some(EditTarget::Form(FormField::SendCopy))) => {
            vec![("Space", "toggle"), ("Enter", "send"), ("Tab", "next"), ("Esc", "done")]
        }
        (InputMode::Editing, _) => vec![("Tab", "next"), ("S-Tab", "prev"), ("Esc", "done")],
        (InputMode::Normal, _) if app.focus == FocusPane::Sidebar => {
            vec![("j/k", "nav"), ("Enter", "open"), ("Tab", "content"), ("q", "quit")]
        }
        (InputMode::Normal, _) => {
            let mut pairs = match (app.page(), app.flow()) {
                (Page::Home, _) => vec![("j/k", "nav"), ("Enter", "open")],
                (Page::Category(_), Flow::Submit) => vec![
                    ("j/k", "nav"),
                    ("Enter", "pick"),
                    ("c", "custom"),
                    ("i", "image"),
                    ("s", "submit"),
                    ("Esc", "home"),
                ],
                (Page::Category(_), Flow::Swipe) => {
                    vec![("y/→", "like"), ("n/←", "pass"), ("Esc", "home")]
                }
                (Page::Suggestions, _) => vec![("i", "write"), ("Esc", "home")],
                (Page::Summary, _) => vec![
                    ("d", "download"),
                    ("f", "form"),
                    ("S", "send"),
                    ("R", "reset"),
                ],
            };
            pairs.extend([("1-9", "jump"), ("Tab", "pages"), ("q", "quit")]);
            pairs
        }
    };

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    for (key, label) in pairs {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use date_planner_core::{Catalog, Config, Swipe};
    use ratatui::{backend::TestBackend, Terminal};

    fn test_app(flow: Flow) -> (App, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            flow: Some(flow),
            images_dir: Some(dir.path().to_path_buf()),
            download_dir: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        (App::new(config, Catalog::builtin()), dir)
    }

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_home_lists_categories() {
        let (mut app, _dir) = test_app(Flow::Submit);
        let screen = draw(&mut app);
        assert!(screen.contains("Date Planner"));
        assert!(screen.contains("Vibe"));
        assert!(screen.contains("0 of 4 categories done"));
        assert!(app.sidebar_area.is_some());
        assert!(app.content_area.is_some());
    }

    #[test]
    fn test_missing_image_is_reported() {
        let (mut app, _dir) = test_app(Flow::Submit);
        app.home_enter();
        app.pick_highlighted();
        let screen = draw(&mut app);
        assert!(screen.contains("Picked: Roses"));
        assert!(screen.contains("Image not found"));
        assert!(screen.contains("Custom..."));
    }

    #[test]
    fn test_swipe_card_counter() {
        let (mut app, _dir) = test_app(Flow::Swipe);
        app.home_enter();
        app.swipe_current(Swipe::Like);
        let screen = draw(&mut app);
        assert!(screen.contains("Card 2 of 4"));
        assert!(screen.contains("Liked (1)"));
    }

    #[test]
    fn test_unfinished_swipe_summary_skips_image_check() {
        let (mut app, _dir) = test_app(Flow::Swipe);
        app.home_enter();
        app.swipe_current(Swipe::Like);
        app.go_to(Page::Summary);
        let screen = draw(&mut app);
        assert!(screen.contains("Flowers: -"));
        assert!(!screen.contains("(image missing)"));
    }

    #[test]
    fn test_summary_shows_placeholders() {
        let (mut app, _dir) = test_app(Flow::Submit);
        app.go_to(Page::Summary);
        let screen = draw(&mut app);
        assert!(screen.contains("Only 0 of 4 categories are done"));
        assert!(screen.contains("Flowers: -"));
        assert!(screen.contains("Dietary needs: Vegetarian"));
        assert!(screen.contains("[x] Send me a copy"));
    }
}
