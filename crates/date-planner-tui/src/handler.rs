use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use date_planner_core::{Flow, Page, Swipe};
use crate::app::{App, EditTarget, FocusPane, FormField, InputMode};
use crate::tui::AppEvent;

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => {
            app.tick_animation();
            app.poll_delivery().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            app.focus = match app.focus {
                FocusPane::Sidebar => FocusPane::Content,
                FocusPane::Content => FocusPane::Sidebar,
            };
            return;
        }
        // Sidebar shortcuts: 1 = Home, 2.. = categories, then Suggestions, Summary
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.jump_to_index(index);
            return;
        }
        _ => {}
    }

    if app.focus == FocusPane::Sidebar {
        handle_sidebar(app, key);
        return;
    }

    match app.page() {
        Page::Home => handle_home(app, key),
        Page::Category(_) => match app.flow() {
            Flow::Submit => handle_category_submit(app, key),
            Flow::Swipe => handle_category_swipe(app, key),
        },
        Page::Suggestions => handle_suggestions(app, key),
        Page::Summary => handle_summary(app, key),
    }
}

fn handle_sidebar(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.sidebar_down(),
        KeyCode::Char('k') | KeyCode::Up => app.sidebar_up(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.sidebar_enter(),
        KeyCode::Esc => app.focus = FocusPane::Content,
        _ => {}
    }
}

fn handle_home(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.home_down(),
        KeyCode::Char('k') | KeyCode::Up => app.home_up(),
        KeyCode::Enter | KeyCode::Char('l') | KeyCode::Right => app.home_enter(),
        _ => {}
    }
}

fn handle_category_submit(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.option_down(),
        KeyCode::Char('k') | KeyCode::Up => app.option_up(),
        KeyCode::Enter | KeyCode::Char(' ') => app.pick_highlighted(),
        KeyCode::Char('c') => app.start_editing(EditTarget::CustomLabel),
        KeyCode::Char('i') => app.start_editing(EditTarget::CustomImage),
        KeyCode::Char('s') => app.commit_current(),
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Backspace => app.go_to(Page::Home),
        _ => {}
    }
}

fn handle_category_swipe(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Right => app.swipe_current(Swipe::Like),
        KeyCode::Char('n') | KeyCode::Left => app.swipe_current(Swipe::Pass),
        KeyCode::Esc | KeyCode::Backspace => app.go_to(Page::Home),
        _ => {}
    }
}

fn handle_suggestions(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => app.start_editing(EditTarget::Notes),
        KeyCode::Esc => app.go_to(Page::Home),
        _ => {}
    }
}

fn handle_summary(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('d') => app.download_summary(),
        KeyCode::Char('f') => app.start_editing(EditTarget::Form(FormField::Name)),
        KeyCode::Char('S') => app.start_submission(),
        KeyCode::Char('R') => app.reset(),
        KeyCode::Esc => app.go_to(Page::Home),
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    let Some(target) = app.editing else {
        app.input_mode = InputMode::Normal;
        return;
    };

    match target {
        EditTarget::CustomLabel | EditTarget::CustomImage => handle_custom_editing(app, key),
        EditTarget::Notes => handle_notes_editing(app, key),
        EditTarget::Form(field) => handle_form_editing(app, field, key),
    }
}

fn handle_custom_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Enter => {
            app.apply_custom();
            app.stop_editing();
        }
        KeyCode::Tab => {
            let next = match app.editing {
                Some(EditTarget::CustomLabel) => EditTarget::CustomImage,
                _ => EditTarget::CustomLabel,
            };
            app.start_editing(next);
        }
        _ => edit_text(app, key),
    }
}

fn handle_notes_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Enter => {
            app.notes_input.insert('\n');
            app.sync_notes();
        }
        _ => {
            edit_text(app, key);
            app.sync_notes();
        }
    }
}

fn handle_form_editing(app: &mut App, field: FormField, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.stop_editing(),
        KeyCode::Tab | KeyCode::Down => app.start_editing(EditTarget::Form(field.next())),
        KeyCode::BackTab | KeyCode::Up => app.start_editing(EditTarget::Form(field.prev())),
        KeyCode::Enter => match field {
            FormField::Feedback => app.form.feedback.insert('\n'),
            FormField::SendCopy => {
                app.stop_editing();
                app.start_submission();
            }
            _ => app.start_editing(EditTarget::Form(field.next())),
        },
        KeyCode::Char(' ') if field == FormField::SendCopy => {
            app.form.send_copy = !app.form.send_copy;
        }
        _ => edit_text(app, key),
    }
}

/// Cursor movement and typing shared by every text field.
fn edit_text(app: &mut App, key: KeyEvent) {
    let Some(input) = app.editing_input() else { return };
    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        KeyCode::Char(c) => input.insert(c),
        _ => {}
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let x = mouse.column;
    let y = mouse.row;

    let in_sidebar = app.sidebar_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);
    let in_content = app.content_area.map(|r| point_in_rect(x, y, r)).unwrap_or(false);

    match mouse.kind {
        MouseEventKind::ScrollDown => {
            if in_sidebar {
                app.sidebar_down();
            } else if in_content {
                match app.page() {
                    Page::Home => app.home_down(),
                    Page::Category(_) if app.flow() == Flow::Submit => app.option_down(),
                    _ => {}
                }
            }
        }
        MouseEventKind::ScrollUp => {
            if in_sidebar {
                app.sidebar_up();
            } else if in_content {
                match app.page() {
                    Page::Home => app.home_up(),
                    Page::Category(_) if app.flow() == Flow::Submit => app.option_up(),
                    _ => {}
                }
            }
        }
        _ => {}
    }
}
