//! Keyboard input dispatch — overlays → global keys → sidebar / tab keys.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{AppState, Overlay, SidebarItem, Tab};

const TABLE_PAGE: usize = 10;

pub fn handle_key(app: &mut AppState, key: KeyEvent) {
    // Only handle key press events (Windows sends both Press and Release).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // 1. Overlays consume input first.
    match app.overlay {
        Overlay::Help => {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?')
            ) {
                app.overlay = Overlay::None;
            }
            return;
        }
        Overlay::ErrorHistory => {
            handle_error_overlay(app, key);
            return;
        }
        Overlay::None => {}
    }

    // 2. Global keys.
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
            return;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
            return;
        }
        KeyCode::Char(c @ '1'..='4') => {
            if let Some(tab) = Tab::from_index(c as usize - '1' as usize) {
                app.active_tab = tab;
            }
            return;
        }
        KeyCode::Tab => {
            app.active_tab = app.active_tab.next();
            return;
        }
        KeyCode::BackTab => {
            app.active_tab = app.active_tab.prev();
            return;
        }
        KeyCode::Char('?') => {
            app.overlay = Overlay::Help;
            return;
        }
        KeyCode::Char('e') => {
            app.overlay = Overlay::ErrorHistory;
            app.error_scroll = 0;
            return;
        }
        KeyCode::Char('x') => {
            app.export();
            return;
        }
        _ => {}
    }

    // 3. Tab-specific keys.
    if app.active_tab == Tab::RawData && handle_table_key(app, key) {
        return;
    }

    // 4. Sidebar keys.
    handle_sidebar_key(app, key);
}

fn handle_error_overlay(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('e') => {
            app.overlay = Overlay::None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if app.error_scroll + 1 < app.error_history.len() {
                app.error_scroll += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.error_scroll = app.error_scroll.saturating_sub(1);
        }
        _ => {}
    }
}

/// Returns true when the key was consumed.
fn handle_table_key(app: &mut AppState, key: KeyEvent) -> bool {
    let last = app.view.table.len().saturating_sub(1);
    match key.code {
        KeyCode::PageDown => {
            app.table_scroll = (app.table_scroll + TABLE_PAGE).min(last);
        }
        KeyCode::PageUp => {
            app.table_scroll = app.table_scroll.saturating_sub(TABLE_PAGE);
        }
        KeyCode::Home => app.table_scroll = 0,
        KeyCode::End => app.table_scroll = last,
        _ => return false,
    }
    true
}

fn handle_sidebar_key(app: &mut AppState, key: KeyEvent) {
    let row_count = app.sidebar_row_count();

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            if app.sidebar_cursor + 1 < row_count {
                app.sidebar_cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.sidebar_cursor = app.sidebar_cursor.saturating_sub(1);
        }
        KeyCode::Char('h') | KeyCode::Left => match app.cursor_item() {
            Some(SidebarItem::YearFrom) => app.shift_year_from(-1),
            Some(SidebarItem::YearTo) => app.shift_year_to(-1),
            _ => {}
        },
        KeyCode::Char('l') | KeyCode::Right => match app.cursor_item() {
            Some(SidebarItem::YearFrom) => app.shift_year_from(1),
            Some(SidebarItem::YearTo) => app.shift_year_to(1),
            _ => {}
        },
        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(SidebarItem::Entity(name)) = app.cursor_item() {
                app.toggle_entity(&name);
            }
        }
        KeyCode::Char('a') => app.select_all(),
        KeyCode::Char('d') => app.clear_selection(),
        KeyCode::Char('r') => app.reset_filter(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use impact_core::{Dataset, Record};
    use impact_report::DashboardConfig;

    fn app() -> AppState {
        let ds = Dataset::from_records(
            vec![
                Record::new("China", 2019, 400.0, 1200.0, 0.8, 3),
                Record::new("US", 2020, 100.0, 500.0, 1.2, 5),
                Record::new("US", 2021, 200.0, 900.0, 0.9, 8),
            ],
            "mem.csv",
            "abc",
        )
        .unwrap();
        AppState::new(Arc::new(ds), &DashboardConfig::default())
    }

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn digits_switch_tabs() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.active_tab, Tab::Elite);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active_tab, Tab::RawData);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active_tab, Tab::Elite);
    }

    #[test]
    fn q_quits_but_closes_overlays_first() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.overlay, Overlay::Help);
        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.overlay, Overlay::None);
        assert!(app.running);
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }

    #[test]
    fn h_and_l_adjust_the_focused_year() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.filter.years.lo, 2020);
        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Char('h'));
        assert_eq!(app.filter.years.hi, 2020);
        assert_eq!(app.view.summary.total_documents, 100.0);
    }

    #[test]
    fn space_toggles_the_entity_under_the_cursor() {
        let mut app = app();
        for _ in 0..3 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.cursor_item(), Some(SidebarItem::Entity("US".into())));
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.filter.is_selected("US"));
        assert_eq!(app.view.summary.top_producer.as_deref(), Some("China"));
    }

    #[test]
    fn cursor_stops_at_the_last_row() {
        let mut app = app();
        for _ in 0..10 {
            press(&mut app, KeyCode::Down);
        }
        assert_eq!(app.sidebar_cursor, 3);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        handle_key(&mut app, key);
        assert!(app.running);
    }
}
