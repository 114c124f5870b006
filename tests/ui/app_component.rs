use crate::support::{buffer_text, char_key, key, MockBackend};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use jiraboard::config::Config;
use jiraboard::entities::{EntityKind, View};
use jiraboard::logger::Logger;
use jiraboard::ui::core::{Component, EventType};
use jiraboard::ui::AppComponent;
use ratatui::{backend::TestBackend, Terminal};
use std::sync::Arc;

fn app() -> AppComponent {
    let config = Config::default();
    let mut app = AppComponent::new(Arc::new(MockBackend::default()), &config, Logger::new());
    app.start();
    app
}

fn press(app: &mut AppComponent, event: KeyEvent) {
    app.handle_event(EventType::Key(event)).unwrap();
}

#[tokio::test]
async fn test_starts_on_configured_view() {
    let mut config = Config::default();
    config.ui.default_view = "audit".to_string();
    let app = AppComponent::new(Arc::new(MockBackend::default()), &config, Logger::new());
    assert_eq!(app.current_view(), View::Entity(EntityKind::Audit));
}

#[tokio::test]
async fn test_view_navigation_keys() {
    let mut app = app();
    assert_eq!(app.current_view(), View::Dashboard);

    press(&mut app, char_key('3'));
    assert_eq!(app.current_view(), View::Entity(EntityKind::Issues));

    press(&mut app, key(KeyCode::Tab));
    assert_eq!(app.current_view(), View::Entity(EntityKind::Audit));

    press(&mut app, key(KeyCode::Tab));
    assert_eq!(app.current_view(), View::Dashboard);

    press(&mut app, key(KeyCode::BackTab));
    assert_eq!(app.current_view(), View::Entity(EntityKind::Audit));
}

#[tokio::test]
async fn test_navigation_starts_background_loads() {
    let mut app = app();
    press(&mut app, char_key('2'));
    // Dashboard counts plus filter options and first page of projects
    assert!(app.active_task_count() >= 2);
}

#[tokio::test]
async fn test_global_keys_are_suppressed_while_editing_filters() {
    let mut app = app();
    press(&mut app, char_key('2'));
    press(&mut app, char_key('/'));

    // Typed into the filter instead of quitting or switching views
    press(&mut app, char_key('q'));
    press(&mut app, char_key('3'));
    assert!(!app.should_quit());
    assert_eq!(app.current_view(), View::Entity(EntityKind::Projects));

    press(&mut app, key(KeyCode::Esc));
    press(&mut app, char_key('q'));
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_ctrl_c_always_quits() {
    let mut app = app();
    press(&mut app, char_key('2'));
    press(&mut app, char_key('/'));
    press(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit());
}

#[tokio::test]
async fn test_help_dialog_takes_keys_first() {
    let mut app = app();
    press(&mut app, char_key('?'));

    let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
    terminal.draw(|f| app.render(f, f.area())).unwrap();
    assert!(buffer_text(&terminal).contains("NAVIGATION"));

    // Navigation keys do not reach the app while the dialog is open
    press(&mut app, char_key('2'));
    assert_eq!(app.current_view(), View::Dashboard);

    press(&mut app, key(KeyCode::Esc));
    press(&mut app, char_key('2'));
    assert_eq!(app.current_view(), View::Entity(EntityKind::Projects));
}

#[tokio::test]
async fn test_renders_sidebar_and_status_bar() {
    let mut app = app();
    let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
    terminal.draw(|f| app.render(f, f.area())).unwrap();

    let text = buffer_text(&terminal);
    assert!(text.contains("Navigation"));
    assert!(text.contains("Dashboard"));
    assert!(text.contains("R: refresh"));
}
