use crate::backend::Backend;
use crate::config::Config;
use crate::entities::{AuditRecord, EntityKind, Issue, Project, View};
use crate::grid::PageSize;
use crate::logger::Logger;
use crate::ui::components::status_bar::{StatusLine, DASHBOARD_HINTS};
use crate::ui::components::{DashboardComponent, DialogComponent, EntityPage, SidebarComponent, StatusBar};
use crate::ui::core::{
    actions::{Action, DialogType},
    event_handler::EventType,
    task_manager::TaskManager,
    Component,
};
use crate::ui::layout::LayoutManager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info};
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// The page currently mounted in the content area. Navigating replaces it,
/// so every visit starts with fresh filters, rows and sync state.
pub enum ActivePage {
    Dashboard(DashboardComponent),
    Projects(EntityPage<Project>),
    Issues(EntityPage<Issue>),
    Audit(EntityPage<AuditRecord>),
}

impl ActivePage {
    pub fn mount(view: View, page_size: PageSize) -> Self {
        match view {
            View::Dashboard => Self::Dashboard(DashboardComponent::new()),
            View::Entity(EntityKind::Projects) => Self::Projects(EntityPage::new(page_size)),
            View::Entity(EntityKind::Issues) => Self::Issues(EntityPage::new(page_size)),
            View::Entity(EntityKind::Audit) => Self::Audit(EntityPage::new(page_size)),
        }
    }

    pub fn view(&self) -> View {
        match self {
            Self::Dashboard(_) => View::Dashboard,
            Self::Projects(_) => View::Entity(EntityKind::Projects),
            Self::Issues(_) => View::Entity(EntityKind::Issues),
            Self::Audit(_) => View::Entity(EntityKind::Audit),
        }
    }

    pub fn component(&mut self) -> &mut dyn Component {
        match self {
            Self::Dashboard(page) => page,
            Self::Projects(page) => page,
            Self::Issues(page) => page,
            Self::Audit(page) => page,
        }
    }

    /// True while the page's filter inputs capture the keyboard
    pub fn is_editing(&self) -> bool {
        match self {
            Self::Dashboard(_) => false,
            Self::Projects(page) => page.is_editing(),
            Self::Issues(page) => page.is_editing(),
            Self::Audit(page) => page.is_editing(),
        }
    }

    pub fn status_line(&self, now: Instant) -> StatusLine<'_> {
        match self {
            Self::Dashboard(_) => StatusLine::Hints(DASHBOARD_HINTS),
            Self::Projects(page) => page.status_line(now),
            Self::Issues(page) => page.status_line(now),
            Self::Audit(page) => page.status_line(now),
        }
    }
}

pub struct AppComponent {
    // Component composition
    sidebar: SidebarComponent,
    page: ActivePage,
    dialog: DialogComponent,

    // Services
    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,

    // Settings
    page_size: PageSize,
    mouse_enabled: bool,

    // Simple UI state
    should_quit: bool,
}

impl AppComponent {
    pub fn new(backend: Arc<dyn Backend>, config: &Config, logger: Logger) -> Self {
        let page_size = PageSize::new(config.ui.default_page_size).unwrap_or_default();
        let view = config.default_view();
        let (task_manager, background_action_rx) = TaskManager::new(backend, config.export.resolve_directory());

        Self {
            sidebar: SidebarComponent::new(view),
            page: ActivePage::mount(view, page_size),
            dialog: DialogComponent::new(logger),
            task_manager,
            background_action_rx,
            page_size,
            mouse_enabled: config.ui.mouse_enabled,
            should_quit: false,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn current_view(&self) -> View {
        self.page.view()
    }

    /// Get the number of active background tasks
    pub fn active_task_count(&self) -> usize {
        self.task_manager.task_count()
    }

    /// Run the initial loads of the page mounted at startup
    pub fn start(&mut self) {
        info!("Starting on {}", self.page.view().label());
        let action = self.page.component().init();
        self.handle_app_action(action);
    }

    fn navigate(&mut self, view: View) {
        if view == self.page.view() {
            return;
        }
        info!("Navigation: {} -> {}", self.page.view().label(), view.label());
        self.sidebar.update(Action::NavigateTo(view));
        self.page = ActivePage::mount(view, self.page_size);
        let action = self.page.component().init();
        self.handle_app_action(action);
    }

    /// Handle global keyboard shortcuts that aren't component-specific
    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('q') => {
                info!("Global key: 'q' - quitting application");
                Action::Quit
            }
            KeyCode::Char('?') => Action::ShowDialog(DialogType::Help),
            KeyCode::Char('G') => Action::ShowDialog(DialogType::Logs),
            KeyCode::Tab => Action::NextView,
            KeyCode::BackTab => Action::PreviousView,
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                Action::NavigateTo(View::ALL[index])
            }
            _ => Action::None,
        }
    }

    /// Handle app-level actions that require services
    pub fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::None => Action::None,
            Action::Quit => {
                self.should_quit = true;
                self.task_manager.cancel_all_tasks();
                Action::None
            }
            Action::NavigateTo(view) => {
                self.navigate(view);
                Action::None
            }
            Action::NextView => {
                self.navigate(self.page.view().next());
                Action::None
            }
            Action::PreviousView => {
                self.navigate(self.page.view().previous());
                Action::None
            }
            Action::RunCommands {
                kind,
                instance,
                commands,
            } => {
                self.task_manager.run_commands(kind, instance, commands);
                Action::None
            }
            Action::RefreshDashboard => {
                self.task_manager.spawn_counts();
                Action::None
            }
            Action::ShowDialog(_) | Action::HideDialog => self.dialog.update(action),
            result => {
                let target = result.target();
                let follow_up = self.page.component().update(result);
                match follow_up {
                    Action::RunCommands { .. } => self.handle_app_action(follow_up),
                    Action::None => Action::None,
                    _ => {
                        // Results for a page that is no longer mounted
                        debug!("Dropping background result for {:?}", target);
                        Action::None
                    }
                }
            }
        }
    }

    /// Process background actions from task manager
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();

        // Process all available background actions
        while let Ok(action) = self.background_action_rx.try_recv() {
            actions.push(action);
        }

        // Clean up finished tasks
        self.task_manager.cleanup_finished_tasks();

        actions
    }

    /// Process an event through the component hierarchy
    pub fn handle_event(&mut self, event_type: EventType) -> anyhow::Result<()> {
        match event_type {
            EventType::Key(key) => {
                let action = if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    Action::Quit
                } else if self.dialog.is_visible() {
                    // Dialog has priority when visible
                    self.dialog.handle_key_events(key)
                } else if self.page.is_editing() {
                    self.page.component().handle_key_events(key)
                } else {
                    match self.handle_global_key(key) {
                        Action::None => self.page.component().handle_key_events(key),
                        global => global,
                    }
                };
                self.handle_app_action(action);
            }
            EventType::Mouse(mouse) => {
                if self.mouse_enabled && !self.dialog.is_visible() {
                    let action = match self.sidebar.handle_mouse_events(mouse) {
                        Action::None => self.page.component().handle_mouse_events(mouse),
                        action => action,
                    };
                    self.handle_app_action(action);
                }
            }
            EventType::Tick => {
                for action in self.process_background_actions() {
                    self.handle_app_action(action);
                }
                let action = self.page.component().on_tick(Instant::now());
                self.handle_app_action(action);
            }
            EventType::Resize(_, _) | EventType::Other => {}
        }
        Ok(())
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        // This shouldn't be called directly - use handle_event instead
        self.handle_global_key(key)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let (sidebar_area, content_area, status_area) = LayoutManager::main_layout(rect);

        self.sidebar.render(f, sidebar_area);
        self.page.component().render(f, content_area);
        StatusBar::render(f, status_area, self.page.status_line(Instant::now()));

        // Render dialog on top if visible (includes help dialog)
        if self.dialog.is_visible() {
            self.dialog.render(f, rect);
        }
    }
}
