use crate::config::AppConfig;
use crate::data::KlineSource;
use crate::pipeline::run_pipeline;
use crate::ui::LayoutManager;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Refresh,
    Quit,
}

pub struct App<S> {
    source: S,
    layout: LayoutManager,
    config: AppConfig,
}

impl<S: KlineSource> App<S> {
    pub fn new(source: S, config: AppConfig) -> Self {
        let layout = LayoutManager::new(config.watchlist.clone(), config.selected.clone());
        Self {
            source,
            layout,
            config,
        }
    }

    /// Current config with the sidebar's selection folded back in.
    pub fn config(&self) -> AppConfig {
        AppConfig {
            selected: self.layout.sidebar.selected.clone(),
            ..self.config.clone()
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Action {
        let sidebar = &mut self.layout.sidebar;
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Up | KeyCode::Char('k') => {
                sidebar.move_up();
                Action::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                sidebar.move_down();
                Action::None
            }
            KeyCode::Char(' ') | KeyCode::Enter => {
                if sidebar.toggle() {
                    Action::Refresh
                } else {
                    Action::None
                }
            }
            KeyCode::Char('a') => refresh_if(sidebar.set_all(true)),
            KeyCode::Char('n') => refresh_if(sidebar.set_all(false)),
            KeyCode::Char('r') => Action::Refresh,
            _ => Action::None,
        }
    }

    /// Runs the whole pipeline again for the current selection.
    pub async fn refresh(&mut self) {
        let symbols = self.layout.sidebar.selected_symbols();
        let report = run_pipeline(&self.source, &symbols).await;
        if report.is_empty() {
            info!(skipped = ?report.skipped, "no selected pair produced data");
        }
        self.layout.update_report(report);
    }

    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> std::io::Result<()> {
        info!("dashboard started");
        self.redraw_loading(terminal)?;
        self.refresh().await;

        loop {
            terminal.draw(|f| self.layout.render(f, f.area()))?;

            if !event::poll(Duration::from_millis(250))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match self.handle_key(key.code) {
                Action::Quit => break,
                Action::Refresh => {
                    debug!(selection = ?self.layout.sidebar.selected_symbols(), "selection changed");
                    self.redraw_loading(terminal)?;
                    self.refresh().await;
                }
                Action::None => {}
            }
        }

        info!("dashboard stopped");
        Ok(())
    }

    fn redraw_loading<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> std::io::Result<()> {
        self.layout.set_loading(true);
        terminal.draw(|f| self.layout.render(f, f.area()))?;
        Ok(())
    }
}

fn refresh_if(changed: bool) -> Action {
    if changed {
        Action::Refresh
    } else {
        Action::None
    }
}
