use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use newsdesk_core::{update, AppState, Msg, NEWS_SOURCES};
use newsdesk_logging::{newsdesk_info, newsdesk_warn};

use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{parse_command, Command, HELP};
use super::ui::render::{render, render_presets};

/// Everything the interaction loop reacts to.
pub enum AppEvent {
    User(Command),
    Engine(Msg),
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = config::load().context("failed to load configuration")?;
    logging::initialize(&config.log_settings());

    let settings = config.api_settings();
    newsdesk_info!("Starting newsdesk against backend {}", settings.base_url);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner =
        EffectRunner::new(settings, event_tx.clone()).context("failed to start request engine")?;
    spawn_input_reader(event_tx);

    let mut app = App::new(runner);
    app.print(HELP);
    app.render_now();

    while let Ok(event) = event_rx.recv() {
        match event {
            AppEvent::Engine(msg) => app.dispatch_msg(msg),
            AppEvent::User(Command::Quit) | AppEvent::InputClosed => break,
            AppEvent::User(command) => app.handle_command(command),
        }
    }

    newsdesk_info!("Shutting down");
    Ok(())
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    newsdesk_warn!("Failed to read input: {}", err);
                    break;
                }
            };
            if let Some(command) = parse_command(&line) {
                if event_tx.send(AppEvent::User(command)).is_err() {
                    return;
                }
            }
        }
        let _ = event_tx.send(AppEvent::InputClosed);
    });
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Send(msgs) => {
                for msg in msgs {
                    self.dispatch_msg(msg);
                }
            }
            Command::Open(position) => {
                let url = self
                    .state
                    .displayed_items()
                    .get(position - 1)
                    .map(|item| item.url.clone());
                match url {
                    Some(url) => self.dispatch_msg(Msg::ArticleRequested { url }),
                    None => self.print(&format!("There is no article #{position} in the list.")),
                }
            }
            Command::Presets => self.print(&render_presets(NEWS_SOURCES)),
            Command::Help => self.print(HELP),
            Command::Invalid(reason) => self.print(&reason),
            Command::Quit => {}
        }
    }

    fn dispatch_msg(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.enqueue(effects);
        if was_dirty {
            self.render_now();
        }
    }

    fn render_now(&self) {
        self.print(&render(&self.state.view()));
    }

    fn print(&self, text: &str) {
        let mut stdout = io::stdout().lock();
        let _ = writeln!(stdout, "{}", text.trim_end());
        let _ = stdout.flush();
    }
}
