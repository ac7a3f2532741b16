use iced::{Subscription, Task, keyboard};

use uaide_core::config::Config;
use uaide_core::{Completer, CompletionState, Console, ExecutionBridge, LogKind};

use crate::highlighter::HighlightSettings;
use crate::theme::Theme;

pub mod file_ops;
pub mod messages;
pub mod types;
pub mod update;
pub mod view;

pub use messages::*;
pub use types::*;

const APP_TITLE: &str = "Українська Python IDE";

pub struct App {
    pub source: SourceState,
    pub config: Config,
    pub theme: Theme,
    pub highlight: HighlightSettings,
    pub completer: Completer<'static>,
    pub completions: CompletionState,
    pub console: Console,
    pub bridge: ExecutionBridge,
    pub running: bool,
}

impl App {
    pub fn new(flags: Flags) -> (Self, Task<Message>) {
        let Flags { file, config } = flags;
        let theme = Theme::resolve(&config.ui.theme);
        let max_history = config.editor.max_history;

        let mut app = Self {
            source: SourceState::new("", max_history),
            highlight: HighlightSettings::from_theme(&theme),
            completer: Completer::builtin(config.editor.max_suggestions),
            completions: CompletionState::new(),
            console: Console::new(),
            bridge: ExecutionBridge::from_config(&config.runner),
            running: false,
            theme,
            config,
        };

        if let Some(path) = file {
            match file_ops::load_startup_file(&path) {
                Ok(text) => {
                    tracing::info!(path = %path.display(), "opened");
                    app.source = SourceState::from_file(path, &text, max_history);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "cannot open file");
                    app.console.push(LogKind::Error, format!("Помилка відкриття: {e}"));
                }
            }
        }

        (app, Task::none())
    }

    pub fn title(&self) -> String {
        let modified = if self.source.modified { " *" } else { "" };
        format!("{}{} - {}", self.source.name(), modified, APP_TITLE)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|key, modifiers| Some(Message::KeyPressed(key, modifiers)))
    }

    pub fn iced_theme(&self) -> iced::Theme {
        self.theme.iced()
    }
}

pub fn run(flags: Flags) -> iced::Result {
    let size = iced::Size::new(flags.config.ui.window_width, flags.config.ui.window_height);

    iced::application(App::title, App::update, App::view)
        .subscription(App::subscription)
        .window_size(size)
        .theme(App::iced_theme)
        .antialiasing(true)
        .run_with(move || App::new(flags))
}
