use iced::widget::scrollable;
use iced::widget::text_editor::{Action, Edit, Motion};
use iced::{Task, keyboard};
use std::sync::Arc;

use uaide_core::pairing::{self, TypeAction};

use super::{App, Message, Shortcut};
use crate::app::view::LOG_SCROLL;

impl App {
    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::EditorAction(action) => {
                self.perform(action);
                self.refresh_completions();
            }

            Message::Undo => {
                if self.source.undo() {
                    self.refresh_completions();
                }
            }

            Message::Redo => {
                if self.source.redo() {
                    self.refresh_completions();
                }
            }

            Message::SuggestionPicked(index) => self.accept_suggestion(index),

            Message::AcceptSuggestion => self.accept_suggestion(self.completions.selected()),

            Message::SuggestionNext => self.completions.select_next(),

            Message::SuggestionPrev => self.completions.select_prev(),

            Message::HideSuggestions => {
                self.completions.hide();
            }

            Message::Run => return self.start_run(),

            Message::RunFinished(outcome) => {
                self.running = false;
                if let Err(e) = outcome.as_ref() {
                    tracing::warn!(error = %e, "run failed");
                }
                self.console.finish_run(&outcome);
                return self.scroll_log_to_end();
            }

            Message::SaveAs => {
                let text = self.source.text();
                let name = self.source.name();
                return Task::perform(super::file_ops::save_as_dialog(text, name), Message::FileSaved);
            }

            Message::FileSaved(result) => {
                match result {
                    Ok(Some(path)) => {
                        tracing::info!(path = %path.display(), "saved");
                        self.console.saved(&path);
                        self.source.path = Some(path);
                        self.source.modified = false;
                    }
                    Ok(None) => return Task::none(),
                    Err(e) => {
                        tracing::warn!(error = %e, "save failed");
                        self.console.save_failed(e);
                    }
                }
                return self.scroll_log_to_end();
            }

            Message::ClearLog => self.console.clear(),

            Message::KeyPressed(key, modifiers) => {
                return self.handle_key_pressed(key, modifiers);
            }
        }
        Task::none()
    }

    pub fn handle_key_pressed(
        &mut self,
        key: keyboard::Key,
        modifiers: keyboard::Modifiers,
    ) -> Task<Message> {
        match Shortcut::from_key(&key, modifiers) {
            Some(Shortcut::Run) => self.update(Message::Run),
            Some(Shortcut::SaveAs) => self.update(Message::SaveAs),
            Some(Shortcut::Undo) => self.update(Message::Undo),
            Some(Shortcut::Redo) => self.update(Message::Redo),
            Some(Shortcut::HideSuggestions) => self.update(Message::HideSuggestions),
            None => Task::none(),
        }
    }

    /// Applies a widget action, routing typed characters through pairing.
    fn perform(&mut self, action: Action) {
        match action {
            Action::Edit(Edit::Insert(c))
                if self.config.editor.auto_pair && self.source.content.selection().is_none() =>
            {
                self.type_char(c);
            }
            action => {
                let is_edit = action.is_edit();
                if is_edit {
                    self.source.save_undo_state();
                }
                self.source.content.perform(action);
                if is_edit {
                    self.source.modified = true;
                }
            }
        }
    }

    fn type_char(&mut self, c: char) {
        let action = pairing::resolve(c, self.source.char_after_caret());
        tracing::trace!(?action, "typed {c:?}");

        match action {
            TypeAction::SkipOver => {
                self.source.content.perform(Action::Move(Motion::Right));
                return;
            }
            TypeAction::Insert(c) => {
                self.source.save_undo_state();
                self.source.content.perform(Action::Edit(Edit::Insert(c)));
            }
            TypeAction::InsertPair { open, close } => {
                self.source.save_undo_state();
                self.source.content.perform(Action::Edit(Edit::Insert(open)));
                self.source.content.perform(Action::Edit(Edit::Insert(close)));
                self.source.content.perform(Action::Move(Motion::Left));
            }
        }
        self.source.modified = true;
    }

    fn accept_suggestion(&mut self, index: usize) {
        let Some(suggestion) = self.completions.get(index).copied() else {
            return;
        };
        let fragment_len = self.completions.fragment().chars().count();
        tracing::debug!(keyword = suggestion.keyword, "completion accepted");

        self.source.save_undo_state();
        for _ in 0..fragment_len {
            self.source.content.perform(Action::Select(Motion::Left));
        }
        self.source
            .content
            .perform(Action::Edit(Edit::Paste(Arc::new(suggestion.keyword.to_string()))));
        self.source.modified = true;
        self.completions.dismiss(suggestion.keyword);
    }

    fn refresh_completions(&mut self) {
        let fragment = if self.config.editor.autocomplete {
            self.source.fragment()
        } else {
            String::new()
        };
        if self.completions.update(&self.completer, &fragment) {
            tracing::debug!(
                fragment = %fragment,
                count = self.completions.suggestions().len(),
                "suggestions changed"
            );
        }
    }

    fn start_run(&mut self) -> Task<Message> {
        if self.running {
            return Task::none();
        }
        self.running = true;
        self.console.run_started();

        let bridge = self.bridge.clone();
        let source = self.source.text();
        tracing::info!(program = bridge.program(), "run requested");

        Task::batch([
            Task::perform(async move { bridge.run(source).await }, |outcome| {
                Message::RunFinished(Arc::new(outcome))
            }),
            self.scroll_log_to_end(),
        ])
    }

    fn scroll_log_to_end(&self) -> Task<Message> {
        scrollable::snap_to(LOG_SCROLL.clone(), scrollable::RelativeOffset::END)
    }
}
