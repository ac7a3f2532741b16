use iced::keyboard::{self, key::Named};
use iced::widget::text_editor::{Binding, KeyPress};
use iced::widget::{Column, button, container, row, scrollable, text, text_editor};
use iced::{Background, Border, Color, Element, Font, Length, Padding, Theme};

use crate::app::{App, Message};
use crate::highlighter::KeywordHighlighter;

impl App {
    pub fn view_editor_area(&self) -> Element<'_, Message> {
        row![self.view_editor()]
            .push_maybe(self.completions.is_visible().then(|| self.view_suggestions()))
            .height(Length::Fill)
            .into()
    }

    pub fn view_editor(&self) -> Element<'_, Message> {
        let editor_bg = self.theme.background.editor.to_iced();
        let value = self.theme.foreground.primary.to_iced();
        let muted = self.theme.foreground.muted.to_iced();
        let selection = self.theme.background.selection.to_iced();
        let popup_open = self.completions.is_visible();

        text_editor(&self.source.content)
            .height(Length::Fill)
            .padding(Padding::new(12.0))
            .font(Font::MONOSPACE)
            .size(self.config.ui.font_size)
            .style(move |_theme: &Theme, _status| text_editor::Style {
                background: Background::Color(editor_bg),
                border: Border {
                    width: 0.0,
                    radius: 0.0.into(),
                    color: Color::TRANSPARENT,
                },
                icon: muted,
                placeholder: muted,
                value,
                selection,
            })
            .highlight_with::<KeywordHighlighter>(self.highlight, |highlight, _theme| {
                highlight.to_format(Font::MONOSPACE)
            })
            .key_binding(move |key_press| popup_binding(popup_open, key_press))
            .on_action(Message::EditorAction)
            .into()
    }

    pub fn view_suggestions(&self) -> Element<'_, Message> {
        let accent = self.theme.foreground.accent.to_iced();
        let value = self.theme.foreground.primary.to_iced();
        let background = self.theme.background.log.to_iced();
        let border = self.theme.ui.border.to_iced();

        let items = self
            .completions
            .suggestions()
            .iter()
            .enumerate()
            .map(|(index, suggestion)| {
                let selected = index == self.completions.selected();
                button(text(suggestion.label()).size(13).font(Font::MONOSPACE))
                    .width(Length::Fill)
                    .padding(Padding::from([3, 8]))
                    .style(move |_, status| {
                        let bg = match (selected, status) {
                            (true, _) => accent,
                            (false, button::Status::Hovered) => Color { a: 0.4, ..accent },
                            _ => Color::TRANSPARENT,
                        };
                        button::Style {
                            background: Some(Background::Color(bg)),
                            text_color: value,
                            ..Default::default()
                        }
                    })
                    .on_press(Message::SuggestionPicked(index))
                    .into()
            });

        container(scrollable(Column::with_children(items)))
            .width(240)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(background)),
                border: Border {
                    color: border,
                    width: 1.0,
                    radius: 0.0.into(),
                },
                ..Default::default()
            })
            .into()
    }
}

/// While suggestions are shown, arrows move the selection, Enter or Tab
/// accepts and Escape hides. Everything else keeps its default meaning.
fn popup_binding(popup_open: bool, key_press: KeyPress) -> Option<Binding<Message>> {
    if popup_open && key_press.modifiers.is_empty() {
        let message = match &key_press.key {
            keyboard::Key::Named(Named::ArrowDown) => Some(Message::SuggestionNext),
            keyboard::Key::Named(Named::ArrowUp) => Some(Message::SuggestionPrev),
            keyboard::Key::Named(Named::Enter | Named::Tab) => Some(Message::AcceptSuggestion),
            keyboard::Key::Named(Named::Escape) => Some(Message::HideSuggestions),
            _ => None,
        };
        if let Some(message) = message {
            return Some(Binding::Custom(message));
        }
    }
    Binding::from_key_press(key_press)
}
