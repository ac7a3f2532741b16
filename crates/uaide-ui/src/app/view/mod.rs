pub mod editor;
pub mod log;

use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Background, Border, Element, Length, Padding};
use iced::widget::scrollable;
use std::sync::LazyLock;

use crate::app::{App, Message};
use crate::theme::Theme;

/// Id of the output log, used to keep it scrolled to the newest line.
pub static LOG_SCROLL: LazyLock<scrollable::Id> = LazyLock::new(|| scrollable::Id::new("log"));

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let content = column![
            self.view_editor_area(),
            self.view_log(),
            self.view_buttons(),
        ];

        let background = self.theme.background.panel.to_iced();
        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(move |_| container::Style {
                background: Some(Background::Color(background)),
                ..Default::default()
            })
            .into()
    }

    pub fn view_buttons(&self) -> Element<'_, Message> {
        let run_label = if self.running { "Виконується..." } else { "Запуск" };

        row![
            toolbar_button(&self.theme, run_label, (!self.running).then_some(Message::Run)),
            toolbar_button(&self.theme, "Зберегти як...", Some(Message::SaveAs)),
            horizontal_space(),
            toolbar_button(&self.theme, "Очистити", Some(Message::ClearLog)),
        ]
        .spacing(8)
        .padding(Padding::from([6, 8]))
        .into()
    }
}

fn toolbar_button<'a>(theme: &Theme, label: &'a str, on_press: Option<Message>) -> Element<'a, Message> {
    let idle = theme.ui.button.to_iced();
    let hover = theme.ui.button_hover.to_iced();
    let disabled = theme.ui.button_disabled.to_iced();
    let border = theme.ui.border.to_iced();
    let label_color = theme.foreground.primary.to_iced();
    let muted = theme.foreground.muted.to_iced();

    button(text(label).size(13))
        .padding(Padding::from([6, 16]))
        .style(move |_, status| {
            let (bg, fg) = match status {
                button::Status::Hovered | button::Status::Pressed => (hover, label_color),
                button::Status::Disabled => (disabled, muted),
                button::Status::Active => (idle, label_color),
            };
            button::Style {
                background: Some(Background::Color(bg)),
                text_color: fg,
                border: Border {
                    color: border,
                    width: 1.0,
                    radius: 3.0.into(),
                },
                ..Default::default()
            }
        })
        .on_press_maybe(on_press)
        .into()
}
