use iced::widget::{Column, container, scrollable, text};
use iced::{Background, Element, Font, Length, Padding};

use super::LOG_SCROLL;
use crate::app::{App, Message};

impl App {
    /// The run and save log, newest entry at the bottom.
    pub fn view_log(&self) -> Element<'_, Message> {
        let colors = &self.theme.log;
        let size = self.config.ui.font_size;

        let lines = self.console.entries().iter().map(|entry| {
            text(entry.text.trim_end_matches('\n'))
                .size(size)
                .font(Font::MONOSPACE)
                .color(colors.for_kind(entry.kind).to_iced())
                .into()
        });

        let background = self.theme.background.log.to_iced();
        container(
            scrollable(
                Column::with_children(lines)
                    .spacing(2)
                    .padding(Padding::new(8.0))
                    .width(Length::Fill),
            )
            .id(LOG_SCROLL.clone())
            .height(Length::Fill),
        )
        .width(Length::Fill)
        .height(self.config.ui.log_height)
        .style(move |_| container::Style {
            background: Some(Background::Color(background)),
            ..Default::default()
        })
        .into()
    }
}
