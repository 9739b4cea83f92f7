use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::domain::{Role, Transcript};

use super::app::{App, Screen};
use super::markdown::render_markdown;

const ACCENT: Color = Color::Rgb(99, 102, 241);
const MUTED: Style = Style::new().fg(Color::DarkGray);

const DISCLAIMER: &str = "LegalAssist provides general legal information based on Indian law. \
This is not a substitute for professional legal advice.";
const INPUT_HINT: &str =
    "Ask specific questions about Indian laws and regulations for the most accurate information";
const PLACEHOLDER: &str = "Ask a legal question...";

pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen() {
        Screen::Landing => draw_landing(frame, frame.area()),
        Screen::Chat => draw_chat(frame, app, frame.area()),
    }
}

/// Project the transcript into display lines. User text is shown as typed;
/// assistant text goes through the markdown table.
pub fn transcript_lines(transcript: &Transcript, pending: bool) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for message in transcript.messages() {
        match message.role() {
            Role::Assistant => {
                lines.push(Line::from(vec![
                    Span::styled("● ", Style::new().fg(ACCENT)),
                    Span::styled(
                        "LegalAssist",
                        Style::new().fg(ACCENT).add_modifier(Modifier::BOLD),
                    ),
                ]));
                lines.extend(render_markdown(message.content()));
                lines.push(
                    Line::styled(
                        "Indian Legal System",
                        Style::new().fg(ACCENT).add_modifier(Modifier::ITALIC),
                    )
                    .alignment(Alignment::Right),
                );
            }
            Role::User => {
                lines.push(
                    Line::styled("You", Style::new().fg(Color::White).add_modifier(Modifier::BOLD))
                        .alignment(Alignment::Right),
                );
                for text in message.content().lines() {
                    lines.push(
                        Line::styled(text.to_string(), Style::new().fg(Color::White))
                            .alignment(Alignment::Right),
                    );
                }
            }
        }
        lines.push(Line::default());
    }

    if pending {
        lines.push(Line::styled(
            "LegalAssist is typing...",
            MUTED.add_modifier(Modifier::ITALIC),
        ));
    }

    lines
}

fn draw_landing(frame: &mut Frame, area: Rect) {
    let [_, card, footer, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(11),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, card, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(56),
        Constraint::Fill(1),
    ])
    .areas(card);

    let lines = vec![
        Line::default(),
        Line::styled("⚖  LegalAssist", Style::new().fg(Color::White).add_modifier(Modifier::BOLD)),
        Line::styled("Your trusted companion for legal guidance", MUTED),
        Line::default(),
        Line::styled(
            "[ Begin Consultation ▸ ]",
            Style::new().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Line::styled("press Enter to start, Esc to quit", MUTED),
        Line::default(),
        Line::styled("Get professional legal information based on Indian law", MUTED),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(MUTED)),
        card,
    );
    frame.render_widget(
        Paragraph::new(Line::styled("© 2025 LegalAssist • All rights reserved", MUTED))
            .alignment(Alignment::Center),
        footer,
    );
}

fn draw_chat(frame: &mut Frame, app: &App, area: Rect) {
    let conversation = app.conversation();
    let [header, transcript_area, input_area, hint, disclaimer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let reset_style = if conversation.is_pending() {
        MUTED
    } else {
        Style::new().fg(Color::Gray)
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                " LegalAssist Consultation ",
                Style::new().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled("Ctrl+R clear conversation", reset_style),
            Span::styled("  Esc back  Ctrl+C quit", MUTED),
        ])),
        header,
    );

    let transcript = Paragraph::new(transcript_lines(
        conversation.transcript(),
        conversation.is_pending(),
    ))
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(MUTED)
            .title(" Legal Information Assistant "),
    );
    let inner_height = transcript_area.height.saturating_sub(2) as usize;
    let total = transcript.line_count(transcript_area.width.saturating_sub(2));
    let max_offset = total.saturating_sub(inner_height);
    let offset = max_offset.saturating_sub(app.scroll_back() as usize);
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    frame.render_widget(transcript.scroll((offset, 0)), transcript_area);

    let input_line = if conversation.is_pending() {
        Line::styled("Waiting for LegalAssist...", MUTED.add_modifier(Modifier::ITALIC))
    } else if conversation.input().is_empty() {
        Line::styled(PLACEHOLDER, MUTED)
    } else {
        Line::raw(conversation.input().to_string())
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(ACCENT))
        .title(" Enter to send ");
    frame.render_widget(Paragraph::new(input_line).block(input_block), input_area);

    if !conversation.is_pending() {
        let typed = u16::try_from(conversation.input().chars().count()).unwrap_or(u16::MAX);
        let max_x = input_area.x + input_area.width.saturating_sub(2);
        let x = (input_area.x + 1).saturating_add(typed).min(max_x);
        frame.set_cursor_position((x, input_area.y + 1));
    }

    frame.render_widget(Paragraph::new(Line::styled(INPUT_HINT, MUTED)), hint);
    frame.render_widget(
        Paragraph::new(Line::styled(DISCLAIMER, MUTED)).alignment(Alignment::Center),
        disclaimer,
    );
}
