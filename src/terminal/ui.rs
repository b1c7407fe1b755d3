use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use unicode_width::UnicodeWidthStr;

use crate::terminal::form::Slot;
use crate::terminal::keys::{FORM_HINTS, LIST_HINTS};
use crate::terminal::screen::Screen;
use crate::terminal::state::{AppState, Status};
use crate::terminal::theme;

const HEADERS: [&str; 4] = ["Date", "Subject", "From", "Unread"];
const LABEL_WIDTH: usize = 9;

pub fn render(f: &mut Frame, state: &AppState) {
    let [title, main, status, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    f.render_widget(
        Paragraph::new(Line::from(format!(" {} ", state.screen.title())))
            .style(Style::default().add_modifier(Modifier::REVERSED)),
        title,
    );

    match state.screen {
        Screen::List => render_list(f, main, state),
        Screen::Reply | Screen::Compose => render_form(f, main, state),
    }

    render_status(f, status, state);
    render_footer(f, footer, state);
}

fn render_list(f: &mut Frame, area: Rect, state: &AppState) {
    let table_height = state.inbox.len() as u16 + 3;
    let [top, bottom] =
        Layout::vertical([Constraint::Length(table_height), Constraint::Fill(1)]).areas(area);

    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows = state.inbox.rows.iter().map(|r| {
        Row::new(vec![
            Cell::from(r.date.clone()),
            Cell::from(r.subject.clone()),
            Cell::from(r.from.clone()),
            Cell::from(if r.unread { "yes" } else { "no" }),
        ])
        .style(theme::row_style(r))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(19),
            Constraint::Fill(3),
            Constraint::Fill(2),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .column_spacing(1)
    .block(
        Block::default()
            .title(" Inbox ")
            .borders(Borders::ALL)
            .border_style(theme::border(true)),
    )
    .highlight_symbol("➜ ")
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    f.render_stateful_widget(table, top, &mut state.table_state.clone());

    let body_text = if state.body.is_empty() {
        if state.inbox.is_empty() {
            "No messages in the inbox.".to_string()
        } else {
            "Press Enter to read the highlighted message.".to_string()
        }
    } else {
        state.body.clone()
    };

    let body = Paragraph::new(body_text)
        .block(
            Block::default()
                .title(" Message ")
                .borders(Borders::ALL)
                .border_style(theme::border(state.selected.is_some())),
        )
        .scroll((state.body_scroll, 0));
    f.render_widget(body, bottom);
}

fn render_form(f: &mut Frame, area: Rect, state: &AppState) {
    let preview_height = if state.screen == Screen::Reply {
        Constraint::Fill(1)
    } else {
        Constraint::Length(0)
    };
    let [to, subject, preview, sep, b0, b1, b2, b3, buttons, _rest] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        preview_height,
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Fill(if state.screen == Screen::Reply { 0 } else { 1 }),
    ])
    .areas(area);

    let to_label = if state.screen == Screen::Reply {
        "To"
    } else {
        "Email To"
    };
    input(f, to, state, Slot::To, to_label);
    input(f, subject, state, Slot::Subject, "Title");

    if state.screen == Screen::Reply {
        let p = Paragraph::new(state.reply_preview.as_str()).block(
            Block::default()
                .title(" Original message ")
                .borders(Borders::ALL)
                .border_style(theme::border(false)),
        );
        f.render_widget(p, preview);
    }

    f.render_widget(Paragraph::new("======================"), sep);
    for (i, rect) in [b0, b1, b2, b3].into_iter().enumerate() {
        input(f, rect, state, Slot::Body(i), "");
    }

    let button = |label: &'static str, slot: Slot| {
        let style = if state.form.focus == slot {
            Style::default().fg(theme::FOCUS).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        Span::styled(format!("[ {label} ]"), style)
    };
    let line = Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH + 1)),
        button("Send!", Slot::SendButton),
        Span::raw("  "),
        button("Cancel", Slot::CancelButton),
    ]);
    let [_, button_row] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(buttons);
    f.render_widget(Paragraph::new(line), button_row);
}

fn input(f: &mut Frame, area: Rect, state: &AppState, slot: Slot, label: &str) {
    let value = state.form.field(slot).unwrap_or_default();
    let focused = state.form.focus == slot;
    let label_style = if focused {
        Style::default().fg(theme::FOCUS).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme::UNFOCUSED)
    };
    let prefix = format!("{label:>LABEL_WIDTH$} ");
    let line = Line::from(vec![
        Span::styled(prefix.clone(), label_style),
        Span::raw(value.to_string()),
    ]);
    f.render_widget(Paragraph::new(line), area);

    if focused {
        f.set_cursor_position(Position::new(cursor_x(area, &prefix, value), area.y));
    }
}

/// Column just past `prefix` + `value`, clamped to the last cell of `area`.
fn cursor_x(area: Rect, prefix: &str, value: &str) -> u16 {
    let offset = prefix.width().saturating_add(value.width());
    let x = area.x.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
    x.min(area.right().saturating_sub(1))
}

fn render_status(f: &mut Frame, area: Rect, state: &AppState) {
    let line = match &state.status {
        Some(Status::Info(msg)) => Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(theme::ACCENT),
        )),
        Some(Status::Error(msg)) => Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(theme::ERROR),
        )),
        None => Line::default(),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_footer(f: &mut Frame, area: Rect, state: &AppState) {
    let hints = if state.screen.is_form() {
        FORM_HINTS
    } else {
        LIST_HINTS
    };
    let mut spans = Vec::new();
    for (key, label) in hints {
        if *key == "p" && !state.can_reply() {
            continue;
        }
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {label} ")));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
