use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{
        Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row,
        Table, Wrap,
    },
};

use crate::app::AppState;
use crate::domains::auth::StatePermissionExt;
use crate::domains::nav::{self, NavEntry};
use crate::domains::users::{AlertKind, FormField, PageMode, UsersPageState};
use crate::infrastructure::constants::text;

const HEADER_HEIGHT: u16 = 3;

/// Draw the whole page: header, search and form on the left, the listing
/// on the right, key hints at the bottom, then any open overlay.
pub fn render(f: &mut Frame, state: &AppState, cart_items: usize) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(f.size());

    render_header(f, vertical[0], state, cart_items);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(vertical[1]);

    render_page(f, body[0], &state.users);
    render_table(f, body[1], &state.users);
    render_status(f, vertical[2], state);

    if let Some(selected) = state.header.menu {
        render_nav_menu(f, state, selected);
    }
    if state.header.user_dropdown_visible {
        render_user_dropdown(f);
    }
    if let PageMode::Modal { action } = state.users.mode {
        render_modal(f, action.prompt());
    }
    if let Some(alert) = &state.users.alert {
        render_alert(f, alert.kind, &alert.text);
    }
}

fn render_header(f: &mut Frame, area: Rect, state: &AppState, cart_items: usize) {
    let separator = Span::styled(" | ", Style::default().fg(Color::DarkGray));
    let mut spans = vec![Span::styled(
        text::APP_TITLE,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    for entry in nav::visible_entries(&state.permission_checker()) {
        spans.push(separator.clone());
        let label = match entry {
            NavEntry::Link { route, .. } if route == state.route => {
                Span::styled(route.label(), Style::default().add_modifier(Modifier::BOLD))
            }
            NavEntry::Dropdown { label, .. } => Span::raw(format!("{label} ▾")),
            other => Span::raw(other.label()),
        };
        spans.push(label);
    }

    spans.push(separator.clone());
    spans.push(Span::styled(
        format!("{}: {cart_items}", text::CART),
        Style::default().fg(Color::Yellow),
    ));
    spans.push(separator);
    spans.push(match &state.session.current {
        Some(user) => Span::styled(
            format!("{} ▾", user.name),
            Style::default().fg(Color::Green),
        ),
        None => Span::raw(text::LOGIN),
    });

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn render_page(f: &mut Frame, area: Rect, page: &UsersPageState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let availability = page.availability();

    let search_style = if availability.search {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search_text = if page.id_input.is_empty() {
        Span::styled(text::ID_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(page.id_input.as_str())
    };
    let search = Paragraph::new(Line::from(search_text)).block(
        Block::default()
            .title(format!("{} · Buscar (Enter)", text::PAGE_TITLE))
            .borders(Borders::ALL)
            .border_style(search_style),
    );
    f.render_widget(search, rows[0]);

    let button = |keys: &'static str, label: &'static str, enabled: bool| {
        let style = if enabled {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Span::styled(format!("[{keys}] {label}  "), style)
    };
    let actions = Paragraph::new(Line::from(vec![
        button("Ctrl-N", text::ACTION_CREATE, availability.create),
        button("Ctrl-E", text::ACTION_EDIT, availability.edit),
        button("Ctrl-D", text::ACTION_DELETE, availability.delete),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(actions, rows[1]);

    let focused = page.mode.focused_field();
    let lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|field| {
            let value = page.form.display_value(*field, page.reveal_password);
            let (marker, style) = if focused == Some(*field) {
                ("> ", Style::default().fg(Color::Yellow))
            } else if page.mode.is_editing() {
                ("  ", Style::default())
            } else {
                ("  ", Style::default().fg(Color::Gray))
            };
            Line::from(Span::styled(
                format!("{marker}{}: {value}", field.label()),
                style,
            ))
        })
        .collect();
    let form_title = match page.mode.pending_action() {
        Some(action) if action.edits_form() => "Usuario (editando)",
        _ => "Usuario",
    };
    let form = Paragraph::new(lines)
        .block(Block::default().title(form_title).borders(Borders::ALL));
    f.render_widget(form, rows[2]);

    if page.mode.shows_inline_confirm() {
        let confirm = Paragraph::new(Line::from(vec![
            Span::styled(
                format!("[Enter] {}", text::BUTTON_CONFIRM),
                Style::default().fg(Color::Green),
            ),
            Span::raw("   "),
            Span::styled(
                format!("[Esc] {}", text::BUTTON_CANCEL),
                Style::default().fg(Color::Red),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(confirm, rows[3]);
    }
}

fn render_table(f: &mut Frame, area: Rect, page: &UsersPageState) {
    let block = Block::default().title(text::TABLE_TITLE).borders(Borders::ALL);

    if page.users.is_empty() {
        let empty = Paragraph::new(text::EMPTY_TABLE)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let focused_id = match page.mode {
        PageMode::Searched { id } => Some(id),
        _ => None,
    };
    let rows = page.users.iter().map(|user| {
        let style = if Some(user.id) == focused_id {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(user.id.to_string()),
            Cell::from(user.name.clone()),
            Cell::from(user.email.clone()),
            Cell::from(user.password.masked()),
            Cell::from(user.role.map(|r| r.to_string()).unwrap_or_default()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(30),
        Constraint::Percentage(40),
        Constraint::Length(10),
        Constraint::Length(4),
    ];
    let header = Row::new(vec!["ID", "Nombre", "Correo", "Contraseña", "Rol"])
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

fn render_status(f: &mut Frame, area: Rect, state: &AppState) {
    let hint = if state.users.alert.is_some() {
        "Enter/Esc cerrar aviso"
    } else if state.header.menu.is_some() {
        "↑/↓ elegir · Enter ir · Esc cerrar"
    } else if state.header.user_dropdown_visible {
        "Enter cerrar sesión · Esc cerrar"
    } else {
        match state.users.mode {
            PageMode::Idle | PageMode::Searched { .. } => {
                "0-9 ID · Enter buscar · Ctrl-G menú · Ctrl-U usuario · Ctrl-Q salir"
            }
            PageMode::Editing { .. } => {
                "Tab/↓ siguiente · Shift-Tab/↑ anterior · Ctrl-R mostrar contraseña · Enter confirmar · Esc cancelar"
            }
            PageMode::Confirming { .. } => "Enter confirmar · Esc cancelar",
            PageMode::Modal { .. } => "Enter/s confirmar · Esc/n cancelar",
        }
    };
    let status = Paragraph::new(hint)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn render_nav_menu(f: &mut Frame, state: &AppState, selected: usize) {
    let items = nav::menu_items(&state.permission_checker());
    let height = items.len() as u16 + 2;
    let rect = Rect::new(1, HEADER_HEIGHT, 40, height).intersection(f.size());

    let list = List::new(
        items
            .into_iter()
            .map(|item| ListItem::new(format!("{}  {}", item.label, item.route.path())))
            .collect::<Vec<_>>(),
    )
    .block(Block::default().title("Navegación").borders(Borders::ALL))
    .highlight_style(
        Style::new()
            .bg(Color::Cyan)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(selected));
    f.render_widget(Clear, rect);
    f.render_stateful_widget(list, rect, &mut list_state);
}

fn render_user_dropdown(f: &mut Frame) {
    let area = f.size();
    let width = 24.min(area.width);
    let rect = Rect::new(area.width.saturating_sub(width + 1), HEADER_HEIGHT, width, 3)
        .intersection(area);
    let dropdown = Paragraph::new(Span::styled(
        format!("> {}", text::LOGOUT),
        Style::default().add_modifier(Modifier::BOLD),
    ))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(Clear, rect);
    f.render_widget(dropdown, rect);
}

fn render_modal(f: &mut Frame, prompt: &str) {
    let rect = centered_rect(56, 7, f.size());
    let body = Paragraph::new(vec![
        Line::from(prompt),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("[Enter/s] {}", text::BUTTON_CONFIRM),
                Style::default().fg(Color::Green),
            ),
            Span::raw("   "),
            Span::styled(
                format!("[Esc/n] {}", text::BUTTON_CANCEL),
                Style::default().fg(Color::Red),
            ),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(text::BUTTON_CONFIRM)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(body, rect);
}

fn render_alert(f: &mut Frame, kind: AlertKind, message: &str) {
    let (title, color) = match kind {
        AlertKind::Info => ("Aviso", Color::Green),
        AlertKind::Error => ("Error", Color::Red),
    };
    let rect = centered_rect(56, 6, f.size());
    let body = Paragraph::new(vec![
        Line::from(message),
        Line::from(""),
        Line::from(Span::styled("[Enter] Aceptar", Style::default().fg(color))),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(body, rect);
}

/// A `width` x `height` rectangle centred in `area`, clipped to it.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_small_areas() {
        let area = Rect::new(0, 0, 20, 4);
        let rect = centered_rect(56, 7, area);
        assert_eq!(rect, Rect::new(0, 0, 20, 4));

        let rect = centered_rect(10, 2, Rect::new(0, 0, 30, 10));
        assert_eq!(rect, Rect::new(10, 4, 10, 2));
    }
}
