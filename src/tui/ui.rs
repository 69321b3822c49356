use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Gauge, List, ListItem, Paragraph, Row, Table, Wrap};

use crate::contact::{FULL_ANALYSIS, PRIVACY_NOTE};
use crate::disc::Trait;
use crate::income::{Choice, ESTIMATE_NOTES};
use crate::output::{bar_cells, format_wan};
use crate::tui::app::{App, IncomeField, InputMode, Screen, TOOLS};
use crate::tui::theme::ThemeColors;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    match app.screen {
        Screen::Menu => render_menu(frame, chunks[1], app),
        Screen::Disc => render_disc(frame, chunks[1], app),
        Screen::Income => render_income(frame, chunks[1], app),
    }
    render_status_bar(frame, chunks[2], app);

    match app.input_mode {
        InputMode::ContactInput => render_contact_popup(frame, app),
        InputMode::DiscResult => render_disc_result_popup(frame, app),
        InputMode::Help => render_help_popup(frame, &app.theme),
        InputMode::Normal => {}
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(
        "Advisor Kit",
        Style::default().fg(theme.title_color).bold(),
    )];

    let section = match app.screen {
        Screen::Menu => None,
        Screen::Disc => Some(("DISC 測驗", theme.disc_accent)),
        Screen::Income => Some(("一生該賺多少錢", theme.income_accent)),
    };
    if let Some((name, color)) = section {
        spans.push(Span::styled(" / ", Style::default().fg(theme.muted)));
        spans.push(Span::styled(name, Style::default().fg(color).bold()));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_menu(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme.clone();
    let items: Vec<ListItem> = TOOLS
        .iter()
        .map(|(screen, name, blurb)| {
            let accent = match screen {
                Screen::Income => theme.income_accent,
                _ => theme.disc_accent,
            };
            ListItem::new(vec![
                Line::from(Span::styled(*name, Style::default().fg(accent).bold())),
                Line::from(Span::styled(*blurb, Style::default().fg(theme.muted))),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::bordered().title(" 業務工具 "))
        .highlight_style(theme.row_selected)
        .highlight_symbol("> ");

    let menu_area = centered_rect_fixed(64, 10, area);
    frame.render_stateful_widget(list, menu_area, &mut app.menu_state);
}

fn render_disc(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = app.theme.clone();

    // Layout: Progress(1) + gap(1) + Body(fill)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let answered = app.disc.answered_count();
    let total = app.disc.question_count();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.disc_accent).bg(theme.bar_empty))
        .ratio(app.disc.progress().clamp(0.0, 1.0))
        .label(format!(
            "進度：{} / {} 題 ({}%)",
            answered,
            total,
            app.disc.progress_percent()
        ));
    frame.render_widget(gauge, chunks[0]);

    let body = Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).split(chunks[2]);

    // Question table
    let rows: Vec<Row> = app
        .disc
        .questions()
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            let answer_cell = match app.disc.answer(idx) {
                Some(v) => Cell::from(format!("{} +{}", q.trait_.short_label(), v))
                    .style(Style::default().fg(theme.answered_color)),
                None => Cell::from("-").style(Style::default().fg(theme.index_color)),
            };
            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(theme.index_color)),
                Cell::from(q.text.clone()),
                answer_cell,
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "題目（1 不同意 ~ 5 非常同意）", "回答"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .block(Block::bordered())
        .row_highlight_style(theme.row_selected);
    frame.render_stateful_widget(table, body[0], &mut app.disc_table);

    // Live score bars
    let mut lines = Vec::new();
    let totals = app.disc.totals();
    for t in Trait::ALL {
        let pct = app.disc.bar_percentage(t);
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", t.letter()), Style::default().bold()),
            Span::raw(format!("{:<4} ", t.short_label())),
            Span::styled(format!("{:>3} 分", totals.get(t)), Style::default().fg(theme.muted)),
        ]));
        lines.push(bar_line(pct, 20, &theme));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "如何解讀？",
        Style::default().fg(theme.disc_accent).bold(),
    )));
    lines.push(Line::from(Span::styled(
        "分數越高代表該傾向越明顯，全部作答後按 Enter 看結果。",
        Style::default().fg(theme.muted),
    )));

    let scores = Paragraph::new(lines)
        .block(Block::bordered().title(" 分數 "))
        .wrap(Wrap { trim: false });
    frame.render_widget(scores, body[1]);
}

fn render_income(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let result = app.income.result();

    // Layout: Life progress(1) + gap(1) + Body(fill)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(theme.gauge_filled).bg(theme.bar_empty))
        .percent(u16::from(result.life_progress.min(100)))
        .label(format!("人生進度條 {}%", result.life_progress));
    frame.render_widget(gauge, chunks[0]);

    let body = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(chunks[2]);

    // Questions with their options
    let mut form = Vec::new();
    for field in app.visible_fields() {
        let focused = field == app.income_field;
        let marker = if focused { "> " } else { "  " };
        let title_style = if focused {
            Style::default().fg(theme.income_accent).bold()
        } else {
            theme.title_style
        };
        form.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(field.title(), title_style),
        ]));
        form.push(field_options(app, field));
        form.push(Line::from(""));
    }
    let form_widget = Paragraph::new(form)
        .block(Block::bordered().title(" 你的狀況 "))
        .wrap(Wrap { trim: false });
    frame.render_widget(form_widget, body[0]);

    // Estimate panel
    let mut lines = vec![
        Line::from(Span::styled("估算結果", theme.header_style)),
        Line::from(Span::styled(
            format!("約 {} 萬", format_wan(result.estimate)),
            Style::default().fg(theme.estimate_color).bold(),
        )),
        Line::from(Span::styled(
            "至少需要累積的生涯收入，盡早規劃保障與儲蓄。",
            Style::default().fg(theme.muted),
        )),
        Line::from(Span::styled(
            "真正的風險不是你賺不夠，是中途不能停。",
            Style::default().fg(theme.warning_color),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("加入 LINE 看完整分析 "),
            Span::styled("(o)", Style::default().fg(theme.status_key_color)),
        ]),
        Line::from(Span::styled(
            app.cta_link.clone(),
            Style::default().fg(theme.muted).underlined(),
        )),
        Line::from(""),
    ];

    if app.income.contact.is_unlocked() {
        lines.push(Line::from(Span::styled(
            FULL_ANALYSIS,
            Style::default().fg(theme.flash_success),
        )));
    } else {
        lines.push(Line::from(vec![
            Span::raw("留下 Email 或電話解鎖完整解讀 "),
            Span::styled("(u)", Style::default().fg(theme.status_key_color)),
        ]));
        lines.push(Line::from(Span::styled(
            PRIVACY_NOTE,
            Style::default().fg(theme.muted),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("備註", theme.header_style)));
    for note in ESTIMATE_NOTES {
        lines.push(Line::from(Span::styled(
            format!("- {}", note),
            Style::default().fg(theme.muted),
        )));
    }

    let panel = Paragraph::new(lines)
        .block(Block::bordered())
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, body[1]);
}

/// Options for one calculator question, the current choice highlighted
fn field_options(app: &App, field: IncomeField) -> Line<'static> {
    let profile = &app.income.profile;
    match field {
        IncomeField::Age => Line::from(vec![
            Span::raw("    "),
            Span::styled("◀ ", Style::default().fg(app.theme.muted)),
            Span::styled(format!("{} 歲", profile.age), app.theme.option_active),
            Span::styled(" ▶", Style::default().fg(app.theme.muted)),
        ]),
        IncomeField::WorkUntil => choice_line(profile.work_until, &app.theme),
        IncomeField::Family => choice_line(profile.family, &app.theme),
        IncomeField::Kids => choice_line(profile.kids, &app.theme),
        IncomeField::Mortgage => choice_line(profile.mortgage, &app.theme),
        IncomeField::BreakImpact => choice_line(profile.break_impact, &app.theme),
        IncomeField::LifeCost => choice_line(profile.life_cost, &app.theme),
    }
}

fn choice_line<C: Choice>(current: C, theme: &ThemeColors) -> Line<'static> {
    let mut spans = vec![Span::raw("    ")];
    for (i, option) in C::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        let style = if *option == current {
            theme.option_active
        } else {
            theme.option_inactive
        };
        spans.push(Span::styled(format!(" {} ", option.label()), style));
    }
    Line::from(spans)
}

fn bar_line(percentage: f64, width: usize, theme: &ThemeColors) -> Line<'static> {
    let (filled, empty) = bar_cells(percentage, width);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(theme.bar_filled)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(theme.bar_empty)));
    }
    Line::from(spans)
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        let msg_color = if msg.starts_with("Failed") || msg.starts_with("Error") {
            theme.flash_error
        } else if msg.starts_with("Opened:") || msg.starts_with("Unlocked") {
            theme.flash_success
        } else {
            theme.title_color
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = match app.screen {
            Screen::Menu => &[
                ("j/k", ":nav "),
                ("Enter", ":open "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            Screen::Disc => &[
                ("j/k", ":nav "),
                ("1-5", ":answer "),
                ("Enter", ":result "),
                ("r", ":reset "),
                ("Esc", ":menu "),
                ("q", ":quit"),
            ],
            Screen::Income => &[
                ("j/k", ":question "),
                ("h/l", ":change "),
                ("+/-", ":age±5 "),
                ("u", ":unlock "),
                ("o", ":LINE "),
                ("Esc", ":menu "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Render the contact input popup
fn render_contact_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect_fixed(50, 5, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Email / 電話 ")
        .title_style(theme.popup_title)
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let chunks = Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(Paragraph::new(format!("{}|", app.contact_input)), chunks[0]);
    frame.render_widget(
        Paragraph::new(PRIVACY_NOTE).style(Style::default().fg(theme.muted)),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new("Enter: unlock | Esc: cancel").style(Style::default().fg(theme.muted)),
        chunks[2],
    );
}

/// Render the DISC result: dominant style plus the client advice
fn render_disc_result_popup(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let popup_area = centered_rect_fixed(70, 16, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" 測驗結果 ")
        .title_style(theme.popup_title)
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let dominant = app.disc.dominant();
    let mut lines = vec![
        Line::from(vec![
            Span::raw("主要傾向："),
            Span::styled(dominant.label(), Style::default().fg(theme.disc_accent).bold()),
        ]),
        Line::from(Span::styled(
            "記得因人而異，保持彈性調整自己的節奏。",
            Style::default().fg(theme.muted),
        )),
        Line::from(""),
        Line::from(Span::styled("保險情境溝通建議", theme.header_style)),
    ];
    for t in Trait::ALL {
        lines.push(Line::from(format!("- {}", t.client_tip())));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("o", Style::default().fg(theme.status_key_color)),
        Span::raw(": 加入 LINE  "),
        Span::styled("Esc", Style::default().fg(theme.status_key_color)),
        Span::raw(": close"),
    ]));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 18, frame.area());
    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .title_style(theme.popup_title)
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let entries = [
        ("j / Down      ", "Next row or question"),
        ("k / Up        ", "Previous row or question"),
        ("Enter         ", "Open tool / show DISC result"),
        ("1-5           ", "Answer the selected DISC question"),
        ("r             ", "Clear DISC answers"),
        ("h / l         ", "Change the selected option"),
        ("+ / -         ", "Age up or down by 5"),
        ("u             ", "Unlock with email or phone"),
        ("o             ", "Open the LINE link"),
        ("Esc           ", "Back to menu"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit"),
    ];

    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, desc)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*desc)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
