// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Tab strip, title, footer, and prompt rendering helpers used by the TUI shell.
fn tab_strip_line(catalog: &Catalog) -> Line<'static> {
    if catalog.is_empty() {
        return Line::from(vec![Span::styled(
            " (no diagrams) ".to_owned(),
            Style::default().fg(Color::DarkGray),
        )]);
    }

    let active = catalog.active_diagram_id().copied();
    let mut spans = Vec::<Span<'static>>::new();
    for record in catalog.records() {
        let is_active = active.as_ref() == Some(record.diagram_id());
        let style = if is_active {
            Style::default()
                .fg(Color::Black)
                .bg(TAB_ACTIVE_COLOR)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", record.name()), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn diagram_counter_label(active_index: Option<usize>, total: usize) -> String {
    if total == 0 {
        return "[0/0]".to_owned();
    }

    let width = total.to_string().len();
    let index = active_index.map(|idx| idx + 1).unwrap_or(0).min(total);
    format!("[{index:0width$}/{total}]")
}

fn body_title(catalog: &Catalog) -> Line<'static> {
    let counter = diagram_counter_label(
        catalog
            .active_diagram_id()
            .and_then(|active| catalog.position(active)),
        catalog.len(),
    );
    let name = catalog
        .active_record()
        .map(|record| record.name().to_owned())
        .unwrap_or_else(|| "—".to_owned());
    Line::from(vec![
        Span::raw("─ Diagram ".to_owned()),
        Span::styled(counter, Style::default().fg(TAB_ACTIVE_COLOR)),
        Span::raw(" ".to_owned()),
        Span::styled(name, Style::default().fg(Color::White)),
        Span::raw(" ".to_owned()),
    ])
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, key: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" ", Style::default()));
    }
    spans.push(Span::styled(
        format!("{label}:"),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        key.to_owned(),
        Style::default()
            .fg(FOOTER_KEY_COLOR)
            .add_modifier(Modifier::BOLD),
    ));
}

fn footer_line(mode: &Mode, degraded: bool, toast_suffix: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    match mode {
        Mode::Rename { .. } => {
            push_footer_entry(&mut spans, "ACCEPT", "Enter");
            push_footer_entry(&mut spans, "CANCEL", "Esc");
        }
        Mode::ConfirmDelete { .. } | Mode::ConfirmDeleteAll | Mode::ConfirmReconcile => {
            push_footer_entry(&mut spans, "CONFIRM", "y");
            push_footer_entry(&mut spans, "CANCEL", "n/Esc");
        }
        Mode::Help => {
            push_footer_entry(&mut spans, "CLOSE", "Esc/?");
            push_footer_entry(&mut spans, "QUIT", "q");
        }
        Mode::Browse => {
            push_footer_entry(&mut spans, "TABS", "←/→");
            push_footer_entry(&mut spans, "NEW", "^n");
            push_footer_entry(&mut spans, "EDIT", "e");
            push_footer_entry(&mut spans, "RENAME", "r");
            push_footer_entry(&mut spans, "DEL", "d");
            push_footer_entry(&mut spans, "DEDUP", "R");
            push_footer_entry(&mut spans, "RELOAD", "g");
            push_footer_entry(&mut spans, "HELP", "?");
            push_footer_entry(&mut spans, "QUIT", "q");
        }
    }

    if degraded {
        spans.push(Span::styled(
            " | load failed".to_owned(),
            Style::default().fg(Color::Red),
        ));
    }

    let toast_message = toast_suffix
        .strip_prefix(" | ")
        .unwrap_or(toast_suffix)
        .trim();
    if !toast_message.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::raw(toast_message.to_owned()));
    }

    Line::from(spans)
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn render_prompt(frame: &mut Frame<'_>, area: Rect, title: &str, lines: Vec<Line<'static>>) {
    let prompt_area = centered_rect(60, 24, area);
    frame.render_widget(Clear, prompt_area);
    let prompt = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(TAB_ACTIVE_COLOR))
            .title(format!("─ {title} ")),
    );
    frame.render_widget(prompt, prompt_area);
}

fn help_kv(key: &str, desc: &str, key_width: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{key:>width$}", width = key_width),
            Style::default()
                .fg(FOOTER_KEY_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let help_area = centered_rect(70, 80, area);
    frame.render_widget(Clear, help_area);

    let key_width = "PgUp/PgDn".len();
    let lines = vec![
        help_kv("←/→, [/]", "switch tab (wraps at both ends)", key_width),
        help_kv("Ctrl+n", "create diagram (auto-named)", key_width),
        help_kv("e", "edit body in external editor", key_width),
        help_kv("r", "rename (untitled diagrams only)", key_width),
        help_kv("d", "delete active diagram (confirm)", key_width),
        help_kv("D", "delete all diagrams (confirm)", key_width),
        help_kv("R", "remove duplicate names (confirm)", key_width),
        help_kv("g", "reload the catalog", key_width),
        help_kv("h/j/k/l", "pan the body view", key_width),
        help_kv("PgUp/PgDn", "pan the body view by a page", key_width),
        help_kv("Home", "reset the pan offset", key_width),
        help_kv("?", "toggle this help", key_width),
        help_kv("q", "quit", key_width),
    ];
    let help = Paragraph::new(Text::from(lines)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("─ Help ")
            .border_style(Style::default().fg(TAB_ACTIVE_COLOR)),
    );
    frame.render_widget(help, help_area);
}
