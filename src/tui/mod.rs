// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! The interactive workbench shell (ratatui + crossterm): a tab strip over the scope's diagrams,
//! a pannable body view, modal prompts for rename/delete/reconcile, and an external-editor
//! bridge. Prompt keys are handled before global keys, so tab cycling and the create accelerator
//! never fire while a prompt has focus.

use std::{
    env,
    error::Error,
    fs, io,
    path::Path,
    process::Command,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::model::{Catalog, DiagramId, DiagramRecord, Scope};
use crate::ops;
use crate::reconcile;
use crate::select::SelectionController;
use crate::store::{load_catalog, DiagramStore, MemoryDiagramStore};

const TAB_ACTIVE_COLOR: Color = Color::LightGreen;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "🅿 🆁 🅾 🆃 🅴 🆄 🆂 ";
const PAN_STEP_X: u16 = 2;
const PAGE_STEP: u16 = 10;

/// Runs the interactive workbench for a scope. The catalog is loaded once up front; a failed
/// load starts with an empty strip and a visible "load failed" marker instead of erroring out.
pub fn run(
    store: Box<dyn DiagramStore>,
    scope: Scope,
    selection: SelectionController,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(store, scope, selection);

    while !app.should_quit {
        app.flush_pending_save();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key(key);
                    if let Some(action) = app.take_external_action() {
                        let result =
                            terminal.run_external_action(|| app.execute_external_action(action));
                        if let Err(err) = result {
                            app.set_toast(format!("External edit failed: {err}"));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let tabs_area = layout[0];
    let body_area = layout[1];
    let status_area = layout[2];

    frame.render_widget(Paragraph::new(tab_strip_line(&app.catalog)), tabs_area);

    let body = Paragraph::new(app.body_text())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(body_title(&app.catalog)),
        )
        .scroll((app.pan_y, app.pan_x));
    frame.render_widget(body, body_area);

    let toast_snapshot = app
        .toast
        .as_ref()
        .map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => format!(" | {message}"),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };
    let status = Paragraph::new(footer_line(&app.mode, app.load_degraded, &toast_suffix));
    frame.render_widget(status, status_area);
    let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
    frame.render_widget(brand, status_area);

    match &app.mode {
        Mode::Rename { buffer, .. } => {
            let lines = vec![
                Line::from("New name:".to_owned()),
                Line::from(vec![
                    Span::raw(buffer.clone()),
                    Span::styled("▏", Style::default().fg(TAB_ACTIVE_COLOR)),
                ]),
            ];
            render_prompt(frame, body_area, "Rename diagram", lines);
        }
        Mode::ConfirmDelete { diagram_id } => {
            let name = app
                .catalog
                .get(diagram_id)
                .map(|record| record.name().to_owned())
                .unwrap_or_else(|| diagram_id.to_string());
            let lines = vec![
                Line::from(format!("Delete {name:?}?")),
                Line::from("This removes the diagram from the hosted store.".to_owned()),
            ];
            render_prompt(frame, body_area, "Delete diagram", lines);
        }
        Mode::ConfirmDeleteAll => {
            let lines = vec![
                Line::from(format!("Delete all {} diagram(s)?", app.catalog.len())),
                Line::from("This removes every diagram in the project from the hosted store.".to_owned()),
            ];
            render_prompt(frame, body_area, "Delete all diagrams", lines);
        }
        Mode::ConfirmReconcile => {
            let lines = vec![
                Line::from("Remove duplicate names?".to_owned()),
                Line::from(
                    "For each repeated name, only the most recently updated diagram is kept."
                        .to_owned(),
                ),
            ];
            render_prompt(frame, body_area, "Remove duplicates", lines);
        }
        Mode::Help => render_help(frame, body_area),
        Mode::Browse => {}
    }
}

// Extracted tab-strip/title/footer/prompt rendering helpers.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Browse,
    Rename {
        diagram_id: DiagramId,
        buffer: String,
    },
    ConfirmDelete {
        diagram_id: DiagramId,
    },
    ConfirmDeleteAll,
    ConfirmReconcile,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExternalAction {
    EditActiveDiagram,
}

/// A body edit that came back from the external editor and has not reached the store yet.
#[derive(Debug, Clone)]
struct PendingBodySave {
    diagram_id: DiagramId,
    body: String,
}

struct App {
    scope: Scope,
    store: Box<dyn DiagramStore>,
    selection: SelectionController,
    catalog: Catalog,
    load_degraded: bool,
    mode: Mode,
    pan_x: u16,
    pan_y: u16,
    toast: Option<Toast>,
    pending_save: Option<PendingBodySave>,
    pending_external_action: Option<ExternalAction>,
    should_quit: bool,
}

impl App {
    fn new(store: Box<dyn DiagramStore>, scope: Scope, selection: SelectionController) -> Self {
        let load = load_catalog(store.as_ref(), &scope);
        let mut catalog = load.catalog;
        let active = selection.resolve(&scope, &catalog);
        catalog.set_active_diagram_id(active);
        selection.remember(&scope, catalog.active_diagram_id());

        Self {
            scope,
            store,
            selection,
            catalog,
            load_degraded: load.degraded,
            mode: Mode::Browse,
            pan_x: 0,
            pan_y: 0,
            toast: None,
            pending_save: None,
            pending_external_action: None,
            should_quit: false,
        }
    }

    fn body_text(&self) -> Text<'static> {
        if self.catalog.is_empty() {
            let hint = if self.load_degraded {
                "Loading the catalog failed; press g to retry.\nCtrl+n creates a fresh diagram."
            } else {
                "No diagrams in this project yet.\nCtrl+n creates one."
            };
            return Text::from(hint.to_owned());
        }

        match self.catalog.active_record() {
            Some(record) => Text::from(record.body().to_owned()),
            None => {
                // Restored session id that is no longer (or not yet) in the catalog.
                let id = self
                    .catalog
                    .active_diagram_id()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "—".to_owned());
                Text::from(format!(
                    "Last session's diagram ({id}) is not in this catalog.\n\
                     Use ←/→ to pick a tab, or g to reload."
                ))
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Help => self.handle_help_key(key.code),
            Mode::Rename { .. } => self.handle_rename_key(key.code),
            Mode::ConfirmDelete { .. } => self.handle_confirm_delete_key(key.code),
            Mode::ConfirmDeleteAll => self.handle_confirm_delete_all_key(key.code),
            Mode::ConfirmReconcile => self.handle_confirm_reconcile_key(key.code),
            Mode::Browse => self.handle_browse_key(key),
        }
    }

    fn handle_help_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Char('?') => self.mode = Mode::Browse,
            KeyCode::Char('q') => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_rename_key(&mut self, code: KeyCode) {
        let Mode::Rename {
            diagram_id,
            mut buffer,
        } = std::mem::replace(&mut self.mode, Mode::Browse)
        else {
            return;
        };

        match code {
            KeyCode::Esc => {}
            KeyCode::Enter => self.commit_rename(diagram_id, buffer),
            KeyCode::Backspace => {
                buffer.pop();
                self.mode = Mode::Rename { diagram_id, buffer };
            }
            KeyCode::Char(ch) => {
                buffer.push(ch);
                self.mode = Mode::Rename { diagram_id, buffer };
            }
            _ => self.mode = Mode::Rename { diagram_id, buffer },
        }
    }

    fn handle_confirm_delete_key(&mut self, code: KeyCode) {
        let Mode::ConfirmDelete { diagram_id } =
            std::mem::replace(&mut self.mode, Mode::Browse)
        else {
            return;
        };

        match code {
            KeyCode::Char('y') | KeyCode::Enter => self.commit_delete(diagram_id),
            KeyCode::Char('n') | KeyCode::Esc => {}
            _ => self.mode = Mode::ConfirmDelete { diagram_id },
        }
    }

    fn handle_confirm_delete_all_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.mode = Mode::Browse;
                self.commit_delete_all();
            }
            KeyCode::Char('n') | KeyCode::Esc => self.mode = Mode::Browse,
            _ => {}
        }
    }

    fn handle_confirm_reconcile_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.mode = Mode::Browse;
                self.run_reconcile();
            }
            KeyCode::Char('n') | KeyCode::Esc => self.mode = Mode::Browse,
            _ => {}
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if let KeyCode::Char('n') = key.code {
                self.create_diagram();
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Left | KeyCode::Char('[') => self.switch_prev(),
            KeyCode::Right | KeyCode::Char(']') => self.switch_next(),
            KeyCode::Char('r') => self.begin_rename(),
            KeyCode::Char('d') => self.begin_delete(),
            KeyCode::Char('D') => self.begin_delete_all(),
            KeyCode::Char('R') => self.mode = Mode::ConfirmReconcile,
            KeyCode::Char('g') => self.reload_catalog(),
            KeyCode::Char('e') => self.queue_edit_active_diagram(),
            KeyCode::Char('?') => self.mode = Mode::Help,
            KeyCode::Char('h') => self.pan_x = self.pan_x.saturating_sub(PAN_STEP_X),
            KeyCode::Char('l') => self.pan_x = self.pan_x.saturating_add(PAN_STEP_X),
            KeyCode::Char('k') | KeyCode::Up => self.pan_y = self.pan_y.saturating_sub(1),
            KeyCode::Char('j') | KeyCode::Down => self.pan_y = self.pan_y.saturating_add(1),
            KeyCode::PageUp => self.pan_y = self.pan_y.saturating_sub(PAGE_STEP),
            KeyCode::PageDown => self.pan_y = self.pan_y.saturating_add(PAGE_STEP),
            KeyCode::Home => {
                self.pan_x = 0;
                self.pan_y = 0;
            }
            KeyCode::End => self.pan_y = self.pan_y.saturating_add(PAGE_STEP * 2),
            _ => {}
        }
    }

    fn switch_prev(&mut self) {
        let Some(prev) = self.catalog.prev_id() else {
            return;
        };
        self.activate(prev);
    }

    fn switch_next(&mut self) {
        let Some(next) = self.catalog.next_id() else {
            return;
        };
        self.activate(next);
    }

    /// Flushes any pending editor save for the outgoing diagram first. The switch proceeds even
    /// when the flush fails; the failure stays visible as a toast.
    fn activate(&mut self, diagram_id: DiagramId) {
        self.flush_pending_save();
        self.catalog.set_active_diagram_id(Some(diagram_id));
        self.selection
            .remember(&self.scope, self.catalog.active_diagram_id());
        self.pan_x = 0;
        self.pan_y = 0;
    }

    fn create_diagram(&mut self) {
        match ops::create_diagram(&mut self.catalog, self.store.as_ref(), &self.scope) {
            Ok(outcome) => {
                self.selection
                    .remember(&self.scope, self.catalog.active_diagram_id());
                self.pan_x = 0;
                self.pan_y = 0;
                self.set_toast(format!("Created {:?}", outcome.name));
            }
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn begin_rename(&mut self) {
        let Some(record) = self.catalog.active_record() else {
            self.set_toast("No active diagram to rename");
            return;
        };
        if !record.is_untitled() {
            self.set_toast("Only untitled diagrams can be renamed here");
            return;
        }
        self.mode = Mode::Rename {
            diagram_id: *record.diagram_id(),
            buffer: record.name().to_owned(),
        };
    }

    fn commit_rename(&mut self, diagram_id: DiagramId, buffer: String) {
        let name = buffer.trim();
        if name.is_empty() {
            self.set_toast("Rename cancelled: empty name");
            return;
        }

        match ops::rename_diagram(&mut self.catalog, self.store.as_ref(), &diagram_id, name) {
            Ok(()) => self.set_toast(format!("Renamed to {name:?}")),
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn begin_delete(&mut self) {
        let Some(active) = self.catalog.active_diagram_id().copied() else {
            self.set_toast("No active diagram to delete");
            return;
        };
        if self.catalog.get(&active).is_none() {
            self.set_toast("Active diagram is not in the catalog; reload with g");
            return;
        }
        self.mode = Mode::ConfirmDelete {
            diagram_id: active,
        };
    }

    fn commit_delete(&mut self, diagram_id: DiagramId) {
        if self
            .pending_save
            .as_ref()
            .is_some_and(|pending| pending.diagram_id == diagram_id)
        {
            self.pending_save = None;
        }

        match ops::delete_diagram(
            &mut self.catalog,
            self.store.as_ref(),
            &self.scope,
            &diagram_id,
        ) {
            Ok(outcome) => {
                self.selection
                    .remember(&self.scope, outcome.new_active.as_ref());
                self.set_toast("Diagram deleted");
            }
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn begin_delete_all(&mut self) {
        if self.catalog.is_empty() {
            self.set_toast("No diagrams to delete");
            return;
        }
        self.mode = Mode::ConfirmDeleteAll;
    }

    fn commit_delete_all(&mut self) {
        let outcome = ops::delete_all_diagrams(&mut self.catalog, self.store.as_ref(), &self.scope);
        // A pending editor save for a wiped diagram must not resurrect it; one for a row whose
        // delete failed is still worth flushing.
        if self
            .pending_save
            .as_ref()
            .is_some_and(|pending| self.catalog.get(&pending.diagram_id).is_none())
        {
            self.pending_save = None;
        }
        self.selection
            .remember(&self.scope, outcome.new_active.as_ref());
        self.pan_x = 0;
        self.pan_y = 0;
        if outcome.failed > 0 {
            self.set_toast(format!(
                "Deleted {} diagram(s); {} delete(s) failed",
                outcome.removed, outcome.failed
            ));
        } else {
            self.set_toast(format!("Deleted {} diagram(s)", outcome.removed));
        }
    }

    fn run_reconcile(&mut self) {
        match reconcile::reconcile_duplicates(self.store.as_ref(), &self.scope) {
            Ok(report) => {
                self.reload_catalog();
                if report.failed > 0 {
                    self.set_toast(format!(
                        "Removed {} duplicate(s); {} delete(s) failed",
                        report.removed, report.failed
                    ));
                } else {
                    self.set_toast(format!("Removed {} duplicate(s)", report.removed));
                }
            }
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    /// Re-lists the scope from the store. The active id is kept when it is still a member;
    /// otherwise selection runs again from the cache. Unlike on entry, a reload happens
    /// mid-session: a cached id that the fresh listing does not contain is known stale (a
    /// reconcile may have just deleted it), so it is discarded in favor of the first entry.
    fn reload_catalog(&mut self) {
        let previous_active = self.catalog.active_diagram_id().copied();
        let load = load_catalog(self.store.as_ref(), &self.scope);
        self.catalog = load.catalog;
        self.load_degraded = load.degraded;

        let active = match previous_active {
            Some(active) if self.catalog.get(&active).is_some() => Some(active),
            // A degraded reload comes back empty and proves nothing about membership; keep the
            // resolver's answer so the resume id survives until a listing succeeds.
            _ if load.degraded => self.selection.resolve(&self.scope, &self.catalog),
            _ => self
                .selection
                .resolve(&self.scope, &self.catalog)
                .filter(|resolved| self.catalog.get(resolved).is_some())
                .or_else(|| {
                    self.catalog
                        .records()
                        .first()
                        .map(|record| *record.diagram_id())
                }),
        };
        self.catalog.set_active_diagram_id(active);
        self.selection
            .remember(&self.scope, self.catalog.active_diagram_id());

        if load.degraded {
            self.set_toast("Reload failed; showing an empty catalog");
        }
    }

    fn take_external_action(&mut self) -> Option<ExternalAction> {
        self.pending_external_action.take()
    }

    fn queue_edit_active_diagram(&mut self) {
        if self.catalog.active_record().is_none() {
            self.set_toast("No active diagram to edit");
            return;
        }
        self.pending_external_action = Some(ExternalAction::EditActiveDiagram);
    }

    fn execute_external_action(&mut self, action: ExternalAction) -> Result<(), String> {
        match action {
            ExternalAction::EditActiveDiagram => self.edit_active_diagram_in_editor(),
        }
    }

    fn edit_active_diagram_in_editor(&mut self) -> Result<(), String> {
        let Some(record) = self.catalog.active_record().cloned() else {
            return Err("no active diagram".to_owned());
        };

        let diagram_id = *record.diagram_id();
        let original_body = record.body().to_owned();
        let temp_path = write_temp_body_file(&diagram_id, &original_body)?;
        let editor_command = resolve_editor_command();

        let launch_result = launch_editor_command(&editor_command, &temp_path);
        let edited_body = fs::read_to_string(&temp_path).map_err(|err| {
            format!(
                "failed reading edited body from {}: {err}",
                temp_path.display()
            )
        });
        let _ = fs::remove_file(&temp_path);

        launch_result?;
        let edited_body = edited_body?;

        if edited_body == original_body {
            self.set_toast("Edit cancelled (no changes)");
            return Ok(());
        }

        self.pending_save = Some(PendingBodySave {
            diagram_id,
            body: edited_body,
        });
        self.set_toast(format!("Edited {:?}; save pending", record.name()));
        Ok(())
    }

    fn flush_pending_save(&mut self) {
        let Some(pending) = self.pending_save.take() else {
            return;
        };

        match ops::save_body(
            &mut self.catalog,
            self.store.as_ref(),
            &pending.diagram_id,
            pending.body,
        ) {
            Ok(()) => self.set_toast("Saved edited body"),
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(2),
        });
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }

    fn run_external_action(
        &mut self,
        action: impl FnOnce() -> Result<(), String>,
    ) -> Result<(), String> {
        let _suspend = TerminalSuspendGuard::new(&mut self.terminal)
            .map_err(|err| format!("terminal suspend failed: {err}"))?;
        action()
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

struct TerminalSuspendGuard<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
}

impl<'a> TerminalSuspendGuard<'a> {
    fn new(terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<Self> {
        terminal.show_cursor()?;
        disable_raw_mode()?;

        if let Err(err) = execute!(terminal.backend_mut(), LeaveAlternateScreen) {
            let _ = enable_raw_mode();
            let _ = execute!(terminal.backend_mut(), EnterAlternateScreen);
            let _ = terminal.hide_cursor();
            let _ = ratatui::backend::Backend::flush(terminal.backend_mut());
            return Err(err);
        }

        ratatui::backend::Backend::flush(terminal.backend_mut())?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalSuspendGuard<'_> {
    fn drop(&mut self) {
        let _ = enable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), EnterAlternateScreen);
        let _ = self.terminal.clear();
        let _ = self.terminal.hide_cursor();
        let _ = ratatui::backend::Backend::flush(self.terminal.backend_mut());
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn resolve_editor_command() -> String {
    env::var("EDITOR")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| {
            env::var("VISUAL")
                .ok()
                .filter(|value| !value.trim().is_empty())
        })
        .unwrap_or_else(|| "vi".to_owned())
}

fn write_temp_body_file(diagram_id: &DiagramId, content: &str) -> Result<std::path::PathBuf, String> {
    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos())
        .unwrap_or(0);
    let mut temp_path = env::temp_dir();
    temp_path.push(format!("proteus-{diagram_id}-{ts}.bpmn"));
    fs::write(&temp_path, content).map_err(|err| {
        format!(
            "failed to create temporary body file {}: {err}",
            temp_path.display()
        )
    })?;
    Ok(temp_path)
}

fn launch_editor_command(command: &str, path: &Path) -> Result<(), String> {
    let path_text = path.to_string_lossy();
    if path_text.starts_with('-') {
        return Err("invalid editor temp path".to_owned());
    }

    let status = Command::new("sh")
        .arg("-lc")
        .arg(format!("{command} {}", shell_single_quote(path_text.as_ref())))
        .status()
        .map_err(|err| format!("failed to run editor command `{command}`: {err}"))?;
    if !status.success() {
        return Err(format!("editor command failed with status {status}"));
    }
    Ok(())
}

fn shell_single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

/// Seeds an in-memory store for `--demo` mode, including one duplicated name so the reconciler
/// has something to do.
pub fn demo_store() -> (MemoryDiagramStore, Scope) {
    use chrono::{Duration as ChronoDuration, Utc};
    use crate::model::{ProjectId, UserId};

    let scope = Scope::new(ProjectId::generate(), UserId::generate());
    let store = MemoryDiagramStore::new();
    let seeded: [(&str, i64); 4] = [
        ("Order Fulfilment", 30),
        ("Customer Onboarding", 10),
        ("Order Fulfilment", 200),
        ("Untitled Diagram", 90),
    ];
    for (name, minutes_ago) in seeded {
        store.seed(DiagramRecord::new(
            DiagramId::generate(),
            scope,
            name,
            crate::model::DEFAULT_DIAGRAM_BODY,
            None,
            Utc::now() - ChronoDuration::minutes(minutes_ago),
        ));
    }
    (store, scope)
}
