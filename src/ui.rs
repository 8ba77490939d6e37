use crate::error::{PostlineError, Result};
use crate::input::{FieldChange, TextField};
use crate::models::{Field, Post, PostId};
use crate::picker::{EmojiPicker, PickerEvent, PickerRow};
use crate::session::Session;
use crate::store::DurableStore;

use arboard::Clipboard;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, error};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io::{self, stdout};

const ACCENT: Color = Color::Rgb(187, 134, 252);
const TEAL: Color = Color::Rgb(3, 218, 198);
const MUTED: Color = Color::Rgb(160, 160, 160);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Title,
    Content,
    PublishDate,
    Posts,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Title => Focus::Content,
            Focus::Content => Focus::PublishDate,
            Focus::PublishDate => Focus::Posts,
            Focus::Posts => Focus::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Title => Focus::Posts,
            Focus::Content => Focus::Title,
            Focus::PublishDate => Focus::Content,
            Focus::Posts => Focus::PublishDate,
        }
    }
}

/// Run the interactive editor until the user quits
pub fn display_post_editor<S: DurableStore>(session: &mut Session<S>) -> Result<()> {
    enable_raw_mode()
        .map_err(|e| PostlineError::Terminal(format!("Failed to enable raw mode: {}", e)))?;
    if let Err(e) = execute!(stdout(), EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(PostlineError::Terminal(format!(
            "Failed to enter alternate screen: {}",
            e
        )));
    }

    let backend = CrosstermBackend::new(stdout());
    let result = match Terminal::new(backend) {
        Ok(mut terminal) => run_ui(&mut terminal, App::new(session)),
        Err(e) => Err(e.into()),
    };

    // Clean up terminal
    let _ = disable_raw_mode();
    let _ = execute!(stdout(), LeaveAlternateScreen);

    result
}

fn run_ui<S: DurableStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App<'_, S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, &app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.handle_key(key) {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(e) => {
                    error!("{}", e);
                    app.status = Some(e.to_string());
                }
            }
        }
    }
}

/// Editor screen state on top of a [`Session`].
pub struct App<'a, S: DurableStore> {
    pub session: &'a mut Session<S>,
    title: TextField,
    content: TextField,
    date: TextField,
    focus: Focus,
    selected: usize,
    picker: EmojiPicker,
    status: Option<String>,
    clipboard: Option<Clipboard>,
}

impl<'a, S: DurableStore> App<'a, S> {
    pub fn new(session: &'a mut Session<S>) -> Self {
        let mut app = Self {
            session,
            title: TextField::single_line(),
            content: TextField::multi_line(),
            date: TextField::single_line(),
            focus: Focus::Title,
            selected: 0,
            picker: EmojiPicker::new(),
            status: None,
            clipboard: None,
        };
        app.sync_fields();
        app
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Handle one key press; returns `true` when the editor should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        let KeyEvent {
            code, modifiers, ..
        } = key;

        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Ok(true);
        }
        if self.session.is_picker_open() {
            return self.handle_picker_key(code, modifiers).map(|_| false);
        }
        self.status = None;

        if modifiers.contains(KeyModifiers::CONTROL) {
            match code {
                KeyCode::Char('e') => self.session.toggle_picker(),
                KeyCode::Char('p') => self.session.toggle_publish(),
                KeyCode::Char('s') => {
                    let id = self.session.save_post()?;
                    self.sync_fields();
                    self.focus = Focus::Title;
                    self.status = Some(format!("Post {} saved", id));
                }
                _ => {}
            }
            return Ok(false);
        }

        if modifiers.contains(KeyModifiers::ALT) {
            if let KeyCode::Char(c) = code {
                if let Some(glyph) = c.to_digit(10).and_then(|d| self.recent_slot(d)) {
                    let caret = self.session.insert_text(&glyph);
                    self.focus_content_at(caret);
                }
            }
            return Ok(false);
        }

        match code {
            KeyCode::Esc => return Ok(true),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            _ => match self.focus {
                Focus::Posts => self.handle_posts_key(code)?,
                focus => self.handle_field_key(focus, code, modifiers),
            },
        }
        Ok(false)
    }

    fn handle_field_key(&mut self, focus: Focus, code: KeyCode, modifiers: KeyModifiers) {
        let (field, input) = match focus {
            Focus::Title => (Field::Title, &mut self.title),
            Focus::Content => (Field::Content, &mut self.content),
            Focus::PublishDate => (Field::PublishDate, &mut self.date),
            Focus::Posts => return,
        };
        match input.handle_key(code, modifiers) {
            FieldChange::Edited => {
                let caret = (field == Field::Content).then(|| input.caret_utf16());
                let value = input.value().to_string();
                self.session.edit(field, value, caret);
            }
            FieldChange::CaretMoved if field == Field::Content => {
                let caret = input.caret_utf16();
                self.session.record_cursor(Some(caret));
            }
            _ => {}
        }
    }

    fn handle_posts_key(&mut self, code: KeyCode) -> Result<()> {
        let Some(id) = self.selected_post().map(|post| post.id) else {
            return Ok(());
        };
        match code {
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.session.posts().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.session.toggle_expansion(id),
            // Edit, delete and copy act only on an expanded post
            _ if !self.expanded(id) => {}
            KeyCode::Char('e') => {
                self.session.load_post(id)?;
                self.sync_fields();
                self.title.move_to_end();
                self.date.move_to_end();
                self.focus = Focus::Title;
            }
            KeyCode::Char('d') => {
                self.session.delete_post(id)?;
                self.selected = self
                    .selected
                    .min(self.session.posts().len().saturating_sub(1));
                self.sync_fields();
            }
            KeyCode::Char('y') => {
                let content = self.session.find(id).map(|post| post.content.clone());
                if let Some(content) = content {
                    self.copy_to_clipboard(content)?;
                    self.status = Some("Post content copied to clipboard".to_string());
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_picker_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Result<()> {
        let rows = self.picker_rows();
        let event = match code {
            KeyCode::Esc => Some(PickerEvent::Dismissed),
            KeyCode::Char('e') if modifiers.contains(KeyModifiers::CONTROL) => {
                Some(PickerEvent::Dismissed)
            }
            KeyCode::Left => {
                self.picker.move_left();
                None
            }
            KeyCode::Right => {
                self.picker.move_right(&rows);
                None
            }
            KeyCode::Up => {
                self.picker.move_up(&rows);
                None
            }
            KeyCode::Down => {
                self.picker.move_down(&rows);
                None
            }
            KeyCode::Char('f') => {
                if let Some(glyph) = self.picker.highlighted(&rows) {
                    let row_name = self.picker.highlighted_row(&rows).unwrap_or_default();
                    self.session.toggle_favorite(&glyph)?;
                    let rows = self.picker_rows();
                    self.picker.relocate(&rows, &row_name, &glyph);
                }
                None
            }
            KeyCode::Enter => self.picker.select(&rows),
            _ => None,
        };

        match event {
            Some(PickerEvent::Selected(glyph)) => {
                debug!("Picked {}", glyph);
                let caret = self.session.select_emoji(&glyph)?;
                self.focus_content_at(caret);
            }
            Some(PickerEvent::Dismissed) => self.session.close_picker(),
            None => {}
        }
        Ok(())
    }

    fn picker_rows(&self) -> Vec<PickerRow> {
        EmojiPicker::rows(self.session.emojis().favorites())
    }

    /// Alt+1..Alt+9 pick the first nine recent glyphs, Alt+0 the tenth.
    fn recent_slot(&self, digit: u32) -> Option<String> {
        let index = if digit == 0 { 9 } else { digit as usize - 1 };
        self.session.emojis().recent().get(index).cloned()
    }

    fn selected_post(&self) -> Option<&Post> {
        self.session.list_items().get(self.selected).copied()
    }

    fn copy_to_clipboard(&mut self, text: String) -> Result<()> {
        if self.clipboard.is_none() {
            let clipboard =
                Clipboard::new().map_err(|e| PostlineError::Clipboard(e.to_string()))?;
            self.clipboard = Some(clipboard);
        }
        if let Some(clipboard) = self.clipboard.as_mut() {
            clipboard
                .set_text(text)
                .map_err(|e| PostlineError::Clipboard(e.to_string()))?;
        }
        Ok(())
    }

    fn focus_content_at(&mut self, caret: usize) {
        self.sync_fields();
        self.content.set_caret_utf16(caret);
        self.focus = Focus::Content;
    }

    /// Pull the draft back into the on-screen fields after the session changed it.
    fn sync_fields(&mut self) {
        let draft = self.session.draft();
        self.title.set_value(&draft.title);
        self.content.set_value(&draft.content);
        self.date.set_value(&draft.publish_date);
        self.content.set_caret_utf16(self.session.cursor());
    }

    fn expanded(&self, id: PostId) -> bool {
        self.session.is_expanded(id)
    }
}

fn draw<B: Backend, S: DurableStore>(f: &mut Frame<B>, app: &App<S>) {
    let size = f.size();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(20), Constraint::Percentage(80)].as_ref())
        .split(size);

    draw_timeline(f, app, columns[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(2),
            ]
            .as_ref(),
        )
        .split(columns[1]);

    draw_field(f, app, Focus::Title, " Post Title ", &app.title, main[0]);
    draw_field(f, app, Focus::Content, " Content ", &app.content, main[1]);
    draw_field(f, app, Focus::PublishDate, " Publish Date (YYYY-MM-DD) ", &app.date, main[2]);
    draw_emoji_bar(f, app, main[3]);
    draw_publish_switch(f, app, main[4]);
    draw_posts(f, app, main[5]);
    draw_help(f, app, main[6]);

    if app.session.is_picker_open() {
        draw_picker(f, app, size);
    }
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn draw_timeline<B: Backend, S: DurableStore>(f: &mut Frame<B>, app: &App<S>, area: Rect) {
    let items: Vec<ListItem> = app
        .session
        .timeline_items()
        .into_iter()
        .map(|post| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(TEAL)),
                    Span::styled(
                        post.title.clone(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("  {}", post.publish_date),
                    Style::default().fg(MUTED),
                )),
            ])
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Timeline ")
            .style(Style::default().fg(Color::White)),
    );
    f.render_widget(list, area);
}

fn draw_field<B: Backend, S: DurableStore>(
    f: &mut Frame<B>,
    app: &App<S>,
    focus: Focus,
    title: &str,
    input: &TextField,
    area: Rect,
) {
    let focused = app.focus == focus && !app.session.is_picker_open();
    let inner_width = area.width.saturating_sub(2) as usize;
    let visible_lines = area.height.saturating_sub(2) as usize;

    let (rows, (line, col)) = if input.is_multiline() {
        input.wrapped(inner_width)
    } else {
        let (visible, col) = input.visible_window(inner_width);
        (vec![visible], (0, col))
    };
    let scroll = line.saturating_sub(visible_lines.saturating_sub(1));
    let lines: Vec<Line> = rows.into_iter().map(Line::from).collect();

    let paragraph = Paragraph::new(lines)
        .scroll((scroll as u16, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(focus_style(focused)),
        );
    f.render_widget(paragraph, area);

    if focused {
        let x = area.x + 1 + col.min(inner_width.saturating_sub(1)) as u16;
        let y = area.y + 1 + (line - scroll) as u16;
        f.set_cursor(x, y);
    }
}

fn draw_emoji_bar<B: Backend, S: DurableStore>(f: &mut Frame<B>, app: &App<S>, area: Rect) {
    let mut spans = Vec::new();
    for (i, glyph) in app.session.emojis().recent().iter().enumerate() {
        let slot = (i + 1) % 10;
        spans.push(Span::styled(format!("{}:", slot), Style::default().fg(MUTED)));
        spans.push(Span::raw(format!("{}  ", glyph)));
    }
    let toggle = if app.session.is_picker_open() {
        "Close Emoji Picker"
    } else {
        "Open Emoji Picker"
    };
    spans.push(Span::styled(
        format!("[Ctrl+E] {}", toggle),
        Style::default().fg(Color::Yellow),
    ));

    let bar = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Recent (Alt+digit) ")
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(bar, area);
}

fn draw_publish_switch<B: Backend, S: DurableStore>(f: &mut Frame<B>, app: &App<S>, area: Rect) {
    let published = app.session.draft().is_published;
    let (switch, label) = if published {
        (Span::styled(" ●━━ ", Style::default().fg(ACCENT)), "Published")
    } else {
        (Span::styled(" ━━○ ", Style::default().fg(Color::DarkGray)), "Draft")
    };
    let line = Line::from(vec![
        switch,
        Span::raw(label),
        Span::styled("  [Ctrl+P] toggle", Style::default().fg(MUTED)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_posts<B: Backend, S: DurableStore>(f: &mut Frame<B>, app: &App<S>, area: Rect) {
    let focused = app.focus == Focus::Posts && !app.session.is_picker_open();
    let items: Vec<ListItem> = app
        .session
        .list_items()
        .into_iter()
        .map(|post| {
            let marker = if post.is_published { "📢 " } else { "" };
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("{}{}", marker, post.title),
                    Style::default().fg(TEAL).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    post.publish_date.clone(),
                    Style::default().fg(MUTED),
                )),
            ];
            if app.expanded(post.id) {
                lines.extend(post.content.lines().map(|l| Line::from(l.to_string())));
                lines.push(Line::from(Span::styled(
                    "[e] Edit Post  [d] Delete Post  [y] Copy",
                    Style::default().fg(Color::Yellow),
                )));
            }
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Posts ")
                .border_style(focus_style(focused)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    if focused && !app.session.posts().is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_help<B: Backend, S: DurableStore>(f: &mut Frame<B>, app: &App<S>, area: Rect) {
    let help = Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(": Next field  "),
        Span::styled("Ctrl+S", Style::default().fg(Color::Yellow)),
        Span::raw(": Save Post  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": Expand (posts)  "),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::raw(": Exit"),
    ]);
    let mut lines = vec![help];
    if let Some(status) = app.status() {
        lines.push(Line::from(Span::styled(
            status.to_string(),
            Style::default().fg(Color::Green),
        )));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_picker<B: Backend, S: DurableStore>(f: &mut Frame<B>, app: &App<S>, size: Rect) {
    let area = centered_rect(60, 50, size);
    let rows = app.picker_rows();
    let (sel_row, sel_col) = app.picker.highlight();

    let mut lines = Vec::new();
    for (r, row) in rows.iter().enumerate() {
        lines.push(Line::from(Span::styled(
            row.name.clone(),
            Style::default().fg(MUTED),
        )));
        let mut spans = Vec::new();
        for (c, glyph) in row.glyphs.iter().enumerate() {
            let mut style = Style::default();
            if (r, c) == (sel_row, sel_col) {
                style = style.bg(ACCENT).fg(Color::Black);
            }
            if app.session.emojis().is_favorite(glyph) {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            spans.push(Span::styled(glyph.clone(), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled(
        "Arrows: Move  Enter: Insert  f: Favorite  Esc: Close",
        Style::default().fg(Color::Yellow),
    )));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Emoji ")
                .border_style(Style::default().fg(ACCENT)),
        ),
        area,
    );
}

// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
