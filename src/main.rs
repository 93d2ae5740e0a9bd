use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use tahmin_terminal::card::{MatchCard, PredictionState, ResultState};
use tahmin_terminal::config::AppConfig;
use tahmin_terminal::feed_source::FeedSource;
use tahmin_terminal::leaderboard::{
    RankedEntry, accuracy_is_good, correct_label, format_accuracy, rest_toggle_label,
};
use tahmin_terminal::provider::spawn_feed_loader;
use tahmin_terminal::state::{
    AppState, Delta, LoadingOverlay, SessionPhase, Wheel, apply_delta,
};
use tahmin_terminal::theme::{self, Palette};

const CARD_HEIGHT: u16 = 5;
const SKELETON_CARDS: usize = 3;
const LEADERBOARD_WIDTH: u16 = 42;

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            state: AppState::new(config, theme::load_theme()),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let ctrl_shift_d = key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('D') | KeyCode::Char('d'))
            && (key.modifiers.contains(KeyModifiers::SHIFT) || key.code == KeyCode::Char('D'));
        if ctrl_shift_d {
            self.toggle_theme();
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('t') | KeyCode::Char('T') => self.toggle_theme(),
            KeyCode::Char('m') | KeyCode::Char('M') => self.state.toggle_rest(),
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_matches_down(1),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_matches_up(1),
            KeyCode::PageDown => {
                let page = self.state.match_viewport.max(1);
                self.state.scroll_matches_down(page);
            }
            KeyCode::PageUp => {
                let page = self.state.match_viewport.max(1);
                self.state.scroll_matches_up(page);
            }
            KeyCode::Char('g') | KeyCode::Home => self.state.scroll_matches_top(),
            KeyCode::Char('G') | KeyCode::End => self.state.scroll_matches_bottom(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.state.on_wheel(Wheel::Down),
            MouseEventKind::ScrollUp => self.state.on_wheel(Wheel::Up),
            _ => {}
        }
    }

    fn toggle_theme(&mut self) {
        let theme = self.state.toggle_theme(Instant::now());
        if let Err(err) = theme::save_theme(theme) {
            self.state
                .push_log(format!("[WARN] Theme preference not saved: {err:#}"));
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = AppConfig::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    spawn_feed_loader(tx, FeedSource::parse(&config.feed_source));

    let mut app = App::new(config);
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta, Instant::now());
        }
        app.state.tick(Instant::now());

        let mut visible_cards = 0;
        terminal.draw(|f| visible_cards = ui(f, &app.state))?;
        app.state.set_match_viewport(visible_cards);
        app.state.poll_lazy_load();

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Draws one frame and returns how many match cards fit in the match area.
fn ui(frame: &mut Frame, state: &AppState) -> usize {
    let palette = Palette::for_theme(state.theme);
    let base = Style::default().fg(palette.fg).bg(palette.bg);
    frame.render_widget(Block::default().style(base), frame.size());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(state))
        .style(base)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(LEADERBOARD_WIDTH), Constraint::Min(30)])
        .split(chunks[1]);

    render_leaderboard(frame, columns[0], state, &palette);
    let visible = render_matches(frame, columns[1], state, &palette);

    let console = Paragraph::new(console_text(state))
        .style(Style::default().fg(palette.muted).bg(palette.bg))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    render_footer(frame, chunks[3], state, &palette);

    if state.overlay == LoadingOverlay::Visible {
        render_loading_overlay(frame, frame.size(), &palette);
    }
    if state.help_overlay {
        render_help_overlay(frame, frame.size(), &palette);
    }

    visible
}

fn header_text(state: &AppState) -> String {
    let status = match &state.session.phase {
        SessionPhase::Loading => "loading".to_string(),
        SessionPhase::Ready => format!(
            "{}/{} matches",
            state.cards.cards.len(),
            state.session.match_list.len()
        ),
        SessionPhase::Failed(_) => "no data".to_string(),
    };
    let line1 = format!(
        "  (o)  TAHMİN LİGİ | {} | {} | {}",
        state.config.tracked_team,
        status,
        state.theme.icon()
    );
    let line2 = "  /|\\".to_string();
    format!("{line1}\n{line2}")
}

fn render_leaderboard(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let block = Block::default().title("Puan Durumu").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let board = &state.session.leaderboard;
    let Some(top) = board.top.as_ref() else {
        let msg = if state.session.is_loading() {
            "Yükleniyor..."
        } else {
            "No players yet"
        };
        frame.render_widget(
            Paragraph::new(msg).style(Style::default().fg(palette.muted)),
            inner,
        );
        return;
    };

    let mut lines = player_lines(top, palette, true);
    if !board.rest.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("[m] {}", rest_toggle_label(state.rest_visible)),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::UNDERLINED),
        )));
        if state.rest_visible {
            for entry in &board.rest {
                lines.extend(player_lines(entry, palette, false));
            }
        }
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

fn player_lines(entry: &RankedEntry, palette: &Palette, winner: bool) -> Vec<Line<'static>> {
    let stats = &entry.stats;
    let name_style = if winner {
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.fg)
    };
    let acc_color = if accuracy_is_good(stats.accuracy) {
        palette.win
    } else {
        palette.loss
    };
    vec![
        Line::from(vec![
            Span::raw(format!("{} ", entry.badge())),
            Span::styled(stats.name.clone(), name_style),
            Span::styled(
                format!("  #{}", entry.position),
                Style::default().fg(palette.muted),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("   {} puan  ", stats.points),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(format_accuracy(stats.accuracy), Style::default().fg(acc_color)),
            Span::styled(
                format!("  {}", correct_label(stats)),
                Style::default().fg(palette.muted),
            ),
        ]),
    ]
}

fn render_matches(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) -> usize {
    let block = Block::default().title("Maçlar").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height < CARD_HEIGHT {
        return 0;
    }
    let visible = (inner.height / CARD_HEIGHT) as usize;

    if state.cards.skeleton {
        for i in 0..visible.min(SKELETON_CARDS) {
            let slot = card_slot(inner, i);
            let skeleton = Paragraph::new("░░░░░░░░░░  ░░░  ░░░░░░░░░░")
                .style(Style::default().fg(palette.muted))
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(skeleton, slot);
        }
        return visible;
    }

    let cards = &state.cards.cards;
    if cards.is_empty() {
        let msg = match &state.session.phase {
            SessionPhase::Failed(_) => "Maç verisi yüklenemedi",
            _ => "No matches for this team",
        };
        frame.render_widget(
            Paragraph::new(msg).style(Style::default().fg(palette.muted)),
            inner,
        );
        return visible;
    }

    let start = state.match_scroll.min(cards.len().saturating_sub(1));
    let end = (start + visible).min(cards.len());
    for (i, card) in cards[start..end].iter().enumerate() {
        render_card(frame, card_slot(inner, i), card, palette);
    }
    visible
}

fn card_slot(inner: Rect, i: usize) -> Rect {
    Rect {
        x: inner.x,
        y: inner.y + (i as u16) * CARD_HEIGHT,
        width: inner.width,
        height: CARD_HEIGHT,
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &MatchCard, palette: &Palette) {
    let result_color = result_color(card.result, palette);
    let border_style = if card.is_completed() {
        Style::default().fg(result_color)
    } else {
        Style::default().fg(palette.muted)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Line::from(vec![
        Span::styled(
            card.left.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            card.score.clone(),
            Style::default()
                .fg(result_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            card.right.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    let mut when = vec![Span::styled(
        format!("{}  {} {}", card.date, card.weekday, card.time),
        Style::default().fg(palette.muted),
    )];
    if card.is_completed() && !card.predictions.is_empty() {
        when.push(Span::styled(
            format!("  ✓ {}/{}", card.correct_count(), card.predictions.len()),
            Style::default().fg(palette.accent),
        ));
    }
    let when = Line::from(when);

    let mut cells = Vec::new();
    for (i, cell) in card.predictions.iter().enumerate() {
        if i > 0 {
            cells.push(Span::styled(" │ ", Style::default().fg(palette.muted)));
        }
        let value_style = match cell.state {
            PredictionState::Pending => Style::default().fg(palette.muted),
            PredictionState::Correct => Style::default()
                .fg(palette.win)
                .add_modifier(Modifier::BOLD),
            PredictionState::Incorrect => Style::default()
                .fg(palette.loss)
                .add_modifier(Modifier::CROSSED_OUT),
        };
        cells.push(Span::raw(format!("{} ", cell.name)));
        cells.push(Span::styled(cell.value.clone(), value_style));
    }

    let lines = vec![header, when, Line::from(cells)];
    frame.render_widget(Paragraph::new(lines), inner);
}

fn result_color(result: ResultState, palette: &Palette) -> Color {
    match result {
        ResultState::Pending => palette.muted,
        ResultState::Win => palette.win,
        ResultState::Loss => palette.loss,
        ResultState::Draw => palette.draw,
    }
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let keys = "j/k/↑/↓ Scroll | PgUp/PgDn Page | m Others | t Theme | ? Help | q Quit";
    let mut lines = vec![Line::from(Span::styled(
        keys,
        Style::default().fg(palette.muted),
    ))];
    if let Some((msg, _)) = &state.announcement {
        lines.push(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(palette.accent),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_loading_overlay(frame: &mut Frame, area: Rect, palette: &Palette) {
    let popup_area = centered_rect(30, 20, area);
    frame.render_widget(Clear, popup_area);
    let loading = Paragraph::new("\n  Yükleniyor...")
        .style(Style::default().fg(palette.fg).bg(palette.bg))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(loading, popup_area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect, palette: &Palette) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Tahmin Terminal - Help",
        "",
        "Matches:",
        "  j/k or ↑/↓        Scroll one card",
        "  PgUp / PgDn       Scroll one page",
        "  g / G             First / last card",
        "",
        "Leaderboard:",
        "  m                 Show / hide other players",
        "",
        "Global:",
        "  t / Ctrl+Shift+D  Toggle light/dark theme",
        "  ?                 Toggle help",
        "  q                 Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default().fg(palette.fg).bg(palette.bg));
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
