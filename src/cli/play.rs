//! Play command implementation - the interactive TUI.

// Frame timing converts durations to f64 milliseconds
#![allow(clippy::cast_precision_loss)]

use super::CliError;
use super::paint::{RasterView, raster_size};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::ThreadRng;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};
use std::io::stdout;
use std::time::{Duration, Instant};
use survival::game::{ItemKind, Tier};
use survival::render::{Hud, Raster};
use survival::session::{Banner, NoticeKind, Session, SessionConfig, Trigger};

/// Pixels the canvas jitters by while a disaster shakes the ship.
const SHAKE_PIXELS: i32 = 1;

/// Settings for the play loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlayConfig {
    /// Time between redraws.
    pub(crate) frame_interval: Duration,
}

impl PlayConfig {
    /// Config for a target frame rate (clamped to 1-120).
    pub(crate) fn with_fps(fps: u32) -> Self {
        Self {
            frame_interval: Duration::from_secs(1) / fps.clamp(1, 120),
        }
    }
}

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Game(Trigger),
    Quit,
}

fn action_for(code: KeyCode) -> Option<Action> {
    let trigger = match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('n' | ' ') | KeyCode::Enter => Trigger::Advance,
        KeyCode::Char('r') => Trigger::Restart,
        KeyCode::Char('1') => Trigger::Use(ItemKind::MedicalKit),
        KeyCode::Char('2') => Trigger::Use(ItemKind::RepairKit),
        KeyCode::Char('3') => Trigger::Use(ItemKind::EmergencyRation),
        KeyCode::Char('4') => Trigger::Use(ItemKind::FreshWater),
        _ => return None,
    };
    Some(Action::Game(trigger))
}

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up or drawn to.
pub(crate) fn execute(config: PlayConfig) -> Result<(), CliError> {
    let session = Session::new(SessionConfig::default(), rand::thread_rng());
    log::info!("starting play loop at {:?} per frame", config.frame_interval);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let mut app = App::new(session);
    let result = run_loop(&mut terminal, &mut app, config);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// App state for the TUI.
struct App {
    session: Session<ThreadRng>,
    started: Instant,
}

impl App {
    fn new(session: Session<ThreadRng>) -> Self {
        Self {
            session,
            started: Instant::now(),
        }
    }
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    config: PlayConfig,
) -> Result<(), CliError> {
    loop {
        let now = Instant::now();
        app.session.tick(now);

        let frame_start = Instant::now();
        terminal
            .draw(|f| ui(f, app, now))
            .map_err(|e| CliError::new(e.to_string()))?;
        log::trace!("frame drawn in {:?}", frame_start.elapsed());

        // Handle input with timeout
        if !event::poll(config.frame_interval)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match action_for(key.code) {
            Some(Action::Quit) => return Ok(()),
            Some(Action::Game(trigger)) => app.session.handle(trigger, Instant::now()),
            None => {}
        }
    }
}

fn ui(f: &mut Frame, app: &mut App, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    let hud = app.session.hud();
    render_header(f, chunks[0], &hud, app.session.state().alive);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(chunks[1]);

    render_canvas(f, main_chunks[0], app, now);
    render_dashboard(f, main_chunks[1], &hud);
    render_footer(f, chunks[2], app.session.banner().is_some());

    if let Some(banner) = app.session.banner() {
        render_banner(f, f.area(), banner);
    }
}

fn render_header(f: &mut Frame, area: Rect, hud: &Hud, alive: bool) {
    let status = if alive { "AFLOAT" } else { "LOST" };
    let title = format!(
        " Cargo Ship Survival | Day {} | Disasters {} | {status} ",
        hud.day,
        hud.progress()
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_canvas(f: &mut Frame, area: Rect, app: &mut App, now: Instant) {
    let block = Block::default().borders(Borders::ALL).title(" Ocean ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let elapsed_ms = app.started.elapsed().as_secs_f64() * 1000.0;
    let scene = app.session.scene(elapsed_ms);
    let (width, height) = raster_size(inner);
    let raster = Raster::render(&scene, width, height);

    let mut view = RasterView::new(&raster);
    if app.session.is_shaking(now) {
        let dx = app.session.jitter(SHAKE_PIXELS);
        let dy = app.session.jitter(SHAKE_PIXELS);
        view = view.shifted(dx, dy);
    }
    f.render_widget(view, inner);

    if let Some(notice) = app.session.notice() {
        render_notice(f, inner, &notice.title, &notice.body, notice.kind);
    }
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Normal => Color::Green,
        Tier::Warning => Color::Yellow,
        Tier::Critical => Color::Red,
    }
}

fn render_dashboard(f: &mut Frame, area: Rect, hud: &Hud) {
    let block = Block::default().borders(Borders::ALL).title(" Ship & Crew ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut rows = vec![Constraint::Length(2); hud.bars.len()];
    rows.push(Constraint::Min(0));
    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(rows)
        .split(inner);

    for (bar, slot) in hud.bars.iter().zip(slots.iter()) {
        let gauge = Gauge::default()
            .block(Block::default().title(bar.resource.label()))
            .gauge_style(Style::default().fg(tier_color(bar.tier)).bg(Color::Black))
            .percent(u16::from(bar.value))
            .label(bar.text());
        f.render_widget(gauge, *slot);
    }

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Stores",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for (i, item) in hud.items.iter().enumerate() {
        let style = if item.usable {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(
            format!(" [{}] {} x{}", i + 1, item.kind, item.count),
            style,
        )));
    }

    if let Some(rest) = slots.last() {
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), *rest);
    }
}

/// A rectangle of `width` × `height` cells centred in `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn render_notice(f: &mut Frame, area: Rect, title: &str, body: &str, kind: NoticeKind) {
    let (color, height) = match kind {
        NoticeKind::Disaster => (Color::Red, 7),
        NoticeKind::Item => (Color::Green, 3),
    };
    let popup = centered(area, 48, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(body.to_string())
            .block(block)
            .wrap(Wrap { trim: true }),
        popup,
    );
}

fn render_banner(f: &mut Frame, area: Rect, banner: &Banner) {
    let color = match banner {
        Banner::Victory { .. } => Color::Green,
        Banner::Defeat { .. } => Color::Red,
    };
    let popup = centered(area, 56, 8);

    let mut lines: Vec<Line> = banner.body().lines().map(|l| Line::from(l.to_string())).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[r] Restart  [q] Quit",
        Style::default().fg(Color::Gray),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} ", banner.title()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    f.render_widget(Clear, popup);
    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), popup);
}

fn render_footer(f: &mut Frame, area: Rect, game_over: bool) {
    let controls = if game_over {
        " [q] Quit  [r] Restart "
    } else {
        " [q] Quit  [n/Space] Next Day  [1-4] Use Item  [r] Restart "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_key_bindings() {
        assert_eq!(action_for(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(action_for(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(
            action_for(KeyCode::Enter),
            Some(Action::Game(Trigger::Advance))
        );
        assert_eq!(
            action_for(KeyCode::Char(' ')),
            Some(Action::Game(Trigger::Advance))
        );
        assert_eq!(
            action_for(KeyCode::Char('r')),
            Some(Action::Game(Trigger::Restart))
        );
        for (key, trigger) in ['1', '2', '3', '4'].into_iter().zip(Trigger::ITEMS) {
            assert_eq!(action_for(KeyCode::Char(key)), Some(Action::Game(trigger)));
        }
        assert_eq!(action_for(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_fps_clamped() {
        assert_eq!(PlayConfig::with_fps(0).frame_interval, Duration::from_secs(1));
        assert_eq!(
            PlayConfig::with_fps(1000).frame_interval,
            Duration::from_secs(1) / 120
        );
        assert_eq!(PlayConfig::with_fps(30).frame_interval, Duration::from_secs(1) / 30);
    }

    #[test]
    fn test_centered_fits() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 40, 40), area);
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_dashboard_and_banner_draw() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut session = Session::new(SessionConfig::default(), StdRng::seed_from_u64(1));
        let now = Instant::now();

        let hud = session.hud();
        terminal
            .draw(|f| {
                render_header(f, Rect::new(0, 0, 100, 3), &hud, true);
                render_dashboard(f, Rect::new(0, 3, 40, 20), &hud);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Day 1"));
        assert!(text.contains("0/25"));
        assert!(text.contains("Health"));
        assert!(text.contains("[4] fresh water x3"));

        while session.banner().is_none() {
            session.handle(Trigger::Advance, now);
        }
        let banner = *session.banner().unwrap();
        terminal
            .draw(|f| render_banner(f, f.area(), &banner))
            .unwrap();
        assert!(buffer_text(&terminal).contains(banner.title()));
    }
}
