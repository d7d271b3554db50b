use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use meonji_core::{ColorTheme, EngineConfig};
use meonji_engine::{Engine, PointerHub, Viewport};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Stylize,
    text::Line,
    DefaultTerminal, Frame,
};

mod canvas;

use canvas::{CircleCanvas, DOTS_PER_CELL_X, DOTS_PER_CELL_Y};

/// Target interval between animation ticks (~30 fps).
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Poll timeout while nothing animates (engine parked or absent), so
/// the loop blocks on input instead of spinning.
const IDLE_POLL: Duration = Duration::from_millis(100);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config = meonji_config::load();
    let terminal = ratatui::init();
    let result = match InputCapture::enable() {
        Ok(_capture) => App::new(config).run(terminal),
        Err(err) => Err(err.into()),
    };
    ratatui::restore();
    result
}

/// Scoped terminal input modes: mouse capture and focus-change
/// reporting are released on every exit path, including errors.
struct InputCapture;

impl InputCapture {
    fn enable() -> io::Result<Self> {
        execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)?;
        Ok(Self)
    }
}

impl Drop for InputCapture {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), DisableMouseCapture, DisableFocusChange);
    }
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Engine configuration loaded at startup.
    config: EngineConfig,
    /// Current particle color theme.
    color_theme: ColorTheme,
    /// Whether the terminal currently has focus. Tracked even while
    /// the engine is absent, so an engine created later starts in the
    /// right gate state.
    focused: bool,
    /// Shared last-known pointer position.
    hub: PointerHub,
    /// The particle engine; absent while the drawable area is zero.
    engine: Option<Engine>,
    /// Circles painted by the last tick.
    canvas: CircleCanvas,
    /// When the last animation tick ran.
    last_tick: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: EngineConfig) -> Self {
        Self {
            running: false,
            config,
            color_theme: ColorTheme::default(),
            focused: true,
            hub: PointerHub::new(),
            engine: None,
            canvas: CircleCanvas::new(),
            last_tick: Instant::now(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::vertical([
            Constraint::Fill(1),   // Particle canvas
            Constraint::Length(1), // Help text
        ])
        .split(frame.area());

        let (width, height) = dot_dimensions(chunks[0]);
        if self.engine.is_none() {
            self.init_engine(width, height);
        }

        if let Some(engine) = &mut self.engine {
            if engine.is_animating() && self.last_tick.elapsed() >= FRAME_INTERVAL {
                self.canvas.set_size(engine.viewport().width, engine.viewport().height);
                engine.tick(&mut self.canvas);
                self.last_tick = Instant::now();
            }
        }
        frame.render_widget(self.canvas.widget(), chunks[0]);

        let color = self.color_theme.rgb();
        let color = ratatui::style::Color::Rgb(color.0, color.1, color.2);
        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "r".bold().fg(color),
            " refresh  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[1]);
    }

    /// Build the engine once a drawable area exists. A zero-area
    /// terminal leaves the effect absent; we retry on the next frame.
    fn init_engine(&mut self, width: f32, height: f32) {
        let viewport = Viewport::new(width, height, 1.0);
        if let Some(mut engine) =
            Engine::new(self.config.clone(), viewport, self.hub.clone())
        {
            // A focused terminal is fully on screen; an unfocused one
            // counts as hidden.
            engine.observe_visibility(if self.focused { 1.0 } else { 0.0 });
            self.engine = Some(engine);
        }
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Uses polling with a timeout from [`App::poll_timeout`].
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.on_resize(cols, rows),
                Event::FocusGained => self.set_focus(true),
                Event::FocusLost => self.set_focus(false),
                _ => {}
            }
        }

        if let Some(engine) = &mut self.engine {
            engine.poll_resize(Instant::now());
        }
        Ok(())
    }

    /// How long the event poll may block. While animating this is the
    /// time until the next frame is due; while parked or absent the
    /// loop has nothing to schedule and blocks on input alone. A
    /// pending debounced resize caps either, so its settle fires on
    /// time.
    fn poll_timeout(&self, now: Instant) -> Duration {
        let animating = self.engine.as_ref().is_some_and(Engine::is_animating);
        let mut timeout = if animating {
            FRAME_INTERVAL.saturating_sub(now.duration_since(self.last_tick))
        } else {
            IDLE_POLL
        };
        if let Some(deadline) = self.engine.as_ref().and_then(Engine::resize_deadline) {
            timeout = timeout.min(deadline.saturating_duration_since(now));
        }
        timeout
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('r')) => self.refresh(),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            _ => {}
        }
    }

    /// Feed pointer movement into the shared hub, in dot coordinates
    /// at the hovered cell's center.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            let x = (f32::from(mouse.column) + 0.5) * f32::from(DOTS_PER_CELL_X);
            let y = (f32::from(mouse.row) + 0.5) * f32::from(DOTS_PER_CELL_Y);
            self.hub.update(x, y);
        }
    }

    /// Forward a terminal resize to the engine's debouncer.
    fn on_resize(&mut self, cols: u16, rows: u16) {
        let area = Rect::new(0, 0, cols, rows.saturating_sub(1));
        let (width, height) = dot_dimensions(area);
        if let Some(engine) = &mut self.engine {
            engine.resize(width, height, Instant::now());
        }
        // When the effect was absent (zero area), the next render pass
        // retries engine creation with the new dimensions.
    }

    /// Record the terminal's focus state and feed it to the gate as a
    /// visibility signal. Focus changes that arrive while the engine
    /// is absent still update the state, for when one gets created.
    fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        if let Some(engine) = &mut self.engine {
            engine.observe_visibility(if focused { 1.0 } else { 0.0 });
        }
    }

    /// Force a full particle respawn.
    fn refresh(&mut self) {
        if let Some(engine) = &mut self.engine {
            engine.refresh();
        }
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.color_theme = self.color_theme.next();
        if let Some(engine) = &mut self.engine {
            engine.set_color(self.color_theme.rgb());
        }
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Drawable area in braille dots (logical pixels).
fn dot_dimensions(area: Rect) -> (f32, f32) {
    (
        f32::from(area.width) * f32::from(DOTS_PER_CELL_X),
        f32::from(area.height) * f32::from(DOTS_PER_CELL_Y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_dimensions() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(dot_dimensions(area), (160.0, 96.0));
        assert_eq!(dot_dimensions(Rect::new(0, 0, 0, 10)), (0.0, 40.0));
    }

    #[test]
    fn test_poll_blocks_while_engine_absent() {
        let app = App::new(EngineConfig::default());
        // Even with a long-stale tick time, an absent engine must not
        // produce a zero timeout (that would spin the loop).
        assert_eq!(app.poll_timeout(app.last_tick + Duration::from_secs(60)), IDLE_POLL);
    }

    #[test]
    fn test_poll_blocks_while_parked() {
        let mut app = App::new(EngineConfig::default());
        app.init_engine(160.0, 96.0);
        assert!(app.engine.as_ref().is_some_and(Engine::is_animating));

        // Animating with a frame overdue: poll returns immediately.
        let late = app.last_tick + Duration::from_secs(1);
        assert_eq!(app.poll_timeout(late), Duration::ZERO);

        // Parked: the stale tick time no longer matters.
        app.set_focus(false);
        assert_eq!(app.poll_timeout(late), IDLE_POLL);

        app.set_focus(true);
        assert_eq!(app.poll_timeout(late), Duration::ZERO);
    }

    #[test]
    fn test_pending_resize_caps_parked_poll() {
        let mut app = App::new(EngineConfig::default());
        app.init_engine(160.0, 96.0);
        app.set_focus(false);

        let now = Instant::now();
        if let Some(engine) = &mut app.engine {
            engine.resize(200.0, 96.0, now);
        }
        // The debounce settle (100ms window, 40ms already elapsed)
        // comes before the idle timeout would expire.
        let timeout = app.poll_timeout(now + Duration::from_millis(40));
        assert_eq!(timeout, Duration::from_millis(60));
    }

    #[test]
    fn test_focus_lost_before_engine_exists() {
        let mut app = App::new(EngineConfig::default());
        // Focus changes arrive while the terminal still has zero area.
        app.set_focus(false);
        app.init_engine(160.0, 96.0);
        assert!(app.engine.as_ref().is_some_and(|e| !e.is_animating()));

        // Regaining focus resumes the freshly created engine.
        app.set_focus(true);
        assert!(app.engine.as_ref().is_some_and(Engine::is_animating));
    }
}
