//! TUI application state and event loop.
//!
//! The metric feed runs as a task on the tokio runtime and owns the window;
//! the draw loop only reads the latest published snapshot. AI calls are
//! spawned onto the same runtime and report back over a channel, so neither
//! a slow model nor a slow terminal ever delays a tick.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use kafkapulse_assistant::Assistant;
use kafkapulse_core::{ClusterInfo, DashboardSnapshot, FeedHandle, MetricWindow, Transcript};

// ---------------------------------------------------------------------------
// InputMode
// ---------------------------------------------------------------------------

/// Where key presses go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Single-key commands.
    #[default]
    Normal,
    /// Typing into the chat input line.
    Editing,
}

/// Results coming back from spawned assistant calls.
#[derive(Debug)]
enum AssistantEvent {
    Summary(String),
    Reply(String),
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    runtime: Handle,
    feed: FeedHandle,
    cluster: ClusterInfo,
    assistant: Assistant,
    window: Arc<MetricWindow>,
    transcript: Transcript,
    input: String,
    input_mode: InputMode,
    summary: Option<String>,
    analyzing: bool,
    events_tx: mpsc::UnboundedSender<AssistantEvent>,
    events_rx: mpsc::UnboundedReceiver<AssistantEvent>,
    running: bool,
    export_dir: PathBuf,
    last_export: Option<PathBuf>,
    export_error: Option<String>,
}

impl App {
    pub fn new(
        runtime: Handle,
        feed: FeedHandle,
        cluster: ClusterInfo,
        assistant: Assistant,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let window = feed.current();
        Self {
            runtime,
            feed,
            cluster,
            assistant,
            window,
            transcript: Transcript::new(),
            input: String::new(),
            input_mode: InputMode::default(),
            summary: None,
            analyzing: false,
            events_tx,
            events_rx,
            running: true,
            export_dir: PathBuf::from("."),
            last_export: None,
            export_error: None,
        }
    }

    /// Directory that `s` writes snapshots into.
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Restore the terminal before the panic message is printed.
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show);
            original_hook(info);
        }));

        let result = self.run_loop(&mut terminal);

        let _ = std::panic::take_hook();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        )?;

        result
    }

    fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        self.request_analysis();

        while self.is_running() {
            self.refresh();
            terminal.draw(|f| super::ui::draw(f, self))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Pick up the newest window and any finished assistant calls.
    pub fn refresh(&mut self) {
        self.window = self.feed.current();
        while let Ok(event) = self.events_rx.try_recv() {
            match event {
                AssistantEvent::Summary(text) => {
                    self.summary = Some(text);
                    self.analyzing = false;
                }
                AssistantEvent::Reply(text) => self.transcript.receive(text),
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Editing => self.handle_editing_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('a') => {
                self.request_analysis();
            }
            KeyCode::Char('p') => {
                let paused = self.feed.toggle_pause();
                log::info!("feed {}", if paused { "paused" } else { "resumed" });
            }
            KeyCode::Char('n') => {
                self.feed.advance_now();
            }
            KeyCode::Char('s') => self.export_snapshot(),
            KeyCode::Char('i') | KeyCode::Tab => self.input_mode = InputMode::Editing,
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Tab => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                self.send_message();
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    /// Start a summary of the current window unless one is already running.
    pub fn request_analysis(&mut self) -> bool {
        if self.analyzing {
            return false;
        }
        self.analyzing = true;

        let assistant = self.assistant.clone();
        let window = Arc::clone(&self.window);
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let summary = assistant.summarize(&window).await;
            let _ = tx.send(AssistantEvent::Summary(summary));
        });
        true
    }

    /// Send the input line as a chat question. Blank input, or input while a
    /// reply is pending, is ignored and left in place.
    pub fn send_message(&mut self) -> bool {
        let Some(history) = self.transcript.submit(&self.input) else {
            return false;
        };
        self.input.clear();

        let assistant = self.assistant.clone();
        let latest = self.window.latest().cloned();
        let tx = self.events_tx.clone();
        self.runtime.spawn(async move {
            let reply = assistant.chat(&history, latest.as_ref()).await;
            let _ = tx.send(AssistantEvent::Reply(reply));
        });
        true
    }

    fn export_snapshot(&mut self) {
        let snapshot = DashboardSnapshot::capture(&self.cluster, &self.window);
        match snapshot.write_to_dir(&self.export_dir) {
            Ok(path) => {
                self.last_export = Some(path);
                self.export_error = None;
            }
            Err(e) => {
                log::warn!("snapshot export failed: {e}");
                self.export_error = Some(e.to_string());
            }
        }
    }

    /// Give up the feed so the caller can shut it down.
    pub fn into_feed(self) -> FeedHandle {
        self.feed
    }

    // --- Accessors for the renderer ---

    pub fn window(&self) -> &MetricWindow {
        &self.window
    }

    pub fn cluster(&self) -> &ClusterInfo {
        &self.cluster
    }

    pub fn model(&self) -> &str {
        self.assistant.model()
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_mode(&self) -> InputMode {
        self.input_mode
    }

    pub fn is_paused(&self) -> bool {
        self.feed.is_paused()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn last_export(&self) -> Option<&PathBuf> {
        self.last_export.as_ref()
    }

    pub fn export_error(&self) -> Option<&str> {
        self.export_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kafkapulse_assistant::{StaticGenerator, TextGenerator};
    use kafkapulse_core::{ChatRole, FeedConfig, FixedJitter, MetricFeed, MetricSimulator};

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    fn app_with(rt: &tokio::runtime::Runtime, generator: Arc<StaticGenerator>) -> App {
        let _guard = rt.enter();
        let feed = MetricFeed::spawn(
            MetricSimulator::with_jitter(Box::new(FixedJitter::new(0.4))),
            FeedConfig {
                window_size: 20,
                interval: Duration::from_secs(3600),
            },
        );
        let assistant = Assistant::new(generator as Arc<dyn TextGenerator>);
        App::new(rt.handle().clone(), feed, ClusterInfo::default(), assistant)
    }

    /// Refresh until no assistant call is outstanding.
    fn settle(app: &mut App) {
        for _ in 0..500 {
            app.refresh();
            if !app.is_analyzing() && !app.transcript().is_pending() {
                return;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        panic!("assistant call did not finish");
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c));
        }
    }

    #[test]
    fn starts_with_initialized_window() {
        let rt = runtime();
        let app = app_with(&rt, Arc::new(StaticGenerator::reply("ok")));
        assert_eq!(app.window().len(), 20);
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert!(app.summary().is_none());
        assert!(app.is_running());
    }

    #[test]
    fn q_and_esc_quit() {
        let rt = runtime();
        let mut app = app_with(&rt, Arc::new(StaticGenerator::reply("ok")));
        app.handle_key(KeyCode::Char('q'));
        assert!(!app.is_running());

        let mut app = app_with(&rt, Arc::new(StaticGenerator::reply("ok")));
        app.handle_key(KeyCode::Esc);
        assert!(!app.is_running());
    }

    #[test]
    fn analysis_runs_once_at_a_time() {
        let rt = runtime();
        let generator = Arc::new(StaticGenerator::reply("## Stable"));
        let mut app = app_with(&rt, Arc::clone(&generator));

        app.handle_key(KeyCode::Char('a'));
        assert!(app.is_analyzing());
        assert!(!app.request_analysis());

        settle(&mut app);
        assert_eq!(app.summary(), Some("## Stable"));
        assert_eq!(generator.calls(), 1);

        assert!(app.request_analysis());
        settle(&mut app);
        assert_eq!(generator.calls(), 2);
    }

    #[test]
    fn chat_round_trip() {
        let rt = runtime();
        let generator = Arc::new(StaticGenerator::reply("Connections look normal."));
        let mut app = app_with(&rt, Arc::clone(&generator));

        app.handle_key(KeyCode::Char('i'));
        assert_eq!(app.input_mode(), InputMode::Editing);
        // Command keys are plain text while editing.
        type_text(&mut app, "is q normal?");
        assert!(app.is_running());
        app.handle_key(KeyCode::Enter);
        assert!(app.input().is_empty());
        assert!(app.transcript().is_pending());

        settle(&mut app);
        let roles: Vec<ChatRole> = app.transcript().messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::User, ChatRole::Assistant]);
        assert_eq!(
            app.transcript().messages()[1].content,
            "Connections look normal."
        );
        let prompt = generator.last_request().unwrap().prompt;
        assert!(prompt.starts_with("User question: is q normal?"));
        assert!(prompt.contains("\"connections\":840"));
    }

    #[test]
    fn blank_or_pending_input_is_ignored() {
        let rt = runtime();
        let generator = Arc::new(StaticGenerator::reply("hi"));
        let mut app = app_with(&rt, Arc::clone(&generator));

        app.handle_key(KeyCode::Tab);
        type_text(&mut app, "   ");
        app.handle_key(KeyCode::Enter);
        assert!(app.transcript().is_empty());
        assert_eq!(app.input(), "   ");

        app.input.clear();
        type_text(&mut app, "first");
        assert!(app.send_message());
        type_text(&mut app, "second");
        assert!(!app.send_message());
        assert_eq!(app.input(), "second");

        settle(&mut app);
        assert_eq!(generator.calls(), 1);
    }

    #[test]
    fn backspace_and_esc_in_editing() {
        let rt = runtime();
        let mut app = app_with(&rt, Arc::new(StaticGenerator::reply("ok")));
        app.handle_key(KeyCode::Char('i'));
        type_text(&mut app, "abc");
        app.handle_key(KeyCode::Backspace);
        assert_eq!(app.input(), "ab");

        app.handle_key(KeyCode::Esc);
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert!(app.is_running());
    }

    #[test]
    fn p_toggles_feed_pause() {
        let rt = runtime();
        let mut app = app_with(&rt, Arc::new(StaticGenerator::reply("ok")));
        app.handle_key(KeyCode::Char('p'));
        assert!(app.is_paused());
        app.handle_key(KeyCode::Char('p'));
        assert!(!app.is_paused());
    }

    #[test]
    fn n_advances_the_window() {
        let rt = runtime();
        let mut app = app_with(&rt, Arc::new(StaticGenerator::reply("ok")));
        app.handle_key(KeyCode::Char('n'));
        for _ in 0..500 {
            app.refresh();
            if app.window().generation() == 1 {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(app.window().generation(), 1);
        assert_eq!(app.window().len(), 20);
    }

    #[test]
    fn s_exports_snapshot() {
        let rt = runtime();
        let tmp = tempfile::tempdir().unwrap();
        let mut app =
            app_with(&rt, Arc::new(StaticGenerator::reply("ok"))).with_export_dir(tmp.path());
        app.handle_key(KeyCode::Char('s'));

        let path = app.last_export().cloned().unwrap();
        assert!(path.starts_with(tmp.path()));
        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["records"].as_array().map(|a| a.len()), Some(20));
        assert!(app.export_error().is_none());
    }

    #[test]
    fn failed_export_is_reported() {
        let rt = runtime();
        let tmp = tempfile::tempdir().unwrap();
        let mut app = app_with(&rt, Arc::new(StaticGenerator::reply("ok")))
            .with_export_dir(tmp.path().join("missing"));
        app.handle_key(KeyCode::Char('s'));
        assert!(app.last_export().is_none());
        assert!(app.export_error().is_some());
    }

    #[test]
    fn dashboard_renders_all_panels() {
        use ratatui::backend::TestBackend;

        let rt = runtime();
        let app = app_with(&rt, Arc::new(StaticGenerator::reply("ok")));
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|f| super::super::ui::draw(f, &app)).unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        for text in [
            "KafkaPulse",
            "Production-Primary (lkc-p8y3q7)",
            "Active Connections",
            "840",
            "1700 req/s",
            "Bytes In",
            "Connection History",
            "AI Cluster Analysis",
            "Kafka Intelligence Assistant",
        ] {
            assert!(screen.contains(text), "missing {text:?}");
        }
    }
}
