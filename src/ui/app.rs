//! Main application state and logic.

use std::path::PathBuf;
use std::time::Instant;

use chrono::{DateTime, Local};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Clear, Paragraph},
    Frame,
};
use tracing::{error, info, warn};

use super::mascot::Mascot;
use super::theme::Theme;
use super::widgets::{
    BucketBar, CompletionScreen, FlashcardWidget, JudgmentButtons, KeyHints, MascotLine, MasteryProgress,
};
use crate::config::Config;
use crate::models::Deck;
use crate::session::{Session, SessionStart, SessionState};

// ══════════════════════════════════════════════════════════════════════════
// Application State
// ══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Study,
    Complete,
    Empty,
}

pub struct App {
    pub running: bool,

    // Config and theme
    pub config: Config,
    /// Where theme changes are saved; `None` leaves the file alone.
    config_path: Option<PathBuf>,
    pub theme: Theme,

    // Decks
    pub title: String,
    full_deck: Deck,
    review_deck: Option<Deck>,

    // Study state
    pub session: Session,
    pub session_start: DateTime<Local>,
    pub mascot: Mascot,
    rng: ChaCha8Rng,

    // Status message (shown temporarily)
    pub status_message: Option<(String, bool, Instant)>,
}

impl App {
    /// Start on the review deck when one is given, otherwise on the full deck.
    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        title: String,
        full_deck: Deck,
        review_deck: Option<Deck>,
        seed: Option<u64>,
    ) -> Self {
        let theme = Theme::from_name(&config.theme);
        let mut rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let first_deck = review_deck.clone().unwrap_or_else(|| full_deck.clone());
        let session = Session::with_rng(first_deck, ChaCha8Rng::seed_from_u64(rng.gen()));

        Self {
            running: true,
            config,
            config_path,
            theme,
            title,
            full_deck,
            review_deck,
            session,
            session_start: Local::now(),
            mascot: Mascot::idle(),
            rng,
            status_message: None,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.session.is_empty() {
            Screen::Empty
        } else if self.session.is_complete() {
            Screen::Complete
        } else {
            Screen::Study
        }
    }

    pub fn is_review_mode(&self) -> bool {
        self.review_deck.is_some()
    }

    pub fn cycle_theme(&mut self) {
        let new_theme_name = self.theme.name.next();
        self.theme = Theme::new(new_theme_name);
        self.config.theme = new_theme_name.as_str().to_string();
        if let Some(path) = &self.config_path {
            if let Err(err) = self.config.save_to(path) {
                warn!(%err, "failed to save config");
            }
        }
    }

    pub fn flip(&mut self) {
        self.session.flip();
    }

    /// Forward a judgment, but only once the answer is showing.
    pub fn judge(&mut self, correct: bool) {
        if self.session.state() != SessionState::Revealed {
            return;
        }

        match self.session.judge(correct) {
            Ok(outcome) => {
                self.mascot = Mascot::react(&outcome, &mut self.rng);
            }
            Err(err) => {
                error!(%err, "judgment rejected");
                self.set_status(format!("Error: {}", err), true);
            }
        }
    }

    /// Study the current deck again from scratch.
    pub fn restart(&mut self) {
        self.begin(None);
    }

    /// Leave review mode and go back to the full deck.
    pub fn back_to_all_cards(&mut self) {
        if self.review_deck.take().is_some() {
            info!("leaving review mode");
            self.begin(Some(self.full_deck.clone()));
        }
    }

    fn begin(&mut self, deck: Option<Deck>) {
        let start = self.session.restart(deck);
        self.session_start = Local::now();
        self.mascot = Mascot::idle();

        if start == SessionStart::NothingToStudy {
            self.set_status("Nothing to study in this deck".to_string(), false);
        }
    }

    pub fn set_status(&mut self, message: String, is_error: bool) {
        self.status_message = Some((message, is_error, Instant::now()));
    }

    // ══════════════════════════════════════════════════════════════════════
    // Event Handling
    // ══════════════════════════════════════════════════════════════════════

    pub fn handle_events(&mut self) -> anyhow::Result<()> {
        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    return Ok(());
                }
                self.handle_key(key.code);
            }
        }
        self.mascot.settle();
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        match self.screen() {
            Screen::Study => self.handle_study_keys(key),
            Screen::Complete | Screen::Empty => self.handle_complete_keys(key),
        }
    }

    fn handle_study_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char(' ') | KeyCode::Enter => self.flip(),
            KeyCode::Right | KeyCode::Char('l') => self.judge(true),
            KeyCode::Left | KeyCode::Char('h') => self.judge(false),
            KeyCode::Char('r') => self.restart(),
            KeyCode::Char('v') => self.back_to_all_cards(),
            _ => {}
        }
    }

    fn handle_complete_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.running = false,
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('r') | KeyCode::Enter => self.restart(),
            KeyCode::Char('v') => self.back_to_all_cards(),
            _ => {}
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Rendering
    // ══════════════════════════════════════════════════════════════════════

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Clear with background
        frame.render_widget(Clear, area);
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.colors.bg_dark)),
            area,
        );

        match self.screen() {
            Screen::Study => self.render_study(frame, area),
            Screen::Complete => self.render_complete(frame, area),
            Screen::Empty => self.render_empty(frame, area),
        }

        self.render_status(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let header = Paragraph::new(Line::from(vec![Span::styled(self.title.as_str(), self.theme.title())]))
            .alignment(Alignment::Center);
        frame.render_widget(header, area);
    }

    fn render_study(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3),   // Header
            Constraint::Length(1),   // Buckets
            Constraint::Length(1),   // Progress
            Constraint::Length(1),   // Separator
            Constraint::Length(1),   // Mascot
            Constraint::Length(1),   // Separator
            Constraint::Min(8),      // Card
            Constraint::Length(1),   // Separator
            Constraint::Length(3),   // Buttons
            Constraint::Length(2),   // Hints
        ])
        .split(area);

        self.render_header(frame, chunks[0]);

        let counts = self.session.counts();
        frame.render_widget(BucketBar::new(counts, self.is_review_mode(), &self.theme), chunks[1]);
        frame.render_widget(
            MasteryProgress::new(counts.mastered, counts.total(), &self.theme),
            centered_rect(60, 100, chunks[2]),
        );
        frame.render_widget(
            MascotLine::new(&self.mascot, self.session.session_streak(), &self.theme),
            chunks[4],
        );

        let revealed = self.session.state() == SessionState::Revealed;
        if let Some(card) = self.session.current_card() {
            frame.render_widget(
                FlashcardWidget::new(card, revealed, self.session.current_bucket(), &self.theme),
                centered_rect(80, 100, chunks[6]),
            );
        }

        frame.render_widget(
            JudgmentButtons::new(revealed, &self.theme),
            centered_rect(60, 100, chunks[8]),
        );

        let mut hints: Vec<(&str, &str)> = if revealed {
            vec![("←/h", "not yet"), ("→/l", "got it"), ("Space", "flip back")]
        } else {
            vec![("Space", "show answer")]
        };
        hints.push(("r", "restart"));
        if self.is_review_mode() {
            hints.push(("v", "all cards"));
        }
        hints.push(("t", self.theme.name.display_name()));
        hints.push(("q", "quit"));
        frame.render_widget(KeyHints::new(&hints, &self.theme), chunks[9]);
    }

    fn render_complete(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(3),   // Header
            Constraint::Length(1),   // Mascot
            Constraint::Min(12),     // Summary
        ])
        .split(area);

        self.render_header(frame, chunks[0]);
        frame.render_widget(
            MascotLine::new(&self.mascot, self.session.session_streak(), &self.theme),
            chunks[1],
        );

        let minutes = (Local::now() - self.session_start).num_minutes();
        let summary = CompletionScreen::new(
            self.session.deck().len(),
            self.session.judgments(),
            minutes,
            self.is_review_mode(),
            &self.theme,
        );
        frame.render_widget(summary, centered_rect(50, 60, chunks[2]));
    }

    fn render_empty(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.colors.text_dim))
            .title(" Nothing to study ")
            .title_alignment(Alignment::Center);

        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                "This deck has no cards.",
                Style::default().fg(self.theme.colors.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Try another --deck, or loosen --category / --difficulty.",
                Style::default().fg(self.theme.colors.text_muted),
            )),
            Line::from(""),
        ];
        if self.is_review_mode() {
            text.push(Line::from(vec![
                Span::styled("v", self.theme.key_highlight()),
                Span::styled(" all cards  ", self.theme.key_hint()),
            ]));
        }
        text.push(Line::from(vec![
            Span::styled("q", self.theme.key_highlight()),
            Span::styled(" quit", self.theme.key_hint()),
        ]));

        let para = Paragraph::new(text).alignment(Alignment::Center).block(block);
        frame.render_widget(para, centered_rect(60, 40, area));
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        // Show status message if recent (within 5 seconds)
        if let Some((ref msg, is_error, time)) = self.status_message {
            if time.elapsed().as_secs() < 5 {
                let status = Paragraph::new(msg.as_str())
                    .alignment(Alignment::Center)
                    .style(self.theme.status(is_error));
                let status_area = Rect {
                    x: area.x,
                    y: area.bottom().saturating_sub(3),
                    width: area.width,
                    height: 1,
                };
                frame.render_widget(status, status_area);
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════

/// Create a centered rect using up certain percentage of the available rect.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}
