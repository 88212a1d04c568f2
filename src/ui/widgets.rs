//! Custom widgets for the flashcard TUI.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Gauge, Paragraph, Widget, Wrap},
};

use super::mascot::Mascot;
use super::theme::{icons, Theme};
use crate::models::{Bucket, BucketCounts, Card, Judgment};

// ══════════════════════════════════════════════════════════════════════════
// Bucket Bar Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct BucketBar<'a> {
    counts: BucketCounts,
    review_mode: bool,
    theme: &'a Theme,
}

impl<'a> BucketBar<'a> {
    pub fn new(counts: BucketCounts, review_mode: bool, theme: &'a Theme) -> Self {
        Self { counts, review_mode, theme }
    }
}

impl Widget for BucketBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::horizontal([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

        for (i, bucket) in Bucket::ALL.into_iter().enumerate() {
            let text = Line::from(vec![
                Span::styled("● ", self.theme.bucket(bucket)),
                Span::styled(
                    format!("{}: ", bucket.label()),
                    Style::default().fg(self.theme.colors.text_muted),
                ),
                Span::styled(self.counts.get(bucket).to_string(), self.theme.bucket(bucket)),
            ]);
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .render(chunks[i], buf);
        }

        let mode = if self.review_mode {
            Span::styled(
                "Review Mode",
                Style::default()
                    .fg(self.theme.colors.secondary)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                format!("Total: {}", self.counts.total()),
                Style::default().fg(self.theme.colors.text_dim),
            )
        };
        Paragraph::new(Line::from(mode))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Mastery Progress Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct MasteryProgress<'a> {
    mastered: usize,
    total: usize,
    theme: &'a Theme,
}

impl<'a> MasteryProgress<'a> {
    pub fn new(mastered: usize, total: usize, theme: &'a Theme) -> Self {
        Self { mastered, total, theme }
    }

    fn percent(&self) -> u16 {
        if self.total == 0 {
            0
        } else {
            (self.mastered * 100 / self.total) as u16
        }
    }
}

impl Widget for MasteryProgress<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let percent = self.percent();
        Gauge::default()
            .gauge_style(
                Style::default()
                    .fg(self.theme.colors.bucket_mastered)
                    .bg(self.theme.colors.bg_card),
            )
            .label(Span::styled(
                format!("Mastered {}/{} ({}%)", self.mastered, self.total, percent),
                Style::default()
                    .fg(self.theme.colors.text)
                    .add_modifier(Modifier::BOLD),
            ))
            .percent(percent)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Flashcard Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct FlashcardWidget<'a> {
    card: &'a Card,
    revealed: bool,
    bucket: Option<Bucket>,
    theme: &'a Theme,
}

impl<'a> FlashcardWidget<'a> {
    pub fn new(card: &'a Card, revealed: bool, bucket: Option<Bucket>, theme: &'a Theme) -> Self {
        Self { card, revealed, bucket, theme }
    }
}

impl Widget for FlashcardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (label, label_style, border_color, content, flip_hint) = if self.revealed {
            ("ANSWER", self.theme.card_back(), self.theme.colors.success, &self.card.back, " Space to flip back ")
        } else {
            ("QUESTION", self.theme.card_front(), self.theme.colors.accent, &self.card.front, " Space to flip ")
        };

        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(self.theme.colors.bg_card))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(label, label_style),
                Span::raw(" "),
            ]).alignment(Alignment::Center))
            .title_bottom(Line::from(Span::styled(flip_hint, self.theme.key_hint())).alignment(Alignment::Right));

        if !self.card.category.is_empty() {
            block = block.title(
                Line::from(Span::styled(
                    format!(" {} ", self.card.category),
                    Style::default().fg(self.theme.colors.text_muted),
                ))
                .alignment(Alignment::Left),
            );
        }
        if let Some(bucket) = self.bucket {
            block = block.title(
                Line::from(Span::styled(format!(" {} ", bucket.label()), self.theme.bucket(bucket)))
                    .alignment(Alignment::Right),
            );
        }

        let inner = block.inner(area);
        block.render(area, buf);

        let width = inner.width.saturating_sub(4);
        let wrapped_height = textwrap::wrap(content, width.max(1) as usize).len() as u16;
        let vertical_padding = inner.height.saturating_sub(wrapped_height) / 2;

        let content_area = Rect {
            x: inner.x + 2,
            y: inner.y + vertical_padding,
            width,
            height: inner.height.saturating_sub(vertical_padding),
        };

        Paragraph::new(content.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(self.theme.colors.text))
            .render(content_area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Judgment Buttons Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct JudgmentButtons<'a> {
    enabled: bool,
    theme: &'a Theme,
}

impl<'a> JudgmentButtons<'a> {
    pub fn new(enabled: bool, theme: &'a Theme) -> Self {
        Self { enabled, theme }
    }
}

impl Widget for JudgmentButtons<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);

        let buttons = [
            (Judgment::NotYet, format!("{} {}", icons::ARROW_LEFT, Judgment::NotYet.name())),
            (Judgment::GotIt, format!("{} {}", Judgment::GotIt.name(), icons::ARROW_RIGHT)),
        ];

        for (i, (judgment, text)) in buttons.iter().enumerate() {
            let color = if self.enabled {
                judgment.color_for_theme(self.theme)
            } else {
                self.theme.colors.text_dim
            };

            let button = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color));

            let inner = button.inner(chunks[i]);
            button.render(chunks[i], buf);

            Paragraph::new(Line::from(Span::styled(
                text.as_str(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )))
            .alignment(Alignment::Center)
            .render(inner, buf);
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Mascot Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct MascotLine<'a> {
    mascot: &'a Mascot,
    streak: u32,
    theme: &'a Theme,
}

impl<'a> MascotLine<'a> {
    pub fn new(mascot: &'a Mascot, streak: u32, theme: &'a Theme) -> Self {
        Self { mascot, streak, theme }
    }
}

impl Widget for MascotLine<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(icons::CAT, Style::default()),
            Span::raw(" "),
            Span::styled(self.mascot.mood.face(), Style::default().fg(self.theme.colors.primary)),
        ];

        if let Some(ref speech) = self.mascot.speech {
            spans.push(Span::styled(
                format!("  « {} »", speech),
                Style::default()
                    .fg(self.theme.colors.secondary)
                    .add_modifier(Modifier::ITALIC),
            ));
        }

        if self.streak >= 4 {
            let icon = if self.streak >= 7 { icons::FIRE } else { icons::BOLT };
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                format!("{} {}x Streak!", icon, self.streak),
                self.theme.streak(self.streak),
            ));
        }

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Key Hints Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct KeyHints<'a> {
    hints: &'a [(&'a str, &'a str)],
    theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = self
            .hints
            .iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(*key, self.theme.key_highlight()),
                    Span::styled(format!(" {} ", desc), self.theme.key_hint()),
                    Span::styled("│ ", Style::default().fg(self.theme.colors.text_dim)),
                ]
            })
            .collect();

        let line = Line::from(spans);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Completion Screen Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct CompletionScreen<'a> {
    total_cards: usize,
    judgments: usize,
    duration_mins: i64,
    review_mode: bool,
    theme: &'a Theme,
}

impl<'a> CompletionScreen<'a> {
    pub fn new(total_cards: usize, judgments: usize, duration_mins: i64, review_mode: bool, theme: &'a Theme) -> Self {
        Self {
            total_cards,
            judgments,
            duration_mins,
            review_mode,
            theme,
        }
    }
}

impl Widget for CompletionScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.colors.success))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(format!("{} ALL MASTERED {}", icons::SPARKLE, icons::SPARKLE), self.theme.card_back()),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);

        let stat = |label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(label, Style::default().fg(self.theme.colors.text_muted)),
                Span::styled(
                    value,
                    Style::default().fg(self.theme.colors.primary).add_modifier(Modifier::BOLD),
                ),
            ])
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                format!("PURR-FECT! {}", icons::RAINBOW),
                Style::default().fg(self.theme.colors.success).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(Span::styled(
                format!("You've mastered all {} cards. Amazing work!", self.total_cards),
                Style::default().fg(self.theme.colors.text),
            )),
            Line::from(""),
            stat("Judgments: ", self.judgments.to_string()),
            stat("Time: ", format!("{} minutes", self.duration_mins)),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(self.theme.colors.text_dim)),
                Span::styled("r", self.theme.key_highlight()),
                Span::styled(" to study again", Style::default().fg(self.theme.colors.text_dim)),
            ]),
        ];

        if self.review_mode {
            text.push(Line::from(vec![
                Span::styled("Press ", Style::default().fg(self.theme.colors.text_dim)),
                Span::styled("v", self.theme.key_highlight()),
                Span::styled(" to go back to all cards", Style::default().fg(self.theme.colors.text_dim)),
            ]));
        }

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
