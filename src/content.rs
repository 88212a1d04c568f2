//! Deck suppliers: content files, CSV imports and quiz review decks.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::{Card, Deck};

/// Bundled deck: Edo Japan
const BUNDLED_CONTENT: &str = include_str!("../content/flashcards.json");

/// A JSON content file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub cards: Vec<Card>,
}

impl ContentFile {
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_CONTENT).context("Bundled content is malformed")
    }

    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a `.json` content file or import a `.csv` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file: {:?}", path))?;

        let is_csv = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));

        let mut file = if is_csv {
            Self {
                title: None,
                cards: parse_csv(&content),
            }
        } else {
            Self::parse(&content)
                .with_context(|| format!("Failed to parse content file: {:?}", path))?
        };

        if file.title.is_none() {
            file.title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(filename_to_title_case);
        }

        debug!(path = %path.display(), cards = file.cards.len(), "loaded content");
        Ok(file)
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("Flashcards")
    }
}

/// Parse `front,back[,category[,difficulty]]` lines into cards.
pub fn parse_csv(content: &str) -> Vec<Card> {
    let mut cards = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();

        // Skip header
        if i == 0 && parts[0].eq_ignore_ascii_case("front") {
            continue;
        }
        if parts.len() < 2 {
            continue;
        }

        let (front, back) = (parts[0], parts[1]);
        if front.is_empty() || back.is_empty() {
            warn!(line = i + 1, "skipping csv row with empty side");
            continue;
        }

        let mut card = Card::new(front.to_string(), back.to_string());
        if let Some(category) = parts.get(2) {
            card = card.with_category(*category);
        }
        if let Some(difficulty) = parts.get(3) {
            card = card.with_difficulty(*difficulty);
        }
        cards.push(card);
    }

    cards
}

/// Case-insensitive category/difficulty selection.
#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    pub category: Option<String>,
    pub difficulty: Option<String>,
}

impl CardFilter {
    pub fn matches(&self, card: &Card) -> bool {
        let category_ok = self
            .category
            .as_deref()
            .map_or(true, |c| card.category.eq_ignore_ascii_case(c));
        let difficulty_ok = self
            .difficulty
            .as_deref()
            .map_or(true, |d| card.difficulty.eq_ignore_ascii_case(d));
        category_ok && difficulty_ok
    }

    pub fn apply(&self, cards: Vec<Card>) -> Vec<Card> {
        cards.into_iter().filter(|c| self.matches(c)).collect()
    }
}

/// Distinct categories with their card counts, sorted by name.
pub fn categories(cards: &[Card]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for card in cards {
        let name = if card.category.is_empty() {
            "Other"
        } else {
            card.category.as_str()
        };
        *counts.entry(name).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

// ══════════════════════════════════════════════════════════════════════════
// Quiz Review Decks
// ══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    MultipleChoice,
    ShortAnswer,
}

/// A quiz question as produced by the quiz mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    /// Index into `options` for multiple choice questions.
    #[serde(default)]
    pub correct: Option<usize>,
    #[serde(default)]
    pub expected_answer: Option<String>,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
}

impl QuizQuestion {
    fn answer(&self) -> &str {
        match self.kind {
            QuestionKind::MultipleChoice => self
                .correct
                .and_then(|i| self.options.get(i))
                .map(String::as_str)
                .unwrap_or_default(),
            QuestionKind::ShortAnswer => self.expected_answer.as_deref().unwrap_or_default(),
        }
    }

    /// Turn a missed question into a review flashcard.
    pub fn to_review_card(&self) -> Card {
        let back = match (self.answer(), self.explanation.trim()) {
            (answer, "") => answer.to_string(),
            ("", explanation) => explanation.to_string(),
            (answer, explanation) => format!("{}\n\n{}", answer, explanation),
        };

        Card {
            id: format!("review-{}", self.id),
            front: self.question.clone(),
            back,
            category: self.category.clone(),
            difficulty: self.difficulty.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub question: QuizQuestion,
    pub correct: bool,
}

/// Results file written by a finished quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResults {
    pub results: Vec<QuizResult>,
}

impl QuizResults {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read quiz results: {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse quiz results: {:?}", path))
    }

    /// Review cards for every question answered incorrectly, one per question id.
    pub fn review_cards(&self) -> Vec<Card> {
        let mut seen = HashSet::new();
        self.results
            .iter()
            .filter(|r| !r.correct)
            .filter(|r| seen.insert(r.question.id.as_str()))
            .map(|r| r.question.to_review_card())
            .collect()
    }

    /// Deck of missed questions, or `None` when nothing was missed.
    pub fn review_deck(&self) -> Result<Option<Deck>> {
        let cards = self.review_cards();
        if cards.is_empty() {
            debug!("no missed questions to review");
            return Ok(None);
        }
        Ok(Some(Deck::new(cards)?))
    }
}

/// Convert a filename (snake_case or kebab-case) to Title Case.
fn filename_to_title_case(name: &str) -> String {
    name.split(|c| c == '_' || c == '-')
        .filter(|s| !s.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => {
                    first.to_uppercase().collect::<String>() + chars.as_str().to_lowercase().as_str()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_content_is_a_valid_deck() {
        let content = ContentFile::bundled().unwrap();
        assert_eq!(content.title(), "Edo Japan");
        assert!(!content.cards.is_empty());
        Deck::new(content.cards).unwrap();
    }

    #[test]
    fn test_parse_csv_skips_header_and_blank_sides() {
        let csv = "front,back,category\n\
                   Who founded the shogunate?,Tokugawa Ieyasu,Politics\n\
                   ,missing front\n\
                   just one column\n\
                   What is kabuki?,Theatre,Arts,easy\n";
        let cards = parse_csv(csv);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "Who founded the shogunate?");
        assert_eq!(cards[0].category, "Politics");
        assert_eq!(cards[1].difficulty, "easy");
        assert_ne!(cards[0].id, cards[1].id);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let cards = ContentFile::bundled().unwrap().cards;
        let total = cards.len();

        let filter = CardFilter {
            category: Some("society".to_string()),
            difficulty: None,
        };
        let society = filter.apply(cards.clone());
        assert!(!society.is_empty());
        assert!(society.len() < total);
        assert!(society.iter().all(|c| c.category == "Society"));

        let filter = CardFilter {
            category: Some("SOCIETY".to_string()),
            difficulty: Some("Hard".to_string()),
        };
        assert!(filter.apply(cards.clone()).iter().all(|c| c.difficulty == "hard"));

        assert_eq!(CardFilter::default().apply(cards).len(), total);
    }

    #[test]
    fn test_categories_are_counted_and_sorted() {
        let cards = vec![
            Card::new("a".into(), "b".into()).with_category("Society"),
            Card::new("c".into(), "d".into()).with_category("Arts"),
            Card::new("e".into(), "f".into()).with_category("Society"),
            Card::new("g".into(), "h".into()),
        ];
        assert_eq!(
            categories(&cards),
            vec![
                ("Arts".to_string(), 1),
                ("Other".to_string(), 1),
                ("Society".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_review_cards_from_missed_questions() {
        let json = r#"{
            "results": [
                {
                    "correct": false,
                    "question": {
                        "id": "q1",
                        "type": "multiple_choice",
                        "question": "Where did the Dutch trade?",
                        "options": ["Edo", "Dejima", "Kyoto"],
                        "correct": 1,
                        "explanation": "An island in Nagasaki harbour.",
                        "category": "Foreign Relations",
                        "difficulty": "medium"
                    }
                },
                {
                    "correct": true,
                    "question": {
                        "id": "q2",
                        "type": "short_answer",
                        "question": "Who led the Black Ships?",
                        "expected_answer": "Perry"
                    }
                },
                {
                    "correct": false,
                    "question": {
                        "id": "q3",
                        "type": "short_answer",
                        "question": "What was sakoku?",
                        "expected_answer": "The closed country policy"
                    }
                }
            ]
        }"#;
        let results: QuizResults = serde_json::from_str(json).unwrap();
        let cards = results.review_cards();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id, "review-q1");
        assert_eq!(cards[0].back, "Dejima\n\nAn island in Nagasaki harbour.");
        assert_eq!(cards[0].category, "Foreign Relations");
        assert_eq!(cards[1].id, "review-q3");
        assert_eq!(cards[1].back, "The closed country policy");
    }

    fn missed(id: &str, correct: bool) -> QuizResult {
        QuizResult {
            question: QuizQuestion {
                id: id.to_string(),
                kind: QuestionKind::ShortAnswer,
                question: format!("Question {id}"),
                options: Vec::new(),
                correct: None,
                expected_answer: Some(format!("Answer {id}")),
                explanation: String::new(),
                category: String::new(),
                difficulty: String::new(),
            },
            correct,
        }
    }

    #[test]
    fn test_repeated_question_is_reviewed_once() {
        let results = QuizResults {
            results: vec![missed("q1", false), missed("q2", false), missed("q1", false)],
        };
        let deck = results.review_deck().unwrap().unwrap();
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.cards()[0].id, "review-q1");
        assert_eq!(deck.cards()[1].id, "review-q2");
    }

    #[test]
    fn test_no_missed_questions_gives_no_review_deck() {
        let results = QuizResults {
            results: vec![missed("q1", true), missed("q2", true)],
        };
        assert!(results.review_deck().unwrap().is_none());
        assert!(QuizResults { results: Vec::new() }.review_deck().unwrap().is_none());
    }

    #[test]
    fn test_parse_csv_keeps_first_row_mentioning_front() {
        let csv = "What was the front line at Sekigahara?,Between the Eastern and Western armies\n\
                   Who won?,Tokugawa Ieyasu\n";
        let cards = parse_csv(csv);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "What was the front line at Sekigahara?");

        let cards = parse_csv("FRONT,Back\nWho won?,Tokugawa Ieyasu\n");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "Who won?");
    }

    #[test]
    fn test_load_csv_names_deck_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edo_arts-review.csv");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "front,back").unwrap();
        writeln!(file, "What is ukiyo-e?,Woodblock prints").unwrap();

        let content = ContentFile::load(&path).unwrap();
        assert_eq!(content.title(), "Edo Arts Review");
        assert_eq!(content.cards.len(), 1);
    }

    #[test]
    fn test_load_missing_file_fails_with_context() {
        let err = ContentFile::load(Path::new("/nonexistent/cards.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read content file"));
    }

    #[test]
    fn test_title_case() {
        assert_eq!(filename_to_title_case("edo_japan"), "Edo Japan");
        assert_eq!(filename_to_title_case("MEIJI--era"), "Meiji Era");
    }
}
