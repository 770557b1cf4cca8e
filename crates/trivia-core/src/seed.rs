//! Seed data for a fresh store.

use serde::Deserialize;
use trivia_db::{Category, NewQuestion, RecordStore};

use crate::error::{Result, TriviaError};

/// Categories and questions to load into a store.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    pub categories: Vec<Category>,
    #[serde(default)]
    pub questions: Vec<NewQuestion>,
}

/// What a seeding run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub categories: usize,
    pub questions: usize,
    /// The store already had categories and seeding was not forced.
    pub skipped: bool,
}

const DEMO_CATEGORIES: &[(i64, &str)] = &[
    (1, "Science"),
    (2, "Art"),
    (3, "Geography"),
    (4, "History"),
    (5, "Entertainment"),
    (6, "Sports"),
];

// (question, answer, category, difficulty)
const DEMO_QUESTIONS: &[(&str, &str, i64, i64)] = &[
    ("Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
    ("What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
    ("What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
    ("What actor did author Anne Rice first denounce, then praise in the role of her beloved Lestat?", "Tom Cruise", 5, 4),
    ("What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 5, 3),
    ("Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
    ("Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
    ("Who invented Peanut Butter?", "George Washington Carver", 4, 2),
    ("What is the largest lake in Africa?", "Lake Victoria", 3, 2),
    ("In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
    ("The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
    ("Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 2, 1),
    ("La Giaconda is better known as what?", "Mona Lisa", 2, 3),
    ("How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
    ("Which American artist was a pioneer of Abstract Expressionism, and a leading exponent of action painting?", "Jackson Pollock", 2, 2),
    ("What is the heaviest organ in the human body?", "The Liver", 1, 4),
    ("Who discovered penicillin?", "Alexander Fleming", 1, 3),
    ("Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
    ("Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
];

impl SeedData {
    /// The built-in demo question bank.
    pub fn demo() -> Self {
        Self {
            categories: DEMO_CATEGORIES
                .iter()
                .map(|&(id, label)| Category {
                    id,
                    label: label.to_string(),
                })
                .collect(),
            questions: DEMO_QUESTIONS
                .iter()
                .map(|&(question, answer, category, difficulty)| NewQuestion {
                    question: question.to_string(),
                    answer: answer.to_string(),
                    category,
                    difficulty,
                })
                .collect(),
        }
    }

    /// Parse seed data from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| TriviaError::BadRequest(format!("Invalid seed data: {}", e)))
    }

    /// Load the data into `store`.
    ///
    /// Skipped when the store already has categories, unless `force` is set.
    /// Forced runs keep existing categories and append all questions.
    pub fn apply(&self, store: &dyn RecordStore, force: bool) -> Result<SeedReport> {
        if !force && !store.list_categories()?.is_empty() {
            tracing::info!("Store already seeded, skipping");
            return Ok(SeedReport {
                skipped: true,
                ..SeedReport::default()
            });
        }

        let mut report = SeedReport::default();

        for category in &self.categories {
            if store.get_category(category.id)?.is_some() {
                continue;
            }
            store
                .insert_category(category)
                .map_err(TriviaError::write_failed)?;
            report.categories += 1;
        }

        for question in &self.questions {
            store
                .insert_question(question)
                .map_err(TriviaError::write_failed)?;
            report.questions += 1;
        }

        tracing::info!(
            categories = report.categories,
            questions = report.questions,
            "Seeded store"
        );
        Ok(report)
    }
}
