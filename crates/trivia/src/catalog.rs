use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use trivia_core::{
    page_count, Category, CreateQuestion, FormattedQuestion, NumericField, QuestionPage,
    QuizCategory, SeedData, TriviaService,
};

pub fn seed(service: &TriviaService, file: Option<&Path>, force: bool) -> Result<()> {
    let data = match file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            SeedData::from_json(&content)?
        }
        None => SeedData::demo(),
    };

    let report = data.apply(service.store().as_ref(), force)?;

    if report.skipped {
        println!(
            "{}",
            "Store already has categories; use --force to seed anyway.".dimmed()
        );
    } else {
        println!(
            "{} {} categories, {} questions",
            "Seeded".bright_green(),
            report.categories,
            report.questions
        );
    }

    Ok(())
}

pub fn categories(service: &TriviaService, json: bool) -> Result<()> {
    let categories = service.list_categories()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
    } else {
        print_categories_table(&categories);
    }

    Ok(())
}

pub fn questions(
    service: &TriviaService,
    page: Option<usize>,
    category: Option<i64>,
    search: Option<&str>,
    json: bool,
) -> Result<()> {
    let result = match (category, search) {
        (Some(_), Some(_)) => anyhow::bail!("--category and --search cannot be combined"),
        (Some(id), None) => service.questions_by_category(id, page)?,
        (None, Some(term)) => service.search_questions(term, page)?,
        (None, None) => service.list_questions(page)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.items.is_empty() {
        println!("{}", "No questions found.".dimmed());
    } else {
        print_questions_page(&result, page.unwrap_or(1), service.page_size());
    }

    Ok(())
}

pub fn add(
    service: &TriviaService,
    question: String,
    answer: String,
    category: i64,
    difficulty: i64,
) -> Result<()> {
    let input = CreateQuestion {
        question: Some(question),
        answer: Some(answer),
        category: Some(NumericField::from(category)),
        difficulty: Some(NumericField::from(difficulty)),
    };

    let created = service.create_question(&input, None)?;
    println!("{} question {}", "Created".bright_green(), created.id);

    Ok(())
}

pub fn delete(service: &TriviaService, id: i64) -> Result<()> {
    let deleted = service.delete_question(id)?;
    println!("{} question {}", "Deleted".bright_red(), deleted);

    Ok(())
}

pub fn quiz(service: &TriviaService, category: i64, previous: &[i64], json: bool) -> Result<()> {
    let next = service.next_quiz_question(
        previous,
        QuizCategory::from(category),
        &mut rand::thread_rng(),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&next)?);
        return Ok(());
    }

    match next {
        Some(q) => {
            println!("{}  {}", "ID:".dimmed(), q.id);
            println!("{}  {}", "Question:".dimmed(), q.question);
            println!("{}  {}", "Answer:".dimmed(), q.answer);
        }
        None => println!("{}", "No questions left in this quiz.".dimmed()),
    }

    Ok(())
}

fn print_categories_table(categories: &[Category]) {
    println!("{:<6} {}", "ID".dimmed(), "LABEL".dimmed());
    for c in categories {
        println!("{:<6} {}", c.id, c.label);
    }
}

fn print_questions_page(result: &QuestionPage, page: usize, page_size: usize) {
    if let Some(ref label) = result.current_category {
        println!("{} {}", "Category:".dimmed(), label.bright_cyan());
    }

    println!(
        "{:<6} {:<14} {:<5} {:<60} {}",
        "ID".dimmed(),
        "CATEGORY".dimmed(),
        "DIFF".dimmed(),
        "QUESTION".dimmed(),
        "ANSWER".dimmed(),
    );

    for q in &result.items {
        let category = result
            .categories
            .get(&q.category_id)
            .map(String::as_str)
            .unwrap_or("?");
        println!(
            "{:<6} {:<14} {:<5} {:<60} {}",
            q.id,
            category,
            difficulty_colored(q),
            truncate(&q.question, 57),
            q.answer
        );
    }

    println!();
    println!(
        "{}",
        format!(
            "Page {} of {} ({} questions)",
            page,
            page_count(result.total_count, page_size),
            result.total_count
        )
        .dimmed()
    );
}

fn difficulty_colored(q: &FormattedQuestion) -> String {
    let text = q.difficulty.to_string();
    match q.difficulty {
        d if d <= 2 => text.bright_green().to_string(),
        3 => text.bright_yellow().to_string(),
        _ => text.bright_red().to_string(),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 4), "abcd...");
        assert_eq!(truncate("héllo wörld", 5), "héllo...");
    }
}
