use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;

use trivia_core::{QuizCategory, QuizSession, TriviaService};

/// Interactive quiz in the terminal. An empty answer ends the game early.
pub fn play(service: &TriviaService, category: i64, limit: Option<usize>) -> Result<()> {
    let mut session = QuizSession::new(QuizCategory::from(category));
    let mut rng = rand::thread_rng();

    println!("{}", "=== Trivia ===".bright_blue().bold());
    println!("{}", "Leave the answer blank to stop.".dimmed());

    loop {
        if limit.is_some_and(|max| session.asked().len() >= max) {
            break;
        }

        let Some(question) = session.next(service.quiz(), &mut rng)? else {
            println!("{}", "No questions left.".dimmed());
            break;
        };

        println!();
        println!("{}", question.question.bold());
        let answer: String = Input::new()
            .with_prompt("Answer")
            .allow_empty(true)
            .interact_text()?;

        if answer.trim().is_empty() {
            break;
        }

        if session.record(&question, &answer) {
            println!("{}", "Correct!".bright_green());
        } else {
            println!(
                "{} {}",
                "Incorrect. The answer was".bright_red(),
                question.answer
            );
        }
    }

    let (correct, asked) = session.score();
    println!();
    println!(
        "{} {} / {}",
        "Final score:".bright_blue().bold(),
        correct,
        asked
    );

    Ok(())
}
