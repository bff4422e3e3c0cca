use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use vocabquiz::analytics::{HistorySummary, ScoreBand, format_attempt, format_percentage};
use vocabquiz::config::Config;
use vocabquiz::quiz::pool::DistractorPool;
use vocabquiz::quiz::{AttemptRecorder, Progress, QuizEngine};
use vocabquiz::store::history::HistoryStore;
use vocabquiz::store::kv::JsonFileStore;
use vocabquiz::vocab::VocabularyEntry;
use vocabquiz::vocab::favourites::FavouritesStore;

#[derive(Parser)]
#[command(name = "vocabquiz", version, about = "Vocabulary quizzes over your favourite words")]
struct Cli {
    #[arg(long, help = "Directory holding favourites and quiz history")]
    data_dir: Option<PathBuf>,

    #[arg(short, long, help = "Number of answer choices per question")]
    choices: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a quiz over your favourites
    Quiz {
        #[arg(long, help = "Seed for reproducible question order and choices")]
        seed: Option<u64>,
    },
    /// Show past quiz attempts, newest first
    History,
    /// Delete all quiz history
    ClearHistory,
    /// Manage favourite words
    Favourites {
        #[command(subcommand)]
        action: FavouritesAction,
    },
    /// Write a default config file if none exists
    InitConfig,
}

#[derive(Subcommand)]
enum FavouritesAction {
    List,
    Add {
        word: String,
        #[arg(short, long)]
        definition: String,
        #[arg(short, long, default_value = "")]
        example: String,
    },
    Remove {
        id: String,
    },
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_else(|e| {
        eprintln!(
            "Ignoring invalid config at {}: {e:#}",
            Config::config_path().display()
        );
        Config::default()
    });
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir.to_string_lossy().to_string();
    }
    if let Some(choices) = cli.choices {
        config.choice_count = choices;
    }
    config.validate();

    match cli.command {
        Command::Quiz { seed } => run_quiz(&config, seed),
        Command::History => show_history(&config),
        Command::ClearHistory => clear_history(&config),
        Command::Favourites { action } => manage_favourites(&config, action),
        Command::InitConfig => init_config(&config),
    }
}

fn open_store(config: &Config) -> Result<JsonFileStore> {
    Ok(JsonFileStore::with_base_dir(config.data_dir())?)
}

fn run_quiz(config: &Config, seed: Option<u64>) -> Result<()> {
    let favourites = FavouritesStore::new(open_store(config)?).load();
    let pool = match &config.word_list_path {
        Some(path) => DistractorPool::from_file(Path::new(path))?,
        None => DistractorPool::builtin(),
    };
    let rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let recorder = AttemptRecorder::new(HistoryStore::new(open_store(config)?));
    let mut engine = QuizEngine::new(pool, config.choice_count, rng, recorder);

    if let Err(e) = engine.start(favourites.list()) {
        println!("{e}");
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        if let Some(question) = engine.current_question() {
            println!();
            println!(
                "Word {} / {}    Score: {}",
                engine.question_number(),
                engine.total_questions(),
                engine.score()
            );
            println!("DEFINITION: {}", question.definition);
        }
        for (i, choice) in engine.choices().iter().enumerate() {
            println!("  [{}] {choice}", i + 1);
        }

        let selected = loop {
            print!("Answer (1-{}, q to quit): ", engine.choices().len());
            stdout.flush()?;
            let Some(line) = lines.next() else {
                engine.abandon()?;
                return Ok(());
            };
            let line = line?;
            let input = line.trim();
            if input.eq_ignore_ascii_case("q") {
                engine.abandon()?;
                println!("Quiz abandoned. Nothing was recorded.");
                return Ok(());
            }
            match input.parse::<usize>() {
                Ok(n) if (1..=engine.choices().len()).contains(&n) => {
                    break engine.choices()[n - 1].clone();
                }
                _ => println!("Pick a number between 1 and {}.", engine.choices().len()),
            }
        };

        let feedback = engine.submit_answer(&selected)?;
        if feedback.correct {
            println!("Correct!");
        } else {
            println!("Wrong. The answer was \"{}\".", feedback.correct_word);
        }

        let last_question = engine.question_number() == engine.total_questions();
        if last_question {
            print!("[Enter] finish: ");
        } else {
            print!("[Enter] next question, q to quit: ");
        }
        stdout.flush()?;
        let line = lines.next().transpose()?;
        if after_answer(line.as_deref(), last_question) == AfterAnswer::Quit {
            engine.abandon()?;
            println!("Quiz abandoned. Nothing was recorded.");
            return Ok(());
        }

        if let Progress::Completed(done) = engine.advance()? {
            println!();
            println!(
                "Quiz finished! Your score: {} / {} ({}).",
                done.score,
                done.total_questions,
                format_percentage(done.percentage)
            );
            match done.saved {
                Ok(_) => println!("Run `vocabquiz history` to see your progress."),
                Err(e) => eprintln!("Could not save your quiz results: {e}"),
            }
            return Ok(());
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum AfterAnswer {
    Continue,
    Quit,
}

/// Input at the prompt shown after an answer. `None` is end of input.
/// Once the last question is answered the quiz always finishes, so a fully
/// answered quiz is recorded.
fn after_answer(input: Option<&str>, last_question: bool) -> AfterAnswer {
    if last_question {
        return AfterAnswer::Continue;
    }
    match input {
        Some(line) if !line.trim().eq_ignore_ascii_case("q") => AfterAnswer::Continue,
        _ => AfterAnswer::Quit,
    }
}

fn show_history(config: &Config) -> Result<()> {
    let history = HistoryStore::new(open_store(config)?).load_sorted();
    if history.is_empty() {
        println!("No quiz history yet. Complete some quizzes to see your progress!");
        return Ok(());
    }

    for attempt in &history {
        let marker = match ScoreBand::classify(attempt.percentage, config.good_score_threshold) {
            ScoreBand::Good => "+",
            ScoreBand::Average => " ",
        };
        println!("{marker} {}", format_attempt(attempt));
    }

    let summary = HistorySummary::from_history(&history);
    println!();
    println!(
        "{} attempts  mean {}  best {}",
        summary.count,
        summary.mean_percentage.map_or("-".to_string(), format_percentage),
        summary.max_percentage.map_or("-".to_string(), format_percentage),
    );
    Ok(())
}

fn clear_history(config: &Config) -> Result<()> {
    HistoryStore::new(open_store(config)?).clear()?;
    println!("Quiz history cleared.");
    Ok(())
}

fn manage_favourites(config: &Config, action: FavouritesAction) -> Result<()> {
    let mut store = FavouritesStore::new(open_store(config)?);
    let mut favourites = store.load();

    match action {
        FavouritesAction::List => {
            if favourites.is_empty() {
                println!("No favourites yet.");
            }
            for entry in favourites.list() {
                println!("{}: {}", entry.word, entry.definition);
                if !entry.example.is_empty() {
                    println!("    e.g. {}", entry.example);
                }
            }
        }
        FavouritesAction::Add {
            word,
            definition,
            example,
        } => {
            if favourites.add(VocabularyEntry::new(&word, &definition, &example)) {
                store.save(&favourites)?;
                println!("Added \"{word}\" to favourites.");
            } else {
                println!("\"{word}\" is already a favourite.");
            }
        }
        FavouritesAction::Remove { id } => {
            if favourites.remove(&id) {
                store.save(&favourites)?;
                println!("Removed \"{id}\" from favourites.");
            } else {
                println!("\"{id}\" is not a favourite.");
            }
        }
    }
    Ok(())
}

fn init_config(config: &Config) -> Result<()> {
    let path = Config::config_path();
    if path.exists() {
        println!("Config already exists at {}", path.display());
    } else {
        config.save()?;
        println!("Wrote default config to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_continues_and_q_quits_mid_quiz() {
        assert_eq!(after_answer(Some(""), false), AfterAnswer::Continue);
        assert_eq!(after_answer(Some("  Q "), false), AfterAnswer::Quit);
        assert_eq!(after_answer(None, false), AfterAnswer::Quit);
    }

    #[test]
    fn last_question_always_finishes() {
        assert_eq!(after_answer(Some(""), true), AfterAnswer::Continue);
        assert_eq!(after_answer(Some("q"), true), AfterAnswer::Continue);
        assert_eq!(after_answer(None, true), AfterAnswer::Continue);
    }
}
