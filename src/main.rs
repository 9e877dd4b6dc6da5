use std::{
    io::{
        self,
        BufRead,
        Write,
    },
    path::PathBuf,
    process::ExitCode,
};

use clap::{
    Parser,
    Subcommand,
};
use quran_vocab::{
    core::SystemClock,
    logging,
    persistence::FileStore,
    quiz::QuizSession,
    Clock,
    LearnerProfile,
    Settings,
    VocabError,
    Vocabulary,
    VocabularyWord,
    WordId,
};
use rand::{
    rngs::StdRng,
    SeedableRng,
};

#[derive(Parser)]
#[command(name = "quran-vocab", about = "Learn the most frequent words of the Quran", version)]
struct Cli {
    /// Directory holding progress and settings (default: platform data dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Vocabulary JSON file (default: built-in word list)
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List words due for review today
    Due,

    /// Mark a word as learned, or unmark it
    Learn { id: WordId },

    /// Bookmark a word, or remove the bookmark
    Bookmark { id: WordId },

    /// Set the note for a word (no text clears it)
    Note { id: WordId, text: Vec<String> },

    /// Show a word with its schedule, bookmark and note
    Show { id: WordId },

    /// Remember the page to resume from
    Page { page: u32 },

    /// Learning progress and schedule overview
    Stats,

    /// Take a quiz: due words if any, otherwise a practice round
    Quiz {
        /// Seed for reproducible question order
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> ExitCode {
    logging::init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(VocabError::Refused(refusal)) => {
            println!("{}", refusal);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), VocabError> {
    let mut store = match cli.data_dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::in_app_data_dir(),
    };
    let vocabulary = match &cli.vocabulary {
        Some(path) => Vocabulary::load_from_file(path)?,
        None => Vocabulary::builtin()?,
    };
    let settings = Settings::load(&store);
    let policy = settings.policy();
    let now = SystemClock.now();
    let mut profile = LearnerProfile::load(&store, &policy, now);

    match cli.command {
        Command::Due => {
            let due = profile.due_words(&policy, &vocabulary, now);
            if due.is_empty() {
                println!("Nothing is due for review today.");
            }
            for word in due {
                println!("{}", word_line(word, &settings.quiz_language));
            }
        }
        Command::Learn { id } => {
            let word = lookup(&vocabulary, id)?;
            if profile.toggle_learned(&policy, id, now) {
                let record = profile.srs().get(id).copied();
                let next = record.map(|r| policy.day_boundary().day_of(r.next_review_date));
                println!("Marked {} as learned. First review: {}", word.transliteration, fmt_day(next));
            } else {
                println!("{} is no longer marked as learned.", word.transliteration);
            }
            profile.save(&mut store)?;
        }
        Command::Bookmark { id } => {
            let word = lookup(&vocabulary, id)?;
            let state = if profile.toggle_bookmark(id) { "Bookmarked" } else { "Removed bookmark for" };
            println!("{} {}.", state, word.transliteration);
            profile.save(&mut store)?;
        }
        Command::Note { id, text } => {
            lookup(&vocabulary, id)?;
            profile.update_note(id, &text.join(" "));
            match profile.note(id) {
                Some(note) => println!("Note saved: {}", note),
                None => println!("Note cleared."),
            }
            profile.save(&mut store)?;
        }
        Command::Show { id } => {
            let word = lookup(&vocabulary, id)?;
            print_word(word, &profile, &settings);
        }
        Command::Page { page } => {
            profile.set_last_visited_page(page);
            profile.save(&mut store)?;
            println!("Will resume from page {}.", page);
        }
        Command::Stats => print_stats(&vocabulary, &profile, &settings, now),
        Command::Quiz { seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let mut session = profile.start_quiz(&vocabulary, &settings, now, &mut rng)?;
            run_quiz(&mut session)?;

            if let Some(results) = session.results() {
                profile.complete_quiz(&policy, &results, now);
                profile.save(&mut store)?;
            }
        }
    }

    Ok(())
}

fn lookup(vocabulary: &Vocabulary, id: WordId) -> Result<&VocabularyWord, VocabError> {
    vocabulary.get(id).ok_or(VocabError::UnknownWord(id))
}

fn word_line(word: &VocabularyWord, language: &str) -> String {
    format!("{:>4}  {}  {}  {}", word.id, word.arabic, word.transliteration, word.meaning(language))
}

fn fmt_day(day: Option<chrono::NaiveDate>) -> String {
    day.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())
}

fn print_word(word: &VocabularyWord, profile: &LearnerProfile, settings: &Settings) {
    let language = &settings.quiz_language;
    println!("{}", word_line(word, language));
    println!("      {} · {:?} · {} occurrences", word.part_of_speech, word.difficulty, word.frequency);
    if let Some(root) = &word.root {
        println!("      Root: {}", root);
    }
    if !word.example_verse_arabic.is_empty() {
        println!("      {} ({})", word.example_verse_arabic, word.verse_reference);
        if let Some(translation) = word.example_translation(language) {
            println!("      {}", translation);
        }
    }
    match profile.srs().get(word.id) {
        Some(record) => println!(
            "      Learned · level {} · next review {}",
            record.srs_level,
            fmt_day(Some(settings.day_boundary.day_of(record.next_review_date)))
        ),
        None => println!("      Not learned"),
    }
    if profile.is_bookmarked(word.id) {
        println!("      Bookmarked");
    }
    if let Some(note) = profile.note(word.id) {
        println!("      Note: {}", note);
    }
}

fn print_stats(
    vocabulary: &Vocabulary,
    profile: &LearnerProfile,
    settings: &Settings,
    now: chrono::DateTime<chrono::Utc>,
) {
    let policy = settings.policy();
    let progress = profile.learning_progress(vocabulary, settings.corpus_total_frequency);

    println!("Learning progress (Quranic coverage): {:.2}%", progress);
    println!("Learned words: {} of {}", profile.srs().len(), vocabulary.len());
    println!("Due for review: {}", profile.due_words(&policy, vocabulary, now).len());
    println!("Bookmarked: {}", profile.bookmarks().len());
    for (level, count) in profile.srs().level_counts() {
        println!("  level {} ({} days): {}", level, settings.intervals.days_for(level), count);
    }
    if let Some(page) = profile.last_visited_page() {
        println!("Resume from page {}", page);
    }
}

fn run_quiz(session: &mut QuizSession) -> Result<(), VocabError> {
    if session.is_review() {
        println!("Review session: correct answers are scheduled for a later date.");
    } else {
        println!("Practice quiz over your learned words.");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let total = session.questions().len();

    while let Some(question) = session.current_question().cloned() {
        println!();
        println!("Question {}/{}: what is the meaning of {}?", session.answered_count() + 1, total, question.prompt);
        for (index, option) in question.options.iter().enumerate() {
            println!("  {}) {}", index + 1, option);
        }

        let choice = loop {
            print!("> ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                println!("\nQuiz abandoned, progress not changed.");
                return Ok(());
            };
            match line?.trim().parse::<usize>() {
                Ok(n) if (1..=question.options.len()).contains(&n) => break n - 1,
                _ => println!("Enter a number between 1 and {}.", question.options.len()),
            }
        };

        let feedback = session.answer(question.word_id, &question.options[choice])?;
        if feedback.correct {
            println!("Correct!");
        } else {
            println!("Incorrect. The correct answer is \"{}\".", feedback.correct_answer);
        }
    }

    if let Some(summary) = session.summary() {
        println!();
        println!("You scored {} out of {} ({:.0}%).", summary.score, summary.total, summary.percentage);
        for mistake in &summary.mistakes {
            println!(
                "  {}: you answered \"{}\", correct is \"{}\"",
                mistake.prompt, mistake.given_answer, mistake.correct_answer
            );
        }
    }
    Ok(())
}
