use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing_subscriber::EnvFilter;

use drill_core::model::{Difficulty, Progress, Question, QuestionError, Topic};
use provider::{FetchError, HttpQuestionSource, QuestionServiceConfig, QuestionSource};
use services::{QuizController, QuizSession};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api-url value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug)]
struct Args {
    api_url: Option<String>,
    offline: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-url <url>] [--offline]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url http://localhost:8000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  DRILL_API_URL, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_url = None;
        let mut offline = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-url" => {
                    let value = require_value(args, "--api-url")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    api_url = Some(value);
                }
                "--offline" => offline = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { api_url, offline })
    }
}

/// Cycles through a fixed batch of questions so the quiz can run without the
/// remote provider.
struct SampleQuestionSource {
    questions: Vec<Question>,
    next: Mutex<usize>,
}

impl SampleQuestionSource {
    fn new(questions: Vec<Question>) -> Self {
        Self {
            questions,
            next: Mutex::new(0),
        }
    }
}

#[async_trait]
impl QuestionSource for SampleQuestionSource {
    async fn next_question(&self) -> Result<Question, FetchError> {
        if self.questions.is_empty() {
            return Err(FetchError::NotFound);
        }
        let mut next = self
            .next
            .lock()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let question = self.questions[*next % self.questions.len()].clone();
        *next += 1;
        Ok(question)
    }
}

fn sample_questions() -> Result<Vec<Question>, QuestionError> {
    let batch = [
        ("What is 7 x 8?", "56", Topic::Arithmetic, Difficulty::Easy),
        (
            "Solve for x: 2x + 3 = 11",
            "4",
            Topic::Algebra,
            Difficulty::Medium,
        ),
        (
            "What is the area of a circle with radius 1, to two decimals?",
            "3.14",
            Topic::Geometry,
            Difficulty::Medium,
        ),
        (
            "What is sin(30 degrees)?",
            "0.5",
            Topic::Trigonometry,
            Difficulty::Hard,
        ),
        (
            "What is the derivative of x^2?  A) 2x  B) x  C) x^2  D) 2",
            "A",
            Topic::Calculus,
            Difficulty::Medium,
        ),
    ];

    batch
        .into_iter()
        .map(|(prompt, answer, topic, difficulty)| {
            Question::new(
                prompt,
                Some(answer.to_owned()),
                topic,
                difficulty,
                i64::from(difficulty.default_points()),
            )
        })
        .collect()
}

fn is_quit(input: &str) -> bool {
    input.eq_ignore_ascii_case("quit")
        || input.eq_ignore_ascii_case("exit")
        || input.eq_ignore_ascii_case("q")
}

/// Reads one line from stdin, stripping the trailing newline but nothing
/// else; grading decides how to treat other whitespace. Returns `None` on
/// EOF.
fn read_input_line() -> io::Result<Option<String>> {
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

fn badge_names(progress: &Progress) -> String {
    let names: Vec<&str> = progress
        .badges()
        .as_slice()
        .iter()
        .map(|badge| badge.name())
        .collect();
    names.join(", ")
}

fn print_summary(session: &QuizSession) {
    let progress = session.progress();
    println!();
    println!(
        "Questions seen: {}   Final score: {}",
        progress.question_count(),
        progress.total_score()
    );
    if !progress.badges().is_empty() {
        println!("Badges earned: {}", badge_names(progress));
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut iter = std::env::args().skip(1);
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let source: Arc<dyn QuestionSource> = if args.offline {
        Arc::new(SampleQuestionSource::new(sample_questions()?))
    } else {
        let config = match args.api_url {
            Some(base_url) => QuestionServiceConfig { base_url },
            None => QuestionServiceConfig::from_env(),
        };
        Arc::new(HttpQuestionSource::new(config))
    };

    let mut controller = QuizController::new(source);

    println!("Math drill: answer the question, press Enter to submit.");
    println!("Type 'quit' to finish.");
    println!();

    loop {
        if controller.session().current_question().is_none() {
            println!("Fetching question...");
            if let Err(err) = controller.load_next_question().await {
                eprintln!("{err}");
                eprintln!("Press Enter to retry, or type 'quit' to finish.");
                match read_input_line()? {
                    Some(line) if !is_quit(&line) => continue,
                    _ => break,
                }
            }
        }

        let Some(question) = controller.session().current_question() else {
            continue;
        };
        println!(
            "[{} | {} | {} pts] {}",
            question.topic(),
            question.difficulty(),
            question.points(),
            question.prompt()
        );
        print!("> ");
        io::stdout().flush()?;

        let Some(input) = read_input_line()? else {
            break;
        };
        if is_quit(&input) {
            break;
        }

        match controller.submit_answer(&input) {
            Ok(submission) => {
                println!("{}", submission.feedback.text);
                let progress = controller.session().progress();
                println!(
                    "Score: {}   Streak: {}",
                    progress.total_score(),
                    progress.consecutive_correct()
                );
                if !progress.badges().is_empty() {
                    println!("Badges: {}", badge_names(progress));
                }
                println!();
                if let Err(err) = controller.auto_advance().await {
                    eprintln!("{err}");
                }
            }
            Err(err) => eprintln!("{err}"),
        }
    }

    print_summary(controller.session());
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
