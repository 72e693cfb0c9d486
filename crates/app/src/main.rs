use std::fmt;
use std::io::{self, BufRead, Write as _};
use std::path::PathBuf;

use quiz_core::engine::{CategoryProgress, CategoryStatus, QuestionCounter};
use services::{
    AnswerDisplay, NavState, Presenter, QuestionInput, QuestionView, ResultsView,
    SessionController, SessionEvent, Transcript, TranscriptExporter, load_quiz_file,
};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    MissingFile,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::MissingFile => write!(f, "no quiz file given (use --file or QUIZ_FILE)"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  quiz [--file <quiz.json>]");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_FILE  path to the quiz document when --file is omitted");
}

struct Args {
    file: PathBuf,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut file = std::env::var("QUIZ_FILE").ok().map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--file" | "-f" => {
                    let value = args.next().ok_or(ArgsError::MissingValue { flag: "--file" })?;
                    file = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if !other.starts_with('-') && file.is_none() => {
                    file = Some(PathBuf::from(other));
                }
                other => return Err(ArgsError::UnknownArg(other.to_string())),
            }
        }

        file.map(|file| Self { file }).ok_or(ArgsError::MissingFile)
    }
}

//
// ─── THEMING ───────────────────────────────────────────────────────────────────
//

/// Stable presentation identifier for a category name.
///
/// Lowercased alphanumeric stem plus a 32-bit wrapping hash, so equal names
/// always map to the same theme and distinct names rarely collide.
fn category_identifier(name: &str) -> String {
    let stem: String = name
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .take(10)
        .collect();

    let mut hash: i32 = 0;
    for c in name.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(c as i32);
    }
    let mut hex = format!("{:x}", hash.unsigned_abs());
    hex.truncate(6);

    format!("category-{stem}-{hex}")
}

const PALETTE: [&str; 6] = [
    "\x1b[36m", // cyan
    "\x1b[35m", // magenta
    "\x1b[33m", // yellow
    "\x1b[32m", // green
    "\x1b[34m", // blue
    "\x1b[31m", // red
];
const RESET: &str = "\x1b[0m";

fn category_color(name: &str) -> &'static str {
    let identifier = category_identifier(name);
    let sum: usize = identifier.bytes().map(usize::from).sum();
    PALETTE[sum % PALETTE.len()]
}

//
// ─── TERMINAL PRESENTER ────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Start,
    Question,
    Results,
}

struct TerminalPresenter {
    title: String,
    subtitle: Option<String>,
    screen: Screen,
    awaiting_text: bool,
    nav: Option<NavState>,
}

impl TerminalPresenter {
    fn new(title: String, subtitle: Option<String>) -> Self {
        Self {
            title,
            subtitle,
            screen: Screen::Start,
            awaiting_text: false,
            nav: None,
        }
    }

    fn screen(&self) -> Screen {
        self.screen
    }

    fn awaiting_text(&self) -> bool {
        self.awaiting_text
    }

    /// Prints the input hint for the current screen and flushes stdout.
    fn prompt(&self) {
        match self.screen {
            Screen::Start => print!("press Enter to begin (:quit to leave) > "),
            Screen::Question => {
                let next = if self.nav.is_some_and(|nav| nav.is_last) {
                    ":next finishes"
                } else {
                    ":next"
                };
                if self.awaiting_text {
                    print!("type your answer ({next}, :prev, :export, :restart, :quit) > ");
                } else {
                    print!("option key ({next} or n, :prev or p, :quit) > ");
                }
            }
            Screen::Results => print!("(:export, :restart, :quit) > "),
        }
        let _ = io::stdout().flush();
    }
}

impl Presenter for TerminalPresenter {
    fn show_start(&mut self) {
        self.screen = Screen::Start;
        println!();
        println!("=== {} ===", self.title);
        if let Some(subtitle) = &self.subtitle {
            println!("{subtitle}");
        }
    }

    fn show_question(&mut self, view: &QuestionView) {
        self.screen = Screen::Question;
        let color = category_color(&view.category_name);

        println!();
        println!(
            "{color}[{}]{RESET} {} / {}",
            view.category_name, view.counter.current, view.counter.total
        );
        println!("{}", view.text);

        match &view.input {
            QuestionInput::Options(options) => {
                self.awaiting_text = false;
                for option in options {
                    let marker = if option.selected { "*" } else { " " };
                    println!("  {marker} ({}) {}", option.key, option.label);
                }
            }
            QuestionInput::Text {
                placeholder,
                current,
            } => {
                self.awaiting_text = true;
                if let Some(current) = current {
                    println!("  current answer: {current}");
                } else if let Some(placeholder) = placeholder {
                    println!("  ({placeholder})");
                }
            }
        }
    }

    fn show_results(&mut self, view: &ResultsView) {
        self.screen = Screen::Results;
        println!();
        println!(
            "=== Results: {} of {} answered ({:.0}%) ===",
            view.answered, view.total, view.percent
        );

        for category in &view.categories {
            let color = category_color(&category.name);
            println!();
            println!("{color}{}{RESET}", category.name);
            for entry in &category.entries {
                let answer = match &entry.answer {
                    AnswerDisplay::Choice { key, label } => format!("({key}) {label}"),
                    AnswerDisplay::Text(text) => text.clone(),
                    AnswerDisplay::Unanswered => "(not answered)".to_string(),
                };
                println!("  {} -> {answer}", entry.question);
            }
        }
    }

    fn update_navigation(&mut self, nav: &NavState) {
        self.nav = Some(*nav);
    }

    fn update_progress(&mut self, progress: &[CategoryProgress]) {
        if self.screen != Screen::Question {
            return;
        }
        let line: Vec<String> = progress
            .iter()
            .map(|row| {
                let glyph = match row.status {
                    CategoryStatus::Completed => "#",
                    CategoryStatus::Current => ">",
                    CategoryStatus::Passed => "~",
                    CategoryStatus::Pending => ".",
                };
                format!("{glyph}{} {}/{}", row.name, row.answered, row.total)
            })
            .collect();
        println!("  [{}]", line.join(" | "));
    }

    fn update_counter(&mut self, _counter: &QuestionCounter) {
        // Already shown in the question banner.
    }

    fn deliver_transcript(&mut self, transcript: &Transcript) {
        match std::fs::write(&transcript.filename, &transcript.text) {
            Ok(()) => println!("transcript written to {}", transcript.filename),
            Err(err) => eprintln!("could not write {}: {err}", transcript.filename),
        }
    }
}

//
// ─── EVENT LOOP ────────────────────────────────────────────────────────────────
//

fn event_for(input: &str, screen: Screen, awaiting_text: bool) -> Option<SessionEvent> {
    match screen {
        Screen::Start => Some(SessionEvent::Start),
        Screen::Results => match input {
            ":export" | "e" => Some(SessionEvent::ExportRequest),
            ":restart" | "r" => Some(SessionEvent::Restart),
            _ => None,
        },
        Screen::Question => match input {
            ":next" | "" => Some(SessionEvent::Next),
            ":prev" => Some(SessionEvent::Previous),
            ":export" => Some(SessionEvent::ExportRequest),
            ":restart" => Some(SessionEvent::Restart),
            _ if awaiting_text => Some(SessionEvent::SetText(input.to_string())),
            "n" => Some(SessionEvent::Next),
            "p" => Some(SessionEvent::Previous),
            key => Some(SessionEvent::Select(key.to_string())),
        },
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let file = load_quiz_file(&args.file)?;
    let set = file.question_set()?;
    let presenter = TerminalPresenter::new(file.app.title.clone(), file.app.subtitle.clone());
    let mut controller = SessionController::new(
        set,
        file.app.title.clone(),
        TranscriptExporter::new(file.export.clone()),
        presenter,
    );

    controller.presenter_mut().show_start();
    controller.presenter().prompt();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let input = line.trim();

        if input == ":quit" || (input == "q" && controller.presenter().screen() != Screen::Question)
        {
            break;
        }

        let screen = controller.presenter().screen();
        let awaiting_text = controller.presenter().awaiting_text();
        if let Some(event) = event_for(input, screen, awaiting_text) {
            controller.handle(event)?;
        }

        controller.presenter().prompt();
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
