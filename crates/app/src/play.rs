//! Line-oriented terminal front end for a `QuizSession`.

use std::io::{self, BufRead, Write};
use std::ops::ControlFlow;

use services::{OptionState, QuestionView, QuizSession, ReselectPolicy, Stage};

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Intent {
    Continue,
    Select(usize),
    Restart,
    Quit,
    Unknown(String),
}

impl Intent {
    fn parse(line: &str) -> Self {
        match line.trim() {
            "" => Self::Continue,
            "r" | "restart" => Self::Restart,
            "q" | "quit" => Self::Quit,
            other => match other.parse::<usize>() {
                Ok(n) if n > 0 => Self::Select(n - 1),
                _ => Self::Unknown(other.to_owned()),
            },
        }
    }
}

/// Front end switches.
pub struct Options {
    /// Print the final result as JSON once the last question is passed.
    pub print_json: bool,
}

/// Read intents from `input` until `q` or end of input, rendering to `out`.
///
/// # Errors
///
/// Returns any I/O error from reading input or writing output.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    session: &mut QuizSession,
    options: &Options,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        render(out, session)?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };

        match dispatch(out, session, Intent::parse(&line), options) {
            Ok(ControlFlow::Break(())) => break,
            Ok(ControlFlow::Continue(())) => {}
            Err(err) => writeln!(out, "! {err}")?,
        }
    }
    out.flush()
}

fn dispatch<W: Write>(
    out: &mut W,
    session: &mut QuizSession,
    intent: Intent,
    options: &Options,
) -> Result<ControlFlow<()>, Box<dyn std::error::Error>> {
    match (session.stage(), intent) {
        (_, Intent::Quit) => return Ok(ControlFlow::Break(())),
        (_, Intent::Restart) => session.restart(),
        (Stage::Welcome, Intent::Continue) => session.start(),
        (Stage::Finished, Intent::Continue) => session.restart(),
        (Stage::Answering(_) | Stage::Feedback(_), Intent::Continue) => {
            if session.advance()? == Stage::Finished && options.print_json {
                let result = session.result()?;
                writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
            }
        }
        (_, Intent::Select(option)) => {
            session.select_option(option)?;
        }
        (_, Intent::Unknown(raw)) => writeln!(out, "? unrecognized input `{raw}`")?,
    }
    Ok(ControlFlow::Continue(()))
}

fn render<W: Write>(out: &mut W, session: &QuizSession) -> io::Result<()> {
    match session.stage() {
        Stage::Welcome => {
            let quiz = session.quiz();
            writeln!(out)?;
            writeln!(out, "Crypto Nutshell Weekly Quiz")?;
            writeln!(out, "This week's quiz: {}", quiz.title())?;
            writeln!(out, "{}", quiz.description())?;
            writeln!(out, "[enter] start quiz")?;
        }
        Stage::Answering(_) | Stage::Feedback(_) => {
            if let Some(progress) = session.progress() {
                let filled = (progress.position * BAR_WIDTH) / progress.total.max(1);
                writeln!(out)?;
                writeln!(
                    out,
                    "Question {} of {}  Score: {}/{}",
                    progress.position, progress.total, progress.score, progress.total
                )?;
                writeln!(
                    out,
                    "[{}{}]",
                    "#".repeat(filled),
                    ".".repeat(BAR_WIDTH.saturating_sub(filled))
                )?;
            }
            if let Some(view) = session.question_view(None) {
                let can_change = session.config().reselect == ReselectPolicy::Rerecord;
                render_question(out, &view, can_change)?;
            }
        }
        Stage::Finished => match session.result() {
            Ok(result) => {
                writeln!(out)?;
                writeln!(out, "Quiz Complete")?;
                writeln!(out, "You scored {} / {}", result.score, result.total)?;
                writeln!(out, "{}", result.rank.label)?;
                writeln!(out, "{}", result.rank.description)?;
                writeln!(out, "[enter] restart quiz  [q] quit")?;
            }
            Err(err) => writeln!(out, "! {err}")?,
        },
    }
    out.flush()
}

fn render_question<W: Write>(
    out: &mut W,
    view: &QuestionView<'_>,
    can_change: bool,
) -> io::Result<()> {
    writeln!(out, "{}", view.prompt)?;
    for option in &view.options {
        let marker = match option.state {
            OptionState::Selectable | OptionState::Locked => ' ',
            OptionState::SelectedPending => '>',
            OptionState::RevealedCorrect => '+',
            OptionState::RevealedIncorrect => 'x',
        };
        writeln!(out, "{marker} {}) {}", option.index + 1, option.text)?;
    }

    if !view.is_answered {
        return writeln!(out, "[1-4] choose an answer");
    }
    if let Some(explanation) = view.explanation {
        writeln!(out, "{explanation}")?;
    }
    if let Some(source) = view.source_label {
        writeln!(out, "Source: {source}")?;
    }
    if can_change {
        writeln!(out, "[1-4] change answer")?;
    }
    if view.is_last {
        writeln!(out, "[enter] see results")
    } else {
        writeln!(out, "[enter] next question")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use quiz_core::catalog::fixture_quiz;
    use services::SessionConfig;

    fn play(script: &str, correct: &[usize], print_json: bool) -> (QuizSession, String) {
        play_with(
            QuizSession::new(Arc::new(fixture_quiz(correct))),
            script,
            print_json,
        )
    }

    fn play_with(mut session: QuizSession, script: &str, print_json: bool) -> (QuizSession, String) {
        let mut out = Vec::new();
        run(
            script.as_bytes(),
            &mut out,
            &mut session,
            &Options { print_json },
        )
        .unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn intents_parse_from_lines() {
        assert_eq!(Intent::parse(""), Intent::Continue);
        assert_eq!(Intent::parse(" 2 "), Intent::Select(1));
        assert_eq!(Intent::parse("r"), Intent::Restart);
        assert_eq!(Intent::parse("q"), Intent::Quit);
        assert_eq!(Intent::parse("0"), Intent::Unknown("0".into()));
        assert_eq!(Intent::parse("abc"), Intent::Unknown("abc".into()));
    }

    #[test]
    fn full_playthrough_shows_rank() {
        let script = "\n2\n\n1\n\n3\n\n2\n\n4\n\n";
        let (session, out) = play(script, &[1, 2, 2, 1, 3], false);

        assert_eq!(session.stage(), Stage::Finished);
        assert!(out.contains("Question 1 of 5"));
        assert!(out.contains("You scored 4 / 5"));
        assert!(out.contains("On-Chain Observer"));
        assert!(out.contains("[enter] see results"));
    }

    #[test]
    fn errors_are_reported_and_play_continues() {
        let (session, out) = play("\n\n5\n1\nq\n", &[0, 0], false);

        assert!(out.contains("! cannot advance while answering question 1"));
        assert!(out.contains("! option 4 is out of range"));
        assert_eq!(session.stage(), Stage::Feedback(0));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn json_result_is_printed_on_finish() {
        let (_, out) = play("\n1\n\n", &[0], true);
        assert!(out.contains("\"score\": 1"));
        assert!(out.contains("\"label\": \"Skimmer\""));
    }

    #[test]
    fn enter_after_results_returns_to_welcome() {
        let (session, out) = play("\n1\n\n\n", &[0], false);
        assert_eq!(session.stage(), Stage::Welcome);
        assert!(out.matches("[enter] start quiz").count() >= 2);
    }

    #[test]
    fn quit_stops_reading_input() {
        let (session, out) = play("\nq\n1\n", &[0, 0], false);
        assert_eq!(session.stage(), Stage::Answering(0));
        assert_eq!(session.score(), 0);
        assert!(!out.contains("! "));
    }

    #[test]
    fn change_hint_follows_reselect_policy() {
        let (_, out) = play("\n1\nq\n", &[0], false);
        assert!(out.contains("[1-4] change answer"));

        let config = SessionConfig::default().with_reselect(ReselectPolicy::Reject);
        let session = QuizSession::with_config(Arc::new(fixture_quiz(&[0])), config);
        let (session, out) = play_with(session, "\n1\n2\nq\n", false);
        assert!(!out.contains("[1-4] change answer"));
        assert!(out.contains("! cannot select an option while showing feedback for question 1"));
        assert_eq!(session.selected_answers()[0], Some(0));
    }
}
