//! The `promptgrade session` command: interactive grading on stdin.
//!
//! Each line is one command (`pass 3`, `copy 5`, `rate`, ...). Grades live in
//! memory only and are discarded when the session ends.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;
use futures::FutureExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use promptgrade_core::model::{EvaluationSet, Grade};
use promptgrade_core::report::GradeReport;
use promptgrade_core::{CopyOutcome, PromptCopier};
use promptgrade_platform::config::load_config_from;

use super::{build_copier, load_eval_set, pass_rate_line, render_table};

const HELP: &str = "\
Commands:
  pass ID            mark item ID as PASS
  fail ID            mark item ID as FAIL
  none ID            clear the grade of item ID (alias: reset)
  grade ID GRADE     set item ID to NONE, PASS or FAIL
  copy ID            copy the prompt of item ID to the clipboard
  show               print all items (alias: list)
  rate               print the pass rate
  summary [json]     print a grade summary
  help               print this help
  quit               end the session (alias: exit, Ctrl-D)";

/// One parsed line of session input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Grade { id: u32, grade: Grade },
    Copy(u32),
    Show,
    Rate,
    Summary { json: bool },
    Help,
    Quit,
    Empty,
}

fn parse_id(raw: Option<&str>) -> Result<u32, String> {
    let raw = raw.ok_or_else(|| "missing item id".to_string())?;
    raw.parse()
        .map_err(|_| format!("invalid item id: {raw}"))
}

/// Parse a line of session input.
pub fn parse_line(line: &str) -> Result<SessionCommand, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(SessionCommand::Empty);
    };

    let command = match verb.to_lowercase().as_str() {
        "pass" => SessionCommand::Grade {
            id: parse_id(words.next())?,
            grade: Grade::Pass,
        },
        "fail" => SessionCommand::Grade {
            id: parse_id(words.next())?,
            grade: Grade::Fail,
        },
        "none" | "reset" => SessionCommand::Grade {
            id: parse_id(words.next())?,
            grade: Grade::Ungraded,
        },
        "grade" | "set" => {
            let id = parse_id(words.next())?;
            let grade = words
                .next()
                .ok_or_else(|| "missing grade".to_string())?
                .parse()?;
            SessionCommand::Grade { id, grade }
        }
        "copy" => SessionCommand::Copy(parse_id(words.next())?),
        "show" | "list" => SessionCommand::Show,
        "rate" => SessionCommand::Rate,
        "summary" => SessionCommand::Summary {
            json: words.next().is_some_and(|w| w.eq_ignore_ascii_case("json")),
        },
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => return Err(format!("unknown command: {other} (try 'help')")),
    };

    if let Some(extra) = words.next() {
        return Err(format!("unexpected argument: {extra}"));
    }

    Ok(command)
}

/// A grading session: the set under evaluation plus in-flight copies.
pub struct Session {
    set: EvaluationSet,
    copier: PromptCopier,
    pending: Vec<JoinHandle<CopyOutcome>>,
}

impl Session {
    pub fn new(set: EvaluationSet, copier: PromptCopier) -> Self {
        Self {
            set,
            copier,
            pending: Vec::new(),
        }
    }

    pub fn set(&self) -> &EvaluationSet {
        &self.set
    }

    /// Apply one command. Returns `false` once the session should end.
    pub fn apply(&mut self, command: SessionCommand, out: &mut dyn Write) -> Result<bool> {
        self.reap_finished();

        match command {
            SessionCommand::Grade { id, grade } => {
                // Stale or mistyped ids are ignored without comment.
                if self.set.set_grade(id, grade) {
                    writeln!(out, "#{id} -> {grade}    {}", pass_rate_line(&self.set))?;
                }
            }
            SessionCommand::Copy(id) => match self.set.get(id) {
                Some(item) => {
                    let handle = self.copier.spawn_copy(item.prompt().to_string());
                    self.pending.push(handle);
                }
                None => writeln!(out, "no item with id {id}")?,
            },
            SessionCommand::Show => {
                writeln!(out, "{}", pass_rate_line(&self.set))?;
                writeln!(out, "{}", render_table(&self.set))?;
            }
            SessionCommand::Rate => writeln!(out, "{}", pass_rate_line(&self.set))?,
            SessionCommand::Summary { json } => {
                let report = GradeReport::from_set(&self.set);
                if json {
                    writeln!(out, "{}", report.to_json()?)?;
                } else {
                    write!(out, "{}", report.to_markdown())?;
                }
            }
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => return Ok(false),
            SessionCommand::Empty => {}
        }

        Ok(true)
    }

    /// Drop finished copy tasks, logging any that panicked or were cancelled.
    /// Returns how many of them failed.
    fn reap_finished(&mut self) -> usize {
        let (done, running): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|handle| handle.is_finished());
        self.pending = running;

        let mut failed = 0;
        for handle in done {
            if let Some(Err(e)) = handle.now_or_never() {
                tracing::warn!("copy task failed: {e}");
                failed += 1;
            }
        }
        failed
    }

    /// Wait for in-flight copies so their notifications are shown, then
    /// hand back the final set.
    pub async fn finish(self) -> (EvaluationSet, Vec<CopyOutcome>) {
        let outcomes = futures::future::join_all(self.pending)
            .await
            .into_iter()
            .filter_map(|joined| match joined {
                Ok(outcome) => Some(outcome),
                Err(e) => {
                    tracing::warn!("copy task failed: {e}");
                    None
                }
            })
            .collect();
        (self.set, outcomes)
    }
}

pub async fn execute(eval_set_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let set = load_eval_set(eval_set_path, &config)?;
    let (copier, _toasts) = build_copier(&config);

    let interactive = std::io::stdin().is_terminal();
    let mut stdout = std::io::stdout();

    writeln!(stdout, "{} ({} prompts)", set.name(), set.len())?;
    if interactive {
        writeln!(stdout, "Type 'help' for commands.")?;
    }

    let mut session = Session::new(set, copier);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if interactive {
            write!(stdout, "> ")?;
            stdout.flush()?;
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_line(&line) {
            Ok(command) => {
                if !session.apply(command, &mut stdout)? {
                    break;
                }
            }
            Err(message) => eprintln!("{message}"),
        }
    }

    let (set, _) = session.finish().await;
    let counts = set.counts();
    writeln!(
        stdout,
        "Final {}  ({} pass, {} fail, {} ungraded)",
        pass_rate_line(&set),
        counts.pass,
        counts.fail,
        counts.ungraded
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use promptgrade_core::seed::reference_set;
    use promptgrade_core::traits::NotificationKind;
    use promptgrade_platform::mock::{MockClipboard, RecordingNotifier};

    fn session_with(clipboard: MockClipboard) -> (Session, Arc<MockClipboard>, Arc<RecordingNotifier>) {
        let clipboard = Arc::new(clipboard);
        let notifier = Arc::new(RecordingNotifier::new());
        let copier = PromptCopier::new(clipboard.clone(), notifier.clone());
        (Session::new(reference_set(), copier), clipboard, notifier)
    }

    fn run(session: &mut Session, line: &str) -> String {
        let mut out = Vec::new();
        let command = parse_line(line).unwrap();
        session.apply(command, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_grade_commands() {
        assert_eq!(
            parse_line("pass 3").unwrap(),
            SessionCommand::Grade { id: 3, grade: Grade::Pass }
        );
        assert_eq!(
            parse_line("  FAIL 12 ").unwrap(),
            SessionCommand::Grade { id: 12, grade: Grade::Fail }
        );
        assert_eq!(
            parse_line("reset 1").unwrap(),
            SessionCommand::Grade { id: 1, grade: Grade::Ungraded }
        );
        assert_eq!(
            parse_line("grade 4 pass").unwrap(),
            SessionCommand::Grade { id: 4, grade: Grade::Pass }
        );
    }

    #[test]
    fn parses_other_commands() {
        assert_eq!(parse_line("copy 7").unwrap(), SessionCommand::Copy(7));
        assert_eq!(parse_line("list").unwrap(), SessionCommand::Show);
        assert_eq!(parse_line("rate").unwrap(), SessionCommand::Rate);
        assert_eq!(
            parse_line("summary json").unwrap(),
            SessionCommand::Summary { json: true }
        );
        assert_eq!(parse_line("exit").unwrap(), SessionCommand::Quit);
        assert_eq!(parse_line("   ").unwrap(), SessionCommand::Empty);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_line("pass").unwrap_err().contains("missing item id"));
        assert!(parse_line("pass one").unwrap_err().contains("invalid item id"));
        assert!(parse_line("grade 1 maybe").is_err());
        assert!(parse_line("dance").unwrap_err().contains("unknown command"));
        assert!(parse_line("pass 1 2").unwrap_err().contains("unexpected argument"));
    }

    #[tokio::test]
    async fn grading_updates_rate() {
        let (mut session, _, _) = session_with(MockClipboard::succeeding());
        run(&mut session, "pass 1");
        run(&mut session, "pass 5");
        let out = run(&mut session, "fail 2");
        assert!(out.contains("#2 -> FAIL"));
        assert!(run(&mut session, "rate").contains("Pass Rate: 15.4%"));
    }

    #[tokio::test]
    async fn unknown_id_is_silent_noop() {
        let (mut session, _, _) = session_with(MockClipboard::succeeding());
        run(&mut session, "pass 1");
        let before = session.set().clone();
        let out = run(&mut session, "fail 99");
        assert!(out.is_empty());
        assert_eq!(session.set(), &before);
    }

    #[tokio::test]
    async fn copy_notifies_and_keeps_grades() {
        let (mut session, clipboard, notifier) = session_with(MockClipboard::succeeding());
        run(&mut session, "pass 2");
        run(&mut session, "copy 7");
        let (set, outcomes) = session.finish().await;

        assert_eq!(outcomes, vec![CopyOutcome::Copied]);
        assert!(clipboard.contents()[0].starts_with("Sally is a girl."));
        assert_eq!(notifier.count(NotificationKind::Success), 1);
        assert_eq!(notifier.count(NotificationKind::Failure), 0);
        assert_eq!(set.grade_of(2), Some(Grade::Pass));
    }

    #[tokio::test]
    async fn rejected_copy_notifies_failure_once() {
        let (mut session, _, notifier) = session_with(MockClipboard::denying("no access"));
        run(&mut session, "pass 3");
        let before = session.set().clone();
        run(&mut session, "copy 3");
        let (set, outcomes) = session.finish().await;

        assert_eq!(outcomes, vec![CopyOutcome::Failed]);
        assert_eq!(notifier.count(NotificationKind::Failure), 1);
        assert_eq!(notifier.count(NotificationKind::Success), 0);
        assert_eq!(set, before);
    }

    #[tokio::test]
    async fn copy_unknown_id_reports_and_skips() {
        let (mut session, clipboard, notifier) = session_with(MockClipboard::succeeding());
        let out = run(&mut session, "copy 42");
        assert!(out.contains("no item with id 42"));
        session.finish().await;
        assert_eq!(clipboard.call_count(), 0);
        assert!(notifier.notifications().is_empty());
    }

    async fn exploding_copy() -> CopyOutcome {
        panic!("clipboard backend crashed")
    }

    #[tokio::test]
    async fn panicked_copy_is_reaped_and_reported() {
        let (mut session, _, _) = session_with(MockClipboard::succeeding());
        session.pending.push(tokio::spawn(exploding_copy()));
        run(&mut session, "copy 1");
        while !session.pending.iter().all(|handle| handle.is_finished()) {
            tokio::task::yield_now().await;
        }

        assert_eq!(session.reap_finished(), 1);
        assert!(session.pending.is_empty());
        assert!(run(&mut session, "rate").contains("Pass Rate: 0.0%"));
    }

    #[tokio::test]
    async fn quit_ends_session() {
        let (mut session, _, _) = session_with(MockClipboard::succeeding());
        let mut out = Vec::new();
        assert!(!session.apply(SessionCommand::Quit, &mut out).unwrap());
        assert!(session.apply(SessionCommand::Rate, &mut out).unwrap());
    }
}
