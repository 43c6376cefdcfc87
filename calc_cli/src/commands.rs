//! Subcommand handlers.
//!
//! Domain errors (division by zero, non-exact roots, ...) are answers, not
//! failures: they are printed and reported through the exit code. Only
//! history I/O problems surface as `anyhow` errors.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde::Serialize;

use calc_core::calculations::division::presentation;
use calc_core::calculations::{factorize_text, sqrt_check_text};
use calc_core::{
    evaluate, load_or_create_history, save_history, Calculation, CalculatorSettings, DivisionPresentation,
    DivisionView, ErrorKind, History, HistoryEntry, HistoryLock, Recorded,
};

use crate::render::render;

const DEFAULT_HISTORY_FILE: &str = ".calc_history.json";

/// Where history lives and how results are shown.
pub struct Session {
    pub history_path: Option<PathBuf>,
    pub separator: Option<char>,
}

/// JSON shape printed by `--json`.
#[derive(Serialize)]
struct Report<'a> {
    input: String,
    result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    remainder: Option<String>,
    calculation: &'a Calculation,
    #[serde(skip_serializing_if = "Option::is_none")]
    division: Option<DivisionPresentation>,
}

impl Session {
    pub fn new(history: Option<PathBuf>, no_history: bool, separator: Option<char>) -> Self {
        let history_path = if no_history { None } else { history.or_else(default_history_path) };
        Session {
            history_path,
            separator,
        }
    }

    /// Settings from the history file, with command-line overrides applied.
    fn settings(&self) -> Result<CalculatorSettings> {
        let mut settings = match &self.history_path {
            Some(path) => load_or_create_history(path)
                .with_context(|| format!("reading history {}", path.display()))?
                .settings,
            None => CalculatorSettings::default(),
        };
        if let Some(separator) = self.separator {
            settings = settings.with_separator(separator);
        }
        settings.validate()?;
        Ok(settings)
    }

    pub fn eval(&self, expr: &str, expanded: bool, json: bool) -> Result<ExitCode> {
        let mut settings = self.settings()?;
        if expanded {
            settings = settings.with_division_view(DivisionView::Expanded);
        }
        let outcome = evaluate(expr, &settings).map(Calculation::Arithmetic);
        self.finish(expr.trim(), outcome, &settings, json)
    }

    pub fn factor(&self, n: &str, json: bool) -> Result<ExitCode> {
        let settings = self.settings()?;
        let outcome = factorize_text(n).map(Calculation::Factorization);
        self.finish_labelled(outcome, &settings, json)
    }

    pub fn sqrt(&self, n: &str, json: bool) -> Result<ExitCode> {
        let settings = self.settings()?;
        let outcome = sqrt_check_text(n).map(Calculation::SquareRoot);
        self.finish_labelled(outcome, &settings, json)
    }

    /// Factorizations and roots are keyed by their label, e.g. `√(49)`.
    fn finish_labelled(
        &self,
        outcome: std::result::Result<Calculation, ErrorKind>,
        settings: &CalculatorSettings,
        json: bool,
    ) -> Result<ExitCode> {
        let input = match &outcome {
            Ok(calculation) => calculation.input_label(settings.decimal_separator),
            Err(_) => String::new(),
        };
        self.finish(&input, outcome, settings, json)
    }

    /// Print the outcome and record it in history under `input`, the text
    /// as the user typed it.
    fn finish(
        &self,
        input: &str,
        outcome: std::result::Result<Calculation, ErrorKind>,
        settings: &CalculatorSettings,
        json: bool,
    ) -> Result<ExitCode> {
        let calculation = match outcome {
            Ok(calculation) => calculation,
            Err(kind) => {
                report_error(kind, json)?;
                return Ok(ExitCode::FAILURE);
            }
        };

        let separator = settings.decimal_separator;
        let rendered = render(&calculation, separator);

        if json {
            let (remainder, division) = match &calculation {
                Calculation::Arithmetic(result) => (
                    calc_core::format_remainder(result, separator),
                    presentation(result),
                ),
                _ => (None, None),
            };
            let report = Report {
                input: input.to_string(),
                result: calculation.summary(separator),
                remainder,
                calculation: &calculation,
                division,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{rendered}");
        }

        if calculation.worth_recording() {
            if let Some(path) = &self.history_path {
                let entry = HistoryEntry::new(
                    input,
                    calculation.summary(separator),
                    rendered,
                );
                record(path, entry)?;
            }
        }
        Ok(ExitCode::SUCCESS)
    }

    pub fn history_list(&self) -> Result<ExitCode> {
        let history = self.load_history()?;
        if history.is_empty() {
            println!("No calculations yet.");
        }
        for (i, entry) in history.entries().iter().enumerate() {
            println!("{:>3}. {} = {}", i + 1, entry.input, entry.result);
        }
        Ok(ExitCode::SUCCESS)
    }

    pub fn history_show(&self, key: &str) -> Result<ExitCode> {
        let history = self.load_history()?;
        match find_entry(&history, key) {
            Some(entry) => {
                println!("{}", entry.rendered_output);
                Ok(ExitCode::SUCCESS)
            }
            None => {
                eprintln!("No history entry matches '{key}'");
                Ok(ExitCode::FAILURE)
            }
        }
    }

    pub fn history_clear(&self) -> Result<ExitCode> {
        let Some(path) = &self.history_path else {
            return Ok(ExitCode::SUCCESS);
        };
        let _lock = HistoryLock::acquire(path)?;
        let mut history = load_or_create_history(path)?;
        let removed = history.len();
        history.clear();
        save_history(&history, path)?;
        println!("Removed {removed} entries.");
        Ok(ExitCode::SUCCESS)
    }

    fn load_history(&self) -> Result<History> {
        match &self.history_path {
            Some(path) => Ok(load_or_create_history(path)
                .with_context(|| format!("reading history {}", path.display()))?),
            None => Ok(History::new()),
        }
    }
}

fn default_history_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(DEFAULT_HISTORY_FILE))
}

/// A 1-based position in the list, or the input text of an entry.
fn find_entry<'a>(history: &'a History, key: &str) -> Option<&'a HistoryEntry> {
    key.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| history.entries().get(i))
        .or_else(|| history.find(key.trim()))
}

fn record(path: &Path, entry: HistoryEntry) -> Result<()> {
    let _lock = HistoryLock::acquire(path)?;
    let mut history = load_or_create_history(path)?;
    if let Recorded::Duplicate { previous_index, .. } = history.record(entry) {
        tracing::debug!(previous_index, "moved existing history entry to the front");
    }
    save_history(&history, path).with_context(|| format!("writing history {}", path.display()))
}

fn report_error(kind: ErrorKind, json: bool) -> Result<()> {
    if json {
        let value = serde_json::json!({
            "error": kind,
            "code": kind.code(),
            "message": kind.message(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else if kind.is_informational() {
        println!("{}", kind.message());
    } else {
        eprintln!("{}", kind.message());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    fn temp_session(name: &str) -> (Session, PathBuf) {
        let path = temp_dir().join(format!("calc_cli_test_{}_{}.json", name, std::process::id()));
        let _ = std::fs::remove_file(&path);
        (Session::new(Some(path.clone()), false, None), path)
    }

    #[test]
    fn test_history_keeps_typed_input() {
        let (session, path) = temp_session("typed_input");

        session.eval("12,5x3", false, false).unwrap();
        session.eval("12,5*3", false, false).unwrap();
        session.eval(" 012,50x3 ", false, false).unwrap();

        let history = load_or_create_history(&path).unwrap();
        assert_eq!(history.len(), 3);

        let entry = find_entry(&history, "12,5x3").unwrap();
        assert_eq!(entry.input, "12,5x3");
        assert_eq!(entry.result, "37,5");
        assert!(find_entry(&history, "12,5*3").is_some());
        assert_eq!(find_entry(&history, "012,50x3").unwrap().input, "012,50x3");
        assert_eq!(find_entry(&history, "1").unwrap().input, "012,50x3");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_repeated_input_is_one_entry() {
        let (session, path) = temp_session("repeat");

        session.eval("17/5", false, false).unwrap();
        session.eval("2+2", false, false).unwrap();
        session.eval("17/5", false, false).unwrap();

        let history = load_or_create_history(&path).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries()[0].input, "17/5");

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_labelled_calculations_use_their_label() {
        let (session, path) = temp_session("labelled");

        session.sqrt("49", false).unwrap();
        session.factor("12", false).unwrap();

        let history = load_or_create_history(&path).unwrap();
        assert!(find_entry(&history, "√(49)").is_some());
        assert!(find_entry(&history, "Prime factors(12)").is_some());

        let _ = std::fs::remove_file(&path);
    }
}
