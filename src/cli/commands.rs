use crate::error::{EtfError, EtfResult};
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::history::HistoryStore;
use crate::locale::{Label, Locale};
use crate::shell::FormState;
use crate::types::{Field, Record};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Field values given on the command line; `None` means "not given"
#[derive(Debug, Clone, Default)]
pub struct FieldArgs {
    pub code: Option<String>,
    pub price: Option<String>,
    pub nav: Option<String>,
    pub trend: Option<String>,
}

impl FieldArgs {
    /// Overlay the given values onto `base`
    pub fn apply_to(&self, base: &mut Record) {
        let pairs = [
            (Field::Code, &self.code),
            (Field::Price, &self.price),
            (Field::Nav, &self.nav),
            (Field::Trend, &self.trend),
        ];
        for (field, value) in pairs {
            if let Some(v) = value {
                base.set(field, v.as_str());
            }
        }
    }

    pub fn into_record(self) -> Record {
        let mut record = Record::default();
        self.apply_to(&mut record);
        record
    }
}

fn print_record(record: &Record, locale: Locale) {
    for field in Field::ALL {
        println!(
            "   {:<24}{}",
            field.label(locale).cyan(),
            record.get(field).bold()
        );
    }
}

/// Execute the add command - append one record to history
pub fn add(store: &mut HistoryStore, fields: FieldArgs, locale: Locale) -> EtfResult<()> {
    let record = fields.into_record();
    let saved = store.append_and_persist(&record)?.clone();

    println!("{} {}", "✅".green(), locale.saved_message().bold().green());
    println!("   History: {} ({} entries)", store.path().display(), store.len());
    print_record(&saved, locale);
    Ok(())
}

/// Execute the list command - show the history selector entries
pub fn list(store: &HistoryStore, locale: Locale) -> EtfResult<()> {
    println!("{}", locale.label(Label::Title).bold().green());
    println!("   History: {}", store.path().display());
    println!();

    if store.is_empty() {
        println!("   {}", "(empty)".yellow());
        return Ok(());
    }

    for (i, code) in store.codes().iter().enumerate() {
        println!("   [{}] {}", i, code.bright_blue());
    }
    Ok(())
}

/// Execute the show command - print one history record
pub fn show(store: &HistoryStore, index: usize, locale: Locale) -> EtfResult<()> {
    let record = store.get(index).ok_or(EtfError::NoSelection)?;
    println!("{}", format!("📋 [{}]", index).bold().cyan());
    print_record(record, locale);
    Ok(())
}

/// Execute the generate command - export a workbook
///
/// Starts from the history entry `from` when given, then overlays any field
/// values passed on the command line.
pub fn generate(
    store: &HistoryStore,
    from: Option<usize>,
    fields: FieldArgs,
    output: PathBuf,
    locale: Locale,
) -> EtfResult<()> {
    let mut record = match from {
        Some(index) => store.get(index).cloned().ok_or(EtfError::NoSelection)?,
        None => Record::default(),
    };
    fields.apply_to(&mut record);

    ExcelExporter::new(record)?.export(&output)?;

    println!("{} {}", "✅".green(), locale.generated_message().bold().green());
    println!("   Output: {}", output.display());
    Ok(())
}

/// Execute the inspect command - read a generated workbook back
pub fn inspect(path: &Path, locale: Locale) -> EtfResult<()> {
    let importer = ExcelImporter::new(path);
    let record = importer.import()?;

    println!("{}", format!("🔍 {}", path.display()).bold().cyan());
    print_record(&record, locale);

    let formula = importer
        .timestamp_formula()?
        .unwrap_or_else(|| "-".to_string());
    println!("   {:<24}{}", "NOW()".cyan(), formula);
    Ok(())
}

/// Execute the form command - interactive session on stdin/stdout
pub fn form(store: HistoryStore, locale: Locale) -> EtfResult<()> {
    let mut state = FormState::new(store, locale);
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_form(&mut state, stdin.lock(), stdout.lock())
}

const FORM_HELP: &str = "\
commands:
  set <field> <value>   field: code | price | nav | trend
  select <n>            pick a history entry
  load                  copy the selected entry into the form
  save                  append the form to history
  generate [path]       export the form to Excel
  lang                  switch language
  show                  redraw the form
  quit";

/// Drive `state` from line commands read from `input`
///
/// Errors from form actions (including failed saves and exports) are
/// reported in the active language and the session continues. Only failures
/// reading `input` or writing `out` end it.
pub fn run_form<R: BufRead, W: Write>(
    state: &mut FormState,
    input: R,
    mut out: W,
) -> EtfResult<()> {
    write!(out, "{}", state.render_view())?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        let outcome: EtfResult<Option<String>> = match command {
            "" => continue,
            "quit" | "exit" | "q" => break,
            "help" | "?" => Ok(Some(FORM_HELP.to_string())),
            "show" => Ok(Some(state.render_view())),
            "lang" => {
                state.toggle_language();
                Ok(Some(state.render_view()))
            }
            "set" => {
                let (name, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                match Field::from_name(name) {
                    Some(field) => {
                        state.set_input(field, value.trim());
                        Ok(None)
                    }
                    None => Ok(Some(format!("unknown field: {}", name))),
                }
            }
            "select" => match rest.parse::<usize>() {
                Ok(index) => {
                    state.select(index);
                    Ok(None)
                }
                Err(_) => {
                    state.clear_selection();
                    Ok(None)
                }
            },
            "load" => state.load_selected().map(|_| Some(state.render_view())),
            "save" => state.save_current().map(|msg| Some(msg.to_string())),
            "generate" => {
                let path = if rest.is_empty() {
                    PathBuf::from(crate::excel::DEFAULT_WORKBOOK_FILE)
                } else {
                    PathBuf::from(rest)
                };
                state.generate(&path).map(|msg| Some(msg.to_string()))
            }
            other => Ok(Some(format!("unknown command: {} (try 'help')", other))),
        };

        match outcome {
            Ok(Some(text)) => writeln!(out, "{}", text)?,
            Ok(None) => {}
            Err(e) => {
                if !e.is_recoverable() {
                    warn!(error = %e, command, "form action failed");
                }
                writeln!(out, "{} {}", "❌".red(), state.message_for(&e).red())?
            }
        }
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
