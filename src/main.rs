use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use etf_valuation::cli::{self, FieldArgs};
use etf_valuation::excel::DEFAULT_WORKBOOK_FILE;
use etf_valuation::history::{HistoryStore, DEFAULT_HISTORY_FILE};
use etf_valuation::locale::Locale;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "etf-valuation")]
#[command(about = "Record ETF quotes and export an Excel valuation sheet.")]
#[command(long_about = "ETF Valuation - record ETF quotes and export an Excel valuation sheet

Each record holds four fields: ETF code, market price, net asset value (NAV),
and market trend. Saved records are appended to a JSON history file; any
record can be exported to a fixed-layout .xlsx with a trend dropdown and a
live NOW() timestamp.

COMMANDS:
  add       - Save a record to history
  list      - List saved records
  show      - Show one saved record
  generate  - Export a record to Excel (.xlsx)
  inspect   - Read a generated workbook back
  form      - Interactive form session

EXAMPLES:
  etf-valuation add --code 0050 --price 150.5 --nav 149.8 --trend 牛市
  etf-valuation list
  etf-valuation generate --from 0 -o 0050.xlsx
  etf-valuation --lang en form")]
#[command(version)]
struct Cli {
    /// History file
    #[arg(long, global = true, env = "ETF_HISTORY_FILE", default_value = DEFAULT_HISTORY_FILE)]
    history: PathBuf,

    /// Interface language: zh (中文) or en (english)
    #[arg(
        long,
        global = true,
        env = "ETF_LANG",
        value_parser = clap::value_parser!(Locale),
        default_value_t = Locale::Zh
    )]
    lang: Locale,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct FieldOpts {
    /// ETF code (e.g. 0050)
    #[arg(long)]
    code: Option<String>,

    /// Current market price
    #[arg(long)]
    price: Option<String>,

    /// Net asset value (NAV)
    #[arg(long)]
    nav: Option<String>,

    /// Market trend (牛市, 熊市, 震盪, 中性)
    #[arg(long)]
    trend: Option<String>,
}

impl From<FieldOpts> for FieldArgs {
    fn from(opts: FieldOpts) -> Self {
        FieldArgs {
            code: opts.code,
            price: opts.price,
            nav: opts.nav,
            trend: opts.trend,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Save a record to history (every field must be non-empty)
    Add {
        #[command(flatten)]
        fields: FieldOpts,
    },

    /// List saved records by ETF code
    List,

    /// Show one saved record
    Show {
        /// Index from `list`
        index: usize,
    },

    #[command(long_about = "Export a record to Excel .xlsx.

Starts from the history entry given by --from (if any), then applies the
field options. Price and NAV must be valid numbers; otherwise no file is
written.

EXAMPLES:
  etf-valuation generate --from 1
  etf-valuation generate --code 0056 --price 35.2 --nav 35.1 --trend 中性 -o out.xlsx")]
    /// Export a record to Excel .xlsx
    Generate {
        /// Start from this history entry
        #[arg(long)]
        from: Option<usize>,

        #[command(flatten)]
        fields: FieldOpts,

        /// Output Excel file path (.xlsx)
        #[arg(short, long, default_value = DEFAULT_WORKBOOK_FILE)]
        output: PathBuf,
    },

    /// Read a generated workbook back and print its fields
    Inspect {
        /// Path to Excel file (.xlsx)
        file: PathBuf,
    },

    /// Interactive form session on stdin
    Form,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "etf_valuation=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn open_history(path: &Path) -> anyhow::Result<HistoryStore> {
    HistoryStore::open(path)
        .with_context(|| format!("Failed to load history from {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let locale = cli.lang;

    let result = match cli.command {
        Commands::Add { fields } => {
            let mut store = open_history(&cli.history)?;
            cli::add(&mut store, fields.into(), locale)
        }
        Commands::List => cli::list(&open_history(&cli.history)?, locale),
        Commands::Show { index } => cli::show(&open_history(&cli.history)?, index, locale),
        Commands::Generate {
            from,
            fields,
            output,
        } => cli::generate(
            &open_history(&cli.history)?,
            from,
            fields.into(),
            output,
            locale,
        ),
        Commands::Inspect { file } => cli::inspect(&file, locale),
        Commands::Form => cli::form(open_history(&cli.history)?, locale),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.is_recoverable() => {
            eprintln!("{} {}", "❌".red(), locale.error_message(&e).red().bold());
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
