//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "textlab",
    version,
    about = "Textlab (regex tester + SQL linter)",
    long_about = "Textlab — a tiny, fast CLI for testing regular expressions and linting SQL.\n\nConfiguration precedence: CLI > textlab.toml > defaults.",
    after_help = "Examples:\n  textlab regex --pattern '#(\\d+)' --flags g --text 'Order #1 #2 #3'\n  textlab regex --pattern 'foo' --replace 'bar' notes.txt\n  textlab sql 'queries/**/*.sql' --keyword-case upper\n  textlab sql --text 'SELECT * FROM users' --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands for regex testing and SQL linting.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current textlab version.")]
    Version,
    /// Test a regular expression against input text
    #[command(
        about = "Run a regex against input text",
        long_about = "Compile a pattern with JS-style flags (g i m s u y), collect matches up to a limit, and print matches plus a highlighted preview. Reads FILE, --text, or stdin.",
        after_help = "Examples:\n  textlab regex --pattern '\\bwhere\\b' --flags gi queries.sql\n  echo 'a=1 b=2' | textlab regex --pattern '(?P<k>\\w+)=(?P<v>\\w+)' --flags g\n  textlab regex --pattern '\\d+' --replace 'N' --text 'a1 b22'"
    )]
    Regex {
        #[arg(long, help = "Pattern to compile")]
        pattern: String,
        #[arg(long, help = "Flag letters: any of g i m s u y (default from config)")]
        flags: Option<String>,
        #[arg(long, help = "Inline input text (instead of FILE/stdin)")]
        text: Option<String>,
        #[arg(help = "Input file (stdin when omitted and --text unset)")]
        file: Option<String>,
        #[arg(long, help = "Maximum number of matches to record")]
        limit: Option<usize>,
        #[arg(long, help = "Preview window length in bytes for highlight output")]
        preview: Option<usize>,
        #[arg(long, help = "Replacement template; prints the rewritten text")]
        replace: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Working root (default: current dir)")]
        root: Option<String>,
    },
    /// Lint SQL files or inline text
    #[command(
        about = "Run SQL lint checks",
        long_about = "Lint SQL sources: SELECT *, UPDATE/DELETE without WHERE, missing trailing semicolons, overlong lines, and keyword casing. Targets come from glob patterns, config, or --text.",
        after_help = "Examples:\n  textlab sql\n  textlab sql 'migrations/*.sql' --max-line-length 100\n  textlab sql --text 'delete from logs' --output json"
    )]
    Sql {
        #[arg(help = "File globs to lint (default from config, else **/*.sql)")]
        patterns: Vec<String>,
        #[arg(long, help = "Inline SQL text to lint instead of files")]
        text: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Disable the SELECT * check")]
        no_select_star: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Disable the UPDATE/DELETE-without-WHERE check")]
        no_unsafe_mutation: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Disable the trailing-semicolon check")]
        no_semicolon: bool,
        #[arg(long, help = "Maximum line length in characters (0 disables)")]
        max_line_length: Option<usize>,
        #[arg(long, help = "Keyword casing: upper|lower|preserve")]
        keyword_case: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Working root (default: current dir)")]
        root: Option<String>,
    },
}
