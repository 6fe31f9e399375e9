use clap::{Parser as ClapParser, Subcommand};
use std::io;
use tinyparser::cli::{self, CheckOptions, CliError, EvalOptions, Report};

#[derive(ClapParser)]
#[command(name = "tiny")]
#[command(about = "Tiny - tokenize, parse, inspect and evaluate tiny expressions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token sequence of an expression
    Tokens {
        /// The expression to tokenize
        expr: String,
    },

    /// Print the parse tree of an expression
    Tree {
        /// The expression to parse
        expr: String,

        /// Print the tree as JSON
        #[arg(short, long)]
        json: bool,

        /// Indent the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate the syntax of an expression
    Check {
        /// The expression to validate
        expr: String,
    },

    /// Evaluate statements with the built-in calculator
    Eval {
        /// Statements to evaluate in order (reads stdin lines if omitted)
        statements: Vec<String>,

        /// Print values as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show documentation, optionally for one topic
    Docs {
        /// Topic name (omit to list topics)
        topic: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tokens { expr } => run_check(expr, Report::Tokens),
        Commands::Tree { expr, json, pretty } => {
            let report = match (json, pretty) {
                (true, true) => Report::JsonPretty,
                (true, false) => Report::Json,
                (false, _) => Report::Tree,
            };
            run_check(expr, report)
        }
        Commands::Check { expr } => run_check(expr, Report::Syntax),
        Commands::Eval { statements, json } => run_eval(statements, json),
        Commands::Docs { topic: None } => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Docs { topic: Some(topic) } => cli::get_doc_category(&topic).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(source: String, report: Report) -> Result<(), CliError> {
    let output = cli::execute_check(&CheckOptions { source, report })?;
    print!("{}", output);
    Ok(())
}

fn run_eval(statements: Vec<String>, json: bool) -> Result<(), CliError> {
    let statements = if statements.is_empty() && !atty::is(atty::Stream::Stdin) {
        cli::read_statements(io::stdin().lock())?
    } else {
        statements
    };

    for line in cli::execute_eval(&EvalOptions { statements, json })? {
        println!("{}", line);
    }
    Ok(())
}
