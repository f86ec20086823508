//! Runs the Quark front end from the command line: loads a source file, tokenizes it and parses
//! the expressions it contains.

use std::{cell::Cell, fs::File, io::Write, path::PathBuf, process::ExitCode, sync::Arc};

pub use clap::Parser;
use quark_base::{
    diagnostic::Handler,
    log::{Message, Severity},
    source_file::{self, SourceFile},
};
use quark_lexical::tokenizer::Tokenizer;
use quark_syntax::parser;

/// The least severe message that gets printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, clap::ValueEnum)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl From<LogLevel> for Severity {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warning => Self::Warning,
            LogLevel::Error => Self::Error,
        }
    }
}

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(name = "quark", about = "Quark programming language front end.")]
pub struct Argument {
    /// The input file to read the expressions from.
    pub file: PathBuf,

    /// Prints out every token of the input file instead of parsing it.
    #[clap(long = "dump-tokens")]
    pub dump_tokens: bool,

    /// Prints out the syntax tree of every parsed expression.
    #[clap(long = "dump-syntax")]
    pub dump_syntax: bool,

    /// Messages less severe than this level are not printed.
    #[clap(long = "log-level", value_enum, default_value_t = LogLevel::Warning)]
    pub log_level: LogLevel,
}

/// A struct that implements [`Handler`] but prints the messages to the standard error stream.
///
/// Error messages already carry a rendered diagnostic, so their text is printed as is.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Printer {
    min_severity: Severity,
    error_reported: Cell<bool>,
}

impl Printer {
    fn new(min_severity: Severity) -> Self {
        Self {
            min_severity,
            error_reported: Cell::new(false),
        }
    }

    fn has_reported_error(&self) -> bool { self.error_reported.get() }
}

impl Handler<Message<String>> for Printer {
    fn receive(&self, message: Message<String>) {
        if message.severity == Severity::Error {
            self.error_reported.set(true);
        }

        if message.severity < self.min_severity {
            return;
        }

        if message.severity == Severity::Error {
            eprintln!("{}", message.display);
        } else {
            eprintln!("{message}");
        }
    }
}

/// Tokenizes or parses the given source file according to the argument.
///
/// Dumps are written to `output`; every message goes to `handler`. Returns `false` if the source
/// file contains an error or the output could not be written.
pub fn drive(
    source_file: &Arc<SourceFile>,
    argument: &Argument,
    handler: &dyn Handler<Message<String>>,
    output: &mut dyn Write,
) -> bool {
    let mut tokenizer = Tokenizer::new(source_file.clone(), handler);

    let written = if argument.dump_tokens {
        dump_tokens(&mut tokenizer, output)
    } else {
        let mut parser = parser::Parser::new(&mut tokenizer);
        let Ok(expressions) = parser.parse_expressions() else {
            return false;
        };

        if argument.dump_syntax {
            expressions
                .iter()
                .try_for_each(|expression| writeln!(output, "{expression}"))
                .map(|()| true)
        } else {
            Ok(true)
        }
    };

    match written {
        Ok(succeeded) => succeeded,
        Err(error) => {
            handler.receive(Message::new(
                Severity::Error,
                Message::new(Severity::Error, format!("failed to write the output: {error}"))
                    .to_string(),
            ));
            false
        }
    }
}

/// Writes every token to `output`, one per line. Stops at the first lexical error.
fn dump_tokens(tokenizer: &mut Tokenizer<'_>, output: &mut dyn Write) -> std::io::Result<bool> {
    for token in tokenizer {
        let Ok(token) = token else {
            return Ok(false);
        };

        writeln!(output, "{}..{}\t{token}", token.start(), token.end())?;
    }

    Ok(true)
}

fn load(argument: &Argument) -> Result<Arc<SourceFile>, source_file::Error> {
    let file = File::open(&argument.file)?;
    SourceFile::load(&file, argument.file.clone())
}

/// Runs the program with the given arguments.
#[must_use]
pub fn run(argument: &Argument) -> ExitCode {
    let source_file = match load(argument) {
        Ok(source_file) => source_file,
        Err(error) => {
            let msg = Message::new(
                Severity::Error,
                format!("{}: {error}", argument.file.display()),
            );

            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let printer = Printer::new(argument.log_level.into());
    printer.receive(Message::new(
        Severity::Info,
        format!(
            "loaded {} ({} line(s))",
            argument.file.display(),
            source_file.line_number()
        ),
    ));

    let succeeded = drive(&source_file, argument, &printer, &mut std::io::stdout().lock());

    if succeeded && !printer.has_reported_error() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
