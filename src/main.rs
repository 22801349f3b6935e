use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use defc::driver::{self, Driver};
use defc::{CompileResult, parser, tokenizer};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "defc")]
#[command(about = "Compile a def/end source file to JavaScript", long_about = None)]
struct Cli {
  /// Source file to compile (`-` reads stdin)
  #[arg(value_name = "SOURCE", default_value = "test.src")]
  source: PathBuf,

  /// Line printed before the generated function
  #[arg(long, value_name = "TEXT", default_value = driver::RUNTIME)]
  prelude: String,

  /// Line printed after the generated function
  #[arg(long, value_name = "TEXT", default_value = driver::TEST)]
  epilogue: String,

  /// Stage whose output is printed
  #[arg(long, value_enum, default_value_t = Emit::Js)]
  emit: Emit,

  /// Log pipeline progress to stderr
  #[arg(short, long)]
  verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
  Tokens,
  Ast,
  Js,
}

fn main() {
  let cli = Cli::parse();

  tracing_subscriber::fmt()
    .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
    .with_writer(io::stderr)
    .init();

  let source = match load(&cli.source) {
    Ok(source) => source,
    Err(err) => {
      eprintln!("{err}");
      process::exit(1);
    }
  };

  match run(&cli, &source) {
    Ok(output) => println!("{output}"),
    Err(err) => {
      eprintln!("{}", err.report(&source));
      process::exit(1);
    }
  }
}

fn load(path: &Path) -> CompileResult<String> {
  if path == Path::new("-") {
    driver::read_stdin()
  } else {
    driver::read_source(path)
  }
}

fn run(cli: &Cli, source: &str) -> CompileResult<String> {
  match cli.emit {
    Emit::Tokens => {
      let tokens = tokenizer::tokenize(source)?;
      Ok(
        tokens
          .iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join("\n"),
      )
    }
    Emit::Ast => {
      let tokens = tokenizer::tokenize(source)?;
      let def = parser::parse(&tokens)?;
      Ok(format!("{def:#?}"))
    }
    Emit::Js => Driver::new(&cli.prelude, &cli.epilogue).compile_source(source),
  }
}
