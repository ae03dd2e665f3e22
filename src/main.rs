use bfi::Interpreter;
use bfi::cli_util::print_interpreter_error;
use clap::Parser;
use std::env;
use std::fs;
use std::io::{self, Write};

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Brainfuck Interpreter

Usage:
  {0} [flags] <program>
  {0} -f <filename>

Flags:
  --file, -f <PATH>  Read program from file instead of command line
  --help, -h         Show this help

Examples:
  {0} "++++++++++>-----"
  {0} -f program.bf
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "bfi", disable_help_flag = true)]
struct Cli {
    /// Read program from file
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    file: Option<String>,

    /// Program text; may start with '-'
    #[arg(value_name = "program", allow_hyphen_values = true)]
    code: Option<String>,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,
}

fn run(program: &str, cli: Cli) -> i32 {
    if cli.help {
        usage_and_exit(program, 0);
    }

    let code = match (cli.file, cli.code) {
        // Invalid UTF-8 becomes U+FFFD, which is a no-op like any other comment
        (Some(path), None) => match fs::read(&path) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                eprintln!("Error reading file: {e}");
                let _ = io::stderr().flush();
                return 1;
            }
        },
        (None, Some(code)) => code,
        _ => usage_and_exit(program, 1),
    };

    let mut bf = Interpreter::new(code.as_str(), io::stdin().lock(), io::stdout().lock());
    if let Err(err) = bf.run() {
        print_interpreter_error(&code, &err);
        return 1;
    }
    0
}

fn main() {
    // Program name is only used for help rendering
    let program = env::args().next().unwrap_or_else(|| String::from("bfi"));

    let cli = Cli::parse();
    let code = run(&program, cli);

    std::process::exit(code);
}
