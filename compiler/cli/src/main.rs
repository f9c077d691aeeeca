use clap::Parser as ClapParser;
use colored::Colorize;
use kpl_common::error::SymtabError;
use kpl_common::limits::{Limits, MAX_IDENT_LEN};
use kpl_symtab::{BUILTINS, Object, SymbolTable};
use std::process;

#[derive(ClapParser)]
#[command(name = "kpl")]
#[command(version)]
#[command(about = "Inspect the KPL symbol table", long_about = None)]
struct Cli {
    /// Create and enter a program with this name before dumping
    #[arg(long)]
    program: Option<String>,

    /// List the built-in routines and exit
    #[arg(long)]
    list_builtins: bool,

    /// Identifiers must be shorter than this many characters
    #[arg(long, default_value_t = MAX_IDENT_LEN)]
    max_ident_len: usize,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn list_builtins() {
    for def in BUILTINS {
        println!("{:<10} {}", def.name.bold(), def.description);
    }
}

fn run(cli: &Cli) -> Result<(), SymtabError> {
    let mut table = SymbolTable::with_limits(Limits::new(cli.max_ident_len));

    if let Some(name) = &cli.program {
        let program = table.create_program_object(name)?;
        let root = table.object(program).and_then(Object::owned_scope);
        table.enter_block(root)?;
    }

    println!("{}", table.dump());

    let report = table.teardown();
    println!(
        "{}: released {} objects, {} scopes",
        "ok".green().bold(),
        report.objects,
        report.scopes
    );
    if report.orphaned_objects + report.orphaned_scopes > 0 {
        log::warn!(
            "{} objects and {} scopes were never attached",
            report.orphaned_objects,
            report.orphaned_scopes
        );
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list_builtins {
        list_builtins();
        return;
    }

    if let Err(err) = run(&cli) {
        eprintln!("{}: {}", "error".red().bold(), err);
        process::exit(1);
    }
}
