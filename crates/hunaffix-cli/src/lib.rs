// hunaffix-cli: shared utilities for the command line tools.
//
// The tools take explicit .aff/.dic paths; there is no search over
// standard dictionary install directories.

use std::path::Path;
use std::process;

use hunaffix_core::casing::Locale;
use hunaffix_engine::Checker;

/// Print an error message and exit with a failure status.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// True when the arguments ask for help.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "-h" || a == "--help")
}

/// Extract `--turkic` from the arguments, returning the locale to use
/// and the remaining arguments.
pub fn parse_locale(args: &[String]) -> (Locale, Vec<String>) {
    let mut rest = Vec::with_capacity(args.len());
    let mut locale = Locale::Root;
    for arg in args {
        if arg == "--turkic" {
            locale = Locale::Turkic;
        } else {
            rest.push(arg.clone());
        }
    }
    (locale, rest)
}

/// Load a checker from explicit rule-file and dictionary paths. The
/// dictionary bytes are decoded with the encoding the rule file
/// declares in its SET line.
pub fn load_checker(aff_path: &str, dic_path: &str, locale: Locale) -> Result<Checker, String> {
    let aff = read_file(aff_path)?;
    let dic = read_file(dic_path)?;
    Checker::from_bytes(&aff, &dic)
        .map(|checker| checker.with_locale(locale))
        .map_err(|e| format!("failed to load {aff_path}: {e}"))
}

fn read_file(path: &str) -> Result<Vec<u8>, String> {
    std::fs::read(Path::new(path)).map_err(|e| format!("failed to read {path}: {e}"))
}
