// hunaffix-spell: check spelling of words from stdin.
//
// Reads words from stdin (one per line) and reports whether each word
// is correctly spelled:
//   C: word    (correct)
//   W: word    (wrong / misspelled)
//
// Usage:
//   hunaffix-spell [--turkic] AFF_FILE DIC_FILE
//
// Options:
//   --turkic    Use Turkic (dotless i) case mapping
//   -h, --help  Print help

use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if hunaffix_cli::wants_help(&args) {
        println!("hunaffix-spell: check spelling of words from stdin.");
        println!();
        println!("Usage: hunaffix-spell [--turkic] AFF_FILE DIC_FILE");
        println!();
        println!("Reads words from stdin (one per line). Prints:");
        println!("  C: word    (correct)");
        println!("  W: word    (misspelled)");
        println!();
        println!("Options:");
        println!("  --turkic    Use Turkic (dotless i) case mapping");
        println!("  -h, --help  Print this help");
        return;
    }

    let (locale, args) = hunaffix_cli::parse_locale(&args);
    let [aff_path, dic_path] = args.as_slice() else {
        hunaffix_cli::fatal("expected exactly two arguments: AFF_FILE DIC_FILE");
    };

    let checker = hunaffix_cli::load_checker(aff_path, dic_path, locale)
        .unwrap_or_else(|e| hunaffix_cli::fatal(&e));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => hunaffix_cli::fatal(&format!("failed to read stdin: {e}")),
        };
        let word = line.trim();
        if word.is_empty() {
            continue;
        }
        let mark = if checker.spell(word) { 'C' } else { 'W' };
        if writeln!(out, "{mark}: {word}").is_err() {
            return;
        }
    }
}
