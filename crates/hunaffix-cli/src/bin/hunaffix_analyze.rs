// hunaffix-analyze: show affix decompositions of words from stdin.
//
// For each word, prints the candidate stem and rule flags of every
// decomposition the dictionary confirms, one per line, indented under
// the word. Stems pass through the rule file's OCONV table on output.
//
// Usage:
//   hunaffix-analyze [--turkic] AFF_FILE DIC_FILE

use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if hunaffix_cli::wants_help(&args) {
        println!("hunaffix-analyze: show affix decompositions of words from stdin.");
        println!();
        println!("Usage: hunaffix-analyze [--turkic] AFF_FILE DIC_FILE");
        println!();
        println!("For each word read from stdin, prints every dictionary-");
        println!("confirmed decomposition as: stem, prefix flag, suffix flag.");
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
    let oconv = &checker.engine().data().oconv;

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
        let candidates = checker.analyze(word);
        let mut ok = writeln!(out, "{word}");
        if candidates.is_empty() {
            ok = ok.and_then(|_| writeln!(out, "  (no decomposition)"));
        }
        for cand in &candidates {
            let stem = oconv.replace(&cand.stem);
            ok = ok.and_then(|_| write!(out, "  stem: {stem}"));
            if let Some(flag) = cand.prefix {
                ok = ok.and_then(|_| write!(out, "  prefix: {flag}"));
            }
            if let Some(flag) = cand.suffix {
                ok = ok.and_then(|_| write!(out, "  suffix: {flag}"));
            }
            ok = ok.and_then(|_| writeln!(out));
        }
        if ok.is_err() {
            return;
        }
    }
}
