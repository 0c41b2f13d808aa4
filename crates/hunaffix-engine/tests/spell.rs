//! End-to-end scenarios: load rule and dictionary text, then check and
//! analyze surface words the way a spell-checking frontend would.

use hunaffix_core::casing::Locale;
use hunaffix_core::flags::Flag;
use hunaffix_engine::{Checker, ParseError};

const ENGLISHY_AFF: &str = "\
SET UTF-8

# input normalization: typographic apostrophe
ICONV 1
ICONV \u{2019} '

PFX U Y 1
PFX U 0 un .

PFX R Y 1
PFX R 0 re .

SFX S Y 2
SFX S 0 s [^sxy]
SFX S y ies [^aeiou]y

SFX G Y 2
SFX G 0 ing [^e]
SFX G e ing e
";

const ENGLISHY_DIC: &str = "\
6
cat/S
body/S
lock/USG
load/RS
tame/G
can't
";

fn checker() -> Checker {
    Checker::from_texts(ENGLISHY_AFF, ENGLISHY_DIC).unwrap()
}

#[test]
fn plural_suffix_scenario() {
    let c = checker();
    // stem "cat" carries S, so "cats" decomposes to cat + S
    assert!(c.spell("cats"));
    let cands = c.analyze("cats");
    assert_eq!(cands.len(), 1);
    assert_eq!(cands[0].stem, "cat");
    assert_eq!(cands[0].suffix, Some(Flag(b'S' as u16)));

    // "cat" itself is an exact dictionary match, not an affix candidate
    assert!(c.spell("cat"));
    assert!(c.analyze("cat").is_empty());
}

#[test]
fn strip_then_append_suffix() {
    let c = checker();
    assert!(c.spell("bodies"));
    // the "ies" rule strips nothing from the surface side it cannot
    // explain: "bodys" matches no rule and "bodies" only the ies rule
    assert!(!c.spell("bodys"));
    let cands = c.analyze("bodies");
    assert_eq!(cands.len(), 1);
    assert_eq!(cands[0].stem, "body");
}

#[test]
fn prefix_and_cross_product() {
    let c = checker();
    assert!(c.spell("unlock"));
    assert!(c.spell("unlocks"));
    assert!(c.spell("unlocking"));
    assert!(c.spell("reload"));
    assert!(c.spell("reloads"));
    // "load" does not carry U, "cat" does not carry R
    assert!(!c.spell("unload"));
    assert!(!c.spell("recat"));

    let both: Vec<_> = c
        .analyze("unlocks")
        .into_iter()
        .filter(|cand| cand.prefix.is_some() && cand.suffix.is_some())
        .collect();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].stem, "lock");
}

#[test]
fn e_elision_suffix() {
    let c = checker();
    // "e ing e" drops the stem's final e before appending
    assert!(c.spell("taming"));
    assert!(c.spell("locking"));
    // the e survives only through the non-elision rule, which the
    // e-final stem fails
    assert!(!c.spell("tameing"));
    assert!(!c.spell("tamings"));
}

#[test]
fn casing_variants_accepted() {
    let c = checker();
    assert!(c.spell("Cats"));
    assert!(c.spell("CATS"));
    assert!(c.spell("Unlocks"));
    assert!(!c.spell("cAts"));
}

#[test]
fn iconv_normalizes_input() {
    let c = checker();
    // typographic apostrophe converts to the dictionary's ASCII one
    assert!(c.spell("can\u{2019}t"));
    assert!(c.spell("can't"));
}

#[test]
fn misspellings_rejected() {
    let c = checker();
    for wrong in ["catz", "locs", "unlok", "bodyes", ""] {
        assert!(!c.spell(wrong), "accepted {wrong:?}");
    }
}

#[test]
fn latin1_dictionary_loads() {
    let aff = b"SET ISO8859-1\nSFX S Y 1\nSFX S 0 s .\n".to_vec();
    let mut dic = b"1\ncaf".to_vec();
    dic.push(0xE9); // é
    dic.extend_from_slice(b"/S\n");
    let c = Checker::from_bytes(&aff, &dic).unwrap();
    assert!(c.spell("café"));
    assert!(c.spell("cafés"));
    assert!(!c.spell("cafes"));
}

#[test]
fn turkic_locale_casing() {
    let aff = "SET UTF-8\n";
    let dic = "1\n\u{0131}rmak\n"; // ırmak
    let c = Checker::from_texts(aff, dic)
        .unwrap()
        .with_locale(Locale::Turkic);
    // ALL CAPITAL form lowercases I back to dotless ı under the Turkic
    // locale, so IRMAK resolves to the stem
    assert!(c.spell("IRMAK"));
    assert_eq!(c.locale(), Locale::Turkic);
}

#[test]
fn malformed_rule_file_never_half_loads() {
    let broken = "SFX S Y 2\nSFX S 0 s .\n"; // declares 2, defines 1
    match Checker::from_texts(broken, "cat/S\n") {
        Err(ParseError::RuleCountMismatch {
            declared, defined, ..
        }) => {
            assert_eq!((declared, defined), (2, 1));
        }
        other => panic!("expected RuleCountMismatch, got {:?}", other.err()),
    }
}
