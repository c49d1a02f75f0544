// Host-side tests for the typed-text state machine.

use folio_core::typewriter::Phase;
use folio_core::{Typewriter, TypewriterConfig};

fn config(strings: &[&str], looped: bool) -> TypewriterConfig {
    TypewriterConfig {
        strings: strings.iter().map(|s| s.to_string()).collect(),
        type_speed_ms: 50,
        back_speed_ms: 30,
        back_delay_ms: 2000,
        looped,
        cursor_char: "|".into(),
    }
}

#[test]
fn types_one_character_per_interval() {
    let mut tw = Typewriter::new(&config(&["APIs"], true));
    assert!(!tw.tick(49.0));
    assert_eq!(tw.text(), "");
    assert!(tw.tick(1.0));
    assert_eq!(tw.text(), "A");
    tw.tick(150.0);
    assert_eq!(tw.text(), "APIs");
    assert_eq!(tw.phase(), Phase::Holding);
}

#[test]
fn holds_then_erases_then_moves_to_next_string() {
    let mut tw = Typewriter::new(&config(&["ab", "xyz"], true));
    tw.tick(100.0);
    assert_eq!(tw.text(), "ab");
    assert!(!tw.tick(1999.0));
    assert_eq!(tw.text(), "ab");
    tw.tick(1.0 + 30.0);
    assert_eq!(tw.text(), "a");
    tw.tick(30.0);
    assert_eq!(tw.text(), "");
    tw.tick(50.0);
    assert_eq!(tw.index(), 1);
    assert_eq!(tw.text(), "x");
}

#[test]
fn loops_back_to_first_string() {
    let mut tw = Typewriter::new(&config(&["a", "b"], true));
    // type a, hold, erase, type b, hold, erase, type a
    tw.tick(50.0 + 2000.0 + 30.0 + 50.0 + 2000.0 + 30.0 + 50.0);
    assert_eq!(tw.index(), 0);
    assert_eq!(tw.text(), "a");
}

#[test]
fn without_loop_the_last_string_stays() {
    let mut tw = Typewriter::new(&config(&["a", "bc"], false));
    tw.tick(60_000.0);
    assert_eq!(tw.text(), "bc");
    assert_eq!(tw.phase(), Phase::Done);
    assert!(!tw.tick(1_000.0));
}

#[test]
fn multibyte_text_is_split_on_characters() {
    let mut tw = Typewriter::new(&config(&["héllo"], true));
    tw.tick(100.0);
    assert_eq!(tw.text(), "hé");
}

#[test]
fn empty_inputs_never_spin() {
    let mut none = Typewriter::new(&config(&[], true));
    assert_eq!(none.phase(), Phase::Done);
    assert!(!none.tick(1000.0));

    let mut blanks = Typewriter::new(&TypewriterConfig {
        back_delay_ms: 0,
        ..config(&["", ""], true)
    });
    blanks.tick(10_000.0);
    assert_eq!(blanks.text(), "");
}
