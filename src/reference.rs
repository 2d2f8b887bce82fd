//! Hand-authored reference keyboard.
//!
//! Every OS-derived keyboard starts from these French AZERTY rows: the
//! characters are only used to look up virtual-key codes on the French
//! layout, the geometry is kept as is.

use crate::key::{Key, KeyType};

/// Host layout the reference characters are resolved against.
pub const REFERENCE_COUNTRY: &str = "French";

fn c(key_type: KeyType, x_span: f32, y_span: f32) -> Key {
    Key::control(key_type, x_span, y_span)
}

fn r(characters: &str) -> Key {
    Key::regular(characters, 1.0, 1.0)
}

/// French AZERTY rows, top to bottom.
pub fn french_azerty_rows() -> Vec<Vec<Key>> {
    use KeyType::*;

    vec![
        vec![
            c(Esc, 1.0, 1.0),
            c(Fn1, 1.0, 1.0),
            c(Fn2, 1.0, 1.0),
            c(Fn3, 1.0, 1.0),
            c(Fn4, 1.0, 1.0),
            c(Fn5, 1.0, 1.0),
            c(Fn6, 1.0, 1.0),
            c(Fn7, 1.0, 1.0),
            c(Fn8, 1.0, 1.0),
            c(Fn9, 1.0, 1.0),
            c(Fn10, 1.0, 1.0),
            c(Fn11, 1.0, 1.0),
            c(Fn12, 1.0, 1.0),
            c(Config, 1.0, 1.0),
            c(OpenClose, 1.0, 1.0),
        ],
        vec![
            r("²"),
            r("&1"),
            r("é2~"),
            r("\"3#"),
            r("'4{"),
            r("(5["),
            r("-6|"),
            r("è7`"),
            r("_8\\"),
            r("ç9^"),
            r("à0@"),
            r(")°]"),
            r("=+}"),
            c(Backspace, 3.25, 1.0),
        ],
        vec![
            c(Tab, 1.25, 1.0),
            r("aA"),
            r("zZ"),
            r("eE€"),
            r("rR"),
            r("tT"),
            r("yY"),
            r("uU"),
            r("iI"),
            r("oO"),
            r("pP"),
            r("^¨"),
            r("$£¤"),
            c(Enter, 2.0, 2.0),
        ],
        vec![
            c(CapsLock, 1.75, 1.0),
            r("qQ"),
            r("sS"),
            r("dD"),
            r("fF"),
            r("gG"),
            r("hH"),
            r("jJ"),
            r("kK"),
            r("lL"),
            r("mM"),
            r("ù%"),
            r("*µ"),
        ],
        vec![
            c(Shift, 2.0, 1.0),
            r("<>"),
            r("wW"),
            r("xX"),
            r("cC"),
            r("vV"),
            r("bB"),
            r("nN"),
            r(",?"),
            r(";."),
            r(":/"),
            r("!§"),
            c(Up, 3.25, 1.0),
        ],
        vec![
            c(Ctrl, 1.75, 1.0),
            c(Alt, 1.75, 1.0),
            c(Space, 5.25, 1.0),
            c(Alt, 1.75, 1.0),
            c(Ctrl, 1.75, 1.0),
            c(Left, 1.0, 1.0),
            c(Down, 1.0, 1.0),
            c(Right, 1.0, 1.0),
        ],
    ]
}
