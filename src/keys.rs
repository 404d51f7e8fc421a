//! Fixed symbol pool for decorating targets
//!
//! Mirrors a QWERTY-style board: three letter rows plus a space row whose
//! keys all carry the space letter but show different glyphs. The pool is
//! pure data; random selection goes through the caller's RNG so rounds stay
//! reproducible from a seed.

use rand::Rng;

/// One key on the symbol board: the letter it answers to and the glyph
/// painted on a falling target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDef {
    pub letter: &'static str,
    pub glyph: &'static str,
}

const fn key(letter: &'static str, glyph: &'static str) -> KeyDef {
    KeyDef { letter, glyph }
}

pub const TOP_ROW: [KeyDef; 10] = [
    key("Q", "🐳"),
    key("W", "🍉"),
    key("E", "🥚"),
    key("R", "🌈"),
    key("T", "🌮"),
    key("Y", "🍋"),
    key("U", "🍇"),
    key("I", "🍦"),
    key("O", "🍊"),
    key("P", "🥝"),
];

pub const MIDDLE_ROW: [KeyDef; 9] = [
    key("A", "🍎"),
    key("S", "🍓"),
    key("D", "🍩"),
    key("F", "🐥"),
    key("G", "🍔"),
    key("H", "🍯"),
    key("J", "🍁"),
    key("K", "🥕"),
    key("L", "🍄"),
];

pub const BOTTOM_ROW: [KeyDef; 7] = [
    key("Z", "🥒"),
    key("X", "🥭"),
    key("C", "🌶"),
    key("V", "🍆"),
    key("B", "🥦"),
    key("N", "🍑"),
    key("M", "🍈"),
];

/// Space-category keys: all answer to a space tap, each with its own glyph.
pub const SPACE_ROW: [KeyDef; 4] = [
    key(" ", "🚀"),
    key(" ", "🛰"),
    key(" ", "🌌"),
    key(" ", "☄️"),
];

/// Every key on the board, row-major.
pub fn all_keys() -> impl Iterator<Item = KeyDef> {
    TOP_ROW
        .into_iter()
        .chain(MIDDLE_ROW)
        .chain(BOTTOM_ROW)
        .chain(SPACE_ROW)
}

/// Number of keys in the pool.
pub const KEY_COUNT: usize = TOP_ROW.len() + MIDDLE_ROW.len() + BOTTOM_ROW.len() + SPACE_ROW.len();

/// Pick a key uniformly from the whole pool.
pub fn random_key<R: Rng + ?Sized>(rng: &mut R) -> KeyDef {
    let idx = rng.random_range(0..KEY_COUNT);
    all_keys().nth(idx).unwrap_or(TOP_ROW[0])
}

/// True if `glyph` appears anywhere on the board.
pub fn is_known_glyph(glyph: &str) -> bool {
    all_keys().any(|k| k.glyph == glyph)
}
