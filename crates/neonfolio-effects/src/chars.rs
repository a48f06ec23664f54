//! Character constants for the effects.

/// Characters used for the rain.
pub const RAIN_GLYPHS: &[char] = &[
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j',
    'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1',
    '2', '3', '4', '5', '6', '7', '8', '9', '@', '#', '$', '%', '^', '&', '*', '(', ')', '_',
    '+', '-', '=', '[', ']', '{', '}', '|', ';', ':', ',', '.', '<', '>', '?',
];

/// Characters shown while text scrambles. The repeated underscores weight
/// the draw towards a low, quiet glyph.
pub const SCRAMBLE_GLYPHS: &[char] = &[
    '!', '<', '>', '-', '_', '\\', '/', '[', ']', '{', '}', '—', '=', '+', '*', '^', '?', '#',
    '_', '_', '_', '_', '_', '_', '_', '_',
];

/// Characters for the binary counter.
pub const BINARY_GLYPHS: &[char] = &['0', '1'];
