//! Roman numeral encoding used to disambiguate layout paths.

const NUMERALS: [(usize, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Encodes a positive integer as an upper-case Roman numeral.
///
/// Standard subtractive notation is used. Values of 4000 and above repeat
/// `M`, so the encoding is unbounded and distinct integers always produce
/// distinct numerals. Zero encodes as the empty string.
///
/// # Example
///
/// ```
/// # use montage_core::roman::int_to_roman;
/// assert_eq!(int_to_roman(2), "II");
/// assert_eq!(int_to_roman(14), "XIV");
/// assert_eq!(int_to_roman(1994), "MCMXCIV");
/// ```
pub fn int_to_roman(mut value: usize) -> String {
    let mut numeral = String::new();
    for (weight, symbol) in NUMERALS {
        while value >= weight {
            numeral.push_str(symbol);
            value -= weight;
        }
    }
    numeral
}
