// Roman numeral decoding for capital district codes ("I." .. "XXIII.")
//
// Lenient: malformed numerals ("IIII", "IM") still decode to some number and
// characters outside the symbol set are skipped. Real district codes are a
// small well-formed set.

/// Subtractive-notation symbols in descending value
const SYMBOLS: [(&str, u32); 13] = [
    ("M", 1000),
    ("CM", 900),
    ("D", 500),
    ("CD", 400),
    ("C", 100),
    ("XC", 90),
    ("L", 50),
    ("XL", 40),
    ("X", 10),
    ("IX", 9),
    ("V", 5),
    ("IV", 4),
    ("I", 1),
];

/// Decode by repeatedly taking the longest symbol matching the head of the
/// remaining input.
pub fn decode_roman(numeral: &str) -> u32 {
    let mut rest = numeral;
    let mut total = 0u32;

    while !rest.is_empty() {
        let matched = SYMBOLS
            .iter()
            .filter(|(symbol, _)| rest.starts_with(symbol))
            .max_by_key(|(symbol, _)| symbol.len());

        match matched {
            Some((symbol, value)) => {
                total = total.saturating_add(*value);
                rest = &rest[symbol.len()..];
            }
            None => {
                let skip = rest.chars().next().map(char::len_utf8).unwrap_or(1);
                rest = &rest[skip..];
            }
        }
    }

    total
}
