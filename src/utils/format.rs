use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Longest file name shown untruncated in the preview list
pub const DISPLAY_NAME_LIMIT: usize = 20;

/// Human readable size, e.g. `1536` -> `1.5 KB`
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    const SIZES: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    let mut unit = 0;
    let mut divisor = 1u64;
    while unit < SIZES.len() - 1 && bytes >= divisor * 1024 {
        divisor *= 1024;
        unit += 1;
    }

    let value = format!("{:.2}", bytes as f64 / divisor as f64);
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", value, SIZES[unit])
}

/// Shortens long names for the preview grid: first 20 characters plus `...`
pub fn truncate_display_name(name: &str) -> String {
    if name.chars().count() > DISPLAY_NAME_LIMIT {
        let head: String = name.chars().take(DISPLAY_NAME_LIMIT).collect();
        format!("{}...", head)
    } else {
        name.to_string()
    }
}

/// Applies the phone mask to whatever the user typed.
///
/// Eleven digits become `(DD) DDDDD-DDDD`, ten become `(DD) DDDD-DDDD`; any other
/// length is returned as bare digits so partial input keeps working.
pub fn format_phone(input: &str) -> String {
    let digits: String = input.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => digits,
    }
}

/// Label used for the customer's folder inside the handoff message.
///
/// Accents stripped (precomposed or combining), uppercased, whitespace runs
/// collapsed into `_`.
pub fn folder_name(customer_name: &str) -> String {
    customer_name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(fold_letter)
        .collect::<String>()
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Latin letters with no canonical decomposition
fn fold_letter(c: char) -> char {
    match c {
        'Ł' => 'L',
        'ł' => 'l',
        'Ø' => 'O',
        'ø' => 'o',
        'Đ' => 'D',
        'đ' => 'd',
        'Ħ' => 'H',
        'ħ' => 'h',
        'ı' => 'i',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(500), "500 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_file_size(1_288_490_189), "1.2 GB");
        // Largest unit is GB
        assert_eq!(format_file_size(2 * 1024 * 1024 * 1024 * 1024), "2048 GB");
    }

    #[test]
    fn test_truncate_display_name() {
        assert_eq!(truncate_display_name("foto.jpg"), "foto.jpg");
        assert_eq!(
            truncate_display_name("exactly_twenty_chars"),
            "exactly_twenty_chars"
        );
        assert_eq!(
            truncate_display_name("casamento_praia_2024_final.jpg"),
            "casamento_praia_2024..."
        );
        assert_eq!(
            truncate_display_name("ããããããããããããããããããããããã.png"),
            "ãããããããããããããããããããã..."
        );
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("61999999999"), "(61) 99999-9999");
        assert_eq!(format_phone("(61) 9999-99999"), "(61) 99999-9999");
        assert_eq!(format_phone("6133334444"), "(61) 3333-4444");
        assert_eq!(format_phone("6199"), "6199");
        assert_eq!(format_phone("+55 61 99999-9999"), "5561999999999");
        assert_eq!(format_phone(""), "");
    }

    #[test]
    fn test_folder_name() {
        assert_eq!(folder_name("Maria  Silva"), "MARIA_SILVA");
        assert_eq!(folder_name("João"), "JOAO");
        assert_eq!(folder_name("Conceição da\tSilva"), "CONCEICAO_DA_SILVA");
        assert_eq!(folder_name(" Ana "), "ANA");
    }

    #[test]
    fn test_folder_name_decomposed_input() {
        // Combining tilde, as pasted from macOS
        assert_eq!(folder_name("Joa\u{0303}o"), "JOAO");
        assert_eq!(folder_name("Joa\u{0303}o"), folder_name("João"));
        assert_eq!(folder_name("Łukasz Şahin"), "LUKASZ_SAHIN");
        assert_eq!(folder_name("Søren"), "SOREN");
    }

    #[test]
    fn test_folder_name_is_idempotent() {
        for name in ["Maria  Silva", "João Pedro", "ÉLIO", "Joa\u{0303}o", "x"] {
            let once = folder_name(name);
            assert_eq!(folder_name(&once), once);
        }
    }
}
