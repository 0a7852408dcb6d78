//! URL slug derivation.
//!
//! Region and city rows carry no explicit slug in their fixtures; the slug
//! is derived from the Romanian name so that "Câmpia Turzii" and
//! "Campia Turzii" land on the same natural key.

/// Convert free text into a lowercase ASCII slug.
///
/// Diacritics are transliterated, every run of other characters becomes a
/// single `-`, and leading/trailing separators are dropped.
///
/// ```
/// use tixello_core::slug::slugify;
///
/// assert_eq!(slugify("Câmpia Turzii"), "campia-turzii");
/// assert_eq!(slugify("Sfântu Gheorghe"), "sfantu-gheorghe");
/// ```
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_separator = false;

    for ch in text.chars() {
        let Some(ascii) = transliterate(ch) else {
            pending_separator = true;
            continue;
        };
        if pending_separator && !slug.is_empty() {
            slug.push('-');
        }
        pending_separator = false;
        match ascii {
            Ascii::Char(c) => slug.push(c),
            Ascii::Str(s) => slug.push_str(s),
        }
    }

    slug
}

enum Ascii {
    Char(char),
    Str(&'static str),
}

/// Map one character to its lowercase ASCII form, or `None` for separators.
fn transliterate(ch: char) -> Option<Ascii> {
    let mapped = match ch {
        'ă' | 'Ă' | 'â' | 'Â' | 'á' | 'Á' | 'à' | 'À' | 'ä' | 'Ä' | 'ã' | 'Ã' => 'a',
        'î' | 'Î' | 'í' | 'Í' | 'ì' | 'Ì' | 'ï' | 'Ï' => 'i',
        'ș' | 'Ș' | 'ş' | 'Ş' | 'š' | 'Š' => 's',
        'ț' | 'Ț' | 'ţ' | 'Ţ' => 't',
        'é' | 'É' | 'è' | 'È' | 'ë' | 'Ë' | 'ê' | 'Ê' => 'e',
        'ó' | 'Ó' | 'ò' | 'Ò' | 'ö' | 'Ö' | 'ő' | 'Ő' | 'ô' | 'Ô' => 'o',
        'ú' | 'Ú' | 'ù' | 'Ù' | 'ü' | 'Ü' | 'ű' | 'Ű' => 'u',
        'ç' | 'Ç' => 'c',
        'ñ' | 'Ñ' => 'n',
        'ß' => return Some(Ascii::Str("ss")),
        c if c.is_ascii_alphanumeric() => c.to_ascii_lowercase(),
        _ => return None,
    };
    Some(Ascii::Char(mapped))
}
