//! Russian → Latin transliteration and URL slugs.

/// Latin replacement for a lowercase Cyrillic letter, if it has one.
fn latin_for(ch: char) -> Option<&'static str> {
    let out = match ch {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' | 'ё' | 'э' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' | 'ы' => "y",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "ts",
        'ч' => "ch",
        'ш' => "sh",
        'щ' => "sch",
        'ъ' | 'ь' => "",
        'ю' => "yu",
        'я' => "ya",
        _ => return None,
    };
    Some(out)
}

/// Transliterate Cyrillic letters, keeping the case of the source letter.
/// Characters without a mapping pass through unchanged.
pub fn transliterate(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        let lower = ch.to_lowercase().next().unwrap_or(ch);
        match latin_for(lower) {
            Some(latin) if lower == ch => out.push_str(latin),
            Some(latin) => {
                // Upper-case source: capitalise the whole replacement ("Ж" → "ZH")
                out.extend(latin.chars().map(|c| c.to_ascii_uppercase()));
            }
            None => out.push(ch),
        }
    }
    out
}

/// Lowercase ASCII slug: runs of anything outside `[a-z0-9]` become one `-`,
/// with no leading or trailing `-`.
pub fn slugify(input: &str) -> String {
    let raw = transliterate(input).to_lowercase();
    let mut slug = String::with_capacity(raw.len());
    let mut pending_sep = false;

    for ch in raw.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(ch);
        } else {
            pending_sep = true;
        }
    }
    slug
}
