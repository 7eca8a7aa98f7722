//! Serbian Cyrillic to Latin transliteration.

/// Transliterate Serbian Cyrillic to Latin script. Other characters pass
/// through unchanged.
///
/// ```
/// use cityguide_importer::transliterate::to_latin;
/// assert_eq!(to_latin("Народни музеј Зрењанин"), "Narodni muzej Zrenjanin");
/// ```
pub fn to_latin(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match latin_for(c) {
            Some(latin) => out.push_str(latin),
            None => out.push(c),
        }
    }
    out
}

fn latin_for(c: char) -> Option<&'static str> {
    let latin = match c {
        'А' => "A",
        'Б' => "B",
        'В' => "V",
        'Г' => "G",
        'Д' => "D",
        'Ђ' => "Đ",
        'Е' => "E",
        'Ж' => "Ž",
        'З' => "Z",
        'И' => "I",
        'Ј' => "J",
        'К' => "K",
        'Л' => "L",
        'Љ' => "Lj",
        'М' => "M",
        'Н' => "N",
        'Њ' => "Nj",
        'О' => "O",
        'П' => "P",
        'Р' => "R",
        'С' => "S",
        'Т' => "T",
        'Ћ' => "Ć",
        'У' => "U",
        'Ф' => "F",
        'Х' => "H",
        'Ц' => "C",
        'Ч' => "Č",
        'Џ' => "Dž",
        'Ш' => "Š",
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'ђ' => "đ",
        'е' => "e",
        'ж' => "ž",
        'з' => "z",
        'и' => "i",
        'ј' => "j",
        'к' => "k",
        'л' => "l",
        'љ' => "lj",
        'м' => "m",
        'н' => "n",
        'њ' => "nj",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'ћ' => "ć",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ц' => "c",
        'ч' => "č",
        'џ' => "dž",
        'ш' => "š",
        _ => return None,
    };
    Some(latin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digraphs() {
        assert_eq!(to_latin("Љубав"), "Ljubav");
        assert_eq!(to_latin("Његош"), "Njegoš");
        assert_eq!(to_latin("Џеп"), "Džep");
        assert_eq!(to_latin("ђак ћуфте"), "đak ćufte");
    }

    #[test]
    fn latin_and_punctuation_pass_through() {
        assert_eq!(to_latin("Kafe 'Bridge', 12"), "Kafe 'Bridge', 12");
        assert_eq!(to_latin(""), "");
    }

    #[test]
    fn mixed_scripts() {
        assert_eq!(
            to_latin("Улица Краља Александра I 5"),
            "Ulica Kralja Aleksandra I 5"
        );
    }
}
