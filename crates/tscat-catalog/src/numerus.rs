//! Plural rules for numerus messages
//!
//! This module maps a count to the index of the plural form a language uses
//! for it. Catalogs order `<numerusform>` entries by these indexes, so a rule
//! and a catalog must agree on the number and order of forms.

use std::fmt;
use tscat_common::LanguageCode;

/// Maps counts to plural form indexes.
pub trait PluralRule: fmt::Debug + Send + Sync {
    /// Number of plural forms the language distinguishes.
    fn form_count(&self) -> usize;

    /// Index of the plural form used for `count`.
    fn form_index(&self, count: i64) -> usize;
}

/// Plural rule families found in translation catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumerusRule {
    /// One form for every count (Hungarian, Japanese, Chinese, Turkish...)
    Single,
    /// 1 / other (English, German, Dutch, Swedish, Spanish...)
    OneOther,
    /// 0 and 1 / other (French, Brazilian Portuguese)
    ZeroOneOther,
    /// one / few / many with teens excluded (Russian, Ukrainian, Serbian...)
    Slavic,
    /// 1 / 2-4 / other (Czech, Slovak)
    Czech,
    /// 1 / few / many (Polish)
    Polish,
    /// Lithuanian
    Lithuanian,
    /// Latvian
    Latvian,
    /// Romanian
    Romanian,
    /// Slovenian
    Slovenian,
    /// Irish
    Irish,
    /// Arabic
    Arabic,
}

impl NumerusRule {
    /// Picks the rule family for a language, defaulting to 1 / other.
    pub fn for_language(language: &LanguageCode) -> Self {
        match language.primary() {
            "hu" | "ja" | "zh" | "ko" | "vi" | "th" | "id" | "ms" | "tr" | "ka" | "fa" | "lo"
            | "km" | "bo" | "dz" | "jv" | "su" | "yo" | "my" => Self::Single,
            "pt" if language.region() == Some("BR") => Self::ZeroOneOther,
            "fr" | "br" | "tl" | "fil" | "ln" | "ti" | "wa" => Self::ZeroOneOther,
            "ru" | "uk" | "be" | "sr" | "hr" | "bs" => Self::Slavic,
            "cs" | "sk" => Self::Czech,
            "pl" => Self::Polish,
            "lt" => Self::Lithuanian,
            "lv" => Self::Latvian,
            "ro" | "mo" => Self::Romanian,
            "sl" => Self::Slovenian,
            "ga" => Self::Irish,
            "ar" => Self::Arabic,
            _ => Self::OneOther,
        }
    }
}

impl PluralRule for NumerusRule {
    fn form_count(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::OneOther | Self::ZeroOneOther => 2,
            Self::Slavic
            | Self::Czech
            | Self::Polish
            | Self::Lithuanian
            | Self::Latvian
            | Self::Romanian
            | Self::Irish => 3,
            Self::Slovenian => 4,
            Self::Arabic => 6,
        }
    }

    fn form_index(&self, count: i64) -> usize {
        let n = count.unsigned_abs();
        let n10 = n % 10;
        let n100 = n % 100;

        match self {
            Self::Single => 0,
            Self::OneOther => usize::from(n != 1),
            Self::ZeroOneOther => usize::from(n > 1),
            Self::Slavic => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Czech => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Self::Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Lithuanian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n10 >= 2 && !(10..=19).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Latvian => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if n != 0 {
                    1
                } else {
                    2
                }
            }
            Self::Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=19).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Self::Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Self::Irish => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Self::Arabic => match n {
                0 => 0,
                1 => 1,
                2 => 2,
                _ if (3..=10).contains(&n100) => 3,
                _ if n100 >= 11 => 4,
                _ => 5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(code: &str) -> NumerusRule {
        NumerusRule::for_language(&LanguageCode::parse(code).unwrap())
    }

    #[test]
    fn test_hungarian_has_single_form() {
        let hu = rule("hu");
        assert_eq!(hu, NumerusRule::Single);
        assert_eq!(hu.form_count(), 1);
        for count in [-3, 0, 1, 2, 5, 11, 101, 1_000_000] {
            assert_eq!(hu.form_index(count), 0);
        }
        assert_eq!(rule("hu_HU"), NumerusRule::Single);
    }

    #[test]
    fn test_language_dispatch() {
        assert_eq!(rule("en"), NumerusRule::OneOther);
        assert_eq!(rule("de_DE"), NumerusRule::OneOther);
        assert_eq!(rule("pt"), NumerusRule::OneOther);
        assert_eq!(rule("pt_BR"), NumerusRule::ZeroOneOther);
        assert_eq!(rule("fr"), NumerusRule::ZeroOneOther);
        assert_eq!(rule("ru"), NumerusRule::Slavic);
        assert_eq!(rule("cs"), NumerusRule::Czech);
        assert_eq!(rule("pl"), NumerusRule::Polish);
        assert_eq!(rule("ar"), NumerusRule::Arabic);
        assert_eq!(rule("ja"), NumerusRule::Single);
    }

    #[test]
    fn test_one_other() {
        let en = NumerusRule::OneOther;
        assert_eq!(en.form_index(1), 0);
        assert_eq!(en.form_index(0), 1);
        assert_eq!(en.form_index(2), 1);
        assert_eq!(en.form_index(-1), 0);
    }

    #[test]
    fn test_zero_one_other() {
        let fr = NumerusRule::ZeroOneOther;
        assert_eq!(fr.form_index(0), 0);
        assert_eq!(fr.form_index(1), 0);
        assert_eq!(fr.form_index(2), 1);
    }

    #[test]
    fn test_slavic() {
        let ru = NumerusRule::Slavic;
        assert_eq!(ru.form_index(1), 0);
        assert_eq!(ru.form_index(21), 0);
        assert_eq!(ru.form_index(11), 2);
        assert_eq!(ru.form_index(3), 1);
        assert_eq!(ru.form_index(13), 2);
        assert_eq!(ru.form_index(24), 1);
        assert_eq!(ru.form_index(5), 2);
    }

    #[test]
    fn test_polish_and_czech() {
        let pl = NumerusRule::Polish;
        assert_eq!(pl.form_index(1), 0);
        assert_eq!(pl.form_index(21), 2);
        assert_eq!(pl.form_index(22), 1);
        assert_eq!(pl.form_index(12), 2);

        let cs = NumerusRule::Czech;
        assert_eq!(cs.form_index(1), 0);
        assert_eq!(cs.form_index(4), 1);
        assert_eq!(cs.form_index(5), 2);
        assert_eq!(cs.form_index(22), 2);
    }

    #[test]
    fn test_slovenian_and_arabic() {
        let sl = NumerusRule::Slovenian;
        assert_eq!(sl.form_index(101), 0);
        assert_eq!(sl.form_index(102), 1);
        assert_eq!(sl.form_index(104), 2);
        assert_eq!(sl.form_index(105), 3);

        let ar = NumerusRule::Arabic;
        assert_eq!(ar.form_index(0), 0);
        assert_eq!(ar.form_index(2), 2);
        assert_eq!(ar.form_index(7), 3);
        assert_eq!(ar.form_index(50), 4);
        assert_eq!(ar.form_index(100), 5);
    }

    #[test]
    fn test_index_within_form_count() {
        let rules = [
            NumerusRule::Single,
            NumerusRule::OneOther,
            NumerusRule::ZeroOneOther,
            NumerusRule::Slavic,
            NumerusRule::Czech,
            NumerusRule::Polish,
            NumerusRule::Lithuanian,
            NumerusRule::Latvian,
            NumerusRule::Romanian,
            NumerusRule::Slovenian,
            NumerusRule::Irish,
            NumerusRule::Arabic,
        ];
        for rule in rules {
            for count in -250..=250 {
                assert!(rule.form_index(count) < rule.form_count(), "{rule:?} at {count}");
            }
        }
    }
}
