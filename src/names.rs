//! Day and month name data.
//!
//! Gregorian-family names come from the glibc locale tables bundled with
//! `pure_rust_locales`; the weekday arrays there run Sunday first, which
//! matches the crate-wide weekday numbering. Calendars with their own
//! month cycles use CLDR month codes and the English (root) names below.

use pure_rust_locales::{Locale, locale_match};

use crate::calendar::CalendarKind;

pub fn long_months(locale: Locale) -> &'static [&'static str] {
    locale_match!(locale => LC_TIME::MON)
}

pub fn short_months(locale: Locale) -> &'static [&'static str] {
    locale_match!(locale => LC_TIME::ABMON)
}

pub fn long_weekdays(locale: Locale) -> &'static [&'static str] {
    locale_match!(locale => LC_TIME::DAY)
}

pub fn short_weekdays(locale: Locale) -> &'static [&'static str] {
    locale_match!(locale => LC_TIME::ABDAY)
}

/// Maps a BCP-47 tag to the closest glibc locale, trying the tag's own
/// region first and a conventional region for the bare language second.
pub fn posix_locale(tag: &str) -> Locale {
    let mut subtags = tag.split(['-', '_']);
    let lang = subtags.next().unwrap_or_default().to_ascii_lowercase();
    let region = subtags
        .find(|s| s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()))
        .map(|s| s.to_ascii_uppercase());

    if let Some(region) = &region {
        if let Ok(l) = Locale::try_from(format!("{lang}_{region}").as_str()) {
            return l;
        }
    }
    if let Some(region) = default_region(&lang) {
        if let Ok(l) = Locale::try_from(format!("{lang}_{region}").as_str()) {
            return l;
        }
    }
    // de -> de_DE style doubling covers most remaining languages.
    if let Ok(l) = Locale::try_from(format!("{lang}_{}", lang.to_ascii_uppercase()).as_str()) {
        return l;
    }
    Locale::POSIX
}

fn default_region(lang: &str) -> Option<&'static str> {
    Some(match lang {
        "ar" => "SA",
        "ca" => "ES",
        "cs" => "CZ",
        "da" => "DK",
        "en" => "US",
        "es" => "ES",
        "et" => "EE",
        "fa" => "IR",
        "he" => "IL",
        "hi" => "IN",
        "ja" => "JP",
        "ko" => "KR",
        "nb" | "nn" | "no" => "NO",
        "pt" => "PT",
        "sv" => "SE",
        "uk" => "UA",
        "vi" => "VN",
        "zh" => "CN",
        _ => return None,
    })
}

/// English month name for a CLDR month code within a non-Gregorian
/// calendar. Returns `None` for the Gregorian family, whose names come
/// from the glibc tables instead.
pub fn coded_month_name(kind: CalendarKind, code: &str) -> Option<&'static str> {
    let table: &[(&str, &str)] = match kind {
        CalendarKind::Hebrew => &[
            ("M01", "Tishri"),
            ("M02", "Heshvan"),
            ("M03", "Kislev"),
            ("M04", "Tevet"),
            ("M05", "Shevat"),
            ("M05L", "Adar I"),
            ("M06", "Adar"),
            ("M07", "Nisan"),
            ("M08", "Iyar"),
            ("M09", "Sivan"),
            ("M10", "Tamuz"),
            ("M11", "Av"),
            ("M12", "Elul"),
        ],
        CalendarKind::IslamicCivil | CalendarKind::IslamicTbla | CalendarKind::IslamicUmalqura => &[
            ("M01", "Muharram"),
            ("M02", "Safar"),
            ("M03", "Rabiʻ I"),
            ("M04", "Rabiʻ II"),
            ("M05", "Jumada I"),
            ("M06", "Jumada II"),
            ("M07", "Rajab"),
            ("M08", "Shaʻban"),
            ("M09", "Ramadan"),
            ("M10", "Shawwal"),
            ("M11", "Dhuʻl-Qiʻdah"),
            ("M12", "Dhuʻl-Hijjah"),
        ],
        CalendarKind::Persian => &[
            ("M01", "Farvardin"),
            ("M02", "Ordibehesht"),
            ("M03", "Khordad"),
            ("M04", "Tir"),
            ("M05", "Mordad"),
            ("M06", "Shahrivar"),
            ("M07", "Mehr"),
            ("M08", "Aban"),
            ("M09", "Azar"),
            ("M10", "Dey"),
            ("M11", "Bahman"),
            ("M12", "Esfand"),
        ],
        CalendarKind::Indian => &[
            ("M01", "Chaitra"),
            ("M02", "Vaisakha"),
            ("M03", "Jyaistha"),
            ("M04", "Asadha"),
            ("M05", "Sravana"),
            ("M06", "Bhadra"),
            ("M07", "Asvina"),
            ("M08", "Kartika"),
            ("M09", "Agrahayana"),
            ("M10", "Pausa"),
            ("M11", "Magha"),
            ("M12", "Phalguna"),
        ],
        CalendarKind::Coptic => &[
            ("M01", "Tout"),
            ("M02", "Baba"),
            ("M03", "Hator"),
            ("M04", "Kiahk"),
            ("M05", "Toba"),
            ("M06", "Amshir"),
            ("M07", "Baramhat"),
            ("M08", "Baramouda"),
            ("M09", "Bashans"),
            ("M10", "Paona"),
            ("M11", "Epep"),
            ("M12", "Mesra"),
            ("M13", "Nasie"),
        ],
        CalendarKind::Ethiopic | CalendarKind::EthiopicAmeteAlem => &[
            ("M01", "Meskerem"),
            ("M02", "Tekemt"),
            ("M03", "Hedar"),
            ("M04", "Tahsas"),
            ("M05", "Ter"),
            ("M06", "Yekatit"),
            ("M07", "Megabit"),
            ("M08", "Miazia"),
            ("M09", "Genbot"),
            ("M10", "Sene"),
            ("M11", "Hamle"),
            ("M12", "Nehasse"),
            ("M13", "Pagumen"),
        ],
        _ => return None,
    };
    table.iter().find(|(c, _)| *c == code).map(|(_, n)| *n)
}
