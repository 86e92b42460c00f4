//! Built-in per-locale defaults: first day of week, preferred long date
//! mask, and day-period labels where the convention is not `am`/`pm`.
//!
//! Weekdays are numbered 1 (Sunday) through 7 (Saturday) everywhere in
//! this crate.

use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Defaults registered for a known locale tag.
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub id: &'static str,
    pub first_day_of_week: u32,
    pub long_mask: &'static str,
    pub am_pm: Option<[&'static str; 2]>,
}

const fn entry(id: &'static str, first_day_of_week: u32, long_mask: &'static str) -> RegistryEntry {
    RegistryEntry {
        id,
        first_day_of_week,
        long_mask,
        am_pm: None,
    }
}

const fn entry_am_pm(
    id: &'static str,
    first_day_of_week: u32,
    long_mask: &'static str,
    am_pm: [&'static str; 2],
) -> RegistryEntry {
    RegistryEntry {
        id,
        first_day_of_week,
        long_mask,
        am_pm: Some(am_pm),
    }
}

static ENTRIES: &[RegistryEntry] = &[
    entry_am_pm("ar-SA", 7, "D/\u{200f}M/\u{200f}YYYY", ["ق.ظ", "ب.ظ"]),
    entry("bg", 2, "D.MM.YYYY"),
    entry("ca", 2, "DD/MM/YYYY"),
    entry_am_pm("zh-CN", 2, "YYYY/MM/DD", ["上午", "下午"]),
    entry_am_pm("zh-TW", 1, "YYYY/MM/DD", ["上午", "下午"]),
    entry("hr", 2, "DD.MM.YYYY"),
    entry("cs", 2, "DD.MM.YYYY"),
    entry("da", 2, "DD.MM.YYYY"),
    entry("nl", 2, "DD-MM-YYYY"),
    entry("en-US", 1, "MM/DD/YYYY"),
    entry("en-AU", 2, "DD/MM/YYYY"),
    entry("en-CA", 1, "YYYY-MM-DD"),
    entry("en-GB", 2, "DD/MM/YYYY"),
    entry("en-IE", 2, "DD/MM/YYYY"),
    entry("en-NZ", 2, "DD/MM/YYYY"),
    entry("en-ZA", 1, "YYYY/MM/DD"),
    entry("eo", 2, "YYYY-MM-DD"),
    entry("et", 2, "DD.MM.YYYY"),
    entry_am_pm("fa-IR", 7, "YYYY/MM/DD", ["ق.ظ", "ب.ظ"]),
    entry("fi", 2, "DD.MM.YYYY"),
    entry("fr", 2, "DD/MM/YYYY"),
    entry("fr-CA", 1, "YYYY-MM-DD"),
    entry("fr-CH", 2, "DD.MM.YYYY"),
    entry("de", 2, "DD.MM.YYYY"),
    entry_am_pm("he", 1, "DD.MM.YYYY", ["ל.ה", "א.ה"]),
    entry("id", 2, "DD/MM/YYYY"),
    entry("it", 2, "DD/MM/YYYY"),
    entry_am_pm("ja", 1, "YYYY年M月D日", ["午前", "午後"]),
    entry_am_pm("ko", 1, "YYYY.MM.DD", ["오전", "오후"]),
    entry("lv", 2, "DD.MM.YYYY"),
    entry("lt", 2, "DD.MM.YYYY"),
    entry("mk", 2, "D.MM.YYYY"),
    entry("nb", 2, "D. MMMM YYYY"),
    entry("nn", 2, "D. MMMM YYYY"),
    entry("pl", 2, "DD.MM.YYYY"),
    entry("pt", 2, "DD/MM/YYYY"),
    entry("ro", 2, "DD.MM.YYYY"),
    entry("ru", 2, "DD.MM.YYYY"),
    entry("sk", 2, "DD.MM.YYYY"),
    entry("es-ES", 2, "DD/MM/YYYY"),
    entry("es-MX", 2, "DD/MM/YYYY"),
    entry("sv", 2, "YYYY-MM-DD"),
    entry("th", 1, "DD/MM/YYYY"),
    entry_am_pm("tr", 2, "DD.MM.YYYY", ["ÖÖ", "ÖS"]),
    entry("uk", 2, "DD.MM.YYYY"),
    entry("vi", 2, "DD/MM/YYYY"),
];

/// Bare-language shorthands that borrow another tag's defaults. The
/// shorthand itself is the resolved identifier.
static ALIASES: &[(&str, &str)] = &[
    ("ar", "ar-SA"),
    ("en", "en-US"),
    ("es", "es-ES"),
    ("fa", "fa-IR"),
    ("no", "nb"),
    ("zh", "zh-CN"),
];

fn index() -> &'static FxHashMap<String, (&'static str, &'static RegistryEntry)> {
    static INDEX: OnceLock<FxHashMap<String, (&'static str, &'static RegistryEntry)>> =
        OnceLock::new();
    INDEX.get_or_init(|| {
        let mut map = FxHashMap::default();
        for e in ENTRIES {
            map.insert(e.id.to_ascii_lowercase(), (e.id, e));
        }
        for (alias, target) in ALIASES {
            if let Some(e) = ENTRIES.iter().find(|e| e.id == *target) {
                map.insert((*alias).to_string(), (*alias, e));
            }
        }
        map
    })
}

/// Looks up defaults for a locale tag: an exact case-insensitive match
/// first, then the first two characters of the tag. Returns the resolved
/// registry identifier together with the entry.
pub fn lookup(tag: &str) -> Option<(&'static str, &'static RegistryEntry)> {
    let idx = index();
    let lower = tag.to_ascii_lowercase();
    if let Some(hit) = idx.get(&lower) {
        return Some(*hit);
    }
    if lower.len() >= 2 && lower.is_char_boundary(2) {
        if let Some(hit) = idx.get(&lower[..2]) {
            return Some(*hit);
        }
    }
    None
}

/// The fallback configuration merged under every resolved locale:
/// English (Ireland), Monday first, `DD/MM/YYYY`.
pub fn baseline() -> &'static RegistryEntry {
    static BASELINE: OnceLock<&'static RegistryEntry> = OnceLock::new();
    BASELINE.get_or_init(|| {
        ENTRIES
            .iter()
            .find(|e| e.id == "en-IE")
            .unwrap_or(&ENTRIES[0])
    })
}
