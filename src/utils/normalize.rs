use once_cell::sync::Lazy;
use regex::Regex;

/// Префикс номера рабочего пространства: одна цифра и разделитель (`:`, пробел, `_`, `-`)
static SLOT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d\s*[:\s_\-]\s*").expect("valid slot prefix regex"));

/// Каноническое имя профиля для метки рабочего пространства.
///
/// "3:www", "3 www", "3_www" и "3-www" превращаются в "www". Снимается не более одного
/// префикса; метка без префикса возвращается как есть.
pub fn normalize(raw: &str) -> String {
    SLOT_PREFIX.replace(raw, "").into_owned()
}
