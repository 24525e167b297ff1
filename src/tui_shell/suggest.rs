use super::CommandDef;

/// Rank a command name against the typed prefix. Exact match wins, then
/// prefix matches (shorter names first), then substring matches.
pub(in crate::tui_shell) fn score_match(name: &str, needle: &str) -> Option<i64> {
    if name == needle {
        return Some(100);
    }
    if name.starts_with(needle) {
        return Some(50 - (name.len() as i64 - needle.len() as i64));
    }
    if name.contains(needle) {
        return Some(10);
    }
    None
}

/// Order suggestions for display. Hinted commands come first in hint order;
/// the rest sort by score, then name.
pub(in crate::tui_shell) fn sort_scored_suggestions(
    scored: &mut [(i64, CommandDef)],
    hinted: &[String],
) {
    scored.sort_by(|(score_a, def_a), (score_b, def_b)| {
        let hint_a = hinted.iter().position(|h| h == def_a.name);
        let hint_b = hinted.iter().position(|h| h == def_b.name);
        match (hint_a, hint_b) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => score_b.cmp(score_a).then_with(|| def_a.name.cmp(def_b.name)),
        }
    });
}

#[cfg(test)]
#[path = "../tests/tui_shell/suggest_tests.rs"]
mod tests;
