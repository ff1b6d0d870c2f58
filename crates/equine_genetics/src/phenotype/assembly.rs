//! Turns the final [`ColorState`] into the display string.

use super::state::{ColorState, Part, PartRole};

fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// `true` when `needle`'s words appear contiguously in `haystack`.
fn contains_words(haystack: &str, needle: &str) -> bool {
    let (haystack, needle) = (words(haystack), words(needle));
    !needle.is_empty()
        && haystack
            .windows(needle.len())
            .any(|window| window == needle.as_slice())
}

fn is_prefix(role: PartRole) -> bool {
    matches!(role, PartRole::Sooty | PartRole::Shade)
}

/// Drops empty parts and merges parts where one contains the other,
/// keeping the longer wording in the earlier slot.
fn dedupe(parts: Vec<Part>) -> Vec<Part> {
    let mut kept: Vec<Part> = Vec::with_capacity(parts.len());
    for part in parts {
        if part.text.trim().is_empty() {
            continue;
        }
        if is_prefix(part.role) {
            kept.push(part);
            continue;
        }
        let overlapping = kept.iter_mut().find(|existing| {
            !is_prefix(existing.role)
                && (contains_words(&existing.text, &part.text)
                    || contains_words(&part.text, &existing.text))
        });
        match overlapping {
            Some(existing) if part.text.len() > existing.text.len() => existing.text = part.text,
            Some(_) => {}
            None => kept.push(part),
        }
    }
    kept
}

/// Sooty, then shade, then the main color, then everything else in order.
fn reorder(parts: Vec<Part>) -> Vec<Part> {
    let main = parts
        .iter()
        .position(|part| part.role == PartRole::Main)
        .or_else(|| {
            parts
                .iter()
                .position(|part| !is_prefix(part.role) && part.role != PartRole::Pattern)
        });

    let mut ordered = Vec::with_capacity(parts.len());
    for role in [PartRole::Sooty, PartRole::Shade] {
        ordered.extend(parts.iter().filter(|part| part.role == role).cloned());
    }
    if let Some(index) = main {
        ordered.push(parts[index].clone());
    }
    ordered.extend(
        parts
            .iter()
            .enumerate()
            .filter(|(index, part)| Some(*index) != main && !is_prefix(part.role))
            .map(|(_, part)| part.clone()),
    );
    ordered
}

pub(crate) fn assemble(state: &ColorState) -> String {
    let mut parts = Vec::new();
    if state.sooty {
        parts.push(Part::new("Sooty", PartRole::Sooty));
    }
    if let Some(shade) = &state.shade {
        parts.push(Part::new(shade.clone(), PartRole::Shade));
    }
    parts.push(Part::new(state.color.clone(), PartRole::Main));
    parts.extend(state.descriptors.iter().cloned());

    let text = reorder(dedupe(parts))
        .iter()
        .flat_map(|part| part.text.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ");

    if !text.is_empty() {
        return text;
    }
    match state.base {
        Some(base) => base.name().to_string(),
        None => "Undefined Phenotype".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phenotype::state::BaseColor;

    #[test]
    fn test_contains_words_matches_whole_words() {
        assert!(contains_words("Light Frost Blanket", "frost blanket"));
        assert!(!contains_words("Palomino Pearl", "Pearl Cream"));
        assert!(!contains_words("Graying", "Gray"));
    }

    #[test]
    fn test_dedupe_keeps_longer_wording() {
        let parts = vec![
            Part::new("Bay", PartRole::Main),
            Part::new("Tobiano", PartRole::Pattern),
            Part::new("Tobiano Sabino", PartRole::Pattern),
            Part::new("  ", PartRole::Modifier),
        ];
        let texts: Vec<String> = dedupe(parts).into_iter().map(|p| p.text).collect();
        assert_eq!(texts, vec!["Bay", "Tobiano Sabino"]);
    }

    #[test]
    fn test_reorder_puts_prefixes_first() {
        let parts = vec![
            Part::new("Tobiano", PartRole::Pattern),
            Part::new("Bay", PartRole::Main),
            Part::new("Dark", PartRole::Shade),
            Part::new("Sooty", PartRole::Sooty),
        ];
        let texts: Vec<String> = reorder(parts).into_iter().map(|p| p.text).collect();
        assert_eq!(texts, vec!["Sooty", "Dark", "Bay", "Tobiano"]);
    }

    #[test]
    fn test_assemble_falls_back_when_empty() {
        let mut state = ColorState::default();
        assert_eq!(assemble(&state), "Undefined Phenotype");
        state.base = Some(BaseColor::Bay);
        assert_eq!(assemble(&state), "Bay");

        state.set_color("Bay  Dun");
        state.shade = Some("Dark".into());
        state.sooty = true;
        assert_eq!(assemble(&state), "Sooty Dark Bay Dun");
    }
}
