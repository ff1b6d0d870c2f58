//! Pearl dilution and its interactions with cream and champagne.

use std::sync::OnceLock;

use regex::Regex;

use crate::locus::Locus;

use super::state::{contains_ignore_case, BaseColor, ColorState, Dose, StageContext};

fn repeated_pearl() -> &'static [(Regex, &'static str); 2] {
    static PATTERNS: OnceLock<[(Regex, &'static str); 2]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (
                Regex::new(r"(?i)\bpearl cream pearl\b").unwrap(),
                "Pearl Cream",
            ),
            (Regex::new(r"(?i)\bpearl pearl\b").unwrap(), "Pearl"),
        ]
    })
}

/// Collapses doubled pearl wording left behind by earlier renames.
pub(crate) fn collapse_repeated_pearl(text: &str) -> String {
    let mut text = text.to_string();
    loop {
        let before = text.clone();
        for (pattern, replacement) in repeated_pearl() {
            text = pattern.replace_all(&text, *replacement).into_owned();
        }
        if text == before {
            return text;
        }
    }
}

pub(crate) fn pearl(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    state.pearl = Dose::from_count(ctx.count(Locus::Pearl, "prl"));
    if !state.pearl.is_present() {
        return state;
    }
    if state.pearl_handled {
        state.rewrite(collapse_repeated_pearl);
        return state;
    }

    let base = state.base();
    let cream_name = base.cream_name(state.cream).unwrap_or_default();
    match (state.pearl, state.cream) {
        (Dose::Double, Dose::None) => {
            if base == BaseColor::Chestnut && !state.champagne {
                let apricot = if state.dun.is_dun() { "Apricot Dun" } else { "Apricot" };
                state.set_color(apricot);
            } else {
                state.rewrite(|s| format!("{s} Pearl"));
            }
        }
        (Dose::Single, Dose::Single) if !state.champagne => {
            state.rewrite(|s| s.replace(cream_name, &format!("{cream_name} Pearl")));
        }
        (Dose::Double, Dose::Single) if state.champagne => {
            state.rewrite(|s| format!("{s} Pearl"));
        }
        (Dose::Double, Dose::Single) => {
            state.rewrite(|s| {
                s.replace(cream_name, &format!("{cream_name} Homozygous Pearl Cream"))
            });
        }
        (Dose::Double, Dose::Double) if !contains_ignore_case(&state.color, "pearl") => {
            state.rewrite(|s| format!("{s} (Pearl)"));
        }
        // A single pearl allele without cream is only carried.
        _ => {}
    }
    state.rewrite(collapse_repeated_pearl);
    state
}
