//! Stages layered on top of the diluted base color: shade, modifiers,
//! roan, white spotting, leopard complex and gray.

use indexmap::IndexMap;
use rand::Rng;

use crate::locus::{Locus, Modifier};
use crate::selector::{chance, select_weighted};

use super::state::{
    contains_ignore_case, BaseColor, ColorState, Dose, DunState, PartRole, StageContext,
};

/// Dominant white alleles that whiten the whole coat on their own.
pub const NEAR_WHITE_ALLELES: [&str; 13] = [
    "W", "W1", "W2", "W3", "W4", "W6", "W9", "W10", "W12", "W13", "W15", "W21", "W22",
];

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn shade(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    let profile = ctx.profile;
    let first_word = state.key.split_whitespace().next().unwrap_or_default();
    let table = [state.key.as_str(), state.base().name(), first_word, "Default"]
        .into_iter()
        .find_map(|key| profile.shade_bias.get(key));

    let Some(shade) = table.and_then(|table| select_weighted(table, &mut *ctx.rng)) else {
        state.determined_shade = Some("standard".to_string());
        return state;
    };
    state.determined_shade = Some(shade.clone());

    let neutral = shade.eq_ignore_ascii_case("standard") || shade.eq_ignore_ascii_case("medium");
    if neutral
        || contains_ignore_case(&state.color, "gray")
        || contains_ignore_case(&state.color, shade)
    {
        return state;
    }
    let prefix = capitalize(shade);
    state.key = format!("{prefix} {}", state.key);
    state.shade = Some(prefix);
    state
}

pub(crate) fn sooty(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    if ctx.genotype.modifier(Modifier::Sooty) {
        state.sooty = true;
    }
    state
}

pub(crate) fn flaxen_and_pangare(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    if state.base() == BaseColor::Chestnut && ctx.genotype.modifier(Modifier::Flaxen) {
        state.describe("Flaxen", PartRole::Modifier);
    }
    if ctx.genotype.modifier(Modifier::Pangare) {
        state.describe("Pangare", PartRole::Modifier);
    }
    state
}

pub(crate) fn roan(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    if !ctx.has(Locus::Roan, "Rn") || ctx.has(Locus::Gray, "G") {
        return state;
    }
    let family = match state.base() {
        BaseColor::Chestnut => "Red Roan",
        BaseColor::Bay => "Bay Roan",
        BaseColor::Black => "Blue Roan",
    };
    let mut name = if state.silver {
        format!("Silver {family}")
    } else {
        family.to_string()
    };
    let visible_pearl =
        state.pearl == Dose::Double || (state.pearl.is_present() && state.cream.is_present());
    let qualifiers = [
        ("Dun", state.dun.is_dun()),
        ("Champagne", state.champagne),
        ("Pearl", visible_pearl),
    ];
    for (qualifier, carried) in qualifiers {
        if carried {
            name.push(' ');
            name.push_str(qualifier);
        }
    }

    state.set_color(name);
    if let Some(shade) = &state.shade {
        state.key = format!("{shade} {}", state.key);
    }
    state
}

fn is_dominant_white(allele: &str) -> bool {
    allele
        .strip_prefix('W')
        .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_digit()))
}

fn whiten(state: &mut ColorState, name: &str) {
    state.all_white = true;
    state.set_color(name);
    state.sooty = false;
    state.shade = None;
    state.descriptors.clear();
}

pub(crate) fn white_patterns(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    let dominant_white: Vec<String> = ctx
        .genotype
        .pair(Locus::DominantWhite)
        .map(|pair| {
            pair.alleles()
                .into_iter()
                .filter(|allele| is_dominant_white(allele))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if dominant_white
        .iter()
        .any(|allele| NEAR_WHITE_ALLELES.contains(&allele.as_str()))
    {
        whiten(&mut state, "White");
        return state;
    }
    if dominant_white.len() == 2 {
        whiten(&mut state, "Dominant White");
        return state;
    }

    for allele in &dominant_white {
        state.describe(format!("Dominant White Spotting ({allele})"), PartRole::Pattern);
    }
    if ctx.has(Locus::FrameOvero, "O") {
        state.describe("Frame Overo", PartRole::Pattern);
    }
    if ctx.has(Locus::Tobiano, "TO") {
        state.describe("Tobiano", PartRole::Pattern);
    }
    if ctx.has(Locus::Sabino1, "SB1") {
        state.describe("Sabino", PartRole::Pattern);
    }
    if ctx.any(Locus::SplashWhite, |allele| allele.starts_with("SW")) {
        state.describe("Splash White", PartRole::Pattern);
    }
    if ctx.any(Locus::EdenWhite, |allele| allele.starts_with("EDXW")) {
        state.describe("Eden White", PartRole::Pattern);
    }
    state
}

fn roaning_band(age: f64, cutoffs: [f64; 2]) -> &'static str {
    let [moderate_from, heavy_from] = cutoffs;
    if age < moderate_from {
        "Light"
    } else if age < heavy_from {
        "Moderate"
    } else {
        "Heavy"
    }
}

pub(crate) fn leopard_complex(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    let lp = ctx.count(Locus::LeopardComplex, "LP");
    if state.all_white || lp == 0 {
        return state;
    }
    let patn1 = ctx.has(Locus::Pattern1, "PATN1");
    let name = match (lp, patn1) {
        (2, true) => "Fewspot".to_string(),
        (2, false) => "Snowcap".to_string(),
        _ => {
            let bias = &ctx.profile.advanced_markings_bias;
            let spotting: IndexMap<&str, f64> =
                IndexMap::from([("Snowflake", bias.snowflake), ("Frost", bias.frost)]);
            let spots = select_weighted(&spotting, &mut *ctx.rng)
                .copied()
                .unwrap_or("Snowflake");
            let pattern = if ctx.rng.gen_bool(0.5) {
                "Blanket"
            } else {
                "Varnish Roan"
            };
            format!(
                "{} {spots} {pattern}",
                roaning_band(ctx.age, ctx.settings.leopard_age_cutoffs)
            )
        }
    };
    state.describe(name, PartRole::Pattern);
    state
}

fn gray_stage(tone: &str, age: f64) -> String {
    match age {
        a if a <= 3.0 => format!("{tone} Gray"),
        a if a <= 6.0 => "Dark Dapple Gray".to_string(),
        a if a <= 9.0 => "Light Dapple Gray".to_string(),
        a if a <= 12.0 => "White Gray".to_string(),
        _ => "Fleabitten Gray".to_string(),
    }
}

/// Gray replaces the base color progressively with age and drops any
/// shading; white patterns stay visible.
pub(crate) fn gray(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    if state.all_white || !ctx.has(Locus::Gray, "G") {
        return state;
    }
    let tone = if state.base() == BaseColor::Chestnut {
        "Rose"
    } else {
        "Steel"
    };
    state.gray = true;
    state.set_color(gray_stage(tone, ctx.age));
    state.sooty = false;
    state.shade = None;
    state
        .descriptors
        .retain(|part| part.role == PartRole::Pattern);

    let p = ctx.settings.bloody_shoulder_chance * ctx.profile.advanced_markings_bias.bloody_shoulder;
    if p.is_finite() && chance(p.clamp(0.0, 1.0), &mut *ctx.rng) {
        state.body_markings.push("Bloody Shoulder".to_string());
    }
    state
}

pub(crate) fn rabicano(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    if !state.gray && !state.all_white && ctx.genotype.modifier(Modifier::Rabicano) {
        state.describe("Rabicano", PartRole::Modifier);
    }
    state
}

pub(crate) fn primitive_markings(mut state: ColorState, _ctx: &mut StageContext<'_>) -> ColorState {
    if state.dun == DunState::Primitive && !state.gray && !state.all_white {
        state.describe("Primitive Markings", PartRole::Modifier);
    }
    state
}
