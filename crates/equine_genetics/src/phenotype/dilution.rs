//! Base coat and the dilution stages that rename it.

use crate::error::GeneticsWarning;
use crate::locus::Locus;

use super::state::{BaseColor, ColorState, Dose, DunState, StageContext};

pub(crate) fn base_coat(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    let base = if ctx.homozygous(Locus::Extension, "e") {
        BaseColor::Chestnut
    } else if ctx.any(Locus::Agouti, |allele| allele.starts_with('A')) {
        BaseColor::Bay
    } else {
        BaseColor::Black
    };
    state.base = Some(base);
    state.set_color(base.name());
    state
}

pub(crate) fn mushroom(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    if state.base() != BaseColor::Chestnut || !ctx.has(Locus::Mushroom, "Mu") {
        return state;
    }
    state.mushroom = true;
    let no_cream = !ctx.has(Locus::Cream, "Cr");
    if no_cream && ctx.homozygous(Locus::Pearl, "prl") {
        state.set_color("Mushroom Pearl");
        state.pearl_handled = true;
    } else if no_cream {
        state.set_color("Mushroom Chestnut");
    }
    state
}

/// Cream outranks mushroom in the name: a creamed mushroom chestnut is
/// simply Palomino or Cremello.
pub(crate) fn cream(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    state.cream = Dose::from_count(ctx.count(Locus::Cream, "Cr"));
    if let Some(name) = state.base().cream_name(state.cream) {
        state.set_color(name);
    }
    state
}

pub(crate) fn dun(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    if !ctx.has(Locus::Dun, "D") {
        if ctx.any(Locus::Dun, |allele| allele == "nd1" || allele == "nd2") {
            state.dun = DunState::Primitive;
        }
        return state;
    }

    let plain_mushroom = state.mushroom && !state.pearl_handled;
    let name = match (state.base(), state.cream) {
        _ if state.pearl_handled => format!("{} Dun", state.color),
        (BaseColor::Black, Dose::None) => "Grulla".to_string(),
        (BaseColor::Bay, Dose::None) => "Bay Dun".to_string(),
        (BaseColor::Chestnut, Dose::None) if plain_mushroom => "Mushroom Dun".to_string(),
        (BaseColor::Chestnut, Dose::None) => "Red Dun".to_string(),
        (BaseColor::Bay, Dose::Single) => "Buckskin Dun".to_string(),
        (BaseColor::Chestnut, Dose::Single) => "Palomino Dun".to_string(),
        _ => format!("{} Dun", state.color),
    };
    state.dun = DunState::Dun;
    state.set_color(name);
    state
}

/// (base, cream dose, dun) -> champagne name.
const CHAMPAGNE_NAMES: [(BaseColor, Dose, bool, &str); 18] = [
    (BaseColor::Chestnut, Dose::None, false, "Gold Champagne"),
    (BaseColor::Bay, Dose::None, false, "Amber Champagne"),
    (BaseColor::Black, Dose::None, false, "Classic Champagne"),
    (BaseColor::Chestnut, Dose::None, true, "Gold Dun Champagne"),
    (BaseColor::Bay, Dose::None, true, "Amber Dun Champagne"),
    (BaseColor::Black, Dose::None, true, "Classic Dun Champagne"),
    (BaseColor::Chestnut, Dose::Single, false, "Gold Cream Champagne"),
    (BaseColor::Bay, Dose::Single, false, "Amber Cream Champagne"),
    (BaseColor::Black, Dose::Single, false, "Classic Cream Champagne"),
    (BaseColor::Chestnut, Dose::Single, true, "Gold Cream Dun Champagne"),
    (BaseColor::Bay, Dose::Single, true, "Amber Cream Dun Champagne"),
    (BaseColor::Black, Dose::Single, true, "Classic Cream Dun Champagne"),
    (BaseColor::Chestnut, Dose::Double, false, "Ivory Champagne (Cremello)"),
    (BaseColor::Bay, Dose::Double, false, "Ivory Champagne (Perlino)"),
    (BaseColor::Black, Dose::Double, false, "Ivory Champagne (Smoky Cream)"),
    (BaseColor::Chestnut, Dose::Double, true, "Ivory Dun Champagne (Cremello)"),
    (BaseColor::Bay, Dose::Double, true, "Ivory Dun Champagne (Perlino)"),
    (BaseColor::Black, Dose::Double, true, "Ivory Dun Champagne (Smoky Cream)"),
];

fn champagne_name(base: BaseColor, cream: Dose, dun: bool) -> Option<&'static str> {
    CHAMPAGNE_NAMES
        .iter()
        .find(|(b, c, d, _)| *b == base && *c == cream && *d == dun)
        .map(|(.., name)| *name)
}

pub(crate) fn champagne(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    if !ctx.has(Locus::Champagne, "Ch") {
        return state;
    }
    state.champagne = true;

    let base = state.base();
    let dun = state.dun.is_dun();
    let homozygous_pearl = ctx.homozygous(Locus::Pearl, "prl");
    let name = champagne_name(base, state.cream, dun)
        .filter(|_| !state.mushroom && !(dun && homozygous_pearl));

    match name {
        Some(name) => state.set_color(name),
        None => {
            let fallback = format!("{} Champagne", base.champagne_name());
            ctx.diagnostics.warn(GeneticsWarning::UnhandledChampagne {
                combination: format!(
                    "{base} cream={:?} dun={dun} mushroom={} pearl={homozygous_pearl}",
                    state.cream, state.mushroom
                ),
                fallback: fallback.clone(),
            });
            state.set_color(fallback);
        }
    }
    state
}

fn silver_key(key: &str) -> String {
    key.split_whitespace()
        .map(|word| match word {
            "Classic" => "Black",
            "Amber" => "Bay",
            "Gold" => "Chestnut",
            other => other,
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Silver shows only on black pigment, so it never touches a chestnut.
pub(crate) fn silver(mut state: ColorState, ctx: &mut StageContext<'_>) -> ColorState {
    if !ctx.has(Locus::Silver, "Z") || state.base() == BaseColor::Chestnut || state.mushroom {
        return state;
    }
    state.silver = true;
    state.color = format!("Silver {}", state.color);
    state.key = format!("Silver {}", silver_key(&state.key));
    state
}
