//! Structural choices made before any text is mutated

use rand::seq::SliceRandom;
use rand::Rng;

use super::{chance, weighted_index};
use crate::error::Result;
use crate::settings::Settings;
use crate::types::{MutationKind, MutationSet};

/// Symbol separators, in the order of `Settings::separator_weights`
pub const SEPARATORS: [&str; 3] = [".", "_", "-"];

/// Pick the name/surname separator.
///
/// On the heavy path the separator may be empty. The light path always gets a
/// symbol, since it otherwise produces plain `namesurname` addresses.
pub fn separator<R: Rng + ?Sized>(
    settings: &Settings,
    rng: &mut R,
    heavy: bool,
) -> Result<&'static str> {
    if !heavy || chance(rng, settings.separator_prb) {
        let idx = weighted_index(rng, &settings.separator_weights, "separator")?;
        Ok(SEPARATORS[idx])
    } else {
        Ok("")
    }
}

/// Pick a domain according to `domain_weights`
pub fn domain<'a, R: Rng + ?Sized>(settings: &'a Settings, rng: &mut R) -> Result<&'a str> {
    let idx = weighted_index(rng, &settings.domain_weights, "domain")?;
    settings
        .domains
        .get(idx)
        .map(String::as_str)
        .ok_or_else(|| crate::config_error!("domain weights outnumber domains"))
}

/// Sample 1-3 distinct mutation kinds
pub fn mutation_set<R: Rng + ?Sized>(settings: &Settings, rng: &mut R) -> Result<MutationSet> {
    let count = weighted_index(rng, &settings.mutation_count_weights, "mutation count")? + 1;
    let kinds = &MutationKind::ALL;
    Ok(MutationSet::new(
        kinds.choose_multiple(rng, count.min(kinds.len())).copied(),
    ))
}
