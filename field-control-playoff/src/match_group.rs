use std::collections::{HashMap, HashSet};

use crate::{AllianceId, Bracket, Error, MatchupId, Result, TbaMatchKey};

/// A group of matches played between the same two alliances.
pub trait MatchGroup {
    /// Returns the unique id of the group.
    fn id(&self) -> &str;

    /// Returns the matches of the group in the order they were created.
    fn match_specs(&self) -> &[MatchSpec];
}

/// A single match slot within a [`MatchGroup`].
///
/// Only `red_alliance_id`, `blue_alliance_id` and `is_hidden` change after the bracket is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchSpec {
    pub long_name: String,
    pub short_name: String,
    pub name_detail: String,
    /// Filled in by [`collect_match_specs`].
    pub match_group_id: String,
    /// The position of the match in the playoff schedule. Unique across the bracket.
    pub order: u32,
    pub duration_sec: u32,
    pub use_tiebreak_criteria: bool,
    pub is_hidden: bool,
    pub tba_match_key: TbaMatchKey,
    pub red_alliance_id: AllianceId,
    pub blue_alliance_id: AllianceId,
}

/// A reference to a [`MatchSpec`] owned by a matchup of a [`Bracket`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MatchSpecRef {
    pub matchup: MatchupId,
    pub index: usize,
}

/// Collects all match groups reachable from the root of `bracket`, keyed by their id.
///
/// # Errors
///
/// Returns [`Error::DuplicateMatchGroupId`] if two match groups share the same id.
pub fn collect_match_groups(bracket: &Bracket) -> Result<HashMap<String, MatchupId>> {
    let mut match_groups = HashMap::new();

    bracket.try_traverse(|id, match_group| {
        if match_groups
            .insert(match_group.id().to_owned(), id)
            .is_some()
        {
            return Err(Error::DuplicateMatchGroupId(match_group.id().to_owned()));
        }

        Ok(())
    })?;

    log::debug!("Collected {} match groups", match_groups.len());

    Ok(match_groups)
}

/// Collects all match specs reachable from the root of `bracket`, sorted by their order. The
/// `match_group_id` of every spec is set to the id of its owning match group.
///
/// # Errors
///
/// Returns an error if two match specs share the same long name, short name, order or match key.
pub fn collect_match_specs(bracket: &mut Bracket) -> Result<Vec<MatchSpecRef>> {
    let mut ids = Vec::new();
    bracket.traverse(|id, _| ids.push(id));

    let mut long_names = HashSet::new();
    let mut short_names = HashSet::new();
    let mut orders = HashSet::new();
    let mut tba_keys = HashSet::new();

    let mut specs = Vec::new();
    for id in ids {
        let matchup = &mut bracket[id];
        let match_group_id = matchup.id().to_owned();

        for (index, spec) in matchup.match_specs_mut().iter_mut().enumerate() {
            if !long_names.insert(spec.long_name.clone()) {
                return Err(Error::DuplicateLongName(spec.long_name.clone()));
            }

            if !short_names.insert(spec.short_name.clone()) {
                return Err(Error::DuplicateShortName(spec.short_name.clone()));
            }

            if !orders.insert(spec.order) {
                return Err(Error::DuplicateOrder(spec.order));
            }

            let tba_key = spec.tba_match_key.to_string();
            if !tba_keys.insert(tba_key.clone()) {
                return Err(Error::DuplicateMatchKey(tba_key));
            }

            spec.match_group_id = match_group_id.clone();
            specs.push(MatchSpecRef { matchup: id, index });
        }
    }

    specs.sort_by_key(|spec| bracket.match_spec(*spec).order);

    log::debug!("Collected {} match specs", specs.len());

    Ok(specs)
}

/// Returns the name of the first match of `destination`, including its detail if it has one.
pub(crate) fn format_destination_match_name(destination: Option<&dyn MatchGroup>) -> String {
    let spec = match destination.and_then(|group| group.match_specs().first()) {
        Some(spec) => spec,
        None => return String::new(),
    };

    if spec.name_detail.is_empty() {
        spec.long_name.clone()
    } else {
        format!("{} - {}", spec.long_name, spec.name_detail)
    }
}
