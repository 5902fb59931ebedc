//! Subjet-to-fat-jet association.

use tagprep_columns::FourVecView;
use tagprep_core::{Error, LorentzVector, Result};

/// Collect each fat jet's subjet four-vectors via its two stored indices.
///
/// Indices keep their stored order, first slot before second. An index
/// outside `[0, subjet_count)` is omitted without error; upstream encodes
/// "no subjet in this slot" as an out-of-range sentinel, usually -1.
pub fn associate(
    n_fat_jets: usize,
    subjets: &FourVecView<'_>,
    idx1: &[i32],
    idx2: &[i32],
) -> Result<Vec<Vec<LorentzVector>>> {
    for (name, have) in [("first subjet index", idx1.len()), ("second subjet index", idx2.len())] {
        if have < n_fat_jets {
            return Err(Error::Shape(format!(
                "{} column holds {} values, expected {} fat jets",
                name, have, n_fat_jets
            )));
        }
    }

    let mut associations = Vec::with_capacity(n_fat_jets);
    for i in 0..n_fat_jets {
        let mut linked = Vec::with_capacity(2);
        for idx in [idx1[i], idx2[i]] {
            if idx >= 0 {
                if let Some(p4) = subjets.get(idx as usize) {
                    linked.push(p4);
                }
            }
        }
        associations.push(linked);
    }
    Ok(associations)
}
