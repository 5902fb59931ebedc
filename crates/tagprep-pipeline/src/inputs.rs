//! Raw column groups and the assembled inputs handed to the engine.
//!
//! Each input kind has a raw column group that validates shapes at
//! construction and an `assemble` step that derives the per-invocation
//! structures (keep mask, subjet associations), materializes the
//! four-vector column for dense access and attaches the truth record.

use tagprep_columns::{ColumnView, ExtraColumns, FourVecView, ScalarColumn};
use tagprep_core::{Error, LorentzVector, Result};

use crate::cleaning::{self, LeptonMatch};
use crate::gen_truth::TruthRecord;
use crate::subjets;

/// Raw narrow-jet columns as supplied by the caller.
#[derive(Debug, Clone)]
pub struct JetColumns<'a> {
    jets: FourVecView<'a>,
    btag: &'a [f32],
    leptons: Option<LeptonMatch<'a>>,
    extra: ExtraColumns<'a>,
}

impl<'a> JetColumns<'a> {
    /// Wrap the jet collection and its b-tag discriminator column.
    pub fn new(jets: FourVecView<'a>, btag: &'a [f32]) -> Result<Self> {
        let n = jets.len();
        if btag.len() < n {
            return Err(Error::Shape(format!(
                "b-tag column holds {} values, expected {} jets",
                btag.len(),
                n
            )));
        }
        Ok(Self { jets, btag, leptons: None, extra: ExtraColumns::new(n) })
    }

    /// Attach the lepton-matching block used for overlap removal.
    pub fn with_leptons(mut self, leptons: LeptonMatch<'a>) -> Result<Self> {
        leptons.validate(self.jets.len())?;
        self.leptons = Some(leptons);
        Ok(self)
    }

    /// Attach a named supplemental column. Integer columns are converted to
    /// floats on attach; flag columns are rejected.
    pub fn add_supplemental(
        &mut self,
        name: impl Into<String>,
        column: ScalarColumn<'a>,
    ) -> Result<()> {
        self.extra.insert(name, column)
    }

    /// Number of jets.
    pub fn len(&self) -> usize {
        self.jets.len()
    }

    /// True when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.jets.is_empty()
    }

    /// Assemble the engine input: run overlap removal, make the four-vector
    /// column dense and attach the truth record when supplied.
    pub fn assemble(self, truth: Option<&'a TruthRecord<'a>>) -> Result<JetInput<'a>> {
        let jets = self.jets.materialize();
        let keep = cleaning::keep_mask(&jets, self.leptons.as_ref())?;
        let btag = ColumnView::from_slice(self.btag, jets.len())?;
        Ok(JetInput { jets, btag, keep, extra: self.extra, truth })
    }
}

/// Assembled narrow-jet input, scoped to one engine invocation.
#[derive(Debug, Clone)]
pub struct JetInput<'a> {
    /// Jet four-vectors, dense
    pub jets: ColumnView<'a, LorentzVector>,
    /// B-tag discriminator per jet
    pub btag: ColumnView<'a, f32>,
    /// Keep flag per jet from overlap removal
    pub keep: Vec<bool>,
    /// Named supplemental float columns
    pub extra: ExtraColumns<'a>,
    /// Truth record shared across the input kinds that carry one
    pub truth: Option<&'a TruthRecord<'a>>,
}

impl JetInput<'_> {
    /// Number of jets, kept or not.
    pub fn len(&self) -> usize {
        self.jets.len()
    }

    /// True when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.jets.is_empty()
    }

    /// Indices of jets surviving overlap removal.
    pub fn kept(&self) -> impl Iterator<Item = usize> + '_ {
        self.keep.iter().enumerate().filter(|(_, keep)| **keep).map(|(i, _)| i)
    }
}

/// Raw fat-jet columns as supplied by the caller.
#[derive(Debug, Clone)]
pub struct FatJetColumns<'a> {
    fat_jets: FourVecView<'a>,
    softdrop_mass: &'a [f32],
    top_disc: &'a [f32],
    w_disc: &'a [f32],
    subjets: FourVecView<'a>,
    subjet_idx1: &'a [i32],
    subjet_idx2: &'a [i32],
}

impl<'a> FatJetColumns<'a> {
    /// Wrap the fat-jet collection with its scalar columns and the subjet
    /// collection with the two per-fat-jet subjet indices.
    pub fn new(
        fat_jets: FourVecView<'a>,
        softdrop_mass: &'a [f32],
        top_disc: &'a [f32],
        w_disc: &'a [f32],
        subjets: FourVecView<'a>,
        subjet_idx1: &'a [i32],
        subjet_idx2: &'a [i32],
    ) -> Result<Self> {
        let n = fat_jets.len();
        let columns = [
            ("softdrop mass", softdrop_mass.len()),
            ("top discriminant", top_disc.len()),
            ("W discriminant", w_disc.len()),
            ("first subjet index", subjet_idx1.len()),
            ("second subjet index", subjet_idx2.len()),
        ];
        for (name, have) in columns {
            if have < n {
                return Err(Error::Shape(format!(
                    "{} column holds {} values, expected {} fat jets",
                    name, have, n
                )));
            }
        }
        Ok(Self { fat_jets, softdrop_mass, top_disc, w_disc, subjets, subjet_idx1, subjet_idx2 })
    }

    /// Number of fat jets.
    pub fn len(&self) -> usize {
        self.fat_jets.len()
    }

    /// True when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.fat_jets.is_empty()
    }

    /// Assemble the engine input: link subjets, make the four-vector
    /// column dense and attach the truth record when supplied.
    pub fn assemble(self, truth: Option<&'a TruthRecord<'a>>) -> Result<FatJetInput<'a>> {
        let fat_jets = self.fat_jets.materialize();
        let n = fat_jets.len();
        let subjets = subjets::associate(n, &self.subjets, self.subjet_idx1, self.subjet_idx2)?;
        Ok(FatJetInput {
            fat_jets,
            softdrop_mass: ColumnView::from_slice(self.softdrop_mass, n)?,
            top_disc: ColumnView::from_slice(self.top_disc, n)?,
            w_disc: ColumnView::from_slice(self.w_disc, n)?,
            subjets,
            truth,
        })
    }
}

/// Assembled fat-jet input, scoped to one engine invocation.
#[derive(Debug, Clone)]
pub struct FatJetInput<'a> {
    /// Fat-jet four-vectors, dense
    pub fat_jets: ColumnView<'a, LorentzVector>,
    /// Groomed mass per fat jet
    pub softdrop_mass: ColumnView<'a, f32>,
    /// Merged-top discriminant per fat jet
    pub top_disc: ColumnView<'a, f32>,
    /// Merged-W discriminant per fat jet
    pub w_disc: ColumnView<'a, f32>,
    /// Linked subjet four-vectors per fat jet, in stored-index order
    pub subjets: Vec<Vec<LorentzVector>>,
    /// Truth record shared across the input kinds that carry one
    pub truth: Option<&'a TruthRecord<'a>>,
}

impl FatJetInput<'_> {
    /// Number of fat jets.
    pub fn len(&self) -> usize {
        self.fat_jets.len()
    }

    /// True when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.fat_jets.is_empty()
    }
}

/// Raw resolved-candidate columns as supplied by the caller.
#[derive(Debug, Clone)]
pub struct CandColumns<'a> {
    cands: FourVecView<'a>,
    disc: &'a [f32],
    jet1_idx: &'a [i32],
    jet2_idx: &'a [i32],
    jet3_idx: &'a [i32],
}

impl<'a> CandColumns<'a> {
    /// Wrap the precomputed resolved-candidate collection: one discriminator
    /// and three constituent-jet indices per candidate.
    pub fn new(
        cands: FourVecView<'a>,
        disc: &'a [f32],
        jet1_idx: &'a [i32],
        jet2_idx: &'a [i32],
        jet3_idx: &'a [i32],
    ) -> Result<Self> {
        let n = cands.len();
        let columns = [
            ("discriminator", disc.len()),
            ("first jet index", jet1_idx.len()),
            ("second jet index", jet2_idx.len()),
            ("third jet index", jet3_idx.len()),
        ];
        for (name, have) in columns {
            if have < n {
                return Err(Error::Shape(format!(
                    "{} column holds {} values, expected {} candidates",
                    name, have, n
                )));
            }
        }
        Ok(Self { cands, disc, jet1_idx, jet2_idx, jet3_idx })
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.cands.len()
    }

    /// True when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.cands.is_empty()
    }

    /// Assemble the engine input.
    pub fn assemble(self) -> Result<CandInput<'a>> {
        let cands = self.cands.materialize();
        let n = cands.len();
        Ok(CandInput {
            cands,
            disc: ColumnView::from_slice(self.disc, n)?,
            jet1_idx: ColumnView::from_slice(self.jet1_idx, n)?,
            jet2_idx: ColumnView::from_slice(self.jet2_idx, n)?,
            jet3_idx: ColumnView::from_slice(self.jet3_idx, n)?,
        })
    }
}

/// Assembled resolved-candidate input, scoped to one engine invocation.
#[derive(Debug, Clone)]
pub struct CandInput<'a> {
    /// Candidate four-vectors, dense
    pub cands: ColumnView<'a, LorentzVector>,
    /// Discriminator per candidate
    pub disc: ColumnView<'a, f32>,
    /// First constituent-jet row per candidate, -1 for none
    pub jet1_idx: ColumnView<'a, i32>,
    /// Second constituent-jet row per candidate, -1 for none
    pub jet2_idx: ColumnView<'a, i32>,
    /// Third constituent-jet row per candidate, -1 for none
    pub jet3_idx: ColumnView<'a, i32>,
}

impl CandInput<'_> {
    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.cands.len()
    }

    /// True when the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.cands.is_empty()
    }

    /// The non-sentinel constituent-jet rows of candidate `i`, in column
    /// order.
    pub fn constituent_rows(&self, i: usize) -> Vec<usize> {
        let mut rows = Vec::with_capacity(3);
        for col in [&self.jet1_idx, &self.jet2_idx, &self.jet3_idx] {
            let idx = col.value(i);
            if idx >= 0 {
                rows.push(idx as usize);
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gen_truth::GenColumns;

    #[test]
    fn jet_assembly_runs_overlap_removal() {
        let pt = [25.0_f32, 19.8, 40.0];
        let eta = [0.0_f32, 0.5, -0.5];
        let phi = [0.0_f32, 1.0, 2.0];
        let mass = [5.0_f32, 5.0, 5.0];
        let btag = [0.1_f32, 0.9, 0.4];

        let jets = FourVecView::composed(&pt, &eta, &phi, &mass, 3).unwrap();
        let input = JetColumns::new(jets, &btag).unwrap().assemble(None).unwrap();

        assert_eq!(input.keep, vec![true, false, true]);
        assert_eq!(input.kept().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(input.btag.value(2), 0.4);
        assert!(input.truth.is_none());
    }

    #[test]
    fn jet_supplementals_convert_integers() {
        let pt = [25.0_f32; 3];
        let eta = [0.0_f32; 3];
        let phi = [0.0_f32; 3];
        let mass = [1.0_f32; 3];
        let btag = [0.5_f32; 3];
        let hits = [1_i32, 2, 3];

        let jets = FourVecView::composed(&pt, &eta, &phi, &mass, 3).unwrap();
        let mut columns = JetColumns::new(jets, &btag).unwrap();
        columns.add_supplemental("nHits", ScalarColumn::I32(&hits)).unwrap();

        let input = columns.assemble(None).unwrap();
        assert_eq!(input.extra.get("nHits").unwrap().as_slice(), &[1.0_f32, 2.0, 3.0]);
    }

    #[test]
    fn jet_flag_supplemental_is_rejected() {
        let pt = [25.0_f32];
        let eta = [0.0_f32];
        let phi = [0.0_f32];
        let mass = [1.0_f32];
        let btag = [0.5_f32];
        let flags = [true];

        let jets = FourVecView::composed(&pt, &eta, &phi, &mass, 1).unwrap();
        let mut columns = JetColumns::new(jets, &btag).unwrap();
        let err = columns.add_supplemental("looseId", ScalarColumn::Bool(&flags)).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch(_)));
    }

    #[test]
    fn short_btag_column_is_rejected() {
        let pt = [25.0_f32, 30.0];
        let eta = [0.0_f32, 0.0];
        let phi = [0.0_f32, 0.0];
        let mass = [1.0_f32, 1.0];
        let btag = [0.5_f32];

        let jets = FourVecView::composed(&pt, &eta, &phi, &mass, 2).unwrap();
        let err = JetColumns::new(jets, &btag).unwrap_err();
        assert!(matches!(err, Error::Shape(_)));
    }

    #[test]
    fn fat_jet_assembly_links_subjets() {
        let pt = [400.0_f32, 350.0];
        let eta = [0.0_f32, 1.0];
        let phi = [0.0_f32, -1.0];
        let mass = [170.0_f32, 80.0];
        let sd_mass = [160.0_f32, 75.0];
        let top_disc = [0.9_f32, 0.2];
        let w_disc = [0.1_f32, 0.8];

        let sub_pt = [200.0_f32, 150.0, 90.0];
        let sub_eta = [0.1_f32, -0.1, 1.0];
        let sub_phi = [0.0_f32, 0.2, -1.0];
        let sub_mass = [20.0_f32, 15.0, 10.0];

        let fat_jets = FourVecView::composed(&pt, &eta, &phi, &mass, 2).unwrap();
        let subjets = FourVecView::composed(&sub_pt, &sub_eta, &sub_phi, &sub_mass, 3).unwrap();
        let input = FatJetColumns::new(
            fat_jets,
            &sd_mass,
            &top_disc,
            &w_disc,
            subjets,
            &[0, 2],
            &[1, -1],
        )
        .unwrap()
        .assemble(None)
        .unwrap();

        assert_eq!(input.subjets[0].len(), 2);
        assert_eq!(input.subjets[1].len(), 1);
        assert_eq!(input.softdrop_mass.value(1), 75.0);
    }

    #[test]
    fn cand_assembly_reads_constituent_rows() {
        let pt = [150.0_f32];
        let eta = [0.0_f32];
        let phi = [0.0_f32];
        let mass = [170.0_f32];
        let disc = [0.75_f32];

        let cands = FourVecView::composed(&pt, &eta, &phi, &mass, 1).unwrap();
        let input = CandColumns::new(cands, &disc, &[4], &[1], &[-1])
            .unwrap()
            .assemble()
            .unwrap();

        assert_eq!(input.constituent_rows(0), vec![4, 1]);
        assert_eq!(input.disc.value(0), 0.75);
    }

    #[test]
    fn truth_record_is_attached_to_jets_and_fat_jets() {
        let gen_stored = [
            LorentzVector::from_pt_eta_phi_mass(200.0, 0.0, 0.0, 172.5),
            LorentzVector::from_pt_eta_phi_mass(60.0, 0.1, 0.1, 4.8),
            LorentzVector::from_pt_eta_phi_mass(140.0, -0.1, 0.2, 80.4),
            LorentzVector::from_pt_eta_phi_mass(70.0, 0.3, 0.4, 0.0),
            LorentzVector::from_pt_eta_phi_mass(65.0, -0.3, -0.2, 0.0),
        ];
        let pdg = [6, 5, 24, 2, -1];
        let flags = [1 << 13, 0, 0, 0, 0];
        let mothers = [-1, 0, 0, 2, 2];
        let gen = GenColumns::new(
            FourVecView::borrowed(&gen_stored, 5).unwrap(),
            &pdg,
            &flags,
            &mothers,
        )
        .unwrap();
        let truth = gen.link();

        let pt = [25.0_f32];
        let eta = [0.0_f32];
        let phi = [0.0_f32];
        let mass = [1.0_f32];
        let btag = [0.5_f32];
        let jets = FourVecView::composed(&pt, &eta, &phi, &mass, 1).unwrap();
        let input = JetColumns::new(jets, &btag).unwrap().assemble(Some(&truth)).unwrap();

        let attached = input.truth.unwrap();
        assert_eq!(attached.daughters_of(0), &[1, 3, 4]);
    }
}
