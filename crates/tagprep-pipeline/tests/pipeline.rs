//! Integration tests: full preparation pipeline over a scripted engine.

use std::path::Path;

use tagprep_columns::FourVecView;
use tagprep_core::{CandidateKind, Error};
use tagprep_pipeline::testing::{StubEngine, STUB_SCALE_FACTOR};
use tagprep_pipeline::{CandColumns, FatJetColumns, GenColumns, JetColumns, LeptonMatch, Tagger};

/// One semileptonic ttbar-like event in flat nano-style columns.
///
/// Five narrow jets (one below the pt floor, one overlapping the selected
/// electron), two fat jets with three subjets, one precomputed trijet
/// candidate and a five-row generator record with one hadronic top.
struct Event {
    jet_pt: Vec<f32>,
    jet_eta: Vec<f32>,
    jet_phi: Vec<f32>,
    jet_mass: Vec<f32>,
    btag: Vec<f32>,

    ele_idx: Vec<i32>,
    mu_idx: Vec<i32>,
    ele_pt: Vec<f32>,
    ele_eta: Vec<f32>,
    ele_phi: Vec<f32>,
    ele_mass: Vec<f32>,
    ele_id_bits: Vec<i32>,
    ele_mini_iso: Vec<f32>,
    mu_pt: Vec<f32>,
    mu_eta: Vec<f32>,
    mu_phi: Vec<f32>,
    mu_mass: Vec<f32>,
    mu_iso: Vec<f32>,

    fat_pt: Vec<f32>,
    fat_eta: Vec<f32>,
    fat_phi: Vec<f32>,
    fat_mass: Vec<f32>,
    sd_mass: Vec<f32>,
    top_disc: Vec<f32>,
    w_disc: Vec<f32>,
    sub_pt: Vec<f32>,
    sub_eta: Vec<f32>,
    sub_phi: Vec<f32>,
    sub_mass: Vec<f32>,
    sub_idx1: Vec<i32>,
    sub_idx2: Vec<i32>,

    cand_pt: Vec<f32>,
    cand_eta: Vec<f32>,
    cand_phi: Vec<f32>,
    cand_mass: Vec<f32>,
    cand_disc: Vec<f32>,
    cand_j1: Vec<i32>,
    cand_j2: Vec<i32>,
    cand_j3: Vec<i32>,

    gen_pt: Vec<f32>,
    gen_eta: Vec<f32>,
    gen_phi: Vec<f32>,
    gen_mass: Vec<f32>,
    gen_pdg: Vec<i32>,
    gen_flags: Vec<i32>,
    gen_mother: Vec<i32>,
}

impl Event {
    fn ttbar() -> Self {
        Self {
            // jet 3 is below the pt floor, jet 4 overlaps the electron
            jet_pt: vec![120.0, 80.0, 60.0, 15.0, 45.0],
            jet_eta: vec![0.4, -0.8, 1.2, 2.0, 0.1],
            jet_phi: vec![0.3, 2.5, -1.8, 0.7, -2.9],
            jet_mass: vec![12.0, 9.0, 7.0, 3.0, 6.0],
            btag: vec![0.95, 0.08, 0.15, 0.02, 0.30],

            ele_idx: vec![-1, -1, -1, -1, 0],
            mu_idx: vec![-1; 5],
            ele_pt: vec![35.0],
            ele_eta: vec![0.15],
            ele_phi: vec![-2.85],
            ele_mass: vec![0.000511],
            // every identification field at quality 2
            ele_id_bits: vec![0o2222222222],
            ele_mini_iso: vec![0.05],
            mu_pt: Vec::new(),
            mu_eta: Vec::new(),
            mu_phi: Vec::new(),
            mu_mass: Vec::new(),
            mu_iso: Vec::new(),

            fat_pt: vec![450.0, 380.0],
            fat_eta: vec![0.5, -1.1],
            fat_phi: vec![0.4, 2.6],
            fat_mass: vec![175.0, 85.0],
            sd_mass: vec![165.0, 78.0],
            top_disc: vec![0.92, 0.15],
            w_disc: vec![0.10, 0.85],
            sub_pt: vec![260.0, 190.0, 180.0],
            sub_eta: vec![0.45, 0.6, -1.05],
            sub_phi: vec![0.3, 0.55, 2.55],
            sub_mass: vec![30.0, 25.0, 40.0],
            sub_idx1: vec![0, 2],
            sub_idx2: vec![1, -1],

            cand_pt: vec![160.0],
            cand_eta: vec![0.2],
            cand_phi: vec![0.9],
            cand_mass: vec![172.0],
            cand_disc: vec![0.77],
            cand_j1: vec![0],
            cand_j2: vec![1],
            cand_j3: vec![2],

            // top -> b + W(-> u dbar), top row is the last copy
            gen_pt: vec![200.0, 120.0, 150.0, 80.0, 70.0],
            gen_eta: vec![0.3, 0.4, 0.2, 0.5, -0.1],
            gen_phi: vec![0.5, 0.3, 0.8, 1.0, 0.6],
            gen_mass: vec![172.5, 4.8, 80.4, 0.0, 0.0],
            gen_pdg: vec![6, 5, 24, 2, -1],
            gen_flags: vec![1 << 13, 0, 0, 0, 0],
            gen_mother: vec![-1, 0, 0, 2, 2],
        }
    }

    fn jets(&self) -> JetColumns<'_> {
        let view = FourVecView::composed(
            &self.jet_pt,
            &self.jet_eta,
            &self.jet_phi,
            &self.jet_mass,
            self.jet_pt.len(),
        )
        .expect("jet component columns");
        JetColumns::new(view, &self.btag)
            .expect("jet columns")
            .with_leptons(self.leptons())
            .expect("lepton block")
    }

    fn leptons(&self) -> LeptonMatch<'_> {
        LeptonMatch {
            electron_idx: &self.ele_idx,
            muon_idx: &self.mu_idx,
            electrons: FourVecView::composed(
                &self.ele_pt,
                &self.ele_eta,
                &self.ele_phi,
                &self.ele_mass,
                self.ele_pt.len(),
            )
            .expect("electron component columns"),
            electron_id_bits: &self.ele_id_bits,
            electron_mini_iso: &self.ele_mini_iso,
            muons: FourVecView::composed(&self.mu_pt, &self.mu_eta, &self.mu_phi, &self.mu_mass, 0)
                .expect("muon component columns"),
            muon_id: None,
            muon_iso: &self.mu_iso,
        }
    }

    fn fat_jets(&self) -> FatJetColumns<'_> {
        let fat = FourVecView::composed(
            &self.fat_pt,
            &self.fat_eta,
            &self.fat_phi,
            &self.fat_mass,
            self.fat_pt.len(),
        )
        .expect("fat-jet component columns");
        let subjets = FourVecView::composed(
            &self.sub_pt,
            &self.sub_eta,
            &self.sub_phi,
            &self.sub_mass,
            self.sub_pt.len(),
        )
        .expect("subjet component columns");
        FatJetColumns::new(
            fat,
            &self.sd_mass,
            &self.top_disc,
            &self.w_disc,
            subjets,
            &self.sub_idx1,
            &self.sub_idx2,
        )
        .expect("fat-jet columns")
    }

    fn cands(&self) -> CandColumns<'_> {
        let view = FourVecView::composed(
            &self.cand_pt,
            &self.cand_eta,
            &self.cand_phi,
            &self.cand_mass,
            self.cand_pt.len(),
        )
        .expect("candidate component columns");
        CandColumns::new(view, &self.cand_disc, &self.cand_j1, &self.cand_j2, &self.cand_j3)
            .expect("candidate columns")
    }

    fn gen(&self) -> GenColumns<'_> {
        let view = FourVecView::composed(
            &self.gen_pt,
            &self.gen_eta,
            &self.gen_phi,
            &self.gen_mass,
            self.gen_pt.len(),
        )
        .expect("generator component columns");
        GenColumns::new(view, &self.gen_pdg, &self.gen_flags, &self.gen_mother)
            .expect("generator columns")
    }
}

fn stub_tagger() -> Tagger<StubEngine> {
    Tagger::configure(Path::new("stub.cfg"), None).expect("stub engine configures")
}

#[test]
fn full_event_drives_all_constituent_kinds() {
    let event = Event::ttbar();
    let mut tagger = stub_tagger();
    tagger
        .run(
            Some(event.jets()),
            Some(event.fat_jets()),
            Some(event.cands()),
            Some(event.gen()),
        )
        .expect("full event should run");

    assert_eq!(tagger.engine().combination(), Some("jets+candidates+fat-jets"));

    // trijet top + precomputed candidate + two merged fat jets
    assert_eq!(tagger.results().len(), 4);
    // plus the three unclassified per-jet trials
    assert_eq!(tagger.candidates().len(), 7);

    let table = tagger.results_table();
    assert_eq!(table.n_rows(), 4);
    assert_eq!(table.ints[0], [2, 0, 1, 2, 1], "trijet from kept jets, truth-linked");
    assert_eq!(table.ints[1], [2, 0, 1, 2, 0], "precomputed candidate rows");
    assert_eq!(table.ints[2], [0, 0, -1, -1, 1], "first fat jet, one constituent");
    assert_eq!(table.ints[3], [0, 1, -1, -1, 1], "second fat jet, one constituent");

    assert!((table.floats[1][4] - 0.77).abs() < 1e-6, "candidate discriminator");
    assert!((table.floats[2][4] - 0.92).abs() < 1e-6, "fat-jet top discriminant");

    let sf = tagger.results_scale_factors();
    assert_eq!(sf.n_rows(), 4);
    assert!(sf.systematics[0].is_empty());
    assert!((f64::from(sf.scale_factors[2]) - STUB_SCALE_FACTOR).abs() < 1e-6);
    assert!(sf.systematics[2].contains_key("sf_up"));
}

#[test]
fn soft_and_lepton_contaminated_jets_never_reach_the_engine() {
    let event = Event::ttbar();
    let mut tagger = stub_tagger();
    tagger
        .run(Some(event.jets()), None, None, None)
        .expect("jets-only event should run");

    assert_eq!(tagger.engine().combination(), Some("jets"));

    // three survivors, each trialed once, plus the trijet built from them
    let table = tagger.candidates_table();
    assert_eq!(table.n_rows(), 4);
    assert_eq!(table.ints[0][1], 0);
    assert_eq!(table.ints[1][1], 1);
    assert_eq!(table.ints[2][1], 2);
    assert_eq!(table.ints[3], [2, 0, 1, 2, 0], "no generator block, no truth flag");
}

#[test]
fn candidates_without_jets_are_an_illegal_combination() {
    let event = Event::ttbar();
    let mut tagger = stub_tagger();

    let err = tagger.run(None, None, Some(event.cands()), None).unwrap_err();
    assert_eq!(err.to_string(), "Configuration error: Illegal constituent combination");

    let err = tagger
        .run(None, Some(event.fat_jets()), Some(event.cands()), None)
        .unwrap_err();
    assert!(matches!(err, Error::Configuration(_)));
}

#[test]
fn fat_jets_alone_are_a_legal_combination() {
    let event = Event::ttbar();
    let mut tagger = stub_tagger();
    tagger
        .run(None, Some(event.fat_jets()), None, Some(event.gen()))
        .expect("fat-jets-only event should run");

    assert_eq!(tagger.engine().combination(), Some("fat-jets"));
    assert_eq!(tagger.results().len(), 2);
    assert_eq!(tagger.results()[0].kind, CandidateKind::MergedTop);
    assert_eq!(tagger.results_table().ints[0][4], 1, "linked to the hadronic top");
}

#[test]
fn jets_with_candidates_are_distinct_from_jets_alone() {
    let event = Event::ttbar();
    let mut tagger = stub_tagger();
    tagger
        .run(Some(event.jets()), None, Some(event.cands()), None)
        .expect("jets+candidates event should run");

    assert_eq!(tagger.engine().combination(), Some("jets+candidates"));
    assert_eq!(tagger.results().len(), 2);
}

#[test]
fn jets_and_fat_jets_without_candidates_are_legal() {
    let event = Event::ttbar();
    let mut tagger = stub_tagger();
    tagger
        .run(Some(event.jets()), Some(event.fat_jets()), None, None)
        .expect("jets+fat-jets event should run");
    assert_eq!(tagger.engine().combination(), Some("jets+fat-jets"));
    assert_eq!(tagger.results().len(), 3);
}

#[test]
fn engine_failure_preserves_the_previous_surfaces() {
    let event = Event::ttbar();
    let mut tagger = stub_tagger();
    tagger
        .run(Some(event.jets()), None, None, None)
        .expect("first run should succeed");
    let before = tagger.results_table();

    tagger.engine_mut().fail_next_run = true;
    let err = tagger.run(Some(event.jets()), None, None, None).unwrap_err();
    assert!(matches!(err, Error::Engine(_)));

    let after = tagger.results_table();
    assert_eq!(after.n_rows(), before.n_rows());
    assert_eq!(after.ints, before.ints);
}
