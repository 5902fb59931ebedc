#![no_main]

use libfuzzer_sys::fuzz_target;
use tagprep_columns::FourVecView;
use tagprep_core::LorentzVector;
use tagprep_pipeline::gen_truth::GenColumns;

fuzz_target!(|data: &[u8]| {
    // Three i32 columns of equal length. The mother column may contain
    // self-references, cycles and out-of-range rows; the walk must still
    // terminate and every recorded daughter must be a valid row.
    let n = (data.len() / 12).min(64);
    if n == 0 {
        return;
    }

    let mut pdg = Vec::with_capacity(n);
    let mut flags = Vec::with_capacity(n);
    let mut mothers = Vec::with_capacity(n);
    for i in 0..n {
        let word = |at: usize| {
            let mut bytes = [0u8; 4];
            bytes.copy_from_slice(&data[at..at + 4]);
            i32::from_le_bytes(bytes)
        };
        pdg.push(word(12 * i));
        flags.push(word(12 * i + 4));
        mothers.push(word(12 * i + 8));
    }

    let stored: Vec<LorentzVector> =
        (0..n).map(|i| LorentzVector::new(i as f64, 0.0, 0.0, i as f64)).collect();

    let Ok(particles) = FourVecView::borrowed(&stored, n) else { return };
    let Ok(gen) = GenColumns::new(particles, &pdg, &flags, &mothers) else { return };

    let truth = gen.link();
    for row in 0..truth.n_particles() {
        for &daughter in truth.daughters_of(row) {
            assert!(daughter < n);
        }
    }
});
