//! Particle-type conversion to the output numbering scheme.

/// Converts an internal (PDG) particle code to the output numbering
/// scheme used in the truth record.
pub trait ParticleTypes: Send + Sync {
    /// Returns the output particle code, or 0 when unknown.
    fn output_code(&self, pdg: i32) -> i32;
}

/// PDG to Geant3 particle numbering.
#[derive(Debug, Clone, Copy, Default)]
pub struct Geant3ParticleTypes;

impl ParticleTypes for Geant3ParticleTypes {
    fn output_code(&self, pdg: i32) -> i32 {
        match pdg {
            22 => 1,           // gamma
            -11 => 2,          // e+
            11 => 3,           // e-
            12 | 14 | 16 | -12 | -14 | -16 => 4, // neutrinos
            -13 => 5,          // mu+
            13 => 6,           // mu-
            111 => 7,          // pi0
            211 => 8,          // pi+
            -211 => 9,         // pi-
            130 => 10,         // K0L
            321 => 11,         // K+
            -321 => 12,        // K-
            2112 => 13,        // n
            2212 => 14,        // p
            -2212 => 15,       // pbar
            310 => 16,         // K0S
            221 => 17,         // eta
            3122 => 18,        // Lambda
            3222 => 19,        // Sigma+
            3212 => 20,        // Sigma0
            3112 => 21,        // Sigma-
            3322 => 22,        // Xi0
            3312 => 23,        // Xi-
            3334 => 24,        // Omega-
            -2112 => 25,       // nbar
            -3122 => 26,       // Lambda-bar
            45 => 47,          // deuteron
            46 => 49,          // He4 (legacy ion codes)
            _ => 0,
        }
    }
}
