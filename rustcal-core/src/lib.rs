//! rustcal-core: Core types and traits for calorimeter hit digitization.
//!
//! This crate provides the foundational abstractions for block identity,
//! analog hit records, truth points, simulation steps, and the detector
//! constants shared by all digitizer instances.
//!

pub mod block;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod particle;
pub mod sink;
pub mod step;
pub mod track;
pub mod truth;

pub use block::{BlockHit, BlockId, BlockReadout, BlockRecord};
pub use constants::{CalConstants, FINALIZE_WINDOW_NS, OUT_TIME_LIMIT_NS};
pub use error::{Error, Result};
pub use geometry::{GeometryResolver, IdentAxis, LatticeGeometry, TableGeometry, UNRESOLVED};
pub use particle::{Geant3ParticleTypes, ParticleTypes};
pub use sink::{CollectSink, EventSink};
pub use step::{Step, Vec3};
pub use track::{EventTrackMarkers, TrackMarkers};
pub use truth::TruthPoint;
