//! Collective Module: Interacting Ensembles on a Curve
//!
//! - `interaction.rs`: Kuramoto, attractive, repulsive and Vicsek laws
//! - `system.rs`: `MultiParticleSystem`, the coupled 2N-dimensional ODE
//! - `observables.rs`: order parameter, pairwise distance, velocity spread
//! - `initial.rs`: evenly spaced and uniformly random initial conditions
//!
//! Interaction laws act purely in parameter space; the curve enters only
//! when trajectories are mapped back to R³.

mod interaction;
mod system;
mod observables;
mod initial;

pub use interaction::{Interaction, DEFAULT_REPULSION_CUTOFF};
pub use system::{EnsembleTrajectory, ExternalForce, MultiParticleSystem};
pub use observables::{mean_pairwise_distance, order_parameter, velocity_spread};
pub use initial::{evenly_spaced, uniform_random};
