use curve_dynamics::{
    circle, evenly_spaced, helix, helix_curvature, helix_torsion, lemniscate_3d, planar_circle,
    viviani_curve, ConstantSpeedDynamics, CurvatureDrivenDynamics, CurveDynamics, Error,
    FreeParticleDynamics, Interaction, MultiParticleSystem, ParametricCurve, ParticleState,
    SolverConfig,
};
use glam::DVec3;
use ndarray::Array1;
use std::f64::consts::PI;

/// Route library logs through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parameter values spread over a few periods
pub fn sample_parameters() -> Vec<f64> {
    (0..25).map(|k| -6.0 + 0.5 * k as f64).collect()
}

/// Curve with a stationary point at t = 0
pub fn cusp() -> ParametricCurve {
    ParametricCurve::new(|t| DVec3::new(t.powi(3), t.powi(2), 0.0))
        .with_first_derivative(|t| DVec3::new(3.0 * t * t, 2.0 * t, 0.0))
}

// ==================================================================================
// Geometry
// ==================================================================================

#[test]
fn circle_has_constant_curvature_and_no_torsion() {
    init_logging();
    let radius = 2.5;
    let curve = circle(radius, DVec3::new(1.0, -1.0, 0.5), DVec3::new(0.0, 1.0, 1.0)).unwrap();

    let dynamics = FreeParticleDynamics::new(curve.clone());
    let traj = dynamics
        .integrate(ParticleState::new(0.0, 1.3), (0.0, 10.0), 50)
        .unwrap();

    for &t in traj.positions.iter() {
        assert!((curve.curvature(t) - 1.0 / radius).abs() < 1e-12);
        assert!(curve.torsion(t).abs() < 1e-12);
    }
}

#[test]
fn helix_invariants_match_closed_form() {
    let (r, p) = (1.5, 2.0);
    let kappa = helix_curvature(r, p);
    let tau = helix_torsion(r, p);

    let c = p / (2.0 * PI);
    assert!((kappa - r / (r * r + c * c)).abs() < 1e-15);
    assert!((tau - c / (r * r + c * c)).abs() < 1e-15);

    let analytic = helix(r, p);
    for t in sample_parameters() {
        assert!((analytic.curvature(t) - kappa).abs() < 1e-12);
        assert!((analytic.torsion(t) - tau).abs() < 1e-12);
    }
}

#[test]
fn numeric_helix_approximates_closed_form() {
    let (r, p) = (1.0, 3.0);
    let c = p / (2.0 * PI);
    let numeric = ParametricCurve::new(move |t| DVec3::new(r * t.cos(), r * t.sin(), c * t))
        .with_step(1e-3)
        .unwrap();

    for t in [0.0, 0.7, 2.0, 4.5] {
        assert!((numeric.curvature(t) - helix_curvature(r, p)).abs() < 1e-5);
        assert!((numeric.torsion(t) - helix_torsion(r, p)).abs() < 1e-4);
    }
}

#[test]
fn arc_length_of_empty_interval_is_zero() {
    for curve in [helix(1.0, 1.0), viviani_curve(2.0), lemniscate_3d(1.0)] {
        for t0 in [-3.0, 0.0, 1.7] {
            for n in [0, 1, 2, 100] {
                assert_eq!(curve.arc_length(t0, t0, n), 0.0);
            }
        }
    }
}

#[test]
fn helix_arc_length_matches_speed() {
    let (r, p) = (1.0, 2.0 * PI);
    let expected = (r * r + 1.0_f64).sqrt() * 2.0 * PI;
    let length = helix(r, p).arc_length(0.0, 2.0 * PI, 200);
    assert!((length - expected).abs() < 1e-10);
}

#[test]
fn tangent_fails_at_stationary_point() {
    let curve = cusp();
    match curve.tangent(0.0) {
        Err(Error::DegenerateGeometry { t, speed }) => {
            assert_eq!(t, 0.0);
            assert_eq!(speed, 0.0);
        }
        other => panic!("expected DegenerateGeometry, got {:?}", other),
    }
    assert!(curve.normal(0.0).is_err());
    assert_eq!(curve.curvature(0.0), 0.0);
    assert!(curve.tangent(0.5).is_ok());
}

#[test]
fn frenet_frames_are_orthonormal_on_reference_curves() {
    let curves = [helix(2.0, 1.0), planar_circle(1.0)];
    for curve in curves.iter() {
        for t in sample_parameters() {
            let frame = curve.frenet_frame(t).unwrap();
            assert!(frame.is_orthonormal(1e-6), "frame at t = {} not orthonormal", t);
        }
    }
}

// ==================================================================================
// Single-particle dynamics
// ==================================================================================

#[test]
fn free_particle_at_rest_never_moves() {
    init_logging();
    for curve in [helix(1.0, 1.0), viviani_curve(1.0), lemniscate_3d(2.0)] {
        let traj = FreeParticleDynamics::new(curve)
            .integrate(ParticleState::at_rest(0.4), (0.0, 20.0), 200)
            .unwrap();
        assert!(traj.positions.iter().all(|&t| t == 0.4));
    }
}

#[test]
fn constant_speed_particle_keeps_its_speed() {
    let dynamics = ConstantSpeedDynamics::new(viviani_curve(1.0), 1.0)
        .with_solver(SolverConfig::with_tolerances(1e-8, 1e-10));
    let initial = dynamics.initial_state(1.0).unwrap();
    let traj = dynamics.integrate(initial, (0.0, 6.0), 61).unwrap();

    for &s in traj.physical_speeds(dynamics.curve()).iter() {
        assert!((s - 1.0).abs() < 1e-3, "speed {}", s);
    }
}

#[test]
fn curvature_driven_particle_accelerates_on_circle() {
    let dynamics = CurvatureDrivenDynamics::new(planar_circle(0.5), |kappa| 2.0 * kappa - 0.1)
        .with_damping(0.1)
        .unwrap();
    let traj = dynamics
        .integrate(ParticleState::at_rest(0.0), (0.0, 5.0), 11)
        .unwrap();

    // Net force 3.9 > 0 at rest: velocity rises monotonically
    for k in 1..traj.len() {
        assert!(traj.velocities[k] > traj.velocities[k - 1]);
    }
}

#[test]
fn exhausted_step_budget_is_reported() {
    let dynamics = FreeParticleDynamics::new(helix(1.0, 1.0))
        .with_solver(SolverConfig::default().with_max_steps(3).with_max_step(0.01));
    let result = dynamics.integrate(ParticleState::new(0.0, 1.0), (0.0, 1.0), 5);
    assert!(matches!(result, Err(Error::SolverDivergence { .. })));
}

// ==================================================================================
// Collective dynamics
// ==================================================================================

#[test]
fn kuramoto_in_phase_stays_synchronized() {
    init_logging();
    let n = 6;
    let system = MultiParticleSystem::new(planar_circle(1.0), n).with_interaction(
        Interaction::kuramoto(2.0).with_natural_frequencies(Array1::from_elem(n, 0.3)),
    );

    let traj = system
        .integrate(&Array1::from_elem(n, 0.8), &Array1::zeros(n), (0.0, 10.0), 101)
        .unwrap();

    for &r in traj.order_parameter_series().iter() {
        assert!((r - 1.0).abs() < 1e-12, "synchrony lost: r = {}", r);
    }
}

#[test]
fn kuramoto_strong_coupling_synchronizes_nearby_phases() {
    let n = 5;
    let system = MultiParticleSystem::new(planar_circle(1.0), n)
        .with_interaction(Interaction::kuramoto(4.0))
        .with_damping(2.0)
        .unwrap();

    let phases = evenly_spaced(n, 0.0, 1.0);
    let traj = system
        .integrate(&phases, &Array1::zeros(n), (0.0, 30.0), 31)
        .unwrap();

    let r = traj.order_parameter_series();
    assert!(r[30] > r[0]);
    assert!(r[30] > 0.999, "final r = {}", r[30]);
}

#[test]
fn repulsion_separates_close_pair() {
    init_logging();
    let system = MultiParticleSystem::new(planar_circle(1.0), 2)
        .with_interaction(Interaction::repulsive(1.0));

    let traj = system
        .integrate(&Array1::from_vec(vec![0.0, 0.05]), &Array1::zeros(2), (0.0, 2.0), 21)
        .unwrap();

    let distances = traj.mean_pairwise_distance_series(None);
    assert!(distances[1] >= distances[0]);
    for k in 1..distances.len() {
        assert!(distances[k] >= distances[k - 1]);
    }
}

#[test]
fn spatial_trajectories_lie_on_curve() {
    let curve = viviani_curve(1.0);
    let system = MultiParticleSystem::new(curve.clone(), 3)
        .with_interaction(Interaction::attractive(0.5));

    let (times, points) = system
        .spatial_trajectories(
            &Array1::from_vec(vec![0.0, 1.0, 2.0]),
            &Array1::from_vec(vec![0.5, 0.0, -0.5]),
            (0.0, 3.0),
            16,
        )
        .unwrap();
    let traj = system
        .integrate(
            &Array1::from_vec(vec![0.0, 1.0, 2.0]),
            &Array1::from_vec(vec![0.5, 0.0, -0.5]),
            (0.0, 3.0),
            16,
        )
        .unwrap();

    assert_eq!(points.dim(), (times.len(), 3, 3));
    for k in 0..times.len() {
        for j in 0..3 {
            let expected = curve.evaluate(traj.positions[[k, j]]);
            assert_eq!(points[[k, j, 0]], expected.x);
            assert_eq!(points[[k, j, 1]], expected.y);
            assert_eq!(points[[k, j, 2]], expected.z);
        }
    }
}

// ==================================================================================
// Configuration
// ==================================================================================

#[test]
fn solver_config_from_partial_yaml() {
    let config: SolverConfig = serde_yaml::from_str("rtol: 1.0e-6\natol: 1.0e-9\n").unwrap();
    assert_eq!(config.rtol, 1e-6);
    assert_eq!(config.atol, 1e-9);
    assert_eq!(config.max_steps, SolverConfig::default().max_steps);
    assert_eq!(config.first_step, None);
    assert!(config.validate().is_ok());
}

#[test]
fn solver_config_yaml_round_trip() {
    let config = SolverConfig::with_tolerances(1e-7, 1e-10)
        .with_max_steps(5_000)
        .with_first_step(0.01)
        .with_max_step(0.5);
    let yaml = serde_yaml::to_string(&config).unwrap();
    let back: SolverConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, config);
}

#[test]
fn default_solver_config_survives_yaml_round_trip() {
    let config = SolverConfig::default();
    let yaml = serde_yaml::to_string(&config).unwrap();
    let back: SolverConfig = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(back, config);
    assert_eq!(back.max_step, None);
    assert!(back.validate().is_ok());
}

#[test]
fn solver_config_accepts_null_max_step() {
    let config: SolverConfig = serde_yaml::from_str("max_step: null\n").unwrap();
    assert_eq!(config.max_step, None);

    let bounded: SolverConfig = serde_yaml::from_str("max_step: 0.25\n").unwrap();
    assert_eq!(bounded.max_step, Some(0.25));
}
