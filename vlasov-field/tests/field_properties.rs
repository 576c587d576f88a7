use approx::assert_relative_eq;
use utilities::{construct_neutral_coefficients, construct_random_coefficients, construct_test_grid};
use vlasov_field::{
    background::{DopingParameters, DopingProfile, Regime, Uniform},
    diagnostics::FieldSampler,
    field::FieldSolverBuilder,
    moments::GlobalReduction,
};

/// Stands in for an all-reduce over two processes which each hold half of the velocity cells
struct Halves;

impl GlobalReduction<f64> for Halves {
    fn all_reduce_sum(&self, values: &mut [f64]) {
        for value in values.iter_mut() {
            *value *= 2.;
        }
    }
}

#[test]
fn neutral_distribution_produces_no_field_anywhere() {
    let grid = construct_test_grid(8., 32, 27);
    let values = construct_neutral_coefficients(&grid);
    let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&Uniform).build();
    let snapshot = solver.solve(&values).unwrap();

    assert_relative_eq!(snapshot.moments().total_charge(), 8., max_relative = 1e-12);
    let sampler = FieldSampler::new(grid.mesh(), 4).unwrap();
    let sample = sampler.sample(&snapshot);
    for (potential, field) in sample.potential.into_iter().zip(sample.field) {
        assert_relative_eq!(potential, 0., epsilon = 1e-11);
        assert_relative_eq!(field, 0., epsilon = 1e-11);
    }
}

#[test]
fn field_integrates_to_minus_the_potential_drop() {
    let grid = construct_test_grid(3., 24, 8);
    let values = construct_random_coefficients(&grid);
    let profile = DopingProfile::new(
        DopingParameters {
            high: 1.,
            low: 0.2,
            lower_cell: 5,
            upper_cell: 17,
            permittivity: 0.5,
            right_potential: 2.,
        },
        &grid,
    )
    .unwrap();

    for regime in [Regime::Uniform, Regime::Doping(profile)] {
        let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&regime).build();
        let snapshot = solver.solve(&values).unwrap();

        let integral: f64 = snapshot.cell_integral_cache().iter().map(|c| c.zeroth).sum();
        let drop = snapshot.potential_at(3.).unwrap() - snapshot.potential_at(0.).unwrap();
        assert_relative_eq!(integral, -drop, epsilon = 1e-10, max_relative = 1e-10);
    }
}

#[test]
fn a_distributed_reduction_matches_the_full_array() {
    let grid = construct_test_grid(2., 16, 4);
    let values = construct_random_coefficients(&grid);
    let full = FieldSolverBuilder::new().with_grid(&grid).with_regime(&Uniform).build();
    let full = full.solve(&values).unwrap();

    // Each rank sees the same data scaled by one half, the reduction restores the total
    let halved: Vec<f64> = values.iter().map(|value| value / 2.).collect();
    let distributed = FieldSolverBuilder::new()
        .with_grid(&grid)
        .with_regime(&Uniform)
        .with_reduction(Halves)
        .build();
    let distributed = distributed.solve(&halved).unwrap();

    assert_relative_eq!(
        full.boundary_constant(),
        distributed.boundary_constant(),
        epsilon = 1e-12,
        max_relative = 1e-12
    );
    for x in [0.1, 0.75, 1.3, 1.99] {
        assert_relative_eq!(
            full.field_at(x).unwrap(),
            distributed.field_at(x).unwrap(),
            epsilon = 1e-12,
            max_relative = 1e-12
        );
    }
}

#[test]
fn doping_regime_is_pinned_at_both_boundaries() {
    let grid = construct_test_grid(5., 20, 8);
    let values = construct_random_coefficients(&grid);
    let regime = Regime::select(
        true,
        Some(DopingParameters {
            high: 1.,
            low: 0.05,
            lower_cell: 4,
            upper_cell: 14,
            permittivity: 1.,
            right_potential: 1.,
        }),
        &grid,
    )
    .unwrap();
    let solver = FieldSolverBuilder::new().with_grid(&grid).with_regime(&regime).build();
    let snapshot = solver.solve(&values).unwrap();

    assert_relative_eq!(snapshot.potential_at(0.).unwrap(), 0.);
    assert_relative_eq!(snapshot.potential_at(5.).unwrap(), 1., max_relative = 1e-10);
}
