use rand::{thread_rng, Rng};
use vlasov_mesher::{PhaseSpaceGrid, VelocityGrid, DEGREES_OF_FREEDOM};

pub fn construct_test_grid(
    domain_length: f64,
    number_of_spatial_cells: usize,
    number_of_velocity_cells: usize,
) -> PhaseSpaceGrid<f64> {
    let velocity = VelocityGrid::new(number_of_velocity_cells, 1. / number_of_velocity_cells as f64)
        .expect("Velocity grid is invalid");
    PhaseSpaceGrid::new(domain_length, number_of_spatial_cells, velocity).expect("Grid is invalid")
}

/// Coefficients drawn uniformly from `[-1, 1)`
pub fn construct_random_coefficients(grid: &PhaseSpaceGrid<f64>) -> Vec<f64> {
    let mut rng = thread_rng();
    (0..grid.number_of_coefficients())
        .map(|_| rng.gen_range(-1.0..1.0))
        .collect()
}

/// Coefficients of a spatially uniform distribution of unit density
pub fn construct_neutral_coefficients(grid: &PhaseSpaceGrid<f64>) -> Vec<f64> {
    let weight = 1. / (grid.velocity_cell_volume() * grid.number_of_velocity_cells() as f64);
    let mut values = vec![0.; grid.number_of_coefficients()];
    for cell in values.chunks_exact_mut(DEGREES_OF_FREEDOM) {
        cell[0] = weight;
    }
    values
}
