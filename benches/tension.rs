//! Benchmarks for the interfacial tension solvers on a synthetic
//! double well free energy model.
use criterion::{criterion_group, criterion_main, Criterion};
use ndarray::{arr1, Array1, Array2};
use sgt::{
    solve_bvp, solve_pure, solve_relaxation, BulkEquilibrium, InfluenceMatrix,
    ProfileInitialization, SgtOptions, ThermodynamicOracle,
};

struct DoubleWell {
    a: Vec<f64>,
    rho_v: Vec<f64>,
    rho_l: Vec<f64>,
}

impl ThermodynamicOracle for DoubleWell {
    fn components(&self) -> usize {
        self.a.len()
    }

    fn chemical_potential(&self, density: &Array1<f64>, _: f64) -> Array1<f64> {
        Array1::from_shape_fn(self.a.len(), |i| {
            let (v, l, rho) = (self.rho_v[i], self.rho_l[i], density[i]);
            2.0 * self.a[i] * (rho - v) * (l - rho) * (l + v - 2.0 * rho)
        })
    }

    fn helmholtz_energy_density(&self, density: &Array1<f64>, _: f64) -> f64 {
        (0..self.a.len())
            .map(|i| {
                let dv = density[i] - self.rho_v[i];
                let dl = self.rho_l[i] - density[i];
                self.a[i] * dv * dv * dl * dl
            })
            .sum()
    }

    fn pressure(&self, density: &Array1<f64>, temperature: f64) -> f64 {
        density.dot(&self.chemical_potential(density, temperature))
            - self.helmholtz_energy_density(density, temperature)
    }
}

fn pure(c: &mut Criterion) {
    let oracle = DoubleWell {
        a: vec![1.0],
        rho_v: vec![0.2],
        rho_l: vec![0.8],
    };
    let options = SgtOptions::pure_fluid();
    c.bench_function("pure_tension", |b| {
        b.iter(|| solve_pure(0.8, 0.2, 1.0, 0.0, 2.0, &oracle, &options).unwrap())
    });
}

fn mixture(c: &mut Criterion) {
    let oracle = DoubleWell {
        a: vec![1.0, 1.2],
        rho_v: vec![0.1, 0.15],
        rho_l: vec![0.7, 0.9],
    };
    let eq = BulkEquilibrium::new(arr1(&[0.1, 0.15]), arr1(&[0.7, 0.9]), 1.0, 0.0).unwrap();
    let mut beta = Array2::zeros((2, 2));
    beta[(0, 1)] = 0.4;
    beta[(1, 0)] = 0.4;
    let influence = InfluenceMatrix::new(&arr1(&[1.0, 1.2]), &beta).unwrap();

    let bvp_options = SgtOptions::collocation()
        .node_count(32)
        .tension_tolerance(1e-2);
    c.bench_function("collocation_binary", |b| {
        b.iter(|| {
            solve_bvp(
                &eq,
                &oracle,
                &influence,
                ProfileInitialization::Tanh,
                &bvp_options,
            )
            .unwrap()
        })
    });

    let relaxation_options = SgtOptions::relaxation().node_count(101).time_step(0.2);
    c.bench_function("relaxation_binary", |b| {
        b.iter(|| {
            solve_relaxation(
                &eq,
                &oracle,
                &influence,
                ProfileInitialization::Tanh,
                &relaxation_options,
            )
            .unwrap()
        })
    });
}

criterion_group!(benches, pure, mixture);
criterion_main!(benches);
