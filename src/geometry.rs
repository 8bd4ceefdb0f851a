//! Discretized interfacial axes and quadrature rules.
use ndarray::{Array1, Array2, ArrayView1};
use std::f64::consts::PI;

/// Legendre polynomial values `(P_n(x), P_{n-1}(x))` by the three term
/// recurrence.
fn legendre(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    let mut p0 = 1.0;
    let mut p1 = x;
    for k in 2..=n {
        let p2 = ((2 * k - 1) as f64 * x * p1 - (k - 1) as f64 * p0) / k as f64;
        p0 = p1;
        p1 = p2;
    }
    (p1, p0)
}

/// Legendre-Gauss-Lobatto nodes and quadrature weights on [-1, 1] in
/// ascending order.
fn lobatto(points: usize) -> (Array1<f64>, Array1<f64>) {
    let n = points - 1;
    let np = points as f64;
    let mut nodes = Array1::zeros(points);
    let mut weights = Array1::zeros(points);
    for i in 0..points {
        let mut x = if i == 0 {
            -1.0
        } else if i == n {
            1.0
        } else {
            // Chebyshev-Gauss-Lobatto initial guess
            -(PI * i as f64 / n as f64).cos()
        };
        if i > 0 && i < n {
            for _ in 0..100 {
                let (pn, pn1) = legendre(n, x);
                let dx = (x * pn - pn1) / (np * pn);
                x -= dx;
                if dx.abs() < 1e-15 {
                    break;
                }
            }
        }
        let (pn, _) = legendre(n, x);
        nodes[i] = x;
        weights[i] = 2.0 / (n as f64 * np * pn * pn);
    }
    (nodes, weights)
}

/// Gauss-Legendre nodes and weights on [-1, 1] in ascending order.
pub fn gauss_legendre(points: usize) -> (Array1<f64>, Array1<f64>) {
    let m = points as f64;
    let mut nodes = Array1::zeros(points);
    let mut weights = Array1::zeros(points);
    for i in 0..points {
        let mut x = (PI * (i as f64 + 0.75) / (m + 0.5)).cos();
        let mut dp = 1.0;
        for _ in 0..100 {
            let (pm, pm1) = legendre(points, x);
            dp = m * (x * pm - pm1) / (x * x - 1.0);
            let dx = pm / dp;
            x -= dx;
            if dx.abs() < 1e-15 {
                break;
            }
        }
        nodes[points - 1 - i] = x;
        weights[points - 1 - i] = 2.0 / ((1.0 - x * x) * dp * dp);
    }
    (nodes, weights)
}

/// Orthogonal collocation axis on Legendre-Gauss-Lobatto nodes.
///
/// Nodes, quadrature weights and differentiation matrices are built once on
/// the reference interval [-1, 1]; a physical domain of length `L` is
/// obtained by linear rescaling, so the same axis is reused across domain
/// extensions. Derivatives scale with `2/L` per order and integrals with
/// `L/2`.
#[derive(Clone)]
pub struct CollocationAxis {
    nodes: Array1<f64>,
    weights: Array1<f64>,
    d1: Array2<f64>,
    d2: Array2<f64>,
}

impl CollocationAxis {
    pub fn new(points: usize) -> Self {
        let (nodes, weights) = lobatto(points);
        let n = (points - 1) as f64;
        let pn: Vec<f64> = nodes.iter().map(|&x| legendre(points - 1, x).0).collect();
        let mut d1 = Array2::zeros((points, points));
        for i in 0..points {
            for j in 0..points {
                if i != j {
                    d1[(i, j)] = pn[i] / (pn[j] * (nodes[i] - nodes[j]));
                }
            }
        }
        d1[(0, 0)] = -n * (n + 1.0) / 4.0;
        d1[(points - 1, points - 1)] = n * (n + 1.0) / 4.0;
        let d2 = d1.dot(&d1);
        Self {
            nodes,
            weights,
            d1,
            d2,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Physical node positions for a domain of the given length.
    pub fn grid(&self, length: f64) -> Array1<f64> {
        self.nodes.mapv(|x| 0.5 * (x + 1.0) * length)
    }

    /// Quadrature weights on the reference interval.
    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    /// First derivative matrix on the reference interval.
    pub fn d1(&self) -> &Array2<f64> {
        &self.d1
    }

    /// Second derivative matrix on the reference interval.
    pub fn d2(&self) -> &Array2<f64> {
        &self.d2
    }
}

/// Uniform finite difference axis of fixed length.
#[derive(Clone)]
pub struct UniformAxis {
    grid: Array1<f64>,
    step: f64,
}

impl UniformAxis {
    pub fn new(points: usize, length: f64) -> Self {
        Self {
            grid: Array1::linspace(0.0, length, points),
            step: length / (points - 1) as f64,
        }
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn grid(&self) -> &Array1<f64> {
        &self.grid
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Fourth order end-corrected trapezoidal weights.
    pub fn integration_weights(&self) -> Array1<f64> {
        let m = self.grid.len();
        let mut weights = Array1::ones(m);
        if m < 6 {
            weights[0] = 0.5;
            weights[m - 1] = 0.5;
        } else {
            weights[0] = 3.0 / 8.0;
            weights[1] = 7.0 / 6.0;
            weights[2] = 23.0 / 24.0;
            weights[m - 3] = 23.0 / 24.0;
            weights[m - 2] = 7.0 / 6.0;
            weights[m - 1] = 3.0 / 8.0;
        }
        weights * self.step
    }

    /// Central difference gradient, one-sided at the ends.
    pub fn gradient(&self, values: ArrayView1<f64>) -> Array1<f64> {
        let m = values.len();
        let h = self.step;
        let mut gradient = Array1::zeros(m);
        gradient[0] = (-3.0 * values[0] + 4.0 * values[1] - values[2]) / (2.0 * h);
        for k in 1..m - 1 {
            gradient[k] = (values[k + 1] - values[k - 1]) / (2.0 * h);
        }
        gradient[m - 1] = (3.0 * values[m - 1] - 4.0 * values[m - 2] + values[m - 3]) / (2.0 * h);
        gradient
    }
}
