//! Softened Newtonian gravity, direct n^2 summation
//!
//! Every unordered pair (i, j) with i < j is visited once and the equal and
//! opposite contributions are applied to both bodies, so the net internal
//! force is zero up to rounding.

use super::params::SimulationConfig;
use super::states::NVec;

/// Pairwise gravity with Plummer softening
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub g: f64,    // gravitational constant
    pub eps2: f64, // softening length squared
}

impl NewtonianGravity {
    pub fn from_config(cfg: &SimulationConfig) -> Self {
        Self {
            g: cfg.gravitational_constant,
            eps2: cfg.eps2(),
        }
    }

    /// Overwrite `out[i]` with the total acceleration on body i
    pub fn accelerations<const D: usize>(&self, x: &[NVec<D>], m: &[f64], out: &mut [NVec<D>]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec::<D>::zeros();
        }

        let n = x.len();
        if n == 0 { // no bodies, return
            return;
        }

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            let xi = x[i]; // position of body i
            let mi = m[i]; // mass of body i

            for j in (i + 1)..n {
                // r points from i to j: i is pulled along +r, j along -r
                let r = x[j] - xi;

                // Softened squared distance: d2 = |r|^2 + s^2
                let d2 = r.dot(&r) + self.eps2;
                if d2 == 0.0 {
                    // coincident points with zero softening exert no net pull
                    continue;
                }

                // 1 / |r_soft|
                let inv_r = d2.sqrt().recip();

                // coef = G / |r_soft|^3
                let coef = self.g * inv_r * inv_r * inv_r;

                // a_i +=  G m_j r / |r_soft|^3 (toward j)
                out[i] += coef * m[j] * r;

                // a_j += -G m_i r / |r_soft|^3 (toward i)
                out[j] -= coef * mi * r;
            }
        }
    }

    /// Softened potential energy, summed over unordered pairs
    pub fn potential<const D: usize>(&self, x: &[NVec<D>], m: &[f64]) -> f64 {
        let n = x.len();
        let mut u = 0.0;
        for i in 0..n {
            for j in (i + 1)..n {
                let r = x[j] - x[i];
                let d2 = r.dot(&r) + self.eps2; // |r|^2 + s^2
                if d2 == 0.0 {
                    continue;
                }
                // u_ij = -G m_i m_j / |r_soft|
                u -= self.g * m[i] * m[j] / d2.sqrt();
            }
        }
        u
    }
}
