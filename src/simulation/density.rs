//! Mass density on a regular periodic grid
//!
//! The box `[0, domain_size)^D` is split into `ngrid` cells per axis. Masses
//! are assigned either to the nearest grid point (NGP) or shared between the
//! 2^D neighbouring cells with cloud-in-cell (CIC) weights. Values are mass
//! per unit cell volume, stored row-major with axis 0 slowest.

use log::debug;

use super::boundary::wrap1;
use super::error::{SimError, SimResult};
use super::states::ParticleSystem;

#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid<const D: usize> {
    ngrid: usize,
    domain_size: f64,
    values: Vec<f64>,
}

impl<const D: usize> DensityGrid<D> {
    fn empty(ngrid: usize, domain_size: f64) -> SimResult<Self> {
        if ngrid == 0 {
            return Err(SimError::invalid("density grid needs at least one cell per axis"));
        }
        if !(domain_size.is_finite() && domain_size > 0.0) {
            return Err(SimError::invalid(format!(
                "density grid needs a positive domain_size, got {domain_size}"
            )));
        }
        let cells = ngrid
            .checked_pow(D as u32)
            .ok_or_else(|| SimError::invalid(format!("density grid of {ngrid}^{D} cells is too large")))?;
        Ok(Self {
            ngrid,
            domain_size,
            values: vec![0.0; cells],
        })
    }

    pub fn nearest_grid_point(sys: &ParticleSystem<D>, ngrid: usize, domain_size: f64) -> SimResult<Self> {
        let mut grid = Self::empty(ngrid, domain_size)?;
        let h = grid.cell_size();

        for (x, m) in sys.positions().iter().zip(sys.masses()) {
            let mut idx = [0usize; D];
            for (k, c) in x.iter().enumerate() {
                let cell = (wrap1(*c, domain_size) / h).floor() as usize;
                idx[k] = cell.min(ngrid - 1);
            }
            let flat = grid.flat_index(&idx);
            grid.values[flat] += m;
        }

        grid.scale_to_density();
        debug!("NGP deposit of {} particles on {}^{} grid", sys.len(), ngrid, D);
        Ok(grid)
    }

    pub fn cloud_in_cell(sys: &ParticleSystem<D>, ngrid: usize, domain_size: f64) -> SimResult<Self> {
        let mut grid = Self::empty(ngrid, domain_size)?;
        let h = grid.cell_size();

        for (x, m) in sys.positions().iter().zip(sys.masses()) {
            // lower neighbour cell and the weight of the upper one, per axis
            let mut lower = [0usize; D];
            let mut upper_w = [0.0f64; D];
            for (k, c) in x.iter().enumerate() {
                // cell centres sit at (i + 1/2) h
                let u = wrap1(*c, domain_size) / h - 0.5;
                let i0 = u.floor();
                upper_w[k] = u - i0;
                lower[k] = (i0 as i64).rem_euclid(ngrid as i64) as usize;
            }

            for corner in 0..(1usize << D) {
                let mut idx = [0usize; D];
                let mut w = 1.0;
                for k in 0..D {
                    if corner & (1 << k) != 0 {
                        idx[k] = (lower[k] + 1) % ngrid;
                        w *= upper_w[k];
                    } else {
                        idx[k] = lower[k];
                        w *= 1.0 - upper_w[k];
                    }
                }
                let flat = grid.flat_index(&idx);
                grid.values[flat] += w * m;
            }
        }

        grid.scale_to_density();
        debug!("CIC deposit of {} particles on {}^{} grid", sys.len(), ngrid, D);
        Ok(grid)
    }

    pub fn ngrid(&self) -> usize {
        self.ngrid
    }

    pub fn cell_size(&self) -> f64 {
        self.domain_size / self.ngrid as f64
    }

    pub fn cell_volume(&self) -> f64 {
        self.cell_size().powi(D as i32)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn get(&self, idx: [usize; D]) -> Option<f64> {
        if idx.iter().any(|&i| i >= self.ngrid) {
            return None;
        }
        Some(self.values[self.flat_index(&idx)])
    }

    /// Mass recovered by integrating density over the grid
    pub fn total_mass(&self) -> f64 {
        self.values.iter().sum::<f64>() * self.cell_volume()
    }

    /// Sum of density along the last axis, i.e. the 3D to 2D collapse.
    /// Row-major over the remaining axes; length `ngrid^(D-1)`.
    pub fn project(&self) -> Vec<f64> {
        self.values
            .chunks(self.ngrid)
            .map(|column| column.iter().sum())
            .collect()
    }

    fn flat_index(&self, idx: &[usize; D]) -> usize {
        idx.iter().fold(0, |flat, &i| flat * self.ngrid + i)
    }

    fn scale_to_density(&mut self) {
        let inv_vol = self.cell_volume().recip();
        for v in self.values.iter_mut() {
            *v *= inv_vol;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::states::{NVec2, NVec3, System2, System3};
    use approx::assert_relative_eq;

    fn at_rest2(xs: &[(f64, f64)], m: f64) -> System2 {
        System2::new(
            xs.iter().map(|&(a, b)| NVec2::new(a, b)).collect(),
            vec![NVec2::zeros(); xs.len()],
            vec![m; xs.len()],
        )
        .unwrap()
    }

    #[test]
    fn ngp_puts_mass_in_one_cell() {
        let sys = at_rest2(&[(0.3, 0.8), (-0.7, 1.8)], 2.0);
        let grid = DensityGrid::nearest_grid_point(&sys, 4, 1.0).unwrap();
        // both particles land in cell (1, 3) after wrapping
        assert_relative_eq!(grid.get([1, 3]).unwrap(), 4.0 * 16.0, epsilon = 1e-12);
        assert_relative_eq!(grid.total_mass(), 4.0, epsilon = 1e-12);
        assert_eq!(grid.get([4, 0]), None);
    }

    #[test]
    fn cic_splits_between_neighbours() {
        // exactly on the face between cells 0 and 1 along x, centred along y
        let sys = at_rest2(&[(0.5, 0.25)], 1.0);
        let grid = DensityGrid::cloud_in_cell(&sys, 2, 1.0).unwrap();
        let vol = grid.cell_volume();
        assert_relative_eq!(grid.get([0, 0]).unwrap() * vol, 0.5, epsilon = 1e-12);
        assert_relative_eq!(grid.get([1, 0]).unwrap() * vol, 0.5, epsilon = 1e-12);
        assert_relative_eq!(grid.get([0, 1]).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn cic_wraps_across_the_edge() {
        let sys = at_rest2(&[(0.05, 0.5)], 1.0);
        let grid = DensityGrid::cloud_in_cell(&sys, 5, 1.0).unwrap();
        let vol = grid.cell_volume();
        // u = 0.25 - 0.5 = -0.25: 0.75 goes to cell 0, 0.25 wraps to cell 4
        assert_relative_eq!(grid.get([0, 2]).unwrap() * vol, 0.75, epsilon = 1e-12);
        assert_relative_eq!(grid.get([4, 2]).unwrap() * vol, 0.25, epsilon = 1e-12);
        assert_relative_eq!(grid.total_mass(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn projection_collapses_last_axis() {
        let sys = System3::new(
            vec![NVec3::new(0.1, 0.1, 0.1), NVec3::new(0.1, 0.1, 0.9)],
            vec![NVec3::zeros(); 2],
            vec![1.0, 1.0],
        )
        .unwrap();
        let grid = DensityGrid::nearest_grid_point(&sys, 2, 1.0).unwrap();
        let proj = grid.project();
        assert_eq!(proj.len(), 4);
        assert_relative_eq!(proj[0], 2.0 * 8.0, epsilon = 1e-12);
        assert_relative_eq!(proj[1..].iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn rejects_bad_grid() {
        let sys = at_rest2(&[(0.0, 0.0)], 1.0);
        assert!(DensityGrid::nearest_grid_point(&sys, 0, 1.0).is_err());
        assert!(DensityGrid::cloud_in_cell(&sys, 4, -1.0).is_err());
    }

    #[test]
    fn rejects_overflowing_grid() {
        let sys = at_rest2(&[(0.0, 0.0)], 1.0);
        let err = DensityGrid::nearest_grid_point(&sys, usize::MAX, 1.0).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));

        let sys3 = System3::new(vec![NVec3::zeros()], vec![NVec3::zeros()], vec![1.0]).unwrap();
        assert!(DensityGrid::cloud_in_cell(&sys3, 1 << 22, 1.0).is_err());
    }
}
