//! Linear regression on a time trend and covariates
//!
//! Fits `y = intercept + slope * t + sum(beta_j * x_j)` by ordinary least
//! squares, where `t` counts frequency steps since the first training key
//! and `x_j` are the covariate columns.
//!
//! ## When to Use
//!
//! - Data shows a linear trend
//! - Covariates are known for the forecast window
//! - Quick baseline model

use crate::error::{ForecastError, Result};
use crate::frame::{TimeFrame, TimeSeries};
use crate::models::{prediction_frame, RegressionModel};
use time_index::{Frequency, Period};

#[derive(Debug, Clone)]
struct Fitted {
    /// Intercept, slope, then one coefficient per covariate
    coefficients: Vec<f64>,
    columns: Vec<String>,
    freq: Frequency,
    origin: i64,
}

/// Ordinary least squares on an intercept, a trend and every covariate
#[derive(Debug, Clone)]
pub struct LinearRegression {
    name: String,
    fitted: Option<Fitted>,
}

impl Default for LinearRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LinearRegression {
    /// Create a new linear regression model
    pub fn new() -> Self {
        Self {
            name: "Linear Regression".to_string(),
            fitted: None,
        }
    }

    /// Intercept, slope and covariate coefficients, once fitted
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.fitted.as_ref().map(|f| f.coefficients.as_slice())
    }

    fn trend(x: &TimeFrame, freq: Frequency, origin: i64) -> Result<Vec<f64>> {
        let timestamps = x.index().timestamps().ok_or_else(|| {
            ForecastError::ModelError(format!(
                "Linear regression needs timestamp keys, got a {}",
                x.index().kind()
            ))
        })?;

        Ok(timestamps
            .iter()
            .map(|ts| (Period::containing(*ts, freq).ordinal() - origin) as f64)
            .collect())
    }

    fn design_matrix(x: &TimeFrame, columns: &[String], trend: Vec<f64>) -> Result<Vec<Vec<f64>>> {
        let mut rows: Vec<Vec<f64>> = trend.into_iter().map(|t| vec![1.0, t]).collect();

        for name in columns {
            let values = x.column_f64(name)?;
            for (row, value) in rows.iter_mut().zip(values) {
                let value = value.ok_or_else(|| {
                    ForecastError::ModelError(format!("Column '{}' contains missing values", name))
                })?;
                row.push(value);
            }
        }

        Ok(rows)
    }
}

impl RegressionModel for LinearRegression {
    fn fit(&mut self, x: &TimeFrame, y: &TimeSeries) -> Result<()> {
        let freq = x.index().freq().or_else(|| y.index().freq()).ok_or_else(|| {
            ForecastError::ModelError("Linear regression needs a frequency to build its trend".to_string())
        })?;
        let first = x
            .index()
            .timestamps()
            .and_then(|ts| ts.first())
            .ok_or_else(|| ForecastError::ModelError("No training rows".to_string()))?;
        let origin = Period::containing(*first, freq).ordinal();

        let columns = x.column_names();
        let rows = Self::design_matrix(x, &columns, Self::trend(x, freq, origin)?)?;
        let n_features = columns.len() + 2;

        if rows.len() < n_features {
            return Err(ForecastError::ModelError(format!(
                "Insufficient data for linear regression. Need at least {} observations, got {}.",
                n_features,
                rows.len()
            )));
        }

        // Normal equations: (X'X) b = X'y
        let mut xtx = vec![vec![0.0; n_features]; n_features];
        let mut xty = vec![0.0; n_features];
        for (row, target) in rows.iter().zip(y.values()) {
            for i in 0..n_features {
                xty[i] += row[i] * target;
                for j in 0..n_features {
                    xtx[i][j] += row[i] * row[j];
                }
            }
        }

        let coefficients = solve(xtx, xty)?;

        self.fitted = Some(Fitted {
            coefficients,
            columns,
            freq,
            origin,
        });

        Ok(())
    }

    fn predict(&self, x: &TimeFrame) -> Result<TimeFrame> {
        let fitted = self.fitted.as_ref().ok_or_else(|| {
            ForecastError::ModelError(format!("{} must be fitted before predicting", self.name))
        })?;

        let rows = Self::design_matrix(
            x,
            &fitted.columns,
            Self::trend(x, fitted.freq, fitted.origin)?,
        )?;

        let values = rows
            .iter()
            .map(|row| {
                row.iter()
                    .zip(&fitted.coefficients)
                    .map(|(value, coefficient)| value * coefficient)
                    .sum::<f64>()
            })
            .collect();

        prediction_frame(x, values)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Solve `a * b = rhs` by Gaussian elimination with partial pivoting
fn solve(mut a: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Result<Vec<f64>> {
    let n = rhs.len();

    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))
            .unwrap_or(col);

        if a[pivot][col].abs() < 1e-10 {
            return Err(ForecastError::ModelError(
                "Singular matrix in regression".to_string(),
            ));
        }

        a.swap(col, pivot);
        rhs.swap(col, pivot);

        let pivot_row = a[col].clone();
        let pivot_rhs = rhs[col];
        for row in col + 1..n {
            let factor = a[row][col] / pivot_row[col];
            for k in col..n {
                a[row][k] -= factor * pivot_row[k];
            }
            rhs[row] -= factor * pivot_rhs;
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[row][k] * solution[k]).sum();
        solution[row] = (rhs[row] - tail) / a[row][row];
    }

    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve() {
        let a = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
        let solution = solve(a, vec![3.0, 5.0]).unwrap();
        assert!((solution[0] - 0.8).abs() < 1e-12);
        assert!((solution[1] - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_solve_singular() {
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        assert!(solve(a, vec![1.0, 2.0]).is_err());
    }
}
