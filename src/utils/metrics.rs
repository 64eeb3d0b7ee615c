use crate::error::{Error, Result};
use crate::models::Prediction;

/// Root mean squared error between true ratings and estimates.
pub fn rmse(predictions: &[Prediction]) -> Result<f64> {
    Ok(mse(predictions)?.sqrt())
}

/// Mean squared error between true ratings and estimates.
pub fn mse(predictions: &[Prediction]) -> Result<f64> {
    if predictions.is_empty() {
        return Err(Error::Configuration("prediction list is empty".to_owned()));
    }

    let sum: f64 = predictions
        .iter()
        .map(|p| (p.r_ui - p.est).powi(2))
        .sum();
    Ok(sum / predictions.len() as f64)
}

/// Mean absolute error between true ratings and estimates.
pub fn mae(predictions: &[Prediction]) -> Result<f64> {
    if predictions.is_empty() {
        return Err(Error::Configuration("prediction list is empty".to_owned()));
    }

    let sum: f64 = predictions.iter().map(|p| (p.r_ui - p.est).abs()).sum();
    Ok(sum / predictions.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn predictions() -> Vec<Prediction> {
        vec![
            Prediction::new("u1", "i1", 3.0, 4.0),
            Prediction::new("u2", "i1", 5.0, 3.0),
        ]
    }

    #[test]
    fn mse_and_rmse_agree() {
        let predictions = predictions();
        let mse = mse(&predictions).unwrap();
        assert!((mse - 2.5).abs() < 1e-12);
        assert!((rmse(&predictions).unwrap() - mse.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn mae_averages_absolute_errors() {
        assert!((mae(&predictions()).unwrap() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn empty_prediction_list_is_an_error() {
        assert!(matches!(rmse(&[]), Err(Error::Configuration(_))));
        assert!(matches!(mae(&[]), Err(Error::Configuration(_))));
    }
}
