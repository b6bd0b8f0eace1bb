use crate::models::{CarFeatures, FEATURE_NAMES};
use serde::Serialize;
use std::path::Path;
use tract_onnx::prelude::*;

const INPUT_SHAPE: [usize; 2] = [1, FEATURE_NAMES.len()];

/// Regressor loaded once at startup and shared read-only between workers.
pub struct PriceModel {
    plan: SimplePlan<TypedFact, Box<dyn TypedOp>, Graph<TypedFact, Box<dyn TypedOp>>>,
    path: String,
}

impl PriceModel {
    pub fn load<P: AsRef<Path>>(model_path: P) -> TractResult<Self> {
        let model_path = model_path.as_ref();
        let plan = tract_onnx::onnx()
            .model_for_path(model_path)?
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(INPUT_SHAPE[0], INPUT_SHAPE[1])),
            )?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self {
            plan,
            path: model_path.display().to_string(),
        })
    }

    /// Single-row inference. The first value of the first output is the price.
    pub fn predict(&self, features: &[f32; 8]) -> TractResult<f32> {
        let input = Tensor::from_shape(&INPUT_SHAPE, &features[..])?;
        let outputs = self.plan.run(tvec!(input.into()))?;

        let price = outputs
            .first()
            .ok_or_else(|| anyhow::anyhow!("model produced no outputs"))?
            .to_array_view::<f32>()?
            .iter()
            .next()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("model output is empty"))?;

        Ok(price)
    }

    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model_path: self.path.clone(),
            input_shape: INPUT_SHAPE.to_vec(),
            features: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            defaults: CarFeatures::default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ModelInfo {
    pub model_path: String,
    pub input_shape: Vec<usize>,
    pub features: Vec<String>,
    pub defaults: CarFeatures,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/car_price_linear.onnx"
    );

    #[test]
    fn predicts_linear_fixture() {
        let model = PriceModel::load(FIXTURE).unwrap();
        let price = model
            .predict(&[3.0, 1.0, 150.0, 5.0, 100_000.0, 6.0, 2.0, 10.0])
            .unwrap();
        assert!((price - 9117.75).abs() < 1e-2, "got {}", price);
    }

    #[test]
    fn intercept_only_for_zero_input() {
        let model = PriceModel::load(FIXTURE).unwrap();
        let price = model.predict(&[0.0; 8]).unwrap();
        assert!((price - 1500.0).abs() < 1e-3, "got {}", price);
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        let model = PriceModel::load(FIXTURE).unwrap();
        let features = CarFeatures::default().to_array();
        let first = model.predict(&features).unwrap();
        for _ in 0..10 {
            assert_eq!(model.predict(&features).unwrap(), first);
        }
    }

    #[test]
    fn non_float_output_is_an_error() {
        let model = PriceModel::load(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/car_price_int64.onnx"
        ))
        .unwrap();
        assert!(model.predict(&[0.0; 8]).is_err());
    }

    #[test]
    fn missing_file_fails_to_load() {
        assert!(PriceModel::load("does/not/exist.onnx").is_err());
    }

    #[test]
    fn info_lists_features_in_order() {
        let model = PriceModel::load(FIXTURE).unwrap();
        let info = model.model_info();
        assert_eq!(info.input_shape, vec![1, 8]);
        assert_eq!(info.features[0], "vehicleType");
        assert_eq!(info.features[7], "brand");
        assert!(info.model_path.ends_with("car_price_linear.onnx"));
    }
}
