use crate::error::ApiError;
use serde::Serialize;

/// Query parameter names in the order the model expects them.
pub const FEATURE_NAMES: [&str; 8] = [
    "vehicleType",
    "gearbox",
    "powerPS",
    "model",
    "kilometer",
    "monthOfRegistration",
    "fuelType",
    "brand",
];

/// Largest magnitude an integer feature can have and still reach the model
/// unchanged as `f32`.
pub const MAX_EXACT_FEATURE: i64 = 1 << f32::MANTISSA_DIGITS;

/// Parameters of `/predictCarPrice`. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CarQuery {
    pub vehicle_type: Option<i64>,
    pub gearbox: Option<i64>,
    pub power_ps: Option<i64>,
    pub model: Option<i64>,
    pub kilometer: Option<i64>,
    pub month_of_registration: Option<i64>,
    pub fuel_type: Option<i64>,
    pub brand: Option<i64>,
}

impl CarQuery {
    /// Builds the query from decoded `name=value` pairs. Only the first
    /// occurrence of a name counts; its value is trimmed and must be an
    /// integer within `MAX_EXACT_FEATURE`.
    pub fn from_pairs(pairs: &[(String, String)]) -> Result<Self, ApiError> {
        let field = |name: &str| -> Result<Option<i64>, ApiError> {
            pairs
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| parse_feature(name, value))
                .transpose()
        };

        Ok(CarQuery {
            vehicle_type: field("vehicleType")?,
            gearbox: field("gearbox")?,
            power_ps: field("powerPS")?,
            model: field("model")?,
            kilometer: field("kilometer")?,
            month_of_registration: field("monthOfRegistration")?,
            fuel_type: field("fuelType")?,
            brand: field("brand")?,
        })
    }

    /// Fills every absent parameter from `defaults`.
    pub fn with_defaults(&self, defaults: &CarFeatures) -> CarFeatures {
        CarFeatures {
            vehicle_type: self.vehicle_type.unwrap_or(defaults.vehicle_type),
            gearbox: self.gearbox.unwrap_or(defaults.gearbox),
            power_ps: self.power_ps.unwrap_or(defaults.power_ps),
            model: self.model.unwrap_or(defaults.model),
            kilometer: self.kilometer.unwrap_or(defaults.kilometer),
            month_of_registration: self
                .month_of_registration
                .unwrap_or(defaults.month_of_registration),
            fuel_type: self.fuel_type.unwrap_or(defaults.fuel_type),
            brand: self.brand.unwrap_or(defaults.brand),
        }
    }
}

fn parse_feature(name: &str, value: &str) -> Result<i64, ApiError> {
    let parsed: i64 = value.trim().parse().map_err(|e| {
        ApiError::InvalidQuery(format!("{} must be an integer, got {:?}: {}", name, value, e))
    })?;
    if !(-MAX_EXACT_FEATURE..=MAX_EXACT_FEATURE).contains(&parsed) {
        return Err(ApiError::InvalidQuery(format!(
            "{} must be within +/-{}, got {}",
            name, MAX_EXACT_FEATURE, parsed
        )));
    }
    Ok(parsed)
}

/// A fully resolved vehicle description. Categorical fields hold the label
/// codes the regressor was trained on.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CarFeatures {
    pub vehicle_type: i64,
    pub gearbox: i64,
    #[serde(rename = "powerPS")]
    pub power_ps: i64,
    pub model: i64,
    pub kilometer: i64,
    pub month_of_registration: i64,
    pub fuel_type: i64,
    pub brand: i64,
}

impl Default for CarFeatures {
    /// Fallbacks for omitted query parameters: the first label code for
    /// categorical fields, typical values for the numeric ones.
    fn default() -> Self {
        CarFeatures {
            vehicle_type: 0,
            gearbox: 0,
            power_ps: 105,
            model: 0,
            kilometer: 150_000,
            month_of_registration: 6,
            fuel_type: 0,
            brand: 0,
        }
    }
}

impl CarFeatures {
    /// Model input row. Exact as long as every field stays within
    /// `MAX_EXACT_FEATURE`, which `CarQuery::from_pairs` enforces.
    pub fn to_array(&self) -> [f32; 8] {
        [
            self.vehicle_type as f32,
            self.gearbox as f32,
            self.power_ps as f32,
            self.model as f32,
            self.kilometer as f32,
            self.month_of_registration as f32,
            self.fuel_type as f32,
            self.brand as f32,
        ]
    }
}

/// Renders a prediction the way `/predictCarPrice` returns it.
pub fn format_price(price: f32) -> String {
    format!("Predicted price = {:.2}", f64::from(price))
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: &str) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.to_string()),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
