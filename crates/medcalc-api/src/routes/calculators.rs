use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};

use medcalc_calculators::form::{CORRECT_ERRORS_ALERT, FormController};
use medcalc_calculators::{all_calculators, require_calculator};
use medcalc_core::bands::Band;
use medcalc_core::field::FieldSpec;
use medcalc_core::result::ScoreResult;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CalculatorSummary {
    id: String,
    name: String,
    description: String,
}

#[derive(Serialize)]
pub struct CalculatorDetail {
    id: String,
    name: String,
    description: String,
    reference: String,
    fields: Vec<FieldSpec>,
    bands: Vec<Band>,
}

#[derive(Deserialize)]
pub struct CalculateRequest {
    #[serde(default)]
    values: BTreeMap<String, String>,
}

#[derive(Serialize)]
pub struct CalculateResponse {
    result: ScoreResult,
    summary: String,
}

pub async fn list_calculators() -> Json<Vec<CalculatorSummary>> {
    let calculators: Vec<CalculatorSummary> = all_calculators()
        .iter()
        .map(|c| CalculatorSummary {
            id: c.id().to_string(),
            name: c.name().to_string(),
            description: c.description().to_string(),
        })
        .collect();
    Json(calculators)
}

pub async fn get_calculator_detail(
    Path(id): Path<String>,
) -> Result<Json<CalculatorDetail>, ApiError> {
    let calculator = require_calculator(&id)?;

    Ok(Json(CalculatorDetail {
        id: calculator.id().to_string(),
        name: calculator.name().to_string(),
        description: calculator.description().to_string(),
        reference: calculator.reference().to_string(),
        fields: calculator.fields().to_vec(),
        bands: calculator.bands().bands.clone(),
    }))
}

pub async fn calculate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<CalculateRequest>,
) -> Result<Json<CalculateResponse>, ApiError> {
    let calculator = require_calculator(&id)?;
    let mut form = FormController::new(calculator, state.form_options);
    for (name, raw) in request.values {
        form.set_field(&name, raw)?;
    }

    let Some(result) = form.calculate().cloned() else {
        tracing::info!(
            calculator = %id,
            errors = form.errors().len(),
            "calculation rejected"
        );
        return Err(ApiError::Invalid {
            alert: form.alert().unwrap_or(CORRECT_ERRORS_ALERT).to_string(),
            errors: form.errors().errors.clone(),
        });
    };

    let summary = form.calculator().render_summary(&result);
    Ok(Json(CalculateResponse { result, summary }))
}
