use crate::errors::AppError;
use crate::models::{DateQuery, PickerRequest, PickerResponse};
use crate::picker::DatePicker;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Html,
    Json,
};

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Html<String>, AppError> {
    let response = seeded(&state, query.date.as_deref());
    Ok(Html(render_index(&response)?))
}

pub async fn get_picker(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Json<PickerResponse> {
    Json(seeded(&state, query.date.as_deref()))
}

pub async fn change_picker(
    State(state): State<AppState>,
    payload: Result<Json<PickerRequest>, JsonRejection>,
) -> Result<Json<PickerResponse>, AppError> {
    let Json(request) = payload?;

    let mut birth_date = None;
    let mut picker = DatePicker::restore(state.today(), request.selection, |date: &str| {
        birth_date = Some(date.to_owned());
    });
    if let Some(change) = request.change {
        picker.apply(change);
    }

    let bounds = picker.bounds();
    let options = picker.options();
    let selection = picker.into_selection();

    Ok(Json(PickerResponse {
        selection,
        bounds,
        options,
        birth_date,
    }))
}

pub async fn healthz() -> &'static str {
    "ok"
}

fn seeded(state: &AppState, seed: Option<&str>) -> PickerResponse {
    let mut picker = DatePicker::new(state.today(), |_: &str| {});
    picker.initialize(seed);

    PickerResponse {
        selection: picker.selection().clone(),
        bounds: picker.bounds(),
        options: picker.options(),
        birth_date: None,
    }
}
