use crate::commit::Field;
use crate::models::{CommitRequest, CountdownResponse, IndexQuery};
use crate::presenter::CommitError;
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Query, State},
    response::{Html, Redirect},
};

pub async fn index(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Html<String> {
    let flagged = flagged_fields(query.invalid.as_deref());
    let view = state.presenter.lock().await.view(state.now_ms());
    Html(render_index(&view, &flagged))
}

pub async fn get_countdown(State(state): State<AppState>) -> Json<CountdownResponse> {
    let presenter = state.presenter.lock().await;
    Json(presenter.view(state.now_ms()))
}

pub async fn commit(
    State(state): State<AppState>,
    Json(payload): Json<CommitRequest>,
) -> Result<Json<CountdownResponse>, CommitError> {
    let now = state.now_ms();
    let mut presenter = state.presenter.lock().await;
    presenter.commit(now, &payload).await?;
    Ok(Json(presenter.view(now)))
}

pub async fn commit_form(
    State(state): State<AppState>,
    Form(payload): Form<CommitRequest>,
) -> Result<Redirect, CommitError> {
    let now = state.now_ms();
    let mut presenter = state.presenter.lock().await;
    match presenter.commit(now, &payload).await {
        Ok(_) => Ok(Redirect::to("/")),
        Err(CommitError::Rejected(rejection)) => {
            Ok(Redirect::to(&format!("/?invalid={}", rejection.query())))
        }
        Err(err) => Err(err),
    }
}

fn flagged_fields(invalid: Option<&str>) -> Vec<Field> {
    let mut fields = Vec::new();
    for field in invalid.unwrap_or_default().split(',').filter_map(Field::parse) {
        if !fields.contains(&field) {
            fields.push(field);
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flagged_fields_ignores_unknown_names() {
        assert_eq!(flagged_fields(None), Vec::<Field>::new());
        assert_eq!(flagged_fields(Some("")), Vec::<Field>::new());
        assert_eq!(flagged_fields(Some("date,bogus")), vec![Field::Date]);
        assert_eq!(flagged_fields(Some("label,date")), vec![Field::Label, Field::Date]);
    }

    #[test]
    fn flagged_fields_are_listed_once() {
        assert_eq!(
            flagged_fields(Some("label,date,label,date")),
            vec![Field::Label, Field::Date]
        );
    }
}
