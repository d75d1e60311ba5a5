use axum::http::{Method, Uri};
use axum::response::Response;
use axum::routing::get;
use axum::{middleware, Router};
use sea_orm::{ActiveModelTrait, IntoActiveModel};
use serde::Serialize;
use shelter_common::Resource;
use tower_http::trace::TraceLayer;

use crate::adapter::cmd::animal::{AnimalSaveCmd, AnimalUpdateCmd};
use crate::adapter::cmd::employee::{EmployeeSaveCmd, EmployeeUpdateCmd};
use crate::adapter::cmd::food::{FoodSaveCmd, FoodUpdateCmd};
use crate::adapter::cmd::shelter::{ShelterSaveCmd, ShelterUpdateCmd};
use crate::adapter::cmd::volunteer::{VolunteerSaveCmd, VolunteerUpdateCmd};
use crate::adapter::cmd::SaveCmd;
use crate::adapter::http::handlers::{
    create_record, delete_record, get_record, healthz, list_records, update_record,
};
use crate::adapter::http::middleware::{request_id, request_span};
use crate::config::AppState;
use crate::error::{method_not_allowed, not_found};
use crate::repo::sea::RecordOf;

const API_PREFIX: &str = "/api/v1";

type EntityOf<C> = <<C as SaveCmd>::Active as ActiveModelTrait>::Entity;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .merge(resource_routes::<FoodSaveCmd, FoodUpdateCmd>())
        .merge(resource_routes::<VolunteerSaveCmd, VolunteerUpdateCmd>())
        .merge(resource_routes::<AnimalSaveCmd, AnimalUpdateCmd>())
        .merge(resource_routes::<ShelterSaveCmd, ShelterUpdateCmd>())
        .merge(resource_routes::<EmployeeSaveCmd, EmployeeUpdateCmd>())
        .fallback(fallback)
        .method_not_allowed_fallback(unsupported_method)
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
        .layer(middleware::from_fn(request_id))
        .with_state(state)
}

/// Collection and item routes for the resource `C` creates and `U` updates:
/// `/api/v1/{plural}` and `/api/v1/{plural}/:id`.
fn resource_routes<C, U>() -> Router<AppState>
where
    C: SaveCmd,
    U: SaveCmd<Active = C::Active>,
    EntityOf<C>: Resource,
    RecordOf<C::Active>: IntoActiveModel<C::Active> + Serialize,
{
    let collection = format!("{API_PREFIX}/{}", <EntityOf<C> as Resource>::PLURAL);
    let item = format!("{collection}/:id");
    Router::new()
        .route(
            &collection,
            get(list_records::<EntityOf<C>>).post(create_record::<C>),
        )
        .route(
            &item,
            get(get_record::<EntityOf<C>>)
                .put(update_record::<U>)
                .delete(delete_record::<EntityOf<C>>),
        )
}

async fn fallback(uri: Uri) -> Response {
    tracing::debug!(%uri, "no route");
    not_found()
}

async fn unsupported_method(method: Method, uri: Uri) -> Response {
    tracing::debug!(%method, %uri, "method not allowed");
    method_not_allowed(&method)
}
