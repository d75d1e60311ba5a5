use std::collections::HashMap;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use sea_orm::{ActiveModelBehavior, EntityTrait, IntoActiveModel};
use serde::Serialize;
use serde_json::{json, Value};
use shelter_common::Resource;

use crate::adapter::cmd::SaveCmd;
use crate::adapter::{Envelope, ResponseSuccess};
use crate::config::AppState;
use crate::error::{parse_id, AppError, AppJson};
use crate::repo::sea::{RecordOf, SeaRepo};
use crate::service::ListingService;

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "available" }))
}

pub async fn create_record<C>(
    State(state): State<AppState>,
    AppJson(cmd): AppJson<C>,
) -> Result<(StatusCode, Json<RecordOf<C::Active>>), AppError>
where
    C: SaveCmd,
    RecordOf<C::Active>: IntoActiveModel<C::Active> + Serialize,
{
    let mut active = <C::Active as ActiveModelBehavior>::new();
    cmd.apply(&mut active);
    let record = SeaRepo::insert_one(&state.conn, active).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn get_record<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<E::Model>, AppError>
where
    E: Resource + EntityTrait,
    E::Model: Serialize,
{
    let id = parse_id(&id)?;
    Ok(Json(SeaRepo::get_by_id::<E>(&state.conn, id).await?))
}

pub async fn list_records<E>(
    State(state): State<AppState>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Envelope<E::Model>, AppError>
where
    E: Resource + EntityTrait,
    E::Model: Serialize,
{
    let Query(query) = query?;
    let listing = ListingService::new(state.conn.as_ref(), state.listing)
        .with_cancel(state.shutdown.child_token())
        .list::<E>(&query)
        .await?;
    Ok(Envelope::new(E::PLURAL, listing))
}

pub async fn update_record<C>(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(cmd): AppJson<C>,
) -> Result<ResponseSuccess, AppError>
where
    C: SaveCmd,
    <C::Active as sea_orm::ActiveModelTrait>::Entity: Resource,
    RecordOf<C::Active>: IntoActiveModel<C::Active>,
{
    let id = parse_id(&id)?;
    SeaRepo::update_by_id(&state.conn, id, |active: &mut C::Active| cmd.apply(active)).await?;
    Ok(ResponseSuccess::default())
}

pub async fn delete_record<E>(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ResponseSuccess, AppError>
where
    E: Resource + EntityTrait,
{
    let id = parse_id(&id)?;
    SeaRepo::delete_by_id::<E>(&state.conn, id).await?;
    Ok(ResponseSuccess::default())
}
