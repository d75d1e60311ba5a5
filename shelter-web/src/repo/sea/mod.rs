//! generic sea-orm repository

mod page;

pub use page::*;

use crate::repo::model::{animal, employee, food, shelter, volunteer};
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, DbConn, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, Schema,
};
use shelter_common::Resource;

pub type RecordOf<A> = <<A as ActiveModelTrait>::Entity as EntityTrait>::Model;

pub struct SeaRepo;

impl SeaRepo {
    pub async fn insert_one<A>(db: &DbConn, active: A) -> Result<RecordOf<A>, DbErr>
    where
        A: ActiveModelTrait + ActiveModelBehavior + Send,
        RecordOf<A>: IntoActiveModel<A>,
    {
        active.insert(db).await
    }

    pub async fn get_by_id<E>(db: &DbConn, id: i32) -> Result<E::Model, DbErr>
    where
        E: Resource + EntityTrait,
    {
        E::find()
            .filter(Expr::col(Alias::new(E::IDENTITY)).eq(id))
            .one(db)
            .await?
            .ok_or_else(|| not_found::<E>(id))
    }

    /// Loads the row, lets `apply` overwrite fields, then writes only the
    /// changed columns back. Nothing set means no write.
    pub async fn update_by_id<A, F>(db: &DbConn, id: i32, apply: F) -> Result<RecordOf<A>, DbErr>
    where
        A: ActiveModelTrait + ActiveModelBehavior + Send,
        A::Entity: Resource,
        RecordOf<A>: IntoActiveModel<A>,
        F: FnOnce(&mut A),
    {
        let model = Self::get_by_id::<A::Entity>(db, id).await?;
        let mut active = <RecordOf<A> as IntoActiveModel<A>>::into_active_model(model.clone());
        apply(&mut active);
        if !active.is_changed() {
            return Ok(model);
        }
        active.update(db).await
    }

    pub async fn delete_by_id<E>(db: &DbConn, id: i32) -> Result<(), DbErr>
    where
        E: Resource + EntityTrait,
    {
        let res = E::delete_many()
            .filter(Expr::col(Alias::new(E::IDENTITY)).eq(id))
            .exec(db)
            .await?;
        if res.rows_affected == 0 {
            return Err(not_found::<E>(id));
        }
        Ok(())
    }

    pub async fn create_table<E: EntityTrait>(db: &DbConn, entity: E) -> Result<(), DbErr> {
        let backend = db.get_database_backend();
        let mut stmt = Schema::new(backend).create_table_from_entity(entity);
        stmt.if_not_exists();
        db.execute(backend.build(&stmt)).await?;
        Ok(())
    }

    pub async fn create_tables(db: &DbConn) -> Result<(), DbErr> {
        Self::create_table(db, food::Entity).await?;
        Self::create_table(db, volunteer::Entity).await?;
        Self::create_table(db, animal::Entity).await?;
        Self::create_table(db, shelter::Entity).await?;
        Self::create_table(db, employee::Entity).await?;
        Ok(())
    }
}

fn not_found<E: EntityTrait>(id: i32) -> DbErr {
    DbErr::RecordNotFound(format!("{} {}", E::default().table_name(), id))
}
