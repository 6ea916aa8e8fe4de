use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use models::record::{Record, ResourceFields};
use models::user::{self, Entity as Users, UserFields};

use crate::errors::ServiceError;
use crate::storage::ResourceStore;

/// Relational store for users on SeaORM.
///
/// `update` issues `UPDATE .. WHERE id = ? AND version = ?` so a stale
/// caller version never wins, matching the document store's contract.
#[derive(Clone)]
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceStore<UserFields> for UserStore {
    async fn insert(&self, fields: UserFields) -> Result<Record<UserFields>, ServiceError> {
        let now = Utc::now();
        let am = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(fields.name),
            email: Set(fields.email),
            version: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let model = am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Record<UserFields>>, ServiceError> {
        let found = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(found.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Record<UserFields>>, ServiceError> {
        let rows = Users::find()
            .order_by_asc(user::Column::CreatedAt)
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Users::find().count(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(&self, record: Record<UserFields>) -> Result<Record<UserFields>, ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let res = Users::update_many()
            .col_expr(user::Column::Name, Expr::value(record.fields.name.clone()))
            .col_expr(user::Column::Email, Expr::value(record.fields.email.clone()))
            .col_expr(user::Column::Version, Expr::value(record.version + 1))
            .col_expr(user::Column::UpdatedAt, Expr::value(now))
            .filter(user::Column::Id.eq(record.id))
            .filter(user::Column::Version.eq(record.version))
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;

        if res.rows_affected == 0 {
            // Absent id and stale version both leave zero rows; a second
            // read tells them apart.
            return match self.find_by_id(record.id).await? {
                Some(_) => Err(ServiceError::conflict(UserFields::RESOURCE)),
                None => Err(ServiceError::not_found(UserFields::RESOURCE)),
            };
        }

        self.find_by_id(record.id)
            .await?
            .ok_or_else(|| ServiceError::not_found(UserFields::RESOURCE))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_all(&self) -> Result<(), ServiceError> {
        Users::delete_many().exec(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }
}
