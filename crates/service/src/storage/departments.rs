use async_trait::async_trait;
use chrono::Utc;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use models::department::{self, DepartmentFields, Entity as Departments};
use models::record::{Record, ResourceFields};

use crate::errors::ServiceError;
use crate::storage::ResourceStore;

/// Relational store for departments on SeaORM.
#[derive(Clone)]
pub struct DepartmentStore {
    db: DatabaseConnection,
}

impl DepartmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResourceStore<DepartmentFields> for DepartmentStore {
    async fn insert(&self, fields: DepartmentFields) -> Result<Record<DepartmentFields>, ServiceError> {
        let now = Utc::now();
        let am = department::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(fields.name),
            description: Set(fields.description),
            version: Set(0),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let model = am.insert(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(model.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Record<DepartmentFields>>, ServiceError> {
        let found = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(found.map(Into::into))
    }

    async fn find_all(&self) -> Result<Vec<Record<DepartmentFields>>, ServiceError> {
        let rows = Departments::find()
            .order_by_asc(department::Column::CreatedAt)
            .order_by_asc(department::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Departments::find().count(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn update(
        &self,
        record: Record<DepartmentFields>,
    ) -> Result<Record<DepartmentFields>, ServiceError> {
        let now: DateTimeWithTimeZone = Utc::now().into();
        let res = Departments::update_many()
            .col_expr(department::Column::Name, Expr::value(record.fields.name.clone()))
            .col_expr(
                department::Column::Description,
                Expr::value(record.fields.description.clone()),
            )
            .col_expr(department::Column::Version, Expr::value(record.version + 1))
            .col_expr(department::Column::UpdatedAt, Expr::value(now))
            .filter(department::Column::Id.eq(record.id))
            .filter(department::Column::Version.eq(record.version))
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;

        if res.rows_affected == 0 {
            return match self.find_by_id(record.id).await? {
                Some(_) => Err(ServiceError::conflict(DepartmentFields::RESOURCE)),
                None => Err(ServiceError::not_found(DepartmentFields::RESOURCE)),
            };
        }

        self.find_by_id(record.id)
            .await?
            .ok_or_else(|| ServiceError::not_found(DepartmentFields::RESOURCE))
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, ServiceError> {
        let res = Departments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(res.rows_affected > 0)
    }

    async fn delete_all(&self) -> Result<(), ServiceError> {
        Departments::delete_many()
            .exec(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn department_store_crud_and_versioning() -> Result<(), anyhow::Error> {
        if std::env::var("SKIP_DB_TESTS").is_ok() {
            return Ok(());
        }
        let db = match get_db().await {
            Ok(db) => db,
            Err(e) => {
                eprintln!("skip: cannot connect to db: {}", e);
                return Ok(());
            }
        };
        let store = DepartmentStore::new(db);

        let name = format!("engineering_{}", Uuid::new_v4());
        let created = store
            .insert(DepartmentFields { name: name.clone(), description: "builds things".into() })
            .await?;
        assert_eq!(created.version, 0);

        let mut next = created.clone();
        next.fields.description = "builds and ships things".into();
        let updated = store.update(next).await?;
        assert_eq!(updated.version, 1);
        assert_eq!(updated.fields.name, name);

        let err = store.update(created.clone()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        assert!(store.delete_by_id(created.id).await?);
        assert!(store.find_by_id(created.id).await?.is_none());
        Ok(())
    }
}
