//! Generic write helpers over a SeaORM entity.

use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel};
use std::marker::PhantomData;

/// Thin wrapper around a connection for one entity.
///
/// Domain repositories hold one of these and build their own read queries on
/// top of [`db`](Self::db).
///
/// ```ignore
/// pub struct PgUserRepository {
///     base: BaseRepository<entity::Entity>,
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BaseRepository<E> {
    db: DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<E> BaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel: Send,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn insert(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.insert(&self.db).await
    }

    /// Fails with [`DbErr::RecordNotUpdated`] when no row matches the key.
    pub async fn update(&self, model: E::ActiveModel) -> Result<E::Model, DbErr> {
        model.update(&self.db).await
    }
}
