//! Resolves an exchange code to the stable internal security id.

use sea_orm::{ActiveValue::Set, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use shared::entity::securities;
use shared::error::IngestError;
use uuid::Uuid;

/// Look the exchange code up in the active transaction, inserting a new
/// security on first sighting. An existing row wins as-is: the stored
/// display name is not refreshed by later reports.
pub async fn resolve_or_create<C: ConnectionTrait>(
    conn: &C,
    code: &str,
    name: &str,
) -> Result<Uuid, IngestError> {
    if let Some(existing) = securities::Entity::find()
        .filter(securities::Column::Code.eq(code))
        .one(conn)
        .await?
    {
        return Ok(existing.id);
    }

    let id = Uuid::new_v4();
    let security = securities::ActiveModel {
        id: Set(id),
        code: Set(code.to_owned()),
        name: Set(name.to_owned()),
    };
    securities::Entity::insert(security).exec(conn).await?;

    Ok(id)
}
