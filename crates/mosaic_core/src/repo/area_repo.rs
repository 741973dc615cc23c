//! Area repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist the container record: identity assignment, owner-hint updates,
//!   cascade delete and cascade duplicate.
//! - Flush elements staged on a transient area at first persist.
//!
//! # Invariants
//! - `create_area` assigns identity exactly once; it never overwrites an
//!   existing row.
//! - Hint writes reject tags that fail registry tag validation.
//! - Delete cascades to elements via the schema's foreign key policy.

use crate::model::area::{Area, AreaId};
use crate::model::element::Element;
use crate::owner::registry::is_valid_type_tag;
use crate::repo::element_repo::parse_element_row;
use crate::repo::{RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

/// Repository interface for content-area persistence.
pub trait AreaRepository {
    /// Persists a transient area, assigning identity and flushing staged
    /// elements. Returns the persisted read model.
    fn create_area(&self, area: &Area) -> RepoResult<Area>;
    /// Loads one area by id.
    fn get_area(&self, id: AreaId) -> RepoResult<Option<Area>>;
    /// Writes a corrected owner-type hint onto one area.
    fn update_owner_hint(&self, id: AreaId, hint: &str) -> RepoResult<()>;
    /// Deletes one area; child elements cascade away with it.
    fn delete_area(&self, id: AreaId) -> RepoResult<()>;
    /// Copies one area and its elements under fresh identities.
    fn duplicate_area(&self, id: AreaId) -> RepoResult<Area>;
}

/// SQLite-backed area repository.
pub struct SqliteAreaRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAreaRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AreaRepository for SqliteAreaRepository<'_> {
    fn create_area(&self, area: &Area) -> RepoResult<Area> {
        if let Some(hint) = area.hint_tag() {
            if !is_valid_type_tag(hint) {
                return Err(RepoError::InvalidHint(hint.to_string()));
            }
        }

        let uuid = area.uuid.unwrap_or_else(Uuid::new_v4);
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO content_areas (uuid, owner_type_hint) VALUES (?1, ?2);",
            params![uuid.to_string(), area.hint_tag()],
        )?;

        for element in &area.staged_elements {
            insert_element(&tx, uuid, element)?;
        }

        tx.commit()?;
        info!(
            "event=area_create module=repo status=ok area={uuid} elements={}",
            area.staged_elements.len()
        );

        let mut persisted = Area::with_id(uuid);
        persisted.owner_type_hint = area.hint_tag().map(str::to_string);
        Ok(persisted)
    }

    fn get_area(&self, id: AreaId) -> RepoResult<Option<Area>> {
        let row = self
            .conn
            .query_row(
                "SELECT uuid, owner_type_hint FROM content_areas WHERE uuid = ?1;",
                [id.to_string()],
                |row| {
                    Ok((
                        row.get::<_, String>("uuid")?,
                        row.get::<_, Option<String>>("owner_type_hint")?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((uuid_text, hint)) => {
                let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
                    RepoError::InvalidData(format!(
                        "invalid uuid value `{uuid_text}` in content_areas.uuid"
                    ))
                })?;
                let mut area = Area::with_id(uuid);
                area.owner_type_hint = hint;
                Ok(Some(area))
            }
            None => Ok(None),
        }
    }

    fn update_owner_hint(&self, id: AreaId, hint: &str) -> RepoResult<()> {
        let normalized = hint.trim();
        if !is_valid_type_tag(normalized) {
            return Err(RepoError::InvalidHint(hint.to_string()));
        }

        let changed = self.conn.execute(
            "UPDATE content_areas
             SET
                owner_type_hint = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?2;",
            params![normalized, id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::AreaNotFound(id));
        }

        info!("event=owner_hint_update module=repo status=ok area={id} tag={normalized}");
        Ok(())
    }

    fn delete_area(&self, id: AreaId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM content_areas WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::AreaNotFound(id));
        }

        info!("event=area_delete module=repo status=ok area={id}");
        Ok(())
    }

    fn duplicate_area(&self, id: AreaId) -> RepoResult<Area> {
        let source = self.get_area(id)?.ok_or(RepoError::AreaNotFound(id))?;

        let mut stmt = self.conn.prepare(
            "SELECT uuid, area_uuid, element_type, title, content, sort_order
             FROM elements
             WHERE area_uuid = ?1
             ORDER BY sort_order ASC, uuid ASC;",
        )?;
        let mut rows = stmt.query([id.to_string()])?;
        let mut elements = Vec::new();
        while let Some(row) = rows.next()? {
            elements.push(parse_element_row(row)?);
        }

        let copy_uuid = Uuid::new_v4();
        let tx = self.conn.unchecked_transaction()?;

        // The hint is carried as-is; resolution corrects it if the copy ends
        // up hosted elsewhere.
        tx.execute(
            "INSERT INTO content_areas (uuid, owner_type_hint) VALUES (?1, ?2);",
            params![copy_uuid.to_string(), source.hint_tag()],
        )?;

        for element in &elements {
            let mut copy = element.clone();
            copy.uuid = Uuid::new_v4();
            insert_element(&tx, copy_uuid, &copy)?;
        }

        tx.commit()?;
        info!(
            "event=area_duplicate module=repo status=ok source={id} copy={copy_uuid} elements={}",
            elements.len()
        );

        let mut persisted = Area::with_id(copy_uuid);
        persisted.owner_type_hint = source.owner_type_hint.clone();
        Ok(persisted)
    }
}

fn insert_element(conn: &Connection, area_uuid: AreaId, element: &Element) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO elements (uuid, area_uuid, element_type, title, content, sort_order)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        params![
            element.uuid.to_string(),
            area_uuid.to_string(),
            element.element_type.as_str(),
            element.title.as_str(),
            element.content.as_str(),
            element.sort_order,
        ],
    )?;
    Ok(())
}
