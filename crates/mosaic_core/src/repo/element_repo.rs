//! Element repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist individual content blocks under their area.
//! - Keep sibling ordering deterministic inside the repository boundary.
//!
//! # Invariants
//! - Area listing order is `sort_order ASC, uuid ASC`, nothing else.
//! - An element row always references an existing area (schema-enforced).

use crate::model::area::AreaId;
use crate::model::element::{Element, ElementId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const ELEMENT_SELECT_SQL: &str = "SELECT
    uuid,
    area_uuid,
    element_type,
    title,
    content,
    sort_order
FROM elements";

/// Repository interface for element persistence.
pub trait ElementRepository {
    /// Persists one element under its area.
    fn create_element(&self, element: &Element) -> RepoResult<ElementId>;
    /// Loads one element by id.
    fn get_element(&self, id: ElementId) -> RepoResult<Option<Element>>;
    /// Lists an area's elements in stored sibling order.
    fn list_for_area(&self, area_uuid: AreaId) -> RepoResult<Vec<Element>>;
}

/// SQLite-backed element repository.
pub struct SqliteElementRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteElementRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ElementRepository for SqliteElementRepository<'_> {
    fn create_element(&self, element: &Element) -> RepoResult<ElementId> {
        let Some(area_uuid) = element.area_uuid else {
            return Err(RepoError::InvalidData(
                "element is not attached to an area".to_string(),
            ));
        };

        self.conn.execute(
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

        Ok(element.uuid)
    }

    fn get_element(&self, id: ElementId) -> RepoResult<Option<Element>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ELEMENT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let element = stmt
            .query_row([id.to_string()], raw_element_row)
            .optional()?;

        match element {
            Some(raw) => Ok(Some(raw.into_element()?)),
            None => Ok(None),
        }
    }

    fn list_for_area(&self, area_uuid: AreaId) -> RepoResult<Vec<Element>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ELEMENT_SELECT_SQL}
             WHERE area_uuid = ?1
             ORDER BY sort_order ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([area_uuid.to_string()])?;
        let mut elements = Vec::new();
        while let Some(row) = rows.next()? {
            elements.push(parse_element_row(row)?);
        }

        Ok(elements)
    }
}

struct RawElementRow {
    uuid: String,
    area_uuid: String,
    element_type: String,
    title: String,
    content: String,
    sort_order: i64,
}

impl RawElementRow {
    fn into_element(self) -> RepoResult<Element> {
        let uuid = Uuid::parse_str(&self.uuid).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid value `{}` in elements.uuid", self.uuid))
        })?;
        let area_uuid = Uuid::parse_str(&self.area_uuid).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid uuid value `{}` in elements.area_uuid",
                self.area_uuid
            ))
        })?;

        Ok(Element {
            uuid,
            area_uuid: Some(area_uuid),
            element_type: self.element_type,
            title: self.title,
            content: self.content,
            sort_order: self.sort_order,
        })
    }
}

fn raw_element_row(row: &Row<'_>) -> Result<RawElementRow, rusqlite::Error> {
    Ok(RawElementRow {
        uuid: row.get("uuid")?,
        area_uuid: row.get("area_uuid")?,
        element_type: row.get("element_type")?,
        title: row.get("title")?,
        content: row.get("content")?,
        sort_order: row.get("sort_order")?,
    })
}

pub(crate) fn parse_element_row(row: &Row<'_>) -> RepoResult<Element> {
    raw_element_row(row)?.into_element()
}
