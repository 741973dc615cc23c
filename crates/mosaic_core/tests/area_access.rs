use mosaic_core::db::open_db_in_memory;
use mosaic_core::{
    Actor, ActorId, Area, AreaId, AreaRepository, AreaService, GrantTable, OwnerHandle, OwnerQuery,
    OwnerRecord, OwnerStoreError, OwnerTypeDescriptor, OwnerTypeRegistry, SqliteAreaRepository,
    SqliteElementRepository, Stage,
};
use std::sync::Arc;
use uuid::Uuid;

struct StubOwner {
    uuid: Uuid,
    editors: Vec<ActorId>,
    viewers: Vec<ActorId>,
}

impl OwnerRecord for StubOwner {
    fn uuid(&self) -> Uuid {
        self.uuid
    }

    fn type_tag(&self) -> &str {
        "landing_page"
    }

    fn title(&self) -> &str {
        "Landing"
    }

    fn edit_link(&self) -> String {
        format!("/admin/landing_page/edit/{}", self.uuid)
    }

    fn can_edit(&self, actor: &Actor) -> bool {
        self.editors.contains(&actor.uuid)
    }

    fn can_view(&self, actor: &Actor) -> bool {
        self.viewers.contains(&actor.uuid) || self.editors.contains(&actor.uuid)
    }
}

struct FixedQuery {
    row: Option<(AreaId, OwnerHandle)>,
}

impl OwnerQuery for FixedQuery {
    fn first_by_relation(
        &self,
        _relation_field: &str,
        area_uuid: AreaId,
        _stage: Stage,
    ) -> Result<Option<OwnerHandle>, OwnerStoreError> {
        Ok(self
            .row
            .as_ref()
            .filter(|(area, _)| *area == area_uuid)
            .map(|(_, owner)| owner.clone()))
    }
}

fn registry_with_owner(area_uuid: AreaId, owner: OwnerHandle) -> OwnerTypeRegistry {
    let mut registry = OwnerTypeRegistry::new();
    registry
        .register(OwnerTypeDescriptor::new(
            "landing_page",
            vec!["content_area".to_string()],
            Arc::new(FixedQuery {
                row: Some((area_uuid, owner)),
            }),
        ))
        .unwrap();
    registry
}

fn empty_registry() -> OwnerTypeRegistry {
    let mut registry = OwnerTypeRegistry::new();
    registry
        .register(OwnerTypeDescriptor::new(
            "landing_page",
            vec!["content_area".to_string()],
            Arc::new(FixedQuery { row: None }),
        ))
        .unwrap();
    registry
}

fn persisted_area(conn: &rusqlite::Connection, hint: Option<&str>) -> Area {
    let mut area = Area::new();
    area.owner_type_hint = hint.map(str::to_string);
    SqliteAreaRepository::new(conn).create_area(&area).unwrap()
}

#[test]
fn owner_edit_grant_delegates_to_true() {
    let conn = open_db_in_memory().unwrap();
    let mut area = persisted_area(&conn, Some("landing_page"));
    let actor = Actor::new();

    let owner: OwnerHandle = Arc::new(StubOwner {
        uuid: Uuid::new_v4(),
        editors: vec![actor.uuid],
        viewers: Vec::new(),
    });
    let registry = registry_with_owner(area.uuid.unwrap(), owner);
    let grants = Arc::new(GrantTable::new());
    let service = AreaService::new(
        SqliteAreaRepository::new(&conn),
        SqliteElementRepository::new(&conn),
        registry,
        grants.clone(),
        grants,
    );

    assert!(service.can_edit(&mut area, &actor).unwrap());
    assert!(service.can_view(&mut area, &actor).unwrap());
}

#[test]
fn owner_denial_and_missing_owner_both_deny() {
    let conn = open_db_in_memory().unwrap();
    let actor = Actor::new();

    // Owner resolves but denies the actor.
    let mut denied_area = persisted_area(&conn, Some("landing_page"));
    let denying_owner: OwnerHandle = Arc::new(StubOwner {
        uuid: Uuid::new_v4(),
        editors: Vec::new(),
        viewers: Vec::new(),
    });
    let grants = Arc::new(GrantTable::new());
    let service = AreaService::new(
        SqliteAreaRepository::new(&conn),
        SqliteElementRepository::new(&conn),
        registry_with_owner(denied_area.uuid.unwrap(), denying_owner),
        grants.clone(),
        grants.clone(),
    );
    assert!(!service.can_edit(&mut denied_area, &actor).unwrap());
    assert!(!service.can_view(&mut denied_area, &actor).unwrap());

    // No owner resolves at all.
    let mut orphan_area = persisted_area(&conn, Some("landing_page"));
    let orphan_service = AreaService::new(
        SqliteAreaRepository::new(&conn),
        SqliteElementRepository::new(&conn),
        empty_registry(),
        grants.clone(),
        grants,
    );
    assert!(!orphan_service.can_edit(&mut orphan_area, &actor).unwrap());
    assert!(!orphan_service.can_view(&mut orphan_area, &actor).unwrap());
}

#[test]
fn base_edit_grant_short_circuits_without_resolution() {
    let conn = open_db_in_memory().unwrap();
    let mut area = persisted_area(&conn, None);
    let actor = Actor::new();

    let mut grants = GrantTable::new();
    grants.grant_edit(area.uuid.unwrap(), actor.uuid);
    let grants = Arc::new(grants);

    // Registry is empty; resolution would deny, so only the base grant can
    // answer true here.
    let service = AreaService::new(
        SqliteAreaRepository::new(&conn),
        SqliteElementRepository::new(&conn),
        OwnerTypeRegistry::new(),
        grants.clone(),
        grants,
    );

    assert!(service.can_edit(&mut area, &actor).unwrap());
    assert!(service.can_view(&mut area, &actor).unwrap());
}

#[test]
fn base_view_grant_alone_does_not_short_circuit_view() {
    let conn = open_db_in_memory().unwrap();
    let mut area = persisted_area(&conn, Some("landing_page"));
    let actor = Actor::new();

    let mut grants = GrantTable::new();
    grants.grant_view(area.uuid.unwrap(), actor.uuid);
    let grants = Arc::new(grants);

    let service = AreaService::new(
        SqliteAreaRepository::new(&conn),
        SqliteElementRepository::new(&conn),
        empty_registry(),
        grants.clone(),
        grants,
    );

    // The view check short-circuits on the base *edit* grant only; with no
    // resolvable owner the view-granted actor is still denied.
    assert!(!service.can_view(&mut area, &actor).unwrap());
}

#[test]
fn admin_actor_passes_base_checks_everywhere() {
    let conn = open_db_in_memory().unwrap();
    let mut area = persisted_area(&conn, None);
    let admin = Actor::admin();

    let grants = Arc::new(GrantTable::new());
    let service = AreaService::new(
        SqliteAreaRepository::new(&conn),
        SqliteElementRepository::new(&conn),
        OwnerTypeRegistry::new(),
        grants.clone(),
        grants,
    );

    assert!(service.can_edit(&mut area, &admin).unwrap());
    assert!(service.can_view(&mut area, &admin).unwrap());
}

#[test]
fn owner_view_grant_delegates_view_but_not_edit() {
    let conn = open_db_in_memory().unwrap();
    let mut area = persisted_area(&conn, Some("landing_page"));
    let actor = Actor::new();

    let owner: OwnerHandle = Arc::new(StubOwner {
        uuid: Uuid::new_v4(),
        editors: Vec::new(),
        viewers: vec![actor.uuid],
    });
    let grants = Arc::new(GrantTable::new());
    let service = AreaService::new(
        SqliteAreaRepository::new(&conn),
        SqliteElementRepository::new(&conn),
        registry_with_owner(area.uuid.unwrap(), owner),
        grants.clone(),
        grants,
    );

    assert!(service.can_view(&mut area, &actor).unwrap());
    assert!(!service.can_edit(&mut area, &actor).unwrap());
}
