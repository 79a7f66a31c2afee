use world::{
    AgentSpawn, Color, EntityId, EntityKind, Opening, RoomKind, Vec3, World, WorldConfig,
    WorldError,
};

fn two_chambers() -> World {
    let mut world = World::new(WorldConfig::default());
    world.add_rect_room(-3.0, -1.0, -1.0, 1.0, "marble", "west");
    world.add_rect_room(1.0, 3.0, -1.0, 1.0, "wood", "east");
    world
}

#[test]
fn rooms_get_sequential_indices() {
    let mut world = World::new(WorldConfig::default());
    let a = world.add_rect_room(-3.0, -1.0, -1.0, 1.0, "marble", "west");
    let b = world.add_rect_room(1.0, 3.0, -1.0, 1.0, "wood", "east");
    assert_eq!(a, 0);
    assert_eq!(b, 1);
    assert_eq!(world.rooms.len(), 2);
    assert_eq!(world.rooms[a].kind, RoomKind::Chamber);
    assert_eq!(world.rooms[b].name, "east");
}

#[test]
fn connect_rooms_fills_the_gap() {
    let mut world = two_chambers();
    let hall = world
        .connect_rooms(
            0,
            1,
            Opening::AlongZ { min_z: -0.5, max_z: 0.5 },
            2.2,
            RoomKind::Hallway,
            "mid",
        )
        .unwrap();
    assert_eq!(hall, 2);
    let room = &world.rooms[hall];
    assert_eq!(room.kind, RoomKind::Hallway);
    assert!((room.min_x - -1.0).abs() < 1e-6, "min_x={}", room.min_x);
    assert!((room.max_x - 1.0).abs() < 1e-6, "max_x={}", room.max_x);
    assert!((room.min_z - -0.5).abs() < 1e-6, "min_z={}", room.min_z);
    assert!((room.max_z - 0.5).abs() < 1e-6, "max_z={}", room.max_z);
    assert_eq!(room.mid(), Vec3::ZERO);
    assert_eq!(room.wall_tex, "marble", "passage inherits the first room's texture");
}

#[test]
fn opening_span_must_fit_both_rooms() {
    let mut world = two_chambers();
    let result = world.connect_rooms(
        0,
        1,
        Opening::AlongZ { min_z: -2.0, max_z: 0.5 },
        2.2,
        RoomKind::Hallway,
        "mid",
    );
    assert!(
        matches!(result, Err(WorldError::InvalidOpening(_))),
        "Expected InvalidOpening, got {result:?}"
    );
}

#[test]
fn empty_opening_span_is_rejected() {
    let mut world = two_chambers();
    let result = world.connect_rooms(
        0,
        1,
        Opening::AlongZ { min_z: 0.5, max_z: 0.5 },
        2.2,
        RoomKind::Hallway,
        "mid",
    );
    assert!(matches!(result, Err(WorldError::InvalidOpening(_))));
}

#[test]
fn touching_rooms_cannot_be_connected() {
    let mut world = World::new(WorldConfig::default());
    world.add_rect_room(-3.0, 0.0, -1.0, 1.0, "marble", "west");
    world.add_rect_room(0.0, 3.0, -1.0, 1.0, "wood", "east");
    let result = world.connect_rooms(
        0,
        1,
        Opening::AlongZ { min_z: -0.5, max_z: 0.5 },
        2.2,
        RoomKind::Hallway,
        "mid",
    );
    assert!(
        matches!(result, Err(WorldError::InvalidOpening(_))),
        "Expected InvalidOpening, got {result:?}"
    );
}

#[test]
fn entity_ids_are_never_reused() {
    let mut world = two_chambers();
    let key = world.place_entity(
        EntityKind::Key { color: Color::Yellow },
        Vec3::new(-2.0, 0.8, 0.0),
        0.0,
    );
    let chest = world.place_entity(
        EntityKind::Box { color: Color::Red, size: 1.0 },
        Vec3::new(2.0, 0.0, 0.0),
        0.0,
    );
    assert_eq!(key, EntityId(0));
    assert_eq!(chest, EntityId(1));

    assert!(world.remove_entity(key));
    assert!(!world.remove_entity(key), "second removal finds nothing");

    let door = world.place_entity(EntityKind::Door, Vec3::new(0.0, 0.0, 0.0), 0.0);
    assert_eq!(door, EntityId(2), "removed ids are not recycled");
}

#[test]
fn sampled_placement_stays_inside_the_room() {
    let mut world = two_chambers();
    let key = world.place_entity_in(EntityKind::Key { color: Color::Yellow }, 0);
    let pos = world.entity(key).unwrap().pos;
    assert!(pos.x >= -2.7 && pos.x <= -1.3, "x={} outside inset rect", pos.x);
    assert!(pos.z >= -0.7 && pos.z <= 0.7, "z={} outside inset rect", pos.z);
}

#[test]
fn same_seed_places_entities_identically() {
    let mut a = two_chambers();
    let mut b = two_chambers();
    let ka = a.place_entity_in(EntityKind::Key { color: Color::Yellow }, 0);
    let kb = b.place_entity_in(EntityKind::Key { color: Color::Yellow }, 0);
    assert_eq!(a.entity(ka).unwrap().pos, b.entity(kb).unwrap().pos);
}

#[test]
fn pinned_agent_spawn_is_exact() {
    let mut world = two_chambers();
    world.place_agent(0, &AgentSpawn::pinned(-2.0, 0.5, 1.0));
    assert_eq!(world.agent.pos, Vec3::new(-2.0, 0.0, 0.5));
    assert!((world.agent.heading - 1.0).abs() < 1e-6);
}
