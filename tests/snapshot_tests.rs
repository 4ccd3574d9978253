use digraph_adt::{
    Digraph, DigraphConfig, EdgeFault, EdgeSnapshot, GraphError, History, RestoreReport, Snapshot,
    VertexFault,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
struct User {
    id: u32,
    name: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
struct Relation {
    direct: bool,
    interests: Vec<u32>,
}

fn user(id: u32, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
    }
}

fn relation(direct: bool, interests: &[u32]) -> Relation {
    Relation {
        direct,
        interests: interests.to_vec(),
    }
}

fn network() -> Digraph<User, Relation> {
    let mut graph = Digraph::new();
    let ana = graph.insert_vertex(user(1, "ana")).unwrap();
    let rui = graph.insert_vertex(user(2, "rui")).unwrap();
    let eva = graph.insert_vertex(user(3, "eva")).unwrap();
    graph.insert_edge(ana, rui, relation(true, &[])).unwrap();
    graph.insert_edge(rui, eva, relation(false, &[7])).unwrap();
    graph
}

#[test]
fn test_from_snapshot_rebuilds_structure() {
    let original = network();
    let snapshot = original.snapshot();
    let rebuilt = Digraph::from_snapshot(&snapshot).unwrap();

    assert_ne!(original.id(), rebuilt.id());
    assert_eq!(rebuilt.vertex_count(), 3);
    assert_eq!(rebuilt.edge_count(), 2);

    let rui = rebuilt.vertex(&user(2, "rui")).unwrap();
    let eva = rebuilt.vertex(&user(3, "eva")).unwrap();
    let edge = rebuilt.edge_between(rui, eva).unwrap().unwrap();
    assert_eq!(rebuilt.edge_payload(edge), Ok(&relation(false, &[7])));
    assert_eq!(rebuilt.snapshot(), snapshot);
}

#[test]
fn test_snapshot_is_independent_of_later_mutation() {
    let mut graph = network();
    let snapshot = graph.snapshot();
    let ana = graph.vertex(&user(1, "ana")).unwrap();
    graph.remove_vertex(ana).unwrap();

    assert_eq!(snapshot.vertex_count(), 3);
    assert_eq!(snapshot.edge_count(), 2);
    assert_eq!(graph.snapshot().vertex_count(), 2);
}

#[test]
fn test_restore_reconciles_in_place() {
    let mut graph = network();
    let snapshot = graph.snapshot();
    let rui = graph.vertex(&user(2, "rui")).unwrap();
    let eva = graph.vertex(&user(3, "eva")).unwrap();
    let rui_eva = graph.edge_between(rui, eva).unwrap().unwrap();

    let ana = graph.vertex(&user(1, "ana")).unwrap();
    graph.remove_vertex(ana).unwrap();
    graph.insert_edge(eva, rui, relation(true, &[1])).unwrap();
    graph.edge_payload_mut(rui_eva).unwrap().interests.push(8);

    let report = graph.restore(&snapshot).unwrap();
    assert_eq!(
        report,
        RestoreReport {
            vertices_added: 1,
            vertices_removed: 0,
            edges_added: 1,
            edges_removed: 1,
            edges_updated: 1,
        }
    );

    // Survivors keep their handles.
    assert_eq!(graph.edge_payload(rui_eva), Ok(&relation(false, &[7])));
    assert!(!graph.are_adjacent(eva, rui).unwrap());
    assert_eq!(graph.vertex_count(), 3);
    assert_eq!(graph.edge_count(), 2);
    // The removed vertex comes back under a new handle.
    assert_ne!(graph.vertex(&user(1, "ana")), Some(ana));
}

#[test]
fn test_restore_rejects_duplicate_pairs() {
    let mut graph = network();
    let before = graph.snapshot();
    let mut bad = before.clone();
    bad.edges.push(bad.edges[0].clone());

    assert_eq!(
        graph.restore(&bad),
        Err(GraphError::InvalidEdge(EdgeFault::DuplicateConnection))
    );
    assert_eq!(
        Digraph::from_snapshot(&bad).unwrap_err(),
        GraphError::InvalidEdge(EdgeFault::DuplicateConnection)
    );
    assert_eq!(graph.snapshot(), before);
}

#[test]
fn test_history_undo_sequence() {
    let mut graph = network();
    let mut history = History::with_config(&DigraphConfig::default().with_history_depth(8));

    history.checkpoint(&graph);
    let zoe = graph.insert_vertex(user(4, "zoe")).unwrap();
    history.checkpoint(&graph);
    let ana = graph.vertex(&user(1, "ana")).unwrap();
    graph.insert_edge(zoe, ana, relation(true, &[])).unwrap();
    assert_eq!(history.len(), 2);

    let first = history.undo(&mut graph).unwrap().unwrap();
    assert_eq!(first.edges_removed, 1);
    assert!(graph.vertex_payload(zoe).is_ok());

    let second = history.undo(&mut graph).unwrap().unwrap();
    assert_eq!(second.vertices_removed, 1);
    assert_eq!(graph.snapshot(), network().snapshot());
    assert!(history.is_empty());
    assert_eq!(history.undo(&mut graph), Ok(None));
}

#[test]
fn test_failed_undo_keeps_snapshot() {
    let mut graph: Digraph<u8, u8> = Digraph::new();
    let mut history = History::new();
    history.push(Snapshot {
        vertices: vec![1],
        edges: vec![EdgeSnapshot {
            outbound: 1,
            inbound: 2,
            payload: 0,
        }],
    });

    assert_eq!(
        history.undo(&mut graph),
        Err(GraphError::InvalidVertex(VertexFault::Unknown))
    );
    assert_eq!(history.len(), 1);
    assert!(graph.is_empty());
}

#[test]
fn test_snapshot_serde_roundtrip() {
    let snapshot = network().snapshot();
    let json = serde_json::to_string(&snapshot).unwrap();
    let decoded: Snapshot<User, Relation> = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, snapshot);
}

#[test]
fn test_config_from_json() {
    let config: DigraphConfig =
        serde_json::from_str(r#"{ "vertex_capacity": 128, "history_depth": 4 }"#).unwrap();
    assert_eq!(config.vertex_capacity, 128);
    assert_eq!(config.edge_capacity, 0);
    assert_eq!(config.history_depth, 4);

    let graph: Digraph<u32, ()> = Digraph::with_config(&config);
    assert!(graph.is_empty());
    assert_eq!(History::<u32, ()>::with_config(&config).depth(), 4);
}
