//! Unit tests for gsim-agent.

use gsim_core::NodeId;
use gsim_graph::GraphStore;
use gsim_sensor::{SensorEngine, SensorKind};
use indexmap::IndexMap;

use crate::engine::AgentEngine;

/// A 5x5 grid, `pos=(x=j, y=i)` for node `5*i+j`, matching the convention
/// used by `gsim-sensor`'s tests.
fn grid5x5() -> GraphStore {
    let mut g = GraphStore::new();
    for i in 0..5i64 {
        for j in 0..5i64 {
            g.add_node(NodeId((5 * i + j) as u64), j as f64, i as f64).unwrap();
        }
    }
    let mut next_edge = 0u64;
    let mut add_edge = |g: &mut GraphStore, a: i64, b: i64| {
        g.add_edge(gsim_core::EdgeId(next_edge), NodeId(a as u64), NodeId(b as u64), 1.0, None)
            .unwrap();
        next_edge += 1;
    };
    for i in 0..5i64 {
        for j in 0..5i64 {
            let id = 5 * i + j;
            if j + 1 < 5 {
                add_edge(&mut g, id, id + 1);
            }
            if i + 1 < 5 {
                add_edge(&mut g, id, id + 5);
            }
        }
    }
    g
}

#[test]
fn create_agent_binds_sensors_in_order() {
    let graph = grid5x5();
    let mut sensors = SensorEngine::new();
    sensors.create_sensor("s1", SensorKind::Neighbor, 0.0, 0.0, None).unwrap();
    sensors.create_sensor("s2", SensorKind::Map, 0.0, 0.0, None).unwrap();

    let mut agents = AgentEngine::new();
    agents
        .create_agent(
            "A",
            NodeId(12),
            [("local1".to_string(), "s1".to_string()), ("local2".to_string(), "s2".to_string())],
            IndexMap::new(),
            &mut sensors,
        )
        .unwrap();

    let agent = agents.get_agent("A").unwrap();
    assert_eq!(agent.sensors.get("local1").unwrap(), "s1");
    assert_eq!(agent.sensors.get("local2").unwrap(), "s2");
    assert_eq!(sensors.get_sensor("s1").unwrap().owner.as_deref(), Some("A"));

    let _ = graph;
}

#[test]
fn duplicate_agent_name_is_conflict_and_does_not_double_emit() {
    // Creating an agent under a name already in use fails and
    // leaves the existing agent and its sensor bindings untouched.
    let mut sensors = SensorEngine::new();
    let mut agents = AgentEngine::new();
    agents
        .create_agent("A", NodeId(0), [], IndexMap::new(), &mut sensors)
        .unwrap();

    let err = agents
        .create_agent("A", NodeId(5), [], IndexMap::new(), &mut sensors)
        .unwrap_err();
    assert!(matches!(err, crate::AgentError::Core(gsim_core::CoreError::AlreadyExists(_))));
    assert_eq!(agents.agent_count(), 1);
    assert_eq!(agents.get_agent("A").unwrap().current_node_id, NodeId(0));
}

#[test]
fn unresolvable_sensor_name_is_downgraded_to_a_skip() {
    // Binding a non-existent sensor_id at creation time doesn't
    // fail agent creation; the agent is created with that sensor simply absent.
    let mut sensors = SensorEngine::new();
    let mut agents = AgentEngine::new();
    agents
        .create_agent(
            "A",
            NodeId(0),
            [("ghost".to_string(), "does-not-exist".to_string())],
            IndexMap::new(),
            &mut sensors,
        )
        .unwrap();

    let agent = agents.get_agent("A").unwrap();
    assert!(agent.sensors.is_empty());
}

#[test]
fn delete_agent_clears_sensor_ownership() {
    let mut sensors = SensorEngine::new();
    sensors.create_sensor("s1", SensorKind::Neighbor, 0.0, 0.0, None).unwrap();
    let mut agents = AgentEngine::new();
    agents
        .create_agent("A", NodeId(0), [("local".to_string(), "s1".to_string())], IndexMap::new(), &mut sensors)
        .unwrap();

    agents.delete_agent("A", &mut sensors);

    assert!(agents.get_agent("A").is_err());
    assert_eq!(sensors.get_sensor("s1").unwrap().owner, None);
}

#[test]
fn delete_nonexistent_agent_is_a_warning_not_an_error() {
    let mut sensors = SensorEngine::new();
    let mut agents = AgentEngine::new();
    // Must not panic.
    agents.delete_agent("ghost", &mut sensors);
    assert_eq!(agents.agent_count(), 0);
}

#[test]
fn create_iter_preserves_insertion_order() {
    let mut sensors = SensorEngine::new();
    let mut agents = AgentEngine::new();
    for name in ["A", "B", "C"] {
        agents.create_agent(name, NodeId(0), [], IndexMap::new(), &mut sensors).unwrap();
    }
    let names: Vec<&str> = agents.create_iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
}

#[test]
fn orientation_is_zero_before_any_movement() {
    let graph = grid5x5();
    let mut sensors = SensorEngine::new();
    let mut agents = AgentEngine::new();
    agents.create_agent("A", NodeId(12), [], IndexMap::new(), &mut sensors).unwrap();
    assert!(agents.orientation("A", &graph).unwrap().is_zero());
}

#[test]
fn step_moves_agent_via_strategy_and_updates_prev_node() {
    let graph = grid5x5();
    let mut sensors = SensorEngine::new();
    sensors.create_sensor("neigh", SensorKind::Neighbor, 0.0, 0.0, None).unwrap();

    let mut agents = AgentEngine::new();
    agents
        .create_agent("A", NodeId(12), [("neigh".to_string(), "neigh".to_string())], IndexMap::new(), &mut sensors)
        .unwrap();
    agents
        .register_strategy(
            "A",
            Box::new(|state| {
                state.action = Some(NodeId(11));
            }),
        )
        .unwrap();

    agents.step("A", &mut sensors, &graph).unwrap();

    let agent = agents.get_agent("A").unwrap();
    assert_eq!(agent.current_node_id, NodeId(11));
    assert_eq!(agent.prev_node_id, NodeId(12));
    assert!(agent.state.as_ref().unwrap().sensor.contains_key("neigh"));
}

#[test]
fn decide_runs_strategy_without_committing_the_move() {
    // Two-phase host loop: decide() for every agent must leave current_node_id
    // untouched so every agent senses pre-move positions.
    let graph = grid5x5();
    let mut sensors = SensorEngine::new();
    let mut agents = AgentEngine::new();
    agents.create_agent("A", NodeId(12), [], IndexMap::new(), &mut sensors).unwrap();
    agents
        .register_strategy("A", Box::new(|state| state.action = Some(NodeId(11))))
        .unwrap();

    agents.decide("A", &mut sensors, &graph).unwrap();
    assert_eq!(agents.get_agent("A").unwrap().current_node_id, NodeId(12));

    agents.set_state("A").unwrap();
    assert_eq!(agents.get_agent("A").unwrap().current_node_id, NodeId(11));
    assert_eq!(agents.get_agent("A").unwrap().prev_node_id, NodeId(12));
}

#[test]
fn step_without_strategy_fails_with_no_strategy() {
    let graph = grid5x5();
    let mut sensors = SensorEngine::new();
    let mut agents = AgentEngine::new();
    agents.create_agent("A", NodeId(0), [], IndexMap::new(), &mut sensors).unwrap();

    let err = agents.step("A", &mut sensors, &graph).unwrap_err();
    assert!(matches!(err, crate::AgentError::NoStrategy(_)));
}

#[test]
fn deregister_sensor_unbinds_and_clears_owner() {
    let mut sensors = SensorEngine::new();
    sensors.create_sensor("s1", SensorKind::Neighbor, 0.0, 0.0, None).unwrap();
    let mut agents = AgentEngine::new();
    agents
        .create_agent("A", NodeId(0), [("local".to_string(), "s1".to_string())], IndexMap::new(), &mut sensors)
        .unwrap();

    agents.deregister_sensor("A", "local", &mut sensors).unwrap();

    assert!(agents.get_agent("A").unwrap().sensors.is_empty());
    assert_eq!(sensors.get_sensor("s1").unwrap().owner, None);
}
