use super::*;

//-----------------------------------------------------------------------------

fn check_degrees<L>(graph: &Graph<L>, name: &str) {
    let mut incoming = vec![0; graph.vertex_ids().max().map(|id| id + 1).unwrap_or(0)];
    let mut records = 0;
    for vertex in graph.vertices() {
        assert_eq!(vertex.out_degree(), vertex.edges().len(), "Wrong out-degree for vertex {} ({})", vertex.id(), name);
        for edge in vertex.edges() {
            incoming[edge.target()] += 1;
            records += 1;
        }
    }
    for vertex in graph.vertices() {
        assert_eq!(vertex.in_degree(), incoming[vertex.id()], "Wrong in-degree for vertex {} ({})", vertex.id(), name);
    }
    let expected_order = if graph.is_directed() { records } else { records / 2 };
    assert_eq!(graph.order(), expected_order, "Wrong order ({})", name);
    assert_eq!(graph.size(), graph.vertex_ids().count(), "Wrong size ({})", name);
}

//-----------------------------------------------------------------------------

#[test]
fn empty_graph() {
    let graph: Graph<usize> = Graph::undirected();
    assert!(graph.is_empty(), "New graph is not empty");
    assert_eq!(graph.root(), None, "Empty graph has a root");
    assert!(graph.edges(0).is_empty(), "Missing vertex has edges");
    assert!(graph.label(0).is_none(), "Missing vertex has a label");
}

#[test]
fn put_vertex_attaches_to_root() {
    let mut graph: Graph<usize> = Graph::directed();
    let root = graph.put_vertex(10, 1.0);
    assert_eq!(graph.root(), Some(root), "First vertex is not the root");
    assert_eq!(graph.order(), 0, "First vertex has edges");

    let a = graph.put_vertex(11, 2.0);
    let b = graph.put_vertex(12, 3.0);
    assert!(graph.has_edge(root, a) && graph.has_edge(root, b), "Vertices were not attached to the root");
    assert!(!graph.has_edge(a, root), "Directed graph has a reverse edge");
    assert_eq!(graph.edges(root)[1].weight(), 3.0, "Wrong edge weight");
    assert_eq!(graph[b].label(), &12, "Wrong label");
    check_degrees(&graph, "directed");

    let c = graph.put_vertex_from(a, 13, 1.0).unwrap();
    assert!(graph.has_edge(a, c), "Vertex was not attached to the source");
    assert!(graph.put_vertex_from(100, 14, 1.0).is_err(), "Attached a vertex to a missing source");
    check_degrees(&graph, "directed with a grandchild");
}

#[test]
fn undirected_edges() {
    let mut graph: Graph<char> = Graph::undirected();
    let a = graph.add_vertex('a');
    let b = graph.add_vertex('b');
    let c = graph.add_vertex('c');
    assert_eq!(graph.order(), 0, "Isolated vertices have edges");

    graph.put_edge(a, b, 1.0).unwrap();
    graph.put_edge(b, c, 1.0).unwrap();
    graph.put_edge(b, c, 2.0).unwrap();
    assert_eq!(graph.order(), 3, "Wrong order with a parallel edge");
    assert_eq!(graph.neighbors(b).collect::<Vec<_>>(), vec![a, c, c], "Wrong neighbors");
    check_degrees(&graph, "undirected");

    let removed = graph.delete_edge(c, b).unwrap();
    assert_eq!(removed, 2, "Wrong number of removed parallel edges");
    assert!(!graph.has_edge(b, c) && !graph.has_edge(c, b), "Edge was not removed in both directions");
    check_degrees(&graph, "undirected after deletion");

    assert!(graph.delete_edge(a, c).is_err(), "Deleted a missing edge");
}

#[test]
fn invalid_edges() {
    let mut graph: Graph<char> = Graph::undirected();
    let a = graph.add_vertex('a');
    let result = graph.put_edge(a, a, 1.0);
    assert!(matches!(result, Err(LatticeError::InvariantViolation(_))), "Self-loop was accepted");
    assert!(matches!(graph.put_edge(a, 5, 1.0), Err(LatticeError::NoSuchVertex(5))), "Edge to a missing vertex was accepted");
    assert_eq!(graph.order(), 0, "Failed insertions changed the order");
}

#[test]
fn delete_edge_moves_root() {
    let mut graph: Graph<char> = Graph::directed();
    let a = graph.put_vertex('a', 1.0);
    let b = graph.put_vertex('b', 1.0);
    graph.delete_edge(a, b).unwrap();
    assert_eq!(graph.root(), Some(b), "Root did not move to the target of the deleted edge");

    // New vertices now attach to the new root.
    let c = graph.put_vertex('c', 1.0);
    assert!(graph.has_edge(b, c), "New vertex was not attached to the new root");
}

#[test]
fn delete_vertex() {
    for directed in [false, true] {
        let name = if directed { "directed" } else { "undirected" };
        let mut graph: Graph<usize> = Graph::new(directed);
        let root = graph.put_vertex(0, 1.0);
        let a = graph.put_vertex(1, 1.0);
        let b = graph.put_vertex(2, 1.0);
        graph.put_edge(a, b, 1.0).unwrap();
        graph.put_edge(b, a, 1.0).unwrap();

        let label = graph.delete_vertex(a).unwrap();
        assert_eq!(label, 1, "Wrong label for the deleted vertex ({})", name);
        assert!(!graph.contains(a), "Deleted vertex still exists ({})", name);
        assert!(graph.neighbors(root).all(|id| id != a), "Edge to the deleted vertex remains ({})", name);
        assert!(graph.neighbors(b).all(|id| id != a), "Edge to the deleted vertex remains ({})", name);
        check_degrees(&graph, name);

        graph.delete_vertex(root).unwrap();
        assert_eq!(graph.root(), Some(b), "Root did not move ({})", name);
        assert!(graph.delete_vertex(root).is_err(), "Deleted a vertex twice ({})", name);
        check_degrees(&graph, name);
        assert_eq!(graph.size(), 1, "Wrong number of vertices after deletions ({})", name);
        assert_eq!(graph.capacity(), 3, "Deletions changed the arena length ({})", name);

        graph.delete_vertex(b).unwrap();
        assert_eq!(graph.root(), None, "Empty graph has a root ({})", name);
        assert!(graph.is_empty(), "Graph is not empty after deleting every vertex ({})", name);
        let c = graph.add_vertex(3);
        assert_eq!(c, 3, "New vertex reused a hole ({})", name);
    }
}

#[test]
fn colors() {
    let mut graph: Graph<char> = Graph::undirected();
    let a = graph.add_vertex('a');
    let first = graph.new_color();
    let second = graph.new_color();
    assert!(second > first, "Colors do not increase");
    assert!(!graph.is_painted(a, first), "New vertex is painted");
    graph.paint(a, first);
    assert!(graph.is_painted(a, first), "Vertex was not painted");
    assert!(!graph.is_painted(a, second), "Vertex has the wrong color");
    assert_eq!(graph[a].color(), first, "Wrong color");
}

//-----------------------------------------------------------------------------
