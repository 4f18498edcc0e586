use squarify_rs::{
    normalize_sizes, sort_nested, squarify, squarify_nested, LayoutError, NodeInput, Tree,
};

#[test]
fn reference_values_in_700_by_433() {
    let values = normalize_sizes(&[500.0, 433.0, 78.0, 25.0, 25.0, 7.0], 700.0, 433.0).unwrap();
    let rects = squarify(&values, 0.0, 0.0, 700.0, 433.0).unwrap();
    assert_eq!(rects.len(), 6);
    let first = rects[0];
    assert_eq!((first.x, first.y), (0.0, 0.0));
    assert!((first.dx - 327.715).abs() < 1e-3);
    assert!((first.dy - 433.0).abs() < 1e-9);
    for (r, v) in rects.iter().zip(&values) {
        assert!((r.area() - v).abs() < 1e-6);
    }
}

#[test]
fn single_value_fills_region() {
    let rects = squarify(&[700.0 * 433.0], 0.0, 0.0, 700.0, 433.0).unwrap();
    assert_eq!(rects.len(), 1);
    assert_eq!(rects[0], squarify_rs::Rect::new(0.0, 0.0, 700.0, 433.0));
}

#[test]
fn two_children_split_one_to_two() {
    let mut tree = Tree::from_input(&[NodeInput::branch(
        "Root",
        0.0,
        vec![NodeInput::leaf("A", 1.0), NodeInput::leaf("B", 2.0)],
    )])
    .unwrap();
    sort_nested(&mut tree);
    let layout = squarify_nested(&tree, 0.0, 0.0, 10.0, 10.0, 0.0).unwrap();

    let find = |label: &str| {
        tree.nodes
            .iter()
            .position(|n| n.label == label)
            .map(|i| squarify_rs::NodeId(i as u32))
            .unwrap()
    };
    let a = layout.rect(find("A")).unwrap().area();
    let b = layout.rect(find("B")).unwrap().area();
    assert!((a / b - 0.5).abs() < 1e-12);
    assert!((a + b - 100.0).abs() < 1e-9);
}

#[test]
fn errors_are_typed() {
    assert!(matches!(
        normalize_sizes(&[1.0, -1.0], 1.0, 1.0),
        Err(LayoutError::InvalidInput { .. })
    ));
    assert!(matches!(
        squarify(&[1.0], 0.0, 0.0, 1.0, 0.0),
        Err(LayoutError::InvalidGeometry { .. })
    ));
}
