use crate::shape::Shape;

#[test]
fn test_shape_display() {
    assert_eq!(Shape::tensor(28, 28, 1).to_string(), "28×28×1");
    assert_eq!(Shape::vector(10).to_string(), "10 维向量");
    assert_eq!(Shape::unknown("未连接").to_string(), "未连接");
}

#[test]
fn test_shape_element_count() {
    assert_eq!(Shape::tensor(13, 13, 32).element_count(), Some(5408));
    assert_eq!(Shape::vector(10).element_count(), Some(10));
    assert_eq!(Shape::unknown("?").element_count(), None);

    // 超大维度：结果超出 i64 也能正确计算，超出 i128 时饱和
    assert_eq!(
        Shape::tensor(4_000_000_000, 4_000_000_000, 1).element_count(),
        Some(16_000_000_000_000_000_000)
    );
    assert_eq!(
        Shape::tensor(i64::MAX, i64::MAX, i64::MAX).element_count(),
        Some(i128::MAX)
    );
    assert_eq!(
        Shape::tensor(i64::MAX, i64::MAX, -3).element_count(),
        Some(i128::MIN)
    );

    assert_eq!(Shape::tensor(4, 4, 3).channels(), Some(3));
    assert_eq!(Shape::vector(4).channels(), None);
}

#[test]
fn test_shape_same_dims() {
    let a = Shape::tensor(28, 28, 1);
    assert!(a.same_dims(&Shape::tensor(28, 28, 1)));
    assert!(!a.same_dims(&Shape::tensor(28, 28, 3)));
    // 向量之间不算"维度一致"，只比较张量
    assert!(!Shape::vector(10).same_dims(&Shape::vector(10)));
}

#[test]
fn test_shape_json() {
    let json = serde_json::to_value(Shape::tensor(26, 26, 32)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"type": "tensor", "height": 26, "width": 26, "channels": 32})
    );

    let json = serde_json::to_value(Shape::vector(10)).unwrap();
    assert_eq!(json, serde_json::json!({"type": "vector", "size": 10}));

    let parsed: Shape =
        serde_json::from_str(r#"{"type": "unknown", "description": "未连接"}"#).unwrap();
    assert_eq!(parsed, Shape::unknown("未连接"));
}
