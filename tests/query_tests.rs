//! YAML query DSL end to end.

use serde_json::{json, Value};

use seqops::query::{parse_records, Executor, Query, QueryError};
use seqops::SeqConfig;

fn employees() -> Vec<Value> {
    vec![
        json!({"name": "A", "dept": "Dev", "age": 31}),
        json!({"name": "B", "dept": "Dev", "age": 25}),
        json!({"name": "C", "dept": "Sales", "age": 40}),
        json!({"name": "D", "age": 22}),
    ]
}

#[test]
fn test_group_join_departments() {
    let q = Query::from_yaml(
        r#"
steps:
  - op: group_join
    inner: employees
    outer_key: name
    inner_key: dept
    into: staff
"#,
    )
    .unwrap();
    let departments = vec![
        json!({"name": "Dev"}),
        json!({"name": "Sales"}),
        json!({"name": "HR"}),
    ];
    let exec = Executor::default().with_dataset("employees", employees());
    let out = exec.run(&q, departments).unwrap();

    let staff: Vec<Vec<&str>> = out
        .iter()
        .map(|d| {
            d["staff"]
                .as_array()
                .unwrap()
                .iter()
                .map(|e| e["name"].as_str().unwrap())
                .collect()
        })
        .collect();
    assert_eq!(staff, vec![vec!["A", "B"], vec!["C"], vec![]]);
}

#[test]
fn test_join_then_order_then_group() {
    let q = Query::from_yaml(
        r#"
steps:
  - op: join
    inner: products
    outer_key: id
    inner_key: category_id
    into: product
  - op: order
    levels:
      - { key: name }
      - { key: product.price, descending: true }
  - op: group
    key: name
    element: product.title
"#,
    )
    .unwrap();
    let categories = vec![json!({"id": 1, "name": "Fruit"}), json!({"id": 2, "name": "Veg"})];
    let products = vec![
        json!({"title": "Carrot", "category_id": 2, "price": 1.5}),
        json!({"title": "Apple", "category_id": 1, "price": 0.5}),
        json!({"title": "Mango", "category_id": 1, "price": 2.0}),
        json!({"title": "Orphan", "price": 9.0}),
    ];
    let out = Executor::default()
        .with_dataset("products", products)
        .run(&q, categories)
        .unwrap();
    assert_eq!(
        out,
        vec![
            json!({"key": "Fruit", "elements": ["Mango", "Apple"]}),
            json!({"key": "Veg", "elements": ["Carrot"]}),
        ]
    );
}

#[test]
fn test_missing_key_groups_as_null_and_sorts_first() {
    let q = Query::from_yaml(
        "steps:\n  - op: order\n    levels:\n      - { key: dept }\n      - { key: age }\n",
    )
    .unwrap();
    let out = Executor::default().run(&q, employees()).unwrap();
    let names: Vec<&str> = out.iter().map(|e| e["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["D", "B", "A", "C"]);
}

#[test]
fn test_ignore_case_group() {
    let q = Query::from_yaml(
        "steps:\n  - op: group\n    key: tag\n    ignore_case: true\n    element: id\n",
    )
    .unwrap();
    let input = parse_records("{\"tag\":\"Rust\",\"id\":1}\n{\"tag\":\"RUST\",\"id\":2}\n{\"tag\":\"go\",\"id\":3}\n").unwrap();
    let out = Executor::default().run(&q, input).unwrap();
    assert_eq!(
        out,
        vec![
            json!({"key": "Rust", "elements": [1, 2]}),
            json!({"key": "go", "elements": [3]}),
        ]
    );
}

#[test]
fn test_config_block_controls_bucket_count() {
    let q = Query::from_yaml("config: { initial_bucket_count: 0 }\nsteps:\n  - op: group\n    key: a\n");
    assert!(matches!(q, Err(QueryError::Core(_))));

    let q = Query::from_yaml("config: { initial_bucket_count: 2 }\nsteps:\n  - op: group\n    key: a\n").unwrap();
    let cfg = q.effective_config(SeqConfig::default());
    let input: Vec<Value> = (0..20).map(|i| json!({"a": i % 10})).collect();
    let out = Executor::new(cfg).run(&q, input).unwrap();
    assert_eq!(out.len(), 10);
    assert_eq!(out[3], json!({"key": 3, "elements": [{"a": 3}, {"a": 3}]}));
}

#[test]
fn test_explain_and_validate() {
    let q = Query::from_yaml(
        r#"
steps:
  - op: group
    key: dept
    element: name
    ignore_case: true
  - op: order
    levels:
      - { key: key, descending: true }
      - { key: elements.0 }
"#,
    )
    .unwrap();
    assert_eq!(
        q.explain(),
        "1. group by dept select name (ignore case)\n2. order by key desc, then elements.0 asc\n"
    );
    assert!(q.validate().is_ok());

    let bad = Query::from_yaml("steps:\n  - op: join\n    inner: x\n    outer_key: a\n    inner_key: \"\"\n    into: y\n");
    assert!(matches!(bad, Err(QueryError::Invalid(_))));
}
