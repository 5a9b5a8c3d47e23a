use sql_query_shape::{
    config::ExtractConfig,
    error::ExtractError,
    query::{
        Comparison, FUNCTION_COLUMNS, Query, SqlDialect, StatementKind, Where, extract_queries,
        extract_query
    }
};

fn extract(sql: &str) -> Query {
    extract_query(sql, SqlDialect::Generic, &ExtractConfig::default()).unwrap()
}

fn extract_err(sql: &str) -> ExtractError {
    extract_query(sql, SqlDialect::Generic, &ExtractConfig::default()).unwrap_err()
}

#[test]
fn test_select_star() {
    let q = extract("SELECT * FROM users");

    assert_eq!(q.kind, StatementKind::Select);
    assert_eq!(q.table.name, "users");
    assert!(q.table.names.is_empty());
    assert_eq!(q.table.columns_of("users"), ["*"]);
}

#[test]
fn test_alias_projection_and_where() {
    let q = extract("SELECT id, name AS n FROM users u WHERE u.id = 1");

    assert_eq!(q.table.name, "users");
    assert_eq!(q.table.aliases.len(), 1);
    assert_eq!(q.table.aliases.get("u").unwrap(), "users");
    assert_eq!(q.table.single_alias, "u");
    assert_eq!(q.table.columns_of("users"), ["id", "n"]);
    assert_eq!(q.wheres, vec![Where::new("u", "id", "=")]);
}

#[test]
fn test_simple_join() {
    let q = extract("SELECT a.id FROM a JOIN b ON a.id = b.a_id");

    assert_eq!(q.table.name, "a");
    assert_eq!(q.table.names, ["b"]);
    assert_eq!(
        q.table.join.comparisons,
        vec![Comparison::new("a.id", "b.a_id", "=")]
    );
    assert_eq!(q.table.columns_of("a"), ["id"]);
}

#[test]
fn test_derived_table() {
    let q = extract("SELECT * FROM (SELECT id FROM t) sub");

    assert!(q.table.name.is_empty());
    assert_eq!(q.subqueries.len(), 1);
    let sub = &q.subqueries[0];
    assert_eq!(sub.table.name, "t");
    assert_eq!(sub.table.single_alias, "sub");
    assert_eq!(sub.table.columns_of("t"), ["id"]);
}

#[test]
fn test_derived_table_alias_stays_out_of_parent() {
    let q = extract("SELECT * FROM (SELECT id FROM t) sub");

    assert!(q.table.aliases.is_empty());
    assert!(q.table.single_alias.is_empty());
    assert_eq!(q.table.columns_of(""), ["*"]);
}

#[test]
fn test_parenthesized_and_chain_in_on() {
    let q = extract("SELECT * FROM a JOIN b ON (a.x = b.x AND a.y = b.y)");

    assert_eq!(
        q.table.join.comparisons,
        vec![
            Comparison::new("a.x", "b.x", "="),
            Comparison::new("a.y", "b.y", "=")
        ]
    );
}

#[test]
fn test_nested_and_chain_keeps_depth_first_order() {
    let q = extract(
        "SELECT * FROM a JOIN b ON (a.x = b.x AND (a.y < b.y AND a.z >= b.z)) AND a.w <> b.w"
    );

    let ops: Vec<&str> = q
        .table
        .join
        .comparisons
        .iter()
        .map(|c| c.operator.as_str())
        .collect();
    assert_eq!(ops, ["=", "<", ">=", "!="]);
    assert_eq!(q.table.join.comparisons[3].left, "a.w");
}

#[test]
fn test_multiple_joins_in_order() {
    let q = extract(
        "SELECT * FROM users u
         JOIN orders o ON u.id = o.user_id
         LEFT JOIN products p ON o.product_id = p.id"
    );

    assert_eq!(q.table.name, "users");
    assert_eq!(q.table.names, ["orders", "products"]);
    assert_eq!(q.table.alias_order, ["u", "o", "p"]);
    assert!(q.table.single_alias.is_empty());
    assert_eq!(
        q.table.join.comparisons,
        vec![
            Comparison::new("u.id", "o.user_id", "="),
            Comparison::new("o.product_id", "p.id", "=")
        ]
    );
}

#[test]
fn test_nested_join_side_is_resolved() {
    let q = extract("SELECT * FROM a JOIN (b JOIN c ON b.id = c.b_id) ON a.id = b.a_id");

    assert_eq!(q.table.name, "a");
    assert_eq!(q.table.names, ["b", "c"]);
    assert_eq!(
        q.table.join.comparisons,
        vec![
            Comparison::new("b.id", "c.b_id", "="),
            Comparison::new("a.id", "b.a_id", "=")
        ]
    );
}

#[test]
fn test_join_with_derived_side() {
    let q = extract("SELECT * FROM a JOIN (SELECT id FROM b) s ON a.id = s.id");

    assert_eq!(q.table.name, "a");
    assert!(q.table.names.is_empty());
    assert_eq!(q.subqueries.len(), 1);
    assert_eq!(q.subqueries[0].table.name, "b");
    assert_eq!(q.subqueries[0].table.single_alias, "s");
    assert_eq!(
        q.table.join.comparisons,
        vec![Comparison::new("a.id", "s.id", "=")]
    );
}

#[test]
fn test_mysql_straight_join_keeps_on_condition() {
    let q = extract_query(
        "SELECT * FROM a STRAIGHT_JOIN b ON a.id = b.a_id",
        SqlDialect::MySQL,
        &ExtractConfig::default()
    )
    .unwrap();

    assert_eq!(q.table.names(), ["a", "b"]);
    assert_eq!(
        q.table.join.comparisons,
        vec![Comparison::new("a.id", "b.a_id", "=")]
    );
}

#[test]
fn test_long_flat_on_chain_within_default_depth() {
    let conditions: Vec<String> = (0..100).map(|i| format!("a.c{i} = b.c{i}")).collect();
    let q = extract(&format!(
        "SELECT * FROM a JOIN b ON {}",
        conditions.join(" AND ")
    ));

    assert_eq!(q.table.join.comparisons.len(), 100);
    assert_eq!(q.table.join.comparisons[0].left, "a.c0");
    assert_eq!(q.table.join.comparisons[99].right, "b.c99");
}

#[test]
fn test_join_using_and_cross_join_add_no_comparisons() {
    let q = extract("SELECT * FROM a JOIN b USING (id) CROSS JOIN c");

    assert_eq!(q.table.name, "a");
    assert_eq!(q.table.names, ["b", "c"]);
    assert!(q.table.join.comparisons.is_empty());
}

#[test]
fn test_parenthesized_from_item_is_inert_by_default() {
    let q = extract("SELECT * FROM (a JOIN b ON a.id = b.id)");

    assert!(q.table.name.is_empty());
    assert!(q.table.names.is_empty());
    assert!(q.table.join.comparisons.is_empty());
}

#[test]
fn test_parenthesized_from_item_can_be_resolved() {
    let config = ExtractConfig {
        resolve_parenthesized_from: true,
        ..Default::default()
    };
    let q = extract_query(
        "SELECT * FROM (a JOIN b ON a.id = b.id)",
        SqlDialect::Generic,
        &config
    )
    .unwrap();

    assert_eq!(q.table.name, "a");
    assert_eq!(q.table.names, ["b"]);
    assert_eq!(q.table.join.comparisons.len(), 1);
}

#[test]
fn test_single_alias_resets_on_second_alias() {
    let q = extract("SELECT * FROM a x, b y");

    assert_eq!(q.table.name, "a");
    assert_eq!(q.table.names, ["b"]);
    assert_eq!(q.table.aliases.get("x").unwrap(), "a");
    assert_eq!(q.table.aliases.get("y").unwrap(), "b");
    assert!(q.table.single_alias.is_empty());
}

#[test]
fn test_single_alias_with_unaliased_table() {
    let q = extract("SELECT * FROM a x, b");

    assert_eq!(q.table.single_alias, "x");
}

#[test]
fn test_reused_alias_last_write_wins() {
    let q = extract("SELECT * FROM a x, b x");

    assert_eq!(q.table.aliases.len(), 1);
    assert_eq!(q.table.aliases.get("x").unwrap(), "b");
    assert_eq!(q.table.alias_order, ["x", "x"]);
    assert!(q.table.single_alias.is_empty());
}

#[test]
fn test_projection_buckets() {
    let q = extract(
        "SELECT u.*, o.id, o.total AS amount, COUNT(*) AS cnt, max(o.total)
         FROM users u JOIN orders o ON u.id = o.user_id"
    );

    assert_eq!(q.table.columns_of("users"), ["*"]);
    assert_eq!(q.table.columns_of("orders"), ["id", "amount"]);
    assert_eq!(q.table.columns_of(FUNCTION_COLUMNS), ["cnt", "max"]);
    let buckets: Vec<&str> = q.table.columns.keys().map(|k| k.as_str()).collect();
    assert_eq!(buckets, ["users", "orders", FUNCTION_COLUMNS]);
}

#[test]
fn test_unresolved_qualifier_uses_literal_text() {
    let q = extract("SELECT x.*, y.id FROM users");

    assert_eq!(q.table.columns_of("x"), ["*"]);
    assert_eq!(q.table.columns_of("y"), ["id"]);
    assert!(q.table.columns_of("users").is_empty());
}

#[test]
fn test_unmodeled_projection_items_are_skipped() {
    let q = extract("SELECT a + b, CASE WHEN c = 1 THEN 1 END, id FROM t");

    assert_eq!(q.table.columns.len(), 1);
    assert_eq!(q.table.columns_of("t"), ["id"]);
}

#[test]
fn test_schema_qualified_table_keeps_last_part() {
    let q = extract("SELECT * FROM public.users");

    assert_eq!(q.table.name, "users");
    assert_eq!(q.table.columns_of("users"), ["*"]);
}

#[test]
fn test_where_flattens_and_or() {
    let q = extract("SELECT * FROM a WHERE (a.x = 1 OR a.y = 2) AND b.z > 3");

    assert_eq!(
        q.wheres,
        vec![
            Where::new("a", "x", "="),
            Where::new("a", "y", "="),
            Where::new("b", "z", ">")
        ]
    );
}

#[test]
fn test_where_range_and_comparison_class_operators() {
    let q = extract(
        "SELECT * FROM o
         WHERE o.total BETWEEN 1 AND 10
           AND o.qty NOT BETWEEN 2 AND 3
           AND name LIKE 'a%'
           AND o.status NOT IN ('x', 'y')
           AND o.id IN (SELECT order_id FROM items)
           AND o.code <> 'z'"
    );

    assert_eq!(
        q.wheres,
        vec![
            Where::new("o", "total", "between"),
            Where::new("o", "qty", "not between"),
            Where::new("", "name", "like"),
            Where::new("o", "status", "not in"),
            Where::new("o", "id", "in"),
            Where::new("o", "code", "!=")
        ]
    );
    assert!(q.subqueries.is_empty());
}

#[test]
fn test_long_flat_where_chain_within_default_depth() {
    let predicates: Vec<String> = (0..100).map(|i| format!("t.c{i} = {i}")).collect();
    let q = extract(&format!(
        "SELECT * FROM t WHERE {}",
        predicates.join(" AND ")
    ));

    assert_eq!(q.wheres.len(), 100);
    for (i, pred) in q.wheres.iter().enumerate() {
        assert_eq!(pred.column, format!("c{i}"));
    }
}

#[test]
fn test_mixed_and_or_chain_keeps_order() {
    let q = extract("SELECT * FROM t WHERE t.a = 1 OR t.b = 2 AND t.c = 3 OR t.d = 4");

    let columns: Vec<&str> = q.wheres.iter().map(|w| w.column.as_str()).collect();
    assert_eq!(columns, ["a", "b", "c", "d"]);
}

#[test]
fn test_where_qualifier_is_not_resolved() {
    let q = extract("SELECT * FROM users u WHERE u.id = 1 AND users.name = 'x'");

    assert_eq!(q.wheres[0].table, "u");
    assert_eq!(q.wheres[1].table, "users");
}

#[test]
fn test_where_bare_value_emits_nothing() {
    let q = extract("SELECT * FROM t WHERE TRUE AND t.id = 1");

    assert_eq!(q.wheres, vec![Where::new("t", "id", "=")]);
}

#[test]
fn test_nested_subqueries_attach_to_their_parent() {
    let q = extract("SELECT * FROM (SELECT * FROM (SELECT id FROM t) s1) s2");

    assert_eq!(q.subqueries.len(), 1);
    let middle = &q.subqueries[0];
    assert_eq!(middle.table.single_alias, "s2");
    assert!(middle.table.name.is_empty());
    assert_eq!(middle.subqueries.len(), 1);
    let inner = &middle.subqueries[0];
    assert_eq!(inner.table.name, "t");
    assert_eq!(inner.table.single_alias, "s1");
    assert_eq!(q.subquery_count(), 2);
    assert_eq!(q.nesting_depth(), 2);
}

#[test]
fn test_subquery_alias_does_not_clobber_inner_alias_map() {
    let q = extract("SELECT * FROM (SELECT t.id FROM things t WHERE t.id = 1) s");

    let sub = &q.subqueries[0];
    assert_eq!(sub.table.aliases.get("t").unwrap(), "things");
    assert_eq!(sub.table.single_alias, "s");
    assert_eq!(sub.table.columns_of("things"), ["id"]);
    assert_eq!(sub.wheres, vec![Where::new("t", "id", "=")]);
    assert!(q.wheres.is_empty());
}

#[test]
fn test_name_is_set_when_from_present() {
    for sql in [
        "SELECT * FROM a",
        "SELECT * FROM a, b",
        "SELECT a.id FROM a JOIN b ON a.id = b.id",
        "SELECT * FROM (SELECT 1) s, users"
    ] {
        assert!(!extract(sql).table.name.is_empty(), "{}", sql);
    }
}

#[test]
fn test_extraction_is_deterministic() {
    let sql = "SELECT u.id, COUNT(*) FROM users u JOIN orders o ON u.id = o.user_id \
               WHERE u.active = 1 OR o.total > 5";

    assert_eq!(extract(sql), extract(sql));
}

#[test]
fn test_insert_update_delete_are_unpopulated() {
    let cases = [
        ("INSERT INTO users (id) VALUES (1)", StatementKind::Insert),
        ("UPDATE users SET name = 'x' WHERE id = 1", StatementKind::Update),
        ("DELETE FROM users WHERE id = 1", StatementKind::Delete)
    ];
    for (sql, kind) in cases {
        let q = extract(sql);
        assert_eq!(q.kind, kind);
        assert_eq!(q, Query::new(kind));
    }
}

#[test]
fn test_other_statement_kind() {
    let q = extract("CREATE TABLE t (id INT)");

    assert_eq!(q.kind, StatementKind::Other);
    assert!(q.table.name.is_empty());
}

#[test]
fn test_extract_multiple_statements_keeps_order() {
    let queries = extract_queries(
        "SELECT * FROM a; DELETE FROM b; SELECT * FROM c;",
        SqlDialect::Generic,
        &ExtractConfig::default()
    )
    .unwrap();

    assert_eq!(queries.len(), 3);
    assert_eq!(queries[0].table.name, "a");
    assert_eq!(queries[1].kind, StatementKind::Delete);
    assert_eq!(queries[2].table.name, "c");
}

#[test]
fn test_batch_fails_on_any_statement() {
    let result = extract_queries(
        "SELECT * FROM a; SELECT * FROM b WHERE b.x IS NULL",
        SqlDialect::Generic,
        &ExtractConfig::default()
    );

    assert!(matches!(
        result,
        Err(ExtractError::UnsupportedExpression { .. })
    ));
}

#[test]
fn test_mysql_dialect() {
    let q = extract_query(
        "SELECT `u`.`id` FROM `users` `u` WHERE `u`.`id` = 1",
        SqlDialect::MySQL,
        &ExtractConfig::default()
    )
    .unwrap();

    assert_eq!(q.table.name, "users");
    assert_eq!(q.table.single_alias, "u");
    assert_eq!(q.table.columns_of("users"), ["id"]);
}

#[test]
fn test_postgresql_dialect() {
    let q = extract_query(
        "SELECT * FROM users WHERE users.name ILIKE 'a%'",
        SqlDialect::PostgreSQL,
        &ExtractConfig::default()
    )
    .unwrap();

    assert_eq!(q.wheres, vec![Where::new("users", "name", "ilike")]);
}

#[test]
fn test_invalid_sql_is_syntax_error() {
    assert!(matches!(
        extract_err("SELEKT * FORM users"),
        ExtractError::Syntax(_)
    ));
}
