use rusqlite::Connection;
use storefront_core::db::migrations::latest_version;
use storefront_core::db::{open_db, open_db_in_memory, DbError, DbLocation};

fn user_version(conn: &Connection) -> u32 {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap()
}

fn tables(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name;",
        )
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

#[test]
fn fresh_store_has_every_table_at_latest_version() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(user_version(&conn), latest_version());
    assert_eq!(
        tables(&conn),
        ["order_product", "orders", "products", "users"]
    );
}

#[test]
fn connections_enforce_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: bool = conn
        .pragma_query_value(None, "foreign_keys", |row| row.get(0))
        .unwrap();
    assert!(enabled);

    let orphan = conn.execute(
        "INSERT INTO orders (order_date, user_id) VALUES ('2024-01-01T00:00:00Z', 42);",
        [],
    );
    assert!(orphan.is_err());
}

#[test]
fn reopening_a_file_keeps_rows_and_version() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storefront.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        conn.execute(
            "INSERT INTO products (product_name, price) VALUES ('Lamp', 19.5);",
            [],
        )
        .unwrap();
    }

    let conn = DbLocation::from_path(&path).open().unwrap();
    assert_eq!(user_version(&conn), latest_version());
    let names: String = conn
        .query_row("SELECT group_concat(product_name) FROM products;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(names, "Lamp");
}

#[test]
fn version_one_file_is_upgraded_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v1.sqlite3");

    {
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(include_str!("../src/db/migrations/0001_users_products.sql"))
            .unwrap();
        conn.pragma_update(None, "user_version", 1).unwrap();
        conn.execute(
            "INSERT INTO users (name, email) VALUES ('Ada', 'ada@example.com');",
            [],
        )
        .unwrap();
    }

    let conn = open_db(&path).unwrap();
    assert_eq!(user_version(&conn), latest_version());
    assert!(tables(&conn).contains(&"orders".to_string()));
    let users: i64 = conn
        .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(users, 1);
}

#[test]
fn newer_schema_version_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .pragma_update(None, "user_version", 999)
        .unwrap();

    let err = open_db(&path).unwrap_err();
    assert!(
        matches!(
            err,
            DbError::UnsupportedSchemaVersion { db_version: 999, latest_supported }
                if latest_supported == latest_version()
        ),
        "unexpected error: {err}"
    );
}

#[test]
fn link_rows_are_unique_and_follow_their_order() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO users (name, email) VALUES ('Ada', 'ada@example.com');
         INSERT INTO products (product_name, price) VALUES ('Lamp', 10.0);
         INSERT INTO orders (order_date, user_id) VALUES ('2024-01-01T00:00:00Z', 1);
         INSERT INTO order_product (order_id, product_id) VALUES (1, 1);",
    )
    .unwrap();

    assert!(conn
        .execute("INSERT INTO order_product (order_id, product_id) VALUES (1, 1);", [])
        .is_err());

    conn.execute("DELETE FROM orders WHERE id = 1;", []).unwrap();
    let links: i64 = conn
        .query_row("SELECT COUNT(*) FROM order_product;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(links, 0);
}
