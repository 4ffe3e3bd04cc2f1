//! End-to-end statement flows through the public API.
//!
//! These tests drive the builders against a scripted in-memory executor;
//! no real database is involved. Each script entry pins the exact SQL the
//! layer is expected to hand the execution primitive.

use mydao::{
    Condition, Dao, DaoError, DaoResult, DbExecutor, Quoter, Row, Sort, SqlDao, Value, qb,
};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Canned reply for one scripted statement.
enum Reply {
    Rows(Vec<Row>),
    Affected(u64),
    Fail,
}

/// Executor that asserts each incoming statement against a script.
struct ScriptDb {
    script: Mutex<VecDeque<(String, Reply)>>,
    last_id: i64,
}

impl ScriptDb {
    fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            last_id: 0,
        }
    }

    fn expect(self, sql: &str, reply: Reply) -> Self {
        self.script
            .lock()
            .unwrap()
            .push_back((sql.to_string(), reply));
        self
    }

    fn last_id(mut self, id: i64) -> Self {
        self.last_id = id;
        self
    }

    fn next_reply(&self, sql: &str) -> Reply {
        let (expected, reply) = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("statement arrived after script end");
        assert_eq!(sql, expected);
        reply
    }

    fn assert_done(&self) {
        assert!(
            self.script.lock().unwrap().is_empty(),
            "script has unconsumed statements"
        );
    }
}

impl DbExecutor for ScriptDb {
    async fn query(&self, sql: &str) -> DaoResult<Vec<Row>> {
        match self.next_reply(sql) {
            Reply::Rows(rows) => Ok(rows),
            Reply::Affected(_) => panic!("read statement got a write reply: {sql}"),
            Reply::Fail => Err(DaoError::execution("scripted failure")),
        }
    }

    async fn execute(&self, sql: &str) -> DaoResult<u64> {
        match self.next_reply(sql) {
            Reply::Affected(n) => Ok(n),
            Reply::Rows(_) => panic!("write statement got a read reply: {sql}"),
            Reply::Fail => Err(DaoError::execution("scripted failure")),
        }
    }

    async fn last_insert_id(&self) -> DaoResult<i64> {
        Ok(self.last_id)
    }
}

// ============================================
// Order lifecycle: insert, fetch, update, delete
// ============================================

#[tokio::test]
async fn test_order_lifecycle() {
    let db = ScriptDb::new()
        .last_id(42)
        .expect(
            "INSERT INTO `oc_order` (`customer_id`, `total`, `date_added`) \
             VALUES (7, 99.9, NOW())",
            Reply::Affected(1),
        )
        .expect(
            "SELECT * FROM `oc_order` WHERE (`order_id` = 42) LIMIT 0,1",
            Reply::Rows(vec![
                Row::new().set("order_id", 42).set("customer_id", 7).set("total", 99.9),
            ]),
        )
        .expect(
            "UPDATE `oc_order` SET `order_status_id` = 5 WHERE `order_id` = 42",
            Reply::Affected(1),
        )
        .expect("DELETE FROM `oc_order` WHERE `order_id` = 42", Reply::Affected(1));
    let dao = Dao::with_prefix(db, "oc_");

    let affected = dao
        .insert("order")
        .set("customer_id", 7)
        .set("total", 99.9)
        .set_raw("date_added", "NOW()")
        .execute(&dao)
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let id = dao.last_insert_id().await.unwrap();
    assert_eq!(id, 42);

    let order = dao
        .select("order")
        .where_(Condition::eq("order_id", id).unwrap())
        .one(&dao)
        .await
        .unwrap();
    assert_eq!(order.get("customer_id"), Some(&Value::Int(7)));

    let updated = dao
        .update("order")
        .set("order_status_id", 5)
        .where_(Condition::eq("order_id", id).unwrap())
        .execute(&dao)
        .await
        .unwrap();
    assert_eq!(updated, 1);

    let deleted = dao
        .delete("order")
        .where_(Condition::eq("order_id", id).unwrap())
        .execute(&dao)
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    dao.db().assert_done();
}

// ============================================
// Catalog listing: joins, ordering, index-by
// ============================================

#[tokio::test]
async fn test_catalog_listing_indexed() {
    let db = ScriptDb::new().expect(
        "SELECT `product_id`, `name` FROM `oc_product` \
         LEFT JOIN `oc_product_description` ON `product`.`product_id` = `product_description`.`product_id` \
         WHERE (`status` = 1) ORDER BY `name` ASC LIMIT 0,20",
        Reply::Rows(vec![
            Row::new().set("product_id", 10).set("name", "Apple"),
            Row::new().set("product_id", 11).set("name", "Pear"),
        ]),
    );
    let dao = Dao::with_prefix(db, "oc_");

    let products = dao
        .select("product")
        .select(&["product_id", "name"])
        .left_join(
            "product_description",
            "[[product.product_id]] = [[product_description.product_id]]",
        )
        .where_(Condition::eq("status", 1).unwrap())
        .order_by("name", Sort::Asc)
        .limit(20)
        .index_by("product_id")
        .all_indexed(&dao)
        .await;

    assert_eq!(products.len(), 2);
    assert_eq!(products["10"].get("name"), Some(&Value::from("Apple")));
    assert_eq!(products["11"].get("name"), Some(&Value::from("Pear")));
    dao.db().assert_done();
}

// ============================================
// Aggregates and totals
// ============================================

#[tokio::test]
async fn test_order_totals() {
    let db = ScriptDb::new()
        .expect(
            "SELECT COUNT(*) AS `n` FROM `oc_order` WHERE (`order_status_id` > 0)",
            Reply::Rows(vec![Row::new().set("n", 3)]),
        )
        .expect(
            "SELECT SUM(`total`) AS `n` FROM `oc_order` WHERE (`order_status_id` > 0)",
            Reply::Rows(vec![Row::new().set("n", "211.30")]),
        );
    let dao = Dao::with_prefix(db, "oc_");

    let qb = dao
        .select("order")
        .where_(Condition::raw("`order_status_id` > 0"));
    let count = qb.clone().count(&dao).await;
    let total = qb.sum("total", &dao).await;

    assert_eq!(count, 3.0);
    assert_eq!(total, 211.3);
    dao.db().assert_done();
}

// ============================================
// Failure policy through the public API
// ============================================

#[tokio::test]
async fn test_read_failure_yields_sentinels() {
    let db = ScriptDb::new()
        .expect("SELECT * FROM `order` LIMIT 0,1", Reply::Fail)
        .expect("SELECT COUNT(*) AS `n` FROM `order`", Reply::Fail);
    let dao = Dao::new(db);

    assert_eq!(dao.select("order").one(&dao).await, None);
    assert_eq!(dao.select("order").count(&dao).await, 0.0);
    dao.db().assert_done();
}

#[tokio::test]
async fn test_write_failure_propagates() {
    let db = ScriptDb::new().expect("DELETE FROM `order`", Reply::Fail);
    let dao = Dao::new(db);

    let err = dao.delete("order").execute(&dao).await.unwrap_err();
    assert!(err.is_execution());
    dao.db().assert_done();
}

// ============================================
// Rendered SQL is exactly what executes
// ============================================

#[tokio::test]
async fn test_to_sql_matches_executed_statement() {
    let qb = qb::select("order")
        .quoter(Quoter::new("oc_"))
        .where_(Condition::in_list("order_status_id", [1, 2]).unwrap())
        .order_by_desc("date_added");
    let sql = qb.to_sql();
    assert_eq!(
        sql,
        "SELECT * FROM `oc_order` WHERE (`order_status_id` IN (1, 2)) ORDER BY `date_added` DESC"
    );

    let db = ScriptDb::new().expect(&sql, Reply::Rows(Vec::new()));
    assert!(qb.all(&db).await.is_empty());
    db.assert_done();
}

#[test]
fn test_statement_carries_render_time() {
    let before = chrono::Utc::now();
    let stmt = qb::select("order").build();
    assert_eq!(stmt.sql, "SELECT * FROM `order`");
    assert!(stmt.rendered_at >= before);
}
