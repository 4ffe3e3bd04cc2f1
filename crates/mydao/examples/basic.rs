//! Basic usage example for mydao
//!
//! Run with: cargo run --example basic -p mydao
//!
//! The layer drives any DbExecutor; this example wires a tiny in-memory
//! executor that prints every statement it receives and serves canned
//! rows, so it runs without a MySQL server.

use mydao::{Condition, Dao, DaoError, DaoResult, DbExecutor, Row, SqlDao, Value};

/// Demo executor: prints statements, returns canned order rows for reads.
struct DemoDb {
    orders: Vec<Row>,
}

impl DemoDb {
    fn new() -> Self {
        Self {
            orders: vec![
                Row::new()
                    .set("order_id", 1)
                    .set("customer", "alice")
                    .set("total", 49.90)
                    .set("order_status_id", 5),
                Row::new()
                    .set("order_id", 2)
                    .set("customer", "bob")
                    .set("total", 12.00)
                    .set("order_status_id", 1),
            ],
        }
    }
}

impl DbExecutor for DemoDb {
    async fn query(&self, sql: &str) -> DaoResult<Vec<Row>> {
        println!("SQL> {sql}");
        if sql.contains(" AS `n` ") {
            return Ok(vec![Row::new().set("n", self.orders.len() as i64)]);
        }
        Ok(self.orders.clone())
    }

    async fn execute(&self, sql: &str) -> DaoResult<u64> {
        println!("SQL> {sql}");
        Ok(1)
    }

    async fn last_insert_id(&self) -> DaoResult<i64> {
        Ok(3)
    }
}

#[tokio::main]
async fn main() -> Result<(), DaoError> {
    // One prefix configured at the facade, inherited by every builder
    let dao = Dao::with_prefix(DemoDb::new(), "oc_");

    // ============================================
    // Example 1: Insert
    // ============================================
    println!("=== Insert ===");

    dao.insert("order")
        .set("customer", "carol")
        .set("total", 75.50)
        .set_opt("comment", Option::<&str>::None)
        .set_raw("date_added", "NOW()")
        .execute(&dao)
        .await?;

    let id = dao.last_insert_id().await?;
    println!("New order id: {id}\n");

    // ============================================
    // Example 2: Select one / all
    // ============================================
    println!("=== Select ===");

    let order = dao
        .select("order")
        .where_(Condition::eq("order_id", 1)?)
        .one(&dao)
        .await;
    println!("First order: {order:?}\n");

    let open = dao
        .select("order")
        .select(&["order_id", "customer", "total"])
        .where_(Condition::in_list("order_status_id", [1, 5])?)
        .order_by_desc("total")
        .limit(10)
        .all(&dao)
        .await;
    println!("Open orders: {} row(s)\n", open.len());

    // ============================================
    // Example 3: Condition trees
    // ============================================
    println!("=== Condition trees ===");

    let cond = Condition::or([
        Condition::like("customer", ["ali"])?,
        Condition::and([
            Condition::eq("order_status_id", 5)?,
            Condition::raw("`total` > 20"),
        ]),
    ]);
    let matched = dao.select("order").where_(cond).all(&dao).await;
    println!("Matched: {} row(s)\n", matched.len());

    // ============================================
    // Example 4: Aggregates
    // ============================================
    println!("=== Aggregates ===");

    let count = dao.select("order").count(&dao).await;
    let total = dao.select("order").sum("total", &dao).await;
    println!("count = {count}, sum(total) = {total}\n");

    // ============================================
    // Example 5: Update and delete
    // ============================================
    println!("=== Update / Delete ===");

    let updated = dao
        .update("order")
        .set("order_status_id", 3)
        .where_(Condition::eq("order_id", id)?)
        .execute(&dao)
        .await?;
    println!("Updated {updated} row(s)");

    let deleted = dao
        .delete("order")
        .where_(Condition::eq("order_id", id)?)
        .execute(&dao)
        .await?;
    println!("Deleted {deleted} row(s)\n");

    // ============================================
    // Example 6: Hand-authored command
    // ============================================
    println!("=== Command ===");

    let totals = dao
        .command(
            "SELECT [[order_status_id]], SUM([[total]]) AS `total` \
             FROM {{%order}} GROUP BY [[order_status_id]] HAVING `total` > :floor",
        )
        .bind_value(":floor", 10)
        .all(&dao)
        .await;
    println!("Status totals: {} row(s)\n", totals.len());

    // ============================================
    // Example 7: Inspecting rendered SQL
    // ============================================
    println!("=== to_sql ===");

    let qb = dao
        .select("order")
        .where_(Condition::not_in("order_status_id", [0])?)
        .order_by_asc("order_id");
    println!("{}", qb.to_sql());

    let scalar = dao
        .select("order")
        .select(&["customer"])
        .where_(Condition::eq("order_id", 1)?)
        .scalar(&dao)
        .await;
    if let Some(Value::Str(name)) = scalar {
        println!("First customer: {name}");
    }

    Ok(())
}
