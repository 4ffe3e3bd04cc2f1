//! DELETE builder.

use crate::client::DbExecutor;
use crate::condition::Condition;
use crate::error::DaoResult;
use crate::ident::Quoter;
use crate::qb::traits::SqlDao;

/// DELETE statement builder.
///
/// An absent or empty condition deletes every row in the table; callers
/// wanting a guard must pass an explicit condition.
#[derive(Clone, Debug)]
pub struct DeleteDao {
    /// Table name
    table: String,
    /// WHERE condition; None or empty omits the clause
    where_cond: Option<Condition>,
    /// Quoting configuration
    quoter: Quoter,
}

impl DeleteDao {
    /// Create a DELETE builder for a table.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_cond: None,
            quoter: Quoter::default(),
        }
    }

    /// Inject the quoting configuration (table prefix, delimiters).
    pub fn quoter(mut self, quoter: Quoter) -> Self {
        self.quoter = quoter;
        self
    }

    /// Set the WHERE condition.
    pub fn where_(mut self, cond: Condition) -> Self {
        self.where_cond = Some(cond);
        self
    }

    fn render(&self) -> String {
        let q = &self.quoter;
        let mut sql = format!("DELETE FROM {}", q.quote_table(&self.table));
        if let Some(cond) = &self.where_cond {
            let fragment = cond.build(q);
            if !fragment.is_empty() {
                sql.push_str(" WHERE ");
                sql.push_str(&fragment);
            }
        }
        q.resolve_placeholders(&sql)
    }

    /// Run the statement, returning the affected-row count.
    pub async fn execute(self, db: &impl DbExecutor) -> DaoResult<u64> {
        let stmt = self.build();
        db.execute(&stmt.sql).await
    }
}

impl SqlDao for DeleteDao {
    fn build_sql(&self) -> String {
        self.render()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_simple_delete() {
        let qb = DeleteDao::new("order").where_(Condition::eq("order_id", 1).unwrap());
        assert_eq!(qb.to_sql(), "DELETE FROM `order` WHERE `order_id` = 1");
    }

    #[test]
    fn test_delete_with_prefix() {
        let qb = DeleteDao::new("order")
            .quoter(Quoter::new("oc_"))
            .where_(Condition::eq("order_id", 1).unwrap());
        assert_eq!(qb.to_sql(), "DELETE FROM `oc_order` WHERE `order_id` = 1");
    }

    #[test]
    fn test_delete_without_condition_is_full_table() {
        let qb = DeleteDao::new("order_history");
        assert_eq!(qb.to_sql(), "DELETE FROM `order_history`");
    }

    #[test]
    fn test_delete_empty_condition_is_full_table() {
        let qb = DeleteDao::new("order_history").where_(Condition::empty());
        assert_eq!(qb.to_sql(), "DELETE FROM `order_history`");
    }

    #[test]
    fn test_delete_with_in_condition() {
        let qb = DeleteDao::new("order").where_(Condition::in_list("order_id", [1, 2, 3]).unwrap());
        assert_eq!(
            qb.to_sql(),
            "DELETE FROM `order` WHERE `order_id` IN (1, 2, 3)"
        );
    }

    #[test]
    fn test_delete_empty_in_never_matches() {
        let qb = DeleteDao::new("order")
            .where_(Condition::in_list("order_id", Vec::<i32>::new()).unwrap());
        assert_eq!(qb.to_sql(), "DELETE FROM `order` WHERE 0 = 1");
    }

    #[test]
    fn test_delete_with_substitution() {
        let cond = Condition::raw("order_id = :id").with_subs([(":id", Value::from(9).to_literal())]);
        let qb = DeleteDao::new("order").where_(cond);
        assert_eq!(qb.to_sql(), "DELETE FROM `order` WHERE order_id = 9");
    }
}
