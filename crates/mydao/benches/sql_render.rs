use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use mydao::{Condition, Quoter, SelectDao, SqlDao, qb};

/// Build a SELECT with `n` AND-joined equality conditions:
/// SELECT ... FROM `oc_order` WHERE (`col0` = 0) AND (`col1` = 1) ...
fn build_order_select(n: usize) -> SelectDao {
    let mut sel = qb::select("order")
        .quoter(Quoter::new("oc_"))
        .select(&["order_id", "total", "date_added"]);
    for i in 0..n {
        sel = sel.and_where(Condition::eq(format!("col{i}"), i as i64).unwrap());
    }
    sel.order_by_desc("date_added").limit(20)
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_render/select");

    for n in [1, 5, 10, 50] {
        let sel = build_order_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &sel, |b, sel| {
            b.iter(|| black_box(sel.to_sql()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_render/build_and_render");

    for n in [1, 5, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let sel = build_order_select(n);
                black_box(sel.to_sql());
            });
        });
    }

    group.finish();
}

fn bench_in_list_condition(c: &mut Criterion) {
    let quoter = Quoter::new("oc_");
    let mut group = c.benchmark_group("sql_render/in_list");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let cond = Condition::in_list("order_id", values.iter().copied()).unwrap();
                black_box(cond.build(&quoter));
            });
        });
    }

    group.finish();
}

fn bench_placeholder_resolution(c: &mut Criterion) {
    let quoter = Quoter::new("oc_");
    let mut group = c.benchmark_group("sql_render/resolve_placeholders");

    for n in [1, 5, 10, 50] {
        let mut sql = String::from("SELECT ");
        for i in 0..n {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push_str(&format!("[[col{i}]]"));
        }
        sql.push_str(" FROM {{%order}}");
        group.bench_with_input(BenchmarkId::from_parameter(n), &sql, |b, sql| {
            b.iter(|| black_box(quoter.resolve_placeholders(sql)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_render,
    bench_build_and_render,
    bench_in_list_condition,
    bench_placeholder_resolution
);
criterion_main!(benches);
