//! Benchmark for parse → reconcile → emit throughput.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use ddl_loader_core::{
    Crosswalk, Dataset, LoaderConfig, Reconciler, SchemaParser, StatementEmitter, Value,
};

/// Generates a wide `CREATE TABLE` with `columns` bracketed declarations.
fn wide_ddl(columns: usize) -> String {
    let mut ddl =
        String::from("CREATE TABLE [dbo].[Wide](\n\t[RecID] [int] IDENTITY(1,1) NOT NULL");
    for i in 0..columns {
        ddl.push_str(&format!(",\n\t[Col{}] [varchar](50) NULL", i));
    }
    ddl.push_str(",\n CONSTRAINT [PK_Wide] PRIMARY KEY CLUSTERED ([RecID] ASC)\n) ON [PRIMARY]");
    ddl
}

/// Builds a dataset with `rows` rows over the generated columns.
fn rows(columns: usize, rows: usize) -> Dataset {
    let names = (0..columns).map(|i| format!("src{}", i)).collect();
    let data = (0..rows)
        .map(|r| {
            (0..columns)
                .map(|c| {
                    if (r + c) % 7 == 0 {
                        Value::Null
                    } else {
                        Value::Text(format!("value-{}-{}", r, c))
                    }
                })
                .collect()
        })
        .collect();
    Dataset::new(names, data).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let ddl = wide_ddl(200);
    c.bench_function("parse_200_columns", |b| {
        b.iter(|| SchemaParser::parse(black_box(&ddl)).unwrap())
    });
}

fn bench_reconcile_and_emit(c: &mut Criterion) {
    let columns = 50;
    let schema = SchemaParser::parse(&wide_ddl(columns))
        .unwrap()
        .requirements;
    let config = LoaderConfig::default();
    let crosswalk: Crosswalk = (0..columns)
        .map(|i| (format!("src{}", i), format!("Col{}", i)))
        .collect();
    let reference = Dataset::new(
        vec!["RecID".to_string()],
        (1..=1000).map(|k| vec![Value::Integer(k)]).collect(),
    )
    .unwrap();
    let dataset = rows(columns, 10_000);

    c.bench_function("reconcile_emit_10k_rows", |b| {
        b.iter(|| {
            let reconciled = Reconciler::new(&schema, &config)
                .reconcile(&crosswalk, dataset.clone(), &reference, "RecID")
                .unwrap();
            black_box(StatementEmitter::new(&config).emit(&schema.table_name, &reconciled))
        })
    });
}

criterion_group!(benches, bench_parse, bench_reconcile_and_emit);
criterion_main!(benches);
