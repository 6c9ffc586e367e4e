use csv_cleaner::config::CleaningRules;
use csv_cleaner::processing::apply_cleaning;
use csv_cleaner::types::{DataSet, DataType, Value};
use proptest::prelude::*;

fn text_cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        1 => Just(Value::Null),
        4 => "[ a-c]{0,4}".prop_map(Value::Utf8),
    ]
}

fn int_cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        1 => Just(Value::Null),
        4 => (0i64..4).prop_map(Value::Int64),
    ]
}

/// Small tables with a text column and an integer column, so that duplicates and nulls are
/// common.
fn table() -> impl Strategy<Value = DataSet> {
    (0usize..12).prop_flat_map(|rows| {
        (
            prop::collection::vec(text_cell(), rows),
            prop::collection::vec(int_cell(), rows),
        )
            .prop_map(|(t, n)| {
                DataSet::from_columns(vec![("t", DataType::Utf8, t), ("n", DataType::Int64, n)])
            })
    })
}

fn all_steps() -> CleaningRules {
    let mut rules = CleaningRules {
        strip_whitespace: true,
        drop_na_rows_if_all_na: true,
        drop_duplicates: true,
        columns_order: Some(vec!["n".to_string()]),
        ..CleaningRules::default()
    };
    rules.fillna.insert("n".to_string(), Value::Int64(0));
    rules
}

proptest! {
    #[test]
    fn cleaning_never_adds_rows(ds in table()) {
        let rows_in = ds.row_count();
        let (cleaned, report) = apply_cleaning(ds, &all_steps());
        prop_assert_eq!(report.rows_in, rows_in);
        prop_assert_eq!(report.rows_out, Some(cleaned.row_count()));
        prop_assert!(cleaned.row_count() <= rows_in);
    }

    #[test]
    fn dedup_is_idempotent(ds in table()) {
        let rules = all_steps();
        let (once, _) = apply_cleaning(ds, &rules);
        let (twice, report) = apply_cleaning(once.clone(), &rules);
        prop_assert_eq!(report.dropped_duplicates, 0);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn strip_is_idempotent(ds in table()) {
        let rules = CleaningRules { strip_whitespace: true, ..CleaningRules::default() };
        let (once, _) = apply_cleaning(ds, &rules);
        let (twice, _) = apply_cleaning(once.clone(), &rules);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn listed_columns_come_first(ds in table()) {
        let rules = CleaningRules {
            columns_order: Some(vec!["n".to_string(), "missing".to_string(), "n".to_string()]),
            ..CleaningRules::default()
        };
        let (cleaned, _) = apply_cleaning(ds, &rules);
        prop_assert_eq!(cleaned.schema.field_names().collect::<Vec<_>>(), vec!["n", "t"]);
    }

    #[test]
    fn nothing_to_fill_reports_zero(values in prop::collection::vec(0i64..100, 0..10)) {
        let ds = DataSet::from_columns(vec![(
            "n",
            DataType::Int64,
            values.into_iter().map(Value::Int64).collect(),
        )]);
        let mut rules = CleaningRules::default();
        rules.fillna.insert("n".to_string(), Value::Int64(-1));
        let (_, report) = apply_cleaning(ds, &rules);
        prop_assert_eq!(report.filled.get("n"), Some(&0));
    }
}
