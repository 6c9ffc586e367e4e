//! Column reordering.

use tracing::debug;

use crate::types::DataSet;

/// Move the listed columns (those that exist, in listed order) to the front.
///
/// Remaining columns follow in their original relative order. A name listed more than once is
/// placed at its first position only.
pub fn reorder_columns(dataset: &mut DataSet, order: &[String]) {
    let mut permutation: Vec<usize> = Vec::with_capacity(dataset.column_count());
    for name in order {
        match dataset.schema.index_of(name) {
            Some(idx) if !permutation.contains(&idx) => permutation.push(idx),
            Some(_) => {}
            None => debug!(column = %name, "columns_order: column not found, skipping"),
        }
    }
    let rest: Vec<usize> = (0..dataset.column_count())
        .filter(|idx| !permutation.contains(idx))
        .collect();
    permutation.extend(rest);
    dataset.reorder_columns(&permutation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataType, Value};

    fn abcd() -> DataSet {
        DataSet::from_columns(
            ["a", "b", "c", "d"]
                .into_iter()
                .enumerate()
                .map(|(i, name)| (name, DataType::Int64, vec![Value::Int64(i as i64)]))
                .collect(),
        )
    }

    fn names(ds: &DataSet) -> Vec<&str> {
        ds.schema.field_names().collect()
    }

    #[test]
    fn listed_columns_come_first_then_the_rest_in_original_order() {
        let mut ds = abcd();
        reorder_columns(&mut ds, &["c".to_string(), "missing".to_string(), "a".to_string()]);
        assert_eq!(names(&ds), vec!["c", "a", "b", "d"]);
        assert_eq!(
            ds.rows[0],
            vec![Value::Int64(2), Value::Int64(0), Value::Int64(1), Value::Int64(3)]
        );
    }

    #[test]
    fn repeated_names_are_placed_once() {
        let mut ds = abcd();
        reorder_columns(&mut ds, &["d".to_string(), "d".to_string()]);
        assert_eq!(names(&ds), vec!["d", "a", "b", "c"]);
    }

    #[test]
    fn empty_order_keeps_columns() {
        let mut ds = abcd();
        reorder_columns(&mut ds, &[]);
        assert_eq!(names(&ds), vec!["a", "b", "c", "d"]);
    }
}
