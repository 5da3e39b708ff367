// File: crates/plot-env/tests/binning.rs
// Purpose: Validate histogram binning: edges, boundary assignment, grouping, stacking and errors.

use plot_env::stats::{GROUP, MAX_BINS};
use plot_env::{bin, BinOptions, BinPosition, Column, ColumnType, Table};

fn nums(table: &Table, name: &str) -> Vec<f64> {
    table
        .column(name)
        .and_then(Column::as_numbers)
        .expect("numeric column")
        .iter()
        .map(|v| v.expect("non-null"))
        .collect()
}

#[test]
fn example_column_matches_floor_oracle() {
    let data = [1.0, 2.0, 2.0, 3.0, 8.0, 9.0, 9.0, 9.0];
    let (table, aes) = bin(&Column::numeric(data), None, &BinOptions::default().bins(3)).expect("bin");

    let x_min = nums(&table, "xMin");
    let x_max = nums(&table, "xMax");
    let y_max = nums(&table, "yMax");
    assert_eq!(x_min.len(), 3);
    assert_eq!(x_min[0], 1.0);
    assert_eq!(x_max[2], 9.0);

    let bin_width = 8.0 / 3.0;
    let mut expected = [0.0; 3];
    for v in data {
        let idx = (((v - 1.0) / bin_width).floor() as usize).min(2);
        expected[idx] += 1.0;
    }
    assert_eq!(y_max, expected.to_vec());
    assert_eq!(y_max.iter().sum::<f64>(), 8.0);
    assert!(nums(&table, "yMin").iter().all(|&v| v == 0.0));

    assert_eq!(aes.get("yMax"), Some("yMax"));
    assert_eq!(aes.get("xMin"), Some("xMin"));
    assert!(!aes.contains("fill"));
    assert!(!table.contains(GROUP));
}

#[test]
fn interior_boundary_belongs_to_upper_bin() {
    let (table, _) = bin(&Column::numeric([0.0, 1.0, 2.0, 3.0, 4.0]), None, &BinOptions::default().bins(4)).unwrap();
    assert_eq!(nums(&table, "xMin"), vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(nums(&table, "xMax"), vec![1.0, 2.0, 3.0, 4.0]);
    // 3.0 opens the last bin and 4.0 is the closed top edge.
    assert_eq!(nums(&table, "yMax"), vec![1.0, 1.0, 1.0, 2.0]);
}

#[test]
fn grouped_stacked_uses_first_occurrence_order() {
    let values = Column::numeric([0.0, 1.0, 2.0, 3.0, 4.0]);
    let groups = Column::categorical(["b", "a", "b", "a", "b"]);
    let (table, aes) = bin(&values, Some(&groups), &BinOptions::default().bins(2)).unwrap();

    assert_eq!(aes.get("fill"), Some(GROUP));
    assert_eq!(
        table.column(GROUP),
        Some(&Column::categorical(["b", "b", "a", "a"]))
    );
    assert_eq!(nums(&table, "yMin"), vec![0.0, 0.0, 1.0, 2.0]);
    assert_eq!(nums(&table, "yMax"), vec![1.0, 2.0, 2.0, 3.0]);
}

#[test]
fn grouped_overlaid_starts_at_zero() {
    let values = Column::numeric([0.0, 1.0, 2.0, 3.0, 4.0]);
    let groups = Column::categorical(["b", "a", "b", "a", "b"]);
    let opts = BinOptions::default().bins(2).position(BinPosition::Overlaid);
    let (table, _) = bin(&values, Some(&groups), &opts).unwrap();

    assert_eq!(nums(&table, "yMin"), vec![0.0; 4]);
    assert_eq!(nums(&table, "yMax"), vec![1.0, 2.0, 1.0, 1.0]);
}

#[test]
fn boolean_groups_keep_their_type() {
    let values = Column::numeric([1.0, 2.0, 3.0]);
    let groups = Column::boolean([true, false, true]);
    let (table, _) = bin(&values, Some(&groups), &BinOptions::default().bins(1)).unwrap();
    assert_eq!(table.column_type(GROUP), Some(ColumnType::Boolean));
    assert_eq!(table.column(GROUP), Some(&Column::boolean([true, false])));
    assert_eq!(nums(&table, "yMax"), vec![2.0, 3.0]);
}

#[test]
fn temporal_edges_stay_temporal() {
    let values = Column::temporal([0.0, 60_000.0, 120_000.0]);
    let (table, _) = bin(&values, None, &BinOptions::default().bins(2)).unwrap();
    assert_eq!(table.column_type("xMin"), Some(ColumnType::Temporal));
    assert_eq!(table.column_type("xMax"), Some(ColumnType::Temporal));
    assert_eq!(table.column_type("yMax"), Some(ColumnType::Numeric));
}

#[test]
fn sturges_bin_count_when_unspecified() {
    let (table, _) = bin(&Column::numeric((0..8).map(f64::from)), None, &BinOptions::default()).unwrap();
    assert_eq!(table.len(), 4);
}

#[test]
fn empty_column_gives_empty_table() {
    let (table, aes) = bin(&Column::numeric([]), None, &BinOptions::default().bins(5)).unwrap();
    assert_eq!(table.len(), 0);
    assert_eq!(table.column_count(), 4);
    assert_eq!(aes.len(), 4);

    let all_null = Column::Numeric(vec![None, Some(f64::NAN)]);
    let (table, _) = bin(&all_null, None, &BinOptions::default()).unwrap();
    assert!(table.is_empty());
}

#[test]
fn null_cells_are_skipped() {
    let values = Column::Numeric(vec![Some(1.0), None, Some(3.0), Some(f64::NAN)]);
    let (table, _) = bin(&values, None, &BinOptions::default().bins(2)).unwrap();
    assert_eq!(nums(&table, "yMax").iter().sum::<f64>(), 2.0);
}

#[test]
fn point_domain_collects_in_last_bin() {
    let (table, _) = bin(&Column::numeric([5.0, 5.0, 5.0]), None, &BinOptions::default().bins(3)).unwrap();
    assert_eq!(nums(&table, "yMax"), vec![0.0, 0.0, 3.0]);
    assert_eq!(nums(&table, "xMax"), vec![5.0; 3]);
}

#[test]
fn invalid_input_is_reported() {
    let words = Column::categorical(["x", "y"]);
    let err = bin(&words, None, &BinOptions::default()).unwrap_err();
    assert!(err.is_invalid_input(), "{err}");

    let err = bin(&Column::numeric([1.0]), None, &BinOptions::default().bins(0)).unwrap_err();
    assert!(err.is_invalid_input(), "{err}");

    for count in [MAX_BINS + 1, usize::MAX] {
        let err = bin(&Column::numeric([1.0, 2.0]), None, &BinOptions::default().bins(count)).unwrap_err();
        assert!(err.is_invalid_input(), "{err}");
    }
    let (table, _) = bin(&Column::numeric([1.0, 2.0]), None, &BinOptions::default().bins(MAX_BINS)).unwrap();
    assert_eq!(table.len(), MAX_BINS);

    let numbers_as_groups = Column::numeric([1.0, 2.0]);
    let err = bin(&Column::numeric([1.0, 2.0]), Some(&numbers_as_groups), &BinOptions::default()).unwrap_err();
    assert!(err.is_invalid_input(), "{err}");

    let short_groups = Column::categorical(["a"]);
    let err = bin(&Column::numeric([1.0, 2.0]), Some(&short_groups), &BinOptions::default()).unwrap_err();
    assert!(err.is_invalid_input(), "{err}");
}

#[test]
fn input_is_not_mutated() {
    let values = Column::numeric([3.0, 1.0, 2.0]);
    let before = values.clone();
    let _ = bin(&values, None, &BinOptions::default().bins(2)).unwrap();
    assert_eq!(values, before);
}
