//! Join semantics over small tables: the four join kinds, row-count
//! accounting, and ordering of the merged output.

use braid_core::{join, Join, JoinKind, Row, Table, TableSchema, Value};

/// colors with a number: green/1, yellow/2, red/3
fn color_num() -> Table {
    Table::from_rows(
        TableSchema::new(["color", "num"]).unwrap(),
        [
            Row::from(vec![Value::from("green"), Value::Integer(1)]),
            Row::from(vec![Value::from("yellow"), Value::Integer(2)]),
            Row::from(vec![Value::from("red"), Value::Integer(3)]),
        ],
    )
    .unwrap()
}

/// colors with a size: green/S, yellow/M, pink/L
fn color_size() -> Table {
    Table::from_rows(
        TableSchema::new(["color", "size"]).unwrap(),
        [
            Row::from(vec![Value::from("green"), Value::from("S")]),
            Row::from(vec![Value::from("yellow"), Value::from("M")]),
            Row::from(vec![Value::from("pink"), Value::from("L")]),
        ],
    )
    .unwrap()
}

fn column_values(table: &Table, column: &str) -> Vec<Value> {
    table.column(column).unwrap().cloned().collect()
}

#[test_log::test]
fn inner_join() -> eyre::Result<()> {
    let merged = join(&color_num(), &color_size(), JoinKind::Inner)?;
    assert_eq!(merged.schema().columns(), &["color", "num", "size"]);
    assert_eq!(merged.shape(), (2, 3));
    assert_eq!(
        column_values(&merged, "color"),
        vec![Value::from("green"), Value::from("yellow")]
    );
    Ok(())
}

#[test_log::test]
fn outer_join() -> eyre::Result<()> {
    let merged = join(&color_num(), &color_size(), JoinKind::Outer)?;
    assert_eq!(merged.shape(), (4, 3));
    // left rows first in left order, then unmatched right rows
    assert_eq!(
        column_values(&merged, "color"),
        vec![
            Value::from("green"),
            Value::from("yellow"),
            Value::from("red"),
            Value::from("pink"),
        ]
    );
    assert_eq!(
        column_values(&merged, "size"),
        vec![
            Value::from("S"),
            Value::from("M"),
            Value::Null,
            Value::from("L"),
        ]
    );
    assert_eq!(
        column_values(&merged, "num"),
        vec![
            Value::Integer(1),
            Value::Integer(2),
            Value::Integer(3),
            Value::Null,
        ]
    );
    Ok(())
}

#[test_log::test]
fn left_join() -> eyre::Result<()> {
    let merged = join(&color_num(), &color_size(), JoinKind::Left)?;
    assert_eq!(merged.shape(), (3, 3));
    assert_eq!(
        column_values(&merged, "size"),
        vec![Value::from("S"), Value::from("M"), Value::Null]
    );
    Ok(())
}

#[test_log::test]
fn right_join() -> eyre::Result<()> {
    let merged = join(&color_num(), &color_size(), JoinKind::Right)?;
    assert_eq!(merged.shape(), (3, 3));
    assert_eq!(
        column_values(&merged, "num"),
        vec![Value::Integer(1), Value::Integer(2), Value::Null]
    );
    Ok(())
}

#[test_log::test]
fn row_counts_are_monotone() -> eyre::Result<()> {
    let a = color_num();
    let b = color_size();
    let inner = join(&a, &b, JoinKind::Inner)?.len();
    let left = join(&a, &b, JoinKind::Left)?.len();
    let right = join(&a, &b, JoinKind::Right)?.len();
    let outer = join(&a, &b, JoinKind::Outer)?.len();
    assert!(inner <= left && left <= outer);
    assert!(inner <= right && right <= outer);
    Ok(())
}

#[test_log::test]
fn outer_join_is_symmetric_in_row_count() -> eyre::Result<()> {
    let a = color_num();
    let b = color_size();
    assert_eq!(
        join(&a, &b, JoinKind::Outer)?.len(),
        join(&b, &a, JoinKind::Outer)?.len()
    );
    Ok(())
}

#[test_log::test]
fn inner_count_is_product_per_key() -> eyre::Result<()> {
    // key 1 occurs 2x3 ways, key 2 occurs 1x1, key 3 only on the left
    let a = Table::from_rows(
        TableSchema::new(["k", "a"]).unwrap(),
        [1, 1, 2, 3]
            .into_iter()
            .enumerate()
            .map(|(idx, k)| Row::from(vec![Value::Integer(k), Value::Integer(idx as i64)])),
    )?;
    let b = Table::from_rows(
        TableSchema::new(["k", "b"]).unwrap(),
        [1, 1, 1, 2]
            .into_iter()
            .enumerate()
            .map(|(idx, k)| Row::from(vec![Value::Integer(k), Value::Integer(idx as i64)])),
    )?;
    let merged = join(&a, &b, JoinKind::Inner)?;
    assert_eq!(merged.len(), 2 * 3 + 1 * 1);
    Ok(())
}

#[test_log::test]
fn left_join_keeps_every_left_row() -> eyre::Result<()> {
    let a = color_num();
    let merged = join(&a, &color_size(), JoinKind::Left)?;
    assert!(merged.len() >= a.len());
    Ok(())
}

#[test_log::test]
fn movie_ratings() -> eyre::Result<()> {
    let movies = Table::from_rows(
        TableSchema::new(["movie_id", "title"]).unwrap(),
        (1..=5).map(|id| Row::from(vec![Value::Integer(id), Value::from(format!("movie {id}"))])),
    )?
    .with_name("movies");

    // repeated movie_id values on the rating side, every one resolvable
    let rated_ids = [1, 1, 1, 2, 2, 3, 4, 4, 4, 4, 5, 5];
    let ratings = Table::from_rows(
        TableSchema::new(["user_id", "movie_id", "rating", "timestamp"]).unwrap(),
        rated_ids.iter().enumerate().map(|(idx, &movie_id)| {
            Row::from(vec![
                Value::Integer(idx as i64 + 100),
                Value::Integer(movie_id),
                Value::Integer((idx % 5) as i64 + 1),
                Value::Integer(880_000_000 + idx as i64),
            ])
        }),
    )?
    .with_name("ratings");

    let movie_ratings = Join::new(&movies, &ratings)
        .kind(JoinKind::Inner)
        .run()?;

    // every rating matched exactly one movie
    assert_eq!(movie_ratings.len(), ratings.len());
    // two movie columns plus four rating columns, minus the shared key
    assert_eq!(movie_ratings.shape().1, 2 + 4 - 1);
    assert_eq!(
        movie_ratings.schema().columns(),
        &["movie_id", "title", "user_id", "rating", "timestamp"]
    );

    // movie 1 and its title listed once per matching rating
    let titles = column_values(&movie_ratings, "title");
    assert_eq!(
        titles.iter().filter(|t| **t == Value::from("movie 1")).count(),
        3
    );
    Ok(())
}

#[test_log::test]
fn explicit_keys_override_detection() -> eyre::Result<()> {
    let a = Table::from_rows(
        TableSchema::new(["station", "dockcount"]).unwrap(),
        [Row::from(vec![Value::from("pine st"), Value::Integer(18)])],
    )?;
    let b = Table::from_rows(
        TableSchema::new(["station", "dockcount"]).unwrap(),
        [Row::from(vec![Value::from("pine st"), Value::Integer(20)])],
    )?;
    // without .on, both columns would be keys and nothing would match
    assert!(join(&a, &b, JoinKind::Inner)?.is_empty());
    let merged = Join::new(&a, &b).on(["station"]).run()?;
    assert_eq!(merged.shape(), (1, 3));
    assert_eq!(
        merged.schema().columns(),
        &["station", "left.dockcount", "right.dockcount"]
    );
    Ok(())
}
